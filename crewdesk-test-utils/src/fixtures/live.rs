//! Live API mock endpoints.
//!
//! Every endpoint answers with the Live API envelope `{ "errorCode": 0, "result": ... }`.
//! Created mocks are kept on the context and checked by
//! [`assert_mocks`](crate::TestContext::assert_mocks).

use mockito::Matcher;
use serde_json::{json, Value};

use crate::TestContext;

impl TestContext {
    pub fn live<'a>(&'a mut self) -> LiveFixtures<'a> {
        LiveFixtures { setup: self }
    }
}

pub struct LiveFixtures<'a> {
    setup: &'a mut TestContext,
}

/// Wraps a result in the Live API envelope
pub fn envelope(result: Value) -> String {
    json!({ "errorCode": 0, "result": result }).to_string()
}

/// A live flight as returned by `/sessions/{id}/flights`
pub fn live_flight(flight_id: &str, callsign: &str, livery_id: &str) -> Value {
    json!({
        "flightId": flight_id,
        "userId": format!("user-{}", flight_id),
        "username": "pilot",
        "callsign": callsign,
        "aircraftId": "aircraft-1",
        "liveryId": livery_id,
        "altitude": 35000.4,
        "speed": 480.6,
        "latitude": 40.6,
        "longitude": -73.7,
        "virtualOrganization": null
    })
}

impl<'a> LiveFixtures<'a> {
    /// `GET /sessions` returning one session
    pub fn create_sessions_endpoint(
        &mut self,
        session_id: &str,
        name: &str,
        expected_requests: usize,
    ) {
        let body = envelope(json!([
            { "id": session_id, "name": name, "userCount": 1200, "maxUsers": 5000 }
        ]));

        let mock = self
            .setup
            .server
            .mock("GET", "/sessions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }

    /// `GET /sessions/{session_id}/flights`
    pub fn create_session_flights_endpoint(
        &mut self,
        session_id: &str,
        flights: Vec<Value>,
        expected_requests: usize,
    ) {
        let mock = self
            .setup
            .server
            .mock("GET", format!("/sessions/{}/flights", session_id).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(Value::Array(flights)))
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }

    /// `GET /sessions/{session_id}/flights/{flight_id}/flightplan`
    pub fn create_flight_plan_endpoint(
        &mut self,
        session_id: &str,
        flight_id: &str,
        waypoints: &[&str],
        expected_requests: usize,
    ) {
        let body = envelope(json!({
            "flightPlanId": format!("plan-{}", flight_id),
            "flightId": flight_id,
            "waypoints": waypoints
        }));

        let mock = self
            .setup
            .server
            .mock(
                "GET",
                format!("/sessions/{}/flights/{}/flightplan", session_id, flight_id).as_str(),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }

    /// `GET /users/{user_id}/flights?page={page}` returning one logbook entry
    pub fn create_user_flights_endpoint(
        &mut self,
        user_id: &str,
        page: u32,
        expected_requests: usize,
    ) {
        let body = envelope(json!({
            "pageIndex": page,
            "totalPages": 3,
            "totalCount": 30,
            "hasPreviousPage": page > 1,
            "hasNextPage": page < 3,
            "data": [{
                "id": format!("log-{}", page),
                "created": "2026-03-01T12:00:00Z",
                "aircraftId": "aircraft-1",
                "liveryId": "livery-1",
                "callsign": "DAL123",
                "server": "Expert",
                "dayTime": 120.0,
                "nightTime": 0.0,
                "totalTime": 120.0,
                "landingCount": 1,
                "originAirport": "KJFK",
                "destinationAirport": "EGLL",
                "xp": 1200
            }]
        }));

        let mock = self
            .setup
            .server
            .mock("GET", format!("/users/{}/flights", user_id).as_str())
            .match_query(Matcher::UrlEncoded("page".into(), page.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }

    /// `POST /users` resolving a community username; `None` answers "user not found"
    pub fn create_user_lookup_endpoint(
        &mut self,
        username: &str,
        user_id: Option<&str>,
        expected_requests: usize,
    ) {
        let body = match user_id {
            Some(user_id) => envelope(json!([
                { "userId": user_id, "discourseUsername": username, "virtualOrganization": null }
            ])),
            None => json!({ "errorCode": 1, "result": null }).to_string(),
        };

        let mock = self
            .setup
            .server
            .mock("POST", "/users")
            .match_body(Matcher::PartialJson(json!({ "discourseNames": [username] })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(expected_requests)
            .create();
        self.setup.keep(mock);
    }
}
