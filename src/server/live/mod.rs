//! Infinite Flight Live API v2 client.

pub mod model;

use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::server::{
    error::{config::ConfigError, live::LiveApiError, Error},
    live::model::{Envelope, FlightHistoryPage, FlightPlan, LiveFlight, LiveUser, Session},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserLookup<'a> {
    discourse_names: [&'a str; 1],
}

/// Client for the Live API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LiveApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl LiveApiClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let invalid = |reason: String| ConfigError::InvalidEnvValue {
            var: "LIVE_API_URL".to_string(),
            reason,
        };
        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid(format!("{} cannot have path segments", base_url)).into());
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Result<Url, LiveApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LiveApiError::Network(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Sends a request and unwraps the `{errorCode, result}` envelope
    async fn send<T>(&self, request: RequestBuilder) -> Result<T, LiveApiError>
    where
        T: DeserializeOwned,
    {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LiveApiError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| LiveApiError::Decode(e.to_string()))?;

        if envelope.error_code != 0 {
            return Err(LiveApiError::ErrorCode(envelope.error_code));
        }

        envelope
            .result
            .ok_or_else(|| LiveApiError::Decode("response is missing result".to_string()))
    }

    /// Lists the active multiplayer sessions (servers)
    pub async fn get_sessions(&self) -> Result<Vec<Session>, LiveApiError> {
        self.send(self.http.get(self.url(&["sessions"])?)).await
    }

    /// Every flight currently tracked on a session
    pub async fn get_session_flights(
        &self,
        session_id: &str,
    ) -> Result<Vec<LiveFlight>, LiveApiError> {
        let url = self.url(&["sessions", session_id, "flights"])?;
        self.send(self.http.get(url)).await
    }

    pub async fn get_flight_plan(
        &self,
        session_id: &str,
        flight_id: &str,
    ) -> Result<FlightPlan, LiveApiError> {
        let url = self.url(&["sessions", session_id, "flights", flight_id, "flightplan"])?;
        self.send(self.http.get(url)).await
    }

    /// One page (1-based) of a user's logbook
    pub async fn get_user_flights(
        &self,
        user_id: &str,
        page: u32,
    ) -> Result<FlightHistoryPage, LiveApiError> {
        let url = self.url(&["users", user_id, "flights"])?;
        self.send(self.http.get(url).query(&[("page", page.max(1))]))
            .await
    }

    /// Looks up a user by community username, `None` when no such user exists
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<LiveUser>, LiveApiError> {
        let body = UserLookup {
            discourse_names: [username],
        };

        match self
            .send::<Vec<LiveUser>>(self.http.post(self.url(&["users"])?).json(&body))
            .await
        {
            Ok(users) => Ok(users.into_iter().next()),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
