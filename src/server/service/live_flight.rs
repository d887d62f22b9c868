//! Live flight resolution against the Infinite Flight Live API.
//!
//! Session lists, session rosters and paged flight history are read through the cache;
//! flight plans are fetched per flight with bounded concurrency.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use crate::{
    model::flight::LiveFlightDto,
    server::{
        cache::{keys, Cache},
        error::Error,
        live::{
            model::{FlightHistoryPage, LiveFlight, Session},
            LiveApiClient,
        },
        model::va::VaConfig,
        util::callsign::{
            match_callsign_var, match_pilot_callsign, split_callsign, CallsignMatch, CallsignParts,
        },
    },
};

/// The pilot's presently tracked flight; built per request and never stored
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentFlight {
    pub flight: LiveFlight,
    pub parts: CallsignParts,
    pub session_id: String,
    /// Empty when the flight plan did not resolve
    pub origin: String,
    pub destination: String,
}

impl CurrentFlight {
    /// `ORIGIN-DESTINATION` when both ends resolved
    pub fn route(&self) -> Option<String> {
        (!self.origin.is_empty() && !self.destination.is_empty())
            .then(|| format!("{}-{}", self.origin, self.destination))
    }
}

/// Keeps the flights whose callsign fits the VA's prefix/suffix pattern.
///
/// A flight fits when either its variable alone or its prefix and variable joined together
/// match, so both `DAL 123` and `DAL123` style callsigns are recognised.
pub fn filter_va_flights(flights: Vec<LiveFlight>, prefix: &str, suffix: &str) -> Vec<LiveFlight> {
    flights
        .into_iter()
        .filter(|flight| {
            let parts = split_callsign(&flight.callsign);
            match_callsign_var(&parts.variable, prefix, suffix)
                || match_callsign_var(&parts.body(), prefix, suffix)
        })
        .collect()
}

/// Picks the live flight belonging to a pilot.
///
/// The strongest [`CallsignMatch`] wins; among equally strong matches the lowest flight ID is
/// taken so the result never depends on roster order.
pub fn select_pilot_flight(
    flights: &[LiveFlight],
    pilot_callsign: &str,
    prefix: &str,
    suffix: &str,
) -> Option<(LiveFlight, CallsignParts)> {
    let mut candidates: Vec<(CallsignMatch, &LiveFlight, CallsignParts)> = flights
        .iter()
        .filter_map(|flight| {
            let parts = split_callsign(&flight.callsign);
            match_pilot_callsign(&parts, pilot_callsign, prefix, suffix)
                .map(|strength| (strength, flight, parts))
        })
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.flight_id.cmp(&b.1.flight_id)));

    let best = candidates.first()?.0;
    let tied = candidates.iter().filter(|c| c.0 == best).count();
    if tied > 1 {
        tracing::warn!(
            callsign = %pilot_callsign,
            strength = ?best,
            candidates = tied,
            "Ambiguous live flight match, using lowest flight ID"
        );
    }

    candidates
        .into_iter()
        .next()
        .map(|(_, flight, parts)| (flight.clone(), parts))
}

pub struct LiveFlightService<'a> {
    cache: &'a dyn Cache,
    live: &'a LiveApiClient,
    flight_plan_concurrency: usize,
}

impl<'a> LiveFlightService<'a> {
    pub fn new(cache: &'a dyn Cache, live: &'a LiveApiClient, flight_plan_concurrency: usize) -> Self {
        Self {
            cache,
            live,
            flight_plan_concurrency: flight_plan_concurrency.max(1),
        }
    }

    async fn get_sessions(&self) -> Result<Vec<Session>, Error> {
        let live = self.live;

        self.cache
            .get_or_set(&keys::sessions(), keys::SESSIONS_TTL, move || async move {
                Ok(live.get_sessions().await?)
            })
            .await
    }

    /// Resolves a configured game server (session name or ID) to a session ID
    pub async fn resolve_session_id(&self, game_server: &str) -> Result<String, Error> {
        let game_server = game_server.trim();
        let sessions = self.get_sessions().await?;

        sessions
            .iter()
            .find(|s| s.id == game_server)
            .or_else(|| {
                sessions
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(game_server))
            })
            .map(|s| s.id.clone())
            .ok_or_else(|| Error::NotFound(format!("Game server '{}' is not online", game_server)))
    }

    async fn get_session_flights(&self, session_id: &str) -> Result<Vec<LiveFlight>, Error> {
        let live = self.live;

        self.cache
            .get_or_set(
                &keys::live_flights(session_id),
                keys::LIVE_FLIGHTS_TTL,
                move || async move { Ok(live.get_session_flights(session_id).await?) },
            )
            .await
    }

    /// The VA's session ID and the live flights that fit its callsign pattern
    ///
    /// # Returns
    /// - `Err(Error::Validation)` - The VA has no callsign prefix/suffix or no game server
    pub async fn get_va_flights(&self, va: &VaConfig) -> Result<(String, Vec<LiveFlight>), Error> {
        if !va.has_callsign_pattern() {
            return Err(Error::Validation(format!(
                "{} has no callsign prefix or suffix configured",
                va.name
            )));
        }
        let game_server = va.game_server.as_deref().ok_or_else(|| {
            Error::Validation(format!("{} has no game server configured", va.name))
        })?;

        let session_id = self.resolve_session_id(game_server).await?;
        let flights = self.get_session_flights(&session_id).await?;

        Ok((
            session_id,
            filter_va_flights(flights, &va.callsign_prefix, &va.callsign_suffix),
        ))
    }

    /// The VA's live roster with origin/destination from each flight plan
    pub async fn get_va_live_flights(&self, va: &VaConfig) -> Result<Vec<LiveFlightDto>, Error> {
        let (session_id, flights) = self.get_va_flights(va).await?;
        let routes = self.fetch_routes(&session_id, &flights).await;

        Ok(flights
            .into_iter()
            .zip(routes)
            .map(|(flight, (origin, destination))| LiveFlightDto {
                flight_id: flight.flight_id,
                callsign: flight.callsign,
                username: flight.username,
                aircraft_id: flight.aircraft_id,
                livery_id: flight.livery_id,
                altitude: flight.altitude,
                speed: flight.speed,
                origin,
                destination,
            })
            .collect())
    }

    /// Finds the pilot's current flight on the VA's game server
    ///
    /// # Returns
    /// - `Ok(CurrentFlight)` - Matching flight with its route resolved where possible
    /// - `Err(Error::NotFound)` - The pilot is not flying right now
    pub async fn find_current_flight(
        &self,
        va: &VaConfig,
        pilot_callsign: &str,
    ) -> Result<CurrentFlight, Error> {
        let (session_id, flights) = self.get_va_flights(va).await?;

        let (flight, parts) = select_pilot_flight(
            &flights,
            pilot_callsign,
            &va.callsign_prefix,
            &va.callsign_suffix,
        )
        .ok_or_else(|| {
            Error::NotFound(format!(
                "No live flight found for callsign {}{}{}",
                va.callsign_prefix, pilot_callsign, va.callsign_suffix
            ))
        })?;

        let (origin, destination) = self.fetch_route(&session_id, &flight.flight_id).await;

        Ok(CurrentFlight {
            flight,
            parts,
            session_id,
            origin,
            destination,
        })
    }

    /// One page of a user's flight history, cached per user and page
    pub async fn get_flight_history(
        &self,
        ifc_user_id: &str,
        page: u32,
    ) -> Result<FlightHistoryPage, Error> {
        let page = page.max(1);
        let live = self.live;

        self.cache
            .get_or_set(
                &keys::flight_history(ifc_user_id, page),
                keys::FLIGHT_HISTORY_TTL,
                move || async move { Ok(live.get_user_flights(ifc_user_id, page).await?) },
            )
            .await
    }

    /// Origin and destination for one flight; failures leave both empty
    async fn fetch_route(&self, session_id: &str, flight_id: &str) -> (String, String) {
        match self.live.get_flight_plan(session_id, flight_id).await {
            Ok(plan) => plan.origin_destination(),
            Err(e) => {
                tracing::debug!(flight_id = %flight_id, "Flight plan unavailable: {}", e);
                (String::new(), String::new())
            }
        }
    }

    /// Routes for many flights, in input order, with at most `flight_plan_concurrency`
    /// requests in flight
    async fn fetch_routes(&self, session_id: &str, flights: &[LiveFlight]) -> Vec<(String, String)> {
        bounded_in_order(flights.len(), self.flight_plan_concurrency, move |index| {
            self.fetch_route(session_id, &flights[index].flight_id)
        })
        .await
    }
}

/// Runs `task` for each index in `0..len` with at most `limit` tasks pending at once;
/// outputs come back in index order regardless of completion order
async fn bounded_in_order<T, F, Fut>(len: usize, limit: usize, task: F) -> Vec<T>
where
    F: Fn(usize) -> Fut,
    Fut: Future<Output = T>,
{
    let semaphore = Semaphore::new(limit.max(1));
    let mut outputs: Vec<Option<T>> = (0..len).map(|_| None).collect();

    let mut futures = FuturesUnordered::new();
    for index in 0..len {
        let semaphore = &semaphore;
        let task = &task;
        futures.push(async move {
            // Closed only if the semaphore is dropped, which cannot happen while borrowed
            let _permit = semaphore.acquire().await.ok();
            (index, task(index).await)
        });
    }

    while let Some((index, output)) = futures.next().await {
        outputs[index] = Some(output);
    }

    outputs.into_iter().flatten().collect()
}
