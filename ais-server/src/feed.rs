//! Live TCP feed: collects Class A position reports into snapshot windows.
//!
//! Every interval the vessels seen since the last tick are published to the
//! web state and the window starts over. One connection is made; when the
//! feed closes the final window is published and the HTTP side keeps serving
//! it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::io::BufReader;
use tokio::net::TcpStream;
use tracing::{debug, error, info, warn};

use ais_core::{AisMessage, ClassAPositionReport};

use crate::pipeline::{self, Counts, Event};
use crate::web::AppState;

/// One vessel in a snapshot: the latest report plus its rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ShipData {
    pub data: ClassAPositionReport,
    pub human: String,
}

impl ShipData {
    pub fn new(data: ClassAPositionReport) -> Self {
        let human = data.to_string();
        ShipData { data, human }
    }
}

/// Accumulates events for the current window.
#[derive(Debug, Default)]
pub struct Collector {
    seen: HashMap<u32, ShipData>,
    pub counts: Counts,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: Event) {
        self.counts.record(&event);
        match event {
            Event::Decoded(AisMessage::ClassAPosition(report)) => {
                // Latest report wins within a window
                self.seen
                    .insert(report.position.mmsi, ShipData::new(report));
            }
            Event::Decoded(_) => {}
            Event::Undecodable { message, error } => {
                debug!(msg_type = message.msg_type, %error, "skipping message");
            }
            Event::Failed(failed) => {
                debug!(issue = %failed.issue, sentence = %failed.sentence, "rejected sentence");
            }
        }
    }

    /// Number of vessels in the current window.
    pub fn pending(&self) -> usize {
        self.seen.len()
    }

    /// End the current window, returning its vessels ordered by MMSI.
    pub fn take_snapshot(&mut self) -> Vec<ShipData> {
        let mut ships: Vec<ShipData> = self.seen.drain().map(|(_, ship)| ship).collect();
        ships.sort_by_key(|s| s.data.position.mmsi);
        ships
    }
}

/// Move the current window into the published snapshot.
pub fn publish(state: &AppState) -> usize {
    let ships = state
        .collector
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take_snapshot();
    let count = ships.len();
    *state
        .snapshot
        .write()
        .unwrap_or_else(PoisonError::into_inner) = ships;
    count
}

/// Connect to `addr` and feed its lines through the pipeline until the
/// connection closes.
pub async fn run_feed(
    addr: String,
    state: Arc<AppState>,
    capacity: usize,
    interval: Duration,
) -> std::io::Result<()> {
    let stream = TcpStream::connect(&addr).await?;
    info!(%addr, "connected to feed");

    let ticker_state = Arc::clone(&state);
    let ticker = tokio::spawn(async move {
        let mut ticks = tokio::time::interval(interval);
        // The first tick completes immediately
        ticks.tick().await;
        loop {
            ticks.tick().await;
            let vessels = publish(&ticker_state);
            debug!(vessels, "published snapshot");
        }
    });

    let collector_state = Arc::clone(&state);
    let result = pipeline::process(BufReader::new(stream), capacity, move |event| {
        collector_state
            .collector
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(event);
    })
    .await;

    ticker.abort();
    let vessels = publish(&state);

    match result {
        Ok(lines) => {
            info!(lines, vessels, "feed closed");
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "feed read failed");
            Err(e)
        }
    }
}

/// Spawn [`run_feed`], logging instead of propagating its failure.
pub fn spawn_feed(addr: String, state: Arc<AppState>, capacity: usize, interval: Duration) {
    tokio::spawn(async move {
        if let Err(e) = run_feed(addr.clone(), state, capacity, interval).await {
            error!(%addr, error = %e, "feed stopped");
        }
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
