//! Dashboard state and the manually triggered refresh cycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::model::BinRecord;
use crate::ports::{BinSource, SourceError, ensure_unique_ids};
use crate::simulate::RefreshSimulator;
use crate::status::StatusCounts;

/// Simulated latency of a refresh cycle.
pub const DEFAULT_REFRESH_LATENCY: Duration = Duration::from_millis(1500);

static NEXT_DASHBOARD_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Whether a refresh cycle is in flight.
pub enum RefreshState {
    /// Ready to accept a refresh trigger.
    #[default]
    Idle,
    /// Waiting for the simulated latency to elapse.
    Refreshing,
}

/// Proof that a refresh cycle was started.
///
/// Only [`Dashboard::begin_refresh`] hands these out, and only while idle,
/// so at most one exists per dashboard at a time. A ticket only completes
/// the dashboard that issued it.
#[derive(Debug)]
#[must_use = "a refresh stays in flight until the ticket is completed"]
pub struct RefreshTicket {
    issuer: u64,
    latency: Duration,
}

impl RefreshTicket {
    /// Simulated latency this cycle waits for.
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Wait out the simulated latency without blocking the runtime.
    pub async fn elapsed(self) -> Self {
        tokio::time::sleep(self.latency).await;
        self
    }
}

/// In-memory view state: the monitored bins and the refresh flag.
pub struct Dashboard {
    id: u64,
    bins: Vec<BinRecord>,
    state: RefreshState,
    simulator: RefreshSimulator,
    latency: Duration,
    last_refresh: Option<DateTime<Local>>,
    completed_cycles: u64,
}

impl Dashboard {
    /// Build a dashboard over `bins`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::DuplicateBinId`] when two bins share an id.
    pub fn new(bins: Vec<BinRecord>, simulator: RefreshSimulator) -> Result<Self, SourceError> {
        ensure_unique_ids(&bins)?;
        Ok(Self {
            id: NEXT_DASHBOARD_ID.fetch_add(1, Ordering::Relaxed),
            bins,
            state: RefreshState::Idle,
            simulator,
            latency: DEFAULT_REFRESH_LATENCY,
            last_refresh: None,
            completed_cycles: 0,
        })
    }

    /// Load bins from `source` and build a dashboard over them.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the source fails or yields duplicate ids.
    pub async fn from_source(
        source: &dyn BinSource,
        simulator: RefreshSimulator,
    ) -> Result<Self, SourceError> {
        let bins = source.load().await?;
        info!(source = source.name(), bins = bins.len(), "loaded bins");
        Self::new(bins, simulator)
    }

    /// Override the simulated refresh latency.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Bins in display order.
    #[must_use]
    pub fn bins(&self) -> &[BinRecord] {
        &self.bins
    }

    /// Current refresh state.
    #[must_use]
    pub fn state(&self) -> RefreshState {
        self.state
    }

    /// Whether a refresh is in flight.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.state == RefreshState::Refreshing
    }

    /// Simulated latency of each refresh.
    #[must_use]
    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Bins per status tier.
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.bins)
    }

    /// Wall-clock time of the last completed refresh.
    #[must_use]
    pub fn last_refresh(&self) -> Option<DateTime<Local>> {
        self.last_refresh
    }

    /// Number of refresh cycles completed this session.
    #[must_use]
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    /// Start a refresh cycle.
    ///
    /// Returns `None` without touching any state if a refresh is already
    /// in flight.
    pub fn begin_refresh(&mut self) -> Option<RefreshTicket> {
        if self.is_refreshing() {
            debug!("refresh already in flight, trigger ignored");
            return None;
        }
        self.state = RefreshState::Refreshing;
        debug!(latency_ms = self.latency.as_millis(), "refresh started");
        Some(RefreshTicket {
            issuer: self.id,
            latency: self.latency,
        })
    }

    /// Finish the cycle `ticket` belongs to: apply the simulated readings and
    /// return to idle.
    ///
    /// Returns `false` and changes nothing when the ticket was issued by
    /// another dashboard or no refresh is in flight.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket) -> bool {
        let RefreshTicket { issuer, latency: _ } = ticket;
        if issuer != self.id || !self.is_refreshing() {
            debug!(issuer, dashboard = self.id, "foreign or stale refresh ticket ignored");
            return false;
        }
        self.bins = self.simulator.refresh(&self.bins);
        self.state = RefreshState::Idle;
        self.last_refresh = Some(Local::now());
        self.completed_cycles += 1;

        let counts = self.counts();
        info!(
            cycle = self.completed_cycles,
            low = counts.low,
            medium = counts.medium,
            high = counts.high,
            "refresh completed"
        );
        true
    }

    /// Run a whole refresh cycle in place.
    ///
    /// Returns `false` if a refresh was already in flight.
    pub async fn refresh(&mut self) -> bool {
        let Some(ticket) = self.begin_refresh() else {
            return false;
        };
        let ticket = ticket.elapsed().await;
        self.complete_refresh(ticket)
    }
}
