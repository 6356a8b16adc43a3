//! Market metrics poller: long-period chart fetch + derived widget state.

use super::{CycleOutcome, Generation, PollPhase, TickGate};
use crate::client::OverlayClient;
use crate::config::MarketPollConfig;
use crate::domain::market::{metrics, LiveSampleBuffer};
use crate::render::view::MetricsView;

use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Message shown in the error banner region on a degraded cycle.
const DEGRADED_MESSAGE: &str = "Error loading market data";

/// Polls the market-data provider and derives the price widget view.
pub struct MetricsPoller {
    client: OverlayClient,
    cfg: MarketPollConfig,
    live: LiveSampleBuffer,
    generation: Generation,
    gate: TickGate,
    phase: PollPhase,
    last_outcome: Option<CycleOutcome>,
    last_price: Option<String>,
}

impl MetricsPoller {
    pub fn new(client: OverlayClient, cfg: MarketPollConfig) -> Self {
        let live = LiveSampleBuffer::new(cfg.live_capacity.max(2));
        Self {
            client,
            cfg,
            live,
            generation: Generation::default(),
            gate: TickGate::default(),
            phase: PollPhase::default(),
            last_outcome: None,
            last_price: None,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome
    }

    /// Run one poll cycle anchored at the current wall clock.
    pub async fn tick(&mut self) -> Option<MetricsView> {
        self.tick_at(Utc::now().timestamp_millis()).await
    }

    /// Run one poll cycle anchored at `now_ms`.
    ///
    /// Returns `None` when the tick was skipped (cycle already in flight) or
    /// the response arrived stale.
    pub async fn tick_at(&mut self, now_ms: i64) -> Option<MetricsView> {
        if !self.gate.try_begin() {
            tracing::debug!("metrics tick skipped; previous cycle still in flight");
            return None;
        }
        let stamp = self.generation.issue();
        self.phase = PollPhase::Fetching;

        let result = self
            .client
            .market()
            .chart(&self.cfg.asset_id, self.cfg.lookback_days)
            .await;

        self.phase = PollPhase::Idle;
        self.gate.end();

        if !self.generation.is_latest(stamp) {
            tracing::debug!(stamp, "discarding superseded metrics response");
            return None;
        }

        let view = match result {
            Ok(chart) => {
                let snapshot = metrics::derive(
                    &chart,
                    now_ms,
                    &self.cfg.change_windows,
                    self.cfg.range_window,
                );

                if let Some(price) = snapshot.price_usd.filter(|p| p.is_finite()) {
                    self.live.push(price);
                }

                let view = MetricsView::build(
                    &snapshot,
                    &chart,
                    &self.live,
                    self.cfg.badge_window,
                    self.cfg.range_window,
                    self.cfg.live_delta_points,
                    true,
                    self.last_price.as_deref(),
                );
                self.last_price = Some(view.price.clone());
                self.last_outcome = Some(CycleOutcome::Applied);
                view
            }
            Err(err) => {
                tracing::warn!(error = %err, asset = %self.cfg.asset_id, "metrics poll degraded");
                self.last_outcome = Some(CycleOutcome::Degraded);
                MetricsView::degraded(
                    self.cfg.badge_window,
                    self.cfg.range_window,
                    DEGRADED_MESSAGE,
                )
            }
        };

        Some(view)
    }

    /// Poll on the configured interval until the consumer goes away.
    ///
    /// The first cycle runs immediately. A tick that would overlap a running
    /// cycle is skipped, and the loop carries on regardless of cycle outcome
    /// — the fixed period is the retry schedule.
    pub async fn run(mut self, tx: mpsc::Sender<MetricsView>) {
        let mut interval =
            tokio::time::interval(Duration::from_secs(self.cfg.poll_interval_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            if let Some(view) = self.tick().await {
                if tx.send(view).await.is_err() {
                    tracing::debug!("metrics consumer dropped; stopping poller");
                    break;
                }
            }
        }
    }
}
