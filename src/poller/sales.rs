//! Sales feed poller: short-period event fetch + card assembly.

use super::{CycleOutcome, Generation, PollPhase, TickGate};
use crate::client::OverlayClient;
use crate::config::SalesPollConfig;
use crate::domain::sales::{session_high, SaleAnimationTracker};
use crate::render::view::{HighCard, SaleCard, SalesView};

use chrono::Utc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Message shown in the error banner region on a degraded cycle.
const DEGRADED_MESSAGE: &str = "Error loading sales feed";

/// Polls the marketplace events provider and assembles the sales widget view.
pub struct SalesPoller {
    client: OverlayClient,
    cfg: SalesPollConfig,
    tracker: SaleAnimationTracker,
    generation: Generation,
    gate: TickGate,
    phase: PollPhase,
    last_outcome: Option<CycleOutcome>,
}

impl SalesPoller {
    pub fn new(client: OverlayClient, cfg: SalesPollConfig) -> Self {
        let tracker = SaleAnimationTracker::new(cfg.animation_ms);
        Self {
            client,
            cfg,
            tracker,
            generation: Generation::default(),
            gate: TickGate::default(),
            phase: PollPhase::default(),
            last_outcome: None,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome
    }

    fn all_time_high_card(&self) -> HighCard {
        match &self.cfg.all_time_high {
            Some(config) => HighCard::from_all_time_high(config),
            None => HighCard::placeholder(HighCard::ALL_TIME_LABEL),
        }
    }

    /// Run one poll cycle anchored at the current wall clock.
    pub async fn tick(&mut self) -> Option<SalesView> {
        let now = Utc::now();
        self.tick_at(now.timestamp(), now.timestamp_millis()).await
    }

    /// Run one poll cycle anchored at `now_unix` / `now_ms`.
    ///
    /// Returns `None` when the tick was skipped (cycle already in flight) or
    /// the response arrived stale.
    pub async fn tick_at(&mut self, now_unix: i64, now_ms: i64) -> Option<SalesView> {
        if !self.gate.try_begin() {
            tracing::debug!("sales tick skipped; previous cycle still in flight");
            return None;
        }
        let stamp = self.generation.issue();
        self.phase = PollPhase::Fetching;

        let result = self
            .client
            .sales()
            .recent(&self.cfg.collection, self.cfg.limit)
            .await;

        self.phase = PollPhase::Idle;
        self.gate.end();

        if !self.generation.is_latest(stamp) {
            tracing::debug!(stamp, "discarding superseded sales response");
            return None;
        }

        let view = match result {
            Ok(events) => {
                let session_card = session_high(&events, now_unix, self.cfg.session_window_secs)
                    .map(|ev| HighCard::from_sale(HighCard::SESSION_LABEL, ev))
                    .unwrap_or_else(|| HighCard::placeholder(HighCard::SESSION_LABEL));

                let mut cards = Vec::new();
                for event in events.iter().take(self.cfg.limit as usize) {
                    let rarity = self.client.rarity().resolve(&event.nft).await;
                    let key = event.dedup_key();
                    let end = self.tracker.observe(&key, now_ms);
                    cards.push(SaleCard::build(event, rarity.as_ref(), now_ms < end));
                }

                self.last_outcome = Some(CycleOutcome::Applied);
                SalesView::new(cards, session_card, self.all_time_high_card())
            }
            Err(err) => {
                tracing::warn!(error = %err, collection = %self.cfg.collection, "sales poll degraded");
                self.last_outcome = Some(CycleOutcome::Degraded);
                SalesView::degraded(self.all_time_high_card(), DEGRADED_MESSAGE)
            }
        };

        Some(view)
    }

    /// Poll on the configured interval until the consumer goes away.
    pub async fn run(mut self, tx: mpsc::Sender<SalesView>) {
        let mut interval =
            tokio::time::interval(Duration::from_secs(self.cfg.poll_interval_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            if let Some(view) = self.tick().await {
                if tx.send(view).await.is_err() {
                    tracing::debug!("sales consumer dropped; stopping poller");
                    break;
                }
            }
        }
    }
}
