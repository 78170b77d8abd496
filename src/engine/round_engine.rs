use std::collections::BTreeSet;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::difficulty::{self, Difficulty};
use crate::engine::selection;
use crate::kana::{ActiveInventory, Subset, Variant};
use crate::session::report::PracticeReport;
use crate::session::round::{Countdown, Phase, Resolution, RoundEvent, RoundState};
use crate::session::stats::SessionStats;
use crate::store::{ProgressStore, Storage};
use crate::view::{Effect, View};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub correct: bool,
}

/// Owns the session: settings, stats, the current round and its countdown, and the
/// progress store. All state changes go through this one owner.
pub struct RoundEngine<S> {
    store: ProgressStore<S>,
    variant: Variant,
    difficulty: Difficulty,
    subsets: BTreeSet<Subset>,
    active: ActiveInventory,
    stats: SessionStats,
    phase: Phase,
    round: Option<RoundState>,
    rounds_started: u64,
    rng: SmallRng,
}

impl<S: Storage> RoundEngine<S> {
    pub fn new(store: ProgressStore<S>, config: &Config) -> Self {
        let subsets = config.enabled_subsets();
        let active = ActiveInventory::resolve(config.variant, &subsets);
        Self {
            store,
            variant: config.variant,
            difficulty: config.difficulty,
            subsets: active.subsets().clone(),
            active,
            stats: SessionStats::default(),
            phase: Phase::Idle,
            round: None,
            rounds_started: 0,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Replace the entropy-seeded generator, for reproducible sessions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    // --- Accessors ---

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn subsets(&self) -> &BTreeSet<Subset> {
        &self.subsets
    }

    pub fn active_inventory(&self) -> &ActiveInventory {
        &self.active
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn store(&self) -> &ProgressStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgressStore<S> {
        &mut self.store
    }

    pub fn report(&self) -> PracticeReport {
        PracticeReport::build(self.variant, self.store.ledger(), &self.stats)
    }

    // --- Round lifecycle ---

    /// Cancel whatever round is in progress and start a fresh one.
    pub fn start_round(&mut self) -> Vec<Effect> {
        self.cancel_round();

        let Some((target_key, target_glyph)) = self.pick_target() else {
            tracing::warn!("no characters available, round not started");
            return Vec::new();
        };

        let distractors = selection::select_distractors(
            &mut self.rng,
            self.variant,
            self.active.entries(),
            target_glyph,
            self.store.ledger(),
            self.difficulty.distractor_count(),
        );
        let bubbles = selection::finalize_bubble_set(&mut self.rng, target_glyph, distractors);

        self.rounds_started += 1;
        let countdown = self
            .difficulty
            .time_limit_secs()
            .filter(|&limit| limit > 0)
            .map(Countdown::new);

        let mut effects = vec![
            Effect::RenderRound {
                label: target_key,
                glyphs: bubbles.clone(),
            },
            self.stats_effect(),
        ];
        if let Some(countdown) = &countdown {
            let remaining_secs = countdown.remaining_secs();
            effects.push(Effect::RenderTimer {
                remaining_secs,
                warning: difficulty::is_warning(remaining_secs),
            });
        }

        tracing::debug!(
            "round {} ({}, {}): {target_key} -> {target_glyph} among {}",
            self.rounds_started,
            self.variant,
            self.difficulty,
            bubbles.len()
        );
        self.round = Some(RoundState {
            id: self.rounds_started,
            target_key,
            target_glyph,
            bubbles,
            countdown,
        });
        self.transition(RoundEvent::Start);
        effects
    }

    /// The active inventory is never empty: `ActiveInventory::resolve` already forces
    /// the default subset on when nothing is enabled.
    fn pick_target(&mut self) -> Option<(&'static str, &'static str)> {
        let key = selection::select_target(
            &mut self.rng,
            self.variant,
            self.active.entries(),
            self.store.ledger(),
        )?;
        self.active.glyph_for(key).map(|glyph| (key, glyph))
    }

    /// Score one answer. Returns `None` when no round is waiting for an answer,
    /// in which case nothing changes.
    pub fn record_outcome(&mut self, glyph: &str) -> Option<Outcome> {
        if !self.phase.is_awaiting() {
            tracing::debug!("answer {glyph} ignored in {:?}", self.phase);
            return None;
        }
        let round = self.round.as_mut()?;
        let correct = glyph == round.target_glyph;

        if correct {
            self.stats.record_correct();
            round.countdown = None;
        } else {
            self.stats.record_miss();
            self.store.record_mistake(self.variant, glyph);
        }
        self.transition(RoundEvent::Answer { correct });
        Some(Outcome { correct })
    }

    /// `record_outcome` plus the view updates that go with it.
    pub fn choose(&mut self, glyph: &str) -> Vec<Effect> {
        let Some(outcome) = self.record_outcome(glyph) else {
            return Vec::new();
        };
        let mut effects = vec![
            Effect::RenderAnswer {
                glyph: glyph.to_string(),
                correct: outcome.correct,
            },
            self.stats_effect(),
        ];
        if outcome.correct {
            effects.push(Effect::RoundOver(Resolution::Correct));
        }
        effects
    }

    /// Feed elapsed wall time into the active countdown. Without an active
    /// countdown this does nothing.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<Effect> {
        if !self.phase.is_awaiting() {
            return Vec::new();
        }
        let Some(countdown) = self.round.as_mut().and_then(|r| r.countdown.as_mut()) else {
            return Vec::new();
        };

        let mut effects: Vec<Effect> = countdown
            .advance(elapsed)
            .into_iter()
            .map(|remaining_secs| Effect::RenderTimer {
                remaining_secs,
                warning: difficulty::is_warning(remaining_secs),
            })
            .collect();
        if countdown.is_expired() {
            effects.extend(self.time_out());
        }
        effects
    }

    fn time_out(&mut self) -> Vec<Effect> {
        let Some(round) = self.round.as_mut() else {
            return Vec::new();
        };
        round.countdown = None;
        let target_glyph = round.target_glyph;

        tracing::debug!("round {} timed out on {target_glyph}", round.id);
        self.stats.record_miss();
        self.store.record_mistake(self.variant, target_glyph);
        self.transition(RoundEvent::Expire);

        vec![
            self.stats_effect(),
            Effect::RoundOver(Resolution::TimedOut),
        ]
    }

    /// Stop the countdown of the current round. Safe to call at any time.
    pub fn cancel_active_timer(&mut self) {
        if let Some(round) = self.round.as_mut()
            && round.countdown.take().is_some()
        {
            tracing::debug!("countdown for round {} cancelled", round.id);
        }
    }

    fn cancel_round(&mut self) {
        self.cancel_active_timer();
        if self.phase != Phase::Idle {
            self.transition(RoundEvent::Cancel);
        }
    }

    fn transition(&mut self, event: RoundEvent) {
        match self.phase.on(event) {
            Some(next) => self.phase = next,
            None => tracing::debug!("{event:?} ignored in {:?}", self.phase),
        }
    }

    /// Abandon the current round without scoring it and start another.
    pub fn skip_round(&mut self) -> Vec<Effect> {
        self.start_round()
    }

    // --- Settings ---

    pub fn set_variant(&mut self, variant: Variant) -> Vec<Effect> {
        self.variant = variant;
        self.active = ActiveInventory::resolve(variant, &self.subsets);
        self.start_round()
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<Effect> {
        self.difficulty = difficulty;
        self.start_round()
    }

    /// An empty selection falls back to the default subset.
    pub fn set_subsets(&mut self, subsets: BTreeSet<Subset>) -> Vec<Effect> {
        self.active = ActiveInventory::resolve(self.variant, &subsets);
        if self.active.fell_back() {
            tracing::info!("no subsets selected, enabling {}", Subset::DEFAULT);
        }
        self.subsets = self.active.subsets().clone();
        self.start_round()
    }

    // --- Progress ---

    /// Wipe the mistake ledger and the session stats, then start a new round.
    pub fn reset_progress(&mut self) -> Vec<Effect> {
        self.store.reset();
        self.stats = SessionStats::default();
        self.start_round()
    }

    /// Reset only after the view confirms.
    pub fn request_reset<V: View + ?Sized>(&mut self, view: &mut V) -> Vec<Effect> {
        if view.confirm_reset() {
            self.reset_progress()
        } else {
            Vec::new()
        }
    }

    fn stats_effect(&self) -> Effect {
        Effect::RenderStats {
            score: self.stats.score,
            streak: self.stats.streak,
            accuracy: self.stats.accuracy(),
        }
    }
}
