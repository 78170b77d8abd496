use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Correct,
    TimedOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingAnswer,
    Resolved(Resolution),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    Start,
    Answer { correct: bool },
    Expire,
    Cancel,
}

impl Phase {
    /// Pure transition function. `None` means the event is not valid in this phase
    /// and must be ignored.
    ///
    /// A wrong answer keeps the round open: the player may keep guessing until they
    /// hit the target or the countdown expires.
    pub fn on(self, event: RoundEvent) -> Option<Phase> {
        match (self, event) {
            (Phase::Idle | Phase::Resolved(_), RoundEvent::Start) => Some(Phase::AwaitingAnswer),
            (Phase::AwaitingAnswer, RoundEvent::Answer { correct: true }) => {
                Some(Phase::Resolved(Resolution::Correct))
            }
            (Phase::AwaitingAnswer, RoundEvent::Answer { correct: false }) => {
                Some(Phase::AwaitingAnswer)
            }
            (Phase::AwaitingAnswer, RoundEvent::Expire) => {
                Some(Phase::Resolved(Resolution::TimedOut))
            }
            (Phase::AwaitingAnswer | Phase::Resolved(_), RoundEvent::Cancel) => Some(Phase::Idle),
            _ => None,
        }
    }

    pub fn is_awaiting(self) -> bool {
        matches!(self, Phase::AwaitingAnswer)
    }
}

/// Whole-second countdown fed by arbitrary elapsed durations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u32,
    carry: Duration,
}

impl Countdown {
    pub fn new(limit_secs: u32) -> Self {
        Self {
            remaining_secs: limit_secs,
            carry: Duration::ZERO,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Consume `elapsed` and return the remaining seconds after each whole second
    /// that passed. Sub-second leftovers carry over to the next call.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<u32> {
        self.carry += elapsed;
        let mut ticks = Vec::new();
        while self.carry >= ONE_SECOND && self.remaining_secs > 0 {
            self.carry -= ONE_SECOND;
            self.remaining_secs -= 1;
            ticks.push(self.remaining_secs);
        }
        ticks
    }
}

/// One round: the target, the shuffled bubbles on screen and the countdown, if any.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub id: u64,
    pub target_key: &'static str,
    pub target_glyph: &'static str,
    pub bubbles: Vec<&'static str>,
    /// `None` for untimed rounds and once the countdown has been cancelled.
    pub countdown: Option<Countdown>,
}

impl RoundState {
    pub fn distractors(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bubbles
            .iter()
            .copied()
            .filter(|&glyph| glyph != self.target_glyph)
    }

    pub fn remaining_secs(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining_secs)
    }
}
