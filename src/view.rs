//! The presentation side the engine talks to. Engine operations return [`Effect`]
//! requests; a front-end applies them with [`dispatch`].

use crate::session::round::Resolution;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    RenderRound {
        label: &'static str,
        glyphs: Vec<&'static str>,
    },
    RenderAnswer {
        glyph: String,
        correct: bool,
    },
    RenderStats {
        score: u32,
        streak: u32,
        accuracy: u32,
    },
    RenderTimer {
        remaining_secs: u32,
        warning: bool,
    },
    /// The round is resolved; the next one may be started.
    RoundOver(Resolution),
}

pub trait View {
    fn render_round(&mut self, label: &str, glyphs: &[&str]);

    fn render_answer(&mut self, _glyph: &str, _correct: bool) {}

    fn render_stats(&mut self, score: u32, streak: u32, accuracy: u32);

    fn render_timer(&mut self, remaining_secs: u32, warning: bool);

    fn round_over(&mut self, _resolution: Resolution) {}

    /// Ask the player before wiping their progress.
    fn confirm_reset(&mut self) -> bool;
}

pub fn dispatch<V: View + ?Sized>(view: &mut V, effects: Vec<Effect>) {
    for effect in effects {
        match effect {
            Effect::RenderRound { label, glyphs } => view.render_round(label, &glyphs),
            Effect::RenderAnswer { glyph, correct } => view.render_answer(&glyph, correct),
            Effect::RenderStats {
                score,
                streak,
                accuracy,
            } => view.render_stats(score, streak, accuracy),
            Effect::RenderTimer {
                remaining_secs,
                warning,
            } => view.render_timer(remaining_secs, warning),
            Effect::RoundOver(resolution) => view.round_over(resolution),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct LogView {
        calls: Vec<String>,
    }

    impl View for LogView {
        fn render_round(&mut self, label: &str, glyphs: &[&str]) {
            self.calls.push(format!("round {label} {}", glyphs.join("")));
        }

        fn render_stats(&mut self, score: u32, streak: u32, accuracy: u32) {
            self.calls.push(format!("stats {score} {streak} {accuracy}"));
        }

        fn render_timer(&mut self, remaining_secs: u32, warning: bool) {
            self.calls.push(format!("timer {remaining_secs} {warning}"));
        }

        fn confirm_reset(&mut self) -> bool {
            false
        }
    }

    #[test]
    fn test_dispatch_in_order() {
        let mut view = LogView::default();
        dispatch(
            &mut view,
            vec![
                Effect::RenderRound {
                    label: "ka",
                    glyphs: vec!["き", "か"],
                },
                Effect::RenderTimer {
                    remaining_secs: 3,
                    warning: true,
                },
                Effect::RenderAnswer {
                    glyph: "き".to_string(),
                    correct: false,
                },
                Effect::RenderStats {
                    score: 0,
                    streak: 0,
                    accuracy: 0,
                },
                Effect::RoundOver(Resolution::TimedOut),
            ],
        );
        assert_eq!(
            view.calls,
            vec!["round ka きか", "timer 3 true", "stats 0 0 0"]
        );
    }
}
