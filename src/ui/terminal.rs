use std::io::{self, Write};

use crate::session::report::PracticeReport;
use crate::session::round::Resolution;
use crate::view::View;

/// Somewhere to read one line of user input from.
pub trait LineSource {
    fn next_line(&self) -> Option<String>;
}

impl LineSource for io::Stdin {
    fn next_line(&self) -> Option<String> {
        let mut line = String::new();
        match self.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    }
}

/// Plain line-oriented front-end: one line per render call.
pub struct TerminalView<'a, W: Write> {
    out: W,
    input: &'a dyn LineSource,
    label: String,
}

impl<'a, W: Write> TerminalView<'a, W> {
    pub fn new(out: W, input: &'a dyn LineSource) -> Self {
        Self {
            out,
            input,
            label: String::new(),
        }
    }

    pub fn print_help(&mut self) {
        let _ = writeln!(
            self.out,
            "Pick the bubble matching the syllable: type its number or the character itself.\n\
             h / k        hiragana / katakana\n\
             d <tier>     difficulty: easy, medium, hard\n\
             s <subsets>  comma separated: basic, voiced, combination\n\
             n            new round\n\
             stats        characters to practice\n\
             reset        wipe all progress\n\
             q            quit"
        );
    }

    pub fn print_report(&mut self, report: &PracticeReport) {
        let _ = write!(self.out, "{}", format_report(report));
    }

    pub fn message(&mut self, text: &str) {
        let _ = writeln!(self.out, "  {text}");
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> View for TerminalView<'_, W> {
    fn render_round(&mut self, label: &str, glyphs: &[&str]) {
        self.label = label.to_string();
        let bubbles: Vec<String> = glyphs
            .iter()
            .enumerate()
            .map(|(i, glyph)| format!("[{}] {glyph}", i + 1))
            .collect();
        let _ = writeln!(self.out, "\n  {label}\n  {}", bubbles.join("  "));
    }

    fn render_answer(&mut self, glyph: &str, correct: bool) {
        if correct {
            let _ = writeln!(self.out, "  ✓ {glyph}");
        } else {
            let _ = writeln!(self.out, "  ✗ {glyph} is not {}, try again", self.label);
        }
    }

    fn render_stats(&mut self, score: u32, streak: u32, accuracy: u32) {
        let _ = writeln!(
            self.out,
            "  score {score} | streak {streak} | accuracy {accuracy}%"
        );
    }

    fn render_timer(&mut self, remaining_secs: u32, warning: bool) {
        let mark = if warning { "!" } else { "" };
        let _ = writeln!(self.out, "  {remaining_secs}s{mark}");
    }

    fn round_over(&mut self, resolution: Resolution) {
        if resolution == Resolution::TimedOut {
            let _ = writeln!(self.out, "  time's up ({})", self.label);
        }
    }

    fn confirm_reset(&mut self) -> bool {
        let _ = write!(
            self.out,
            "Reset all progress? This cannot be undone. [y/N] "
        );
        let _ = self.out.flush();
        self.input
            .next_line()
            .is_some_and(|line| matches!(line.trim(), "y" | "Y" | "yes"))
    }
}

pub fn format_report(report: &PracticeReport) -> String {
    let mut text = String::new();
    if report.has_mistakes() {
        text.push_str(&format!("Characters to practice ({}):\n", report.variant));
        for entry in &report.trouble {
            let bar = "#".repeat((entry.share_percent / 10.0).round() as usize);
            text.push_str(&format!(
                "  {} {:<4} {:>3} mistakes  {bar}\n",
                entry.glyph, entry.key, entry.mistakes
            ));
        }
    } else {
        text.push_str("No mistakes yet! Keep practicing!\n");
    }
    text.push_str(&format!(
        "Score {}  Total attempts {}  Accuracy {}%\n",
        report.score, report.total_attempts, report.accuracy
    ));
    text
}
