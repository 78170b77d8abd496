use crate::kana::{Subset, Variant};
use crate::session::stats::SessionStats;
use crate::store::MistakeLedger;

/// How many characters the report lists at most.
pub const REPORT_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct TroubleEntry {
    pub key: &'static str,
    pub glyph: &'static str,
    pub mistakes: u32,
    /// Mistakes relative to the worst character, 0..=100.
    pub share_percent: f64,
}

/// Characters most in need of practice for one variant, plus session totals.
#[derive(Clone, Debug, PartialEq)]
pub struct PracticeReport {
    pub variant: Variant,
    pub trouble: Vec<TroubleEntry>,
    pub score: u32,
    pub total_attempts: u32,
    pub accuracy: u32,
}

impl PracticeReport {
    pub fn build(variant: Variant, ledger: &MistakeLedger, stats: &SessionStats) -> Self {
        let mut ranked: Vec<(&'static str, &'static str, u32)> = Subset::all()
            .iter()
            .flat_map(|&subset| variant.table(subset).iter())
            .map(|&(key, glyph)| (key, glyph, ledger.get(variant, glyph)))
            .collect();
        // stable: ties keep inventory order
        ranked.sort_by(|a, b| b.2.cmp(&a.2));

        let worst = ranked.first().map(|r| r.2).unwrap_or(0);
        let trouble = ranked
            .into_iter()
            .take(REPORT_LIMIT)
            .filter(|&(_, _, mistakes)| mistakes > 0)
            .map(|(key, glyph, mistakes)| TroubleEntry {
                key,
                glyph,
                mistakes,
                share_percent: mistakes as f64 / worst as f64 * 100.0,
            })
            .collect();

        Self {
            variant,
            trouble,
            score: stats.score,
            total_attempts: stats.total_attempts,
            accuracy: stats.accuracy(),
        }
    }

    pub fn has_mistakes(&self) -> bool {
        !self.trouble.is_empty()
    }
}
