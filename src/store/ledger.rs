use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kana::Variant;

/// Mistake counts keyed by variant, then glyph.
///
/// Serializes as `{"hiragana": {"あ": 0, ...}, "katakana": {...}}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MistakeLedger {
    counts: BTreeMap<Variant, BTreeMap<String, u32>>,
}

impl MistakeLedger {
    /// A ledger with a zero entry for every glyph of both full inventories.
    pub fn zeroed() -> Self {
        let mut ledger = Self::default();
        ledger.cover_inventories();
        ledger
    }

    /// Add zero entries for any inventory glyph that has none. Existing counts are kept.
    pub fn cover_inventories(&mut self) {
        for &variant in Variant::all() {
            let counts = self.counts.entry(variant).or_default();
            for glyph in variant.glyphs() {
                counts.entry(glyph.to_string()).or_insert(0);
            }
        }
    }

    pub fn get(&self, variant: Variant, glyph: &str) -> u32 {
        self.counts
            .get(&variant)
            .and_then(|counts| counts.get(glyph))
            .copied()
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub fn contains(&self, variant: Variant, glyph: &str) -> bool {
        self.counts
            .get(&variant)
            .is_some_and(|counts| counts.contains_key(glyph))
    }

    /// Returns the new count.
    pub fn increment(&mut self, variant: Variant, glyph: &str) -> u32 {
        let count = self
            .counts
            .entry(variant)
            .or_default()
            .entry(glyph.to_string())
            .or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    /// Copy every count from `other` into this ledger, overwriting shared entries.
    pub fn merge_from(&mut self, other: MistakeLedger) {
        for (variant, counts) in other.counts {
            self.counts.entry(variant).or_default().extend(counts);
        }
    }

    /// Zero every entry and make sure every inventory glyph is present.
    pub fn clear(&mut self) {
        for counts in self.counts.values_mut() {
            counts.values_mut().for_each(|c| *c = 0);
        }
        self.cover_inventories();
    }

    pub fn entries(&self, variant: Variant) -> impl Iterator<Item = (&str, u32)> {
        self.counts
            .get(&variant)
            .into_iter()
            .flat_map(|counts| counts.iter().map(|(glyph, &count)| (glyph.as_str(), count)))
    }

    pub fn total(&self, variant: Variant) -> u32 {
        self.entries(variant).map(|(_, count)| count).sum()
    }
}
