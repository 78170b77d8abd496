//! Mistake-weighted selection of the target syllable and its distractors.
//!
//! Every candidate gets weight `mistakes + 1`, so a character with more recorded
//! mistakes is drawn proportionally more often while a mastered one (zero mistakes)
//! keeps weight 1 and is never excluded.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::kana::Variant;
use crate::store::MistakeLedger;

pub fn weight(mistakes: u32) -> u64 {
    u64::from(mistakes) + 1
}

/// Multiset where each candidate appears `weight` times, held as running totals
/// of the weights rather than repeated slots.
#[derive(Clone, Debug)]
pub struct WeightedPool<'a> {
    items: Vec<&'a str>,
    cumulative: Vec<u64>,
}

impl<'a> WeightedPool<'a> {
    pub fn build(candidates: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut items = Vec::new();
        let mut cumulative = Vec::new();
        let mut total: u64 = 0;
        for (item, mistakes) in candidates {
            total = total.saturating_add(weight(mistakes));
            items.push(item);
            cumulative.push(total);
        }
        Self { items, cumulative }
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.cumulative.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct candidates the pool was built from.
    pub fn candidate_count(&self) -> usize {
        self.items.len()
    }

    fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let slot = rng.gen_range(0..self.total_weight());
        Some(self.cumulative.partition_point(|&end| end <= slot))
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a str> {
        self.pick_index(rng)
            .and_then(|idx| self.items.get(idx).copied())
    }

    /// Draw one candidate and remove it from the pool. Repeated calls match
    /// redrawing until an unseen candidate comes up.
    pub fn take<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&'a str> {
        let idx = self.pick_index(rng)?;
        let removed = self.cumulative[idx] - if idx == 0 { 0 } else { self.cumulative[idx - 1] };
        for end in &mut self.cumulative[idx + 1..] {
            *end -= removed;
        }
        self.cumulative.remove(idx);
        Some(self.items.remove(idx))
    }
}

/// Pick a syllable key from `entries` (key, glyph pairs of one variant).
/// Returns `None` only when `entries` is empty.
pub fn select_target<'a, R: Rng + ?Sized>(
    rng: &mut R,
    variant: Variant,
    entries: &[(&'a str, &'a str)],
    ledger: &MistakeLedger,
) -> Option<&'a str> {
    let pool = WeightedPool::build(
        entries
            .iter()
            .map(|&(key, glyph)| (key, ledger.get(variant, glyph))),
    );
    pool.draw(rng)
}

/// Pick up to `count` distinct glyphs from `entries`, never the target.
///
/// Draws are weighted and each pick leaves the pool, so error-prone glyphs show up
/// as distractors more often and none repeats. The result holds exactly
/// `min(count, available)` glyphs.
pub fn select_distractors<'a, R: Rng + ?Sized>(
    rng: &mut R,
    variant: Variant,
    entries: &[(&'a str, &'a str)],
    target_glyph: &str,
    ledger: &MistakeLedger,
    count: usize,
) -> Vec<&'a str> {
    let mut pool = WeightedPool::build(
        entries
            .iter()
            .filter(|&&(_, glyph)| glyph != target_glyph)
            .map(|&(_, glyph)| (glyph, ledger.get(variant, glyph))),
    );

    let wanted = count.min(pool.candidate_count());
    let mut picked = Vec::with_capacity(wanted);
    while picked.len() < wanted {
        let Some(glyph) = pool.take(rng) else {
            break;
        };
        picked.push(glyph);
    }
    picked
}

/// Target plus distractors in uniformly shuffled order.
pub fn finalize_bubble_set<'a, R: Rng + ?Sized>(
    rng: &mut R,
    target_glyph: &'a str,
    distractors: Vec<&'a str>,
) -> Vec<&'a str> {
    let mut bubbles = distractors;
    bubbles.push(target_glyph);
    bubbles.shuffle(rng);
    bubbles
}
