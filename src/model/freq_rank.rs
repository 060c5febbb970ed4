//! Frequency rank model: a self-adjusting total order over the 256 byte values.
//!
//! Every symbol holds a distinct rank value, starting from the identity. Promoting a symbol
//! bumps its rank by one; if that value is already taken, the two symbols trade places and
//! the promoted symbol keeps climbing until it reaches a free value. Each climb moves the
//! symbols it passes down by one and leaves a free value just under the one it lands on, so
//! the next promotion of a lower symbol stops in that gap, below the previous climber.
//!
//! Only the relative order of ranks means anything. The values are not occurrence counts.

use log::warn;
use rustc_hash::FxHashMap;

/// A promotion can move past at most every other symbol once.
const MAX_PROMOTE_STEPS: usize = 256;

/// How many of the canonicalized pair bytes get promoted after each pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PromoteBreadth {
    /// Promote the low output byte only.
    #[default]
    First,
    /// Promote the low output byte, then the high output byte.
    Both,
}

/// Injective rank assignment over all byte values.
#[derive(Clone, Debug)]
pub struct FreqRank {
    /// ranks[symbol] = rank value
    ranks: [u64; 256],
    /// rank value -> symbol holding it
    holders: FxHashMap<u64, u8>,
}

impl FreqRank {
    /// Identity ranking: rank(i) = i.
    pub fn new() -> Self {
        let mut holders = FxHashMap::default();
        holders.reserve(256);
        let mut ranks = [0_u64; 256];
        for (sym, rank) in ranks.iter_mut().enumerate() {
            *rank = sym as u64;
            holders.insert(sym as u64, sym as u8);
        }
        Self { ranks, holders }
    }

    /// Current rank value of `sym`.
    pub fn rank(&self, sym: u8) -> u64 {
        self.ranks[sym as usize]
    }

    /// True if `a` currently ranks above `b`.
    pub fn compare(&self, a: u8, b: u8) -> bool {
        self.ranks[a as usize] > self.ranks[b as usize]
    }

    /// Raise `sym` by one rank, swapping with whichever symbol holds the target value until
    /// a free value is reached. Returns the number of swaps performed.
    pub fn promote(&mut self, sym: u8) -> usize {
        let mut swaps = 0;

        loop {
            let current = self.ranks[sym as usize];
            let next = current + 1;
            match self.holders.get(&next).copied() {
                Some(other) => {
                    // Trade places: other drops to our old value, we take next and try again
                    debug_assert_ne!(other, sym);
                    self.ranks[other as usize] = current;
                    self.ranks[sym as usize] = next;
                    self.holders.insert(current, other);
                    self.holders.insert(next, sym);
                    swaps += 1;
                    debug_assert!(swaps <= MAX_PROMOTE_STEPS);
                    if swaps > MAX_PROMOTE_STEPS {
                        warn!("Promotion of {:02x} did not settle after {} swaps", sym, swaps);
                        break;
                    }
                }
                None => {
                    self.holders.remove(&current);
                    self.holders.insert(next, sym);
                    self.ranks[sym as usize] = next;
                    break;
                }
            }
        }

        debug_assert!(self.is_injective());
        swaps
    }

    /// Promote the bytes `breadth` selects from a canonicalized pair.
    pub fn update(&mut self, out: [u8; 2], breadth: PromoteBreadth) {
        self.promote(out[0]);
        if breadth == PromoteBreadth::Both {
            self.promote(out[1]);
        }
    }

    /// Check that no two symbols share a rank and that the inverse index agrees.
    pub fn is_injective(&self) -> bool {
        let mut seen = self.ranks.to_vec();
        seen.sort_unstable();
        seen.dedup();
        seen.len() == 256
            && self.holders.len() == 256
            && self
                .ranks
                .iter()
                .enumerate()
                .all(|(sym, rank)| self.holders.get(rank) == Some(&(sym as u8)))
    }

    /// Symbols ordered from highest to lowest rank.
    pub fn order(&self) -> Vec<u8> {
        let mut syms: Vec<u8> = (0..=255).collect();
        syms.sort_unstable_by(|&a, &b| self.rank(b).cmp(&self.rank(a)));
        syms
    }
}

impl Default for FreqRank {
    fn default() -> Self {
        Self::new()
    }
}
