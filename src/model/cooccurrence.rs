//! Co-occurrence model: how often byte b has been seen immediately after byte a.
//!
//! The table is order sensitive, count(a, b) and count(b, a) are independent, and it only
//! ever grows. Deciding the order of a pair never updates the table; the splitter calls
//! `record` separately.

use log::trace;

/// Successors ranked below this position are in the "top half" for the median split.
const MEDIAN: usize = 128;

/// Rule used to decide whether a pair is "in order".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderPolicy {
    /// count(p0, p1) > count(p1, p0)
    #[default]
    Direct,
    /// p1 is a top-half successor of p0 and p0 is not a top-half successor of p1.
    #[clap(name = "median")]
    MedianSplit,
    /// Compare how likely each byte is to follow the other, relative to its row total.
    Ratio,
}

/// 256 x 256 adjacency counts plus per-row totals.
pub struct Cooccurrence {
    /// counts[a][b] = number of times b followed a
    counts: Vec<[u64; 256]>,
    /// row_totals[a] = sum of counts[a][i] over all i
    row_totals: [u64; 256],
    policy: OrderPolicy,
}

impl Cooccurrence {
    /// Create an empty table that decides with `policy`.
    pub fn new(policy: OrderPolicy) -> Self {
        Self {
            counts: vec![[0; 256]; 256],
            row_totals: [0; 256],
            policy,
        }
    }

    /// The decision rule this table was built with.
    pub fn policy(&self) -> OrderPolicy {
        self.policy
    }

    /// Count one observation of `b` following `a`.
    pub fn record(&mut self, a: u8, b: u8) {
        self.counts[a as usize][b as usize] += 1;
        self.row_totals[a as usize] += 1;
    }

    /// Number of times `b` has followed `a`.
    pub fn count(&self, a: u8, b: u8) -> u64 {
        self.counts[a as usize][b as usize]
    }

    /// Number of observations with `a` as the first byte.
    pub fn row_total(&self, a: u8) -> u64 {
        self.row_totals[a as usize]
    }

    /// Decide whether `pair` is in order under the configured policy.
    pub fn decide(&self, pair: [u8; 2]) -> bool {
        let in_order = match self.policy {
            OrderPolicy::Direct => self.direct(pair),
            OrderPolicy::MedianSplit => self.median_split(pair),
            OrderPolicy::Ratio => self.ratio(pair),
        };
        trace!("{:?} decided {:02x} {:02x} -> {}", self.policy, pair[0], pair[1], in_order);
        in_order
    }

    fn direct(&self, [p0, p1]: [u8; 2]) -> bool {
        self.count(p0, p1) > self.count(p1, p0)
    }

    fn median_split(&self, [p0, p1]: [u8; 2]) -> bool {
        self.in_top_half(p0, p1) && !self.in_top_half(p1, p0)
    }

    /// The p0-after-p1 ratio count(p1, p0) / total(p1) beats the p1-after-p0 ratio
    /// count(p0, p1) / total(p0). Cross-multiplied in u128 so the products are exact.
    fn ratio(&self, [p0, p1]: [u8; 2]) -> bool {
        let lhs = self.count(p1, p0) as u128 * self.row_total(p0) as u128;
        let rhs = self.count(p0, p1) as u128 * self.row_total(p1) as u128;
        lhs > rhs
    }

    /// Position of `b` among all 256 successors of `a`, most frequent first. Equal counts
    /// are ordered by symbol value, smaller first.
    pub fn successor_rank(&self, a: u8, b: u8) -> usize {
        let row = &self.counts[a as usize];
        let target = row[b as usize];
        row.iter()
            .enumerate()
            .filter(|&(sym, &c)| c > target || (c == target && sym < b as usize))
            .count()
    }

    /// True if `b` ranks in the top half of the successors of `a`.
    pub fn in_top_half(&self, a: u8, b: u8) -> bool {
        self.successor_rank(a, b) < MEDIAN
    }
}

impl Default for Cooccurrence {
    fn default() -> Self {
        Self::new(OrderPolicy::default())
    }
}

impl std::fmt::Debug for Cooccurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cooccurrence")
            .field("policy", &self.policy)
            .field("observations", &self.row_totals.iter().sum::<u64>())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::{Cooccurrence, OrderPolicy};

    #[test]
    fn record_is_ordered_test() {
        let mut coo = Cooccurrence::default();
        coo.record(b'a', b'b');
        coo.record(b'a', b'b');
        coo.record(b'b', b'a');
        assert_eq!(coo.count(b'a', b'b'), 2);
        assert_eq!(coo.count(b'b', b'a'), 1);
        assert_eq!(coo.row_total(b'a'), 2);
        assert_eq!(coo.row_total(b'c'), 0);
    }

    #[test]
    fn direct_test() {
        let mut coo = Cooccurrence::new(OrderPolicy::Direct);
        assert!(!coo.decide([1, 2]));
        assert!(!coo.decide([2, 1]));
        coo.record(1, 2);
        assert!(coo.decide([1, 2]));
        assert!(!coo.decide([2, 1]));
        coo.record(2, 1);
        assert!(!coo.decide([1, 2]));
        // A byte paired with itself is never strictly greater than itself
        coo.record(7, 7);
        assert!(!coo.decide([7, 7]));
    }

    #[test]
    fn successor_rank_ties_test() {
        let mut coo = Cooccurrence::new(OrderPolicy::MedianSplit);
        // Empty row: ranking is by symbol value
        assert_eq!(coo.successor_rank(9, 0), 0);
        assert_eq!(coo.successor_rank(9, 200), 200);
        assert!(coo.in_top_half(9, 127));
        assert!(!coo.in_top_half(9, 128));
        coo.record(9, 250);
        assert_eq!(coo.successor_rank(9, 250), 0);
        assert_eq!(coo.successor_rank(9, 0), 1);
        assert!(!coo.in_top_half(9, 127));
    }

    #[test]
    fn median_split_test() {
        let mut coo = Cooccurrence::new(OrderPolicy::MedianSplit);
        // Fresh table: both low symbols are top-half successors of each other
        assert!(!coo.decide([1, 2]));
        // 200 is not a top-half successor of anything yet, 1 is
        assert!(!coo.decide([1, 200]));
        assert!(coo.decide([200, 1]));
        // Promote 200 into the top half after 1, and keep 1 out of the top half after 200
        coo.record(1, 200);
        for s in 128..=255 {
            if s != 200 {
                coo.record(200, s);
            }
        }
        coo.record(200, 0);
        assert!(coo.in_top_half(1, 200));
        assert!(!coo.in_top_half(200, 1));
        assert!(coo.decide([1, 200]));
        assert!(!coo.decide([200, 1]));
    }

    #[test]
    fn ratio_test() {
        let mut coo = Cooccurrence::new(OrderPolicy::Ratio);
        // Empty table: 0 > 0 is false
        assert!(!coo.decide([1, 2]));
        // 2 -> 1 is all that 2 ever does, 1 -> 2 is rare for 1
        coo.record(2, 1);
        coo.record(1, 2);
        for _ in 0..9 {
            coo.record(1, 3);
        }
        // lhs = count(2,1) * total(1) = 1 * 10, rhs = count(1,2) * total(2) = 1 * 1
        assert!(coo.decide([1, 2]));
        assert!(!coo.decide([2, 1]));
    }

    #[test]
    fn ratio_wide_product_test() {
        let mut coo = Cooccurrence::new(OrderPolicy::Ratio);
        coo.counts[1][2] = u64::MAX / 2;
        coo.row_totals[1] = u64::MAX;
        coo.counts[2][1] = u64::MAX / 3;
        coo.row_totals[2] = u64::MAX;
        // Both products exceed u64, the comparison is still exact
        assert!(!coo.decide([1, 2]));
        assert!(coo.decide([2, 1]));
    }
}
