//! PairSplitter: splits a byte stream into a "low" and a "high" stream, one byte each per
//! input pair.
//!
//! For each non-overlapping pair (p0, p1):
//! - the co-occurrence model decides whether the pair is in order,
//! - the pair is swapped if needed so that the rank model's comparison of the two output
//!   bytes agrees with that decision,
//! - out0 goes to the low stream and out1 to the high stream,
//! - the co-occurrence model records the straddle pair (previous p1, p0) and (p0, p1) as
//!   read, and the rank model promotes the output bytes selected by the configuration.
//!
//! A trailing odd byte is dropped without error.

use std::io::{Read, Write};

use log::{debug, info};

use crate::error::{Result, Stream};
use crate::model::cooccurrence::{Cooccurrence, OrderPolicy};
use crate::model::freq_rank::{FreqRank, PromoteBreadth};

/// Size of each read from the input in `process`.
const BUFFER_SIZE: usize = 1024 * 1024;

/// Choices fixed when the splitter is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitConfig {
    /// Rule for deciding pair order
    pub policy: OrderPolicy,
    /// Which output bytes are promoted after each pair
    pub breadth: PromoteBreadth,
}

/// Summary of a splitting run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitStats {
    /// Pairs processed (= bytes written to each output)
    pub pairs: u64,
    /// Pairs written in swapped order
    pub swapped: u64,
    /// True if the input had an odd length and its last byte was dropped
    pub dropped_tail: bool,
}

/// Owns both models and the straddle byte carried between pairs.
#[derive(Debug)]
pub struct PairSplitter {
    coo: Cooccurrence,
    freq: FreqRank,
    breadth: PromoteBreadth,
    /// Second byte of the previous pair (0 before the first pair)
    prev: u8,
    stats: SplitStats,
}

impl PairSplitter {
    /// Fresh models: empty co-occurrence table and identity ranks.
    pub fn new(config: SplitConfig) -> Self {
        debug!(
            "New pair splitter: {:?} order policy, promote {:?}",
            config.policy, config.breadth
        );
        Self {
            coo: Cooccurrence::new(config.policy),
            freq: FreqRank::new(),
            breadth: config.breadth,
            prev: 0,
            stats: SplitStats::default(),
        }
    }

    /// Transform one input pair and update both models. Returns [low byte, high byte].
    pub fn step(&mut self, pair: [u8; 2]) -> [u8; 2] {
        let in_order = self.coo.decide(pair);
        let out = canonicalize(&self.freq, in_order, pair);
        debug_assert_eq!(self.freq.compare(out[0], out[1]), in_order);

        // Models learn from the pair as read, not as written
        self.coo.record(self.prev, pair[0]);
        self.coo.record(pair[0], pair[1]);
        self.freq.update(out, self.breadth);
        self.prev = pair[1];

        self.stats.pairs += 1;
        if out != pair {
            self.stats.swapped += 1;
        }
        out
    }

    /// Split an in-memory buffer. The returned streams have `data.len() / 2` bytes each.
    pub fn split(&mut self, data: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut low = Vec::with_capacity(data.len() / 2);
        let mut high = Vec::with_capacity(data.len() / 2);
        let pairs = data.chunks_exact(2);
        self.stats.dropped_tail = !pairs.remainder().is_empty();
        for pair in pairs {
            let [l, h] = self.step([pair[0], pair[1]]);
            low.push(l);
            high.push(h);
        }
        (low, high)
    }

    /// Split everything `source` yields into the `low` and `high` sinks. An odd byte at the
    /// end of a read is held over and paired with the first byte of the next read, so the
    /// result matches `split` on the whole input. Errors name the stream that failed.
    pub fn process<R: Read, L: Write, H: Write>(
        &mut self,
        mut source: R,
        mut low: L,
        mut high: H,
    ) -> Result<SplitStats> {
        let mut buffer = vec![0_u8; BUFFER_SIZE + 1];
        // Bytes at the front of the buffer carried over from the last read (0 or 1)
        let mut held = 0;

        loop {
            let received = match source.read(&mut buffer[held..]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Stream::Input.err()(e)),
            };
            let end = held + received;
            let usable = end & !1;

            let (l, h) = self.split(&buffer[..usable]);
            low.write_all(&l).map_err(Stream::Low.err())?;
            high.write_all(&h).map_err(Stream::High.err())?;
            debug!("Split {} pairs, {} so far", l.len(), self.stats.pairs);

            // Keep the odd byte for the next read
            held = end - usable;
            if held == 1 {
                buffer[0] = buffer[usable];
            }
        }

        self.stats.dropped_tail = held == 1;
        low.flush().map_err(Stream::Low.err())?;
        high.flush().map_err(Stream::High.err())?;

        info!(
            "Split {} pairs, {} swapped{}",
            self.stats.pairs,
            self.stats.swapped,
            if self.stats.dropped_tail { ", dropped trailing byte" } else { "" }
        );
        Ok(self.stats)
    }

    /// Counters for everything processed so far.
    pub fn stats(&self) -> SplitStats {
        self.stats
    }

    /// The co-occurrence model as learned so far.
    pub fn cooccurrence(&self) -> &Cooccurrence {
        &self.coo
    }

    /// The rank model as learned so far.
    pub fn freq_rank(&self) -> &FreqRank {
        &self.freq
    }
}

impl Default for PairSplitter {
    fn default() -> Self {
        Self::new(SplitConfig::default())
    }
}

/// Order `pair` so that `freq.compare(out[0], out[1]) == in_order`. At most one swap is
/// needed since swapping flips the comparison. Equal bytes never compare greater, so a
/// pair of identical bytes is always written as is.
pub fn canonicalize(freq: &FreqRank, in_order: bool, pair: [u8; 2]) -> [u8; 2] {
    if freq.compare(pair[0], pair[1]) == in_order {
        pair
    } else {
        [pair[1], pair[0]]
    }
}
