//! Unary and Golomb-Rice codes on top of the bit coder.
//!
//! - Unary: N is written as N zero bits followed by a single one bit.
//! - Golomb-Rice with parameter k (0..=32): the quotient N >> k in unary, then the low k
//!   bits of N as they are. k = 0 is plain unary.
//!
//! All values are unsigned 32 bit. Skewed distributions of small values (ranks, run lengths,
//! residuals) code in few bits; large quotients cost one bit each, so choose k accordingly.

use super::bitreader::BitReader;
use super::bitwriter::{BitWriter, WORD_BITS};

/// Largest Golomb-Rice parameter.
pub const MAX_RICE_K: u32 = WORD_BITS;

impl BitWriter<'_> {
    /// Write `n` in unary. Long runs of zeros go out a word at a time.
    pub fn out_unary(&mut self, mut n: u32) {
        while n > WORD_BITS {
            self.out_zeros(WORD_BITS);
            n -= WORD_BITS;
        }
        self.out_zeros(n);
        self.out_one();
    }

    /// Write `n` as a Golomb-Rice code with parameter `k`.
    pub fn out_rice(&mut self, k: u32, n: u32) {
        debug_assert!(k <= MAX_RICE_K, "Golomb-Rice parameter {} out of range", k);
        // Logical shift; a shift by 32 leaves no quotient
        self.out_unary(n.checked_shr(k).unwrap_or(0));
        self.out_bits(n, k);
    }
}

impl BitReader<'_> {
    /// Read a unary coded value.
    pub fn unary(&mut self) -> u32 {
        self.zeros_then_one()
    }

    /// Read a Golomb-Rice coded value with parameter `k`.
    pub fn rice(&mut self, k: u32) -> u32 {
        debug_assert!(k <= MAX_RICE_K, "Golomb-Rice parameter {} out of range", k);
        let quotient = self.unary();
        quotient.checked_shl(k).unwrap_or(0) | self.bits(k)
    }
}

/// Number of bits `out_rice(k, n)` will produce.
pub fn rice_len(k: u32, n: u32) -> usize {
    n.checked_shr(k).unwrap_or(0) as usize + 1 + k as usize
}
