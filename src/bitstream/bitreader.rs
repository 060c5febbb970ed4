//! BitReader: the read side of the 32-bit bit coder.
//!
//! Reads back what BitWriter stored: little-endian 4-byte words, bits consumed least
//! significant first. The reader starts with an "exhausted" accumulator so the first read
//! loads a word.
//!
//! NOTE: The reader has no notion of where the data ends. Reading past the last word of the
//! buffer is a caller error and panics on the slice bounds.

use super::bitwriter::{low_mask, WORD_BITS};

/// Reads a bitstream from a caller-owned byte buffer.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Caller buffer holding the packed words.
    buffer: &'a [u8],
    /// Byte offset of the next word to load.
    cursor: usize,
    /// Current word, shifted down as bits are consumed.
    queue: u32,
    /// Count of bits already consumed from the current word. 32 means reload.
    q_used: u32,
}

impl<'a> BitReader<'a> {
    /// Bind a reader to the start of `buffer`.
    pub fn open(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            queue: 0,
            q_used: WORD_BITS,
        }
    }

    /// Load the next little-endian word and advance the cursor.
    fn reload(&mut self) {
        let mut word = [0_u8; 4];
        word.copy_from_slice(&self.buffer[self.cursor..self.cursor + 4]);
        self.queue = u32::from_le_bytes(word);
        self.cursor += 4;
        self.q_used = 0;
    }

    /// Return the next `n` bits (n <= 32), least significant first.
    pub fn bits(&mut self, n: u32) -> u32 {
        debug_assert!(n <= WORD_BITS, "bits called with n = {}", n);

        // Nothing to take, and no reload past what the caller has asked for
        if n == 0 {
            return 0;
        }
        if self.q_used == WORD_BITS {
            self.reload();
        }

        // Take what the current word still has
        let s = n.min(WORD_BITS - self.q_used);
        let mut result = self.queue & low_mask(s);
        self.queue = self.queue.checked_shr(s).unwrap_or(0);
        self.q_used += s;

        // The rest comes from the low end of the next word
        let rest = n - s;
        if rest > 0 {
            debug_assert_eq!(self.q_used, WORD_BITS);
            self.reload();
            result |= (self.queue & low_mask(rest)) << s;
            self.queue >>= rest;
            self.q_used = rest;
        }
        result
    }

    /// Count zero bits up to the next set bit, consuming the zeros and the set bit.
    /// Runs of zeros may span any number of words.
    pub fn zeros_then_one(&mut self) -> u32 {
        let mut total: u32 = 0;

        loop {
            if self.q_used == WORD_BITS {
                self.reload();
            }
            // trailing_zeros() is 32 for an all-zero word, so the count is capped by what is left
            let s = self.queue.trailing_zeros().min(WORD_BITS - self.q_used);
            self.queue = self.queue.checked_shr(s).unwrap_or(0);
            self.q_used += s;
            total += s;

            if self.q_used < WORD_BITS {
                break;
            }
        }

        // Drop the terminating one
        self.queue >>= 1;
        self.q_used += 1;
        total
    }

    /// Byte offset of the next word the reader will load.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bits consumed so far.
    pub fn bits_read(&self) -> usize {
        if self.cursor == 0 {
            0
        } else {
            (self.cursor - 4) * 8 + self.q_used as usize
        }
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use crate::bitstream::bitwriter::BitWriter;

    #[test]
    fn basic_test() {
        let buf = 0b1000_0001_u32.to_le_bytes();
        let mut br = BitReader::open(&buf);
        assert_eq!(br.position(), 0);
        assert_eq!(br.bits(1), 1);
        assert_eq!(br.position(), 4);
        assert_eq!(br.bits(6), 0);
        assert_eq!(br.bits(1), 1);
        assert_eq!(br.bits(24), 0);
        assert_eq!(br.bits_read(), 32);
    }

    #[test]
    fn full_word_test() {
        let mut buf = 0x1234_5678_u32.to_le_bytes().to_vec();
        buf.extend_from_slice(&0x9abc_def0_u32.to_le_bytes());
        let mut br = BitReader::open(&buf);
        assert_eq!(br.bits(32), 0x1234_5678);
        assert_eq!(br.bits(32), 0x9abc_def0);
        assert_eq!(br.position(), 8);
    }

    #[test]
    fn spanning_read_test() {
        let mut buf = [0_u8; 8];
        let mut bw = BitWriter::open(&mut buf);
        bw.out_bits(0x5, 3);
        bw.out_bits(0xdead_beef, 32);
        bw.out_bits(0x2a, 7);
        bw.close();

        let mut br = BitReader::open(&buf);
        assert_eq!(br.bits(3), 0x5);
        assert_eq!(br.bits(32), 0xdead_beef);
        assert_eq!(br.bits(7), 0x2a);
        assert_eq!(br.bits_read(), 42);
    }

    #[test]
    fn zero_bit_read_test() {
        let buf = 0xffff_ffff_u32.to_le_bytes();
        let mut br = BitReader::open(&buf);
        assert_eq!(br.bits(0), 0);
        assert_eq!(br.position(), 0);
        assert_eq!(br.bits(4), 0xf);
        assert_eq!(br.bits(28), 0x0fff_ffff);
        // The buffer is used up; an empty read must not touch it
        assert_eq!(br.bits(0), 0);
        assert_eq!(br.position(), 4);
    }

    #[test]
    fn zeros_then_one_test() {
        // 5 zeros then a one, then 71 zeros across two word boundaries, then a one
        let mut buf = [0_u8; 12];
        let mut bw = BitWriter::open(&mut buf);
        bw.out_zeros(5);
        bw.out_one();
        bw.out_zeros(31);
        bw.out_zeros(32);
        bw.out_zeros(8);
        bw.out_one();
        bw.close();

        let mut br = BitReader::open(&buf);
        assert_eq!(br.zeros_then_one(), 5);
        assert_eq!(br.zeros_then_one(), 71);
    }
}
