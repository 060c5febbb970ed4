//! BitWriter: the write side of the 32-bit bit coder.
//!
//! Bits are packed least-significant-bit first into a 32-bit accumulator. Every time the
//! accumulator fills, it is stored as one little-endian 4-byte word at the cursor and the
//! cursor advances by 4.
//!
//! NOTE: The writer does not own its memory. The caller supplies a buffer large enough for
//! everything it intends to write (see `bytes_for_bits`) and must remember how many bits
//! were logically written. There is no length prefix or end marker.

/// Number of bits held by the accumulator.
pub const WORD_BITS: u32 = 32;

/// Mask covering the low `n` bits of a u32. Valid for 0..=32.
#[inline]
pub(crate) fn low_mask(n: u32) -> u32 {
    if n >= WORD_BITS {
        u32::MAX
    } else {
        (1_u32 << n) - 1
    }
}

/// Number of 32-bit words needed to hold `bits` bits.
pub fn words_for_bits(bits: usize) -> usize {
    (bits + WORD_BITS as usize - 1) / WORD_BITS as usize
}

/// Number of buffer bytes needed to hold `bits` bits, including the final partial word.
pub fn bytes_for_bits(bits: usize) -> usize {
    words_for_bits(bits) * 4
}

/// Writes a bitstream into a caller-owned byte buffer.
#[derive(Debug)]
pub struct BitWriter<'a> {
    /// Caller buffer that receives the flushed words.
    buffer: &'a mut [u8],
    /// Byte offset of the next word to be flushed.
    cursor: usize,
    /// Bits waiting to be flushed, packed from bit 0 upward.
    queue: u32,
    /// Count of valid bits in the queue. Always < 32 between calls.
    q_bits: u32,
}

impl<'a> BitWriter<'a> {
    /// Bind a writer to the start of `buffer` with an empty accumulator.
    pub fn open(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Store the accumulator as a little-endian word and advance the cursor.
    fn flush_word(&mut self) {
        self.buffer[self.cursor..self.cursor + 4].copy_from_slice(&self.queue.to_le_bytes());
        self.cursor += 4;
    }

    /// Flush if the accumulator just filled up.
    #[inline]
    fn flush_if_full(&mut self) {
        if self.q_bits == WORD_BITS {
            self.flush_word();
            self.queue = 0;
            self.q_bits = 0;
        }
    }

    /// Write the low `n` bits of `bits`, least significant first. `n` must be <= 32.
    pub fn out_bits(&mut self, mut bits: u32, mut n: u32) {
        debug_assert!(n <= WORD_BITS, "out_bits called with n = {}", n);

        while n > 0 {
            debug_assert!(self.q_bits < WORD_BITS);
            // Take as many bits as fit in what is left of the accumulator
            let m = n.min(WORD_BITS - self.q_bits);
            self.queue |= (bits & low_mask(m)) << self.q_bits;
            self.q_bits += m;
            self.flush_if_full();

            bits = bits.checked_shr(m).unwrap_or(0);
            n -= m;
        }
    }

    /// Write `n` zero bits (n <= 32). The accumulator already holds zeros above `q_bits`,
    /// so only the count moves.
    pub fn out_zeros(&mut self, mut n: u32) {
        debug_assert!(n <= WORD_BITS, "out_zeros called with n = {}", n);

        while n > 0 {
            let m = n.min(WORD_BITS - self.q_bits);
            self.q_bits += m;
            self.flush_if_full();
            n -= m;
        }
    }

    /// Write a single set bit.
    pub fn out_one(&mut self) {
        debug_assert!(self.q_bits < WORD_BITS);
        self.queue |= 1 << self.q_bits;
        self.q_bits += 1;
        self.flush_if_full();
    }

    /// Byte offset of the next word the writer will store.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bits currently held in the accumulator (not yet flushed).
    pub fn filled(&self) -> u32 {
        self.q_bits
    }

    /// Total bits written so far, flushed or not.
    pub fn bits_written(&self) -> usize {
        self.cursor * 8 + self.q_bits as usize
    }

    /// Flush any partial word and return the number of bytes used in the buffer.
    /// The unused high bits of the final word are padding; readers must not rely on them.
    pub fn close(mut self) -> usize {
        if self.q_bits > 0 {
            self.flush_word();
        }
        self.cursor
    }
}

#[cfg(test)]
mod test {
    use super::{bytes_for_bits, BitWriter};

    #[test]
    fn out_bits_lsb_first_test() {
        let mut buf = [0_u8; 4];
        let mut bw = BitWriter::open(&mut buf);
        bw.out_bits(0b1, 1);
        bw.out_bits(0b10, 2);
        bw.out_bits(0xff, 8);
        assert_eq!(bw.close(), 4);
        // 1, then 0 1, then eight 1s
        assert_eq!(buf, [0b1111_1101, 0b0000_0111, 0, 0]);
    }

    #[test]
    fn flush_at_32_test() {
        let mut buf = [0_u8; 8];
        let mut bw = BitWriter::open(&mut buf);
        bw.out_bits(0xdead_beef, 32);
        assert_eq!(bw.position(), 4);
        assert_eq!(bw.filled(), 0);
        assert_eq!(bw.close(), 4);
        assert_eq!(&buf[..4], &0xdead_beef_u32.to_le_bytes());
        assert_eq!(&buf[4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn carry_over_33_test() {
        let mut buf = [0_u8; 8];
        let mut bw = BitWriter::open(&mut buf);
        bw.out_bits(u32::MAX, 32);
        bw.out_bits(1, 1);
        assert_eq!(bw.position(), 4);
        assert_eq!(bw.filled(), 1);
        assert_eq!(bw.bits_written(), 33);
        assert_eq!(bw.close(), 8);
        assert_eq!(buf, [0xff, 0xff, 0xff, 0xff, 1, 0, 0, 0]);
    }

    #[test]
    fn split_across_words_test() {
        let mut buf = [0_u8; 8];
        let mut bw = BitWriter::open(&mut buf);
        bw.out_zeros(28);
        bw.out_bits(0xabc, 12);
        assert_eq!(bw.close(), 8);
        // Low 4 bits of 0xabc land in the top nibble of word 0, the rest start word 1
        assert_eq!(u32::from_le_bytes(buf[0..4].try_into().unwrap()), 0xc000_0000);
        assert_eq!(u32::from_le_bytes(buf[4..8].try_into().unwrap()), 0xab);
    }

    #[test]
    fn out_zeros_keeps_queue_test() {
        let mut buf = [0xff_u8; 8];
        let mut bw = BitWriter::open(&mut buf);
        bw.out_one();
        bw.out_zeros(32);
        assert_eq!(bw.position(), 4);
        assert_eq!(bw.filled(), 1);
        bw.out_one();
        assert_eq!(bw.close(), 8);
        assert_eq!(&buf[..4], &[1, 0, 0, 0]);
        assert_eq!(&buf[4..], &[2, 0, 0, 0]);
    }

    #[test]
    fn close_empty_test() {
        let mut buf = [0_u8; 0];
        let bw = BitWriter::open(&mut buf);
        assert_eq!(bw.close(), 0);
    }

    #[test]
    fn sizing_test() {
        assert_eq!(bytes_for_bits(0), 0);
        assert_eq!(bytes_for_bits(1), 4);
        assert_eq!(bytes_for_bits(32), 4);
        assert_eq!(bytes_for_bits(33), 8);
    }
}
