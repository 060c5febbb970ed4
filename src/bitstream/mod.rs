//! The bitstream module is the variable-length coding primitive of the pair splitter crate.
//!
//! Bits are accumulated in a 32-bit word, least significant bit first, and exchanged with a
//! caller-owned byte buffer one little-endian word at a time.
//!
//! - bitwriter: raw bit groups, zero runs and the final partial flush.
//! - bitreader: raw bit groups and zero-run counting across word boundaries.
//! - golomb: unary and Golomb-Rice codes for both sides.
//!
//! The splitter does not call into this module. It is the entropy coding primitive meant for
//! the values a later pipeline stage derives from the split streams.
//!
pub mod bitreader;
pub mod bitwriter;
pub mod golomb;
