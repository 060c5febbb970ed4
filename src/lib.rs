//! Byte-pair splitting front end for data compression.
//!
//! Version 0.1.0
//!
//! Reads a byte stream two bytes at a time and writes each pair to a "low" and a "high"
//! stream, choosing the order of the two bytes with a pair of models learned on the fly:
//! ordered byte co-occurrence counts decide whether a pair is "in order", and a self-adjusting
//! rank over the 256 byte values expresses that decision through which byte comes first.
//!
//! The crate also carries the bit-level coder meant for the values such models produce:
//! raw bit groups, unary and Golomb-Rice codes over 32-bit little-endian words.
//!
//! Basic usage to split a file is as follows:
//!
//! `$> pairsplit enwik8 L H`
//!
//! This writes the first byte of every (reordered) pair to L and the second to H.
//!
pub mod bitstream;
pub mod error;
pub mod model;
pub mod splitter;
pub mod tools;
