//! The splitter module drives the byte-pair reordering transform.
//!
//! pair_split reads the input two bytes at a time, consults and updates the models in
//! `crate::model`, and writes one byte per pair to each of the two output streams. There is
//! no inverse transform here; rebuilding the input needs side information this stage does
//! not produce.
//!
pub mod pair_split;
