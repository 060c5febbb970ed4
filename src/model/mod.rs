//! The model module holds the two adaptive statistics the pair splitter learns as it reads.
//!
//! - cooccurrence: ordered byte adjacency counts and the rule that decides whether a pair
//!   is "in order".
//! - freq_rank: an always-injective ranking of the 256 byte values, used to express that
//!   decision through the order of the two bytes written out.
//!
//! Both start empty (identity ranks) on every run and are never persisted.
//!
pub mod cooccurrence;
pub mod freq_rank;
