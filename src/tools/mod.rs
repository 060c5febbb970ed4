//! The tools module provides helper functions around the pair splitter.
//!
//! The tools are:
//! - cli: Command line interface for the splitter binary.
//! - freq_count: Byte frequency counts and order-0 entropy, used to report how the split
//!   streams compare with the input.
//!
pub mod cli;
pub mod freq_count;
