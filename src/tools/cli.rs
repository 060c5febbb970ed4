use clap::Parser;
use log::{info, LevelFilter};

use crate::model::cooccurrence::OrderPolicy;
use crate::model::freq_rank::PromoteBreadth;
use crate::splitter::pair_split::SplitConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Split a byte stream into low and high streams by adaptive pair reordering",
    long_about = "
    Reads the input two bytes at a time. A co-occurrence model decides whether each pair
    is in order, and the pair is written so that a self-adjusting rank of the two bytes
    reflects that decision. The first byte of every pair goes to LOW, the second to HIGH.
    A trailing odd byte is dropped."
)]
pub struct SplitOpts {
    /// File to split
    #[clap(default_value = "enwik8")]
    pub input: String,

    /// Output file for the first byte of each pair
    #[clap(default_value = "L")]
    pub low: String,

    /// Output file for the second byte of each pair
    #[clap(default_value = "H")]
    pub high: String,

    /// Rule deciding whether a pair is in order
    #[clap(short = 'p', long, value_enum, default_value = "direct")]
    pub policy: OrderPolicy,

    /// Which output bytes gain rank after each pair
    #[clap(long = "promote", value_enum, default_value = "first")]
    pub breadth: PromoteBreadth,

    /// Report sizes and order-0 entropy of the input and both outputs
    #[clap(short = 's', long)]
    pub stats: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long, parse(from_occurrences))]
    pub verbose: u64,

    /// Suppress everything but errors
    #[clap(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl SplitOpts {
    /// The splitter settings selected on the command line.
    pub fn config(&self) -> SplitConfig {
        SplitConfig {
            policy: self.policy,
            breadth: self.breadth,
        }
    }

    /// Log level for the verbosity flags. Stats are reported at Info.
    pub fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 if self.stats => LevelFilter::Info,
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Parse the command line and set the log level from it.
pub fn split_opts_init() -> SplitOpts {
    let opts = SplitOpts::parse();
    log::set_max_level(opts.level());

    // Below we report initialization status to the user
    info!("pairsplit, Rust version {}", VERSION);
    info!("Verbosity set to {}", log::max_level());
    info!("Reading {}, writing {} and {}", opts.input, opts.low, opts.high);
    info!("Order policy {:?}, promote {:?}", opts.policy, opts.breadth);
    opts
}
