//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::fs::File;
use std::io::BufWriter;

use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use pairsplit::error::{Error, Result, Stream};
use pairsplit::splitter::pair_split::PairSplitter;
use pairsplit::tools::cli::{split_opts_init, SplitOpts};
use pairsplit::tools::freq_count::{entropy, entropy_bytes, Tally};

fn main() -> Result<()> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("Could not start logging: {}", e);
    }

    let options = split_opts_init();

    let result = split_files(&options);
    match &result {
        Ok(()) => info!("Done.\n"),
        Err(e) => error!("{}", e),
    }
    result
}

/// Split the input file named in `opts` into its low and high files.
fn split_files(opts: &SplitOpts) -> Result<()> {
    if opts.low == opts.high {
        return Err(Error::SameOutput(opts.low.clone()));
    }

    let fin = File::open(&opts.input).map_err(|e| Error::io(&opts.input, e))?;
    let f_low = File::create(&opts.low).map_err(|e| Error::io(&opts.low, e))?;
    let f_high = File::create(&opts.high).map_err(|e| Error::io(&opts.high, e))?;

    let mut input = Tally::new(fin);
    let mut low = Tally::new(BufWriter::new(f_low));
    let mut high = Tally::new(BufWriter::new(f_high));

    let mut splitter = PairSplitter::new(opts.config());
    splitter
        .process(&mut input, &mut low, &mut high)
        .map_err(|e| match e {
            Error::Stream { stream, source } => Error::io(stream_path(opts, stream), source),
            other => other,
        })?;

    if opts.stats {
        report("input", input.counts());
        report(&opts.low, low.counts());
        report(&opts.high, high.counts());
        info!(
            "Order-0 estimate: input {:.0} bytes, low + high {:.0} bytes",
            entropy_bytes(input.counts()),
            entropy_bytes(low.counts()) + entropy_bytes(high.counts())
        );
    }
    Ok(())
}

/// File behind each stream of a run.
fn stream_path(opts: &SplitOpts, stream: Stream) -> &str {
    match stream {
        Stream::Input => &opts.input,
        Stream::Low => &opts.low,
        Stream::High => &opts.high,
    }
}

/// Log size and order-0 entropy of one stream.
fn report(name: &str, counts: &[u64]) {
    info!(
        "{}: {} bytes, {:.4} bits/byte",
        name,
        counts.iter().sum::<u64>(),
        entropy(counts)
    );
}
