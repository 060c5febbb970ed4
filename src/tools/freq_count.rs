use std::io::{Read, Write};

use rayon::prelude::*;

/// Returns a frequency count of the input data. Uses parallelism when data set is over 64k.
pub fn freqs(data: &[u8]) -> Vec<u32> {
    if data.len() > 64_000 {
        // 16k is pretty much the sweet spot for chunk size.
        data.par_chunks(16_000)
            .fold(
                || vec![0_u32; 256],
                |mut freqs, chunk| {
                    chunk.iter().for_each(|&el| freqs[el as usize] += 1);
                    freqs
                },
            )
            .reduce(
                || vec![0_u32; 256],
                |s, f| s.iter().zip(&f).map(|(a, b)| a + b).collect::<Vec<u32>>(),
            )
    } else {
        let mut freqs = vec![0_u32; 256];
        data.iter().for_each(|&el| freqs[el as usize] += 1);
        freqs
    }
}

/// Order-0 entropy of a byte histogram, in bits per byte. Zero for an empty histogram.
pub fn entropy<T: Copy + Into<u64>>(freqs: &[T]) -> f64 {
    let total: u64 = freqs.iter().map(|&f| Into::<u64>::into(f)).sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    freqs
        .iter()
        .map(|&f| Into::<u64>::into(f))
        .filter(|&f| f > 0)
        .map(|f| {
            let p = f as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Size in bytes an order-0 coder would need for data with this histogram.
pub fn entropy_bytes<T: Copy + Into<u64>>(freqs: &[T]) -> f64 {
    let total: u64 = freqs.iter().map(|&f| Into::<u64>::into(f)).sum();
    entropy(freqs) * total as f64 / 8.0
}

/// Wraps a reader or writer and keeps a byte histogram of everything passing through.
#[derive(Debug)]
pub struct Tally<T> {
    inner: T,
    counts: Vec<u64>,
}

impl<T> Tally<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            counts: vec![0; 256],
        }
    }

    fn add(&mut self, data: &[u8]) {
        freqs(data)
            .iter()
            .zip(self.counts.iter_mut())
            .for_each(|(&f, c)| *c += f as u64);
    }

    /// Histogram so far.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Bytes seen so far.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<R: Read> Read for Tally<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.add(&buf[..n]);
        Ok(n)
    }
}

impl<W: Write> Write for Tally<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.add(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
