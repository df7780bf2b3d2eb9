use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::BufReader;

use super::{decode_line, read_raw_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailLines {
    pub lines: Vec<String>,
    pub total_lines: usize,
}

/// Returns the last `n` lines of `path` in one forward pass, keeping at most
/// `n` lines in a ring buffer. Suited to files too small to bother seeking
/// backwards in, or tails too long for chunked reverse reads.
pub async fn last_n_lines(path: &Path, n: usize) -> io::Result<TailLines> {
    let mut reader = BufReader::new(File::open(path).await?);
    let mut ring: Vec<Vec<u8>> = Vec::with_capacity(n.min(4096));
    let mut written = 0usize;
    let mut buf = Vec::new();

    while read_raw_line(&mut reader, &mut buf).await? > 0 {
        if n > 0 {
            let slot = written % n;
            if slot < ring.len() {
                std::mem::swap(&mut ring[slot], &mut buf);
            } else {
                ring.push(std::mem::take(&mut buf));
            }
        }
        written += 1;
    }

    // Oldest retained line sits just after the last written slot.
    let start = if written > n && n > 0 { written % n } else { 0 };
    ring.rotate_left(start);

    let lines = ring
        .into_iter()
        .map(decode_line)
        .collect::<io::Result<Vec<_>>>()?;

    Ok(TailLines {
        lines,
        total_lines: written,
    })
}
