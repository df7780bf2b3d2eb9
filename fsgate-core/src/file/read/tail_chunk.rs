use std::io::{self, SeekFrom};
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use super::decode_line;

/// Returns the last `n` lines of `path` by reading backwards from EOF in
/// `chunk_size` pieces. Memory use is bounded by the returned lines plus one
/// chunk, regardless of file size.
///
/// Splitting happens on raw bytes, so a multi-byte character or a `\r\n`
/// pair straddling a chunk boundary is reassembled before decoding.
pub async fn last_n_lines(path: &Path, n: usize, chunk_size: usize) -> io::Result<Vec<String>> {
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut file = File::open(path).await?;
    let mut pos = file.metadata().await?.len();
    let chunk_size = chunk_size.max(1) as u64;
    let mut chunk = vec![0u8; chunk_size as usize];

    let mut collector = ReverseCollector::new(n);
    // Bytes of the segment being assembled, in file order.
    let mut pending: Vec<u8> = Vec::new();

    while pos > 0 {
        let read_len = chunk_size.min(pos);
        pos -= read_len;
        file.seek(SeekFrom::Start(pos)).await?;
        let buf = &mut chunk[..read_len as usize];
        file.read_exact(buf).await?;

        let mut combined = Vec::with_capacity(buf.len() + pending.len());
        combined.extend_from_slice(buf);
        combined.extend_from_slice(&pending);
        pending = combined;

        while let Some(idx) = pending.iter().rposition(|&b| b == b'\n') {
            let segment = pending.split_off(idx + 1);
            pending.truncate(idx);
            if collector.push(segment)? {
                return Ok(collector.finish());
            }
        }
    }

    // Beginning of file: whatever is left is the first line.
    collector.push(pending)?;
    Ok(collector.finish())
}

/// Accumulates segments found while scanning backwards.
struct ReverseCollector {
    wanted: usize,
    reversed: Vec<String>,
    /// The first segment seen is the one after the last `\n`; it has no
    /// terminator and is dropped when empty.
    at_final_segment: bool,
}

impl ReverseCollector {
    fn new(wanted: usize) -> Self {
        Self {
            wanted,
            reversed: Vec::with_capacity(wanted.min(1024)),
            at_final_segment: true,
        }
    }

    /// Returns true once enough lines are collected.
    fn push(&mut self, mut segment: Vec<u8>) -> io::Result<bool> {
        if self.at_final_segment {
            self.at_final_segment = false;
            if segment.is_empty() {
                return Ok(false);
            }
        } else if segment.last() == Some(&b'\r') {
            segment.pop();
        }

        self.reversed.push(decode_line(segment)?);
        Ok(self.reversed.len() >= self.wanted)
    }

    fn finish(mut self) -> Vec<String> {
        self.reversed.truncate(self.wanted);
        self.reversed.reverse();
        self.reversed
    }
}
