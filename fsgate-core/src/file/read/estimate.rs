use std::io::{self, SeekFrom};
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncSeekExt, BufReader};
use tracing::debug;

use super::{decode_line, head, read_raw_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatedLines {
    pub lines: Vec<String>,
    /// False only when sampling found nothing and an exact scan was used.
    pub approximate: bool,
    pub total_lines: Option<usize>,
}

/// Returns roughly lines `[offset, offset + length)` of `path` without
/// scanning up to `offset`.
///
/// The average line length is sampled from the first `sample_bytes` of the
/// file and used to guess a byte position for `offset`. The reader lands
/// there, drops the partial line it landed in, and collects `length` lines.
/// Variance in line length shifts the window; I/O is bounded by the sample
/// plus the returned lines no matter how large `offset` is.
pub async fn approx_slice(
    path: &Path,
    offset: usize,
    length: usize,
    sample_bytes: usize,
    file_size: u64,
) -> io::Result<EstimatedLines> {
    let Some(avg_line_len) = sample_average_line_len(path, sample_bytes).await? else {
        let exact = head::slice(path, offset, length).await?;
        return Ok(EstimatedLines {
            lines: exact.lines,
            approximate: false,
            total_lines: exact.total_lines,
        });
    };

    let estimated = ((offset as f64) * avg_line_len).min(file_size as f64) as u64;
    debug!(avg_line_len, estimated, offset, "Estimated byte position");

    let mut file = File::open(path).await?;
    // Start one byte early so that landing exactly on a line start discards
    // only the preceding terminator.
    let seek_to = estimated.saturating_sub(1);
    file.seek(SeekFrom::Start(seek_to)).await?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    if estimated > 0 {
        read_raw_line(&mut reader, &mut buf).await?;
    }

    let mut lines = Vec::with_capacity(length.min(4096));
    while lines.len() < length && read_raw_line(&mut reader, &mut buf).await? > 0 {
        lines.push(decode_line(std::mem::take(&mut buf))?);
    }

    Ok(EstimatedLines {
        lines,
        approximate: true,
        total_lines: None,
    })
}

/// Average raw bytes per line (terminators included) over roughly the first
/// `sample_bytes` of the file, or `None` if the file has no lines.
async fn sample_average_line_len(path: &Path, sample_bytes: usize) -> io::Result<Option<f64>> {
    let mut reader = BufReader::new(File::open(path).await?);
    let mut buf = Vec::new();
    let mut bytes = 0usize;
    let mut lines = 0usize;

    while bytes < sample_bytes {
        let consumed = read_raw_line(&mut reader, &mut buf).await?;
        if consumed == 0 {
            break;
        }
        bytes += consumed;
        lines += 1;
    }

    if lines == 0 {
        return Ok(None);
    }
    Ok(Some(bytes as f64 / lines as f64))
}
