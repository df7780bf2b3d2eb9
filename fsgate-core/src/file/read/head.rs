use std::io;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use super::{decode_line, read_raw_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadLines {
    pub lines: Vec<String>,
    /// Known only when the scan reached EOF.
    pub total_lines: Option<usize>,
}

/// Returns lines `[offset, offset + length)` of `path`, streaming forward and
/// stopping as soon as `length` lines are collected. Lines before `offset`
/// are skipped without being decoded.
pub async fn slice(path: &Path, offset: usize, length: usize) -> io::Result<HeadLines> {
    if length == 0 {
        return Ok(HeadLines {
            lines: Vec::new(),
            total_lines: None,
        });
    }

    let reader = BufReader::new(File::open(path).await?);
    slice_lines(reader, offset, length).await
}

/// [`slice`] over any buffered reader. Nothing past the last wanted line is
/// consumed; EOF is detected from what is already buffered.
pub(crate) async fn slice_lines<R>(mut reader: R, offset: usize, length: usize) -> io::Result<HeadLines>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut lines = Vec::with_capacity(length.min(4096));
    let mut index = 0usize;

    while lines.len() < length && read_raw_line(&mut reader, &mut buf).await? > 0 {
        if index >= offset {
            lines.push(decode_line(std::mem::take(&mut buf))?);
        }
        index += 1;
    }

    let at_eof = reader.fill_buf().await?.is_empty();
    Ok(HeadLines {
        lines,
        total_lines: at_eof.then_some(index),
    })
}

/// Counts lines without decoding them.
pub async fn count_lines(path: &Path) -> io::Result<usize> {
    let mut reader = BufReader::new(File::open(path).await?);
    let mut buf = Vec::new();
    let mut count = 0usize;
    while read_raw_line(&mut reader, &mut buf).await? > 0 {
        count += 1;
    }
    Ok(count)
}
