//! Adaptive line-oriented reading.
//!
//! Offsets and lengths are always counted in lines. A negative offset asks
//! for the tail of the file. Four strategies share one line model (split on
//! LF, a CR directly before the LF is dropped, an empty final segment is not a
//! line); which one runs is purely a performance decision, except for
//! [`ReadStrategy::PositionEstimate`] which is explicitly approximate.

pub mod estimate;
pub mod exact;
pub mod head;
pub mod tail_chunk;
pub mod tail_ring;

use std::io;
use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::FsError;
use crate::settings::ReaderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStrategy {
    TailChunk,
    TailCircularBuffer,
    HeadStream,
    PositionEstimate,
}

impl ReadStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TailChunk => "tail_chunk",
            Self::TailCircularBuffer => "tail_circular_buffer",
            Self::HeadStream => "head_stream",
            Self::PositionEstimate => "position_estimate",
        }
    }
}

/// What the dispatcher knows before reading a single byte.
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub file_size: u64,
    pub offset: i64,
}

impl Probe {
    fn tail_len(&self) -> usize {
        usize::try_from(self.offset.unsigned_abs()).unwrap_or(usize::MAX)
    }

    fn is_large(&self, config: &ReaderConfig) -> bool {
        self.file_size >= config.large_file_threshold
    }
}

type Predicate = fn(&Probe, &ReaderConfig) -> bool;

fn is_short_tail_of_large_file(probe: &Probe, config: &ReaderConfig) -> bool {
    probe.offset < 0
        && probe.file_size > config.large_file_threshold
        && probe.tail_len() <= config.tail_chunk_max_lines
}

fn is_tail(probe: &Probe, _: &ReaderConfig) -> bool {
    probe.offset < 0
}

fn is_head_or_small_file(probe: &Probe, config: &ReaderConfig) -> bool {
    probe.offset >= 0 && (!probe.is_large(config) || probe.offset == 0)
}

fn is_deep_into_large_file(probe: &Probe, config: &ReaderConfig) -> bool {
    probe.offset >= 0
        && probe.is_large(config)
        && probe.offset.unsigned_abs() > config.estimate_min_offset as u64
}

/// Ordered dispatch table; the first matching predicate wins.
const STRATEGY_TABLE: &[(Predicate, ReadStrategy)] = &[
    (is_short_tail_of_large_file, ReadStrategy::TailChunk),
    (is_tail, ReadStrategy::TailCircularBuffer),
    (is_head_or_small_file, ReadStrategy::HeadStream),
    (is_deep_into_large_file, ReadStrategy::PositionEstimate),
];

pub fn select_strategy(probe: &Probe, config: &ReaderConfig) -> ReadStrategy {
    STRATEGY_TABLE
        .iter()
        .find(|(predicate, _)| predicate(probe, config))
        .map(|(_, strategy)| *strategy)
        // moderate offset into a large file
        .unwrap_or(ReadStrategy::HeadStream)
}

/// Lines produced by one strategy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSlice {
    pub lines: Vec<String>,
    pub strategy: ReadStrategy,
    /// Total lines in the file, when the strategy happened to learn it.
    pub total_lines: Option<usize>,
    pub approximate: bool,
    pub file_size: u64,
}

#[derive(Debug, Clone, Default)]
pub struct AdaptiveLineReader {
    config: ReaderConfig,
}

impl AdaptiveLineReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Reads `length` lines starting at `offset`. For a negative offset the
    /// last `min(|offset|, length)` lines of the file are returned.
    pub async fn read(&self, path: &Path, offset: i64, length: usize) -> Result<LineSlice, FsError> {
        let file_size = tokio::fs::metadata(path)
            .await
            .map_err(|e| FsError::io(path, e))?
            .len();
        let probe = Probe { file_size, offset };
        let strategy = select_strategy(&probe, &self.config);
        debug!(strategy = strategy.as_str(), file_size, offset, length, "Selected read strategy");

        self.run(path, probe, length, strategy)
            .await
            .map_err(|e| FsError::io(path, e))
    }

    async fn run(
        &self,
        path: &Path,
        probe: Probe,
        length: usize,
        strategy: ReadStrategy,
    ) -> io::Result<LineSlice> {
        let mut slice = LineSlice {
            lines: Vec::new(),
            strategy,
            total_lines: None,
            approximate: false,
            file_size: probe.file_size,
        };

        match strategy {
            ReadStrategy::TailChunk => {
                let wanted = probe.tail_len().min(length);
                slice.lines =
                    tail_chunk::last_n_lines(path, wanted, self.config.chunk_size).await?;
            }
            ReadStrategy::TailCircularBuffer => {
                let tail = tail_ring::last_n_lines(path, probe.tail_len().min(length)).await?;
                slice.lines = tail.lines;
                slice.total_lines = Some(tail.total_lines);
            }
            ReadStrategy::HeadStream => {
                let start = usize::try_from(probe.offset).unwrap_or(usize::MAX);
                let head = head::slice(path, start, length).await?;
                slice.lines = head.lines;
                slice.total_lines = head.total_lines;
            }
            ReadStrategy::PositionEstimate => {
                let start = usize::try_from(probe.offset).unwrap_or(usize::MAX);
                let estimated = estimate::approx_slice(
                    path,
                    start,
                    length,
                    self.config.sample_bytes,
                    probe.file_size,
                )
                .await?;
                slice.lines = estimated.lines;
                slice.approximate = estimated.approximate;
                slice.total_lines = estimated.total_lines;
            }
        }

        slice.lines.truncate(length);
        Ok(slice)
    }
}

/// Reads the next line into `buf` with its terminator removed (`\n` or
/// `\r\n`). Returns the number of raw bytes consumed; 0 means EOF.
pub(crate) async fn read_raw_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let consumed = reader.read_until(b'\n', buf).await?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(consumed)
}

pub(crate) fn decode_line(bytes: Vec<u8>) -> io::Result<String> {
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
