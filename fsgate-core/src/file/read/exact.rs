use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    None,
    Lf,
    Cr,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::CrLf => "\r\n",
        }
    }
}

/// A line together with the terminator that followed it in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWithEnding<'a> {
    pub content: &'a str,
    pub ending: LineEnding,
}

/// Splits `text` into lines, keeping each terminator. `\r\n` is one
/// terminator, a lone `\r` or `\n` is another. Joining the result with
/// [`join_lines`] reproduces `text` exactly.
pub fn split_preserving_endings(text: &str) -> Vec<LineWithEnding<'_>> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let ending = match bytes[i] {
            b'\n' => LineEnding::Lf,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => LineEnding::CrLf,
            b'\r' => LineEnding::Cr,
            _ => {
                i += 1;
                continue;
            }
        };
        out.push(LineWithEnding {
            content: &text[start..i],
            ending,
        });
        i += ending.as_str().len();
        start = i;
    }

    if start < bytes.len() {
        out.push(LineWithEnding {
            content: &text[start..],
            ending: LineEnding::None,
        });
    }
    out
}

pub fn join_lines(lines: &[LineWithEnding<'_>]) -> String {
    let mut out = String::with_capacity(
        lines
            .iter()
            .map(|l| l.content.len() + l.ending.as_str().len())
            .sum(),
    );
    for line in lines {
        out.push_str(line.content);
        out.push_str(line.ending.as_str());
    }
    out
}

/// Lines `[offset, offset + length)` of `text` with their original
/// terminators. `length == None` means "to the end".
pub fn select_exact(text: &str, offset: usize, length: Option<usize>) -> String {
    if offset == 0 && length.is_none() {
        return text.to_string();
    }
    let lines = split_preserving_endings(text);
    let start = offset.min(lines.len());
    let end = match length {
        Some(length) => start.saturating_add(length).min(lines.len()),
        None => lines.len(),
    };
    join_lines(&lines[start..end])
}

/// Reads the whole file and returns the selected lines byte-for-byte.
pub async fn read_exact(path: &Path, offset: usize, length: Option<usize>) -> io::Result<String> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(select_exact(&text, offset, length))
}
