//! Incremental log tailer
//!
//! Each pass reads only the part of the file that was appended since the
//! previous pass, and of that only the trailing `max_lines` complete lines.
//! The region is located by scanning backwards in [`CHUNK_SIZE`] blocks, so
//! memory stays bounded no matter how large the log grows. A trailing line
//! without its newline is left for the next pass.

use chrono::Local;
use std::fs::{File, Metadata};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::constants::tail::{CHUNK_SIZE, MAX_WINDOW_BYTES};
use crate::error::MonitorError;
use crate::event::Event;
use crate::parser::LineClassifier;
use crate::state::ExtractionState;
use crate::types::TailLines;

/// Identity and size of the monitored file at one point in time
///
/// `file_id` is the inode on Unix and `0` elsewhere, where rotation is
/// only noticed through a shrink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub len: u64,
    pub file_id: u64,
}

impl FileStamp {
    #[must_use]
    pub fn from_metadata(meta: &Metadata) -> Self {
        #[cfg(unix)]
        let file_id = std::os::unix::fs::MetadataExt::ino(meta);
        #[cfg(not(unix))]
        let file_id = 0;

        Self {
            len: meta.len(),
            file_id,
        }
    }

    /// Whether `self` is a different or shrunken file compared to `previous`
    #[must_use]
    pub fn replaces(&self, previous: &Self) -> bool {
        self.file_id != previous.file_id || self.len < previous.len
    }
}

/// Position of the tailer within the monitored file
///
/// Owned by the poller and threaded through successive passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TailCursor {
    /// File as seen at the last pass, `None` while the file is absent
    observed: Option<FileStamp>,
    /// Bytes already handed to the classifier
    offset: u64,
}

impl TailCursor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            observed: None,
            offset: 0,
        }
    }

    #[must_use]
    #[inline]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    #[must_use]
    #[inline]
    pub fn observed_len(&self) -> Option<u64> {
        self.observed.map(|stamp| stamp.len)
    }

    /// Whether a pass is due given the file's current stamp
    ///
    /// True when the length or identity changed, the file is empty, or the
    /// file is missing (so its absence keeps being reported).
    #[must_use]
    pub fn needs_pass(&self, current: Option<FileStamp>) -> bool {
        match current {
            None => true,
            Some(stamp) if stamp.len == 0 => true,
            Some(stamp) => self.observed != Some(stamp),
        }
    }
}

/// Result of one tail pass
#[derive(Debug, Clone, Default)]
pub struct TailOutcome {
    /// Events produced by the new lines, in file order
    pub events: Vec<Event>,
    /// The new complete lines themselves
    pub lines: Vec<String>,
    pub cursor: TailCursor,
}

/// Byte range of complete lines to hand to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Window {
    start: u64,
    end: u64,
}

/// Reads new lines from one log file and feeds them to the classifier
#[derive(Debug, Clone)]
pub struct LogTailer {
    path: PathBuf,
    max_lines: TailLines,
    classifier: LineClassifier,
}

impl LogTailer {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, max_lines: TailLines) -> Self {
        Self {
            path: path.into(),
            max_lines,
            classifier: LineClassifier::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current stamp of the file, `None` if it does not exist
    pub fn stat(&self) -> Result<Option<FileStamp>, MonitorError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(FileStamp::from_metadata(&meta))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(MonitorError::ReadFailure {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Run one pass, folding its results into `state`
    ///
    /// Never fails: a missing file sets `source_not_found`, any other I/O
    /// failure sets `error` and records a synthetic error entry. In both
    /// cases the returned cursor is safe to pass back next time.
    pub fn tail(&self, cursor: TailCursor, state: &mut ExtractionState) -> TailOutcome {
        match self.read_new_lines(cursor) {
            Ok((lines, cursor)) => {
                let events = self
                    .classifier
                    .classify_lines(lines.iter().map(String::as_str), state);
                state.complete_pass(Local::now());
                debug!(
                    path = %self.path.display(),
                    lines = lines.len(),
                    events = events.len(),
                    offset = cursor.offset,
                    "Tail pass complete"
                );
                TailOutcome {
                    events,
                    lines,
                    cursor,
                }
            }
            Err(MonitorError::SourceNotFound { .. }) => {
                if cursor.observed.is_some() {
                    info!(path = %self.path.display(), "Log file disappeared");
                }
                state.mark_source_missing();
                TailOutcome::default()
            }
            Err(err) => {
                warn!(error = %err, "Tail pass failed");
                state.mark_read_failure(Local::now(), &err);
                TailOutcome {
                    cursor,
                    ..TailOutcome::default()
                }
            }
        }
    }

    fn read_new_lines(
        &self,
        cursor: TailCursor,
    ) -> Result<(Vec<String>, TailCursor), MonitorError> {
        let read_failure = |source| MonitorError::ReadFailure {
            path: self.path.clone(),
            source,
        };

        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(MonitorError::SourceNotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(read_failure(e)),
        };
        let stamp = FileStamp::from_metadata(&file.metadata().map_err(read_failure)?);
        let len = stamp.len;

        let mut offset = cursor.offset;
        match cursor.observed {
            None => info!(path = %self.path.display(), len, "Log file found"),
            Some(previous) if stamp.replaces(&previous) => {
                info!(
                    path = %self.path.display(),
                    previous_len = previous.len,
                    len,
                    rotated = stamp.file_id != previous.file_id,
                    "Log file rotated or truncated, re-reading from start"
                );
                offset = 0;
            }
            Some(_) => {}
        }
        // Resume offset past EOF without a visible shrink: never seek beyond it
        if len < offset {
            offset = 0;
        }

        let mut next = TailCursor {
            observed: Some(stamp),
            offset,
        };
        if len == offset {
            return Ok((Vec::new(), next));
        }

        let Some(window) = locate_window(&mut file, offset, len, self.max_lines.get())
            .map_err(read_failure)?
        else {
            return Ok((Vec::new(), next));
        };

        let lines = read_lines(&mut file, window).map_err(read_failure)?;
        next.offset = window.end;
        Ok((lines, next))
    }
}

/// Find the trailing `max_lines` complete lines in `[offset, len)`
///
/// Returns `None` when the region holds no newline at all.
fn locate_window(
    file: &mut File,
    offset: u64,
    len: u64,
    max_lines: usize,
) -> io::Result<Option<Window>> {
    let floor = offset.max(len.saturating_sub(MAX_WINDOW_BYTES));
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut end = None;
    let mut newlines = 0usize;
    let mut earliest_newline = None;
    let mut chunk_end = len;

    while chunk_end > floor {
        let chunk_start = chunk_end.saturating_sub(CHUNK_SIZE as u64).max(floor);
        let n = (chunk_end - chunk_start) as usize;
        file.seek(SeekFrom::Start(chunk_start))?;
        file.read_exact(&mut buf[..n])?;

        for (i, &byte) in buf[..n].iter().enumerate().rev() {
            if byte != b'\n' {
                continue;
            }
            let after = chunk_start + i as u64 + 1;
            newlines += 1;
            if end.is_none() {
                end = Some(after);
            }
            if newlines > max_lines {
                return Ok(end.map(|end| Window { start: after, end }));
            }
            earliest_newline = Some(after);
        }
        chunk_end = chunk_start;
    }

    let Some(end) = end else {
        return Ok(None);
    };
    // Clamped by the byte ceiling: the first bytes above the floor may be the
    // tail of a longer line, so start after the earliest newline instead.
    let start = if floor > offset {
        match earliest_newline {
            Some(pos) if pos < end => pos,
            _ => end,
        }
    } else {
        floor
    };
    Ok(Some(Window { start, end }))
}

fn read_lines(file: &mut File, window: Window) -> io::Result<Vec<String>> {
    let mut bytes = vec![0u8; (window.end - window.start) as usize];
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    file.seek(SeekFrom::Start(window.start))?;
    file.read_exact(&mut bytes)?;

    let body = bytes.strip_suffix(b"\n").unwrap_or(&bytes);
    Ok(body
        .split(|&b| b == b'\n')
        .map(|line| {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            String::from_utf8_lossy(line).into_owned()
        })
        .collect())
}
