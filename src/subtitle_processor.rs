use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::timestamp::Timestamp;

// @module: Subtitle tracks and SRT reading/writing

// @const: SRT timing line, timestamps validated separately
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S+)\s*-->\s*(\S+)").unwrap()
});

/// Standard subtitle file extension, including the dot
pub const SRT_EXT: &str = ".srt";

// @struct: Single caption unit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubtitleEntry {
    // @field: Start time
    pub start: Timestamp,

    // @field: End time
    pub end: Timestamp,

    // @field: Text lines, empty for the sentinel
    pub lines: Vec<String>,
}

impl SubtitleEntry {
    pub fn new(start: Timestamp, end: Timestamp, lines: Vec<String>) -> Self {
        SubtitleEntry { start, end, lines }
    }

    /// Convenience constructor taking raw milliseconds and a single text block
    pub fn from_millis(start_ms: u64, end_ms: u64, text: &str) -> Self {
        SubtitleEntry {
            start: Timestamp::from_millis(start_ms),
            end: Timestamp::from_millis(end_ms),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// The "no counterpart on this side" sentinel
    pub fn empty() -> Self {
        SubtitleEntry::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} --> {}", self.start, self.end)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// One subtitle file's content, keyed by start time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    /// Source file name, when the track was read from disk
    pub file_name: Option<String>,

    entries: BTreeMap<Timestamp, SubtitleEntry>,
}

impl Track {
    pub fn new(file_name: Option<String>) -> Self {
        Track {
            file_name,
            entries: BTreeMap::new(),
        }
    }

    /// Build a track from entries; on a key collision the first entry wins
    pub fn from_entries<I: IntoIterator<Item = SubtitleEntry>>(entries: I) -> Self {
        let mut track = Track::new(None);
        for entry in entries {
            track.insert(entry);
        }
        track
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Insert an entry under its start time. Returns false and leaves the
    /// track untouched when the key is already taken.
    pub fn insert(&mut self, entry: SubtitleEntry) -> bool {
        match self.entries.entry(entry.start) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, key: &Timestamp) -> Option<&SubtitleEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Timestamp> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Timestamp, &SubtitleEntry)> {
        self.entries.iter()
    }

    /// Sorted copy of the entries, for callers that need to consume them
    pub fn to_map(&self) -> BTreeMap<Timestamp, SubtitleEntry> {
        self.entries.clone()
    }

    /// Serialize to SRT, renumbering blocks from 1
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.values().enumerate() {
            out.push_str(&format!("{}\n{}\n", i + 1, entry));
        }
        out
    }

    /// Parse SRT content into a track.
    ///
    /// Timing lines with a malformed timestamp abort the parse. Blocks without
    /// text, blocks ending before they start and duplicate start times are
    /// skipped with a warning.
    pub fn parse_srt_string(content: &str) -> Result<Self, SubtitleError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut track = Track::new(None);

        let mut current: Option<(Timestamp, Timestamp)> = None;
        let mut current_lines: Vec<String> = Vec::new();
        let mut skipped = 0usize;

        for (line_index, line) in content.lines().enumerate() {
            let trimmed = line.trim_ascii();

            if trimmed.is_empty() {
                if let Some((start, end)) = current.take() {
                    if !track.finish_block(start, end, std::mem::take(&mut current_lines)) {
                        skipped += 1;
                    }
                }
                continue;
            }

            if current.is_none() {
                if trimmed.contains("-->") {
                    let caps = TIMING_REGEX.captures(trimmed).ok_or_else(|| {
                        SubtitleError::MalformedTimestamp(trimmed.to_string())
                    })?;
                    let start = Timestamp::parse(&caps[1])?;
                    let end = Timestamp::parse(&caps[2])?;
                    current = Some((start, end));
                } else if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    warn!("Unexpected text at line {} before a timing line: {}", line_index + 1, trimmed);
                }
                continue;
            }

            current_lines.push(trimmed.to_string());
        }

        if let Some((start, end)) = current {
            if !track.finish_block(start, end, current_lines) {
                skipped += 1;
            }
        }

        if skipped > 0 {
            debug!("Skipped {} subtitle block(s) while parsing", skipped);
        }

        Ok(track)
    }

    fn finish_block(&mut self, start: Timestamp, end: Timestamp, lines: Vec<String>) -> bool {
        if lines.is_empty() {
            warn!("Skipping empty subtitle block at {}", start);
            return false;
        }
        if end < start {
            warn!("Skipping subtitle block with end {} before start {}", end, start);
            return false;
        }
        if !self.insert(SubtitleEntry::new(start, end, lines)) {
            warn!("Duplicate subtitle start time {}, keeping the first block", start);
            return false;
        }
        true
    }
}

/// Last component of a path, extension kept
pub fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// File name without directories and without the `.srt` extension
pub fn base_name(path: &str) -> String {
    file_name(path).replace(SRT_EXT, "")
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Track")?;
        writeln!(f, "Source: {}", self.file_name.as_deref().unwrap_or("<memory>"))?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
