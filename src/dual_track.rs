use std::fmt;

use crate::desync::{DesyncMode, Placement};
use crate::subtitle_processor::SubtitleEntry;
use crate::timestamp::Timestamp;

// @module: Merged (dual) subtitle track and its SRT rendering

/// Filler used in the classic layout so each language keeps its screen row
pub const PADDING_LINE: &str = "\u{00a0}";

/// One merged unit: a left and a right caption shown together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DualEntry {
    /// Effective start time, also the ordering key
    pub key: Timestamp,

    /// Effective end time
    pub end: Timestamp,

    /// Left caption, or the empty sentinel
    pub left: SubtitleEntry,

    /// Right caption, or the empty sentinel
    pub right: SubtitleEntry,

    /// True when the right caption had no exact left match and was placed
    /// by the desynchronization policy
    pub desynchronized: bool,
}

impl DualEntry {
    /// Unit for two captions sharing a start time. Either side may be the sentinel.
    pub fn matched(left: SubtitleEntry, right: SubtitleEntry) -> Self {
        let key = if left.is_empty() { right.start } else { left.start };
        let end = [&left, &right]
            .iter()
            .filter(|e| !e.is_empty())
            .map(|e| e.end)
            .max()
            .unwrap_or(key);

        DualEntry {
            key,
            end,
            left,
            right,
            desynchronized: false,
        }
    }

    /// Unit for a leftover right caption placed by the desynchronization policy
    pub fn desynchronized(right: SubtitleEntry, placement: Placement) -> Self {
        DualEntry {
            key: placement.start,
            end: placement.end.max(placement.start),
            left: SubtitleEntry::empty(),
            right,
            desynchronized: true,
        }
    }

    pub fn is_matched(&self) -> bool {
        !self.left.is_empty() && !self.right.is_empty()
    }

    /// Text lines for the given layout
    pub fn render_lines(&self, progressive: bool) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.left.lines.len() + self.right.lines.len());

        if progressive {
            lines.extend(self.left.lines.iter().cloned());
            lines.extend(self.right.lines.iter().cloned());
            return lines;
        }

        let pad = |count: usize| std::iter::repeat_n(PADDING_LINE.to_string(), count);
        match (self.left.is_empty(), self.right.is_empty()) {
            (true, false) => {
                lines.extend(pad(self.right.lines.len()));
                lines.extend(self.right.lines.iter().cloned());
            }
            (false, true) => {
                lines.extend(self.left.lines.iter().cloned());
                lines.extend(pad(self.left.lines.len()));
            }
            _ => {
                lines.extend(self.left.lines.iter().cloned());
                lines.extend(self.right.lines.iter().cloned());
            }
        }
        lines
    }
}

/// Counters reported after a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub matched: usize,
    pub left_only: usize,
    pub right_only: usize,
    pub desynchronized: usize,
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched, {} left only, {} right only, {} desynchronized",
            self.matched, self.left_only, self.right_only, self.desynchronized
        )
    }
}

/// Ordered sequence of merged units plus the formatting state used by the writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTrack {
    entries: Vec<DualEntry>,
    pub extend: bool,
    pub extend_ms: u64,
    pub progressive: bool,
    pub desync_mode: DesyncMode,
}

impl MergedTrack {
    pub fn new(extend: bool, extend_ms: u64, progressive: bool, desync_mode: DesyncMode) -> Self {
        MergedTrack {
            entries: Vec::new(),
            extend,
            extend_ms,
            progressive,
            desync_mode,
        }
    }

    /// Append a unit. Callers append in key order.
    pub fn push(&mut self, entry: DualEntry) {
        debug_assert!(self.entries.last().is_none_or(|last| last.key <= entry.key));
        self.entries.push(entry);
    }

    /// Add units at their chronological positions. The sort is stable, so
    /// added units land after existing units with an equal key and keep their
    /// relative order.
    pub fn extend_sorted<I: IntoIterator<Item = DualEntry>>(&mut self, entries: I) {
        let before = self.entries.len();
        self.entries.extend(entries);
        if self.entries.len() > before {
            self.entries.sort_by_key(|e| e.key);
        }
    }

    pub fn entries(&self) -> &[DualEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &DualEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = Timestamp> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> MergeStats {
        let mut stats = MergeStats::default();
        for entry in &self.entries {
            if entry.desynchronized {
                stats.desynchronized += 1;
            } else if entry.is_matched() {
                stats.matched += 1;
            } else if entry.right.is_empty() {
                stats.left_only += 1;
            } else {
                stats.right_only += 1;
            }
        }
        stats
    }

    /// Lengthen every unit, and each non-empty side, by `extend_ms`.
    ///
    /// An extended end never passes the start of the next unit with a later
    /// start, and is never moved before its original value.
    pub fn apply_extension(&mut self) {
        if !self.extend || self.extend_ms == 0 {
            return;
        }
        let extend_ms = self.extend_ms;

        // Start of the next strictly later unit, per position
        let mut next_starts: Vec<Option<Timestamp>> = vec![None; self.entries.len()];
        let mut next: Option<Timestamp> = None;
        for i in (0..self.entries.len()).rev() {
            next_starts[i] = next;
            let key = self.entries[i].key;
            if i == 0 || self.entries[i - 1].key < key {
                next = Some(key);
            }
        }

        let clamp = |end: Timestamp, limit: Option<Timestamp>| -> Timestamp {
            let extended = end.add_millis(extend_ms);
            match limit {
                Some(limit) => extended.min(limit).max(end),
                None => extended,
            }
        };

        for (entry, limit) in self.entries.iter_mut().zip(next_starts) {
            entry.end = clamp(entry.end, limit);
            if !entry.left.is_empty() {
                entry.left.end = clamp(entry.left.end, limit);
            }
            if !entry.right.is_empty() {
                entry.right.end = clamp(entry.right.end, limit);
            }
        }
    }

    /// Render as an SRT document, one block per unit, numbered from 1
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!("{}\n{} --> {}\n", i + 1, entry.key, entry.end));
            for line in entry.render_lines(self.progressive) {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

impl<'a> IntoIterator for &'a MergedTrack {
    type Item = &'a DualEntry;
    type IntoIter = std::slice::Iter<'a, DualEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
