/*!
 * Alignment and merge of two subtitle tracks.
 *
 * Entries are matched by exact start time. Right-side entries left over after
 * the pass over the left track are treated as desynchronized and placed by
 * [`crate::desync::ReferenceIndex`].
 */

use std::collections::HashMap;
use std::path::MAIN_SEPARATOR;
use std::sync::Arc;

use log::debug;

use crate::desync::{DesyncMode, ReferenceIndex};
use crate::dual_track::{DualEntry, MergedTrack};
use crate::errors::MergeError;
use crate::labels::{self, BuiltinLabels, LabelProvider};
use crate::subtitle_processor::{self, SRT_EXT, Track};

/// Settings fixed for a merge run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergerOptions {
    /// Directory the output name is placed in
    pub output_dir: String,

    /// Lengthen every caption by `extend_ms`
    pub extend: bool,

    /// Extension in milliseconds
    pub extend_ms: u64,

    /// Progressive layout for the writer
    pub progressive: bool,

    /// Placement policy for desynchronized entries
    pub desync_mode: DesyncMode,

    /// Name the output as a translation of a single track
    pub translate: bool,

    /// Use the "merged" label instead of "translated" in translate mode
    pub merge_label: bool,

    /// Encoding of the input and output files
    pub charset: String,
}

impl MergerOptions {
    pub fn new(output_dir: impl Into<String>) -> Self {
        MergerOptions {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Enable extension, given in seconds
    pub fn with_extend_secs(mut self, secs: u64) -> Self {
        self.extend = true;
        self.extend_ms = secs.saturating_mul(1000);
        self
    }
}

impl Default for MergerOptions {
    fn default() -> Self {
        MergerOptions {
            output_dir: ".".to_string(),
            extend: false,
            extend_ms: 0,
            progressive: false,
            desync_mode: DesyncMode::default(),
            translate: false,
            merge_label: false,
            charset: "UTF-8".to_string(),
        }
    }
}

/// Merges two tracks into a dual track and names the result
#[derive(Debug, Clone)]
pub struct Merger {
    options: MergerOptions,
    labels: Arc<dyn LabelProvider>,
}

impl Merger {
    /// Merger with English labels
    pub fn new(options: MergerOptions) -> Self {
        Self::with_labels(options, Arc::new(BuiltinLabels::english()))
    }

    pub fn with_labels(options: MergerOptions, labels: Arc<dyn LabelProvider>) -> Self {
        Merger { options, labels }
    }

    pub fn options(&self) -> &MergerOptions {
        &self.options
    }

    /// Align `left` and `right` by start time.
    ///
    /// Neither input is modified. Every entry of either track ends up in
    /// exactly one unit of the result, which is ordered by key.
    pub fn merge_subs(&self, left: &Track, right: &Track) -> MergedTrack {
        let options = &self.options;
        let mut merged = MergedTrack::new(
            options.extend,
            options.extend_ms,
            options.progressive,
            options.desync_mode,
        );

        let left_entries = left.to_map();
        let mut right_pending = right.to_map();

        if left_entries.is_empty() || right_pending.is_empty() {
            for entry in left_entries.into_values() {
                merged.push(DualEntry::matched(entry, Default::default()));
            }
            for entry in right_pending.into_values() {
                merged.push(DualEntry::matched(Default::default(), entry));
            }
        } else {
            for (key, entry) in left_entries {
                let counterpart = right_pending.remove(&key).unwrap_or_default();
                merged.push(DualEntry::matched(entry, counterpart));
            }

            let references = ReferenceIndex::new(merged.entries());
            let mut placed = Vec::with_capacity(right_pending.len());
            for (key, entry) in right_pending {
                debug!("Desynchronization on {} {:?}", key, entry.lines);
                let placement = references.resolve(options.desync_mode, &entry);
                if let Some(reference) = placement.reference {
                    debug!("Placed {} at {} using reference {} ({})", key, placement.start, reference, options.desync_mode);
                }
                placed.push(DualEntry::desynchronized(entry, placement));
            }
            merged.extend_sorted(placed);
        }

        merged.apply_extension();

        debug!("Merged {} + {} entries: {}", left.len(), right.len(), merged.stats());
        merged
    }

    /// Output path for merging the files named `left` and `right`.
    ///
    /// In merge mode the name is built from the characters both names share.
    /// In translate mode it is the first present name with a localized suffix.
    /// When only one name is present in merge mode it is used for both.
    pub fn compute_output_name(&self, left: Option<&str>, right: Option<&str>) -> Result<String, MergeError> {
        let (first, second) = match (left, right) {
            (Some(a), Some(b)) => (a, b),
            (Some(a), None) | (None, Some(a)) => (a, a),
            (None, None) => {
                return Err(MergeError::MissingInput(
                    "at least one input file name is required".to_string(),
                ));
            }
        };

        let name = if self.options.translate {
            self.translated_name(first)
        } else {
            self.common_name(first, second)
        };

        Ok(format!("{}{}{}", self.options.output_dir, MAIN_SEPARATOR, name))
    }

    /// [`Self::compute_output_name`] for the file names carried by two tracks
    pub fn output_name_for(&self, left: &Track, right: &Track) -> Result<String, MergeError> {
        self.compute_output_name(left.file_name.as_deref(), right.file_name.as_deref())
    }

    fn common_name(&self, first: &str, second: &str) -> String {
        let first = subtitle_processor::base_name(first);
        let second = subtitle_processor::base_name(second);

        let mut name = common_characters(&first, &second);
        if name.is_empty() {
            name = labels::text(self.labels.as_ref(), labels::FINAL_NAME_KEY).trim().to_string();
        }
        name + SRT_EXT
    }

    fn translated_name(&self, source: &str) -> String {
        let file_name = subtitle_processor::file_name(source);

        let (stem, extension) = match file_name.rfind('.') {
            Some(i) => file_name.split_at(i),
            None => (file_name.as_str(), ""),
        };
        let key = if self.options.merge_label {
            labels::MERGED_KEY
        } else {
            labels::TRANSLATED_KEY
        };

        format!("{} {}{}", stem, labels::text(self.labels.as_ref(), key), extension)
    }
}

/// Multiset intersection of the characters of `first` and `second`, in the
/// order they appear in `first`, trimmed of surrounding whitespace
pub fn common_characters(first: &str, second: &str) -> String {
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in second.chars() {
        *available.entry(c).or_insert(0) += 1;
    }

    let mut shared = String::with_capacity(first.len());
    for c in first.chars() {
        if let Some(count) = available.get_mut(&c) {
            if *count > 0 {
                *count -= 1;
                shared.push(c);
            }
        }
    }
    shared.trim().to_string()
}
