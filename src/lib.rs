/*!
 * # dualsub - dual subtitle merger
 *
 * A Rust library for merging two subtitle tracks into a single dual-language track.
 *
 * ## Features
 *
 * - Align two SRT tracks by start time
 * - Place desynchronized captions with a selectable policy (left, right, max, min time)
 * - Extend caption display time without overlapping the next caption
 * - Classic and progressive layouts for the merged output
 * - Output names derived from the input names, with localized labels
 * - UTF-8 and ISO-8859-1 input and output
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `merger`: Alignment/merge algorithm and output naming
 * - `desync`: Placement policy for desynchronized captions
 * - `dual_track`: Merged track container, extension and rendering
 * - `subtitle_processor`: Subtitle tracks and SRT parsing/writing
 * - `timestamp`: Millisecond timestamps used as alignment keys
 * - `labels`: Localized labels for output names
 * - `app_config`: Configuration management
 * - `file_utils`: File system and charset operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod desync;
pub mod dual_track;
pub mod errors;
pub mod file_utils;
pub mod labels;
pub mod language_utils;
pub mod merger;
pub mod subtitle_processor;
pub mod timestamp;

// Re-export main types for easier usage
pub use app_config::Config;
pub use desync::DesyncMode;
pub use dual_track::{DualEntry, MergedTrack};
pub use merger::{Merger, MergerOptions};
pub use subtitle_processor::{SubtitleEntry, Track};
pub use timestamp::Timestamp;
pub use errors::{AppError, MergeError, SubtitleError};
