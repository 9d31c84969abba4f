use anyhow::{Result, Context, anyhow};
use log::{warn, info, debug};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::dual_track::MergedTrack;
use crate::file_utils::{Charset, FileManager};
use crate::merger::Merger;
use crate::subtitle_processor::Track;

// @module: Application controller for subtitle merging

/// Main application controller: reads two subtitle files, merges and writes the result
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Merger built from the configuration
    merger: Merger,

    // @field: Encoding for reading and writing
    charset: Charset,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let options = config.merger_options()?;
        let charset = Charset::from_name(&options.charset)?;
        let merger = Merger::with_labels(options, config.label_provider()?);

        Ok(Self {
            config,
            merger,
            charset,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn merger(&self) -> &Merger {
        &self.merger
    }

    /// Read and parse one subtitle file, remembering its path as the track's file name
    pub fn load_track<P: AsRef<Path>>(&self, path: P) -> Result<Track> {
        let path = path.as_ref();
        let content = FileManager::read_to_string(path, self.charset)?;
        let track = Track::parse_srt_string(&content)
            .with_context(|| format!("Failed to parse subtitle file: {:?}", path))?;

        debug!("Loaded {} entries from {:?}", track.len(), path);
        Ok(track.with_file_name(path.to_string_lossy()))
    }

    /// Merge two in-memory tracks with the configured merger
    pub fn merge_tracks(&self, left: &Track, right: &Track) -> MergedTrack {
        self.merger.merge_subs(left, right)
    }

    /// Merge two subtitle files and write the dual track.
    ///
    /// Returns the written path, or `None` when the output already exists and
    /// `force_overwrite` is not set.
    pub fn merge_files(&self, left_path: &Path, right_path: &Path, force_overwrite: bool) -> Result<Option<PathBuf>> {
        let start_time = std::time::Instant::now();

        for path in [left_path, right_path] {
            if !FileManager::file_exists(path) {
                return Err(anyhow!("Input file does not exist: {:?}", path));
            }
        }

        let left = self.load_track(left_path)?;
        let right = self.load_track(right_path)?;

        let output_path = PathBuf::from(self.merger.output_name_for(&left, &right)?);
        if Self::is_same_file(&output_path, left_path) || Self::is_same_file(&output_path, right_path) {
            return Err(anyhow!(
                "Output {:?} would overwrite an input file, choose another output directory",
                output_path
            ));
        }
        if output_path.exists() && !force_overwrite {
            warn!("Skipping, output already exists: {:?} (use -f to force overwrite)", output_path);
            return Ok(None);
        }

        let merged = self.merge_tracks(&left, &right);
        let stats = merged.stats();
        if stats.desynchronized > 0 {
            warn!("{} desynchronized entries in {:?}", stats.desynchronized, right_path);
        }

        FileManager::write_to_file(&output_path, &merged.to_srt_string(), self.charset)?;

        info!("Merged {} units ({}) in {:.2?}", merged.len(), stats, start_time.elapsed());
        info!("Success: {:?}", output_path);

        Ok(Some(output_path))
    }

    // @checks: Both paths exist and resolve to the same file
    fn is_same_file(a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
