//! Plugin directory loader.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::LoaderConfig;
use crate::diagnostics::{diagnostic_line, Diagnostics, StderrDiagnostics};
use crate::dynlib::{DynamicLibrary, NativeLibrary};
use crate::error::{LoaderError, Result};
use crate::filter::is_plugin_candidate;

/// How far a directory scan got.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanStatus {
    /// Missing, not a directory, or empty. Nothing was attempted.
    #[default]
    Rejected,
    /// Every entry was visited.
    Scanned,
    /// Reading the directory failed part way.
    Aborted,
}

/// Outcome of one directory scan.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// How far the scan got
    pub status: ScanStatus,
    /// Candidates that loaded, in enumeration order
    pub loaded: Vec<PathBuf>,
    /// Candidates that failed to load, in enumeration order
    pub failed: Vec<PathBuf>,
    /// Entries skipped because their name did not match
    pub ignored: usize,
}

impl LoadReport {
    /// True iff the directory was scanned and no candidate failed.
    ///
    /// A directory holding only non-matching files counts as a success.
    pub fn is_success(&self) -> bool {
        self.status == ScanStatus::Scanned && self.failed.is_empty()
    }

    /// Number of candidates handed to the library loader.
    pub fn attempted(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }
}

/// Loads plugin libraries one at a time or a directory at once.
///
/// Successfully loaded libraries are never closed: plugins stay mapped for
/// the rest of the process.
pub struct PluginLoader<L: DynamicLibrary = NativeLibrary> {
    config: LoaderConfig,
    diagnostics: Arc<dyn Diagnostics>,
    _library: PhantomData<fn() -> L>,
}

impl PluginLoader<NativeLibrary> {
    /// Create a loader for the native platform reporting to stderr.
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(StderrDiagnostics))
    }
}

impl Default for PluginLoader<NativeLibrary> {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl<L: DynamicLibrary> PluginLoader<L> {
    /// Create a loader with a custom diagnostic channel.
    pub fn with_diagnostics(config: LoaderConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            config,
            diagnostics,
            _library: PhantomData,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Open a library and hand the handle to the caller.
    ///
    /// # Safety
    /// This loads native code. Ensure you trust the library.
    pub unsafe fn open(&self, path: &Path) -> Result<L> {
        let library = L::open(path)?;
        tracing::debug!("Loaded plugin library {}", path.display());
        Ok(library)
    }

    /// Load exactly one library and keep it mapped.
    ///
    /// # Safety
    /// Same as `open`.
    pub unsafe fn load_single(&self, path: &Path) -> Result<bool> {
        let library = self.open(path)?;
        std::mem::forget(library);
        Ok(true)
    }

    /// Load every plugin candidate in `dir`, never failing.
    ///
    /// Returns false if `dir` is missing, not a directory, empty, could not
    /// be read, or any candidate failed to load.
    ///
    /// # Safety
    /// Same as `open`, for every matching file in `dir`.
    pub unsafe fn load_directory(&self, dir: &Path) -> bool {
        self.scan(dir).is_success()
    }

    /// Load every plugin candidate in the configured plugins directory.
    ///
    /// # Safety
    /// Same as `load_directory`.
    pub unsafe fn load_configured(&self) -> bool {
        self.load_directory(&self.config.plugins_dir)
    }

    /// Scan `dir` and report what happened to each candidate.
    ///
    /// # Safety
    /// Same as `load_directory`.
    pub unsafe fn scan(&self, dir: &Path) -> LoadReport {
        let mut report = LoadReport::default();

        match self.validate(dir) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("Plugin directory {} is missing or empty", dir.display());
                return report;
            }
            Err(e) => {
                self.report_failure(&e);
                report.status = ScanStatus::Aborted;
                return report;
            }
        }

        report.status = ScanStatus::Scanned;
        if let Err(e) = self.scan_entries(dir, &mut report) {
            self.report_failure(&e);
            report.status = ScanStatus::Aborted;
        }

        tracing::info!(
            "Scanned {}: {} loaded, {} failed, {} ignored",
            dir.display(),
            report.loaded.len(),
            report.failed.len(),
            report.ignored
        );
        report
    }

    /// The directory must exist, be a directory and have at least one entry.
    fn validate(&self, dir: &Path) -> Result<bool> {
        let metadata = match std::fs::metadata(dir) {
            Ok(metadata) => metadata,
            Err(e) if is_missing(&e) => return Ok(false),
            Err(e) => return Err(enumeration(dir, e)),
        };
        if !metadata.is_dir() {
            return Ok(false);
        }

        let mut entries = std::fs::read_dir(dir).map_err(|source| enumeration(dir, source))?;
        Ok(entries.next().is_some())
    }

    unsafe fn scan_entries(&self, dir: &Path, report: &mut LoadReport) -> Result<()> {
        for entry in std::fs::read_dir(dir).map_err(|source| enumeration(dir, source))? {
            let path = entry.map_err(|source| enumeration(dir, source))?.path();

            if !is_plugin_candidate(&path, &self.config.suffix) {
                tracing::trace!("Ignoring {}", path.display());
                report.ignored += 1;
                continue;
            }

            match self.load_single(&path) {
                Ok(_) => report.loaded.push(path),
                Err(e) => {
                    tracing::warn!("Plugin {} failed to load", path.display());
                    self.report_failure(&e);
                    report.failed.push(path);
                }
            }
        }

        Ok(())
    }

    fn report_failure(&self, err: &LoaderError) {
        self.diagnostics.report(&diagnostic_line(err));
    }
}

/// `NotFound` or `ENOTDIR`: the path simply isn't there.
fn is_missing(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
    )
}

fn enumeration(dir: &Path, source: std::io::Error) -> LoaderError {
    LoaderError::Enumeration {
        path: dir.to_path_buf(),
        source,
    }
}

/// Load one plugin library with the native loader.
///
/// # Safety
/// This loads native code. Ensure you trust the library.
pub unsafe fn load_plugin(path: impl AsRef<Path>) -> Result<bool> {
    PluginLoader::<NativeLibrary>::default().load_single(path.as_ref())
}

/// Load every plugin in `dir` with the native loader, reporting failures to stderr.
///
/// # Safety
/// This loads native code. Ensure you trust every matching file in `dir`.
pub unsafe fn load_plugins(dir: impl AsRef<Path>) -> bool {
    PluginLoader::<NativeLibrary>::default().load_directory(dir.as_ref())
}
