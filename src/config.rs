//! Plugin loader configuration.

use std::path::{Path, PathBuf};

use crate::filter::PLUGIN_SUFFIX;

/// Configuration for the plugin loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory scanned by [`PluginLoader::load_configured`](crate::PluginLoader::load_configured)
    pub plugins_dir: PathBuf,

    /// File name suffix that marks a plugin candidate (matched case-insensitively)
    pub suffix: String,
}

impl LoaderConfig {
    /// Create a configuration for the given plugins directory.
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            suffix: PLUGIN_SUFFIX.to_string(),
        }
    }

    /// Override the candidate suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new(default_plugins_dir())
    }
}

/// Directory containing the running executable.
pub fn executable_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(Path::to_path_buf)
}

/// Plugins live next to the executable; otherwise under the platform data directory.
pub fn default_plugins_dir() -> PathBuf {
    executable_dir()
        .or_else(|| dirs::data_dir().map(|dir| dir.join("plugins")))
        .unwrap_or_else(|| PathBuf::from("."))
}
