//! Plugin file naming convention.

use std::path::Path;

/// Compound suffix a plugin file must end with on this platform.
#[cfg(windows)]
pub const PLUGIN_SUFFIX: &str = ".ext.dll";

/// Compound suffix a plugin file must end with on this platform.
#[cfg(all(unix, target_vendor = "apple"))]
pub const PLUGIN_SUFFIX: &str = ".ext.dylib";

/// Compound suffix a plugin file must end with on this platform.
#[cfg(all(unix, not(target_vendor = "apple")))]
pub const PLUGIN_SUFFIX: &str = ".ext.so";

/// Case-insensitive check that `name` ends with `suffix`.
pub fn has_plugin_suffix(name: &str, suffix: &str) -> bool {
    name.len()
        .checked_sub(suffix.len())
        .and_then(|start| name.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

/// Whether the file at `path` is a plugin candidate under `suffix`.
pub fn is_plugin_candidate(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| has_plugin_suffix(&name.to_string_lossy(), suffix))
        .unwrap_or(false)
}
