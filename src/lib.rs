//! Discovers and loads shared-library plugins at process startup.
//!
//! A plugin is any file in the plugins directory whose name ends, ignoring
//! case, with [`PLUGIN_SUFFIX`] (`.ext.so`, `.ext.dylib` or `.ext.dll`
//! depending on the platform). Loading maps the library into the process and
//! keeps it there; nothing inside the library is called afterwards.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lib_plugin_loader::{LoaderConfig, PluginLoader, TracingDiagnostics};
//!
//! fn main() {
//!     let config = LoaderConfig::new("/opt/myapp/plugins");
//!     let loader = PluginLoader::with_diagnostics(config, Arc::new(TracingDiagnostics));
//!
//!     // Safety: everything in the plugins directory is trusted.
//!     let report = unsafe { loader.scan(&loader.config().plugins_dir) };
//!     if !report.is_success() {
//!         eprintln!("{} plugin(s) failed to load", report.failed.len());
//!     }
//! }
//! ```

mod config;
mod diagnostics;
mod dynlib;
mod error;
mod filter;
mod loader;

pub use config::*;
pub use diagnostics::*;
pub use dynlib::{close_handle, last_error, DynamicLibrary, NativeLibrary, NO_ERROR_MESSAGE};
pub use error::*;
pub use filter::*;
pub use loader::*;
