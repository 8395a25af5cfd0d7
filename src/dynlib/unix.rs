//! `dlopen`-backed libraries.

use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use libloading::os::unix::{Library, RTLD_GLOBAL, RTLD_LAZY};

use super::{load_failure, platform_message, record_error, DynamicLibrary};
use crate::error::{LoaderError, Result};

/// A library opened with `RTLD_GLOBAL | RTLD_LAZY`, so its symbols are visible
/// to libraries loaded after it.
#[derive(Debug)]
pub struct UnixLibrary {
    library: Library,
    path: PathBuf,
}

impl UnixLibrary {
    /// Path the library was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DynamicLibrary for UnixLibrary {
    unsafe fn open(path: &Path) -> Result<Self> {
        match Library::open(Some(path), RTLD_GLOBAL | RTLD_LAZY) {
            Ok(library) => Ok(Self {
                library,
                path: path.to_path_buf(),
            }),
            Err(e) => Err(load_failure(path, platform_message(&e))),
        }
    }

    unsafe fn locate_symbol(&self, name: &str) -> Option<NonNull<c_void>> {
        match self.library.get::<*mut c_void>(name.as_bytes()) {
            Ok(symbol) => NonNull::new(*symbol),
            Err(e) => {
                record_error(&platform_message(&e));
                None
            }
        }
    }

    fn close(self) -> Result<()> {
        let path = self.path;
        self.library.close().map_err(|e| {
            let message = platform_message(&e);
            record_error(&message);
            LoaderError::CloseFailed { path, message }
        })
    }
}
