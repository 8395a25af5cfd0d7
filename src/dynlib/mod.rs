//! Platform-uniform access to shared libraries.
//!
//! Each OS family gets its own implementation of [`DynamicLibrary`], selected
//! at compile time and exported as [`NativeLibrary`]. Failures are recorded in
//! a per-thread slot so [`DynamicLibrary::error`] can report the most recent
//! one, the way `dlerror`/`GetLastError` do.

use std::cell::RefCell;
use std::ffi::c_void;
use std::path::Path;
use std::ptr::NonNull;

use crate::error::{LoaderError, Result};

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixLibrary as NativeLibrary;
#[cfg(windows)]
pub use windows::WindowsLibrary as NativeLibrary;

/// Text reported when the platform gives no error description.
pub const NO_ERROR_MESSAGE: &str = "Unable to get any error message";

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// A shared library mapped into the current process.
pub trait DynamicLibrary: Sized {
    /// Map the library at `path` into the process.
    ///
    /// Either the whole library is mapped and a handle is returned, or
    /// nothing is mapped and [`LoaderError::LoadFailed`] carries the path and
    /// the platform diagnostic.
    ///
    /// # Safety
    /// Opening a library runs its initialization routines. The library must
    /// be trusted.
    unsafe fn open(path: &Path) -> Result<Self>;

    /// Resolve an exported symbol to its address, or `None` if it is absent.
    ///
    /// # Safety
    /// The caller is responsible for casting the address to the correct type
    /// and for not using it after the library is closed.
    unsafe fn locate_symbol(&self, name: &str) -> Option<NonNull<c_void>>;

    /// Release the library.
    fn close(self) -> Result<()>;

    /// Description of the most recent failure on the calling thread.
    fn error() -> String {
        last_error()
    }
}

/// Close `handle` if there is one. `None` is a no-op.
pub fn close_handle<L: DynamicLibrary>(handle: Option<L>) -> Result<()> {
    match handle {
        Some(library) => library.close(),
        None => Ok(()),
    }
}

/// Most recent failure recorded on the calling thread.
pub fn last_error() -> String {
    LAST_ERROR
        .with(|slot| slot.borrow().clone())
        .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string())
}

pub(crate) fn record_error(message: &str) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message.to_string()));
}

/// Record the failure and build the matching [`LoaderError::LoadFailed`].
pub(crate) fn load_failure(path: &Path, message: String) -> LoaderError {
    record_error(&message);
    LoaderError::LoadFailed {
        path: path.to_path_buf(),
        message,
    }
}

/// Flatten a libloading error and its sources into one line.
pub(crate) fn platform_message(err: &libloading::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    if message.trim().is_empty() {
        NO_ERROR_MESSAGE.to_string()
    } else {
        message
    }
}
