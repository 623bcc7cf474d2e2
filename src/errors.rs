// kvscript/src/errors.rs
//
// Implements errors for the Rust 'kvscript' library.
//
// This file is part of the Rust 'kvscript' library.
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.

//! Script engine errors.
//!
//! There are two origins of failure, and they are kept apart:
//!
//! - Local failures. The host script file could not be opened or read
//!   ([`Error::HostFile`]), or the ioctl itself failed below the script
//!   engine ([`Error::Transport`]). Both carry the OS error as their source.
//!
//! - Device failures. The request reached the script engine, which answered
//!   with a status code other than success. The code is run through
//!   [`map_status`](crate::map_status) and reported as [`Error::Device`].

use std::{fmt, io};
use thiserror::Error;

/// Alias for `Result<T, kvscript::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

// ===== ErrorKind =====

/// The general category of a script operation outcome.
///
/// The first seven kinds are what a device status code can map to. The
/// last two only arise on the host side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operation succeeded.
    Ok,
    /// The device ran out of process slots or memory.
    OutOfMemory,
    /// A file operation failed on the device.
    DeviceFile,
    /// The device hardware is busy.
    HardwareBusy,
    /// The device does not know or support the command.
    NotImplemented,
    /// The script was built by an incompatible compiler version.
    ScriptVersionMismatch,
    /// Any other script engine failure.
    ScriptFailure,
    /// The request did not make it to the script engine.
    Transport,
    /// The script file on the host could not be opened or read.
    HostFile,
}

impl ErrorKind {
    /// Whether this is the success kind.
    #[inline]
    pub fn is_ok(&self) -> bool {
        *self == ErrorKind::Ok
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ErrorKind::*;
        let msg = match *self {
            Ok => "no error",
            OutOfMemory => "out of memory",
            DeviceFile => "device file error",
            HardwareBusy => "hardware busy",
            NotImplemented => "not implemented",
            ScriptVersionMismatch => "wrong script version",
            ScriptFailure => "script failure",
            Transport => "transport error",
            HostFile => "host file error",
        };
        write!(f, "{}", msg)
    }
}

// ===== Error =====

/// A failed script operation.
#[derive(Error, Debug)]
pub enum Error {
    /// The script engine reported a failure status.
    #[error("script engine: {kind} (status {status})")]
    Device {
        /// The mapped category. Never `ErrorKind::Ok`.
        kind: ErrorKind,
        /// The raw status code from the device.
        status: u32,
    },
    /// The ioctl to the driver failed.
    #[error("transport: {0}")]
    Transport(#[source] io::Error),
    /// The host script file could not be opened or read.
    #[error("host file: {0}")]
    HostFile(#[source] io::Error),
}

impl Error {
    /// Gets the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::Device { kind, .. } => kind,
            Error::Transport(_) => ErrorKind::Transport,
            Error::HostFile(_) => ErrorKind::HostFile,
        }
    }

    /// Gets the raw device status code, if the device reported one.
    pub fn device_status(&self) -> Option<u32> {
        match *self {
            Error::Device { status, .. } => Some(status),
            _ => None,
        }
    }

    /// Gets the OS error number behind a host or transport failure.
    pub fn raw_os_error(&self) -> Option<i32> {
        match *self {
            Error::Transport(ref e) | Error::HostFile(ref e) => e.raw_os_error(),
            Error::Device { .. } => None,
        }
    }
}

/////////////////////////////////////////////////////////////////////////////
