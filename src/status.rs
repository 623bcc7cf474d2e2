// kvscript/src/status.rs
//
// Script engine status codes and their mapping to error kinds.
//
// This file is part of the Rust 'kvscript' library.
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.

//! Device status codes.
//!
//! Every script control request comes back with a status code filled in by
//! the device. The meaning of a code does not depend on the command that
//! produced it, so the translation to an [`ErrorKind`] is a fixed table.

use crate::{constants::*, errors::ErrorKind};
use std::{convert::TryFrom, fmt};

/// The status codes a script engine is known to report.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DeviceStatus {
    /// Success
    Success = KCANIO_SCRIPT_CTRL_ERR_SUCCESS,
    /// No free process slot
    NoMoreProcesses = KCANIO_SCRIPT_CTRL_ERR_NO_MORE_PROCESSES,
    /// Script file not found
    FileNotFound = KCANIO_SCRIPT_CTRL_ERR_FILE_NOT_FOUND,
    /// Script file could not be opened
    OpenFileError = KCANIO_SCRIPT_CTRL_ERR_OPEN_FILE_ERR,
    /// Out of memory opening the script file
    OpenFileNoMem = KCANIO_SCRIPT_CTRL_ERR_OPEN_FILE_NO_MEM,
    /// Reading the script file failed
    FileReadError = KCANIO_SCRIPT_CTRL_ERR_FILE_READ_ERR,
    /// Loading the script file failed
    LoadFileError = KCANIO_SCRIPT_CTRL_ERR_LOAD_FILE_ERR,
    /// Out of code memory
    OutOfCodeMem = KCANIO_SCRIPT_CTRL_ERR_OUT_OF_CODE_MEM,
    /// Rewinding the script file failed
    FileRewindFail = KCANIO_SCRIPT_CTRL_ERR_FILE_REWIND_FAIL,
    /// Loading the script failed
    LoadFail = KCANIO_SCRIPT_CTRL_ERR_LOAD_FAIL,
    /// Script setup failed
    SetupFail = KCANIO_SCRIPT_CTRL_ERR_SETUP_FAIL,
    /// Function table setup failed
    SetupFunTableFail = KCANIO_SCRIPT_CTRL_ERR_SETUP_FUN_TABLE_FAIL,
    /// Parameter setup failed
    SetupParamsFail = KCANIO_SCRIPT_CTRL_ERR_SETUP_PARAMS_FAIL,
    /// No process in the slot
    ProcessNotFound = KCANIO_SCRIPT_CTRL_ERR_PROCESSES_NOT_FOUND,
    /// The script could not be started
    StartFailed = KCANIO_SCRIPT_CTRL_ERR_START_FAILED,
    /// The script could not be stopped
    StopFailed = KCANIO_SCRIPT_CTRL_ERR_STOP_FAILED,
    /// The SPI bus to the script processor is busy
    SpiBusy = KCANIO_SCRIPT_CTRL_ERR_SPI_BUSY,
    /// The process is not stopped
    ProcessNotStopped = KCANIO_SCRIPT_CTRL_ERR_PROCESS_NOT_STOPPED,
    /// The process is not running
    ProcessNotRunning = KCANIO_SCRIPT_CTRL_ERR_PROCESS_NOT_RUNNING,
    /// Environment variable not found
    EnvVarNotFound = KCANIO_SCRIPT_CTRL_ERR_ENVVAR_NOT_FOUND,
    /// Unknown command
    UnknownCommand = KCANIO_SCRIPT_CTRL_ERR_UNKNOWN_COMMAND,
    /// The script was built with an incompatible compiler
    CompilerVersion = KCANIO_SCRIPT_CTRL_ERR_COMPILER_VERSION,
    /// Not implemented by the device
    NotImplemented = KCANIO_SCRIPT_CTRL_ERR_NOT_IMPLEMENTED,
}

/// Lookup table from device status to error kind.
///
/// Anything missing here is a generic script failure.
static STATUS_TABLE: &[(DeviceStatus, ErrorKind)] = {
    use DeviceStatus::*;
    &[
        (Success, ErrorKind::Ok),
        (NoMoreProcesses, ErrorKind::OutOfMemory),
        (OutOfCodeMem, ErrorKind::OutOfMemory),
        (OpenFileNoMem, ErrorKind::OutOfMemory),
        (FileNotFound, ErrorKind::DeviceFile),
        (OpenFileError, ErrorKind::DeviceFile),
        (FileReadError, ErrorKind::DeviceFile),
        (LoadFileError, ErrorKind::DeviceFile),
        (FileRewindFail, ErrorKind::DeviceFile),
        (SpiBusy, ErrorKind::HardwareBusy),
        (UnknownCommand, ErrorKind::NotImplemented),
        (NotImplemented, ErrorKind::NotImplemented),
        (CompilerVersion, ErrorKind::ScriptVersionMismatch),
    ]
};

/// Maps a raw device status code to an error kind.
///
/// This is total: codes that are unknown, or known but not singled out,
/// map to [`ErrorKind::ScriptFailure`].
pub fn map_status(code: u32) -> ErrorKind {
    STATUS_TABLE
        .iter()
        .find(|(status, _)| *status as u32 == code)
        .map(|&(_, kind)| kind)
        .unwrap_or(ErrorKind::ScriptFailure)
}

impl DeviceStatus {
    /// All the known status codes.
    pub const ALL: [DeviceStatus; 23] = {
        use DeviceStatus::*;
        [
            Success,
            NoMoreProcesses,
            FileNotFound,
            OpenFileError,
            OpenFileNoMem,
            FileReadError,
            LoadFileError,
            OutOfCodeMem,
            FileRewindFail,
            LoadFail,
            SetupFail,
            SetupFunTableFail,
            SetupParamsFail,
            ProcessNotFound,
            StartFailed,
            StopFailed,
            SpiBusy,
            ProcessNotStopped,
            ProcessNotRunning,
            EnvVarNotFound,
            UnknownCommand,
            CompilerVersion,
            NotImplemented,
        ]
    };

    /// The error kind for this status.
    #[inline]
    pub fn kind(self) -> ErrorKind {
        map_status(self as u32)
    }
}

impl TryFrom<u32> for DeviceStatus {
    type Error = u32;

    /// Looks up a known status, returning the code back if it is unknown.
    fn try_from(code: u32) -> Result<Self, Self::Error> {
        DeviceStatus::ALL
            .iter()
            .copied()
            .find(|status| *status as u32 == code)
            .ok_or(code)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DeviceStatus::*;
        let msg = match *self {
            Success => "success",
            NoMoreProcesses => "no more processes",
            FileNotFound => "file not found",
            OpenFileError => "error opening file",
            OpenFileNoMem => "no memory to open file",
            FileReadError => "error reading file",
            LoadFileError => "error loading file",
            OutOfCodeMem => "out of code memory",
            FileRewindFail => "file rewind failed",
            LoadFail => "load failed",
            SetupFail => "setup failed",
            SetupFunTableFail => "function table setup failed",
            SetupParamsFail => "parameter setup failed",
            ProcessNotFound => "process not found",
            StartFailed => "start failed",
            StopFailed => "stop failed",
            SpiBusy => "SPI busy",
            ProcessNotStopped => "process not stopped",
            ProcessNotRunning => "process not running",
            EnvVarNotFound => "environment variable not found",
            UnknownCommand => "unknown command",
            CompilerVersion => "wrong compiler version",
            NotImplemented => "not implemented",
        };
        write!(f, "{}", msg)
    }
}

/////////////////////////////////////////////////////////////////////////////
