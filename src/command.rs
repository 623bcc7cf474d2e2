// kvscript/src/command.rs
//
// Script control requests.
//
// This file is part of the Rust 'kvscript' library.
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.

//! The requests that can be sent to a script engine.

use crate::constants::*;
use libc::c_int;
use std::fmt;

// ===== StopMode =====

/// How a running script should be stopped.
///
/// The value is passed through to the device untouched. The constants are
/// the modes canlib documents, but any value is accepted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StopMode(pub i8);

impl StopMode {
    /// Let the script run its `on stop` handler.
    pub const NORMAL: StopMode = StopMode(0);
    /// Kill the script without running any handler.
    pub const FORCED: StopMode = StopMode(-9);
}

impl From<i8> for StopMode {
    fn from(mode: i8) -> Self {
        Self(mode)
    }
}

// ===== ScriptCommand =====

/// A script control command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScriptCommand {
    /// Prepare a slot for a remote upload.
    LoadStart,
    /// One chunk of the script image.
    LoadData,
    /// Complete a remote upload.
    LoadFinish,
    /// Start the script in a slot.
    Start,
    /// Stop the script in a slot.
    Stop(StopMode),
    /// Free the script image in a slot.
    Unload,
}

impl ScriptCommand {
    /// The driver's command code.
    pub fn code(&self) -> c_int {
        use ScriptCommand::*;
        match *self {
            LoadStart => CMD_SCRIPT_LOAD_REMOTE_START,
            LoadData => CMD_SCRIPT_LOAD_REMOTE_DATA,
            LoadFinish => CMD_SCRIPT_LOAD_REMOTE_FINISH,
            Start => CMD_SCRIPT_START,
            Stop(_) => CMD_SCRIPT_STOP,
            Unload => CMD_SCRIPT_UNLOAD,
        }
    }
}

impl fmt::Display for ScriptCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ScriptCommand::*;
        match *self {
            LoadStart => write!(f, "load start"),
            LoadData => write!(f, "load data"),
            LoadFinish => write!(f, "load finish"),
            Start => write!(f, "start"),
            Stop(mode) => write!(f, "stop (mode {})", mode.0),
            Unload => write!(f, "unload"),
        }
    }
}

// ===== ScriptRequest =====

/// A single script control request for one slot.
///
/// Requests are built for one transaction and then thrown away.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptRequest<'a> {
    channel: i32,
    slot: i32,
    command: ScriptCommand,
    data: &'a [u8],
}

impl<'a> ScriptRequest<'a> {
    /// Creates a request that carries no data.
    pub fn new(channel: i32, slot: i32, command: ScriptCommand) -> Self {
        Self {
            channel,
            slot,
            command,
            data: &[],
        }
    }

    /// Creates a LoadData request for one chunk of a script image.
    ///
    /// Returns `None` if the chunk is larger than [`CHUNK_CAPACITY`].
    pub fn load_data(channel: i32, slot: i32, data: &'a [u8]) -> Option<Self> {
        if data.len() > CHUNK_CAPACITY {
            return None;
        }
        Some(Self::chunk(channel, slot, data))
    }

    // Caller guarantees the chunk fits.
    pub(crate) fn chunk(channel: i32, slot: i32, data: &'a [u8]) -> Self {
        debug_assert!(data.len() <= CHUNK_CAPACITY);
        Self {
            channel,
            slot,
            command: ScriptCommand::LoadData,
            data,
        }
    }

    /// The channel of the device handle.
    pub fn channel(&self) -> i32 {
        self.channel
    }

    /// The target slot number.
    pub fn slot(&self) -> i32 {
        self.slot
    }

    /// The command.
    pub fn command(&self) -> ScriptCommand {
        self.command
    }

    /// The significant data bytes. Empty for everything but LoadData.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/////////////////////////////////////////////////////////////////////////////
