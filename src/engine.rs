// kvscript/src/engine.rs
//
// Script engine operations on top of a request/response transport.
//
// This file is part of the Rust 'kvscript' library.
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.

//! Script engine operations.
//!
//! A [`ScriptTransport`] knows how to get a single [`ScriptRequest`] to the
//! device and bring back its status code. Everything else, including the
//! chunked upload of a compiled script, is layered on top of that by the
//! [`ScriptEngine`] trait, which every transport gets for free.
//!
//! Each operation is one blocking transaction, except for an upload which
//! is a sequence of them:
//!
//! ```text
//! LoadStart -> LoadData(chunk 0) -> ... -> LoadData(last, short) -> LoadFinish
//! ```
//!
//! The first failure ends the operation and is returned as-is. Nothing is
//! retried, and a slot left half-loaded by a failed upload is not unloaded.

use crate::{
    command::{ScriptCommand, ScriptRequest, StopMode},
    constants::CHUNK_CAPACITY,
    errors::{Error, ErrorKind, Result},
    status::map_status,
};
use log::{debug, trace, warn};
use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

// ===== ScriptTransport =====

/// A blocking request/response channel to a device script engine.
pub trait ScriptTransport {
    /// The channel number this handle addresses.
    fn channel(&self) -> i32;

    /// Sends one request and blocks for the device's answer.
    ///
    /// On success this is the status code reported by the device, which may
    /// itself indicate a failure. An `Err(..)` means the request never got
    /// a status from the device.
    fn transact(&mut self, req: &ScriptRequest<'_>) -> io::Result<u32>;
}

impl<T: ScriptTransport + ?Sized> ScriptTransport for &mut T {
    fn channel(&self) -> i32 {
        (**self).channel()
    }

    fn transact(&mut self, req: &ScriptRequest<'_>) -> io::Result<u32> {
        (**self).transact(req)
    }
}

// ===== ScriptEngine =====

/// Script operations available on any transport.
///
/// Slot numbers and stop modes are device-defined and passed through
/// without any local checks.
pub trait ScriptEngine: ScriptTransport {
    /// Performs a single request, mapping the device status.
    fn script_control(&mut self, req: &ScriptRequest<'_>) -> Result<()> {
        trace!(
            "Script {} for slot {} on channel {} ({} bytes)",
            req.command(),
            req.slot(),
            req.channel(),
            req.data().len()
        );

        let status = self.transact(req).map_err(|err| {
            debug!("Script {} request failed: {}", req.command(), err);
            Error::Transport(err)
        })?;

        match map_status(status) {
            ErrorKind::Ok => Ok(()),
            kind => {
                warn!(
                    "Script {} for slot {} failed with status {}: {}",
                    req.command(),
                    req.slot(),
                    status,
                    kind
                );
                Err(Error::Device { kind, status })
            }
        }
    }

    /// Starts the script loaded in a slot.
    fn script_start(&mut self, slot: i32) -> Result<()> {
        debug!("Starting script in slot {}", slot);
        let req = ScriptRequest::new(self.channel(), slot, ScriptCommand::Start);
        self.script_control(&req)
    }

    /// Stops the script running in a slot.
    fn script_stop(&mut self, slot: i32, mode: StopMode) -> Result<()> {
        debug!("Stopping script in slot {} (mode {})", slot, mode.0);
        let req = ScriptRequest::new(self.channel(), slot, ScriptCommand::Stop(mode));
        self.script_control(&req)
    }

    /// Frees the script image loaded in a slot.
    fn script_unload(&mut self, slot: i32) -> Result<()> {
        debug!("Unloading script in slot {}", slot);
        let req = ScriptRequest::new(self.channel(), slot, ScriptCommand::Unload);
        self.script_control(&req)
    }

    /// Uploads a compiled script image into a slot.
    ///
    /// The source is read in chunks of [`CHUNK_CAPACITY`] bytes, one LoadData
    /// request per chunk. Only a short read ends the stream, so an image that
    /// is an exact multiple of the chunk size is followed by one empty
    /// chunk. An empty source still sends a single empty chunk.
    ///
    /// The source is dropped before the final LoadFinish request, and on
    /// every error path.
    fn script_load<R: Read>(&mut self, slot: i32, mut source: R) -> Result<()>
    where
        Self: Sized,
    {
        let channel = self.channel();
        debug!("Loading script into slot {} on channel {}", slot, channel);

        self.script_control(&ScriptRequest::new(channel, slot, ScriptCommand::LoadStart))?;

        let mut buf = [0u8; CHUNK_CAPACITY];
        let mut total = 0usize;

        loop {
            let n = read_chunk(&mut source, &mut buf).map_err(Error::HostFile)?;
            self.script_control(&ScriptRequest::chunk(channel, slot, &buf[..n]))?;
            total += n;
            if n < CHUNK_CAPACITY {
                break;
            }
        }
        drop(source);

        debug!("Sent {} script bytes to slot {}", total, slot);
        self.script_control(&ScriptRequest::new(channel, slot, ScriptCommand::LoadFinish))
    }

    /// Uploads a compiled script file from the host into a slot.
    ///
    /// If the path can't be opened, or isn't a regular file, nothing is sent
    /// to the device.
    fn script_load_file<P: AsRef<Path>>(&mut self, slot: i32, path: P) -> Result<()>
    where
        Self: Sized,
    {
        let path = path.as_ref();
        let file = open_script_file(path).map_err(|err| {
            debug!("Could not open script file '{}': {}", path.display(), err);
            Error::HostFile(err)
        })?;
        self.script_load(slot, file)
    }
}

impl<T: ScriptTransport + ?Sized> ScriptEngine for T {}

/// Opens a host script file, rejecting anything but a regular file.
fn open_script_file(path: &Path) -> io::Result<File> {
    let file = File::open(path)?;
    let meta = file.metadata()?;
    if meta.is_dir() {
        return Err(io::Error::from_raw_os_error(libc::EISDIR));
    }
    if !meta.is_file() {
        return Err(io::Error::from_raw_os_error(libc::EINVAL));
    }
    Ok(file)
}

/// Reads until the buffer is full or the source is exhausted.
///
/// Returns the number of bytes read, which is only less than the buffer
/// size at the end of the source.
fn read_chunk<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut n = 0;
    while n < buf.len() {
        match source.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(k) => n += k,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
            Err(err) => return Err(err),
        }
    }
    Ok(n)
}

/////////////////////////////////////////////////////////////////////////////
