// kvscript/src/lib.rs
//
// The main lib file for the Rust 'kvscript' library.
//
// This file is part of the Rust 'kvscript' library.
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.

//! Script engine control for Kvaser CAN devices on Linux.
//!
//! Many Kvaser interfaces can run compiled t-programs ("scripts") on the
//! device itself, next to the CAN bus. Scripts live in numbered *slots* on
//! a channel. The Linux driver exposes the script engine through a single
//! ioctl on the device file, and this crate wraps it in a small typed API:
//!
//! - start the script in a slot,
//! - stop it, with a device-defined stop mode,
//! - unload it, freeing the slot,
//! - upload a compiled `.txe` image from the host into a slot.
//!
//! ```no_run
//! use kvscript::{ScriptDevice, ScriptEngine, StopMode};
//!
//! # fn main() -> kvscript::Result<()> {
//! let mut dev = ScriptDevice::open("/dev/leaf0", 0).map_err(kvscript::Error::Transport)?;
//! dev.script_load_file(0, "blink.txe")?;
//! dev.script_start(0)?;
//! // ...
//! dev.script_stop(0, StopMode::NORMAL)?;
//! dev.script_unload(0)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Uploads
//!
//! An upload is a three step exchange: LoadStart, then one LoadData request
//! for each chunk of at most [`CHUNK_CAPACITY`] bytes, then LoadFinish.
//! The end of the image is signalled by a short chunk, so an image whose
//! size is an exact multiple of the chunk size is followed by one empty
//! chunk. The device expects this.
//!
//! # Errors
//!
//! Failures are reported through [`Error`]. A request that reached the
//! device but was rejected carries the device status and its mapped
//! [`ErrorKind`]; failures on the host side carry the underlying
//! [`std::io::Error`]. Nothing is retried.
//!
//! # Testing without hardware
//!
//! All operations are written against the [`ScriptTransport`] trait, so any
//! type that can carry a [`ScriptRequest`] to something and bring back a
//! status code gets the full [`ScriptEngine`] API.

pub mod command;
pub use command::{ScriptCommand, ScriptRequest, StopMode};

pub mod constants;
pub use constants::CHUNK_CAPACITY;

pub mod errors;
pub use errors::{Error, ErrorKind, Result};

pub mod status;
pub use status::{map_status, DeviceStatus};

pub mod engine;
pub use engine::{ScriptEngine, ScriptTransport};

mod ioctl;

pub mod device;
pub use device::ScriptDevice;
