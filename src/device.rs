// kvscript/src/device.rs
//
// Script control through the Kvaser character device.
//
// This file is part of the Rust 'kvscript' library.
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.

//! A script engine transport on top of the driver ioctl.

use crate::{
    command::ScriptRequest,
    engine::ScriptTransport,
    ioctl::{kcan_ioctl_script_control, KcanScriptControl},
};
use log::debug;
use std::{
    fs::OpenOptions,
    io,
    os::unix::io::{AsFd, AsRawFd, BorrowedFd, IntoRawFd, OwnedFd, RawFd},
    path::Path,
};

/// An open handle to one channel of a Kvaser device.
///
/// Every request is a blocking `ioctl()` on the device file. The file is
/// closed when the object is dropped.
#[derive(Debug)]
pub struct ScriptDevice {
    fd: OwnedFd,
    channel: i32,
}

impl ScriptDevice {
    /// Opens a device file, such as "/dev/leaf0", for the given channel.
    pub fn open<P: AsRef<Path>>(path: P, channel: i32) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        debug!("Opened '{}' for channel {}", path.display(), channel);
        Ok(Self::from_fd(file.into(), channel))
    }

    /// Wraps an already-open device descriptor.
    pub fn from_fd(fd: OwnedFd, channel: i32) -> Self {
        Self { fd, channel }
    }
}

impl ScriptTransport for ScriptDevice {
    fn channel(&self) -> i32 {
        self.channel
    }

    fn transact(&mut self, req: &ScriptRequest<'_>) -> io::Result<u32> {
        let mut ctl = KcanScriptControl::from(req);
        unsafe { kcan_ioctl_script_control(self.fd.as_raw_fd(), &mut ctl) }?;
        Ok(ctl.script_control_status)
    }
}

impl AsRawFd for ScriptDevice {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl IntoRawFd for ScriptDevice {
    fn into_raw_fd(self) -> RawFd {
        self.fd.into_raw_fd()
    }
}

impl AsFd for ScriptDevice {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

/////////////////////////////////////////////////////////////////////////////
