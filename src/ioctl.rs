// kvscript/src/ioctl.rs
//
// Low-level binding of the script control ioctl.
//
// This file is part of the Rust 'kvscript' library.
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.

//! The `KCAN_IOCTL_SCRIPT_CONTROL` request and its argument struct.
//!
//! The layout must match `KCAN_IOCTL_SCRIPT_CONTROL_T` in the driver.

use crate::{
    command::{ScriptCommand, ScriptRequest},
    constants::*,
};
use libc::{c_int, c_schar, c_uint};
use nix::ioctl_readwrite;
use std::mem;

/// Script image chunk for LoadData.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct ScriptData {
    pub data: [u8; SCRIPT_DATA_SIZE],
    pub length: c_uint,
}

/// Per-command payload.
#[repr(C)]
#[derive(Copy, Clone)]
pub union ScriptPayload {
    pub script: ScriptData,
    pub stop_mode: c_schar,
}

/// The argument of the script control ioctl.
///
/// The driver fills in `script_control_status` on the way back.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct KcanScriptControl {
    pub script_no: c_int,
    pub command: c_int,
    pub channel: c_int,
    pub payload: ScriptPayload,
    pub script_control_status: c_uint,
}

ioctl_readwrite!(
    kcan_ioctl_script_control,
    VCAN_IOC_MAGIC,
    KCAN_IOCTL_SCRIPT_CONTROL_NR,
    KcanScriptControl
);

/// Creates an all-zero control struct.
#[inline(always)]
pub fn script_control_default() -> KcanScriptControl {
    unsafe { mem::zeroed() }
}

impl From<&ScriptRequest<'_>> for KcanScriptControl {
    fn from(req: &ScriptRequest<'_>) -> Self {
        let mut ctl = script_control_default();
        ctl.script_no = req.slot();
        ctl.command = req.command().code();
        ctl.channel = req.channel();

        match req.command() {
            ScriptCommand::Stop(mode) => ctl.payload.stop_mode = mode.0,
            ScriptCommand::LoadData => {
                let data = req.data();
                let mut script = ScriptData {
                    data: [0; SCRIPT_DATA_SIZE],
                    length: data.len() as c_uint,
                };
                script.data[..data.len()].copy_from_slice(data);
                ctl.payload.script = script;
            }
            _ => (),
        }
        ctl
    }
}

/////////////////////////////////////////////////////////////////////////////
