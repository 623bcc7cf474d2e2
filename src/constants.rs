// kvscript/src/constants.rs
//
// Values mirrored from the Kvaser driver headers (kcanio_script.h).
//
// This file is part of the Rust 'kvscript' library.
//
// Licensed under the MIT license:
//   <LICENSE or http://opensource.org/licenses/MIT>
// This file may not be copied, modified, or distributed except according
// to those terms.

//! Constants shared with the kernel driver.
//!
//! These must match the driver ABI exactly. They are not negotiated at
//! runtime.
//!
//! NOTE: None of these values are verified; check them against the
//! installed driver's `kcanio_script.h` before use.

use libc::{c_int, c_uint};

// ===== ioctl request =====

/// ioctl "magic" type byte of the Kvaser character devices.
pub const VCAN_IOC_MAGIC: u8 = b'v';

/// First ioctl sequence number of the KCAN_IOCTL_* block.
pub const KCAN_IOCTL_START: u8 = 80;

/// Sequence number of `KCAN_IOCTL_SCRIPT_CONTROL`.
pub const KCAN_IOCTL_SCRIPT_CONTROL_NR: u8 = KCAN_IOCTL_START + 27;

/// Size of the data buffer in the script control struct.
pub const SCRIPT_DATA_SIZE: usize = 128;

/// Number of script bytes carried by one LoadData transaction.
///
/// The last byte of the driver buffer is reserved.
pub const CHUNK_CAPACITY: usize = SCRIPT_DATA_SIZE - 1;

// ===== Script commands =====

pub const CMD_SCRIPT_START: c_int = 1;
pub const CMD_SCRIPT_STOP: c_int = 2;
pub const CMD_SCRIPT_LOAD_REMOTE_START: c_int = 5;
pub const CMD_SCRIPT_LOAD_REMOTE_DATA: c_int = 6;
pub const CMD_SCRIPT_LOAD_REMOTE_FINISH: c_int = 7;
pub const CMD_SCRIPT_UNLOAD: c_int = 8;

// ===== Script control status codes =====

pub const KCANIO_SCRIPT_CTRL_ERR_SUCCESS: c_uint = 0;
pub const KCANIO_SCRIPT_CTRL_ERR_NO_MORE_PROCESSES: c_uint = 1;
pub const KCANIO_SCRIPT_CTRL_ERR_FILE_NOT_FOUND: c_uint = 2;
pub const KCANIO_SCRIPT_CTRL_ERR_OPEN_FILE_ERR: c_uint = 3;
pub const KCANIO_SCRIPT_CTRL_ERR_OPEN_FILE_NO_MEM: c_uint = 4;
pub const KCANIO_SCRIPT_CTRL_ERR_FILE_READ_ERR: c_uint = 5;
pub const KCANIO_SCRIPT_CTRL_ERR_LOAD_FILE_ERR: c_uint = 6;
pub const KCANIO_SCRIPT_CTRL_ERR_OUT_OF_CODE_MEM: c_uint = 7;
pub const KCANIO_SCRIPT_CTRL_ERR_FILE_REWIND_FAIL: c_uint = 8;
pub const KCANIO_SCRIPT_CTRL_ERR_LOAD_FAIL: c_uint = 9;
pub const KCANIO_SCRIPT_CTRL_ERR_SETUP_FAIL: c_uint = 10;
pub const KCANIO_SCRIPT_CTRL_ERR_SETUP_FUN_TABLE_FAIL: c_uint = 11;
pub const KCANIO_SCRIPT_CTRL_ERR_SETUP_PARAMS_FAIL: c_uint = 12;
pub const KCANIO_SCRIPT_CTRL_ERR_PROCESSES_NOT_FOUND: c_uint = 13;
pub const KCANIO_SCRIPT_CTRL_ERR_START_FAILED: c_uint = 14;
pub const KCANIO_SCRIPT_CTRL_ERR_STOP_FAILED: c_uint = 15;
pub const KCANIO_SCRIPT_CTRL_ERR_SPI_BUSY: c_uint = 16;
pub const KCANIO_SCRIPT_CTRL_ERR_PROCESS_NOT_STOPPED: c_uint = 17;
pub const KCANIO_SCRIPT_CTRL_ERR_PROCESS_NOT_RUNNING: c_uint = 18;
pub const KCANIO_SCRIPT_CTRL_ERR_ENVVAR_NOT_FOUND: c_uint = 19;
pub const KCANIO_SCRIPT_CTRL_ERR_UNKNOWN_COMMAND: c_uint = 20;
pub const KCANIO_SCRIPT_CTRL_ERR_COMPILER_VERSION: c_uint = 21;
pub const KCANIO_SCRIPT_CTRL_ERR_NOT_IMPLEMENTED: c_uint = 43;
