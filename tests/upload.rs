// kvscript/tests/upload.rs
//
// Script engine operations against a scripted transport.

use kvscript::{
    constants::*, ErrorKind, ScriptCommand, ScriptEngine, ScriptRequest, ScriptTransport,
    StopMode, CHUNK_CAPACITY,
};
use std::{
    cell::Cell,
    collections::VecDeque,
    io::{self, Read, Write},
    rc::Rc,
};

const CAP: usize = CHUNK_CAPACITY;

// --------------------------------------------------------------------------

/// What the transport saw for one request.
#[derive(Debug, Clone)]
struct Sent {
    cmd: ScriptCommand,
    slot: i32,
    data: Vec<u8>,
    source_closed: bool,
}

/// Records requests and answers them from a queue of replies.
/// Requests beyond the queue succeed.
struct Device {
    channel: i32,
    sent: Vec<Sent>,
    replies: VecDeque<io::Result<u32>>,
    source_closed: Rc<Cell<bool>>,
}

impl Device {
    fn new() -> Self {
        Self {
            channel: 1,
            sent: Vec::new(),
            replies: VecDeque::new(),
            source_closed: Rc::new(Cell::new(false)),
        }
    }

    fn reply(mut self, nth: usize, reply: io::Result<u32>) -> Self {
        while self.replies.len() < nth {
            self.replies.push_back(Ok(KCANIO_SCRIPT_CTRL_ERR_SUCCESS));
        }
        self.replies.push_back(reply);
        self
    }

    fn commands(&self) -> Vec<ScriptCommand> {
        self.sent.iter().map(|s| s.cmd).collect()
    }

    fn chunks(&self) -> Vec<&Sent> {
        self.sent
            .iter()
            .filter(|s| s.cmd == ScriptCommand::LoadData)
            .collect()
    }
}

impl ScriptTransport for Device {
    fn channel(&self) -> i32 {
        self.channel
    }

    fn transact(&mut self, req: &ScriptRequest<'_>) -> io::Result<u32> {
        assert_eq!(req.channel(), self.channel);
        self.sent.push(Sent {
            cmd: req.command(),
            slot: req.slot(),
            data: req.data().to_vec(),
            source_closed: self.source_closed.get(),
        });
        self.replies
            .pop_front()
            .unwrap_or(Ok(KCANIO_SCRIPT_CTRL_ERR_SUCCESS))
    }
}

/// An in-memory script image that reports reads and being dropped.
struct Source {
    data: Vec<u8>,
    pos: usize,
    reads: Rc<Cell<usize>>,
    closed: Rc<Cell<bool>>,
    fail_after: Option<usize>,
}

impl Source {
    fn new(len: usize, dev: &Device) -> Self {
        Self {
            data: (0..len).map(|i| (i % 251) as u8).collect(),
            pos: 0,
            reads: Rc::new(Cell::new(0)),
            closed: dev.source_closed.clone(),
            fail_after: None,
        }
    }
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_after == Some(self.pos) {
            return Err(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        }
        self.reads.set(self.reads.get() + 1);
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl Drop for Source {
    fn drop(&mut self) {
        self.closed.set(true);
    }
}

// Uploads `len` bytes and checks the shape of a successful exchange.
fn upload_ok(len: usize) -> Device {
    let mut dev = Device::new();
    let src = Source::new(len, &dev);
    let expected = src.data.clone();

    dev.script_load(5, src).unwrap();

    let cmds = dev.commands();
    assert_eq!(cmds.first(), Some(&ScriptCommand::LoadStart));
    assert_eq!(cmds.last(), Some(&ScriptCommand::LoadFinish));
    assert!(dev.sent.iter().all(|s| s.slot == 5));

    let image: Vec<u8> = dev.chunks().iter().flat_map(|s| s.data.clone()).collect();
    assert_eq!(image, expected);

    let finish = dev.sent.last().unwrap();
    assert!(finish.data.is_empty());
    assert!(finish.source_closed);
    assert!(dev.sent[..dev.sent.len() - 1]
        .iter()
        .all(|s| !s.source_closed));
    dev
}

// --------------------------------------------------------------------------

#[test]
fn test_upload_exact_multiple_sends_empty_chunk() {
    for k in 1..=3 {
        let dev = upload_ok(k * CAP);
        let chunks = dev.chunks();

        assert_eq!(chunks.len(), k + 1);
        assert!(chunks[..k].iter().all(|s| s.data.len() == CAP));
        assert!(chunks[k].data.is_empty());
    }
}

#[test]
fn test_upload_partial_last_chunk() {
    for (k, r) in [(0, 1), (1, 1), (2, CAP - 1), (3, CAP / 2)] {
        let dev = upload_ok(k * CAP + r);
        let chunks = dev.chunks();

        assert_eq!(chunks.len(), k + 1);
        assert_eq!(chunks[k].data.len(), r);
    }
}

#[test]
fn test_upload_empty_source() {
    let dev = upload_ok(0);
    assert_eq!(
        dev.commands(),
        [
            ScriptCommand::LoadStart,
            ScriptCommand::LoadData,
            ScriptCommand::LoadFinish
        ]
    );
    assert!(dev.chunks()[0].data.is_empty());
}

#[test]
fn test_upload_one_past_chunk() {
    let dev = upload_ok(CAP + 1);
    let lens: Vec<_> = dev.sent.iter().map(|s| (s.cmd, s.data.len())).collect();
    assert_eq!(
        lens,
        [
            (ScriptCommand::LoadStart, 0),
            (ScriptCommand::LoadData, CAP),
            (ScriptCommand::LoadData, 1),
            (ScriptCommand::LoadFinish, 0),
        ]
    );
}

#[test]
fn test_upload_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut dev = Device::new();

    let err = dev
        .script_load_file(0, dir.path().join("missing.txe"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HostFile);
    assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
    assert!(dev.sent.is_empty());
}

#[test]
fn test_upload_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut dev = Device::new();

    let err = dev.script_load_file(0, dir.path()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HostFile);
    assert_eq!(err.raw_os_error(), Some(libc::EISDIR));
    assert!(dev.sent.is_empty());
}

#[test]
fn test_upload_not_a_regular_file() {
    let mut dev = Device::new();

    let err = dev.script_load_file(0, "/dev/null").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HostFile);
    assert_eq!(err.raw_os_error(), Some(libc::EINVAL));
    assert!(dev.sent.is_empty());
}

#[test]
fn test_upload_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let image: Vec<u8> = (0..2 * CAP + 10).map(|i| i as u8).collect();
    file.write_all(&image).unwrap();
    file.flush().unwrap();

    let mut dev = Device::new();
    dev.script_load_file(2, file.path()).unwrap();

    let chunks = dev.chunks();
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[2].data.len(), 10);
    let sent: Vec<u8> = chunks.iter().flat_map(|s| s.data.clone()).collect();
    assert_eq!(sent, image);
}

#[test]
fn test_upload_start_rejected() {
    let mut dev = Device::new().reply(0, Ok(KCANIO_SCRIPT_CTRL_ERR_NO_MORE_PROCESSES));
    let src = Source::new(3 * CAP, &dev);
    let reads = src.reads.clone();

    let err = dev.script_load(0, src).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OutOfMemory);
    assert_eq!(err.device_status(), Some(KCANIO_SCRIPT_CTRL_ERR_NO_MORE_PROCESSES));
    assert_eq!(dev.commands(), [ScriptCommand::LoadStart]);
    assert_eq!(reads.get(), 0);
    assert!(dev.source_closed.get());
}

#[test]
fn test_upload_start_transport_failure() {
    let mut dev = Device::new().reply(0, Err(io::Error::from_raw_os_error(libc::EIO)));
    let src = Source::new(10, &dev);

    let err = dev.script_load(0, src).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.raw_os_error(), Some(libc::EIO));
    assert_eq!(dev.sent.len(), 1);
    assert!(dev.source_closed.get());
}

#[test]
fn test_upload_data_rejected_stops_loop() {
    // LoadStart, chunk 0, chunk 1 (rejected)
    let mut dev = Device::new().reply(2, Ok(KCANIO_SCRIPT_CTRL_ERR_OUT_OF_CODE_MEM));
    let src = Source::new(5 * CAP, &dev);
    let reads = src.reads.clone();

    let err = dev.script_load(0, src).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::OutOfMemory);
    assert_eq!(
        dev.commands(),
        [
            ScriptCommand::LoadStart,
            ScriptCommand::LoadData,
            ScriptCommand::LoadData
        ]
    );
    // One read per full chunk from an in-memory source.
    assert_eq!(reads.get(), 2);
    assert!(dev.source_closed.get());
}

#[test]
fn test_upload_data_transport_failure() {
    let mut dev = Device::new().reply(1, Err(io::Error::from_raw_os_error(libc::ENODEV)));
    let src = Source::new(4 * CAP, &dev);

    let err = dev.script_load(0, src).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(dev.chunks().len(), 1);
    assert_ne!(dev.commands().last(), Some(&ScriptCommand::LoadFinish));
    assert!(dev.source_closed.get());
}

#[test]
fn test_upload_read_failure() {
    let mut dev = Device::new();
    let mut src = Source::new(3 * CAP, &dev);
    src.fail_after = Some(CAP);

    let err = dev.script_load(0, src).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HostFile);
    assert_eq!(dev.chunks().len(), 1);
    assert_ne!(dev.commands().last(), Some(&ScriptCommand::LoadFinish));
    assert!(dev.source_closed.get());
}

#[test]
fn test_upload_finish_rejected() {
    // LoadStart, two chunks, LoadFinish (rejected)
    let mut dev = Device::new().reply(3, Ok(KCANIO_SCRIPT_CTRL_ERR_COMPILER_VERSION));
    let src = Source::new(CAP + 7, &dev);

    let err = dev.script_load(0, src).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ScriptVersionMismatch);
    assert_eq!(dev.chunks().len(), 2);
    assert_eq!(dev.commands().last(), Some(&ScriptCommand::LoadFinish));
    assert!(dev.sent.last().unwrap().source_closed);
}

#[test]
fn test_upload_failure_is_not_rolled_back() {
    let mut dev = Device::new().reply(1, Ok(KCANIO_SCRIPT_CTRL_ERR_SPI_BUSY));
    let src = Source::new(10, &dev);

    let err = dev.script_load(0, src).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::HardwareBusy);
    assert!(!dev.commands().contains(&ScriptCommand::Unload));
}

#[test]
fn test_single_request_operations() {
    let mut dev = Device::new();
    dev.script_start(1).unwrap();
    dev.script_stop(1, StopMode::NORMAL).unwrap();
    dev.script_unload(1).unwrap();

    assert_eq!(
        dev.commands(),
        [
            ScriptCommand::Start,
            ScriptCommand::Stop(StopMode::NORMAL),
            ScriptCommand::Unload
        ]
    );
    assert!(dev.sent.iter().all(|s| s.slot == 1 && s.data.is_empty()));
}

#[test]
fn test_single_request_failures() {
    let mut dev = Device::new()
        .reply(0, Ok(KCANIO_SCRIPT_CTRL_ERR_PROCESS_NOT_RUNNING))
        .reply(0, Ok(KCANIO_SCRIPT_CTRL_ERR_UNKNOWN_COMMAND))
        .reply(0, Err(io::Error::from_raw_os_error(libc::EBADF)))
        .reply(0, Ok(0xDEAD));

    let err = dev.script_start(2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ScriptFailure);

    let err = dev.script_stop(2, StopMode(7)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotImplemented);

    let err = dev.script_unload(2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);

    let err = dev.script_start(2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ScriptFailure);
    assert_eq!(err.device_status(), Some(0xDEAD));

    assert_eq!(dev.sent.len(), 4);
    assert_eq!(dev.sent[1].cmd, ScriptCommand::Stop(StopMode(7)));
}
