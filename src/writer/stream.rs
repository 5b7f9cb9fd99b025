// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort delivery of records to a live consumer, such as a dashboard.
//!
//! [`StreamWriter::write`] never waits on the network. Lines go into a bounded queue that a
//! background thread drains into a [`StreamSink`]. When nothing is connected, when the
//! queue is full, or when the sink fails, the line is dropped and counted. There is no
//! retry queue.

use crate::error::WriteFailure;
use crate::writer::{Rendering, Writer};
use crossbeam_channel::{Sender, TrySendError};
use std::fmt::Debug;
use std::io::{self, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

/// Lines that may wait for the sender thread before new ones are dropped.
pub const STREAM_QUEUE_CAPACITY: usize = 1024;

const CONNECT_TIMEOUT: Duration = Duration::from_millis(250);
const DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

/// Where the sender thread delivers payloads.
pub trait StreamSink: Send {
    fn send(&mut self, payload: &str) -> io::Result<()>;
}

/// Newline-delimited payloads over TCP.
///
/// Connects lazily and reconnects on the next payload after a failure. The payload that hit
/// the failure is lost.
#[derive(Debug)]
pub struct TcpSink {
    addr: SocketAddr,
    stream: Option<TcpStream>,
}

impl TcpSink {
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr, stream: None }
    }
}

impl StreamSink for TcpSink {
    fn send(&mut self, payload: &str) -> io::Result<()> {
        if self.stream.is_none() {
            let stream = TcpStream::connect_timeout(&self.addr, CONNECT_TIMEOUT)?;
            stream.set_nodelay(true)?;
            self.stream = Some(stream);
        }
        let Some(stream) = self.stream.as_mut() else {
            return Err(io::Error::from(io::ErrorKind::NotConnected));
        };
        let mut buf = String::with_capacity(payload.len() + 1);
        buf.push_str(payload);
        buf.push('\n');
        if let Err(e) = stream.write_all(buf.as_bytes()) {
            self.stream = None;
            return Err(e);
        }
        Ok(())
    }
}

/// The fire-and-forget writer.
#[derive(Debug, Default)]
pub struct StreamWriter {
    sender: RwLock<Option<Sender<String>>>,
    dropped: AtomicU64,
}

impl StreamWriter {
    /// A writer with nothing attached; every line is dropped until [`connect`](Self::connect).
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts delivering to `sink` on a background thread, replacing any previous sink.
    pub fn connect(&self, sink: impl StreamSink + 'static) -> io::Result<()> {
        let (tx, rx) = crossbeam_channel::bounded::<String>(STREAM_QUEUE_CAPACITY);
        let mut sink = sink;
        std::thread::Builder::new()
            .name("multilog-stream".to_string())
            .spawn(move || {
                for payload in rx {
                    // delivery is best-effort; a failed payload is simply gone
                    let _ = sink.send(&payload);
                }
            })?;
        // the previous sender drops here, which ends the previous thread
        *self
            .sender
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(tx);
        Ok(())
    }

    /// Connects to a TCP consumer such as a dashboard.
    pub fn connect_tcp(&self, addr: impl ToSocketAddrs) -> io::Result<()> {
        let addr = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| io::Error::from(io::ErrorKind::AddrNotAvailable))?;
        self.connect(TcpSink::new(addr))
    }

    /// Detaches the sink. Lines still queued are delivered, later ones are dropped.
    pub fn disconnect(&self) {
        self.sender
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }

    pub fn is_connected(&self) -> bool {
        self.sender
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }

    /// Lines dropped so far because nothing was connected or the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn sender(&self) -> Option<Sender<String>> {
        self.sender
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Writer for StreamWriter {
    fn write(&self, line: &str) -> Result<(), WriteFailure> {
        let result = match self.sender() {
            None => Err(WriteFailure::Disconnected),
            Some(sender) => match sender.try_send(line.to_string()) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(_)) => Err(WriteFailure::QueueFull),
                Err(TrySendError::Disconnected(_)) => Err(WriteFailure::Disconnected),
            },
        };
        if result.is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    fn rendering(&self) -> Rendering {
        Rendering::Structured
    }

    fn prepare_to_die(&self) {
        let Some(sender) = self.sender() else {
            return;
        };
        let deadline = Instant::now() + DRAIN_TIMEOUT;
        while !sender.is_empty() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}

static STREAM: OnceLock<Arc<StreamWriter>> = OnceLock::new();

/// The stream writer every logger starts with. Disconnected until someone connects it.
pub fn stream_writer() -> Arc<StreamWriter> {
    STREAM.get_or_init(|| Arc::new(StreamWriter::new())).clone()
}
