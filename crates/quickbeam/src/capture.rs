//! Buffered capture of output produced during one evaluation

use std::io::{self, Write};

use tracing::debug;

use crate::shell::Shell;

/// Phase markers attached to each forwarded output chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputFlags {
    /// This chunk opens the evaluation's output
    pub first: bool,

    /// This chunk closes the evaluation's output
    pub last: bool,
}

impl OutputFlags {
    /// Flags for a chunk that is an evaluation's entire output.
    pub fn whole() -> Self {
        Self {
            first: true,
            last: true,
        }
    }
}

/// In-memory buffer standing between the engine and the host's stdout.
///
/// Writes are recorded as ordered chunks, one per engine write, while an
/// evaluation runs. [`flush_to`](OutputCapture::flush_to) hands them to
/// the host only once the evaluation has succeeded; a failed evaluation
/// [`discard`](OutputCapture::discard)s the buffer instead, so no partial
/// output from an aborted fragment ever reaches the host.
#[derive(Debug, Default)]
pub struct OutputCapture {
    chunks: Vec<Vec<u8>>,
}

impl OutputCapture {
    /// Create an empty capture buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes buffered so far.
    pub fn len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Forward every buffered chunk to the shell, in write order.
    ///
    /// Each chunk passes through `write_stdout` carrying first/last
    /// flags; the shell may rewrite it, and the byte count of what the
    /// shell actually emitted is returned. An evaluation that wrote
    /// nothing still announces itself with a single empty chunk flagged
    /// first and last.
    pub fn flush_to<S: Shell + ?Sized>(self, shell: &mut S) -> usize {
        if self.chunks.is_empty() {
            return shell.write_stdout(&[], OutputFlags::whole()).len();
        }

        let total = self.chunks.len();
        let mut forwarded = 0;
        for (i, chunk) in self.chunks.into_iter().enumerate() {
            let flags = OutputFlags {
                first: i == 0,
                last: i + 1 == total,
            };
            forwarded += shell.write_stdout(&chunk, flags).len();
        }
        forwarded
    }

    /// Drop all buffered output without forwarding any of it.
    pub fn discard(self) {
        if !self.is_empty() {
            debug!(bytes = self.len(), "discarding captured output");
        }
    }
}

impl Write for OutputCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !buf.is_empty() {
            self.chunks.push(buf.to_vec());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
