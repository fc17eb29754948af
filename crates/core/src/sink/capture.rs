// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use super::{ByteSink, SinkError};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// In-memory sink shaped like a UART data register: every write lands in a
/// shared buffer and can optionally be echoed to stdout as it arrives.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
    echo_stdout: bool,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture into an existing buffer, e.g. one shared with an observer.
    pub fn with_buffer(buffer: Arc<Mutex<Vec<u8>>>, echo_stdout: bool) -> Self {
        Self {
            buffer,
            echo_stdout,
        }
    }

    pub fn set_echo(&mut self, echo_stdout: bool) {
        self.echo_stdout = echo_stdout;
    }

    /// Handle to the shared buffer.
    pub fn buffer(&self) -> Arc<Mutex<Vec<u8>>> {
        Arc::clone(&self.buffer)
    }

    /// Copy of everything captured so far.
    pub fn contents(&self) -> Result<Vec<u8>, SinkError> {
        let guard = self.buffer.lock().map_err(|_| SinkError::Poisoned)?;
        Ok(guard.clone())
    }
}

impl ByteSink for CaptureSink {
    type Error = SinkError;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        self.buffer
            .lock()
            .map_err(|_| SinkError::Poisoned)?
            .extend_from_slice(bytes);

        if self.echo_stdout {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }

        Ok(bytes.len())
    }
}
