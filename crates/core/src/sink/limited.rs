// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use super::{ByteSink, SinkError};

/// A sink wrapper that tracks the number of bytes written and refuses any
/// write that would take the total past `max_bytes`.
///
/// Rejected runs are not split: either the whole run fits or the write fails
/// with [`SinkError::LimitExceeded`] and nothing reaches the inner sink.
#[derive(Debug)]
pub struct LimitedSink<S> {
    inner: S,
    bytes_written: u64,
    max_bytes: u64,
    limit_exceeded: bool,
}

impl<S> LimitedSink<S> {
    pub fn new(inner: S, max_bytes: u64) -> Self {
        Self {
            inner,
            bytes_written: 0,
            max_bytes,
            limit_exceeded: false,
        }
    }

    /// Returns the number of bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Returns true once a write has been refused
    pub fn limit_exceeded(&self) -> bool {
        self.limit_exceeded
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> ByteSink for LimitedSink<S>
where
    S: ByteSink,
    S::Error: Into<SinkError>,
{
    type Error = SinkError;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        let limit = self.max_bytes;
        if self.limit_exceeded {
            return Err(SinkError::LimitExceeded { limit });
        }

        let current = self.bytes_written;
        if current.saturating_add(bytes.len() as u64) > limit {
            self.limit_exceeded = true;
            tracing::debug!(current, limit, run = bytes.len(), "output limit reached");
            return Err(SinkError::LimitExceeded { limit });
        }

        let written = self.inner.write(bytes).map_err(Into::into)?;
        self.bytes_written += written as u64;

        Ok(written)
    }
}
