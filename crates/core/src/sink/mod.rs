// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Byte sinks the encoder writes into.

#[cfg(feature = "std")]
pub mod capture;
#[cfg(feature = "std")]
pub mod limited;

#[cfg(feature = "std")]
pub use capture::CaptureSink;
#[cfg(feature = "std")]
pub use limited::LimitedSink;

/// Downstream consumer of encoded bytes.
///
/// A successful `write` has accepted all of `bytes`; the returned count is
/// what the sink reports having written and is only used for accounting.
pub trait ByteSink {
    type Error;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    type Error = S::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        (**self).write(bytes)
    }
}

#[cfg(feature = "std")]
impl ByteSink for Vec<u8> {
    type Error = std::convert::Infallible;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        self.extend_from_slice(bytes);
        Ok(bytes.len())
    }
}

#[cfg(feature = "std")]
pub use hosted::{IoSink, SinkError};

#[cfg(feature = "std")]
mod hosted {
    use super::ByteSink;
    use std::convert::Infallible;
    use std::io::{self, Write};

    #[derive(Debug, thiserror::Error)]
    pub enum SinkError {
        #[error("sink I/O error: {0}")]
        Io(#[from] io::Error),
        #[error("output limit of {limit} bytes exceeded")]
        LimitExceeded { limit: u64 },
        #[error("capture buffer lock poisoned")]
        Poisoned,
    }

    impl From<Infallible> for SinkError {
        fn from(never: Infallible) -> Self {
            match never {}
        }
    }

    /// Adapts any `std::io::Write` (stdout, a file, a serial port) into a sink.
    #[derive(Debug)]
    pub struct IoSink<W: Write> {
        inner: W,
    }

    impl<W: Write> IoSink<W> {
        pub fn new(inner: W) -> Self {
            Self { inner }
        }

        pub fn get_mut(&mut self) -> &mut W {
            &mut self.inner
        }

        pub fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }

        pub fn into_inner(self) -> W {
            self.inner
        }
    }

    impl<W: Write> ByteSink for IoSink<W> {
        type Error = io::Error;

        fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
            self.inner.write_all(bytes)?;
            Ok(bytes.len())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        struct BrokenPipe;

        impl Write for BrokenPipe {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        #[test]
        fn test_io_sink_writes_whole_run() {
            let mut sink = IoSink::new(Vec::new());
            assert_eq!(ByteSink::write(&mut sink, b"-.-. ").unwrap(), 5);
            assert_eq!(sink.into_inner(), b"-.-. ");
        }

        #[test]
        fn test_io_sink_surfaces_write_error() {
            let mut sink = IoSink::new(BrokenPipe);
            let err = ByteSink::write(&mut sink, b". ").unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

            let wrapped = SinkError::from(err);
            assert!(matches!(wrapped, SinkError::Io(_)));
        }
    }
}
