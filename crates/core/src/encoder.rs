// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use crate::sink::ByteSink;
use crate::symbol::{lookup, RunBuf, RUN_CAPACITY};
use core::fmt;

/// Progress counters for an encode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoded {
    /// Source bytes fully processed, dropped ones included.
    pub consumed: usize,
    /// Bytes the sink acknowledged.
    pub emitted: usize,
}

impl Encoded {
    fn absorb(&mut self, other: Encoded) {
        self.consumed += other.consumed;
        self.emitted += other.emitted;
    }
}

/// The sink refused a run. `consumed` counts the source bytes handled before
/// the failing character; that character and everything after it were not.
#[derive(Debug)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[cfg_attr(
    feature = "std",
    error("sink write failed after {consumed} source bytes")
)]
pub struct EncodeError<E> {
    pub consumed: usize,
    pub emitted: usize,
    pub source: E,
}

impl<E> EncodeError<E> {
    pub fn progress(&self) -> Encoded {
        Encoded {
            consumed: self.consumed,
            emitted: self.emitted,
        }
    }

    pub fn into_source(self) -> E {
        self.source
    }

    pub fn map_source<F, T>(self, f: F) -> EncodeError<T>
    where
        F: FnOnce(E) -> T,
    {
        EncodeError {
            consumed: self.consumed,
            emitted: self.emitted,
            source: f(self.source),
        }
    }
}

/// Encodes `input` as Morse onto `sink`, one write per accepted character.
///
/// Bytes rejected by the character policy are skipped silently. The first
/// sink failure stops the call; nothing is retried.
pub fn encode<S>(input: &[u8], sink: &mut S) -> Result<Encoded, EncodeError<S::Error>>
where
    S: ByteSink + ?Sized,
{
    let mut progress = Encoded::default();
    let mut buf: RunBuf = [0; RUN_CAPACITY];

    for &byte in input {
        let Some(symbol) = lookup(byte) else {
            tracing::trace!(byte, "dropping byte outside the Morse range");
            progress.consumed += 1;
            continue;
        };

        let run = symbol.render(&mut buf);
        match sink.write(run) {
            Ok(written) => progress.emitted += written,
            Err(source) => {
                tracing::debug!(
                    consumed = progress.consumed,
                    emitted = progress.emitted,
                    "sink rejected morse run"
                );
                return Err(EncodeError {
                    consumed: progress.consumed,
                    emitted: progress.emitted,
                    source,
                });
            }
        }
        progress.consumed += 1;
    }

    Ok(progress)
}

/// Encodes `text` into a fresh string.
#[cfg(feature = "std")]
pub fn encode_to_string(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len() * 4);
    if let Err(err) = encode(text.as_bytes(), &mut out) {
        match err.source {}
    }
    out.into_iter().map(char::from).collect()
}

/// Streaming front end over a borrowed sink.
///
/// Implements `core::fmt::Write` so text can be pushed with `write!`, and
/// `std::io::Write` when `std` is enabled. Totals accumulate across calls.
pub struct MorseWriter<'a, S: ?Sized> {
    sink: &'a mut S,
    totals: Encoded,
}

impl<'a, S> MorseWriter<'a, S>
where
    S: ByteSink + ?Sized,
{
    pub fn new(sink: &'a mut S) -> Self {
        Self {
            sink,
            totals: Encoded::default(),
        }
    }

    pub fn encode(&mut self, input: &[u8]) -> Result<Encoded, EncodeError<S::Error>> {
        match encode(input, &mut *self.sink) {
            Ok(done) => {
                self.totals.absorb(done);
                Ok(done)
            }
            Err(err) => {
                self.totals.absorb(err.progress());
                Err(err)
            }
        }
    }

    pub fn totals(&self) -> Encoded {
        self.totals
    }
}

impl<S> fmt::Write for MorseWriter<'_, S>
where
    S: ByteSink + ?Sized,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.encode(s.as_bytes()).map(|_| ()).map_err(|_| fmt::Error)
    }
}

#[cfg(feature = "std")]
impl<S> std::io::Write for MorseWriter<'_, S>
where
    S: ByteSink + ?Sized,
    S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    /// Reports partial progress as a short write; the failure itself surfaces
    /// only when nothing from `buf` could be consumed.
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.encode(buf) {
            Ok(done) => Ok(done.consumed),
            Err(err) if err.consumed > 0 => Ok(err.consumed),
            Err(err) => Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                err.into_source(),
            )),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{CaptureSink, LimitedSink, SinkError};
    use std::fmt::Write as _;

    /// Accepts `budget` writes, then fails every one after.
    struct FailAfter {
        budget: usize,
        seen: Vec<u8>,
        attempts: usize,
    }

    impl FailAfter {
        fn new(budget: usize) -> Self {
            Self {
                budget,
                seen: Vec::new(),
                attempts: 0,
            }
        }
    }

    #[derive(Debug, PartialEq)]
    struct Refused;

    impl ByteSink for FailAfter {
        type Error = Refused;

        fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
            self.attempts += 1;
            if self.budget == 0 {
                return Err(Refused);
            }
            self.budget -= 1;
            self.seen.extend_from_slice(bytes);
            Ok(bytes.len())
        }
    }

    #[test]
    fn test_sos() {
        assert_eq!(encode_to_string("SOS"), "... --- ... ");
    }

    #[test]
    fn test_hi_folds_case() {
        assert_eq!(encode_to_string("Hi"), ".... .. ");
    }

    #[test]
    fn test_word_gap_is_space_mark_and_separator() {
        assert_eq!(encode_to_string(" "), "  ");
        assert_eq!(encode_to_string("E E"), ".   . ");
    }

    #[test]
    fn test_counts_on_success() {
        let mut out = Vec::new();
        let done = encode(b"a\x01b", &mut out).unwrap();
        assert_eq!(done.consumed, 3);
        assert_eq!(done.emitted, out.len());
        assert_eq!(out, b".- -... ");
    }

    #[test]
    fn test_failure_after_first_character() {
        let mut sink = FailAfter::new(1);
        let err = encode(b"SOS", &mut sink).unwrap_err();

        assert_eq!(err.consumed, 1);
        assert_eq!(err.emitted, 4);
        assert_eq!(err.source, Refused);
        assert_eq!(sink.attempts, 2);
        assert_eq!(sink.seen, b"... ");
    }

    #[test]
    fn test_dropped_bytes_do_not_touch_the_sink() {
        let mut sink = FailAfter::new(0);
        let done = encode(b"\x01\x7f~[", &mut sink).unwrap();
        assert_eq!(done.consumed, 4);
        assert_eq!(done.emitted, 0);
        assert_eq!(sink.attempts, 0);
    }

    #[test]
    fn test_map_source_keeps_progress() {
        let mut sink = FailAfter::new(2);
        let err = encode(b"HEY", &mut sink)
            .unwrap_err()
            .map_source(|_| "refused");
        assert_eq!(err.progress(), Encoded { consumed: 2, emitted: 7 });
        assert_eq!(err.into_source(), "refused");
    }

    #[test]
    fn test_writer_accumulates_totals() {
        let mut sink = CaptureSink::new();
        let mut writer = MorseWriter::new(&mut sink);
        write!(writer, "S").unwrap();
        write!(writer, "{}", 0).unwrap();

        assert_eq!(writer.totals(), Encoded { consumed: 2, emitted: 10 });
        assert_eq!(sink.contents().unwrap(), b"... ----- ");
    }

    #[test]
    fn test_writer_fmt_error_on_sink_failure() {
        let mut sink = FailAfter::new(0);
        let mut writer = MorseWriter::new(&mut sink);
        assert!(write!(writer, "E").is_err());
        assert_eq!(writer.totals(), Encoded::default());
    }

    #[test]
    fn test_io_write_reports_short_write() {
        let mut sink = LimitedSink::new(Vec::new(), 8);
        let mut writer = MorseWriter::new(&mut sink);

        let n = std::io::Write::write(&mut writer, b"SOS").unwrap();
        assert_eq!(n, 2);

        let err = std::io::Write::write(&mut writer, b"S").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
        let inner = err.into_inner().unwrap();
        assert!(inner.downcast_ref::<SinkError>().is_some());
    }

    #[test]
    fn test_io_copy_streams_reader() {
        let mut out = Vec::new();
        let mut writer = MorseWriter::new(&mut out);
        let mut reader: &[u8] = b"cq\ncq";
        std::io::copy(&mut reader, &mut writer).unwrap();

        assert_eq!(writer.totals().consumed, 5);
        assert_eq!(out, b"-.-. --.-   -.-. --.- ");
    }
}
