// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

use anyhow::{Context, Result};
use dotdash_config::OutputKind;
use dotdash_core::sink::{CaptureSink, IoSink, SinkError};
use dotdash_core::ByteSink;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// The concrete sink an encode run writes into.
pub enum OutputSink {
    Stdout(IoSink<io::StdoutLock<'static>>),
    File(IoSink<BufWriter<File>>),
    Capture { sink: CaptureSink, echo: bool },
}

impl OutputSink {
    pub fn open(kind: OutputKind, path: Option<&Path>, echo: bool) -> Result<Self> {
        match kind {
            OutputKind::Stdout => Ok(Self::Stdout(IoSink::new(io::stdout().lock()))),
            OutputKind::File => {
                let path = path.context("Output kind 'file' requires a path")?;
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create output dir {:?}", parent))?;
                }
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file {:?}", path))?;
                Ok(Self::File(IoSink::new(BufWriter::new(file))))
            }
            OutputKind::Capture => {
                let mut sink = CaptureSink::new();
                sink.set_echo(echo);
                Ok(Self::Capture { sink, echo })
            }
        }
    }

    /// Flushes buffered output and ends the line on a terminal-bound sink.
    pub fn finish(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(sink) => {
                sink.get_mut().write_all(b"\n")?;
                sink.flush()
            }
            Self::File(sink) => sink.flush(),
            Self::Capture { echo: true, .. } => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(b"\n")?;
                stdout.flush()
            }
            Self::Capture { .. } => Ok(()),
        }
    }

    pub fn captured(&self) -> Option<Vec<u8>> {
        match self {
            Self::Capture { sink, .. } => sink.contents().ok(),
            _ => None,
        }
    }
}

impl ByteSink for OutputSink {
    type Error = SinkError;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        match self {
            Self::Stdout(sink) => Ok(sink.write(bytes)?),
            Self::File(sink) => Ok(sink.write(bytes)?),
            Self::Capture { sink, .. } => sink.write(bytes),
        }
    }
}
