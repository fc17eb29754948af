// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Inverse of the encoder's rendering.
//!
//! A character run is its marks plus one separator space. A word gap is two
//! spaces: its space mark and the separator. A lone space where a run should
//! start is an empty table entry; it has no character and is skipped. Line
//! breaks (`\n`, `\r\n`, `\r`) end the current run and are otherwise ignored.

use crate::symbol::{character_for, Symbol, GAP_MARK, SEPARATOR};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid mark {byte:#04x} at offset {position}")]
    InvalidMark { position: usize, byte: u8 },
    #[error("no character for run '{run}' at offset {position}")]
    UnknownSymbol { position: usize, run: String },
}

pub fn decode(text: &str) -> Result<String, DecodeError> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(bytes.len() / 3);
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'.' | b'-' => {
                let start = i;
                while i < bytes.len() && matches!(bytes[i], b'.' | b'-') {
                    i += 1;
                }
                push_run(&mut out, &bytes[start..i], start)?;
                // The final separator is optional.
                if bytes.get(i) == Some(&SEPARATOR) {
                    i += 1;
                }
            }
            GAP_MARK if bytes.get(i + 1) == Some(&SEPARATOR) => {
                out.push(' ');
                i += 2;
            }
            SEPARATOR => i += 1,
            b'\r' | b'\n' => i += 1,
            byte => return Err(DecodeError::InvalidMark { position: i, byte }),
        }
    }

    Ok(out)
}

fn push_run(out: &mut String, run: &[u8], position: usize) -> Result<(), DecodeError> {
    let character = Symbol::parse(run).and_then(character_for).ok_or_else(|| {
        DecodeError::UnknownSymbol {
            position,
            run: String::from_utf8_lossy(run).into_owned(),
        }
    })?;
    out.push(char::from(character));
    Ok(())
}
