// Dotdash - Morse Stream Encoder
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
pub mod decode;
pub mod encoder;
pub mod sink;
pub mod symbol;

#[cfg(feature = "std")]
pub use decode::{decode, DecodeError};
#[cfg(feature = "std")]
pub use encoder::encode_to_string;
pub use encoder::{encode, EncodeError, Encoded, MorseWriter};
pub use sink::ByteSink;
pub use symbol::{lookup, normalize, Mark, Symbol, TABLE};
