// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error::Error as StdError;
use std::fmt;
use std::result;

/// `Error` provides an enumeration of all possible errors reported by Flare.
#[derive(Debug)]
pub enum Error {
    /// A read or seek requested more data than the stream contains.
    EndOfStream,
    /// The stream contained malformed data and could not be decoded.
    DecodeError(&'static str),
    /// The file did not begin with one of the recognized SWF signatures.
    InvalidSignature([u8; 3]),
    /// The file length declared in the header does not match the actual
    /// (decompressed) length of the file.
    UnmatchedFileLength { declared: u32, actual: u64 },
    /// A discriminator drawn from a closed set had a value outside that set.
    UnknownDiscriminator { name: &'static str, value: u32 },
    /// The external decompressor reported a failure.
    Decompression(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::EndOfStream => {
                write!(f, "unexpected end of stream")
            }
            Error::DecodeError(msg) => {
                write!(f, "malformed stream: {}", msg)
            }
            Error::InvalidSignature(sig) => {
                write!(f, "invalid signature: {:02x?}", sig)
            }
            Error::UnmatchedFileLength { declared, actual } => {
                write!(f, "declared file length {} does not match actual length {}", declared, actual)
            }
            Error::UnknownDiscriminator { name, value } => {
                write!(f, "unknown {} value: {:#x}", name, value)
            }
            Error::Decompression(ref err) => {
                write!(f, "decompression failed: {}", err)
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Error::Decompression(ref err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create a decode error.
pub fn decode_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::DecodeError(desc))
}

/// Convenience function to create an end-of-stream error.
pub fn end_of_stream_error<T>() -> Result<T> {
    Err(Error::EndOfStream)
}

/// Convenience function to create an unknown-discriminator error for a value
/// outside its closed set.
pub fn unknown_discriminator_error<T>(name: &'static str, value: u32) -> Result<T> {
    Err(Error::UnknownDiscriminator { name, value })
}
