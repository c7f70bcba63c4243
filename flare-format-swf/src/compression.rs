// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `compression` module wraps the external decompressors used for
//! compressed SWF bodies. Decoding proper never touches compressed bytes;
//! it consumes the output of these functions.

use std::io::Read;

use flare_core::errors::{Error, Result};

use lzma_rs::decompress::{Options, UnpackedSize};

/// Decompresses a zlib stream.
pub fn zlib_decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();

    flate2::read::ZlibDecoder::new(data)
        .read_to_end(&mut output)
        .map_err(|err| Error::Decompression(Box::new(err)))?;

    Ok(output)
}

/// Decompresses an LZMA stream laid out the way SWF embeds it: a 5-byte
/// properties header directly followed by the raw stream, with no size
/// field and no end marker. The expected output size must therefore be
/// supplied by the caller.
pub fn lzma_decompress(data: &[u8], expected_len: Option<u64>) -> Result<Vec<u8>> {
    let mut input = data;
    let mut output = Vec::new();

    let options = Options {
        unpacked_size: UnpackedSize::UseProvided(expected_len),
        memlimit: None,
        allow_incomplete: false,
    };

    lzma_rs::lzma_decompress_with_options(&mut input, &mut output, &options)
        .map_err(|err| Error::Decompression(Box::new(err)))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn zlib_round_trip() {
        let plain = b"a body of tags";

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(plain).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(zlib_decompress(&compressed).unwrap(), plain);
    }

    #[test]
    fn zlib_garbage_is_a_decompression_error() {
        let result = zlib_decompress(&[0x00, 0x01, 0x02]);
        assert!(matches!(result, Err(Error::Decompression(_))));
    }

    #[test]
    fn lzma_without_size_field() {
        let plain = b"a body of tags";

        // The reference encoder emits properties, an 8-byte unpacked size,
        // then the stream; SWF carries no size field, so strip it.
        let mut compressed = Vec::new();
        lzma_rs::lzma_compress(&mut &plain[..], &mut compressed).unwrap();
        let mut swf_form = compressed[..5].to_vec();
        swf_form.extend_from_slice(&compressed[13..]);

        let output = lzma_decompress(&swf_form, Some(plain.len() as u64)).unwrap();
        assert_eq!(output, plain);
    }
}
