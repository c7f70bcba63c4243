// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Method bodies: stack and scope bounds, raw opcode bytes, exception
//! handlers, and body-scoped traits.

use flare_core::errors::Result;
use flare_core::io::BitReader;

use crate::traits::{read_traits, Trait};

/// One exception handler: code offsets bounding the covered range and the
/// handler target, plus the exception type and variable name multinames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Exception {
    pub from: u32,
    pub to: u32,
    pub target: u32,
    pub exception_type: u32,
    pub var_name: u32,
}

impl Exception {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let from = reader.read_var_u30()?;
        let to = reader.read_var_u30()?;
        let target = reader.read_var_u30()?;
        let exception_type = reader.read_var_u30()?;
        let var_name = reader.read_var_u30()?;

        Ok(Exception { from, to, target, exception_type, var_name })
    }
}

/// A method body. The opcode bytes are captured raw; interpreting them is
/// out of scope here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodBody {
    /// Index of the method this body belongs to.
    pub method: u32,
    pub max_stack: u32,
    pub local_count: u32,
    pub init_scope_depth: u32,
    pub max_scope_depth: u32,
    pub code: Box<[u8]>,
    pub exceptions: Vec<Exception>,
    pub traits: Vec<Trait>,
}

impl MethodBody {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let method = reader.read_var_u30()?;
        let max_stack = reader.read_var_u30()?;
        let local_count = reader.read_var_u30()?;
        let init_scope_depth = reader.read_var_u30()?;
        let max_scope_depth = reader.read_var_u30()?;

        let code_len = reader.read_var_u30()?;
        let code = reader.read_boxed_slice(code_len as usize)?;

        let exception_count = reader.read_var_u30()?;
        let mut exceptions = Vec::with_capacity(exception_count as usize);
        for _ in 0..exception_count {
            exceptions.push(Exception::read(reader)?);
        }

        let traits = read_traits(reader)?;

        Ok(MethodBody {
            method,
            max_stack,
            local_count,
            init_scope_depth,
            max_scope_depth,
            code,
            exceptions,
            traits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_captures_raw_code() {
        let data = [
            0x00, // method 0
            0x02, 0x01, 0x00, 0x02, // stack/local/scope bounds
            0x03, 0xd0, 0x30, 0x47, // code: getlocal0, pushscope, returnvoid
            0x00, // no exceptions
            0x00, // no traits
        ];
        let mut reader = BitReader::new(&data);
        let body = MethodBody::read(&mut reader).unwrap();

        assert_eq!(body.method, 0);
        assert_eq!(body.max_stack, 2);
        assert_eq!(body.local_count, 1);
        assert_eq!((body.init_scope_depth, body.max_scope_depth), (0, 2));
        assert_eq!(&body.code[..], &[0xd0, 0x30, 0x47]);
        assert!(body.exceptions.is_empty());
        assert!(body.traits.is_empty());
        assert_eq!(reader.byte_position(), data.len());
    }

    #[test]
    fn exception_table_entries() {
        let data = [
            0x00, 0x01, 0x01, 0x00, 0x01, // header fields
            0x01, 0x47, // one code byte
            0x01, // one exception
            0x00, 0x01, 0x01, 0x02, 0x03, // from/to/target/type/name
            0x00, // no traits
        ];
        let body = MethodBody::read(&mut BitReader::new(&data)).unwrap();

        assert_eq!(
            body.exceptions,
            vec![Exception { from: 0, to: 1, target: 1, exception_type: 2, var_name: 3 }]
        );
    }
}
