// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A decoder for the ABC (ActionScript Bytecode) file format executed by
//! the AVM2 and embedded in SWF DoAbc tags.
//!
//! All ABC integers are variable-length: little-endian 7-bit groups with
//! the high bit of each byte flagging a continuation. Everything in the
//! file cross-references the constant pool by integer index, with index 0
//! reserved as the "any" sentinel in every pool section. Method body
//! opcodes are captured as raw bytes; executing or validating them is out
//! of scope.

pub mod body;
pub mod class;
pub mod method;
pub mod pool;
pub mod traits;

use flare_core::errors::Result;
use flare_core::io::BitReader;

use crate::body::MethodBody;
use crate::class::{Class, Instance, Script};
use crate::method::{MetadataEntry, Method};
use crate::pool::ConstantPool;

/// A decoded ABC file.
#[derive(Clone, Debug, PartialEq)]
pub struct AbcFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub methods: Vec<Method>,
    pub metadata: Vec<MetadataEntry>,
    pub instances: Vec<Instance>,
    pub classes: Vec<Class>,
    pub scripts: Vec<Script>,
    pub method_bodies: Vec<MethodBody>,
}

impl AbcFile {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let minor_version = reader.read_u16()?;
        let major_version = reader.read_u16()?;

        let constant_pool = ConstantPool::read(reader)?;

        let method_count = reader.read_var_u30()?;
        let mut methods = Vec::with_capacity(method_count as usize);
        for _ in 0..method_count {
            methods.push(Method::read(reader)?);
        }

        let metadata_count = reader.read_var_u30()?;
        let mut metadata = Vec::with_capacity(metadata_count as usize);
        for _ in 0..metadata_count {
            metadata.push(MetadataEntry::read(reader)?);
        }

        // Instance and class records are two halves of the same
        // declarations and share one count.
        let class_count = reader.read_var_u30()?;
        let mut instances = Vec::with_capacity(class_count as usize);
        for _ in 0..class_count {
            instances.push(Instance::read(reader)?);
        }
        let mut classes = Vec::with_capacity(class_count as usize);
        for _ in 0..class_count {
            classes.push(Class::read(reader)?);
        }

        let script_count = reader.read_var_u30()?;
        let mut scripts = Vec::with_capacity(script_count as usize);
        for _ in 0..script_count {
            scripts.push(Script::read(reader)?);
        }

        let body_count = reader.read_var_u30()?;
        let mut method_bodies = Vec::with_capacity(body_count as usize);
        for _ in 0..body_count {
            method_bodies.push(MethodBody::read(reader)?);
        }

        Ok(AbcFile {
            minor_version,
            major_version,
            constant_pool,
            methods,
            metadata,
            instances,
            classes,
            scripts,
            method_bodies,
        })
    }
}

/// Decodes a complete ABC block held in memory.
pub fn decode(data: &[u8]) -> Result<AbcFile> {
    AbcFile::read(&mut BitReader::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Multiname;

    #[test]
    fn empty_file() {
        // Version 46.16 with every section count zero.
        let data = [
            0x10, 0x00, 0x2e, 0x00, // minor 16, major 46
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // pool sections
            0x00, // methods
            0x00, // metadata
            0x00, // classes
            0x00, // scripts
            0x00, // bodies
        ];
        let abc = decode(&data).unwrap();

        assert_eq!(abc.minor_version, 16);
        assert_eq!(abc.major_version, 46);
        assert_eq!(abc.constant_pool, ConstantPool::default());
        assert!(abc.methods.is_empty());
        assert!(abc.method_bodies.is_empty());
    }

    #[test]
    fn single_class_file() {
        let data = [
            0x10, 0x00, 0x2e, 0x00, // minor 16, major 46
            0x00, // ints
            0x00, // uints
            0x00, // doubles
            0x02, 0x01, b'A', // strings: "A"
            0x02, 0x16, 0x01, // namespaces: package "A"
            0x00, // ns sets
            0x02, 0x07, 0x01, 0x01, // multinames: QName
            0x01, 0x00, 0x00, 0x01, 0x00, // one method: () -> any, name 1
            0x00, // metadata
            0x01, // one class
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, // instance: name 1, no traits
            0x00, 0x00, // class: init 0, no traits
            0x01, 0x00, 0x00, // one script: init 0, no traits
            0x01, // one body
            0x00, 0x01, 0x01, 0x00, 0x01, // bounds
            0x01, 0x47, // code: returnvoid
            0x00, 0x00, // no exceptions, no traits
        ];
        let abc = decode(&data).unwrap();

        assert_eq!(abc.constant_pool.string(1), Some("A"));
        assert_eq!(
            abc.constant_pool.multiname(1),
            Some(&Multiname::QName { namespace: 1, name: 1 })
        );
        assert_eq!(abc.methods.len(), 1);
        assert_eq!(abc.instances.len(), 1);
        assert_eq!(abc.classes.len(), 1);
        assert_eq!(abc.scripts.len(), 1);
        assert_eq!(&abc.method_bodies[0].code[..], &[0x47]);
    }

    #[test]
    fn truncated_file_exhausts_the_stream() {
        let data = [0x10, 0x00, 0x2e, 0x00, 0x02];
        assert!(decode(&data).is_err());
    }
}
