// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `pool` module decodes the ABC constant pool: seven parallel arrays
//! cross-referenced by index from the rest of the file.
//!
//! Every pool section declares a count `n` but stores `n - 1` entries:
//! index 0 is the implicit "any" sentinel and never appears in the stream.
//! Stream-supplied indices are 1-based; the typed accessors below perform
//! the translation.

use flare_core::errors::{unknown_discriminator_error, Result};
use flare_core::io::BitReader;

/// The kind byte of a namespace constant. A closed set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamespaceKind {
    Private,
    Namespace,
    Package,
    PackageInternal,
    Protected,
    Explicit,
    StaticProtected,
}

impl NamespaceKind {
    pub(crate) fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x05 => Ok(NamespaceKind::Private),
            0x08 => Ok(NamespaceKind::Namespace),
            0x16 => Ok(NamespaceKind::Package),
            0x17 => Ok(NamespaceKind::PackageInternal),
            0x18 => Ok(NamespaceKind::Protected),
            0x19 => Ok(NamespaceKind::Explicit),
            0x1a => Ok(NamespaceKind::StaticProtected),
            _ => unknown_discriminator_error("namespace kind", u32::from(byte)),
        }
    }
}

/// A namespace constant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Namespace {
    pub kind: NamespaceKind,
    /// String pool index of the namespace name.
    pub name: u32,
}

impl Namespace {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let kind = NamespaceKind::from_byte(reader.read_u8()?)?;
        let name = reader.read_var_u30()?;

        Ok(Namespace { kind, name })
    }
}

/// A namespace set constant: namespace pool indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NsSet {
    pub namespaces: Vec<u32>,
}

impl NsSet {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let count = reader.read_var_u30()?;
        let mut namespaces = Vec::with_capacity(count as usize);
        for _ in 0..count {
            namespaces.push(reader.read_var_u30()?);
        }

        Ok(NsSet { namespaces })
    }
}

/// A multiname constant: a runtime-resolvable name. The kind byte selects
/// which parts are carried in the stream; the late-binding kinds carry
/// nothing. A closed set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Multiname {
    QName { namespace: u32, name: u32 },
    QNameA { namespace: u32, name: u32 },
    RtQName { name: u32 },
    RtQNameA { name: u32 },
    RtQNameL,
    RtQNameLA,
    Multiname { name: u32, ns_set: u32 },
    MultinameA { name: u32, ns_set: u32 },
    MultinameL { ns_set: u32 },
    MultinameLA { ns_set: u32 },
    /// A parameterized name (e.g. Vector.<int>): a multiname index plus
    /// type-parameter multiname indices.
    TypeName { name: u32, params: Vec<u32> },
}

impl Multiname {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let kind = reader.read_u8()?;

        let multiname = match kind {
            0x07 => {
                let namespace = reader.read_var_u30()?;
                let name = reader.read_var_u30()?;
                Multiname::QName { namespace, name }
            }
            0x0d => {
                let namespace = reader.read_var_u30()?;
                let name = reader.read_var_u30()?;
                Multiname::QNameA { namespace, name }
            }
            0x0f => Multiname::RtQName { name: reader.read_var_u30()? },
            0x10 => Multiname::RtQNameA { name: reader.read_var_u30()? },
            0x11 => Multiname::RtQNameL,
            0x12 => Multiname::RtQNameLA,
            0x09 => {
                let name = reader.read_var_u30()?;
                let ns_set = reader.read_var_u30()?;
                Multiname::Multiname { name, ns_set }
            }
            0x0e => {
                let name = reader.read_var_u30()?;
                let ns_set = reader.read_var_u30()?;
                Multiname::MultinameA { name, ns_set }
            }
            0x1b => Multiname::MultinameL { ns_set: reader.read_var_u30()? },
            0x1c => Multiname::MultinameLA { ns_set: reader.read_var_u30()? },
            0x1d => {
                let name = reader.read_var_u30()?;
                let count = reader.read_var_u30()?;
                let mut params = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    params.push(reader.read_var_u30()?);
                }
                Multiname::TypeName { name, params }
            }
            _ => return unknown_discriminator_error("multiname kind", u32::from(kind)),
        };

        Ok(multiname)
    }
}

/// The kind byte of a default value or constant trait value. A closed set:
/// the primitive kinds plus every namespace kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstantKind {
    Undefined,
    Utf8,
    Int,
    UInt,
    Double,
    False,
    True,
    Null,
    Namespace(NamespaceKind),
}

impl ConstantKind {
    pub(crate) fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(ConstantKind::Undefined),
            0x01 => Ok(ConstantKind::Utf8),
            0x03 => Ok(ConstantKind::Int),
            0x04 => Ok(ConstantKind::UInt),
            0x06 => Ok(ConstantKind::Double),
            0x0a => Ok(ConstantKind::False),
            0x0b => Ok(ConstantKind::True),
            0x0c => Ok(ConstantKind::Null),
            0x05 | 0x08 | 0x16 | 0x17 | 0x18 | 0x19 | 0x1a => {
                Ok(ConstantKind::Namespace(NamespaceKind::from_byte(byte)?))
            }
            _ => unknown_discriminator_error("constant kind", u32::from(byte)),
        }
    }
}

/// The constant pool. Entry 0 of every section is the implicit "any"
/// sentinel; the stored vectors begin at stream index 1.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantPool {
    pub ints: Vec<i32>,
    pub uints: Vec<u32>,
    pub doubles: Vec<f64>,
    pub strings: Vec<String>,
    pub namespaces: Vec<Namespace>,
    pub ns_sets: Vec<NsSet>,
    pub multinames: Vec<Multiname>,
}

/// The number of entries actually stored for a declared section count.
fn stored(count: u32) -> u32 {
    count.saturating_sub(1)
}

impl ConstantPool {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let count = stored(reader.read_var_u30()?);
        let mut ints = Vec::with_capacity(count as usize);
        for _ in 0..count {
            ints.push(reader.read_var_i32()?);
        }

        let count = stored(reader.read_var_u30()?);
        let mut uints = Vec::with_capacity(count as usize);
        for _ in 0..count {
            uints.push(reader.read_var_u32()?);
        }

        let count = stored(reader.read_var_u30()?);
        let mut doubles = Vec::with_capacity(count as usize);
        for _ in 0..count {
            doubles.push(reader.read_f64()?);
        }

        let count = stored(reader.read_var_u30()?);
        let mut strings = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let len = reader.read_var_u30()?;
            strings.push(reader.read_raw_string(len as usize)?);
        }

        let count = stored(reader.read_var_u30()?);
        let mut namespaces = Vec::with_capacity(count as usize);
        for _ in 0..count {
            namespaces.push(Namespace::read(reader)?);
        }

        let count = stored(reader.read_var_u30()?);
        let mut ns_sets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            ns_sets.push(NsSet::read(reader)?);
        }

        let count = stored(reader.read_var_u30()?);
        let mut multinames = Vec::with_capacity(count as usize);
        for _ in 0..count {
            multinames.push(Multiname::read(reader)?);
        }

        Ok(ConstantPool { ints, uints, doubles, strings, namespaces, ns_sets, multinames })
    }

    /// Looks up a 1-based signed integer index; index 0 is the "any"
    /// sentinel.
    pub fn int(&self, idx: u32) -> Option<i32> {
        self.ints.get(checked_index(idx)?).copied()
    }

    /// Looks up a 1-based unsigned integer index.
    pub fn uint(&self, idx: u32) -> Option<u32> {
        self.uints.get(checked_index(idx)?).copied()
    }

    /// Looks up a 1-based double index.
    pub fn double(&self, idx: u32) -> Option<f64> {
        self.doubles.get(checked_index(idx)?).copied()
    }

    /// Looks up a 1-based string index.
    pub fn string(&self, idx: u32) -> Option<&str> {
        self.strings.get(checked_index(idx)?).map(String::as_str)
    }

    /// Looks up a 1-based namespace index.
    pub fn namespace(&self, idx: u32) -> Option<&Namespace> {
        self.namespaces.get(checked_index(idx)?)
    }

    /// Looks up a 1-based namespace set index.
    pub fn ns_set(&self, idx: u32) -> Option<&NsSet> {
        self.ns_sets.get(checked_index(idx)?)
    }

    /// Looks up a 1-based multiname index.
    pub fn multiname(&self, idx: u32) -> Option<&Multiname> {
        self.multinames.get(checked_index(idx)?)
    }
}

fn checked_index(idx: u32) -> Option<usize> {
    if idx == 0 {
        None
    }
    else {
        Some(idx as usize - 1)
    }
}
