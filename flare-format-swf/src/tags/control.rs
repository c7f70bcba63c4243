// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control, asset, and metadata tags.

use flare_core::errors::Result;
use flare_core::io::BitReader;

use crate::records::{Rectangle, Rgb};
use crate::tags::TagHeader;

/// A character id and exported/imported name pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetRef {
    pub id: u16,
    pub name: String,
}

fn read_asset_refs(reader: &mut BitReader<'_>) -> Result<Vec<AssetRef>> {
    let count = reader.read_u16()?;
    let mut assets = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let id = reader.read_u16()?;
        let name = reader.read_nul_string()?;
        assets.push(AssetRef { id, name });
    }
    Ok(assets)
}

/// SetBackgroundColor (tag 9).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SetBackgroundColor {
    pub background_color: Rgb,
}

impl SetBackgroundColor {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(SetBackgroundColor { background_color: Rgb::read(reader)? })
    }
}

/// FrameLabel (tag 43). The named-anchor byte is present only when payload
/// bytes remain past the label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLabel {
    pub name: String,
    pub named_anchor: bool,
}

impl FrameLabel {
    pub fn read(header: &TagHeader, reader: &mut BitReader<'_>) -> Result<Self> {
        let name = reader.read_nul_string()?;

        let named_anchor = if header.data_unread_at(reader.byte_position()) > 0 {
            reader.read_bool()?
        }
        else {
            false
        };

        Ok(FrameLabel { name, named_anchor })
    }
}

/// ExportAssets (tag 56).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportAssets {
    pub assets: Vec<AssetRef>,
}

impl ExportAssets {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(ExportAssets { assets: read_asset_refs(reader)? })
    }
}

/// ImportAssets (tags 57 and 71). The tag 71 form carries two reserved
/// bytes between the URL and the asset list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportAssets {
    pub url: String,
    pub assets: Vec<AssetRef>,
}

impl ImportAssets {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let url = reader.read_nul_string()?;
        let assets = read_asset_refs(reader)?;

        Ok(ImportAssets { url, assets })
    }

    pub fn read_v2(reader: &mut BitReader<'_>) -> Result<Self> {
        let url = reader.read_nul_string()?;
        reader.read_u8()?; // reserved, must be 1
        reader.read_u8()?; // reserved, must be 0
        let assets = read_asset_refs(reader)?;

        Ok(ImportAssets { url, assets })
    }
}

/// EnableDebugger (tags 58 and 64). The tag 64 form carries a reserved
/// 16-bit word before the password.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnableDebugger {
    pub password: String,
}

impl EnableDebugger {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(EnableDebugger { password: reader.read_nul_string()? })
    }

    pub fn read_v2(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.read_u16()?; // reserved, always 0
        Ok(EnableDebugger { password: reader.read_nul_string()? })
    }
}

/// ScriptLimits (tag 65).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScriptLimits {
    pub max_recursion_depth: u16,
    pub script_timeout_seconds: u16,
}

impl ScriptLimits {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let max_recursion_depth = reader.read_u16()?;
        let script_timeout_seconds = reader.read_u16()?;

        Ok(ScriptLimits { max_recursion_depth, script_timeout_seconds })
    }
}

/// SetTabIndex (tag 66).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SetTabIndex {
    pub depth: u16,
    pub tab_index: u16,
}

impl SetTabIndex {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let depth = reader.read_u16()?;
        let tab_index = reader.read_u16()?;

        Ok(SetTabIndex { depth, tab_index })
    }
}

/// FileAttributes (tag 69).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FileAttributes {
    pub use_direct_blit: bool,
    pub use_gpu: bool,
    pub has_metadata: bool,
    pub actionscript3: bool,
    pub use_network: bool,
}

impl FileAttributes {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.read_ubits(1)?; // reserved, always 0
        let use_direct_blit = reader.read_bit()?;
        let use_gpu = reader.read_bit()?;
        let has_metadata = reader.read_bit()?;
        let actionscript3 = reader.read_bit()?;
        reader.read_ubits(2)?; // reserved, always 0
        let use_network = reader.read_bit()?;
        reader.read_ubits(24)?; // reserved, always 0

        Ok(FileAttributes { use_direct_blit, use_gpu, has_metadata, actionscript3, use_network })
    }
}

/// SymbolClass (tag 76).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolClass {
    pub assets: Vec<AssetRef>,
}

impl SymbolClass {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(SymbolClass { assets: read_asset_refs(reader)? })
    }
}

/// Metadata (tag 77): an XML (RDF) description of the file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub metadata: String,
}

impl Metadata {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(Metadata { metadata: reader.read_nul_string()? })
    }
}

/// DefineScalingGrid (tag 78).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DefineScalingGrid {
    pub character_id: u16,
    pub splitter: Rectangle,
}

impl DefineScalingGrid {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let character_id = reader.read_u16()?;
        let splitter = Rectangle::read(reader)?;

        Ok(DefineScalingGrid { character_id, splitter })
    }
}

/// ProductInfo (tag 41): build metadata written by the authoring tool.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProductInfo {
    pub product_id: u32,
    pub edition: u32,
    pub major_version: u8,
    pub minor_version: u8,
    pub build_low: u32,
    pub build_high: u32,
    pub compilation_date_low: u32,
    pub compilation_date_high: u32,
}

impl ProductInfo {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let product_id = reader.read_u32()?;
        let edition = reader.read_u32()?;
        let major_version = reader.read_u8()?;
        let minor_version = reader.read_u8()?;
        let build_low = reader.read_u32()?;
        let build_high = reader.read_u32()?;
        let compilation_date_low = reader.read_u32()?;
        let compilation_date_high = reader.read_u32()?;

        Ok(ProductInfo {
            product_id,
            edition,
            major_version,
            minor_version,
            build_low,
            build_high,
            compilation_date_low,
            compilation_date_high,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_label_anchor_gated_by_length() {
        let data = [b'i', b'n', b't', b'r', b'o', 0x00];
        let header = TagHeader { code: 43, length: data.len() as u32, data_pos: 0 };
        let label = FrameLabel::read(&header, &mut BitReader::new(&data)).unwrap();
        assert_eq!(label.name, "intro");
        assert!(!label.named_anchor);

        let data = [b'i', b'n', b't', b'r', b'o', 0x00, 0x01];
        let header = TagHeader { code: 43, length: data.len() as u32, data_pos: 0 };
        let label = FrameLabel::read(&header, &mut BitReader::new(&data)).unwrap();
        assert!(label.named_anchor);
    }

    #[test]
    fn export_assets_pairs() {
        let data = [0x02, 0x00, 0x01, 0x00, b'a', 0x00, 0x02, 0x00, b'b', 0x00];
        let exports = ExportAssets::read(&mut BitReader::new(&data)).unwrap();
        assert_eq!(
            exports.assets,
            vec![
                AssetRef { id: 1, name: "a".into() },
                AssetRef { id: 2, name: "b".into() },
            ]
        );
    }

    #[test]
    fn import_assets2_reserved_bytes() {
        let data =
            [b'u', b'r', b'l', 0x00, 0x01, 0x00, 0x01, 0x00, 0x03, 0x00, b'c', 0x00];
        let imports = ImportAssets::read_v2(&mut BitReader::new(&data)).unwrap();
        assert_eq!(imports.url, "url");
        assert_eq!(imports.assets, vec![AssetRef { id: 3, name: "c".into() }]);
    }

    #[test]
    fn file_attributes_flags() {
        // AS3 + use-network.
        let data = [0b0000_1001, 0x00, 0x00, 0x00];
        let attrs = FileAttributes::read(&mut BitReader::new(&data)).unwrap();
        assert!(attrs.actionscript3);
        assert!(attrs.use_network);
        assert!(!attrs.use_direct_blit);
        assert!(!attrs.use_gpu);
        assert!(!attrs.has_metadata);
    }
}
