//! Version 1/2 `.schem` decoder: Palette compound + varint BlockData.
//!
//! BlockData is one continuous varint stream across the whole volume, so a
//! single cursor is threaded through the y,z,x iteration; there is no
//! per-position alignment to recover at. A stream that runs out before the
//! volume does leaves the remaining positions as air.

use std::collections::HashMap;

use crate::document::{Origin, SchematicDocument, SourceFormat, VoxelEntry};
use crate::nbt::{self, Compound};
use crate::palette::AIR_BLOCK;
use crate::varint::read_varint;

pub fn decode(root: &Compound) -> SchematicDocument {
    let width = nbt::get_int(root, "Width").unwrap_or(0) as i32;
    let height = nbt::get_int(root, "Height").unwrap_or(0) as i32;
    let length = nbt::get_int(root, "Length").unwrap_or(0) as i32;
    let origin = read_origin(root);

    let palette = read_palette(root);
    let data = nbt::get_byte_array(root, "BlockData")
        .map(nbt::to_unsigned)
        .unwrap_or_default();

    let mut blocks = Vec::new();
    let mut cursor = 0usize;
    'volume: for y in 0..height {
        for z in 0..length {
            for x in 0..width {
                let Some((id, next)) = read_varint(&data, cursor) else {
                    // Truncated or exhausted stream: rest of the volume is air.
                    break 'volume;
                };
                cursor = next;

                let block_type = palette.get(&id).map(String::as_str).unwrap_or(AIR_BLOCK);
                if block_type != AIR_BLOCK {
                    blocks.push(VoxelEntry::new(x, y, z, block_type));
                }
            }
        }
    }

    SchematicDocument::from_decoded(
        width,
        height,
        length,
        origin,
        blocks,
        SourceFormat::ModernPalette,
    )
}

/// `Offset` int array; absent or malformed defaults to the zero origin.
pub(super) fn read_origin(root: &Compound) -> Origin {
    match nbt::get_int_array(root, "Offset") {
        Some([x, y, z, ..]) => Origin::new(*x, *y, *z),
        _ => Origin::default(),
    }
}

/// Invert a `Palette` compound (identifier -> id) into id -> identifier.
pub(super) fn read_palette(root: &Compound) -> HashMap<u32, String> {
    let mut by_id = HashMap::new();
    if let Some(palette) = nbt::get_compound(root, "Palette") {
        for (name, id) in palette {
            if let Some(id) = id.as_i64() {
                by_id.insert(id as u32, name.clone());
            }
        }
    }
    by_id
}
