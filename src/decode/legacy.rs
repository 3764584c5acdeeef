//! Pre-1.13 `.schematic` decoder.
//!
//! The legacy format has no palette: `Blocks` is a flat array of numeric
//! block IDs and `Data` a parallel array of metadata values, indexed
//! `y*width*length + z*width + x`. Numeric IDs map through a fixed table to
//! modern identifiers. The table is knowingly incomplete (~19 entries,
//! matching what the upstream editor shipped); unknown IDs fall back to
//! stone. Raw ID 0 is air no matter what the table says.

use fastnbt::Value;

use crate::document::{Origin, SchematicDocument, SourceFormat, VoxelEntry};
use crate::nbt::{self, Compound};
use crate::palette::AIR_BLOCK;

pub fn decode(root: &Compound) -> SchematicDocument {
    let width = nbt::get_int(root, "Width").unwrap_or(0) as i32;
    let height = nbt::get_int(root, "Height").unwrap_or(0) as i32;
    let length = nbt::get_int(root, "Length").unwrap_or(0) as i32;

    let block_ids = numeric_array(root, "Blocks");
    let data = nbt::get_byte_array(root, "Data")
        .map(nbt::to_unsigned)
        .unwrap_or_default();

    let mut blocks = Vec::new();
    // The flat index is monotonic in this iteration order, and declared
    // dimensions can describe volumes far beyond both i32 and the actual
    // array, so index in usize and stop at the end of the data.
    'volume: for y in 0..height {
        for z in 0..length {
            for x in 0..width {
                let index = y as usize * width as usize * length as usize
                    + z as usize * width as usize
                    + x as usize;
                let Some(&id) = block_ids.get(index) else {
                    break 'volume;
                };
                if id == 0 {
                    continue;
                }

                let metadata = data.get(index).copied().unwrap_or(0);
                let block_type = legacy_block_name(id, metadata);
                if block_type == AIR_BLOCK {
                    continue;
                }

                let mut entry = VoxelEntry::new(x, y, z, block_type);
                entry.block_data = metadata as i32;
                blocks.push(entry);
            }
        }
    }

    // Legacy files predate the Offset tag.
    SchematicDocument::from_decoded(
        width,
        height,
        length,
        Origin::default(),
        blocks,
        SourceFormat::LegacyIndexed,
    )
}

/// `Blocks` as unsigned numeric IDs; tools write it as either a byte array
/// or an int array.
fn numeric_array(root: &Compound, key: &str) -> Vec<u16> {
    match root.get(key) {
        Some(Value::ByteArray(ba)) => ba.iter().map(|&b| b as u8 as u16).collect(),
        Some(Value::IntArray(ia)) => ia.iter().map(|&i| i as u16).collect(),
        _ => Vec::new(),
    }
}

/// Fixed legacy-ID table, same coverage as the upstream editor. Water and
/// lava collapse their flowing/still variants; everything unmapped decodes
/// as stone.
fn legacy_block_name(id: u16, _metadata: u8) -> &'static str {
    match id {
        0 => AIR_BLOCK,
        1 => "minecraft:stone",
        2 => "minecraft:grass_block",
        3 => "minecraft:dirt",
        4 => "minecraft:cobblestone",
        5 => "minecraft:oak_planks",
        6 => "minecraft:oak_sapling",
        7 => "minecraft:bedrock",
        8 | 9 => "minecraft:water",
        10 | 11 => "minecraft:lava",
        12 => "minecraft:sand",
        13 => "minecraft:gravel",
        14 => "minecraft:gold_ore",
        15 => "minecraft:iron_ore",
        16 => "minecraft:coal_ore",
        17 => "minecraft:oak_log",
        18 => "minecraft:oak_leaves",
        _ => "minecraft:stone",
    }
}
