//! Version-3 style `.schem` decoders: the nested `Blocks` compound.
//!
//! Two sub-formats share this module. The common one nests `Palette` and
//! `Data` inside `Blocks`, with one plain byte per position (WorldEdit only
//! writes this when the palette fits in a byte). The fallback is a `Blocks`
//! compound whose entries are individual per-block compounds carrying a
//! `Pos` and a `State` index into a sibling `BlockStates` list; that layout
//! is decoded best-effort, one bad entry never aborts the rest.

use crate::document::{SchematicDocument, SourceFormat, VoxelEntry};
use crate::nbt::{self, Compound};
use crate::palette::AIR_BLOCK;

use super::modern::{read_origin, read_palette};

/// Identifier used when a positional entry's `State` cannot be resolved.
const FALLBACK_BLOCK: &str = "minecraft:stone";

/// Decode the nested `Blocks{Palette,Data}` sub-format. Iteration and
/// palette resolution match the modern decoder, but each position consumes
/// exactly one raw byte of `Data` instead of a varint.
pub fn decode_palette_data(root: &Compound) -> SchematicDocument {
    let width = nbt::get_int(root, "Width").unwrap_or(0) as i32;
    let height = nbt::get_int(root, "Height").unwrap_or(0) as i32;
    let length = nbt::get_int(root, "Length").unwrap_or(0) as i32;
    let origin = read_origin(root);

    // Detection guarantees the Blocks compound exists.
    let empty = Compound::new();
    let container = nbt::get_compound(root, "Blocks").unwrap_or(&empty);
    let palette = read_palette(container);
    let data = nbt::get_byte_array(container, "Data")
        .map(nbt::to_unsigned)
        .unwrap_or_default();

    let mut blocks = Vec::new();
    let mut cursor = 0usize;
    'volume: for y in 0..height {
        for z in 0..length {
            for x in 0..width {
                let Some(&id) = data.get(cursor) else {
                    break 'volume;
                };
                cursor += 1;

                let block_type = palette
                    .get(&(id as u32))
                    .map(String::as_str)
                    .unwrap_or(AIR_BLOCK);
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
        SourceFormat::HybridNested,
    )
}

/// Decode the positional-compound sub-format: each `Blocks` entry carries
/// its own absolute `Pos` and a `State` index into the top-level
/// `BlockStates` list. Entry order is whatever the compound yields, not
/// volume order, and air is not expected to appear as an explicit entry.
pub fn decode_positional(root: &Compound) -> SchematicDocument {
    let mut width = nbt::get_int(root, "Width").unwrap_or(0) as i32;
    let mut height = nbt::get_int(root, "Height").unwrap_or(0) as i32;
    let mut length = nbt::get_int(root, "Length").unwrap_or(0) as i32;
    let origin = read_origin(root);

    let state_names = block_state_names(root);

    let empty = Compound::new();
    let container = nbt::get_compound(root, "Blocks").unwrap_or(&empty);

    let mut blocks = Vec::new();
    for (key, value) in container {
        let Some(entry) = decode_positional_entry(value, &state_names) else {
            log::warn!("skipping malformed block entry {:?}", key);
            continue;
        };
        // This layout sometimes omits usable dimensions; grow them so every
        // entry stays inside the declared volume.
        width = width.max(entry.x + 1);
        height = height.max(entry.y + 1);
        length = length.max(entry.z + 1);
        blocks.push(entry);
    }

    SchematicDocument::from_decoded(
        width,
        height,
        length,
        origin,
        blocks,
        SourceFormat::HybridNested,
    )
}

fn decode_positional_entry(value: &fastnbt::Value, state_names: &[String]) -> Option<VoxelEntry> {
    let fastnbt::Value::Compound(entry) = value else {
        return None;
    };
    let [x, y, z] = nbt::get_int_array(entry, "Pos")? else {
        return None;
    };
    let state = nbt::get_int(entry, "State")?;

    let block_type = usize::try_from(state)
        .ok()
        .and_then(|i| state_names.get(i))
        .map(String::as_str)
        .unwrap_or(FALLBACK_BLOCK);

    Some(VoxelEntry::new(*x, *y, *z, block_type))
}

/// `Name` strings out of the sibling `BlockStates` list, in list order.
/// Elements without a usable `Name` keep their slot so `State` indices
/// stay aligned.
fn block_state_names(root: &Compound) -> Vec<String> {
    let Some(states) = nbt::get_list(root, "BlockStates") else {
        return Vec::new();
    };
    states
        .iter()
        .map(|state| match state {
            fastnbt::Value::Compound(c) => nbt::get_string(c, "Name")
                .unwrap_or(FALLBACK_BLOCK)
                .to_string(),
            _ => FALLBACK_BLOCK.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastnbt::{ByteArray, IntArray, Value};

    fn nested_compound(width: i16, height: i16, length: i16, data: Vec<i8>) -> Compound {
        let mut palette = Compound::new();
        palette.insert(AIR_BLOCK.to_string(), Value::Int(0));
        palette.insert("minecraft:stone".to_string(), Value::Int(1));
        palette.insert("minecraft:dirt".to_string(), Value::Int(2));

        let mut container = Compound::new();
        container.insert("Palette".to_string(), Value::Compound(palette));
        container.insert("Data".to_string(), Value::ByteArray(ByteArray::new(data)));

        let mut c = Compound::new();
        c.insert("Width".to_string(), Value::Short(width));
        c.insert("Height".to_string(), Value::Short(height));
        c.insert("Length".to_string(), Value::Short(length));
        c.insert("Blocks".to_string(), Value::Compound(container));
        c
    }

    fn positional_entry(pos: Vec<i32>, state: i32) -> Value {
        let mut entry = Compound::new();
        entry.insert("Pos".to_string(), Value::IntArray(IntArray::new(pos)));
        entry.insert("State".to_string(), Value::Int(state));
        Value::Compound(entry)
    }

    fn block_states(names: &[&str]) -> Value {
        Value::List(
            names
                .iter()
                .map(|n| {
                    let mut c = Compound::new();
                    c.insert("Name".to_string(), Value::String(n.to_string()));
                    Value::Compound(c)
                })
                .collect(),
        )
    }

    #[test]
    fn test_palette_data_plain_bytes() {
        // One byte per position; no varint interpretation.
        let doc = decode_palette_data(&nested_compound(2, 1, 2, vec![0, 1, 2, 0]));
        assert_eq!(doc.total_blocks, 2);
        assert_eq!(doc.get_block(1, 0, 0).unwrap().block_type, "minecraft:stone");
        assert_eq!(doc.get_block(0, 0, 1).unwrap().block_type, "minecraft:dirt");
        assert_eq!(doc.original_format, SourceFormat::HybridNested);
    }

    #[test]
    fn test_palette_data_truncation_tolerated() {
        let doc = decode_palette_data(&nested_compound(2, 2, 2, vec![1, 1]));
        assert_eq!(doc.total_blocks, 2);
    }

    #[test]
    fn test_palette_data_unknown_index_is_air() {
        let doc = decode_palette_data(&nested_compound(1, 1, 2, vec![7, 1]));
        assert_eq!(doc.total_blocks, 1);
        assert_eq!(doc.blocks[0].z, 1);
    }

    #[test]
    fn test_positional_single_entry() {
        let mut container = Compound::new();
        container.insert("0".to_string(), positional_entry(vec![1, 2, 3], 0));

        let mut root = Compound::new();
        root.insert("Blocks".to_string(), Value::Compound(container));
        root.insert("BlockStates".to_string(), block_states(&["minecraft:dirt"]));

        let doc = decode_positional(&root);
        assert_eq!(doc.total_blocks, 1);
        let entry = &doc.blocks[0];
        assert_eq!((entry.x, entry.y, entry.z), (1, 2, 3));
        assert_eq!(entry.block_type, "minecraft:dirt");
        // Dimensions grow to cover the entry.
        assert_eq!((doc.width, doc.height, doc.length), (2, 3, 4));
    }

    #[test]
    fn test_positional_state_out_of_range_falls_back() {
        let mut container = Compound::new();
        container.insert("0".to_string(), positional_entry(vec![0, 0, 0], 5));

        let mut root = Compound::new();
        root.insert("Blocks".to_string(), Value::Compound(container));
        root.insert("BlockStates".to_string(), block_states(&["minecraft:dirt"]));

        let doc = decode_positional(&root);
        assert_eq!(doc.blocks[0].block_type, FALLBACK_BLOCK);
    }

    #[test]
    fn test_positional_missing_block_states_falls_back() {
        let mut container = Compound::new();
        container.insert("0".to_string(), positional_entry(vec![0, 0, 0], 0));

        let mut root = Compound::new();
        root.insert("Blocks".to_string(), Value::Compound(container));

        let doc = decode_positional(&root);
        assert_eq!(doc.blocks[0].block_type, FALLBACK_BLOCK);
    }

    #[test]
    fn test_positional_malformed_entry_skipped() {
        let mut bad = Compound::new();
        bad.insert("State".to_string(), Value::Int(0)); // no Pos

        let mut container = Compound::new();
        container.insert("bad".to_string(), Value::Compound(bad));
        container.insert("good".to_string(), positional_entry(vec![0, 1, 0], 0));

        let mut root = Compound::new();
        root.insert("Blocks".to_string(), Value::Compound(container));
        root.insert("BlockStates".to_string(), block_states(&["minecraft:oak_log"]));

        let doc = decode_positional(&root);
        assert_eq!(doc.total_blocks, 1);
        assert_eq!(doc.blocks[0].block_type, "minecraft:oak_log");
    }
}
