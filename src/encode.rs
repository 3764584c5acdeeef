//! Version-3 `.schem` encoder.
//!
//! Emits the layout WorldEdit 7.3+ reads natively: a root `Schematic`
//! compound holding Version/DataVersion, short dimensions, the Offset, and a
//! nested `Blocks` compound with Palette, Data, and an empty BlockEntities
//! placeholder. Data is one byte per position while the palette fits in 256
//! entries, otherwise a sequential varint stream. The result gunzips and
//! re-decodes through this crate's own nested-format path.

use fastnbt::{ByteArray, IntArray, Value};

use crate::document::SchematicDocument;
use crate::error::SchematicError;
use crate::nbt::{self, Compound};
use crate::palette::Palette;
use crate::varint::write_varint;

/// Wire format version for every file this encoder produces.
const SCHEM_VERSION: i32 = 3;
/// Fixed target game data version (1.19.2).
const DATA_VERSION: i32 = 2975;

/// Encode a document as a gzip-compressed Version-3 `.schem` buffer.
///
/// Well-formed input never fails; dimension validation (positive, within
/// short range) is the caller's contract. Dimensions above 32767 wrap in
/// the wire's short fields — a format limitation, not checked here.
pub fn encode_schem(doc: &SchematicDocument) -> Result<Vec<u8>, SchematicError> {
    let palette = if doc.block_palette.is_empty() {
        Palette::from_entries(&doc.blocks)
    } else {
        Palette::from_names(&doc.block_palette)
    };

    let volume = doc.width as usize * doc.height as usize * doc.length as usize;
    let mut indices = vec![0u32; volume];
    for block in &doc.blocks {
        let flat = block.y as usize * doc.width as usize * doc.length as usize
            + block.z as usize * doc.width as usize
            + block.x as usize;
        // A type missing from a caller-supplied palette stays air.
        if let Some(id) = palette.index_of(&block.block_type) {
            indices[flat] = id;
        }
    }

    let data = if palette.len() <= 256 {
        indices.iter().map(|&id| id as u8 as i8).collect()
    } else {
        let mut stream = Vec::new();
        for &id in &indices {
            write_varint(&mut stream, id);
        }
        stream.into_iter().map(|b| b as i8).collect()
    };

    let mut palette_tag = Compound::new();
    for (id, name) in palette.iter().enumerate() {
        palette_tag.insert(name.to_string(), Value::Int(id as i32));
    }

    let mut container = Compound::new();
    container.insert("Palette".to_string(), Value::Compound(palette_tag));
    container.insert("Data".to_string(), Value::ByteArray(ByteArray::new(data)));
    // Block entities are not preserved; the tag is required by the format.
    container.insert("BlockEntities".to_string(), Value::List(Vec::new()));

    let mut body = Compound::new();
    body.insert("Version".to_string(), Value::Int(SCHEM_VERSION));
    body.insert("DataVersion".to_string(), Value::Int(DATA_VERSION));
    body.insert("Width".to_string(), Value::Short(doc.width as i16));
    body.insert("Height".to_string(), Value::Short(doc.height as i16));
    body.insert("Length".to_string(), Value::Short(doc.length as i16));
    body.insert(
        "Offset".to_string(),
        Value::IntArray(IntArray::new(vec![doc.origin.x, doc.origin.y, doc.origin.z])),
    );
    body.insert("Blocks".to_string(), Value::Compound(container));

    let mut root = Compound::new();
    root.insert("Schematic".to_string(), Value::Compound(body));

    let raw = fastnbt::to_bytes(&Value::Compound(root))?;
    Ok(nbt::gzip(&raw)?)
}
