//! Schematic decoding: format detection and dispatch.
//!
//! `.schem` files have gone through three incompatible layouts, and tools in
//! the wild mix them freely. The shape predicates run exactly once, here, and
//! produce a closed [`Format`] variant; each decoder then assumes its shape
//! and degrades gracefully on anything else. Legacy `.schematic` files never
//! pass through detection — they predate versioning and are routed straight
//! by file extension.

mod hybrid;
mod legacy;
mod modern;

use fastnbt::Value;

use crate::document::SchematicDocument;
use crate::error::SchematicError;
use crate::nbt::{self, Compound};

/// The recognized on-disk layouts, one decoder per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pre-1.13 flat arrays (`.schematic`), selected by extension only.
    Legacy,
    /// Top-level `Palette` + varint `BlockData`.
    ModernPalette,
    /// Nested `Blocks{Palette, Data}` with one byte per position.
    HybridPaletteData,
    /// `Blocks` as a mapping of per-block compounds with `Pos`/`State`.
    HybridPositional,
}

/// Decide which decoder applies to a parsed `.schem` compound.
///
/// A root-level `Schematic` child compound (Version-3 wrapping) is descended
/// into first; all shape checks run on the descended compound only, so a
/// stray top-level `Palette` cannot shadow a nested layout.
pub fn detect_format(root: &Compound) -> Result<Format, SchematicError> {
    let body = nbt::get_compound(root, "Schematic").unwrap_or(root);

    if nbt::get_compound(body, "Palette").is_some()
        && nbt::get_byte_array(body, "BlockData").is_some()
    {
        return Ok(Format::ModernPalette);
    }

    if let Some(container) = nbt::get_compound(body, "Blocks") {
        if nbt::get_compound(container, "Palette").is_some()
            && nbt::get_byte_array(container, "Data").is_some()
        {
            return Ok(Format::HybridPaletteData);
        }
        // Positional layout: a mapping of per-block compounds. At least one
        // entry must carry Pos and State, so a junk Blocks compound fails
        // detection instead of decoding to an empty document; remaining
        // malformed entries are still skipped by the decoder itself.
        if container.values().any(looks_positional) {
            return Ok(Format::HybridPositional);
        }
    }

    Err(SchematicError::UnknownFormat)
}

fn looks_positional(value: &Value) -> bool {
    match value {
        Value::Compound(entry) => {
            nbt::get_int_array(entry, "Pos").is_some() && nbt::get_int(entry, "State").is_some()
        }
        _ => false,
    }
}

/// Decode a `.schem` buffer (gzipped or raw NBT).
pub fn decode_schem(data: &[u8]) -> Result<SchematicDocument, SchematicError> {
    let root = parse_root(data)?;
    let format = detect_format(&root)?;
    let body = nbt::get_compound(&root, "Schematic").unwrap_or(&root);

    let doc = match format {
        Format::ModernPalette => modern::decode(body),
        Format::HybridPaletteData => hybrid::decode_palette_data(body),
        Format::HybridPositional => hybrid::decode_positional(body),
        // Unreachable: detect_format never yields Legacy.
        Format::Legacy => legacy::decode(body),
    };
    Ok(doc)
}

/// Decode a legacy `.schematic` buffer. The format is version-less, so no
/// detection runs; gzip is tolerated but not required.
pub fn decode_legacy_schematic(data: &[u8]) -> Result<SchematicDocument, SchematicError> {
    let root = parse_root(data)?;
    Ok(legacy::decode(&root))
}

/// Route a buffer by file-name extension, the convention the upload surface
/// uses: `.schem` goes through detection, `.schematic` is always legacy.
pub fn decode_by_extension(
    file_name: &str,
    data: &[u8],
) -> Result<SchematicDocument, SchematicError> {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".schem") {
        decode_schem(data)
    } else if lower.ends_with(".schematic") {
        decode_legacy_schematic(data)
    } else {
        let extension = match lower.rfind('.') {
            Some(dot) => lower[dot..].to_string(),
            None => String::new(),
        };
        Err(SchematicError::UnsupportedExtension(extension))
    }
}

fn parse_root(data: &[u8]) -> Result<Compound, SchematicError> {
    let bytes = nbt::gunzip_best_effort(data);
    let value: Value = fastnbt::from_bytes(&bytes)?;
    match value {
        Value::Compound(root) => Ok(root),
        _ => Err(SchematicError::NotACompound),
    }
}
