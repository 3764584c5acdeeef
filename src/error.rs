//! Error types for schematic decoding and encoding.
//!
//! Only structural failures surface here: bad NBT, no recognizable block
//! data layout, unsupported file extensions. Recoverable oddities inside a
//! file (unknown palette indices, truncated block data, malformed block
//! entries) degrade to air or are skipped instead of erroring, so that
//! third-party schematics with sloppy tails still import.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchematicError {
    /// The buffer is not a valid NBT compound (after best-effort gunzip).
    #[error("failed to parse NBT: {0}")]
    Nbt(#[from] fastnbt::error::Error),

    /// The root NBT tag is something other than a compound.
    #[error("NBT root is not a compound")]
    NotACompound,

    /// No recognizable block data format in the parsed tree.
    #[error("no recognizable block data format")]
    UnknownFormat,

    /// File name does not end in .schem or .schematic.
    #[error("unsupported file extension: {0:?}")]
    UnsupportedExtension(String),

    /// Writing the gzip stream failed.
    #[error("failed to write compressed output: {0}")]
    Io(#[from] std::io::Error),

    /// A block edit targeted a position outside the document volume.
    #[error("position ({x}, {y}, {z}) is outside the schematic bounds")]
    OutOfBounds { x: i32, y: i32, z: i32 },
}
