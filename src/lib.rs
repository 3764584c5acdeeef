//! mc-schem-codec: WorldEdit schematic import/export.
//!
//! Decodes `.schem` (Sponge versions 1–3, plus the nested and positional
//! layouts found in the wild) and legacy `.schematic` files into an
//! in-memory [`SchematicDocument`], and encodes documents back into
//! gzip-compressed Version-3 files that WorldEdit loads directly.
//!
//! The codec is pure and synchronous: every call owns its buffers, keeps no
//! state between invocations, and may run concurrently from any number of
//! threads. Structural problems (unparseable NBT, no recognizable layout)
//! surface as [`SchematicError`]; everything else — truncated block data,
//! unknown palette indices, malformed individual block entries — degrades
//! to air or is skipped, because third-party schematic files are rarely
//! pristine.

mod decode;
mod document;
mod encode;
mod error;
mod nbt;
mod palette;
mod varint;

pub use decode::{decode_by_extension, decode_legacy_schematic, decode_schem, detect_format, Format};
pub use document::{Origin, SchematicDocument, SourceFormat, VoxelEntry};
pub use encode::encode_schem;
pub use error::SchematicError;
pub use nbt::Compound;
pub use palette::{Palette, AIR_BLOCK};
