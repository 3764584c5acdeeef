//! In-memory voxel documents.
//!
//! A `SchematicDocument` is what decoding produces and encoding consumes:
//! dimensions, an origin, and a sparse list of non-air voxel entries. Air is
//! never materialized — absence of an entry at a coordinate means air. The
//! serde shape matches the JSON interchange used by the surrounding storage
//! and collaboration layers (camelCase, `blockType`/`blockData` per entry).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::SchematicError;
use crate::palette::AIR_BLOCK;

/// One non-air block: position, namespaced type, legacy metadata, and state
/// properties. `block_data` and `properties` survive in memory but are not
/// preserved by the wire format on export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoxelEntry {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub block_type: String,
    #[serde(default)]
    pub block_data: i32,
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl VoxelEntry {
    pub fn new(x: i32, y: i32, z: i32, block_type: &str) -> Self {
        Self {
            x,
            y,
            z,
            block_type: block_type.to_string(),
            block_data: 0,
            properties: HashMap::new(),
        }
    }
}

/// The WorldEdit "Offset": world coordinates of the schematic's min corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Origin {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Origin {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// Which on-disk layout a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Pre-1.13 `.schematic`: flat numeric ID + data arrays, no palette.
    LegacyIndexed,
    /// Version 1/2 `.schem`: top-level Palette + varint BlockData.
    ModernPalette,
    /// Version 3 `.schem`: nested Blocks compound (either Palette+Data or
    /// positional per-block compounds).
    HybridNested,
    /// Built in memory, never read from a file.
    CreatedEmpty,
}

/// A decoded (or freshly created) schematic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchematicDocument {
    pub width: i32,
    pub height: i32,
    pub length: i32,
    pub origin: Origin,
    pub blocks: Vec<VoxelEntry>,
    /// Distinct non-air block types actually used, in first-seen order.
    pub block_palette: Vec<String>,
    pub total_blocks: usize,
    pub original_format: SourceFormat,
}

impl SchematicDocument {
    /// Empty document of the given size, all air.
    pub fn new_empty(width: i32, height: i32, length: i32) -> Self {
        Self {
            width,
            height,
            length,
            origin: Origin::default(),
            blocks: Vec::new(),
            block_palette: Vec::new(),
            total_blocks: 0,
            original_format: SourceFormat::CreatedEmpty,
        }
    }

    /// Assemble a document from decoder output, deriving the palette and
    /// block count from the entries.
    pub(crate) fn from_decoded(
        width: i32,
        height: i32,
        length: i32,
        origin: Origin,
        blocks: Vec<VoxelEntry>,
        original_format: SourceFormat,
    ) -> Self {
        let mut doc = Self {
            width,
            height,
            length,
            origin,
            blocks,
            block_palette: Vec::new(),
            total_blocks: 0,
            original_format,
        };
        doc.refresh_palette();
        doc
    }

    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height && z >= 0 && z < self.length
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<&VoxelEntry> {
        self.blocks.iter().find(|b| b.x == x && b.y == y && b.z == z)
    }

    /// Place or replace a block. Setting air removes any existing entry.
    pub fn set_block(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        block_type: &str,
        block_data: i32,
        properties: HashMap<String, String>,
    ) -> Result<(), SchematicError> {
        if !self.in_bounds(x, y, z) {
            return Err(SchematicError::OutOfBounds { x, y, z });
        }

        self.blocks.retain(|b| !(b.x == x && b.y == y && b.z == z));
        if block_type != AIR_BLOCK {
            self.blocks.push(VoxelEntry {
                x,
                y,
                z,
                block_type: block_type.to_string(),
                block_data,
                properties,
            });
        }
        self.refresh_palette();
        Ok(())
    }

    /// Remove the block at a position. Returns whether one was present.
    pub fn remove_block(&mut self, x: i32, y: i32, z: i32) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| !(b.x == x && b.y == y && b.z == z));
        let removed = self.blocks.len() != before;
        if removed {
            self.refresh_palette();
        }
        removed
    }

    /// Fill the cuboid spanned by two corners (inclusive), clipped to the
    /// document bounds. Filling with air clears the region.
    pub fn fill_region(&mut self, min: (i32, i32, i32), max: (i32, i32, i32), block_type: &str) {
        let (x0, x1) = (min.0.min(max.0).max(0), min.0.max(max.0).min(self.width - 1));
        let (y0, y1) = (min.1.min(max.1).max(0), min.1.max(max.1).min(self.height - 1));
        let (z0, z1) = (min.2.min(max.2).max(0), min.2.max(max.2).min(self.length - 1));

        self.blocks.retain(|b| {
            !(b.x >= x0 && b.x <= x1 && b.y >= y0 && b.y <= y1 && b.z >= z0 && b.z <= z1)
        });
        if block_type != AIR_BLOCK {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    for x in x0..=x1 {
                        self.blocks.push(VoxelEntry::new(x, y, z, block_type));
                    }
                }
            }
        }
        self.refresh_palette();
    }

    /// Recompute the derived palette and block count from the entries.
    pub fn refresh_palette(&mut self) {
        let mut seen = HashSet::new();
        self.block_palette = self
            .blocks
            .iter()
            .filter(|b| b.block_type != AIR_BLOCK)
            .filter(|b| seen.insert(b.block_type.clone()))
            .map(|b| b.block_type.clone())
            .collect();
        self.total_blocks = self.blocks.len();
    }
}
