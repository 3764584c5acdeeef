//! Encode-side block palette.
//!
//! An ordered, index-addressable set of block identifiers. Index 0 is always
//! air so that a zero-filled volume array means "all air" without any
//! special casing. Non-air identifiers are appended in first-seen order;
//! palettes are not canonical across documents, only internally consistent
//! within one encode.

use std::collections::HashMap;

use crate::document::VoxelEntry;

/// The identifier reserved at palette index 0.
pub const AIR_BLOCK: &str = "minecraft:air";

#[derive(Debug, Clone)]
pub struct Palette {
    names: Vec<String>,
    index: HashMap<String, u32>,
}

impl Palette {
    /// New palette containing only air, at index 0.
    pub fn new() -> Self {
        let mut palette = Self {
            names: Vec::new(),
            index: HashMap::new(),
        };
        palette.intern(AIR_BLOCK);
        palette
    }

    /// Build a palette from voxel entries, in first-occurrence order.
    pub fn from_entries(entries: &[VoxelEntry]) -> Self {
        let mut palette = Self::new();
        for entry in entries {
            palette.intern(&entry.block_type);
        }
        palette
    }

    /// Seed a palette from a caller-supplied identifier list (e.g. a stored
    /// blockPalette). Air and duplicates collapse onto their existing slots.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut palette = Self::new();
        for name in names {
            palette.intern(name.as_ref());
        }
        palette
    }

    /// Index for an identifier, appending it if unseen. Air always maps to 0.
    pub fn intern(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len() as u32;
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    /// Index for an identifier, if present.
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.index.get(name).copied()
    }

    /// Identifier at an index. Unknown indices resolve to air rather than
    /// erroring, to tolerate malformed block data.
    pub fn resolve(&self, id: u32) -> &str {
        self.names.get(id as usize).map(String::as_str).unwrap_or(AIR_BLOCK)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Identifiers in index order (air first).
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_reserved_at_zero() {
        let palette = Palette::new();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.index_of(AIR_BLOCK), Some(0));
        assert_eq!(palette.resolve(0), AIR_BLOCK);
    }

    #[test]
    fn test_first_seen_order() {
        let mut palette = Palette::new();
        assert_eq!(palette.intern("minecraft:stone"), 1);
        assert_eq!(palette.intern("minecraft:dirt"), 2);
        assert_eq!(palette.intern("minecraft:stone"), 1);
        assert_eq!(
            palette.iter().collect::<Vec<_>>(),
            vec![AIR_BLOCK, "minecraft:stone", "minecraft:dirt"]
        );
    }

    #[test]
    fn test_unknown_index_resolves_to_air() {
        let mut palette = Palette::new();
        palette.intern("minecraft:stone");
        assert_eq!(palette.resolve(999), AIR_BLOCK);
    }

    #[test]
    fn test_from_entries_air_invariant() {
        let entries = vec![
            VoxelEntry::new(0, 0, 0, "minecraft:dirt"),
            VoxelEntry::new(1, 0, 0, "minecraft:stone"),
            VoxelEntry::new(2, 0, 0, "minecraft:dirt"),
        ];
        let palette = Palette::from_entries(&entries);
        assert_eq!(palette.index_of(AIR_BLOCK), Some(0));
        assert_eq!(palette.index_of("minecraft:dirt"), Some(1));
        assert_eq!(palette.index_of("minecraft:stone"), Some(2));
    }

    #[test]
    fn test_from_names_collapses_air() {
        let palette = Palette::from_names(["minecraft:stone", AIR_BLOCK, "minecraft:stone"]);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.index_of("minecraft:stone"), Some(1));
    }
}
