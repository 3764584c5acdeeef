//! Helpers over the fastnbt value tree, plus gzip plumbing.
//!
//! Schematic files are authored by many third-party tools, so every lookup
//! returns `Option` and call sites decide what a missing or mistyped field
//! means (usually a default, occasionally a fatal format error). Integral
//! lookups accept any of Byte/Short/Int/Long since tools disagree on the
//! exact tag width for dimensions.

use std::collections::HashMap;
use std::io::{Read, Write};

use fastnbt::Value;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

pub type Compound = HashMap<String, Value>;

/// Child compound by key.
pub fn get_compound<'a>(c: &'a Compound, key: &str) -> Option<&'a Compound> {
    match c.get(key) {
        Some(Value::Compound(inner)) => Some(inner),
        _ => None,
    }
}

/// Integral child by key; any of Byte/Short/Int/Long.
pub fn get_int(c: &Compound, key: &str) -> Option<i64> {
    c.get(key).and_then(|v| v.as_i64())
}

/// String child by key.
pub fn get_string<'a>(c: &'a Compound, key: &str) -> Option<&'a str> {
    match c.get(key) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// Byte array child by key.
pub fn get_byte_array<'a>(c: &'a Compound, key: &str) -> Option<&'a [i8]> {
    match c.get(key) {
        Some(Value::ByteArray(ba)) => Some(ba),
        _ => None,
    }
}

/// Int array child by key.
pub fn get_int_array<'a>(c: &'a Compound, key: &str) -> Option<&'a [i32]> {
    match c.get(key) {
        Some(Value::IntArray(ia)) => Some(ia),
        _ => None,
    }
}

/// List child by key.
pub fn get_list<'a>(c: &'a Compound, key: &str) -> Option<&'a [Value]> {
    match c.get(key) {
        Some(Value::List(l)) => Some(l.as_slice()),
        _ => None,
    }
}

/// Byte array reinterpreted as unsigned bytes.
///
/// NBT byte arrays are signed on the wire; block data and numeric IDs are
/// unsigned in every schematic format.
pub fn to_unsigned(bytes: &[i8]) -> Vec<u8> {
    bytes.iter().map(|&b| b as u8).collect()
}

/// Decompress a gzip stream, or hand the input back untouched if it is not
/// one. Schematics are gzipped by convention but raw NBT shows up in the
/// wild; a corrupt gzip stream falls through to the NBT parser, which then
/// produces the fatal error.
pub fn gunzip_best_effort(data: &[u8]) -> Vec<u8> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    match decoder.read_to_end(&mut decompressed) {
        Ok(_) => decompressed,
        Err(e) => {
            log::debug!("not a gzip stream ({}), parsing raw bytes", e);
            data.to_vec()
        }
    }
}

/// Gzip-compress a serialized NBT tree.
pub fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Compound {
        let mut c = Compound::new();
        c.insert("Width".to_string(), Value::Short(4));
        c.insert("Name".to_string(), Value::String("minecraft:dirt".to_string()));
        c.insert(
            "Data".to_string(),
            Value::ByteArray(fastnbt::ByteArray::new(vec![0, 1, -1])),
        );
        c
    }

    #[test]
    fn test_int_accepts_any_integral_width() {
        let mut c = sample();
        assert_eq!(get_int(&c, "Width"), Some(4));
        c.insert("Width".to_string(), Value::Int(9));
        assert_eq!(get_int(&c, "Width"), Some(9));
        c.insert("Width".to_string(), Value::Byte(2));
        assert_eq!(get_int(&c, "Width"), Some(2));
    }

    #[test]
    fn test_missing_or_mistyped_is_none() {
        let c = sample();
        assert_eq!(get_int(&c, "Height"), None);
        assert_eq!(get_int(&c, "Name"), None);
        assert!(get_compound(&c, "Data").is_none());
        assert_eq!(get_string(&c, "Width"), None);
    }

    #[test]
    fn test_unsigned_reinterpretation() {
        let c = sample();
        let raw = get_byte_array(&c, "Data").unwrap();
        assert_eq!(to_unsigned(raw), vec![0u8, 1, 255]);
    }

    #[test]
    fn test_gzip_round_trip() {
        let payload = b"schematic bytes".to_vec();
        let packed = gzip(&payload).unwrap();
        assert_ne!(packed, payload);
        assert_eq!(gunzip_best_effort(&packed), payload);
    }

    #[test]
    fn test_gunzip_passes_raw_through() {
        let raw = vec![1u8, 2, 3, 4];
        assert_eq!(gunzip_best_effort(&raw), raw);
    }
}
