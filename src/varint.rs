//! Variable-length integer codec for schematic block data.
//!
//! WorldEdit's BlockData is one continuous stream of LEB128-style varints:
//! 7 data bits per byte, high bit set while more bytes follow. The cursor is
//! passed in and handed back explicitly so the caller can thread it through
//! a whole volume iteration without any shared mutable state.

/// Read one varint from `buf` starting at `offset`.
///
/// Returns the decoded value and the offset just past the terminating byte.
/// Returns `None` when the buffer is exhausted (including mid-varint) or the
/// varint runs past 32 bits; callers treat that as "no more data", not as a
/// hard decode error, so schematics with truncated tails still import.
pub fn read_varint(buf: &[u8], offset: usize) -> Option<(u32, usize)> {
    let mut value: u32 = 0;
    let mut shift = 0u32;
    let mut pos = offset;

    loop {
        let &byte = buf.get(pos)?;
        pos += 1;

        if shift >= 32 {
            return None;
        }
        value |= ((byte & 0x7F) as u32) << shift;
        shift += 7;

        if byte & 0x80 == 0 {
            return Some((value, pos));
        }
    }
}

/// Append one varint to `out`.
///
/// Values are palette indices, always small; a palette of up to 128 entries
/// encodes every position in a single byte.
pub fn write_varint(out: &mut Vec<u8>, mut value: u32) {
    while value & !0x7F != 0 {
        out.push(((value & 0x7F) | 0x80) as u8);
        value >>= 7;
    }
    out.push((value & 0x7F) as u8);
}
