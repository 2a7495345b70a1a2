//! Splitting a raw StarDict index blob into individual records.

/// A single raw index record, not yet decoded.
///
/// `key` holds the bytes before the zero delimiter; `tail` holds the fixed
/// 8-byte offset/length pair that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub key: &'a [u8],
    pub tail: [u8; 8],
}

/// Lazy, single-pass iterator over the records of an index blob.
///
/// Record shape: `<key bytes><0x00><offset:u32be><length:u32be>`, with no
/// record count — the end of the blob terminates the sequence. Records are
/// delimited non-greedily: each record ends at the first zero byte (after at
/// least one key byte) that still leaves 8 tail bytes before the next record
/// starts. Trailing bytes that cannot form a complete record are dropped.
pub struct RecordScanner<'a> {
    blob: &'a [u8],
    pos: usize,
}

impl<'a> RecordScanner<'a> {
    pub fn new(blob: &'a [u8]) -> Self {
        Self { blob, pos: 0 }
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.blob[self.pos..];

        // Shortest prefix of at least one byte ending in a zero byte that
        // leaves exactly 8 bytes of tail.
        let mut zero = None;
        for (i, &b) in rest.iter().enumerate().skip(1) {
            if b == 0 && i + 1 + 8 <= rest.len() {
                zero = Some(i);
                break;
            }
        }
        let zero = zero?;

        let key = &rest[..zero];
        let mut tail = [0u8; 8];
        tail.copy_from_slice(&rest[zero + 1..zero + 9]);
        self.pos += zero + 9;

        Some(RawRecord { key, tail })
    }
}
