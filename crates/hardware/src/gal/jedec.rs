//! JEDEC fuse-listing parser.
//!
//! Line-oriented reconstruction of a flat fuse array from the `*L` records
//! of a JEDEC transfer file:
//!
//! ```text
//! *L0044 11111111111111111111111111111111111111111111
//! ```
//!
//! Each record names a decimal fuse offset followed by a run of `0`/`1`
//! characters (whitespace inside the run is ignored). Header metadata,
//! device and checksum fields, and the STX/ETX framing are irrelevant to
//! the logical fuse state and are skipped. Unspecified fuses default to
//! intact, matching the `*F0` convention. Parsing fails fast on a
//! malformed record rather than hand back a partially initialized map.

use crate::common::error::JedecError;

/// Parses the `*L` records of a JEDEC listing into a fuse array.
///
/// # Arguments
///
/// * `listing`  - The listing text.
/// * `capacity` - Total fuse count of the target device.
///
/// # Errors
///
/// See [`JedecError`]; any malformed `*L` record aborts the parse.
pub fn parse(listing: &str, capacity: usize) -> Result<Vec<bool>, JedecError> {
    let mut fuses = vec![false; capacity];
    let mut seen_record = false;

    for (idx, raw) in listing.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        let Some(body) = text.strip_prefix("*L") else {
            continue;
        };
        let body = body.trim_end_matches('*');

        let digits: &str = {
            let end = body
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map_or(body.len(), |(i, _)| i);
            &body[..end]
        };
        let offset: usize = digits
            .parse()
            .map_err(|_| JedecError::BadOffset { line })?;

        let mut bits = Vec::new();
        for ch in body[digits.len()..].chars() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                c if c.is_whitespace() => {}
                c => return Err(JedecError::BadFuseChar { line, found: c }),
            }
        }

        let end = offset + bits.len();
        if end > capacity {
            return Err(JedecError::FuseOutOfRange {
                line,
                end,
                capacity,
            });
        }
        fuses[offset..end].copy_from_slice(&bits);
        seen_record = true;
    }

    if seen_record {
        Ok(fuses)
    } else {
        Err(JedecError::Empty)
    }
}
