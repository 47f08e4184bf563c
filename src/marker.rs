// Placeholder marker location and output splicing
//
// The input file reserves a span for the checksum by carrying a literal
// marker. The search replaces that span with the 8-character lowercase hex
// rendering of the winning value; when the marker is longer than 8 bytes the
// output shrinks accordingly, everything outside the span is untouched.

/// Literal byte pattern reserving the checksum span in the input file.
pub const MARKER: &[u8] = b"CRC32_HASH_MARK";

/// Hex rendering width of a 32-bit value.
pub const HEX_LEN: usize = 8;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Find the offset of the first marker occurrence, if any.
pub fn find(content: &[u8]) -> Option<usize> {
    content.windows(MARKER.len()).position(|w| w == MARKER)
}

/// Render a value as 8 zero-padded lowercase hex characters into `out`.
///
/// Allocation-free so the search loop can reuse one stack buffer per trial;
/// agrees with `hex::encode` of the big-endian bytes.
#[inline]
pub fn render_hex(value: u32, out: &mut [u8; HEX_LEN]) {
    for (i, slot) in out.iter_mut().rev().enumerate() {
        *slot = HEX_DIGITS[((value >> (4 * i)) & 0xF) as usize];
    }
}

/// Build the output buffer: `content` with the marker span at `pos`
/// (of length `marker_len`) replaced by `replacement`.
pub fn splice(content: &[u8], pos: usize, marker_len: usize, replacement: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len() - marker_len + replacement.len());
    out.extend_from_slice(&content[..pos]);
    out.extend_from_slice(replacement);
    out.extend_from_slice(&content[pos + marker_len..]);
    out
}
