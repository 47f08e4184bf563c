// Incremental CRC32 checksum engine
//
// Thin wrapper over crc32fast that exposes the seed-resuming form of the
// ISO-3309 CRC32, so a partially computed checksum can be continued over
// later byte spans without rehashing what came before.

use crc32fast::Hasher;

/// Combine a starting accumulator with an additional byte span.
///
/// Pass `seed = 0` for a fresh computation. Resuming satisfies the streaming
/// identity `crc32(crc32(0, a), b) == crc32(0, ab)`, which is what lets the
/// fixed-point search hash only the candidate text and the suffix per trial
/// instead of the whole file.
#[inline]
pub fn crc32(seed: u32, bytes: &[u8]) -> u32 {
    let mut hasher = Hasher::new_with_initial(seed);
    hasher.update(bytes);
    hasher.finalize()
}
