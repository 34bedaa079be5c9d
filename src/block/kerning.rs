/// Size of a single kerning pair (first: u32, second: u32, amount: i16)
const KERNING_PAIR_SIZE: usize = 4 + 4 + 2;

/// Kerning pairs are recognized but not decoded into any structure
pub fn decode_kerning(payload: &[u8]) {
    log::info!(
        "ignoring kerning block ({} pairs)",
        payload.len() / KERNING_PAIR_SIZE
    );
}
