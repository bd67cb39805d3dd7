use super::types::C0_OFFSET;

/// HPSDR Protocol 1 reference clock, used to convert a 32-bit tuning
/// word into a frequency in Hz.
const REFERENCE_CLOCK_HZ: f64 = 122.88e6;

/// Extracts the tuning frequency from a data frame's control bytes.
///
/// Control bytes C1-C4 (the 4 bytes following C0) hold a big-endian
/// tuning word; `Hz = word * 122.88MHz / 2^32`. Returns `None` if the
/// frame is too short to contain a full C0-C4 run.
pub fn extract_frequency_hz(data: &[u8]) -> Option<u32> {
    let c1 = C0_OFFSET + 1;
    if data.len() < c1 + 4 {
        return None;
    }
    let freq_word = u32::from_be_bytes([data[c1], data[c1 + 1], data[c1 + 2], data[c1 + 3]]);
    let hz = (freq_word as f64) * REFERENCE_CLOCK_HZ / (u32::MAX as f64 + 1.0);
    Some(hz.round() as u32)
}
