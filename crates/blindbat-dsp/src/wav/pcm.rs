//! Sample quantization, PCM extraction and hashing.

/// Scales `sample` by `gain` and saturates it to the signed 16-bit range.
///
/// The fractional part is truncated toward zero. NaN maps to 0.
#[inline]
pub fn quantize_sample(sample: f32, gain: f32) -> i16 {
    let scaled = sample * gain;
    if scaled.is_nan() {
        0
    } else {
        scaled.clamp(i16::MIN as f32, i16::MAX as f32) as i16
    }
}

/// Converts mono samples to interleaved 16-bit stereo PCM bytes with the
/// same value in both channels.
///
/// # Arguments
/// * `samples` - Mono samples
/// * `gain` - Linear gain applied before quantization
pub fn dual_mono_to_pcm16(samples: &[f32], gain: f32) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 4); // 2 channels * 2 bytes per sample

    for &sample in samples {
        let bytes = quantize_sample(sample, gain).to_le_bytes();
        pcm.extend_from_slice(&bytes); // left
        pcm.extend_from_slice(&bytes); // right
    }

    pcm
}

/// Extracts PCM data from a WAV file buffer.
///
/// Used for comparing WAV files by their audio content only.
///
/// # Returns
/// PCM data if found, or None if the format is invalid
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < 12 {
        return None;
    }

    // Verify RIFF header
    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    // Find data chunk
    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        if chunk_id == b"data" {
            let data_start = pos + 8;
            let data_end = data_start.checked_add(chunk_size)?;
            if data_end <= wav_data.len() {
                return Some(&wav_data[data_start..data_end]);
            }
            return None;
        }

        pos = pos.checked_add(8 + chunk_size)?;
        // Align to word boundary
        if chunk_size % 2 != 0 {
            pos += 1;
        }
    }

    None
}

/// Computes the BLAKE3 hash of a WAV file's PCM data.
///
/// # Returns
/// Hex digest of the data chunk, or None if the format is invalid
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
