//! 16-bit PCM WAV encoding.
//!
//! Click buffers use the minimal canonical layout: a 44-byte RIFF/WAVE
//! header declaring two channels followed by interleaved little-endian
//! samples, with the mono signal duplicated into both channels. No
//! timestamps or optional chunks are written, so identical signals give
//! identical bytes.

mod encoder;
mod format;
mod pcm;
mod reader;
mod writer;


// Re-export public API
pub use encoder::{PcmEncoder, MAX_ENCODED_SAMPLES};
pub use format::{WavFormat, DEFAULT_SAMPLE_RATE, HEADER_LEN};
pub use pcm::{compute_pcm_hash, dual_mono_to_pcm16, extract_pcm_data, quantize_sample};
pub use reader::{read_wav, DecodedWav};
pub use writer::{write_wav, write_wav_to_vec};
