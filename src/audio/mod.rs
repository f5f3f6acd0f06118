// Audio module - Sample packing and delivery
//
// Every tick, render or skip, the core's stereo batch gets packed into the
// sink's format. A startup mute ramp forces the first two seconds of ticks
// silent to suppress the audible pop the core produces while powering up.

#[cfg(feature = "audio")]
pub mod output;

#[cfg(feature = "audio")]
pub use output::CpalAudioSink;

use crate::core::StereoSample;
use crate::pacer::TICK_RATE;

/// Number of initial ticks whose audio output is forced silent
///
/// Two seconds at the target tick rate.
pub const MUTE_RAMP_TICKS: u32 = TICK_RATE * 2;

/// Packs the core's per-tick sample batch for the audio sink
///
/// Owns a reused output buffer and the mute ramp counter. The counter
/// advances once per tick until it reaches its threshold, after which it is
/// inert until the session is re-initialized or reset.
pub struct AudioPipeline {
    /// Packed output, reused across ticks
    packed: Vec<u32>,

    /// Ticks muted so far; stops advancing at `MUTE_RAMP_TICKS`
    mute_ticks: u32,
}

impl AudioPipeline {
    /// Create a pipeline with the mute ramp armed
    pub fn new() -> Self {
        Self {
            packed: Vec::new(),
            mute_ticks: 0,
        }
    }

    /// Pack one tick's batch into the sink format
    ///
    /// While the mute ramp is active the whole batch comes out silent and
    /// the counter advances by one tick. Afterwards each pair is packed
    /// verbatim: left channel in the high 16 bits, right in the low 16.
    pub fn pack(&mut self, batch: &[StereoSample]) -> &[u32] {
        self.packed.clear();

        if self.mute_ticks < MUTE_RAMP_TICKS {
            self.mute_ticks += 1;
            self.packed.resize(batch.len(), 0);
        } else {
            self.packed.extend(batch.iter().map(|s| s.packed()));
        }

        &self.packed
    }

    /// Number of samples to submit for a batch of `batch_len` samples
    ///
    /// The last sample of each core-reported batch is dropped to avoid an
    /// off-by-one overrun in the core's count.
    #[inline]
    pub fn submit_count(batch_len: usize) -> usize {
        batch_len.saturating_sub(1)
    }

    /// Whether the mute ramp is still forcing silence
    pub fn is_muted(&self) -> bool {
        self.mute_ticks < MUTE_RAMP_TICKS
    }

    /// Re-arm the mute ramp
    ///
    /// Called on session initialize and reset.
    pub fn reset(&mut self) {
        self.mute_ticks = 0;
    }
}

impl Default for AudioPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(len: usize) -> Vec<StereoSample> {
        (0..len)
            .map(|i| StereoSample::new(i as i16 + 1, -(i as i16) - 1))
            .collect()
    }

    #[test]
    fn test_mute_ramp_silences_initial_ticks() {
        let mut pipeline = AudioPipeline::new();
        let samples = batch(4);

        for _ in 0..MUTE_RAMP_TICKS {
            let packed = pipeline.pack(&samples);
            assert!(packed.iter().all(|&s| s == 0));
        }
        assert!(!pipeline.is_muted());
    }

    #[test]
    fn test_samples_pass_verbatim_after_ramp() {
        let mut pipeline = AudioPipeline::new();
        let samples = batch(3);

        for _ in 0..MUTE_RAMP_TICKS {
            pipeline.pack(&samples);
        }

        let packed = pipeline.pack(&samples);
        let expected: Vec<u32> = samples.iter().map(|s| s.packed()).collect();
        assert_eq!(packed, expected.as_slice());
    }

    #[test]
    fn test_reset_rearms_the_ramp() {
        let mut pipeline = AudioPipeline::new();
        let samples = batch(2);
        for _ in 0..MUTE_RAMP_TICKS {
            pipeline.pack(&samples);
        }
        assert!(!pipeline.is_muted());

        pipeline.reset();
        assert!(pipeline.is_muted());
        assert!(pipeline.pack(&samples).iter().all(|&s| s == 0));
    }

    #[test]
    fn test_muted_output_length_matches_batch() {
        let mut pipeline = AudioPipeline::new();
        assert_eq!(pipeline.pack(&batch(7)).len(), 7);
    }

    #[test]
    fn test_submit_count_drops_last_sample() {
        assert_eq!(AudioPipeline::submit_count(735), 734);
        assert_eq!(AudioPipeline::submit_count(1), 0);
        assert_eq!(AudioPipeline::submit_count(0), 0);
    }
}
