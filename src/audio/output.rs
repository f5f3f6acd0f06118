// Audio output - Reference AudioSink backed by cpal
//
// Hosts without a platform audio driver can route the frame pump's packed
// samples through this sink. It unpacks each stereo pair, converts to f32
// and feeds a ring buffer drained by the cpal output callback.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::sync::{Arc, Mutex};

use crate::hal::AudioSink;

/// Ring buffer shared between the sink and the cpal callback
struct SampleRing {
    buffer: Vec<f32>,
    read_pos: usize,
    write_pos: usize,
    len: usize,
}

impl SampleRing {
    fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(1)],
            read_pos: 0,
            write_pos: 0,
            len: 0,
        }
    }

    /// Push a sample; returns false (dropping it) when the ring is full
    fn push(&mut self, sample: f32) -> bool {
        if self.len == self.buffer.len() {
            return false;
        }
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        self.len += 1;
        true
    }

    fn pop(&mut self) -> Option<f32> {
        if self.len == 0 {
            return None;
        }
        let sample = self.buffer[self.read_pos];
        self.read_pos = (self.read_pos + 1) % self.buffer.len();
        self.len -= 1;
        Some(sample)
    }
}

/// Audio sink backed by a cpal output stream
///
/// Stereo f32 output; packed u32 input samples are split into their left and
/// right channels and scaled to [-1.0, 1.0]. Submission never blocks: when
/// the ring is full, excess samples are dropped.
pub struct CpalAudioSink {
    /// Audio device (kept alive for the stream's lifetime)
    _device: Device,

    /// Output stream
    stream: Stream,

    /// Shared sample ring
    ring: Arc<Mutex<SampleRing>>,

    /// Sample count announced for the next push
    expected_count: usize,
}

impl CpalAudioSink {
    /// Create a sink on the default output device
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Output sample rate in Hz
    /// * `buffer_duration_ms` - Ring capacity in milliseconds of audio
    pub fn new(sample_rate: u32, buffer_duration_ms: u32) -> Result<Self, String> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or("No output device available")?;

        println!("Audio device: {}", device.name().unwrap_or_default());

        let stream_config = StreamConfig {
            channels: 2,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        // Ring holds interleaved L/R samples, so twice the per-channel count
        let capacity =
            ((buffer_duration_ms as f64 / 1000.0) * sample_rate as f64) as usize * 2;
        let ring = Arc::new(Mutex::new(SampleRing::new(capacity)));

        let ring_clone = Arc::clone(&ring);
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut ring = ring_clone.lock().unwrap();
                    for sample in data.iter_mut() {
                        *sample = ring.pop().unwrap_or(0.0);
                    }
                },
                move |err| {
                    eprintln!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| format!("Failed to build audio stream: {}", e))?;

        stream
            .play()
            .map_err(|e| format!("Failed to start audio stream: {}", e))?;

        println!("Audio output initialized: {} Hz, 2 channels", sample_rate);

        Ok(Self {
            _device: device,
            stream,
            ring,
            expected_count: 0,
        })
    }

    /// Pause audio playback
    pub fn pause(&self) -> Result<(), String> {
        self.stream
            .pause()
            .map_err(|e| format!("Failed to pause audio: {}", e))
    }

    /// Resume audio playback
    pub fn resume(&self) -> Result<(), String> {
        self.stream
            .play()
            .map_err(|e| format!("Failed to resume audio: {}", e))
    }
}

impl AudioSink for CpalAudioSink {
    fn set_sample_count(&mut self, count: usize) {
        self.expected_count = count;
    }

    fn push_samples(&mut self, samples: &[u32]) {
        let count = samples.len().min(self.expected_count);
        let mut ring = self.ring.lock().unwrap();

        for &packed in &samples[..count] {
            let left = (packed >> 16) as u16 as i16;
            let right = packed as u16 as i16;
            ring.push(left as f32 / 32768.0);
            ring.push(right as f32 / 32768.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_push_pop() {
        let mut ring = SampleRing::new(4);
        assert!(ring.push(0.5));
        assert!(ring.push(-0.5));
        assert_eq!(ring.pop(), Some(0.5));
        assert_eq!(ring.pop(), Some(-0.5));
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_ring_drops_when_full() {
        let mut ring = SampleRing::new(2);
        assert!(ring.push(0.1));
        assert!(ring.push(0.2));
        assert!(!ring.push(0.3));
        assert_eq!(ring.pop(), Some(0.1));
        assert!(ring.push(0.3));
    }

    #[test]
    fn test_ring_wraps_around() {
        let mut ring = SampleRing::new(2);
        for i in 0..10 {
            assert!(ring.push(i as f32));
            assert_eq!(ring.pop(), Some(i as f32));
        }
    }

    // Note: Cannot test the cpal stream itself in unit tests as it requires
    // audio hardware.
}
