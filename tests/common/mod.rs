// Common test utilities for session integration tests
//
// Provides a deterministic scriptable emulation core and recording
// implementations of the hardware driver traits.

#![allow(dead_code)]

use frame_pump::core::{
    CartridgeError, CoreConfig, EmulationCore, StereoSample, WorkingMemory, PALETTE_SIZE,
};
use frame_pump::display::FrameBuffer;
use frame_pump::hal::{AudioSink, DisplayDriver, InputPoller, InputSnapshot};
use std::io::{Read, Write};

/// Largest ROM the mock core accepts
pub const MOCK_CARTRIDGE_SPACE: usize = 0x80000;

/// Deterministic emulation core
///
/// Renders a pattern derived from its frame counter, reports a fixed-length
/// audio batch derived from the same counter, and persists exactly that
/// counter, so saved state restores bit-exact subsequent frames.
pub struct MockCore {
    pub config: Option<CoreConfig>,
    pub rom: Vec<u8>,
    pub frame_counter: u64,
    /// Skip-render flag of every step, in order
    pub steps: Vec<bool>,
    /// Input snapshot of every tick, in order
    pub inputs: Vec<InputSnapshot>,
    batch: Vec<StereoSample>,
    batch_len: usize,
}

impl MockCore {
    pub fn new() -> Self {
        Self::with_batch_len(8)
    }

    /// Core reporting `batch_len` samples per tick
    pub fn with_batch_len(batch_len: usize) -> Self {
        Self {
            config: None,
            rom: Vec::new(),
            frame_counter: 0,
            steps: Vec::new(),
            inputs: Vec::new(),
            batch: Vec::new(),
            batch_len,
        }
    }

    /// The palette index this core draws at (x, y) for a given frame count
    pub fn pattern(frame_counter: u64, x: usize, y: usize) -> u8 {
        ((x + y * 3 + frame_counter as usize) % PALETTE_SIZE) as u8
    }

    /// The native palette entry this core reports at `index`
    pub fn palette_entry(index: usize) -> u16 {
        0x1000u16.wrapping_add(index as u16 * 0x0123)
    }

    fn refresh_audio_batch(&mut self) {
        self.batch.clear();
        for i in 0..self.batch_len {
            let value = (self.frame_counter as i16).wrapping_mul(37).wrapping_add(i as i16 + 1);
            self.batch.push(StereoSample::new(value, -value));
        }
    }
}

impl EmulationCore for MockCore {
    fn configure(&mut self, config: &CoreConfig) {
        self.config = Some(*config);
    }

    fn load_cartridge(&mut self, rom: &[u8]) -> Result<(), CartridgeError> {
        if rom.len() > MOCK_CARTRIDGE_SPACE {
            return Err(CartridgeError::TooLarge {
                size: rom.len(),
                max: MOCK_CARTRIDGE_SPACE,
            });
        }
        self.rom = rom.to_vec();
        Ok(())
    }

    fn cold_reset(&mut self) {
        self.frame_counter = 0;
        self.batch.clear();
    }

    fn set_input(&mut self, input: &InputSnapshot) {
        self.inputs.push(*input);
    }

    fn step_frame(&mut self, _memory: &mut WorkingMemory, render_target: Option<&mut FrameBuffer>) {
        self.frame_counter += 1;
        self.steps.push(render_target.is_none());

        if let Some(target) = render_target {
            for y in 0..target.height() {
                for x in 0..target.width() {
                    target.set_pixel(x, y, Self::pattern(self.frame_counter, x, y));
                }
            }
        }

        self.refresh_audio_batch();
    }

    fn copy_palette(&self, out: &mut [u16; PALETTE_SIZE]) {
        for (i, entry) in out.iter_mut().enumerate() {
            *entry = Self::palette_entry(i);
        }
    }

    fn audio_batch(&self) -> &[StereoSample] {
        &self.batch
    }

    fn serialize_state(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writer.write_all(&self.frame_counter.to_le_bytes())
    }

    fn deserialize_state(&mut self, reader: &mut dyn Read) -> std::io::Result<()> {
        let mut bytes = [0u8; 8];
        reader.read_exact(&mut bytes)?;
        self.frame_counter = u64::from_le_bytes(bytes);
        self.refresh_audio_batch();
        Ok(())
    }
}

/// Display driver that records everything pushed to it
#[derive(Default)]
pub struct RecordingDisplay {
    pub geometry: Option<(usize, usize, usize)>,
    pub color_tables: Vec<Vec<u16>>,
    pub frames: Vec<Vec<u8>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayDriver for RecordingDisplay {
    fn set_native_geometry(&mut self, width: usize, height: usize, pitch: usize) {
        self.geometry = Some((width, height, pitch));
    }

    fn set_color_table(&mut self, entries: &[u16]) {
        self.color_tables.push(entries.to_vec());
    }

    fn push_frame(&mut self, pixels: &[u8]) {
        self.frames.push(pixels.to_vec());
    }
}

/// Audio sink that records announced counts and pushed batches
#[derive(Default)]
pub struct RecordingSink {
    pub counts: Vec<usize>,
    pub batches: Vec<Vec<u32>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether every pushed sample so far is silence
    pub fn all_silent(&self) -> bool {
        self.batches.iter().flatten().all(|&s| s == 0)
    }
}

impl AudioSink for RecordingSink {
    fn set_sample_count(&mut self, count: usize) {
        self.counts.push(count);
    }

    fn push_samples(&mut self, samples: &[u32]) {
        self.batches.push(samples.to_vec());
    }
}

/// Input poller replaying a fixed script, then releasing all controls
pub struct ScriptedInput {
    script: Vec<InputSnapshot>,
    position: usize,
    pub polls: usize,
}

impl ScriptedInput {
    pub fn new(script: Vec<InputSnapshot>) -> Self {
        Self {
            script,
            position: 0,
            polls: 0,
        }
    }

    pub fn idle() -> Self {
        Self::new(Vec::new())
    }
}

impl InputPoller for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        self.polls += 1;
        let snapshot = self
            .script
            .get(self.position)
            .copied()
            .unwrap_or_default();
        self.position += 1;
        snapshot
    }
}
