// Emulation core boundary - Contract with the external console core
//
// The console core (CPU, video chip, sound chip, cartridge mapping) lives
// outside this crate. This module defines the trait the frame pump drives it
// through, plus the working memory the session allocates on the core's
// behalf and the configuration handed over at session initialization.

use std::io::{Read, Write};

use crate::display::FrameBuffer;
use crate::hal::InputSnapshot;

/// Number of entries in the core's color table
pub const PALETTE_SIZE: usize = 32;

/// Cartridge RAM size in bytes (battery-backed save RAM)
pub const CARTRIDGE_RAM_SIZE: usize = 0x8000;

/// System work RAM size in bytes
pub const SYSTEM_RAM_SIZE: usize = 0x2000;

/// Video RAM size in bytes
pub const VIDEO_RAM_SIZE: usize = 0x4000;

/// One stereo sample pair as reported by the core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StereoSample {
    /// Left channel value
    pub left: i16,

    /// Right channel value
    pub right: i16,
}

impl StereoSample {
    /// Create a new stereo sample pair
    pub fn new(left: i16, right: i16) -> Self {
        Self { left, right }
    }

    /// Pack the pair into the sink's expected format:
    /// left channel in the high 16 bits, right channel in the low 16 bits
    #[inline]
    pub fn packed(self) -> u32 {
        ((self.left as u16 as u32) << 16) | (self.right as u16 as u32)
    }
}

/// Territory configuration for the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Territory {
    /// Domestic (Japanese) region
    Domestic,

    /// Export (overseas) region
    Export,
}

/// Display timing configuration for the core
///
/// Affects the core's internal step count per frame. The frame pump always
/// paces at 60 logical ticks per second regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTiming {
    /// 60 Hz timing
    Ntsc,

    /// 50 Hz timing
    Pal,
}

/// Configuration handed to the core at session initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreConfig {
    /// Native render width in pixels
    pub width: usize,

    /// Native render height in pixels
    pub height: usize,

    /// Row pitch of the render buffer in bytes
    pub pitch: usize,

    /// Territory setting
    pub territory: Territory,

    /// Display timing setting
    pub timing: DisplayTiming,

    /// Audio sample rate in Hz
    pub sample_rate: u32,
}

/// Working memory allocated by the session and used by the core
///
/// Allocated once per session on the first `initialize` and reused across
/// resets; released only by `teardown`.
pub struct WorkingMemory {
    /// Cartridge RAM (battery-backed save RAM)
    pub cartridge_ram: Vec<u8>,

    /// System work RAM
    pub system_ram: Vec<u8>,

    /// Video RAM
    pub video_ram: Vec<u8>,
}

impl WorkingMemory {
    /// Allocate all working memory buffers, zero-filled
    pub fn allocate() -> Self {
        Self {
            cartridge_ram: vec![0; CARTRIDGE_RAM_SIZE],
            system_ram: vec![0; SYSTEM_RAM_SIZE],
            video_ram: vec![0; VIDEO_RAM_SIZE],
        }
    }
}

/// Errors reported by the core when loading a cartridge
#[derive(Debug)]
pub enum CartridgeError {
    /// ROM image exceeds the core's addressable cartridge space
    TooLarge { size: usize, max: usize },

    /// ROM image rejected by the core for another reason
    Rejected(String),
}

impl std::fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartridgeError::TooLarge { size, max } => {
                write!(f, "ROM image of {} bytes exceeds cartridge space of {} bytes", size, max)
            }
            CartridgeError::Rejected(reason) => write!(f, "ROM image rejected: {}", reason),
        }
    }
}

impl std::error::Error for CartridgeError {}

/// Contract with the external emulation core
///
/// One implementation exists per supported console family. The core is
/// opaque beyond this surface: the frame pump never inspects its internal
/// state, only steps it and collects its per-tick output.
pub trait EmulationCore {
    /// Configure geometry, territory, timing and audio rate.
    ///
    /// Called once per `initialize`, before the cartridge is loaded.
    fn configure(&mut self, config: &CoreConfig);

    /// Load a cartridge image.
    ///
    /// The core surfaces its own size limit; the session rejects empty
    /// images before this is reached.
    fn load_cartridge(&mut self, rom: &[u8]) -> Result<(), CartridgeError>;

    /// Return the core to its power-on state without touching working memory
    fn cold_reset(&mut self);

    /// Hand the current input snapshot to the core
    fn set_input(&mut self, input: &InputSnapshot);

    /// Advance the core by one frame.
    ///
    /// On a render tick the session passes the active frame buffer and the
    /// core draws palette indices into it; on a skip tick `render_target` is
    /// `None` and the core advances time without rendering.
    fn step_frame(&mut self, memory: &mut WorkingMemory, render_target: Option<&mut FrameBuffer>);

    /// Copy the core's native-order color table into `out`
    fn copy_palette(&self, out: &mut [u16; PALETTE_SIZE]);

    /// The stereo sample batch produced by the most recent `step_frame`
    fn audio_batch(&self) -> &[StereoSample];

    /// Serialize the core's persisted state into `writer`.
    ///
    /// The blob format is defined entirely by the core.
    fn serialize_state(&self, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Restore the core's persisted state from `reader`
    fn deserialize_state(&mut self, reader: &mut dyn Read) -> std::io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereo_sample_packing() {
        let sample = StereoSample::new(0x1234, 0x5678);
        assert_eq!(sample.packed(), 0x1234_5678);
    }

    #[test]
    fn test_stereo_sample_packing_negative() {
        // Negative channel values pack as their two's-complement bit patterns
        let sample = StereoSample::new(-1, 1);
        assert_eq!(sample.packed(), 0xFFFF_0001);
    }

    #[test]
    fn test_working_memory_sizes() {
        let memory = WorkingMemory::allocate();
        assert_eq!(memory.cartridge_ram.len(), CARTRIDGE_RAM_SIZE);
        assert_eq!(memory.system_ram.len(), SYSTEM_RAM_SIZE);
        assert_eq!(memory.video_ram.len(), VIDEO_RAM_SIZE);
    }

    #[test]
    fn test_cartridge_error_display() {
        let err = CartridgeError::TooLarge { size: 0x100000, max: 0x80000 };
        let message = err.to_string();
        assert!(message.contains("1048576"));
        assert!(message.contains("524288"));
    }
}
