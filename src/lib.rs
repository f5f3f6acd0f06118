// Frame Pump / AV Synchronization Engine
// Per-frame orchestration layer for a handheld console emulation device

// Public modules
pub mod audio;
pub mod backend;
pub mod core;
pub mod display;
pub mod hal;
pub mod pacer;
pub mod session;

// Re-export main types for convenience
pub use audio::{AudioPipeline, MUTE_RAMP_TICKS};
#[cfg(feature = "audio")]
pub use audio::CpalAudioSink;
pub use backend::{ConsoleBackend, NesBackend};
pub use crate::core::{
    CartridgeError, CoreConfig, DisplayTiming, EmulationCore, StereoSample, Territory,
    WorkingMemory, PALETTE_SIZE,
};
pub use display::{FrameBuffer, PaletteTranslator, VideoPipeline};
pub use hal::{AudioSink, DisplayDriver, InputPoller, InputSnapshot, TouchState};
pub use pacer::{FramePacer, FrameStats, TickKind, TICK_RATE};
pub use session::{
    save_screenshot, ConsoleVariant, ScreenshotError, Session, SessionError, SessionState,
};
