// Console backends - Common capability surface over the device's two slots
//
// The device carries two console backends of very different maturity: the
// fully wired session (this crate's main path) and a second slot whose core
// was never integrated. Both sit behind one trait so the outer menu can
// treat them uniformly; the inert slot answers its missing capabilities
// with explicit unsupported errors instead of silently doing nothing.

use std::path::Path;

use crate::core::EmulationCore;
use crate::hal::{AudioSink, DisplayDriver, InputPoller};
use crate::session::{ConsoleVariant, Session, SessionError};

/// Capability surface of one console backend
pub trait ConsoleBackend {
    /// Set up the backend for a variant and ROM image
    fn initialize(&mut self, variant: ConsoleVariant, rom: &[u8]) -> Result<(), SessionError>;

    /// Return the backend to its power-on state
    fn reset(&mut self) -> Result<(), SessionError>;

    /// Run one tick of emulation and A/V delivery
    fn run_tick(&mut self) -> Result<(), SessionError>;

    /// Save persisted state to a file
    fn save_state(&mut self, path: &Path) -> Result<(), SessionError>;

    /// Restore persisted state from a file
    fn load_state(&mut self, path: &Path) -> Result<(), SessionError>;

    /// Materialized copy of the current visible region in display format
    fn snapshot_video_buffer(&self) -> Result<Vec<u8>, SessionError>;

    /// Release backend resources
    fn teardown(&mut self);
}

impl<C, D, A, I> ConsoleBackend for Session<C, D, A, I>
where
    C: EmulationCore,
    D: DisplayDriver,
    A: AudioSink,
    I: InputPoller,
{
    fn initialize(&mut self, variant: ConsoleVariant, rom: &[u8]) -> Result<(), SessionError> {
        Session::initialize(self, variant, rom)
    }

    fn reset(&mut self) -> Result<(), SessionError> {
        Session::reset(self)
    }

    fn run_tick(&mut self) -> Result<(), SessionError> {
        Session::run_tick(self)
    }

    fn save_state(&mut self, path: &Path) -> Result<(), SessionError> {
        Session::save_state(self, path)
    }

    fn load_state(&mut self, path: &Path) -> Result<(), SessionError> {
        Session::load_state(self, path)
    }

    fn snapshot_video_buffer(&self) -> Result<Vec<u8>, SessionError> {
        Session::snapshot_video_buffer(self)
    }

    fn teardown(&mut self) {
        Session::teardown(self);
    }
}

/// The device's second console slot, not yet wired to a core
///
/// Ticking only polls input (the outer loop still needs quit detection) and
/// advances a counter; persisted state and video export are explicitly
/// unsupported rather than compiled-out.
pub struct NesBackend<I> {
    input: I,
    initialized: bool,
    tick_count: u64,
}

impl<I: InputPoller> NesBackend<I> {
    /// Create an uninitialized backend wrapping the input poller
    pub fn new(input: I) -> Self {
        Self {
            input,
            initialized: false,
            tick_count: 0,
        }
    }

    /// Total ticks since initialization
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl<I: InputPoller> ConsoleBackend for NesBackend<I> {
    fn initialize(&mut self, _variant: ConsoleVariant, rom: &[u8]) -> Result<(), SessionError> {
        if rom.is_empty() {
            return Err(SessionError::EmptyRom);
        }
        self.initialized = true;
        self.tick_count = 0;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), SessionError> {
        if !self.initialized {
            return Err(SessionError::NotInitialized);
        }
        self.tick_count = 0;
        Ok(())
    }

    fn run_tick(&mut self) -> Result<(), SessionError> {
        if !self.initialized {
            return Err(SessionError::NotInitialized);
        }
        let _ = self.input.poll();
        self.tick_count += 1;
        Ok(())
    }

    fn save_state(&mut self, _path: &Path) -> Result<(), SessionError> {
        Err(SessionError::Unsupported("state save on this backend"))
    }

    fn load_state(&mut self, _path: &Path) -> Result<(), SessionError> {
        Err(SessionError::Unsupported("state load on this backend"))
    }

    fn snapshot_video_buffer(&self) -> Result<Vec<u8>, SessionError> {
        Err(SessionError::Unsupported("video export on this backend"))
    }

    fn teardown(&mut self) {
        self.initialized = false;
        self.tick_count = 0;
    }
}
