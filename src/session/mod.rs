// Session module - Console session lifecycle and the per-tick entry point
//
// One session owns one emulation run: working memory, both frame buffers,
// the palette arrays and the pacing state. It composes the palette
// translator, video pipeline, audio pipeline and frame pacer into the
// single `run_tick` entry point the outer application loop drives.

mod screenshot;
mod variant;

pub use screenshot::{save_screenshot, ScreenshotError};
pub use variant::{ConsoleVariant, AUDIO_SAMPLE_RATE};

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::audio::AudioPipeline;
use crate::core::{CartridgeError, EmulationCore, WorkingMemory};
use crate::display::{PaletteTranslator, VideoPipeline};
use crate::hal::{AudioSink, DisplayDriver, InputPoller};
use crate::pacer::{FramePacer, FrameStats, TickKind};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No working memory allocated, no core configured
    Uninitialized,

    /// Memory allocated, core configured and reset; ready to tick
    Initialized,

    /// At least one tick has run since the last initialize/reset
    Running,

    /// Stopped by the caller; ticking refused until reset or re-initialize
    Stopped,
}

/// Errors surfaced by session operations
#[derive(Debug)]
pub enum SessionError {
    /// I/O error on state save/load
    Io(io::Error),

    /// Empty ROM image rejected before any allocation or core interaction
    EmptyRom,

    /// Cartridge rejected by the core
    Cartridge(CartridgeError),

    /// Operation requires an initialized session
    NotInitialized,

    /// Tick requested on a stopped session
    SessionStopped,

    /// Operation not supported by this backend
    Unsupported(&'static str),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Io(e) => write!(f, "I/O error: {}", e),
            SessionError::EmptyRom => write!(f, "ROM image is empty"),
            SessionError::Cartridge(e) => write!(f, "Cartridge error: {}", e),
            SessionError::NotInitialized => write!(f, "Session is not initialized"),
            SessionError::SessionStopped => write!(f, "Session has been stopped"),
            SessionError::Unsupported(what) => write!(f, "Unsupported operation: {}", what),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::Io(e)
    }
}

impl From<CartridgeError> for SessionError {
    fn from(e: CartridgeError) -> Self {
        SessionError::Cartridge(e)
    }
}

/// Console session controller
///
/// Generic over the four external collaborators: the emulation core, the
/// display driver, the audio sink and the input poller. Single logical
/// thread of control; one tick is fully synchronous.
pub struct Session<C, D, A, I> {
    /// Emulation core
    core: C,

    /// Display panel driver
    display: D,

    /// Audio sink driver
    audio_sink: A,

    /// Button/touch poller
    input: I,

    /// Lifecycle state
    state: SessionState,

    /// Variant selected at initialization
    variant: Option<ConsoleVariant>,

    /// Working memory, allocated once per session and reused across resets
    memory: Option<WorkingMemory>,

    /// Double-buffered video delivery
    video: VideoPipeline,

    /// Per-tick palette translation
    palette: PaletteTranslator,

    /// Per-tick audio packing and mute ramp
    audio: AudioPipeline,

    /// Real-time cadence and telemetry
    pacer: FramePacer,

    /// Total ticks since the last initialize/reset
    tick_count: u64,
}

impl<C, D, A, I> Session<C, D, A, I>
where
    C: EmulationCore,
    D: DisplayDriver,
    A: AudioSink,
    I: InputPoller,
{
    /// Create an uninitialized session wrapping the four collaborators
    pub fn new(core: C, display: D, audio_sink: A, input: I) -> Self {
        Self {
            core,
            display,
            audio_sink,
            input,
            state: SessionState::Uninitialized,
            variant: None,
            memory: None,
            video: VideoPipeline::new(),
            palette: PaletteTranslator::new(),
            audio: AudioPipeline::new(),
            pacer: FramePacer::new(),
            tick_count: 0,
        }
    }

    /// Initialize the session for one console variant and ROM image
    ///
    /// Rejects an empty ROM before touching memory or the core. Working
    /// memory is allocated on the first call only; repeated initialization
    /// reuses it. Configures the core and display geometry, loads the
    /// cartridge, performs a cold reset and zeroes the tick and mute
    /// counters.
    pub fn initialize(&mut self, variant: ConsoleVariant, rom: &[u8]) -> Result<(), SessionError> {
        if rom.is_empty() {
            return Err(SessionError::EmptyRom);
        }

        if self.memory.is_none() {
            self.memory = Some(WorkingMemory::allocate());
        }

        self.variant = Some(variant);
        self.display.set_native_geometry(
            variant.visible_width(),
            variant.visible_height(),
            self.video.render_target().pitch(),
        );

        self.core.configure(&variant.core_config());
        self.core.load_cartridge(rom)?;
        self.core.cold_reset();

        self.video.reset();
        self.audio.reset();
        self.pacer.reset_stats();
        self.tick_count = 0;
        self.state = SessionState::Initialized;

        match variant {
            ConsoleVariant::Standard => println!("standard console init done"),
            ConsoleVariant::Compact => println!("compact console init done"),
        }

        Ok(())
    }

    /// Cold-reset the core and zero the tick and mute counters
    ///
    /// Never reallocates memory. Allowed any time after initialize,
    /// including from the stopped state.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Uninitialized {
            return Err(SessionError::NotInitialized);
        }

        self.core.cold_reset();
        self.audio.reset();
        self.pacer.reset_stats();
        self.tick_count = 0;
        self.state = SessionState::Initialized;

        Ok(())
    }

    /// Run one tick: input, core step, A/V delivery, pacing
    ///
    /// Render ticks (even counts) do full video pipeline work; skip ticks
    /// (odd counts) advance the core without a display push. Both produce
    /// audio. Blocks until the tick's 1/60 s budget has elapsed.
    pub fn run_tick(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Uninitialized => return Err(SessionError::NotInitialized),
            SessionState::Stopped => return Err(SessionError::SessionStopped),
            SessionState::Initialized | SessionState::Running => {}
        }
        self.state = SessionState::Running;

        let start = self.pacer.begin();

        let snapshot = self.input.poll();
        self.core.set_input(&snapshot);

        let variant = self.variant.ok_or(SessionError::NotInitialized)?;
        let memory = self.memory.as_mut().ok_or(SessionError::NotInitialized)?;

        match TickKind::of(self.tick_count) {
            TickKind::Render => {
                self.video.render_target_mut().clear();
                self.core.step_frame(memory, Some(self.video.render_target_mut()));

                self.core.copy_palette(self.palette.native_mut());
                self.palette.translate();
                self.display.set_color_table(self.palette.display_order());

                self.display
                    .push_frame(self.video.render_target().from_offset(variant.crop_offset()));
                self.video.swap();
            }
            TickKind::Skip => {
                self.core.step_frame(memory, None);
            }
        }

        self.tick_count += 1;

        // Audio runs on every tick kind
        let packed = self.audio.pack(self.core.audio_batch());
        let submitted = AudioPipeline::submit_count(packed.len());
        self.audio_sink.set_sample_count(submitted);
        self.audio_sink.push_samples(&packed[..submitted]);

        self.pacer.finish(start);

        Ok(())
    }

    /// Save the core's persisted state to a file
    ///
    /// An empty path is a logged no-op skip. The core's serializer is only
    /// invoked once the file handle is valid.
    pub fn save_state<P: AsRef<Path>>(&self, path: P) -> Result<(), SessionError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            println!("state save skipped: no path given");
            return Ok(());
        }
        if self.state == SessionState::Uninitialized {
            return Err(SessionError::NotInitialized);
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.core.serialize_state(&mut writer)?;
        writer.flush()?;

        Ok(())
    }

    /// Restore the core's persisted state from a file
    ///
    /// An empty path is a logged no-op skip.
    pub fn load_state<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SessionError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            println!("state load skipped: no path given");
            return Ok(());
        }
        if self.state == SessionState::Uninitialized {
            return Err(SessionError::NotInitialized);
        }

        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.core.deserialize_state(&mut reader)?;

        Ok(())
    }

    /// Materialized copy of the current visible region in display format
    ///
    /// 2 bytes per pixel (packed display-order color, low byte first),
    /// row-major, visible width × height with no padding. Sourced from the
    /// most recently pushed frame, independent of the live push pipeline.
    pub fn snapshot_video_buffer(&self) -> Result<Vec<u8>, SessionError> {
        let variant = match (self.state, self.variant) {
            (SessionState::Uninitialized, _) | (_, None) => {
                return Err(SessionError::NotInitialized)
            }
            (_, Some(variant)) => variant,
        };

        let width = variant.visible_width();
        let height = variant.visible_height();
        let source = self.video.display_source();
        let pitch = source.pitch();
        let visible = source.from_offset(variant.crop_offset());

        let mut frame = Vec::with_capacity(width * height * 2);
        for y in 0..height {
            for x in 0..width {
                let index = visible[y * pitch + x];
                let color = self.palette.display_entry(index);
                frame.push((color & 0xFF) as u8);
                frame.push((color >> 8) as u8);
            }
        }

        Ok(frame)
    }

    /// Save a timestamped PNG screenshot of the current visible region
    ///
    /// # Returns
    ///
    /// Result containing the path to the saved screenshot or an error
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        let variant = self.variant.ok_or(ScreenshotError::NoFrame)?;
        let frame = self
            .snapshot_video_buffer()
            .map_err(|_| ScreenshotError::NoFrame)?;

        save_screenshot(
            &frame,
            variant.visible_width(),
            variant.visible_height(),
            None,
        )
    }

    /// Mark the session stopped
    ///
    /// Only observed between ticks; a tick already inside its pacing sleep
    /// completes normally.
    pub fn stop(&mut self) {
        self.state = SessionState::Stopped;
    }

    /// Whether the session will accept another tick
    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Initialized | SessionState::Running)
    }

    /// Release all session resources
    ///
    /// Frees the working memory and clears both frame buffers. The session
    /// returns to the uninitialized state and can be initialized again.
    pub fn teardown(&mut self) {
        self.memory = None;
        self.variant = None;
        self.video.reset();
        self.audio.reset();
        self.pacer.reset_stats();
        self.tick_count = 0;
        self.state = SessionState::Uninitialized;
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Variant selected at initialization
    pub fn variant(&self) -> Option<ConsoleVariant> {
        self.variant
    }

    /// Total ticks since the last initialize/reset
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Rolling frame-time telemetry
    pub fn frame_stats(&self) -> &FrameStats {
        self.pacer.stats()
    }

    /// Get reference to the emulation core
    pub fn core(&self) -> &C {
        &self.core
    }

    /// Get mutable reference to the emulation core
    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    /// Get reference to the display driver
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get reference to the audio sink
    pub fn audio_sink(&self) -> &A {
        &self.audio_sink
    }
}
