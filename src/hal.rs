// Hardware abstraction boundary - Display, audio and input drivers
//
// The physical display panel, audio sink and button/touch hardware are
// driven elsewhere. These traits are the full surface the frame pump pushes
// frames and samples through, and the snapshot it collects input from.

/// Display panel driver
///
/// Consumes an indexed pixel buffer plus a display-order color table. The
/// driver is told the visible geometry once per session and then receives
/// one cropped frame per render tick. Transmission of a pushed frame may
/// still be in flight when the next render tick starts; the video pipeline's
/// ping-pong discipline guarantees the in-flight buffer is never the next
/// render target.
pub trait DisplayDriver {
    /// Set the visible geometry: width and height in pixels, row pitch of
    /// the pushed buffer in bytes
    fn set_native_geometry(&mut self, width: usize, height: usize, pitch: usize);

    /// Set the color lookup table (display byte order)
    fn set_color_table(&mut self, entries: &[u16]);

    /// Push one frame of palette indices, already offset to the visible
    /// region's first pixel
    fn push_frame(&mut self, pixels: &[u8]);
}

/// Audio sink driver
///
/// Consumes packed stereo samples (left channel in the high 16 bits).
/// Submission is fire-and-forget; the sink owns its own queueing and the
/// frame pump never waits for playback.
pub trait AudioSink {
    /// Announce the number of samples in the next push
    fn set_sample_count(&mut self, count: usize);

    /// Push a batch of packed stereo samples
    fn push_samples(&mut self, samples: &[u32]);
}

/// Touch panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchState {
    /// Whether the panel is currently touched
    pub touched: bool,

    /// Touch X coordinate in panel pixels
    pub x: u16,

    /// Touch Y coordinate in panel pixels
    pub y: u16,
}

/// Snapshot of button and touch state for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    // Directional pad
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,

    // Action buttons
    pub button_a: bool,
    pub button_b: bool,

    pub start: bool,
    pub select: bool,

    /// Touch panel state
    pub touch: TouchState,
}

impl InputSnapshot {
    /// Create a snapshot with all controls released
    pub fn new() -> Self {
        Self::default()
    }
}

/// Input poller
///
/// Produces one snapshot of the physical controls per tick.
pub trait InputPoller {
    /// Read the current button and touch state
    fn poll(&mut self) -> InputSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_snapshot_initialization() {
        let snapshot = InputSnapshot::new();
        assert!(!snapshot.up);
        assert!(!snapshot.down);
        assert!(!snapshot.button_a);
        assert!(!snapshot.button_b);
        assert!(!snapshot.start);
        assert!(!snapshot.select);
        assert!(!snapshot.touch.touched);
    }
}
