// Video Delivery Pipeline - Ping-pong double buffering
//
// The core renders into one buffer while the display driver may still be
// transmitting the other. After each push the roles swap. The discipline
// (never render into a buffer currently in flight) replaces any locking.

use super::framebuffer::FrameBuffer;

/// Double-buffered frame delivery
///
/// Holds two owned frame buffers and an explicit active index. `render
/// target` is the buffer the core draws into this render tick; `display
/// source` is the buffer most recently handed to the display driver.
pub struct VideoPipeline {
    buffers: [FrameBuffer; 2],
    active: usize,
}

impl VideoPipeline {
    /// Create a pipeline with two native-geometry buffers
    pub fn new() -> Self {
        Self {
            buffers: [FrameBuffer::native(), FrameBuffer::native()],
            active: 0,
        }
    }

    /// The buffer the core renders into on the current render tick
    pub fn render_target(&self) -> &FrameBuffer {
        &self.buffers[self.active]
    }

    /// Mutable access to the current render target
    pub fn render_target_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffers[self.active]
    }

    /// The buffer most recently pushed to the display driver
    pub fn display_source(&self) -> &FrameBuffer {
        &self.buffers[1 - self.active]
    }

    /// Swap render target and display source roles
    ///
    /// Called once per render tick, after the push.
    pub fn swap(&mut self) {
        self.active = 1 - self.active;
    }

    /// Zero both buffers and reset the active index
    pub fn reset(&mut self) {
        self.buffers[0].clear();
        self.buffers[1].clear();
        self.active = 0;
    }
}

impl Default for VideoPipeline {
    fn default() -> Self {
        Self::new()
    }
}
