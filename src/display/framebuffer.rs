// Frame Buffer - Indexed pixel storage for core render output
//
// The core renders 8-bit palette indices into a 256×192 buffer. Row pitch
// equals the native width; the compact console variant only exposes a
// centered 160×144 window of it, so the pitch can exceed the visible width.

/// Native render width in pixels
pub const NATIVE_WIDTH: usize = 256;

/// Native render height in pixels
pub const NATIVE_HEIGHT: usize = 192;

/// Row pitch of the native render buffer in bytes
pub const NATIVE_PITCH: usize = 256;

/// Frame buffer of 8-bit palette indices
///
/// Two instances exist per session and alternate between "render target"
/// and "display source" roles each render tick.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pitch: usize,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Create a zero-filled frame buffer with the given geometry
    ///
    /// # Panics
    /// Panics if pitch is smaller than width
    pub fn new(width: usize, height: usize, pitch: usize) -> Self {
        assert!(pitch >= width, "pitch {} smaller than width {}", pitch, width);
        Self {
            width,
            height,
            pitch,
            data: vec![0; pitch * height],
        }
    }

    /// Create a frame buffer with the native render geometry
    pub fn native() -> Self {
        Self::new(NATIVE_WIDTH, NATIVE_HEIGHT, NATIVE_PITCH)
    }

    /// Buffer width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Buffer height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row pitch in bytes
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, palette_index: u8) {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.data[y * self.pitch + x] = palette_index;
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        self.data[y * self.pitch + x]
    }

    /// Zero the whole buffer
    ///
    /// Called before every render step so partially-updated regions come out
    /// consistent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Raw pixel data as palette indices
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the raw pixel data
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// View of the buffer starting at `offset` bytes in
    ///
    /// This is the form the display driver consumes: the visible region of a
    /// cropped variant starts `offset` columns into row zero and the driver
    /// walks it with the native pitch.
    pub fn from_offset(&self, offset: usize) -> &[u8] {
        &self.data[offset..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_creation() {
        let fb = FrameBuffer::native();
        assert_eq!(fb.width(), NATIVE_WIDTH);
        assert_eq!(fb.height(), NATIVE_HEIGHT);
        assert_eq!(fb.pitch(), NATIVE_PITCH);
        assert_eq!(fb.as_slice().len(), NATIVE_PITCH * NATIVE_HEIGHT);
    }

    #[test]
    fn test_set_get_pixel() {
        let mut fb = FrameBuffer::native();
        fb.set_pixel(100, 100, 0x1F);
        assert_eq!(fb.get_pixel(100, 100), 0x1F);
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::native();
        fb.set_pixel(0, 0, 0xFF);
        fb.set_pixel(255, 191, 0x10);
        fb.clear();
        assert_eq!(fb.get_pixel(0, 0), 0);
        assert_eq!(fb.get_pixel(255, 191), 0);
    }

    #[test]
    fn test_from_offset() {
        let mut fb = FrameBuffer::native();
        fb.set_pixel(48, 0, 0x2A);
        let view = fb.from_offset(48);
        assert_eq!(view[0], 0x2A);
    }

    #[test]
    fn test_pitch_exceeds_width() {
        let fb = FrameBuffer::new(160, 144, 256);
        assert_eq!(fb.as_slice().len(), 256 * 144);
    }

    #[test]
    #[should_panic]
    fn test_set_pixel_out_of_bounds_x() {
        let mut fb = FrameBuffer::native();
        fb.set_pixel(NATIVE_WIDTH, 0, 0x00);
    }

    #[test]
    #[should_panic]
    fn test_set_pixel_out_of_bounds_y() {
        let mut fb = FrameBuffer::native();
        fb.set_pixel(0, NATIVE_HEIGHT, 0x00);
    }

    #[test]
    #[should_panic]
    fn test_pitch_smaller_than_width() {
        let _ = FrameBuffer::new(256, 192, 160);
    }
}
