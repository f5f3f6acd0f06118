// Screenshot functionality
//
// Converts a visible-region snapshot (packed display-order color, 2 bytes
// per pixel) to RGB888 and saves it as a timestamped PNG file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::display::swap_entry;

/// Errors that can occur during screenshot operations
#[derive(Debug)]
pub enum ScreenshotError {
    /// I/O error
    Io(io::Error),

    /// PNG encoding error
    PngEncoding(png::EncodingError),

    /// No frame available (session not initialized)
    NoFrame,
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(e) => write!(f, "I/O error: {}", e),
            ScreenshotError::PngEncoding(e) => write!(f, "PNG encoding error: {}", e),
            ScreenshotError::NoFrame => write!(f, "No frame available"),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(e: io::Error) -> Self {
        ScreenshotError::Io(e)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(e: png::EncodingError) -> Self {
        ScreenshotError::PngEncoding(e)
    }
}

/// Save a visible-region snapshot as a PNG file
///
/// # Arguments
///
/// * `frame` - Snapshot bytes (2 bytes per pixel, low byte first)
/// * `width` - Visible width in pixels
/// * `height` - Visible height in pixels
/// * `directory` - Target directory; defaults to `screenshots/`
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
pub fn save_screenshot(
    frame: &[u8],
    width: usize,
    height: usize,
    directory: Option<&Path>,
) -> Result<PathBuf, ScreenshotError> {
    let dir = directory
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("screenshots"));
    fs::create_dir_all(&dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("screenshot_{}.png", timestamp);
    let file_path = dir.join(filename);

    let rgb_data = snapshot_to_rgb(frame);
    save_png(&file_path, &rgb_data, width as u32, height as u32)?;

    Ok(file_path)
}

/// Convert snapshot bytes to RGB888
///
/// Snapshot pixels are display-order (byte-swapped) RGB565 stored low byte
/// first; undo the swap, then expand the 5/6/5 fields to 8 bits each.
fn snapshot_to_rgb(frame: &[u8]) -> Vec<u8> {
    let mut rgb_data = Vec::with_capacity(frame.len() / 2 * 3);

    for pixel in frame.chunks_exact(2) {
        let color = swap_entry(u16::from_le_bytes([pixel[0], pixel[1]]));
        let r = ((color >> 11) & 0x1F) as u8;
        let g = ((color >> 5) & 0x3F) as u8;
        let b = (color & 0x1F) as u8;
        rgb_data.push((r << 3) | (r >> 2));
        rgb_data.push((g << 2) | (g >> 4));
        rgb_data.push((b << 3) | (b >> 2));
    }

    rgb_data
}

/// Save RGB data as a PNG file
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}
