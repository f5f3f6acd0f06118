// Display module - Indexed frame buffers, palette translation, frame delivery
//
// Everything between "the core finished rendering" and "the display driver
// consumed the buffer" lives here: the double-buffered indexed frame
// buffers, the native-to-display palette translation, and the ping-pong
// delivery pipeline with variant-specific cropping.

mod framebuffer;
mod palette;
mod pipeline;

pub use framebuffer::{FrameBuffer, NATIVE_HEIGHT, NATIVE_PITCH, NATIVE_WIDTH};
pub use palette::{swap_entry, PaletteTranslator};
pub use pipeline::VideoPipeline;
