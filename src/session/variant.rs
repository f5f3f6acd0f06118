// Console variants - Geometry and timing profiles
//
// The device supports two console types on this backend. Both render the
// same 256×192 native buffer; the compact variant's panel only shows a
// centered 160×144 window of it, hence the crop offset.

use crate::core::{CoreConfig, DisplayTiming, Territory};
use crate::display::{NATIVE_HEIGHT, NATIVE_PITCH, NATIVE_WIDTH};

/// Audio sample rate requested from the core, in Hz
pub const AUDIO_SAMPLE_RATE: u32 = 48_000;

/// Supported console types
///
/// Fixed at session initialization, immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleVariant {
    /// Full-width home console: visible region is the whole native render
    Standard,

    /// Handheld compact console: centered 160×144 visible window
    Compact,
}

impl ConsoleVariant {
    /// Visible width in pixels
    pub fn visible_width(self) -> usize {
        match self {
            ConsoleVariant::Standard => NATIVE_WIDTH,
            ConsoleVariant::Compact => 160,
        }
    }

    /// Visible height in pixels
    pub fn visible_height(self) -> usize {
        match self {
            ConsoleVariant::Standard => NATIVE_HEIGHT,
            ConsoleVariant::Compact => 144,
        }
    }

    /// Byte offset of the visible region's first pixel in the native buffer
    pub fn crop_offset(self) -> usize {
        match self {
            ConsoleVariant::Standard => 0,
            // Centered window: (256 - 160) / 2 columns in
            ConsoleVariant::Compact => (NATIVE_WIDTH - 160) / 2,
        }
    }

    /// Core configuration for this variant
    pub fn core_config(self) -> CoreConfig {
        CoreConfig {
            width: NATIVE_WIDTH,
            height: NATIVE_HEIGHT,
            pitch: NATIVE_PITCH,
            territory: Territory::Domestic,
            timing: DisplayTiming::Ntsc,
            sample_rate: AUDIO_SAMPLE_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_geometry() {
        let variant = ConsoleVariant::Standard;
        assert_eq!(variant.visible_width(), 256);
        assert_eq!(variant.visible_height(), 192);
        assert_eq!(variant.crop_offset(), 0);
    }

    #[test]
    fn test_compact_geometry() {
        let variant = ConsoleVariant::Compact;
        assert_eq!(variant.visible_width(), 160);
        assert_eq!(variant.visible_height(), 144);
        assert_eq!(variant.crop_offset(), 48);
    }

    #[test]
    fn test_compact_window_is_centered() {
        let variant = ConsoleVariant::Compact;
        let right_margin = NATIVE_WIDTH - variant.crop_offset() - variant.visible_width();
        assert_eq!(right_margin, variant.crop_offset());
    }

    #[test]
    fn test_core_config_uses_native_render_geometry() {
        for variant in [ConsoleVariant::Standard, ConsoleVariant::Compact] {
            let config = variant.core_config();
            assert_eq!(config.width, NATIVE_WIDTH);
            assert_eq!(config.height, NATIVE_HEIGHT);
            assert_eq!(config.pitch, NATIVE_PITCH);
        }
    }
}
