// Palette Translator - Native to display byte-order conversion
//
// The core reports its color table as 16-bit entries in native byte order.
// The display panel's bus expects the opposite order, so every entry gets
// its bytes swapped once per render tick. The swap is its own inverse.

use crate::core::PALETTE_SIZE;

/// Swap the byte order of one color entry
#[inline]
pub fn swap_entry(entry: u16) -> u16 {
    entry.swap_bytes()
}

/// Holds the per-tick native palette and its display-order translation
///
/// Pure and deterministic: no state carries between ticks beyond the two
/// arrays it writes into.
pub struct PaletteTranslator {
    /// Core-native byte order, refreshed every render tick
    native: [u16; PALETTE_SIZE],

    /// Display byte order, derived from `native` each render tick
    display: [u16; PALETTE_SIZE],
}

impl PaletteTranslator {
    /// Create a translator with both palettes zeroed
    pub fn new() -> Self {
        Self {
            native: [0; PALETTE_SIZE],
            display: [0; PALETTE_SIZE],
        }
    }

    /// Mutable access to the native-order array for the core to fill
    pub fn native_mut(&mut self) -> &mut [u16; PALETTE_SIZE] {
        &mut self.native
    }

    /// The native-order palette as last copied from the core
    pub fn native(&self) -> &[u16; PALETTE_SIZE] {
        &self.native
    }

    /// Derive the display-order palette from the native one
    pub fn translate(&mut self) {
        for (out, &entry) in self.display.iter_mut().zip(self.native.iter()) {
            *out = swap_entry(entry);
        }
    }

    /// The display-order palette as of the last `translate`
    pub fn display_order(&self) -> &[u16; PALETTE_SIZE] {
        &self.display
    }

    /// Look up one display-order entry by palette index
    ///
    /// Indices wrap at the table size, matching the core's index space.
    #[inline]
    pub fn display_entry(&self, index: u8) -> u16 {
        self.display[index as usize % PALETTE_SIZE]
    }
}

impl Default for PaletteTranslator {
    fn default() -> Self {
        Self::new()
    }
}
