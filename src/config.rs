/// Character-merge tolerance used by the tuned extraction mode, in PDF units
pub const TUNED_TOLERANCE: f64 = 2.0;

/// Settings for assembling positioned glyphs into lines and words
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSettings {
    /// Largest horizontal gap between two glyphs of the same word
    pub x_tolerance: f64,
    /// Largest vertical offset between two glyphs of the same line
    pub y_tolerance: f64,
    /// Keep whitespace-only glyphs instead of treating them as word breaks
    pub keep_blank_chars: bool,
}

impl TextSettings {
    /// Tight tolerances with whitespace artifacts dropped
    pub fn tuned() -> Self {
        Self {
            x_tolerance: TUNED_TOLERANCE,
            y_tolerance: TUNED_TOLERANCE,
            keep_blank_chars: false,
        }
    }
}
