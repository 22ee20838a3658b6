//! Conversion settings.

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Text placed in the 80-byte STL header.
    pub header_text: String,
    /// Roughly how many progress updates to emit over the face lump.
    pub progress_steps: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            header_text: "HL2 BSP to STL".to_string(),
            progress_steps: 200,
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn with_header_text(mut self, text: impl Into<String>) -> Self {
        self.header_text = text.into();
        self
    }

    #[must_use]
    pub const fn with_progress_steps(mut self, steps: usize) -> Self {
        self.progress_steps = steps;
        self
    }

    /// Faces between progress updates for a lump of `total` faces.
    #[must_use]
    pub fn progress_interval(&self, total: usize) -> usize {
        (total / self.progress_steps.max(1)).max(1)
    }
}
