use crate::state::InventoryError;

/// Inventory grid configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryConfig {
    /// Number of columns in the grid.
    pub width: u32,
    /// Number of rows in the grid.
    pub height: u32,
}

impl InventoryConfig {
    // ===== hard limits =====
    /// Upper bound on `width * height`; keeps every scan O(MAX_CELLS).
    pub const MAX_CELLS: usize = 4096;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WIDTH: u32 = 8;
    pub const DEFAULT_HEIGHT: u32 = 6;

    pub fn new() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }

    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells described by this configuration.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Rejects empty grids and grids larger than [`Self::MAX_CELLS`].
    pub fn validate(&self) -> Result<(), InventoryError> {
        if self.width == 0 || self.height == 0 || self.cell_count() > Self::MAX_CELLS {
            return Err(InventoryError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
