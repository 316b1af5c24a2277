use std::fmt;

/// Discrete grid position expressed in cell coordinates.
///
/// Signed so that callers such as drag-drop handlers can pass any pointer
/// coordinate; anything left of or above the grid is simply out of bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offsets this position by a cell delta inside a footprint.
    #[inline]
    pub fn offset(self, dx: u32, dy: u32) -> Self {
        Self {
            x: self.x.saturating_add_unsigned(dx),
            y: self.y.saturating_add_unsigned(dy),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular size of an item in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const UNIT: Self = Self {
        width: 1,
        height: 1,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Zero-sized footprints can never be placed.
    pub const fn is_valid(self) -> bool {
        self.width >= 1 && self.height >= 1
    }

    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns true if `cell` lies inside this footprint anchored at `origin`.
    pub fn covers(self, origin: Position, cell: Position) -> bool {
        let dx = i64::from(cell.x) - i64::from(origin.x);
        let dy = i64::from(cell.y) - i64::from(origin.y);
        dx >= 0 && dy >= 0 && dx < i64::from(self.width) && dy < i64::from(self.height)
    }

    /// Iterates the cells covered when anchored at `origin`, row-major.
    pub fn cells(self, origin: Position) -> impl Iterator<Item = Position> {
        (0..self.height).flat_map(move |dy| (0..self.width).map(move |dx| origin.offset(dx, dy)))
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::UNIT
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
