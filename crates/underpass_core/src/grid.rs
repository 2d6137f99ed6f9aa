//! Map grid geometry: cells, directions and looping.

/// A map cell coordinate.
///
/// Cells are not normalized on construction; looping maps wrap them through
/// [`MapGeometry::wrap`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Cell {
    /// Creates a cell coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell directly above this one.
    #[inline]
    #[must_use]
    pub const fn above(self) -> Self {
        Self::new(self.x, self.y - 1)
    }

    /// The neighbouring cell in `direction`.
    #[inline]
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A movement direction in numpad notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Numpad 2.
    Down = 2,
    /// Numpad 4.
    Left = 4,
    /// Numpad 6.
    Right = 6,
    /// Numpad 8.
    Up = 8,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Down, Self::Left, Self::Right, Self::Up];

    /// Returns the numpad value.
    #[inline]
    #[must_use]
    pub const fn numpad(self) -> u8 {
        self as u8
    }

    /// The opposite direction.
    #[inline]
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
        }
    }

    /// The tileset flag bit that blocks this direction.
    ///
    /// Down = 0x1, Left = 0x2, Right = 0x4, Up = 0x8.
    #[inline]
    #[must_use]
    pub const fn passage_bit(self) -> u16 {
        (1 << (self.numpad() / 2 - 1)) & 0x0f
    }

    /// Cell offset of one step.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
        }
    }
}

/// Map dimensions and looping mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapGeometry {
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// The map loops horizontally.
    pub loop_horizontal: bool,
    /// The map loops vertically.
    pub loop_vertical: bool,
}

impl MapGeometry {
    /// Creates a non-looping geometry.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            loop_horizontal: false,
            loop_vertical: false,
        }
    }

    /// Sets the looping mode.
    #[inline]
    #[must_use]
    pub const fn with_looping(mut self, horizontal: bool, vertical: bool) -> Self {
        self.loop_horizontal = horizontal;
        self.loop_vertical = vertical;
        self
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Wraps `cell` on looping axes and returns it if it lies on the map.
    #[must_use]
    pub fn wrap(self, cell: Cell) -> Option<Cell> {
        let width = i32::try_from(self.width).ok()?;
        let height = i32::try_from(self.height).ok()?;
        if width == 0 || height == 0 {
            return None;
        }

        let x = if self.loop_horizontal { cell.x.rem_euclid(width) } else { cell.x };
        let y = if self.loop_vertical { cell.y.rem_euclid(height) } else { cell.y };

        ((0..width).contains(&x) && (0..height).contains(&y)).then_some(Cell::new(x, y))
    }

    /// Returns true if `cell` lies on the map after wrapping.
    #[inline]
    #[must_use]
    pub fn is_valid(self, cell: Cell) -> bool {
        self.wrap(cell).is_some()
    }

    /// Row-major index of a cell, after wrapping.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn index(self, cell: Cell) -> Option<usize> {
        self.wrap(cell)
            .map(|c| c.y as usize * self.width as usize + c.x as usize)
    }
}
