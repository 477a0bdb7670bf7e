//! Grid geometry: board size, cell positions, and offsets.

use std::fmt::{self, Display};

/// Error returned when constructing a [`GridSize`] outside the supported
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("grid size {n} is outside the supported range {}-{}", GridSize::MIN, GridSize::MAX)]
pub struct GridSizeError {
    /// The rejected size.
    pub n: u8,
}

/// The side length of the square board.
///
/// The board has `n × n` cells addressed in row-major order. Sizes observed
/// in the original game are 3-8; anything in [`GridSize::MIN`]..=
/// [`GridSize::MAX`] is accepted.
///
/// # Examples
///
/// ```
/// use jiglace_core::{GridSize, Position};
///
/// let size = GridSize::new(3)?;
/// assert_eq!(size.cell_count(), 9);
/// assert_eq!(size.position_of(5), Position::new(1, 2));
/// assert_eq!(size.index_of(Position::new(1, 2)), 5);
/// # Ok::<(), jiglace_core::GridSizeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize(u8);

impl GridSize {
    /// Smallest accepted side length.
    pub const MIN: u8 = 2;
    /// Largest accepted side length.
    pub const MAX: u8 = 8;

    /// Creates a grid size.
    ///
    /// # Errors
    ///
    /// Returns [`GridSizeError`] if `n` is outside
    /// [`GridSize::MIN`]..=[`GridSize::MAX`].
    pub fn new(n: u8) -> Result<Self, GridSizeError> {
        if (Self::MIN..=Self::MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(GridSizeError { n })
        }
    }

    /// Side length in cells.
    #[must_use]
    pub fn n(self) -> u8 {
        self.0
    }

    /// Total number of cells (`n * n`).
    #[must_use]
    pub fn cell_count(self) -> usize {
        usize::from(self.0) * usize::from(self.0)
    }

    /// Whether `position` lies on the board.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.row < self.0 && position.col < self.0
    }

    /// Row-major cell index of `position`.
    #[must_use]
    pub fn index_of(self, position: Position) -> usize {
        debug_assert!(self.contains(position));
        usize::from(position.row) * usize::from(self.0) + usize::from(position.col)
    }

    /// Position of the row-major cell `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.cell_count()`.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn position_of(self, index: usize) -> Position {
        assert!(index < self.cell_count());
        let n = usize::from(self.0);
        Position::new((index / n) as u8, (index % n) as u8)
    }

    /// Iterates over all positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.0).flat_map(move |row| (0..self.0).map(move |col| Position::new(row, col)))
    }

    /// The cell to the right of `position`, if any.
    #[must_use]
    pub fn right_of(self, position: Position) -> Option<Position> {
        (position.col + 1 < self.0).then(|| Position::new(position.row, position.col + 1))
    }

    /// The cell below `position`, if any.
    #[must_use]
    pub fn below_of(self, position: Position) -> Option<Position> {
        (position.row + 1 < self.0).then(|| Position::new(position.row + 1, position.col))
    }

    /// The four edge neighbors of `position` that lie on the board.
    pub fn neighbors_of(self, position: Position) -> impl Iterator<Item = Position> {
        let deltas = [(-1_i16, 0_i16), (1, 0), (0, -1), (0, 1)];
        deltas.into_iter().filter_map(move |(rows, cols)| {
            self.translate(position, Offset { rows, cols })
        })
    }

    /// Applies `offset` to `position`, returning the resulting cell if it is
    /// still on the board.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn translate(self, position: Position, offset: Offset) -> Option<Position> {
        let row = i16::from(position.row) + offset.rows;
        let col = i16::from(position.col) + offset.cols;
        if (0..i16::from(self.0)).contains(&row) && (0..i16::from(self.0)).contains(&col) {
            Some(Position::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{n}x{n}", n = self.0)
    }
}

/// A cell coordinate on the board, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index (0 at the top).
    pub row: u8,
    /// Column index (0 at the left).
    pub col: u8,
}

impl Position {
    /// Creates a position from row and column indices.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The vector from `other` to `self`.
    #[must_use]
    pub fn offset_from(self, other: Self) -> Offset {
        Offset {
            rows: i16::from(self.row) - i16::from(other.row),
            cols: i16::from(self.col) - i16::from(other.col),
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A signed cell-space vector.
///
/// Used both for a tile's displacement from its home cell and for a group
/// member's position relative to the drag anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    /// Row delta (positive is down).
    pub rows: i16,
    /// Column delta (positive is right).
    pub cols: i16,
}

impl Offset {
    /// The zero vector.
    pub const ZERO: Self = Self { rows: 0, cols: 0 };

    /// Creates an offset from row and column deltas.
    #[must_use]
    pub const fn new(rows: i16, cols: i16) -> Self {
        Self { rows, cols }
    }

    /// Whether both components are zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

impl std::ops::Sub for Offset {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            rows: self.rows - rhs.rows,
            cols: self.cols - rhs.cols,
        }
    }
}

impl Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.rows, self.cols)
    }
}
