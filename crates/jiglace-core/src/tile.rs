//! Tile identity.

use std::fmt::{self, Display};

use crate::{GridSize, Position};

/// One piece of the sliced image.
///
/// A tile's identity is the row-major index of the board cell it belongs to
/// when the puzzle is solved (its *home index*). The bitmap the tile carries
/// in the UI is opaque to the engine; only the home index matters here.
///
/// # Examples
///
/// ```
/// use jiglace_core::{GridSize, Position, Tile};
///
/// let size = GridSize::new(3)?;
/// let tile = Tile::new(5);
/// assert_eq!(tile.home_position(size), Position::new(1, 2));
/// # Ok::<(), jiglace_core::GridSizeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile(u16);

impl Tile {
    /// Creates a tile from its home index.
    #[must_use]
    pub const fn new(home_index: u16) -> Self {
        Self(home_index)
    }

    /// The row-major index of the cell this tile belongs to when solved.
    #[must_use]
    pub const fn home_index(self) -> u16 {
        self.0
    }

    /// The board cell this tile belongs to when solved.
    #[must_use]
    pub fn home_position(self, size: GridSize) -> Position {
        size.position_of(usize::from(self.0))
    }

    /// Iterates over the full tile set for a board, in home-index order.
    #[expect(clippy::cast_possible_truncation)]
    pub fn all(size: GridSize) -> impl Iterator<Item = Self> {
        (0..size.cell_count()).map(|i| Self(i as u16))
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_position_derivation() {
        let size = GridSize::new(4).unwrap();
        assert_eq!(Tile::new(0).home_position(size), Position::new(0, 0));
        assert_eq!(Tile::new(7).home_position(size), Position::new(1, 3));
        assert_eq!(Tile::new(15).home_position(size), Position::new(3, 3));
    }

    #[test]
    fn full_tile_set() {
        let size = GridSize::new(3).unwrap();
        let tiles: Vec<_> = Tile::all(size).collect();
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0], Tile::new(0));
        assert_eq!(tiles[8], Tile::new(8));
    }
}
