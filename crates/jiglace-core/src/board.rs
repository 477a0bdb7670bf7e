//! Board occupancy.

use crate::{GridSize, Offset, Position, Tile};

/// Violation of the one-tile-one-cell invariant.
///
/// These are programming errors, not player-reachable states: the placement
/// layer's atomicity contract keeps them unreachable. They are surfaced
/// loudly instead of being silently repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConsistencyError {
    /// A tile was placed into a cell that already holds one.
    #[display("cell {position} is already occupied")]
    CellOccupied {
        /// The doubly-claimed cell.
        position: Position,
    },
    /// The same tile appears in more than one place.
    #[display("{tile} appears more than once")]
    DuplicateTile {
        /// The duplicated tile.
        tile: Tile,
    },
    /// A tile's home index does not fit the board.
    #[display("{tile} does not belong to a {size} board")]
    ForeignTile {
        /// The out-of-range tile.
        tile: Tile,
        /// The board size it was checked against.
        size: GridSize,
    },
    /// A permutation had the wrong number of tiles.
    #[display("expected {expected} tiles, got {actual}")]
    WrongTileCount {
        /// Cells on the board.
        expected: usize,
        /// Tiles supplied.
        actual: usize,
    },
}

/// The N×N cell space and its tile occupancy.
///
/// Each cell holds at most one [`Tile`]. The board is the single source of
/// truth for on-board placement; rendering is a projection of it, never the
/// other way around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: GridSize,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![None; size.cell_count()],
        }
    }

    /// Creates a fully occupied board from a permutation of home indices:
    /// cell `i` receives the tile whose home index is `order[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if `order` is not a permutation of
    /// `0..size.cell_count()`.
    pub fn from_permutation(size: GridSize, order: &[u16]) -> Result<Self, ConsistencyError> {
        if order.len() != size.cell_count() {
            return Err(ConsistencyError::WrongTileCount {
                expected: size.cell_count(),
                actual: order.len(),
            });
        }
        let mut board = Self::new(size);
        for (index, &home) in order.iter().enumerate() {
            board.place(size.position_of(index), Tile::new(home))?;
        }
        Ok(board)
    }

    /// The board's grid size.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// The tile occupying `position`, if any.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> Option<Tile> {
        self.cells[self.size.index_of(position)]
    }

    /// Places `tile` into the empty cell at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError::CellOccupied`] if the cell holds a tile,
    /// [`ConsistencyError::ForeignTile`] if the tile's home index is out of
    /// range, or [`ConsistencyError::DuplicateTile`] if the tile is already
    /// on the board.
    pub fn place(&mut self, position: Position, tile: Tile) -> Result<(), ConsistencyError> {
        if usize::from(tile.home_index()) >= self.size.cell_count() {
            return Err(ConsistencyError::ForeignTile {
                tile,
                size: self.size,
            });
        }
        if self.cells.iter().flatten().any(|&t| t == tile) {
            return Err(ConsistencyError::DuplicateTile { tile });
        }
        let slot = &mut self.cells[self.size.index_of(position)];
        if slot.is_some() {
            return Err(ConsistencyError::CellOccupied { position });
        }
        *slot = Some(tile);
        Ok(())
    }

    /// Removes and returns the tile at `position`.
    pub fn take(&mut self, position: Position) -> Option<Tile> {
        self.cells[self.size.index_of(position)].take()
    }

    /// Places a tile into a cell known to be empty.
    ///
    /// Internal fast path for the placement resolver, which has already
    /// validated the move as a whole.
    pub(crate) fn put(&mut self, position: Position, tile: Tile) {
        let index = self.size.index_of(position);
        debug_assert!(self.cells[index].is_none(), "cell {position} is occupied");
        self.cells[index] = Some(tile);
    }

    /// The displacement of the tile at `position` from its home cell, or
    /// `None` for an empty cell.
    #[must_use]
    pub fn offset_at(&self, position: Position) -> Option<Offset> {
        self.tile_at(position)
            .map(|tile| position.offset_from(tile.home_position(self.size)))
    }

    /// Iterates over occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|tile| (self.size.position_of(i), tile)))
    }

    /// Iterates over empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then(|| self.size.position_of(i)))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Whether every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Whether the board is full and every tile sits in its home cell.
    ///
    /// Note that the game-level win condition additionally requires an empty
    /// tray; see `jiglace-game`.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_full()
            && self
                .occupied()
                .all(|(position, tile)| tile.home_position(self.size) == position)
    }

    /// Verifies that no tile appears twice and every tile fits the board.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConsistencyError`] found.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let mut seen = vec![false; self.size.cell_count()];
        for (_, tile) in self.occupied() {
            let home = usize::from(tile.home_index());
            if home >= seen.len() {
                return Err(ConsistencyError::ForeignTile {
                    tile,
                    size: self.size,
                });
            }
            if seen[home] {
                return Err(ConsistencyError::DuplicateTile { tile });
            }
            seen[home] = true;
        }
        Ok(())
    }
}
