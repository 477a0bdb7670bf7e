//! Save and restore.
//!
//! A [`GameSnapshot`] is the serializable shape of a game: puzzle identity,
//! board occupancy as home indices, and tray entries. Restore validates the
//! whole save before building a game, so a corrupt snapshot can never
//! produce a board with missing or duplicated tiles.

use jiglace_core::{
    Board, ConsistencyError, GridSize, GridSizeError, Offset, Tile, Tray, TrayEntry, TrayError,
    TrayGroupId,
};
use serde::{Deserialize, Serialize};

use crate::{Game, ImageInfo, Layout, Puzzle, PuzzleId, Viewport};

/// Serialized form of one tray entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrayEntrySnapshot {
    /// Home index of the stored tile.
    pub tile: u16,
    /// Tray group id.
    pub group: u32,
    /// Row offset within the group's bounding box.
    pub rows: i16,
    /// Column offset within the group's bounding box.
    pub cols: i16,
}

/// The serializable save state of a game.
///
/// Pixel geometry is deliberately absent: a save restored on a different
/// screen recomputes its layout from the new viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Catalog id of the puzzle image.
    pub puzzle: u32,
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
    /// Board side length.
    pub grid: u8,
    /// Row-major board cells, each holding a tile's home index.
    pub cells: Vec<Option<u16>>,
    /// Tray contents.
    pub tray: Vec<TrayEntrySnapshot>,
}

/// Why a snapshot failed to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SnapshotError {
    /// The stored grid size is out of range.
    #[display("{_0}")]
    Grid(GridSizeError),
    /// The stored board cells violate occupancy invariants.
    #[display("{_0}")]
    Board(ConsistencyError),
    /// The stored tray entries are malformed.
    #[display("{_0}")]
    Tray(TrayError),
    /// The cell list does not match the grid size.
    #[display("expected {expected} board cells, got {actual}")]
    WrongCellCount {
        /// Cells required by the stored grid size.
        expected: usize,
        /// Cells present in the save.
        actual: usize,
    },
    /// A tile appears both on the board and in the tray, or twice in the
    /// tray.
    #[display("{tile} appears more than once in the save")]
    DuplicateTile {
        /// The duplicated tile.
        tile: Tile,
    },
    /// A tray tile's home index does not fit the stored grid.
    #[display("{tile} does not belong to the stored board")]
    ForeignTile {
        /// The out-of-range tile.
        tile: Tile,
    },
    /// A tile of the set is on neither the board nor the tray.
    #[display("{tile} is missing from the save")]
    MissingTile {
        /// The absent tile.
        tile: Tile,
    },
}

impl Game {
    /// Captures the game as a serializable snapshot.
    ///
    /// An in-flight drag is transient state: if one is active, the snapshot
    /// records the pre-drag board and tray, exactly what a rollback would
    /// restore.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let (board, tray) = match self.session() {
            Some(session) => (&session.saved_board, &session.saved_tray),
            None => (self.board(), self.tray()),
        };
        let cells = board
            .size()
            .positions()
            .map(|position| board.tile_at(position).map(Tile::home_index))
            .collect();
        let tray = tray
            .entries()
            .iter()
            .map(|entry| TrayEntrySnapshot {
                tile: entry.tile.home_index(),
                group: entry.group.value(),
                rows: entry.offset.rows,
                cols: entry.offset.cols,
            })
            .collect();
        GameSnapshot {
            puzzle: self.puzzle().id.value(),
            image_width: self.puzzle().image.width,
            image_height: self.puzzle().image.height,
            grid: self.grid().n(),
            cells,
            tray,
        }
    }

    /// Rebuilds a game from a snapshot, laid out for `viewport`.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`] if the save is internally inconsistent:
    /// bad grid size, wrong cell count, malformed tray entries, or a tile
    /// set that is not exactly the full set split across board and tray.
    pub fn restore(snapshot: &GameSnapshot, viewport: Viewport) -> Result<Self, SnapshotError> {
        let grid = GridSize::new(snapshot.grid).map_err(SnapshotError::Grid)?;
        if snapshot.cells.len() != grid.cell_count() {
            return Err(SnapshotError::WrongCellCount {
                expected: grid.cell_count(),
                actual: snapshot.cells.len(),
            });
        }

        let mut board = Board::new(grid);
        for (index, cell) in snapshot.cells.iter().enumerate() {
            if let Some(home) = cell {
                board
                    .place(grid.position_of(index), Tile::new(*home))
                    .map_err(SnapshotError::Board)?;
            }
        }

        let image = ImageInfo {
            width: snapshot.image_width,
            height: snapshot.image_height,
        };
        let layout = Layout::compute(grid, image, viewport);
        let entries: Vec<TrayEntry> = snapshot
            .tray
            .iter()
            .map(|entry| TrayEntry {
                tile: Tile::new(entry.tile),
                group: TrayGroupId::from_value(entry.group),
                offset: Offset::new(entry.rows, entry.cols),
            })
            .collect();
        let tray = Tray::from_entries(layout.tray_params(), entries).map_err(SnapshotError::Tray)?;

        check_tile_set(&board, &tray, grid)?;

        let puzzle = Puzzle {
            id: PuzzleId::new(snapshot.puzzle),
            image,
        };
        Ok(Self::from_parts(puzzle, grid, viewport, board, tray))
    }
}

/// Verifies that the full tile set appears exactly once across board and
/// tray.
fn check_tile_set(board: &Board, tray: &Tray, grid: GridSize) -> Result<(), SnapshotError> {
    let mut seen = vec![false; grid.cell_count()];
    let board_tiles = board.occupied().map(|(_, tile)| tile);
    let tray_tiles = tray.entries().iter().map(|entry| entry.tile);
    for tile in board_tiles.chain(tray_tiles) {
        let home = usize::from(tile.home_index());
        if home >= seen.len() {
            return Err(SnapshotError::ForeignTile { tile });
        }
        if seen[home] {
            return Err(SnapshotError::DuplicateTile { tile });
        }
        seen[home] = true;
    }
    if let Some(missing) = seen.iter().position(|&present| !present) {
        #[expect(clippy::cast_possible_truncation)]
        return Err(SnapshotError::MissingTile {
            tile: Tile::new(missing as u16),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use jiglace_core::Position;

    use super::*;

    fn phone() -> Viewport {
        Viewport {
            width: 430.0,
            height: 800.0,
        }
    }

    fn fresh_game(n: u8, seed: u64) -> Game {
        let puzzle = Puzzle {
            id: PuzzleId::new(9),
            image: ImageInfo {
                width: 800,
                height: 600,
            },
        };
        Game::new(puzzle, GridSize::new(n).unwrap(), phone(), seed)
    }

    #[test]
    fn round_trip_preserves_the_game() {
        let game = fresh_game(3, 41);
        let snapshot = game.snapshot();
        let restored = Game::restore(&snapshot, phone()).unwrap();

        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.tray().entries(), game.tray().entries());
        assert_eq!(restored.puzzle(), game.puzzle());
        assert_eq!(restored.is_solved(), game.is_solved());
        assert_eq!(restored.snapshot(), snapshot);
    }

    #[test]
    fn snapshot_during_drag_captures_the_rollback_state() {
        let mut game = fresh_game(3, 43);
        let before = game.snapshot();

        let start = game.layout().cell_center(Position::new(0, 0));
        game.begin_board_drag(Position::new(0, 0), start).unwrap();
        assert_eq!(game.snapshot(), before);

        game.cancel_drag().unwrap();
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn restore_recomputes_solved_state() {
        let order: Vec<Option<u16>> = (0..9).map(Some).collect();
        let snapshot = GameSnapshot {
            puzzle: 1,
            image_width: 64,
            image_height: 64,
            grid: 3,
            cells: order,
            tray: Vec::new(),
        };
        let game = Game::restore(&snapshot, phone()).unwrap();
        assert!(game.is_solved());
    }

    #[test]
    fn restore_rejects_bad_grid_and_cell_count() {
        let snapshot = GameSnapshot {
            puzzle: 1,
            image_width: 64,
            image_height: 64,
            grid: 9,
            cells: Vec::new(),
            tray: Vec::new(),
        };
        assert!(matches!(
            Game::restore(&snapshot, phone()),
            Err(SnapshotError::Grid(_))
        ));

        let snapshot = GameSnapshot {
            grid: 3,
            cells: vec![None; 8],
            ..snapshot
        };
        assert_eq!(
            Game::restore(&snapshot, phone()).unwrap_err(),
            SnapshotError::WrongCellCount {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn restore_rejects_duplicate_and_missing_tiles() {
        // Tile 0 on the board and in the tray.
        let snapshot = GameSnapshot {
            puzzle: 1,
            image_width: 64,
            image_height: 64,
            grid: 2,
            cells: vec![Some(0), Some(1), Some(2), Some(3)],
            tray: vec![TrayEntrySnapshot {
                tile: 0,
                group: 0,
                rows: 0,
                cols: 0,
            }],
        };
        assert_eq!(
            Game::restore(&snapshot, phone()).unwrap_err(),
            SnapshotError::DuplicateTile { tile: Tile::new(0) }
        );

        // Tile 3 nowhere.
        let snapshot = GameSnapshot {
            cells: vec![Some(0), Some(1), Some(2), None],
            tray: Vec::new(),
            ..snapshot
        };
        assert_eq!(
            Game::restore(&snapshot, phone()).unwrap_err(),
            SnapshotError::MissingTile { tile: Tile::new(3) }
        );
    }

    #[test]
    fn restore_rejects_malformed_tray_entries() {
        let snapshot = GameSnapshot {
            puzzle: 1,
            image_width: 64,
            image_height: 64,
            grid: 2,
            cells: vec![Some(0), Some(1), Some(2), None],
            tray: vec![TrayEntrySnapshot {
                tile: 3,
                group: 0,
                rows: -1,
                cols: 0,
            }],
        };
        assert!(matches!(
            Game::restore(&snapshot, phone()),
            Err(SnapshotError::Tray(TrayError::InvalidEntry { .. }))
        ));

        let snapshot = GameSnapshot {
            tray: vec![TrayEntrySnapshot {
                tile: 7,
                group: 0,
                rows: 0,
                cols: 0,
            }],
            ..snapshot
        };
        assert_eq!(
            Game::restore(&snapshot, phone()).unwrap_err(),
            SnapshotError::ForeignTile { tile: Tile::new(7) }
        );
    }
}
