//! The in-flight drag.

use jiglace_core::{Board, MovingGroup, Position, Tile, Tray};

/// Why a drag request was refused.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    /// A release or move arrived with no drag in progress.
    #[display("no drag in progress")]
    NoActiveSession,
    /// A pick-up arrived while a drag was already in progress.
    #[display("a drag is already in progress")]
    SessionActive,
    /// A board pick-up targeted an empty cell.
    #[display("cell {position} is empty")]
    EmptyCell {
        /// The empty cell.
        position: Position,
    },
    /// Input arrived after the puzzle was solved.
    #[display("the puzzle is already solved")]
    AlreadySolved,
    /// A tray pick-up named a tile that is not in the tray.
    #[display("{tile} is not in the tray")]
    TileNotInTray {
        /// The missing tile.
        tile: Tile,
    },
    /// A pick-up coordinate hit neither a tile nor a tray group.
    #[display("nothing to pick up at ({x}, {y})")]
    NothingAt {
        /// Pointer x.
        x: f32,
        /// Pointer y.
        y: f32,
    },
}

/// What a release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The group landed on the board.
    Board {
        /// The drop merged the moved tiles into a larger group.
        connected: bool,
        /// The drop completed the puzzle.
        won: bool,
    },
    /// The group was parked in the tray.
    Tray,
    /// The drop was invalid or off-target; everything returned to where it
    /// was at pick-up.
    Returned,
}

/// One drag from pick-up to release.
///
/// The session owns the lifted group and a copy of the pre-drag board and
/// tray; any failed release restores those copies verbatim.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub(crate) group: MovingGroup,
    pub(crate) picked: Tile,
    pub(crate) pointer: (f32, f32),
    pub(crate) saved_board: Board,
    pub(crate) saved_tray: Tray,
}

impl DragSession {
    /// The lifted group, with offsets relative to the picked tile.
    #[must_use]
    pub fn group(&self) -> &MovingGroup {
        &self.group
    }

    /// The tile the pointer grabbed.
    #[must_use]
    pub fn picked(&self) -> Tile {
        self.picked
    }

    /// The last reported pointer coordinate.
    #[must_use]
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }
}
