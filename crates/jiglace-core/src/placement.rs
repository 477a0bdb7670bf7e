//! Drop resolution.
//!
//! A drag lifts a whole group off its source container; releasing it asks
//! this module whether the group fits at the requested anchor cell. A
//! successful drop may displace tiles that were sitting in the target cells:
//! board-origin moves relocate them into the cells the group vacated,
//! tray-origin moves relocate them into free board cells. Either the whole
//! move resolves or nothing changes.

use crate::{Board, Offset, Position, Tile, compute_groups};

/// A tile travelling with a drag, carrying its cell offset relative to the
/// drag anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingTile {
    /// The tile being moved.
    pub tile: Tile,
    /// Cell offset from the anchor tile.
    pub offset: Offset,
}

/// Where a moving group was lifted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOrigin {
    /// Lifted from board cells; `sources` records the cells the members
    /// occupied, in row-major order.
    Board {
        /// Former cells of the members.
        sources: Vec<Position>,
    },
    /// Lifted from the tray; the group holds no board cells.
    Tray,
}

/// A group in flight: the members travelling together and their origin.
///
/// The group is built *after* its members have been removed from the source
/// container, so the board handed to [`try_place`] never contains the moving
/// tiles themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovingGroup {
    members: Vec<MovingTile>,
    origin: GroupOrigin,
}

/// Why a drop was rejected. Never user-facing: the drag session answers any
/// of these with a rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    /// A member's target cell falls outside the board.
    #[display("a group member lands outside the board")]
    OutOfBounds,
    /// Not enough room to relocate the tiles the drop would displace.
    #[display("{displaced} tiles displaced but only {room} cells available")]
    InsufficientRoom {
        /// Tiles sitting in target cells.
        displaced: usize,
        /// Cells available to absorb them.
        room: usize,
    },
}

impl MovingGroup {
    /// Lifts the full group containing the tile at `anchor` off `board`.
    ///
    /// Group membership is resolved with [`compute_groups`]; every member is
    /// removed from the board and carried with its offset relative to the
    /// anchor cell. Returns `None` (board untouched) if `anchor` is empty.
    pub fn lift(board: &mut Board, anchor: Position) -> Option<Self> {
        let component = compute_groups(board).component_of(anchor);
        if component.is_empty() {
            return None;
        }
        let mut members = Vec::with_capacity(component.len());
        for &position in &component {
            let tile = board.take(position)?;
            members.push(MovingTile {
                tile,
                offset: position.offset_from(anchor),
            });
        }
        Some(Self {
            members,
            origin: GroupOrigin::Board { sources: component },
        })
    }

    /// Builds a group from tray members whose offsets are already relative
    /// to the picked (anchor) tile.
    #[must_use]
    pub fn from_tray(members: Vec<MovingTile>) -> Self {
        Self {
            members,
            origin: GroupOrigin::Tray,
        }
    }

    /// The travelling members.
    #[must_use]
    pub fn members(&self) -> &[MovingTile] {
        &self.members
    }

    /// Where the group was lifted from.
    #[must_use]
    pub fn origin(&self) -> &GroupOrigin {
        &self.origin
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The cells the group would occupy if dropped with its anchor at
    /// `target`, or `None` if any member would fall off the board.
    ///
    /// Pure query, used for drop-preview feedback while dragging.
    #[must_use]
    pub fn target_cells(&self, board: &Board, target: Position) -> Option<Vec<Position>> {
        let size = board.size();
        self.members
            .iter()
            .map(|member| size.translate(target, member.offset))
            .collect()
    }
}

/// Attempts to drop `group` onto `board` with its anchor at `target`.
///
/// `board` is the occupancy *without* the moving members (they were lifted
/// at drag start). On success the returned board holds the full resolved
/// occupancy; on failure the input is untouched and the caller keeps the
/// pre-drag state for rollback.
///
/// Resolution steps:
///
/// 1. Every member's target cell must be on the board.
/// 2. Tiles sitting in target cells are *displaced*.
/// 3. Board-origin moves may relocate displaced tiles only into *vacated*
///    cells (source cells outside the target set); tray-origin moves may use
///    any free board cell outside the target set.
/// 4. Displaced tiles fill the available cells one-to-one in ascending
///    row-major order. The pairing is arbitrary but stable; the absorbing
///    cells are interchangeable empty slots.
///
/// # Errors
///
/// [`PlacementError::OutOfBounds`] or [`PlacementError::InsufficientRoom`];
/// in both cases nothing is mutated.
pub fn try_place(
    board: &Board,
    group: &MovingGroup,
    target: Position,
) -> Result<Board, PlacementError> {
    let size = board.size();
    let targets = group
        .target_cells(board, target)
        .ok_or(PlacementError::OutOfBounds)?;
    let mut is_target = vec![false; size.cell_count()];
    for &position in &targets {
        is_target[size.index_of(position)] = true;
    }

    // Displaced tiles, in row-major order (stable assignment).
    let displaced: Vec<(Position, Tile)> = board
        .occupied()
        .filter(|&(position, _)| is_target[size.index_of(position)])
        .collect();

    // Cells that may absorb the displaced tiles, in row-major order.
    let room: Vec<Position> = match group.origin() {
        GroupOrigin::Board { sources } => {
            let mut vacated: Vec<Position> = sources
                .iter()
                .copied()
                .filter(|&position| !is_target[size.index_of(position)])
                .collect();
            vacated.sort_unstable();
            vacated
        }
        GroupOrigin::Tray => board
            .empty_cells()
            .filter(|&position| !is_target[size.index_of(position)])
            .collect(),
    };

    if displaced.len() > room.len() {
        return Err(PlacementError::InsufficientRoom {
            displaced: displaced.len(),
            room: room.len(),
        });
    }

    let mut next = board.clone();
    for &(position, _) in &displaced {
        next.take(position);
    }
    for (member, &position) in group.members().iter().zip(&targets) {
        next.put(position, member.tile);
    }
    for (&(_, tile), &position) in displaced.iter().zip(&room) {
        next.put(position, tile);
    }
    debug_assert!(next.check_consistency().is_ok());
    Ok(next)
}
