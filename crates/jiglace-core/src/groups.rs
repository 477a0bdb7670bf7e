//! Rigid group detection.
//!
//! Two board tiles belong to the same group when they are edge-adjacent and
//! carry the same displacement from their home cells. Groups are *derived*
//! state: they are recomputed from occupancy after every mutation and never
//! cached across calls.

use std::collections::VecDeque;

use crate::{Board, GridSize, Position};

/// Identifier of one connected component within a single [`GroupMap`].
///
/// Ids are call-local: they are assigned in discovery order and carry no
/// meaning across two `compute_groups` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(u32);

impl GroupId {
    /// The id as a dense index (0-based, `< GroupMap::group_count()`).
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The partition of occupied board cells into rigid groups.
///
/// Every occupied cell belongs to exactly one group; singletons are included
/// in the mapping but reported as not grouped by [`GroupMap::is_grouped`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMap {
    size: GridSize,
    ids: Vec<Option<GroupId>>,
    sizes: Vec<u32>,
}

/// Computes the group partition of `board`.
///
/// A connecting edge exists between two edge-adjacent occupied cells whose
/// offsets (current position minus home position) are equal; components of
/// the resulting graph are found by breadth-first traversal in row-major
/// scan order, so the result is deterministic for a given occupancy.
///
/// # Examples
///
/// ```
/// use jiglace_core::{compute_groups, Board, GridSize, Position};
///
/// let size = GridSize::new(3)?;
/// // Solved board: every offset is zero, one group spans all cells.
/// let order: Vec<u16> = (0..9).collect();
/// let board = Board::from_permutation(size, &order)?;
/// let groups = compute_groups(&board);
/// assert_eq!(groups.group_count(), 1);
/// assert!(groups.is_grouped(Position::new(0, 0)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub fn compute_groups(board: &Board) -> GroupMap {
    let size = board.size();
    let mut ids: Vec<Option<GroupId>> = vec![None; size.cell_count()];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();

    for start in size.positions() {
        if board.tile_at(start).is_none() || ids[size.index_of(start)].is_some() {
            continue;
        }
        let id = GroupId(sizes.len() as u32);
        let mut members = 0_u32;
        ids[size.index_of(start)] = Some(id);
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            members += 1;
            let offset = board.offset_at(current);
            for neighbor in size.neighbors_of(current) {
                // `offset` is always `Some` here, so empty neighbors never match.
                if ids[size.index_of(neighbor)].is_none() && board.offset_at(neighbor) == offset {
                    ids[size.index_of(neighbor)] = Some(id);
                    queue.push_back(neighbor);
                }
            }
        }
        sizes.push(members);
    }

    GroupMap { size, ids, sizes }
}

impl GroupMap {
    /// The group containing the tile at `position`, or `None` for an empty
    /// cell.
    #[must_use]
    pub fn group_at(&self, position: Position) -> Option<GroupId> {
        self.ids[self.size.index_of(position)]
    }

    /// Number of distinct groups (singletons included).
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of cells covered by the mapping (all occupied cells).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.iter().flatten().count()
    }

    /// Whether the mapping is empty (no occupied cells).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.iter().all(Option::is_none)
    }

    /// Number of members of `id`.
    #[must_use]
    pub fn size_of(&self, id: GroupId) -> usize {
        self.sizes[id.index()] as usize
    }

    /// Whether the tile at `position` is part of a multi-tile group.
    ///
    /// Singletons are never treated as grouped by consumers (no group
    /// highlight, but they still drag on their own).
    #[must_use]
    pub fn is_grouped(&self, position: Position) -> bool {
        self.group_at(position)
            .is_some_and(|id| self.size_of(id) >= 2)
    }

    /// Whether two cells hold tiles of the same group.
    #[must_use]
    pub fn same_group(&self, a: Position, b: Position) -> bool {
        match (self.group_at(a), self.group_at(b)) {
            (Some(ga), Some(gb)) => ga == gb,
            _ => false,
        }
    }

    /// Members of `id`, in row-major order.
    #[must_use]
    pub fn members(&self, id: GroupId) -> Vec<Position> {
        self.iter()
            .filter_map(|(pos, gid)| (gid == id).then_some(pos))
            .collect()
    }

    /// The full component containing the tile at `position` (empty for an
    /// unoccupied cell).
    #[must_use]
    pub fn component_of(&self, position: Position) -> Vec<Position> {
        self.group_at(position)
            .map(|id| self.members(id))
            .unwrap_or_default()
    }

    /// Iterates over `(position, group)` pairs for occupied cells in
    /// row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, GroupId)> + '_ {
        self.ids
            .iter()
            .enumerate()
            .filter_map(|(i, id)| id.map(|id| (self.size.position_of(i), id)))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Tile;

    fn size3() -> GridSize {
        GridSize::new(3).unwrap()
    }

    fn board_from(order: &[u16]) -> Board {
        Board::from_permutation(size3(), order).unwrap()
    }

    #[test]
    fn empty_board_has_no_groups() {
        let groups = compute_groups(&Board::new(size3()));
        assert!(groups.is_empty());
        assert_eq!(groups.group_count(), 0);
    }

    #[test]
    fn solved_board_is_one_group() {
        let order: Vec<u16> = (0..9).collect();
        let groups = compute_groups(&board_from(&order));
        assert_eq!(groups.group_count(), 1);
        assert_eq!(groups.len(), 9);
        let id = groups.group_at(Position::new(0, 0)).unwrap();
        assert_eq!(groups.size_of(id), 9);
    }

    #[test]
    fn lone_tile_is_a_singleton() {
        let mut board = Board::new(size3());
        // Tile 8 far from home, no neighbors at all.
        board.place(Position::new(0, 0), Tile::new(8)).unwrap();
        let groups = compute_groups(&board);
        assert_eq!(groups.group_count(), 1);
        assert!(!groups.is_grouped(Position::new(0, 0)));
        assert_eq!(groups.component_of(Position::new(0, 0)).len(), 1);
    }

    #[test]
    fn adjacent_tiles_with_equal_offsets_connect() {
        // Tiles 0 and 1 (homes (0,0) and (0,1)) sitting at cells 4 and 5:
        // both have offset (+1, +1), adjacent, so they form one group.
        let mut board = Board::new(size3());
        board.place(Position::new(1, 1), Tile::new(0)).unwrap();
        board.place(Position::new(1, 2), Tile::new(1)).unwrap();
        let groups = compute_groups(&board);
        assert_eq!(groups.group_count(), 1);
        assert!(groups.same_group(Position::new(1, 1), Position::new(1, 2)));
        assert!(groups.is_grouped(Position::new(1, 1)));
    }

    #[test]
    fn adjacent_tiles_with_different_offsets_stay_apart() {
        // Tile 0 at home, tile 2 (home (0,2)) right next to it at (0,1).
        let mut board = Board::new(size3());
        board.place(Position::new(0, 0), Tile::new(0)).unwrap();
        board.place(Position::new(0, 1), Tile::new(2)).unwrap();
        let groups = compute_groups(&board);
        assert_eq!(groups.group_count(), 2);
        assert!(!groups.same_group(Position::new(0, 0), Position::new(0, 1)));
    }

    #[test]
    fn diagonal_match_does_not_connect() {
        // Same offset but only diagonally adjacent: not a group.
        let mut board = Board::new(size3());
        board.place(Position::new(1, 1), Tile::new(0)).unwrap();
        board.place(Position::new(2, 2), Tile::new(4)).unwrap();
        let groups = compute_groups(&board);
        assert_eq!(groups.group_count(), 2);
    }

    #[test]
    fn recompute_is_deterministic() {
        let order: Vec<u16> = vec![3, 1, 4, 0, 8, 5, 6, 7, 2];
        let board = board_from(&order);
        assert_eq!(compute_groups(&board), compute_groups(&board));
    }

    proptest! {
        /// The mapping covers exactly the occupied cells and component sizes
        /// sum to the number of occupied cells.
        #[test]
        fn partition_invariant(occupancy in proptest::collection::vec(any::<bool>(), 9)) {
            let size = size3();
            let mut board = Board::new(size);
            let mut next_home = 0_u16;
            for (i, filled) in occupancy.iter().enumerate() {
                if *filled {
                    board.place(size.position_of(i), Tile::new(next_home)).unwrap();
                    next_home += 1;
                }
            }
            let groups = compute_groups(&board);
            prop_assert_eq!(groups.len(), board.occupied_count());
            for pos in size.positions() {
                prop_assert_eq!(groups.group_at(pos).is_some(), board.tile_at(pos).is_some());
            }
            let total: usize = (0..groups.group_count())
                .map(|i| groups.sizes[i] as usize)
                .sum();
            prop_assert_eq!(total, board.occupied_count());
        }

        /// "Same group" is consistent with membership lists.
        #[test]
        fn membership_matches_ids(order in Just(()).prop_flat_map(|()| {
            proptest::sample::subsequence((0..9_u16).collect::<Vec<_>>(), 0..=9)
        })) {
            let size = size3();
            let mut board = Board::new(size);
            for (slot, tile) in order.iter().enumerate() {
                board.place(size.position_of(slot), Tile::new(*tile)).unwrap();
            }
            let groups = compute_groups(&board);
            for (pos, id) in groups.iter() {
                let members = groups.members(id);
                prop_assert!(members.contains(&pos));
                prop_assert_eq!(members.len(), groups.size_of(id));
                for member in members {
                    prop_assert!(groups.same_group(pos, member));
                }
            }
        }
    }
}
