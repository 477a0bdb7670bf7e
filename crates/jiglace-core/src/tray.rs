//! The tray: an off-board holding area for groups.
//!
//! Tiles sent to the tray keep their rigid-group shape but lose their board
//! cells. The tray lays groups out with a flow packer (left to right, top to
//! bottom, wrapping at the right edge) over geometry supplied by the layout
//! layer. Insertion is transactional: a group that does not fit leaves the
//! tray untouched.

use crate::{MovingTile, Offset, Tile};

/// Gap between packed groups, in pixels.
const GROUP_GAP: f32 = 8.0;

/// Identifier of one group held in the tray.
///
/// Unlike board group ids these are stable for the lifetime of the tray: a
/// group keeps its id until it is taken back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrayGroupId(u32);

impl TrayGroupId {
    /// The raw id value, for snapshots.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Rebuilds an id from its raw value, for snapshot restore.
    #[must_use]
    pub fn from_value(value: u32) -> Self {
        Self(value)
    }
}

/// Tray geometry, in pixels. Cell dimensions are already shrunken relative
/// to board cells; the tray treats them as opaque box units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrayParams {
    /// Usable tray width.
    pub width: f32,
    /// Usable tray height.
    pub height: f32,
    /// Width of one tray cell.
    pub cell_width: f32,
    /// Height of one tray cell.
    pub cell_height: f32,
}

/// One tile stored in the tray, with its cell offset from the top-left of
/// its group's bounding box. Offsets are normalized: both components are
/// non-negative and each group has a member at row 0 and one at column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrayEntry {
    /// The stored tile.
    pub tile: Tile,
    /// The group the tile travels with.
    pub group: TrayGroupId,
    /// Cell offset from the group's bounding-box origin.
    pub offset: Offset,
}

/// A group's placed rectangle within the tray, produced by [`Tray::layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackedGroup {
    /// The packed group.
    pub group: TrayGroupId,
    /// Left edge, relative to the tray.
    pub x: f32,
    /// Top edge, relative to the tray.
    pub y: f32,
    /// Bounding-box width in pixels.
    pub width: f32,
    /// Bounding-box height in pixels.
    pub height: f32,
}

/// Why a tray operation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TrayError {
    /// The packed layout would overflow the tray rectangle.
    #[display("the tray has no room for the group")]
    Full,
    /// No group with the given id is in the tray.
    #[display("no tray group with id {}", id.value())]
    UnknownGroup {
        /// The unknown id.
        id: TrayGroupId,
    },
    /// A stored entry carried a negative or non-normalized offset.
    #[display("tray entry for {tile} has invalid offset {offset}")]
    InvalidEntry {
        /// The offending tile.
        tile: Tile,
        /// Its rejected offset.
        offset: Offset,
    },
}

/// The off-board holding area.
///
/// Value-semantic like [`Board`](crate::Board): the mutating operations
/// return a new tray and leave `self` untouched, so the caller can keep the
/// old value for rollback.
#[derive(Debug, Clone, PartialEq)]
pub struct Tray {
    params: TrayParams,
    entries: Vec<TrayEntry>,
    next_id: u32,
}

impl Tray {
    /// Creates an empty tray.
    #[must_use]
    pub fn new(params: TrayParams) -> Self {
        Self {
            params,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Rebuilds a tray from stored entries, for snapshot restore.
    ///
    /// Packing is not re-checked: restoring on a smaller viewport keeps the
    /// contents and lets them overflow visually, the same as
    /// [`Tray::with_params`].
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::InvalidEntry`] if an offset has a negative
    /// component.
    pub fn from_entries(params: TrayParams, entries: Vec<TrayEntry>) -> Result<Self, TrayError> {
        for entry in &entries {
            if entry.offset.rows < 0 || entry.offset.cols < 0 {
                return Err(TrayError::InvalidEntry {
                    tile: entry.tile,
                    offset: entry.offset,
                });
            }
        }
        let next_id = entries
            .iter()
            .map(|entry| entry.group.value() + 1)
            .max()
            .unwrap_or(0);
        Ok(Self {
            params,
            entries,
            next_id,
        })
    }

    /// The tray geometry.
    #[must_use]
    pub fn params(&self) -> TrayParams {
        self.params
    }

    /// Whether the tray holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tiles in the tray.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.entries.len()
    }

    /// The stored entries, grouped contiguously in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[TrayEntry] {
        &self.entries
    }

    /// Group ids in insertion order.
    #[must_use]
    pub fn groups(&self) -> Vec<TrayGroupId> {
        let mut ids = Vec::new();
        for entry in &self.entries {
            if ids.last() != Some(&entry.group) {
                ids.push(entry.group);
            }
        }
        ids
    }

    /// The members of `id` as anchor-relative moving tiles, where the anchor
    /// is the member at the group's bounding-box origin side (the first
    /// stored entry).
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::UnknownGroup`] if `id` is not in the tray.
    pub fn group_members(&self, id: TrayGroupId) -> Result<Vec<MovingTile>, TrayError> {
        let members: Vec<&TrayEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.group == id)
            .collect();
        let first = members.first().ok_or(TrayError::UnknownGroup { id })?;
        let anchor = first.offset;
        Ok(members
            .iter()
            .map(|entry| MovingTile {
                tile: entry.tile,
                offset: entry.offset - anchor,
            })
            .collect())
    }

    /// The group holding `tile`, if the tile is in the tray.
    #[must_use]
    pub fn find_tile(&self, tile: Tile) -> Option<TrayGroupId> {
        self.entries
            .iter()
            .find(|entry| entry.tile == tile)
            .map(|entry| entry.group)
    }

    /// Inserts a group shape into the tray, returning the new tray and the
    /// id assigned to the group.
    ///
    /// `shape` carries anchor-relative offsets (as produced by a drag); they
    /// are normalized to the bounding-box origin on the way in. `self` is
    /// never mutated, so a failed insert costs nothing.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::Full`] if the packed layout including the new
    /// group would overflow the tray rectangle.
    pub fn try_insert(&self, shape: &[MovingTile]) -> Result<(Self, TrayGroupId), TrayError> {
        let min_rows = shape.iter().map(|m| m.offset.rows).min().unwrap_or(0);
        let min_cols = shape.iter().map(|m| m.offset.cols).min().unwrap_or(0);
        let id = TrayGroupId(self.next_id);
        let mut next = Self {
            params: self.params,
            entries: self.entries.clone(),
            next_id: self.next_id + 1,
        };
        next.entries.extend(shape.iter().map(|member| TrayEntry {
            tile: member.tile,
            group: id,
            offset: member.offset - Offset::new(min_rows, min_cols),
        }));
        if next.pack().is_none() {
            return Err(TrayError::Full);
        }
        Ok((next, id))
    }

    /// Removes a group from the tray, returning the new tray and the group's
    /// members as anchor-relative moving tiles.
    ///
    /// # Errors
    ///
    /// Returns [`TrayError::UnknownGroup`] if `id` is not in the tray.
    pub fn take_group(&self, id: TrayGroupId) -> Result<(Self, Vec<MovingTile>), TrayError> {
        let members = self.group_members(id)?;
        let next = Self {
            params: self.params,
            entries: self
                .entries
                .iter()
                .copied()
                .filter(|entry| entry.group != id)
                .collect(),
            next_id: self.next_id,
        };
        Ok((next, members))
    }

    /// Changes the tray geometry without touching the contents.
    ///
    /// Resizing never fails; a tray that no longer fits its contents simply
    /// overflows visually until groups are dragged back out.
    #[must_use]
    pub fn with_params(&self, params: TrayParams) -> Self {
        Self {
            params,
            entries: self.entries.clone(),
            next_id: self.next_id,
        }
    }

    /// The packed rectangles of the current contents, in insertion order.
    ///
    /// Falls back to the unchecked flow when the contents overflow (possible
    /// only after a shrinking [`Tray::with_params`]).
    #[must_use]
    pub fn layout(&self) -> Vec<PackedGroup> {
        self.pack().unwrap_or_else(|| self.flow())
    }

    /// The bounding box of `id` in cells, as `(rows, cols)`.
    fn bounding_box(&self, id: TrayGroupId) -> (i16, i16) {
        let mut rows = 0_i16;
        let mut cols = 0_i16;
        for entry in self.entries.iter().filter(|entry| entry.group == id) {
            rows = rows.max(entry.offset.rows + 1);
            cols = cols.max(entry.offset.cols + 1);
        }
        (rows, cols)
    }

    /// Runs the flow packer without the tray-rectangle bounds check.
    fn flow(&self) -> Vec<PackedGroup> {
        let mut packed = Vec::new();
        let mut x = 0.0_f32;
        let mut y = 0.0_f32;
        let mut row_height = 0.0_f32;
        for id in self.groups() {
            let (rows, cols) = self.bounding_box(id);
            let width = f32::from(cols) * self.params.cell_width;
            let height = f32::from(rows) * self.params.cell_height;
            if x > 0.0 && x + width > self.params.width {
                x = 0.0;
                y += row_height + GROUP_GAP;
                row_height = 0.0;
            }
            packed.push(PackedGroup {
                group: id,
                x,
                y,
                width,
                height,
            });
            x += width + GROUP_GAP;
            row_height = row_height.max(height);
        }
        packed
    }

    /// Packs the contents, or `None` if they overflow the tray rectangle.
    fn pack(&self) -> Option<Vec<PackedGroup>> {
        let packed = self.flow();
        let fits = packed.iter().all(|rect| {
            rect.width <= self.params.width && rect.y + rect.height <= self.params.height
        });
        fits.then_some(packed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TrayParams {
        // Room for three 1x1 cells per row, two rows.
        TrayParams {
            width: 100.0,
            height: 70.0,
            cell_width: 30.0,
            cell_height: 30.0,
        }
    }

    fn single(tile: u16) -> Vec<MovingTile> {
        vec![MovingTile {
            tile: Tile::new(tile),
            offset: Offset::ZERO,
        }]
    }

    #[test]
    fn groups_flow_left_to_right_and_wrap() {
        let tray = Tray::new(params());
        let (tray, a) = tray.try_insert(&single(0)).unwrap();
        let (tray, b) = tray.try_insert(&single(1)).unwrap();
        let (tray, c) = tray.try_insert(&single(2)).unwrap();
        let (tray, d) = tray.try_insert(&single(3)).unwrap();

        let layout = tray.layout();
        let rect = |id| *layout.iter().find(|r| r.group == id).unwrap();
        assert_eq!((rect(a).x, rect(a).y), (0.0, 0.0));
        assert_eq!((rect(b).x, rect(b).y), (38.0, 0.0));
        // 76 + 30 > 100 so the third group wraps; the fourth follows it.
        assert_eq!((rect(c).x, rect(c).y), (0.0, 38.0));
        assert_eq!((rect(d).x, rect(d).y), (38.0, 38.0));
    }

    #[test]
    fn insert_failure_leaves_tray_untouched() {
        let tray = Tray::new(params());
        let (tray, _) = tray.try_insert(&single(0)).unwrap();
        let (tray, _) = tray.try_insert(&single(1)).unwrap();
        let (tray, _) = tray.try_insert(&single(2)).unwrap();
        let (tray, _) = tray.try_insert(&single(3)).unwrap();
        let before = tray.clone();

        // A fifth row-filling group would need a third row: 2*(30+8)+30 > 70.
        assert_eq!(tray.try_insert(&single(4)), Err(TrayError::Full));
        assert_eq!(tray, before);
        assert_eq!(tray.tile_count(), 4);
    }

    #[test]
    fn oversized_group_is_rejected() {
        let tray = Tray::new(params());
        // A 1x4 strip is wider than the tray even alone.
        let strip: Vec<MovingTile> = (0..4)
            .map(|i| MovingTile {
                tile: Tile::new(i),
                offset: Offset::new(0, i16::try_from(i).unwrap()),
            })
            .collect();
        assert_eq!(tray.try_insert(&strip), Err(TrayError::Full));
        assert!(tray.is_empty());
    }

    #[test]
    fn shape_offsets_are_normalized() {
        let tray = Tray::new(params());
        // Anchor in the middle: offsets go negative.
        let shape = vec![
            MovingTile {
                tile: Tile::new(4),
                offset: Offset::ZERO,
            },
            MovingTile {
                tile: Tile::new(3),
                offset: Offset::new(0, -1),
            },
        ];
        let (tray, id) = tray.try_insert(&shape).unwrap();
        for entry in tray.entries() {
            assert!(entry.offset.rows >= 0 && entry.offset.cols >= 0);
        }

        // Taking the group back restores offsets relative to the first
        // stored member (tile 4), so the original shape survives the trip.
        let (tray, members) = tray.take_group(id).unwrap();
        assert!(tray.is_empty());
        assert_eq!(members[0].tile, Tile::new(4));
        assert_eq!(members[0].offset, Offset::ZERO);
        assert_eq!(members[1].offset, Offset::new(0, -1));
    }

    #[test]
    fn take_group_removes_only_that_group() {
        let tray = Tray::new(params());
        let (tray, a) = tray.try_insert(&single(0)).unwrap();
        let (tray, b) = tray.try_insert(&single(1)).unwrap();

        let (tray, members) = tray.take_group(a).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].tile, Tile::new(0));
        assert_eq!(tray.tile_count(), 1);
        assert_eq!(tray.find_tile(Tile::new(1)), Some(b));
        assert_eq!(tray.find_tile(Tile::new(0)), None);

        assert_eq!(
            tray.take_group(a),
            Err(TrayError::UnknownGroup { id: a })
        );
    }

    #[test]
    fn group_ids_are_not_reused() {
        let tray = Tray::new(params());
        let (tray, a) = tray.try_insert(&single(0)).unwrap();
        let (tray, _) = tray.take_group(a).unwrap();
        let (_, b) = tray.try_insert(&single(0)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn shrinking_params_never_fails() {
        let tray = Tray::new(params());
        let (tray, _) = tray.try_insert(&single(0)).unwrap();
        let (tray, _) = tray.try_insert(&single(1)).unwrap();
        let shrunk = tray.with_params(TrayParams {
            width: 20.0,
            height: 20.0,
            cell_width: 30.0,
            cell_height: 30.0,
        });
        assert_eq!(shrunk.tile_count(), 2);
        // Layout still reports every group, overflowing or not.
        assert_eq!(shrunk.layout().len(), 2);
    }

    #[test]
    fn from_entries_round_trip() {
        let tray = Tray::new(params());
        let (tray, _) = tray.try_insert(&single(0)).unwrap();
        let (tray, _) = tray.try_insert(&single(3)).unwrap();

        let rebuilt = Tray::from_entries(tray.params(), tray.entries().to_vec()).unwrap();
        assert_eq!(rebuilt, tray);

        // A fresh insert after restore must not collide with stored ids.
        let (rebuilt, id) = rebuilt.try_insert(&single(5)).unwrap();
        assert_eq!(rebuilt.groups().len(), 3);
        assert!(rebuilt.groups().iter().filter(|&&g| g == id).count() == 1);
    }

    #[test]
    fn from_entries_rejects_negative_offsets() {
        let entries = vec![TrayEntry {
            tile: Tile::new(0),
            group: TrayGroupId::from_value(0),
            offset: Offset::new(-1, 0),
        }];
        assert!(matches!(
            Tray::from_entries(params(), entries),
            Err(TrayError::InvalidEntry { .. })
        ));
    }
}
