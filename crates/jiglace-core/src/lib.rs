//! Core model for the Jiglace jigsaw-puzzle engine.
//!
//! This crate is the pure, I/O-free half of the engine. It owns the spatial
//! model and the placement rules:
//!
//! - [`GridSize`], [`Position`], [`Offset`] — grid geometry.
//! - [`Tile`], [`Board`] — tiles keyed by their home cell and the N×N
//!   occupancy map.
//! - [`compute_groups`] / [`GroupMap`] — the partition of board tiles into
//!   rigid connected groups (adjacent cells with identical offsets).
//! - [`MovingGroup`] / [`try_place`] — atomic drop resolution, including
//!   displacement of conflicting tiles into vacated or free cells.
//! - [`Tray`] — the flow-packed off-board holding area.
//!
//! Everything here is a pure function of (or an explicit mutation of) model
//! state passed in by the caller; rendering, input handling, and the drag
//! session lifecycle live in `jiglace-game`.

pub use self::{board::*, grid::*, groups::*, placement::*, tile::*, tray::*};

mod board;
mod grid;
mod groups;
mod placement;
mod tile;
mod tray;
