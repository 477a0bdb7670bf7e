//! Game session layer for the Jiglace jigsaw-puzzle engine.
//!
//! Builds the playable game on top of `jiglace-core`:
//!
//! - [`Game`] — the session: scrambled board, tray, drag lifecycle, win
//!   detection, and the [`GameEvent`] queue the UI drains each frame.
//! - [`Scramble`] — seeded non-identity shuffles.
//! - [`Layout`] / [`Viewport`] — pixel geometry and hit testing for the
//!   board and tray regions.
//! - [`GameSnapshot`] — serializable save state with validated restore.
//!
//! The crate stays UI-toolkit-free: pointer input comes in as pixel
//! coordinates, render state goes out as plain data.

pub use self::{event::*, game::*, layout::*, scramble::*, session::*, snapshot::*};

mod event;
mod game;
mod layout;
mod scramble;
mod session;
mod snapshot;
pub mod testing;
