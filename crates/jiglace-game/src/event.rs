//! Game events and the per-frame event queue.

use std::collections::VecDeque;

use jiglace_core::GridSize;

/// Identifier of a puzzle image in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PuzzleId(u32);

impl PuzzleId {
    /// Creates a puzzle id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw id value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Pixel dimensions of the source image. The engine only needs the aspect
/// data for snapshots; decoding and slicing are the UI's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Source image width in pixels.
    pub width: u32,
    /// Source image height in pixels.
    pub height: u32,
}

/// The puzzle being played: an image identity plus its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Puzzle {
    /// Catalog id of the image.
    pub id: PuzzleId,
    /// Image dimensions.
    pub image: ImageInfo,
}

/// Something the UI should react to (sounds, effects, scoring).
///
/// Events are queued on the [`Game`](crate::Game) and drained with
/// [`Game::take_events`](crate::Game::take_events); the engine never blocks
/// on a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh scramble started.
    Started {
        /// The puzzle in play.
        puzzle: PuzzleId,
        /// The chosen board size.
        grid: GridSize,
    },
    /// A drop merged the moved tiles into a larger group (snap feedback).
    PiecesConnected,
    /// Every tile reached its home cell.
    Won {
        /// The solved puzzle.
        puzzle: PuzzleId,
        /// Points awarded for this board size.
        points: u32,
    },
}

/// FIFO queue of pending [`GameEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    /// Removes and returns all pending events in arrival order.
    pub fn take_all(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Whether no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_order() {
        let mut queue = EventQueue::new();
        let puzzle = PuzzleId::new(7);
        queue.push(GameEvent::PiecesConnected);
        queue.push(GameEvent::Won { puzzle, points: 2 });
        assert_eq!(
            queue.take_all(),
            vec![
                GameEvent::PiecesConnected,
                GameEvent::Won { puzzle, points: 2 }
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.take_all().is_empty());
    }
}
