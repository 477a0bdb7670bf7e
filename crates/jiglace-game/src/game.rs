//! The playable game session.

use jiglace_core::{
    Board, GridSize, MovingGroup, MovingTile, Offset, Position, Tile, Tray, compute_groups,
    try_place,
};
use log::{debug, info};

use crate::{
    DragSession, DropOutcome, EventQueue, GameEvent, HitRegion, Layout, Puzzle, Scramble,
    SessionError, Viewport,
};

/// One puzzle being played: scrambled board, tray, and the drag lifecycle.
///
/// All pointer input arrives as layout-space pixel coordinates (see
/// [`Layout`]); the game classifies them itself, so the UI never needs to
/// know which cell or tray group is under the pointer.
///
/// # Example
///
/// ```
/// use jiglace_core::GridSize;
/// use jiglace_game::{Game, ImageInfo, Puzzle, PuzzleId, Viewport};
///
/// let puzzle = Puzzle {
///     id: PuzzleId::new(1),
///     image: ImageInfo { width: 1024, height: 1024 },
/// };
/// let viewport = Viewport { width: 430.0, height: 800.0 };
/// let mut game = Game::new(puzzle, GridSize::new(3)?, viewport, 42);
///
/// // A fresh game starts scrambled, never solved.
/// assert!(!game.is_solved());
/// assert!(game.board().is_full());
/// # Ok::<(), jiglace_core::GridSizeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    puzzle: Puzzle,
    grid: GridSize,
    viewport: Viewport,
    layout: Layout,
    board: Board,
    tray: Tray,
    session: Option<DragSession>,
    solved: bool,
    events: EventQueue,
}

impl Game {
    /// Starts a new game with a seeded scramble.
    #[must_use]
    pub fn new(puzzle: Puzzle, grid: GridSize, viewport: Viewport, seed: u64) -> Self {
        let layout = Layout::compute(grid, puzzle.image, viewport);
        let scramble = Scramble::generate(grid, seed);
        let board = Board::from_permutation(grid, scramble.order())
            .expect("a scramble is a permutation by construction");
        let tray = Tray::new(layout.tray_params());
        let mut events = EventQueue::new();
        events.push(GameEvent::Started {
            puzzle: puzzle.id,
            grid,
        });
        info!("started puzzle {} on a {grid} board, seed {seed}", puzzle.id.value());
        Self {
            puzzle,
            grid,
            viewport,
            layout,
            board,
            tray,
            session: None,
            solved: false,
            events,
        }
    }

    /// Rebuilds a game from validated restored state.
    pub(crate) fn from_parts(
        puzzle: Puzzle,
        grid: GridSize,
        viewport: Viewport,
        board: Board,
        tray: Tray,
    ) -> Self {
        let layout = Layout::compute(grid, puzzle.image, viewport);
        let solved = board.is_solved() && tray.is_empty();
        Self {
            puzzle,
            grid,
            viewport,
            layout,
            board,
            tray,
            session: None,
            solved,
            events: EventQueue::new(),
        }
    }

    /// The puzzle in play.
    #[must_use]
    pub fn puzzle(&self) -> Puzzle {
        self.puzzle
    }

    /// The board size.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// The current pixel geometry.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The board occupancy. During a drag the lifted group is absent from
    /// the board; render it from [`Game::session`] instead.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The tray contents.
    #[must_use]
    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    /// The in-flight drag, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether the puzzle has been completed.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Points awarded for completing a board of the given size.
    #[must_use]
    pub fn points_for(grid: GridSize) -> u32 {
        match grid.n() {
            4 => 2,
            5 => 3,
            _ => 1,
        }
    }

    /// Drains the pending event queue.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.take_all()
    }

    /// Rescrambles with a (possibly new) board size, keeping the puzzle.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionActive`] if a drag is in progress.
    pub fn restart(&mut self, grid: GridSize, seed: u64) -> Result<(), SessionError> {
        if self.session.is_some() {
            return Err(SessionError::SessionActive);
        }
        *self = Self::new(self.puzzle, grid, self.viewport, seed);
        Ok(())
    }

    /// Recomputes the layout for a resized viewport. Board occupancy and
    /// tray contents are unchanged; only pixel geometry moves.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionActive`] if a drag is in progress:
    /// pointer coordinates and the rollback copies would go stale mid-drag,
    /// so the caller debounces resizes until the drag ends.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SessionError> {
        if self.session.is_some() {
            return Err(SessionError::SessionActive);
        }
        self.viewport = viewport;
        self.layout = Layout::compute(self.grid, self.puzzle.image, viewport);
        self.tray = self.tray.with_params(self.layout.tray_params());
        Ok(())
    }

    /// Picks up whatever is under `(x, y)`: a board group or a tray group.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NothingAt`] if the point hits neither a board
    /// tile nor a tray tile, plus the errors of [`Game::begin_board_drag`]
    /// and [`Game::begin_tray_drag`].
    pub fn begin_drag_at(&mut self, x: f32, y: f32) -> Result<(), SessionError> {
        match self.layout.hit_test(x, y) {
            Some(HitRegion::Board(position)) => self.begin_board_drag(position, (x, y)),
            Some(HitRegion::Tray) => {
                let tile = self
                    .tray_tile_at(x, y)
                    .ok_or(SessionError::NothingAt { x, y })?;
                self.begin_tray_drag(tile, (x, y))
            }
            None => Err(SessionError::NothingAt { x, y }),
        }
    }

    /// Lifts the whole group containing the tile at `position` off the
    /// board and starts a drag.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadySolved`], [`SessionError::SessionActive`],
    /// or [`SessionError::EmptyCell`].
    pub fn begin_board_drag(
        &mut self,
        position: Position,
        pointer: (f32, f32),
    ) -> Result<(), SessionError> {
        self.check_can_pick()?;
        let picked = self
            .board
            .tile_at(position)
            .ok_or(SessionError::EmptyCell { position })?;
        let saved_board = self.board.clone();
        let saved_tray = self.tray.clone();
        let Some(group) = MovingGroup::lift(&mut self.board, position) else {
            return Err(SessionError::EmptyCell { position });
        };
        debug!("picked {picked} at {position} with {} companions", group.len() - 1);
        self.session = Some(DragSession {
            group,
            picked,
            pointer,
            saved_board,
            saved_tray,
        });
        Ok(())
    }

    /// Takes the tray group holding `tile` and starts a drag anchored on
    /// that tile.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadySolved`], [`SessionError::SessionActive`],
    /// or [`SessionError::TileNotInTray`].
    pub fn begin_tray_drag(&mut self, tile: Tile, pointer: (f32, f32)) -> Result<(), SessionError> {
        self.check_can_pick()?;
        let id = self
            .tray
            .find_tile(tile)
            .ok_or(SessionError::TileNotInTray { tile })?;
        let saved_board = self.board.clone();
        let saved_tray = self.tray.clone();
        let (tray, members) = self
            .tray
            .take_group(id)
            .map_err(|_| SessionError::TileNotInTray { tile })?;
        // Re-anchor the shape on the grabbed tile so the drop target is the
        // cell under the pointer.
        let grabbed = members
            .iter()
            .find(|member| member.tile == tile)
            .copied()
            .ok_or(SessionError::TileNotInTray { tile })?;
        let members: Vec<MovingTile> = members
            .iter()
            .map(|member| MovingTile {
                tile: member.tile,
                offset: member.offset - grabbed.offset,
            })
            .collect();
        debug!("picked {tile} from the tray with {} companions", members.len() - 1);
        self.tray = tray;
        self.session = Some(DragSession {
            group: MovingGroup::from_tray(members),
            picked: tile,
            pointer,
            saved_board,
            saved_tray,
        });
        Ok(())
    }

    /// Updates the pointer position of the active drag.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveSession`] if nothing is being dragged.
    pub fn drag_move(&mut self, pointer: (f32, f32)) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.pointer = pointer;
        Ok(())
    }

    /// The board cells the dragged group would cover if released now, for
    /// drop-preview highlighting. `None` when there is no drag, the pointer
    /// is off the board, or part of the group would land out of bounds.
    #[must_use]
    pub fn preview_targets(&self) -> Option<Vec<Position>> {
        let session = self.session.as_ref()?;
        let (x, y) = session.pointer;
        match self.layout.hit_test(x, y)? {
            HitRegion::Board(position) => session.group.target_cells(&self.board, position),
            HitRegion::Tray => None,
        }
    }

    /// Releases the active drag, resolving it against whatever is under the
    /// pointer. Invalid drops restore the pre-drag state verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveSession`] if nothing is being dragged.
    pub fn release(&mut self) -> Result<DropOutcome, SessionError> {
        let session = self.session.take().ok_or(SessionError::NoActiveSession)?;
        let (x, y) = session.pointer;
        match self.layout.hit_test(x, y) {
            Some(HitRegion::Board(target)) => Ok(self.drop_on_board(session, target)),
            Some(HitRegion::Tray) => Ok(self.drop_on_tray(session)),
            None => {
                debug!("released outside the play area, returning the group");
                self.rollback(session);
                Ok(DropOutcome::Returned)
            }
        }
    }

    /// Abandons the active drag and restores the pre-drag state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoActiveSession`] if nothing is being dragged.
    pub fn cancel_drag(&mut self) -> Result<(), SessionError> {
        let session = self.session.take().ok_or(SessionError::NoActiveSession)?;
        self.rollback(session);
        Ok(())
    }

    fn check_can_pick(&self) -> Result<(), SessionError> {
        if self.solved {
            return Err(SessionError::AlreadySolved);
        }
        if self.session.is_some() {
            return Err(SessionError::SessionActive);
        }
        Ok(())
    }

    fn drop_on_board(&mut self, session: DragSession, target: Position) -> DropOutcome {
        match try_place(&self.board, &session.group, target) {
            Ok(board) => {
                self.board = board;
                let moved = session.group.len();
                let connected = compute_groups(&self.board).component_of(target).len() > moved;
                if connected {
                    self.events.push(GameEvent::PiecesConnected);
                }
                let won = self.board.is_solved() && self.tray.is_empty();
                if won {
                    self.solved = true;
                    let points = Self::points_for(self.grid);
                    self.events.push(GameEvent::Won {
                        puzzle: self.puzzle.id,
                        points,
                    });
                    info!(
                        "puzzle {} solved on a {} board for {points} points",
                        self.puzzle.id.value(),
                        self.grid
                    );
                } else {
                    debug!("dropped {moved} tiles at {target}, connected: {connected}");
                }
                DropOutcome::Board { connected, won }
            }
            Err(err) => {
                debug!("drop at {target} rejected ({err}), returning the group");
                self.rollback(session);
                DropOutcome::Returned
            }
        }
    }

    fn drop_on_tray(&mut self, session: DragSession) -> DropOutcome {
        match self.tray.try_insert(session.group.members()) {
            Ok((tray, id)) => {
                debug!(
                    "parked {} tiles in the tray as group {}",
                    session.group.len(),
                    id.value()
                );
                self.tray = tray;
                DropOutcome::Tray
            }
            Err(err) => {
                debug!("tray refused the group ({err}), returning it");
                self.rollback(session);
                DropOutcome::Returned
            }
        }
    }

    fn rollback(&mut self, session: DragSession) {
        self.board = session.saved_board;
        self.tray = session.saved_tray;
    }

    /// The tray tile under a layout-space coordinate, resolved through the
    /// packed group rectangles.
    fn tray_tile_at(&self, x: f32, y: f32) -> Option<Tile> {
        let (origin_x, origin_y) = self.layout.tray_origin();
        let (x, y) = (x - origin_x, y - origin_y);
        let params = self.tray.params();
        let rect = self.tray.layout().into_iter().find(|rect| {
            (rect.x..rect.x + rect.width).contains(&x)
                && (rect.y..rect.y + rect.height).contains(&y)
        })?;
        #[expect(clippy::cast_possible_truncation)]
        let offset = Offset::new(
            ((y - rect.y) / params.cell_height) as i16,
            ((x - rect.x) / params.cell_width) as i16,
        );
        self.tray
            .entries()
            .iter()
            .find(|entry| entry.group == rect.group && entry.offset == offset)
            .map(|entry| entry.tile)
    }
}
