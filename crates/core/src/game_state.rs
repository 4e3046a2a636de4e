//! Game state module - the simulation engine
//!
//! Ties together the board, the shape table, the rotation transform, the bag
//! and scoring. Runs on a fixed step: the caller applies at most one command
//! and then calls [`GameState::tick`] once per step.
//!
//! Lifecycle: `Running` until a freshly spawned piece does not fit, then
//! `Over`. While over, every command except [`GameState::reset`] is ignored.

use log::{debug, info, warn};

use crate::board::Board;
use crate::pieces::{spawn_occupancy, Occupancy};
use crate::rng::RandomBag;
use crate::rotation::{rotate_ccw, rotate_cw};
use crate::scoring::line_clear_score;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// The falling piece: kind, current orientation and box position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub occupancy: Occupancy,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Base orientation at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            occupancy: spawn_occupancy(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn color(&self) -> PieceColor {
        self.kind.color()
    }

    /// Absolute board coordinates of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.occupancy
            .cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Collision predicate: every filled cell in bounds and empty.
    pub fn fits(&self, board: &Board) -> bool {
        board.fits(self.occupancy, self.x, self.y)
    }

    /// Provisional result of `mv`; not validated.
    pub fn moved(&self, mv: Move) -> Self {
        match mv {
            Move::RotateCw => Self {
                occupancy: rotate_cw(self.occupancy, self.kind),
                ..*self
            },
            Move::RotateCcw => Self {
                occupancy: rotate_ccw(self.occupancy, self.kind),
                ..*self
            },
            Move::Left | Move::Right | Move::Down => {
                let (dx, dy) = mv.offset();
                Self {
                    x: self.x + dx,
                    y: self.y + dy,
                    ..*self
                }
            }
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    /// `None` only after a failed spawn.
    active: Option<ActivePiece>,
    next: PieceKind,
    bag: RandomBag,
    score: u32,
    lines: u32,
    gravity_counter: u32,
    game_over: bool,
    /// Last lock (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a running game on an empty board.
    pub fn new(seed: u64) -> Self {
        Self::with_board(seed, Board::new())
    }

    /// Create a game on a prepared board.
    ///
    /// If the first piece does not fit the game starts out over.
    pub fn with_board(seed: u64, board: Board) -> Self {
        let mut state = Self {
            board,
            active: None,
            next: PieceKind::I,
            bag: RandomBag::new(seed),
            score: 0,
            lines: 0,
            gravity_counter: 0,
            game_over: false,
            last_event: None,
        };
        state.deal_first_pieces();
        state
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn gravity_counter(&self) -> u32 {
        self.gravity_counter
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn force_active(&mut self, kind: PieceKind) {
        self.active = Some(ActivePiece::spawn(kind));
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.game_over;
        out.paused = false;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Draw current and next from the bag and place current at the spawn point.
    fn deal_first_pieces(&mut self) {
        self.next = self.bag.next();
        self.spawn_next();
    }

    /// Promote `next` to the active piece and draw a new `next`.
    ///
    /// Returns false and ends the game when the spawn cells are blocked; the
    /// board, the active piece and `next` are then left as they were.
    pub fn spawn_next(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let piece = ActivePiece::spawn(self.next);
        if !piece.fits(&self.board) {
            self.game_over = true;
            info!(
                "game over: {:?} cannot spawn, final score {} ({} lines)",
                piece.kind, self.score, self.lines
            );
            return false;
        }

        self.active = Some(piece);
        self.next = self.bag.next();
        debug!("spawned {:?}, next {:?}", piece.kind, self.next);
        true
    }

    /// Try to move or rotate the active piece. Commits only if the result fits.
    pub fn try_move(&mut self, mv: Move) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.moved(mv);
        if !candidate.fits(&self.board) {
            return false;
        }

        self.active = Some(candidate);
        true
    }

    /// Advance one fixed step.
    ///
    /// Every `GRAVITY_TICKS` steps the piece falls one row; if it cannot, it
    /// locks, full rows are cleared and scored, and the next piece spawns.
    /// Returns true when gravity acted this step.
    pub fn tick(&mut self) -> bool {
        if self.game_over || self.active.is_none() {
            return false;
        }

        self.gravity_counter += 1;
        if self.gravity_counter < GRAVITY_TICKS {
            return false;
        }
        self.gravity_counter = 0;

        if !self.try_move(Move::Down) {
            self.lock_piece();
        }
        true
    }

    /// Lock the active piece onto the board, clear full rows and spawn the next piece.
    pub fn lock_piece(&mut self) {
        if self.game_over {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        if !self
            .board
            .lock(active.occupancy, active.x, active.y, active.kind)
        {
            warn!(
                "{:?} at ({}, {}) overlaps locked cells, lock skipped",
                active.kind, active.x, active.y
            );
            self.active = Some(active);
            return;
        }
        debug!("locked {:?} at ({}, {})", active.kind, active.x, active.y);

        let full = self.board.full_rows();
        let cleared = self.board.clear_and_compact(&full);
        let points = line_clear_score(cleared);
        if cleared > 0 {
            self.score = self.score.saturating_add(points);
            self.lines += cleared as u32;
            info!(
                "cleared rows {:?} for {} points, score {}",
                full.as_slice(),
                points,
                self.score
            );
        }

        let topped_out = !self.spawn_next();
        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            points,
            topped_out,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Start over: empty board, zero score, two fresh pieces from the bag.
    ///
    /// The bag keeps its RNG stream, so consecutive games differ.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.gravity_counter = 0;
        self.game_over = false;
        self.last_event = None;
        self.deal_first_pieces();
        info!("game reset");
    }

    /// Row the active piece would land on if dropped straight down.
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while self.board.fits(active.occupancy, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Apply a game action. `Pause` is a control-loop concern and is ignored here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Reset => {
                self.reset();
                true
            }
            GameAction::Pause => false,
            _ => match action.as_move() {
                Some(mv) => self.try_move(mv),
                None => false,
            },
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row_except(board: &mut Board, y: i8, hole: Option<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if Some(x) != hole {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    /// Soft drop to the floor, then let gravity lock the piece.
    fn drop_and_lock(state: &mut GameState) {
        while state.try_move(Move::Down) {}
        for _ in 0..GRAVITY_TICKS {
            state.tick();
        }
    }

    fn shift_to(state: &mut GameState, x: i8) {
        while state.active.unwrap().x > x {
            assert!(state.try_move(Move::Left));
        }
        while state.active.unwrap().x < x {
            assert!(state.try_move(Move::Right));
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.gravity_counter, 0);
        assert!(state.board.cells().iter().all(|c| c.is_none()));

        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(active.occupancy, spawn_occupancy(active.kind));
    }

    #[test]
    fn test_first_two_pieces_come_from_one_bag() {
        let state = GameState::new(5);
        assert_ne!(state.active.unwrap().kind, state.next);
        assert_eq!(state.bag.remaining(), 5);
    }

    #[test]
    fn test_spawn_promotes_next() {
        let mut state = GameState::new(12345);
        let next = state.next;

        assert!(state.spawn_next());
        assert_eq!(state.active.unwrap().kind, next);
        assert_eq!(state.active.unwrap().x, SPAWN_X);
    }

    #[test]
    fn test_spawn_blocked_ends_game_and_keeps_board() {
        let mut state = GameState::new(12345);
        fill_row_except(state.board_mut(), 0, Some(0));
        fill_row_except(state.board_mut(), 1, Some(9));
        let board_before = state.board.clone();
        let next_before = state.next;

        assert!(!state.spawn_next());
        assert!(state.game_over);
        assert_eq!(state.board, board_before);
        assert_eq!(state.next, next_before);
    }

    #[test]
    fn test_move_left_at_wall_is_rejected() {
        let mut state = GameState::new(1);
        state.force_active(PieceKind::O);

        // O's leftmost column is box column 1.
        shift_to(&mut state, -1);
        let before = state.active.unwrap();
        assert_eq!(before.cells().map(|(x, _)| x).min(), Some(0));

        assert!(!state.try_move(Move::Left));
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_move_right_at_wall_is_rejected() {
        let mut state = GameState::new(1);
        state.force_active(PieceKind::I);
        shift_to(&mut state, 6);
        assert!(!state.try_move(Move::Right));
        assert_eq!(state.active.unwrap().x, 6);
    }

    #[test]
    fn test_soft_drop_stops_at_floor_without_locking() {
        let mut state = GameState::new(1);
        state.force_active(PieceKind::O);
        while state.try_move(Move::Down) {}

        let active = state.active.unwrap();
        assert_eq!(active.y, 17);
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_rotation_commits_when_it_fits() {
        let mut state = GameState::new(1);
        state.force_active(PieceKind::T);

        assert!(state.try_move(Move::RotateCw));
        assert_eq!(
            state.active.unwrap().occupancy,
            rotate_cw(spawn_occupancy(PieceKind::T), PieceKind::T)
        );
        assert!(state.try_move(Move::RotateCcw));
        assert_eq!(state.active.unwrap().occupancy, spawn_occupancy(PieceKind::T));
    }

    #[test]
    fn test_blocked_rotation_leaves_piece_unchanged() {
        let mut state = GameState::new(1);
        state.force_active(PieceKind::I);
        // Vertical I after a ccw turn lives in box column 1 = board column 4.
        state.board_mut().set(4, 3, Some(PieceKind::Z));

        let before = state.active.unwrap();
        assert!(!state.try_move(Move::RotateCcw));
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_rotation_has_no_wall_kick() {
        let mut state = GameState::new(1);
        state.force_active(PieceKind::I);
        assert!(state.try_move(Move::RotateCw));
        // Vertical bar in box column 2; push it against the left wall.
        while state.try_move(Move::Left) {}
        let before = state.active.unwrap();
        assert_eq!(before.x, -2);

        // Flat orientation would need column -2..1.
        assert!(!state.try_move(Move::RotateCw));
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_tick_gravity_threshold() {
        let mut state = GameState::new(42);
        let y0 = state.active.unwrap().y;

        for _ in 0..GRAVITY_TICKS - 1 {
            assert!(!state.tick());
        }
        assert_eq!(state.active.unwrap().y, y0);

        assert!(state.tick());
        assert_eq!(state.active.unwrap().y, y0 + 1);
        assert_eq!(state.gravity_counter, 0);
    }

    #[test]
    fn test_gravity_locks_grounded_piece() {
        let mut state = GameState::new(3);
        state.force_active(PieceKind::O);
        drop_and_lock(&mut state);

        assert_eq!(state.board.filled_count(), 4);
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 0);
        assert!(!ev.topped_out);
        assert!(state.take_last_event().is_none());
        assert_eq!(state.active.unwrap().y, SPAWN_Y);
    }

    #[test]
    fn test_five_o_pieces_clear_one_row() {
        let mut state = GameState::new(8);
        // Holds the first O one row up and keeps row 19 one cell short.
        state.board_mut().set(0, 19, Some(PieceKind::Z));

        for (i, x) in [-1, 1, 3, 5, 7].into_iter().enumerate() {
            state.force_active(PieceKind::O);
            shift_to(&mut state, x);
            drop_and_lock(&mut state);
            if i < 4 {
                assert_eq!(state.score, 0);
            }
        }

        assert_eq!(state.score, 100);
        assert_eq!(state.lines, 1);

        // Row 18 was full and is gone; the first O's top half fell into it.
        assert_eq!(state.board.get(0, 18), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(1, 18), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(0, 17), Some(None));
        assert_eq!(state.board.get(0, 19), Some(Some(PieceKind::Z)));
        assert_eq!(state.board.get(1, 19), Some(None));
        for x in 2..10 {
            assert_eq!(state.board.get(x, 19), Some(Some(PieceKind::O)));
            assert_eq!(state.board.get(x, 18), Some(None));
        }
        assert_eq!(state.board.filled_count(), 11);
    }

    #[test]
    fn test_four_line_clear_scores_800() {
        let mut state = GameState::new(11);
        for y in 16..20 {
            fill_row_except(state.board_mut(), y, Some(4));
        }
        state.force_active(PieceKind::I);
        assert!(state.try_move(Move::RotateCcw));
        drop_and_lock(&mut state);

        assert_eq!(state.score, 800);
        assert_eq!(state.lines, 4);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.take_last_event().unwrap().points, 800);
    }

    #[test]
    fn test_two_line_clear_scores_300() {
        let mut state = GameState::new(11);
        for y in 18..20 {
            fill_row_except(state.board_mut(), y, Some(4));
        }
        state.force_active(PieceKind::I);
        assert!(state.try_move(Move::RotateCcw));
        drop_and_lock(&mut state);

        assert_eq!(state.score, 300);
        assert_eq!(state.lines, 2);
        // Top half of the bar survives at the bottom.
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::I)));
        assert_eq!(state.board.get(4, 18), Some(Some(PieceKind::I)));
        assert_eq!(state.board.filled_count(), 2);
    }

    #[test]
    fn test_game_over_blocks_commands() {
        let mut state = GameState::new(1);
        state.force_active(PieceKind::O);
        while state.try_move(Move::Down) {}
        // Every shape covers row 1 at spawn.
        fill_row_except(state.board_mut(), 1, Some(0));
        fill_row_except(state.board_mut(), 2, Some(0));
        state.lock_piece();
        assert!(state.game_over);
        assert!(state.active.is_none());
        assert!(state.take_last_event().unwrap().topped_out);

        let board = state.board.clone();
        assert!(!state.try_move(Move::Left));
        assert!(!state.tick());
        assert!(!state.spawn_next());
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.board, board);

        assert!(state.apply_action(GameAction::Reset));
        assert!(!state.game_over);
        assert!(state.active.is_some());
        assert_eq!(state.board.filled_count(), 0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = GameState::new(77);
        state.force_active(PieceKind::O);
        drop_and_lock(&mut state);
        state.score = 1234;
        state.tick();

        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.gravity_counter, 0);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.take_last_event().is_none());
        assert_eq!(state.active.unwrap().y, SPAWN_Y);
    }

    #[test]
    fn test_overlapping_lock_keeps_piece_and_board() {
        let mut state = GameState::new(6);
        state.force_active(PieceKind::O);
        // Occupies the O's top-left cell at spawn.
        state.board_mut().set(4, 1, Some(PieceKind::T));
        let board_before = state.board.clone();
        let active_before = state.active;
        let next_before = state.next;

        state.lock_piece();
        assert_eq!(state.board, board_before);
        assert_eq!(state.active, active_before);
        assert_eq!(state.next, next_before);
        assert!(state.take_last_event().is_none());
        assert!(!state.game_over);
    }

    #[test]
    fn test_reset_draws_two_and_restarts_gravity() {
        let mut state = GameState::new(31);
        state.force_active(PieceKind::O);
        drop_and_lock(&mut state);
        for _ in 0..7 {
            state.tick();
        }
        assert!(state.gravity_counter > 0);

        // Top up so both draws come from the current bag.
        if state.bag.remaining() < 2 {
            state.bag.refill();
        }
        let remaining = state.bag.remaining();
        let expected = [state.bag.pending()[0], state.bag.pending()[1]];

        state.reset();
        assert_eq!(state.bag.remaining(), remaining - 2);
        let active = state.active.unwrap();
        assert_eq!(active.kind, expected[0]);
        assert_eq!(state.next, expected[1]);

        let y0 = active.y;
        for _ in 0..GRAVITY_TICKS - 1 {
            assert!(!state.tick());
            assert_eq!(state.active.unwrap().y, y0);
        }
        assert!(state.tick());
        assert_eq!(state.active.unwrap().y, y0 + 1);
    }

    #[test]
    fn test_ghost_y() {
        let mut state = GameState::new(9);
        state.force_active(PieceKind::O);
        assert_eq!(state.ghost_y(), Some(17));

        state.board_mut().set(4, 10, Some(PieceKind::T));
        assert_eq!(state.ghost_y(), Some(7));
    }

    #[test]
    fn test_apply_action_pause_is_ignored() {
        let mut state = GameState::new(9);
        let before = state.active;
        assert!(!state.apply_action(GameAction::Pause));
        assert_eq!(state.active, before);
        assert_eq!(state.gravity_counter, 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(9);
        state.force_active(PieceKind::O);
        drop_and_lock(&mut state);

        let snap = state.snapshot();
        assert_eq!(snap.board[19][4], PieceKind::O.id());
        assert_eq!(snap.board[18][5], PieceKind::O.id());
        assert_eq!(snap.next, state.next);
        assert_eq!(snap.active.map(|a| a.kind), state.active.map(|a| a.kind));
        assert_eq!(snap.ghost_y, state.ghost_y());
        assert!(!snap.paused);
    }
}
