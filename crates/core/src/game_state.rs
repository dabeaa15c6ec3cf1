//! Game state module - the engine
//!
//! Ties together board, catalog, piece source, scoring and clock. Handles the
//! spawn → fall → lock → clear → respawn cycle, the command surface and notifications.
//!
//! Every transition is synchronous: a command or a tick either changes state and
//! notifies observers before returning, or leaves state untouched.

use std::fmt;

use crate::board::Board;
use crate::clock::SimulationClock;
use crate::config::{ConfigError, EngineConfig};
use crate::piece::ActivePiece;
use crate::rng::{PieceSource, UniformRandomizer};
use crate::scoring::{level_for_lines, line_clear_score};
use crate::snapshot::{
    ActiveSnapshot, GameObserver, GameOverReport, GameSnapshot, LockEvent,
};
use crate::types::{GameCommand, PieceKind};

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Constructed, waiting for [`GameEngine::start`]
    Ready,
    /// Normal play
    Falling,
    Paused,
    /// Terminal
    GameOver,
}

/// One game session
pub struct GameEngine<S: PieceSource = UniformRandomizer> {
    config: EngineConfig,
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    source: S,
    clock: SimulationClock,
    phase: Phase,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    last_lock: Option<LockEvent>,
    report: Option<GameOverReport>,
    report_delivered: bool,
    observers: Vec<Box<dyn GameObserver>>,
}

impl GameEngine<UniformRandomizer> {
    /// Engine with default configuration and an entropy-seeded randomizer
    pub fn new() -> Self {
        Self::build(
            Board::new(),
            EngineConfig::default(),
            UniformRandomizer::from_entropy(),
        )
    }

    /// Engine with the uniform randomizer, seeded from `config.seed` when set
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        let source = match config.seed {
            Some(seed) => UniformRandomizer::new(seed),
            None => UniformRandomizer::from_entropy(),
        };
        Self::with_source(config, source)
    }
}

impl Default for GameEngine<UniformRandomizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PieceSource> GameEngine<S> {
    /// Engine drawing pieces from a custom source
    pub fn with_source(config: EngineConfig, source: S) -> Result<Self, ConfigError> {
        Self::from_board(Board::new(), config, source)
    }

    /// Engine starting from a prepared board (puzzle setups)
    pub fn from_board(board: Board, config: EngineConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(board, config, source))
    }

    fn build(board: Board, config: EngineConfig, mut source: S) -> Self {
        let next = source.next_piece();
        Self {
            config,
            board,
            active: None,
            next: Some(next),
            source,
            clock: SimulationClock::new(),
            phase: Phase::Ready,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: config.drop_interval_ms(1),
            last_lock: None,
            report: None,
            report_delivered: false,
            observers: Vec::new(),
        }
    }

    /// Register an observer for state and game-over notifications
    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Ready
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Final result, once the game is over
    pub fn game_over_report(&self) -> Option<GameOverReport> {
        self.report
    }

    /// Take and clear the most recent lock event
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    /// Anchor row the active piece would lock at after a hard drop
    pub fn ghost_row(&self) -> Option<i8> {
        self.active.map(|piece| piece.landing_row(&self.board))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.next = self.next;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.drop_interval_ms = self.drop_interval_ms;
        out.started = self.started();
        out.paused = self.paused();
        out.game_over = self.game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the first piece and begin play. Returns false if already started.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.phase = Phase::Falling;
        self.clock.reset();
        self.spawn();
        self.publish();
        true
    }

    fn playable(&self) -> bool {
        self.phase == Phase::Falling && self.active.is_some()
    }

    /// Promote the queued piece to active and queue a new one.
    ///
    /// A piece that collides the moment it appears ends the game.
    fn spawn(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.source.next_piece(),
        };
        self.next = Some(self.source.next_piece());

        let piece = ActivePiece::new(kind, self.config.spawn_col, self.config.spawn_row);
        self.active = Some(piece);

        if piece.collides(&self.board) {
            self.phase = Phase::GameOver;
            self.clock.reset();
            self.report = Some(GameOverReport {
                score: self.score,
                lines: self.lines,
                level: self.level,
            });
            return false;
        }

        true
    }

    /// Try to move the active piece; collision is checked before anything changes
    fn try_move(&mut self, dc: i8, dr: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dc, dr);
        if moved.collides(&self.board) {
            return false;
        }

        self.active = Some(moved);
        true
    }

    /// Rotate by `direction` quarter turns with the basic wall kick:
    /// in place, then one column left, then one column right.
    fn try_rotate(&mut self, direction: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated(active.rotation.step(direction));
        for dc in [0, -1, 1] {
            let candidate = rotated.shifted(dc, 0);
            if !candidate.collides(&self.board) {
                self.active = Some(candidate);
                return true;
            }
        }

        false
    }

    /// One row down, or lock if the piece cannot descend
    fn step_down(&mut self) {
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
    }

    /// Merge the active piece, clear rows, score, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let merged = self
            .board
            .merge(active.matrix(), active.col, active.row, active.kind);
        debug_assert!(merged, "active piece overlapped the board at lock");

        let cleared = self.board.clear_full_rows().len();

        let points = line_clear_score(cleared, self.level);
        self.score = self.score.saturating_add(points);
        self.lines += cleared as u32;
        self.level = level_for_lines(self.lines);
        self.drop_interval_ms = self.config.drop_interval_ms(self.level);

        self.last_lock = Some(LockEvent {
            kind: active.kind,
            lines_cleared: cleared as u32,
            points,
        });

        self.spawn();
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(1)
    }

    /// Shift one column; illegal shifts are ignored
    pub fn move_horizontal(&mut self, dc: i8) -> bool {
        if dc == 0 || !self.playable() || !self.try_move(dc.signum(), 0) {
            return false;
        }
        self.publish();
        true
    }

    /// Move down one row, locking if the piece is resting on something
    pub fn soft_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        self.step_down();
        self.publish();
        true
    }

    /// Drop to the lowest legal row and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        while self.try_move(0, 1) {}
        self.lock_piece();
        self.publish();
        true
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        self.rotate(1)
    }

    pub fn rotate_counterclockwise(&mut self) -> bool {
        self.rotate(-1)
    }

    /// Rotate by +1 (clockwise) or -1 (counter-clockwise); rejected rotations change nothing
    pub fn rotate(&mut self, direction: i8) -> bool {
        if direction == 0 || !self.playable() || !self.try_rotate(direction.signum()) {
            return false;
        }
        self.publish();
        true
    }

    /// Pause or resume. Resuming re-arms the clock so paused time never causes drops.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Falling => self.phase = Phase::Paused,
            Phase::Paused => {
                self.phase = Phase::Falling;
                self.clock.reset();
            }
            Phase::Ready | Phase::GameOver => return false,
        }
        self.publish();
        true
    }

    /// Advance the simulation to `now_ms`; returns true if gravity moved or locked the piece.
    ///
    /// `now_ms` may come from any monotonic millisecond source. A timestamp behind the
    /// previous one counts as zero elapsed time.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.playable() {
            return false;
        }

        if !self.clock.advance(now_ms, self.drop_interval_ms) {
            return false;
        }

        self.step_down();
        self.publish();
        true
    }

    /// Apply a command; returns true if state changed
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MoveLeft => self.move_left(),
            GameCommand::MoveRight => self.move_right(),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::HardDrop => self.hard_drop(),
            GameCommand::RotateCw => self.rotate_clockwise(),
            GameCommand::RotateCcw => self.rotate_counterclockwise(),
            GameCommand::Pause => self.toggle_pause(),
        }
    }

    /// Notify observers of the current state, then of game over (once)
    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_state(&snapshot);
        }

        if let Some(report) = self.report {
            if !self.report_delivered {
                self.report_delivered = true;
                for observer in &mut self.observers {
                    observer.on_game_over(&report);
                }
            }
        }
    }
}

impl<S: PieceSource> fmt::Debug for GameEngine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("score", &self.score)
            .field("lines", &self.lines)
            .field("level", &self.level)
            .field("drop_interval_ms", &self.drop_interval_ms)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::rng::ScriptedSource;
    use crate::types::{Rotation, BOARD_WIDTH};

    fn engine(pieces: &[PieceKind]) -> GameEngine<ScriptedSource> {
        GameEngine::with_source(
            EngineConfig::default(),
            ScriptedSource::new(pieces.iter().copied()),
        )
        .unwrap()
    }

    fn fill_row_except(board: &mut Board, row: i8, gaps: &[i8]) {
        for col in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&col) {
                board.set(col, row, Some(PieceKind::Z));
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        states: Vec<GameSnapshot>,
        reports: Vec<GameOverReport>,
    }

    #[derive(Clone, Default)]
    struct SharedRecorder(Rc<RefCell<Recorder>>);

    impl GameObserver for SharedRecorder {
        fn on_state(&mut self, snapshot: &GameSnapshot) {
            self.0.borrow_mut().states.push(*snapshot);
        }

        fn on_game_over(&mut self, report: &GameOverReport) {
            self.0.borrow_mut().reports.push(*report);
        }
    }

    #[test]
    fn test_new_engine_is_ready() {
        let engine = engine(&[PieceKind::T]);
        assert_eq!(engine.phase(), Phase::Ready);
        assert!(engine.active().is_none());
        assert_eq!(engine.next_piece(), Some(PieceKind::T));
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.drop_interval_ms(), 800);
    }

    #[test]
    fn test_commands_ignored_before_start() {
        let mut engine = engine(&[PieceKind::T]);
        for command in GameCommand::ALL {
            assert!(!engine.apply(command));
        }
        assert!(!engine.tick(10_000));
    }

    #[test]
    fn test_start_spawns_next_and_queues_new() {
        let mut engine = engine(&[PieceKind::L, PieceKind::S]);
        assert!(engine.start());
        assert!(!engine.start());

        let active = engine.active().unwrap();
        assert_eq!(active.kind, PieceKind::L);
        assert_eq!((active.col, active.row), (3, 0));
        assert_eq!(active.rotation, Rotation::North);
        assert_eq!(engine.next_piece(), Some(PieceKind::S));
    }

    #[test]
    fn test_move_rejected_at_wall() {
        let mut engine = engine(&[PieceKind::O]);
        engine.start();
        // O occupies matrix columns 0-1, anchor can reach column 0
        for _ in 0..3 {
            assert!(engine.move_left());
        }
        assert!(!engine.move_left());
        assert_eq!(engine.active().unwrap().col, 0);
    }

    #[test]
    fn test_soft_drop_moves_then_locks() {
        let mut engine = engine(&[PieceKind::O, PieceKind::T]);
        engine.start();
        for _ in 0..18 {
            assert!(engine.soft_drop());
            assert_eq!(engine.active().unwrap().kind, PieceKind::O);
        }
        assert_eq!(engine.active().unwrap().row, 18);
        // Resting on the floor: this one locks
        assert!(engine.soft_drop());
        assert_eq!(engine.active().unwrap().kind, PieceKind::T);
        assert_eq!(engine.board().get(3, 19), Some(Some(PieceKind::O)));
        assert_eq!(engine.board().filled_count(), 4);
    }

    #[test]
    fn test_rotation_wall_kick_right() {
        let mut engine = engine(&[PieceKind::I]);
        engine.start();
        // Vertical I (West state, matrix column 1) flush against the left wall
        assert!(engine.rotate_counterclockwise());
        while engine.move_left() {}
        let before = engine.active().unwrap();
        assert_eq!(before.rotation, Rotation::West);
        assert_eq!(before.col, -1);

        // Back to horizontal: in place would poke into column -1, left kick worse, right kick fits
        assert!(engine.rotate_clockwise());
        let after = engine.active().unwrap();
        assert_eq!(after.rotation, Rotation::North);
        assert_eq!(after.col, 0);
    }

    #[test]
    fn test_rotation_rejected_leaves_state() {
        let mut board = Board::new();
        // One-column shaft at column 4
        for row in 0..20 {
            board.set(3, row, Some(PieceKind::Z));
            board.set(5, row, Some(PieceKind::Z));
        }
        let mut engine = GameEngine::from_board(
            board,
            EngineConfig::default(),
            ScriptedSource::repeat(PieceKind::I),
        )
        .unwrap();
        // A horizontal spawn would collide, so place a vertical I in the shaft by hand
        engine.phase = Phase::Falling;
        engine.active = Some(ActivePiece {
            kind: PieceKind::I,
            rotation: Rotation::West,
            col: 3,
            row: 5,
        });
        assert!(!engine.active().unwrap().collides(engine.board()));

        let before = engine.snapshot();
        assert!(!engine.rotate_clockwise());
        assert!(!engine.rotate_counterclockwise());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_line_clear_scoring_by_level() {
        let mut engine = engine(&[PieceKind::I]);
        engine.start();
        fill_row_except(&mut engine.board, 19, &[3, 4, 5, 6]);
        assert!(engine.hard_drop());
        assert_eq!(engine.lines(), 1);
        assert_eq!(engine.score(), 100);
        assert_eq!(
            engine.take_last_lock(),
            Some(LockEvent {
                kind: PieceKind::I,
                lines_cleared: 1,
                points: 100
            })
        );
        assert_eq!(engine.take_last_lock(), None);

        engine.level = 2;
        fill_row_except(&mut engine.board, 19, &[3, 4, 5, 6]);
        engine.hard_drop();
        assert_eq!(engine.score(), 100 + 200);
    }

    #[test]
    fn test_level_and_interval_progression() {
        let mut engine = engine(&[PieceKind::I]);
        engine.start();
        engine.lines = 9;
        fill_row_except(&mut engine.board, 19, &[3, 4, 5, 6]);
        engine.hard_drop();
        assert_eq!(engine.lines(), 10);
        assert_eq!(engine.level(), 2);
        assert_eq!(engine.drop_interval_ms(), 720);
    }

    #[test]
    fn test_tick_drives_gravity() {
        let mut engine = engine(&[PieceKind::T]);
        engine.start();
        assert!(!engine.tick(1_000)); // arms the clock
        assert!(!engine.tick(1_500));
        assert!(engine.tick(1_800));
        assert_eq!(engine.active().unwrap().row, 1);
        assert!(!engine.tick(1_000)); // skew
        assert!(engine.tick(2_600));
        assert_eq!(engine.active().unwrap().row, 2);
    }

    #[test]
    fn test_pause_blocks_commands_and_ticks() {
        let mut engine = engine(&[PieceKind::T]);
        engine.start();
        engine.tick(0);
        assert!(engine.toggle_pause());
        assert!(engine.paused());
        assert!(!engine.move_left());
        assert!(!engine.hard_drop());
        assert!(!engine.tick(100_000));
        assert!(engine.toggle_pause());
        // Clock was re-armed: the long pause does not drop the piece
        assert!(!engine.tick(100_000));
        assert_eq!(engine.active().unwrap().row, 0);
    }

    #[test]
    fn test_game_over_notifies_once() {
        let mut board = Board::new();
        board.set(4, 1, Some(PieceKind::J));
        let mut engine = GameEngine::from_board(
            board,
            EngineConfig::default(),
            ScriptedSource::repeat(PieceKind::T),
        )
        .unwrap();
        let recorder = SharedRecorder::default();
        engine.subscribe(recorder.clone());

        engine.start();
        assert!(engine.game_over());
        assert!(!engine.toggle_pause());
        assert!(!engine.hard_drop());
        assert!(!engine.tick(5_000));

        let rec = recorder.0.borrow();
        assert_eq!(rec.states.len(), 1);
        assert!(rec.states[0].game_over);
        assert_eq!(
            rec.reports,
            vec![GameOverReport {
                score: 0,
                lines: 0,
                level: 1
            }]
        );
    }

    #[test]
    fn test_rejected_command_does_not_notify() {
        let mut engine = engine(&[PieceKind::O]);
        let recorder = SharedRecorder::default();
        engine.subscribe(recorder.clone());
        engine.start();
        while engine.move_right() {}
        let count = recorder.0.borrow().states.len();
        assert!(!engine.move_right());
        assert_eq!(recorder.0.borrow().states.len(), count);
    }

    #[test]
    fn test_debug_output() {
        let engine = engine(&[PieceKind::S]);
        let text = format!("{:?}", engine);
        assert!(text.contains("GameEngine"));
        assert!(text.contains("Ready"));
    }
}
