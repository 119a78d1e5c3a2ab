//! Validated game: turn order, legality and outcome on top of the engine.

use crate::engine::Engine;
use crate::error::MoveError;
use crate::state::{META, State};
use crate::types::{Move, Outcome, Restriction, Sign};
use crate::update::next_restriction;
use tracing::{debug, instrument};

/// What a single accepted move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Side that moved.
    pub sign: Sign,
    /// The move.
    pub mv: Move,
    /// Outcome of the sub-board that was played in.
    pub board: Outcome,
    /// Outcome of the whole game after the move.
    pub game: Outcome,
}

/// One game from the first move to the last.
///
/// X moves first. Every move is checked against the tracker before it is
/// applied, so the state, tracker and history never disagree.
#[derive(Debug)]
pub struct Game {
    engine: Engine,
    state: State,
    restriction: Restriction,
    to_move: Sign,
    history: Vec<(Sign, Move)>,
    outcome: Outcome,
}

impl Game {
    /// Starts a game on `engine`, resetting its tracker.
    #[instrument(skip(engine))]
    pub fn new(mut engine: Engine) -> Self {
        let state = engine.new_game();
        Self {
            engine,
            state,
            restriction: Restriction::Free,
            to_move: Sign::X,
            history: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Replays `moves` from the start, alternating X and O.
    #[instrument(skip(engine, moves), fields(moves = moves.len()))]
    pub fn replay(engine: Engine, moves: &[Move]) -> Result<Self, MoveError> {
        let mut game = Self::new(engine);
        for &mv in moves {
            game.make_move(mv)?;
        }
        Ok(game)
    }

    /// Current position.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Where the side to move must play.
    pub fn restriction(&self) -> Restriction {
        self.restriction
    }

    /// Side to move.
    pub fn to_move(&self) -> Sign {
        self.to_move
    }

    /// Moves played so far.
    pub fn history(&self) -> &[(Sign, Move)] {
        &self.history
    }

    /// Outcome so far.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True once the game is decided.
    pub fn is_over(&self) -> bool {
        self.outcome.is_decided()
    }

    /// The engine driving this game.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Mutable engine access, for searching from the current position.
    ///
    /// Moves must still go through [`Game::make_move`] to keep the tracker in
    /// step.
    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        self.engine.legal_moves(self.restriction)
    }

    /// Plays `mv` for the side to move.
    pub fn make_move(&mut self, mv: Move) -> Result<Turn, MoveError> {
        self.play_as(self.to_move, mv)
    }

    /// Plays `mv` for `sign`, rejecting it if it is not `sign`'s turn.
    #[instrument(skip(self), fields(restriction = %self.restriction))]
    pub fn play_as(&mut self, sign: Sign, mv: Move) -> Result<Turn, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if sign != self.to_move {
            return Err(MoveError::WrongPlayer(sign));
        }
        if !(1..=9).contains(&mv.board) || !(1..=9).contains(&mv.cell) {
            return Err(MoveError::OutOfRange {
                board: mv.board,
                cell: mv.cell,
            });
        }
        if !self.engine.legal().allows(self.restriction, mv) {
            return Err(MoveError::IllegalMove(mv));
        }

        let (state, _) = self.engine.play(&self.state, mv, sign);
        self.state = state;
        self.history.push((sign, mv));

        let board = self.engine.check_win(&self.state, mv.board);
        self.outcome = self.engine.check_win(&self.state, META);
        self.restriction = next_restriction(&self.state, mv.cell);
        self.to_move = sign.opponent();

        debug!(%sign, %mv, board = %board, game = %self.outcome, "Move applied");
        Ok(Turn {
            sign,
            mv,
            board,
            game: self.outcome,
        })
    }

    /// Winner, if any.
    pub fn winner(&self) -> Option<Sign> {
        self.outcome.winner()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}
