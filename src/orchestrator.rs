//! Game orchestration between two move sources.

use crate::players::MoveSource;
use anyhow::{Context, Result};
use derive_getters::Getters;
use serde::Serialize;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use ultimate_engine::{Engine, Game, Move, Outcome, SearchConfig, SearchStats, Sign, State};

/// Messages sent from the orchestrator while a game runs.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A move was played.
    MoveMade {
        /// Side that moved.
        sign: Sign,
        /// The move.
        mv: Move,
        /// Position after the move.
        state: State,
        /// Time the player took to choose.
        thinking: Duration,
        /// Counters of the search behind the move, for search players.
        search: Option<SearchStats>,
        /// Evaluation-bar value of the new position, positive favoring X,
        /// when evaluation is switched on and the game goes on.
        evaluation: Option<f64>,
    },
    /// A sub-board was won or tied.
    BoardCompleted {
        /// Sub-board index.
        board: usize,
        /// How it ended.
        outcome: Outcome,
    },
    /// Game ended.
    GameOver {
        /// Final outcome.
        outcome: Outcome,
    },
}

/// Everything worth keeping about a finished game.
#[derive(Debug, Clone, Getters, Serialize)]
pub struct MatchRecord {
    /// Final outcome.
    outcome: Outcome,
    /// Moves in order.
    moves: Vec<(Sign, Move)>,
    /// X's thinking time per move.
    thinking_x: Vec<Duration>,
    /// O's thinking time per move.
    thinking_o: Vec<Duration>,
    /// Wall-clock length of the game.
    duration: Duration,
}

impl MatchRecord {
    /// Thinking times of `sign`.
    pub fn thinking(&self, sign: Sign) -> &[Duration] {
        match sign {
            Sign::X => &self.thinking_x,
            Sign::O => &self.thinking_o,
        }
    }
}

/// Orchestrates a game between two players.
pub struct Orchestrator {
    game: Game,
    player_x: Box<dyn MoveSource>,
    player_o: Box<dyn MoveSource>,
    events: Option<mpsc::Sender<GameEvent>>,
    evaluation: Option<SearchConfig>,
}

impl Orchestrator {
    /// Creates an orchestrator for a fresh game on `engine`.
    pub fn new(engine: Engine, player_x: Box<dyn MoveSource>, player_o: Box<dyn MoveSource>) -> Self {
        Self {
            game: Game::new(engine),
            player_x,
            player_o,
            events: None,
            evaluation: None,
        }
    }

    /// Sends [`GameEvent`]s to `tx` while running.
    pub fn with_events(mut self, tx: mpsc::Sender<GameEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Evaluates the position after every move with `config`, reporting the
    /// value on [`GameEvent::MoveMade`].
    pub fn with_evaluation(mut self, config: SearchConfig) -> Self {
        self.evaluation = Some(config);
        self
    }

    /// Plays the game to the end.
    #[instrument(skip(self), fields(x = self.player_x.name(), o = self.player_o.name()))]
    pub fn run(mut self) -> Result<MatchRecord> {
        info!("Starting game orchestration");
        let started = Instant::now();
        let mut thinking_x = Vec::new();
        let mut thinking_o = Vec::new();

        while !self.game.is_over() {
            let sign = self.game.to_move();
            let state = *self.game.state();
            let restriction = self.game.restriction();
            let player = match sign {
                Sign::X => &mut self.player_x,
                Sign::O => &mut self.player_o,
            };

            debug!(player = player.name(), %sign, %restriction, "Waiting for move");
            let clock = Instant::now();
            let mv = player
                .choose(self.game.engine_mut(), &state, restriction, sign)
                .with_context(|| format!("{} found no move for {}", player.name(), sign))?;
            let thinking = clock.elapsed();
            let search = self.game.engine_mut().take_last_search();

            let turn = self
                .game
                .make_move(mv)
                .with_context(|| format!("{} played an illegal move", player.name()))?;
            match sign {
                Sign::X => thinking_x.push(thinking),
                Sign::O => thinking_o.push(thinking),
            }

            let evaluation = self.evaluate();
            self.emit(GameEvent::MoveMade {
                sign,
                mv,
                state: *self.game.state(),
                thinking,
                search,
                evaluation,
            });
            if turn.board.is_decided() {
                self.emit(GameEvent::BoardCompleted {
                    board: mv.board,
                    outcome: turn.board,
                });
            }
        }

        let outcome = self.game.outcome();
        info!(%outcome, moves = self.game.history().len(), "Game over");
        self.emit(GameEvent::GameOver { outcome });

        Ok(MatchRecord {
            outcome,
            moves: self.game.history().to_vec(),
            thinking_x,
            thinking_o,
            duration: started.elapsed(),
        })
    }

    /// Evaluation-bar value of the current position, if switched on and the
    /// game is not over.
    fn evaluate(&mut self) -> Option<f64> {
        let config = self.evaluation?;
        if self.game.is_over() {
            return None;
        }
        let state = *self.game.state();
        let (restriction, sign) = (self.game.restriction(), self.game.to_move());
        let value = self
            .game
            .engine_mut()
            .evaluate(&state, restriction, sign, &config);
        debug!(%sign, value, "Position evaluated");
        Some(value)
    }

    fn emit(&mut self, event: GameEvent) {
        let Some(tx) = &self.events else {
            return;
        };
        if tx.send(event).is_err() {
            warn!("Event receiver dropped, no more events will be sent");
            self.events = None;
        }
    }
}
