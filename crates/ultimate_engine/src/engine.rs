//! Per-game engine context.

use crate::heuristic::{Evaluator, HeuristicWeights};
use crate::legal::LegalMoves;
use crate::search::{Search, SearchConfig, SearchStats, opening_move};
use crate::state::State;
use crate::types::{Move, Outcome, Restriction, Sign};
use crate::update::apply_move;
use crate::win::WinChecker;
use derive_getters::Getters;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Everything one game needs besides the position itself.
///
/// Owns the win and heuristic caches, the legal-move tracker, and the random
/// source for randomized openings. Both players of a game share one engine.
/// Separate games use separate engines and never see each other's tracker.
#[derive(Debug, Getters)]
pub struct Engine {
    checker: WinChecker,
    evaluator: Evaluator,
    legal: LegalMoves,
    #[getter(skip)]
    rng: StdRng,
    #[getter(skip)]
    last_search: Option<SearchStats>,
}

impl Engine {
    /// Creates an engine seeded from the OS.
    pub fn new(weights: HeuristicWeights) -> Self {
        Self::with_rng(weights, StdRng::from_entropy())
    }

    /// Creates an engine with a fixed seed, for reproducible openings.
    pub fn with_seed(weights: HeuristicWeights, seed: u64) -> Self {
        Self::with_rng(weights, StdRng::seed_from_u64(seed))
    }

    fn with_rng(weights: HeuristicWeights, rng: StdRng) -> Self {
        Self {
            checker: WinChecker::new(),
            evaluator: Evaluator::new(weights),
            legal: LegalMoves::new(),
            rng,
            last_search: None,
        }
    }

    /// Counters of the most recent [`choose_move`](Self::choose_move) that
    /// ran a search. `None` if it took an opening shortcut or had no moves.
    pub fn last_search(&self) -> Option<SearchStats> {
        self.last_search
    }

    /// Like [`last_search`](Self::last_search), clearing the stored counters.
    pub fn take_last_search(&mut self) -> Option<SearchStats> {
        self.last_search.take()
    }

    /// Resets the legal-move tracker and returns the starting position.
    ///
    /// The caches survive: they are keyed by board display and stay valid
    /// across games.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> State {
        self.legal.reset();
        State::new()
    }

    /// Plays a move without touching the tracker. See [`apply_move`].
    pub fn apply_move(&mut self, state: &State, mv: Move, sign: Sign) -> (State, bool) {
        apply_move(&mut self.checker, state, mv.board, mv.cell, sign)
    }

    /// Plays a move and records it in the tracker.
    ///
    /// Legality is the caller's job; [`Game`](crate::Game) does the checking.
    pub fn play(&mut self, state: &State, mv: Move, sign: Sign) -> (State, bool) {
        let (next, completed) = self.apply_move(state, mv, sign);
        self.legal.remove(mv.board, mv.cell, completed);
        (next, completed)
    }

    /// Legal moves of the current game under `restriction`.
    pub fn legal_moves(&self, restriction: Restriction) -> Vec<Move> {
        self.legal.moves_for(restriction)
    }

    /// Outcome of board `idx` (0 = meta-board).
    pub fn check_win(&mut self, state: &State, idx: usize) -> Outcome {
        self.checker.check(state, idx)
    }

    /// Score of sub-board `idx` from `sign`'s point of view, signed toward X.
    pub fn evaluate_sub_board(&mut self, state: &State, idx: usize, sign: Sign) -> i32 {
        self.evaluator
            .evaluate_sub_board(&mut self.checker, state, idx, sign)
    }

    /// Heuristic value of `state`, positive favoring X.
    pub fn heuristic(&mut self, state: &State, next: Restriction, sign: Sign) -> f64 {
        self.evaluator.heuristic(&mut self.checker, state, next, sign)
    }

    /// Best move for `sign`, or `None` when nothing is legal.
    ///
    /// Candidates come from the tracker, so it must be in step with `state`.
    /// An opening shortcut is taken when one applies and is legal.
    /// Otherwise every candidate is scored one ply down with the configured
    /// strategy and the best one wins, earliest first on ties.
    pub fn choose_move(
        &mut self,
        state: &State,
        restriction: Restriction,
        sign: Sign,
        config: &SearchConfig,
    ) -> Option<Move> {
        self.last_search = None;
        let moves = self.legal.moves_for(restriction);
        if moves.is_empty() {
            warn!(%sign, %restriction, "No legal moves to choose from");
            return None;
        }

        let opening = opening_move(state, restriction, sign, config.randomize_opening, &mut self.rng)
            .filter(|&mv| self.legal.allows(restriction, mv));
        if let Some(mv) = opening {
            debug!(%sign, %mv, "Playing opening move");
            return Some(mv);
        }

        let started = Instant::now();
        let mut search = Search::new(
            &mut self.checker,
            &mut self.evaluator,
            config,
            state.marks_placed(sign),
        );
        let chosen = search.best_move(state, &moves, sign);
        let stats = search.stats();
        debug!(
            %sign,
            strategy = %config.strategy,
            candidates = moves.len(),
            depth = stats.target_depth,
            nodes = stats.nodes,
            timed_out = stats.timed_out,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chosen = ?chosen,
            "Search finished"
        );
        self.last_search = Some(stats);
        chosen
    }

    /// Evaluation-bar value of `state` with `sign` to move.
    ///
    /// The mean search score over every legal move, or zero when there are
    /// none. Never takes an opening shortcut.
    pub fn evaluate(
        &mut self,
        state: &State,
        restriction: Restriction,
        sign: Sign,
        config: &SearchConfig,
    ) -> f64 {
        let moves = self.legal.moves_for(restriction);
        let mut search = Search::new(
            &mut self.checker,
            &mut self.evaluator,
            config,
            state.marks_placed(sign),
        );
        search.average(state, &moves, sign)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(HeuristicWeights::default())
    }
}
