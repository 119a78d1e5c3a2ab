//! Ultimate tic-tac-toe engine
//!
//! Rules, win detection, positional heuristic and adversarial search for
//! ultimate tic-tac-toe: nine 3x3 sub-boards arranged on a 3x3 meta-board.
//!
//! # Architecture
//!
//! - **Codec**: magic-square cell values and compact board display keys
//! - **State**: immutable-by-value snapshots of all ten boards
//! - **Win**: three-sum line detection with a display-keyed cache
//! - **Heuristic**: weighted sub-board scoring with inverted-key caching
//! - **Search**: alpha-beta and expectimax with static, dynamic or timed depth
//! - **Engine**: per-game context owning the caches and legal-move tracker
//! - **Game**: validated turn-by-turn play on top of an engine
//!
//! # Example
//!
//! ```
//! use ultimate_engine::{Engine, Game, HeuristicWeights, SearchConfig};
//!
//! let mut game = Game::new(Engine::with_seed(HeuristicWeights::default(), 42));
//! let (state, restriction, sign) = (*game.state(), game.restriction(), game.to_move());
//! let mv = game
//!     .engine_mut()
//!     .choose_move(&state, restriction, sign, &SearchConfig::alpha_beta(2))
//!     .expect("opening move");
//! game.make_move(mv).expect("engine moves are legal");
//! assert_eq!(game.history().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod codec;
mod engine;
mod error;
mod game;
mod heuristic;
mod legal;
mod search;
mod state;
mod types;
mod update;
mod win;

// Crate-level exports - Encoding
pub use codec::{
    BoardKey, EMPTY, LINE_SUM, MAGIC_SQUARE, MARKER, TIE, from_row_col, magic, parse_move,
    parse_row_col, to_row_col,
};

// Crate-level exports - Position
pub use board::{Board, Marks};
pub use state::{META, State};
pub use types::{Cell, Move, Outcome, Restriction, Sign};

// Crate-level exports - Rules
pub use error::{CoordError, MoveError};
pub use legal::{LegalMoves, moves_in_state};
pub use update::{apply_move, next_restriction};
pub use win::{WinChecker, has_line};

// Crate-level exports - Evaluation and search
pub use heuristic::{Evaluator, HeuristicWeights, row_score};
pub use search::{
    DEFAULT_TIME_BUDGET_MS, DEFAULT_TIMED_DEPTH_CAP, DYNAMIC_INITIAL_DEPTH, DYNAMIC_STEP,
    DYNAMIC_THRESHOLD, DepthPolicy, SearchConfig, SearchStats, Strategy, opening_move,
};

// Crate-level exports - Game driving
pub use engine::Engine;
pub use game::{Game, Turn};
