//! Human player reading moves from a line-based input.

use super::MoveSource;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use tracing::{debug, warn};
use ultimate_engine::{
    CoordError, Engine, Move, Restriction, Sign, State, parse_move, parse_row_col,
};

/// Prefix marking a line as a `row col` grid coordinate instead of
/// `board cell`.
pub const GRID_PREFIX: char = '@';

/// Human player typing `board cell` (1-9 each) or `@row col` (0-8 each).
///
/// Invalid or illegal input is rejected with a message and asked for again.
/// End of input means the player has no move.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
}

impl HumanPlayer<BufReader<Stdin>, Stdout> {
    /// Creates a human player on the terminal.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    /// Creates a human player reading from `input` and prompting on `output`.
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn prompt(&mut self, sign: Sign, restriction: Restriction) -> io::Result<Option<String>> {
        write!(self.output, "{sign} to play on {restriction} > ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn reject(&mut self, reason: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "Invalid move: {reason}")
    }
}

/// Parses one line of human input.
pub fn parse_input(line: &str) -> Result<Move, CoordError> {
    match line.trim().strip_prefix(GRID_PREFIX) {
        Some(grid) => parse_row_col(grid),
        None => parse_move(line),
    }
}

impl<R: BufRead + Send, W: Write + Send> MoveSource for HumanPlayer<R, W> {
    fn choose(
        &mut self,
        engine: &mut Engine,
        _state: &State,
        restriction: Restriction,
        sign: Sign,
    ) -> Option<Move> {
        loop {
            let line = match self.prompt(sign, restriction) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    warn!(player = %self.name, "Input closed");
                    return None;
                }
                Err(e) => {
                    warn!(player = %self.name, error = %e, "Failed to read move");
                    return None;
                }
            };

            let written = match parse_input(&line) {
                Ok(mv) if engine.legal().allows(restriction, mv) => return Some(mv),
                Ok(mv) => self.reject(format!("{mv} is not legal here")),
                Err(e) => self.reject(e),
            };
            debug!(player = %self.name, input = line.trim(), "Rejected input");
            if let Err(e) = written {
                warn!(player = %self.name, error = %e, "Failed to write prompt");
                return None;
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use ultimate_engine::HeuristicWeights;

    fn player(input: &str) -> HumanPlayer<Cursor<Vec<u8>>, Vec<u8>> {
        HumanPlayer::new("human", Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_input_forms() {
        assert_eq!(parse_input("3 7\n").ok(), Some(Move::new(3, 7)));
        assert_eq!(parse_input(" @4 1\n").ok(), Some(Move::new(4, 5)));
        assert!(parse_input("@9 9").is_err());
        assert!(parse_input("five five").is_err());
    }

    #[test]
    fn test_retries_until_legal() {
        let mut engine = Engine::with_seed(HeuristicWeights::default(), 0);
        let state = engine.new_game();
        let mut human = player("nonsense\n1 1\n5 10\n7 3\n");
        let mv = human.choose(&mut engine, &state, Restriction::Board(7), Sign::O);
        assert_eq!(mv, Some(Move::new(7, 3)));

        let shown = String::from_utf8(human.output.clone()).expect("utf8 output");
        assert_eq!(shown.matches("Invalid move").count(), 3);
        assert!(shown.contains("(1, 1) is not legal here"));
    }

    #[test]
    fn test_grid_coordinates_are_accepted() {
        let mut engine = Engine::with_seed(HeuristicWeights::default(), 0);
        let state = engine.new_game();
        let mut human = player("@8 8\n");
        let mv = human.choose(&mut engine, &state, Restriction::Free, Sign::X);
        assert_eq!(mv, Some(Move::new(9, 9)));
    }

    #[test]
    fn test_end_of_input_means_no_move() {
        let mut engine = Engine::with_seed(HeuristicWeights::default(), 0);
        let state = engine.new_game();
        let mut human = player("0 0\n");
        assert_eq!(human.choose(&mut engine, &state, Restriction::Free, Sign::X), None);
    }
}
