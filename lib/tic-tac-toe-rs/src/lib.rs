//! A tic-tac-toe engine.
//!
//! [`Board`] holds the tiles and detects wins,
//! [`minimax`] solves positions by searching the whole game tree,
//! [`Agent`] turns that into a computer player,
//! and [`Game`] runs turns between players.

pub mod agent;
pub mod board;
pub mod game;
pub mod minimax;
pub mod team;

pub use self::{
    agent::{
        Agent,
        AgentLevel,
        SelectMoveError,
    },
    board::{
        Board,
        Coord,
        EmptyCells,
        InvalidCoordError,
        Line,
        WinLine,
    },
    game::{
        Game,
        GameMode,
        GameResult,
        GameStatus,
        MoveError,
        MoveOutcome,
    },
    minimax::{
        evaluate,
        evaluate_with_stats,
        Evaluation,
        SearchStats,
    },
    team::{
        InvalidCharError,
        InvalidStrError,
        Team,
    },
};

/// The # of tic-tac-toe tiles
pub const NUM_TILES: u8 = 9;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minimax_all() {
        let evaluation = evaluate(Board::new(), true, Team::O);
        assert_eq!(evaluation.value, 0);
        assert_eq!(evaluation.best_move, Some(Coord::new(0, 0)));
    }

    #[test]
    fn minimax_win_1() {
        let board = Board::new()
            .with_mark(Coord::from_index(0), Team::X)
            .with_mark(Coord::from_index(4), Team::O)
            .with_mark(Coord::from_index(8), Team::X)
            .with_mark(Coord::from_index(2), Team::O);
        let evaluation = evaluate(board, true, Team::O);
        assert_eq!(evaluation.value, 1, "expected X win");
        assert_eq!(evaluation.best_move, Some(Coord::from_index(6)));
    }
}
