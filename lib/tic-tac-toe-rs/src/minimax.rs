use crate::{
    Board,
    Coord,
    Team,
};

/// The team that the search maximizes for.
pub const MAXIMIZER: Team = Team::X;

/// Lower than any reachable score.
const MIN_SENTINEL: i8 = -100;

/// Higher than any reachable score.
const MAX_SENTINEL: i8 = 100;

/// The result of searching a board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Evaluation {
    /// The score of the board from the maximizer's point of view.
    ///
    /// `1` is a win for [`MAXIMIZER`], `-1` is a win for the minimizer and `0` is a draw.
    pub value: i8,

    /// The best move, or `None` if the board is terminal.
    pub best_move: Option<Coord>,
}

impl Evaluation {
    fn terminal(value: i8) -> Self {
        Self {
            value,
            best_move: None,
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SearchStats {
    /// Every board that was scored, including the root.
    pub nodes: u64,

    /// Boards that ended the game.
    pub terminal_nodes: u64,
}

/// Run minimax on a board.
///
/// `maximizing` selects whose turn it is.
/// The maximizing side always plays [`MAXIMIZER`] and the minimizing side plays `minimizer`.
///
/// The whole tree below `board` is searched without pruning.
/// Ties go to the first move in row-major order.
pub fn evaluate(board: Board, maximizing: bool, minimizer: Team) -> Evaluation {
    let mut stats = SearchStats::default();
    search(board, maximizing, minimizer, &mut stats)
}

/// Run minimax on a board, also returning how much of the tree was visited.
pub fn evaluate_with_stats(
    board: Board,
    maximizing: bool,
    minimizer: Team,
) -> (Evaluation, SearchStats) {
    let mut stats = SearchStats::default();
    let evaluation = search(board, maximizing, minimizer, &mut stats);
    (evaluation, stats)
}

fn search(board: Board, maximizing: bool, minimizer: Team, stats: &mut SearchStats) -> Evaluation {
    stats.nodes += 1;

    match board.terminal_state() {
        Some(Team::X) => {
            stats.terminal_nodes += 1;
            return Evaluation::terminal(1);
        }
        Some(Team::O) => {
            stats.terminal_nodes += 1;
            return Evaluation::terminal(-1);
        }
        None => {}
    }

    if board.is_full() {
        stats.terminal_nodes += 1;
        return Evaluation::terminal(0);
    }

    let (team, mut best_value) = if maximizing {
        (MAXIMIZER, MIN_SENTINEL)
    } else {
        (minimizer, MAX_SENTINEL)
    };
    let mut best_move = None;

    for coord in board.empty_cells() {
        let child = board.with_mark(coord, team);
        let value = search(child, !maximizing, minimizer, stats).value;

        let improved = if maximizing {
            value > best_value
        } else {
            value < best_value
        };

        if improved {
            best_value = value;
            best_move = Some(coord);
        }
    }

    Evaluation {
        value: best_value,
        best_move,
    }
}
