use crate::{
    minimax,
    Board,
    Coord,
    Team,
};
use rand::{
    seq::SliceRandom,
    Rng,
};
use tracing::info;

/// Failed to pick a move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectMoveError {
    /// Every tile is marked
    #[error("there are no empty tiles to choose from")]
    NoMoves,

    /// Someone already won
    #[error("the game was already won by {0}")]
    AlreadyWon(Team),
}

/// How an [`Agent`] picks moves.
///
/// Level 0 picks a random empty tile.
/// Anything higher searches the whole game tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentLevel(pub u8);

impl AgentLevel {
    /// Pick uniformly from the empty tiles
    pub const RANDOM: Self = Self(0);

    /// Play perfectly
    pub const OPTIMAL: Self = Self(1);

    /// Returns true if this level picks random moves.
    pub fn is_random(self) -> bool {
        self.0 == 0
    }
}

impl Default for AgentLevel {
    fn default() -> Self {
        Self::OPTIMAL
    }
}

impl std::fmt::Display for AgentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_random() {
            write!(f, "{} (random)", self.0)
        } else {
            write!(f, "{} (optimal)", self.0)
        }
    }
}

/// A computer player.
///
/// The agent is always the minimizing side of the search,
/// so a searching agent must not play as [`minimax::MAXIMIZER`].
/// A random agent may play as either team.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Agent {
    /// How moves are picked
    pub level: AgentLevel,

    /// The team this agent marks tiles for
    pub team: Team,
}

impl Agent {
    /// Make a new [`Agent`].
    pub fn new(level: AgentLevel, team: Team) -> Self {
        Self { level, team }
    }

    /// Pick a move for the board.
    ///
    /// # Panics
    /// In debug builds, panics if a searching agent plays as [`minimax::MAXIMIZER`].
    pub fn select_move<R>(&self, board: Board, rng: &mut R) -> Result<Coord, SelectMoveError>
    where
        R: Rng + ?Sized,
    {
        if let Some(winner) = board.terminal_state() {
            return Err(SelectMoveError::AlreadyWon(winner));
        }

        if self.level.is_random() {
            let empty_cells: Vec<Coord> = board.empty_cells().collect();
            let coord = *empty_cells.choose(rng).ok_or(SelectMoveError::NoMoves)?;

            info!(team = %self.team, %coord, "agent selected a random move");

            return Ok(coord);
        }

        debug_assert_ne!(
            self.team,
            minimax::MAXIMIZER,
            "a searching agent cannot play as the maximizer"
        );
        let evaluation = minimax::evaluate(board, false, self.team);
        let coord = evaluation.best_move.ok_or(SelectMoveError::NoMoves)?;

        info!(
            team = %self.team,
            %coord,
            value = evaluation.value,
            "agent selected a move"
        );

        Ok(coord)
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(AgentLevel::default(), Team::O)
    }
}
