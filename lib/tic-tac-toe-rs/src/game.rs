use crate::{
    Agent,
    AgentLevel,
    Board,
    Coord,
    SelectMoveError,
    Team,
    WinLine,
};
use rand::Rng;
use tracing::debug;

/// A move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The game ended already
    #[error("the game is over")]
    GameOver,

    /// The tile is marked
    #[error("tile {0} is already marked")]
    Occupied(Coord),

    /// The agent could not pick a move
    #[error("the agent failed to select a move")]
    Agent(#[from] SelectMoveError),
}

/// Who plays against who
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    /// Two humans take turns
    PlayerVsPlayer,

    /// A human plays against an [`Agent`]
    #[default]
    PlayerVsAgent,
}

impl GameMode {
    /// Get the other mode
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::PlayerVsPlayer => Self::PlayerVsAgent,
            Self::PlayerVsAgent => Self::PlayerVsPlayer,
        }
    }
}

/// Whether a game is still being played
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Moves are accepted
    InProgress,

    /// A line was filled or the board is full
    Over,
}

/// How a game stands after a move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// Nobody has won yet
    InProgress,

    /// A team filled a line
    Won(WinLine),

    /// The board filled up without a winner
    Draw,
}

/// An accepted move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveOutcome {
    /// The team that moved
    pub team: Team,

    /// The marked tile
    pub coord: Coord,

    /// The state of the game after the move
    pub result: GameResult,
}

/// A game session.
///
/// This only tracks the rules of play.
/// Getting input and drawing the board is up to the caller.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    current_team: Team,
    status: GameStatus,
    mode: GameMode,
    agent: Agent,
}

impl Game {
    /// Make a new [`Game`] with a random starting team.
    pub fn new<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let current_team = if rng.gen_bool(0.5) { Team::X } else { Team::O };
        Self::with_starting_team(current_team)
    }

    /// Make a new [`Game`] where the given team moves first.
    pub fn with_starting_team(current_team: Team) -> Self {
        Self {
            board: Board::new(),
            current_team,
            status: GameStatus::InProgress,
            mode: GameMode::default(),
            agent: Agent::default(),
        }
    }

    /// Start over.
    ///
    /// This replaces the whole session,
    /// so the mode and agent go back to their defaults.
    pub fn reset<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        *self = Self::new(rng);
        debug!(starting_team = %self.current_team, "reset game");
    }

    /// Get the board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Get the team whos turn it is.
    pub fn current_team(&self) -> Team {
        self.current_team
    }

    /// Get whether the game is running.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the game ended.
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// Get the game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Set the game mode.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
    }

    /// Switch between player vs player and player vs agent.
    pub fn change_mode(&mut self) -> GameMode {
        self.mode = self.mode.toggle();
        self.mode
    }

    /// Get the agent.
    pub fn agent(&self) -> Agent {
        self.agent
    }

    /// Set how the agent picks moves.
    pub fn set_agent_level(&mut self, level: AgentLevel) {
        self.agent.level = level;
    }

    /// Get how the game stands.
    pub fn result(&self) -> GameResult {
        if let Some(win) = self.board.winning_line() {
            GameResult::Won(win)
        } else if self.board.is_full() {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }

    /// Returns true if the agent should move next.
    pub fn is_agent_turn(&self) -> bool {
        self.mode == GameMode::PlayerVsAgent
            && self.status == GameStatus::InProgress
            && self.current_team == self.agent.team
    }

    /// Mark a tile for the current team and pass the turn.
    pub fn make_move(&mut self, coord: Coord) -> Result<MoveOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        if !self.board.is_cell_empty(coord) {
            return Err(MoveError::Occupied(coord));
        }

        let team = self.current_team;
        self.board.mark(coord, team);
        self.current_team = team.inverse();

        let result = self.result();
        if result != GameResult::InProgress {
            self.status = GameStatus::Over;
        }

        debug!(%team, %coord, ?result, "made move");

        Ok(MoveOutcome {
            team,
            coord,
            result,
        })
    }

    /// Let the agent pick a move for the current team and play it.
    ///
    /// This does not check whos turn it is, see [`Self::is_agent_turn`].
    pub fn play_agent_turn<R>(&mut self, rng: &mut R) -> Result<MoveOutcome, MoveError>
    where
        R: Rng + ?Sized,
    {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let coord = self.agent.select_move(self.board, rng)?;
        self.make_move(coord)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Line;
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    #[test]
    fn new_game() {
        let mut rng = StdRng::seed_from_u64(1);
        let game = Game::new(&mut rng);
        assert!(!game.is_over());
        assert!(game.board().is_empty());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.mode(), GameMode::PlayerVsAgent);
        assert_eq!(game.agent(), Agent::default());
        assert_eq!(game.result(), GameResult::InProgress);
    }

    #[test]
    fn random_starting_team() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut x_starts = 0;
        for _ in 0..1_000 {
            if Game::new(&mut rng).current_team() == Team::X {
                x_starts += 1;
            }
        }
        assert!((400..=600).contains(&x_starts), "{x_starts}");
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::with_starting_team(Team::O);
        let outcome = game.make_move(Coord::new(1, 1)).unwrap();
        assert_eq!(outcome.team, Team::O);
        assert_eq!(outcome.result, GameResult::InProgress);
        assert_eq!(game.current_team(), Team::X);

        let outcome = game.make_move(Coord::new(0, 0)).unwrap();
        assert_eq!(outcome.team, Team::X);
        assert_eq!(game.current_team(), Team::O);
        assert_eq!(game.board().get(Coord::new(0, 0)), Some(Team::X));
    }

    #[test]
    fn occupied_rejected() {
        let mut game = Game::with_starting_team(Team::X);
        game.make_move(Coord::new(2, 2)).unwrap();
        assert_eq!(
            game.make_move(Coord::new(2, 2)),
            Err(MoveError::Occupied(Coord::new(2, 2)))
        );

        // A rejected move does not pass the turn.
        assert_eq!(game.current_team(), Team::O);
        assert_eq!(game.board().marked_count(), 1);
    }

    #[test]
    fn win_ends_game() {
        let mut game = Game::with_starting_team(Team::X);
        for coord in [
            Coord::new(0, 0),
            Coord::new(1, 0),
            Coord::new(0, 1),
            Coord::new(1, 1),
        ] {
            game.make_move(coord).unwrap();
        }

        let outcome = game.make_move(Coord::new(0, 2)).unwrap();
        assert_eq!(
            outcome.result,
            GameResult::Won(WinLine {
                team: Team::X,
                line: Line::Row(0),
            })
        );
        assert!(game.is_over());
        assert_eq!(game.make_move(Coord::new(2, 2)), Err(MoveError::GameOver));
        assert!(!game.is_agent_turn());
    }

    #[test]
    fn draw_ends_game() {
        let mut game = Game::with_starting_team(Team::X);
        // X O X / X O O / O X X
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.make_move(Coord::from_index(index)).unwrap();
        }
        assert!(game.is_over());
        assert_eq!(game.result(), GameResult::Draw);
    }

    #[test]
    fn mode_and_level() {
        let mut game = Game::with_starting_team(Team::O);
        assert!(game.is_agent_turn());

        assert_eq!(game.change_mode(), GameMode::PlayerVsPlayer);
        assert!(!game.is_agent_turn());
        assert_eq!(game.change_mode(), GameMode::PlayerVsAgent);

        game.set_agent_level(AgentLevel::RANDOM);
        assert!(game.agent().level.is_random());
    }

    #[test]
    fn reset_discards_settings() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = Game::with_starting_team(Team::X);
        game.change_mode();
        game.set_agent_level(AgentLevel::RANDOM);
        game.make_move(Coord::new(0, 0)).unwrap();

        game.reset(&mut rng);
        assert!(game.board().is_empty());
        assert_eq!(game.board().marked_count(), 0);
        assert!(!game.is_over());
        assert_eq!(game.mode(), GameMode::PlayerVsAgent);
        assert_eq!(game.agent(), Agent::default());
    }

    #[test]
    fn reset_rerolls_starting_team() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = Game::with_starting_team(Team::X);
        let mut seen_x = false;
        let mut seen_o = false;
        for _ in 0..100 {
            game.reset(&mut rng);
            match game.current_team() {
                Team::X => seen_x = true,
                Team::O => seen_o = true,
            }
        }
        assert!(seen_x && seen_o);
    }

    #[test]
    fn agent_never_loses() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let mut game = Game::new(&mut rng);
            let random_player = Agent::new(AgentLevel::RANDOM, Team::X);

            while !game.is_over() {
                if game.is_agent_turn() {
                    game.play_agent_turn(&mut rng).unwrap();
                } else {
                    let coord = random_player.select_move(game.board(), &mut rng).unwrap();
                    game.make_move(coord).unwrap();
                }
            }

            assert_ne!(game.board().terminal_state(), Some(Team::X));
        }
    }

    #[test]
    fn agent_turn_after_game_over() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut game = Game::with_starting_team(Team::X);
        for index in [0, 3, 1, 4, 2] {
            game.make_move(Coord::from_index(index)).unwrap();
        }
        assert_eq!(game.play_agent_turn(&mut rng), Err(MoveError::GameOver));
    }
}
