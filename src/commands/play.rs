use crate::config::Config;
use anyhow::Context;
use rand::{
    rngs::StdRng,
    Rng,
    SeedableRng,
};
use std::io::{
    BufRead,
    Write,
};
use tic_tac_toe::{
    AgentLevel,
    Board,
    Coord,
    Game,
    GameMode,
    GameResult,
    InvalidCoordError,
    Line,
    MoveOutcome,
    Team,
};
use tracing::info;

const HELP: &str = "\
commands:
  <row> <col>  mark a tile, rows and columns go from 1 to 3
  g            switch between player vs player and player vs agent
  r            restart
  0            make the agent pick random tiles
  1            make the agent play perfectly
  b            show the board
  h            show this help
  q            quit";

#[derive(Debug, Clone, Copy, argh::FromArgs)]
#[argh(subcommand, name = "play", description = "play a game in the terminal")]
pub struct Options {
    #[argh(option, description = "the agent level, overriding the config")]
    level: Option<u8>,

    #[argh(switch, description = "start in player vs player mode")]
    pvp: bool,

    #[argh(option, description = "the rng seed, overriding the config")]
    seed: Option<u64>,
}

/// The settings applied to new games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySettings {
    pub mode: GameMode,
    pub level: AgentLevel,

    /// Reapply the mode and level after a restart.
    pub keep_on_reset: bool,
}

impl PlaySettings {
    fn apply(self, game: &mut Game) {
        game.set_mode(self.mode);
        game.set_agent_level(self.level);
    }
}

/// A line of console input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Coord),
    ToggleMode,
    Reset,
    SetLevel(AgentLevel),
    Board,
    Help,
    Quit,
}

/// Failed to parse a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("no command given")]
    Empty,

    #[error("unknown command `{0}`, `h` shows the commands")]
    Unknown(String),

    #[error("`{0}` is not a row or column")]
    InvalidNumber(String),

    #[error("that tile is not on the board")]
    InvalidCoord(#[from] InvalidCoordError),
}

fn parse_one_based(s: &str) -> Result<u8, ParseCommandError> {
    s.parse::<u8>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| ParseCommandError::InvalidNumber(s.to_string()))
}

impl std::str::FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => Err(ParseCommandError::Empty),
            (Some(row), Some(col), None) => {
                let row = parse_one_based(row)?;
                let col = parse_one_based(col)?;
                Ok(Self::Move(Coord::try_new(row, col)?))
            }
            (Some(command), None, None) => match command {
                "g" => Ok(Self::ToggleMode),
                "r" => Ok(Self::Reset),
                "b" => Ok(Self::Board),
                "h" | "?" | "help" => Ok(Self::Help),
                "q" | "quit" => Ok(Self::Quit),
                level => level
                    .parse::<u8>()
                    .map(|level| Self::SetLevel(AgentLevel(level)))
                    .map_err(|_| ParseCommandError::Unknown(level.to_string())),
            },
            _ => Err(ParseCommandError::Unknown(s.trim().to_string())),
        }
    }
}

/// Draw a board as text
pub fn render_board(board: Board) -> String {
    let mut ret = String::from("   1   2   3\n");
    let mut line = String::new();
    for (coord, team) in board.iter() {
        let tile = team.map_or(' ', Team::as_char);
        if coord.col == 0 {
            if coord.row != 0 {
                ret.push_str("  ---+---+---\n");
            }
            line = format!("{}  {tile}", coord.row + 1);
        } else {
            line.push_str(" | ");
            line.push(tile);
        }

        if coord.col == 2 {
            ret.push_str(line.trim_end());
            ret.push('\n');
        }
    }
    ret
}

fn describe_line(line: Line) -> String {
    match line {
        Line::Column(col) => format!("column {}", col + 1),
        Line::Row(row) => format!("row {}", row + 1),
        Line::DescendingDiagonal => "the descending diagonal".to_string(),
        Line::AscendingDiagonal => "the ascending diagonal".to_string(),
    }
}

fn describe_mode(mode: GameMode) -> &'static str {
    match mode {
        GameMode::PlayerVsPlayer => "player vs player",
        GameMode::PlayerVsAgent => "player vs agent",
    }
}

fn report_move<W>(output: &mut W, game: &Game, outcome: MoveOutcome) -> std::io::Result<()>
where
    W: Write,
{
    writeln!(
        output,
        "{} marked row {} column {}",
        outcome.team,
        outcome.coord.row + 1,
        outcome.coord.col + 1
    )?;
    write!(output, "{}", render_board(game.board()))?;

    match outcome.result {
        GameResult::InProgress => {}
        GameResult::Won(win) => {
            writeln!(output, "{} wins on {}", win.team, describe_line(win.line))?;
        }
        GameResult::Draw => {
            writeln!(output, "draw")?;
        }
    }

    Ok(())
}

/// Run a console game until the input ends or the player quits.
pub fn run<R, W, G>(
    mut input: R,
    mut output: W,
    settings: PlaySettings,
    rng: &mut G,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let mut game = Game::new(rng);
    settings.apply(&mut game);

    writeln!(output, "{HELP}")?;
    writeln!(output, "mode: {}", describe_mode(game.mode()))?;
    writeln!(output, "{} goes first", game.current_team())?;
    write!(output, "{}", render_board(game.board()))?;

    let mut line = String::new();
    loop {
        if game.is_agent_turn() {
            let outcome = game
                .play_agent_turn(rng)
                .context("the agent failed to move")?;
            report_move(&mut output, &game, outcome)?;
        }

        if game.is_over() {
            writeln!(output, "game over, `r` restarts and `q` quits")?;
        } else {
            write!(output, "{} to move > ", game.current_team())?;
        }
        output.flush()?;

        line.clear();
        if input.read_line(&mut line).context("failed to read input")? == 0 {
            break;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(ParseCommandError::Empty) => continue,
            Err(error) => {
                writeln!(output, "{error}")?;
                continue;
            }
        };

        match command {
            Command::Move(coord) => match game.make_move(coord) {
                Ok(outcome) => report_move(&mut output, &game, outcome)?,
                Err(error) => writeln!(output, "{error}")?,
            },
            Command::ToggleMode => {
                let mode = game.change_mode();
                writeln!(output, "mode: {}", describe_mode(mode))?;
            }
            Command::Reset => {
                game.reset(rng);
                if settings.keep_on_reset {
                    settings.apply(&mut game);
                }
                writeln!(output, "mode: {}", describe_mode(game.mode()))?;
                writeln!(output, "{} goes first", game.current_team())?;
                write!(output, "{}", render_board(game.board()))?;
            }
            Command::SetLevel(level) => {
                game.set_agent_level(level);
                writeln!(output, "agent level: {level}")?;
            }
            Command::Board => write!(output, "{}", render_board(game.board()))?,
            Command::Help => writeln!(output, "{HELP}")?,
            Command::Quit => break,
        }
    }

    Ok(())
}

pub fn exec(config: &Config, options: Options) -> anyhow::Result<()> {
    let settings = PlaySettings {
        mode: if options.pvp {
            GameMode::PlayerVsPlayer
        } else {
            config.mode()
        },
        level: options.level.map_or(config.agent_level(), AgentLevel),
        keep_on_reset: config.keep_settings_on_reset(),
    };
    let mut rng = match options.seed.or(config.seed()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(?settings, "starting console game");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(stdin.lock(), stdout.lock(), settings, &mut rng)
}
