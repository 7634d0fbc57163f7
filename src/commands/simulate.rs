use crate::{
    config::Config,
    util::AsciiTable,
};
use anyhow::Context;
use rand::{
    rngs::StdRng,
    Rng,
    SeedableRng,
};
use std::time::Instant;
use tic_tac_toe::{
    minimax,
    Agent,
    AgentLevel,
    Board,
    Coord,
    Game,
    GameMode,
    SelectMoveError,
    Team,
};
use tracing::{
    debug,
    info,
};

#[derive(Debug, Clone, Copy, argh::FromArgs)]
#[argh(
    subcommand,
    name = "simulate",
    description = "play agents against each other and count the results"
)]
pub struct Options {
    #[argh(option, default = "100", description = "the number of games to play")]
    games: u32,

    #[argh(option, default = "0", description = "the level of the X agent")]
    x_level: u8,

    #[argh(option, default = "1", description = "the level of the O agent")]
    o_level: u8,

    #[argh(option, description = "the rng seed, overriding the config")]
    seed: Option<u64>,
}

/// Results of a batch of games
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,

    /// Games where X moved first
    pub x_started: u32,
}

impl Tally {
    /// Total games played
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    /// Make a table of the results
    pub fn to_table(&self) -> AsciiTable {
        let mut table = AsciiTable::new(2, 6);
        table.set_padding(1);

        let rows = [
            ("Games", self.games()),
            ("X Wins", self.x_wins),
            ("O Wins", self.o_wins),
            ("Draws", self.draws),
            ("X Started", self.x_started),
        ];

        table.set_cell(0, 0, "Result");
        table.set_cell(1, 0, "Count");
        for (i, (name, count)) in rows.into_iter().enumerate() {
            table.set_cell(0, i + 1, name);
            table.set_cell(1, i + 1, count.to_string());
        }

        table
    }
}

/// Pick a move for either side.
///
/// The agent only searches as the minimizing side,
/// so a searching X player asks for the maximizing move directly.
fn select_move<R>(
    team: Team,
    level: AgentLevel,
    board: Board,
    rng: &mut R,
) -> Result<Coord, SelectMoveError>
where
    R: Rng + ?Sized,
{
    match team {
        Team::X if !level.is_random() => minimax::evaluate(board, true, Team::O)
            .best_move
            .ok_or(SelectMoveError::NoMoves),
        team => Agent::new(level, team).select_move(board, rng),
    }
}

/// Play a number of games between two agents.
pub fn simulate<R>(
    games: u32,
    x_level: AgentLevel,
    o_level: AgentLevel,
    rng: &mut R,
) -> anyhow::Result<Tally>
where
    R: Rng + ?Sized,
{
    let mut tally = Tally::default();

    for game_number in 0..games {
        let mut game = Game::new(rng);
        game.set_mode(GameMode::PlayerVsPlayer);

        if game.current_team() == Team::X {
            tally.x_started += 1;
        }

        while !game.is_over() {
            let team = game.current_team();
            let level = match team {
                Team::X => x_level,
                Team::O => o_level,
            };
            let coord = select_move(team, level, game.board(), rng)
                .with_context(|| format!("{team} failed to select a move"))?;
            game.make_move(coord)
                .with_context(|| format!("{team} made an invalid move"))?;
        }

        let winner = game.board().terminal_state();
        match winner {
            Some(Team::X) => tally.x_wins += 1,
            Some(Team::O) => tally.o_wins += 1,
            None => tally.draws += 1,
        }

        debug!(game_number, ?winner, "finished game");
    }

    Ok(tally)
}

pub fn exec(config: &Config, options: Options) -> anyhow::Result<()> {
    let mut rng = match options.seed.or(config.seed()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let x_level = AgentLevel(options.x_level);
    let o_level = AgentLevel(options.o_level);

    info!(
        games = options.games,
        %x_level,
        %o_level,
        "starting simulation"
    );
    let start = Instant::now();
    let tally = simulate(options.games, x_level, o_level, &mut rng)?;
    info!("simulated {} games in {:?}", tally.games(), start.elapsed());

    println!("{}", tally.to_table());

    Ok(())
}
