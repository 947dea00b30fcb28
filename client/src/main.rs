mod commands;
mod config;
mod game_loop;
mod history;
mod renderer;

use std::path::PathBuf;

use clap::Parser;
use common::games::SessionRng;
use common::games::tictactoe::{AI_MARK, Board, SearchSettings, analyze_position};
use common::{log, logger};
use tokio::io::BufReader;

use config::{CONFIG_FILE, Validate, XPlayerMode, config_store};
use game_loop::GameLoop;
use renderer::{render_board, render_thinking, render_tree};

#[derive(Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a minimax AI that shows its search")]
struct Args {
    #[arg(long, default_value = CONFIG_FILE)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,

    /// Append log entries to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Who plays X; overrides the config file.
    #[arg(long, value_enum)]
    x_player: Option<XPlayerMode>,

    #[arg(long)]
    depth_limit: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Write the AI's last analysis as YAML after every AI move.
    #[arg(long)]
    tree_output: Option<PathBuf>,

    /// Games to play when X is a bot.
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Print the AI's analysis of a board such as "X../.O./..." and exit.
    #[arg(long)]
    analyze: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    match &args.log_file {
        Some(path) => logger::init_file_logger(prefix, path)?,
        None => logger::init_logger(prefix),
    }

    let mut config = config_store(&args.config).load()?;
    if let Some(x_player) = args.x_player {
        config.game.x_player = x_player;
    }
    if let Some(depth_limit) = args.depth_limit {
        config.game.depth_limit = depth_limit;
    }
    config.validate()?;

    if let Some(position) = args.analyze {
        let board: Board = position.parse()?;
        let settings = SearchSettings::new(AI_MARK, config.game.depth_limit);
        let analysis = analyze_position(&board, &settings, true);
        print!("{}", render_board(&board, None));
        println!();
        print!("{}", render_thinking(&analysis.thinking));
        if let Some(tree) = &analysis.thinking.search_tree {
            println!();
            print!("{}", render_tree(tree, config.display.tree_display_levels));
        }
        return Ok(());
    }

    let rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    log!(
        "Starting session: X is {:?}, depth limit {}, seed {}",
        config.game.x_player,
        config.game.depth_limit,
        rng.seed()
    );

    let mut game_loop = GameLoop::new(config, BufReader::new(tokio::io::stdin()), std::io::stdout(), rng)
        .with_tree_output(args.tree_output)
        .with_games(args.games);
    game_loop.run().await?;

    let state = game_loop.state();
    println!("Final score: you {} - AI {}", state.player_score, state.ai_score);

    Ok(())
}
