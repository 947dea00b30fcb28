use common::games::tictactoe::CELL_COUNT;

pub const HELP_TEXT: &str = "Commands: 1-9 place a mark, r reset, n new game, h help, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Zero-based cell index.
    Place(usize),
    Reset,
    NewGame,
    Help,
    Quit,
}

/// Positions are typed 1-based, as printed on the board.
pub fn parse_command(input: &str) -> Result<PlayerCommand, String> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "r" | "reset" => return Ok(PlayerCommand::Reset),
        "n" | "new" => return Ok(PlayerCommand::NewGame),
        "h" | "help" | "?" => return Ok(PlayerCommand::Help),
        "q" | "quit" | "exit" => return Ok(PlayerCommand::Quit),
        _ => {}
    }

    let position: usize = input
        .parse()
        .map_err(|_| format!("Unknown command '{}'", input))?;
    if position == 0 || position > CELL_COUNT {
        return Err(format!("Position must be between 1 and {}", CELL_COUNT));
    }
    Ok(PlayerCommand::Place(position - 1))
}
