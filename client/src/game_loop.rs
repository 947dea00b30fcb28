use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use common::games::SessionRng;
use common::games::tictactoe::{GameStatus, HUMAN_MARK, TicTacToeGameState, calculate_move};
use common::log;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::commands::{HELP_TEXT, PlayerCommand, parse_command};
use crate::config::Config;
use crate::history::EventHistory;
use crate::renderer::render_screen;

/// Drives one session: renders, waits for the human or a bot, and paces the
/// AI with the configured delays. Everything runs on the calling task.
pub struct GameLoop<R, W> {
    state: TicTacToeGameState,
    config: Config,
    history: EventHistory,
    rng: SessionRng,
    input: Lines<R>,
    output: W,
    tree_output: Option<PathBuf>,
    games_to_play: u32,
    games_played: u32,
}

impl<R, W> GameLoop<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(config: Config, input: R, output: W, rng: SessionRng) -> Self {
        let history = EventHistory::new(config.display.event_history_size);
        Self {
            state: TicTacToeGameState::new(),
            config,
            history,
            rng,
            input: input.lines(),
            output,
            tree_output: None,
            games_to_play: 1,
            games_played: 0,
        }
    }

    pub fn with_tree_output(mut self, tree_output: Option<PathBuf>) -> Self {
        self.tree_output = tree_output;
        self
    }

    /// Only used when X is a bot; a human decides when to stop.
    pub fn with_games(mut self, games: u32) -> Self {
        self.games_to_play = games.max(1);
        self
    }

    pub fn state(&self) -> &TicTacToeGameState {
        &self.state
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    #[cfg(test)]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub async fn run(&mut self) -> Result<(), String> {
        loop {
            self.render()?;

            if self.state.is_game_over() {
                if !self.handle_game_over().await? {
                    break;
                }
                continue;
            }

            if self.state.is_ai_turn() {
                self.play_ai_turn().await?;
                continue;
            }

            if !self.play_x_turn().await? {
                break;
            }
        }

        log!(
            "Session finished: player {} - AI {}",
            self.state.player_score,
            self.state.ai_score
        );
        Ok(())
    }

    fn render(&mut self) -> Result<(), String> {
        let screen = render_screen(&self.state, &self.config.display, &self.history);
        write!(self.output, "{}", screen).map_err(|e| format!("Failed to write screen: {}", e))?;
        self.output
            .flush()
            .map_err(|e| format!("Failed to flush screen: {}", e))
    }

    fn say(&mut self, message: &str) -> Result<(), String> {
        writeln!(self.output, "{}", message).map_err(|e| format!("Failed to write message: {}", e))
    }

    async fn sleep_ms(&self, millis: u64) {
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    /// `Ok(None)` once the input is exhausted.
    async fn read_command(&mut self) -> Result<Option<PlayerCommand>, String> {
        loop {
            self.say("> ")?;
            let line = self
                .input
                .next_line()
                .await
                .map_err(|e| format!("Failed to read input: {}", e))?;
            let Some(line) = line else {
                return Ok(None);
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(command) => return Ok(Some(command)),
                Err(e) => self.say(&format!("{}. {}", e, HELP_TEXT))?,
            }
        }
    }

    /// Returns false when the session should end.
    async fn handle_game_over(&mut self) -> Result<bool, String> {
        if self.config.game.x_player.bot_type().is_some() {
            self.games_played += 1;
            if self.games_played >= self.games_to_play {
                return Ok(false);
            }
            self.state.reset();
            return Ok(true);
        }

        self.say("Game over. r reset, n new game, q quit")?;
        loop {
            match self.read_command().await? {
                None | Some(PlayerCommand::Quit) => return Ok(false),
                Some(command @ (PlayerCommand::Reset | PlayerCommand::NewGame)) => {
                    self.apply_session_command(command);
                    return Ok(true);
                }
                Some(PlayerCommand::Help) => self.say(HELP_TEXT)?,
                Some(PlayerCommand::Place(_)) => self.say("Game is already over")?,
            }
        }
    }

    async fn play_x_turn(&mut self) -> Result<bool, String> {
        let Some(bot_type) = self.config.game.x_player.bot_type() else {
            return self.play_human_turn().await;
        };

        self.sleep_ms(self.config.game.ai_trigger_delay_ms).await;
        let chosen = calculate_move(
            bot_type,
            &self.state.board,
            HUMAN_MARK,
            self.config.game.depth_limit,
            &mut self.rng,
        );
        let Some(index) = chosen else {
            log!("X bot found no move on board {}", self.state.board);
            return Ok(false);
        };
        self.place_x(index);
        Ok(true)
    }

    async fn play_human_turn(&mut self) -> Result<bool, String> {
        match self.read_command().await? {
            None | Some(PlayerCommand::Quit) => Ok(false),
            Some(PlayerCommand::Place(index)) => {
                self.place_x(index);
                Ok(true)
            }
            Some(PlayerCommand::Help) => {
                self.say(HELP_TEXT)?;
                Ok(true)
            }
            Some(command) => {
                self.apply_session_command(command);
                Ok(true)
            }
        }
    }

    fn place_x(&mut self, index: usize) {
        match self.state.place_mark(index) {
            Ok(()) => {
                self.history.push(format!("X played position {}", index + 1));
                self.record_result();
            }
            Err(e) => {
                log!("Move to position {} rejected: {}", index + 1, e);
                self.history.push(format!("Move rejected: {}", e));
            }
        }
    }

    async fn play_ai_turn(&mut self) -> Result<(), String> {
        self.sleep_ms(self.config.game.ai_trigger_delay_ms).await;
        if !self.state.begin_ai_turn() {
            return Ok(());
        }

        self.render()?;
        self.sleep_ms(self.config.game.thinking_delay_ms).await;

        let played = self
            .state
            .finish_ai_turn(self.config.game.depth_limit, self.config.game.build_tree);
        if let Some(index) = played {
            self.history.push(format!("AI played position {}", index + 1));
            self.record_result();
        }
        self.export_thinking();
        Ok(())
    }

    fn apply_session_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Reset => {
                self.state.reset();
                self.history.push("Board reset");
            }
            PlayerCommand::NewGame => {
                self.state.new_game();
                self.history.push("New game, scores cleared");
            }
            _ => {}
        }
    }

    fn record_result(&mut self) {
        let message = match self.state.status {
            GameStatus::InProgress => return,
            GameStatus::XWon => "X wins",
            GameStatus::OWon => "AI wins",
            GameStatus::Draw => "Draw",
        };
        log!(
            "{} on board {} (player {} - AI {})",
            message,
            self.state.board,
            self.state.player_score,
            self.state.ai_score
        );
        self.history.push(message);
    }

    fn export_thinking(&self) {
        let Some(path) = &self.tree_output else {
            return;
        };
        let result = self
            .state
            .ai_thinking
            .to_yaml()
            .and_then(|yaml| {
                std::fs::write(path, yaml)
                    .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
            });
        if let Err(e) = result {
            log!("{}", e);
        }
    }
}
