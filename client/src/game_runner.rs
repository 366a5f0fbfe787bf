use std::fmt::Display;
use std::io::Write;
use std::time::Instant;

use common::Username;
use common::games::SessionRng;
use common::games::tictactoe::{MoveEffect, Searcher, TicTacToeGameState};
use common::leaderboard::{format_leaderboard, sort_scores};
use common::log;

use crate::config::{AiSpeed, ClientConfigManager};
use crate::leaderboard_client::WinRecorder;
use crate::pacing::plan_reply;
use crate::terminal_ui::{Command, HELP_TEXT, render_board};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives one terminal session: reads commands, plays the computer's replies
/// with pacing, and reports wins to the leaderboard.
pub struct GameRunner<W: Write> {
    state: TicTacToeGameState,
    searcher: Searcher,
    rng: SessionRng,
    speed: AiSpeed,
    username: Option<Username>,
    recorder: WinRecorder,
    config_manager: Option<ClientConfigManager>,
    out: W,
}

impl<W: Write> GameRunner<W> {
    pub fn new(
        speed: AiSpeed,
        username: Option<Username>,
        recorder: WinRecorder,
        rng: SessionRng,
        out: W,
    ) -> Self {
        Self {
            state: TicTacToeGameState::new(),
            searcher: Searcher::new(),
            rng,
            speed,
            username,
            recorder,
            config_manager: None,
            out,
        }
    }

    /// Name and speed changes made during the session are saved through this.
    pub fn with_config_manager(mut self, manager: ClientConfigManager) -> Self {
        self.config_manager = Some(manager);
        self
    }

    pub fn state(&self) -> &TicTacToeGameState {
        &self.state
    }

    pub fn speed(&self) -> AiSpeed {
        self.speed
    }

    pub fn username(&self) -> Option<&Username> {
        self.username.as_ref()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn start(&mut self) -> Result<(), String> {
        self.say("Tic-Tac-Toe: you are X and always move first.")?;
        match self.username.clone() {
            Some(name) => self.say(format!("Playing as {}", name))?,
            None => self.say("No name set, wins will not be recorded (n <name> to set one)")?,
        }
        if self.recorder.is_offline() {
            self.say("Offline: the leaderboard is unavailable")?;
        }
        self.say(HELP_TEXT)?;
        self.show_board()
    }

    /// Invalid input is reported to the player; only output failures are errors.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow, String> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                self.say(e)?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Place(index) => self.play_human_move(index).await?,
            Command::Reset => {
                self.state.reset();
                self.say("New game")?;
                self.show_board()?;
            }
            Command::Leaderboard => self.show_leaderboard().await?,
            Command::SetName(raw) => self.set_name(&raw).await?,
            Command::SetSpeed(speed) => self.set_speed(speed)?,
            Command::Help => self.say(HELP_TEXT)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    async fn play_human_move(&mut self, index: usize) -> Result<(), String> {
        let effect = match self.state.place_mark(index) {
            Ok(effect) => effect,
            Err(e) => return self.say(e),
        };

        if effect.status.is_over() {
            return self.report_outcome(effect).await;
        }

        self.show_board()?;
        self.play_bot_move().await
    }

    async fn play_bot_move(&mut self) -> Result<(), String> {
        let started = Instant::now();
        let reply = match self.state.begin_bot_move(&mut self.searcher, &mut self.rng) {
            Ok(reply) => reply,
            Err(e) => {
                log!("Engine move refused: {}", e);
                return self.say(e);
            }
        };

        let plan = plan_reply(self.speed, started.elapsed());
        match plan.thinking_notice_after {
            Some(after) => {
                tokio::time::sleep(after).await;
                self.say(self.state.status_message())?;
                tokio::time::sleep(plan.remaining_delay.saturating_sub(after)).await;
            }
            None => tokio::time::sleep(plan.remaining_delay).await,
        }

        let effect = match self.state.finish_bot_move(reply) {
            Ok(effect) => effect,
            Err(e) => return self.say(e),
        };

        if let Some(index) = effect.index {
            self.say(format!("AI plays {}", index + 1))?;
        }

        if effect.status.is_over() {
            return self.report_outcome(effect).await;
        }
        self.show_board()
    }

    async fn report_outcome(&mut self, effect: MoveEffect) -> Result<(), String> {
        self.show_board()?;
        if effect.human_won() {
            self.record_win().await?;
        }
        self.say("Press r for a new game")
    }

    /// Recording is best effort: failures are logged and shown, never fatal.
    pub async fn record_win(&mut self) -> Result<(), String> {
        let Some(name) = self.username.clone() else {
            return self.say("Win not recorded, set a name with 'n <name>'");
        };

        match self.recorder.record_win(&name).await {
            Ok(wins) => self.say(format!("{} now has {} wins", name, wins)),
            Err(e) => {
                log!("Failed to record win for {}: {}", name, e);
                self.say(format!("Win not recorded: {}", e))
            }
        }
    }

    async fn show_leaderboard(&mut self) -> Result<(), String> {
        match self.recorder.leaderboard().await {
            Ok(mut scores) => {
                sort_scores(&mut scores);
                self.say(format_leaderboard(&scores))
            }
            Err(e) => self.say(format!("Leaderboard unavailable: {}", e)),
        }
    }

    async fn set_name(&mut self, raw: &str) -> Result<(), String> {
        let name = if raw.trim().is_empty() {
            None
        } else {
            match Username::parse(raw) {
                Ok(name) => Some(name),
                Err(e) => return self.say(e),
            }
        };

        self.username = name.clone();
        self.persist(|config| config.username = name.as_ref().map(Username::to_string))?;

        let Some(name) = name else {
            return self.say("Name cleared, wins will not be recorded");
        };
        self.say(format!("Playing as {}", name))?;

        if !self.recorder.is_offline()
            && let Ok(wins) = self.recorder.wins(&name).await
        {
            self.say(format!("{} has {} wins so far", name, wins))?;
        }
        Ok(())
    }

    fn set_speed(&mut self, speed: AiSpeed) -> Result<(), String> {
        self.speed = speed;
        self.persist(|config| config.ai_speed = speed)?;
        self.say(format!("AI speed: {}", speed))
    }

    fn persist<F>(&mut self, change: F) -> Result<(), String>
    where
        F: FnOnce(&mut crate::config::Config),
    {
        let Some(manager) = self.config_manager.as_ref() else {
            return Ok(());
        };
        if let Err(e) = manager.update(change) {
            log!("Failed to save client config: {}", e);
            return self.say(format!("Setting not saved: {}", e));
        }
        Ok(())
    }

    fn show_board(&mut self) -> Result<(), String> {
        let board = render_board(self.state.board());
        self.say(board)?;
        self.say(self.state.status_message())
    }

    fn say(&mut self, text: impl Display) -> Result<(), String> {
        writeln!(self.out, "{}", text).map_err(|e| format!("Failed to write output: {}", e))?;
        self.out.flush().map_err(|e| format!("Failed to flush output: {}", e))
    }
}
