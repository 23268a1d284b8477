use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use super::tasks::SettleTask;
use crate::{
    config::{AppConfig, SessionConfig, Theme, TimingConfig},
    error::{GameError, GameResult},
    grid::{self, Grid, Selection},
    render::{InputEvent, Outcome, RenderCommand, ResultDialog},
    schedule::{Due, Scheduler},
    timer::{Timer, TimerEvent},
};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game in progress.
    Menu,
    /// A grid is dealt and the clock is running.
    Playing,
    /// Every pair was found.
    Victory,
    /// The clock ran out.
    Timeout,
}

impl Phase {
    /// Victory or timeout.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Victory | Phase::Timeout)
    }
}

/// Game controller owning the active grid and timer.
///
/// All state changes happen in response to explicit calls: input from the
/// user interface and elapsed time through [`Session::advance`]. Every new
/// grid gets a fresh generation number; deferred tasks scheduled for an older
/// generation are cancelled on restart and ignored should one slip through.
pub struct Session {
    config: SessionConfig,
    timing: TimingConfig,
    setup: Option<SessionConfig>,
    phase: Phase,
    grid: Option<Grid>,
    timer: Option<Timer>,
    scheduler: Scheduler<SettleTask>,
    generation: u64,
    controls_enabled: bool,
    rng: StdRng,
    outbox: Vec<RenderCommand>,
}

impl Session {
    /// Create a session in the menu with an OS-seeded shuffle.
    pub fn new(config: SessionConfig, timing: TimingConfig) -> GameResult<Self> {
        Self::with_rng(config, timing, StdRng::from_os_rng())
    }

    /// Create a session from loaded application settings.
    pub fn from_app_config(app: &AppConfig) -> GameResult<Self> {
        Self::new(app.game.clone(), app.timing.clone())
    }

    /// Create a session whose decks come from `rng`.
    pub fn with_rng(config: SessionConfig, timing: TimingConfig, rng: StdRng) -> GameResult<Self> {
        config.validate()?;
        let theme = config.theme;
        Ok(Self {
            config,
            timing,
            setup: None,
            phase: Phase::Menu,
            grid: None,
            timer: None,
            scheduler: Scheduler::new(),
            generation: 0,
            controls_enabled: true,
            rng,
            outbox: vec![RenderCommand::set_theme(theme), RenderCommand::ShowMenu],
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Settings applied to the next game.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }

    /// Generation of the current grid; bumped on every deal.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the in-game restart and exit buttons accept input.
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Number of deferred tasks still waiting.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Take every render command queued since the last call.
    pub fn drain_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Dispatch an input event, ignoring events that are invalid in the current phase.
    pub fn handle(&mut self, event: InputEvent) -> GameResult<()> {
        let result = match event {
            InputEvent::SelectCard { index } => self.select_card(index).map(|_| ()),
            InputEvent::Start => self.start(),
            InputEvent::Restart => self.restart(),
            InputEvent::Exit => self.exit(),
            InputEvent::PlayAgain => self.play_again(),
            InputEvent::ExitToMenu => self.exit_to_menu(),
            InputEvent::PointerEnter => {
                self.pointer_enter();
                Ok(())
            }
            InputEvent::PointerLeave => {
                self.pointer_leave();
                Ok(())
            }
            InputEvent::SetTheme { theme } => {
                self.set_theme(theme);
                Ok(())
            }
        };
        match result {
            Err(err) if !err.is_invalid_argument() => {
                debug!(?event, %err, "input ignored");
                Ok(())
            }
            other => other,
        }
    }

    /// Deal a grid with the current settings and start the clock.
    pub fn start(&mut self) -> GameResult<()> {
        if self.phase != Phase::Menu {
            return Err(GameError::InvalidOperation(
                "a game can only be started from the menu".to_string(),
            ));
        }
        self.config.validate()?;
        self.setup = Some(self.config.clone());
        self.deal()?;
        if let Some(timer) = self.timer.as_mut() {
            timer.start();
        }
        self.phase = Phase::Playing;
        info!(generation = self.generation, "game started");
        Ok(())
    }

    /// Deal a new grid with the same settings and refill the clock.
    pub fn restart(&mut self) -> GameResult<()> {
        if self.phase == Phase::Menu {
            return Err(GameError::InvalidOperation(
                "no game to restart".to_string(),
            ));
        }
        self.require_controls()?;
        self.redeal()
    }

    /// Result dialog retry button: acknowledge the outcome and play again.
    pub fn play_again(&mut self) -> GameResult<()> {
        if !self.phase.is_terminal() {
            return Err(GameError::InvalidOperation(
                "play again is only offered once a game has ended".to_string(),
            ));
        }
        self.acknowledge();
        self.redeal()
    }

    /// Leave the current game and return to the menu.
    pub fn exit(&mut self) -> GameResult<()> {
        if self.phase == Phase::Menu {
            return Err(GameError::InvalidOperation("no game to exit".to_string()));
        }
        self.require_controls()?;
        self.teardown();
        Ok(())
    }

    /// Result dialog exit button: acknowledge the outcome and return to the menu.
    pub fn exit_to_menu(&mut self) -> GameResult<()> {
        if !self.phase.is_terminal() {
            return Err(GameError::InvalidOperation(
                "exit to menu is only offered once a game has ended".to_string(),
            ));
        }
        self.acknowledge();
        self.teardown();
        Ok(())
    }

    /// Turn the card at `index` face up.
    pub fn select_card(&mut self, index: usize) -> GameResult<Selection> {
        if self.phase != Phase::Playing {
            return Err(GameError::InvalidOperation(
                "cards can only be selected while playing".to_string(),
            ));
        }
        let grid = self
            .grid
            .as_mut()
            .ok_or_else(|| GameError::InvalidOperation("no grid dealt".to_string()))?;

        let selection = grid.select_card(index);
        let stats = RenderCommand::UpdateStats {
            moves: grid.moves(),
            score: grid.score(),
        };
        match selection {
            Selection::Ignored(reason) => {
                debug!(index, ?reason, "selection ignored");
                return Ok(selection);
            }
            Selection::Revealed { index } => {
                self.outbox.push(RenderCommand::Reveal { index });
            }
            Selection::Matched {
                first,
                second,
                victory,
            } => {
                self.outbox.extend([
                    RenderCommand::Reveal { index: second },
                    RenderCommand::ShowMatched { index: first },
                    RenderCommand::ShowMatched { index: second },
                ]);
                if victory {
                    self.outbox.push(stats);
                    self.finish(Outcome::Victory);
                    return Ok(selection);
                }
            }
            Selection::Mismatched { first, second } => {
                self.outbox.extend([
                    RenderCommand::Reveal { index: second },
                    RenderCommand::ShakeMismatch { index: first },
                    RenderCommand::ShakeMismatch { index: second },
                ]);
                self.scheduler.schedule(
                    self.timing.mismatch_settle(),
                    self.generation,
                    SettleTask::FlipBack { first, second },
                );
            }
        }
        self.outbox.push(stats);
        Ok(selection)
    }

    /// Move the session clock forward, running due tasks and timer ticks in order.
    pub fn advance(&mut self, elapsed: Duration) {
        let mut left = elapsed;
        loop {
            let next = [
                self.scheduler.until_next(),
                self.timer.as_ref().and_then(Timer::until_next_tick),
            ]
            .into_iter()
            .flatten()
            .min();
            match next {
                Some(step) if step <= left => {
                    self.step(step);
                    left -= step;
                }
                _ => {
                    self.step(left);
                    break;
                }
            }
        }
    }

    /// Pointer entered the play area.
    pub fn pointer_enter(&mut self) {
        if self.phase == Phase::Playing {
            if let Some(timer) = self.timer.as_mut() {
                timer.resume();
            }
        }
    }

    /// Pointer left the play area.
    pub fn pointer_leave(&mut self) {
        if self.phase == Phase::Playing {
            if let Some(timer) = self.timer.as_mut() {
                timer.pause();
            }
        }
    }

    /// Switch the colour scheme. Has no effect on the game itself.
    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
        self.outbox.push(RenderCommand::set_theme(theme));
    }

    /// Check whether a grid shape could be committed.
    pub fn validate_dimensions(&self, columns: u32, rows: u32) -> GameResult<()> {
        grid::validate_dimensions(columns, rows)
    }

    /// Replace the settings used by the next game.
    ///
    /// Invalid settings are rejected without touching the current config,
    /// grid or timer.
    pub fn apply_config(&mut self, config: SessionConfig) -> GameResult<()> {
        config.validate()?;
        let theme_changed = config.theme != self.config.theme;
        self.config = config;
        if theme_changed {
            self.outbox.push(RenderCommand::set_theme(self.config.theme));
        }
        debug!(config = ?self.config, "settings applied");
        Ok(())
    }

    fn require_controls(&self) -> GameResult<()> {
        if self.controls_enabled {
            Ok(())
        } else {
            Err(GameError::InvalidOperation(
                "controls are disabled until the result is acknowledged".to_string(),
            ))
        }
    }

    fn acknowledge(&mut self) {
        if !self.controls_enabled {
            self.controls_enabled = true;
            self.outbox
                .push(RenderCommand::SetControlsEnabled { enabled: true });
        }
    }

    fn deal(&mut self) -> GameResult<()> {
        let setup = self
            .setup
            .clone()
            .ok_or_else(|| GameError::InvalidOperation("no game settings".to_string()))?;

        let mut grid = Grid::create(setup.columns, setup.rows, &mut self.rng)?;
        let timer = match self.timer.take() {
            Some(mut timer) if timer.limit() == setup.time_limit => {
                timer.reset();
                timer
            }
            _ => Timer::new(setup.time_limit)?,
        };

        let stale = self.generation;
        self.generation = self.generation.wrapping_add(1);
        let cancelled = self.scheduler.cancel_generation(stale);
        if cancelled > 0 {
            debug!(generation = stale, cancelled, "cancelled stale tasks");
        }
        grid = grid.stamped(self.generation);

        if let Some(mut old) = self.grid.take() {
            old.clear();
            self.outbox.push(RenderCommand::ClearGrid);
        }
        self.outbox.extend([
            RenderCommand::ShowGame {
                columns: setup.columns,
                rows: setup.rows,
                card_width: setup.card_width,
                card_height: setup.card_height,
            },
            RenderCommand::UpdateStats { moves: 0, score: 0 },
            RenderCommand::UpdateTimer {
                remaining: timer.remaining(),
            },
        ]);
        if let Some(preview) = self.timing.preview() {
            grid.begin_preview();
            self.outbox.push(RenderCommand::PreviewAll);
            self.scheduler
                .schedule(preview, self.generation, SettleTask::EndPreview);
        }

        self.grid = Some(grid);
        self.timer = Some(timer);
        Ok(())
    }

    fn redeal(&mut self) -> GameResult<()> {
        self.deal()?;
        if self.phase.is_terminal() {
            self.outbox.push(RenderCommand::HideResult);
        }
        if let Some(timer) = self.timer.as_mut() {
            if !timer.is_running() {
                timer.start();
            }
        }
        self.phase = Phase::Playing;
        info!(generation = self.generation, "game restarted");
        Ok(())
    }

    fn teardown(&mut self) {
        let cancelled = self.scheduler.cancel_generation(self.generation);
        self.generation = self.generation.wrapping_add(1);
        if let Some(mut grid) = self.grid.take() {
            grid.clear();
        }
        if let Some(mut timer) = self.timer.take() {
            timer.remove();
        }
        if self.phase.is_terminal() {
            self.outbox.push(RenderCommand::HideResult);
        }
        self.phase = Phase::Menu;
        self.outbox
            .extend([RenderCommand::ClearGrid, RenderCommand::ShowMenu]);
        info!(cancelled, "returned to menu");
    }

    fn finish(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Victory => {
                if let Some(timer) = self.timer.as_mut() {
                    timer.stop();
                }
                self.phase = Phase::Victory;
                self.controls_enabled = false;
                self.outbox
                    .push(RenderCommand::SetControlsEnabled { enabled: false });
            }
            Outcome::Timeout => {
                self.phase = Phase::Timeout;
                self.outbox.push(RenderCommand::ClearTimer);
            }
        }
        self.scheduler.schedule(
            self.timing.result_delay(),
            self.generation,
            SettleTask::ShowResult(outcome),
        );
        let (moves, score) = self
            .grid
            .as_ref()
            .map(|grid| (grid.moves(), grid.score()))
            .unwrap_or_default();
        info!(generation = self.generation, ?outcome, moves, score, "game over");
    }

    fn step(&mut self, elapsed: Duration) {
        for due in self.scheduler.advance(elapsed) {
            self.run_task(due);
        }
        let events = self
            .timer
            .as_mut()
            .map(|timer| timer.advance(elapsed))
            .unwrap_or_default();
        for event in events {
            match event {
                TimerEvent::Tick { remaining } => {
                    self.outbox.push(RenderCommand::UpdateTimer { remaining });
                }
                TimerEvent::Timeout => {
                    if self.phase == Phase::Playing {
                        self.finish(Outcome::Timeout);
                    }
                }
            }
        }
    }

    fn run_task(&mut self, due: Due<SettleTask>) {
        if due.generation != self.generation {
            debug!(
                task = ?due.task,
                scheduled_for = due.generation,
                current = self.generation,
                "dropped stale task"
            );
            return;
        }
        match due.task {
            SettleTask::EndPreview => {
                if let Some(grid) = self.grid.as_mut() {
                    grid.end_preview();
                    self.outbox.push(RenderCommand::HidePreview);
                }
            }
            SettleTask::FlipBack { first, second } => {
                let settled = self
                    .grid
                    .as_mut()
                    .map(|grid| grid.settle_mismatch(first, second))
                    .unwrap_or(false);
                if settled {
                    self.outbox.extend([
                        RenderCommand::Unflip { index: first },
                        RenderCommand::Unflip { index: second },
                    ]);
                }
            }
            SettleTask::ShowResult(outcome) => {
                self.outbox
                    .push(RenderCommand::ShowResult(ResultDialog::for_outcome(outcome)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn no_preview() -> TimingConfig {
        TimingConfig {
            preview_ms: 0,
            ..TimingConfig::default()
        }
    }

    fn session_with(config: SessionConfig, timing: TimingConfig) -> Session {
        Session::with_rng(config, timing, StdRng::seed_from_u64(99)).unwrap()
    }

    fn playing(columns: u32, rows: u32, time_limit: u32) -> Session {
        let config = SessionConfig {
            columns,
            rows,
            time_limit,
            ..SessionConfig::default()
        };
        let mut session = session_with(config, no_preview());
        session.start().unwrap();
        session.drain_commands();
        session
    }

    fn pairs(session: &Session) -> Vec<(usize, usize)> {
        let cards = session.grid().unwrap().cards();
        cards
            .iter()
            .enumerate()
            .filter_map(|(i, card)| {
                cards[i + 1..]
                    .iter()
                    .position(|other| other.value() == card.value())
                    .map(|offset| (i, i + 1 + offset))
            })
            .collect()
    }

    fn mismatch(session: &Session) -> (usize, usize) {
        let cards = session.grid().unwrap().cards();
        let second = cards
            .iter()
            .position(|card| card.value() != cards[0].value())
            .unwrap();
        (0, second)
    }

    fn results(commands: &[RenderCommand]) -> Vec<Outcome> {
        commands
            .iter()
            .filter_map(|command| match command {
                RenderCommand::ShowResult(dialog) => Some(dialog.outcome),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_is_only_valid_from_the_menu() {
        let mut session = session_with(SessionConfig::default(), no_preview());
        assert_eq!(
            session.drain_commands(),
            vec![RenderCommand::set_theme(Theme::Light), RenderCommand::ShowMenu]
        );
        session.start().unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.timer().unwrap().is_running());
        assert_eq!(session.grid().unwrap().cards().len(), 4);

        let generation = session.generation();
        assert!(matches!(
            session.start(),
            Err(GameError::InvalidOperation(_))
        ));
        assert_eq!(session.handle(InputEvent::Start), Ok(()));
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn menu_ignores_game_actions() {
        let mut session = session_with(SessionConfig::default(), no_preview());
        for event in [
            InputEvent::Restart,
            InputEvent::Exit,
            InputEvent::PlayAgain,
            InputEvent::ExitToMenu,
            InputEvent::SelectCard { index: 0 },
        ] {
            assert_eq!(session.handle(event), Ok(()));
        }
        assert_eq!(session.phase(), Phase::Menu);
        assert!(session.grid().is_none());
    }

    #[test]
    fn finding_every_pair_wins_once_and_stops_the_clock() {
        let mut session = playing(4, 3, 60);
        session.advance(ms(2500));
        let remaining = session.timer().unwrap().remaining();
        assert_eq!(remaining, 58);

        let all = pairs(&session);
        assert_eq!(all.len(), 6);
        for (n, &(a, b)) in all.iter().enumerate() {
            session.select_card(a).unwrap();
            let selection = session.select_card(b).unwrap();
            assert_eq!(
                selection,
                Selection::Matched {
                    first: a,
                    second: b,
                    victory: n == all.len() - 1
                }
            );
        }

        let grid = session.grid().unwrap();
        assert_eq!((grid.moves(), grid.score(), grid.matched_pairs()), (6, 30, 6));
        assert_eq!(session.phase(), Phase::Victory);
        assert!(!session.controls_enabled());
        let timer = session.timer().unwrap();
        assert!(!timer.is_running() && timer.is_paused());
        assert_eq!(timer.remaining(), remaining);

        let commands = session.drain_commands();
        assert!(commands.contains(&RenderCommand::SetControlsEnabled { enabled: false }));
        assert!(results(&commands).is_empty());

        session.advance(ms(600));
        session.advance(Duration::from_secs(120));
        assert_eq!(results(&session.drain_commands()), vec![Outcome::Victory]);
        assert_eq!(session.phase(), Phase::Victory);
        assert_eq!(session.timer().unwrap().remaining(), remaining);
    }

    #[test]
    fn victory_disables_controls_until_acknowledged() {
        let mut session = playing(2, 2, 60);
        for (a, b) in pairs(&session) {
            session.select_card(a).unwrap();
            session.select_card(b).unwrap();
        }
        assert_eq!(session.phase(), Phase::Victory);

        assert!(session.restart().is_err());
        assert!(session.exit().is_err());
        assert_eq!(session.phase(), Phase::Victory);

        let generation = session.generation();
        session.play_again().unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.controls_enabled());
        assert_eq!(session.generation(), generation + 1);
        let timer = session.timer().unwrap();
        assert!(timer.is_running() && !timer.is_paused());
        assert_eq!(timer.remaining(), 60);
        assert_eq!(session.grid().unwrap().moves(), 0);

        let commands = session.drain_commands();
        assert!(commands.contains(&RenderCommand::HideResult));
        assert!(commands.contains(&RenderCommand::SetControlsEnabled { enabled: true }));
    }

    #[test]
    fn mismatch_settles_after_the_interval() {
        let mut session = playing(2, 2, 60);
        let (a, b) = mismatch(&session);
        let third = (0..4).find(|&i| i != a && i != b).unwrap();

        session.select_card(a).unwrap();
        assert_eq!(
            session.select_card(b).unwrap(),
            Selection::Mismatched { first: a, second: b }
        );
        let dealt = session.grid().unwrap();
        assert_eq!((dealt.moves(), dealt.score()), (1, 0));
        assert!(dealt.card(a).unwrap().is_locked() && dealt.card(b).unwrap().is_locked());

        assert_eq!(
            session.select_card(third).unwrap(),
            Selection::Ignored(grid::Ignored::Resolving)
        );

        session.advance(ms(599));
        assert!(session.grid().unwrap().card(a).unwrap().is_revealed());
        session.advance(ms(1));
        for index in [a, b] {
            let card = session.grid().unwrap().card(index).unwrap();
            assert!(!card.is_revealed() && !card.is_matched() && !card.is_locked());
        }
        let commands = session.drain_commands();
        assert!(commands.contains(&RenderCommand::ShakeMismatch { index: a }));
        assert!(commands.contains(&RenderCommand::Unflip { index: b }));
        assert_eq!(session.grid().unwrap().moves(), 1);
    }

    #[test]
    fn countdown_times_out_exactly_once() {
        let mut session = playing(2, 2, 5);
        let mut timeouts = 0;
        for _ in 0..5 {
            let before = session.phase();
            session.advance(Duration::from_secs(1));
            if before == Phase::Playing && session.phase() == Phase::Timeout {
                timeouts += 1;
            }
        }
        assert_eq!(timeouts, 1);
        assert_eq!(session.phase(), Phase::Timeout);
        assert_eq!(session.timer().unwrap().remaining(), 0);
        assert!(!session.timer().unwrap().is_running());

        assert!(session.select_card(0).is_err());
        session.advance(Duration::from_secs(30));
        let commands = session.drain_commands();
        assert_eq!(results(&commands), vec![Outcome::Timeout]);
        assert_eq!(
            commands
                .iter()
                .filter(|command| **command == RenderCommand::ClearTimer)
                .count(),
            1
        );
        assert!(commands.contains(&RenderCommand::UpdateTimer { remaining: 0 }));
    }

    #[test]
    fn single_long_advance_interleaves_tasks_and_ticks() {
        let mut session = playing(2, 2, 3);
        let (a, b) = mismatch(&session);
        session.select_card(a).unwrap();
        session.select_card(b).unwrap();

        session.advance(Duration::from_secs(10));
        assert_eq!(session.phase(), Phase::Timeout);
        assert!(!session.grid().unwrap().is_resolving());
        assert_eq!(results(&session.drain_commands()), vec![Outcome::Timeout]);
    }

    #[test]
    fn restart_cancels_pending_settle_tasks() {
        let mut session = playing(2, 2, 60);
        let (a, b) = mismatch(&session);
        session.select_card(a).unwrap();
        session.select_card(b).unwrap();
        assert_eq!(session.pending_tasks(), 1);

        let generation = session.generation();
        session.restart().unwrap();
        assert_eq!(session.generation(), generation + 1);
        assert_eq!(session.pending_tasks(), 0);
        session.drain_commands();

        session.advance(Duration::from_secs(1));
        let grid = session.grid().unwrap();
        assert_eq!(grid.generation(), session.generation());
        assert_eq!((grid.moves(), grid.score()), (0, 0));
        assert!(grid.cards().iter().all(|card| !card.is_revealed() && !card.is_locked()));
        assert!(!session
            .drain_commands()
            .iter()
            .any(|command| matches!(command, RenderCommand::Unflip { .. })));
    }

    #[test]
    fn leaving_a_victory_drops_the_pending_result() {
        for play_again in [true, false] {
            let mut session = playing(2, 2, 60);
            for (a, b) in pairs(&session) {
                session.select_card(a).unwrap();
                session.select_card(b).unwrap();
            }
            assert_eq!(session.phase(), Phase::Victory);
            assert_eq!(session.pending_tasks(), 1);

            if play_again {
                session.play_again().unwrap();
                assert_eq!(session.phase(), Phase::Playing);
            } else {
                session.exit_to_menu().unwrap();
                assert_eq!(session.phase(), Phase::Menu);
            }
            assert_eq!(session.pending_tasks(), 0);
            session.drain_commands();

            session.advance(Duration::from_secs(2));
            assert!(results(&session.drain_commands()).is_empty());
            if play_again {
                assert_eq!(session.phase(), Phase::Playing);
                assert_eq!(session.grid().unwrap().matched_pairs(), 0);
            }
        }
    }

    #[test]
    fn restart_refills_a_running_clock() {
        let mut session = playing(2, 2, 60);
        session.advance(Duration::from_secs(7));
        let (a, b) = pairs(&session)[0];
        session.select_card(a).unwrap();
        session.select_card(b).unwrap();

        session.handle(InputEvent::Restart).unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        let timer = session.timer().unwrap();
        assert_eq!(timer.remaining(), 60);
        assert!(timer.is_running());
        assert_eq!(session.grid().unwrap().matched_pairs(), 0);
    }

    #[test]
    fn restart_after_timeout_starts_a_fresh_countdown() {
        let mut session = playing(2, 2, 2);
        session.advance(Duration::from_secs(2));
        assert_eq!(session.phase(), Phase::Timeout);

        session.restart().unwrap();
        assert_eq!(session.phase(), Phase::Playing);
        assert!(session.timer().unwrap().is_counting());
        session.advance(Duration::from_secs(1));
        assert_eq!(session.timer().unwrap().remaining(), 1);
    }

    #[test]
    fn exit_returns_to_menu_and_keeps_settings() {
        let mut session = playing(4, 2, 45);
        let (a, b) = mismatch(&session);
        session.select_card(a).unwrap();
        session.select_card(b).unwrap();

        session.exit().unwrap();
        assert_eq!(session.phase(), Phase::Menu);
        assert!(session.grid().is_none());
        assert!(session.timer().is_none());
        assert_eq!(session.pending_tasks(), 0);
        assert_eq!((session.config().columns, session.config().time_limit), (4, 45));
        let commands = session.drain_commands();
        assert_eq!(
            &commands[commands.len() - 2..],
            &[RenderCommand::ClearGrid, RenderCommand::ShowMenu]
        );

        session.start().unwrap();
        assert_eq!(session.grid().unwrap().cards().len(), 8);
    }

    #[test]
    fn exit_to_menu_acknowledges_a_victory() {
        let mut session = playing(2, 2, 60);
        for (a, b) in pairs(&session) {
            session.select_card(a).unwrap();
            session.select_card(b).unwrap();
        }
        assert!(session.exit_to_menu().is_ok());
        assert_eq!(session.phase(), Phase::Menu);
        assert!(session.controls_enabled());
    }

    #[test]
    fn preview_blocks_selection_until_it_ends() {
        let mut session = session_with(SessionConfig::default(), TimingConfig::default());
        session.start().unwrap();
        assert!(session.drain_commands().contains(&RenderCommand::PreviewAll));
        assert_eq!(
            session.select_card(0).unwrap(),
            Selection::Ignored(grid::Ignored::Blocked)
        );

        session.advance(ms(1200));
        assert!(session.drain_commands().contains(&RenderCommand::HidePreview));
        assert_eq!(
            session.select_card(0).unwrap(),
            Selection::Revealed { index: 0 }
        );
    }

    #[test]
    fn pointer_leaving_pauses_the_clock() {
        let mut session = playing(2, 2, 30);
        session.handle(InputEvent::PointerLeave).unwrap();
        session.advance(Duration::from_secs(5));
        assert_eq!(session.timer().unwrap().remaining(), 30);
        assert!(session.timer().unwrap().is_running());

        session.handle(InputEvent::PointerEnter).unwrap();
        session.advance(Duration::from_secs(5));
        assert_eq!(session.timer().unwrap().remaining(), 25);
    }

    #[test]
    fn theme_switch_does_not_touch_the_game() {
        let mut session = playing(2, 2, 30);
        let generation = session.generation();
        session
            .handle(InputEvent::SetTheme { theme: Theme::Dark })
            .unwrap();
        assert_eq!(session.config().theme, Theme::Dark);
        assert_eq!(session.generation(), generation);
        assert_eq!(
            session.drain_commands(),
            vec![RenderCommand::set_theme(Theme::Dark)]
        );
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = SessionConfig {
            columns: 3,
            rows: 3,
            ..SessionConfig::default()
        };
        assert!(matches!(
            Session::with_rng(config.clone(), no_preview(), StdRng::seed_from_u64(0)),
            Err(GameError::OddCardCount { .. })
        ));

        let mut session = playing(2, 2, 30);
        assert!(session.apply_config(config).is_err());
        assert_eq!(session.config(), &SessionConfig {
            time_limit: 30,
            ..SessionConfig::default()
        });
    }
}
