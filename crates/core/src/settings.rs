//! Settings panel: draft edits with live validation.
//!
//! The panel edits a copy of the session settings. Every change is kept in the
//! draft so the user can pass through an odd grid while typing, but the panel
//! refuses to commit while the draft is invalid. Committing goes through
//! [`Session::apply_config`], which leaves the running game untouched.

use tracing::debug;

use crate::{
    config::{SessionConfig, Theme},
    error::{GameError, GameResult},
    session::Session,
};

/// One edited field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    /// Card width in pixels.
    CardWidth(u32),
    /// Card height in pixels.
    CardHeight(u32),
    /// Grid columns.
    Columns(u32),
    /// Grid rows.
    Rows(u32),
    /// Countdown length in seconds.
    TimeLimit(u32),
    /// Colour scheme.
    Theme(Theme),
}

impl SettingChange {
    /// Caption for the edited field, e.g. `Columns - 4`.
    pub fn label(&self) -> String {
        match self {
            SettingChange::CardWidth(px) => format!("Cards width - {px}px"),
            SettingChange::CardHeight(px) => format!("Cards height - {px}px"),
            SettingChange::Columns(n) => format!("Columns - {n}"),
            SettingChange::Rows(n) => format!("Rows - {n}"),
            SettingChange::TimeLimit(secs) => format!("Time limit - {secs}s"),
            SettingChange::Theme(theme) => theme.label(),
        }
    }

    fn apply(&self, config: &mut SessionConfig) {
        match *self {
            SettingChange::CardWidth(px) => config.card_width = px,
            SettingChange::CardHeight(px) => config.card_height = px,
            SettingChange::Columns(n) => config.columns = n,
            SettingChange::Rows(n) => config.rows = n,
            SettingChange::TimeLimit(secs) => config.time_limit = secs,
            SettingChange::Theme(theme) => config.theme = theme,
        }
    }
}

/// Draft of the session settings being edited.
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    draft: SessionConfig,
    error: Option<GameError>,
}

impl SettingsPanel {
    /// Start editing a copy of the session's current settings.
    pub fn open(session: &Session) -> Self {
        Self {
            draft: session.config().clone(),
            error: None,
        }
    }

    /// Settings as edited so far.
    pub fn draft(&self) -> &SessionConfig {
        &self.draft
    }

    /// Validation error of the current draft, if any.
    pub fn error(&self) -> Option<&GameError> {
        self.error.as_ref()
    }

    /// Whether the rows and columns fields should be flagged.
    pub fn dimensions_invalid(&self) -> bool {
        matches!(self.error, Some(GameError::OddCardCount { .. }))
    }

    /// The panel may only be closed with a valid draft.
    pub fn can_close(&self) -> bool {
        self.error.is_none()
    }

    /// Edit one field and re-validate the draft.
    pub fn set(&mut self, change: SettingChange) -> GameResult<()> {
        change.apply(&mut self.draft);
        self.error = self.draft.validate().err();
        debug!(label = %change.label(), valid = self.error.is_none(), "setting changed");
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Apply the draft to `session`. Fails without side effects while invalid.
    pub fn commit(&self, session: &mut Session) -> GameResult<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        session.apply_config(self.draft.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::TimingConfig, session::Phase};
    use rand::{rngs::StdRng, SeedableRng};

    fn session() -> Session {
        Session::with_rng(
            SessionConfig::default(),
            TimingConfig::default(),
            StdRng::seed_from_u64(3),
        )
        .unwrap()
    }

    #[test]
    fn odd_product_blocks_commit() {
        let mut session = session();
        let mut panel = SettingsPanel::open(&session);

        assert_eq!(
            panel.set(SettingChange::Columns(3)),
            Err(GameError::OddCardCount { columns: 3, rows: 2 })
        );
        assert!(!panel.can_close());

        assert!(panel.set(SettingChange::Rows(3)).is_err());
        assert!(panel.dimensions_invalid());
        assert!(panel.commit(&mut session).is_err());
        assert_eq!(session.config(), &SessionConfig::default());

        assert!(panel.set(SettingChange::Rows(4)).is_ok());
        assert!(panel.can_close());
        panel.commit(&mut session).unwrap();
        assert_eq!((session.config().columns, session.config().rows), (3, 4));
    }

    #[test]
    fn rejected_settings_leave_running_game_alone() {
        let mut session = session();
        session.start().unwrap();
        let generation = session.generation();
        let cards = session.grid().unwrap().cards().to_vec();

        let mut panel = SettingsPanel::open(&session);
        panel.set(SettingChange::Columns(5)).unwrap();
        assert!(panel.set(SettingChange::Rows(1)).is_err());
        assert!(panel.commit(&mut session).is_err());
        assert!(session.validate_dimensions(5, 2).is_ok());
        assert!(session.validate_dimensions(5, 1).is_err());

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.generation(), generation);
        assert_eq!(session.grid().unwrap().cards(), &cards[..]);
        assert_eq!(session.config().columns, 2);
    }

    #[test]
    fn zero_time_limit_is_flagged() {
        let session = session();
        let mut panel = SettingsPanel::open(&session);
        let err = panel.set(SettingChange::TimeLimit(0)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!panel.dimensions_invalid());
        assert!(!panel.can_close());
    }

    #[test]
    fn oversized_grid_is_flagged_as_invalid_argument() {
        let mut session = session();
        let mut panel = SettingsPanel::open(&session);
        let err = panel.set(SettingChange::Rows(30_000)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!panel.dimensions_invalid());
        assert!(panel.commit(&mut session).is_err());
        assert_eq!(session.config().rows, 2);

        panel.set(SettingChange::Rows(crate::grid::MAX_GRID_SIDE)).unwrap();
        assert!(panel.can_close());
    }

    #[test]
    fn labels_follow_the_panel_wording() {
        assert_eq!(SettingChange::CardWidth(64).label(), "Cards width - 64px");
        assert_eq!(SettingChange::CardHeight(40).label(), "Cards height - 40px");
        assert_eq!(SettingChange::Rows(4).label(), "Rows - 4");
        assert_eq!(SettingChange::TimeLimit(90).label(), "Time limit - 90s");
        assert_eq!(SettingChange::Theme(Theme::Dark).label(), "dark theme");
    }

    #[test]
    fn theme_commit_emits_switch() {
        let mut session = session();
        session.drain_commands();
        let mut panel = SettingsPanel::open(&session);
        panel.set(SettingChange::Theme(Theme::Dark)).unwrap();
        panel.commit(&mut session).unwrap();
        let commands = session.drain_commands();
        assert!(commands.iter().any(|command| matches!(
            command,
            crate::render::RenderCommand::SetTheme { theme: Theme::Dark, .. }
        )));
    }
}
