//! Messages exchanged with the presentation layer.
//!
//! The core never draws anything. It queues [`RenderCommand`]s describing what
//! changed and reacts to [`InputEvent`]s coming back from the user interface.
//! Commands serialise to tagged JSON so a browser front-end can consume them
//! directly.

use serde::{Deserialize, Serialize};

use crate::config::Theme;

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every pair was found.
    Victory,
    /// The countdown ran out.
    Timeout,
}

/// Text of the end-of-game dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDialog {
    /// How the game ended.
    pub outcome: Outcome,
    /// Dialog heading.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Caption of the button that starts another game.
    pub retry_label: String,
}

impl ResultDialog {
    /// Fixed wording for each outcome.
    pub fn for_outcome(outcome: Outcome) -> Self {
        let (title, text, retry_label) = match outcome {
            Outcome::Victory => (
                "You won!",
                "You can play again or exit and change game settings",
                "play again",
            ),
            Outcome::Timeout => (
                "Game Over",
                "You can try again or exit and change game settings",
                "try again",
            ),
        };
        Self {
            outcome,
            title: title.to_string(),
            text: text.to_string(),
            retry_label: retry_label.to_string(),
        }
    }
}

/// Instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderCommand {
    /// Show the start menu and hide the play area.
    ShowMenu,
    /// Show the play area with a freshly dealt grid.
    ShowGame {
        /// Grid columns.
        columns: u32,
        /// Grid rows.
        rows: u32,
        /// Card width in pixels.
        card_width: u32,
        /// Card height in pixels.
        card_height: u32,
    },
    /// Remove every card from the play area.
    ClearGrid,
    /// Flip every card face up for the opening preview.
    PreviewAll,
    /// Flip the preview back face down.
    HidePreview,
    /// Flip one card face up.
    Reveal {
        /// Card position.
        index: usize,
    },
    /// Mark a card as matched.
    ShowMatched {
        /// Card position.
        index: usize,
    },
    /// Play the mismatch shake on a card.
    ShakeMismatch {
        /// Card position.
        index: usize,
    },
    /// Flip a card back face down.
    Unflip {
        /// Card position.
        index: usize,
    },
    /// Refresh the move and score counters.
    UpdateStats {
        /// Resolved pair attempts.
        moves: u32,
        /// Points earned.
        score: u32,
    },
    /// Refresh the countdown display.
    UpdateTimer {
        /// Seconds left.
        remaining: u32,
    },
    /// Blank the countdown display.
    ClearTimer,
    /// Open the end-of-game dialog.
    ShowResult(ResultDialog),
    /// Close the end-of-game dialog.
    HideResult,
    /// Switch the colour scheme.
    SetTheme {
        /// Selected theme.
        theme: Theme,
        /// Stylesheet to load.
        stylesheet: String,
        /// Caption for the theme switch.
        label: String,
    },
    /// Enable or disable the in-game restart and exit buttons.
    SetControlsEnabled {
        /// Whether the buttons accept clicks.
        enabled: bool,
    },
}

impl RenderCommand {
    /// Theme switch for `theme`.
    pub fn set_theme(theme: Theme) -> Self {
        RenderCommand::SetTheme {
            theme,
            stylesheet: theme.stylesheet().to_string(),
            label: theme.label(),
        }
    }
}

/// Input from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A card was clicked.
    SelectCard {
        /// Card position.
        index: usize,
    },
    /// Start button in the menu.
    Start,
    /// In-game restart button.
    Restart,
    /// In-game exit button.
    Exit,
    /// Retry button of the result dialog.
    PlayAgain,
    /// Exit button of the result dialog.
    ExitToMenu,
    /// Pointer entered the play area.
    PointerEnter,
    /// Pointer left the play area.
    PointerLeave,
    /// Theme switch toggled.
    SetTheme {
        /// Selected theme.
        theme: Theme,
    },
}
