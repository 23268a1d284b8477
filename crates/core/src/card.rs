#![allow(missing_docs)]

//! Individual tiles on the grid.

use serde::{Deserialize, Serialize};

use crate::deck::CardValue;

/// Which side of the card is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    /// Face down.
    Hidden,
    /// Face up and waiting to be paired.
    Revealed,
    /// Paired; stays face up for the rest of the game.
    Matched,
}

/// Result of attempting to turn a card face up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// The card is now face up.
    Revealed,
    /// The card was matched, already face up or locked.
    Blocked,
}

/// A single tile with its position, value and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: usize,
    value: CardValue,
    face: Face,
    locked: bool,
}

impl Card {
    /// Create a face-down, unlocked card.
    pub fn new(id: usize, value: CardValue) -> Self {
        Self {
            id,
            value,
            face: Face::Hidden,
            locked: false,
        }
    }

    /// Position of the card in the grid.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Pair value shown on the face.
    pub fn value(&self) -> CardValue {
        self.value
    }

    /// Current face.
    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_revealed(&self) -> bool {
        self.face != Face::Hidden
    }

    pub fn is_matched(&self) -> bool {
        self.face == Face::Matched
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Face up but not yet paired.
    pub fn is_open(&self) -> bool {
        self.face == Face::Revealed
    }

    /// Turn the card face up unless it is matched, already revealed or locked.
    pub fn reveal(&mut self) -> Reveal {
        if self.locked || self.face != Face::Hidden {
            return Reveal::Blocked;
        }
        self.face = Face::Revealed;
        Reveal::Revealed
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Mark the card as part of a found pair.
    pub fn mark_matched(&mut self) {
        self.face = Face::Matched;
    }

    /// Turn a mismatched card back face down.
    pub fn reset_flip(&mut self) {
        if self.face == Face::Revealed {
            self.face = Face::Hidden;
        }
    }
}
