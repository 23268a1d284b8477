//! Card grid and pair resolution.

use rand::Rng;
use tracing::debug;

use crate::{
    card::{Card, Reveal},
    deck::{self, CardValue},
    error::{GameError, GameResult},
};

/// Score awarded for every matched pair.
pub const MATCH_REWARD: u32 = 5;

/// Why a selection left the grid untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// No card at that position.
    OutOfRange,
    /// The grid is complete and accepts no more input.
    InputLocked,
    /// A mismatched pair is still settling.
    Resolving,
    /// The card is locked, matched or already face up.
    Blocked,
}

/// Outcome of selecting a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed.
    Ignored(Ignored),
    /// The card turned face up and waits for a partner.
    Revealed {
        /// Position of the revealed card.
        index: usize,
    },
    /// The second card completed a pair.
    Matched {
        /// Card selected first.
        first: usize,
        /// Card selected second.
        second: usize,
        /// Every pair on the grid is now matched.
        victory: bool,
    },
    /// The second card did not match; both are locked until settled.
    Mismatched {
        /// Card selected first.
        first: usize,
        /// Card selected second.
        second: usize,
    },
}

/// Largest number of columns or rows a grid may have.
pub const MAX_GRID_SIDE: u32 = 64;

/// Validate grid dimensions: both in `1..=MAX_GRID_SIDE` with an even product.
pub fn validate_dimensions(columns: u32, rows: u32) -> GameResult<()> {
    if columns == 0 || rows == 0 {
        return Err(GameError::InvalidArgument(format!(
            "grid dimensions must be positive, got {columns}x{rows}"
        )));
    }
    if columns > MAX_GRID_SIDE || rows > MAX_GRID_SIDE {
        return Err(GameError::InvalidArgument(format!(
            "grid {columns}x{rows} is too large, at most {MAX_GRID_SIDE} per side"
        )));
    }
    if (columns * rows) % 2 != 0 {
        return Err(GameError::OddCardCount { columns, rows });
    }
    Ok(())
}

/// Ordered collection of cards plus the move and score counters.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cards: Vec<Card>,
    moves: u32,
    score: u32,
    matched_pairs: u32,
    generation: u64,
    selection: Vec<usize>,
    resolving: bool,
    input_locked: bool,
}

impl Grid {
    /// Deal a freshly shuffled deck onto a `columns` x `rows` grid.
    pub fn create<R: Rng + ?Sized>(columns: u32, rows: u32, rng: &mut R) -> GameResult<Self> {
        validate_dimensions(columns, rows)?;
        let deck = deck::generate_with_rng(columns * rows / 2, rng)?;
        Ok(Self::build(columns, rows, deck))
    }

    /// Lay out a known deck in the given order.
    pub fn from_deck(columns: u32, rows: u32, deck: Vec<CardValue>) -> GameResult<Self> {
        validate_dimensions(columns, rows)?;
        if deck.len() != (columns * rows) as usize {
            return Err(GameError::InvalidArgument(format!(
                "deck of {} cards does not fit a {columns}x{rows} grid",
                deck.len()
            )));
        }
        if !deck::is_paired(&deck) {
            return Err(GameError::InvalidArgument(
                "deck must hold every value exactly twice".to_string(),
            ));
        }
        Ok(Self::build(columns, rows, deck))
    }

    fn build(columns: u32, rows: u32, deck: Vec<CardValue>) -> Self {
        let cards = deck
            .into_iter()
            .enumerate()
            .map(|(id, value)| Card::new(id, value))
            .collect();
        Self {
            columns,
            rows,
            cards,
            moves: 0,
            score: 0,
            matched_pairs: 0,
            generation: 0,
            selection: Vec::with_capacity(2),
            resolving: false,
            input_locked: false,
        }
    }

    /// Tag the grid with the session generation that owns it.
    pub fn stamped(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Generation of the game this grid was dealt for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of columns.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Cards in row-major order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at `index`, if any.
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Number of resolved pair attempts, matched or not.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Points earned so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Pairs found so far.
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Pairs dealt on this grid.
    pub fn total_pairs(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    /// All pairs found.
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.matched_pairs == self.total_pairs()
    }

    /// A mismatched pair is waiting for [`Grid::settle_mismatch`].
    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// The grid is complete and ignores every selection.
    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    /// Positions of cards that are face up but not yet paired, in selection order.
    pub fn open_cards(&self) -> &[usize] {
        &self.selection
    }

    /// Reveal the card at `index` and resolve the pair once two cards are open.
    pub fn select_card(&mut self, index: usize) -> Selection {
        if index >= self.cards.len() {
            return Selection::Ignored(Ignored::OutOfRange);
        }
        if self.input_locked {
            return Selection::Ignored(Ignored::InputLocked);
        }
        if self.resolving {
            return Selection::Ignored(Ignored::Resolving);
        }
        if self.cards[index].reveal() == Reveal::Blocked {
            return Selection::Ignored(Ignored::Blocked);
        }

        self.selection.push(index);
        let [first, second] = match self.selection[..] {
            [first, second] => [first, second],
            _ => return Selection::Revealed { index },
        };

        self.moves += 1;
        if self.cards[first].value() == self.cards[second].value() {
            self.cards[first].mark_matched();
            self.cards[second].mark_matched();
            self.selection.clear();
            self.score += MATCH_REWARD;
            self.matched_pairs += 1;

            let victory = self.is_complete();
            if victory {
                self.input_locked = true;
            }
            debug!(
                generation = self.generation,
                first,
                second,
                matched_pairs = self.matched_pairs,
                "pair matched"
            );
            Selection::Matched {
                first,
                second,
                victory,
            }
        } else {
            self.cards[first].lock();
            self.cards[second].lock();
            self.resolving = true;
            debug!(generation = self.generation, first, second, "pair mismatched");
            Selection::Mismatched { first, second }
        }
    }

    /// Flip a mismatched pair back face down and accept input again.
    ///
    /// Returns `false` when the pair is not the one currently resolving.
    pub fn settle_mismatch(&mut self, first: usize, second: usize) -> bool {
        if !self.resolving || self.selection[..] != [first, second] {
            return false;
        }
        for index in [first, second] {
            let card = &mut self.cards[index];
            card.reset_flip();
            card.unlock();
        }
        self.selection.clear();
        self.resolving = false;
        true
    }

    /// Lock every card while the opening preview is showing.
    pub fn begin_preview(&mut self) {
        self.cards.iter_mut().for_each(Card::lock);
    }

    /// Release the preview locks.
    pub fn end_preview(&mut self) {
        let resolving = self.resolving.then(|| self.selection.clone());
        for (index, card) in self.cards.iter_mut().enumerate() {
            let pending = resolving
                .as_ref()
                .map(|pair| pair.contains(&index))
                .unwrap_or(false);
            if !pending {
                card.unlock();
            }
        }
    }

    /// Drop every card and zero the counters.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.selection.clear();
        self.moves = 0;
        self.score = 0;
        self.matched_pairs = 0;
        self.resolving = false;
        self.input_locked = false;
    }
}
