//! Shuffled pair decks.

use rand::{seq::SliceRandom, Rng};

use crate::error::{GameError, GameResult};

/// Face value of a card. Each value appears exactly twice in a deck.
pub type CardValue = u32;

/// Produce a shuffled deck holding every value in `0..pair_count` twice.
pub fn generate(pair_count: u32) -> GameResult<Vec<CardValue>> {
    generate_with_rng(pair_count, &mut rand::rng())
}

/// Same as [`generate`] but draws from the provided random source.
pub fn generate_with_rng<R: Rng + ?Sized>(
    pair_count: u32,
    rng: &mut R,
) -> GameResult<Vec<CardValue>> {
    if pair_count == 0 {
        return Err(GameError::InvalidArgument(
            "pair count must be positive".to_string(),
        ));
    }

    let mut values: Vec<CardValue> = (0..pair_count).chain(0..pair_count).collect();
    values.shuffle(rng);
    Ok(values)
}

/// Check that `deck` is a paired multiset over `0..deck.len() / 2`.
pub fn is_paired(deck: &[CardValue]) -> bool {
    if deck.is_empty() || deck.len() % 2 != 0 {
        return false;
    }
    let pair_count = deck.len() / 2;
    let mut seen = vec![0u8; pair_count];
    for &value in deck {
        match seen.get_mut(value as usize) {
            Some(count) if *count < 2 => *count += 1,
            _ => return false,
        }
    }
    seen.iter().all(|&count| count == 2)
}
