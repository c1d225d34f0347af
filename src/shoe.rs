//! The multi-deck shoe.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};

/// Default fraction of the shoe dealt before a reshuffle is due.
pub const DEFAULT_PENETRATION: f64 = 0.75;

/// Shuffles `items` in place with the Fisher–Yates algorithm.
///
/// Walks from the last index down to 1 and swaps each slot with a uniformly
/// chosen index in `0..=i`, so every permutation is equally likely.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// A shoe of one or more standard decks.
///
/// Cards are partitioned into an undealt pool and a dealt pile. Dealing
/// moves one card from the front of the pool to the end of the pile, and
/// reshuffling moves the whole pile back before shuffling.
#[derive(Debug, Clone)]
pub struct Shoe {
    undealt: VecDeque<Card>,
    dealt: Vec<Card>,
    decks: u8,
    penetration_threshold: f64,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates and shuffles a shoe with the specified number of decks.
    ///
    /// ```
    /// use bjsim::Shoe;
    ///
    /// let shoe = Shoe::new(6, 0.75, 7);
    /// assert_eq!(shoe.total_cards(), 312);
    /// assert_eq!(shoe.remaining(), 312);
    /// ```
    #[must_use]
    pub fn new(decks: u8, penetration_threshold: f64, seed: u64) -> Self {
        let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        let mut shoe = Self {
            undealt: VecDeque::from(cards),
            dealt: Vec::with_capacity(decks as usize * DECK_SIZE),
            decks,
            penetration_threshold,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.shuffle();
        shoe
    }

    fn shuffle(&mut self) {
        fisher_yates(self.undealt.make_contiguous(), &mut self.rng);
    }

    /// Returns every dealt card to the pool and shuffles the whole shoe.
    pub fn reshuffle(&mut self) {
        self.undealt.extend(self.dealt.drain(..));
        self.shuffle();
        tracing::info!(cards = self.undealt.len(), "shoe reshuffled");
    }

    /// Deals the next card, or `None` if the shoe is exhausted.
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.undealt.pop_front()?;
        self.dealt.push(card);
        Some(card)
    }

    /// Returns the number of decks in the shoe.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the total number of cards in the shoe.
    #[must_use]
    pub const fn total_cards(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Returns the number of cards not yet dealt.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.undealt.len()
    }

    /// Returns the number of cards dealt since the last shuffle.
    #[must_use]
    pub fn dealt_count(&self) -> usize {
        self.dealt.len()
    }

    /// Returns the cards dealt since the last shuffle, in deal order.
    #[must_use]
    pub fn dealt(&self) -> &[Card] {
        &self.dealt
    }

    /// Returns the configured penetration threshold.
    #[must_use]
    pub const fn penetration_threshold(&self) -> f64 {
        self.penetration_threshold
    }

    /// Returns the fraction of the shoe dealt since the last shuffle.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn penetration(&self) -> f64 {
        let total = self.total_cards();
        if total == 0 {
            return 0.0;
        }
        self.dealt.len() as f64 / total as f64
    }

    /// Returns whether the penetration threshold has been reached.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.penetration() >= self.penetration_threshold
    }

    /// Moves the given cards to the front of the undealt pool, in order.
    ///
    /// Each card is pulled from the undealt pool, so the partition stays
    /// intact. Repeated cards need that many copies in the shoe.
    #[cfg(test)]
    pub(crate) fn force_next(&mut self, cards: &[Card]) {
        for (placed, card) in cards.iter().rev().enumerate() {
            let position = self
                .undealt
                .iter()
                .skip(placed)
                .position(|c| c == card)
                .map(|p| p + placed)
                .expect("forced card must still be undealt");
            let card = self.undealt.remove(position).expect("position is in range");
            self.undealt.push_front(card);
        }
    }

    /// Returns the next card without dealing it.
    #[cfg(test)]
    pub(crate) fn peek(&self) -> Option<&Card> {
        self.undealt.front()
    }

    /// Deals everything but `keep` cards.
    #[cfg(test)]
    pub(crate) fn burn_to(&mut self, keep: usize) {
        while self.undealt.len() > keep {
            let _ = self.deal();
        }
    }
}
