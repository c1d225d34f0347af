//! Round engine and state management.

use alloc::boxed::Box;
use alloc::vec::Vec;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::error::{RoundError, RuleError};
use crate::hand::{DealerHand, PlayerHand};
use crate::options::TableOptions;
use crate::personality::DealerPersonality;
use crate::result::{RoundObserver, RoundResult};
use crate::rules::RuleSet;
use crate::shoe::Shoe;

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::{ActionAvailability, GamePhase};

/// A single-table blackjack round engine.
///
/// The game owns the shoe, the player's hands and bankroll, and the dealer's
/// hand. Every command runs to completion synchronously: it either applies
/// a full state transition or returns an error and changes nothing.
///
/// # Example
///
/// ```
/// use bjsim::{DealerPersonality, Game, GamePhase, TableOptions};
///
/// let mut game = Game::with_personality(DealerPersonality::Classic, TableOptions::default(), 42)?;
/// game.place_bet(50)?;
/// while game.phase() == GamePhase::PlayerTurn {
///     game.stand()?;
/// }
/// assert!(matches!(game.phase(), GamePhase::Result | GamePhase::GameOver));
/// assert!(game.last_result().is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Game {
    rules: RuleSet,
    options: TableOptions,
    shoe: Shoe,
    phase: GamePhase,
    bankroll: i64,
    hands: Vec<PlayerHand>,
    active: usize,
    dealer: DealerHand,
    last_result: Option<RoundResult>,
    observers: Vec<Box<dyn RoundObserver>>,
    seeder: ChaCha8Rng,
}

impl Game {
    /// Creates a new game with the given rules, options and seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules or options are out of range.
    pub fn new(rules: RuleSet, options: TableOptions, seed: u64) -> Result<Self, RuleError> {
        rules.validate()?;
        options.validate()?;

        let mut seeder = ChaCha8Rng::seed_from_u64(seed);
        let shoe = Shoe::new(rules.decks, options.penetration, seeder.next_u64());

        let mut game = Self {
            rules,
            options,
            shoe,
            phase: GamePhase::Betting,
            bankroll: options.starting_bankroll,
            hands: Vec::new(),
            active: 0,
            dealer: DealerHand::new(),
            last_result: None,
            observers: Vec::new(),
            seeder,
        };
        game.phase = game.resting_phase();
        Ok(game)
    }

    /// Creates a new game dealt by a named personality.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are out of range.
    pub fn with_personality(
        personality: DealerPersonality,
        options: TableOptions,
        seed: u64,
    ) -> Result<Self, RuleError> {
        Self::new(personality.rules(), options, seed)
    }

    /// Registers an observer for settlement records.
    pub fn add_observer(&mut self, observer: Box<dyn RoundObserver>) {
        self.observers.push(observer);
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the active rule set.
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the bankroll, net of wagers currently on the table.
    #[must_use]
    pub const fn bankroll(&self) -> i64 {
        self.bankroll
    }

    /// Returns the current minimum bet.
    #[must_use]
    pub fn minimum_bet(&self) -> i64 {
        self.options
            .base_minimum_bet
            .saturating_mul(i64::from(self.rules.min_bet_multiplier))
    }

    /// Returns the active rule set's house edge estimate, in percent.
    #[must_use]
    pub fn house_edge(&self) -> f64 {
        self.rules.approximate_house_edge()
    }

    /// Returns the player's hands for the current round.
    #[must_use]
    pub fn hands(&self) -> &[PlayerHand] {
        &self.hands
    }

    /// Returns the index of the hand awaiting a decision.
    #[must_use]
    pub fn active_hand_index(&self) -> Option<usize> {
        (self.phase == GamePhase::PlayerTurn && self.active < self.hands.len())
            .then_some(self.active)
    }

    /// Returns the hand awaiting a decision.
    #[must_use]
    pub fn active_hand(&self) -> Option<&PlayerHand> {
        self.active_hand_index().map(|index| &self.hands[index])
    }

    /// Returns the dealer's hand.
    ///
    /// Use [`dealer_visible_cards`](Self::dealer_visible_cards) to respect
    /// the hole card.
    #[must_use]
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the dealer cards a player can see.
    #[must_use]
    pub fn dealer_visible_cards(&self) -> &[Card] {
        self.dealer.visible_cards()
    }

    /// Returns the total wager on the table across all hands.
    #[must_use]
    pub fn total_wager(&self) -> i64 {
        self.hands.iter().map(PlayerHand::wager).sum()
    }

    /// Returns the result of the most recently settled round.
    #[must_use]
    pub const fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Clears the settled round and returns to betting.
    ///
    /// The shoe is reshuffled first if its penetration threshold has been
    /// reached.
    ///
    /// # Errors
    ///
    /// Returns an error unless the game is in [`GamePhase::Result`].
    pub fn next_hand(&mut self) -> Result<(), RoundError> {
        if self.phase != GamePhase::Result {
            return Err(RoundError::InvalidState(self.phase));
        }

        self.clear_round();
        if self.shoe.needs_reshuffle() {
            self.shoe.reshuffle();
        }
        self.phase = GamePhase::Betting;
        Ok(())
    }

    /// Replaces the rule set, builds a fresh shoe for it and resets the
    /// round.
    ///
    /// # Errors
    ///
    /// Returns an error if a wager is live or the rules are out of range.
    pub fn switch_rules(&mut self, rules: RuleSet) -> Result<(), RoundError> {
        if self.phase.is_round_live() {
            return Err(RoundError::InvalidState(self.phase));
        }
        rules.validate()?;

        self.rules = rules;
        self.shoe = Shoe::new(
            rules.decks,
            self.options.penetration,
            self.seeder.next_u64(),
        );
        self.clear_round();
        self.phase = self.resting_phase();
        tracing::info!(
            decks = rules.decks,
            minimum_bet = self.minimum_bet(),
            house_edge = self.house_edge(),
            "rules switched"
        );
        Ok(())
    }

    /// Switches to a named personality's rules.
    ///
    /// # Errors
    ///
    /// Returns an error if a wager is live.
    pub fn switch_personality(&mut self, personality: DealerPersonality) -> Result<(), RoundError> {
        self.switch_rules(personality.rules())
    }

    /// Restores the starting bankroll and returns to betting.
    ///
    /// # Errors
    ///
    /// Returns an error if a wager is live.
    pub fn reset_bankroll(&mut self) -> Result<(), RoundError> {
        if self.phase.is_round_live() {
            return Err(RoundError::InvalidState(self.phase));
        }

        self.bankroll = self.options.starting_bankroll;
        self.clear_round();
        self.phase = self.resting_phase();
        tracing::info!(bankroll = self.bankroll, "bankroll reset");
        Ok(())
    }

    /// Reshuffles the whole shoe on demand.
    ///
    /// # Errors
    ///
    /// Returns an error unless the game is in [`GamePhase::Betting`].
    pub fn reshuffle(&mut self) -> Result<(), RoundError> {
        if self.phase != GamePhase::Betting {
            return Err(RoundError::InvalidState(self.phase));
        }
        self.shoe.reshuffle();
        Ok(())
    }

    /// Returns whether the shoe has reached its penetration threshold.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.shoe.needs_reshuffle()
    }

    /// Phase to rest in between rounds for the current bankroll.
    fn resting_phase(&self) -> GamePhase {
        if self.bankroll < self.minimum_bet() {
            GamePhase::GameOver
        } else {
            GamePhase::Betting
        }
    }

    /// Clears all hands and the last result.
    fn clear_round(&mut self) {
        self.hands.clear();
        self.active = 0;
        self.dealer.clear();
        self.last_result = None;
    }
}
