//! Table configuration options.

use crate::error::RuleError;
use crate::shoe::DEFAULT_PENETRATION;

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration for a table that is independent of the rule variant.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjsim::TableOptions;
///
/// let options = TableOptions::default()
///     .with_starting_bankroll(500)
///     .with_base_minimum_bet(25)
///     .with_penetration(0.8);
/// assert_eq!(options.starting_bankroll, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableOptions {
    /// Bankroll the player starts with and returns to on reset.
    pub starting_bankroll: i64,
    /// Minimum bet before the rule set's multiplier is applied.
    pub base_minimum_bet: i64,
    /// Fraction of the shoe dealt before a reshuffle is due.
    pub penetration: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for surrender refunds.
    pub rounding_surrender: RoundingMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            starting_bankroll: 1000,
            base_minimum_bet: 10,
            penetration: DEFAULT_PENETRATION,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Nearest,
        }
    }
}

impl TableOptions {
    /// Sets the starting bankroll.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::TableOptions;
    ///
    /// let options = TableOptions::default().with_starting_bankroll(250);
    /// assert_eq!(options.starting_bankroll, 250);
    /// ```
    #[must_use]
    pub const fn with_starting_bankroll(mut self, bankroll: i64) -> Self {
        self.starting_bankroll = bankroll;
        self
    }

    /// Sets the base minimum bet.
    #[must_use]
    pub const fn with_base_minimum_bet(mut self, bet: i64) -> Self {
        self.base_minimum_bet = bet;
        self
    }

    /// Sets the deck penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::TableOptions;
    ///
    /// let options = TableOptions::default().with_penetration(0.80);
    /// assert_eq!(options.penetration, 0.80);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }

    /// Checks the options for values the engine cannot use.
    ///
    /// # Errors
    ///
    /// Returns an error if the minimum bet is not positive, the starting
    /// bankroll is negative, or the penetration is outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.base_minimum_bet <= 0 {
            return Err(RuleError::MinimumBet);
        }
        if self.starting_bankroll < 0 {
            return Err(RuleError::StartingBankroll);
        }
        if !(self.penetration > 0.0 && self.penetration <= 1.0) {
            return Err(RuleError::Penetration);
        }
        Ok(())
    }
}
