//! Table rule variants.

use crate::error::RuleError;

/// A set of hand totals, stored as a bit mask over `0..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TotalSet(u32);

impl TotalSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Builds a set from the given totals. Totals above 31 are ignored.
    ///
    /// ```
    /// use bjsim::TotalSet;
    ///
    /// let set = TotalSet::of(&[10, 11]);
    /// assert!(set.contains(11));
    /// assert!(!set.contains(12));
    /// ```
    #[must_use]
    pub const fn of(totals: &[u8]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < totals.len() {
            if totals[i] < 32 {
                bits |= 1 << totals[i];
            }
            i += 1;
        }
        Self(bits)
    }

    /// Returns whether `total` is in the set.
    #[must_use]
    pub const fn contains(self, total: u8) -> bool {
        total < 32 && self.0 & (1 << total) != 0
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates over the totals in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0u8..32).filter(move |&total| self.contains(total))
    }
}

/// Which two-card totals may be doubled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoubleRestriction {
    /// Any two cards may be doubled.
    #[default]
    Any,
    /// Only the listed totals may be doubled.
    Totals(TotalSet),
}

impl DoubleRestriction {
    /// Returns whether a hand totalling `total` may be doubled.
    #[must_use]
    pub const fn allows(self, total: u8) -> bool {
        match self {
            Self::Any => true,
            Self::Totals(set) => set.contains(total),
        }
    }

    /// Returns whether doubling is limited to specific totals.
    #[must_use]
    pub const fn is_restricted(self) -> bool {
        matches!(self, Self::Totals(_))
    }
}

/// Surrender policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surrender {
    /// Surrender is not offered.
    #[default]
    None,
    /// Surrender after the dealer has checked for blackjack.
    Late,
    /// Surrender before the dealer checks for blackjack.
    Early,
}

impl Surrender {
    /// Returns whether any form of surrender is offered.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// An immutable rule variant.
///
/// Switching variants replaces the whole value; the builder methods below
/// return new values and never touch a rule set already handed to a game.
///
/// ```
/// use bjsim::{DoubleRestriction, RuleSet, TotalSet};
///
/// let rules = RuleSet::default()
///     .with_decks(8)
///     .with_dealer_hits_soft_17(true)
///     .with_double_restriction(DoubleRestriction::Totals(TotalSet::of(&[10, 11])));
/// assert_eq!(rules.decks, 8);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSet {
    /// Number of decks in the shoe (1–8).
    pub decks: u8,
    /// Whether the dealer draws on soft 17.
    pub dealer_hits_soft_17: bool,
    /// Totals on which doubling is allowed.
    pub double_restriction: DoubleRestriction,
    /// Whether split hands may be doubled.
    pub double_after_split: bool,
    /// Maximum number of hands a player may hold after splitting (2–4).
    pub max_split_hands: u8,
    /// Whether split aces may be split again.
    pub resplit_aces: bool,
    /// Whether split aces receive exactly one card each.
    pub split_aces_one_card: bool,
    /// Surrender policy.
    pub surrender: Surrender,
    /// Blackjack payout ratio (1.5 for 3:2, 1.2 for 6:5).
    pub blackjack_payout: f64,
    /// Multiplier applied to the table's base minimum bet.
    pub min_bet_multiplier: u32,
    /// Whether doubles are free (the added stake is not debited).
    pub free_doubles: bool,
    /// Whether splits are free (the second stake is not debited).
    pub free_splits: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl RuleSet {
    /// Six decks, dealer stands on soft 17, 3:2, late surrender.
    pub const CLASSIC: Self = Self {
        decks: 6,
        dealer_hits_soft_17: false,
        double_restriction: DoubleRestriction::Any,
        double_after_split: true,
        max_split_hands: 4,
        resplit_aces: false,
        split_aces_one_card: true,
        surrender: Surrender::Late,
        blackjack_payout: 1.5,
        min_bet_multiplier: 1,
        free_doubles: false,
        free_splits: false,
    };

    /// Sets the number of decks.
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets whether the dealer hits soft 17.
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the double restriction.
    #[must_use]
    pub const fn with_double_restriction(mut self, restriction: DoubleRestriction) -> Self {
        self.double_restriction = restriction;
        self
    }

    /// Sets whether doubling after a split is allowed.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the maximum number of hands after splitting.
    #[must_use]
    pub const fn with_max_split_hands(mut self, hands: u8) -> Self {
        self.max_split_hands = hands;
        self
    }

    /// Sets whether aces may be resplit.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces = allowed;
        self
    }

    /// Sets whether split aces receive only one card.
    #[must_use]
    pub const fn with_split_aces_one_card(mut self, one_card: bool) -> Self {
        self.split_aces_one_card = one_card;
        self
    }

    /// Sets the surrender policy.
    #[must_use]
    pub const fn with_surrender(mut self, surrender: Surrender) -> Self {
        self.surrender = surrender;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_payout(mut self, ratio: f64) -> Self {
        self.blackjack_payout = ratio;
        self
    }

    /// Sets the minimum-bet multiplier.
    #[must_use]
    pub const fn with_min_bet_multiplier(mut self, multiplier: u32) -> Self {
        self.min_bet_multiplier = multiplier;
        self
    }

    /// Sets whether doubles are free.
    #[must_use]
    pub const fn with_free_doubles(mut self, free: bool) -> Self {
        self.free_doubles = free;
        self
    }

    /// Sets whether splits are free.
    #[must_use]
    pub const fn with_free_splits(mut self, free: bool) -> Self {
        self.free_splits = free;
        self
    }

    /// Checks the rule set for values the engine cannot play.
    ///
    /// # Errors
    ///
    /// Returns the first field found out of range.
    pub fn validate(&self) -> Result<(), RuleError> {
        if !(1..=8).contains(&self.decks) {
            return Err(RuleError::DeckCount(self.decks));
        }
        if !(2..=4).contains(&self.max_split_hands) {
            return Err(RuleError::MaxSplitHands(self.max_split_hands));
        }
        if !self.blackjack_payout.is_finite() || self.blackjack_payout <= 0.0 {
            return Err(RuleError::BlackjackPayout);
        }
        if self.min_bet_multiplier == 0 {
            return Err(RuleError::MinBetMultiplier);
        }
        if let DoubleRestriction::Totals(set) = self.double_restriction {
            if set.is_empty() {
                return Err(RuleError::EmptyDoubleTotals);
            }
        }
        Ok(())
    }

    /// Returns a closed-form house edge estimate, in percent.
    ///
    /// The estimate adds fixed coefficients for each rule on top of a 0.5%
    /// base. It is a rough guide, not a simulation.
    ///
    /// ```
    /// use bjsim::RuleSet;
    ///
    /// let edge = RuleSet::CLASSIC.approximate_house_edge();
    /// assert!((edge - 0.45).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn approximate_house_edge(&self) -> f64 {
        let mut edge = 0.5;

        edge += match self.decks {
            1 => -0.17,
            2 => -0.10,
            d if d >= 6 => 0.03 * f64::from(d - 6),
            _ => 0.0,
        };
        if self.dealer_hits_soft_17 {
            edge += 0.22;
        }
        if self.blackjack_payout < 1.5 {
            edge += 1.39;
        }
        if self.double_restriction.is_restricted() {
            edge += 0.10;
        }
        if !self.double_after_split {
            edge += 0.14;
        }
        if self.max_split_hands < 4 {
            edge += 0.03;
        }
        if !self.resplit_aces {
            edge += 0.03;
        }
        edge += match self.surrender {
            Surrender::Early => -0.62,
            Surrender::Late => -0.08,
            Surrender::None => 0.0,
        };
        if self.free_doubles {
            edge -= 1.5;
        }
        if self.free_splits {
            edge -= 0.5;
        }

        edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn classic_edge() {
        // 0.5 base, no resplit aces +0.03, late surrender -0.08.
        assert!(close(RuleSet::CLASSIC.approximate_house_edge(), 0.45));
    }

    #[test]
    fn deck_adjustments() {
        let base = RuleSet::CLASSIC;
        let six = base.approximate_house_edge();
        assert!(close(base.with_decks(1).approximate_house_edge(), six - 0.17));
        assert!(close(base.with_decks(2).approximate_house_edge(), six - 0.10));
        assert!(close(base.with_decks(4).approximate_house_edge(), six));
        assert!(close(base.with_decks(8).approximate_house_edge(), six + 0.06));
    }

    #[test]
    fn every_coefficient_applies() {
        let rules = RuleSet::CLASSIC
            .with_decks(8)
            .with_dealer_hits_soft_17(true)
            .with_blackjack_payout(1.2)
            .with_double_restriction(DoubleRestriction::Totals(TotalSet::of(&[10, 11])))
            .with_double_after_split(false)
            .with_max_split_hands(2)
            .with_resplit_aces(false)
            .with_surrender(Surrender::None);
        let expected = 0.5 + 0.06 + 0.22 + 1.39 + 0.10 + 0.14 + 0.03 + 0.03;
        assert!(close(rules.approximate_house_edge(), expected));
    }

    #[test]
    fn surrender_and_free_actions_reduce_edge() {
        let base = RuleSet::CLASSIC.with_surrender(Surrender::None);
        let none = base.approximate_house_edge();
        assert!(close(
            base.with_surrender(Surrender::Early).approximate_house_edge(),
            none - 0.62
        ));
        assert!(close(
            base.with_free_doubles(true)
                .with_free_splits(true)
                .approximate_house_edge(),
            none - 2.0
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        assert_eq!(
            RuleSet::CLASSIC.with_decks(9).validate(),
            Err(RuleError::DeckCount(9))
        );
        assert_eq!(
            RuleSet::CLASSIC.with_max_split_hands(1).validate(),
            Err(RuleError::MaxSplitHands(1))
        );
        assert_eq!(
            RuleSet::CLASSIC.with_blackjack_payout(0.0).validate(),
            Err(RuleError::BlackjackPayout)
        );
        assert_eq!(
            RuleSet::CLASSIC.with_min_bet_multiplier(0).validate(),
            Err(RuleError::MinBetMultiplier)
        );
        assert_eq!(
            RuleSet::CLASSIC
                .with_double_restriction(DoubleRestriction::Totals(TotalSet::EMPTY))
                .validate(),
            Err(RuleError::EmptyDoubleTotals)
        );
    }

    #[test]
    fn total_set_iterates_members() {
        let totals: alloc::vec::Vec<u8> = TotalSet::of(&[11, 9, 10, 40]).iter().collect();
        assert_eq!(totals, [9, 10, 11]);
    }
}
