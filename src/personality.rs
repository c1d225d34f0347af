//! Named dealer personalities.
//!
//! Each personality is a fixed [`RuleSet`]; the set is closed so lookups stay
//! exhaustive.

use core::fmt;
use core::str::FromStr;

use crate::error::UnknownPersonality;
use crate::rules::{DoubleRestriction, RuleSet, Surrender, TotalSet};

/// A named rule preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DealerPersonality {
    /// Six-deck Las Vegas Strip game.
    #[default]
    Classic,
    /// Forgiving double-deck game with early surrender.
    Rookie,
    /// Eight decks, hits soft 17, pays 6:5, doubles only on 10 or 11.
    Shark,
    /// Single-deck high-limit game.
    HighRoller,
    /// Free doubles and free splits.
    Lucky,
    /// Tight eight-deck grind with no surrender.
    Grinder,
}

const SHARK: RuleSet = RuleSet {
    decks: 8,
    dealer_hits_soft_17: true,
    double_restriction: DoubleRestriction::Totals(TotalSet::of(&[10, 11])),
    double_after_split: false,
    max_split_hands: 2,
    resplit_aces: false,
    split_aces_one_card: true,
    surrender: Surrender::None,
    blackjack_payout: 1.2,
    min_bet_multiplier: 2,
    free_doubles: false,
    free_splits: false,
};

const ROOKIE: RuleSet = RuleSet {
    decks: 2,
    dealer_hits_soft_17: false,
    double_restriction: DoubleRestriction::Any,
    double_after_split: true,
    max_split_hands: 4,
    resplit_aces: true,
    split_aces_one_card: false,
    surrender: Surrender::Early,
    blackjack_payout: 1.5,
    min_bet_multiplier: 1,
    free_doubles: false,
    free_splits: false,
};

const HIGH_ROLLER: RuleSet = RuleSet {
    decks: 1,
    dealer_hits_soft_17: true,
    double_restriction: DoubleRestriction::Any,
    double_after_split: true,
    max_split_hands: 4,
    resplit_aces: false,
    split_aces_one_card: true,
    surrender: Surrender::Late,
    blackjack_payout: 1.5,
    min_bet_multiplier: 10,
    free_doubles: false,
    free_splits: false,
};

const LUCKY: RuleSet = RuleSet {
    decks: 6,
    dealer_hits_soft_17: true,
    double_restriction: DoubleRestriction::Totals(TotalSet::of(&[9, 10, 11])),
    double_after_split: true,
    max_split_hands: 4,
    resplit_aces: false,
    split_aces_one_card: true,
    surrender: Surrender::None,
    blackjack_payout: 1.5,
    min_bet_multiplier: 1,
    free_doubles: true,
    free_splits: true,
};

const GRINDER: RuleSet = RuleSet {
    decks: 8,
    dealer_hits_soft_17: true,
    double_restriction: DoubleRestriction::Totals(TotalSet::of(&[9, 10, 11])),
    double_after_split: false,
    max_split_hands: 3,
    resplit_aces: false,
    split_aces_one_card: true,
    surrender: Surrender::None,
    blackjack_payout: 1.5,
    min_bet_multiplier: 1,
    free_doubles: false,
    free_splits: false,
};

impl DealerPersonality {
    /// All personalities, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Classic,
        Self::Rookie,
        Self::Shark,
        Self::HighRoller,
        Self::Lucky,
        Self::Grinder,
    ];

    /// Returns the rule set this personality deals.
    ///
    /// ```
    /// use bjsim::DealerPersonality;
    ///
    /// let rules = DealerPersonality::Shark.rules();
    /// assert_eq!(rules.blackjack_payout, 1.2);
    /// assert!(!rules.double_restriction.allows(12));
    /// ```
    #[must_use]
    pub const fn rules(self) -> RuleSet {
        match self {
            Self::Classic => RuleSet::CLASSIC,
            Self::Rookie => ROOKIE,
            Self::Shark => SHARK,
            Self::HighRoller => HIGH_ROLLER,
            Self::Lucky => LUCKY,
            Self::Grinder => GRINDER,
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Rookie => "Rookie",
            Self::Shark => "Shark",
            Self::HighRoller => "High Roller",
            Self::Lucky => "Lucky",
            Self::Grinder => "Grinder",
        }
    }

    /// Returns the rule set's house edge estimate, in percent.
    #[must_use]
    pub fn house_edge(self) -> f64 {
        self.rules().approximate_house_edge()
    }
}

impl fmt::Display for DealerPersonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DealerPersonality {
    type Err = UnknownPersonality;

    /// Looks a personality up by name, ignoring case, spaces and dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase());
        Self::ALL
            .into_iter()
            .find(|p| {
                p.name()
                    .chars()
                    .filter(|c| *c != ' ')
                    .map(|c| c.to_ascii_lowercase())
                    .eq(wanted.clone())
            })
            .ok_or(UnknownPersonality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_is_valid() {
        for personality in DealerPersonality::ALL {
            assert_eq!(personality.rules().validate(), Ok(()), "{personality}");
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!("shark".parse::<DealerPersonality>(), Ok(DealerPersonality::Shark));
        assert_eq!("High Roller".parse::<DealerPersonality>(), Ok(DealerPersonality::HighRoller));
        assert_eq!("high-roller".parse::<DealerPersonality>(), Ok(DealerPersonality::HighRoller));
        assert_eq!(
            "Pit Boss".parse::<DealerPersonality>(),
            Err(UnknownPersonality)
        );
    }

    #[test]
    fn shark_doubles_only_on_ten_or_eleven() {
        let rules = DealerPersonality::Shark.rules();
        assert!(rules.double_restriction.allows(10));
        assert!(rules.double_restriction.allows(11));
        assert!(!rules.double_restriction.allows(12));
        assert!(!rules.double_restriction.allows(9));
    }

    #[test]
    fn preset_edges() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        // 8 decks +0.06, H17, 6:5, restricted doubles, no DAS, 2 hands, no RSA.
        assert!(close(
            DealerPersonality::Shark.house_edge(),
            0.5 + 0.06 + 0.22 + 1.39 + 0.10 + 0.14 + 0.03 + 0.03
        ));
        // 2 decks, early surrender.
        assert!(close(DealerPersonality::Rookie.house_edge(), 0.5 - 0.10 - 0.62));
        assert!(DealerPersonality::Lucky.house_edge() < 0.0);
    }
}
