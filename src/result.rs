//! Round outcome records.
//!
//! These records are the only thing the engine hands to statistics,
//! achievement or progression collaborators.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::game::GamePhase;

/// A decision taken on a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Drew a card.
    Hit,
    /// Stood.
    Stand,
    /// Doubled the wager and drew one card.
    Double,
    /// Split a pair.
    Split,
    /// Gave up half the wager.
    Surrender,
}

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandOutcome {
    /// Player had the higher total.
    Win,
    /// Dealer had the higher total, or a natural the player did not match.
    Loss,
    /// Tie.
    Push,
    /// Player natural against a dealer without one.
    Blackjack,
    /// Player went over 21.
    Bust,
    /// Dealer went over 21.
    DealerBust,
    /// Player surrendered.
    Surrender,
}

impl HandOutcome {
    /// Returns whether the outcome paid more than the stake back.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack | Self::DealerBust)
    }
}

/// Outcome record for one settled hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRecord {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// Final player cards.
    pub player_cards: Vec<Card>,
    /// Final player total.
    pub player_total: u8,
    /// Final dealer cards.
    pub dealer_cards: Vec<Card>,
    /// Final dealer total.
    pub dealer_total: u8,
    /// Total wager on the hand, including any free stake.
    pub wager: i64,
    /// Part of the wager granted by free doubles or splits.
    pub free_stake: i64,
    /// Amount credited back to the bankroll at settlement.
    pub payout: i64,
    /// Outcome category.
    pub outcome: HandOutcome,
    /// Actions taken on the hand, in order.
    pub actions: Vec<Action>,
}

impl HandRecord {
    /// Returns the amount actually taken from the bankroll for this hand.
    #[must_use]
    pub const fn staked(&self) -> i64 {
        self.wager - self.free_stake
    }

    /// Returns the hand's profit or loss.
    #[must_use]
    pub const fn net(&self) -> i64 {
        self.payout - self.staked()
    }
}

/// Result of the whole round after settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    /// One record per player hand.
    pub hands: Vec<HandRecord>,
    /// The dealer's final total.
    pub dealer_total: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Sum of all payouts credited.
    pub total_payout: i64,
    /// Net result (positive = profit, negative = loss).
    pub net: i64,
    /// Bankroll after the payouts were credited.
    pub bankroll: i64,
    /// Phase the game entered after settlement.
    pub phase: GamePhase,
    /// Whether the shoe ran dry while the dealer was drawing.
    pub shoe_exhausted: bool,
}

/// Receives settlement records from a [`Game`](crate::Game).
///
/// Observers are notified after the round's state change has been applied,
/// so they only ever see settled data. Hosts that animate results can queue
/// these calls and present them later.
pub trait RoundObserver {
    /// Called once per hand, in hand order.
    fn on_hand_settled(&mut self, record: &HandRecord) {
        let _ = record;
    }

    /// Called once per round after every hand.
    fn on_round_settled(&mut self, result: &RoundResult) {
        let _ = result;
    }
}
