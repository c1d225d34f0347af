//! Error types for game operations.
//!
//! Every rejected command leaves the game exactly as it was.

use thiserror::Error;

use crate::game::GamePhase;

/// Errors that can occur when placing a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid game phase for betting.
    #[error("cannot bet during {0:?}")]
    InvalidState(GamePhase),
    /// Bet is below the table minimum.
    #[error("bet {amount} is below the minimum of {minimum}")]
    BelowMinimum {
        /// The rejected amount.
        amount: i64,
        /// The current minimum bet.
        minimum: i64,
    },
    /// Insufficient funds.
    #[error("bet {amount} exceeds the bankroll of {bankroll}")]
    InsufficientFunds {
        /// The rejected amount.
        amount: i64,
        /// The current bankroll.
        bankroll: i64,
    },
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game phase for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// No hand is waiting for a decision.
    #[error("no active hand")]
    NoActiveHand,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Doubling is not allowed after a split at this table.
    #[error("doubling after a split is not allowed")]
    NoDoubleAfterSplit,
    /// The hand total is not one the table lets you double on.
    #[error("cannot double on a total of {0}")]
    DoubleTotalRestricted(u8),
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum splits reached.
    #[error("maximum split hands reached")]
    MaxSplitsReached,
    /// Aces may not be split again.
    #[error("aces may not be resplit")]
    NoResplitAces,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// Not enough cards left in the shoe.
    #[error("not enough cards left in the shoe")]
    NoCards,
}

/// Errors from table-level commands (next hand, switching rules, resets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The command is not valid in the current phase.
    #[error("command not valid during {0:?}")]
    InvalidState(GamePhase),
    /// The supplied rules or options cannot be played.
    #[error(transparent)]
    InvalidRules(#[from] RuleError),
}

/// Rule set or table option out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Deck count outside 1–8.
    #[error("deck count {0} is outside 1..=8")]
    DeckCount(u8),
    /// Maximum split hands outside 2–4.
    #[error("max split hands {0} is outside 2..=4")]
    MaxSplitHands(u8),
    /// Blackjack payout not a positive ratio.
    #[error("blackjack payout must be a positive ratio")]
    BlackjackPayout,
    /// Minimum-bet multiplier of zero.
    #[error("minimum bet multiplier must be at least 1")]
    MinBetMultiplier,
    /// Double restriction lists no totals.
    #[error("double restriction lists no totals")]
    EmptyDoubleTotals,
    /// Base minimum bet not positive.
    #[error("base minimum bet must be positive")]
    MinimumBet,
    /// Negative starting bankroll.
    #[error("starting bankroll must not be negative")]
    StartingBankroll,
    /// Penetration outside `(0, 1]`.
    #[error("penetration must be in (0, 1]")]
    Penetration,
}

/// A personality name that matches no preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown dealer personality")]
pub struct UnknownPersonality;
