//! Game phase types.

/// Phase of the round state machine.
///
/// `Dealing` and `DealerTurn` only last for the duration of the command
/// that enters them; a host never observes the game resting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    /// Accepting a bet for the next round.
    Betting,
    /// Dealing initial cards.
    Dealing,
    /// Waiting for player decisions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round settled; waiting for the next hand.
    Result,
    /// Bankroll cannot cover the minimum bet.
    GameOver,
}

impl GamePhase {
    /// Returns whether a wager is currently on the table.
    #[must_use]
    pub const fn is_round_live(self) -> bool {
        matches!(self, Self::Dealing | Self::PlayerTurn | Self::DealerTurn)
    }
}

/// Which player actions are currently legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionAvailability {
    /// Hit is allowed.
    pub hit: bool,
    /// Stand is allowed.
    pub stand: bool,
    /// Double down is allowed.
    pub double: bool,
    /// Split is allowed.
    pub split: bool,
    /// Surrender is allowed.
    pub surrender: bool,
}
