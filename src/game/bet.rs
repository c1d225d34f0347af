use alloc::vec;

use crate::error::BetError;
use crate::hand::{HandStatus, PlayerHand};

use super::{Game, GamePhase};

/// Cards needed for the initial deal.
const INITIAL_DEAL: usize = 4;

impl Game {
    /// Places a bet and deals the round.
    ///
    /// The wager is debited immediately. Cards go player, dealer up, player,
    /// dealer hole. A natural on either side settles the round at once;
    /// otherwise the game waits for the player's decisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting phase, or the amount is
    /// below the minimum bet or above the bankroll.
    pub fn place_bet(&mut self, amount: i64) -> Result<(), BetError> {
        if self.phase != GamePhase::Betting {
            return Err(BetError::InvalidState(self.phase));
        }

        let minimum = self.minimum_bet();
        if amount < minimum {
            return Err(BetError::BelowMinimum { amount, minimum });
        }
        if amount > self.bankroll {
            return Err(BetError::InsufficientFunds {
                amount,
                bankroll: self.bankroll,
            });
        }

        if self.shoe.remaining() < INITIAL_DEAL {
            tracing::warn!(
                remaining = self.shoe.remaining(),
                "shoe cannot cover the initial deal, reshuffling"
            );
            self.shoe.reshuffle();
        }

        self.clear_round();
        self.bankroll -= amount;
        self.hands = vec![PlayerHand::new(amount)];
        self.phase = GamePhase::Dealing;
        tracing::debug!(amount, bankroll = self.bankroll, "bet placed");

        self.deal_initial();
        Ok(())
    }

    fn deal_initial(&mut self) {
        if let Some(card) = self.shoe.deal() {
            self.hands[0].add_card(card);
        }
        if let Some(card) = self.shoe.deal() {
            self.dealer.add_card(card);
        }
        if let Some(card) = self.shoe.deal() {
            self.hands[0].add_card(card);
        }
        if let Some(card) = self.shoe.deal() {
            self.dealer.add_card(card);
        }

        let player_natural = self.hands[0].is_natural();
        let dealer_natural = self.dealer.is_blackjack();
        tracing::debug!(
            player_total = self.hands[0].total(),
            dealer_up = ?self.dealer.up_card(),
            player_natural,
            dealer_natural,
            "initial deal"
        );

        if player_natural {
            self.hands[0].set_status(HandStatus::Blackjack);
        }

        if player_natural || dealer_natural {
            self.dealer.reveal_hole();
            self.settle(false);
        } else {
            self.active = 0;
            self.phase = GamePhase::PlayerTurn;
        }
    }
}
