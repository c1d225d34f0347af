use alloc::vec::Vec;

use crate::hand::{HandStatus, PlayerHand};
use crate::options::RoundingMode;
use crate::result::{HandOutcome, HandRecord, RoundResult};

use super::{Game, GamePhase};

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> i64 {
    match mode {
        RoundingMode::Up => amount.ceil() as i64,
        RoundingMode::Down => amount.floor() as i64,
        RoundingMode::Nearest => amount.round() as i64,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> i64 {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as i64,
        RoundingMode::Down => libm::floor(amount) as i64,
        RoundingMode::Nearest => libm::round(amount) as i64,
    }
}

impl Game {
    /// Dealer plays their hand according to the rules, then settles.
    ///
    /// The dealer reveals the hole card and draws while below 17, and on soft
    /// 17 when the rules say the dealer hits it. When every player hand has
    /// busted the dealer does not draw.
    pub(super) fn play_dealer(&mut self) {
        self.phase = GamePhase::DealerTurn;
        self.dealer.reveal_hole();

        let mut shoe_exhausted = false;
        let any_live = self
            .hands
            .iter()
            .any(|hand| hand.status() != HandStatus::Bust);

        if any_live {
            while self.dealer_must_hit() {
                let Some(card) = self.shoe.deal() else {
                    tracing::error!(
                        dealer_total = self.dealer.total(),
                        "shoe exhausted during dealer play, dealer stands"
                    );
                    shoe_exhausted = true;
                    break;
                };
                self.dealer.add_card(card);
                tracing::trace!(%card, total = self.dealer.total(), "dealer draws");
            }
        }

        self.settle(shoe_exhausted);
    }

    fn dealer_must_hit(&self) -> bool {
        let total = self.dealer.total();
        total < 17 || (total == 17 && self.dealer.is_soft() && self.rules.dealer_hits_soft_17)
    }

    /// Settles one hand against the final dealer hand.
    ///
    /// Returns the outcome and the amount to credit. A free stake is never
    /// paid back, only the winnings it earned.
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for monetary values"
    )]
    fn settle_hand(&self, hand: &PlayerHand) -> (HandOutcome, i64) {
        let wager = hand.wager();
        let dealer_total = self.dealer.total();
        let dealer_blackjack = self.dealer.is_blackjack();

        let (outcome, gross) = match hand.status() {
            HandStatus::Surrendered => {
                let refund =
                    round_amount(hand.staked() as f64 * 0.5, self.options.rounding_surrender);
                return (HandOutcome::Surrender, refund);
            }
            HandStatus::Bust => (HandOutcome::Bust, 0),
            HandStatus::Blackjack => {
                if dealer_blackjack {
                    (HandOutcome::Push, wager)
                } else {
                    let winnings = round_amount(
                        wager as f64 * self.rules.blackjack_payout,
                        self.options.rounding_blackjack,
                    );
                    (HandOutcome::Blackjack, wager + winnings)
                }
            }
            HandStatus::Stand | HandStatus::Active => {
                let total = hand.total();
                if dealer_blackjack {
                    (HandOutcome::Loss, 0)
                } else if self.dealer.is_bust() {
                    (HandOutcome::DealerBust, wager * 2)
                } else if total > dealer_total {
                    (HandOutcome::Win, wager * 2)
                } else if total == dealer_total {
                    (HandOutcome::Push, wager)
                } else {
                    (HandOutcome::Loss, 0)
                }
            }
        };

        (outcome, (gross - hand.free_stake()).max(0))
    }

    /// Pays every hand, checks for bankruptcy and notifies observers.
    pub(super) fn settle(&mut self, shoe_exhausted: bool) {
        self.dealer.reveal_hole();

        let dealer_cards = self.dealer.cards().to_vec();
        let dealer_total = self.dealer.total();

        let mut records = Vec::with_capacity(self.hands.len());
        let mut total_payout = 0;
        let mut total_staked = 0;

        for (hand_index, hand) in self.hands.iter().enumerate() {
            let (outcome, payout) = self.settle_hand(hand);
            total_payout += payout;
            total_staked += hand.staked();

            records.push(HandRecord {
                hand_index,
                player_cards: hand.cards().to_vec(),
                player_total: hand.total(),
                dealer_cards: dealer_cards.clone(),
                dealer_total,
                wager: hand.wager(),
                free_stake: hand.free_stake(),
                payout,
                outcome,
                actions: hand.actions().to_vec(),
            });
        }

        self.bankroll += total_payout;
        self.phase = if self.bankroll < self.minimum_bet() {
            GamePhase::GameOver
        } else {
            GamePhase::Result
        };

        let result = RoundResult {
            hands: records,
            dealer_total,
            dealer_bust: self.dealer.is_bust(),
            dealer_blackjack: self.dealer.is_blackjack(),
            total_payout,
            net: total_payout - total_staked,
            bankroll: self.bankroll,
            phase: self.phase,
            shoe_exhausted,
        };

        tracing::info!(
            hands = result.hands.len(),
            dealer_total,
            payout = total_payout,
            net = result.net,
            bankroll = self.bankroll,
            phase = ?self.phase,
            "round settled"
        );
        if self.phase == GamePhase::GameOver {
            tracing::info!(
                bankroll = self.bankroll,
                minimum_bet = self.minimum_bet(),
                "bankroll below minimum bet, game over"
            );
        }

        for observer in &mut self.observers {
            for record in &result.hands {
                observer.on_hand_settled(record);
            }
            observer.on_round_settled(&result);
        }

        self.last_result = Some(result);
    }
}
