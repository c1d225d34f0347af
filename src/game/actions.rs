use crate::card::Card;
use crate::error::ActionError;
use crate::hand::HandStatus;
use crate::result::Action;

use super::{ActionAvailability, Game, GamePhase};

impl Game {
    /// Returns the index of the hand awaiting a decision, or why there is
    /// none.
    fn ensure_player_turn(&self) -> Result<usize, ActionError> {
        if self.phase != GamePhase::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        match self.hands.get(self.active) {
            Some(hand) if hand.is_active() => Ok(self.active),
            _ => Err(ActionError::NoActiveHand),
        }
    }

    fn check_hit(&self) -> Result<usize, ActionError> {
        let index = self.ensure_player_turn()?;
        if self.shoe.remaining() == 0 {
            return Err(ActionError::NoCards);
        }
        Ok(index)
    }

    fn check_double(&self) -> Result<usize, ActionError> {
        let index = self.ensure_player_turn()?;
        let hand = &self.hands[index];

        if !hand.hand().can_double() {
            return Err(ActionError::CannotDouble);
        }
        if hand.is_from_split() && !self.rules.double_after_split {
            return Err(ActionError::NoDoubleAfterSplit);
        }
        let total = hand.total();
        if !self.rules.double_restriction.allows(total) {
            return Err(ActionError::DoubleTotalRestricted(total));
        }
        if !self.rules.free_doubles && self.bankroll < hand.wager() {
            return Err(ActionError::InsufficientFunds);
        }
        if self.shoe.remaining() == 0 {
            return Err(ActionError::NoCards);
        }
        Ok(index)
    }

    fn check_split(&self) -> Result<usize, ActionError> {
        let index = self.ensure_player_turn()?;
        let hand = &self.hands[index];

        if !hand.hand().can_split() {
            return Err(ActionError::CannotSplit);
        }
        if self.hands.len() >= usize::from(self.rules.max_split_hands) {
            return Err(ActionError::MaxSplitsReached);
        }
        if hand.hand().is_pair_of_aces() && hand.is_from_split() && !self.rules.resplit_aces {
            return Err(ActionError::NoResplitAces);
        }
        if !self.rules.free_splits && self.bankroll < hand.wager() {
            return Err(ActionError::InsufficientFunds);
        }
        if self.shoe.remaining() < 2 {
            return Err(ActionError::NoCards);
        }
        Ok(index)
    }

    fn check_surrender(&self) -> Result<usize, ActionError> {
        let index = self.ensure_player_turn()?;
        if !self.rules.surrender.is_allowed() {
            return Err(ActionError::CannotSurrender);
        }

        // Only as the very first decision on the original two cards.
        let hand = &self.hands[index];
        if self.hands.len() != 1
            || hand.is_from_split()
            || hand.cards().len() != 2
            || !hand.actions().is_empty()
        {
            return Err(ActionError::CannotSurrender);
        }
        Ok(index)
    }

    /// Returns whether [`hit`](Self::hit) would be accepted.
    #[must_use]
    pub fn can_hit(&self) -> bool {
        self.check_hit().is_ok()
    }

    /// Returns whether [`stand`](Self::stand) would be accepted.
    #[must_use]
    pub fn can_stand(&self) -> bool {
        self.ensure_player_turn().is_ok()
    }

    /// Returns whether [`double_down`](Self::double_down) would be accepted.
    #[must_use]
    pub fn can_double(&self) -> bool {
        self.check_double().is_ok()
    }

    /// Returns whether [`split`](Self::split) would be accepted.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.check_split().is_ok()
    }

    /// Returns whether [`surrender`](Self::surrender) would be accepted.
    #[must_use]
    pub fn can_surrender(&self) -> bool {
        self.check_surrender().is_ok()
    }

    /// Returns which actions are currently legal.
    #[must_use]
    pub fn available_actions(&self) -> ActionAvailability {
        ActionAvailability {
            hit: self.can_hit(),
            stand: self.can_stand(),
            double: self.can_double(),
            split: self.can_split(),
            surrender: self.can_surrender(),
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust moves play to the next hand; reaching exactly 21 stands
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision or the shoe is
    /// empty.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        let index = self.check_hit()?;
        let card = self.shoe.deal().ok_or(ActionError::NoCards)?;

        let hand = &mut self.hands[index];
        hand.record(Action::Hit);
        hand.add_card(card);
        tracing::debug!(hand = index, %card, total = hand.total(), "hit");

        self.resolve_active();
        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        let index = self.ensure_player_turn()?;

        let hand = &mut self.hands[index];
        hand.record(Action::Stand);
        hand.set_status(HandStatus::Stand);
        tracing::debug!(hand = index, total = hand.total(), "stand");

        self.advance_to_next_hand();
        Ok(())
    }

    /// Player action: Double down (double the wager, receive one card, then
    /// stand).
    ///
    /// With free doubles the added stake is not taken from the bankroll.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision, the hand is not
    /// two cards, the table forbids doubling this hand, the bankroll cannot
    /// cover the extra stake, or the shoe is empty.
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        let index = self.check_double()?;
        let card = self.shoe.deal().ok_or(ActionError::NoCards)?;

        let free = self.rules.free_doubles;
        let hand = &mut self.hands[index];
        if !free {
            self.bankroll -= hand.wager();
        }
        hand.double_wager(free);
        hand.record(Action::Double);
        hand.add_card(card);
        if hand.is_active() {
            hand.set_status(HandStatus::Stand);
        }
        tracing::debug!(
            hand = index,
            %card,
            wager = hand.wager(),
            free,
            total = hand.total(),
            "double down"
        );

        self.advance_to_next_hand();
        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// Each half receives one new card. Split aces under a one-card rule
    /// stand at once; otherwise play continues on the first half.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision, the hand is not a
    /// pair, the split limit is reached, aces may not be resplit, the
    /// bankroll cannot cover the second wager, or the shoe lacks two cards.
    pub fn split(&mut self) -> Result<(), ActionError> {
        let index = self.check_split()?;

        let free = self.rules.free_splits;
        let aces = self.hands[index].hand().is_pair_of_aces();
        let Some(mut second) = self.hands[index].split(free) else {
            return Err(ActionError::CannotSplit);
        };
        if !free {
            self.bankroll -= second.wager();
        }

        if let Some(card) = self.shoe.deal() {
            self.hands[index].add_card(card);
        }
        if let Some(card) = self.shoe.deal() {
            second.add_card(card);
        }
        self.hands.insert(index + 1, second);
        tracing::debug!(
            hand = index,
            hands = self.hands.len(),
            aces,
            free,
            "split"
        );

        if aces && self.rules.split_aces_one_card {
            for hand in &mut self.hands[index..=index + 1] {
                if hand.is_active() {
                    hand.set_status(HandStatus::Stand);
                }
            }
            self.active = index + 1;
            self.advance_to_next_hand();
        } else {
            self.resolve_active();
        }
        Ok(())
    }

    /// Player action: Surrender (forfeit half the wager).
    ///
    /// Ends the round at once; the dealer does not draw.
    ///
    /// # Errors
    ///
    /// Returns an error if no hand is awaiting a decision, the table does not
    /// offer surrender, or this is not the first decision on an unsplit
    /// two-card hand.
    pub fn surrender(&mut self) -> Result<(), ActionError> {
        let index = self.check_surrender()?;

        let hand = &mut self.hands[index];
        hand.record(Action::Surrender);
        hand.set_status(HandStatus::Surrendered);
        tracing::debug!(hand = index, wager = hand.wager(), "surrender");

        self.dealer.reveal_hole();
        self.settle(false);
        Ok(())
    }

    /// Moves on if the active hand is finished, standing it on exactly 21.
    fn resolve_active(&mut self) {
        let Some(hand) = self.hands.get_mut(self.active) else {
            return;
        };
        if hand.is_active() && hand.total() == 21 {
            hand.set_status(HandStatus::Stand);
        }
        if !hand.is_active() {
            self.advance_to_next_hand();
        }
    }

    /// Advances to the next hand that needs a decision, or to the dealer.
    ///
    /// Hands that arrive at exactly 21 stand without a decision.
    fn advance_to_next_hand(&mut self) {
        let mut next = self.active + 1;
        while let Some(hand) = self.hands.get_mut(next) {
            if hand.is_active() {
                if hand.total() != 21 {
                    self.active = next;
                    return;
                }
                hand.set_status(HandStatus::Stand);
            }
            next += 1;
        }

        self.play_dealer();
    }
}
