//! Player and dealer hand representations.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::result::Action;

/// Evaluated value of a set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandValue {
    /// Best total, with aces demoted only as far as needed.
    pub total: u8,
    /// Whether an ace counts as 11 and no ace had to be demoted.
    pub is_soft: bool,
    /// Whether the cards are a two-card 21.
    pub is_blackjack: bool,
}

fn evaluate_cards(cards: &[Card]) -> HandValue {
    let mut total: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total = total.saturating_add(card.value());
    }

    let mut demoted: u8 = 0;
    while total > 21 && demoted < aces {
        total -= 10;
        demoted += 1;
    }

    // Once any ace has been forced down to 1 the hand is resolved as hard.
    HandValue {
        total,
        is_soft: aces > 0 && demoted == 0 && total <= 21,
        is_blackjack: cards.len() == 2 && total == 21,
    }
}

/// An ordered sequence of cards.
///
/// All derived attributes are recomputed from the cards on every call, so
/// the value can never drift from the card sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a hand from the given cards, in deal order.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Evaluates the hand.
    ///
    /// ```
    /// use bjsim::{Card, Hand, Rank, Suit};
    ///
    /// let hand = Hand::from_cards(&[
    ///     Card::new(Suit::Hearts, Rank::Ace),
    ///     Card::new(Suit::Spades, Rank::Six),
    ///     Card::new(Suit::Clubs, Rank::Nine),
    /// ]);
    /// let value = hand.evaluate();
    /// assert_eq!(value.total, 16);
    /// assert!(!value.is_soft);
    /// ```
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate_cards(&self.cards)
    }

    /// Returns the best total of the hand.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.evaluate().total
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.evaluate().is_soft
    }

    /// Returns whether the hand is a two-card 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.evaluate().is_blackjack
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }

    /// Returns whether the hand is a pair of equal rank.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Returns whether the hand has exactly two cards.
    ///
    /// Restrictions on the total are table rules and are checked by the
    /// engine.
    #[must_use]
    pub fn can_double(&self) -> bool {
        self.cards.len() == 2
    }

    /// Returns whether the hand is exactly two aces.
    #[must_use]
    pub fn is_pair_of_aces(&self) -> bool {
        self.can_split() && self.cards[0].is_ace()
    }

    /// Returns whether any card is an ace.
    #[must_use]
    pub fn contains_ace(&self) -> bool {
        self.cards.iter().any(Card::is_ace)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns the second card of a pair.
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.can_split() {
            self.cards.pop()
        } else {
            None
        }
    }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandStatus {
    /// Hand is active and can take actions.
    Active,
    /// Player has stood (or was forced to stand).
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a natural dealt on the initial deal.
    Blackjack,
    /// Player has surrendered.
    Surrendered,
}

/// A player's hand together with its wager.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerHand {
    hand: Hand,
    status: HandStatus,
    wager: i64,
    free_stake: i64,
    from_split: bool,
    actions: Vec<Action>,
}

impl PlayerHand {
    /// Creates a new empty hand with the given wager.
    #[must_use]
    pub const fn new(wager: i64) -> Self {
        Self {
            hand: Hand::new(),
            status: HandStatus::Active,
            wager,
            free_stake: 0,
            from_split: false,
            actions: Vec::new(),
        }
    }

    /// Creates a new hand from a split with a single card.
    ///
    /// `free_stake` is the part of `wager` that was not debited from the
    /// bankroll.
    #[must_use]
    pub fn from_split(card: Card, wager: i64, free_stake: i64) -> Self {
        Self {
            hand: Hand::from_cards(&[card]),
            status: HandStatus::Active,
            wager,
            free_stake,
            from_split: true,
            actions: alloc::vec![Action::Split],
        }
    }

    /// Adds a card and updates the status for busts.
    pub fn add_card(&mut self, card: Card) {
        self.hand.add_card(card);
        if self.hand.is_bust() {
            self.status = HandStatus::Bust;
        }
    }

    /// Returns the underlying cards.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    /// Returns the best total of the hand.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.hand.total()
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns whether the hand can still take actions.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == HandStatus::Active
    }

    /// Returns the total wager on this hand, including any free stake.
    #[must_use]
    pub const fn wager(&self) -> i64 {
        self.wager
    }

    /// Returns the portion of the wager granted by free doubles or splits.
    #[must_use]
    pub const fn free_stake(&self) -> i64 {
        self.free_stake
    }

    /// Returns the amount actually taken from the bankroll for this hand.
    #[must_use]
    pub const fn staked(&self) -> i64 {
        self.wager - self.free_stake
    }

    /// Doubles the wager. When `free` is set the added half is a free stake.
    pub const fn double_wager(&mut self, free: bool) {
        if free {
            self.free_stake += self.wager;
        }
        self.wager *= 2;
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Returns whether this hand is a natural that pays the blackjack ratio.
    ///
    /// A two-card 21 made after a split counts as an ordinary 21.
    #[must_use]
    pub fn is_natural(&self) -> bool {
        !self.from_split && self.hand.is_blackjack()
    }

    /// Returns the actions taken on this hand, in order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Appends an action to the hand's log.
    pub fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Splits off the second card of a pair into a new hand.
    ///
    /// The new hand carries the same wager; `free` marks that wager as a free
    /// stake. Returns `None` if the hand is not a pair.
    pub fn split(&mut self, free: bool) -> Option<Self> {
        let card = self.hand.take_split_card()?;
        self.from_split = true;
        self.record(Action::Split);
        let free_stake = if free { self.wager } else { 0 };
        Some(Self::from_split(card, self.wager, free_stake))
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DealerHand {
    hand: Hand,
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hand: Hand::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    /// Returns the underlying hand, hole card included.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns all cards in the hand, hole card included.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    /// Returns the cards a player can see.
    #[must_use]
    pub fn visible_cards(&self) -> &[Card] {
        let cards = self.hand.cards();
        if self.hole_revealed {
            cards
        } else {
            &cards[..cards.len().min(1)]
        }
    }

    /// Returns the up card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.hand.cards().first()
    }

    /// Returns the hole card (second card).
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.hand.cards().get(1)
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Calculates the visible value (only up card if hole not revealed).
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        evaluate_cards(self.visible_cards()).total
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.hand.total()
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.hand.is_blackjack()
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.hand.is_bust()
    }

    /// Returns whether the hand is soft.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.hand.is_soft()
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hand.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.hand = Hand::new();
        self.hole_revealed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.add_card(Card::new(Suit::Spades, rank));
        }
        hand
    }

    #[test]
    fn ace_six_is_soft_seventeen() {
        let value = hand(&[Rank::Ace, Rank::Six]).evaluate();
        assert_eq!(value.total, 17);
        assert!(value.is_soft);
        assert!(!value.is_blackjack);
    }

    #[test]
    fn ace_six_nine_is_hard_sixteen() {
        let value = hand(&[Rank::Ace, Rank::Six, Rank::Nine]).evaluate();
        assert_eq!(value.total, 16);
        assert!(!value.is_soft);
    }

    #[test]
    fn two_aces_and_nine_is_hard_twenty_one_not_blackjack() {
        let value = hand(&[Rank::Ace, Rank::Ace, Rank::Nine]).evaluate();
        assert_eq!(value.total, 21);
        assert!(!value.is_soft);
        assert!(!value.is_blackjack);
    }

    #[test]
    fn two_aces_and_king_demotes_both() {
        let value = hand(&[Rank::Ace, Rank::Ace, Rank::King]).evaluate();
        assert_eq!(value.total, 12);
        assert!(!value.is_soft);
    }

    #[test]
    fn three_card_twenty_one_is_not_blackjack() {
        let h = hand(&[Rank::Seven, Rank::Seven, Rank::Seven]);
        assert_eq!(h.total(), 21);
        assert!(!h.is_blackjack());
    }

    #[test]
    fn ace_and_face_is_blackjack() {
        let h = hand(&[Rank::Ace, Rank::Jack]);
        assert!(h.is_blackjack());
        assert!(h.is_soft());
    }

    #[test]
    fn bust_reports_true_total() {
        let h = hand(&[Rank::King, Rank::Queen, Rank::Five]);
        assert_eq!(h.total(), 25);
        assert!(h.is_bust());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let h = hand(&[Rank::Ace, Rank::Five, Rank::Ace]);
        assert_eq!(h.evaluate(), h.evaluate());
        assert_eq!(h.total(), 17);
        assert!(!h.is_soft());
    }

    #[test]
    fn total_never_exceeds_twenty_one_while_an_ace_can_drop() {
        let ranks = [Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace, Rank::Nine, Rank::Five];
        for len in 1..=ranks.len() {
            let h = hand(&ranks[..len]);
            let raw: u8 = ranks[..len].iter().map(|r| r.value()).sum();
            let aces = ranks[..len].iter().filter(|r| **r == Rank::Ace).count() as u8;
            if raw - 10 * aces <= 21 {
                assert!(h.total() <= 21, "{len} cards");
            } else {
                assert_eq!(h.total(), raw - 10 * aces);
            }
        }
    }

    #[test]
    fn split_requires_equal_ranks() {
        assert!(hand(&[Rank::Eight, Rank::Eight]).can_split());
        assert!(!hand(&[Rank::King, Rank::Queen]).can_split());
        assert!(!hand(&[Rank::Eight, Rank::Eight, Rank::Two]).can_split());
        assert!(hand(&[Rank::Ace, Rank::Ace]).is_pair_of_aces());
        assert!(!hand(&[Rank::Ten, Rank::Ten]).is_pair_of_aces());
    }

    #[test]
    fn double_needs_exactly_two_cards() {
        assert!(hand(&[Rank::Nine, Rank::Three]).can_double());
        assert!(!hand(&[Rank::Four, Rank::Three, Rank::Two]).can_double());
        assert!(hand(&[Rank::Two, Rank::Ace]).contains_ace());
    }

    #[test]
    fn split_hand_twenty_one_is_not_natural() {
        let mut player = PlayerHand::new(10);
        player.add_card(Card::new(Suit::Hearts, Rank::Ace));
        player.add_card(Card::new(Suit::Clubs, Rank::Ace));
        let mut second = player.split(false).unwrap();
        second.add_card(Card::new(Suit::Clubs, Rank::King));

        assert!(second.hand().is_blackjack());
        assert!(!second.is_natural());
        assert_eq!(second.actions(), [Action::Split]);
        assert_eq!(player.actions(), [Action::Split]);
        assert_eq!(second.wager(), 10);
    }

    #[test]
    fn free_double_tracks_free_stake() {
        let mut player = PlayerHand::new(20);
        player.double_wager(true);
        assert_eq!(player.wager(), 40);
        assert_eq!(player.free_stake(), 20);
        assert_eq!(player.staked(), 20);
    }

    #[test]
    fn dealer_hides_hole_card_until_revealed() {
        let mut dealer = DealerHand::new();
        dealer.add_card(Card::new(Suit::Hearts, Rank::Ace));
        dealer.add_card(Card::new(Suit::Clubs, Rank::Six));

        assert_eq!(dealer.visible_cards().len(), 1);
        assert_eq!(dealer.visible_value(), 11);

        dealer.reveal_hole();
        assert_eq!(dealer.visible_cards().len(), 2);
        assert_eq!(dealer.visible_value(), 17);
        assert!(dealer.is_soft());
    }
}
