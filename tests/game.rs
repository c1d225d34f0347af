//! Game integration tests.

use bjsim::{
    Action, ActionError, BetError, Card, DECK_SIZE, DealerHand, DealerPersonality,
    DoubleRestriction, Game, GamePhase, Hand, HandOutcome, HandStatus, PlayerHand, Rank,
    RoundError, RoundingMode, RuleError, RuleSet, Shoe, Suit, Surrender, TableOptions, TotalSet,
};

const fn card(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

/// Plays a simple "hit below 17" strategy until the round settles.
fn play_round(game: &mut Game, bet: i64) {
    game.place_bet(bet).unwrap();
    while game.phase() == GamePhase::PlayerTurn {
        let total = game.active_hand().map_or(21, PlayerHand::total);
        if total < 17 {
            game.hit().unwrap();
        } else {
            game.stand().unwrap();
        }
    }
}

#[test]
fn hand_values_and_softness() {
    let soft = Hand::from_cards(&[card(Suit::Hearts, Rank::Ace), card(Suit::Clubs, Rank::Six)]);
    assert_eq!(soft.total(), 17);
    assert!(soft.is_soft());

    let hard = Hand::from_cards(&[
        card(Suit::Hearts, Rank::Ace),
        card(Suit::Clubs, Rank::Six),
        card(Suit::Spades, Rank::Nine),
    ]);
    assert_eq!(hard.total(), 16);
    assert!(!hard.is_soft());

    let two_aces_and_nine = Hand::from_cards(&[
        card(Suit::Hearts, Rank::Ace),
        card(Suit::Clubs, Rank::Ace),
        card(Suit::Spades, Rank::Nine),
    ]);
    assert_eq!(two_aces_and_nine.total(), 21);
    assert!(!two_aces_and_nine.is_soft());
    assert!(!two_aces_and_nine.is_blackjack());

    let natural = Hand::from_cards(&[card(Suit::Hearts, Rank::Ace), card(Suit::Spades, Rank::King)]);
    assert!(natural.is_blackjack());
}

#[test]
fn split_hand_never_counts_as_natural() {
    let mut hand = PlayerHand::from_split(card(Suit::Hearts, Rank::Ace), 10, 0);
    hand.add_card(card(Suit::Clubs, Rank::King));
    assert_eq!(hand.total(), 21);
    assert!(hand.hand().is_blackjack());
    assert!(!hand.is_natural());
    assert_eq!(hand.status(), HandStatus::Active);
    assert_eq!(hand.actions(), [Action::Split]);

    let mut bust = PlayerHand::new(5);
    bust.add_card(card(Suit::Hearts, Rank::Ten));
    bust.add_card(card(Suit::Spades, Rank::Ten));
    bust.add_card(card(Suit::Diamonds, Rank::Two));
    assert_eq!(bust.status(), HandStatus::Bust);
}

#[test]
fn dealer_hand_hides_the_hole_card() {
    let mut dealer = DealerHand::new();
    dealer.add_card(card(Suit::Hearts, Rank::Ace));
    dealer.add_card(card(Suit::Clubs, Rank::Six));

    assert!(!dealer.is_hole_revealed());
    assert_eq!(dealer.visible_cards().len(), 1);
    assert_eq!(dealer.visible_value(), 11);

    dealer.reveal_hole();
    assert_eq!(dealer.visible_value(), 17);
    assert!(dealer.is_soft());
}

#[test]
fn rule_builders_and_validation() {
    let rules = RuleSet::CLASSIC
        .with_decks(2)
        .with_dealer_hits_soft_17(true)
        .with_double_restriction(DoubleRestriction::Totals(TotalSet::of(&[10, 11])))
        .with_double_after_split(false)
        .with_max_split_hands(3)
        .with_surrender(Surrender::Early)
        .with_blackjack_payout(1.2)
        .with_min_bet_multiplier(5);

    assert_eq!(rules.decks, 2);
    assert!(rules.dealer_hits_soft_17);
    assert!(rules.double_restriction.allows(11));
    assert!(!rules.double_restriction.allows(9));
    assert_eq!(rules.max_split_hands, 3);
    assert_eq!(rules.validate(), Ok(()));

    assert_eq!(
        RuleSet::CLASSIC.with_decks(0).validate(),
        Err(RuleError::DeckCount(0))
    );
    assert_eq!(
        RuleSet::CLASSIC.with_max_split_hands(5).validate(),
        Err(RuleError::MaxSplitHands(5))
    );
    assert_eq!(
        RuleSet::CLASSIC
            .with_double_restriction(DoubleRestriction::Totals(TotalSet::EMPTY))
            .validate(),
        Err(RuleError::EmptyDoubleTotals)
    );
    assert!(Game::new(RuleSet::CLASSIC.with_decks(9), TableOptions::default(), 1).is_err());
}

#[test]
fn house_edge_follows_the_rule_coefficients() {
    let classic = RuleSet::CLASSIC.approximate_house_edge();
    assert!((classic - 0.45).abs() < 1e-9);

    let hits = RuleSet::CLASSIC
        .with_dealer_hits_soft_17(true)
        .approximate_house_edge();
    assert!((hits - classic - 0.22).abs() < 1e-9);

    let six_five = RuleSet::CLASSIC
        .with_blackjack_payout(1.2)
        .approximate_house_edge();
    assert!((six_five - classic - 1.39).abs() < 1e-9);

    for personality in DealerPersonality::ALL {
        let game = Game::with_personality(personality, TableOptions::default(), 1).unwrap();
        assert!((game.house_edge() - personality.house_edge()).abs() < 1e-9);
    }
    assert!(DealerPersonality::Lucky.house_edge() < DealerPersonality::Classic.house_edge());
    assert!(DealerPersonality::Shark.house_edge() > DealerPersonality::Classic.house_edge());
}

#[test]
fn options_builder_sets_fields() {
    let options = TableOptions::default()
        .with_starting_bankroll(500)
        .with_base_minimum_bet(5)
        .with_penetration(0.5)
        .with_rounding_blackjack(RoundingMode::Up)
        .with_rounding_surrender(RoundingMode::Down);

    assert_eq!(options.starting_bankroll, 500);
    assert_eq!(options.base_minimum_bet, 5);
    assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    assert_eq!(options.rounding_surrender, RoundingMode::Down);

    let game = Game::with_personality(DealerPersonality::Shark, options, 1).unwrap();
    assert_eq!(game.minimum_bet(), 10);
    assert_eq!(game.bankroll(), 500);
    assert!(game.shoe().penetration_threshold() < 0.75);
}

#[test]
fn shoe_conserves_cards() {
    let mut shoe = Shoe::new(2, 0.75, 99);
    assert_eq!(shoe.total_cards(), 2 * DECK_SIZE);

    let mut drawn = Vec::new();
    while let Some(card) = shoe.deal() {
        drawn.push(card);
        assert_eq!(shoe.remaining() + shoe.dealt_count(), shoe.total_cards());
    }
    assert_eq!(drawn.len(), 2 * DECK_SIZE);
    assert_eq!(shoe.dealt(), drawn.as_slice());

    shoe.reshuffle();
    assert_eq!(shoe.remaining(), shoe.total_cards());
    assert_eq!(shoe.dealt_count(), 0);
}

#[test]
fn same_seed_deals_the_same_rounds() {
    let mut first = Game::new(RuleSet::CLASSIC, TableOptions::default(), 2024).unwrap();
    let mut second = Game::new(RuleSet::CLASSIC, TableOptions::default(), 2024).unwrap();

    for _ in 0..20 {
        if first.phase() != GamePhase::Betting {
            break;
        }
        play_round(&mut first, 10);
        play_round(&mut second, 10);
        assert_eq!(first.last_result(), second.last_result());
        if first.phase() == GamePhase::Result {
            first.next_hand().unwrap();
            second.next_hand().unwrap();
        }
    }
}

#[test]
fn bankroll_accounting_holds_over_many_rounds() {
    for personality in DealerPersonality::ALL {
        let mut game = Game::with_personality(personality, TableOptions::default(), 77).unwrap();
        let bet = game.minimum_bet();

        for _ in 0..200 {
            if game.phase() != GamePhase::Betting {
                break;
            }
            let before = game.bankroll();
            play_round(&mut game, bet);

            let result = game.last_result().unwrap();
            assert_eq!(result.bankroll, game.bankroll());
            assert_eq!(game.bankroll(), before + result.net);
            assert_eq!(
                result.total_payout,
                result.hands.iter().map(|h| h.payout).sum::<i64>()
            );
            assert_eq!(
                result.net,
                result.hands.iter().map(bjsim::HandRecord::net).sum::<i64>()
            );
            assert!(result.hands.iter().all(|h| h.payout >= 0));
            assert!(!result.shoe_exhausted);

            let shoe = game.shoe();
            assert_eq!(shoe.remaining() + shoe.dealt_count(), shoe.total_cards());

            match game.phase() {
                GamePhase::Result => game.next_hand().unwrap(),
                GamePhase::GameOver => assert!(game.bankroll() < game.minimum_bet()),
                other => panic!("round ended in {other:?}"),
            }
        }
    }
}

#[test]
fn settled_hands_are_never_played_again() {
    let mut game = Game::new(RuleSet::CLASSIC, TableOptions::default(), 5).unwrap();
    play_round(&mut game, 10);

    assert!(matches!(
        game.phase(),
        GamePhase::Result | GamePhase::GameOver
    ));
    assert_eq!(game.active_hand_index(), None);
    assert!(game.active_hand().is_none());
    assert_eq!(game.hit(), Err(ActionError::InvalidState));
    assert_eq!(game.stand(), Err(ActionError::InvalidState));
    assert_eq!(
        game.place_bet(10),
        Err(BetError::InvalidState(game.phase()))
    );

    let result = game.last_result().unwrap();
    for record in &result.hands {
        assert_eq!(record.dealer_cards.as_slice(), game.dealer_hand().cards());
        assert!(game.dealer_hand().is_hole_revealed());
        if record.outcome == HandOutcome::Bust {
            assert!(record.player_total > 21);
        }
    }
}

#[test]
fn next_hand_returns_to_betting() {
    let mut game = Game::new(RuleSet::CLASSIC, TableOptions::default(), 11).unwrap();
    assert_eq!(game.next_hand(), Err(RoundError::InvalidState(GamePhase::Betting)));

    play_round(&mut game, 10);
    game.next_hand().unwrap();

    assert_eq!(game.phase(), GamePhase::Betting);
    assert!(game.hands().is_empty());
    assert!(game.dealer_hand().is_empty());
    assert_eq!(game.total_wager(), 0);
    assert!(game.last_result().is_none());
}

#[test]
fn switching_personality_between_rounds() {
    let mut game = Game::new(RuleSet::CLASSIC, TableOptions::default(), 3).unwrap();
    play_round(&mut game, 10);

    game.switch_personality(DealerPersonality::HighRoller).unwrap();
    assert_eq!(game.phase(), GamePhase::Betting);
    assert_eq!(game.rules(), &DealerPersonality::HighRoller.rules());
    assert_eq!(game.shoe().total_cards(), DECK_SIZE);
    assert_eq!(game.shoe().dealt_count(), 0);
    assert_eq!(game.minimum_bet(), 100);
    assert!(game.last_result().is_none());

    assert_eq!(
        game.place_bet(10),
        Err(BetError::BelowMinimum {
            amount: 10,
            minimum: 100
        })
    );
}

#[test]
fn invalid_table_options_are_rejected() {
    assert_eq!(
        Game::new(
            RuleSet::CLASSIC,
            TableOptions::default().with_base_minimum_bet(0),
            1
        )
        .err(),
        Some(RuleError::MinimumBet)
    );
    assert_eq!(
        Game::new(
            RuleSet::CLASSIC,
            TableOptions::default().with_penetration(1.5),
            1
        )
        .err(),
        Some(RuleError::Penetration)
    );
}

#[test]
fn broke_player_starts_in_game_over() {
    let mut game = Game::new(
        RuleSet::CLASSIC,
        TableOptions::default().with_starting_bankroll(5),
        1,
    )
    .unwrap();
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(
        game.place_bet(5),
        Err(BetError::InvalidState(GamePhase::GameOver))
    );

    game.reset_bankroll().unwrap();
    assert_eq!(game.phase(), GamePhase::GameOver);
}
