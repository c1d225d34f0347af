//! CLI blackjack example.
//!
//! Pass a dealer personality as the first argument (`shark`, `high-roller`,
//! ...) and set `RUST_LOG=bjsim=debug` to watch the engine's log.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjsim::{
    ActionAvailability, Card, DealerHand, DealerPersonality, Game, GamePhase, HandOutcome,
    PlayerHand, Suit, TableOptions,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let personality = match std::env::args().nth(1) {
        Some(name) => match name.parse::<DealerPersonality>() {
            Ok(personality) => personality,
            Err(err) => {
                println!("{err}: {name}");
                return;
            }
        },
        None => DealerPersonality::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = match Game::with_personality(personality, TableOptions::default(), seed) {
        Ok(game) => game,
        Err(err) => {
            println!("Cannot open table: {err}");
            return;
        }
    };

    println!("Blackjack CLI example (type 'q' to quit)");
    println!(
        "Dealer: {personality} | {} decks | house edge {:.2}%",
        game.rules().decks,
        game.house_edge()
    );

    loop {
        if game.phase() == GamePhase::GameOver {
            println!("You cannot cover the minimum bet. Game over.");
            match prompt_line("Start over? (y/n): ").as_str() {
                "y" | "yes" => {
                    if let Err(err) = game.reset_bankroll() {
                        println!("Reset error: {err}");
                        break;
                    }
                }
                _ => break,
            }
        }

        let bankroll = game.bankroll();
        let minimum = game.minimum_bet();
        let Some(bet) = prompt_amount(&format!("Bet amount ({minimum}-{bankroll}, 0 to quit): "))
        else {
            break;
        };

        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if let Err(err) = game.place_bet(bet) {
            println!("Bet error: {err}");
            continue;
        }

        while game.phase() == GamePhase::PlayerTurn {
            print_table(&game);

            println!("{}", format_actions(game.available_actions()));
            let result = match prompt_line("Action: ").as_str() {
                "h" | "hit" => game.hit().map(|_| ()),
                "s" | "stand" => game.stand(),
                "d" | "double" => game.double_down().map(|_| ()),
                "p" | "split" => game.split(),
                "u" | "surrender" => game.surrender(),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
        }

        print_table(&game);
        if let Some(result) = game.last_result() {
            for record in &result.hands {
                println!(
                    "Hand {}: {} | paid {} (net {})",
                    record.hand_index,
                    format_outcome(record.outcome),
                    record.payout,
                    record.net()
                );
            }
            println!("Round net {} | bankroll {}", result.net, result.bankroll);
        }

        if game.phase() == GamePhase::Result {
            let reshuffle = game.needs_reshuffle();
            if let Err(err) = game.next_hand() {
                println!("Next hand error: {err}");
                break;
            }
            if reshuffle {
                println!("Shoe reshuffled.");
            }
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_amount(prompt: &str) -> Option<i64> {
    loop {
        let input = prompt_line(prompt);
        if input.is_empty() || input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<i64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(game: &Game) {
    let remaining = game.shoe().remaining();
    println!("\nShoe: {remaining} cards remaining");

    let dealer = game.dealer_hand();
    let dealer_value = if dealer.is_hole_revealed() {
        dealer.total()
    } else {
        dealer.visible_value()
    };
    println!("\nDealer: {} (value {dealer_value})", format_dealer(dealer));

    let active = game.active_hand_index();
    for (index, hand) in game.hands().iter().enumerate() {
        let marker = if Some(index) == active { "*" } else { " " };
        println!(
            "{} Hand {}: {} | value {} | bet {} | {:?}",
            marker,
            index,
            format_hand(hand),
            hand.total(),
            hand.wager(),
            hand.status()
        );
    }
    println!();
}

fn format_actions(availability: ActionAvailability) -> String {
    let parts = [
        format_action("hit", "h", availability.hit),
        format_action("stand", "s", availability.stand),
        format_action("double", "d", availability.double),
        format_action("split", "p", availability.split),
        format_action("surrender", "u", availability.surrender),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn format_outcome(outcome: HandOutcome) -> String {
    let (text, code) = match outcome {
        HandOutcome::Blackjack => ("Blackjack!", "33"),
        HandOutcome::Win => ("Win", "32"),
        HandOutcome::DealerBust => ("Dealer busts", "32"),
        HandOutcome::Push => ("Push", "90"),
        HandOutcome::Surrender => ("Surrendered", "90"),
        HandOutcome::Loss => ("Loss", "31"),
        HandOutcome::Bust => ("Bust", "31"),
    };
    colorize(text, code)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_empty() {
        return "(no cards)".to_string();
    }

    let mut parts: Vec<String> = dealer.visible_cards().iter().map(format_card).collect();
    if !dealer.is_hole_revealed() && dealer.len() > 1 {
        parts.push("??".to_string());
    }
    parts.join(" ")
}

fn format_hand(hand: &PlayerHand) -> String {
    if hand.cards().is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };
    colorize(&card.to_string(), color_code)
}
