//! A single-table blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that drives a full round: betting,
//! the initial deal, player decisions (hit, stand, double, split,
//! surrender), automated dealer play and multi-hand settlement. Table rules
//! are plain [`RuleSet`] values, and a handful of named
//! [`DealerPersonality`] presets bundle common variants.
//!
//! # Example
//!
//! ```
//! use bjsim::{Game, GamePhase, RuleSet, TableOptions};
//!
//! let mut game = Game::new(RuleSet::default(), TableOptions::default(), 7)?;
//! game.place_bet(25)?;
//! while game.phase() == GamePhase::PlayerTurn {
//!     if game.active_hand().is_some_and(|hand| hand.total() < 17) {
//!         game.hit()?;
//!     } else {
//!         game.stand()?;
//!     }
//! }
//! let result = game.last_result().expect("round settled");
//! assert_eq!(result.bankroll, game.bankroll());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod personality;
pub mod result;
pub mod rules;
pub mod shoe;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{ActionError, BetError, RoundError, RuleError, UnknownPersonality};
pub use game::{ActionAvailability, Game, GamePhase};
pub use hand::{DealerHand, Hand, HandStatus, HandValue, PlayerHand};
pub use options::{RoundingMode, TableOptions};
pub use personality::DealerPersonality;
pub use result::{Action, HandOutcome, HandRecord, RoundObserver, RoundResult};
pub use rules::{DoubleRestriction, RuleSet, Surrender, TotalSet};
pub use shoe::{DEFAULT_PENETRATION, Shoe, fisher_yates};
