//! # chinchon-engine: Rummy Rule Engine Core
//!
//! A deterministic rule engine for Chinchón, an elimination-style rummy game for two
//! to four players. It decides which moves are legal, runs the turn and phase state
//! machine, checks whether a hand can end a round and scores every hand when one does.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) with ordinals and point values
//! - [`deck`] - Deck variants and the injected shuffle capability
//! - [`permutations`] - Lazy, restartable ordering of a hand (Heap's algorithm)
//! - [`meld`] - Run/set checks and the meld existence search
//! - [`scoring`] - Minimum-cost scoring of a hand at round end
//! - [`turn`] - Phases, stages, transition table and turn order
//! - [`rules`] - Move vocabulary and stage gating
//! - [`game`] - Game state snapshots and end detection
//! - [`view`] - Per-player redacted projections
//! - [`engine`] - Setup, move application, elimination and round resets
//! - [`config`] - Rules configuration (TOML file and environment)
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use chinchon_engine::cards::{parse_cards, Card};
//! use chinchon_engine::meld::can_meld;
//! use chinchon_engine::scoring::score_hand;
//!
//! // Discarding the 8 leaves a seven-card run
//! let hand = parse_cards("AH 2H 3H 4H 5H 6H 7H 8H").unwrap();
//! let eight: Card = "8H".parse().unwrap();
//! assert!(can_meld(&hand, &eight));
//!
//! // A seven-card run scores the perfect-meld bonus
//! assert_eq!(score_hand(&hand[..7]).points, -10);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! Shuffling is injected, so games replay exactly under a fixed seed:
//!
//! ```rust
//! use chinchon_engine::config::RulesConfig;
//! use chinchon_engine::engine::Engine;
//! use chinchon_engine::player::PlayerId;
//!
//! let roster = [PlayerId::from("a"), PlayerId::from("b"), PlayerId::from("c")];
//! let config = RulesConfig { seed: Some(42), ..RulesConfig::default() };
//! let g1 = Engine::seeded(config.clone()).setup(&roster).unwrap();
//! let g2 = Engine::seeded(config).setup(&roster).unwrap();
//! assert_eq!(g1, g2);
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod meld;
pub mod permutations;
pub mod player;
pub mod rules;
pub mod scoring;
pub mod turn;
pub mod view;

pub use crate::engine::{Engine, MoveOutcome};
pub use crate::errors::InvalidMove;
pub use crate::game::{check_end, GameState};
pub use crate::view::view_for;
