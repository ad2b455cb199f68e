//! Turns a UFL play-by-play event feed into one flat record per play.
//!
//! [`parse_game`] walks the feed lazily; [`parse_game_to_end`] collects a
//! whole game along with its drives and data-quality counters.
//! [`parse_boxscore`] reads the player box scores from the same payload.

pub mod assembler;
pub mod error;
pub mod feed;
pub mod parsers;
pub mod schema;
pub mod tracker;

pub use error::{BoxscoreError, FeedError};
pub use feed::EventPayload;
pub use parsers::{classify, extract, parse_boxscore, parse_game, parse_game_to_end, GamePlays, GameResult, ParseStats, ParsedGame};
pub use schema::{GameContext, PlayRecord, PlayerGameStats, SCHEMA_VERSION};
