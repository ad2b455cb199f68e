pub mod boxscore;
pub mod extract;
pub mod play_parser;
pub mod play_type;
pub mod rules;
pub mod tackles;

pub use boxscore::parse_boxscore;
pub use extract::{extract, Extraction, PlaySituation};
pub use play_parser::{parse_game, parse_game_to_end, GamePlays, GameResult, ParseStats, ParsedGame};
pub use play_type::classify;
