pub mod down_and_distance;
pub mod drive;
pub mod game_clock;
pub mod game_context;
pub mod play_details;
pub mod play_record;
pub mod play_type;
pub mod player_stats;
pub mod scoring_events;
pub mod teams;
pub mod yards;

pub use down_and_distance::*;
pub use drive::*;
pub use game_clock::*;
pub use game_context::*;
pub use play_details::*;
pub use play_record::*;
pub use play_type::*;
pub use player_stats::*;
pub use scoring_events::*;
pub use teams::*;
pub use yards::*;
