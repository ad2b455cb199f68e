use std::io;
use std::path::PathBuf;
use thiserror::Error;
use ufl_play_parser::FeedError;

#[derive(Debug, Error)]
pub enum PbpError {
	#[error("Failed to read {}: {source}", path.display())]
	Read { path: PathBuf, source: io::Error },

	#[error("Game {game}: {source}")]
	Feed { game: String, source: FeedError },

	#[error("Failed to write play records: {0}")]
	Write(#[from] io::Error),

	#[error("Failed to encode play record: {0}")]
	Encode(#[from] serde_json::Error),

	#[error("Parse task failed: {0}")]
	Join(#[from] tokio::task::JoinError),

	#[error("Invalid log filter: {0}")]
	LogFilter(#[from] tracing_subscriber::filter::ParseError),
}

impl PbpError {
	pub fn read(path: &std::path::Path, source: io::Error) -> Self {
		Self::Read { path: path.to_path_buf(), source }
	}

	pub fn feed(game: &str, source: FeedError) -> Self {
		Self::Feed { game: game.to_string(), source }
	}
}
