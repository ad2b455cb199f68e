use crate::config::{default_season, Config};
use crate::error::PbpError;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use ufl_play_parser::schema::season_from_event_time;
use ufl_play_parser::{parse_boxscore, parse_game_to_end, EventPayload, GameContext, GameResult, ParseStats, PlayRecord, PlayerGameStats};

/// One parsed game, ready to be written.
#[derive(Debug)]
pub struct GameOutput {
	pub game: String,
	pub records: Vec<PlayRecord>,
	/// Empty when the payload's boxscore could not be read.
	pub player_stats: Vec<PlayerGameStats>,
	pub stats: ParseStats,
	pub result: GameResult,
}

/// Settings applied to every game of a run.
#[derive(Debug, Clone)]
pub struct GameOverrides {
	pub season: Option<i32>,
	pub week: Option<u8>,
	pub season_type: String,
}

impl From<&Config> for GameOverrides {
	fn from(config: &Config) -> Self {
		Self {
			season: config.season,
			week: config.week,
			season_type: config.season_type.clone(),
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
	pub games_parsed: usize,
	pub games_failed: usize,
	pub plays_emitted: usize,
	pub plays_unparsed: usize,
	pub fields_defaulted: usize,
	pub player_stat_lines: usize,
}

impl BatchSummary {
	fn record(&mut self, game: &GameOutput) {
		self.games_parsed += 1;
		self.plays_emitted += game.records.len();
		self.plays_unparsed += game.stats.unparsed;
		self.fields_defaulted += game.stats.defaulted;
		self.player_stat_lines += game.player_stats.len();
	}
}

/// Saved payloads in `dir`, sorted by file name.
pub async fn payload_files(dir: &Path) -> Result<Vec<PathBuf>, PbpError> {
	let mut entries = tokio::fs::read_dir(dir).await.map_err(|err| PbpError::read(dir, err))?;
	let mut files = Vec::new();
	while let Some(entry) = entries.next_entry().await.map_err(|err| PbpError::read(dir, err))? {
		let path = entry.path();
		if path.extension().and_then(OsStr::to_str).is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
			files.push(path);
		}
	}
	files.sort();
	Ok(files)
}

/// The league's game id is the payload's file stem.
fn game_id(path: &Path) -> String {
	path.file_stem().and_then(OsStr::to_str).unwrap_or_default().to_string()
}

/// Parses one saved payload end to end. A broken boxscore is logged and
/// leaves the game without player stat lines.
pub fn parse_payload(game: &str, bytes: &[u8], overrides: &GameOverrides) -> Result<GameOutput, PbpError> {
	let payload = EventPayload::from_slice(bytes).map_err(|err| PbpError::feed(game, err))?;
	let season = overrides
		.season
		.or_else(|| season_from_event_time(&payload.header.event_time))
		.unwrap_or_else(|| default_season(Utc::now().date_naive()));
	let context = GameContext::from_payload(game, &payload, Some(season), overrides.week, &overrides.season_type).map_err(|err| PbpError::feed(game, err))?;
	let parsed = parse_game_to_end(&payload, &context).map_err(|err| PbpError::feed(game, err))?;
	let player_stats = parse_boxscore(&payload, &context).unwrap_or_else(|err| {
		warn!(game = %context.game_id, %err, "skipping boxscore");
		Vec::new()
	});

	Ok(GameOutput {
		game: context.game_id,
		records: parsed.records,
		player_stats,
		stats: parsed.stats,
		result: parsed.result,
	})
}

async fn load_game(path: PathBuf, overrides: GameOverrides) -> Result<GameOutput, PbpError> {
	let bytes = tokio::fs::read(&path).await.map_err(|err| PbpError::read(&path, err))?;
	let game = game_id(&path);
	tokio::task::spawn_blocking(move || parse_payload(&game, &bytes, &overrides)).await?
}

fn write_lines<W: Write, T: Serialize>(sink: &mut W, rows: &[T]) -> Result<(), PbpError> {
	for row in rows {
		serde_json::to_writer(&mut *sink, row)?;
		sink.write_all(b"\n")?;
	}
	Ok(())
}

/// Parses every payload under the configured directory and writes each
/// play as one JSON line to `plays` and each player's box score as one
/// JSON line to `player_stats`. A game that fails to parse is logged and
/// counted; the rest of the batch carries on.
pub async fn run<W: Write>(config: &Config, plays: &mut W, player_stats: &mut W) -> Result<BatchSummary, PbpError> {
	let files = payload_files(&config.input_dir).await?;
	info!(games = files.len(), dir = %config.input_dir.display(), "parsing saved event payloads");

	let mut games = stream::iter(files)
		.map(|path| load_game(path, GameOverrides::from(config)))
		.buffer_unordered(config.concurrency.max(1));

	let mut summary = BatchSummary::default();
	while let Some(outcome) = games.next().await {
		match outcome {
			Ok(game) => {
				write_lines(plays, &game.records)?;
				write_lines(player_stats, &game.player_stats)?;
				summary.record(&game);
				info!(
					game = %game.game,
					plays = game.stats.plays,
					unparsed = game.stats.unparsed,
					players = game.player_stats.len(),
					away = game.result.away_score,
					home = game.result.home_score,
					"parsed game"
				);
			}
			Err(err) => {
				summary.games_failed += 1;
				error!(%err, "skipping game");
			}
		}
	}
	plays.flush()?;
	player_stats.flush()?;
	Ok(summary)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	const GAME: &str = include_str!("../../ufl_play_parser/tests/fixtures/hou_at_dal.json");

	fn config(input_dir: &Path) -> Config {
		Config {
			input_dir: input_dir.to_path_buf(),
			output: None,
			stats_output: None,
			season: None,
			week: None,
			season_type: "REGULAR SEASON".to_string(),
			concurrency: 2,
			rust_log: "info".to_string(),
			log_json: false,
		}
	}

	fn overrides(season: Option<i32>, week: Option<u8>) -> GameOverrides {
		GameOverrides {
			season,
			week,
			season_type: "REGULAR SEASON".to_string(),
		}
	}

	fn json_lines(sink: Vec<u8>) -> Vec<serde_json::Value> {
		String::from_utf8(sink).unwrap().lines().map(|line| serde_json::from_str(line).unwrap()).collect()
	}

	#[tokio::test]
	async fn test_batch_skips_broken_games() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("4321.json"), GAME).unwrap();
		fs::write(dir.path().join("4322.json"), r#"{ "header": {} }"#).unwrap();
		fs::write(dir.path().join("notes.txt"), "not a payload").unwrap();

		let (mut plays, mut player_stats) = (Vec::new(), Vec::new());
		let summary = run(&config(dir.path()), &mut plays, &mut player_stats).await.unwrap();

		assert_eq!(
			summary,
			BatchSummary {
				games_parsed: 1,
				games_failed: 1,
				plays_emitted: 25,
				plays_unparsed: 1,
				fields_defaulted: summary.fields_defaulted,
				player_stat_lines: 12,
			}
		);
		let plays = json_lines(plays);
		assert_eq!(plays.len(), 25);
		assert_eq!(plays[0]["ufl_game_id"], "4321");
		assert_eq!(plays[0]["game_id"], "2024_03_HOU_DAL");

		let player_stats = json_lines(player_stats);
		assert_eq!(player_stats.len(), 12);
		assert_eq!(player_stats[0]["player_id"], "501");
		assert_eq!(player_stats[0]["team"], "HOU");
		assert_eq!(player_stats[0]["passing"]["cfb_rating"], 200.8);
		assert!(player_stats[0]["rushing"].is_null());
	}

	#[tokio::test]
	async fn test_missing_directory_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let result = run(&config(&dir.path().join("absent")), &mut Vec::<u8>::new(), &mut Vec::<u8>::new()).await;
		assert!(matches!(result, Err(PbpError::Read { .. })));
	}

	#[test]
	fn test_season_override() {
		let game = parse_payload("4321", GAME.as_bytes(), &overrides(Some(2025), None)).unwrap();
		assert_eq!(game.game, "2025_03_HOU_DAL");
		assert_eq!(game.result.total, 21);
	}

	#[test]
	fn test_week_override_covers_missing_canonical_url() {
		let without_url = GAME.replace("\"canonicalUrl\"", "\"pageUrl\"");
		assert!(matches!(parse_payload("4321", without_url.as_bytes(), &overrides(None, None)), Err(PbpError::Feed { .. })));

		let game = parse_payload("4321", without_url.as_bytes(), &overrides(None, Some(4))).unwrap();
		assert_eq!(game.game, "2024_04_HOU_DAL");
		assert_eq!(game.records.len(), 25);
	}

	#[test]
	fn test_broken_boxscore_keeps_plays() {
		let broken = GAME.replace("\"PUNTING\"", "\"BLOCKING\"");
		let game = parse_payload("4321", broken.as_bytes(), &overrides(None, None)).unwrap();
		assert_eq!(game.records.len(), 25);
		assert!(game.player_stats.is_empty());
	}
}
