use chrono::{Datelike, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use ufl_play_parser::schema::parse_week_title;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Parses saved UFL play-by-play feeds into JSON-lines play records", long_about = None)]
pub struct Config {
	/// Directory of saved `*.json` event payloads
	#[arg(long, env = "UFL_PBP_INPUT_DIR", default_value = "game_logs")]
	pub input_dir: PathBuf,

	/// JSON-lines destination; stdout when omitted
	#[arg(long, env = "UFL_PBP_OUTPUT")]
	pub output: Option<PathBuf>,

	/// JSON-lines destination for player box scores; not written when omitted
	#[arg(long, env = "UFL_STATS_OUTPUT")]
	pub stats_output: Option<PathBuf>,

	/// Season override; defaults to the kickoff year in each payload
	#[arg(long, env = "UFL_SEASON")]
	pub season: Option<i32>,

	/// Week override, as a number or a schedule title ("Week 3", "Playoffs");
	/// defaults to the week in each payload's canonical URL
	#[arg(long, env = "UFL_WEEK", value_parser = parse_week_title)]
	pub week: Option<u8>,

	#[arg(long, env = "UFL_SEASON_TYPE", default_value = "REGULAR SEASON")]
	pub season_type: String,

	/// Games parsed in parallel
	#[arg(long, env = "UFL_PBP_CONCURRENCY", default_value = "4")]
	pub concurrency: usize,

	/// Log level
	#[arg(long, env = "RUST_LOG", default_value = "info")]
	pub rust_log: String,

	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,
}

/// Season a game on `today` most likely belongs to. The league's season
/// opens at the end of March, so earlier dates count toward last year.
pub fn default_season(today: NaiveDate) -> i32 {
	if (today.month(), today.day()) >= (3, 28) {
		today.year()
	} else {
		today.year() - 1
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_season() {
		let test_cases = vec![((2025, 1, 15), 2024), ((2025, 3, 27), 2024), ((2025, 3, 28), 2025), ((2025, 11, 2), 2025)];

		for ((year, month, day), expected) in test_cases {
			let today = NaiveDate::from_ymd_opt(year, month, day).unwrap();
			assert_eq!(default_season(today), expected, "{today}");
		}
	}

	#[test]
	fn test_flags_parse() {
		let config = Config::try_parse_from(["ufl_pbp", "--input-dir", "saved", "--season", "2024", "--concurrency", "8", "--log-json"]).unwrap();
		assert_eq!(config.input_dir, PathBuf::from("saved"));
		assert_eq!(config.season, Some(2024));
		assert_eq!(config.concurrency, 8);
		assert!(config.log_json);
		assert_eq!(config.week, None);
	}

	#[test]
	fn test_week_flag_accepts_titles() {
		let test_cases = vec![("3", Some(3)), ("Week 7", Some(7)), ("Championship", Some(12)), ("Preseason", None)];

		for (input, expected) in test_cases {
			let config = Config::try_parse_from(["ufl_pbp", "--week", input]);
			assert_eq!(config.ok().and_then(|config| config.week), expected, "{input}");
		}
	}
}
