use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GameClockError {
	#[error("Unhandled quarter name {title}")]
	InvalidQuarter { title: String },

	#[error("Invalid minutes: {minutes}, must be between 0 and 15")]
	InvalidMinutes { minutes: u8 },

	#[error("Invalid seconds: {seconds}, must be between 0 and 59")]
	InvalidSeconds { seconds: u8 },

	#[error("Invalid time format: {time}")]
	InvalidTimeFormat { time: String },

	#[error("Parse error occurred for number: {source}")]
	ParseError {
		#[from]
		source: ParseIntError,
	},
}

impl GameClockError {
	pub fn invalid_quarter_error(title: &str) -> Self {
		Self::InvalidQuarter { title: title.to_string() }
	}

	pub const fn invalid_minutes_error(minutes: u8) -> Self {
		Self::InvalidMinutes { minutes }
	}

	pub const fn invalid_seconds_error(seconds: u8) -> Self {
		Self::InvalidSeconds { seconds }
	}

	pub fn invalid_time_format_error(time: &str) -> Self {
		Self::InvalidTimeFormat { time: time.to_string() }
	}
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DownAndDistanceError {
	#[error("Invalid down and distance format: {input}")]
	InvalidFormat { input: String },

	#[error("Invalid down: {down}")]
	InvalidDown { down: String },

	#[error("Invalid distance: {distance}")]
	InvalidDistance { distance: String },
}

impl DownAndDistanceError {
	pub fn invalid_format(input: &str) -> Self {
		Self::InvalidFormat { input: input.to_string() }
	}
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum YardsError {
	#[error("Invalid yard line value: {value}, must be between 0 and 50")]
	InvalidYardLine { value: u8 },

	#[error("Invalid yard line description: {0}")]
	InvalidYardLineFormat(String),

	#[error("Invalid yards description: {0}")]
	InvalidYardsFormat(String),

	#[error("Yardage {value} is longer than the field")]
	YardsOutOfRange { value: i16 },

	#[error("No yards information found in the play description")]
	NoYardsInfo,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ScoringEventError {
	#[error("Unable to determine scoring event type from: {input}")]
	UnknownScoringEventType { input: String },
}

/// Faults that abort parsing of a whole game.
#[derive(Debug, Error)]
pub enum FeedError {
	#[error(transparent)]
	Clock(#[from] GameClockError),

	#[error("Unhandled team ID {token}")]
	UnknownTeamToken { token: String },

	#[error("Missing expected feed field `{field}`")]
	MissingField { field: &'static str },

	#[error("Invalid drive summary: {input}")]
	InvalidDriveSummary { input: String },

	#[error("Invalid week: {input}")]
	InvalidWeek { input: String },

	#[error("Malformed event payload: {0}")]
	Json(#[from] serde_json::Error),
}

impl FeedError {
	pub fn unknown_team_token(token: &str) -> Self {
		Self::UnknownTeamToken { token: token.to_string() }
	}

	pub fn invalid_drive_summary(input: &str) -> Self {
		Self::InvalidDriveSummary { input: input.to_string() }
	}

	pub fn invalid_week(input: &str) -> Self {
		Self::InvalidWeek { input: input.to_string() }
	}
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ClassifyError {
	#[error("Unable to determine play type from: {description}")]
	UnrecognizedTemplate { description: String },
}

impl ClassifyError {
	pub fn unrecognized(description: &str) -> Self {
		Self::UnrecognizedTemplate {
			description: description.to_string(),
		}
	}
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ExtractError {
	#[error("No {category} sentence template matched: {description}")]
	TemplateMiss { category: &'static str, description: String },

	#[error("Unrecognized team `{team}` in: {description}")]
	UnknownTeam { team: String, description: String },
}

impl ExtractError {
	pub fn template_miss(category: &'static str, description: &str) -> Self {
		Self::TemplateMiss {
			category,
			description: description.to_string(),
		}
	}

	pub fn unknown_team(team: &str, description: &str) -> Self {
		Self::UnknownTeam {
			team: team.to_string(),
			description: description.to_string(),
		}
	}
}

/// Per-play faults. These never abort a game; the play is emitted with
/// `is_unparsed` set and the fault text attached.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PlayByPlayError {
	#[error("Play type error: {0}")]
	Classify(#[from] ClassifyError),

	#[error("Extraction error: {0}")]
	Extract(#[from] ExtractError),
}

/// Faults in a payload's boxscore. They spoil the player stat lines of
/// that game only; the play-by-play is unaffected.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BoxscoreError {
	#[error("Payload has no boxscore")]
	Missing,

	#[error("Unhandled boxscore section {title}")]
	UnknownSection { title: String },

	#[error("Unhandled stat table {title}")]
	UnknownTable { title: String },

	#[error("{table} row is missing column {index}")]
	MissingColumn { table: &'static str, index: usize },

	#[error("{table} row has no player link")]
	MissingPlayer { table: &'static str },

	#[error("Invalid {table} value `{text}`")]
	InvalidValue { table: &'static str, text: String },
}

impl BoxscoreError {
	pub fn unknown_section(title: &str) -> Self {
		Self::UnknownSection { title: title.to_string() }
	}

	pub fn unknown_table(title: &str) -> Self {
		Self::UnknownTable { title: title.to_string() }
	}

	pub fn invalid_value(table: &'static str, text: &str) -> Self {
		Self::InvalidValue { table, text: text.to_string() }
	}
}
