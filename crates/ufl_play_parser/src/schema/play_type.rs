use serde::Serialize;
use std::fmt;

/// Point value of a try after touchdown. The league scores one, two or
/// three points depending on the distance the try is run from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionPoints {
	One,
	Two,
	Three,
}

impl ConversionPoints {
	pub const fn value(self) -> u8 {
		match self {
			Self::One => 1,
			Self::Two => 2,
			Self::Three => 3,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConversionMethod {
	Pass,
	Run,
	Kick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoPlayKind {
	/// Play wiped out by an accepted penalty.
	Nullified,
	Timeout,
	TvTimeout,
	ReplayTimeout,
	QuarterEnd,
	TwoMinuteWarning,
	GameEnd,
}

/// Closed set of play categories a description can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCategory {
	Pass,
	QbSpike,
	Run,
	QbKneel,
	QbScramble,
	FieldGoal,
	Kickoff,
	Punt,
	ConversionAttempt { points: ConversionPoints, method: ConversionMethod },
	NoPlay(NoPlayKind),
	/// A snap that never developed; `dropback` tells a pass from a rush.
	AbortedPlay { dropback: bool },
	PenaltyOnly,
}

/// The one primary bucket every record falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryPlayType {
	Pass,
	Rush,
	Punt,
	Kickoff,
	FieldGoalAttempt,
	NoPlay,
}

/// Output label of a play, as written into `play_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayType {
	Pass,
	Run,
	QbSpike,
	QbKneel,
	FieldGoal,
	ExtraPoint,
	Kickoff,
	Punt,
	NoPlay,
	Unparsed,
}

impl fmt::Display for PlayType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Pass => "pass",
			Self::Run => "run",
			Self::QbSpike => "qb_spike",
			Self::QbKneel => "qb_kneel",
			Self::FieldGoal => "field_goal",
			Self::ExtraPoint => "extra_point",
			Self::Kickoff => "kickoff",
			Self::Punt => "punt",
			Self::NoPlay => "no_play",
			Self::Unparsed => "unparsed",
		};
		f.write_str(label)
	}
}

impl PlayCategory {
	pub const fn play_type(self) -> PlayType {
		match self {
			Self::Pass | Self::AbortedPlay { dropback: true } => PlayType::Pass,
			Self::Run | Self::QbScramble | Self::AbortedPlay { dropback: false } => PlayType::Run,
			Self::QbSpike => PlayType::QbSpike,
			Self::QbKneel => PlayType::QbKneel,
			Self::FieldGoal => PlayType::FieldGoal,
			Self::Kickoff => PlayType::Kickoff,
			Self::Punt => PlayType::Punt,
			Self::ConversionAttempt { method, .. } => match method {
				ConversionMethod::Pass => PlayType::Pass,
				ConversionMethod::Run => PlayType::Run,
				ConversionMethod::Kick => PlayType::ExtraPoint,
			},
			Self::NoPlay(_) | Self::PenaltyOnly => PlayType::NoPlay,
		}
	}

	pub const fn primary(self) -> PrimaryPlayType {
		match self {
			Self::Pass | Self::QbSpike | Self::AbortedPlay { dropback: true } => PrimaryPlayType::Pass,
			Self::Run | Self::QbKneel | Self::QbScramble | Self::AbortedPlay { dropback: false } => PrimaryPlayType::Rush,
			Self::Punt => PrimaryPlayType::Punt,
			Self::Kickoff => PrimaryPlayType::Kickoff,
			Self::FieldGoal => PrimaryPlayType::FieldGoalAttempt,
			Self::ConversionAttempt { method, .. } => match method {
				ConversionMethod::Pass => PrimaryPlayType::Pass,
				ConversionMethod::Run => PrimaryPlayType::Rush,
				ConversionMethod::Kick => PrimaryPlayType::FieldGoalAttempt,
			},
			Self::NoPlay(_) | Self::PenaltyOnly => PrimaryPlayType::NoPlay,
		}
	}

	/// Plays from scrimmage that count toward down conversions.
	pub const fn is_scrimmage(self) -> bool {
		matches!(
			self,
			Self::Pass | Self::QbSpike | Self::Run | Self::QbKneel | Self::QbScramble | Self::AbortedPlay { .. }
		)
	}

	pub const fn is_special_teams(self) -> bool {
		matches!(
			self,
			Self::FieldGoal | Self::Kickoff | Self::Punt | Self::ConversionAttempt { method: ConversionMethod::Kick, .. }
		)
	}

	/// Stable category name used in fault messages and logs.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Pass => "pass",
			Self::QbSpike => "qb_spike",
			Self::Run => "run",
			Self::QbKneel => "qb_kneel",
			Self::QbScramble => "qb_scramble",
			Self::FieldGoal => "field_goal",
			Self::Kickoff => "kickoff",
			Self::Punt => "punt",
			Self::ConversionAttempt { .. } => "conversion",
			Self::NoPlay(NoPlayKind::Timeout) => "timeout",
			Self::NoPlay(_) => "no_play",
			Self::AbortedPlay { .. } => "aborted",
			Self::PenaltyOnly => "penalty",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_play_type_labels() {
		let test_cases = vec![
			(PlayCategory::Pass, "pass", PrimaryPlayType::Pass),
			(PlayCategory::QbScramble, "run", PrimaryPlayType::Rush),
			(PlayCategory::QbKneel, "qb_kneel", PrimaryPlayType::Rush),
			(PlayCategory::AbortedPlay { dropback: true }, "pass", PrimaryPlayType::Pass),
			(PlayCategory::AbortedPlay { dropback: false }, "run", PrimaryPlayType::Rush),
			(
				PlayCategory::ConversionAttempt {
					points: ConversionPoints::One,
					method: ConversionMethod::Kick,
				},
				"extra_point",
				PrimaryPlayType::FieldGoalAttempt,
			),
			(
				PlayCategory::ConversionAttempt {
					points: ConversionPoints::Three,
					method: ConversionMethod::Pass,
				},
				"pass",
				PrimaryPlayType::Pass,
			),
			(PlayCategory::NoPlay(NoPlayKind::QuarterEnd), "no_play", PrimaryPlayType::NoPlay),
			(PlayCategory::PenaltyOnly, "no_play", PrimaryPlayType::NoPlay),
		];

		for (category, label, primary) in test_cases {
			assert_eq!(category.play_type().to_string(), label, "{category:?}");
			assert_eq!(category.primary(), primary, "{category:?}");
		}
	}

	#[test]
	fn test_play_type_serializes_snake_case() {
		assert_eq!(serde_json::to_string(&PlayType::QbSpike).unwrap(), "\"qb_spike\"");
		assert_eq!(serde_json::to_string(&PlayType::Unparsed).unwrap(), "\"unparsed\"");
	}
}
