use crate::error::FeedError;
use crate::schema::game_clock::Quarter;
use crate::schema::teams::TeamSide;
use serde::Serialize;
use std::str::FromStr;
use tracing::warn;

/// Drive subtitle: "8 plays · 75 yards · 4:12". Some payloads carry the
/// separator mis-encoded as "Â·".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriveSummary {
	pub play_count: u16,
	pub yards: i16,
	pub time_of_possession: String,
}

impl FromStr for DriveSummary {
	type Err = FeedError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.replace("Â·", "·");
		let parts: Vec<&str> = normalized.split('·').map(str::trim).collect();
		let [plays, yards, time] = parts.as_slice() else {
			return Err(FeedError::invalid_drive_summary(s));
		};

		let leading_number = |part: &str| part.split_whitespace().next().map(str::to_string);
		let play_count = leading_number(*plays)
			.and_then(|n| n.parse::<u16>().ok())
			.ok_or_else(|| FeedError::invalid_drive_summary(s))?;
		let yards = leading_number(*yards)
			.and_then(|n| n.parse::<i16>().ok())
			.ok_or_else(|| FeedError::invalid_drive_summary(s))?;

		Ok(Self {
			play_count,
			yards,
			time_of_possession: (*time).to_string(),
		})
	}
}

/// Running state of one drive. Counters reflect the plays appended so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriveRecord {
	pub drive_id: String,
	/// Sequential drive number within the game, starting at 1.
	pub drive: u16,
	pub posteam: String,
	pub posteam_type: TeamSide,
	pub defteam: String,
	pub fixed_drive_result: String,
	pub drive_play_count: u16,
	pub drive_yards: i16,
	pub drive_time_of_possession: String,
	pub drive_quarter_start: u8,
	pub drive_quarter_end: u8,
	pub plays_seen: u16,
	pub drive_first_downs: u16,
	pub drive_inside20: bool,
	pub drive_ended_with_score: bool,
}

impl DriveRecord {
	#[allow(clippy::too_many_arguments)]
	pub fn start(drive_id: &str, drive: u16, side: TeamSide, posteam: &str, defteam: &str, result: &str, summary: DriveSummary, quarter: Quarter) -> Self {
		Self {
			drive_id: drive_id.to_string(),
			drive,
			posteam: posteam.to_string(),
			posteam_type: side,
			defteam: defteam.to_string(),
			fixed_drive_result: result.trim().to_string(),
			drive_play_count: summary.play_count,
			drive_yards: summary.yards,
			drive_time_of_possession: summary.time_of_possession,
			drive_quarter_start: quarter.number(),
			drive_quarter_end: quarter.number(),
			plays_seen: 0,
			drive_first_downs: 0,
			drive_inside20: false,
			drive_ended_with_score: false,
		}
	}

	/// An in-progress drive has no summary, so any count is accepted.
	pub const fn play_count_matches(&self) -> bool {
		self.drive_play_count == 0 || self.plays_seen == self.drive_play_count
	}

	/// Compares the feed's play count with the plays actually seen.
	pub fn finish(&self, game_id: &str) {
		if !self.play_count_matches() {
			warn!(
				game_id,
				drive_id = %self.drive_id,
				feed_play_count = self.drive_play_count,
				plays_seen = self.plays_seen,
				"drive play count differs from feed summary"
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_drive_summary_from_str() {
		let test_cases = vec![
			("8 plays · 75 yards · 4:12", Some((8, 75, "4:12"))),
			("3 plays Â· -4 yards Â· 1:05", Some((3, -4, "1:05"))),
			("1 play · 0 yards · 0:06", Some((1, 0, "0:06"))),
			("8 plays, 75 yards", None),
			("many plays · 75 yards · 4:12", None),
		];

		for (input, expected) in test_cases {
			let actual = DriveSummary::from_str(input).ok();
			let actual = actual.as_ref().map(|s| (s.play_count, s.yards, s.time_of_possession.as_str()));
			assert_eq!(actual, expected, "{input}");
		}
	}

	#[test]
	fn test_drive_start_uses_quarter() {
		let summary = DriveSummary::from_str("2 plays · 9 yards · 0:48").unwrap();
		let drive = DriveRecord::start("d-4", 4, TeamSide::Home, "NYG", "CHI", " Punt ", summary, Quarter::Third);
		assert_eq!(drive.fixed_drive_result, "Punt");
		assert_eq!(drive.drive_quarter_start, 3);
		assert_eq!(drive.drive_play_count, 2);
		assert_eq!(drive.plays_seen, 0);
	}

	#[test]
	fn test_play_count_matches() {
		let test_cases = vec![("3 plays · 12 yards · 1:10", 3, true), ("3 plays · 12 yards · 1:10", 2, false), ("4 plays · 12 yards · 1:10", 5, false)];

		for (subtitle, plays_seen, expected) in test_cases {
			let summary = DriveSummary::from_str(subtitle).unwrap();
			let mut drive = DriveRecord::start("d-1", 1, TeamSide::Away, "HOU", "DAL", "Punt", summary, Quarter::First);
			drive.plays_seen = plays_seen;
			assert_eq!(drive.play_count_matches(), expected, "{subtitle} / {plays_seen}");
		}

		let mut in_progress = DriveRecord::start("d-2", 2, TeamSide::Home, "DAL", "HOU", "", DriveSummary::default(), Quarter::Fourth);
		in_progress.plays_seen = 2;
		assert!(in_progress.play_count_matches());
	}
}
