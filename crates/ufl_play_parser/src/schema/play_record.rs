use crate::schema::drive::DriveRecord;
use crate::schema::game_clock::Half;
use crate::schema::play_details::PlayDetails;
use crate::schema::play_type::PlayType;
use crate::schema::teams::TeamSide;
use serde::Serialize;

/// Bumped whenever a column is added, removed or renamed.
pub const SCHEMA_VERSION: u16 = 1;

/// One flat output row per play.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayRecord {
	pub schema_version: u16,
	pub play_id: String,
	pub ufl_game_id: String,
	pub game_id: String,
	pub home_team: String,
	pub away_team: String,
	pub season_type: String,
	pub week: u8,
	pub season: i32,
	pub game_date: String,
	pub stadium: String,
	pub home_opening_kickoff: bool,

	pub posteam: String,
	pub posteam_type: TeamSide,
	pub defteam: String,
	pub side_of_field: Option<String>,
	pub yardline_100: Option<u8>,
	pub yrdln: String,
	pub down: u8,
	pub ydstogo: u8,
	pub goal_to_go: bool,

	pub quarter_num: u8,
	pub half_num: u8,
	pub game_half: Half,
	pub time: String,
	pub quarter_seconds_remaining: u16,
	pub half_seconds_remaining: u16,
	pub game_seconds_remaining: u16,
	pub quarter_end: bool,

	pub desc: String,
	pub play_type: PlayType,
	pub is_pass: bool,
	pub is_rush: bool,
	pub is_punt: bool,
	pub is_kickoff: bool,
	pub is_field_goal_attempt: bool,
	pub is_no_play: bool,
	pub is_special_teams_play: bool,
	pub is_unparsed: bool,
	pub parse_fault: Option<String>,

	pub home_timeouts_remaining: u8,
	pub away_timeouts_remaining: u8,
	pub posteam_timeouts_remaining: u8,
	pub defteam_timeouts_remaining: u8,

	/// Scores after the play.
	pub total_home_score: u16,
	pub total_away_score: u16,
	pub posteam_score: u16,
	pub defteam_score: u16,
	pub score_differential: i16,
	pub posteam_score_post: u16,
	pub defteam_score_post: u16,
	pub score_differential_post: i16,
	/// The feed flagged a score change on this play.
	pub sp: bool,
	pub td_team: Option<String>,

	pub is_first_down: bool,
	pub is_first_down_rush: bool,
	pub is_first_down_pass: bool,
	pub is_third_down_converted: bool,
	pub is_third_down_failed: bool,
	pub is_fourth_down_converted: bool,
	pub is_fourth_down_failed: bool,

	#[serde(flatten)]
	pub details: PlayDetails,

	#[serde(flatten)]
	pub drive: DriveColumns,
}

/// Drive-level values as they stood when the play was appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriveColumns {
	pub drive: u16,
	pub drive_id: String,
	pub fixed_drive_result: String,
	pub drive_play_count: u16,
	pub drive_yards: i16,
	pub drive_time_of_possession: String,
	pub drive_first_downs: u16,
	pub drive_inside20: bool,
	pub drive_ended_with_score: bool,
	pub drive_quarter_start: u8,
}

impl From<&DriveRecord> for DriveColumns {
	fn from(drive: &DriveRecord) -> Self {
		Self {
			drive: drive.drive,
			drive_id: drive.drive_id.clone(),
			fixed_drive_result: drive.fixed_drive_result.clone(),
			drive_play_count: drive.drive_play_count,
			drive_yards: drive.drive_yards,
			drive_time_of_possession: drive.drive_time_of_possession.clone(),
			drive_first_downs: drive.drive_first_downs,
			drive_inside20: drive.drive_inside20,
			drive_ended_with_score: drive.drive_ended_with_score,
			drive_quarter_start: drive.drive_quarter_start,
		}
	}
}

impl PlayRecord {
	/// Exactly one primary play-type flag is set on every record.
	pub fn primary_flag_count(&self) -> usize {
		[self.is_pass, self.is_rush, self.is_punt, self.is_kickoff, self.is_field_goal_attempt, self.is_no_play]
			.into_iter()
			.filter(|flag| *flag)
			.count()
	}
}
