//! Combines game context, tracker snapshots and extracted details into one
//! [`PlayRecord`], updating the running drive as it goes.

use crate::error::{ClassifyError, PlayByPlayError};
use crate::parsers::extract::Extraction;
use crate::schema::{DriveColumns, DriveRecord, GameContext, NoPlayKind, PlayCategory, PlayRecord, PlayType, PrimaryPlayType, Quarter, TeamSide, SCHEMA_VERSION};
use crate::tracker::StateSnapshot;

/// Tracker state around one play.
#[derive(Debug, Clone, Copy)]
pub struct StateChange {
	pub before: StateSnapshot,
	pub after: StateSnapshot,
	pub home_opening_kickoff: bool,
}

/// Feed facts about one play, already normalized.
#[derive(Debug, Clone, Default)]
pub struct PlayInput {
	pub play_id: String,
	pub description: String,
	pub quarter: Option<Quarter>,
	pub time: String,
	pub down: u8,
	pub yards_to_go: u8,
	pub yardline_100: Option<u8>,
	pub yrdln: String,
	pub side_of_field: Option<String>,
	/// Side the feed credited with a score change on this play.
	pub scoring_side: Option<TeamSide>,
	/// `None` when no classifier rule accepted the description.
	pub category: Option<PlayCategory>,
	pub classify_fault: Option<ClassifyError>,
}

fn differential(ours: u16, theirs: u16) -> i16 {
	let diff = i32::from(ours) - i32::from(theirs);
	i16::try_from(diff).unwrap_or(if diff < 0 { i16::MIN } else { i16::MAX })
}

/// Builds the record for `play` and folds it into `drive`.
pub fn assemble(context: &GameContext, states: &StateChange, drive: &mut DriveRecord, play: &PlayInput, extraction: Extraction) -> PlayRecord {
	let StateChange { before, after, .. } = *states;
	let teams = &context.teams;
	let posteam_side = before.possession;
	let defteam_side = posteam_side.opponent();
	let details = extraction.details;

	let primary = play.category.map_or(PrimaryPlayType::NoPlay, PlayCategory::primary);
	let play_type = play.category.map_or(PlayType::Unparsed, PlayCategory::play_type);
	let scrimmage = play.category.is_some_and(PlayCategory::is_scrimmage);

	let faults: Vec<String> = play
		.classify_fault
		.iter()
		.cloned()
		.map(PlayByPlayError::from)
		.chain(extraction.faults.iter().cloned().map(PlayByPlayError::from))
		.map(|fault| fault.to_string())
		.collect();
	let parse_fault = (!faults.is_empty()).then(|| faults.join("; "));

	let turnover = details.flags.is_interception || details.fumbles.is_fumble_lost;
	let gained = scrimmage && play.down > 0 && !turnover && details.yards_gained >= i16::from(play.yards_to_go);
	let is_first_down_rush = gained && primary == PrimaryPlayType::Rush;
	let is_first_down_pass = gained && primary == PrimaryPlayType::Pass;
	let is_first_down = is_first_down_rush || is_first_down_pass || details.flags.is_first_down_penalty;
	let converted = scrimmage && details.yards_gained >= i16::from(play.yards_to_go);

	let td_team = play
		.scoring_side
		.filter(|_| details.flags.is_touchdown)
		.map(|side| teams.abbr(side).to_string());

	drive.plays_seen += 1;
	drive.drive_first_downs += u16::from(is_first_down);
	drive.drive_inside20 |= scrimmage && play.yardline_100.is_some_and(|ydl| ydl <= 20);
	drive.drive_ended_with_score |= play.scoring_side == Some(drive.posteam_type);
	let quarter = play.quarter.unwrap_or(before.quarter);
	drive.drive_quarter_end = quarter.number();

	let half = quarter.half();
	let posteam_score = before.score(posteam_side);
	let defteam_score = before.score(defteam_side);
	let posteam_score_post = after.score(posteam_side);
	let defteam_score_post = after.score(defteam_side);

	PlayRecord {
		schema_version: SCHEMA_VERSION,
		play_id: play.play_id.clone(),
		ufl_game_id: context.ufl_game_id.clone(),
		game_id: context.game_id.clone(),
		home_team: teams.abbr(TeamSide::Home).to_string(),
		away_team: teams.abbr(TeamSide::Away).to_string(),
		season_type: context.season_type.clone(),
		week: context.week,
		season: context.season,
		game_date: context.game_date.clone(),
		stadium: context.stadium.clone(),
		home_opening_kickoff: states.home_opening_kickoff,
		posteam: teams.abbr(posteam_side).to_string(),
		posteam_type: posteam_side,
		defteam: teams.abbr(defteam_side).to_string(),
		side_of_field: play.side_of_field.clone(),
		yardline_100: play.yardline_100,
		yrdln: play.yrdln.clone(),
		down: play.down,
		ydstogo: play.yards_to_go,
		goal_to_go: play.down > 0 && play.yardline_100 == Some(play.yards_to_go),
		quarter_num: quarter.number(),
		half_num: half.number(),
		game_half: half,
		time: play.time.clone(),
		quarter_seconds_remaining: before.clock.quarter_seconds_remaining,
		half_seconds_remaining: before.clock.half_seconds_remaining,
		game_seconds_remaining: before.clock.game_seconds_remaining,
		quarter_end: play.category == Some(PlayCategory::NoPlay(NoPlayKind::QuarterEnd)),
		desc: play.description.clone(),
		play_type,
		is_pass: primary == PrimaryPlayType::Pass,
		is_rush: primary == PrimaryPlayType::Rush,
		is_punt: primary == PrimaryPlayType::Punt,
		is_kickoff: primary == PrimaryPlayType::Kickoff,
		is_field_goal_attempt: primary == PrimaryPlayType::FieldGoalAttempt,
		is_no_play: primary == PrimaryPlayType::NoPlay,
		is_special_teams_play: play.category.is_some_and(PlayCategory::is_special_teams),
		is_unparsed: parse_fault.is_some(),
		parse_fault,
		home_timeouts_remaining: after.timeouts(TeamSide::Home),
		away_timeouts_remaining: after.timeouts(TeamSide::Away),
		posteam_timeouts_remaining: after.timeouts(posteam_side),
		defteam_timeouts_remaining: after.timeouts(defteam_side),
		total_home_score: after.score(TeamSide::Home),
		total_away_score: after.score(TeamSide::Away),
		posteam_score,
		defteam_score,
		score_differential: differential(posteam_score, defteam_score),
		posteam_score_post,
		defteam_score_post,
		score_differential_post: differential(posteam_score_post, defteam_score_post),
		sp: play.scoring_side.is_some(),
		td_team,
		is_first_down,
		is_first_down_rush,
		is_first_down_pass,
		is_third_down_converted: play.down == 3 && converted,
		is_third_down_failed: play.down == 3 && scrimmage && !converted,
		is_fourth_down_converted: play.down == 4 && converted,
		is_fourth_down_failed: play.down == 4 && scrimmage && !converted,
		details,
		drive: DriveColumns::from(&*drive),
	}
}
