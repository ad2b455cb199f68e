//! Game orchestration: walks quarters, drives and plays in feed order and
//! yields one [`PlayRecord`] per play.

use crate::assembler::{assemble, PlayInput, StateChange};
use crate::error::FeedError;
use crate::feed::{EventPayload, Group, Play, Section};
use crate::parsers::extract::{extract, Extraction, PlaySituation};
use crate::parsers::play_type::classify;
use crate::schema::{
	is_untimed_down_heading, DownAndDistance, DriveRecord, DriveSummary, GameClock, GameContext, PlayCategory, PlayRecord, Quarter, ScoringEventType, TeamSide, YardLine,
};
use crate::tracker::GameState;
use std::slice::Iter;
use std::str::FromStr;
use tracing::{debug, warn};

/// Data-quality counters for one game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
	pub plays: usize,
	pub unparsed: usize,
	/// Numeric fields that fell back to a default.
	pub defaulted: usize,
}

/// Final score of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
	pub home_score: u16,
	pub away_score: u16,
	/// Home score minus away score.
	pub result: i32,
	pub total: u32,
}

/// Lazy, single-pass sequence of a game's play records.
///
/// A feed-shape error is yielded once and ends the sequence; per-play
/// faults are carried on the records themselves.
pub struct GamePlays<'a> {
	context: &'a GameContext,
	sections: Iter<'a, Section>,
	groups: Iter<'a, Group>,
	plays: Iter<'a, Play>,
	state: GameState,
	drive: Option<DriveRecord>,
	drives: Vec<DriveRecord>,
	drive_count: u16,
	stats: ParseStats,
	done: bool,
}

/// Starts parsing `payload`. Nothing is read until the sequence is polled.
pub fn parse_game<'a>(payload: &'a EventPayload, context: &'a GameContext) -> GamePlays<'a> {
	GamePlays {
		context,
		sections: payload.pbp.sections.iter(),
		groups: Iter::default(),
		plays: Iter::default(),
		state: GameState::new(context.teams.clone()),
		drive: None,
		drives: Vec::new(),
		drive_count: 0,
		stats: ParseStats::default(),
		done: false,
	}
}

/// A fully parsed game.
#[derive(Debug, Clone)]
pub struct ParsedGame {
	pub records: Vec<PlayRecord>,
	pub drives: Vec<DriveRecord>,
	pub stats: ParseStats,
	pub result: GameResult,
}

/// Drains [`parse_game`], failing on the first feed-shape error.
pub fn parse_game_to_end(payload: &EventPayload, context: &GameContext) -> Result<ParsedGame, FeedError> {
	let mut plays = parse_game(payload, context);
	let records = plays.by_ref().collect::<Result<Vec<_>, _>>()?;
	Ok(ParsedGame {
		records,
		stats: plays.stats,
		result: plays.result(),
		drives: plays.drives,
	})
}

impl GamePlays<'_> {
	pub const fn stats(&self) -> &ParseStats {
		&self.stats
	}

	/// Drives finished so far, in feed order.
	pub fn drives(&self) -> &[DriveRecord] {
		&self.drives
	}

	pub fn result(&self) -> GameResult {
		let home_score = self.state.score(TeamSide::Home);
		let away_score = self.state.score(TeamSide::Away);
		GameResult {
			home_score,
			away_score,
			result: i32::from(home_score) - i32::from(away_score),
			total: u32::from(home_score) + u32::from(away_score),
		}
	}

	fn finish_drive(&mut self) {
		if let Some(drive) = self.drive.take() {
			drive.finish(&self.context.game_id);
			self.drives.push(drive);
		}
	}

	/// A drive that carries over a quarter break appears again under the
	/// next section with the same id; it continues rather than restarts.
	fn enter_drive(&mut self, group: &Group) -> Result<(), FeedError> {
		let side = self.state.apply_drive_start(group.team_token()?)?;
		if self.drive.as_ref().is_some_and(|drive| drive.drive_id == group.id.as_str()) {
			return Ok(());
		}
		self.finish_drive();

		let summary = if group.subtitle.trim().is_empty() {
			DriveSummary::default()
		} else {
			DriveSummary::from_str(&group.subtitle)?
		};
		self.drive_count += 1;
		let teams = self.state.teams();
		let drive = DriveRecord::start(
			group.id.as_str(),
			self.drive_count,
			side,
			teams.abbr(side),
			teams.abbr(side.opponent()),
			&group.title,
			summary,
			self.state.quarter(),
		);
		debug!(game_id = %self.context.game_id, drive_id = %drive.drive_id, posteam = %drive.posteam, "drive start");
		self.drive = Some(drive);
		Ok(())
	}

	fn defaulted(&mut self, play: &Play, field: &'static str, reason: &str) {
		warn!(game_id = %self.context.game_id, play_id = %play.id, field, reason, "defaulting malformed play field");
		self.stats.defaulted += 1;
	}

	fn parse_play(&mut self, play: &Play) -> Result<PlayRecord, FeedError> {
		let description = play.play_description.trim();
		let quarter = Quarter::from_period(&play.period_of_play);

		if !play.time_of_play.trim().is_empty() {
			match GameClock::from_str(&play.time_of_play) {
				Ok(clock) => {
					self.state.apply_clock(quarter, clock);
				}
				Err(err) => self.defaulted(play, "time_of_play", &err.to_string()),
			}
		}

		let before = self.state.snapshot()?;
		let posteam = self.state.teams().abbr(before.possession).to_string();
		let defteam = self.state.teams().abbr(before.possession.opponent()).to_string();

		let yard_line = match play.subtitle.trim() {
			"" => None,
			text => match YardLine::from_str(text) {
				Ok(yard_line) => Some(yard_line),
				Err(err) => {
					self.defaulted(play, "yardline_100", &err.to_string());
					None
				}
			},
		};
		let yardline_100 = yard_line.as_ref().map(|yard_line| yard_line.yardline_100(&posteam));

		let down_and_distance = if is_untimed_down_heading(&play.title) {
			None
		} else {
			match DownAndDistance::from_str(&play.title) {
				Ok(down_and_distance) => Some(down_and_distance),
				Err(err) => {
					self.defaulted(play, "down", &err.to_string());
					None
				}
			}
		};
		let down = down_and_distance.map_or(0, |dd| dd.down.number());
		let yards_to_go = down_and_distance.map_or(0, |dd| dd.yards_to_go(yardline_100));

		let (category, classify_fault) = match classify(description, &play.title) {
			Ok(category) => (Some(category), None),
			Err(err) => {
				warn!(game_id = %self.context.game_id, play_id = %play.id, description, "unparsed play");
				(None, Some(err))
			}
		};

		let situation = PlaySituation {
			posteam,
			defteam,
			down,
			yards_to_go,
			yardline_100,
		};
		let extraction = category.map(|category| extract(category, description, &situation)).unwrap_or_default();
		for fault in &extraction.faults {
			warn!(game_id = %self.context.game_id, play_id = %play.id, description, %fault, "partially parsed play");
		}

		let scoring_side = self.apply_play(play, category, &extraction);
		let states = StateChange {
			before,
			after: self.state.snapshot()?,
			home_opening_kickoff: self.state.home_opening_kickoff(),
		};

		let input = PlayInput {
			play_id: play.id.to_string(),
			description: description.to_string(),
			quarter,
			time: play.time_of_play.trim().to_string(),
			down,
			yards_to_go,
			yardline_100,
			yrdln: play.subtitle.trim().to_string(),
			side_of_field: yard_line.map(|yard_line| yard_line.side_of_field().to_string()),
			scoring_side,
			category,
			classify_fault,
		};

		self.stats.plays += 1;
		self.stats.defaulted += usize::from(extraction.defaulted);
		let drive = self.drive.as_mut().ok_or(FeedError::MissingField { field: "pbp.sections[].groups[]" })?;
		let record = assemble(self.context, &states, drive, &input, extraction);
		if record.is_unparsed {
			self.stats.unparsed += 1;
		}
		Ok(record)
	}

	/// Applies the play's timeout, score change and kickoff to the tracker.
	/// Returns the side credited with a score change.
	fn apply_play(&mut self, play: &Play, category: Option<PlayCategory>, extraction: &Extraction) -> Option<TeamSide> {
		if let Some(side) = extraction.details.timeout_team.as_deref().and_then(|team| self.state.teams().side_of_abbr(team)) {
			self.state.apply_timeout(side);
		}

		let scoring_side = if play.left_team_score_change {
			Some(TeamSide::Away)
		} else if play.right_team_score_change {
			Some(TeamSide::Home)
		} else {
			None
		};
		if let Some(side) = scoring_side {
			match ScoringEventType::infer(category, &play.play_description) {
				Ok(event) => self.state.apply_score_change(side, event.points().value()),
				Err(err) => warn!(game_id = %self.context.game_id, play_id = %play.id, %err, "score change credited no points"),
			}
		}

		if category == Some(PlayCategory::Kickoff) {
			if let Some(receiving) = self.state.possession() {
				self.state.apply_kickoff(receiving);
			}
		}
		scoring_side
	}
}

impl Iterator for GamePlays<'_> {
	type Item = Result<PlayRecord, FeedError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}
		loop {
			if let Some(play) = self.plays.next() {
				let record = self.parse_play(play);
				self.done = record.is_err();
				return Some(record);
			}
			if let Some(group) = self.groups.next() {
				if let Err(err) = self.enter_drive(group) {
					self.done = true;
					return Some(Err(err));
				}
				self.plays = group.plays.iter();
				continue;
			}
			if let Some(section) = self.sections.next() {
				if let Err(err) = self.state.apply_quarter_boundary(&section.title) {
					self.done = true;
					return Some(Err(err));
				}
				self.groups = section.groups.iter();
				continue;
			}
			self.finish_drive();
			self.done = true;
			return None;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::{GameTeams, PlayType};

	fn payload(sections: &str) -> EventPayload {
		let json = format!(
			r#"{{
				"header": {{
					"leftTeam": {{ "name": "HOU", "entityLink": {{ "layout": {{ "tokens": {{ "id": 10 }} }} }} }},
					"rightTeam": {{ "name": "DAL", "entityLink": {{ "layout": {{ "tokens": {{ "id": "20" }} }} }} }},
					"venueName": "Choctaw Stadium",
					"eventTime": "2024-04-13T23:00:00Z"
				}},
				"pbp": {{ "sections": [{sections}] }}
			}}"#
		);
		EventPayload::from_str(&json).unwrap()
	}

	fn context(payload: &EventPayload) -> GameContext {
		GameContext::new("4321", 2024, 3, "REGULAR SEASON", GameTeams::from_header(&payload.header), "Choctaw Stadium", "2024-04-13T23:00:00Z")
	}

	fn play(id: &str, title: &str, subtitle: &str, time: &str, description: &str) -> String {
		format!(r#"{{ "id": "{id}", "title": "{title}", "subtitle": "{subtitle}", "timeOfPlay": "{time}", "playDescription": "{description}" }}"#)
	}

	fn group(id: &str, team: &str, plays: &[String]) -> String {
		format!(
			r#"{{ "id": "{id}", "title": "Punt", "subtitle": "{} plays · 10 yards · 2:00", "entityLink": {{ "layout": {{ "tokens": {{ "id": "{team}" }} }} }}, "plays": [{}] }}"#,
			plays.len(),
			plays.join(",")
		)
	}

	#[test]
	fn test_unknown_section_title_ends_the_game() {
		let payload = payload(r#"{ "title": "HALFTIME", "groups": [] }"#);
		let context = context(&payload);
		let mut plays = parse_game(&payload, &context);
		assert!(matches!(plays.next(), Some(Err(FeedError::Clock(_)))));
		assert!(plays.next().is_none());
	}

	#[test]
	fn test_unknown_team_token_ends_the_game() {
		let drive = group("d1", "99", &[play("p1", "1st and 10", "DAL 25", "15:00", "A.Back rushed up the middle for 3 yards.")]);
		let payload = payload(&format!(r#"{{ "title": "1ST QUARTER", "groups": [{drive}] }}"#));
		let context = context(&payload);
		let result = parse_game_to_end(&payload, &context);
		assert!(matches!(result, Err(FeedError::UnknownTeamToken { token }) if token == "99"));
	}

	#[test]
	fn test_timeout_charges_the_named_team() {
		let drive = group(
			"d1",
			"20",
			&[
				play("p1", "1st and 10", "DAL 25", "14:10", "A.Back rushed up the middle to DAL 28 for 3 yards."),
				play("p2", "", "", "13:40", "Timeout #1 by DAL."),
			],
		);
		let payload = payload(&format!(r#"{{ "title": "1ST QUARTER", "groups": [{drive}] }}"#));
		let context = context(&payload);
		let game = parse_game_to_end(&payload, &context).unwrap();

		let timeout = &game.records[1];
		assert!(timeout.details.flags.is_timeout);
		assert_eq!(timeout.details.timeout_team.as_deref(), Some("DAL"));
		assert_eq!((timeout.home_timeouts_remaining, timeout.away_timeouts_remaining), (2, 3));
		assert_eq!(timeout.play_type, PlayType::NoPlay);
		assert_eq!(game.stats.plays, 2);
		assert_eq!(game.drives.len(), 1);
		assert_eq!(game.drives[0].plays_seen, 2);
	}

	#[test]
	fn test_unparsed_play_does_not_stop_the_game() {
		let drive = group(
			"d1",
			"10",
			&[
				play("p1", "1st and 10", "HOU 25", "15:00", "Huddle break"),
				play("p2", "2nd and 10", "HOU 25", "14:30", "A.Back rushed up the middle to HOU 30 for 5 yards."),
			],
		);
		let payload = payload(&format!(r#"{{ "title": "1ST QUARTER", "groups": [{drive}] }}"#));
		let context = context(&payload);
		let game = parse_game_to_end(&payload, &context).unwrap();

		assert_eq!(game.stats, ParseStats { plays: 2, unparsed: 1, defaulted: 0 });
		assert!(game.records[0].is_unparsed);
		assert_eq!(game.records[0].play_type, PlayType::Unparsed);
		assert_eq!(game.records[1].details.yards_gained, 5);
	}

	#[test]
	fn test_malformed_clock_is_defaulted() {
		let drive = group("d1", "10", &[play("p1", "1st and 10", "HOU 25", "9:99", "A.Back rushed up the middle to HOU 30 for 5 yards.")]);
		let payload = payload(&format!(r#"{{ "title": "2ND QUARTER", "groups": [{drive}] }}"#));
		let context = context(&payload);
		let game = parse_game_to_end(&payload, &context).unwrap();
		assert_eq!(game.stats.defaulted, 1);
		assert_eq!(game.records[0].quarter_num, 2);
	}
}
