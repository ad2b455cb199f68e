use crate::error::FeedError;
use crate::feed::EventPayload;
use crate::schema::teams::{GameTeams, TeamSide};
use chrono::{DateTime, Datelike};

pub const REGULAR_SEASON: &str = "REGULAR SEASON";
pub const PLAYOFF_WEEK: u8 = 11;
pub const CHAMPIONSHIP_WEEK: u8 = 12;

/// Game-level facts shared by every record of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameContext {
	/// The feed's own event identifier.
	pub ufl_game_id: String,
	/// `{season}_{week:02}_{away}_{home}`.
	pub game_id: String,
	pub season: i32,
	pub week: u8,
	pub season_type: String,
	pub teams: GameTeams,
	pub stadium: String,
	/// Raw kickoff timestamp from the feed.
	pub game_date: String,
}

impl GameContext {
	pub fn new(ufl_game_id: &str, season: i32, week: u8, season_type: &str, teams: GameTeams, stadium: &str, game_date: &str) -> Self {
		let game_id = format!("{season}_{week:02}_{}_{}", teams.abbr(TeamSide::Away), teams.abbr(TeamSide::Home));
		Self {
			ufl_game_id: ufl_game_id.to_string(),
			game_id,
			season,
			week,
			season_type: season_type.to_string(),
			teams,
			stadium: stadium.to_string(),
			game_date: game_date.to_string(),
		}
	}

	/// Builds the context from the payload. An explicit `week` (from the
	/// schedule) wins over the week in the canonical URL; the season comes
	/// from the kickoff year unless overridden.
	pub fn from_payload(ufl_game_id: &str, payload: &EventPayload, season: Option<i32>, week: Option<u8>, season_type: &str) -> Result<Self, FeedError> {
		let week = match week {
			Some(week) => week,
			None => payload
				.canonical_url()
				.ok_or(FeedError::MissingField { field: "metadata.parameters.canonicalUrl" })
				.and_then(week_from_canonical_url)?,
		};
		let season = match season {
			Some(season) => season,
			None => season_from_event_time(&payload.header.event_time).ok_or(FeedError::MissingField { field: "header.eventTime" })?,
		};

		Ok(Self::new(
			ufl_game_id,
			season,
			week,
			season_type,
			GameTeams::from_header(&payload.header),
			&payload.header.venue_name,
			&payload.header.event_time,
		))
	}
}

/// Week number from a schedule heading: "Week 3", "Playoffs", "Championship".
/// A bare number is taken as the week itself.
pub fn parse_week_title(title: &str) -> Result<u8, FeedError> {
	let lowercase = title.trim().to_lowercase();
	match lowercase.as_str() {
		s if s.contains("championship") => Ok(CHAMPIONSHIP_WEEK),
		s if s.contains("playoff") || s.contains("semifinal") => Ok(PLAYOFF_WEEK),
		s => s
			.strip_prefix("week")
			.unwrap_or(s)
			.trim()
			.parse::<u8>()
			.ok()
			.filter(|week| *week > 0)
			.ok_or_else(|| FeedError::invalid_week(title)),
	}
}

/// Week number from a canonical URL such as `/ufl/week-3-chi-at-nyg`.
pub fn week_from_canonical_url(url: &str) -> Result<u8, FeedError> {
	let lowercase = url.to_lowercase();
	if let Some((_, rest)) = lowercase.split_once("week-") {
		let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
		return digits.parse::<u8>().map_err(|_| FeedError::invalid_week(url));
	}
	match lowercase.as_str() {
		s if s.contains("championship") => Ok(CHAMPIONSHIP_WEEK),
		s if s.contains("playoff") || s.contains("semifinal") => Ok(PLAYOFF_WEEK),
		_ => Err(FeedError::invalid_week(url)),
	}
}

/// Season year from an RFC 3339 kickoff timestamp, falling back to its
/// leading four digits.
pub fn season_from_event_time(event_time: &str) -> Option<i32> {
	DateTime::parse_from_rfc3339(event_time.trim())
		.map(|dt| dt.year())
		.ok()
		.or_else(|| event_time.trim().get(..4)?.parse().ok())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::feed::FeedId;
	use crate::schema::teams::Team;
	use std::str::FromStr;

	const WITHOUT_URL: &str = r#"{
		"header": {
			"leftTeam": { "name": "CHI", "entityLink": { "layout": { "tokens": { "id": 11 } } } },
			"rightTeam": { "name": "NYG", "entityLink": { "layout": { "tokens": { "id": 12 } } } },
			"venueName": "Soldier Field",
			"eventTime": "2024-04-06T16:00:00Z"
		},
		"pbp": { "sections": [] }
	}"#;

	#[test]
	fn test_parse_week_title() {
		let test_cases = vec![("Week 3", Some(3)), ("week 10", Some(10)), ("Playoffs", Some(11)), ("UFL Championship", Some(12)), ("7", Some(7)), ("Week 0", None), ("Preseason", None)];

		for (input, expected) in test_cases {
			assert_eq!(parse_week_title(input).ok(), expected, "{input}");
		}
	}

	#[test]
	fn test_week_from_canonical_url() {
		let test_cases = vec![
			("/ufl/week-3-chi-at-nyg-apr-06-2024-game-boxscore-123", Some(3)),
			("/usfl/week-10-mem-at-hou", Some(10)),
			("/ufl/championship-game", Some(12)),
			("/ufl/conference-playoff-sa-at-hou", Some(11)),
			("/ufl/week--x", None),
		];

		for (input, expected) in test_cases {
			assert_eq!(week_from_canonical_url(input).ok(), expected, "{input}");
		}
	}

	#[test]
	fn test_season_from_event_time() {
		assert_eq!(season_from_event_time("2024-04-06T16:00:00Z"), Some(2024));
		assert_eq!(season_from_event_time("2023-05-01 19:00"), Some(2023));
		assert_eq!(season_from_event_time("soon"), None);
	}

	#[test]
	fn test_game_id_is_zero_padded() {
		let teams = GameTeams::new(
			Team { id: FeedId::new("1"), abbr: "STL".to_string() },
			Team { id: FeedId::new("2"), abbr: "ARL".to_string() },
		);
		let context = GameContext::new("9001", 2024, 3, REGULAR_SEASON, teams, "The Dome", "2024-04-06T16:00:00Z");
		assert_eq!(context.game_id, "2024_03_STL_ARL");
	}

	#[test]
	fn test_week_without_canonical_url() {
		let payload = EventPayload::from_str(WITHOUT_URL).unwrap();
		let test_cases = vec![(Some(4), Some("2024_04_CHI_NYG")), (Some(CHAMPIONSHIP_WEEK), Some("2024_12_CHI_NYG")), (None, None)];

		for (week, expected) in test_cases {
			let context = GameContext::from_payload("9001", &payload, None, week, REGULAR_SEASON);
			assert_eq!(context.as_ref().ok().map(|context| context.game_id.as_str()), expected, "{week:?}");
		}
		assert!(matches!(
			GameContext::from_payload("9001", &payload, None, None, REGULAR_SEASON),
			Err(FeedError::MissingField { field: "metadata.parameters.canonicalUrl" })
		));
	}
}
