use std::str::FromStr;
use ufl_play_parser::schema::{PassingLine, ReturnLine, TeamSide};
use ufl_play_parser::{parse_boxscore, BoxscoreError, EventPayload, GameContext, PlayerGameStats};

const GAME: &str = include_str!("fixtures/hou_at_dal.json");

fn players(json: &str) -> Result<Vec<PlayerGameStats>, BoxscoreError> {
	let payload = EventPayload::from_str(json).unwrap();
	let context = GameContext::from_payload("4321", &payload, None, None, "REGULAR SEASON").unwrap();
	parse_boxscore(&payload, &context)
}

fn player<'a>(players: &'a [PlayerGameStats], player_id: &str) -> &'a PlayerGameStats {
	players.iter().find(|player| player.player_id.as_str() == player_id).unwrap()
}

#[test]
fn test_players_are_merged_across_tables() {
	let players = players(GAME).unwrap();
	let ids: Vec<_> = players.iter().map(|player| player.player_id.as_str()).collect();
	assert_eq!(ids, vec!["501", "502", "503", "504", "506", "505", "601", "605", "607", "604", "603", "602"]);

	for player in &players {
		assert_eq!(player.game_id, "2024_03_HOU_DAL");
		let expected = if player.player_id.as_str().starts_with('5') { ("HOU", TeamSide::Away) } else { ("DAL", TeamSide::Home) };
		assert_eq!((player.team.as_str(), player.team_type), expected, "{}", player.player_name);
	}

	let returner = player(&players, "603");
	assert_eq!(returner.player_name, "R. Hands");
	assert_eq!(
		returner.kick_return,
		Some(ReturnLine {
			returns: 1,
			yards: 22,
			long: 22,
			touchdowns: 0,
			average: Some(22.0),
		})
	);
	assert_eq!(returner.punt_return.map(|line| (line.returns, line.average)), Some((0, None)));
	assert!(returner.passing.is_none() && returner.rushing.is_none());
}

#[test]
fn test_passing_ratios() {
	let players = players(GAME).unwrap();
	let test_cases = vec![
		(
			"501",
			PassingLine {
				completions: 1,
				attempts: 1,
				yards: 12,
				touchdowns: 0,
				interceptions: 0,
				rating: Some(116.7),
				completion_pct: Some(1.0),
				yards_per_attempt: Some(12.0),
				adjusted_yards_per_attempt: Some(12.0),
				yards_per_completion: Some(12.0),
				cfb_rating: Some(200.8),
			},
		),
		(
			"601",
			PassingLine {
				completions: 1,
				attempts: 3,
				yards: 75,
				touchdowns: 1,
				interceptions: 0,
				rating: Some(109.7),
				completion_pct: Some(0.3333),
				yards_per_attempt: Some(25.0),
				adjusted_yards_per_attempt: Some(31.667),
				yards_per_completion: Some(75.0),
				cfb_rating: Some(353.333),
			},
		),
	];

	for (player_id, expected) in test_cases {
		assert_eq!(player(&players, player_id).passing, Some(expected), "{player_id}");
	}
}

#[test]
fn test_other_stat_families() {
	let players = players(GAME).unwrap();

	let rusher = player(&players, "502").rushing.unwrap();
	assert_eq!((rusher.attempts, rusher.yards, rusher.long, rusher.average), (3, 71, 55, Some(23.667)));

	let receivers = vec![("504", (Some(12.0), Some(0.5), Some(6.0), 12)), ("605", (Some(75.0), Some(0.3333), Some(25.0), 75)), ("607", (None, Some(0.0), Some(0.0), 0))];
	for (player_id, expected) in receivers {
		let line = player(&players, player_id).receiving.unwrap();
		assert_eq!((line.average, line.catch_pct, line.yards_per_target, line.long), expected, "{player_id}");
	}

	let defender = player(&players, "506").defense.unwrap();
	assert_eq!((defender.tackles, defender.solo, defender.assists, defender.sacks), (2, 1, 1, 1.0));

	let kicker = player(&players, "505").kicking.unwrap();
	assert_eq!((kicker.made, kicker.attempts, kicker.pct, kicker.long), (1, 1, Some(1.0), 44));

	let punter = player(&players, "602").punting.unwrap();
	assert_eq!((punter.punts, punter.gross_yards), (1, Some(48.0)));

	let fumbles = player(&players, "604").fumbles.unwrap();
	assert_eq!((fumbles.fumbles, fumbles.forced), (0, 1));
}

#[test]
fn test_boxscore_faults() {
	let test_cases = vec![
		(GAME.replace("\"ROUGHNECKS\"", "\"ROUGHRIDERS\""), BoxscoreError::unknown_section("ROUGHRIDERS")),
		(GAME.replace("\"PUNTING\"", "\"BLOCKING\""), BoxscoreError::unknown_table("BLOCKING")),
		(GAME.replace("\"48.0\"", "\"long\""), BoxscoreError::invalid_value("punting", "long")),
		(GAME.replace("\"boxscore\":", "\"box\":"), BoxscoreError::Missing),
	];

	for (json, expected) in test_cases {
		assert_eq!(players(&json).unwrap_err(), expected);
	}
}
