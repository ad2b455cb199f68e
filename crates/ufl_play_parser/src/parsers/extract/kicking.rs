use super::{defense, Frame, PlayDetailsBuilder};
use crate::parsers::rules::{capture, compile, owned, Template, TemplateSet};
use crate::schema::yardline_100;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PUNT_RETURN: Lazy<Regex> = Lazy::new(|| compile(r"(?P<returner>{PLAYER}) (?i:returned punt|returns punt|returns the punt) from (?:the )?(?P<start>{SPOT})"));
static KICKOFF_RETURN: Lazy<Regex> = Lazy::new(|| compile(r"(?P<returner>{PLAYER}) (?i:returns the kickoff|returned kickoff|returns kickoff) from (?:the )?(?P<start>{SPOT})"));
static FAIR_CATCH: Lazy<Regex> = Lazy::new(|| compile(r"(?i:fair catch by) (?P<returner>{PLAYER})"));
static BLOCKED_BY: Lazy<Regex> = Lazy::new(|| compile(r"(?i:blocked by) (?P<blocker>{PLAYER})"));

pub(super) static FIELD_GOAL: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"field_goal",
		vec![
			Template::new(
				"field_goal_result",
				r"(?P<kicker>{PLAYER}) (?P<distance>\d{1,3}) (?i:yards? field goal)(?: (?i:attempt))? (?i:is) (?P<result>(?i:no good|good|blocked|missed))(?:[^(]*\((?P<blocker>{PLAYER})\))?",
				field_goal,
			),
			Template::new("field_goal", r"(?P<kicker>{PLAYER}) (?P<distance>\d{1,3}) (?i:yards? field goal)", field_goal),
		],
	)
});

pub(super) static PUNT: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"punt",
		vec![
			Template::new(
				"punt_to_spot",
				r"(?P<punter>{PLAYER}) (?i:punts|kicks) (?P<distance>\d{1,3}) (?i:yards?) to (?:the )?(?P<spot>{SPOT})",
				punted,
			),
			Template::new("punt", r"(?P<punter>{PLAYER}) (?i:punts|kicks)", punted),
		],
	)
});

pub(super) static KICKOFF: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"kickoff",
		vec![
			Template::new(
				"kicks_from_to",
				r"(?P<kicker>{PLAYER}) (?i:kicks)(?: (?i:onside))? (?P<distance>\d{1,3}) (?i:yards?) from (?:the )?{SPOT} to (?:the )?(?P<spot>{SPOT})",
				kicked_off,
			),
			Template::new("kicks", r"(?P<kicker>{PLAYER}) (?i:kicks)", kicked_off),
			Template::new("kickoff", r"(?i)kickoff", kicked_off),
		],
	)
});

/// Normalizes the feed's field goal wording to `made`, `missed` or `blocked`.
pub fn field_goal_result(text: &str) -> Option<&'static str> {
	let text = text.to_lowercase();
	if text.contains("blocked") {
		Some("blocked")
	} else if text.contains("no good") || text.contains("missed") || text.contains("wide") {
		Some("missed")
	} else if text.contains("good") {
		Some("made")
	} else {
		None
	}
}

fn kick_distance(b: &mut PlayDetailsBuilder, text: Option<&str>) -> Option<u8> {
	let yards = b.yards("kick_distance", text?)?;
	u8::try_from(yards).ok()
}

fn blocker(b: &PlayDetailsBuilder) -> Option<String> {
	BLOCKED_BY.captures(&b.tail(0)).and_then(|caps| owned(&caps, "blocker"))
}

fn field_goal(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let distance = kick_distance(b, capture(caps, "distance"));
	let result = capture(caps, "result").map_or_else(|| field_goal_result(&b.tail(0)), field_goal_result);
	let blocked_by = owned(caps, "blocker").or_else(|| blocker(b));

	let kicking = &mut b.details.kicking;
	kicking.kicker_player_name = owned(caps, "kicker");
	kicking.kick_distance = distance;
	kicking.field_goal_result = result.map(str::to_string);
	if result == Some("blocked") {
		kicking.blocked_player_name = blocked_by;
	}
}

/// How a kick ended for the receiving team.
#[derive(Debug, Default)]
struct KickReturn {
	returner: Option<String>,
	return_yards: Option<i16>,
	fair_catch: bool,
	/// Final spot in the receiving team's frame.
	final_spot: Option<u8>,
}

fn kick_return(b: &mut PlayDetailsBuilder, returns: &Regex, landing: Option<&str>, frame: Frame) -> KickReturn {
	let text = b.tail(0);
	let team = b.abbr(frame);

	if let Some(caps) = returns.captures(&text) {
		let start = capture(&caps, "start").unwrap_or_default();
		let offset = caps.get(0).map_or(0, |m| m.end());
		let return_yards = defense::return_yards(b, start, offset, frame);
		let final_spot = return_yards
			.zip(yardline_100(start, &team).ok())
			.and_then(|(yards, start)| u8::try_from(i16::from(start) - yards).ok());
		return KickReturn {
			returner: owned(&caps, "returner"),
			return_yards,
			fair_catch: false,
			final_spot,
		};
	}

	let final_spot = landing.and_then(|spot| yardline_100(spot, &team).ok());
	match FAIR_CATCH.captures(&text) {
		Some(caps) => KickReturn {
			returner: owned(&caps, "returner"),
			fair_catch: true,
			final_spot,
			..KickReturn::default()
		},
		None => KickReturn { final_spot, ..KickReturn::default() },
	}
}

fn punted(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let distance = kick_distance(b, capture(caps, "distance"));
	let kick = kick_return(b, &PUNT_RETURN, capture(caps, "spot"), Frame::Defense);
	let touchback = b.mentions("touchback");
	let downed = b.mentions("downed");
	let out_of_bounds = b.mentions("out of bounds") && kick.returner.is_none();
	let blocked = b.mentions("blocked");
	let touchdown = b.mentions("touchdown") && kick.returner.is_some() && !kick.fair_catch;
	let blocked_by = if blocked { blocker(b) } else { None };
	let return_team = b.abbr(Frame::Defense);

	let kicking = &mut b.details.kicking;
	kicking.punter_player_name = owned(caps, "punter");
	kicking.kick_distance = distance;
	kicking.is_punt_blocked = blocked;
	kicking.blocked_player_name = blocked_by;
	kicking.is_punt_downed = downed;
	kicking.is_punt_fair_catch = kick.fair_catch;
	kicking.is_punt_in_endzone = touchback;
	kicking.is_punt_out_of_bounds = out_of_bounds;
	kicking.is_punt_inside_twenty = !touchback && kick.final_spot.is_some_and(|spot| spot > 80);

	let returns = &mut b.details.returns;
	if kick.returner.is_some() {
		returns.return_team = Some(return_team);
	}
	returns.punt_returner_player_name = kick.returner;
	returns.return_yards = kick.return_yards;

	if touchdown {
		b.details.flags.is_return_touchdown = true;
		b.details.td_player_name.clone_from(&b.details.returns.punt_returner_player_name);
	}
}

fn kicked_off(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let distance = kick_distance(b, capture(caps, "distance"));
	let kick = kick_return(b, &KICKOFF_RETURN, capture(caps, "spot"), Frame::Offense);
	let touchback = b.mentions("touchback");
	let downed = b.mentions("downed");
	let out_of_bounds = b.mentions("out of bounds") && kick.returner.is_none();
	let onside = b.mentions("onside");
	let touchdown = b.mentions("touchdown") && kick.returner.is_some() && !kick.fair_catch;
	let return_team = b.abbr(Frame::Offense);

	let kicking = &mut b.details.kicking;
	kicking.kicker_player_name = owned(caps, "kicker");
	kicking.kick_distance = distance;
	kicking.is_onside_kick = onside;
	kicking.is_kickoff_downed = downed;
	kicking.is_kickoff_fair_catch = kick.fair_catch;
	kicking.is_kickoff_in_endzone = touchback;
	kicking.is_kickoff_out_of_bounds = out_of_bounds;
	kicking.is_kickoff_inside_twenty = !touchback && kick.final_spot.is_some_and(|spot| spot > 80);

	let returns = &mut b.details.returns;
	if kick.returner.is_some() {
		returns.return_team = Some(return_team);
	}
	returns.kickoff_returner_player_name = kick.returner;
	returns.return_yards = kick.return_yards;

	if touchdown {
		b.details.flags.is_return_touchdown = true;
		b.details.td_player_name.clone_from(&b.details.returns.kickoff_returner_player_name);
	}
}
