use super::{Frame, PlayDetailsBuilder};
use crate::parsers::rules::{capture, owned, Template, TemplateSet};
use once_cell::sync::Lazy;
use regex::Captures;

pub(super) static PENALTY: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"penalty",
		vec![
			Template::new(
				"player_penalty",
				r"(?i:penalty) on (?P<team>{TEAM})-(?P<player>{PLAYER}), (?P<kind>[^,.]+), (?P<yards>\d{1,2}) (?i:yards?)",
				penalized,
			),
			Template::new("team_penalty", r"(?i:penalty) on (?P<team>{TEAM}), (?P<kind>[^,.]+), (?P<yards>\d{1,2}) (?i:yards?)", penalized),
			Template::new(
				"penalty_declined",
				r"(?i:penalty) on (?P<team>{TEAM})(?:-(?P<player>{PLAYER}))?, (?P<kind>[^,.]+), (?i:declined)",
				penalized,
			),
			Template::new("penalty_team", r"(?i:penalty) on (?P<team>{TEAM})\b", penalized),
		],
	)
});

pub(super) static TIMEOUT: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new("timeout", vec![Template::new("timeout_by", r"(?i:timeout) #(?P<number>\d+) by (?P<team>{TEAM})", timeout)])
});

pub(super) static REPLAY: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"replay",
		vec![
			Template::new(
				"replay_review",
				r"(?i:replay)[^.]*?(?i:the (?:ruling|play)(?: on the field)? (?:was|is)) (?P<result>(?i:upheld|reversed|overturned|confirmed|stands))",
				reviewed,
			),
			Template::new(
				"challenge",
				r"(?P<team>{TEAM}) (?i:challenged)[^.]*?(?i:was|is) (?P<result>(?i:upheld|reversed|overturned|confirmed|stands))",
				reviewed,
			),
			Template::new("review", r"(?i:replay official|challenged)", reviewed),
		],
	)
});

fn penalized(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let frame = capture(caps, "team").and_then(|team| b.team(team));
	let yards = capture(caps, "yards").and_then(|yards| b.yards("penalty_yards", yards)).and_then(|yards| u8::try_from(yards).ok());
	let situation = b.situation();
	let automatic = b.mentions("automatic first down");
	let accepted = b.mentions("accepted") || automatic;
	let first_down = frame == Some(Frame::Defense)
		&& situation.down > 0
		&& (automatic || (accepted && yards.is_some_and(|yards| yards >= situation.yards_to_go)));
	let team = frame.map(|frame| b.abbr(frame));

	let penalty = &mut b.details.penalty;
	penalty.penalty_team = team;
	penalty.penalty_player_name = owned(caps, "player");
	penalty.penalty_type = owned(caps, "kind");
	penalty.penalty_yards = yards;
	b.details.flags.is_penalty = true;
	b.details.flags.is_first_down_penalty = first_down;
}

fn timeout(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let team = capture(caps, "team").and_then(|team| b.team(team)).map(|frame| b.abbr(frame));
	b.details.timeout_team = team;
	b.details.flags.is_timeout = true;
}

fn reviewed(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	b.details.replay_or_challenge_result = capture(caps, "result").map(str::to_lowercase);
	b.details.flags.is_replay_or_challenge = true;
}
