use super::{defense, Frame, PlayDetailsBuilder};
use crate::parsers::rules::{capture, owned, Template, TemplateSet};
use once_cell::sync::Lazy;
use regex::Captures;

const LENGTH: &str = r"(?: (?P<length>(?i:deep|short)))?";
const LOCATION: &str = r"(?: (?P<location>(?i:left|middle|right)))?";

fn pattern(template: &str) -> String {
	template.replace("{LENGTH}", LENGTH).replace("{LOCATION}", LOCATION)
}

pub(super) static PASS: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"pass",
		vec![
			Template::new(
				"intercepted_at_spot",
				&pattern(r"(?P<passer>{PLAYER}) pass{LENGTH}{LOCATION} INTERCEPTED at (?P<spot>{SPOT})\. Intercepted by (?P<interceptor>{PLAYER}) at (?P<return_start>{SPOT})"),
				intercepted,
			),
			Template::new(
				"intercepted_by",
				&pattern(r"(?P<passer>{PLAYER}) pass{LENGTH}{LOCATION}(?: (?:intended for|to) (?P<receiver>{PLAYER}))? (?i:intercepted) by (?P<interceptor>{PLAYER})(?: at (?P<return_start>{SPOT}))?"),
				intercepted,
			),
			Template::new(
				"sacked",
				r"(?P<passer>{PLAYER}) sacked(?: at (?P<spot>{SPOT}))?(?: for (?:(?P<yards>{YARDS}) )?yards?)?(?: \((?P<sackers>[^)]*)\))?",
				sacked,
			),
			Template::new(
				"steps_back_incomplete",
				&pattern(r"(?P<passer>{PLAYER}) steps back to pass\. Pass incomplete{LENGTH}{LOCATION}(?: intended for (?P<receiver>{PLAYER}))?(?:\.? \((?P<defenders>[^)]*)\))?"),
				incomplete,
			),
			Template::new(
				"incomplete",
				&pattern(r"(?P<passer>{PLAYER}) pass incomplete{LENGTH}{LOCATION}(?: (?:intended for|to) (?P<receiver>{PLAYER}))?(?:\.? \((?P<defenders>[^)]*)\))?"),
				incomplete,
			),
			Template::new(
				"complete_to_spot",
				&pattern(r"(?P<passer>{PLAYER}) pass{LENGTH}{LOCATION} complete to (?P<target>{SPOT})\. Catch made by (?P<receiver>{PLAYER}) at (?P<catch>{SPOT})\. Gain of(?: (?P<yards>{YARDS}))? yards?"),
				complete,
			),
			Template::new(
				"complete_catch_for",
				&pattern(r"(?P<passer>{PLAYER}) pass{LENGTH}{LOCATION} complete\. Catch made by (?P<receiver>{PLAYER}) for (?:(?P<yards>{YARDS}) yards?|no gain)"),
				complete,
			),
			Template::new(
				"complete_to_receiver",
				&pattern(r"(?P<passer>{PLAYER}) pass{LENGTH}{LOCATION}(?: complete)? to (?P<receiver>{PLAYER})(?: to (?P<catch>{SPOT}))? for (?:(?P<yards>{YARDS}) yards?|no gain)"),
				complete,
			),
		],
	)
});

pub(super) static SPIKE: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"qb_spike",
		vec![
			Template::new("spiked_by", r"(?P<passer>{PLAYER}) (?i:spikes|spiked|spike)", spiked),
			Template::new("spike", r"(?i)spike", spiked),
		],
	)
});

fn dropback(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let passing = &mut b.details.passing;
	passing.passer = owned(caps, "passer");
	passing.receiver = owned(caps, "receiver");
	passing.pass_length = capture(caps, "length").map(str::to_lowercase);
	passing.pass_location = capture(caps, "location").map(str::to_lowercase);
	b.details.flags.is_qb_dropback = true;
}

fn complete(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	dropback(caps, b);
	let yards = b.gain("yards_gained", capture(caps, "yards"), capture(caps, "catch"));
	let air_yards = match (b.situation().yardline_100, capture(caps, "target")) {
		(Some(start), Some(target)) => b.spot("air_yards", target).map(|target| i16::from(start) - i16::from(target)),
		_ => None,
	};

	let yards_after_catch = air_yards.and_then(|air| {
		let after_catch = yards.checked_sub(air);
		if after_catch.is_none() {
			b.defaulted("yards_after_catch", "gain minus air yards overflows");
		}
		after_catch
	});

	let touchdown = b.mentions("touchdown") && !b.mentions("fumbles");
	let details = &mut b.details;
	details.yards_gained = yards;
	details.flags.is_complete_pass = true;
	details.passing.passing_yards = Some(yards);
	details.passing.receiving_yards = Some(yards);
	details.passing.air_yards = air_yards;
	details.passing.yards_after_catch = yards_after_catch;
	if touchdown {
		details.flags.is_pass_touchdown = true;
		details.td_player_name.clone_from(&details.passing.receiver);
	}
}

fn incomplete(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	dropback(caps, b);
	b.details.flags.is_incomplete_pass = true;
	b.details.yards_gained = 0;

	let defenders: Vec<String> = capture(caps, "defenders")
		.map(|list| list.split(|c: char| c == ',' || c == ';').map(str::trim).filter(|name| !name.is_empty()).map(str::to_string).collect())
		.unwrap_or_default();
	let mut defenders = defenders.into_iter();
	b.details.passing.pass_defense_1_player_name = defenders.next();
	b.details.passing.pass_defense_2_player_name = defenders.next();
}

fn intercepted(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	dropback(caps, b);
	b.details.flags.is_interception = true;
	b.details.flags.is_incomplete_pass = false;
	b.details.yards_gained = 0;
	b.details.passing.interception_player_name = owned(caps, "interceptor");
	b.details.returns.return_team = Some(b.abbr(Frame::Defense));

	let Some(start) = capture(caps, "return_start") else {
		return;
	};
	let end_offset = caps.get(0).map_or(0, |m| m.end());
	let return_yards = defense::return_yards(b, start, end_offset, Frame::Defense);
	b.details.returns.return_yards = return_yards;
	if b.mentions("touchdown") {
		b.details.flags.is_return_touchdown = true;
		b.details.td_player_name.clone_from(&b.details.passing.interception_player_name);
	}
}

fn sacked(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	dropback(caps, b);
	let yards = b.gain("yards_gained", capture(caps, "yards"), capture(caps, "spot"));
	b.details.yards_gained = yards;
	b.details.flags.is_sack = true;

	let sackers: Vec<&str> = capture(caps, "sackers")
		.map(|list| list.split(|c: char| c == ',' || c == ';').map(str::trim).filter(|name| !name.is_empty()).collect())
		.unwrap_or_default();
	let passing = &mut b.details.passing;
	match sackers.as_slice() {
		[] => {}
		[single] => passing.sack_player_name = Some((*single).to_string()),
		[first, second, ..] => {
			passing.half_sack_1_player_name = Some((*first).to_string());
			passing.half_sack_2_player_name = Some((*second).to_string());
		}
	}
}

fn spiked(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	b.details.passing.passer = owned(caps, "passer");
	b.details.flags.is_qb_spike = true;
	b.details.flags.is_incomplete_pass = true;
}
