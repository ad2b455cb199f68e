use super::{Frame, PlayDetailsBuilder};
use crate::parsers::rules::{capture, compile, owned, Template, TemplateSet};
use crate::parsers::tackles::split_tacklers;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RETURN_END: Lazy<Regex> = Lazy::new(|| compile(r"(?i:tackled by|pushed out of bounds by|ran out of bounds)(?: {PLAYERS})? at (?P<spot>{SPOT})"));
static TACKLE: Lazy<Regex> = Lazy::new(|| compile(r"(?:Tackled by|Pushed out of bounds by) (?P<tacklers>{PLAYERS}) at (?P<spot>{SPOT})"));
static TOUCHDOWN_SCORER: Lazy<Regex> = Lazy::new(|| compile(r"(?P<player>{PLAYER}) for(?: {YARDS})? yards?, (?i:touchdown)"));

const RECOVERY: &str = r"(?i:fumble recovered) by (?P<team>{TEAM})-(?P<recoverer>{PLAYER}) at (?P<spot>{SPOT})";

fn with_recovery(prefix: &str) -> String {
	format!("{prefix}{RECOVERY}")
}

pub(super) static FUMBLE: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"fumble",
		vec![
			Template::new("not_forced_recovered", &with_recovery(r"(?P<fumbler>{PLAYER}) (?i:fumbles) \((?i:not forced)\)\.? "), recovered),
			Template::new("forced_recovered", &with_recovery(r"(?P<fumbler>{PLAYER}) (?i:fumbles), (?i:forced) by (?P<forcer>{PLAYER})\. "), recovered),
			Template::new("recovered", &with_recovery(r"(?P<fumbler>{PLAYER}) (?i:fumbles)\.? "), recovered),
			Template::new(
				"forced_out_of_bounds",
				r"(?P<fumbler>{PLAYER}) (?i:fumbles), (?i:forced) by (?P<forcer>{PLAYER})\. (?i:fumble) (?i:ran|went) (?i:out of bounds)",
				out_of_bounds,
			),
			Template::new("out_of_bounds", r"(?P<fumbler>{PLAYER}) (?i:fumbles)[^.]*\. (?i:fumble) (?i:ran|went) (?i:out of bounds)", out_of_bounds),
			Template::new("forced", r"(?P<fumbler>{PLAYER}) (?i:fumbles), (?i:forced) by (?P<forcer>{PLAYER})", fumbled),
			Template::new("fumble", r"(?P<fumbler>{PLAYER}) (?i:fumbles)", fumbled),
		],
	)
});

pub(super) static ABORTED: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"aborted_play",
		vec![
			Template::new("aborted_recovered", &with_recovery(r"(?P<fumbler>{PLAYER}) (?i:fumbles) \((?i:aborted)\)(?: at {SPOT})?\.? "), aborted_recovered),
			Template::new("aborted_fumble", r"(?P<fumbler>{PLAYER}) (?i:fumbles) \((?i:aborted)\)", aborted_fumble),
			Template::new("aborted", r"(?i)aborted", aborted),
		],
	)
});

/// Yards a returner covered from `start`, measured in `frame`. The end of
/// the return is the next tackle or out of bounds spot after `offset`, or
/// the goal line on a touchdown.
pub(super) fn return_yards(b: &mut PlayDetailsBuilder, start: &str, offset: usize, frame: Frame) -> Option<i16> {
	let start = b.spot_in("return_yards", start, frame)?;
	let end = if b.mentions("touchdown") {
		0
	} else {
		let tail = b.tail(offset);
		let spot = RETURN_END.captures(&tail).and_then(|caps| owned(&caps, "spot"))?;
		b.spot_in("return_yards", &spot, frame)?
	};
	Some(i16::from(start) - i16::from(end))
}

fn fumbled(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let carrier = b.carrier();
	let fumbling_team = b.abbr(carrier);
	let forcing_team = b.abbr(carrier.opposite());
	let forcer = owned(caps, "forcer");

	let fumbles = &mut b.details.fumbles;
	fumbles.is_fumble = true;
	fumbles.fumbled_1_player_name = owned(caps, "fumbler");
	fumbles.fumbled_1_team = Some(fumbling_team);
	fumbles.is_fumble_forced = forcer.is_some();
	fumbles.is_fumble_not_forced = forcer.is_none();
	if forcer.is_some() {
		fumbles.forced_fumble_player_1_team = Some(forcing_team);
		fumbles.forced_fumble_player_1_player_name = forcer;
	}
}

fn out_of_bounds(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	fumbled(caps, b);
	b.details.fumbles.is_fumble_out_of_bounds = true;
}

/// Returns the recovering team's frame when it could be resolved.
fn recovered_by(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) -> Option<Frame> {
	fumbled(caps, b);
	let frame = b.team(capture(caps, "team")?)?;
	let carrier = b.carrier();
	let spot = capture(caps, "spot")?;
	let end_offset = caps.get(0).map_or(0, |m| m.end());
	let yards = return_yards(b, spot, end_offset, frame).unwrap_or(0);

	let recovering_team = b.abbr(frame);
	let fumbles = &mut b.details.fumbles;
	fumbles.fumble_recovery_1_team = Some(recovering_team);
	fumbles.fumble_recovery_1_player_name = owned(caps, "recoverer");
	fumbles.fumble_recovery_1_yards = Some(yards);
	fumbles.is_fumble_lost = frame != carrier;
	Some(frame)
}

fn recovered(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	if recovered_by(caps, b).is_none() || !b.mentions("touchdown") {
		return;
	}
	let flags = &mut b.details.flags;
	flags.is_rush_touchdown = false;
	flags.is_pass_touchdown = false;
	flags.is_return_touchdown = b.details.fumbles.is_fumble_lost;
	b.details.td_player_name.clone_from(&b.details.fumbles.fumble_recovery_1_player_name);
}

fn aborted(_caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	b.details.flags.is_aborted_play = true;
}

fn aborted_fumble(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	aborted(caps, b);
	fumbled(caps, b);
}

/// A botched snap recovered by the offense loses the distance back to the
/// recovery spot.
fn aborted_recovered(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	aborted(caps, b);
	if recovered_by(caps, b) != Some(Frame::Offense) {
		return;
	}
	let start = b.situation().yardline_100;
	let end = capture(caps, "spot").and_then(|spot| b.spot("yards_gained", spot));
	if let (Some(start), Some(end)) = (start, end) {
		b.details.yards_gained = i16::from(start) - i16::from(end);
	}
}

/// Credits the first tackle sentence to the defending side of the play.
pub(super) fn apply_tackles(description: &str, b: &mut PlayDetailsBuilder) {
	if b.details.tackles.tacklers().next().is_some() {
		return;
	}
	let Some(list) = TACKLE.captures(description).and_then(|caps| owned(&caps, "tacklers")) else {
		return;
	};
	let credit = split_tacklers(&list);
	let team = b.abbr(b.tackling());
	let tackles = &mut b.details.tackles;
	for name in &credit.solo {
		tackles.push_solo(name, &team);
	}
	for name in &credit.assisted {
		tackles.push_assist(name, &team);
	}
}

pub(super) fn apply_tackles_for_loss(b: &mut PlayDetailsBuilder) {
	if !b.details.rushing.rushing_yards.is_some_and(|yards| yards < 0) {
		return;
	}
	let mut tacklers: Vec<String> = b.details.tackles.tacklers().take(2).map(str::to_string).collect();
	tacklers.reverse();
	let tackles = &mut b.details.tackles;
	tackles.tackle_for_loss_1_player_name = tacklers.pop();
	tackles.tackle_for_loss_2_player_name = tacklers.pop();
	b.details.flags.is_tackled_for_loss = true;
}

/// Player named in a "X.Name for N yards, TOUCHDOWN" clause.
pub(super) fn touchdown_scorer(description: &str) -> Option<String> {
	TOUCHDOWN_SCORER.captures(description).and_then(|caps| owned(&caps, "player"))
}
