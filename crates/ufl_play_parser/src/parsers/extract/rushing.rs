use super::PlayDetailsBuilder;
use crate::parsers::rules::{capture, owned, Template, TemplateSet};
use crate::schema::Yards;
use once_cell::sync::Lazy;
use regex::Captures;
use std::str::FromStr;

pub(super) static RUN: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"run",
		vec![
			Template::new(
				"rushed_to_spot",
				r"(?P<rusher>{PLAYER}) rushed(?: (?P<direction>{DIRECTION}))? to (?P<spot>{SPOT}) for (?:(?P<yards>{YARDS}) yards?|yards|no gain)",
				rushed,
			),
			Template::new(
				"rushed_for",
				r"(?P<rusher>{PLAYER}) rushed(?: (?P<direction>{DIRECTION}))? for (?:(?P<yards>{YARDS}) yards?|no gain)",
				rushed,
			),
			Template::new("rushed", r"(?P<rusher>{PLAYER}) rushed(?: (?P<direction>{DIRECTION}))?", rushed),
		],
	)
});

pub(super) static SCRAMBLE: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"qb_scramble",
		vec![Template::new(
			"scrambles",
			r"(?P<rusher>{PLAYER}) (?i:scrambles|scrambled|scramble)(?: (?P<direction>{DIRECTION}))?(?: to (?P<spot>{SPOT}))?(?: for (?:(?P<yards>{YARDS}) yards?|yards|no gain))?",
			scrambled,
		)],
	)
});

pub(super) static KNEEL: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"qb_kneel",
		vec![
			Template::new("kneels", r"(?P<rusher>{PLAYER}) (?i:kneels|kneeled|knelt|kneel)(?: down)?(?: at (?P<spot>{SPOT}))?", kneeled),
			Template::new("kneel", r"(?i)kneel", kneeled),
		],
	)
});

/// Splits a run direction into location and gap: "left end" is
/// (left, end), "up the middle" is (middle, none).
pub fn run_direction(direction: &str) -> (Option<String>, Option<String>) {
	let direction = direction.trim().to_lowercase();
	match direction.as_str() {
		"up the middle" | "middle" => (Some("middle".to_string()), None),
		"reverse" | "" => (None, None),
		other => match other.split_once(' ') {
			Some((location, gap)) => (Some(location.to_string()), Some(gap.to_string())),
			None => (Some(other.to_string()), None),
		},
	}
}

fn carry(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) -> i16 {
	let yards = b.gain("yards_gained", capture(caps, "yards"), capture(caps, "spot"));
	let (location, gap) = capture(caps, "direction").map(run_direction).unwrap_or_default();

	let rushing = &mut b.details.rushing;
	rushing.rusher = owned(caps, "rusher");
	rushing.run_location = location;
	rushing.run_gap = gap;
	rushing.rushing_yards = Some(yards);
	b.details.yards_gained = yards;
	yards
}

fn rushed(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	carry(caps, b);
	if b.mentions("touchdown") && !b.mentions("fumble") {
		b.details.flags.is_rush_touchdown = true;
		b.details.td_player_name.clone_from(&b.details.rushing.rusher);
	}
}

fn scrambled(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	rushed(caps, b);
	b.details.flags.is_qb_scramble = true;
	b.details.flags.is_qb_dropback = true;
}

fn kneeled(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let yards = Yards::from_str(&b.tail(0)).map_or(0, |yards| yards.0);
	let rushing = &mut b.details.rushing;
	rushing.rusher = owned(caps, "rusher");
	rushing.rushing_yards = Some(yards);
	b.details.yards_gained = yards;
	b.details.flags.is_qb_kneel = true;
}

#[cfg(test)]
mod tests {
	use super::super::extract;
	use super::super::tests::situation;
	use super::*;
	use crate::schema::PlayCategory;

	#[test]
	fn test_run_direction() {
		let test_cases = vec![
			("up the middle", (Some("middle"), None)),
			("left end", (Some("left"), Some("end"))),
			("Right Guard", (Some("right"), Some("guard"))),
			("right", (Some("right"), None)),
			("reverse", (None, None)),
		];

		for (input, (location, gap)) in test_cases {
			let (actual_location, actual_gap) = run_direction(input);
			assert_eq!(actual_location.as_deref(), location, "{input}");
			assert_eq!(actual_gap.as_deref(), gap, "{input}");
		}
	}

	#[test]
	fn test_rushing_touchdown() {
		let extraction = extract(PlayCategory::Run, "M.Diaz rushed right end to NYG 30 for 8 yards. TOUCHDOWN.", &situation(2, 5, 38));
		let details = extraction.details;
		assert!(extraction.faults.is_empty());
		assert_eq!(details.rushing.rusher.as_deref(), Some("M.Diaz"));
		assert_eq!(details.rushing.run_location.as_deref(), Some("right"));
		assert_eq!(details.rushing.run_gap.as_deref(), Some("end"));
		assert_eq!(details.rushing.rushing_yards, Some(8));
		assert!(details.flags.is_rush_touchdown);
		assert_eq!(details.td_player_name.as_deref(), Some("M.Diaz"));
	}

	#[test]
	fn test_run_variants() {
		let test_cases = vec![
			("A.Back rushed up the middle to HOU 35 for 5 yards.", 5, Some("middle")),
			("A.Back rushed to HOU 40 for no gain.", 0, None),
			("A.Back rushed left tackle for -2 yards.", -2, Some("left")),
		];

		for (description, yards, location) in test_cases {
			let extraction = extract(PlayCategory::Run, description, &situation(1, 10, 40));
			assert!(extraction.faults.is_empty(), "{description}");
			assert_eq!(extraction.details.yards_gained, yards, "{description}");
			assert_eq!(extraction.details.rushing.run_location.as_deref(), location, "{description}");
		}
	}

	#[test]
	fn test_fumbled_touchdown_is_not_credited() {
		let extraction = extract(
			PlayCategory::Run,
			"A.Back rushed left end to HOU 2 for 8 yards. A.Back FUMBLES, forced by L.Backer. Fumble RECOVERED by HOU-S.Safety at HOU 2. S.Safety for 98 yards, TOUCHDOWN.",
			&situation(1, 10, 10),
		);
		assert!(!extraction.details.flags.is_rush_touchdown);
	}

	#[test]
	fn test_scramble_and_kneel() {
		let extraction = extract(PlayCategory::QbScramble, "Q.Back scrambles right end to HOU 40 for 6 yards.", &situation(3, 4, 46));
		assert!(extraction.details.flags.is_qb_scramble);
		assert_eq!(extraction.details.rushing.rusher.as_deref(), Some("Q.Back"));
		assert_eq!(extraction.details.yards_gained, 6);

		let extraction = extract(PlayCategory::QbKneel, "Q.Back kneels at DAL 34 for -1 yards.", &situation(1, 10, 65));
		assert!(extraction.details.flags.is_qb_kneel);
		assert_eq!(extraction.details.yards_gained, -1);
		assert_eq!(extraction.details.rushing.rusher.as_deref(), Some("Q.Back"));
	}
}
