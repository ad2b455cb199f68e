//! Ordered rule tables. Classification rules are keyword predicates;
//! extraction rules are sentence templates with named captures. Both are
//! evaluated first-match-wins in declaration order.

use regex::{Captures, Regex};

/// Player name as printed in the feed: an initial, a dot and a surname,
/// optionally followed by more capitalized words ("A.St. Brown").
pub const PLAYER: &str = r"[A-Z][A-Za-z'\-]*\.\s?[A-Za-z][A-Za-z'\-]*(?:\.?\s[A-Z][A-Za-z'\-]*)*?";
/// A list of players separated by commas or semicolons.
pub const PLAYERS: &str = r"[A-Z][A-Za-z'\.\-]*(?:[ ,;]+[A-Z][A-Za-z'\.\-]*)*?";
/// Field position: "CHI 45", "CHI end zone", "50".
pub const SPOT: &str = r"(?:[A-Za-z]+ \d{1,2}|[A-Za-z]+ (?i:end zone)|\d{1,2})";
pub const YARDS: &str = r"-?\d+";
pub const TEAM: &str = r"[A-Za-z]{2,4}";
pub const DIRECTION: &str = r"(?i:up the middle|left end|left guard|left tackle|right end|right guard|right tackle|left|right|middle|reverse)";

fn expand(pattern: &str) -> String {
	pattern
		.replace("{PLAYERS}", PLAYERS)
		.replace("{PLAYER}", PLAYER)
		.replace("{SPOT}", SPOT)
		.replace("{YARDS}", YARDS)
		.replace("{TEAM}", TEAM)
		.replace("{DIRECTION}", DIRECTION)
}

/// Compiles a pattern written with the placeholders above.
pub fn compile(pattern: &str) -> Regex {
	Regex::new(&expand(pattern)).unwrap_or_else(|err| panic!("invalid sentence template `{pattern}`: {err}"))
}

/// A sentence template and what to do with its captures.
pub struct Template<B> {
	name: &'static str,
	pattern: Regex,
	apply: fn(&Captures<'_>, &mut B),
}

impl<B> Template<B> {
	pub fn new(name: &'static str, pattern: &str, apply: fn(&Captures<'_>, &mut B)) -> Self {
		Self {
			name,
			pattern: compile(pattern),
			apply,
		}
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}
}

/// Templates for one category, most specific first.
pub struct TemplateSet<B> {
	category: &'static str,
	templates: Vec<Template<B>>,
}

impl<B> TemplateSet<B> {
	pub fn new(category: &'static str, templates: Vec<Template<B>>) -> Self {
		Self { category, templates }
	}

	pub const fn category(&self) -> &'static str {
		self.category
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.templates.iter().map(Template::name)
	}

	/// Applies the first template that matches `text`, returning its name.
	pub fn apply_first(&self, text: &str, builder: &mut B) -> Option<&'static str> {
		self.templates.iter().find_map(|template| {
			let caps = template.pattern.captures(text)?;
			(template.apply)(&caps, builder);
			Some(template.name)
		})
	}
}

/// Trimmed text of a named capture, if it participated in the match.
pub fn capture<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
	caps.name(name).map(|m| m.as_str().trim()).filter(|s| !s.is_empty())
}

pub fn owned(caps: &Captures<'_>, name: &str) -> Option<String> {
	capture(caps, name).map(str::to_string)
}

/// Keyword predicate over a lowercased description and the play heading.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
	Contains(&'static str),
	StartsWith(&'static str),
	ContainsAll(&'static [&'static str]),
	ContainsAny(&'static [&'static str]),
	HeadingContains(&'static str),
	Either(&'static Matcher, &'static Matcher),
}

impl Matcher {
	pub fn matches(self, description: &str, heading: &str) -> bool {
		match self {
			Self::Contains(needle) => description.contains(needle),
			Self::StartsWith(prefix) => description.trim_start().starts_with(prefix),
			Self::ContainsAll(needles) => needles.iter().all(|needle| description.contains(needle)),
			Self::ContainsAny(needles) => needles.iter().any(|needle| description.contains(needle)),
			Self::HeadingContains(needle) => heading.contains(needle),
			Self::Either(left, right) => left.matches(description, heading) || right.matches(description, heading),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Default)]
	struct Names(Vec<String>);

	fn record(caps: &Captures<'_>, names: &mut Names) {
		names.0.extend(owned(caps, "who"));
	}

	#[test]
	fn test_player_pattern() {
		let re = compile(r"^(?P<who>{PLAYER}) pass");
		let test_cases = vec![
			("J.Smith pass short right", Some("J.Smith")),
			("A.St. Brown pass deep left", Some("A.St. Brown")),
			("D.Van Noy pass", Some("D.Van Noy")),
			("JJ.McCarthy pass", Some("JJ.McCarthy")),
			("Shotgun pass", None),
		];

		for (input, expected) in test_cases {
			let actual = re.captures(input).and_then(|caps| capture(&caps, "who").map(str::to_string));
			assert_eq!(actual.as_deref(), expected, "{input}");
		}
	}

	#[test]
	fn test_player_does_not_swallow_preceding_sentence() {
		let re = compile(r"(?P<who>{PLAYER}) pass");
		let caps = re.captures("No Huddle. J.Smith pass incomplete.").unwrap();
		assert_eq!(capture(&caps, "who"), Some("J.Smith"));
	}

	#[test]
	fn test_spot_pattern() {
		let re = compile(r"at (?P<spot>{SPOT})\.");
		for (input, expected) in [("at CHI 45.", "CHI 45"), ("at NYG end zone.", "NYG end zone"), ("at 50.", "50")] {
			let caps = re.captures(input).unwrap();
			assert_eq!(capture(&caps, "spot"), Some(expected));
		}
	}

	#[test]
	fn test_first_match_wins() {
		let set = TemplateSet::new(
			"demo",
			vec![
				Template::new("specific", r"(?P<who>{PLAYER}) rushed up the middle", record),
				Template::new("general", r"(?P<who>{PLAYER}) rushed", record),
			],
		);
		let mut names = Names::default();
		assert_eq!(set.apply_first("A.Back rushed up the middle for 3 yards.", &mut names), Some("specific"));
		assert_eq!(set.apply_first("A.Back rushed left end.", &mut names), Some("general"));
		assert_eq!(set.apply_first("Timeout #1 by DAL.", &mut names), None);
		assert_eq!(names.0, vec!["A.Back", "A.Back"]);
		assert_eq!(set.names().collect::<Vec<_>>(), vec!["specific", "general"]);
	}

	#[test]
	fn test_matcher() {
		static KICK: Matcher = Matcher::Contains("kickoff");
		static HEADING: Matcher = Matcher::HeadingContains("kickoff");
		let either = Matcher::Either(&KICK, &HEADING);

		assert!(either.matches("onside kickoff recovered", ""));
		assert!(either.matches("a.leg kicks 60 yards", "kickoff"));
		assert!(!either.matches("a.leg punts 40 yards", "4th and 9"));
		assert!(Matcher::ContainsAll(&["(aborted)", "pass"]).matches("fumbles (aborted) pass", ""));
		assert!(!Matcher::ContainsAny(&["end game", "end quarter"]).matches("end half", ""));
	}
}
