use crate::error::ClassifyError;
use crate::parsers::rules::Matcher;
use crate::schema::{ConversionMethod, ConversionPoints, NoPlayKind, PlayCategory};

enum Outcome {
	Fixed(PlayCategory),
	Derived(fn(&str) -> PlayCategory),
}

struct ClassifierRule {
	name: &'static str,
	matcher: Matcher,
	outcome: Outcome,
}

const fn rule(name: &'static str, matcher: Matcher, category: PlayCategory) -> ClassifierRule {
	ClassifierRule {
		name,
		matcher,
		outcome: Outcome::Fixed(category),
	}
}

static KICKOFF_TEXT: Matcher = Matcher::Contains("kickoff");
static KICKOFF_HEADING: Matcher = Matcher::HeadingContains("kickoff");

/// Evaluated top to bottom; the first rule whose matcher accepts the
/// lowercased description decides the category.
static RULES: &[ClassifierRule] = &[
	rule("no_play", Matcher::Contains("no play"), PlayCategory::NoPlay(NoPlayKind::Nullified)),
	rule("tv_timeout", Matcher::Contains("tv timeout"), PlayCategory::NoPlay(NoPlayKind::TvTimeout)),
	rule("timeout", Matcher::Contains("timeout #"), PlayCategory::NoPlay(NoPlayKind::Timeout)),
	rule(
		"replay_timeout",
		Matcher::ContainsAny(&["timeout the replay official", "replay official timeout"]),
		PlayCategory::NoPlay(NoPlayKind::ReplayTimeout),
	),
	// A leading penalty has no play verb; penalty names mention passes and kicks.
	rule("penalty_only", Matcher::StartsWith("penalty on"), PlayCategory::PenaltyOnly),
	rule("aborted_pass", Matcher::ContainsAll(&["(aborted)", "pass"]), PlayCategory::AbortedPlay { dropback: true }),
	rule("aborted_rush", Matcher::ContainsAll(&["(aborted)", "rush"]), PlayCategory::AbortedPlay { dropback: false }),
	ClassifierRule {
		name: "conversion",
		matcher: Matcher::ContainsAny(&["-point conversion", "-point attempt", "extra point"]),
		outcome: Outcome::Derived(conversion_category),
	},
	rule("lateral_rush", Matcher::Contains("rushed backward pass"), PlayCategory::Run),
	rule("pass", Matcher::Contains("pass"), PlayCategory::Pass),
	rule("spike", Matcher::Contains("spike"), PlayCategory::QbSpike),
	rule("sack", Matcher::Contains("sacked"), PlayCategory::Pass),
	rule("rush", Matcher::Contains("rushed"), PlayCategory::Run),
	rule("scramble", Matcher::Contains("scramble"), PlayCategory::QbScramble),
	rule("kneel", Matcher::Contains("kneel"), PlayCategory::QbKneel),
	rule("field_goal", Matcher::Contains("field goal"), PlayCategory::FieldGoal),
	rule("kickoff", Matcher::Either(&KICKOFF_TEXT, &KICKOFF_HEADING), PlayCategory::Kickoff),
	rule("free_kick", Matcher::ContainsAll(&["kicks", "yards from"]), PlayCategory::Kickoff),
	rule("punt", Matcher::ContainsAny(&["punt", "kicks"]), PlayCategory::Punt),
	rule("quarter_end", Matcher::ContainsAny(&["end quarter", "end of quarter"]), PlayCategory::NoPlay(NoPlayKind::QuarterEnd)),
	rule("two_minute_warning", Matcher::Contains("two minute warning"), PlayCategory::NoPlay(NoPlayKind::TwoMinuteWarning)),
	rule("game_end", Matcher::ContainsAny(&["end game", "end of game"]), PlayCategory::NoPlay(NoPlayKind::GameEnd)),
	rule("aborted", Matcher::Contains("aborted"), PlayCategory::AbortedPlay { dropback: false }),
	rule("penalty", Matcher::Contains("penalty"), PlayCategory::PenaltyOnly),
];

fn conversion_category(description: &str) -> PlayCategory {
	let points = if description.contains("three-point") {
		ConversionPoints::Three
	} else if description.contains("two-point") {
		ConversionPoints::Two
	} else {
		ConversionPoints::One
	};
	let method = if description.contains("extra point") {
		ConversionMethod::Kick
	} else if description.contains("pass") {
		ConversionMethod::Pass
	} else if description.contains("rush") || description.contains("scramble") {
		ConversionMethod::Run
	} else {
		ConversionMethod::Kick
	};
	PlayCategory::ConversionAttempt { points, method }
}

/// Classifies a play description. `heading` is the play's down & distance
/// title, which carries "KICKOFF" for kickoffs.
pub fn classify(description: &str, heading: &str) -> Result<PlayCategory, ClassifyError> {
	let lowercase = description.to_lowercase();
	let heading = heading.to_lowercase();

	RULES
		.iter()
		.find(|rule| rule.matcher.matches(&lowercase, &heading))
		.map(|rule| match rule.outcome {
			Outcome::Fixed(category) => category,
			Outcome::Derived(derive) => derive(&lowercase),
		})
		.ok_or_else(|| ClassifyError::unrecognized(description))
}

/// Rule names in evaluation order.
pub fn rule_names() -> impl Iterator<Item = &'static str> {
	RULES.iter().map(|rule| rule.name)
}
