use super::rushing::run_direction;
use super::PlayDetailsBuilder;
use crate::parsers::rules::{capture, compile, owned, Template, TemplateSet};
use crate::schema::{ConversionPoints, PlayCategory};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RESULT: Lazy<Regex> = Lazy::new(|| {
	compile(r"(?i:(?:one|two|three)-point (?:conversion )?attempt|extra point)(?: (?i:is|was))? (?P<result>(?i:succeeds|succeeded|successful|fails|failed|no good|good|blocked))")
});

static PARTICIPANTS: Lazy<TemplateSet<PlayDetailsBuilder>> = Lazy::new(|| {
	TemplateSet::new(
		"conversion",
		vec![
			Template::new(
				"pass",
				r"(?P<passer>{PLAYER}) pass(?: (?i:short|deep))?(?: (?i:left|middle|right))?(?: (?i:complete|incomplete))?(?: (?:to|intended for) (?P<receiver>{PLAYER}))?",
				passed,
			),
			Template::new("rush", r"(?P<rusher>{PLAYER}) (?i:rushed|scrambles)(?: (?P<direction>{DIRECTION}))?", rushed),
			Template::new("kick", r"(?P<kicker>{PLAYER}) (?i:extra point)", kicked),
		],
	)
});

/// `success` or `failure` from the feed's result wording.
pub fn conversion_result(text: &str) -> &'static str {
	let text = text.to_lowercase();
	if text.starts_with("succe") || text == "good" {
		"success"
	} else {
		"failure"
	}
}

fn passed(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	b.details.passing.passer = owned(caps, "passer");
	b.details.passing.receiver = owned(caps, "receiver");
	b.details.flags.is_qb_dropback = true;
}

fn rushed(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	let (location, gap) = capture(caps, "direction").map(run_direction).unwrap_or_default();
	let rushing = &mut b.details.rushing;
	rushing.rusher = owned(caps, "rusher");
	rushing.run_location = location;
	rushing.run_gap = gap;
}

fn kicked(caps: &Captures<'_>, b: &mut PlayDetailsBuilder) {
	b.details.kicking.kicker_player_name = owned(caps, "kicker");
}

/// Reads the attempt's participants and result. Conversion plays carry no
/// yardage; a play matched by neither a participant sentence nor a result
/// is reported as a miss.
pub(super) fn extract(description: &str, b: &mut PlayDetailsBuilder) -> bool {
	let PlayCategory::ConversionAttempt { points, .. } = b.category() else {
		return false;
	};
	let participants = PARTICIPANTS.apply_first(description, b).is_some();
	let result = RESULT
		.captures(description)
		.and_then(|caps| capture(&caps, "result").map(conversion_result))
		.map(str::to_string);
	let matched = participants || result.is_some();

	b.details.yards_gained = 0;
	let conversion = &mut b.details.conversion;
	match points {
		ConversionPoints::One => {
			conversion.is_one_point_attempt = true;
			conversion.one_point_conv_result = result;
		}
		ConversionPoints::Two => {
			conversion.is_two_point_attempt = true;
			conversion.two_point_conv_result = result;
		}
		ConversionPoints::Three => {
			conversion.is_three_point_attempt = true;
			conversion.three_point_conv_result = result;
		}
	}
	matched
}

#[cfg(test)]
mod tests {
	use super::super::extract as extract_details;
	use super::super::tests::situation;
	use super::*;
	use crate::schema::ConversionMethod;

	#[test]
	fn test_conversion_result() {
		let test_cases = vec![("SUCCEEDS", "success"), ("successful", "success"), ("GOOD", "success"), ("FAILS", "failure"), ("No Good", "failure"), ("blocked", "failure")];

		for (input, expected) in test_cases {
			assert_eq!(conversion_result(input), expected, "{input}");
		}
	}

	#[test]
	fn test_conversion_attempts() {
		let test_cases = vec![
			(
				"TWO-POINT CONVERSION ATTEMPT. Q.Back pass complete to T.End. TWO-POINT ATTEMPT SUCCEEDS.",
				ConversionPoints::Two,
				ConversionMethod::Pass,
				Some("success"),
			),
			(
				"THREE-POINT CONVERSION ATTEMPT. A.Back rushed up the middle. THREE-POINT ATTEMPT FAILS.",
				ConversionPoints::Three,
				ConversionMethod::Run,
				Some("failure"),
			),
			(
				"ONE-POINT CONVERSION ATTEMPT. A.Back rushed left guard. ONE-POINT ATTEMPT SUCCEEDS.",
				ConversionPoints::One,
				ConversionMethod::Run,
				Some("success"),
			),
			("K.Leg extra point is GOOD, Center-L.Snap.", ConversionPoints::One, ConversionMethod::Kick, Some("success")),
		];

		for (description, points, method, result) in test_cases {
			let extraction = extract_details(PlayCategory::ConversionAttempt { points, method }, description, &situation(0, 0, 2));
			let details = extraction.details;
			assert!(extraction.faults.is_empty(), "{description}");
			let actual = match points {
				ConversionPoints::One => (details.conversion.is_one_point_attempt, details.conversion.one_point_conv_result.as_deref()),
				ConversionPoints::Two => (details.conversion.is_two_point_attempt, details.conversion.two_point_conv_result.as_deref()),
				ConversionPoints::Three => (details.conversion.is_three_point_attempt, details.conversion.three_point_conv_result.as_deref()),
			};
			assert_eq!(actual, (true, result), "{description}");
			assert_eq!(details.yards_gained, 0);
		}
	}

	#[test]
	fn test_conversion_participants() {
		let category = PlayCategory::ConversionAttempt {
			points: ConversionPoints::Two,
			method: ConversionMethod::Pass,
		};
		let extraction = extract_details(category, "TWO-POINT CONVERSION ATTEMPT. Q.Back pass complete to T.End. TWO-POINT ATTEMPT SUCCEEDS.", &situation(0, 0, 5));
		assert_eq!(extraction.details.passing.passer.as_deref(), Some("Q.Back"));
		assert_eq!(extraction.details.passing.receiver.as_deref(), Some("T.End"));

		let category = PlayCategory::ConversionAttempt {
			points: ConversionPoints::One,
			method: ConversionMethod::Run,
		};
		let extraction = extract_details(category, "ONE-POINT CONVERSION ATTEMPT. A.Back rushed left guard. ONE-POINT ATTEMPT SUCCEEDS.", &situation(0, 0, 2));
		assert_eq!(extraction.details.rushing.rusher.as_deref(), Some("A.Back"));
		assert_eq!(extraction.details.rushing.run_gap.as_deref(), Some("guard"));
	}
}
