use crate::error::ScoringEventError;
use crate::schema::play_type::{ConversionPoints, PlayCategory};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Points {
	One,
	Two,
	Three,
	Six,
}

impl Points {
	pub const fn value(self) -> u8 {
		match self {
			Self::One => 1,
			Self::Two => 2,
			Self::Three => 3,
			Self::Six => 6,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringEventType {
	Touchdown,
	FieldGoal,
	Conversion(ConversionPoints),
	Safety,
}

impl ScoringEventType {
	/// Scoring event behind a play the feed flagged as changing the score.
	/// The category wins over the wording so a try is never read as a
	/// touchdown.
	pub fn infer(category: Option<PlayCategory>, description: &str) -> Result<Self, ScoringEventError> {
		match category {
			Some(PlayCategory::ConversionAttempt { points, .. }) => Ok(Self::Conversion(points)),
			Some(PlayCategory::FieldGoal) if !description.to_lowercase().contains("touchdown") => Ok(Self::FieldGoal),
			_ => description.parse(),
		}
	}

	pub const fn points(self) -> Points {
		match self {
			Self::Touchdown => Points::Six,
			Self::FieldGoal => Points::Three,
			Self::Conversion(ConversionPoints::One) => Points::One,
			Self::Conversion(ConversionPoints::Two) | Self::Safety => Points::Two,
			Self::Conversion(ConversionPoints::Three) => Points::Three,
		}
	}
}

impl FromStr for ScoringEventType {
	type Err = ScoringEventError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lowercase = s.to_lowercase();
		match lowercase {
			s if s.contains("one-point") || s.contains("extra point") => Ok(Self::Conversion(ConversionPoints::One)),
			s if s.contains("two-point") => Ok(Self::Conversion(ConversionPoints::Two)),
			s if s.contains("three-point") => Ok(Self::Conversion(ConversionPoints::Three)),
			s if s.contains("touchdown") => Ok(Self::Touchdown),
			s if s.contains("field goal") => Ok(Self::FieldGoal),
			s if s.contains("safety") => Ok(Self::Safety),
			_ => Err(ScoringEventError::UnknownScoringEventType { input: s.to_string() }),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::play_type::ConversionMethod;

	#[test]
	fn test_scoring_event_from_str() {
		let test_cases = vec![
			("M.Diaz rushed right end to NYG 30 for 8 yards. TOUCHDOWN.", ScoringEventType::Touchdown, 6),
			("K.Leg 44 yard field goal attempt is GOOD, Center-L.Snap.", ScoringEventType::FieldGoal, 3),
			("TWO-POINT CONVERSION ATTEMPT. A.Back rushed up the middle. TWO-POINT ATTEMPT SUCCEEDS.", ScoringEventType::Conversion(ConversionPoints::Two), 2),
			("Q.Back sacked in the end zone for -6 yards. SAFETY.", ScoringEventType::Safety, 2),
		];

		for (input, expected, points) in test_cases {
			let event = ScoringEventType::from_str(input).unwrap();
			assert_eq!(event, expected, "{input}");
			assert_eq!(event.points().value(), points);
		}
	}

	#[test]
	fn test_infer_prefers_category() {
		let category = PlayCategory::ConversionAttempt {
			points: ConversionPoints::Three,
			method: ConversionMethod::Pass,
		};
		let event = ScoringEventType::infer(Some(category), "Q.Back pass complete to T.End for a TOUCHDOWN").unwrap();
		assert_eq!(event.points(), Points::Three);

		let event = ScoringEventType::infer(Some(PlayCategory::FieldGoal), "K.Leg 30 yard field goal attempt is GOOD,").unwrap();
		assert_eq!(event, ScoringEventType::FieldGoal);
	}

	#[test]
	fn test_scoring_event_errors() {
		for input in ["Timeout #1 by DAL.", "End Quarter", ""] {
			assert!(ScoringEventType::infer(None, input).is_err(), "{input}");
		}
	}
}
