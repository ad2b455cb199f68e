use crate::error::DownAndDistanceError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Down {
	First,
	Second,
	Third,
	Fourth,
}

impl Down {
	pub const fn number(self) -> u8 {
		match self {
			Self::First => 1,
			Self::Second => 2,
			Self::Third => 3,
			Self::Fourth => 4,
		}
	}
}

impl FromStr for Down {
	type Err = DownAndDistanceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let digits = s.trim().trim_end_matches(|c: char| c.is_ascii_alphabetic());
		match digits {
			"1" => Ok(Self::First),
			"2" => Ok(Self::Second),
			"3" => Ok(Self::Third),
			"4" => Ok(Self::Fourth),
			_ => Err(DownAndDistanceError::InvalidDown { down: s.to_string() }),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
	Yards(u8),
	/// "and Goal": the distance is the remaining field.
	Goal,
}

impl FromStr for Distance {
	type Err = DownAndDistanceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		if trimmed.eq_ignore_ascii_case("goal") {
			return Ok(Self::Goal);
		}
		trimmed
			.parse::<u8>()
			.map(Self::Yards)
			.map_err(|_| DownAndDistanceError::InvalidDistance { distance: s.to_string() })
	}
}

/// The down & distance heading of a play, e.g. "3rd and 7" or "1st & Goal".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownAndDistance {
	pub down: Down,
	pub distance: Distance,
}

impl DownAndDistance {
	/// Yards to go, resolving "Goal" against the ball spot.
	pub fn yards_to_go(&self, yardline_100: Option<u8>) -> u8 {
		match self.distance {
			Distance::Yards(yards) => yards,
			Distance::Goal => yardline_100.unwrap_or(0),
		}
	}
}

impl FromStr for DownAndDistance {
	type Err = DownAndDistanceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lowercase = s.trim().to_lowercase();
		let (down, distance) = lowercase
			.split_once(" and ")
			.or_else(|| lowercase.split_once(" & "))
			.ok_or_else(|| DownAndDistanceError::invalid_format(s))?;

		Ok(Self {
			down: down.parse()?,
			distance: distance.parse()?,
		})
	}
}

/// True for headings that carry no down, e.g. "KICKOFF" or "PAT".
pub fn is_untimed_down_heading(title: &str) -> bool {
	let lowercase = title.trim().to_lowercase();
	!(lowercase.contains(" and ") || lowercase.contains(" & "))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_down_and_distance_from_str() {
		let test_cases = vec![
			("1st and 10", Ok((1, Distance::Yards(10)))),
			("3rd & 7", Ok((3, Distance::Yards(7)))),
			("2 and 4", Ok((2, Distance::Yards(4)))),
			("4th and Goal", Ok((4, Distance::Goal))),
			("KICKOFF", Err(DownAndDistanceError::invalid_format("KICKOFF"))),
			("5th and 2", Err(DownAndDistanceError::InvalidDown { down: "5th".to_string() })),
			("1st and long", Err(DownAndDistanceError::InvalidDistance { distance: "long".to_string() })),
		];

		for (input, expected) in test_cases {
			let actual = DownAndDistance::from_str(input).map(|dd| (dd.down.number(), dd.distance));
			assert_eq!(actual, expected, "heading {input}");
		}
	}

	#[test]
	fn test_goal_to_go_distance_uses_spot() {
		let dd = DownAndDistance::from_str("1st and Goal").unwrap();
		assert_eq!(dd.yards_to_go(Some(6)), 6);
		assert_eq!(dd.yards_to_go(None), 0);

		let dd = DownAndDistance::from_str("2nd and 8").unwrap();
		assert_eq!(dd.yards_to_go(Some(40)), 8);
	}

	#[test]
	fn test_untimed_headings() {
		assert!(is_untimed_down_heading("KICKOFF"));
		assert!(is_untimed_down_heading(""));
		assert!(!is_untimed_down_heading("3rd and 2"));
	}
}
