use crate::error::YardsError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static YARDS_GAINED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:for|gain of) (-?\d+) yards?|for no gain").unwrap());

/// A field position as printed in the feed: "CHI 45", "50", "NYG end zone".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YardLine {
	/// Team abbreviation naming the half of the field, absent at midfield.
	pub side: Option<String>,
	pub number: u8,
	pub end_zone: bool,
}

impl YardLine {
	/// Distance to the opponent's goal line from `posteam`'s perspective.
	///
	/// A spot in the possession team's own half is `100 - n`; a spot in the
	/// opponent's half is `n`. The possession team's own end zone is 100 and
	/// the opponent's end zone is 0.
	pub fn yardline_100(&self, posteam: &str) -> u8 {
		let own_half = self.side.as_deref().is_some_and(|side| side.eq_ignore_ascii_case(posteam));
		match (self.end_zone, own_half) {
			(true, true) => 100,
			(true, false) => 0,
			(false, true) => 100 - self.number,
			(false, false) => self.number,
		}
	}

	pub fn side_of_field(&self) -> &str {
		self.side.as_deref().unwrap_or("MID")
	}
}

impl FromStr for YardLine {
	type Err = YardsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim().trim_end_matches('.');
		let trimmed = trimmed.strip_prefix("the ").unwrap_or(trimmed);
		let words: Vec<&str> = trimmed.split_whitespace().collect();

		match words.as_slice() {
			[number] => {
				let number = parse_yard_number(number, s)?;
				Ok(Self { side: None, number, end_zone: false })
			}
			[side, number] => {
				let number = parse_yard_number(number, s)?;
				Ok(Self {
					side: Some((*side).to_string()),
					number,
					end_zone: false,
				})
			}
			[side, end, zone] if end.eq_ignore_ascii_case("end") && zone.eq_ignore_ascii_case("zone") => Ok(Self {
				side: Some((*side).to_string()),
				number: 0,
				end_zone: true,
			}),
			_ => Err(YardsError::InvalidYardLineFormat(s.to_string())),
		}
	}
}

fn parse_yard_number(number: &str, input: &str) -> Result<u8, YardsError> {
	let value = number.parse::<u8>().map_err(|_| YardsError::InvalidYardLineFormat(input.to_string()))?;
	if value > 50 {
		return Err(YardsError::InvalidYardLine { value });
	}
	Ok(value)
}

/// Normalizes a feed yard line against the team in possession.
pub fn yardline_100(text: &str, posteam: &str) -> Result<u8, YardsError> {
	Ok(YardLine::from_str(text)?.yardline_100(posteam))
}

/// Longest gain or loss a single play can cover, end line to end line.
pub const MAX_PLAY_YARDS: i16 = 110;

/// Parses a captured yardage such as "12" or "-3".
pub fn parse_signed_yards(text: &str) -> Result<i16, YardsError> {
	let value = text.trim().parse::<i16>().map_err(|_| YardsError::InvalidYardsFormat(text.to_string()))?;
	if !(-MAX_PLAY_YARDS..=MAX_PLAY_YARDS).contains(&value) {
		return Err(YardsError::YardsOutOfRange { value });
	}
	Ok(value)
}

/// Net yards read from a free-form description ("for 7 yards", "for no gain").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Yards(pub i16);

impl FromStr for Yards {
	type Err = YardsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let caps = YARDS_GAINED.captures(s).ok_or(YardsError::NoYardsInfo)?;
		caps.get(1).map_or(Ok(Self(0)), |yards| parse_signed_yards(yards.as_str()).map(Self))
	}
}
