use crate::error::GameClockError;
use serde::Serialize;
use std::str::FromStr;

pub const QUARTER_SECONDS: u16 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
	First,
	Second,
	Third,
	Fourth,
	Overtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Half {
	#[serde(rename = "Half1")]
	First,
	#[serde(rename = "Half2")]
	Second,
	Overtime,
}

impl Quarter {
	pub const fn number(self) -> u8 {
		match self {
			Self::First => 1,
			Self::Second => 2,
			Self::Third => 3,
			Self::Fourth => 4,
			Self::Overtime => 5,
		}
	}

	pub const fn half(self) -> Half {
		match self {
			Self::First | Self::Second => Half::First,
			Self::Third | Self::Fourth => Half::Second,
			Self::Overtime => Half::Overtime,
		}
	}

	/// Quarter from the leading digit of a play's period label ("3rd", "3").
	pub fn from_period(period: &str) -> Option<Self> {
		match period.trim().chars().next()? {
			'1' => Some(Self::First),
			'2' => Some(Self::Second),
			'3' => Some(Self::Third),
			'4' => Some(Self::Fourth),
			'5' => Some(Self::Overtime),
			_ if period.trim().eq_ignore_ascii_case("ot") => Some(Self::Overtime),
			_ => None,
		}
	}
}

impl Half {
	pub const fn number(self) -> u8 {
		match self {
			Self::First => 1,
			Self::Second => 2,
			Self::Overtime => 3,
		}
	}

	pub const fn label(self) -> &'static str {
		match self {
			Self::First => "Half1",
			Self::Second => "Half2",
			Self::Overtime => "Overtime",
		}
	}
}

/// Parses a section title such as "3RD QUARTER" or "OVERTIME".
impl FromStr for Quarter {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_uppercase().as_str() {
			"1ST QUARTER" => Ok(Self::First),
			"2ND QUARTER" => Ok(Self::Second),
			"3RD QUARTER" => Ok(Self::Third),
			"4TH QUARTER" => Ok(Self::Fourth),
			"OVERTIME" => Ok(Self::Overtime),
			_ => Err(GameClockError::invalid_quarter_error(s)),
		}
	}
}

/// Minutes left in a quarter (0-15).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minutes(u8);

impl Minutes {
	pub const fn new(value: u8) -> Result<Self, GameClockError> {
		if value > 15 {
			Err(GameClockError::invalid_minutes_error(value))
		} else {
			Ok(Self(value))
		}
	}
}

impl FromStr for Minutes {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s.trim().parse::<u8>()?)
	}
}

/// Seconds component of a clock reading (0-59).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seconds(u8);

impl Seconds {
	pub const fn new(value: u8) -> Result<Self, GameClockError> {
		if value >= 60 {
			Err(GameClockError::invalid_seconds_error(value))
		} else {
			Ok(Self(value))
		}
	}
}

impl FromStr for Seconds {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s.trim().parse::<u8>()?)
	}
}

/// A "M:SS" reading of the quarter clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
	minutes: Minutes,
	seconds: Seconds,
}

impl GameClock {
	/// Reading at the start of a quarter.
	pub const FULL_QUARTER: Self = Self {
		minutes: Minutes(15),
		seconds: Seconds(0),
	};

	pub const fn new(minutes: Minutes, seconds: Seconds) -> Result<Self, GameClockError> {
		if minutes.0 == 15 && seconds.0 > 0 {
			return Err(GameClockError::invalid_seconds_error(seconds.0));
		}
		Ok(Self { minutes, seconds })
	}

	pub const fn quarter_seconds_remaining(self) -> u16 {
		self.minutes.0 as u16 * 60 + self.seconds.0 as u16
	}
}

impl FromStr for GameClock {
	type Err = GameClockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (minutes, seconds) = s.trim().split_once(':').ok_or_else(|| GameClockError::invalid_time_format_error(s))?;
		Self::new(minutes.parse()?, seconds.parse()?)
	}
}

/// Remaining time at the quarter, half and game level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClockSnapshot {
	pub quarter_seconds_remaining: u16,
	pub half_seconds_remaining: u16,
	pub game_seconds_remaining: u16,
}

/// Derives the clock snapshot for a play. Overtime reports zeros at every
/// level; the half and game values only count the quarters still to come
/// after `quarter`.
pub const fn compute_clock(quarter: Quarter, clock: GameClock) -> ClockSnapshot {
	let quarter_seconds = clock.quarter_seconds_remaining();
	let half_quarters_after = match quarter {
		Quarter::First | Quarter::Third => 1,
		Quarter::Second | Quarter::Fourth => 0,
		Quarter::Overtime => return ClockSnapshot {
			quarter_seconds_remaining: 0,
			half_seconds_remaining: 0,
			game_seconds_remaining: 0,
		},
	};
	let game_quarters_after = 4 - quarter.number() as u16;

	ClockSnapshot {
		quarter_seconds_remaining: quarter_seconds,
		half_seconds_remaining: half_quarters_after * QUARTER_SECONDS + quarter_seconds,
		game_seconds_remaining: game_quarters_after * QUARTER_SECONDS + quarter_seconds,
	}
}
