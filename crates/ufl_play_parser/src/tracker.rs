//! Game state carried from one play to the next.

use crate::error::FeedError;
use crate::feed::FeedId;
use crate::schema::{compute_clock, ClockSnapshot, GameClock, GameTeams, Half, Quarter, TeamSide};
use std::str::FromStr;
use tracing::{debug, warn};

pub const TIMEOUTS_PER_HALF: u8 = 3;

/// Point-in-time copy of the tracker, taken around each play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSnapshot {
	pub quarter: Quarter,
	pub clock: ClockSnapshot,
	pub possession: TeamSide,
	pub away_score: u16,
	pub home_score: u16,
	pub away_timeouts: u8,
	pub home_timeouts: u8,
}

impl StateSnapshot {
	pub const fn score(&self, side: TeamSide) -> u16 {
		match side {
			TeamSide::Away => self.away_score,
			TeamSide::Home => self.home_score,
		}
	}

	pub const fn timeouts(&self, side: TeamSide) -> u8 {
		match side {
			TeamSide::Away => self.away_timeouts,
			TeamSide::Home => self.home_timeouts,
		}
	}

	pub const fn half(&self) -> Half {
		self.quarter.half()
	}
}

#[derive(Debug, Clone)]
pub struct GameState {
	teams: GameTeams,
	quarter: Quarter,
	clock: ClockSnapshot,
	possession: Option<TeamSide>,
	away_score: u16,
	home_score: u16,
	away_timeouts: u8,
	home_timeouts: u8,
	opening_kickoff: Option<TeamSide>,
}

impl GameState {
	pub const fn new(teams: GameTeams) -> Self {
		Self {
			teams,
			quarter: Quarter::First,
			clock: ClockSnapshot {
				quarter_seconds_remaining: 900,
				half_seconds_remaining: 1800,
				game_seconds_remaining: 3600,
			},
			possession: None,
			away_score: 0,
			home_score: 0,
			away_timeouts: TIMEOUTS_PER_HALF,
			home_timeouts: TIMEOUTS_PER_HALF,
			opening_kickoff: None,
		}
	}

	pub const fn teams(&self) -> &GameTeams {
		&self.teams
	}

	pub const fn quarter(&self) -> Quarter {
		self.quarter
	}

	pub const fn possession(&self) -> Option<TeamSide> {
		self.possession
	}

	/// Enters a new quarter from its section title. The clock restarts and
	/// timeouts reset to the per-half allowance when the third quarter starts.
	pub fn apply_quarter_boundary(&mut self, title: &str) -> Result<Quarter, FeedError> {
		let quarter = Quarter::from_str(title)?;
		self.clock = compute_clock(quarter, GameClock::FULL_QUARTER);
		if quarter == Quarter::Third {
			self.away_timeouts = TIMEOUTS_PER_HALF;
			self.home_timeouts = TIMEOUTS_PER_HALF;
		}
		debug!(title, quarter = quarter.number(), "entering quarter");
		self.quarter = quarter;
		Ok(quarter)
	}

	/// Resolves the drive's team token and hands possession to that team.
	pub fn apply_drive_start(&mut self, token: &FeedId) -> Result<TeamSide, FeedError> {
		let side = self.teams.side_of_token(token)?;
		self.possession = Some(side);
		Ok(side)
	}

	/// Updates the clock from a play's "M:SS" reading. `period` overrides the
	/// section quarter when the play carries its own.
	pub fn apply_clock(&mut self, period: Option<Quarter>, clock: GameClock) -> ClockSnapshot {
		let quarter = period.unwrap_or(self.quarter);
		self.clock = compute_clock(quarter, clock);
		self.clock
	}

	pub fn apply_score_change(&mut self, side: TeamSide, points: u8) {
		let score = match side {
			TeamSide::Away => &mut self.away_score,
			TeamSide::Home => &mut self.home_score,
		};
		*score = score.saturating_add(u16::from(points));
	}

	/// Charges a timeout. The count never goes below zero.
	pub fn apply_timeout(&mut self, side: TeamSide) {
		let remaining = match side {
			TeamSide::Away => &mut self.away_timeouts,
			TeamSide::Home => &mut self.home_timeouts,
		};
		if *remaining == 0 {
			warn!(team = %self.teams.abbr(side), "timeout charged with none remaining");
			return;
		}
		*remaining -= 1;
	}

	/// Remembers which team received the opening kickoff.
	pub fn apply_kickoff(&mut self, receiving: TeamSide) {
		if self.opening_kickoff.is_none() {
			self.opening_kickoff = Some(receiving);
		}
	}

	/// True when the home team kicked off to open the game.
	pub fn home_opening_kickoff(&self) -> bool {
		self.opening_kickoff == Some(TeamSide::Away)
	}

	pub fn snapshot(&self) -> Result<StateSnapshot, FeedError> {
		let possession = self.possession.ok_or(FeedError::MissingField { field: "groups[].entityLink" })?;
		Ok(StateSnapshot {
			quarter: self.quarter,
			clock: self.clock,
			possession,
			away_score: self.away_score,
			home_score: self.home_score,
			away_timeouts: self.away_timeouts,
			home_timeouts: self.home_timeouts,
		})
	}

	pub const fn score(&self, side: TeamSide) -> u16 {
		match side {
			TeamSide::Away => self.away_score,
			TeamSide::Home => self.home_score,
		}
	}
}
