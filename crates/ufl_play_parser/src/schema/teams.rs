use crate::error::FeedError;
use crate::feed::{FeedId, Header, TeamRef};
use serde::Serialize;
use std::fmt;

/// The feed lists the away team on the left and the home team on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
	Away,
	Home,
}

impl TeamSide {
	pub const fn opponent(self) -> Self {
		match self {
			Self::Away => Self::Home,
			Self::Home => Self::Away,
		}
	}
}

impl fmt::Display for TeamSide {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Away => write!(f, "away"),
			Self::Home => write!(f, "home"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
	pub id: FeedId,
	pub abbr: String,
}

impl From<&TeamRef> for Team {
	fn from(team: &TeamRef) -> Self {
		Self {
			id: team.entity_link.token().clone(),
			abbr: team.name.trim().to_string(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTeams {
	pub away: Team,
	pub home: Team,
}

impl GameTeams {
	pub fn new(away: Team, home: Team) -> Self {
		Self { away, home }
	}

	pub fn from_header(header: &Header) -> Self {
		Self::new(Team::from(&header.left_team), Team::from(&header.right_team))
	}

	pub const fn team(&self, side: TeamSide) -> &Team {
		match side {
			TeamSide::Away => &self.away,
			TeamSide::Home => &self.home,
		}
	}

	pub fn abbr(&self, side: TeamSide) -> &str {
		&self.team(side).abbr
	}

	/// Resolves a drive's team token. Unknown tokens abort the game.
	pub fn side_of_token(&self, token: &FeedId) -> Result<TeamSide, FeedError> {
		if token == &self.away.id {
			Ok(TeamSide::Away)
		} else if token == &self.home.id {
			Ok(TeamSide::Home)
		} else {
			Err(FeedError::unknown_team_token(token.as_str()))
		}
	}

	/// Resolves an abbreviation found in a play description.
	pub fn side_of_abbr(&self, abbr: &str) -> Option<TeamSide> {
		let abbr = abbr.trim();
		if abbr.eq_ignore_ascii_case(&self.away.abbr) {
			Some(TeamSide::Away)
		} else if abbr.eq_ignore_ascii_case(&self.home.abbr) {
			Some(TeamSide::Home)
		} else {
			None
		}
	}
}
