use crate::feed::FeedId;
use crate::schema::game_context::GameContext;
use crate::schema::teams::TeamSide;
use serde::Serialize;

/// `numerator / denominator` rounded to `places` decimals, or `None` when
/// the denominator is zero.
pub fn ratio(numerator: f64, denominator: u16, places: i32) -> Option<f64> {
	(denominator > 0).then(|| {
		let scale = 10_f64.powi(places);
		(numerator / f64::from(denominator) * scale).round() / scale
	})
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PassingLine {
	pub completions: u16,
	pub attempts: u16,
	pub yards: i32,
	pub touchdowns: u16,
	pub interceptions: u16,
	/// Passer rating as printed by the feed.
	pub rating: Option<f64>,
	pub completion_pct: Option<f64>,
	pub yards_per_attempt: Option<f64>,
	pub adjusted_yards_per_attempt: Option<f64>,
	pub yards_per_completion: Option<f64>,
	/// College passing efficiency.
	pub cfb_rating: Option<f64>,
}

impl PassingLine {
	#[must_use]
	pub fn with_ratios(self) -> Self {
		let completions = f64::from(self.completions);
		let yards = f64::from(self.yards);
		let touchdowns = f64::from(self.touchdowns);
		let interceptions = f64::from(self.interceptions);
		Self {
			completion_pct: ratio(completions, self.attempts, 4),
			yards_per_attempt: ratio(yards, self.attempts, 3),
			adjusted_yards_per_attempt: ratio(yards + 20.0 * touchdowns - 45.0 * interceptions, self.attempts, 3),
			yards_per_completion: ratio(yards, self.completions, 3),
			cfb_rating: ratio(8.4 * yards + 330.0 * touchdowns + 100.0 * completions - 200.0 * interceptions, self.attempts, 3),
			..self
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RushingLine {
	pub attempts: u16,
	pub yards: i32,
	pub touchdowns: u16,
	pub long: i32,
	pub average: Option<f64>,
}

impl RushingLine {
	#[must_use]
	pub fn with_ratios(self) -> Self {
		Self {
			average: ratio(f64::from(self.yards), self.attempts, 3),
			..self
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReceivingLine {
	pub targets: u16,
	pub receptions: u16,
	pub yards: i32,
	pub touchdowns: u16,
	pub long: i32,
	pub average: Option<f64>,
	pub catch_pct: Option<f64>,
	pub yards_per_target: Option<f64>,
}

impl ReceivingLine {
	#[must_use]
	pub fn with_ratios(self) -> Self {
		let yards = f64::from(self.yards);
		Self {
			average: ratio(yards, self.receptions, 3),
			catch_pct: ratio(f64::from(self.receptions), self.targets, 4),
			yards_per_target: ratio(yards, self.targets, 3),
			..self
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FumbleLine {
	pub fumbles: u16,
	pub lost: u16,
	pub forced: u16,
	pub recovered: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DefenseLine {
	pub tackles: u16,
	pub solo: u16,
	/// Total tackles less solo tackles.
	pub assists: u16,
	pub tackles_for_loss: u16,
	/// Half sacks are credited, so this is fractional.
	pub sacks: f64,
	pub interceptions: u16,
	pub passes_defended: u16,
	pub touchdowns: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KickingLine {
	pub made: u16,
	pub attempts: u16,
	pub long: i32,
	pub pct: Option<f64>,
}

impl KickingLine {
	#[must_use]
	pub fn with_ratios(self) -> Self {
		Self {
			pct: ratio(f64::from(self.made), self.attempts, 4),
			..self
		}
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PuntingLine {
	pub punts: u16,
	pub average: f64,
	pub inside_20: u16,
	pub touchbacks: u16,
	pub long: i32,
	pub blocked: u16,
	pub gross_yards: Option<f64>,
}

impl PuntingLine {
	#[must_use]
	pub fn with_ratios(self) -> Self {
		Self {
			gross_yards: (self.punts > 0).then(|| f64::from(self.punts) * self.average),
			..self
		}
	}
}

/// Kick or punt returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ReturnLine {
	pub returns: u16,
	pub yards: i32,
	pub long: i32,
	pub touchdowns: u16,
	pub average: Option<f64>,
}

impl ReturnLine {
	#[must_use]
	pub fn with_ratios(self) -> Self {
		Self {
			average: ratio(f64::from(self.yards), self.returns, 3),
			..self
		}
	}
}

/// One player's box score for one game. A stat family is `None` when the
/// player does not appear in that table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerGameStats {
	pub game_id: String,
	pub ufl_game_id: String,
	pub season: i32,
	pub week: u8,
	pub team: String,
	pub team_type: TeamSide,
	pub player_id: FeedId,
	pub player_name: String,
	pub passing: Option<PassingLine>,
	pub rushing: Option<RushingLine>,
	pub receiving: Option<ReceivingLine>,
	pub fumbles: Option<FumbleLine>,
	pub defense: Option<DefenseLine>,
	pub kicking: Option<KickingLine>,
	pub punting: Option<PuntingLine>,
	pub kick_return: Option<ReturnLine>,
	pub punt_return: Option<ReturnLine>,
}

impl PlayerGameStats {
	pub fn new(context: &GameContext, side: TeamSide, player_id: FeedId, player_name: &str) -> Self {
		Self {
			game_id: context.game_id.clone(),
			ufl_game_id: context.ufl_game_id.clone(),
			season: context.season,
			week: context.week,
			team: context.teams.abbr(side).to_string(),
			team_type: side,
			player_id,
			player_name: player_name.to_string(),
			passing: None,
			rushing: None,
			receiving: None,
			fumbles: None,
			defense: None,
			kicking: None,
			punting: None,
			kick_return: None,
			punt_return: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_ratio_guards_zero_denominators() {
		let test_cases = vec![((12.0, 1, 3), Some(12.0)), ((1.0, 3, 4), Some(0.3333)), ((71.0, 3, 3), Some(23.667)), ((5.0, 0, 3), None)];

		for ((numerator, denominator, places), expected) in test_cases {
			assert_eq!(ratio(numerator, denominator, places), expected, "{numerator}/{denominator}");
		}
	}

	#[test]
	fn test_passing_ratios() {
		let line = PassingLine {
			completions: 1,
			attempts: 3,
			yards: 75,
			touchdowns: 1,
			..PassingLine::default()
		}
		.with_ratios();

		assert_eq!(line.completion_pct, Some(0.3333));
		assert_eq!(line.yards_per_attempt, Some(25.0));
		assert_eq!(line.adjusted_yards_per_attempt, Some(31.667));
		assert_eq!(line.yards_per_completion, Some(75.0));
		assert_eq!(line.cfb_rating, Some(353.333));
	}

	#[test]
	fn test_interceptions_lower_adjusted_yards() {
		let line = PassingLine {
			completions: 10,
			attempts: 20,
			yards: 200,
			touchdowns: 1,
			interceptions: 2,
			..PassingLine::default()
		}
		.with_ratios();

		assert_eq!(line.adjusted_yards_per_attempt, Some(6.5));
		assert_eq!(line.cfb_rating, Some(130.5));
	}

	#[test]
	fn test_no_attempts_leaves_ratios_empty() {
		let passing = PassingLine::default().with_ratios();
		assert_eq!(
			(passing.completion_pct, passing.yards_per_attempt, passing.adjusted_yards_per_attempt, passing.yards_per_completion, passing.cfb_rating),
			(None, None, None, None, None)
		);

		let receiving = ReceivingLine::default().with_ratios();
		assert_eq!((receiving.average, receiving.catch_pct, receiving.yards_per_target), (None, None, None));
		assert_eq!(PuntingLine::default().with_ratios().gross_yards, None);
		assert_eq!(ReturnLine::default().with_ratios().average, None);
		assert_eq!(KickingLine::default().with_ratios().pct, None);
	}
}
