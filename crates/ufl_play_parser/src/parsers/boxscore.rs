//! Player box scores from the payload's per-team stat tables.
//!
//! Each team section holds one table per stat family. Rows up to the
//! "TOTALS" line are players; a player listed in several tables is merged
//! into a single [`PlayerGameStats`].

use crate::error::BoxscoreError;
use crate::feed::boxscore::TableRow;
use crate::feed::{EventPayload, Header, TeamRef};
use crate::schema::{
	DefenseLine, FumbleLine, GameContext, KickingLine, PassingLine, PlayerGameStats, PuntingLine, ReceivingLine, ReturnLine, RushingLine, TeamSide,
};
use std::str::FromStr;
use tracing::debug;

/// The team-versus-team summary section; it carries no player rows.
const MATCHUP: &str = "MATCHUP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatTable {
	Passing,
	Rushing,
	Receiving,
	Defense,
	Fumbles,
	KickReturn,
	PuntReturn,
	Kicking,
	Punting,
}

impl FromStr for StatTable {
	type Err = BoxscoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_uppercase().as_str() {
			"PASSING" => Ok(Self::Passing),
			"RUSHING" => Ok(Self::Rushing),
			"RECEIVING" => Ok(Self::Receiving),
			"DEFENSIVE" | "DEFENSE" => Ok(Self::Defense),
			"FUMBLES" => Ok(Self::Fumbles),
			"KICK RETURN" | "KICK RETURNS" => Ok(Self::KickReturn),
			"PUNT RETURN" | "PUNT RETURNS" => Ok(Self::PuntReturn),
			"KICKING" => Ok(Self::Kicking),
			"PUNTING" => Ok(Self::Punting),
			_ => Err(BoxscoreError::unknown_table(s)),
		}
	}
}

impl StatTable {
	const fn name(self) -> &'static str {
		match self {
			Self::Passing => "passing",
			Self::Rushing => "rushing",
			Self::Receiving => "receiving",
			Self::Defense => "defense",
			Self::Fumbles => "fumbles",
			Self::KickReturn => "kick_return",
			Self::PuntReturn => "punt_return",
			Self::Kicking => "kicking",
			Self::Punting => "punting",
		}
	}

	/// Reads one player row into `player`, using the feed's column order.
	fn apply(self, columns: &Columns<'_>, player: &mut PlayerGameStats) -> Result<(), BoxscoreError> {
		match self {
			Self::Passing => {
				let (completions, attempts) = columns.fraction(1)?;
				let line = PassingLine {
					completions,
					attempts,
					yards: columns.number(3)?,
					touchdowns: columns.number(5)?,
					interceptions: columns.number(6)?,
					rating: columns.decimal(7)?,
					..PassingLine::default()
				};
				player.passing = Some(line.with_ratios());
			}
			Self::Rushing => {
				let line = RushingLine {
					attempts: columns.number(1)?,
					yards: columns.number(2)?,
					touchdowns: columns.number(4)?,
					long: columns.long(5)?,
					average: None,
				};
				player.rushing = Some(line.with_ratios());
			}
			Self::Receiving => {
				let line = ReceivingLine {
					receptions: columns.number(1)?,
					yards: columns.number(2)?,
					touchdowns: columns.number(4)?,
					long: columns.long(5)?,
					targets: columns.number(6)?,
					..ReceivingLine::default()
				};
				player.receiving = Some(line.with_ratios());
			}
			Self::Defense => {
				let tackles: u16 = columns.number(1)?;
				let solo: u16 = columns.number(2)?;
				player.defense = Some(DefenseLine {
					tackles,
					solo,
					assists: tackles.saturating_sub(solo),
					sacks: columns.decimal(3)?.unwrap_or_default(),
					tackles_for_loss: columns.number(4)?,
					interceptions: columns.number(5)?,
					passes_defended: columns.number(6)?,
					touchdowns: columns.number(7)?,
				});
			}
			Self::Fumbles => {
				player.fumbles = Some(FumbleLine {
					fumbles: columns.number(1)?,
					lost: columns.number(2)?,
					forced: columns.number(3)?,
					recovered: columns.number(4)?,
				});
			}
			Self::KickReturn | Self::PuntReturn => {
				let line = ReturnLine {
					returns: columns.number(1)?,
					yards: columns.number(2)?,
					long: columns.long(4)?,
					touchdowns: columns.number(5)?,
					average: None,
				}
				.with_ratios();
				if self == Self::KickReturn {
					player.kick_return = Some(line);
				} else {
					player.punt_return = Some(line);
				}
			}
			Self::Kicking => {
				let (made, attempts) = columns.fraction(1)?;
				let line = KickingLine {
					made,
					attempts,
					long: columns.long(3)?,
					pct: None,
				};
				player.kicking = Some(line.with_ratios());
			}
			Self::Punting => {
				let line = PuntingLine {
					punts: columns.number(1)?,
					average: columns.decimal(2)?.unwrap_or_default(),
					inside_20: columns.number(3)?,
					touchbacks: columns.number(4)?,
					long: columns.long(5)?,
					blocked: columns.number(6)?,
					gross_yards: None,
				};
				player.punting = Some(line.with_ratios());
			}
		}
		Ok(())
	}
}

/// Typed access to the cells of one player row.
struct Columns<'r> {
	table: &'static str,
	row: &'r TableRow,
}

/// The feed prints a dash or nothing where a player has no stat.
fn is_blank(text: &str) -> bool {
	text.chars().all(|c| c == '-')
}

impl Columns<'_> {
	fn text(&self, index: usize) -> Result<&str, BoxscoreError> {
		self.row.cell(index).ok_or(BoxscoreError::MissingColumn { table: self.table, index })
	}

	fn parse<T: FromStr + Default>(&self, text: &str) -> Result<T, BoxscoreError> {
		if is_blank(text) {
			return Ok(T::default());
		}
		text.parse().map_err(|_| BoxscoreError::invalid_value(self.table, text))
	}

	fn number<T: FromStr + Default>(&self, index: usize) -> Result<T, BoxscoreError> {
		self.parse(self.text(index)?)
	}

	/// Longest gain; a touchdown is marked with a trailing "t".
	fn long(&self, index: usize) -> Result<i32, BoxscoreError> {
		self.parse(self.text(index)?.trim_end_matches(['t', 'T']))
	}

	fn decimal(&self, index: usize) -> Result<Option<f64>, BoxscoreError> {
		let text = self.text(index)?;
		if is_blank(text) {
			return Ok(None);
		}
		text.parse().map(Some).map_err(|_| BoxscoreError::invalid_value(self.table, text))
	}

	/// "made/attempted" cells such as "14/22".
	fn fraction(&self, index: usize) -> Result<(u16, u16), BoxscoreError> {
		let text = self.text(index)?;
		if is_blank(text) {
			return Ok((0, 0));
		}
		let (made, attempted) = text.split_once('/').ok_or_else(|| BoxscoreError::invalid_value(self.table, text))?;
		Ok((self.parse(made.trim())?, self.parse(attempted.trim())?))
	}
}

fn names_team(team: &TeamRef, title: &str) -> bool {
	team.long_name.iter().map(String::as_str).chain([team.name.as_str()]).any(|name| name.trim().eq_ignore_ascii_case(title))
}

/// Team sections are titled with the team's nickname ("RENEGADES").
fn section_side(header: &Header, title: &str) -> Option<TeamSide> {
	let title = title.trim();
	if names_team(&header.left_team, title) {
		Some(TeamSide::Away)
	} else if names_team(&header.right_team, title) {
		Some(TeamSide::Home)
	} else {
		None
	}
}

fn player_entry<'p>(players: &'p mut Vec<PlayerGameStats>, context: &GameContext, side: TeamSide, columns: &Columns<'_>) -> Result<&'p mut PlayerGameStats, BoxscoreError> {
	let link = columns.row.entity_link.as_ref().ok_or(BoxscoreError::MissingPlayer { table: columns.table })?;
	let player_id = link.player_id();
	let existing = players.iter().position(|player| player.team_type == side && player.player_id == *player_id);
	let index = existing.unwrap_or_else(|| {
		let name = link.player_name().or_else(|| columns.row.cell(0)).unwrap_or_default();
		players.push(PlayerGameStats::new(context, side, player_id.clone(), name));
		players.len() - 1
	});
	Ok(&mut players[index])
}

/// Player stat lines for both teams, in the order players first appear.
pub fn parse_boxscore(payload: &EventPayload, context: &GameContext) -> Result<Vec<PlayerGameStats>, BoxscoreError> {
	let boxscore = payload.boxscore.as_ref().ok_or(BoxscoreError::Missing)?;
	let mut players = Vec::new();

	for section in &boxscore.boxscore_sections {
		if section.title.trim().eq_ignore_ascii_case(MATCHUP) {
			continue;
		}
		let side = section_side(&payload.header, &section.title).ok_or_else(|| BoxscoreError::unknown_section(&section.title))?;

		for item in &section.boxscore_items {
			let table = &item.boxscore_table;
			let kind = StatTable::from_str(table.title().unwrap_or_default())?;
			for row in table.rows.iter().take_while(|row| !row.is_totals()) {
				let columns = Columns { table: kind.name(), row };
				let player = player_entry(&mut players, context, side, &columns)?;
				kind.apply(&columns, player)?;
			}
		}
	}

	debug!(game_id = %context.game_id, players = players.len(), "parsed boxscore");
	Ok(players)
}
