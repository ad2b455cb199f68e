//! Boxscore tables carried in the same event payload as the play-by-play.

use super::{FeedId, Layout};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boxscore {
	#[serde(default)]
	pub boxscore_sections: Vec<BoxscoreSection>,
}

/// One team's tables, or the team matchup summary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreSection {
	pub title: String,
	#[serde(default)]
	pub boxscore_items: Vec<BoxscoreItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxscoreItem {
	pub boxscore_table: BoxscoreTable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoxscoreTable {
	#[serde(default)]
	pub headers: Vec<TableRow>,
	#[serde(default)]
	pub rows: Vec<TableRow>,
}

impl BoxscoreTable {
	/// The table's name is the first header cell: "PASSING", "KICK RETURN".
	pub fn title(&self) -> Option<&str> {
		self.headers.first()?.columns.first().map(|cell| cell.text.trim())
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
	#[serde(default)]
	pub columns: Vec<Cell>,
	#[serde(default)]
	pub entity_link: Option<PlayerLink>,
}

impl TableRow {
	pub fn cell(&self, index: usize) -> Option<&str> {
		self.columns.get(index).map(|cell| cell.text.trim())
	}

	pub fn is_totals(&self) -> bool {
		self.cell(0).is_some_and(|text| text.eq_ignore_ascii_case("totals"))
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
	#[serde(default)]
	pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLink {
	pub layout: Layout,
	#[serde(default)]
	pub image_alt_text: Option<String>,
	#[serde(default)]
	pub title: Option<String>,
}

impl PlayerLink {
	pub const fn player_id(&self) -> &FeedId {
		&self.layout.tokens.id
	}

	pub fn player_name(&self) -> Option<&str> {
		self.image_alt_text.as_deref().or(self.title.as_deref()).map(str::trim).filter(|name| !name.is_empty())
	}
}
