//! Serde model of the event payload published by the league's data feed.
//!
//! Only the keys the parser reads are modelled; everything else in the
//! payload is ignored. Team and play identifiers arrive as strings in some
//! payloads and as integers in others, so they are normalized into
//! [`FeedId`] at deserialization time.

pub mod boxscore;

use crate::error::FeedError;
use boxscore::Boxscore;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier token from the feed, normalized to its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FeedId(String);

impl FeedId {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into().trim().to_string())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for FeedId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for FeedId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum Raw {
			Text(String),
			Integer(i64),
		}

		Ok(match Raw::deserialize(deserializer)? {
			Raw::Text(text) => Self::new(text),
			Raw::Integer(number) => Self(number.to_string()),
		})
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
	pub header: Header,
	pub pbp: PlayByPlay,
	#[serde(default)]
	pub metadata: Option<Metadata>,
	#[serde(default)]
	pub boxscore: Option<Boxscore>,
}

impl EventPayload {
	pub fn from_slice(bytes: &[u8]) -> Result<Self, FeedError> {
		Ok(serde_json::from_slice(bytes)?)
	}
}

impl FromStr for EventPayload {
	type Err = FeedError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(serde_json::from_str(s)?)
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
	pub left_team: TeamRef,
	pub right_team: TeamRef,
	pub venue_name: String,
	pub event_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
	pub name: String,
	/// Nickname, e.g. "Renegades"; boxscore sections are titled with it.
	#[serde(default)]
	pub long_name: Option<String>,
	pub entity_link: EntityLink,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityLink {
	pub layout: Layout,
}

impl EntityLink {
	pub const fn token(&self) -> &FeedId {
		&self.layout.tokens.id
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
	pub tokens: Tokens,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tokens {
	pub id: FeedId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayByPlay {
	pub sections: Vec<Section>,
}

/// One quarter of play.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
	pub title: String,
	#[serde(default)]
	pub groups: Vec<Group>,
}

/// One drive.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
	pub id: FeedId,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub subtitle: String,
	#[serde(default)]
	pub entity_link: Option<EntityLink>,
	#[serde(default)]
	pub plays: Vec<Play>,
}

impl Group {
	pub fn team_token(&self) -> Result<&FeedId, FeedError> {
		self.entity_link
			.as_ref()
			.map(EntityLink::token)
			.ok_or(FeedError::MissingField { field: "groups[].entityLink" })
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
	pub id: FeedId,
	/// Down & distance, e.g. "1st and 10".
	#[serde(default)]
	pub title: String,
	/// Yard line, e.g. "CHI 45".
	#[serde(default)]
	pub subtitle: String,
	#[serde(default)]
	pub time_of_play: String,
	pub play_description: String,
	#[serde(default)]
	pub period_of_play: String,
	#[serde(default)]
	pub left_team_score_change: bool,
	#[serde(default)]
	pub right_team_score_change: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
	#[serde(default)]
	pub parameters: Option<MetadataParameters>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataParameters {
	#[serde(default)]
	pub canonical_url: Option<String>,
}

impl EventPayload {
	pub fn canonical_url(&self) -> Option<&str> {
		self.metadata.as_ref()?.parameters.as_ref()?.canonical_url.as_deref()
	}
}
