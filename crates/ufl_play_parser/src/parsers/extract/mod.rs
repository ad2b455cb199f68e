//! Turns a classified play description into [`PlayDetails`].
//!
//! Each category owns an ordered [`TemplateSet`]; the first template that
//! matches fills the category's core facts. Cross-cutting facts (penalties,
//! fumbles, tackles, replay reviews, flags) are read afterwards by feature
//! passes that run for every category.

mod conversions;
mod defense;
mod kicking;
mod passing;
mod penalties;
mod rushing;

use crate::error::ExtractError;
use crate::parsers::rules::TemplateSet;
use crate::schema::{parse_signed_yards, NoPlayKind, PlayCategory, PlayDetails, YardLine};
use std::str::FromStr;
use tracing::warn;

/// Down, distance and spot of the play being extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaySituation {
	pub posteam: String,
	pub defteam: String,
	pub down: u8,
	pub yards_to_go: u8,
	pub yardline_100: Option<u8>,
}

/// Which team's perspective a field position is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
	Offense,
	Defense,
}

impl Frame {
	pub const fn opposite(self) -> Self {
		match self {
			Self::Offense => Self::Defense,
			Self::Defense => Self::Offense,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
	pub details: PlayDetails,
	pub faults: Vec<ExtractError>,
	/// Numeric fields that fell back to a default.
	pub defaulted: u16,
}

impl Extraction {
	/// The details, or the first fault if any template step failed.
	pub fn into_result(self) -> Result<PlayDetails, ExtractError> {
		match self.faults.into_iter().next() {
			Some(fault) => Err(fault),
			None => Ok(self.details),
		}
	}
}

/// Accumulates the facts of one play. Created per play and consumed by
/// [`PlayDetailsBuilder::build`].
#[derive(Debug)]
pub struct PlayDetailsBuilder {
	category: PlayCategory,
	situation: PlaySituation,
	description: String,
	lowercase: String,
	pub(crate) details: PlayDetails,
	faults: Vec<ExtractError>,
	defaulted: u16,
}

impl PlayDetailsBuilder {
	fn new(category: PlayCategory, description: &str, situation: &PlaySituation) -> Self {
		Self {
			category,
			situation: situation.clone(),
			description: description.to_string(),
			lowercase: description.to_lowercase(),
			details: PlayDetails::default(),
			faults: Vec::new(),
			defaulted: 0,
		}
	}

	pub(crate) const fn category(&self) -> PlayCategory {
		self.category
	}

	pub(crate) const fn situation(&self) -> &PlaySituation {
		&self.situation
	}

	pub(crate) fn mentions(&self, needle: &str) -> bool {
		self.lowercase.contains(needle)
	}

	/// Description text from `offset` on, for follow-up sentences.
	pub(crate) fn tail(&self, offset: usize) -> String {
		self.description.get(offset..).unwrap_or_default().to_string()
	}

	pub(crate) fn abbr(&self, frame: Frame) -> String {
		match frame {
			Frame::Offense => self.situation.posteam.clone(),
			Frame::Defense => self.situation.defteam.clone(),
		}
	}

	/// Resolves a team abbreviation to the offense or defense, reporting a
	/// fault when it names neither.
	pub(crate) fn team(&mut self, abbr: &str) -> Option<Frame> {
		if abbr.eq_ignore_ascii_case(&self.situation.posteam) {
			Some(Frame::Offense)
		} else if abbr.eq_ignore_ascii_case(&self.situation.defteam) {
			Some(Frame::Defense)
		} else {
			let fault = ExtractError::unknown_team(abbr, &self.description);
			self.fault(fault);
			None
		}
	}

	/// Distance to the goal line `frame` is attacking.
	pub(crate) fn spot_in(&mut self, field: &'static str, text: &str, frame: Frame) -> Option<u8> {
		let team = match frame {
			Frame::Offense => &self.situation.posteam,
			Frame::Defense => &self.situation.defteam,
		};
		match YardLine::from_str(text) {
			Ok(spot) => Some(spot.yardline_100(team)),
			Err(err) => {
				self.defaulted(field, &err.to_string());
				None
			}
		}
	}

	pub(crate) fn spot(&mut self, field: &'static str, text: &str) -> Option<u8> {
		self.spot_in(field, text, Frame::Offense)
	}

	pub(crate) fn yards(&mut self, field: &'static str, text: &str) -> Option<i16> {
		match parse_signed_yards(text) {
			Ok(yards) => Some(yards),
			Err(err) => {
				self.defaulted(field, &err.to_string());
				None
			}
		}
	}

	/// Net gain of a ball carrier: the captured yardage, or the distance
	/// from the line of scrimmage to the end spot when the feed left the
	/// yardage blank.
	pub(crate) fn gain(&mut self, field: &'static str, yards: Option<&str>, end: Option<&str>) -> i16 {
		if let Some(yards) = yards {
			return self.yards(field, yards).unwrap_or_default();
		}
		let Some(end) = end else {
			return 0;
		};
		match (self.situation.yardline_100, self.spot(field, end)) {
			(Some(start), Some(end)) => i16::from(start) - i16::from(end),
			_ => 0,
		}
	}

	pub(crate) fn fault(&mut self, fault: ExtractError) {
		self.faults.push(fault);
	}

	fn defaulted(&mut self, field: &'static str, reason: &str) {
		warn!(field, reason, description = %self.description, "defaulting malformed numeric field");
		self.defaulted += 1;
	}

	/// Team carrying the ball when it was last tackled or fumbled.
	pub(crate) fn carrier(&self) -> Frame {
		let returned_kick = self.details.returns.punt_returner_player_name.is_some() && self.category == PlayCategory::Punt;
		if self.details.flags.is_interception || returned_kick {
			Frame::Defense
		} else {
			Frame::Offense
		}
	}

	/// Team credited with tackles on this play.
	pub(crate) fn tackling(&self) -> Frame {
		if self.category == PlayCategory::Punt {
			return Frame::Offense;
		}
		if self.category == PlayCategory::Kickoff {
			return Frame::Defense;
		}
		let carrier = if self.details.fumbles.is_fumble_lost { self.carrier().opposite() } else { self.carrier() };
		carrier.opposite()
	}

	fn build(self) -> Extraction {
		Extraction {
			details: self.details,
			faults: self.faults,
			defaulted: self.defaulted,
		}
	}
}

fn apply_core(set: &TemplateSet<PlayDetailsBuilder>, description: &str, builder: &mut PlayDetailsBuilder) -> bool {
	set.apply_first(description, builder).is_some()
}

/// Extracts everything the description says about the play. Template
/// misses are reported in [`Extraction::faults`] alongside whatever could
/// still be read.
pub fn extract(category: PlayCategory, description: &str, situation: &PlaySituation) -> Extraction {
	let description = description.trim();
	let mut builder = PlayDetailsBuilder::new(category, description, situation);

	let core = match category {
		PlayCategory::Pass => apply_core(&passing::PASS, description, &mut builder),
		PlayCategory::QbSpike => apply_core(&passing::SPIKE, description, &mut builder),
		PlayCategory::Run => apply_core(&rushing::RUN, description, &mut builder),
		PlayCategory::QbScramble => apply_core(&rushing::SCRAMBLE, description, &mut builder),
		PlayCategory::QbKneel => apply_core(&rushing::KNEEL, description, &mut builder),
		PlayCategory::FieldGoal => apply_core(&kicking::FIELD_GOAL, description, &mut builder),
		PlayCategory::Punt => apply_core(&kicking::PUNT, description, &mut builder),
		PlayCategory::Kickoff => apply_core(&kicking::KICKOFF, description, &mut builder),
		PlayCategory::ConversionAttempt { .. } => conversions::extract(description, &mut builder),
		PlayCategory::AbortedPlay { .. } => apply_core(&defense::ABORTED, description, &mut builder),
		PlayCategory::NoPlay(NoPlayKind::Timeout) => apply_core(&penalties::TIMEOUT, description, &mut builder),
		PlayCategory::PenaltyOnly => apply_core(&penalties::PENALTY, description, &mut builder),
		PlayCategory::NoPlay(_) => true,
	};
	if !core && !description.is_empty() {
		builder.fault(ExtractError::template_miss(category.name(), description));
	}

	apply_flags(&mut builder);
	if category != PlayCategory::PenaltyOnly && builder.mentions("penalty") {
		penalties::PENALTY.apply_first(description, &mut builder);
	}
	penalties::REPLAY.apply_first(description, &mut builder);
	if !matches!(category, PlayCategory::AbortedPlay { .. }) && builder.mentions("fumbles") && !builder.mentions("muff") {
		defense::FUMBLE.apply_first(description, &mut builder);
	}
	defense::apply_tackles(description, &mut builder);
	defense::apply_tackles_for_loss(&mut builder);
	apply_touchdown_scorer(description, &mut builder);

	builder.build()
}

fn apply_flags(b: &mut PlayDetailsBuilder) {
	let shotgun = b.mentions("shotgun");
	let no_huddle = b.mentions("no huddle");
	let out_of_bounds = b.mentions("out of bounds");
	let qb_hit = b.mentions("qb hit");
	let touchback = b.mentions("touchback");
	let first_down = b.mentions("first down");
	let touchdown = b.mentions("touchdown");
	let safety = b.mentions("safety");
	let penalty = b.mentions("penalty");
	let category = b.category();

	let flags = &mut b.details.flags;
	flags.is_shotgun = shotgun;
	flags.is_no_huddle = no_huddle;
	flags.is_out_of_bounds = out_of_bounds;
	flags.is_qb_hit = qb_hit;
	flags.is_touchback = touchback;
	flags.is_first_down_text = first_down;
	flags.is_touchdown = touchdown;
	flags.is_safety = safety;
	flags.is_penalty |= penalty;
	flags.is_timeout = category == PlayCategory::NoPlay(NoPlayKind::Timeout);
	flags.is_qb_dropback |= matches!(category, PlayCategory::Pass | PlayCategory::QbScramble | PlayCategory::AbortedPlay { dropback: true });
}

fn apply_touchdown_scorer(description: &str, b: &mut PlayDetailsBuilder) {
	if !b.details.flags.is_touchdown || b.details.td_player_name.is_some() {
		return;
	}
	if let Some(player) = defense::touchdown_scorer(description) {
		b.details.td_player_name = Some(player);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	pub(super) fn situation(down: u8, yards_to_go: u8, yardline_100: u8) -> PlaySituation {
		PlaySituation {
			posteam: "DAL".to_string(),
			defteam: "HOU".to_string(),
			down,
			yards_to_go,
			yardline_100: Some(yardline_100),
		}
	}

	#[test]
	fn test_unmatched_core_template_is_reported() {
		let extraction = extract(PlayCategory::Punt, "The punt team took the field.", &situation(4, 8, 60));
		assert_eq!(
			extraction.faults,
			vec![ExtractError::template_miss("punt", "The punt team took the field.")]
		);
		assert!(extraction.into_result().is_err());
	}

	#[test]
	fn test_boundary_markers_need_no_template() {
		let extraction = extract(PlayCategory::NoPlay(NoPlayKind::QuarterEnd), "End Quarter", &situation(0, 0, 75));
		assert!(extraction.faults.is_empty());
		assert_eq!(extraction.details, PlayDetails::default());
	}

	#[test]
	fn test_generic_flags() {
		let extraction = extract(
			PlayCategory::Pass,
			"(Shotgun, No Huddle) Q.Back pass short middle complete. Catch made by T.End for 12 yards. Pushed out of bounds by C.Back at HOU 28. First down.",
			&situation(2, 6, 40),
		);
		let flags = &extraction.details.flags;
		assert!(flags.is_shotgun && flags.is_no_huddle && flags.is_out_of_bounds && flags.is_first_down_text);
		assert!(flags.is_qb_dropback);
		assert!(!flags.is_touchdown);
	}

	#[test]
	fn test_blank_yardage_uses_end_spot() {
		let extraction = extract(PlayCategory::Run, "A.Back rushed left end to HOU 9 for yards.", &situation(1, 10, 40));
		assert_eq!(extraction.details.rushing.rusher.as_deref(), Some("A.Back"));
		assert_eq!(extraction.details.yards_gained, 31);
		assert_eq!(extraction.defaulted, 0);
	}

	#[test]
	fn test_malformed_numbers_default_and_count() {
		let extraction = extract(PlayCategory::Run, "A.Back rushed left end to HOU 9 for 99999 yards.", &situation(1, 10, 40));
		assert_eq!(extraction.details.rushing.rusher.as_deref(), Some("A.Back"));
		assert_eq!(extraction.details.yards_gained, 0);
		assert_eq!(extraction.defaulted, 1);
		assert!(extraction.faults.is_empty());
	}
}
