//! Facts extracted from a single play description.
//!
//! `PlayDetails` is assembled fresh for every play by the extractor and is
//! read-only afterwards. Each group flattens into the output record.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayDetails {
	pub yards_gained: i16,
	#[serde(flatten)]
	pub flags: PlayFlags,
	#[serde(flatten)]
	pub passing: Passing,
	#[serde(flatten)]
	pub rushing: Rushing,
	#[serde(flatten)]
	pub kicking: Kicking,
	#[serde(flatten)]
	pub returns: Returns,
	#[serde(flatten)]
	pub tackles: Tackles,
	#[serde(flatten)]
	pub fumbles: Fumbles,
	#[serde(flatten)]
	pub conversion: Conversion,
	#[serde(flatten)]
	pub penalty: Penalty,
	pub timeout_team: Option<String>,
	pub replay_or_challenge_result: Option<String>,
	pub td_player_name: Option<String>,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayFlags {
	pub is_shotgun: bool,
	pub is_no_huddle: bool,
	pub is_qb_dropback: bool,
	pub is_qb_kneel: bool,
	pub is_qb_spike: bool,
	pub is_qb_scramble: bool,
	pub is_aborted_play: bool,
	pub is_out_of_bounds: bool,
	pub is_qb_hit: bool,
	pub is_touchback: bool,
	/// "first down" appears in the description.
	pub is_first_down_text: bool,
	pub is_touchdown: bool,
	pub is_pass_touchdown: bool,
	pub is_rush_touchdown: bool,
	pub is_return_touchdown: bool,
	pub is_safety: bool,
	pub is_timeout: bool,
	pub is_complete_pass: bool,
	pub is_incomplete_pass: bool,
	pub is_interception: bool,
	pub is_sack: bool,
	pub is_tackled_for_loss: bool,
	pub is_penalty: bool,
	pub is_first_down_penalty: bool,
	pub is_replay_or_challenge: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Passing {
	pub passer: Option<String>,
	pub receiver: Option<String>,
	pub pass_length: Option<String>,
	pub pass_location: Option<String>,
	pub air_yards: Option<i16>,
	pub yards_after_catch: Option<i16>,
	pub passing_yards: Option<i16>,
	pub receiving_yards: Option<i16>,
	pub pass_defense_1_player_name: Option<String>,
	pub pass_defense_2_player_name: Option<String>,
	pub interception_player_name: Option<String>,
	pub sack_player_name: Option<String>,
	pub half_sack_1_player_name: Option<String>,
	pub half_sack_2_player_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rushing {
	pub rusher: Option<String>,
	pub run_location: Option<String>,
	pub run_gap: Option<String>,
	pub rushing_yards: Option<i16>,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Kicking {
	pub kicker_player_name: Option<String>,
	pub punter_player_name: Option<String>,
	pub kick_distance: Option<u8>,
	/// `made`, `missed` or `blocked`.
	pub field_goal_result: Option<String>,
	pub blocked_player_name: Option<String>,
	pub is_punt_blocked: bool,
	pub is_punt_downed: bool,
	pub is_punt_fair_catch: bool,
	pub is_punt_in_endzone: bool,
	pub is_punt_out_of_bounds: bool,
	pub is_punt_inside_twenty: bool,
	pub is_onside_kick: bool,
	pub is_kickoff_fair_catch: bool,
	pub is_kickoff_in_endzone: bool,
	pub is_kickoff_downed: bool,
	pub is_kickoff_out_of_bounds: bool,
	pub is_kickoff_inside_twenty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Returns {
	pub punt_returner_player_name: Option<String>,
	pub kickoff_returner_player_name: Option<String>,
	pub return_team: Option<String>,
	pub return_yards: Option<i16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tackles {
	pub solo_tackle_1_player_name: Option<String>,
	pub solo_tackle_1_team: Option<String>,
	pub solo_tackle_2_player_name: Option<String>,
	pub solo_tackle_2_team: Option<String>,
	pub assist_tackle_1_player_name: Option<String>,
	pub assist_tackle_1_team: Option<String>,
	pub assist_tackle_2_player_name: Option<String>,
	pub assist_tackle_2_team: Option<String>,
	pub assist_tackle_3_player_name: Option<String>,
	pub assist_tackle_3_team: Option<String>,
	pub assist_tackle_4_player_name: Option<String>,
	pub assist_tackle_4_team: Option<String>,
	pub tackle_for_loss_1_player_name: Option<String>,
	pub tackle_for_loss_2_player_name: Option<String>,
	pub is_solo_tackle: bool,
	pub is_assist_tackle: bool,
	pub is_tackle_with_assist: bool,
}

impl Tackles {
	/// Records a solo tackler in the next free slot. Returns false when both
	/// slots are taken.
	pub fn push_solo(&mut self, name: &str, team: &str) -> bool {
		let slots = [
			(&mut self.solo_tackle_1_player_name, &mut self.solo_tackle_1_team),
			(&mut self.solo_tackle_2_player_name, &mut self.solo_tackle_2_team),
		];
		let stored = fill_first_free(slots, name, team);
		self.is_solo_tackle |= stored;
		stored
	}

	/// Records an assisting tackler in the next free slot.
	pub fn push_assist(&mut self, name: &str, team: &str) -> bool {
		let slots = [
			(&mut self.assist_tackle_1_player_name, &mut self.assist_tackle_1_team),
			(&mut self.assist_tackle_2_player_name, &mut self.assist_tackle_2_team),
			(&mut self.assist_tackle_3_player_name, &mut self.assist_tackle_3_team),
			(&mut self.assist_tackle_4_player_name, &mut self.assist_tackle_4_team),
		];
		let stored = fill_first_free(slots, name, team);
		self.is_assist_tackle |= stored;
		self.is_tackle_with_assist |= stored;
		stored
	}

	pub fn tacklers(&self) -> impl Iterator<Item = &str> {
		[
			&self.solo_tackle_1_player_name,
			&self.solo_tackle_2_player_name,
			&self.assist_tackle_1_player_name,
			&self.assist_tackle_2_player_name,
			&self.assist_tackle_3_player_name,
			&self.assist_tackle_4_player_name,
		]
		.into_iter()
		.filter_map(Option::as_deref)
	}
}

fn fill_first_free<const N: usize>(slots: [(&mut Option<String>, &mut Option<String>); N], name: &str, team: &str) -> bool {
	for (player, player_team) in slots {
		if player.is_none() {
			*player = Some(name.to_string());
			*player_team = Some(team.to_string());
			return true;
		}
	}
	false
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fumbles {
	pub is_fumble: bool,
	pub is_fumble_forced: bool,
	pub is_fumble_not_forced: bool,
	pub is_fumble_out_of_bounds: bool,
	pub is_fumble_lost: bool,
	pub fumbled_1_team: Option<String>,
	pub fumbled_1_player_name: Option<String>,
	pub forced_fumble_player_1_team: Option<String>,
	pub forced_fumble_player_1_player_name: Option<String>,
	pub fumble_recovery_1_team: Option<String>,
	pub fumble_recovery_1_player_name: Option<String>,
	pub fumble_recovery_1_yards: Option<i16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversion {
	pub is_one_point_attempt: bool,
	pub is_two_point_attempt: bool,
	pub is_three_point_attempt: bool,
	/// `success` or `failure`.
	pub one_point_conv_result: Option<String>,
	pub two_point_conv_result: Option<String>,
	pub three_point_conv_result: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Penalty {
	pub penalty_team: Option<String>,
	pub penalty_player_name: Option<String>,
	pub penalty_type: Option<String>,
	pub penalty_yards: Option<u8>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tackle_slots_fill_in_order() {
		let mut tackles = Tackles::default();
		assert!(tackles.push_solo("A.Lee", "CHI"));
		assert!(tackles.push_solo("B.Kim", "CHI"));
		assert!(!tackles.push_solo("C.Orr", "CHI"));

		assert_eq!(tackles.solo_tackle_2_player_name.as_deref(), Some("B.Kim"));
		assert!(tackles.is_solo_tackle);
		assert!(!tackles.is_assist_tackle);

		for name in ["D.One", "E.Two", "F.Three", "G.Four"] {
			assert!(tackles.push_assist(name, "NYG"));
		}
		assert!(!tackles.push_assist("H.Five", "NYG"));
		assert_eq!(tackles.assist_tackle_4_team.as_deref(), Some("NYG"));
		assert!(tackles.is_tackle_with_assist);
		assert_eq!(tackles.tacklers().count(), 6);
	}

	#[test]
	fn test_details_flatten_into_one_object() {
		let mut details = PlayDetails::default();
		details.rushing.rusher = Some("M.Diaz".to_string());
		details.flags.is_rush_touchdown = true;

		let value = serde_json::to_value(&details).unwrap();
		assert_eq!(value["rusher"], "M.Diaz");
		assert_eq!(value["is_rush_touchdown"], true);
		assert!(value["passer"].is_null());
		assert!(value.get("rushing").is_none());
	}
}
