/// Tacklers credited on one play.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TackleCredit {
	pub solo: Vec<String>,
	pub assisted: Vec<String>,
}

/// Splits a tackler list. Names joined by ";" shared the tackle and are
/// credited as assists; names separated by "," are each credited solo.
pub fn split_tacklers(list: &str) -> TackleCredit {
	let mut credit = TackleCredit::default();
	for group in list.split(',') {
		let names: Vec<String> = group.split(';').map(str::trim).filter(|name| !name.is_empty()).map(str::to_string).collect();
		match names.len() {
			0 => {}
			1 => credit.solo.extend(names),
			_ => credit.assisted.extend(names),
		}
	}
	credit
}
