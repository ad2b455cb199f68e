mod batch;
mod config;
mod error;
mod observability;

use crate::config::Config;
use crate::observability::init_tracing;
use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	dotenv::dotenv().ok();

	let config = Config::parse();
	init_tracing(&config)?;

	let mut plays: Box<dyn Write> = match &config.output {
		Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| format!("could not create {}", path.display()))?)),
		None => Box::new(BufWriter::new(io::stdout().lock())),
	};
	let mut player_stats: Box<dyn Write> = match &config.stats_output {
		Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| format!("could not create {}", path.display()))?)),
		None => Box::new(io::sink()),
	};

	let summary = batch::run(&config, &mut plays, &mut player_stats).await?;
	info!(
		games_parsed = summary.games_parsed,
		games_failed = summary.games_failed,
		plays_emitted = summary.plays_emitted,
		plays_unparsed = summary.plays_unparsed,
		fields_defaulted = summary.fields_defaulted,
		player_stat_lines = summary.player_stat_lines,
		"batch complete"
	);
	Ok(())
}
