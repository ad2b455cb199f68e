use crate::config::Config;
use crate::error::PbpError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, util::SubscriberInitExt, Layer};

/// Installs the global subscriber. Logs go to stderr; stdout may carry the
/// play records.
pub fn init_tracing(config: &Config) -> Result<(), PbpError> {
	let filter = EnvFilter::try_new(&config.rust_log)?;

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.with_writer(std::io::stderr)
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(
				tracing_subscriber::fmt::layer()
					.with_writer(std::io::stderr)
					.event_format(tracing_subscriber::fmt::format().pretty())
					.with_filter(filter),
			)
		})
		.init();
	Ok(())
}
