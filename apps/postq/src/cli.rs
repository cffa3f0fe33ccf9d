use std::path::PathBuf;

use clap::{
	ArgGroup, Parser,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use time::{Date, macros::format_description};
use uuid::Uuid;

pub const VERSION: &str = concat!(
	env!("CARGO_PKG_VERSION"),
	"-",
	env!("VERGEN_GIT_SHA"),
	"-",
	env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

/// Query the post vector store: semantic search, counts, trending hashtags, similar posts.
///
/// Credentials come from WEAVIATE_URL, WEAVIATE_API_KEY and OPENAI_API_KEY, or from the
/// [store] section of the config file.
#[derive(Debug, Parser)]
#[command(
	version = VERSION,
	rename_all = "kebab",
	styles = styles(),
	group(ArgGroup::new("mode").args(["similar", "count", "hashtags"])),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
	/// Semantic search text.
	#[arg(
		long,
		short = 'q',
		value_name = "TEXT",
		required_unless_present_any = ["similar", "count", "hashtags"],
	)]
	pub query: Option<String>,
	/// Number of results [default: query.default_limit].
	#[arg(long, short = 'l', value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
	pub limit: Option<u32>,
	/// Only posts in this workspace; repeat for any of several.
	#[arg(long = "workspace", short = 'w', value_name = "ID")]
	pub workspaces: Vec<i64>,
	/// Only posts by this profile; repeat for any of several.
	#[arg(long = "profile", short = 'p', value_name = "ID")]
	pub profiles: Vec<i64>,
	#[arg(long, short = 'e', value_name = "N", value_parser = clap::value_parser!(i64).range(0..))]
	pub min_engagement: Option<i64>,
	/// Only posts from the last N days; the window size with --hashtags.
	#[arg(long, short = 'd', value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
	pub days: Option<u32>,
	/// Only posts published on or before midnight UTC of this date.
	#[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
	pub before: Option<Date>,
	/// Posts similar to the stored object with this id.
	#[arg(long, value_name = "UUID")]
	pub similar: Option<Uuid>,
	/// Count matching posts.
	#[arg(long)]
	pub count: bool,
	/// Rank hashtags of recent posts.
	#[arg(long)]
	pub hashtags: bool,
	/// Print the raw payload as JSON.
	#[arg(long)]
	pub json: bool,
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.literal(AnsiColor::Green.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Yellow.on_default())
}

fn parse_date(raw: &str) -> Result<Date, String> {
	Date::parse(raw, format_description!("[year]-[month]-[day]"))
		.map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}
