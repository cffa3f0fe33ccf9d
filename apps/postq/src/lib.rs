pub mod cli;
pub mod render;

pub use cli::{Args, VERSION};

use std::io::{self, Write};

use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use postq_config::Config;
use postq_domain::{
	Filter, Predicate, SearchRequest, SimilarRequest, TrendingRequest, filter::window_start,
};
use postq_service::PostqService;

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = postq_config::load(args.config.as_deref())?;

	init_tracing(&config);

	let service = PostqService::new(config)?;

	execute(&service, &args, OffsetDateTime::now_utc(), &mut io::stdout()).await
}

/// Runs the mode selected by `args` and writes its report to `out`.
pub async fn execute<W>(
	service: &PostqService,
	args: &Args,
	now: OffsetDateTime,
	out: &mut W,
) -> color_eyre::Result<()>
where
	W: Write,
{
	let query_cfg = &service.cfg.query;
	let limit = args.limit.unwrap_or(query_cfg.default_limit);

	if args.count {
		let predicate = predicate(args, now, true)?;

		tracing::info!(filters = predicate.len(), "Counting posts.");

		let count = service.count(&predicate).await?;

		return if args.json {
			render::json(out, &serde_json::json!({ "count": count }))
		} else {
			Ok(render::count_report(out, count, !predicate.is_empty())?)
		};
	}
	if args.hashtags {
		let window_days = args.days.unwrap_or(query_cfg.trending_window_days);
		let request = TrendingRequest::new(now)
			.with_window_days(window_days)
			.with_limit(query_cfg.trending_limit)
			.with_predicate(predicate(args, now, false)?);

		tracing::info!(window_days, "Ranking hashtags.");

		let terms = service.trending(&request).await?;

		return if args.json {
			render::json(out, &terms)
		} else {
			Ok(render::trending_report(out, window_days, &terms)?)
		};
	}
	if let Some(source) = args.similar {
		let request = SimilarRequest::new(source)
			.with_limit(limit)
			.with_predicate(predicate(args, now, true)?);

		tracing::info!(%source, limit, "Finding similar posts.");

		let posts = service.similar(&request).await?;

		return if args.json {
			render::json(out, &posts)
		} else {
			Ok(render::similar_report(out, source, &posts, query_cfg.preview_chars)?)
		};
	}

	let text = args.query.as_deref().unwrap_or_default();
	let request =
		SearchRequest::new(text).with_limit(limit).with_predicate(predicate(args, now, true)?);

	tracing::info!(limit, filters = request.predicate.len(), "Searching posts.");

	let posts = service.search(&request).await?;

	if args.json {
		render::json(out, &posts)
	} else {
		Ok(render::search_report(out, text, &posts, query_cfg.preview_chars)?)
	}
}

/// Compiles the filter flags. `--days` becomes a date filter only when `with_window` is set,
/// since the trending mode uses it as the aggregation window instead.
pub fn predicate(
	args: &Args,
	now: OffsetDateTime,
	with_window: bool,
) -> postq_domain::Result<Predicate> {
	let mut filters = Vec::new();

	if !args.workspaces.is_empty() {
		filters.push(Filter::workspaces(args.workspaces.iter().copied())?);
	}
	if let Some(threshold) = args.min_engagement {
		filters.push(Filter::min_engagement(threshold)?);
	}
	if with_window && let Some(days) = args.days {
		filters.push(Filter::published_since(window_start(now, days)?)?);
	}
	if let Some(date) = args.before {
		filters.push(Filter::published_until(date.midnight().assume_utc())?);
	}
	if !args.profiles.is_empty() {
		filters.push(Filter::profiles(args.profiles.iter().copied())?);
	}

	Ok(Predicate::compile(filters))
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
