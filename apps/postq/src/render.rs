//! Human-readable and JSON output.

use std::{
	fmt::Display,
	io::{self, Write},
};

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;
use uuid::Uuid;

use postq_domain::{Post, TermOccurrence};

const RULE_WIDTH: usize = 80;
const TRENDING_RULE_WIDTH: usize = 50;

pub fn json<W, T>(out: &mut W, value: &T) -> color_eyre::Result<()>
where
	W: Write,
	T: ?Sized + Serialize,
{
	serde_json::to_writer_pretty(&mut *out, value)?;
	writeln!(out)?;

	Ok(())
}

pub fn search_report<W>(
	out: &mut W,
	query: &str,
	posts: &[Post],
	preview_chars: usize,
) -> io::Result<()>
where
	W: Write,
{
	writeln!(out, "\nFound {} results for: \"{query}\"", posts.len())?;

	posts_report(out, posts, preview_chars)
}

pub fn similar_report<W>(
	out: &mut W,
	source: Uuid,
	posts: &[Post],
	preview_chars: usize,
) -> io::Result<()>
where
	W: Write,
{
	writeln!(out, "\nFound {} posts similar to {source}", posts.len())?;

	posts_report(out, posts, preview_chars)
}

pub fn post_block<W>(out: &mut W, post: &Post, index: usize, preview_chars: usize) -> io::Result<()>
where
	W: Write,
{
	let rule = "=".repeat(RULE_WIDTH);
	// Truncates like the store's own percentage display: 0.879 is 87%.
	let match_pct = (post.certainty().unwrap_or(0.0) * 100.0) as i64;

	writeln!(out, "\n{rule}")?;
	writeln!(
		out,
		"Result {} | Match: {match_pct}% | ID: {}",
		index + 1,
		or_dash(post.post_id.as_ref())
	)?;
	writeln!(out, "{rule}")?;
	writeln!(
		out,
		"Author: {} (@{})",
		or_dash(post.author_name.as_ref()),
		or_dash(post.author_username.as_ref())
	)?;
	writeln!(out, "Published: {}", or_dash(post.published_at.as_ref()))?;
	writeln!(
		out,
		"Engagement: {} (👍 {} | 💬 {} | 🔄 {})",
		or_dash(post.engagement_total),
		or_dash(post.likes),
		or_dash(post.comments),
		or_dash(post.shares)
	)?;

	if let Some(hashtags) = post.hashtags.as_ref().filter(|hashtags| !hashtags.is_empty()) {
		let tags: Vec<String> = hashtags.iter().map(|tag| format!("#{tag}")).collect();

		writeln!(out, "Hashtags: {}", tags.join(", "))?;
	}

	match &post.workspace_ids {
		Some(ids) => writeln!(out, "Workspace IDs: {ids:?}")?,
		None => writeln!(out, "Workspace IDs: -")?,
	}

	writeln!(out, "Profile ID: {}", or_dash(post.profile_id))?;
	writeln!(
		out,
		"\nContent:\n{}",
		preview(post.content.as_deref().unwrap_or_default(), preview_chars)
	)?;
	writeln!(out, "\nURL: {}", or_dash(post.post_url.as_ref()))
}

pub fn count_report<W>(out: &mut W, count: u64, filtered: bool) -> io::Result<()>
where
	W: Write,
{
	if filtered {
		writeln!(out, "Matching posts: {count}")
	} else {
		writeln!(out, "Total posts: {count}")
	}
}

pub fn trending_report<W>(out: &mut W, window_days: u32, terms: &[TermOccurrence]) -> io::Result<()>
where
	W: Write,
{
	writeln!(out, "\nTrending hashtags (last {window_days} days):")?;
	writeln!(out, "{}", "=".repeat(TRENDING_RULE_WIDTH))?;

	for (index, term) in terms.iter().enumerate() {
		writeln!(out, "{}. #{:<20} - {} posts", index + 1, term.value, term.occurs)?;
	}

	Ok(())
}

/// First `limit` grapheme clusters of `content`, with `...` appended when anything was cut.
pub fn preview(content: &str, limit: usize) -> String {
	let mut graphemes = content.graphemes(true);
	let mut preview: String = graphemes.by_ref().take(limit).collect();

	if graphemes.next().is_some() {
		preview.push_str("...");
	}

	preview
}

fn posts_report<W>(out: &mut W, posts: &[Post], preview_chars: usize) -> io::Result<()>
where
	W: Write,
{
	for (index, post) in posts.iter().enumerate() {
		post_block(out, post, index, preview_chars)?;
	}

	writeln!(out, "\n{}\n", "=".repeat(RULE_WIDTH))
}

fn or_dash<T>(value: Option<T>) -> String
where
	T: Display,
{
	value.map_or_else(|| "-".to_string(), |value| value.to_string())
}
