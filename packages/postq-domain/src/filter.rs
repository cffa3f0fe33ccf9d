//! Typed search constraints and their compilation into a single where-clause.

use std::{
	fmt::{Display, Formatter},
	slice,
};

use serde_json::Value;
use time::{Duration, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

use crate::{Error, Result};

/// Years an RFC 3339 date literal can carry.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
	WorkspaceMembership,
	EngagementMinimum,
	PublishDateMinimum,
	PublishDateMaximum,
	ProfileIdentity,
}
impl FilterField {
	/// Store property the field constrains.
	pub fn property(&self) -> &'static str {
		match self {
			Self::WorkspaceMembership => "workspaceIds",
			Self::EngagementMinimum => "engagementTotal",
			Self::PublishDateMinimum | Self::PublishDateMaximum => "publishedAt",
			Self::ProfileIdentity => "profileId",
		}
	}

	fn as_str(&self) -> &'static str {
		match self {
			Self::WorkspaceMembership => "workspace_membership",
			Self::EngagementMinimum => "engagement_minimum",
			Self::PublishDateMinimum => "publish_date_minimum",
			Self::PublishDateMaximum => "publish_date_maximum",
			Self::ProfileIdentity => "profile_identity",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOperator {
	Equal,
	GreaterThanEqual,
	LessThanEqual,
	ContainsAny,
}
impl FilterOperator {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Equal => "Equal",
			Self::GreaterThanEqual => "GreaterThanEqual",
			Self::LessThanEqual => "LessThanEqual",
			Self::ContainsAny => "ContainsAny",
		}
	}
}
impl Display for FilterOperator {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterValue {
	Int(i64),
	IntSet(Vec<i64>),
	Date(OffsetDateTime),
}
impl FilterValue {
	fn kind(&self) -> &'static str {
		match self {
			Self::Int(_) => "integer",
			Self::IntSet(_) => "integer set",
			Self::Date(_) => "date",
		}
	}

	fn render(&self) -> Result<String> {
		let rendered = match self {
			Self::Int(value) => format!("valueInt: {value}"),
			Self::IntSet(values) => {
				let items: Vec<String> = values.iter().map(i64::to_string).collect();

				format!("valueInt: [{}]", items.join(", "))
			},
			Self::Date(at) => format!("valueDate: {}", quote(&format_date(*at)?)),
		};

		Ok(rendered)
	}
}

/// One field/operator/value triple.
///
/// Fields are private so every filter in circulation has passed the compatibility check in
/// [`Filter::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
	field: FilterField,
	operator: FilterOperator,
	value: FilterValue,
}
impl Filter {
	pub fn new(field: FilterField, operator: FilterOperator, value: FilterValue) -> Result<Self> {
		use FilterField as F;
		use FilterOperator as O;
		use FilterValue as V;

		match (field, operator, &value) {
			(F::WorkspaceMembership, O::ContainsAny, V::IntSet(ids)) =>
				if ids.is_empty() {
					return Err(Error::validation(
						"workspace_membership requires at least one identifier.",
					));
				},
			// One profile is scalar equality; see `Filter::profiles`.
			(F::ProfileIdentity, O::ContainsAny, V::IntSet(ids)) =>
				if ids.len() < 2 {
					return Err(Error::validation(
						"profile_identity set intersection requires at least two identifiers.",
					));
				},
			(F::EngagementMinimum, O::GreaterThanEqual, V::Int(threshold)) =>
				if *threshold < 0 {
					return Err(Error::validation("engagement_minimum must be zero or greater."));
				},
			(F::PublishDateMinimum, O::GreaterThanEqual, V::Date(at))
			| (F::PublishDateMaximum, O::LessThanEqual, V::Date(at)) => {
				to_utc_seconds(*at)?;
			},
			(F::ProfileIdentity, O::Equal, V::Int(_)) => {},
			_ => {
				return Err(Error::validation(format!(
					"{} does not accept operator {} with a {} value.",
					field.as_str(),
					operator,
					value.kind()
				)));
			},
		}

		Ok(Self { field, operator, value })
	}

	pub fn workspaces<I>(ids: I) -> Result<Self>
	where
		I: IntoIterator<Item = i64>,
	{
		Self::new(
			FilterField::WorkspaceMembership,
			FilterOperator::ContainsAny,
			FilterValue::IntSet(ids.into_iter().collect()),
		)
	}

	pub fn min_engagement(threshold: i64) -> Result<Self> {
		Self::new(
			FilterField::EngagementMinimum,
			FilterOperator::GreaterThanEqual,
			FilterValue::Int(threshold),
		)
	}

	pub fn published_since(at: OffsetDateTime) -> Result<Self> {
		Self::new(
			FilterField::PublishDateMinimum,
			FilterOperator::GreaterThanEqual,
			FilterValue::Date(at),
		)
	}

	/// Inclusive upper bound: a post published exactly at `at` matches.
	pub fn published_until(at: OffsetDateTime) -> Result<Self> {
		Self::new(
			FilterField::PublishDateMaximum,
			FilterOperator::LessThanEqual,
			FilterValue::Date(at),
		)
	}

	/// A single profile collapses to scalar equality; several profiles use set intersection.
	pub fn profiles<I>(ids: I) -> Result<Self>
	where
		I: IntoIterator<Item = i64>,
	{
		let mut ids: Vec<i64> = ids.into_iter().collect();

		match ids.len() {
			0 => Err(Error::validation("profile_identity requires at least one identifier.")),
			1 => Self::new(
				FilterField::ProfileIdentity,
				FilterOperator::Equal,
				FilterValue::Int(ids.remove(0)),
			),
			_ => Self::new(
				FilterField::ProfileIdentity,
				FilterOperator::ContainsAny,
				FilterValue::IntSet(ids),
			),
		}
	}

	pub fn field(&self) -> FilterField {
		self.field
	}

	pub fn operator(&self) -> FilterOperator {
		self.operator
	}

	pub fn value(&self) -> &FilterValue {
		&self.value
	}

	pub fn render(&self) -> Result<String> {
		Ok(format!(
			"{{ path: [{}], operator: {}, {} }}",
			quote(self.field.property()),
			self.operator,
			self.value.render()?
		))
	}
}

/// Two or more filters joined with `And`. Only [`Predicate`] can build one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conjunction {
	operands: Vec<Filter>,
}
impl Conjunction {
	pub fn operands(&self) -> &[Filter] {
		&self.operands
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Predicate {
	#[default]
	Empty,
	Single(Filter),
	Conjunction(Conjunction),
}
impl Predicate {
	pub fn compile<I>(filters: I) -> Self
	where
		I: IntoIterator<Item = Filter>,
	{
		filters.into_iter().fold(Self::Empty, Self::and)
	}

	/// Appends `filter`, keeping caller order.
	pub fn and(self, filter: Filter) -> Self {
		match self {
			Self::Empty => Self::Single(filter),
			Self::Single(first) => Self::Conjunction(Conjunction { operands: vec![first, filter] }),
			Self::Conjunction(mut conjunction) => {
				conjunction.operands.push(filter);

				Self::Conjunction(conjunction)
			},
		}
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	pub fn len(&self) -> usize {
		self.filters().len()
	}

	pub fn filters(&self) -> &[Filter] {
		match self {
			Self::Empty => &[],
			Self::Single(filter) => slice::from_ref(filter),
			Self::Conjunction(conjunction) => conjunction.operands(),
		}
	}

	/// The `where` argument value, or `None` when there is nothing to constrain.
	pub fn render(&self) -> Result<Option<String>> {
		match self {
			Self::Empty => Ok(None),
			Self::Single(filter) => filter.render().map(Some),
			Self::Conjunction(conjunction) => {
				let operands =
					conjunction.operands.iter().map(Filter::render).collect::<Result<Vec<_>>>()?;

				Ok(Some(format!("{{ operator: And, operands: [{}] }}", operands.join(", "))))
			},
		}
	}
}

/// Midnight UTC of the day `days` before `now`.
pub fn window_start(now: OffsetDateTime, days: u32) -> Result<OffsetDateTime> {
	let out_of_range = || Error::validation(format!("A window of {days} days is out of range."));
	let shifted = to_utc_seconds(now)?
		.checked_sub(Duration::days(i64::from(days)))
		.ok_or_else(out_of_range)?;
	let start = shifted.date().midnight().assume_utc();

	if !YEAR_RANGE.contains(&start.year()) {
		return Err(out_of_range());
	}

	Ok(start)
}

/// RFC 3339 in UTC with second precision, e.g. `2026-10-09T00:00:00Z`.
pub(crate) fn format_date(at: OffsetDateTime) -> Result<String> {
	to_utc_seconds(at)?
		.format(&Rfc3339)
		.map_err(|err| Error::validation(format!("Date {at} cannot be rendered: {err}.")))
}

fn to_utc_seconds(at: OffsetDateTime) -> Result<OffsetDateTime> {
	let utc = at
		.checked_to_offset(UtcOffset::UTC)
		.filter(|utc| YEAR_RANGE.contains(&utc.year()))
		.ok_or_else(|| Error::validation(format!("Date {at} is outside years 0000 to 9999.")))?;

	utc.replace_nanosecond(0)
		.map_err(|err| Error::validation(format!("Date {at} cannot be truncated: {err}.")))
}

/// GraphQL string literal; JSON escaping is a subset of GraphQL string escaping.
pub(crate) fn quote(raw: &str) -> String {
	Value::String(raw.to_string()).to_string()
}
