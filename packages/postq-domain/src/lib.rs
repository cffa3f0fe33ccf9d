pub mod filter;
pub mod query;
pub mod response;

mod error;

pub use error::{Error, Result};
pub use filter::{Conjunction, Filter, FilterField, FilterOperator, FilterValue, Predicate};
pub use query::{Collection, QueryBuilder, SearchRequest, SimilarRequest, TrendingRequest};
pub use response::{Additional, Post, TermOccurrence};
