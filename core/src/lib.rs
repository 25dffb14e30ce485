pub mod corpus;
pub mod index;
pub mod query;
pub mod score;
pub mod set;
pub mod tokenizer;

pub use index::{InvertedIndex, Posting, SharedIndex};
pub use query::QueryError;
pub use score::QueryResult;
pub use set::Set;
