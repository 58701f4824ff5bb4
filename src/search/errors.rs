//! Search error types

use thiserror::Error;

use crate::engine::EngineError;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors raised while executing a sharded search
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The enumerator produced no shards for the logical table
    #[error("no shard exists: logical_table: <{logical_table}>: shard_key: <{shard_key}>")]
    NoShards {
        logical_table: String,
        shard_key: String,
    },

    /// A storage or expression primitive failed mid-query
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_shards_message_names_table_and_key() {
        let err = SearchError::NoShards {
            logical_table: "logs".to_string(),
            shard_key: "timestamp".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "no shard exists: logical_table: <logs>: shard_key: <timestamp>"
        );
    }

    #[test]
    fn test_engine_error_passes_through() {
        let err = SearchError::from(EngineError::sort_failed("blank sort field"));
        assert_eq!(format!("{}", err), "sort failed: blank sort field");
    }
}
