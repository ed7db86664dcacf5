//! Search-then-scan: find the first search hit whose body contains a keyword.
//!
//! The scan is sequential and follows the order returned by the search
//! endpoint, so the first match is deterministic and nothing past it is
//! fetched. Candidates without a path, or whose fetch fails, are skipped; only
//! a failing search aborts the operation.

use tracing::{debug, info, warn};

use super::client::VaultApi;
use super::error::ApiResult;
use super::models::{NoteContent, NoteFormat, SearchDialect, SearchResultItem};

/// Inputs of a search-then-scan run.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    /// Query body sent to `POST /search`.
    pub query: String,
    /// Literal substring to look for in each candidate.
    pub keyword: String,
    /// Query language of `query`.
    pub dialect: SearchDialect,
    /// Representation fetched (and matched against) for each candidate.
    pub format: NoteFormat,
}

/// Terminal state of a search-then-scan run.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// A candidate contained the keyword.
    Found {
        filename: String,
        content: NoteContent,
        /// Candidates fetched, including the match.
        scanned: usize,
    },
    /// The search succeeded but returned no rows.
    NoResults,
    /// Every candidate was visited and none contained the keyword.
    NoMatch {
        keyword: String,
        scanned: usize,
        /// Candidates skipped for a missing path or a failed fetch.
        skipped: usize,
    },
}

impl MatchOutcome {
    /// User-facing message for the two empty outcomes.
    pub fn message(&self) -> String {
        match self {
            Self::Found { filename, .. } => format!("Found keyword in '{}'.", filename),
            Self::NoResults => "The search returned no results.".to_string(),
            Self::NoMatch { keyword, .. } => {
                format!("No file containing the keyword '{}' was found.", keyword)
            }
        }
    }
}

/// Run the search, then scan candidates in order until one matches.
pub async fn find_matching_file(
    api: &dyn VaultApi,
    request: &MatchRequest,
) -> ApiResult<MatchOutcome> {
    let rows = api.search(&request.query, request.dialect).await?;
    if rows.is_empty() {
        info!("Search returned no results");
        return Ok(MatchOutcome::NoResults);
    }

    info!(
        "Scanning {} candidate(s) for keyword '{}'",
        rows.len(),
        request.keyword
    );

    let mut scanned = 0;
    let mut skipped = 0;

    for (index, row) in rows.iter().enumerate() {
        let item = SearchResultItem::from_value(row);
        let Some(path) = item.file_path() else {
            debug!("Skipping search row {} without a file path", index);
            skipped += 1;
            continue;
        };

        let content = match api.get_file(path, request.format).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping '{}': {}", path, e);
                skipped += 1;
                continue;
            }
        };
        scanned += 1;

        if content.contains(&request.keyword) {
            info!("Keyword found in '{}' after {} fetch(es)", path, scanned);
            return Ok(MatchOutcome::Found {
                filename: path.to_string(),
                content,
                scanned,
            });
        }
    }

    Ok(MatchOutcome::NoMatch {
        keyword: request.keyword.clone(),
        scanned,
        skipped,
    })
}
