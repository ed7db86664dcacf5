//! Data shapes exchanged with the Local REST API and Omnisearch.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// `Accept` value for the structured note representation.
pub const NOTE_JSON_MIME: &str = "application/vnd.olrapi.note+json";

/// `Accept`/`Content-Type` value for plain markdown.
pub const MARKDOWN_MIME: &str = "text/markdown";

/// Content type of a Dataview DQL query body.
pub const DATAVIEW_DQL_MIME: &str = "application/vnd.olrapi.dataview.dql+txt";

/// Content type of a JsonLogic query body.
pub const JSON_LOGIC_MIME: &str = "application/vnd.olrapi.jsonlogic+json";

/// Representation requested when reading a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteFormat {
    /// Raw markdown body.
    #[default]
    Markdown,
    /// JSON document with content, frontmatter, tags and stat.
    Json,
}

impl NoteFormat {
    /// Pick the format from a tool's `as_json` flag.
    pub fn from_as_json(as_json: bool) -> Self {
        if as_json { Self::Json } else { Self::Markdown }
    }

    /// Value for the `Accept` header.
    pub fn accept(self) -> &'static str {
        match self {
            Self::Markdown => MARKDOWN_MIME,
            Self::Json => NOTE_JSON_MIME,
        }
    }
}

/// Query language of a `POST /search` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchDialect {
    /// Dataview `TABLE ...` query as text.
    #[default]
    Dataview,
    /// JsonLogic expression evaluated against each note.
    JsonLogic,
}

impl SearchDialect {
    /// Value for the `Content-Type` header.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Dataview => DATAVIEW_DQL_MIME,
            Self::JsonLogic => JSON_LOGIC_MIME,
        }
    }
}

impl FromStr for SearchDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            DATAVIEW_DQL_MIME => Ok(Self::Dataview),
            JSON_LOGIC_MIME => Ok(Self::JsonLogic),
            other => Err(format!(
                "Unsupported content_type '{}'. Use '{}' or '{}'",
                other, DATAVIEW_DQL_MIME, JSON_LOGIC_MIME
            )),
        }
    }
}

impl fmt::Display for SearchDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}

/// Body of a note as returned by the Local REST API.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteContent {
    Markdown(String),
    Json(Value),
}

impl NoteContent {
    /// Literal substring test.
    ///
    /// JSON notes are searched leaf by leaf on the unescaped text, so keywords
    /// match inside content, frontmatter keys and values, and tags alike.
    pub fn contains(&self, keyword: &str) -> bool {
        match self {
            Self::Markdown(text) => text.contains(keyword),
            Self::Json(value) => keyword.is_empty() || json_contains(value, keyword),
        }
    }

    /// Convert into a JSON value (markdown becomes a JSON string).
    pub fn into_value(self) -> Value {
        match self {
            Self::Markdown(text) => Value::String(text),
            Self::Json(value) => value,
        }
    }
}

fn json_contains(value: &Value, keyword: &str) -> bool {
    match value {
        Value::String(text) => text.contains(keyword),
        Value::Number(n) => n.to_string().contains(keyword),
        Value::Bool(b) => b.to_string().contains(keyword),
        Value::Null => false,
        Value::Array(items) => items.iter().any(|v| json_contains(v, keyword)),
        Value::Object(map) => map
            .iter()
            .any(|(k, v)| k.contains(keyword) || json_contains(v, keyword)),
    }
}

/// One row returned by a search endpoint.
///
/// Every field is optional: Dataview rows carry `file.path`, REST API search
/// results carry `filename`, Omnisearch hits carry `path`. Fields are read one
/// by one, so a malformed field never hides a usable one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultItem {
    pub file_path: Option<String>,
    pub filename: Option<String>,
    pub path: Option<String>,
    pub score: Option<f64>,
}

impl SearchResultItem {
    /// Lenient conversion from a raw search row; non-object rows yield an
    /// item without a path.
    pub fn from_value(value: &Value) -> Self {
        let text = |pointer: &str| {
            value
                .pointer(pointer)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            file_path: text("/file/path"),
            filename: text("/filename"),
            path: text("/path"),
            score: value.get("score").and_then(Value::as_f64),
        }
    }

    /// Vault-relative path of the matched file, if the row names one.
    pub fn file_path(&self) -> Option<&str> {
        self.file_path
            .as_deref()
            .or(self.filename.as_deref())
            .or(self.path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_format_accept_headers() {
        assert_eq!(NoteFormat::from_as_json(false).accept(), "text/markdown");
        assert_eq!(
            NoteFormat::from_as_json(true).accept(),
            "application/vnd.olrapi.note+json"
        );
    }

    #[test]
    fn test_search_dialect_parse() {
        assert_eq!(
            DATAVIEW_DQL_MIME.parse::<SearchDialect>(),
            Ok(SearchDialect::Dataview)
        );
        assert_eq!(
            JSON_LOGIC_MIME.parse::<SearchDialect>(),
            Ok(SearchDialect::JsonLogic)
        );
        let err = "application/json".parse::<SearchDialect>().unwrap_err();
        assert!(err.contains("application/json"));
    }

    #[test]
    fn test_file_path_from_dataview_row() {
        let item = SearchResultItem::from_value(&json!({
            "file": { "path": "inbox/react.md" },
            "rating": 5
        }));
        assert_eq!(item.file_path(), Some("inbox/react.md"));
    }

    #[test]
    fn test_file_path_from_rest_and_omnisearch_rows() {
        let rest = SearchResultItem::from_value(&json!({ "filename": "a.md", "result": true }));
        assert_eq!(rest.file_path(), Some("a.md"));

        let omni = SearchResultItem::from_value(&json!({
            "path": "notes/b.md",
            "basename": "b",
            "score": 12.5
        }));
        assert_eq!(omni.file_path(), Some("notes/b.md"));
        assert_eq!(omni.score, Some(12.5));
    }

    #[test]
    fn test_file_path_absent_or_malformed() {
        assert_eq!(SearchResultItem::from_value(&json!({})).file_path(), None);
        assert_eq!(
            SearchResultItem::from_value(&json!({ "file": {} })).file_path(),
            None
        );
        assert_eq!(
            SearchResultItem::from_value(&json!({ "file": { "path": "" } })).file_path(),
            None
        );
        assert_eq!(SearchResultItem::from_value(&json!("a.md")).file_path(), None);
        assert_eq!(
            SearchResultItem::from_value(&json!({ "file": { "path": 3 } })).file_path(),
            None
        );
    }

    #[test]
    fn test_json_note_matches_frontmatter() {
        let note = NoteContent::Json(json!({
            "content": "# Title",
            "frontmatter": { "status": "draft" },
            "tags": ["lang/react"]
        }));
        assert!(note.contains("draft"));
        assert!(note.contains("lang/react"));
        assert!(note.contains("frontmatter"));
        assert!(!note.contains("published"));
    }

    #[test]
    fn test_json_note_matches_unescaped_text() {
        let note = NoteContent::Json(json!({
            "content": "He said \"hello\" to me\nthen left C:\\tmp",
            "frontmatter": { "rating": 5 }
        }));
        assert!(note.contains("said \"hello\""));
        assert!(note.contains("me\nthen"));
        assert!(note.contains("C:\\tmp"));
        assert!(note.contains("5"));

        let markdown = NoteContent::Markdown("He said \"hello\" to me".to_string());
        assert!(markdown.contains("said \"hello\""));
    }

    #[test]
    fn test_malformed_field_does_not_hide_path() {
        let item = SearchResultItem::from_value(&json!({
            "filename": "inbox/a.md",
            "score": "high"
        }));
        assert_eq!(item.file_path(), Some("inbox/a.md"));
        assert_eq!(item.score, None);

        let item = SearchResultItem::from_value(&json!({ "file": "x", "path": "notes/c.md" }));
        assert_eq!(item.file_path(), Some("notes/c.md"));
    }

    #[test]
    fn test_empty_file_path_falls_back_to_filename() {
        let item = SearchResultItem::from_value(&json!({
            "file": { "path": "" },
            "filename": "inbox/b.md"
        }));
        assert_eq!(item.file_path(), Some("inbox/b.md"));
    }

    #[test]
    fn test_markdown_note_text() {
        let note = NoteContent::Markdown("# Hello".to_string());
        assert!(note.contains("Hello"));
        assert_eq!(note.into_value(), json!("# Hello"));
    }
}
