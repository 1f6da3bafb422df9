//! Line protocol messages.
//!
//! One JSON request per input line, one JSON response per output line:
//!
//! ```json
//! {"type":"open","id":1,"file":"a.ts","text":"const a = { b: 1 };"}
//! {"type":"getApplicableRefactors","id":2,"file":"a.ts","positionOrRange":6}
//! {"type":"getEditsForRefactor","id":3,"file":"a.ts","positionOrRange":{"pos":6,"end":7},
//!  "refactor":"destructure-to-constant","action":"destructure-to-constant"}
//! {"type":"shutdown","id":4}
//! ```
//!
//! Selections are byte offsets, or line/character positions for editors that
//! do not track offsets: `{"line":0,"character":6}` or
//! `{"start":{..},"end":{..}}`.

use serde::{Deserialize, Serialize};
use tsd_common::{FormatCodeSettings, LineMap, Position, PositionOrRange, Range, TextRange};
use tsd_refactor::{ApplicableRefactorInfo, RefactorEditInfo};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    /// Add or replace a file. Without `text` the file is read from disk.
    Open {
        id: u64,
        file: String,
        #[serde(default)]
        text: Option<String>,
    },
    Close {
        id: u64,
        file: String,
    },
    GetApplicableRefactors {
        id: u64,
        file: String,
        position_or_range: Selection,
    },
    GetEditsForRefactor {
        id: u64,
        file: String,
        position_or_range: Selection,
        refactor: String,
        action: String,
        #[serde(default)]
        format_options: FormatCodeSettings,
    },
    /// Replace the session-wide formatting preferences.
    Configure {
        id: u64,
        format_options: FormatCodeSettings,
    },
    Shutdown {
        id: u64,
    },
}

/// A selection in either coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Offsets(PositionOrRange),
    Position(Position),
    Range(Range),
}

impl Selection {
    /// Byte offsets into `text`; `None` when a line is past the end.
    pub fn resolve(self, text: &str) -> Option<PositionOrRange> {
        match self {
            Selection::Offsets(position_or_range) => Some(position_or_range),
            Selection::Position(position) => LineMap::build(text)
                .position_to_offset(position, text)
                .map(PositionOrRange::Position),
            Selection::Range(range) => {
                let map = LineMap::build(text);
                let pos = map.position_to_offset(range.start, text)?;
                let end = map.position_to_offset(range.end, text)?;
                Some(PositionOrRange::Range(TextRange::new(pos, end)))
            }
        }
    }
}

impl From<PositionOrRange> for Selection {
    fn from(position_or_range: PositionOrRange) -> Self {
        Selection::Offsets(position_or_range)
    }
}

impl Request {
    pub fn id(&self) -> u64 {
        match self {
            Request::Open { id, .. }
            | Request::Close { id, .. }
            | Request::GetApplicableRefactors { id, .. }
            | Request::GetEditsForRefactor { id, .. }
            | Request::Configure { id, .. }
            | Request::Shutdown { id } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Refactors(RefactorsResponse),
    Edits(EditsResponse),
    Ok(OkResponse),
    Error(ErrorResponse),
}

impl Response {
    pub fn ok(id: u64) -> Self {
        Response::Ok(OkResponse { id, ok: true })
    }

    pub fn error(id: u64, error: impl Into<String>) -> Self {
        Response::Error(ErrorResponse {
            id,
            error: error.into(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefactorsResponse {
    pub id: u64,
    pub refactors: Vec<ApplicableRefactorInfo>,
}

/// `edits` is `null` when the refactor does not apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditsResponse {
    pub id: u64,
    pub edits: Option<RefactorEditInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OkResponse {
    pub id: u64,
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub id: u64,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_requests_with_either_selection_shape() {
        let caret: Request = serde_json::from_str(
            r#"{"type":"getApplicableRefactors","id":3,"file":"a.ts","positionOrRange":10}"#,
        )
        .unwrap();
        assert_eq!(
            caret,
            Request::GetApplicableRefactors {
                id: 3,
                file: "a.ts".to_string(),
                position_or_range: PositionOrRange::Position(10).into(),
            }
        );

        let range: Request = serde_json::from_str(
            r#"{"type":"getEditsForRefactor","id":4,"file":"a.ts","positionOrRange":{"pos":4,"end":9},"refactor":"roll-into-spread","action":"roll-into-spread","formatOptions":{"indentSize":2}}"#,
        )
        .unwrap();
        assert_eq!(
            range,
            Request::GetEditsForRefactor {
                id: 4,
                file: "a.ts".to_string(),
                position_or_range: PositionOrRange::Range(TextRange::new(4, 9)).into(),
                refactor: "roll-into-spread".to_string(),
                action: "roll-into-spread".to_string(),
                format_options: FormatCodeSettings::with_indent_size(2),
            }
        );
    }

    #[test]
    fn format_options_are_optional_for_edits() {
        let request: Request = serde_json::from_str(
            r#"{"type":"getEditsForRefactor","id":1,"file":"a.ts","positionOrRange":0,"refactor":"r","action":"a"}"#,
        )
        .unwrap();
        assert!(matches!(
            request,
            Request::GetEditsForRefactor { format_options, .. } if format_options.indent_size.is_none()
        ));
    }

    #[test]
    fn resolves_line_character_selections() {
        let text = "const a = 1;\nconst value = a;";
        let caret: Selection = serde_json::from_str(r#"{"line":1,"character":6}"#).unwrap();
        assert_eq!(caret, Selection::Position(Position::new(1, 6)));
        assert_eq!(caret.resolve(text), Some(PositionOrRange::Position(19)));

        let range: Selection = serde_json::from_str(
            r#"{"start":{"line":1,"character":6},"end":{"line":1,"character":11}}"#,
        )
        .unwrap();
        assert_eq!(
            range.resolve(text),
            Some(PositionOrRange::Range(TextRange::new(19, 24)))
        );

        let past_end = Selection::Position(Position::new(5, 0));
        assert_eq!(past_end.resolve(text), None);
    }

    #[test]
    fn rejects_unknown_request_type() {
        assert!(serde_json::from_str::<Request>(r#"{"type":"check","id":1}"#).is_err());
    }

    #[test]
    fn serializes_flat_responses() {
        assert_eq!(
            serde_json::to_string(&Response::ok(1)).unwrap(),
            r#"{"id":1,"ok":true}"#
        );
        assert_eq!(
            serde_json::to_string(&Response::error(2, "unknown file: a.ts")).unwrap(),
            r#"{"id":2,"error":"unknown file: a.ts"}"#
        );
        assert_eq!(
            serde_json::to_string(&Response::Edits(EditsResponse { id: 3, edits: None })).unwrap(),
            r#"{"id":3,"edits":null}"#
        );
    }
}
