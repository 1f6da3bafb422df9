//! Formatting preferences supplied by the host.

use serde::{Deserialize, Serialize};

/// Indent size used when the host does not supply one.
pub const DEFAULT_INDENT_SIZE: u32 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatCodeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent_size: Option<u32>,
}

impl FormatCodeSettings {
    pub const fn with_indent_size(indent_size: u32) -> Self {
        FormatCodeSettings {
            indent_size: Some(indent_size),
        }
    }

    pub fn indent_size(&self) -> u32 {
        self.indent_size.unwrap_or(DEFAULT_INDENT_SIZE)
    }

    /// Values set in `overrides` win over the values in `self`.
    pub fn merged_with(&self, overrides: &FormatCodeSettings) -> FormatCodeSettings {
        FormatCodeSettings {
            indent_size: overrides.indent_size.or(self.indent_size),
        }
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn indent_size_defaults_to_four() {
        assert_eq!(FormatCodeSettings::default().indent_size(), 4);
        assert_eq!(FormatCodeSettings::with_indent_size(2).indent_size(), 2);
    }

    #[test]
    fn merge_prefers_overrides() {
        let session = FormatCodeSettings::with_indent_size(2);
        assert_eq!(session.merged_with(&FormatCodeSettings::default()).indent_size(), 2);
        assert_eq!(
            session
                .merged_with(&FormatCodeSettings::with_indent_size(8))
                .indent_size(),
            8
        );
    }

    #[test]
    fn deserializes_camel_case() {
        let settings: FormatCodeSettings = serde_json::from_str(r#"{"indentSize":3}"#).unwrap();
        assert_eq!(settings.indent_size, Some(3));
        let empty: FormatCodeSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.indent_size, None);
    }
}
