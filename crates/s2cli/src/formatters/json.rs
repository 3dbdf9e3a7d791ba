//! JSON output formatting.

use crate::error::ClientResult;

/// Serialize a response value.
///
/// Pretty-printed for interactive terminals, compact single-line when piped
/// so line-oriented filters see one record per line. The indentation is the
/// only difference; content is identical either way.
pub fn format_json(value: &serde_json::Value, interactive: bool) -> ClientResult<String> {
    let out = if interactive {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_piped_output_is_single_line() {
        let value = json!({"paperId": "abc", "title": "Test", "authors": [{"name": "A"}]});
        let out = format_json(&value, false).unwrap();
        assert!(!out.contains('\n'));
    }

    #[test]
    fn test_indentation_never_changes_content() {
        let value = json!({"a": [1, 2, 3], "b": {"c": null}});
        let compact: serde_json::Value =
            serde_json::from_str(&format_json(&value, false).unwrap()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&format_json(&value, true).unwrap()).unwrap();
        assert_eq!(compact, value);
        assert_eq!(pretty, value);
    }
}
