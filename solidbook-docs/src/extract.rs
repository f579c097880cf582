//! Filename marker extraction for fenced code blocks.
//!
//! A fence may open with `[[ name ]]` on its own line followed by exactly one
//! blank line. The marker labels the snippet with a virtual file name and is
//! removed from the displayed code:
//!
//! ````text
//! ```tsx
//! [[ Button.tsx ]]
//!
//! const Button = () => <button />
//! ```
//! ````

use std::sync::LazyLock;

use regex::Regex;

/// Leading marker: `[[`, optional whitespace, lazily captured name, optional
/// whitespace, `]]`, newline, blank line.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\[\s*(.+?)\s*\]\]\n\n").expect("valid regex"));

/// A fence's content with its filename marker split off.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedCodeBlock {
    /// Name from the marker, or empty when there was none.
    pub file_name: String,
    /// Code with the marker (and its blank line) removed.
    pub code: String,
}

/// Splits an optional leading filename marker from `raw`.
///
/// Only one marker is stripped. Input without a marker comes back unchanged
/// with an empty file name; there is no failure case.
#[must_use]
pub fn extract_code_block(raw: &str) -> ExtractedCodeBlock {
    MARKER_RE.captures(raw).map_or_else(
        || ExtractedCodeBlock {
            file_name: String::new(),
            code: raw.to_string(),
        },
        |caps| {
            let marker = caps.get(0).map_or(0, |m| m.end());
            ExtractedCodeBlock {
                file_name: caps
                    .get(1)
                    .map_or("", |m| m.as_str())
                    .trim()
                    .to_string(),
                code: raw[marker..].to_string(),
            }
        },
    )
}

/// Returns `true` if `raw` opens with a filename marker.
#[must_use]
pub fn has_marker(raw: &str) -> bool {
    MARKER_RE.is_match(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_marker_extracted() {
        let block = extract_code_block("[[ foo.tsx ]]\n\ncode");
        assert_eq!(block.file_name, "foo.tsx");
        assert_eq!(block.code, "code");
    }

    #[test]
    fn test_marker_without_spaces() {
        let block = extract_code_block("[[hooks/useUsers.tsx]]\n\nconst a = 1;\n");
        assert_eq!(block.file_name, "hooks/useUsers.tsx");
        assert_eq!(block.code, "const a = 1;\n");
    }

    #[test]
    fn test_name_with_inner_spaces_kept() {
        let block = extract_code_block("[[  My File.tsx  ]]\n\nx");
        assert_eq!(block.file_name, "My File.tsx");
    }

    #[test]
    fn test_no_marker() {
        let block = extract_code_block("const x = 1;");
        assert_eq!(block.file_name, "");
        assert_eq!(block.code, "const x = 1;");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_code_block(""), ExtractedCodeBlock::default());
    }

    #[test]
    fn test_blank_name_strips_marker() {
        let block = extract_code_block("[[ ]]\n\nx");
        assert_eq!(block.file_name, "");
        assert_eq!(block.code, "x");
    }

    #[test]
    fn test_only_first_marker_stripped() {
        let block = extract_code_block("[[ a.ts ]]\n\n[[ b.ts ]]\n\nx");
        assert_eq!(block.file_name, "a.ts");
        assert_eq!(block.code, "[[ b.ts ]]\n\nx");
    }

    #[test]
    fn test_extra_blank_lines_belong_to_code() {
        let block = extract_code_block("[[ a.ts ]]\n\n\nx");
        assert_eq!(block.file_name, "a.ts");
        assert_eq!(block.code, "\nx");
    }

    // Near misses: the documented pattern is authoritative, so anything that
    // does not end in `]]\n\n` is left alone.

    #[test]
    fn test_near_miss_single_newline() {
        let raw = "[[ a.ts ]]\nconst x = 1;";
        assert_eq!(extract_code_block(raw).code, raw);
    }

    #[test]
    fn test_near_miss_trailing_spaces_after_brackets() {
        let raw = "[[ a.ts ]]  \n\nx";
        assert_eq!(extract_code_block(raw).code, raw);
    }

    #[test]
    fn test_near_miss_crlf() {
        let raw = "[[ a.ts ]]\r\n\r\nx";
        assert_eq!(extract_code_block(raw).file_name, "");
    }

    #[test]
    fn test_near_miss_not_at_start() {
        let raw = "// intro\n[[ a.ts ]]\n\nx";
        assert_eq!(extract_code_block(raw).code, raw);
    }

    #[test]
    fn test_near_miss_single_brackets() {
        let raw = "[ a.ts ]\n\nx";
        assert!(!has_marker(raw));
    }

    #[test]
    fn test_marker_at_end_of_input() {
        let block = extract_code_block("[[ a.ts ]]\n\n");
        assert_eq!(block.file_name, "a.ts");
        assert_eq!(block.code, "");
    }

    proptest! {
        #[test]
        fn prop_unmarked_input_unchanged(s in any::<String>()) {
            prop_assume!(!has_marker(&s));
            let block = extract_code_block(&s);
            prop_assert_eq!(block.file_name, "");
            prop_assert_eq!(block.code, s);
        }

        #[test]
        fn prop_marker_round_trip(
            name in "[A-Za-z0-9_./-]{1,24}",
            body in any::<String>(),
        ) {
            let block = extract_code_block(&format!("[[ {name} ]]\n\n{body}"));
            prop_assert_eq!(block.file_name, name);
            prop_assert_eq!(block.code, body);
        }

        #[test]
        fn prop_idempotent_on_output(s in any::<String>()) {
            let once = extract_code_block(&s);
            prop_assume!(!has_marker(&once.code));
            let twice = extract_code_block(&once.code);
            prop_assert_eq!(twice.code, once.code);
            prop_assert_eq!(twice.file_name, "");
        }
    }
}
