//! Regex-driven line selection over arbitrary text streams.
//!
//! Every protocol in this tool is "parse some external tool's text output
//! line by line": git status records, blame annotations, diff hunk headers,
//! linter findings. This module is the one shared primitive for that.
//!
//! Matches are anchored at the start of each line; trailing content after
//! the match is ignored. Non-matching lines are silently dropped and the
//! input order is preserved.

use regex::{Captures, Regex};

/// Match `pattern` against `line`, requiring the match to start at byte 0.
///
/// The regex crate reports the leftmost match, so checking that the match
/// begins at the first byte is equivalent to anchored matching without
/// requiring callers to prefix every pattern with `^`.
fn captures_at_start<'t>(pattern: &Regex, line: &'t str) -> Option<Captures<'t>> {
    pattern
        .captures(line)
        .filter(|caps| caps.get(0).map(|m| m.start()) == Some(0))
}

/// Yields the lines whose text matches `pattern` at the line start.
pub fn matching_lines<'a, I>(lines: I, pattern: &'a Regex) -> impl Iterator<Item = &'a str> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    lines
        .into_iter()
        .filter(move |line| captures_at_start(pattern, line).is_some())
}

/// Yields, for each matching line, the requested named groups in order.
///
/// Each row has exactly `groups.len()` entries. A group that exists in the
/// pattern but did not participate in the match (an alternation branch that
/// was not taken) and a group name absent from the pattern entirely both
/// yield `None` - no caller needs to tell them apart.
pub fn capture_groups<'a, I>(
    lines: I,
    pattern: &'a Regex,
    groups: &'a [&'a str],
) -> impl Iterator<Item = Vec<Option<String>>> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    lines.into_iter().filter_map(move |line| {
        captures_at_start(pattern, line).map(|caps| {
            groups
                .iter()
                .map(|group| caps.name(group).map(|m| m.as_str().to_string()))
                .collect()
        })
    })
}

/// Single-group convenience wrapper over [`capture_groups`].
pub fn capture_group<'a, I>(
    lines: I,
    pattern: &'a Regex,
    group: &'a str,
) -> impl Iterator<Item = Option<String>> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    lines.into_iter().filter_map(move |line| {
        captures_at_start(pattern, line)
            .map(|caps| caps.name(group).map(|m| m.as_str().to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn test_matching_lines_keeps_order() {
        let lines = vec!["b1", "a2", "b3", "a4"];
        let re = regex(r"a\d");
        let matched: Vec<&str> = matching_lines(lines, &re).collect();
        assert_eq!(matched, vec!["a2", "a4"]);
    }

    #[test]
    fn test_match_is_anchored_at_line_start() {
        let lines = vec!["error: boom", "prefix error: boom"];
        let re = regex(r"error");
        let matched: Vec<&str> = matching_lines(lines, &re).collect();
        assert_eq!(matched, vec!["error: boom"]);
    }

    #[test]
    fn test_trailing_content_is_ignored() {
        let lines = vec!["code E123 and more text"];
        let re = regex(r"code E\d+");
        let matched: Vec<&str> = matching_lines(lines, &re).collect();
        assert_eq!(matched, vec!["code E123 and more text"]);
    }

    #[test]
    fn test_single_group_extraction() {
        let lines = vec!["line 3: x", "nope", "line 14: y"];
        let captured: Vec<Option<String>> =
            capture_group(lines, &regex(r"line (?P<line>\d+)"), "line").collect();
        assert_eq!(
            captured,
            vec![Some("3".to_string()), Some("14".to_string())]
        );
    }

    #[test]
    fn test_multiple_groups_fixed_width() {
        let lines = vec!["a.py:3:1: boom"];
        let rows: Vec<Vec<Option<String>>> = capture_groups(
            lines,
            &regex(r"a\.py:(?P<line>\d+):(?P<column>\d+): (?P<message>.*)"),
            &["line", "message", "column"],
        )
        .collect();
        assert_eq!(
            rows,
            vec![vec![
                Some("3".to_string()),
                Some("boom".to_string()),
                Some("1".to_string()),
            ]]
        );
    }

    #[test]
    fn test_group_not_participating_in_match_yields_none() {
        // Only one branch of the alternation defines `col`.
        let pattern = regex(r"(?P<line>\d+)(:(?P<col>\d+))?");
        let rows: Vec<Vec<Option<String>>> =
            capture_groups(vec!["7", "8:2"], &pattern, &["line", "col"]).collect();
        assert_eq!(
            rows,
            vec![
                vec![Some("7".to_string()), None],
                vec![Some("8".to_string()), Some("2".to_string())],
            ]
        );
    }

    #[test]
    fn test_group_absent_from_pattern_yields_none() {
        let rows: Vec<Vec<Option<String>>> =
            capture_groups(vec!["42"], &regex(r"(?P<line>\d+)"), &["line", "severity"]).collect();
        assert_eq!(rows, vec![vec![Some("42".to_string()), None]]);
    }

    #[test]
    fn test_restartable_and_stateless() {
        let pattern = regex(r"(?P<n>\d+)");
        let first: Vec<Option<String>> = capture_group(vec!["1", "2"], &pattern, "n").collect();
        let second: Vec<Option<String>> = capture_group(vec!["1", "2"], &pattern, "n").collect();
        assert_eq!(first, second);
    }
}
