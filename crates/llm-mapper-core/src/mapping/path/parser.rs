//! Path string parser
//!
//! Grammar, informally: segments separated by `.` outside brackets; each
//! segment is an optional property name followed by zero or more bracket
//! groups. `[]` is the whole-array marker.
//!
//! The parser is total. Declarations are written by developers, so malformed
//! input degrades instead of failing: empty segments (leading, trailing or
//! doubled dots) are dropped and a segment whose brackets do not scan cleanly
//! becomes one literal property.
//!
//! Copyright (c) 2025 LLM Mapper Team
//! Licensed under the Apache-2.0 license

use super::ast::{Index, Path, Step};

/// Parse a path string into a [`Path`]
pub fn parse(input: &str) -> Path {
    Parser::new(input).parse()
}

/// Path parser
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    pub fn parse(self) -> Path {
        let steps = self
            .segments()
            .into_iter()
            .flat_map(parse_segment)
            .collect();
        Path::new(steps)
    }

    /// Split on dots at bracket depth zero
    fn segments(&self) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;

        for (offset, ch) in self.input.char_indices() {
            match ch {
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                '.' if depth == 0 => {
                    segments.push(&self.input[start..offset]);
                    start = offset + 1;
                }
                _ => {}
            }
        }
        segments.push(&self.input[start..]);

        segments.retain(|segment| !segment.is_empty());
        segments
    }
}

fn parse_segment(segment: &str) -> Vec<Step> {
    let Some(open) = segment.find('[') else {
        return vec![Step::Property(segment.to_string())];
    };

    let mut steps = Vec::new();
    let name = &segment[..open];
    if !name.is_empty() {
        steps.push(Step::Property(name.to_string()));
    }

    let mut rest = &segment[open..];
    while !rest.is_empty() {
        let Some(after_open) = rest.strip_prefix('[') else {
            return literal(segment);
        };
        let Some(close) = after_open.find(']') else {
            return literal(segment);
        };
        let inner = &after_open[..close];
        if inner.contains('[') {
            return literal(segment);
        }

        steps.push(if inner.is_empty() {
            Step::WholeArray
        } else {
            Step::Index(Index::classify(inner))
        });
        rest = &after_open[close + 1..];
    }

    steps
}

fn literal(segment: &str) -> Vec<Step> {
    vec![Step::Property(segment.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str) -> Step {
        Step::Property(name.to_string())
    }

    fn pos(i: usize) -> Step {
        Step::Index(Index::Position(i))
    }

    #[test]
    fn test_simple_dot_notation() {
        assert_eq!(parse("a.b.c").steps(), &[prop("a"), prop("b"), prop("c")]);
    }

    #[test]
    fn test_array_index() {
        assert_eq!(
            parse("messages[0].content").steps(),
            &[prop("messages"), pos(0), prop("content")]
        );
    }

    #[test]
    fn test_whole_array_marker() {
        assert_eq!(parse("items[]").steps(), &[prop("items"), Step::WholeArray]);
    }

    #[test]
    fn test_consecutive_brackets() {
        assert_eq!(parse("grid[0][1]").steps(), &[prop("grid"), pos(0), pos(1)]);
    }

    #[test]
    fn test_string_key_index() {
        assert_eq!(
            parse("headers[x-api].value").steps(),
            &[
                prop("headers"),
                Step::Index(Index::Key("x-api".to_string())),
                prop("value")
            ]
        );
    }

    #[test]
    fn test_dot_inside_brackets_does_not_split() {
        assert_eq!(
            parse("map[a.b].c").steps(),
            &[prop("map"), Step::Index(Index::Key("a.b".to_string())), prop("c")]
        );
    }

    #[test]
    fn test_leading_and_trailing_dots_are_dropped() {
        assert_eq!(parse(".a.b.").steps(), &[prop("a"), prop("b")]);
        assert_eq!(parse("a..b").steps(), &[prop("a"), prop("b")]);
        assert!(parse("").is_empty());
        assert!(parse("...").is_empty());
    }

    #[test]
    fn test_unbalanced_brackets_degrade_to_literal() {
        assert_eq!(parse("a[0").steps(), &[prop("a[0")]);
        assert_eq!(parse("a[0]b").steps(), &[prop("a[0]b")]);
        assert_eq!(parse("a[[0]]").steps(), &[prop("a[[0]]")]);
        assert_eq!(parse("a]").steps(), &[prop("a]")]);
    }

    #[test]
    fn test_segment_starting_with_bracket() {
        assert_eq!(parse("[2].name").steps(), &[pos(2), prop("name")]);
    }

    #[test]
    fn test_parse_is_pure() {
        assert_eq!(parse("a.b[3][]"), parse("a.b[3][]"));
    }
}
