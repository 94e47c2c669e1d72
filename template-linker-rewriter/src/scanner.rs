//! Call-site scanner
//!
//! Finds `callee(<literal>)` occurrences where `<literal>` is a single- or
//! double-quoted string. The literal is walked with a small state machine
//! so an escaped quote never terminates it early.

use std::ops::Range;

/// A matched call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite<'a> {
    /// Byte range of the whole call, from the callee to the closing paren
    pub span: Range<usize>,
    /// Raw literal text, quotes and escapes included
    pub literal: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LiteralState {
    InLiteral,
    EscapePending,
    Terminated,
}

/// Iterator over the call sites of `callee` in `source`, left to right
pub struct CallScanner<'a> {
    source: &'a str,
    callee: &'a str,
    pos: usize,
}

impl<'a> CallScanner<'a> {
    pub fn new(source: &'a str, callee: &'a str) -> Self {
        Self {
            source,
            callee,
            pos: 0,
        }
    }

    /// Try to match a complete call site whose callee starts at `start`
    fn match_at(&self, start: usize) -> Option<CallSite<'a>> {
        let bytes = self.source.as_bytes();

        if self.source[..start]
            .chars()
            .next_back()
            .map_or(false, continues_identifier)
        {
            return None;
        }

        let mut pos = start + self.callee.len();
        if bytes.get(pos) != Some(&b'(') {
            return None;
        }
        pos += 1;

        let literal_start = pos;
        let quote = match bytes.get(pos) {
            Some(&q @ (b'"' | b'\'')) => q,
            _ => return None,
        };
        pos += 1;

        let mut state = LiteralState::InLiteral;
        while state != LiteralState::Terminated {
            // Running out of input inside the literal means no match
            let &byte = bytes.get(pos)?;
            state = match state {
                LiteralState::EscapePending => LiteralState::InLiteral,
                _ if byte == b'\\' => LiteralState::EscapePending,
                _ if byte == quote => LiteralState::Terminated,
                current => current,
            };
            pos += 1;
        }

        if bytes.get(pos) != Some(&b')') {
            return None;
        }

        Some(CallSite {
            span: start..pos + 1,
            literal: &self.source[literal_start..pos],
        })
    }
}

impl<'a> Iterator for CallScanner<'a> {
    type Item = CallSite<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = self.callee.chars().next()?.len_utf8();

        while let Some(offset) = self.source[self.pos..].find(self.callee) {
            let start = self.pos + offset;
            if let Some(site) = self.match_at(start) {
                self.pos = site.span.end;
                return Some(site);
            }
            self.pos = start + step;
        }

        self.pos = self.source.len();
        None
    }
}

/// Characters that make the callee part of a longer name or a member access
fn continues_identifier(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '$' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(source: &str) -> Vec<&str> {
        CallScanner::new(source, "require").map(|site| site.literal).collect()
    }

    #[test]
    fn test_double_and_single_quotes() {
        assert_eq!(
            literals(r#"require("./a.png") + require('./b.png')"#),
            vec![r#""./a.png""#, "'./b.png'"]
        );
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        assert_eq!(literals(r#"require("a\"b")"#), vec![r#""a\"b""#]);
        assert_eq!(literals(r#"require('it\'s')"#), vec![r#"'it\'s'"#]);
    }

    #[test]
    fn test_escaped_backslash_before_quote() {
        // `\\` is a complete escape, so the following quote closes the literal
        assert_eq!(literals(r#"require("a\\") x"#), vec![r#""a\\""#]);
    }

    #[test]
    fn test_other_quote_inside_literal() {
        assert_eq!(literals(r#"require("it's")"#), vec![r#""it's""#]);
    }

    #[test]
    fn test_span_covers_whole_call() {
        let source = r#"x = require("m");"#;
        let site = CallScanner::new(source, "require").next().expect("call site");
        assert_eq!(&source[site.span], r#"require("m")"#);
    }

    #[test]
    fn test_malformed_calls_do_not_match() {
        assert!(literals(r#"require("unterminated"#).is_empty());
        assert!(literals(r#"require("a" + b)"#).is_empty());
        assert!(literals("require(name)").is_empty());
        assert!(literals(r#"require ("spaced")"#).is_empty());
        assert!(literals(r#"require("trailing\"#).is_empty());
    }

    #[test]
    fn test_longer_names_and_members_do_not_match() {
        assert!(literals(r#"myrequire("a")"#).is_empty());
        assert!(literals(r#"obj.require("a")"#).is_empty());
        assert!(literals(r#"$require("a")"#).is_empty());
    }

    #[test]
    fn test_scanning_resumes_after_failed_match() {
        assert_eq!(
            literals(r#"require(x) require("ok")"#),
            vec![r#""ok""#]
        );
    }

    #[test]
    fn test_non_ascii_content() {
        assert_eq!(
            literals(r#"é require("./ü.png") requireé"#),
            vec![r#""./ü.png""#]
        );
    }

    #[test]
    fn test_non_ascii_separators_before_callee() {
        assert_eq!(literals("\u{a0}require(\"a\")"), vec![r#""a""#]);
        assert_eq!(literals(r#"x →require("b")"#), vec![r#""b""#]);
        assert_eq!(literals(r#"«require('c')»"#), vec!["'c'"]);
    }

    #[test]
    fn test_non_ascii_letter_extends_callee() {
        assert!(literals(r#"érequire("a")"#).is_empty());
        assert!(literals(r#"данныеrequire("a")"#).is_empty());
    }

    #[test]
    fn test_empty_callee_matches_nothing() {
        assert_eq!(CallScanner::new(r#"("a")"#, "").count(), 0);
    }
}
