// Copyright (C) 2015-2025 The Logscan Project.
//
// filter.rs file belongs to the logscan project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Log line selection.

use logscan_config::LogKind;

/// Selects log lines by kind and substring.
///
/// Selection is a pure function of the filter and the input lines. Applying
/// a filter to its own output is a no-op only for [`LogKind::Any`]; the other
/// kinds strip the prefix they select on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    kind: LogKind,
    needle: String,
}

impl LogFilter {
    /// Creates a filter; an empty `needle` keeps every line of the kind.
    pub fn new(kind: LogKind, needle: impl Into<String>) -> Self {
        Self {
            kind,
            needle: needle.into(),
        }
    }

    /// Filter that keeps every line unchanged.
    pub fn any() -> Self {
        Self::default()
    }

    /// Selected kind.
    pub fn kind(&self) -> LogKind {
        self.kind
    }

    /// Substring lines must contain.
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Returns the selected text of `line`, prefix stripped, or `None`.
    pub fn apply<'a>(&self, line: &'a str) -> Option<&'a str> {
        let text = match self.kind.prefix() {
            Some(prefix) => line.strip_prefix(prefix)?,
            None => line,
        };
        if self.needle.is_empty() || line.contains(self.needle.as_str()) {
            Some(text)
        } else {
            None
        }
    }

    /// Selects matching lines in order.
    pub fn select<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> Vec<&'a str> {
        lines
            .iter()
            .filter_map(|line| self.apply(line.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> Vec<String> {
        vec![
            "Program ComputeBudget111111111111111111111111111111 invoke [1]".to_string(),
            "Program log: Instruction: Update".to_string(),
            "Program log: price=42 conf=1".to_string(),
            "Program data: 4GJg8tQ3aEkAAAAA".to_string(),
            "foo bar".to_string(),
        ]
    }

    #[test]
    fn empty_needle_keeps_all_lines() {
        let lines = lines();
        assert_eq!(LogFilter::any().select(&lines).len(), lines.len());
    }

    #[test]
    fn substring_filter_keeps_matches() {
        let lines = vec!["foo bar".to_string(), "baz".to_string(), "xfoo".to_string()];
        let filter = LogFilter::new(LogKind::Any, "foo");
        assert_eq!(filter.select(&lines), vec!["foo bar", "xfoo"]);
    }

    #[test]
    fn log_kind_strips_prefix() {
        let lines = lines();
        let filter = LogFilter::new(LogKind::Log, "price");
        assert_eq!(filter.select(&lines), vec!["price=42 conf=1"]);

        let data = LogFilter::new(LogKind::Data, "");
        assert_eq!(data.select(&lines), vec!["4GJg8tQ3aEkAAAAA"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let lines = lines();
        let filter = LogFilter::new(LogKind::Any, "Program log");
        let once: Vec<String> = filter.select(&lines).into_iter().map(str::to_string).collect();
        let twice: Vec<String> = filter.select(&once).into_iter().map(str::to_string).collect();
        assert_eq!(once, twice);
        assert_eq!(filter.select(&lines), filter.select(&lines));
    }

    #[test]
    fn prefixed_kinds_do_not_reselect_their_output() {
        let lines = lines();
        for kind in [LogKind::Log, LogKind::Data] {
            let filter = LogFilter::new(kind, "");
            let once: Vec<String> = filter.select(&lines).into_iter().map(str::to_string).collect();
            assert_eq!(once.len(), if kind == LogKind::Log { 2 } else { 1 });
            assert!(filter.select(&once).is_empty(), "{kind:?}");
        }
    }
}
