//! Inline suppression comments.
//!
//! ```dart
//! // gesso-disable-next-line no-conditional-composition
//! if (compact) state(0);
//!
//! // gesso-disable shallow-reactivity, no-mutable-fields
//! ```
//!
//! `gesso-disable-next-line` applies to the following line only;
//! `gesso-disable` applies to the whole unit. Without codes every rule is
//! suppressed. Codes may be written bare or with the `compositions/` prefix.

use compact_str::CompactString;
use memchr::memmem;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::diagnostic::{LintDiagnostic, RULE_NAMESPACE};
use crate::line_index::LineIndex;

const NEXT_LINE_DIRECTIVE: &str = "gesso-disable-next-line";
const FILE_DIRECTIVE: &str = "gesso-disable";

/// Rules covered by one or more directives
#[derive(Debug, Clone, PartialEq, Eq)]
enum RuleSet {
    All,
    Only(SmallVec<[CompactString; 2]>),
}

impl RuleSet {
    fn parse(rest: &str) -> Self {
        let rest = rest.split("--").next().unwrap_or_default();
        let codes: SmallVec<[CompactString; 2]> = rest
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|code| !code.is_empty())
            .map(|code| {
                let code = code
                    .strip_prefix(RULE_NAMESPACE)
                    .and_then(|c| c.strip_prefix('/'))
                    .unwrap_or(code);
                CompactString::from(code)
            })
            .collect();
        if codes.is_empty() {
            RuleSet::All
        } else {
            RuleSet::Only(codes)
        }
    }

    fn merge(&mut self, other: RuleSet) {
        match other {
            RuleSet::All => *self = RuleSet::All,
            RuleSet::Only(more) => {
                if let RuleSet::Only(codes) = self {
                    codes.extend(more);
                }
            }
        }
    }

    fn covers(&self, rule: &str) -> bool {
        match self {
            RuleSet::All => true,
            RuleSet::Only(codes) => codes.iter().any(|code| code.as_str() == rule),
        }
    }
}

/// Suppression directives of one unit.
#[derive(Debug, Clone, Default)]
pub struct SuppressionMap {
    file_wide: Option<RuleSet>,
    /// Keyed by the 0-based line the directive applies to
    next_line: FxHashMap<u32, RuleSet>,
    lines: LineIndex,
}

impl SuppressionMap {
    pub fn parse(source: &str) -> Self {
        let mut map = Self {
            lines: LineIndex::new(source),
            ..Default::default()
        };
        if memmem::find(source.as_bytes(), FILE_DIRECTIVE.as_bytes()).is_none() {
            return map;
        }

        for (line_idx, line) in source.lines().enumerate() {
            let Some(comment_start) = memmem::find(line.as_bytes(), b"//") else {
                continue;
            };
            let comment = line[comment_start + 2..].trim_start();

            if let Some(rest) = comment.strip_prefix(NEXT_LINE_DIRECTIVE) {
                let rules = RuleSet::parse(rest);
                let target = line_idx as u32 + 1;
                match map.next_line.get_mut(&target) {
                    Some(existing) => existing.merge(rules),
                    None => {
                        map.next_line.insert(target, rules);
                    }
                }
            } else if let Some(rest) = comment.strip_prefix(FILE_DIRECTIVE) {
                if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                    continue;
                }
                let rules = RuleSet::parse(rest);
                match &mut map.file_wide {
                    Some(existing) => existing.merge(rules),
                    None => map.file_wide = Some(rules),
                }
            }
        }

        map
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.file_wide.is_none() && self.next_line.is_empty()
    }

    pub fn is_suppressed(&self, diagnostic: &LintDiagnostic) -> bool {
        if self
            .file_wide
            .as_ref()
            .is_some_and(|rules| rules.covers(diagnostic.rule))
        {
            return true;
        }
        let line = self.lines.line_of(diagnostic.start);
        self.next_line
            .get(&line)
            .is_some_and(|rules| rules.covers(diagnostic.rule))
    }

    /// Drop suppressed diagnostics, keeping the order of the rest
    pub fn filter(&self, diagnostics: &mut Vec<LintDiagnostic>) {
        if self.is_empty() {
            return;
        }
        diagnostics.retain(|diagnostic| !self.is_suppressed(diagnostic));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesso_relief::Span;

    fn diag_at(rule: &'static str, source: &str, needle: &str) -> LintDiagnostic {
        let start = source.find(needle).unwrap() as u32;
        LintDiagnostic::error(rule, "x", Span::new(start, start + needle.len() as u32))
    }

    #[test]
    fn test_next_line_all_rules() {
        let source = "void setup() {\n  // gesso-disable-next-line\n  if (a) state(0);\n  if (b) state(1);\n}";
        let map = SuppressionMap::parse(source);
        assert!(map.is_suppressed(&diag_at("no-conditional-composition", source, "state(0)")));
        assert!(!map.is_suppressed(&diag_at("no-conditional-composition", source, "state(1)")));
    }

    #[test]
    fn test_next_line_specific_rules() {
        let source = "// gesso-disable-next-line compositions/shallow-reactivity, no-mutable-fields\nitems.value.add(1);";
        let map = SuppressionMap::parse(source);
        assert!(map.is_suppressed(&diag_at("shallow-reactivity", source, "items")));
        assert!(!map.is_suppressed(&diag_at("controller-lifecycle", source, "items")));
    }

    #[test]
    fn test_file_wide() {
        let source = "int a = 0;\n// gesso-disable no-mutable-fields -- legacy model\nint b = 0;";
        let map = SuppressionMap::parse(source);
        assert!(map.is_suppressed(&diag_at("no-mutable-fields", source, "int a")));
        assert!(!map.is_suppressed(&diag_at("shallow-reactivity", source, "int b")));
    }

    #[test]
    fn test_similar_words_are_not_directives() {
        let map = SuppressionMap::parse("// gesso-disabled\n// gesso-disable-line\nint a = 0;");
        assert!(map.is_empty());
    }
}
