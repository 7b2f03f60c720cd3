//! Rule trait and registry for lint rules.

use gesso_relief::ResolvedUnit;
use thiserror::Error;

use crate::component::Component;
use crate::context::LintContext;
use crate::diagnostic::Severity;

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// Call-order invariants of the setup routine
    Setup,
    /// Resource acquisition and release
    Lifecycle,
    /// Reactive value handling
    Reactivity,
    /// Shape of component classes and builder closures
    Structure,
}

impl RuleCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleCategory::Setup => "setup",
            RuleCategory::Lifecycle => "lifecycle",
            RuleCategory::Reactivity => "reactivity",
            RuleCategory::Structure => "structure",
        }
    }
}

/// Rule metadata
#[derive(Debug)]
pub struct RuleMeta {
    /// Stable rule code (e.g. "no-conditional-composition")
    pub code: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Default diagnostic message
    pub problem: &'static str,
    /// Default correction hint
    pub correction: &'static str,
    pub category: RuleCategory,
    /// Whether rule is auto-fixable
    pub fixable: bool,
    pub severity: Severity,
}

/// Rule trait for implementing lint rules.
///
/// Rules hold no per-unit state. The engine calls `check_component` once per
/// component class of the unit, then `check_unit` once.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    #[allow(unused_variables)]
    fn check_component<'a>(&self, ctx: &mut LintContext<'a>, component: &Component<'a>) {}

    #[allow(unused_variables)]
    fn check_unit<'a>(&self, ctx: &mut LintContext<'a>, unit: &'a ResolvedUnit) {}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleSelectionError {
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

/// Registry holding all enabled lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn get(&self, code: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.meta().code == code)
            .map(|rule| rule.as_ref())
    }

    /// Codes of all registered rules, in registration order
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.meta().code)
    }

    /// Every built-in rule
    pub fn with_recommended() -> Self {
        let mut registry = Self::with_essential();

        // ============================================
        // Warnings
        // ============================================

        registry.register(Box::new(crate::rules::setup::ControllerLifecycle));
        registry.register(Box::new(crate::rules::setup::NoLogicInBuilder));
        registry.register(Box::new(crate::rules::component::NoMutableFields));
        registry.register(Box::new(crate::rules::reactivity::ShallowReactivity));
        registry.register(Box::new(crate::rules::reactivity::ProvideInjectTypeMatch));

        registry
    }

    /// Only the rules that report errors
    pub fn with_essential() -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(crate::rules::setup::NoConditionalComposition));
        registry.register(Box::new(crate::rules::setup::NoAsyncSetup));
        registry.register(Box::new(crate::rules::setup::EnsureReactiveProps));

        registry
    }

    /// Built-in rules whose code is listed in `codes`, in registry order
    pub fn select<S: AsRef<str>>(codes: &[S]) -> Result<Self, RuleSelectionError> {
        let all = Self::with_recommended();
        if let Some(unknown) = codes
            .iter()
            .find(|code| all.get(code.as_ref()).is_none())
        {
            return Err(RuleSelectionError::UnknownRule(unknown.as_ref().to_string()));
        }
        let rules = all
            .rules
            .into_iter()
            .filter(|rule| codes.iter().any(|code| code.as_ref() == rule.meta().code))
            .collect();
        Ok(Self { rules })
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommended_has_every_rule() {
        let codes: Vec<&str> = RuleRegistry::with_recommended().codes().collect();
        assert_eq!(
            codes,
            vec![
                "no-conditional-composition",
                "no-async-setup",
                "ensure-reactive-props",
                "controller-lifecycle",
                "no-logic-in-builder",
                "no-mutable-fields",
                "shallow-reactivity",
                "provide-inject-type-match",
            ]
        );
    }

    #[test]
    fn test_essential_rules_are_errors() {
        let registry = RuleRegistry::with_essential();
        assert!(registry
            .rules()
            .iter()
            .all(|rule| rule.meta().severity == Severity::Error));
    }

    #[test]
    fn test_select() {
        let registry = RuleRegistry::select(&["shallow-reactivity", "no-async-setup"]).unwrap();
        let codes: Vec<&str> = registry.codes().collect();
        assert_eq!(codes, vec!["no-async-setup", "shallow-reactivity"]);

        let err = RuleRegistry::select(&["no-such-rule"]).err();
        assert_eq!(
            err,
            Some(RuleSelectionError::UnknownRule("no-such-rule".to_string()))
        );
    }

    #[test]
    fn test_rule_metadata_is_complete() {
        for rule in RuleRegistry::with_recommended().rules() {
            let meta = rule.meta();
            assert!(!meta.description.is_empty(), "{}", meta.code);
            assert!(!meta.problem.is_empty(), "{}", meta.code);
            assert!(!meta.correction.is_empty(), "{}", meta.code);
            assert_eq!(meta.fixable, meta.code == "no-mutable-fields");
        }
    }
}
