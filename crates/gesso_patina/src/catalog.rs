//! Name catalogs shared by the rules.
//!
//! A [`Catalogs`] value bundles every named string set and the framework
//! vocabulary the rules match against. The built-in tables are created once
//! and shared read-only through [`Catalogs::shared`]; configured instances
//! are built with [`Catalogs::extended`] and shared through an `Arc`.

use std::sync::Arc;

use compact_str::CompactString;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Framework functions that create reactive state, derived values, effects
/// or lifecycle hooks. Valid only when called unconditionally during setup.
pub const COMPOSITION_PRIMITIVES: &[&str] = &[
    "state",
    "derived",
    "writableDerived",
    "readonly",
    "customState",
    "hotState",
    "watch",
    "watchEffect",
    "onMounted",
    "onUnmounted",
    "onCleanup",
    "onBuild",
    "provide",
    "inject",
    "useContext",
    "useScrollController",
    "usePageController",
    "useFocusNode",
    "useTextEditingController",
    "useAnimationController",
    "useTabController",
    "useStream",
    "useFuture",
    "useAsyncData",
];

/// Type-name prefixes of resources that must be disposed explicitly
pub const DISPOSABLE_PREFIXES: &[&str] = &[
    "ResourceController",
    "ScrollController",
    "TextEditingController",
    "AnimationController",
    "TabController",
    "PageController",
    "FocusNode",
    "StreamController",
    "StreamSubscription",
    "Timer",
];

/// Collection methods that mutate their receiver in place
pub const MUTATING_METHODS: &[&str] = &[
    "add",
    "addAll",
    "addEntries",
    "insert",
    "insertAll",
    "remove",
    "removeAt",
    "removeLast",
    "removeRange",
    "removeWhere",
    "retainWhere",
    "clear",
    "sort",
    "shuffle",
    "fillRange",
    "setAll",
    "setRange",
    "replaceRange",
    "putIfAbsent",
    "update",
    "updateAll",
];

/// Built-in and common type names that make poor injection keys
pub const PRIMITIVE_TYPES: &[&str] = &[
    "String", "int", "double", "bool", "num", "List", "Map", "Set", "dynamic", "Object",
];

/// Reactive wrapper type names
pub const WRAPPER_TYPES: &[&str] = &["State", "ReadonlyState", "Derived", "WritableDerived"];

/// Keywords identifying a helper that owns the lifecycle of a resource
/// (`useScrollController`, `useFocusNode`)
pub const RESOURCE_KEYWORDS: &[&str] = &[
    "Controller",
    "FocusNode",
    "Subscription",
    "Timer",
    "Stream",
];

/// An immutable named set of strings.
#[derive(Debug, Clone)]
pub struct Catalog {
    name: &'static str,
    entries: FxHashSet<CompactString>,
}

impl Catalog {
    pub fn new<I, S>(name: &'static str, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self {
            name,
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact membership
    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains(value)
    }

    /// Whether `value` starts with any entry
    pub fn has_prefix_of(&self, value: &str) -> bool {
        self.entries.iter().any(|entry| value.starts_with(entry.as_str()))
    }

    /// Whether `value` contains any entry as a substring
    pub fn has_fragment_of(&self, value: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| memchr::memmem::find(value.as_bytes(), entry.as_bytes()).is_some())
    }

    /// Entries in sorted order
    pub fn sorted(&self) -> Vec<&str> {
        let mut entries: Vec<&str> = self.entries.iter().map(CompactString::as_str).collect();
        entries.sort_unstable();
        entries
    }

    fn extend<S: AsRef<str>>(&mut self, extra: &[S]) {
        self.entries
            .extend(extra.iter().map(|s| CompactString::from(s.as_ref())));
    }
}

/// Scalar framework vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vocabulary {
    /// Base type whose direct subclasses are components
    pub host_base: CompactString,
    /// Name of the initialization routine
    pub setup_method: CompactString,
    /// Property holding a reactive wrapper's value
    pub held_value: CompactString,
    /// Method releasing a resource
    pub disposal_method: CompactString,
    /// Function registering a teardown callback
    pub cleanup_registration: CompactString,
    /// Prefix of lifecycle-owning helper functions
    pub helper_prefix: CompactString,
    /// Reactive accessor for the component's own props, allowed on `this`
    pub self_lookup: CompactString,
    pub provide: CompactString,
    pub inject: CompactString,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            host_base: "CompositionWidget".into(),
            setup_method: "setup".into(),
            held_value: "value".into(),
            disposal_method: "dispose".into(),
            cleanup_registration: "onCleanup".into(),
            helper_prefix: "use".into(),
            self_lookup: "widget".into(),
            provide: "provide".into(),
            inject: "inject".into(),
        }
    }
}

/// User-supplied additions to the built-in catalogs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogExtensions {
    pub composition_primitives: Vec<String>,
    pub disposable_prefixes: Vec<String>,
    pub mutating_methods: Vec<String>,
    pub primitive_types: Vec<String>,
    pub wrapper_types: Vec<String>,
    pub resource_keywords: Vec<String>,
    /// Replaces the default vocabulary when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vocabulary>,
}

impl CatalogExtensions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Every catalog and the vocabulary, as seen by the rules.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub vocabulary: Vocabulary,
    pub composition_primitives: Catalog,
    pub disposable_prefixes: Catalog,
    pub mutating_methods: Catalog,
    pub primitive_types: Catalog,
    pub wrapper_types: Catalog,
    pub resource_keywords: Catalog,
}

static SHARED: Lazy<Arc<Catalogs>> = Lazy::new(|| Arc::new(Catalogs::builtin()));

impl Catalogs {
    /// The built-in tables
    pub fn builtin() -> Self {
        Self {
            vocabulary: Vocabulary::default(),
            composition_primitives: Catalog::new(
                "composition-primitives",
                COMPOSITION_PRIMITIVES.iter().copied(),
            ),
            disposable_prefixes: Catalog::new(
                "disposable-prefixes",
                DISPOSABLE_PREFIXES.iter().copied(),
            ),
            mutating_methods: Catalog::new("mutating-methods", MUTATING_METHODS.iter().copied()),
            primitive_types: Catalog::new("primitive-types", PRIMITIVE_TYPES.iter().copied()),
            wrapper_types: Catalog::new("wrapper-types", WRAPPER_TYPES.iter().copied()),
            resource_keywords: Catalog::new(
                "resource-keywords",
                RESOURCE_KEYWORDS.iter().copied(),
            ),
        }
    }

    /// Process-wide instance of the built-in tables
    pub fn shared() -> Arc<Catalogs> {
        Arc::clone(&SHARED)
    }

    /// Built-in tables plus `extensions`
    pub fn extended(extensions: &CatalogExtensions) -> Self {
        let mut catalogs = Self::builtin();
        catalogs
            .composition_primitives
            .extend(&extensions.composition_primitives);
        catalogs
            .disposable_prefixes
            .extend(&extensions.disposable_prefixes);
        catalogs.mutating_methods.extend(&extensions.mutating_methods);
        catalogs.primitive_types.extend(&extensions.primitive_types);
        catalogs.wrapper_types.extend(&extensions.wrapper_types);
        catalogs
            .resource_keywords
            .extend(&extensions.resource_keywords);
        if let Some(vocabulary) = &extensions.vocabulary {
            catalogs.vocabulary = vocabulary.clone();
        }
        catalogs
    }

    /// Name of a lifecycle-owning helper, e.g. `useScrollController`
    pub fn is_resource_helper(&self, callee: &str) -> bool {
        callee.starts_with(self.vocabulary.helper_prefix.as_str())
            && self.resource_keywords.has_fragment_of(callee)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        let catalogs = Catalogs::builtin();
        assert!(catalogs
            .disposable_prefixes
            .has_prefix_of("ScrollControllerImpl"));
        assert!(catalogs.disposable_prefixes.has_prefix_of("Timer"));
        assert!(!catalogs.disposable_prefixes.has_prefix_of("MyTimer"));
    }

    #[test]
    fn test_resource_helper() {
        let catalogs = Catalogs::builtin();
        assert!(catalogs.is_resource_helper("useScrollController"));
        assert!(catalogs.is_resource_helper("useFocusNode"));
        assert!(!catalogs.is_resource_helper("useTheme"));
        assert!(!catalogs.is_resource_helper("makeScrollController"));
    }

    #[test]
    fn test_shared_is_same_instance() {
        assert!(Arc::ptr_eq(&Catalogs::shared(), &Catalogs::shared()));
    }

    #[test]
    fn test_extended() {
        let extensions = CatalogExtensions {
            composition_primitives: vec!["useStore".to_string()],
            mutating_methods: vec!["push".to_string()],
            ..Default::default()
        };
        let catalogs = Catalogs::extended(&extensions);
        assert!(catalogs.composition_primitives.contains("useStore"));
        assert!(catalogs.composition_primitives.contains("state"));
        assert!(catalogs.mutating_methods.contains("push"));
        assert!(!Catalogs::builtin().mutating_methods.contains("push"));
    }

    #[test]
    fn test_vocabulary_partial_override() {
        let vocabulary: Vocabulary =
            serde_json::from_str(r#"{ "hostBase": "ReactiveWidget" }"#).unwrap();
        assert_eq!(vocabulary.host_base, "ReactiveWidget");
        assert_eq!(vocabulary.setup_method, "setup");
    }
}
