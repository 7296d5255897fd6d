//! Properties of the edge rewrite rule.

use indexmap::IndexMap;
use proptest::prelude::*;

use mast_modfile::{ModuleKey, ModuleOverride, OverrideSet};

use crate::discovery::rewrite_dep_key;

fn name() -> impl Strategy<Value = String> {
    "[A-E]"
}

fn version() -> impl Strategy<Value = String> {
    "[0-9]\\.[0-9]"
}

fn key() -> impl Strategy<Value = ModuleKey> {
    (name(), version()).prop_map(|(name, version)| ModuleKey::new(name, version))
}

fn module_override() -> impl Strategy<Value = ModuleOverride> {
    prop_oneof![
        ("[a-z/]{0,8}", "[a-z0-9]{0,6}").prop_map(|(url, integrity)| ModuleOverride::Archive {
            url,
            integrity
        }),
        "[a-z/]{0,8}".prop_map(|path| ModuleOverride::LocalPath { path }),
        (prop_oneof![Just(String::new()), version()], "[a-z:]{0,6}").prop_map(
            |(version, registry)| ModuleOverride::SingleVersion { version, registry }
        ),
    ]
}

fn override_set() -> impl Strategy<Value = OverrideSet> {
    proptest::collection::hash_map(name(), module_override(), 0..4)
        .prop_map(|map| map.into_iter().collect::<IndexMap<_, _>>())
}

proptest! {
    /// Rewriting is idempotent: a rewritten edge is a fixed point.
    #[test]
    fn rewrite_is_idempotent(key in key(), overrides in override_set()) {
        let once = rewrite_dep_key(&key, &overrides);
        let twice = rewrite_dep_key(&once, &overrides);
        prop_assert_eq!(once, twice);
    }

    /// Rewriting never touches the module name.
    #[test]
    fn rewrite_preserves_the_name(key in key(), overrides in override_set()) {
        let rewritten = rewrite_dep_key(&key, &overrides);
        prop_assert_eq!(rewritten.name(), key.name());
    }

    /// Without an override for the name, the key passes through unchanged.
    #[test]
    fn rewrite_without_an_override_is_identity(key in key()) {
        prop_assert_eq!(rewrite_dep_key(&key, &OverrideSet::new()), key);
    }

    /// A non-registry override always clears the version.
    #[test]
    fn non_registry_override_clears_the_version(
        key in key(),
        path in "[a-z/]{0,8}",
    ) {
        let mut overrides = OverrideSet::new();
        overrides.insert(key.name().to_string(), ModuleOverride::LocalPath { path });
        prop_assert!(rewrite_dep_key(&key, &overrides).is_unversioned());
    }

    /// A non-empty pin always forces its version.
    #[test]
    fn pin_forces_its_version(key in key(), pin in version(), registry in "[a-z:]{0,6}") {
        let mut overrides = OverrideSet::new();
        overrides.insert(
            key.name().to_string(),
            ModuleOverride::SingleVersion { version: pin.clone(), registry },
        );
        let rewritten = rewrite_dep_key(&key, &overrides);
        prop_assert_eq!(rewritten.version(), pin);
    }
}
