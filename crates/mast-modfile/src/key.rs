use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModfileError;

/// Identity of a module: a name plus a version string.
///
/// An empty version is a sentinel meaning "resolved via an override, not a
/// pinned registry version". The root module is evaluated under
/// [`ModuleKey::root`] (empty name, empty version) before its declaration
/// names it.
///
/// Keys are immutable value objects; two keys are equal iff name and version
/// match exactly. `Ord` gives tests a deterministic sort order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey {
    name: String,
    version: String,
}

impl ModuleKey {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The synthetic identity a root module is evaluated under before its
    /// declaration file names it.
    pub fn root() -> Self {
        Self::new("", "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// True when the version is the "resolved via override" sentinel.
    pub fn is_unversioned(&self) -> bool {
        self.version.is_empty()
    }
}

/// Formats as `name@version`, substituting `_` for an empty component.
impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "_" } else { &self.name };
        let version = if self.version.is_empty() {
            "_"
        } else {
            &self.version
        };
        write!(f, "{name}@{version}")
    }
}

impl FromStr for ModuleKey {
    type Err = ModfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, version) = s
            .split_once('@')
            .ok_or_else(|| ModfileError::InvalidKey(s.to_string()))?;
        let name = if name == "_" { "" } else { name };
        let version = if version == "_" { "" } else { version };
        Ok(Self::new(name, version))
    }
}

// Serialized in display form so keys can be used as JSON map keys when
// dumping a resolved graph.
impl Serialize for ModuleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ModuleKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_substitutes_underscore_for_empty_components() {
        assert_eq!(ModuleKey::new("B", "1.0").to_string(), "B@1.0");
        assert_eq!(ModuleKey::new("B", "").to_string(), "B@_");
        assert_eq!(ModuleKey::root().to_string(), "_@_");
    }

    #[test]
    fn equality_is_exact_on_name_and_version() {
        assert_eq!(ModuleKey::new("B", "1.0"), ModuleKey::new("B", "1.0"));
        assert_ne!(ModuleKey::new("B", "1.0"), ModuleKey::new("B", "1.1"));
        assert_ne!(ModuleKey::new("B", "1.0"), ModuleKey::new("C", "1.0"));
    }

    #[test]
    fn round_trips_through_display_and_from_str() {
        for key in [
            ModuleKey::new("B", "1.0"),
            ModuleKey::new("B", ""),
            ModuleKey::root(),
        ] {
            assert_eq!(key.to_string().parse::<ModuleKey>().unwrap(), key);
        }
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&ModuleKey::new("B", "1.0")).unwrap();
        assert_eq!(json, "\"B@1.0\"");
        let key: ModuleKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, ModuleKey::new("B", "1.0"));
    }
}
