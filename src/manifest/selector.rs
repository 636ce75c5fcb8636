//! Manifest selector.

use std::fmt;

use super::DEFAULT_NAMESPACE;
use crate::value::Value;

/// Selector identifies the target manifest by namespace, kind and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    pub namespace: String,
    pub kind: String,
    pub name: String,
}

impl Selector {
    pub fn new(
        namespace: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Selector {
            namespace: namespace.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Returns true if `manifest` is the one this selector names.
    ///
    /// Kind is compared case-insensitively, namespace and name exactly. A
    /// manifest without a string `kind` or `metadata.name` never matches.
    pub fn matches(&self, manifest: &Value) -> bool {
        let Some(kind) = manifest.get("kind").and_then(Value::as_str) else {
            return false;
        };
        let Some(metadata) = manifest.get("metadata") else {
            return false;
        };
        let Some(name) = metadata.get("name").and_then(Value::as_str) else {
            return false;
        };
        let namespace = match metadata.get("namespace") {
            None => Some(DEFAULT_NAMESPACE),
            Some(ns) => ns.as_str(),
        };

        kind.to_lowercase() == self.kind.to_lowercase()
            && namespace == Some(self.namespace.as_str())
            && name == self.name
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.namespace, self.kind, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::load_all;

    fn manifest(yaml: &str) -> Value {
        load_all(yaml).unwrap().remove(0)
    }

    #[test]
    fn test_exact_match() {
        let m = manifest("kind: Deployment\nmetadata:\n  name: app\n  namespace: prod\n");
        assert!(Selector::new("prod", "Deployment", "app").matches(&m));
        assert!(!Selector::new("prod", "Deployment", "App").matches(&m));
        assert!(!Selector::new("Prod", "Deployment", "app").matches(&m));
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let m = manifest("kind: deployment\nmetadata:\n  name: app\n");
        assert!(Selector::new("default", "Deployment", "app").matches(&m));
        assert!(Selector::new("default", "DEPLOYMENT", "app").matches(&m));
    }

    #[test]
    fn test_namespace_defaults() {
        let m = manifest("kind: Service\nmetadata:\n  name: app\n");
        assert!(Selector::new("default", "Service", "app").matches(&m));
        assert!(!Selector::new("kube-system", "Service", "app").matches(&m));
        assert!(!Selector::new("", "Service", "app").matches(&m));
    }

    #[test]
    fn test_malformed_manifests_never_match() {
        let selector = Selector::new("default", "Service", "app");
        for yaml in [
            "metadata:\n  name: app\n",
            "kind: Service\n",
            "kind: Service\nmetadata:\n  namespace: default\n",
            "kind: Service\nmetadata: app\n",
            "kind: 3\nmetadata:\n  name: app\n",
            "kind: Service\nmetadata:\n  name: 42\n",
            "kind: Service\nmetadata:\n  name: app\n  namespace: null\n",
        ] {
            assert!(!selector.matches(&manifest(yaml)), "matched: {}", yaml);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Selector::new("default", "Deployment", "app").to_string(),
            "default:Deployment/app"
        );
    }
}
