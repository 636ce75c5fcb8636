//! Dotted path assignment.

use tracing::{debug, warn};

use super::Mutator;
use crate::manifest::Selector;
use crate::value::Value;
use crate::Error;

/// Assigns `value` to the scalar leaf addressed by a dotted `path`.
///
/// Every key but the last must already exist and hold a mapping. The leaf may
/// be absent, but it must not be a mapping. A path with an empty segment
/// addresses nothing. Returns false if the path cannot be resolved, leaving
/// `root` untouched.
pub fn set_path(root: &mut Value, path: &str, value: Value) -> bool {
    let keys: Vec<&str> = path.split('.').collect();
    if keys.iter().any(|k| k.is_empty()) {
        return false;
    }
    let Some((leaf, parents)) = keys.split_last() else {
        return false;
    };
    let Some(parent) = root
        .lookup_mut(parents.iter().copied())
        .and_then(Value::as_map_mut)
    else {
        return false;
    };
    if parent.get(leaf).is_some_and(Value::is_map) {
        return false;
    }
    parent.set(*leaf, value);
    true
}

/// SetPaths assigns values at dotted paths inside one manifest.
///
/// Unresolvable paths are collected rather than stopping the update, and are
/// reported only once the stream has been fully written.
#[derive(Debug, Clone, PartialEq)]
pub struct SetPaths {
    pub target: Selector,
    pub paths: Vec<(String, Value)>,
    unresolved: Vec<String>,
}

impl SetPaths {
    pub fn new<V: Into<Value>>(
        target: Selector,
        paths: impl IntoIterator<Item = (String, V)>,
    ) -> Self {
        SetPaths {
            target,
            paths: paths.into_iter().map(|(p, v)| (p, v.into())).collect(),
            unresolved: Vec::new(),
        }
    }

    /// Paths that failed to resolve so far.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }
}

impl Mutator for SetPaths {
    #[tracing::instrument(skip_all, name = "set_paths", fields(selector = %self.target))]
    fn apply(&mut self, manifest: &mut Value) -> bool {
        if !self.target.matches(manifest) {
            return false;
        }
        for (path, value) in &self.paths {
            if set_path(manifest, path, value.clone()) {
                debug!(%path, "set path");
            } else {
                warn!(%path, "unable to resolve path");
                self.unresolved.push(path.clone());
            }
        }
        true
    }

    fn finish(self, matched: bool) -> Result<(), Error> {
        if !self.unresolved.is_empty() {
            return Err(Error::UnresolvablePath(self.unresolved));
        }
        if !matched {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}
