//! Pod spec and container lookup.

use super::Selector;
use crate::value::Value;

const CRON_JOB: &str = "CronJob";

/// Keys leading from a manifest to its pod spec.
///
/// `CronJob` nests its pod template under a job template; every other workload
/// keeps it at `spec.template.spec`.
pub fn podspec_path(kind: &str) -> &'static [&'static str] {
    if kind == CRON_JOB {
        &["spec", "jobTemplate", "spec", "template", "spec"]
    } else {
        &["spec", "template", "spec"]
    }
}

/// Returns the pod spec of a manifest, or `None` if the path does not exist.
pub fn podspec(manifest: &Value) -> Option<&Value> {
    let kind = manifest.get("kind").and_then(Value::as_str)?;
    manifest.lookup(podspec_path(kind).iter().copied())
}

pub fn podspec_mut(manifest: &mut Value) -> Option<&mut Value> {
    let path = podspec_path(manifest.get("kind").and_then(Value::as_str)?);
    manifest.lookup_mut(path.iter().copied())
}

/// Iterates `containers` followed by `initContainers`.
pub fn containers_mut(podspec: &mut Value) -> impl Iterator<Item = &mut Value> {
    let (mut containers, mut init_containers) = (None, None);
    if let Some(spec) = podspec.as_map_mut() {
        for (key, value) in spec.fields.iter_mut() {
            match key.as_str() {
                "containers" => containers = value.as_list_mut(),
                "initContainers" => init_containers = value.as_list_mut(),
                _ => {}
            }
        }
    }
    containers.into_iter().chain(init_containers).flatten()
}

/// ContainerSelector identifies one container of the target manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerSelector {
    pub manifest: Selector,
    pub container: String,
}

impl ContainerSelector {
    pub fn new(manifest: Selector, container: impl Into<String>) -> Self {
        ContainerSelector {
            manifest,
            container: container.into(),
        }
    }

    /// Returns the named container if `manifest` matches and has one.
    ///
    /// A missing pod spec is a non-match, not an error.
    pub fn locate<'a>(&self, manifest: &'a mut Value) -> Option<&'a mut Value> {
        if !self.manifest.matches(manifest) {
            return None;
        }
        containers_mut(podspec_mut(manifest)?).find(|c| {
            c.get("name").and_then(Value::as_str) == Some(self.container.as_str())
        })
    }
}
