//! Annotation update.

use tracing::debug;

use super::Mutator;
use crate::manifest::Selector;
use crate::value::Value;
use crate::Error;

/// UpdateAnnotations merges key/value pairs into `metadata.annotations`.
///
/// Pairs apply in order. An empty value deletes the key, and an annotation
/// mapping left empty is removed from `metadata` altogether.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateAnnotations {
    pub target: Selector,
    pub notes: Vec<(String, String)>,
}

impl UpdateAnnotations {
    pub fn new(target: Selector, notes: impl IntoIterator<Item = (String, String)>) -> Self {
        UpdateAnnotations {
            target,
            notes: notes.into_iter().collect(),
        }
    }
}

impl Mutator for UpdateAnnotations {
    #[tracing::instrument(skip_all, name = "update_annotations", fields(selector = %self.target))]
    fn apply(&mut self, manifest: &mut Value) -> bool {
        if !self.target.matches(manifest) {
            return false;
        }
        let Some(metadata) = manifest.get_mut("metadata").and_then(Value::as_map_mut) else {
            return false;
        };

        let emptied = metadata.update_map("annotations", |annotations| {
            for (key, value) in &self.notes {
                if value.is_empty() {
                    debug!(%key, "removing annotation");
                    annotations.delete(key);
                } else {
                    debug!(%key, %value, "setting annotation");
                    annotations.set(key.as_str(), value.as_str());
                }
            }
            annotations.is_empty()
        });
        if emptied {
            metadata.delete("annotations");
        }
        true
    }

    fn finish(self, matched: bool) -> Result<(), Error> {
        if matched {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }
}
