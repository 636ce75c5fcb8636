//! Container image update.

use tracing::debug;

use super::Mutator;
use crate::manifest::ContainerSelector;
use crate::value::Value;
use crate::Error;

/// UpdateImage replaces the image of one container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateImage {
    pub target: ContainerSelector,
    /// New image reference, written verbatim.
    pub image: String,
}

impl UpdateImage {
    pub fn new(target: ContainerSelector, image: impl Into<String>) -> Self {
        UpdateImage {
            target,
            image: image.into(),
        }
    }
}

impl Mutator for UpdateImage {
    #[tracing::instrument(
        skip_all,
        name = "update_image",
        fields(selector = %self.target.manifest, container = %self.target.container)
    )]
    fn apply(&mut self, manifest: &mut Value) -> bool {
        let Some(container) = self.target.locate(manifest) else {
            return false;
        };
        let Some(fields) = container.as_map_mut() else {
            return false;
        };
        debug!(old = ?fields.get("image"), new = %self.image, "setting container image");
        fields.set("image", self.image.as_str());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Selector;
    use crate::value::load_all;
    use pretty_assertions::assert_eq;

    const DEPLOYMENT: &str = r#"kind: Deployment
metadata:
  name: app
spec:
  template:
    spec:
      containers:
      - name: web
        image: old:1
        ports:
        - containerPort: 80
"#;

    fn update(container: &str, image: &str) -> UpdateImage {
        UpdateImage::new(
            ContainerSelector::new(Selector::new("default", "Deployment", "app"), container),
            image,
        )
    }

    #[test]
    fn test_sets_image_only() {
        let mut m = load_all(DEPLOYMENT).unwrap().remove(0);
        let mut op = update("web", "new:2");
        assert!(op.apply(&mut m));

        let expected = load_all(&DEPLOYMENT.replace("old:1", "new:2"))
            .unwrap()
            .remove(0);
        assert_eq!(m, expected);
        assert!(op.finish(true).is_ok());
    }

    #[test]
    fn test_unknown_container_is_not_applied() {
        let mut m = load_all(DEPLOYMENT).unwrap().remove(0);
        let original = m.clone();
        let mut op = update("db", "new:2");
        assert!(!op.apply(&mut m));
        assert_eq!(m, original);
        assert!(matches!(op.finish(false), Err(Error::NotFound)));
    }

    #[test]
    fn test_adds_missing_image_field() {
        let mut m = load_all(&DEPLOYMENT.replace("        image: old:1\n", ""))
            .unwrap()
            .remove(0);
        assert!(update("web", "new:2").apply(&mut m));
        let containers = m
            .lookup(["spec", "template", "spec", "containers"])
            .and_then(Value::as_list)
            .unwrap();
        assert_eq!(containers[0].get("image"), Some(&Value::from("new:2")));
    }
}
