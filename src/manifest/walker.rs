//! Document walker.

use crate::value::Value;

/// Returns true if the document is a `*List` wrapper such as `List` or `PodList`.
pub fn is_list_kind(document: &Value) -> bool {
    document
        .get("kind")
        .and_then(Value::as_str)
        .is_some_and(|kind| kind.ends_with("List"))
}

/// Yields the manifests a document contains, in order.
///
/// A list kind yields each of its `items`; any other mapping yields itself.
/// Empty documents and non-mapping documents yield nothing.
pub fn manifests(document: &Value) -> impl Iterator<Item = &Value> {
    let (single, items) = if is_list_kind(document) {
        (None, document.get("items").and_then(Value::as_list))
    } else if document.is_map() {
        (Some(document), None)
    } else {
        (None, None)
    };
    single.into_iter().chain(items.into_iter().flatten())
}

/// Mutable counterpart of [`manifests`].
pub fn manifests_mut(document: &mut Value) -> impl Iterator<Item = &mut Value> {
    let (single, items) = if is_list_kind(document) {
        (None, document.get_mut("items").and_then(Value::as_list_mut))
    } else if document.is_map() {
        (Some(document), None)
    } else {
        (None, None)
    };
    single.into_iter().chain(items.into_iter().flatten())
}
