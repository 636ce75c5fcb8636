//! Stream driver.

use std::io::Write;

use tracing::{debug, trace};

use crate::manifest::manifests_mut;
use crate::mutate::Mutator;
use crate::value::{self, Value};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Searching,
    Done,
}

/// Rewrite yields every document of a stream, mutating the first manifest the
/// mutator accepts.
///
/// The outcome is only known once the iterator is exhausted; call
/// [`Rewrite::finish`] after draining it.
pub struct Rewrite<I, M> {
    documents: I,
    mutator: M,
    state: State,
    index: usize,
}

impl<I, M> Rewrite<I, M>
where
    I: Iterator<Item = Value>,
    M: Mutator,
{
    pub fn new(documents: impl IntoIterator<IntoIter = I>, mutator: M) -> Self {
        Rewrite {
            documents: documents.into_iter(),
            mutator,
            state: State::Searching,
            index: 0,
        }
    }

    /// Returns true once a manifest has been mutated.
    pub fn matched(&self) -> bool {
        self.state == State::Done
    }

    /// Reports the mutator's outcome. Documents not yet pulled are not searched.
    pub fn finish(self) -> Result<(), Error> {
        let matched = self.matched();
        self.mutator.finish(matched)
    }
}

impl<I, M> Iterator for Rewrite<I, M>
where
    I: Iterator<Item = Value>,
    M: Mutator,
{
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let mut document = self.documents.next()?;
        if self.state == State::Searching {
            for manifest in manifests_mut(&mut document) {
                if self.mutator.apply(manifest) {
                    debug!(document = self.index, "manifest rewritten");
                    self.state = State::Done;
                    break;
                }
            }
        } else {
            trace!(document = self.index, "passing through");
        }
        self.index += 1;
        Some(document)
    }
}

/// Parses `input`, rewrites it with `mutator` and writes every document to `out`.
///
/// Output is written as documents are produced, so a failing rewrite may still
/// have written the whole stream.
pub fn rewrite_stream<M, W>(input: &str, mutator: M, mut out: W) -> Result<(), Error>
where
    M: Mutator,
    W: Write,
{
    let documents = value::load_all(input)?;
    debug!(documents = documents.len(), "loaded stream");

    let mut rewrite = Rewrite::new(documents, mutator);
    for document in rewrite.by_ref() {
        value::dump(&mut out, &document)?;
    }
    out.flush()?;
    rewrite.finish()
}

/// Convenience wrapper around [`rewrite_stream`] that collects the output.
pub fn rewrite_to_string<M: Mutator>(input: &str, mutator: M) -> (String, Result<(), Error>) {
    let mut out = Vec::new();
    let result = rewrite_stream(input, mutator, &mut out);
    (String::from_utf8_lossy(&out).into_owned(), result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Selector;
    use crate::mutate::UpdateAnnotations;
    use crate::value::load_all;

    fn annotate(name: &str) -> UpdateAnnotations {
        UpdateAnnotations::new(
            Selector::new("default", "ConfigMap", name),
            [("k".to_string(), "v".to_string())],
        )
    }

    #[test]
    fn test_state_moves_to_done_once() {
        let docs = load_all(
            "kind: ConfigMap\nmetadata:\n  name: a\n---\nkind: ConfigMap\nmetadata:\n  name: a\n",
        )
        .unwrap();
        let mut rewrite = Rewrite::new(docs, annotate("a"));
        assert!(!rewrite.matched());

        let first = rewrite.next().unwrap();
        assert!(rewrite.matched());
        assert!(first.lookup(["metadata", "annotations"]).is_some());

        let second = rewrite.next().unwrap();
        assert!(second.lookup(["metadata", "annotations"]).is_none());
        assert!(rewrite.next().is_none());
        assert!(rewrite.finish().is_ok());
    }

    #[test]
    fn test_empty_stream_is_not_found() {
        let mut rewrite = Rewrite::new(Vec::new(), annotate("a"));
        assert!(rewrite.next().is_none());
        assert!(matches!(rewrite.finish(), Err(Error::NotFound)));
    }

    #[test]
    fn test_empty_input_writes_nothing() {
        let (out, result) = rewrite_to_string("", annotate("a"));
        assert_eq!(out, "");
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[test]
    fn test_null_documents_pass_through() {
        let rewrite = Rewrite::new(vec![Value::Null, Value::Null], annotate("a"));
        let out: Vec<_> = rewrite.collect();
        assert_eq!(out, vec![Value::Null, Value::Null]);
    }

    #[test]
    fn test_parse_error_writes_nothing() {
        let (out, result) = rewrite_to_string("kind: [", annotate("a"));
        assert!(out.is_empty());
        assert!(matches!(result, Err(Error::Yaml(_))));
    }
}
