//! YAML stream load and dump.

use std::io::Write;

use serde::Deserialize;

use super::Value;
use crate::Error;

/// Parses every document of a (possibly multi-document) YAML stream.
///
/// Empty documents are kept as `Value::Null` so the stream keeps its cardinality.
/// Input holding nothing but whitespace and comments has no documents.
pub fn load_all(yaml: &str) -> Result<Vec<Value>, Error> {
    if !has_content(yaml) {
        return Ok(Vec::new());
    }
    serde_yaml::Deserializer::from_str(yaml)
        .map(|document| Value::deserialize(document).map_err(Error::from))
        .collect()
}

fn has_content(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}

/// Writes one document preceded by an explicit start marker.
pub fn dump<W: Write>(mut out: W, document: &Value) -> Result<(), Error> {
    out.write_all(b"---\n")?;
    serde_yaml::to_writer(&mut out, document)?;
    Ok(())
}

/// Serializes one document to a string, start marker included.
pub fn to_yaml(document: &Value) -> Result<String, Error> {
    let mut buf = Vec::new();
    dump(&mut buf, document)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_multi_document() {
        let docs = load_all("kind: A\n---\nkind: B\n").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].get("kind").and_then(Value::as_str), Some("B"));
    }

    #[test]
    fn test_load_scalars() {
        let docs =
            load_all("replicas: 3\nratio: 0.5\nenabled: true\nname: web\nnothing: null\n")
                .unwrap();
        let doc = &docs[0];
        assert_eq!(doc.get("replicas"), Some(&Value::Int(3)));
        assert_eq!(doc.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(doc.get("enabled"), Some(&Value::Bool(true)));
        assert_eq!(doc.get("name"), Some(&Value::from("web")));
        assert_eq!(doc.get("nothing"), Some(&Value::Null));
    }

    #[test]
    fn test_dump_has_start_marker_and_keeps_order() {
        let docs = load_all("zeta: 1\nalpha: 2\n").unwrap();
        assert_eq!(to_yaml(&docs[0]).unwrap(), "---\nzeta: 1\nalpha: 2\n");
    }

    #[test]
    fn test_quoted_numeric_string_survives() {
        let docs = load_all("version: '1'\n").unwrap();
        assert_eq!(docs[0].get("version"), Some(&Value::from("1")));
        let again = load_all(&to_yaml(&docs[0]).unwrap()).unwrap();
        assert_eq!(again, docs);
    }

    #[test]
    fn test_empty_input_has_no_documents() {
        assert!(load_all("").unwrap().is_empty());
        assert!(load_all("  \n\n").unwrap().is_empty());
        assert!(load_all("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_large_unsigned_integer_round_trips() {
        let docs = load_all("big: 18446744073709551615\n").unwrap();
        assert_eq!(docs[0].get("big"), Some(&Value::UInt(u64::MAX)));
        assert_eq!(
            to_yaml(&docs[0]).unwrap(),
            "---\nbig: 18446744073709551615\n"
        );
    }

    #[test]
    fn test_non_string_keys_round_trip() {
        let input = "ports:\n  80: http\nflags:\n  true: enabled\n";
        let docs = load_all(input).unwrap();
        assert_eq!(
            docs[0].lookup(["ports", "80"]),
            Some(&Value::from("http"))
        );
        assert_eq!(
            docs[0].lookup(["flags", "true"]),
            Some(&Value::from("enabled"))
        );
        assert_eq!(to_yaml(&docs[0]).unwrap(), format!("---\n{}", input));
    }

    #[test]
    fn test_custom_tag_round_trips() {
        let docs = load_all("x: !custom foo\n").unwrap();
        assert!(matches!(docs[0].get("x"), Some(Value::Tagged(_))));
        let out = to_yaml(&docs[0]).unwrap();
        assert!(out.contains("!custom"), "{}", out);
        assert_eq!(load_all(&out).unwrap(), docs);
    }

    #[test]
    fn test_load_invalid() {
        assert!(load_all("a: [unclosed").is_err());
    }
}
