//! Order-sensitive deep merge with provenance tracking.
//!
//! Documents are merged lowest-precedence first; later documents win every
//! non-sequence conflict. Merge semantics:
//! - Mappings: deep-merge by key (recursive)
//! - Sequences: APPEND (purely additive, never replaced or deduplicated)
//! - Scalars and type mismatches: override (last wins)
//!
//! Sequence elements are opaque to the merge: an element that happens to be
//! a mapping is appended as-is, never merged with elements already present.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::document::{Document, Path, PathSegment};

/// Mapping from document path to the tag of the source that last set the
/// value there. For sequence paths, appended items carry their contributing
/// source at their final (post-append) indices.
pub type SourceMap<S> = BTreeMap<Path, S>;

/// Merge documents in precedence order (lowest first).
///
/// An empty slice yields `Value::Null`. Inputs are borrowed and never
/// mutated; the result shares no storage with the caller's documents.
pub fn merge(documents: &[Document]) -> Document {
    let mut acc = Value::Null;
    for document in documents {
        merge_node(&mut acc, document, &mut Vec::new(), &mut NoTrace);
    }
    acc
}

/// Merge `(tag, document)` pairs in precedence order, additionally
/// returning per-path source attribution.
///
/// Every path a document touches is recorded with that document's tag,
/// overwriting earlier records, so after the merge each path maps to the
/// last document that wrote it.
pub fn merge_sourced<S: Clone>(documents: &[(S, Document)]) -> (Document, SourceMap<S>) {
    let mut acc = Value::Null;
    let mut sources = SourceMap::new();
    for (tag, document) in documents {
        let mut trace = Trace {
            tag,
            sources: &mut sources,
        };
        merge_node(&mut acc, document, &mut Vec::new(), &mut trace);
    }
    (acc, sources)
}

/// Provenance sink threaded through the traversal. The non-sourced merge
/// uses the no-op impl so both forms share one traversal.
trait Provenance {
    fn record(&mut self, path: &[PathSegment]);
}

struct NoTrace;

impl Provenance for NoTrace {
    fn record(&mut self, _path: &[PathSegment]) {}
}

struct Trace<'a, S: Clone> {
    tag: &'a S,
    sources: &'a mut SourceMap<S>,
}

impl<S: Clone> Provenance for Trace<'_, S> {
    fn record(&mut self, path: &[PathSegment]) {
        self.sources.insert(Path::from(path.to_vec()), self.tag.clone());
    }
}

fn merge_node<P: Provenance>(
    acc: &mut Value,
    incoming: &Value,
    path: &mut Vec<PathSegment>,
    provenance: &mut P,
) {
    match incoming {
        Value::Object(incoming_map) => {
            // Key-wise merge; a non-mapping accumulator value is displaced.
            if !matches!(acc, Value::Object(_)) {
                *acc = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(acc_map) = acc {
                for (key, value) in incoming_map {
                    path.push(PathSegment::Key(key.clone()));
                    let slot = acc_map.entry(key.clone()).or_insert(Value::Null);
                    merge_node(slot, value, path, provenance);
                    path.pop();
                }
            }
            provenance.record(path);
        }
        Value::Array(items) => {
            // Additive: append, recording items at their final indices.
            if !matches!(acc, Value::Array(_)) {
                *acc = Value::Array(Vec::with_capacity(items.len()));
            }
            if let Value::Array(acc_items) = acc {
                let base = acc_items.len();
                for (i, item) in items.iter().enumerate() {
                    acc_items.push(item.clone());
                    path.push(PathSegment::Index(base + i));
                    provenance.record(path);
                    path.pop();
                }
            }
            provenance.record(path);
        }
        scalar => {
            *acc = scalar.clone();
            provenance.record(path);
        }
    }
}
