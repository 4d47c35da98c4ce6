//! Slash-delimited path resolution into a JSON document

use serde_json::Value;

/// Resolve a slash-delimited path (`/items/0/id`) inside a document
///
/// An empty path or a lone `/` addresses the document root. Segments are
/// object keys or array indices, with `~1` and `~0` decoded to `/` and `~`.
/// Returns `None` when any segment is missing, which callers report as
/// `undefined`; a present `null` comes back as `Some(&Value::Null)`.
pub fn resolve<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Some(document);
    }

    trimmed
        .split('/')
        .try_fold(document, |node, segment| step(node, &unescape(segment)))
}

fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn unescape(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Append one raw segment to a path, escaping `~` and `/`
pub fn join(path: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{}/{}", path.trim_end_matches('/'), escaped)
}

/// Split a path into its decoded segments
pub fn segments(path: &str) -> Vec<String> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').map(unescape).collect()
}
