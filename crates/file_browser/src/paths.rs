//! Flat path-string utilities.
//!
//! The hierarchy is represented as plain `/`-separated path strings rather
//! than a parent/child object graph, which avoids cyclic ownership. The
//! ancestor check works on segments, so `/docs/report` is not treated as a
//! descendant of `/docs/rep`.

pub const ROOT_PATH: &str = "/";

/// Append an entry name to a folder path: `("/docs", "a.txt")` → `"/docs/a.txt"`.
pub fn path_with_entry(folder_path: &str, name: &str) -> String {
    let trimmed = folder_path.trim_end_matches('/');
    format!("{}/{}", trimmed, name)
}

/// Split a path into its non-empty segments.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Whether `candidate` lies strictly inside `ancestor` (segment-wise prefix,
/// equality excluded).
pub fn is_ancestor(ancestor: &str, candidate: &str) -> bool {
    let ancestor = segments(ancestor);
    let candidate = segments(candidate);
    candidate.len() > ancestor.len() && candidate[..ancestor.len()] == ancestor[..]
}

/// Whether moving entries at `source_paths` into `destination` is
/// structurally sound: the destination may not equal a source or sit inside
/// one (a folder cannot be moved into itself or its own descendant).
pub fn is_valid_move_destination(source_paths: &[String], destination: &str) -> bool {
    let dest_segments = segments(destination);
    source_paths.iter().all(|source| {
        let source_segments = segments(source);
        dest_segments != source_segments && !is_ancestor(source, destination)
    })
}
