// crates/shared-kernel/src/path.rs
use std::path::{Component, Path};

/// Render `path` relative to `root` with `/` separators on every platform.
///
/// Returns `None` when `path` is not below `root` or contains a segment that is
/// not valid UTF-8 (such a file can never name a class).
pub fn slash_relative(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                if !out.is_empty() {
                    out.push('/');
                }
                out.push_str(segment.to_str()?);
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    if out.is_empty() { None } else { Some(out) }
}
