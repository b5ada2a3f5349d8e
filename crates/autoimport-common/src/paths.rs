//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: paths are compared and rewritten
//! purely by their components so results are stable whether or not the files
//! exist.

use std::path::{Component, Path, PathBuf};

/// Extension removed from alias-qualified import paths.
pub const TS_EXTENSION: &str = ".ts";

/// Fold `.` and `..` components without consulting the filesystem.
///
/// Leading `..` components of a relative path are preserved; `..` directly
/// under the root is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::RootDir | Component::Normal(_) | Component::Prefix(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }

    normalized
}

/// Path of `to` relative to the directory `from`.
///
/// Both inputs should already be normalized (see [`normalize_path`]). Returns
/// `.` when the two are identical.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from_components: Vec<_> = from
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let to_components: Vec<_> = to
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let mut common = 0;
    while common < from_components.len()
        && common < to_components.len()
        && from_components[common] == to_components[common]
    {
        common += 1;
    }

    let mut result = PathBuf::new();
    for _ in common..from_components.len() {
        result.push("..");
    }
    for component in &to_components[common..] {
        result.push(component.as_os_str());
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }

    result
}

/// Render a path with `/` separators regardless of platform.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Drop everything from the last `.` of the final `/`-separated segment.
///
/// `types.d.ts` becomes `types.d`. Directories are never touched, and
/// `.`/`..` segments or a dotfile's leading dot are returned unchanged.
pub fn strip_module_extension(spec: &str) -> &str {
    let segment_start = spec.rfind('/').map_or(0, |idx| idx + 1);
    let segment = &spec[segment_start..];
    if segment == ".." {
        return spec;
    }

    match segment.rfind('.') {
        Some(dot) if dot > 0 => &spec[..segment_start + dot],
        _ => spec,
    }
}

/// Strip a trailing `.ts`, if any. Other extensions (`.tsx`, `.js`) stay.
///
/// A bare `.ts` segment with nothing before it is left alone.
pub fn strip_ts_extension(spec: &str) -> &str {
    match spec.strip_suffix(TS_EXTENSION) {
        Some(base) if !base.is_empty() && !base.ends_with('/') => base,
        _ => spec,
    }
}
