use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use autoimport_common::limits::MAX_EXTENDS_DEPTH;

use crate::error::ConfigError;

/// `compilerOptions.paths`, kept in declaration order.
pub type PathsMap = IndexMap<String, Vec<String>>;

/// Accepts `"extends": "./base.json"` as well as the array form
/// `"extends": ["./a.json", "./b.json"]`.
fn deserialize_extends<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(OneOrMany::One(value)) => Ok(vec![value]),
        Some(OneOrMany::Many(values)) => Ok(values),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default, deserialize_with = "deserialize_extends")]
    pub extends: Vec<String>,
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub paths: Option<PathsMap>,
}

impl CompilerOptions {
    /// `baseUrl` with surrounding whitespace removed, `None` when blank.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// `paths`, `None` when absent or empty.
    pub fn paths(&self) -> Option<&PathsMap> {
        self.paths.as_ref().filter(|paths| !paths.is_empty())
    }
}

pub fn parse_tsconfig(source: &str) -> Result<TsConfig> {
    let normalized = jsonc_to_json(source);
    if normalized.trim().is_empty() {
        return Ok(TsConfig::default());
    }
    let config = serde_json::from_str(&normalized).context("failed to parse tsconfig JSON")?;
    Ok(config)
}

/// Read a tsconfig file and fold in everything it `extends`.
pub fn load_tsconfig(path: &Path) -> Result<TsConfig> {
    let mut visited = FxHashSet::default();
    load_tsconfig_inner(path, &mut visited, 0)
}

fn load_tsconfig_inner(
    path: &Path,
    visited: &mut FxHashSet<PathBuf>,
    depth: usize,
) -> Result<TsConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) || depth > MAX_EXTENDS_DEPTH {
        return Err(ConfigError::ExtendsCycle { path: canonical }.into());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tsconfig: {}", path.display()))?;
    let mut config = parse_tsconfig(&source)
        .with_context(|| format!("failed to parse tsconfig: {}", path.display()))?;

    let extends = std::mem::take(&mut config.extends);
    let mut merged_base: Option<TsConfig> = None;
    for reference in extends {
        let Some(base_path) = resolve_extends_path(path, &reference) else {
            warn!(
                config = %path.display(),
                extends = %reference,
                "extended tsconfig not found, ignoring"
            );
            continue;
        };
        let base_config = load_tsconfig_inner(&base_path, visited, depth + 1)?;
        merged_base = Some(match merged_base {
            Some(previous) => merge_configs(previous, base_config),
            None => base_config,
        });
    }

    if let Some(base) = merged_base {
        config = merge_configs(base, config);
    }

    visited.remove(&canonical);
    debug!(config = %path.display(), depth, "loaded tsconfig");
    Ok(config)
}

/// Locate the file an `extends` entry points at.
///
/// Relative and absolute references resolve against the referencing file,
/// with `.json` appended when the reference names no existing file. Bare
/// package references are looked up in `node_modules` directories walking
/// upward, either as a file (`@tsconfig/node18/tsconfig.json`) or as a
/// package whose root holds `tsconfig.json` (`@tsconfig/node18`).
fn resolve_extends_path(current_path: &Path, extends: &str) -> Option<PathBuf> {
    let base_dir = current_path.parent()?;
    let reference = Path::new(extends);

    if reference.is_absolute() || extends.starts_with('.') {
        return existing_json_file(&base_dir.join(reference));
    }

    base_dir
        .ancestors()
        .take(MAX_EXTENDS_DEPTH)
        .map(|dir| dir.join("node_modules").join(reference))
        .find_map(|package| {
            existing_json_file(&package).or_else(|| {
                let root_config = package.join("tsconfig.json");
                root_config.is_file().then_some(root_config)
            })
        })
}

/// `path` itself if it is a file, else `path` with `.json` appended.
fn existing_json_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    if path.extension().is_some_and(|ext| ext == "json") {
        return None;
    }
    let mut with_json = path.as_os_str().to_owned();
    with_json.push(".json");
    let with_json = PathBuf::from(with_json);
    with_json.is_file().then_some(with_json)
}

fn merge_configs(base: TsConfig, mut child: TsConfig) -> TsConfig {
    let merged_compiler_options = match (base.compiler_options, child.compiler_options.take()) {
        (Some(base_opts), Some(child_opts)) => Some(merge_compiler_options(base_opts, child_opts)),
        (Some(base_opts), None) => Some(base_opts),
        (None, Some(child_opts)) => Some(child_opts),
        (None, None) => None,
    };

    TsConfig {
        extends: Vec::new(),
        compiler_options: merged_compiler_options,
    }
}

fn merge_compiler_options(base: CompilerOptions, child: CompilerOptions) -> CompilerOptions {
    CompilerOptions {
        base_url: child.base_url.or(base.base_url),
        paths: child.paths.or(base.paths),
    }
}

/// Resolve an `anyhow` chain from [`load_tsconfig`] into a typed error.
pub(crate) fn classify_load_error(path: &Path, err: &anyhow::Error) -> ConfigError {
    for cause in err.chain() {
        if let Some(config_error) = cause.downcast_ref::<ConfigError>() {
            return config_error.clone();
        }
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return ConfigError::Io {
                path: path.to_path_buf(),
                message: io_error.to_string(),
            };
        }
    }

    ConfigError::Parse {
        path: path.to_path_buf(),
        message: format!("{err:#}"),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    Str { escaped: bool },
    LineComment,
    BlockComment,
}

/// Turn tsconfig-flavored JSON into plain JSON in one pass.
///
/// Comments are dropped (newlines inside them are kept so error positions
/// stay on the right line) and a comma is dropped when the next significant
/// character closes an object or array.
fn jsonc_to_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = Scan::Code;
    let mut pending_comma: Option<usize> = None;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        state = match state {
            Scan::Str { escaped } => {
                out.push(ch);
                match ch {
                    _ if escaped => Scan::Str { escaped: false },
                    '\\' => Scan::Str { escaped: true },
                    '"' => Scan::Code,
                    _ => state,
                }
            }
            Scan::LineComment if ch == '\n' => {
                out.push(ch);
                Scan::Code
            }
            Scan::LineComment => state,
            Scan::BlockComment if ch == '*' && chars.peek() == Some(&'/') => {
                chars.next();
                Scan::Code
            }
            Scan::BlockComment => {
                if ch == '\n' {
                    out.push(ch);
                }
                state
            }
            Scan::Code => match (ch, chars.peek().copied()) {
                ('/', Some('/')) => {
                    chars.next();
                    Scan::LineComment
                }
                ('/', Some('*')) => {
                    chars.next();
                    Scan::BlockComment
                }
                _ if ch.is_whitespace() => {
                    out.push(ch);
                    state
                }
                _ => {
                    if let Some(at) = pending_comma.take()
                        && matches!(ch, '}' | ']')
                    {
                        out.remove(at);
                    }
                    if ch == ',' {
                        pending_comma = Some(out.len());
                    }
                    out.push(ch);
                    if ch == '"' {
                        Scan::Str { escaped: false }
                    } else {
                        state
                    }
                }
            },
        };
    }

    out
}
