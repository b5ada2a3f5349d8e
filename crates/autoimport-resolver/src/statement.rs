//! Rendering of named import statements.

use autoimport_config::AutoImportSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStyle {
    pub semicolon: bool,
    pub space_between_braces: bool,
    pub double_quotes: bool,
}

impl Default for ImportStyle {
    fn default() -> Self {
        ImportStyle::from(&AutoImportSettings::default())
    }
}

impl From<&AutoImportSettings> for ImportStyle {
    fn from(settings: &AutoImportSettings) -> Self {
        ImportStyle {
            semicolon: settings.use_semi_colon,
            space_between_braces: settings.space_between_braces,
            double_quotes: settings.double_quotes,
        }
    }
}

/// `import { A, B } from './x';` in the given style. Quote characters in
/// `specifier` are dropped.
pub fn render_import_statement<S: AsRef<str>>(
    names: &[S],
    specifier: &str,
    style: ImportStyle,
) -> String {
    let names = names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    let specifier: String = specifier
        .chars()
        .filter(|ch| !matches!(ch, '"' | '\''))
        .collect();

    let quote = if style.double_quotes { '"' } else { '\'' };
    let pad = if style.space_between_braces { " " } else { "" };
    let terminator = if style.semicolon { ";" } else { "" };

    format!("import {{{pad}{names}{pad}}} from {quote}{specifier}{quote}{terminator}")
}
