//! Extracting the missing identifier from compiler diagnostics.

const MISSING_NAME_PREFIX: &str = "Cannot find name";
const HOST_PREFIX: &str = "Typescript ";
const SUGGESTION_MARKER: &str = "Did you mean";

fn is_noise(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\'' | '"' | '`' | '.' | ';' | '{' | '}')
}

/// Identifier named by a "Cannot find name 'X'." diagnostic.
///
/// Accepts the compiler's message with or without the host's `Typescript `
/// prefix and ignores a trailing "Did you mean ...?" hint.
pub fn missing_name(message: &str) -> Option<String> {
    let message = message.trim_start();
    let message = message.strip_prefix(HOST_PREFIX).unwrap_or(message);
    let rest = message.strip_prefix(MISSING_NAME_PREFIX)?;
    let rest = rest
        .split_once(SUGGESTION_MARKER)
        .map_or(rest, |(before, _)| before);

    let name: String = rest
        .chars()
        .filter(|&ch| !is_noise(ch))
        .collect();

    let is_identifier = name
        .chars()
        .all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$');
    let starts_well = name.chars().next().is_some_and(|ch| !ch.is_ascii_digit());

    (is_identifier && starts_well).then_some(name)
}
