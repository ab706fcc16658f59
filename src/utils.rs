use std::collections::HashSet;

const BRACKETS: [(char, char); 5] = [('(', ')'), ('（', '）'), ('[', ']'), ('【', '】'), ('「', '」')];
const ALIAS_SEPARATORS: [char; 5] = [',', '、', '，', '/', '／'];

/// Splits a stage name like `波多野結衣 (Yui Hatano, Hatano Yui)` into the
/// name outside brackets and the aliases listed inside them.
///
/// Half- and full-width round brackets, square brackets, lenticular brackets
/// and corner brackets are recognized. An opening bracket without a closing
/// one is kept as part of the name.
pub fn split_bracketed_name(input: &str) -> (String, Vec<String>) {
    let chars: Vec<char> = input.chars().collect();
    let mut primary = String::new();
    let mut aliases = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let closing = BRACKETS.iter().find(|(open, _)| *open == c).map(|(_, close)| *close);
        let end = closing.and_then(|close| chars[i + 1..].iter().position(|&x| x == close));

        match end {
            Some(offset) => {
                let inner: String = chars[i + 1..i + 1 + offset].iter().collect();
                aliases.extend(split_aliases(&inner));
                primary.push(' ');
                i += offset + 2;
            }
            None => {
                primary.push(c);
                i += 1;
            }
        }
    }

    (collapse_whitespace(&primary), aliases)
}

/// Splits a list of aliases on commas, ideographic commas and slashes.
pub fn split_aliases(input: &str) -> Vec<String> {
    input
        .split(|c: char| ALIAS_SEPARATORS.contains(&c))
        .map(collapse_whitespace)
        .filter(|a| !a.is_empty())
        .collect()
}

/// Formats a name with its aliases as `Primary (A, B)`.
///
/// Aliases are deduplicated case-insensitively and the primary name itself is
/// dropped from the list.
pub fn format_aliases(primary: &str, aliases: &[String]) -> String {
    let primary = collapse_whitespace(primary);
    let mut seen = HashSet::new();
    seen.insert(primary.to_lowercase());

    let unique: Vec<&str> = aliases
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty() && seen.insert(a.to_lowercase()))
        .collect();

    match (primary.is_empty(), unique.is_empty()) {
        (_, true) => primary,
        (true, false) => unique.join(", "),
        (false, false) => format!("{} ({})", primary, unique.join(", ")),
    }
}

/// Rewrites any bracket style into the canonical `Primary (A, B)` form.
pub fn normalize_alias_name(input: &str) -> String {
    let (primary, aliases) = split_bracketed_name(input);
    format_aliases(&primary, &aliases)
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
