//! Case conversions shared by the parser and the message formatter.

/// Convert a snake_case (or lowercase) token to PascalCase.
///
/// Each `_`-separated segment gets an uppercase first character and a
/// lowercase remainder; empty segments are dropped.
///
/// ```
/// use ruleval::case::pascal_case;
///
/// assert_eq!(pascal_case("not_in"), "NotIn");
/// assert_eq!(pascal_case("REQUIRED_IF"), "RequiredIf");
/// ```
pub fn pascal_case(token: &str) -> String {
    token.split('_').map(capitalize).collect()
}

/// Convert camelCase or PascalCase to snake_case.
///
/// An underscore is inserted after every character that is followed by an
/// ASCII uppercase letter, then the whole string is lowercased. A run of
/// capitals is split letter by letter (`"HELLO"` becomes `"h_e_l_l_o"`).
///
/// ```
/// use ruleval::case::snake_case;
///
/// assert_eq!(snake_case("NotIn"), "not_in");
/// assert_eq!(snake_case("threeWordProperty"), "three_word_property");
/// ```
pub fn snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if chars.peek().is_some_and(char::is_ascii_uppercase) {
            out.push('_');
        }
    }
    out.to_lowercase()
}

/// Capitalize every space-separated word, keeping the spaces.
pub fn title_case(input: &str) -> String {
    input
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
