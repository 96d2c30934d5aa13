//! Text formatting helpers for catalog display labels.

use heck::ToTitleCase;

/// Convert an identifier (camelCase, kebab-case, snake_case) into a
/// display-friendly title.
///
/// Hyphens and underscores become spaces, a space is inserted before each
/// internal uppercase letter, every word is capitalized, and repeated
/// whitespace collapses. Empty input yields an empty string.
///
/// # Example
/// ```rust
/// use switchboard_util::display_title;
///
/// assert_eq!(display_title("getCustomerByEmail"), "Get Customer By Email");
/// assert_eq!(display_title("send-invoice"), "Send Invoice");
/// assert_eq!(display_title(""), "");
/// ```
pub fn display_title(identifier: &str) -> String {
    identifier.to_title_case()
}

/// Reduce an arbitrary label to a lowercase identifier-safe token.
///
/// Non-alphanumeric runs collapse to a single underscore; leading and
/// trailing underscores are trimmed. Used to embed type labels inside
/// generated placeholder values.
pub fn sanitize_token(label: &str) -> String {
    let mut token = String::with_capacity(label.len());
    let mut previous_was_separator = false;
    for character in label.chars() {
        if character.is_ascii_alphanumeric() {
            token.extend(character.to_lowercase());
            previous_was_separator = false;
        } else if !previous_was_separator && !token.is_empty() {
            token.push('_');
            previous_was_separator = true;
        }
    }
    token.trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_camel_case() {
        assert_eq!(display_title("getCustomerByEmail"), "Get Customer By Email");
    }

    #[test]
    fn titles_kebab_case() {
        assert_eq!(display_title("send-invoice"), "Send Invoice");
    }

    #[test]
    fn titles_snake_case() {
        assert_eq!(display_title("list_scheduled_events"), "List Scheduled Events");
    }

    #[test]
    fn empty_input_yields_empty_title() {
        assert_eq!(display_title(""), "");
    }

    #[test]
    fn repeated_separators_collapse() {
        assert_eq!(display_title("send--invoice"), "Send Invoice");
    }

    #[test]
    fn single_word_is_capitalized() {
        assert_eq!(display_title("stripe"), "Stripe");
    }

    #[test]
    fn sanitize_strips_label_syntax() {
        assert_eq!(sanitize_token("Union<String | Number>"), "union_string_number");
        assert_eq!(sanitize_token("UnknownType"), "unknowntype");
        assert_eq!(sanitize_token(""), "");
    }
}
