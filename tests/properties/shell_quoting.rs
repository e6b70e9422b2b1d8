//! Property tests for shell word quoting.

use proptest::prelude::*;

use hoist::domain::services::shell::quote;

/// Undo POSIX single-quote quoting the way `sh` would.
fn unquote(word: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = word.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => loop {
                match chars.next()? {
                    '\'' => break,
                    inner => out.push(inner),
                }
            },
            '\\' => out.push(chars.next()?),
            _ => return None,
        }
    }
    Some(out)
}

proptest! {
    /// PROPERTY: a quoted value is read back by the shell as exactly one
    /// word equal to the input, whatever it contains.
    #[test]
    fn property_quote_is_one_literal_word(s in "(?s).{0,64}") {
        let quoted = quote(&s);
        prop_assert_eq!(unquote(&quoted), Some(s));
    }
}
