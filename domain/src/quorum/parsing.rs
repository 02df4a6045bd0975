//! Reply parsing for group decisions.
//!
//! Pure text rules, no I/O. Anything not recognised is treated as a
//! non-answer rather than an error.
//!
//! | Function | Use Case | Accepts |
//! |----------|----------|---------|
//! | [`parse_affirmative`] | Yes/no confirmation | "yes" substring, "y", 👍 |
//! | [`parse_choice`] | Numbered option pick | Integer in `1..=option_count` |

const THUMBS_UP: char = '\u{1F44D}';

/// Interpret a free-text reply as a yes/no vote.
///
/// Affirmative when the reply contains "yes" (any case), is exactly the
/// token "y" (any case, surrounding whitespace ignored), or contains a
/// thumbs-up symbol (skin-tone modifiers allowed). Everything else is a no.
pub fn parse_affirmative(reply: &str) -> bool {
    let lower = reply.to_lowercase();
    lower.contains("yes") || lower.trim() == "y" || reply.contains(THUMBS_UP)
}

/// Parse a numbered choice, returning the 1-based value when it is in range.
///
/// Malformed and out-of-range replies yield `None`; callers discard them
/// individually.
pub fn parse_choice(reply: &str, option_count: usize) -> Option<usize> {
    let value: i64 = reply.trim().parse().ok()?;
    let value = usize::try_from(value).ok()?;
    (1..=option_count).contains(&value).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_yes_substring() {
        assert!(parse_affirmative("yes"));
        assert!(parse_affirmative("YES!"));
        assert!(parse_affirmative("oh yes, sounds great"));
        assert!(parse_affirmative("Yessir"));
    }

    #[test]
    fn test_affirmative_exact_y_token() {
        assert!(parse_affirmative("y"));
        assert!(parse_affirmative(" Y "));
        assert!(!parse_affirmative("yy"));
        assert!(!parse_affirmative("yep"));
        assert!(!parse_affirmative("maybe"));
    }

    #[test]
    fn test_affirmative_thumbs_up() {
        assert!(parse_affirmative("👍"));
        assert!(parse_affirmative("👍🏽"));
        assert!(parse_affirmative("sure 👍"));
        assert!(!parse_affirmative("👎"));
    }

    #[test]
    fn test_negative_replies() {
        assert!(!parse_affirmative("no"));
        assert!(!parse_affirmative("nope"));
        assert!(!parse_affirmative(""));
    }

    #[test]
    fn test_parse_choice_range() {
        assert_eq!(parse_choice("1", 3), Some(1));
        assert_eq!(parse_choice(" 3 ", 3), Some(3));
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
    }

    #[test]
    fn test_parse_choice_malformed() {
        assert_eq!(parse_choice("abc", 3), None);
        assert_eq!(parse_choice("2.5", 3), None);
        assert_eq!(parse_choice("", 3), None);
        assert_eq!(parse_choice("1", 0), None);
    }
}
