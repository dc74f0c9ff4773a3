//! LIKE-pattern helpers.
//!
//! Patterns use SQL `%` wildcards and `!` as the escape character. Every
//! literal `%`, `_` or `!` in user input is escaped, so the only wildcards a
//! pattern carries are the ones added here. Always pair a pattern with
//! [`like_expr`] so the store knows the escape character.

use sea_orm::sea_query::LikeExpr;

/// Escape character used in every pattern produced by this module.
pub const LIKE_ESCAPE: char = '!';

/// Escape literal wildcard characters in `s`.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Pattern matching `s` exactly.
pub fn exact(s: &str) -> String {
    escape(s)
}

pub fn contains(s: &str) -> String {
    format!("%{}%", escape(s))
}

pub fn starts_with(s: &str) -> String {
    format!("{}%", escape(s))
}

pub fn ends_with(s: &str) -> String {
    format!("%{}", escape(s))
}

/// Wrap a pattern into a `LIKE ... ESCAPE '!'` expression.
pub fn like_expr(pattern: impl Into<String>) -> LikeExpr {
    LikeExpr::new(pattern).escape(LIKE_ESCAPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_values_are_untouched() {
        assert_eq!(exact("alice@example.com"), "alice@example.com");
        assert_eq!(starts_with("alice"), "alice%");
        assert_eq!(ends_with(".org"), "%.org");
        assert_eq!(contains("bug"), "%bug%");
    }

    #[test]
    fn wildcards_in_input_are_escaped() {
        assert_eq!(escape("100%"), "100!%");
        assert_eq!(escape("a_b"), "a!_b");
        assert_eq!(escape("wow!"), "wow!!");
        assert_eq!(contains("5%_off"), "%5!%!_off%");
    }
}
