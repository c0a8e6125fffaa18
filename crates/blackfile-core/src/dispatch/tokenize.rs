//! Command-line tokenizer.
//!
//! Splits on whitespace. A double-quoted run belongs to the surrounding
//! token with its quotes removed, so `"giant squid"` is one token and `""`
//! is an empty token. An unterminated quote runs to the end of input.
//! There are no escapes and single quotes are ordinary characters.

/// Split a command line into tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quoted = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_run_is_one_token() {
        assert_eq!(
            tokenize(r#"ENGAGE A1 "giant squid" loud"#),
            vec!["ENGAGE", "A1", "giant squid", "loud"]
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(tokenize("  STATUS \t A1  "), vec!["STATUS", "A1"]);
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn quotes_keep_inner_whitespace() {
        assert_eq!(tokenize(r#"REPORT "  two  spaces ""#), vec!["REPORT", "  two  spaces "]);
    }

    #[test]
    fn empty_quotes_yield_empty_token() {
        assert_eq!(tokenize(r#"CONFIG mode """#), vec!["CONFIG", "mode", ""]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(tokenize(r#"ALERT "deep one sighting"#), vec!["ALERT", "deep one sighting"]);
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(tokenize("INVESTIGATE O'Malley's"), vec!["INVESTIGATE", "O'Malley's"]);
    }
}
