use log::{debug, warn};

use crate::parser::errors::LexError;
use crate::parser::token::{Token, TokenKind};
use crate::utils::sanitize_definition;

/// Splits a function definition into tokens.
///
/// Whitespace is removed first, so reported positions index into the
/// whitespace-free text.
///
/// # Errors
///
/// Returns an error if the input contains a character outside the grammar,
/// or a number literal with a misplaced or repeated `.`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let sanitized = sanitize_definition(input);
    debug!("Tokenizing '{}'", sanitized);

    let chars: Vec<char> = sanitized.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch.is_ascii_digit() || ch == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            validate_number_literal(&literal, start)?;
            tokens.push(Token::new(TokenKind::Number, literal, start));
            continue;
        }

        match TokenKind::from_symbol(ch) {
            Some(kind) => tokens.push(Token::new(kind, ch.to_string(), i)),
            None => {
                warn!("Unexpected character '{}' at position {}", ch, i);
                return Err(LexError::UnexpectedChar { ch, position: i });
            }
        }
        i += 1;
    }

    debug!("Produced {} tokens", tokens.len());
    Ok(tokens)
}

fn validate_number_literal(literal: &str, position: usize) -> Result<(), LexError> {
    let dots = literal.chars().filter(|&c| c == '.').count();
    let has_digit = literal.chars().any(|c| c.is_ascii_digit());

    if dots > 1 || !has_digit {
        warn!("Malformed number '{}' at position {}", literal, position);
        return Err(LexError::MalformedNumber {
            literal: literal.to_string(),
            position,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::validate_number_literal;

    #[test]
    fn test_validate_number_literal() {
        assert!(validate_number_literal("12", 0).is_ok());
        assert!(validate_number_literal("1.5", 0).is_ok());
        assert!(validate_number_literal(".5", 0).is_ok());
        assert!(validate_number_literal("3.", 0).is_ok());
        assert!(validate_number_literal(".", 0).is_err());
        assert!(validate_number_literal("1..2", 0).is_err());
        assert!(validate_number_literal("1.2.3", 0).is_err());
    }
}
