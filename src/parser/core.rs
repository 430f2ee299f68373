use log::{debug, trace, warn};

use crate::expression::Expression;
use crate::parser::constants::MAX_PARSE_DEPTH;
use crate::parser::errors::ParseError;
use crate::parser::token::{Token, TokenKind, tokens_to_string};

/// Operator levels from loosest to tightest binding
const PRECEDENCE_LEVELS: [&[TokenKind]; 3] = [
    &[TokenKind::Plus, TokenKind::Minus],
    &[TokenKind::Star, TokenKind::Slash],
    &[TokenKind::Caret],
];

/// Builds an expression tree from a token sequence.
///
/// Operators are found by scanning each slice from the right, so every
/// level (including `^`) associates to the left: `x^3^2` is `(x^3)^2`.
///
/// # Errors
///
/// Returns an error if the sequence is empty, has unbalanced parentheses,
/// nests deeper than [`MAX_PARSE_DEPTH`], or matches no grammar rule.
pub fn parse(tokens: &[Token]) -> Result<Expression, ParseError> {
    debug!("Parsing {} tokens: {}", tokens.len(), tokens_to_string(tokens));

    check_balanced(tokens)?;
    let result = parse_slice(tokens, 0);

    match &result {
        Ok(expr) => debug!("Parsed expression: {}", expr),
        Err(e) => debug!("Parsing failed: {}", e),
    }
    result
}

fn check_balanced(tokens: &[Token]) -> Result<(), ParseError> {
    let mut open = Vec::new();
    for token in tokens {
        match token.kind {
            TokenKind::LeftParen => open.push(token.position),
            TokenKind::RightParen => {
                if open.pop().is_none() {
                    warn!("Unmatched ')' at position {}", token.position);
                    return Err(ParseError::UnbalancedParens {
                        position: token.position,
                    });
                }
            }
            _ => {}
        }
    }

    match open.pop() {
        Some(position) => {
            warn!("Unmatched '(' at position {}", position);
            Err(ParseError::UnbalancedParens { position })
        }
        None => Ok(()),
    }
}

fn parse_slice(tokens: &[Token], depth: usize) -> Result<Expression, ParseError> {
    if depth > MAX_PARSE_DEPTH {
        warn!("Parse depth limit of {} exceeded", MAX_PARSE_DEPTH);
        return Err(ParseError::TooDeep {
            limit: MAX_PARSE_DEPTH,
        });
    }

    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(ParseError::NoTokens),
    };

    if is_fully_wrapped(tokens) {
        trace!("Stripping outer parentheses at position {}", first.position);
        return parse_slice(&tokens[1..tokens.len() - 1], depth + 1);
    }

    for level in PRECEDENCE_LEVELS {
        if let Some(index) = find_split(tokens, level) {
            return parse_binary(tokens, index, depth);
        }
    }

    if first.kind == TokenKind::Minus {
        trace!("Leading unary minus at position {}", first.position);
        let operand = parse_slice(&tokens[1..], depth + 1)?;
        return Ok(Expression::multiply(Expression::Number(-1.0), operand));
    }

    if tokens.len() == 1 {
        return parse_single(last);
    }

    Err(ParseError::Unparseable(tokens_to_string(tokens)))
}

/// True when the first token opens a parenthesis that closes at the last token
fn is_fully_wrapped(tokens: &[Token]) -> bool {
    if tokens.len() < 2
        || tokens[0].kind != TokenKind::LeftParen
        || tokens[tokens.len() - 1].kind != TokenKind::RightParen
    {
        return false;
    }

    let mut depth: i64 = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LeftParen => depth += 1,
            TokenKind::RightParen => depth -= 1,
            _ => {}
        }
        if depth == 0 && i < tokens.len() - 1 {
            return false;
        }
    }
    depth == 0
}

/// Index of the rightmost top-level operator of the given level.
///
/// A `-` only counts when the token before it ends an operand; otherwise it
/// is a unary minus and the scan moves on.
fn find_split(tokens: &[Token], level: &[TokenKind]) -> Option<usize> {
    let mut depth: i64 = 0;
    for (i, token) in tokens.iter().enumerate().rev() {
        match token.kind {
            TokenKind::RightParen => depth += 1,
            TokenKind::LeftParen => depth -= 1,
            kind if depth == 0 && level.contains(&kind) => {
                if kind == TokenKind::Minus && !is_binary_minus(tokens, i) {
                    continue;
                }
                return Some(i);
            }
            _ => {}
        }
    }
    None
}

fn is_binary_minus(tokens: &[Token], index: usize) -> bool {
    index
        .checked_sub(1)
        .and_then(|prev| tokens.get(prev))
        .is_some_and(|prev| prev.kind.ends_operand())
}

fn parse_binary(tokens: &[Token], index: usize, depth: usize) -> Result<Expression, ParseError> {
    let operator = &tokens[index];
    if index == 0 || index == tokens.len() - 1 {
        warn!(
            "Operator '{}' at position {} has no operand",
            operator.text, operator.position
        );
        return Err(ParseError::MissingOperand {
            operator: operator.text.clone(),
            position: operator.position,
        });
    }

    trace!(
        "Splitting on '{}' at position {}",
        operator.text, operator.position
    );
    let left = parse_slice(&tokens[..index], depth + 1)?;
    let right = parse_slice(&tokens[index + 1..], depth + 1)?;

    match operator.kind {
        TokenKind::Plus => Ok(Expression::add(left, right)),
        TokenKind::Minus => Ok(Expression::subtract(left, right)),
        TokenKind::Star => Ok(Expression::multiply(left, right)),
        TokenKind::Slash => Ok(Expression::divide(left, right)),
        TokenKind::Caret => Ok(Expression::power(left, right)),
        _ => Err(ParseError::UnexpectedToken {
            token: operator.text.clone(),
            position: operator.position,
        }),
    }
}

fn parse_single(token: &Token) -> Result<Expression, ParseError> {
    match token.kind {
        TokenKind::Variable => Ok(Expression::Variable),
        TokenKind::Number => token
            .text
            .parse::<f64>()
            .map(Expression::Number)
            .map_err(|_| ParseError::InvalidNumber(token.text.clone())),
        _ => Err(ParseError::UnexpectedToken {
            token: token.text.clone(),
            position: token.position,
        }),
    }
}

#[cfg(test)]
mod tests_inner_helpers {
    use super::{find_split, is_fully_wrapped};
    use crate::parser::tokenize;

    fn tokens(input: &str) -> Vec<crate::parser::Token> {
        tokenize(input).unwrap_or_default()
    }

    #[test]
    fn test_is_fully_wrapped() {
        assert!(is_fully_wrapped(&tokens("(x+1)")));
        assert!(is_fully_wrapped(&tokens("((x))")));
        assert!(!is_fully_wrapped(&tokens("(x-1)*(x+1)")));
        assert!(!is_fully_wrapped(&tokens("x+1")));
        assert!(is_fully_wrapped(&tokens("()")));
    }

    #[test]
    fn test_find_split_skips_unary_minus() {
        let toks = tokens("x*-5");
        assert_eq!(find_split(&toks, super::PRECEDENCE_LEVELS[0]), None);
        assert_eq!(find_split(&toks, super::PRECEDENCE_LEVELS[1]), Some(1));
    }

    #[test]
    fn test_find_split_picks_rightmost_top_level() {
        let toks = tokens("x-1-(2+3)");
        assert_eq!(find_split(&toks, super::PRECEDENCE_LEVELS[0]), Some(3));
    }
}
