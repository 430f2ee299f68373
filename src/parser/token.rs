use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Variable,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
}

impl TokenKind {
    /// Maps a single-character symbol to its token kind
    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            'x' => Some(TokenKind::Variable),
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Star),
            '/' => Some(TokenKind::Slash),
            '^' => Some(TokenKind::Caret),
            '(' => Some(TokenKind::LeftParen),
            ')' => Some(TokenKind::RightParen),
            _ => None,
        }
    }

    /// Whether a token of this kind can end an operand, which is what makes
    /// a following `-` a binary subtraction
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::Variable | TokenKind::RightParen
        )
    }
}

/// A lexed token with the position of its first character in the
/// whitespace-free input
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Joins token texts back into the (whitespace-free) source they came from
pub fn tokens_to_string(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
