use super::{lex, parse, Error, LineNumber, Statement, Token};

/// One lexed line of source: an optional line number and its tokens.
/// Once stored in a program the tokens are owned here exclusively.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    number: LineNumber,
    tokens: Vec<Token>,
}

impl Line {
    pub fn new(source: &str) -> Result<Line, Error> {
        let (number, tokens) = lex(source)?;
        Ok(Line { number, tokens })
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn is_direct(&self) -> bool {
        self.number.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parse this line's tokens into a statement.
    pub fn statement(&self) -> Result<Statement, Error> {
        parse(self.number, &self.tokens)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text: String = self.tokens.iter().map(|t| t.to_string()).collect();
        match self.number {
            Some(number) => write!(f, "{} {}", number, text),
            None => write!(f, "{}", text),
        }
    }
}
