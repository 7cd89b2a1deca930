pub use super::ident::Ident;
use super::{Error, LineNumber, MaxValue};
use crate::error;
use std::collections::HashMap;
use std::convert::TryFrom;

thread_local!(
    static STRING_TO_TOKEN: HashMap<String, Token> = Word::ALL
        .iter()
        .map(|w| Token::Word(w.clone()))
        .chain(Operator::ALL.iter().map(|o| Token::Operator(o.clone())))
        .chain(
            [Token::LParen, Token::RParen, Token::Comma, Token::Semicolon]
                .iter()
                .cloned(),
        )
        .map(|t| (t.to_string(), t))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Whitespace(usize),
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(Ident),
    /// Opaque remainder of a REM statement; never analyzed further.
    Remark(String),
    LParen,
    RParen,
    Comma,
    Semicolon,
}

impl Token {
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Whitespace(u) => write!(f, "{s:>w$}", s = "", w = u),
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            Remark(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
        }
    }
}

impl TryFrom<&Token> for u16 {
    type Error = Error;
    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        let msg = "INVALID LINE NUMBER";
        if let Token::Literal(Literal::Number(s)) = token {
            if s.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(line) = s.parse::<u16>() {
                    if line <= LineNumber::max_value() {
                        return Ok(line);
                    }
                }
                return Err(error!(Overflow; msg));
            }
        }
        Err(error!(SyntaxError; msg))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Number(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Number(s) => write!(f, "{}", s),
            // Embedded quotes were lexed from doubled quotes; restore them.
            String(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Word {
    Dim,
    End,
    Exit,
    For,
    Gosub,
    Goto,
    If,
    Input,
    Let,
    List,
    Load,
    New,
    Next,
    Print,
    Rem,
    Return,
    Run,
    Save,
    Step,
    Then,
    To,
}

impl Word {
    const ALL: [Word; 21] = [
        Word::Dim,
        Word::End,
        Word::Exit,
        Word::For,
        Word::Gosub,
        Word::Goto,
        Word::If,
        Word::Input,
        Word::Let,
        Word::List,
        Word::Load,
        Word::New,
        Word::Next,
        Word::Print,
        Word::Rem,
        Word::Return,
        Word::Run,
        Word::Save,
        Word::Step,
        Word::Then,
        Word::To,
    ];
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Dim => write!(f, "DIM"),
            End => write!(f, "END"),
            Exit => write!(f, "EXIT"),
            For => write!(f, "FOR"),
            Gosub => write!(f, "GOSUB"),
            Goto => write!(f, "GOTO"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            List => write!(f, "LIST"),
            Load => write!(f, "LOAD"),
            New => write!(f, "NEW"),
            Next => write!(f, "NEXT"),
            Print => write!(f, "PRINT"),
            Rem => write!(f, "REM"),
            Return => write!(f, "RETURN"),
            Run => write!(f, "RUN"),
            Save => write!(f, "SAVE"),
            Step => write!(f, "STEP"),
            Then => write!(f, "THEN"),
            To => write!(f, "TO"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl Operator {
    const ALL: [Operator; 14] = [
        Operator::Caret,
        Operator::Multiply,
        Operator::Divide,
        Operator::Plus,
        Operator::Minus,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
        Operator::Not,
        Operator::And,
        Operator::Or,
    ];
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
        }
    }
}
