/*!
# Language Module

Lexical analysis and parsing of BASIC source lines.

*/

#[macro_use]
mod error;
mod ast;
mod ident;
mod lex;
mod line;
mod parse;
mod token;

pub use ast::{Expression, Statement, Variable};
pub use error::{Error, ErrorCode};
pub use ident::Ident;
pub use lex::lex;
pub use line::Line;
pub use parse::parse;
pub use token::{Literal, Operator, Token, Word};

/// A line number; `None` for a direct (unnumbered) line.
pub type LineNumber = Option<u16>;

/// Character span of a token within its line.
pub type Column = std::ops::Range<usize>;

pub trait MaxValue {
    fn max_value() -> u16;
}

impl MaxValue for LineNumber {
    fn max_value() -> u16 {
        65529
    }
}
