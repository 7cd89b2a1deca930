use super::{Console, Outcome, Program, Runner};
use crate::error;
use crate::lang::{Error, Line, Literal, MaxValue, Operator, Token, Word};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// What the front-end should do after one unit of input.
#[derive(Debug)]
pub enum Action {
    Continue,
    Ran(Outcome),
    Exit,
}

/// ## Interactive session
///
/// One program store and one execution engine, driven a line of input
/// at a time. Numbered input edits the store; commands operate on it;
/// anything else runs immediately.

#[derive(Default)]
pub struct Session {
    program: Program,
    runner: Runner,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn enter(&mut self, source: &str, con: &mut dyn Console) -> Result<Action> {
        let line = Line::new(source)?;
        if let Some(number) = line.number() {
            if line.is_empty() {
                self.program.remove(number);
            } else {
                self.program.insert(line)?;
            }
            return Ok(Action::Continue);
        }
        let tokens: Vec<&Token> = line
            .tokens()
            .iter()
            .filter(|t| !t.is_whitespace())
            .collect();
        match tokens.split_first() {
            None => Ok(Action::Continue),
            Some((Token::Word(Word::Run), rest)) => {
                Self::no_arguments(rest)?;
                Ok(Action::Ran(self.runner.run(&self.program, con)))
            }
            Some((Token::Word(Word::List), rest)) => self.list(rest, con),
            Some((Token::Word(Word::Save), rest)) => {
                self.program.save(Self::file_name(rest)?)?;
                Ok(Action::Continue)
            }
            Some((Token::Word(Word::Load), rest)) => {
                self.program = Program::load(Self::file_name(rest)?)?;
                Ok(Action::Continue)
            }
            Some((Token::Word(Word::New), rest)) => {
                Self::no_arguments(rest)?;
                self.program.clear();
                self.runner.clear();
                Ok(Action::Continue)
            }
            Some((Token::Word(Word::Exit), rest)) => {
                Self::no_arguments(rest)?;
                Ok(Action::Exit)
            }
            Some(_) => {
                let statement = line.statement()?;
                self.runner.immediate(&statement, con)?;
                Ok(Action::Ran(Outcome::Completed))
            }
        }
    }

    fn no_arguments(rest: &[&Token]) -> Result<()> {
        if rest.is_empty() {
            Ok(())
        } else {
            Err(error!(SyntaxError; "UNEXPECTED ARGUMENT"))
        }
    }

    fn file_name(rest: &[&Token]) -> Result<String> {
        match rest {
            [Token::Literal(Literal::String(name))] => Ok(name.clone()),
            _ => Err(error!(SyntaxError; "EXPECTED FILE NAME")),
        }
    }

    // LIST, LIST n, LIST n-, LIST -m, LIST n-m, LIST n m
    fn list(&self, rest: &[&Token], con: &mut dyn Console) -> Result<Action> {
        let mut start: Option<u16> = None;
        let mut end: Option<u16> = None;
        let mut dashed = false;
        for token in rest {
            match token {
                Token::Operator(Operator::Minus) if !dashed => dashed = true,
                Token::Literal(Literal::Number(_)) => {
                    let number = u16::try_from(*token)?;
                    if dashed || start.is_some() {
                        if end.is_some() {
                            return Err(error!(SyntaxError; "EXPECTED LINE RANGE"));
                        }
                        end = Some(number);
                    } else {
                        start = Some(number);
                    }
                }
                _ => return Err(error!(SyntaxError; "EXPECTED LINE RANGE")),
            }
        }
        let max = crate::lang::LineNumber::max_value();
        let range = match (start, end, dashed) {
            (None, None, _) => 0..=max,
            (Some(n), None, false) => n..=n,
            (Some(n), None, true) => n..=max,
            (None, Some(m), true) => 0..=m,
            (Some(n), Some(m), _) => n..=m,
            (None, Some(_), false) => return Err(error!(SyntaxError; "EXPECTED LINE RANGE")),
        };
        for text in self.program.list(range) {
            con.print(&format!("{}\n", text));
        }
        Ok(Action::Continue)
    }
}
