use super::{Column, Ident};
use std::rc::Rc;

/// One executable statement. Every kind the engine can run is here and
/// nowhere else; the interpreter matches this enum exhaustively.
#[derive(Debug, PartialEq)]
pub enum Statement {
    Dim(Column, Ident, Vec<Expression>),
    End(Column),
    For(Column, Ident, Expression, Expression, Option<Expression>),
    Gosub(Column, Expression),
    Goto(Column, Expression),
    If(Column, Expression, Box<Statement>),
    Input(Column, Option<Rc<str>>, Vec<Variable>),
    Let(Column, Variable, Expression),
    Next(Column, Ident),
    Print(Column, Vec<Expression>, bool),
    Rem(Column),
    Return(Column),
}

/// An assignable location: a scalar or an array element.
#[derive(Debug, PartialEq)]
pub enum Variable {
    Unary(Column, Ident),
    Array(Column, Ident, Vec<Expression>),
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Number(Column, f64),
    String(Column, Rc<str>),
    Var(Column, Ident),
    /// Built-in function call or array element fetch; which one is
    /// decided by name at evaluation time.
    Function(Column, Ident, Vec<Expression>),
    Negation(Column, Box<Expression>),
    Not(Column, Box<Expression>),
    Power(Column, Box<Expression>, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
    Equal(Column, Box<Expression>, Box<Expression>),
    NotEqual(Column, Box<Expression>, Box<Expression>),
    Less(Column, Box<Expression>, Box<Expression>),
    LessEqual(Column, Box<Expression>, Box<Expression>),
    Greater(Column, Box<Expression>, Box<Expression>),
    GreaterEqual(Column, Box<Expression>, Box<Expression>),
    And(Column, Box<Expression>, Box<Expression>),
    Or(Column, Box<Expression>, Box<Expression>),
}
