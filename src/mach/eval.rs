use super::{Function, Operation, Val, Var};
use crate::error;
use crate::lang::{Column, Error, Expression, Ident};

type Result<T> = std::result::Result<T, Error>;

/// Evaluate an expression against the variable environment.
/// Arguments and operands evaluate left to right.
pub fn eval(expr: &Expression, vars: &mut Var) -> Result<Val> {
    use Expression::*;
    match expr {
        Number(_, n) => Ok(Val::Number(*n)),
        String(_, s) => Ok(Val::String(s.clone())),
        Var(col, ident) => at(fetch(ident, vars), col),
        Function(col, ident, args) => at(call(ident, args, vars), col),
        Negation(col, a) => unary(col, a, vars, Operation::negate),
        Not(col, a) => unary(col, a, vars, Operation::not),
        Power(col, a, b) => binary(col, a, b, vars, Operation::power),
        Multiply(col, a, b) => binary(col, a, b, vars, Operation::multiply),
        Divide(col, a, b) => binary(col, a, b, vars, Operation::divide),
        Add(col, a, b) => binary(col, a, b, vars, Operation::sum),
        Subtract(col, a, b) => binary(col, a, b, vars, Operation::subtract),
        Equal(col, a, b) => binary(col, a, b, vars, Operation::equal),
        NotEqual(col, a, b) => binary(col, a, b, vars, Operation::not_equal),
        Less(col, a, b) => binary(col, a, b, vars, Operation::less),
        LessEqual(col, a, b) => binary(col, a, b, vars, Operation::less_equal),
        Greater(col, a, b) => binary(col, a, b, vars, Operation::greater),
        GreaterEqual(col, a, b) => binary(col, a, b, vars, Operation::greater_equal),
        And(col, a, b) => binary(col, a, b, vars, Operation::and),
        Or(col, a, b) => binary(col, a, b, vars, Operation::or),
    }
}

fn unary(
    col: &Column,
    a: &Expression,
    vars: &mut Var,
    op: fn(Val) -> Result<Val>,
) -> Result<Val> {
    let a = eval(a, vars)?;
    at(op(a), col)
}

fn binary(
    col: &Column,
    a: &Expression,
    b: &Expression,
    vars: &mut Var,
    op: fn(Val, Val) -> Result<Val>,
) -> Result<Val> {
    let a = eval(a, vars)?;
    let b = eval(b, vars)?;
    at(op(a, b), col)
}

fn fetch(ident: &Ident, vars: &mut Var) -> Result<Val> {
    Ok(vars.fetch(ident.name()))
}

/// A parenthesized name is a built-in call if the name is known, an
/// element fetch if the array exists, and undefined otherwise. Arrays
/// come to exist through DIM or assignment, never through a fetch.
fn call(ident: &Ident, args: &[Expression], vars: &mut Var) -> Result<Val> {
    let name = ident.name();
    let mut vals: Vec<Val> = Vec::with_capacity(args.len());
    for arg in args {
        vals.push(eval(arg, vars)?);
    }
    if Function::is_function(name) {
        Function::call(name, vals)
    } else if vars.is_array(name) {
        let mut subs: Vec<usize> = Vec::with_capacity(vals.len());
        for val in &vals {
            subs.push(val.as_subscript()?);
        }
        vars.fetch_array(name, subs)
    } else {
        Err(error!(UndefinedFunction).with_message(name.to_string()))
    }
}

// Tag the error with the operator's column unless a deeper
// evaluation already placed one.
fn at(result: Result<Val>, col: &Column) -> Result<Val> {
    result.map_err(|e| {
        if e.column() == (0..0) {
            e.in_column(col)
        } else {
            e
        }
    })
}
