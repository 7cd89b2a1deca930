use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Binary and unary operations on values. Each reports a type mismatch
/// naming the operator when operand kinds are incompatible.
pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        match val {
            Val::Number(n) => Ok(Val::Number(-n)),
            Val::String(_) => Err(error!(TypeMismatch; "CANNOT NEGATE STRING")),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        match val {
            Val::Number(n) => Ok(Val::from_bool(n == 0.0)),
            Val::String(_) => Err(error!(TypeMismatch; "NOT REQUIRES NUMBER")),
        }
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::Number(l.powf(r))),
            _ => Err(error!(TypeMismatch; "^ REQUIRES NUMBERS")),
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::Number(l * r)),
            _ => Err(error!(TypeMismatch; "* REQUIRES NUMBERS")),
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(_), Val::Number(r)) if r == 0.0 => Err(error!(DivisionByZero)),
            (Val::Number(l), Val::Number(r)) => Ok(Val::Number(l / r)),
            _ => Err(error!(TypeMismatch; "/ REQUIRES NUMBERS")),
        }
    }

    /// `+` adds Numbers and concatenates Strings; mixing kinds is an error.
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::Number(l + r)),
            (Val::String(l), Val::String(r)) => {
                let mut s = l.to_string();
                s.push_str(&r);
                Ok(Val::String(s.into()))
            }
            _ => Err(error!(TypeMismatch; "+ REQUIRES MATCHING KINDS")),
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::Number(l - r)),
            _ => Err(error!(TypeMismatch; "- REQUIRES NUMBERS")),
        }
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Self::equal_bool(lhs, rhs, "=")?))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(!Self::equal_bool(lhs, rhs, "<>")?))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Self::less_bool(lhs, rhs, "<")?))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(!Self::less_bool(rhs, lhs, "<=")?))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Self::less_bool(rhs, lhs, ">")?))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(!Self::less_bool(lhs, rhs, ">=")?))
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::from_bool(l != 0.0 && r != 0.0)),
            _ => Err(error!(TypeMismatch; "AND REQUIRES NUMBERS")),
        }
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(Val::from_bool(l != 0.0 || r != 0.0)),
            _ => Err(error!(TypeMismatch; "OR REQUIRES NUMBERS")),
        }
    }

    fn equal_bool(lhs: Val, rhs: Val, op: &'static str) -> Result<bool> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(l == r),
            (Val::String(l), Val::String(r)) => Ok(l == r),
            _ => Err(Error::mismatch(op)),
        }
    }

    fn less_bool(lhs: Val, rhs: Val, op: &'static str) -> Result<bool> {
        match (lhs, rhs) {
            (Val::Number(l), Val::Number(r)) => Ok(l < r),
            // Strings order lexicographically.
            (Val::String(l), Val::String(r)) => Ok(*l < *r),
            _ => Err(Error::mismatch(op)),
        }
    }
}

impl Val {
    fn from_bool(b: bool) -> Val {
        if b {
            Val::Number(-1.0)
        } else {
            Val::Number(0.0)
        }
    }
}

impl Error {
    fn mismatch(op: &'static str) -> Error {
        error!(TypeMismatch).with_message(format!("{} REQUIRES MATCHING KINDS", op))
    }
}
