use crate::error;
use crate::lang::{Error, LineNumber, MaxValue};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// A runtime value. BASIC is weakly typed between numbers written
/// differently, but Number and String never mix implicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Number(f64),
    String(Rc<str>),
}

impl Val {
    /// Anything nonzero is true; relational operators produce -1 and 0.
    pub fn is_true(&self) -> Result<bool> {
        match self {
            Val::Number(n) => Ok(*n != 0.0),
            Val::String(_) => Err(error!(TypeMismatch; "EXPECTED NUMBER")),
        }
    }

    pub fn as_number(&self) -> Result<f64> {
        match self {
            Val::Number(n) => Ok(*n),
            Val::String(_) => Err(error!(TypeMismatch; "EXPECTED NUMBER")),
        }
    }

    /// A jump target: a number that rounds to an existing-range line.
    pub fn as_line_number(&self) -> Result<u16> {
        let n = self.as_number()?.round();
        if n >= 0.0 && n <= f64::from(LineNumber::max_value()) {
            Ok(n as u16)
        } else {
            Err(error!(UndefinedLine; "INVALID LINE NUMBER"))
        }
    }

    pub fn as_subscript(&self) -> Result<usize> {
        let n = self.as_number()?.round();
        if n >= 0.0 && n <= f64::from(u16::max_value()) {
            Ok(n as usize)
        } else {
            Err(error!(SubscriptOutOfRange))
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            // Whole numbers print without a decimal point.
            Val::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Val::String(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Val::Number(3.0).to_string(), "3");
        assert_eq!(Val::Number(-1.0).to_string(), "-1");
        assert_eq!(Val::Number(3.5).to_string(), "3.5");
        assert_eq!(Val::String("HI".into()).to_string(), "HI");
    }

    #[test]
    fn test_line_number_conversion() {
        assert_eq!(Val::Number(100.2).as_line_number().unwrap(), 100);
        assert!(Val::Number(-1.0).as_line_number().is_err());
        assert!(Val::String("10".into()).as_line_number().is_err());
    }
}
