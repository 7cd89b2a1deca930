use super::Val;
use crate::error;
use crate::lang::Error;
use rand::Rng;

type Result<T> = std::result::Result<T, Error>;

/// ## Built-in functions
///
/// Called by name with already-evaluated arguments. Names not listed
/// here are treated as array references by the evaluator.

pub struct Function {}

const NAMES: [&str; 19] = [
    "ABS", "ATN", "COS", "EXP", "INT", "LOG", "RND", "SGN", "SIN", "SQR", "TAN", "LEN", "ASC",
    "VAL", "CHR$", "STR$", "LEFT$", "RIGHT$", "MID$",
];

impl Function {
    pub fn is_function(name: &str) -> bool {
        NAMES.contains(&name)
    }

    pub fn call(name: &str, args: Vec<Val>) -> Result<Val> {
        match name {
            "ABS" => Self::numeric(args, |n| Ok(n.abs())),
            "ATN" => Self::numeric(args, |n| Ok(n.atan())),
            "COS" => Self::numeric(args, |n| Ok(n.cos())),
            "EXP" => Self::numeric(args, |n| Ok(n.exp())),
            "INT" => Self::numeric(args, |n| Ok(n.floor())),
            "LOG" => Self::numeric(args, |n| {
                if n <= 0.0 {
                    Err(error!(IllegalFunctionCall; "LOG OF NON-POSITIVE NUMBER"))
                } else {
                    Ok(n.ln())
                }
            }),
            "RND" => Self::rnd(args),
            "SGN" => Self::numeric(args, |n| Ok(if n == 0.0 { 0.0 } else { n.signum() })),
            "SIN" => Self::numeric(args, |n| Ok(n.sin())),
            "SQR" => Self::numeric(args, |n| {
                if n < 0.0 {
                    Err(error!(IllegalFunctionCall; "SQR OF NEGATIVE NUMBER"))
                } else {
                    Ok(n.sqrt())
                }
            }),
            "TAN" => Self::numeric(args, |n| Ok(n.tan())),
            "LEN" => match Self::one(args)? {
                Val::String(s) => Ok(Val::Number(s.chars().count() as f64)),
                Val::Number(_) => Err(error!(TypeMismatch; "LEN REQUIRES STRING")),
            },
            "ASC" => match Self::one(args)? {
                Val::String(s) => match s.chars().next() {
                    Some(ch) => Ok(Val::Number(f64::from(u32::from(ch)))),
                    None => Err(error!(IllegalFunctionCall; "ASC OF EMPTY STRING")),
                },
                Val::Number(_) => Err(error!(TypeMismatch; "ASC REQUIRES STRING")),
            },
            "VAL" => match Self::one(args)? {
                Val::String(s) => Ok(Val::Number(s.trim().parse::<f64>().unwrap_or(0.0))),
                Val::Number(_) => Err(error!(TypeMismatch; "VAL REQUIRES STRING")),
            },
            "CHR$" => {
                let n = Self::one(args)?.as_number()?;
                match u32::try_from_f64(n).and_then(std::char::from_u32) {
                    Some(ch) => Ok(Val::String(ch.to_string().into())),
                    None => Err(error!(IllegalFunctionCall; "CHR$ OUT OF RANGE")),
                }
            }
            "STR$" => {
                let val = Self::one(args)?;
                val.as_number()?;
                Ok(Val::String(val.to_string().into()))
            }
            "LEFT$" => {
                let (s, n) = Self::string_and_count(args)?;
                Ok(Val::String(s.chars().take(n).collect::<String>().into()))
            }
            "RIGHT$" => {
                let (s, n) = Self::string_and_count(args)?;
                let skip = s.chars().count().saturating_sub(n);
                Ok(Val::String(s.chars().skip(skip).collect::<String>().into()))
            }
            "MID$" => Self::mid(args),
            _ => Err(error!(UndefinedFunction).with_message(name.to_string())),
        }
    }

    fn one(mut args: Vec<Val>) -> Result<Val> {
        if args.len() != 1 {
            return Err(error!(IllegalFunctionCall; "EXPECTED 1 ARGUMENT"));
        }
        Ok(args.pop().unwrap_or(Val::Number(0.0)))
    }

    fn numeric<F: Fn(f64) -> Result<f64>>(args: Vec<Val>, f: F) -> Result<Val> {
        Ok(Val::Number(f(Self::one(args)?.as_number()?)?))
    }

    fn rnd(args: Vec<Val>) -> Result<Val> {
        // The argument is accepted for compatibility; any positive value
        // yields a fresh uniform number in [0, 1).
        Self::one(args)?.as_number()?;
        Ok(Val::Number(rand::thread_rng().gen::<f64>()))
    }

    fn string_and_count(mut args: Vec<Val>) -> Result<(std::rc::Rc<str>, usize)> {
        if args.len() != 2 {
            return Err(error!(IllegalFunctionCall; "EXPECTED 2 ARGUMENTS"));
        }
        let n = args.pop().map_or(Ok(0.0), |v| v.as_number())?;
        let s = match args.pop() {
            Some(Val::String(s)) => s,
            _ => return Err(error!(TypeMismatch; "EXPECTED STRING")),
        };
        if n < 0.0 {
            return Err(error!(IllegalFunctionCall; "NEGATIVE LENGTH"));
        }
        Ok((s, n as usize))
    }

    fn mid(mut args: Vec<Val>) -> Result<Val> {
        if args.len() != 3 {
            return Err(error!(IllegalFunctionCall; "EXPECTED 3 ARGUMENTS"));
        }
        let len = args.pop().map_or(Ok(0.0), |v| v.as_number())?;
        let start = args.pop().map_or(Ok(0.0), |v| v.as_number())?;
        let s = match args.pop() {
            Some(Val::String(s)) => s,
            _ => return Err(error!(TypeMismatch; "EXPECTED STRING")),
        };
        if start < 1.0 || len < 0.0 {
            return Err(error!(IllegalFunctionCall; "MID$ OUT OF RANGE"));
        }
        let out: String = s
            .chars()
            .skip(start as usize - 1)
            .take(len as usize)
            .collect();
        Ok(Val::String(out.into()))
    }
}

trait TryFromF64: Sized {
    fn try_from_f64(n: f64) -> Option<Self>;
}

impl TryFromF64 for u32 {
    fn try_from_f64(n: f64) -> Option<u32> {
        if n >= 0.0 && n <= f64::from(u32::max_value()) && n.fract() == 0.0 {
            Some(n as u32)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_functions() {
        assert_eq!(
            Function::call("ABS", vec![Val::Number(-3.0)]).unwrap(),
            Val::Number(3.0)
        );
        assert_eq!(
            Function::call("INT", vec![Val::Number(3.7)]).unwrap(),
            Val::Number(3.0)
        );
        assert_eq!(
            Function::call("SGN", vec![Val::Number(-5.0)]).unwrap(),
            Val::Number(-1.0)
        );
        assert!(Function::call("SQR", vec![Val::Number(-1.0)]).is_err());
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(
            Function::call("LEN", vec![Val::String("HELLO".into())]).unwrap(),
            Val::Number(5.0)
        );
        assert_eq!(
            Function::call(
                "LEFT$",
                vec![Val::String("HELLO".into()), Val::Number(2.0)]
            )
            .unwrap(),
            Val::String("HE".into())
        );
        assert_eq!(
            Function::call(
                "MID$",
                vec![
                    Val::String("HELLO".into()),
                    Val::Number(2.0),
                    Val::Number(3.0)
                ]
            )
            .unwrap(),
            Val::String("ELL".into())
        );
        assert_eq!(
            Function::call("VAL", vec![Val::String(" 12.5 ".into())]).unwrap(),
            Val::Number(12.5)
        );
        assert_eq!(
            Function::call("STR$", vec![Val::Number(12.0)]).unwrap(),
            Val::String("12".into())
        );
    }

    #[test]
    fn test_rnd_in_range() {
        for _ in 0..32 {
            let val = Function::call("RND", vec![Val::Number(1.0)]).unwrap();
            match val {
                Val::Number(n) => assert!((0.0..1.0).contains(&n)),
                other => panic!("{:?}", other),
            }
        }
    }

    #[test]
    fn test_undefined_function() {
        let error = Function::call("NOPE", vec![Val::Number(1.0)]).unwrap_err();
        assert_eq!(error.to_string(), "UNDEFINED FUNCTION; NOPE");
    }
}
