use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// A flat global namespace for one run. The trailing sigil of a name
/// fixes the kind it may hold: `$` String, `%` rounded Number, otherwise
/// Number. Reading a never-assigned name yields that kind's default.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
    dims: HashMap<Rc<str>, Vec<usize>>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.dims.clear();
    }

    pub fn fetch(&self, var_name: &Rc<str>) -> Val {
        match self.vars.get(var_name) {
            Some(val) => val.clone(),
            None => {
                if var_name.ends_with('$') {
                    Val::String("".into())
                } else {
                    Val::Number(0.0)
                }
            }
        }
    }

    pub fn store(&mut self, var_name: &Rc<str>, value: Val) -> Result<()> {
        if self.vars.len() > u16::max_value() as usize {
            return Err(error!(OutOfMemory));
        }
        if var_name.ends_with('$') {
            self.insert_string(var_name, value)
        } else if var_name.ends_with('%') {
            self.insert_integer(var_name, value)
        } else {
            self.insert_number(var_name, value)
        }
    }

    pub fn is_array(&self, var_name: &Rc<str>) -> bool {
        self.dims.contains_key(var_name)
    }

    pub fn dimension_array(&mut self, var_name: &Rc<str>, dims: Vec<usize>) -> Result<()> {
        if self.dims.contains_key(var_name) {
            return Err(error!(RedimensionedArray));
        }
        self.dims.insert(var_name.clone(), dims);
        Ok(())
    }

    pub fn store_array(&mut self, var_name: &Rc<str>, subs: Vec<usize>, value: Val) -> Result<()> {
        let key = self.build_array_key(var_name, subs)?;
        self.store(&key, value)
    }

    pub fn fetch_array(&mut self, var_name: &Rc<str>, subs: Vec<usize>) -> Result<Val> {
        let key = self.build_array_key(var_name, subs)?;
        Ok(self.fetch(&key))
    }

    // Array cells live in the same map under a subscript-prefixed key.
    // An undimensioned array defaults to one dimension of 10.
    fn build_array_key(&mut self, var_name: &Rc<str>, subs: Vec<usize>) -> Result<Rc<str>> {
        let dimensioned = self
            .dims
            .entry(var_name.clone())
            .or_insert_with(|| vec![10]);
        if dimensioned.len() != subs.len() {
            return Err(error!(SubscriptOutOfRange; "WRONG NUMBER OF SUBSCRIPTS"));
        }
        for (requested, limit) in subs.iter().zip(dimensioned.iter()) {
            if requested > limit {
                return Err(error!(SubscriptOutOfRange));
            }
        }
        let mut key: String = subs.iter().map(|s| format!(",{}", s)).collect();
        key.push_str(&format!(",{}", var_name));
        Ok(key.into())
    }

    fn insert_string(&mut self, var_name: &Rc<str>, value: Val) -> Result<()> {
        match &value {
            Val::String(s) => {
                if s.chars().count() > 255 {
                    return Err(error!(StringTooLong; "MAXIMUM STRING LENGTH IS 255"));
                }
                self.vars.insert(var_name.clone(), value);
                Ok(())
            }
            Val::Number(_) => Err(error!(TypeMismatch; "STRING VARIABLE")),
        }
    }

    fn insert_integer(&mut self, var_name: &Rc<str>, value: Val) -> Result<()> {
        match value {
            Val::Number(n) => {
                self.vars.insert(var_name.clone(), Val::Number(n.round()));
                Ok(())
            }
            Val::String(_) => Err(error!(TypeMismatch; "NUMERIC VARIABLE")),
        }
    }

    fn insert_number(&mut self, var_name: &Rc<str>, value: Val) -> Result<()> {
        match value {
            Val::Number(_) => {
                self.vars.insert(var_name.clone(), value);
                Ok(())
            }
            Val::String(_) => Err(error!(TypeMismatch; "NUMERIC VARIABLE")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;

    #[test]
    fn test_sigil_defaults() {
        let vars = Var::new();
        assert_eq!(vars.fetch(&"A".into()), Val::Number(0.0));
        assert_eq!(vars.fetch(&"A$".into()), Val::String("".into()));
        assert_eq!(vars.fetch(&"A%".into()), Val::Number(0.0));
    }

    #[test]
    fn test_sigil_typing() {
        let mut vars = Var::new();
        assert!(vars.store(&"A$".into(), Val::Number(1.0)).is_err());
        assert!(vars.store(&"A".into(), Val::String("X".into())).is_err());
        vars.store(&"A%".into(), Val::Number(1.6)).unwrap();
        assert_eq!(vars.fetch(&"A%".into()), Val::Number(2.0));
    }

    #[test]
    fn test_arrays() {
        let mut vars = Var::new();
        vars.dimension_array(&"A".into(), vec![5]).unwrap();
        vars.store_array(&"A".into(), vec![3], Val::Number(7.0))
            .unwrap();
        assert_eq!(
            vars.fetch_array(&"A".into(), vec![3]).unwrap(),
            Val::Number(7.0)
        );
        assert!(vars
            .store_array(&"A".into(), vec![6], Val::Number(0.0))
            .is_err());
        assert!(vars.dimension_array(&"A".into(), vec![5]).is_err());
        // Scalar A and array A are distinct.
        assert_eq!(vars.fetch(&"A".into()), Val::Number(0.0));
    }

    #[test]
    fn test_default_dimension() {
        let mut vars = Var::new();
        vars.store_array(&"B".into(), vec![10], Val::Number(1.0))
            .unwrap();
        assert!(vars
            .store_array(&"B".into(), vec![11], Val::Number(1.0))
            .is_err());
    }

    #[quickcheck_macros::quickcheck]
    fn prop_store_fetch_number(n: f64) -> TestResult {
        if n.is_nan() {
            return TestResult::discard();
        }
        let mut vars = Var::new();
        vars.store(&"X".into(), Val::Number(n)).unwrap();
        TestResult::from_bool(vars.fetch(&"X".into()) == Val::Number(n))
    }

    #[quickcheck_macros::quickcheck]
    fn prop_string_sigil_rejects_numbers(n: f64) -> bool {
        let mut vars = Var::new();
        vars.store(&"X$".into(), Val::Number(n)).is_err()
    }
}
