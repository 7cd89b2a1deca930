use crate::error;
use crate::lang::Error;

/// ## Size limited stack
///
/// Underflow is reported by the caller, which knows whether an empty
/// stack means RETURN WITHOUT GOSUB or NEXT WITHOUT FOR.

pub struct Stack<T> {
    overflow_message: &'static str,
    vec: Vec<T>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.vec)
    }
}

impl<T> Stack<T> {
    pub fn new(overflow_message: &'static str) -> Stack<T> {
        Stack {
            overflow_message,
            vec: vec![],
        }
    }

    fn max_len(&self) -> usize {
        u16::max_value() as usize
    }

    pub fn clear(&mut self) {
        self.vec.clear()
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn last(&self) -> Option<&T> {
        self.vec.last()
    }

    pub fn push(&mut self, val: T) -> Result<(), Error> {
        self.vec.push(val);
        if self.vec.len() > self.max_len() {
            Err(error!(OutOfMemory; self.overflow_message))
        } else {
            Ok(())
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        self.vec.pop()
    }
}
