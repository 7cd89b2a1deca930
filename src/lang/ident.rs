use std::rc::Rc;

// Used in both Token and Ast. The variant records the trailing sigil,
// which fixes the kind of value the name may hold.

#[derive(Debug, PartialEq, Hash, Clone)]
pub enum Ident {
    /// No sigil; holds a Number.
    Plain(Rc<str>),
    /// Trailing `$`; holds a String.
    String(Rc<str>),
    /// Trailing `%`; holds a Number, stored rounded.
    Integer(Rc<str>),
}

impl Ident {
    /// The full name including the sigil.
    pub fn name(&self) -> &Rc<str> {
        use Ident::*;
        match self {
            Plain(s) | String(s) | Integer(s) => s,
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
