//! ## Runtime machinery
//!
//! Everything past the language layer: values, variable memory, the
//! expression evaluator, the execution engine, the program store, and
//! the session that ties them to a console.

mod eval;
mod function;
mod interp;
mod operation;
mod program;
mod session;
mod stack;
mod val;
mod var;

pub use eval::eval;
pub use function::Function;
pub use interp::{Console, Outcome, Runner};
pub use operation::Operation;
pub use program::Program;
pub use session::{Action, Session};
pub use stack::Stack;
pub use val::Val;
pub use var::Var;
