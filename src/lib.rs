//! # RETRO BASIC
//!
//! An interactive BASIC of the line-number era: type numbered statements
//! to build a program, `RUN` it, `LIST` it, `SAVE` and `LOAD` it.
//!
//! ```text
//! RETRO BASIC
//! READY.
//! █
//! ```
//!
//! The [`lang`] module turns text into tokens and statements.
//! The [`mach`] module stores and executes the program.

pub mod lang;
pub mod mach;
