use super::{eval::eval, Program, Stack, Val, Var};
use crate::error;
use crate::lang::{Error, Expression, LineNumber, Statement, Variable};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// Where the interpreter's output goes and its INPUT replies come from.
/// The terminal front-end supplies the real one; tests supply a buffer.
pub trait Console {
    fn print(&mut self, text: &str);
    /// `None` means the read was interrupted or closed.
    fn input(&mut self, prompt: &str) -> Option<String>;
}

/// How a run ended. Cancellation is an outcome, not an error.
#[derive(Debug)]
pub enum Outcome {
    Completed,
    Aborted,
    Failed(Error),
}

/// Saved state for one active FOR loop.
#[derive(Debug)]
struct Frame {
    var: Rc<str>,
    limit: f64,
    step: f64,
    body: u16,
}

/// What a statement asks of the program counter.
enum Flow {
    Advance,
    Jump(u16),
    Halt,
    Interrupt,
}

/// ## Execution engine
///
/// Owns the variable environment and both control stacks for the
/// lifetime of one run. `run` resets everything; afterwards the
/// environment stays queryable, complete or not.
pub struct Runner {
    vars: Var,
    returns: Stack<LineNumber>,
    frames: Stack<Frame>,
    interrupted: Arc<AtomicBool>,
}

impl Default for Runner {
    fn default() -> Runner {
        Runner {
            vars: Var::new(),
            returns: Stack::new("GOSUB STACK OVERFLOW"),
            frames: Stack::new("FOR STACK OVERFLOW"),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Runner {
    pub fn new() -> Runner {
        Runner::default()
    }

    /// Shared flag a Ctrl-C handler may set; polled between statements.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn vars(&self) -> &Var {
        &self.vars
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.returns.clear();
        self.frames.clear();
    }

    /// Run the stored program from its first line to an outcome.
    pub fn run(&mut self, program: &Program, con: &mut dyn Console) -> Outcome {
        self.clear();
        self.interrupted.store(false, Ordering::SeqCst);
        let mut pc = match program.first_line() {
            Some(n) => n,
            None => return Outcome::Completed,
        };
        loop {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                return Outcome::Aborted;
            }
            let statement = match program.line(pc) {
                Some(line) => match line.statement() {
                    Ok(statement) => statement,
                    Err(e) => return Outcome::Failed(e),
                },
                None => return Outcome::Failed(error!(InternalError, Some(pc))),
            };
            match self.statement(&statement, Some(pc), program, con) {
                Ok(Flow::Advance) => match program.next_line(pc) {
                    Some(n) => pc = n,
                    None => return Outcome::Completed,
                },
                Ok(Flow::Jump(n)) => pc = n,
                Ok(Flow::Halt) => return Outcome::Completed,
                Ok(Flow::Interrupt) => return Outcome::Aborted,
                Err(e) => {
                    let e = if e.line_number().is_none() {
                        e.in_line_number(Some(pc))
                    } else {
                        e
                    };
                    return Outcome::Failed(e);
                }
            }
        }
    }

    /// Execute one unnumbered statement against the persisting
    /// environment. Control transfer makes no sense without a stored
    /// program counter and is rejected.
    pub fn immediate(&mut self, statement: &Statement, con: &mut dyn Console) -> Result<()> {
        if Self::transfers_control(statement) {
            return Err(error!(IllegalDirect));
        }
        let empty = Program::new();
        self.statement(statement, None, &empty, con).map(|_| ())
    }

    fn transfers_control(statement: &Statement) -> bool {
        use Statement::*;
        match statement {
            Goto(..) | Gosub(..) | Return(..) | For(..) | Next(..) => true,
            If(_, _, consequent) => Self::transfers_control(consequent),
            _ => false,
        }
    }

    fn statement(
        &mut self,
        statement: &Statement,
        pc: LineNumber,
        program: &Program,
        con: &mut dyn Console,
    ) -> Result<Flow> {
        use Statement::*;
        match statement {
            Dim(_, ident, dims) => {
                let subs = self.subscripts(dims)?;
                self.vars.dimension_array(ident.name(), subs)?;
                Ok(Flow::Advance)
            }
            End(_) => Ok(Flow::Halt),
            For(_, ident, start, limit, step) => {
                let start = eval(start, &mut self.vars)?.as_number()?;
                let limit = eval(limit, &mut self.vars)?.as_number()?;
                let step = match step {
                    Some(expr) => eval(expr, &mut self.vars)?.as_number()?,
                    None => 1.0,
                };
                self.vars.store(ident.name(), Val::Number(start))?;
                if let Some(body) = pc.and_then(|n| program.next_line(n)) {
                    self.frames.push(Frame {
                        var: ident.name().clone(),
                        limit,
                        step,
                        body,
                    })?;
                }
                Ok(Flow::Advance)
            }
            Gosub(_, expr) => {
                let target = self.target(expr, program)?;
                let here = pc.ok_or_else(|| error!(IllegalDirect))?;
                self.returns.push(program.next_line(here))?;
                Ok(Flow::Jump(target))
            }
            Goto(_, expr) => Ok(Flow::Jump(self.target(expr, program)?)),
            If(_, predicate, consequent) => {
                if eval(predicate, &mut self.vars)?.is_true()? {
                    self.statement(consequent, pc, program, con)
                } else {
                    Ok(Flow::Advance)
                }
            }
            Input(_, prompt, variables) => self.input(prompt.as_deref(), variables, con),
            Let(_, variable, expr) => {
                let value = eval(expr, &mut self.vars)?;
                self.assign(variable, value)?;
                Ok(Flow::Advance)
            }
            Next(_, ident) => {
                let (limit, step, body) = match self.frames.last() {
                    Some(frame) if frame.var == *ident.name() => {
                        (frame.limit, frame.step, frame.body)
                    }
                    Some(_) | None => {
                        return Err(error!(NextWithoutFor).with_message(ident.name().to_string()))
                    }
                };
                let value = self.vars.fetch(ident.name()).as_number()? + step;
                self.vars.store(ident.name(), Val::Number(value))?;
                let continuing = if step >= 0.0 {
                    value <= limit
                } else {
                    value >= limit
                };
                if continuing {
                    Ok(Flow::Jump(body))
                } else {
                    self.frames.pop();
                    Ok(Flow::Advance)
                }
            }
            Print(_, items, linefeed) => {
                let mut out = String::new();
                for item in items {
                    out.push_str(&eval(item, &mut self.vars)?.to_string());
                }
                if *linefeed {
                    out.push('\n');
                }
                con.print(&out);
                Ok(Flow::Advance)
            }
            Rem(_) => Ok(Flow::Advance),
            Return(_) => match self.returns.pop() {
                Some(Some(n)) => Ok(Flow::Jump(n)),
                // GOSUB from the last line; returning past the end
                // completes the run.
                Some(None) => Ok(Flow::Halt),
                None => Err(error!(ReturnWithoutGosub)),
            },
        }
    }

    fn target(&mut self, expr: &Expression, program: &Program) -> Result<u16> {
        let target = eval(expr, &mut self.vars)?.as_line_number()?;
        if program.contains(target) {
            Ok(target)
        } else {
            Err(error!(UndefinedLine).with_message(target.to_string()))
        }
    }

    fn subscripts(&mut self, exprs: &[Expression]) -> Result<Vec<usize>> {
        let mut subs: Vec<usize> = Vec::with_capacity(exprs.len());
        for expr in exprs {
            subs.push(eval(expr, &mut self.vars)?.as_subscript()?);
        }
        Ok(subs)
    }

    fn assign(&mut self, variable: &Variable, value: Val) -> Result<()> {
        match variable {
            Variable::Unary(_, ident) => self.vars.store(ident.name(), value),
            Variable::Array(_, ident, dims) => {
                let subs = self.subscripts(dims)?;
                self.vars.store_array(ident.name(), subs, value)
            }
        }
    }

    fn input(
        &mut self,
        prompt: Option<&str>,
        variables: &[Variable],
        con: &mut dyn Console,
    ) -> Result<Flow> {
        let prompt = match prompt {
            Some(p) => format!("{}? ", p),
            None => "? ".to_string(),
        };
        let reply = match con.input(&prompt) {
            Some(reply) => reply,
            None => return Ok(Flow::Interrupt),
        };
        // A single string variable takes the whole reply so commas
        // may appear in it; otherwise fields are comma separated.
        let fields: Vec<&str> = if variables.len() == 1 {
            vec![reply.trim()]
        } else {
            reply.split(',').map(str::trim).collect()
        };
        if fields.len() != variables.len() {
            return Err(error!(TypeMismatch; "WRONG NUMBER OF INPUT VALUES"));
        }
        for (variable, field) in variables.iter().zip(fields) {
            let name = match variable {
                Variable::Unary(_, ident) | Variable::Array(_, ident, _) => ident.name(),
            };
            let value = if name.ends_with('$') {
                Val::String(field.trim_matches('"').into())
            } else {
                match field.parse::<f64>() {
                    Ok(n) => Val::Number(n),
                    Err(_) => {
                        return Err(error!(TypeMismatch; "EXPECTED NUMERIC INPUT"));
                    }
                }
            };
            self.assign(variable, value)?;
        }
        Ok(Flow::Advance)
    }
}
