extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use basic::mach::{Action, Console, Outcome, Session};
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::sync::atomic::Ordering;

pub fn main() {
    if let Err(error) = main_loop() {
        eprintln!("{}", error);
    }
}

fn main_loop() -> std::io::Result<()> {
    let mut session = Session::new();
    let interrupted = session.runner().interrupt_flag();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let command = Interface::new("BASIC")?;
    let input = Interface::new("INPUT")?;
    input.set_report_signal(Signal::Interrupt, true);
    command.write_fmt(format_args!("RETRO BASIC\nREADY.\n"))?;

    loop {
        let string = match command.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if !string.trim().is_empty() {
            command.add_history_unique(string.clone());
        }
        let mut con = TermConsole {
            command: &command,
            input: &input,
            io_error: None,
        };
        let result = session.enter(&string, &mut con);
        if let Some(error) = con.io_error {
            return Err(error);
        }
        match result {
            Ok(Action::Continue) => {}
            Ok(Action::Ran(outcome)) => {
                match outcome {
                    Outcome::Completed => {}
                    Outcome::Aborted => bold(&command, "BREAK")?,
                    Outcome::Failed(error) => bold(&command, &error.to_string())?,
                }
                command.write_fmt(format_args!("READY.\n"))?;
            }
            Ok(Action::Exit) => break,
            Err(error) => bold(&command, &error.to_string())?,
        }
    }
    Ok(())
}

fn bold(command: &Interface<DefaultTerminal>, text: &str) -> std::io::Result<()> {
    command.write_fmt(format_args!("{}\n", Style::new().bold().paint(text)))
}

struct TermConsole<'a> {
    command: &'a Interface<DefaultTerminal>,
    input: &'a Interface<DefaultTerminal>,
    io_error: Option<std::io::Error>,
}

impl TermConsole<'_> {
    fn read(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.input.set_prompt(prompt)?;
        match self.input.read_line()? {
            ReadResult::Input(string) => {
                self.input.add_history_unique(string.clone());
                Ok(Some(string))
            }
            ReadResult::Signal(Signal::Interrupt) => {
                self.input.set_buffer("")?;
                self.input.lock_reader().cancel_read_line()?;
                Ok(None)
            }
            ReadResult::Signal(_) | ReadResult::Eof => Ok(None),
        }
    }
}

impl Console for TermConsole<'_> {
    fn print(&mut self, text: &str) {
        if self.io_error.is_some() {
            return;
        }
        if let Err(error) = self.command.write_fmt(format_args!("{}", text)) {
            self.io_error = Some(error);
        }
    }

    fn input(&mut self, prompt: &str) -> Option<String> {
        match self.read(prompt) {
            Ok(reply) => reply,
            Err(error) => {
                self.io_error = Some(error);
                None
            }
        }
    }
}
