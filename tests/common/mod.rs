use basic::mach::{Action, Console, Outcome, Session};
use std::collections::VecDeque;

/// Console that collects output and serves scripted INPUT replies.
pub struct TestConsole {
    pub output: String,
    pub replies: VecDeque<String>,
}

impl TestConsole {
    pub fn new() -> TestConsole {
        TestConsole {
            output: String::new(),
            replies: VecDeque::new(),
        }
    }

    pub fn reply(&mut self, s: &str) {
        self.replies.push_back(s.to_string());
    }
}

impl Console for TestConsole {
    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn input(&mut self, prompt: &str) -> Option<String> {
        self.output.push_str(prompt);
        self.replies.pop_front()
    }
}

/// Enter one line, folding errors and outcomes into the output the
/// way the terminal shows them.
pub fn enter(session: &mut Session, con: &mut TestConsole, source: &str) {
    match session.enter(source, con) {
        Ok(Action::Ran(Outcome::Failed(error))) => con.output.push_str(&format!("{}\n", error)),
        Ok(Action::Ran(Outcome::Aborted)) => con.output.push_str("BREAK\n"),
        Ok(Action::Ran(Outcome::Completed)) | Ok(Action::Continue) | Ok(Action::Exit) => {}
        Err(error) => con.output.push_str(&format!("{}\n", error)),
    }
}

/// Run a whole scripted session and return everything it printed.
pub fn run(sources: &[&str]) -> String {
    let mut session = Session::new();
    let mut con = TestConsole::new();
    for source in sources {
        enter(&mut session, &mut con, source);
    }
    con.output
}
