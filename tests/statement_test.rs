mod common;
use basic::mach::{Session, Val};
use common::*;

#[test]
fn test_for_loop() {
    let output = run(&["10 FOR I = 1 TO 3", "20 PRINT I", "30 NEXT I", "RUN"]);
    assert_eq!(output, "1\n2\n3\n");
}

#[test]
fn test_for_loop_negative_step() {
    let output = run(&["10 FOR I = 3 TO 1 STEP -1", "20 PRINT I", "30 NEXT I", "RUN"]);
    assert_eq!(output, "3\n2\n1\n");
}

#[test]
fn test_for_loop_always_runs_once() {
    let output = run(&["10 FOR I = 3 TO 0", "20 PRINT I", "30 NEXT I", "RUN"]);
    assert_eq!(output, "3\n");
}

#[test]
fn test_nested_for_loops() {
    let output = run(&[
        "10 FOR I = 1 TO 2",
        "20 FOR J = 8 TO 9",
        "30 PRINT I;J",
        "40 NEXT J",
        "50 NEXT I",
        "RUN",
    ]);
    assert_eq!(output, "18\n19\n28\n29\n");
}

#[test]
fn test_next_without_for() {
    let output = run(&["10 NEXT I", "RUN"]);
    assert_eq!(output, "NEXT WITHOUT FOR IN 10; I\n");
}

#[test]
fn test_goto() {
    let output = run(&[
        "10 PRINT 1",
        "20 GOTO 40",
        "30 PRINT 2",
        "40 PRINT 3",
        "RUN",
    ]);
    assert_eq!(output, "1\n3\n");
}

#[test]
fn test_goto_undefined_line() {
    // The failed run does not take the session down with it.
    let output = run(&["10 GOTO 99", "RUN", "PRINT 7"]);
    assert_eq!(output, "UNDEFINED LINE IN 10; 99\n7\n");
}

#[test]
fn test_gosub_return() {
    let output = run(&[
        "10 GOSUB 40",
        "20 PRINT 2",
        "30 END",
        "40 PRINT 1",
        "50 RETURN",
        "RUN",
    ]);
    assert_eq!(output, "1\n2\n");
}

#[test]
fn test_return_without_gosub() {
    let output = run(&["10 RETURN", "RUN"]);
    assert_eq!(output, "RETURN WITHOUT GOSUB IN 10\n");
}

#[test]
fn test_gosub_from_last_line_completes() {
    let output = run(&[
        "10 GOTO 40",
        "20 PRINT 1",
        "30 RETURN",
        "40 GOSUB 20",
        "RUN",
    ]);
    assert_eq!(output, "1\n");
}

#[test]
fn test_end_stops_run() {
    let output = run(&["10 PRINT 1", "20 END", "30 PRINT 2", "RUN"]);
    assert_eq!(output, "1\n");
}

#[test]
fn test_if_then_line_number() {
    let output = run(&[
        "10 LET X = 5",
        "20 IF X > 3 THEN 50",
        "30 PRINT \"SMALL\"",
        "40 END",
        "50 PRINT \"BIG\"",
        "RUN",
    ]);
    assert_eq!(output, "BIG\n");
}

#[test]
fn test_if_then_statement() {
    let output = run(&["10 IF 0 THEN PRINT 1", "20 IF 1 THEN PRINT 2", "RUN"]);
    assert_eq!(output, "2\n");
}

#[test]
fn test_print_separators() {
    let output = run(&["10 PRINT 1;2", "20 PRINT 3,4", "RUN"]);
    assert_eq!(output, "12\n3\t4\n");
}

#[test]
fn test_print_trailing_semicolon() {
    let output = run(&["10 PRINT 1;", "20 PRINT 2", "RUN"]);
    assert_eq!(output, "12\n");
}

#[test]
fn test_dim_and_subscripts() {
    let output = run(&[
        "10 DIM A(5)",
        "20 LET A(3) = 7",
        "30 PRINT A(3)",
        "40 PRINT A(1)",
        "RUN",
    ]);
    assert_eq!(output, "7\n0\n");
}

#[test]
fn test_subscript_out_of_range() {
    let output = run(&["10 DIM A(5)", "20 LET A(6) = 1", "RUN"]);
    assert_eq!(output, "SUBSCRIPT OUT OF RANGE IN 20\n");
}

#[test]
fn test_rem_is_ignored() {
    let output = run(&["10 REM this is not = executable + at all", "20 PRINT 1", "RUN"]);
    assert_eq!(output, "1\n");
}

#[test]
fn test_error_stops_run_but_keeps_vars() {
    let mut session = Session::new();
    let mut con = TestConsole::new();
    enter(&mut session, &mut con, "10 LET X = 5");
    enter(&mut session, &mut con, "20 PRINT 1");
    enter(&mut session, &mut con, "30 LET Y = \"A\" + 1");
    enter(&mut session, &mut con, "40 PRINT 2");
    enter(&mut session, &mut con, "RUN");
    assert!(con.output.starts_with("1\nTYPE MISMATCH IN 30"));
    assert!(!con.output.contains('2'));
    // The partial environment is still there to inspect.
    assert_eq!(session.runner().vars().fetch(&"X".into()), Val::Number(5.0));
}

#[test]
fn test_interrupt_between_statements() {
    use basic::lang::Line;
    use basic::mach::{Console, Outcome, Program, Runner};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    // Raises the break flag from inside PRINT, the way a Ctrl-C
    // handler would while the program runs.
    struct BreakingConsole {
        output: String,
        flag: Arc<AtomicBool>,
    }

    impl Console for BreakingConsole {
        fn print(&mut self, text: &str) {
            self.output.push_str(text);
            self.flag.store(true, Ordering::SeqCst);
        }

        fn input(&mut self, _prompt: &str) -> Option<String> {
            None
        }
    }

    let mut program = Program::new();
    for s in &["10 LET X = 5", "20 PRINT 1", "30 GOTO 20"] {
        program.insert(Line::new(s).unwrap()).unwrap();
    }
    let mut runner = Runner::new();
    let mut con = BreakingConsole {
        output: String::new(),
        flag: runner.interrupt_flag(),
    };
    let outcome = runner.run(&program, &mut con);
    assert!(matches!(outcome, Outcome::Aborted));
    // The break lands after line 20 finishes and before line 30 runs,
    // and the partial environment stays inspectable.
    assert_eq!(con.output, "1\n");
    assert_eq!(runner.vars().fetch(&"X".into()), Val::Number(5.0));
}

#[test]
fn test_run_resets_environment() {
    let mut session = Session::new();
    let mut con = TestConsole::new();
    enter(&mut session, &mut con, "LET X = 9");
    enter(&mut session, &mut con, "10 PRINT X");
    enter(&mut session, &mut con, "RUN");
    assert_eq!(con.output, "0\n");
}
