use crate::error;
use crate::lang::{Error, Line};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::ops::Bound::{Excluded, Unbounded};
use std::ops::RangeInclusive;
use std::path::Path;

type Result<T> = std::result::Result<T, Error>;

/// ## Program store
///
/// Stored lines keyed by line number, always iterated in ascending
/// order. Inserting an existing number replaces the old line silently;
/// only parseable statements are accepted.

#[derive(Debug, Default)]
pub struct Program {
    source: BTreeMap<u16, Line>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    pub fn clear(&mut self) {
        self.source.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Store a numbered line, replacing any line with the same number.
    /// The statement must parse; a line that does not parse is never
    /// stored.
    pub fn insert(&mut self, line: Line) -> Result<Option<Line>> {
        let number = match line.number() {
            Some(number) => number,
            None => return Err(error!(IllegalDirect; "LINE HAS NO NUMBER")),
        };
        line.statement()?;
        Ok(self.source.insert(number, line))
    }

    pub fn remove(&mut self, number: u16) -> Option<Line> {
        self.source.remove(&number)
    }

    pub fn contains(&self, number: u16) -> bool {
        self.source.contains_key(&number)
    }

    pub fn line(&self, number: u16) -> Option<&Line> {
        self.source.get(&number)
    }

    pub fn first_line(&self) -> Option<u16> {
        self.source.keys().next().copied()
    }

    /// The lowest line number strictly greater than `after`.
    pub fn next_line(&self, after: u16) -> Option<u16> {
        self.source
            .range((Excluded(after), Unbounded))
            .next()
            .map(|(number, _)| *number)
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.source.values()
    }

    /// The stored lines within a range, rendered as source text.
    pub fn list(&self, range: RangeInclusive<u16>) -> impl Iterator<Item = String> + '_ {
        self.source.range(range).map(|(_, line)| line.to_string())
    }

    /// Write every line to a file in ascending order.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path).map_err(disk_error)?;
        for line in self.lines() {
            writeln!(file, "{}", line).map_err(disk_error)?;
        }
        Ok(())
    }

    /// Read a program from a file. Any unparseable or unnumbered line
    /// abandons the whole load; a partially loaded program is never
    /// returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Program> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => error!(FileNotFound),
            _ => disk_error(e),
        })?;
        let mut program = Program::new();
        for (index, source) in BufReader::new(file).lines().enumerate() {
            let source = source.map_err(disk_error)?;
            if source.trim().is_empty() {
                continue;
            }
            let line = Line::new(&source).map_err(|e| in_file(e, index))?;
            if line.is_direct() {
                return Err(in_file(error!(DirectStatementInFile), index));
            }
            program.insert(line).map_err(|e| in_file(e, index))?;
        }
        Ok(program)
    }
}

fn disk_error(error: std::io::Error) -> Error {
    error!(DiskIoError).with_message(error.to_string().to_ascii_uppercase())
}

fn in_file(error: Error, index: usize) -> Error {
    error.with_message(format!("FILE LINE {}", index + 1))
}
