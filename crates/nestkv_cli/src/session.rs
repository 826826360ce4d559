//! Shell session: executes parsed commands against one store.

use crate::command::{Command, HELP};
use crate::error::ShellError;
use clap::ValueEnum;
use nestkv_core::{StatsSnapshot, Store};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Output format for `STATS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `name: value` line per counter.
    #[default]
    Text,
    /// A single JSON object.
    Json,
}

/// What the session should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// End the session.
    Exit,
}

/// Counts reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Input lines read, including blank lines and comments.
    pub lines: usize,
    /// Lines that produced an `ERR` or `NO TRANSACTION` reply.
    pub errors: usize,
}

/// Stats as printed by `STATS --format json`.
#[derive(Debug, Serialize)]
struct StatsReport {
    depth: usize,
    base_len: usize,
    reads: u64,
    read_misses: u64,
    writes: u64,
    deletes: u64,
    transactions_started: u64,
    transactions_committed: u64,
    transactions_rolled_back: u64,
    rejected_control_calls: u64,
}

impl StatsReport {
    fn new(store: &Store, stats: StatsSnapshot) -> Self {
        Self {
            depth: store.depth(),
            base_len: store.base_len(),
            reads: stats.reads,
            read_misses: stats.read_misses,
            writes: stats.writes,
            deletes: stats.deletes,
            transactions_started: stats.transactions_started,
            transactions_committed: stats.transactions_committed,
            transactions_rolled_back: stats.transactions_rolled_back,
            rejected_control_calls: stats.rejected_control_calls,
        }
    }
}

/// A shell session over one store.
pub struct Session<W: Write> {
    store: Store,
    out: W,
    format: OutputFormat,
    stop_on_error: bool,
}

impl<W: Write> Session<W> {
    /// Creates a session writing replies to `out`.
    pub fn new(store: Store, out: W, format: OutputFormat) -> Self {
        Self {
            store,
            out,
            format,
            stop_on_error: false,
        }
    }

    /// Sets whether the first failed line ends the session with an error.
    #[must_use]
    pub fn stop_on_error(mut self, value: bool) -> Self {
        self.stop_on_error = value;
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Consumes the session, returning the output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads and executes lines until `EXIT` or end of input.
    ///
    /// # Errors
    ///
    /// Returns I/O errors immediately. A line that is not valid UTF-8 is
    /// reported like a parse error. With `stop_on_error`, also returns the
    /// first parse error or rejected commit/rollback, after printing its reply.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<Summary, ShellError> {
        let mut summary = Summary::default();

        for line in input.split(b'\n') {
            let mut line = line?;
            summary.lines += 1;
            if line.last() == Some(&b'\r') {
                line.pop();
            }

            let result = String::from_utf8(line)
                .map_err(ShellError::from)
                .and_then(|line| Command::parse(&line))
                .and_then(|parsed| match parsed {
                    Some(command) => self.execute(&command),
                    None => Ok(Flow::Continue),
                });

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    summary.errors += 1;
                    debug!(line = summary.lines, error = %err, "command failed");
                    writeln!(self.out, "{}", err.reply())?;
                    if self.stop_on_error {
                        self.out.flush()?;
                        return Err(err);
                    }
                }
            }
        }

        if self.store.in_transaction() {
            warn!(
                depth = self.store.depth(),
                "session ended with open transactions, discarding them"
            );
        }
        self.out.flush()?;
        Ok(summary)
    }

    /// Executes one command and writes its reply.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Store`] when a commit or rollback is rejected,
    /// and I/O or JSON errors from writing the reply. A `GET` miss is a
    /// normal reply, not an error.
    pub fn execute(&mut self, command: &Command) -> Result<Flow, ShellError> {
        match command {
            Command::Get(key) => match self.store.get(key) {
                Ok(value) => writeln!(self.out, "{value}")?,
                Err(err) if err.is_not_found() => writeln!(self.out, "NOT FOUND")?,
                Err(err) => return Err(err.into()),
            },
            Command::Set(key, value) => {
                self.store.set(key.as_str(), value.as_str());
                self.ok()?;
            }
            Command::Delete(key) => {
                self.store.delete(key.as_str());
                self.ok()?;
            }
            Command::Begin => {
                self.store.start_transaction();
                self.ok()?;
            }
            Command::Commit => {
                self.store.commit()?;
                self.ok()?;
            }
            Command::Rollback => {
                self.store.rollback()?;
                self.ok()?;
            }
            Command::Depth => writeln!(self.out, "{}", self.store.depth())?,
            Command::Stats => self.write_stats()?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn ok(&mut self) -> Result<(), ShellError> {
        writeln!(self.out, "OK")?;
        Ok(())
    }

    fn write_stats(&mut self) -> Result<(), ShellError> {
        let report = StatsReport::new(&self.store, self.store.stats());
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, &report)?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                writeln!(self.out, "depth: {}", report.depth)?;
                writeln!(self.out, "base_len: {}", report.base_len)?;
                writeln!(self.out, "reads: {}", report.reads)?;
                writeln!(self.out, "read_misses: {}", report.read_misses)?;
                writeln!(self.out, "writes: {}", report.writes)?;
                writeln!(self.out, "deletes: {}", report.deletes)?;
                writeln!(
                    self.out,
                    "transactions_started: {}",
                    report.transactions_started
                )?;
                writeln!(
                    self.out,
                    "transactions_committed: {}",
                    report.transactions_committed
                )?;
                writeln!(
                    self.out,
                    "transactions_rolled_back: {}",
                    report.transactions_rolled_back
                )?;
                writeln!(
                    self.out,
                    "rejected_control_calls: {}",
                    report.rejected_control_calls
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(script: &str) -> (String, Summary) {
        let mut session = Session::new(Store::new(), Vec::new(), OutputFormat::Text);
        let summary = session.run(script.as_bytes()).unwrap();
        (String::from_utf8(session.into_output()).unwrap(), summary)
    }

    #[test]
    fn nested_delete_rolled_back() {
        let (out, summary) = run_script(
            "SET k v1\n\
             BEGIN\n\
             SET k v2\n\
             BEGIN\n\
             DELETE k\n\
             GET k\n\
             ROLLBACK\n\
             GET k\n\
             COMMIT\n\
             GET k\n",
        );

        assert_eq!(
            out,
            "OK\nOK\nOK\nOK\nOK\nNOT FOUND\nOK\nv2\nOK\nv2\n"
        );
        assert_eq!(summary.lines, 10);
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn unmatched_control_calls_reply_and_continue() {
        let (out, summary) = run_script("COMMIT\nROLLBACK\nDEPTH\n");
        assert_eq!(out, "NO TRANSACTION\nNO TRANSACTION\n0\n");
        assert_eq!(summary.errors, 2);
    }

    #[test]
    fn parse_errors_reply_and_continue() {
        let (out, summary) = run_script("FROB\n# comment\n\nSET a 1\nGET a\n");
        assert_eq!(out, "ERR unknown command: FROB\nOK\n1\n");
        assert_eq!(summary.lines, 5);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn exit_stops_reading() {
        let (out, summary) = run_script("SET a 1\nEXIT\nSET b 2\n");
        assert_eq!(out, "OK\n");
        assert_eq!(summary.lines, 2);
    }

    #[test]
    fn stop_on_error_returns_first_failure() {
        let mut session =
            Session::new(Store::new(), Vec::new(), OutputFormat::Text).stop_on_error(true);
        let result = session.run("BEGIN\nCOMMIT\nCOMMIT\nSET a 1\n".as_bytes());

        assert!(matches!(result, Err(ShellError::Store(_))));
        assert!(!session.store().contains("a"));
        let out = String::from_utf8(session.into_output()).unwrap();
        assert_eq!(out, "OK\nOK\nNO TRANSACTION\n");
    }

    #[test]
    fn invalid_utf8_line_replies_and_continues() {
        let mut session = Session::new(Store::new(), Vec::new(), OutputFormat::Text);
        let summary = session
            .run(&b"SET a 1\nSET b \xff\xfe\nGET a\n"[..])
            .unwrap();

        assert!(!session.store().contains("b"));
        let out = String::from_utf8(session.into_output()).unwrap();
        assert_eq!(out, "OK\nERR line is not valid UTF-8\n1\n");
        assert_eq!(summary.lines, 3);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let (out, summary) = run_script("SET a 1\r\nGET a\r\n");
        assert_eq!(out, "OK\n1\n");
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn stop_on_error_aborts_on_parse_error() {
        let mut session =
            Session::new(Store::new(), Vec::new(), OutputFormat::Text).stop_on_error(true);
        let result = session.run("SET a 1\nFROB\nSET b 2\n".as_bytes());

        match result {
            Err(ShellError::UnknownCommand(word)) => assert_eq!(word, "FROB"),
            other => panic!("expected UnknownCommand, got {other:?}"),
        }
        assert!(session.store().contains("a"));
        assert!(!session.store().contains("b"));
        let out = String::from_utf8(session.into_output()).unwrap();
        assert_eq!(out, "OK\nERR unknown command: FROB\n");
    }

    #[test]
    fn stats_as_json() {
        let mut session = Session::new(Store::new(), Vec::new(), OutputFormat::Json);
        session.run("SET a 1\nBEGIN\nSTATS\n".as_bytes()).unwrap();

        let out = String::from_utf8(session.into_output()).unwrap();
        let json_line = out.lines().nth(2).unwrap();
        let value: serde_json::Value = serde_json::from_str(json_line).unwrap();
        assert_eq!(value["depth"], 1);
        assert_eq!(value["base_len"], 1);
        assert_eq!(value["writes"], 1);
        assert_eq!(value["transactions_started"], 1);
    }

    #[test]
    fn stats_as_text() {
        let (out, _) = run_script("GET missing\nSTATS\n");
        assert!(out.contains("reads: 1\n"));
        assert!(out.contains("read_misses: 1\n"));
        assert!(out.contains("depth: 0\n"));
    }
}
