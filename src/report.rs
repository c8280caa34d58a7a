//! Text output of search results.
//!
//! Two line-oriented record formats, one line per (combination, target):
//!
//! ```text
//! succeeded:  <operands in witness order> <target> <postfix expression>
//! failed:     <values ascending> <target>
//! ```
//!
//! and a summary table over a [`Tally`].

use std::fmt;
use std::io::{self, Write};

use crate::search::{CombinationOutcome, Tally};

fn join_values(values: &[i64]) -> String {
    values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}

/// Record line for a reached target, or `None` if `target` was not reached.
///
/// Without a recorded witness only the values and the target are written.
pub fn succeeded_line(outcome: &CombinationOutcome, target: usize) -> Option<String> {
    if !outcome.is_found(target) {
        return None;
    }
    let line = match outcome.witness(target) {
        Some(witness) => format!("{} {}{}", join_values(&witness.operands), target, witness.render()),
        None => format!("{} {}", join_values(&outcome.values), target),
    };
    Some(line)
}

/// Record line for a missed target, or `None` if `target` was reached.
pub fn failed_line(outcome: &CombinationOutcome, target: usize) -> Option<String> {
    if outcome.is_found(target) {
        return None;
    }
    Some(format!("{} {}", join_values(&outcome.values), target))
}

/// Writes succeeded and failed records to two separate sinks.
pub struct RecordWriter<S: Write, F: Write> {
    succeeded: S,
    failed: F,
}

impl<S: Write, F: Write> RecordWriter<S, F> {
    pub fn new(succeeded: S, failed: F) -> Self {
        Self { succeeded, failed }
    }

    /// Writes one line per target of the outcome, to the matching sink.
    pub fn write(&mut self, outcome: &CombinationOutcome) -> io::Result<()> {
        for target in 0..outcome.max_target() {
            if let Some(line) = succeeded_line(outcome, target) {
                writeln!(self.succeeded, "{}", line)?;
            } else if let Some(line) = failed_line(outcome, target) {
                writeln!(self.failed, "{}", line)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.succeeded.flush()?;
        self.failed.flush()
    }

    pub fn into_inner(self) -> (S, F) {
        (self.succeeded, self.failed)
    }
}

/// Per-target summary table.
///
/// ```text
/// i succeeded failed fraction_success
/// 0 0 6 0.000000
/// ...
///
/// total 21 39 0.350000
/// ```
pub struct Summary<'a>(pub &'a Tally);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tally = self.0;
        writeln!(f, "i succeeded failed fraction_success")?;
        for target in 0..tally.max_target() {
            writeln!(
                f,
                "{} {} {} {:.6}",
                target,
                tally.succeeded(target),
                tally.failed(target),
                tally.success_fraction(target)
            )?;
        }
        let (succeeded, failed) = tally.totals();
        let fraction = succeeded as f64 / (succeeded + failed) as f64;
        writeln!(f)?;
        writeln!(f, "total {} {} {:.6}", succeeded, failed, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::search::{Search, SearchConfig};

    #[test]
    fn test_lines() {
        let search = Search::new(SearchConfig::new(4, 2, 10).with_witnesses(true));
        let outcome = search.solve(&[2, 3]);

        assert_eq!(succeeded_line(&outcome, 5).as_deref(), Some("2 3 5 2 3 +"));
        assert_eq!(succeeded_line(&outcome, 1).as_deref(), Some("3 2 1 3 2 -"));
        assert_eq!(succeeded_line(&outcome, 0), None);
        assert_eq!(failed_line(&outcome, 0).as_deref(), Some("2 3 0"));
        assert_eq!(failed_line(&outcome, 6), None);
    }

    #[test]
    fn test_lines_without_witness() {
        let search = Search::new(SearchConfig::new(4, 2, 10));
        let outcome = search.solve(&[3, 2]);
        assert_eq!(succeeded_line(&outcome, 6).as_deref(), Some("2 3 6"));
    }

    #[test]
    fn test_writer() {
        let search = Search::new(SearchConfig::new(4, 2, 7).with_witnesses(true));
        let outcome = search.solve(&[2, 3]);

        let mut writer = RecordWriter::new(Vec::new(), Vec::new());
        writer.write(&outcome).unwrap();
        writer.flush().unwrap();
        let (succeeded, failed) = writer.into_inner();

        let succeeded = String::from_utf8(succeeded).unwrap();
        let failed = String::from_utf8(failed).unwrap();
        assert_eq!(succeeded, "3 2 1 3 2 -\n2 3 5 2 3 +\n2 3 6 2 3 *\n");
        assert_eq!(failed, "2 3 0\n2 3 2\n2 3 3\n2 3 4\n");
    }

    #[test]
    fn test_summary() {
        let search = Search::new(SearchConfig::new(3, 2, 3));
        let report = search.run();
        // {1,2} reaches 1 and 2, {1,3} reaches 2, {2,3} reaches 1
        let text = Summary(&report.tally).to_string();
        let expected = "\
i succeeded failed fraction_success
0 0 3 0.000000
1 2 1 0.666667
2 2 1 0.666667

total 4 5 0.444444
";
        assert_eq!(text, expected);
    }
}
