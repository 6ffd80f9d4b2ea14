//! Reporting sinks for finished runs.

use std::fmt;
use std::io::Write;

use log::info;
use serde::Serialize;

use crate::accuracy::{RunReport, TrialSummary};
use crate::error::Result;

/// Which pass produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunKind {
    Trial(usize),
    Grid,
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunKind::Trial(t) => write!(f, "trial {}", t),
            RunKind::Grid => write!(f, "grid"),
        }
    }
}

/// Receives the statistics of completed runs.
pub trait ReportSink {
    fn run_finished(&mut self, kind: RunKind, report: &RunReport) -> Result<()>;

    fn trials_finished(&mut self, summary: &TrialSummary) -> Result<()>;
}

fn format_row<T: fmt::Display>(values: &[T], precision: Option<usize>) -> String {
    let cells: Vec<String> = values
        .iter()
        .map(|v| match precision {
            Some(p) => format!("{:.*}", p, v),
            None => v.to_string(),
        })
        .collect();
    format!("[{}]", cells.join(", "))
}

/// Human-readable text, one block per run.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ReportSink for TextSink<W> {
    fn run_finished(&mut self, kind: RunKind, report: &RunReport) -> Result<()> {
        writeln!(self.out, "[{}] The number of queries per layer are:", kind)?;
        writeln!(self.out, "{}", format_row(&report.query_counts, None))?;
        writeln!(
            self.out,
            "[{}] The percentage of correct predictions per layer is:",
            kind
        )?;
        writeln!(self.out, "{}", format_row(&report.accuracy, Some(2)))?;
        Ok(())
    }

    fn trials_finished(&mut self, summary: &TrialSummary) -> Result<()> {
        writeln!(
            self.out,
            "The mean percentage of correct predictions per layer is:"
        )?;
        writeln!(self.out, "{}", format_row(&summary.mean_accuracy, Some(2)))?;
        Ok(())
    }
}

#[derive(Serialize)]
struct RunLine<'a> {
    run: RunKind,
    #[serde(flatten)]
    report: &'a RunReport,
}

#[derive(Serialize)]
struct MeanLine<'a> {
    run: &'static str,
    trials: usize,
    mean_accuracy: &'a [f64],
}

/// One JSON object per line.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonSink<W> {
    fn run_finished(&mut self, kind: RunKind, report: &RunReport) -> Result<()> {
        serde_json::to_writer(&mut self.out, &RunLine { run: kind, report })?;
        writeln!(self.out)?;
        Ok(())
    }

    fn trials_finished(&mut self, summary: &TrialSummary) -> Result<()> {
        let line = MeanLine {
            run: "mean",
            trials: summary.trials.len(),
            mean_accuracy: &summary.mean_accuracy,
        };
        serde_json::to_writer(&mut self.out, &line)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Forwards reports to the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn run_finished(&mut self, kind: RunKind, report: &RunReport) -> Result<()> {
        info!(
            "{}: queries per layer {} accuracy per layer {}",
            kind,
            format_row(&report.query_counts, None),
            format_row(&report.accuracy, Some(2))
        );
        Ok(())
    }

    fn trials_finished(&mut self, summary: &TrialSummary) -> Result<()> {
        info!(
            "mean over {} trials: accuracy per layer {}",
            summary.trials.len(),
            format_row(&summary.mean_accuracy, Some(2))
        );
        Ok(())
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub runs: Vec<(RunKind, RunReport)>,
    pub summaries: Vec<TrialSummary>,
}

impl ReportSink for CollectingSink {
    fn run_finished(&mut self, kind: RunKind, report: &RunReport) -> Result<()> {
        self.runs.push((kind, report.clone()));
        Ok(())
    }

    fn trials_finished(&mut self, summary: &TrialSummary) -> Result<()> {
        self.summaries.push(summary.clone());
        Ok(())
    }
}
