use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use super::sequencer::Sequencer;
use super::source::{ByteSource, FileSource};
use crate::config::{DEFAULT_THREAD_COUNT, WordflipConfig};
use crate::error::{Error, Result};
use crate::slice::{Range, partition, process_range};

/// Knobs for a single run of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub threads: usize,
    pub trailing_space: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREAD_COUNT,
            trailing_space: true,
        }
    }
}

/// What one worker did with its range
#[derive(Debug, Clone, Serialize)]
pub struct RangeReport {
    #[serde(flatten)]
    pub range: Range,
    pub tokens: usize,
    pub elapsed_ms: u64,
}

/// Summary of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub input_bytes: u64,
    pub threads: usize,
    pub ranges: Vec<RangeReport>,
    pub elapsed_ms: u64,
}

struct WorkerOutcome {
    report: RangeReport,
    read_error: Option<Error>,
    commit_error: Option<Error>,
}

/// Reverse `config.input` into `config.output` using `config.threads` workers.
///
/// The input is checked before the output is truncated, so a missing input
/// leaves an existing output file untouched.
pub fn run(config: &WordflipConfig) -> Result<RunReport> {
    config.validate()?;

    let source = FileSource::new(&config.input);
    source.size().map_err(|e| Error::OpenInput {
        path: config.input.clone(),
        source: e,
    })?;

    if same_file(&config.input, &config.output) {
        return Err(Error::invalid(format!(
            "input and output are the same file: {}",
            config.input.display()
        )));
    }

    let file = File::create(&config.output).map_err(|e| Error::CreateOutput {
        path: config.output.clone(),
        source: e,
    })?;
    tracing::debug!("Truncated output {}", config.output.display());

    let (mut report, _) = reverse_source(&source, BufWriter::new(file), config.run_options())?;
    report.output = Some(config.output.clone());
    Ok(report)
}

/// Run the whole pipeline over any seekable source and writable sink.
///
/// Returns the report together with the flushed sink. Ranges whose worker
/// failed are committed empty and reported as [`Error::Incomplete`]; a sink
/// failure is reported as [`Error::SinkWrite`].
pub fn reverse_source<S, W>(source: &S, sink: W, options: RunOptions) -> Result<(RunReport, W)>
where
    S: ByteSource,
    W: Write + Send,
{
    let start_time = Instant::now();

    if options.threads == 0 {
        return Err(Error::invalid("thread count must be a positive integer"));
    }

    let open_error = |e| Error::OpenInput {
        path: source.path().to_path_buf(),
        source: e,
    };
    let input_bytes = source.size().map_err(open_error)?;
    let mut reader = source.open().map_err(open_error)?;
    let ranges = partition(&mut reader, input_bytes, options.threads)?;
    drop(reader);

    for range in &ranges {
        tracing::info!(
            "Worker {}: starting at {} and ending at {}",
            range.index,
            range.start,
            range.end
        );
    }

    let sequencer = Sequencer::new(sink, ranges.len(), options.trailing_space);

    let joined = crossbeam::thread::scope(|s| {
        let handles: Vec<_> = ranges
            .iter()
            .map(|&range| {
                let sequencer = &sequencer;
                s.spawn(move |_| process_and_commit(source, range, sequencer))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    })
    .map_err(|_| Error::Incomplete {
        failed: ranges.iter().map(|r| r.index).collect(),
    })?;

    let mut reports = Vec::with_capacity(ranges.len());
    let mut failed = Vec::new();
    let mut sink_error = None;

    for (range, outcome) in ranges.iter().zip(joined) {
        match outcome {
            Ok(WorkerOutcome {
                report,
                read_error,
                commit_error,
            }) => {
                if read_error.is_some() {
                    failed.push(range.index);
                }
                if let Some(Error::SinkWrite(e)) = commit_error {
                    sink_error.get_or_insert(e);
                }
                reports.push(report);
            }
            Err(_) => {
                tracing::error!("Worker {} panicked", range.index);
                failed.push(range.index);
            }
        }
    }

    let finished = sequencer.finish();
    if let Some(e) = sink_error {
        if !failed.is_empty() {
            tracing::error!("Ranges {:?} also failed to read", failed);
        }
        return Err(Error::SinkWrite(e));
    }
    if !failed.is_empty() {
        return Err(Error::Incomplete { failed });
    }
    let sink = finished?;

    let elapsed = start_time.elapsed();
    tracing::info!("Program completed in {}ms", elapsed.as_millis());

    let report = RunReport {
        input: source.path().to_path_buf(),
        output: None,
        input_bytes,
        threads: options.threads,
        ranges: reports,
        elapsed_ms: elapsed.as_millis() as u64,
    };
    Ok((report, sink))
}

/// Worker body: read and reverse one range, then wait for its turn to commit.
/// Always commits, with an empty token list when the range could not be read.
fn process_and_commit<S, W>(source: &S, range: Range, sequencer: &Sequencer<W>) -> WorkerOutcome
where
    S: ByteSource,
    W: Write,
{
    let started = Instant::now();

    let (tokens, read_error) = match source.open().and_then(|reader| process_range(reader, &range)) {
        Ok(tokens) => (tokens, None),
        Err(e) => {
            tracing::error!("Worker {} failed to read {}: {}", range.index, source.path().display(), e);
            (Vec::new(), Some(Error::RangeFailed { index: range.index, source: e }))
        }
    };
    let elapsed = started.elapsed();

    let committed = match read_error {
        None => sequencer.commit(range.index, &tokens),
        Some(_) => sequencer.skip(range.index),
    };
    let commit_error = committed.err().inspect(|e| {
        tracing::error!("Worker {} could not commit: {}", range.index, e);
    });

    tracing::info!("Ending worker {} ({} tokens)", range.index, tokens.len());

    WorkerOutcome {
        report: RangeReport {
            range,
            tokens: tokens.len(),
            elapsed_ms: elapsed.as_millis() as u64,
        },
        read_error,
        commit_error,
    }
}

fn same_file(a: &std::path::Path, b: &std::path::Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
