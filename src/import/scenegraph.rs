//! Qt Quick scene graph debug log parser
//!
//! The threaded render loop logs frame timings when the
//! `qt.scenegraph.time.renderloop` category is enabled:
//!   QT_LOGGING_RULES="qt.scenegraph.time.renderloop=true" app 2> shell_perf.log
//!
//! Lines of interest:
//!   [render thread] syncAndRender: frame rendered in 4ms, sync=1, render=2, swap=1
//!   [gui thread] polishAndSync: start, elapsed since last call: 16 ms
//!
//! Everything else in the log is ignored.

use regex::{Captures, Regex};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::common::{LogLine, PerfSamples, RenderSample};
use crate::error::AnalyzeError;

const RENDER_PATTERN: &str = r"frame rendered in (\d+)ms, sync=(\d+), render=(\d+), swap=(\d+)";
const INTERVAL_PATTERN: &str = r"polishAndSync: start, elapsed since last call: (\d+) ms";

/// Matches scene graph timing lines
pub struct SceneGraphLogParser {
    render: Regex,
    interval: Regex,
}

impl SceneGraphLogParser {
    pub fn new() -> Result<Self, AnalyzeError> {
        Ok(Self {
            render: Regex::new(RENDER_PATTERN)?,
            interval: Regex::new(INTERVAL_PATTERN)?,
        })
    }

    /// Match a single log line.
    ///
    /// A render line is never also checked against the interval pattern.
    /// Lines whose numbers overflow `u64` are treated as unmatched.
    pub fn parse_line(&self, line: &str) -> Option<LogLine> {
        if let Some(caps) = self.render.captures(line) {
            return Some(LogLine::Render(RenderSample {
                total_ms: capture_ms(&caps, 1)?,
                sync_ms: capture_ms(&caps, 2)?,
                render_ms: capture_ms(&caps, 3)?,
                swap_ms: capture_ms(&caps, 4)?,
            }));
        }

        let caps = self.interval.captures(line)?;
        capture_ms(&caps, 1).map(LogLine::Interval)
    }

    /// Read a log and accumulate every timing line, in file order
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> std::io::Result<PerfSamples> {
        let mut samples = PerfSamples::default();
        let mut skipped = 0usize;

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;

            match self.parse_line(&line) {
                Some(parsed) => {
                    match parsed {
                        LogLine::Render(sample) => tracing::trace!(
                            line = index + 1,
                            total_ms = sample.total_ms,
                            sync_ms = sample.sync_ms,
                            render_ms = sample.render_ms,
                            swap_ms = sample.swap_ms,
                            "render sample"
                        ),
                        LogLine::Interval(ms) => {
                            tracing::trace!(line = index + 1, interval_ms = ms, "interval sample")
                        }
                    }
                    samples.record(parsed);
                }
                None => {
                    if self.render.is_match(&line) || self.interval.is_match(&line) {
                        tracing::warn!(
                            line = index + 1,
                            "timing value out of range, skipping line"
                        );
                    }
                    skipped += 1;
                }
            }
        }

        tracing::debug!(
            render_lines = samples.render_count(),
            interval_lines = samples.intervals_ms.len(),
            skipped,
            "finished reading log"
        );

        Ok(samples)
    }
}

/// Parse a scene graph debug log file
pub fn parse_scenegraph_log<P: AsRef<Path>>(path: P) -> Result<PerfSamples, AnalyzeError> {
    let path = path.as_ref();
    let read_error = |source: std::io::Error| AnalyzeError::Read {
        path: path.to_path_buf(),
        source,
    };

    let parser = SceneGraphLogParser::new()?;
    let file = File::open(path).map_err(read_error)?;
    parser.parse_reader(BufReader::new(file)).map_err(read_error)
}

fn capture_ms(caps: &Captures<'_>, group: usize) -> Option<u64> {
    caps.get(group)?.as_str().parse().ok()
}
