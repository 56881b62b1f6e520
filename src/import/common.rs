//! Common data structures for parsed scene graph timing data

/// One `frame rendered in ...` line from the render thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSample {
    /// Whole frame time in milliseconds
    pub total_ms: u64,
    /// Time spent syncing the scene graph with the GUI thread
    pub sync_ms: u64,
    /// Time spent rendering
    pub render_ms: u64,
    /// Time spent in buffer swap
    pub swap_ms: u64,
}

/// A log line that carried timing data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLine {
    Render(RenderSample),
    /// Milliseconds since the previous `polishAndSync` call
    Interval(u64),
}

/// Timing values accumulated over one pass of a log file
#[derive(Debug, Clone, Default)]
pub struct PerfSamples {
    /// Total frame times from render lines, in file order
    pub frame_totals_ms: Vec<u64>,
    /// Render sub-times from render lines
    pub render_times_ms: Vec<u64>,
    /// Sync sub-times from render lines
    pub sync_times_ms: Vec<u64>,
    /// Frame intervals from GUI thread lines
    pub intervals_ms: Vec<u64>,
}

/// Render thread timings, present only when render lines were found
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTimings {
    pub average_render_ms: f64,
    pub max_render_ms: u64,
    pub average_sync_ms: f64,
}

/// Calculated summary for a log
#[derive(Debug, Clone, PartialEq)]
pub struct PerfSummary {
    /// Number of frame intervals analyzed
    pub frame_count: usize,
    /// Mean frame interval in ms
    pub average_interval_ms: f64,
    /// Average FPS
    pub avg_fps: f64,
    /// FPS at the longest interval
    pub min_fps: f64,
    /// FPS at the shortest interval
    pub max_fps: f64,
    pub max_interval_ms: u64,
    pub min_interval_ms: u64,
    /// Render/sync timings, `None` when the log had no render lines
    pub render: Option<RenderTimings>,
}

impl PerfSamples {
    /// Append the values carried by a matched line
    pub fn record(&mut self, line: LogLine) {
        match line {
            LogLine::Render(sample) => {
                self.frame_totals_ms.push(sample.total_ms);
                self.render_times_ms.push(sample.render_ms);
                self.sync_times_ms.push(sample.sync_ms);
            }
            LogLine::Interval(ms) => self.intervals_ms.push(ms),
        }
    }

    /// Number of render lines recorded
    pub fn render_count(&self) -> usize {
        self.frame_totals_ms.len()
    }

    /// Mean of the total frame times, if any render lines were recorded
    pub fn average_frame_total_ms(&self) -> Option<f64> {
        mean(&self.frame_totals_ms)
    }

    /// Calculate summary statistics.
    ///
    /// Returns `None` when no frame intervals were recorded.
    pub fn summarize(&self) -> Option<PerfSummary> {
        let intervals = &self.intervals_ms;
        let average_interval_ms = mean(intervals)?;
        let max_interval_ms = intervals.iter().copied().max()?;
        let min_interval_ms = intervals.iter().copied().min()?;

        let render = match (
            mean(&self.render_times_ms),
            self.render_times_ms.iter().copied().max(),
            mean(&self.sync_times_ms),
        ) {
            (Some(average_render_ms), Some(max_render_ms), Some(average_sync_ms)) => {
                Some(RenderTimings {
                    average_render_ms,
                    max_render_ms,
                    average_sync_ms,
                })
            }
            _ => None,
        };

        Some(PerfSummary {
            frame_count: intervals.len(),
            average_interval_ms,
            avg_fps: fps_for_interval(average_interval_ms),
            min_fps: fps_for_interval(max_interval_ms as f64),
            max_fps: fps_for_interval(min_interval_ms as f64),
            max_interval_ms,
            min_interval_ms,
            render,
        })
    }
}

fn mean(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: f64 = values.iter().map(|&v| v as f64).sum();
    Some(total / values.len() as f64)
}

/// FPS for a frame interval; a zero interval reports 0 instead of dividing by zero
fn fps_for_interval(interval_ms: f64) -> f64 {
    if interval_ms > 0.0 {
        1000.0 / interval_ms
    } else {
        0.0
    }
}

impl std::fmt::Display for PerfSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Performance Summary ---")?;
        writeln!(f, "Total Frames Analyzed: {}", self.frame_count)?;
        writeln!(f, "Average FPS: {:.2}", self.avg_fps)?;
        writeln!(
            f,
            "Min FPS: {:.2} (Max Interval: {}ms)",
            self.min_fps, self.max_interval_ms
        )?;
        writeln!(
            f,
            "Max FPS: {:.2} (Min Interval: {}ms)",
            self.max_fps, self.min_interval_ms
        )?;
        writeln!(f, "---------------------------")?;

        match self.render {
            Some(ref render) => {
                writeln!(f, "Average Render Time: {:.2}ms", render.average_render_ms)?;
                writeln!(f, "Max Render Time: {}ms", render.max_render_ms)?;
                writeln!(f, "Average Sync Time: {:.2}ms", render.average_sync_ms)?;
            }
            None => {
                writeln!(f, "Average Render Time: n/a")?;
                writeln!(f, "Max Render Time: n/a")?;
                writeln!(f, "Average Sync Time: n/a")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(total_ms: u64, sync_ms: u64, render_ms: u64) -> LogLine {
        LogLine::Render(RenderSample {
            total_ms,
            sync_ms,
            render_ms,
            swap_ms: 0,
        })
    }

    fn samples(lines: &[LogLine]) -> PerfSamples {
        let mut samples = PerfSamples::default();
        for line in lines {
            samples.record(*line);
        }
        samples
    }

    #[test]
    fn test_no_intervals_has_no_summary() {
        let data = samples(&[render(16, 2, 5), render(17, 3, 7)]);
        assert!(data.summarize().is_none());
    }

    #[test]
    fn test_interval_fps_figures() {
        let data = samples(&[
            LogLine::Interval(10),
            LogLine::Interval(20),
            LogLine::Interval(30),
            render(16, 1, 5),
        ]);
        let summary = data.summarize().unwrap();

        assert_eq!(summary.frame_count, 3);
        assert_eq!(summary.average_interval_ms, 20.0);
        assert_eq!(summary.avg_fps, 50.0);
        assert_eq!(format!("{:.2}", summary.min_fps), "33.33");
        assert_eq!(summary.max_fps, 100.0);
        assert_eq!(summary.max_interval_ms, 30);
        assert_eq!(summary.min_interval_ms, 10);
    }

    #[test]
    fn test_render_timings() {
        let data = samples(&[
            LogLine::Interval(16),
            render(12, 2, 5),
            render(14, 4, 7),
            render(16, 6, 9),
        ]);
        let render = data.summarize().unwrap().render.unwrap();

        assert_eq!(render.average_render_ms, 7.0);
        assert_eq!(render.max_render_ms, 9);
        assert_eq!(render.average_sync_ms, 4.0);
        assert_eq!(data.average_frame_total_ms(), Some(14.0));
    }

    #[test]
    fn test_zero_intervals_report_zero_fps() {
        let data = samples(&[LogLine::Interval(0), LogLine::Interval(0)]);
        let summary = data.summarize().unwrap();

        assert_eq!(summary.avg_fps, 0.0);
        assert_eq!(summary.min_fps, 0.0);
        assert_eq!(summary.max_fps, 0.0);
    }

    #[test]
    fn test_zero_min_interval_only_affects_max_fps() {
        let data = samples(&[LogLine::Interval(0), LogLine::Interval(20)]);
        let summary = data.summarize().unwrap();

        assert_eq!(summary.avg_fps, 100.0);
        assert_eq!(summary.min_fps, 50.0);
        assert_eq!(summary.max_fps, 0.0);
    }

    #[test]
    fn test_report_format() {
        let data = samples(&[
            LogLine::Interval(10),
            LogLine::Interval(20),
            LogLine::Interval(30),
            render(10, 1, 5),
            render(12, 2, 7),
            render(14, 3, 9),
        ]);
        let report = data.summarize().unwrap().to_string();

        assert_eq!(
            report,
            "--- Performance Summary ---\n\
             Total Frames Analyzed: 3\n\
             Average FPS: 50.00\n\
             Min FPS: 33.33 (Max Interval: 30ms)\n\
             Max FPS: 100.00 (Min Interval: 10ms)\n\
             ---------------------------\n\
             Average Render Time: 7.00ms\n\
             Max Render Time: 9ms\n\
             Average Sync Time: 2.00ms\n"
        );
    }

    #[test]
    fn test_report_without_render_lines() {
        let data = samples(&[LogLine::Interval(16)]);
        let summary = data.summarize().unwrap();
        assert!(summary.render.is_none());

        let report = summary.to_string();
        assert!(report.contains("Average FPS: 62.50\n"));
        assert!(report.ends_with(
            "Average Render Time: n/a\nMax Render Time: n/a\nAverage Sync Time: n/a\n"
        ));
    }

    #[test]
    fn test_summary_is_idempotent() {
        let data = samples(&[LogLine::Interval(7), LogLine::Interval(33), render(9, 1, 4)]);
        assert_eq!(
            data.summarize().unwrap().to_string(),
            data.summarize().unwrap().to_string()
        );
    }

    #[test]
    fn test_summary_ignores_record_order() {
        let lines = [
            LogLine::Interval(12),
            render(20, 3, 11),
            LogLine::Interval(40),
            render(18, 2, 6),
            LogLine::Interval(5),
        ];
        let mut reversed = lines;
        reversed.reverse();

        assert_eq!(
            samples(&lines).summarize(),
            samples(&reversed).summarize()
        );
    }
}
