//! ASCII timeline rendering.
//!
//! Renders one processor's completed run as a three-band Gantt strip —
//! top border, task-id labels, bottom border — scaled to a fixed
//! character width, followed by decile time-axis labels. Purely a view
//! over [`ProcessorRun`]; it never touches the task pool.

use crate::models::ProcessorRun;

/// Width of the rendered strip in characters.
pub const TIMELINE_WIDTH: usize = 80;

/// Renders a processor run as a multi-line string.
///
/// An idle processor renders as a single "no tasks executed" line.
/// Execution windows are scaled so the processor's makespan spans the
/// full strip; decile labels are placed at their scaled columns.
pub fn render(run: &ProcessorRun) -> String {
    if run.is_idle() {
        return format!("Processor {}: No tasks executed.\n", run.processor);
    }

    let total = run.makespan.max(1);
    let scale = TIMELINE_WIDTH as f64 / total as f64;
    let mut bands = [
        vec![b' '; TIMELINE_WIDTH],
        vec![b' '; TIMELINE_WIDTH],
        vec![b' '; TIMELINE_WIDTH],
    ];

    for execution in &run.executions {
        let start_pos = (execution.started_at as f64 * scale).round() as usize;
        let end_pos =
            (((execution.finished_at as f64) * scale).round() as usize).min(TIMELINE_WIDTH);
        if start_pos >= TIMELINE_WIDTH || end_pos <= start_pos {
            continue;
        }

        for column in start_pos..end_pos {
            bands[0][column] = if column == start_pos { b'[' } else { b'-' };
            bands[2][column] = if column == start_pos || column == end_pos - 1 {
                b'|'
            } else {
                b'-'
            };
        }
        bands[0][end_pos - 1] = b']';

        let label = format!("T{}", execution.task_id);
        let mut column = start_pos + 1;
        for byte in label.bytes() {
            if column + 1 >= end_pos {
                break;
            }
            bands[1][column] = byte;
            column += 1;
        }
    }

    let mut out = format!("Processor {} timeline:\n", run.processor);
    for band in &bands {
        out.push_str(&String::from_utf8_lossy(band));
        out.push('\n');
    }
    out.push_str(&axis_line(total, scale));
    out.push('\n');
    out
}

/// Builds the decile label line: `0` at the origin, then `i·total/10`
/// at each scaled decile column that fits the strip.
fn axis_line(total: i64, scale: f64) -> String {
    let mut axis = String::from("0");
    for decile in 1..=10i64 {
        let column = ((decile * total) as f64 / 10.0 * scale).round() as usize;
        if column >= TIMELINE_WIDTH {
            continue;
        }
        while axis.len() < column {
            axis.push(' ');
        }
        axis.push_str(&(decile * total / 10).to_string());
    }
    axis
}
