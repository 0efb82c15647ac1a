//! Scripted interaction sessions.
//!
//! A script holds one command per line:
//!
//! ```text
//! # comments and blank lines are skipped
//! view breakdown
//! edit
//! new
//! click 170 60
//! submit 25 Garden hose
//! delete yes
//! cancel
//! dismiss
//! ```
//!
//! The whole script is parsed before anything runs, so a malformed line fails
//! the replay without side effects.

use crate::frame::frame_text;
use crate::ReplayFormat;
use anyhow::{anyhow, bail, Context};
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use wut_core::feedback::LogSink;
use wut_core::geometry::Point;
use wut_core::surface::CommandRecorder;
use wut_core::{ChartConfig, Frame, Redraw, WaterTracker};

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    View(String),
    Edit,
    New,
    Click(Point),
    Submit { value: String, label: String },
    Delete { confirm: bool },
    Cancel,
    Dismiss,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::View(id) => write!(f, "view {}", id),
            Step::Edit => f.write_str("edit"),
            Step::New => f.write_str("new"),
            Step::Click(p) => write!(f, "click {} {}", p.x, p.y),
            Step::Submit { value, label } if label.is_empty() => write!(f, "submit {}", value),
            Step::Submit { value, label } => write!(f, "submit {} {}", value, label),
            Step::Delete { confirm } => write!(f, "delete {}", if *confirm { "yes" } else { "no" }),
            Step::Cancel => f.write_str("cancel"),
            Step::Dismiss => f.write_str("dismiss"),
        }
    }
}

/// A parsed step and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

fn parse_coord(token: Option<&str>, name: &str) -> anyhow::Result<f64> {
    let token = token.ok_or_else(|| anyhow!("missing {} coordinate", name))?;
    token
        .parse::<f64>()
        .map_err(|_| anyhow!("bad {} coordinate {:?}", name, token))
}

fn parse_step(line: &str) -> anyhow::Result<Step> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let step = match command {
        "view" => Step::View(words.next().ok_or_else(|| anyhow!("view needs an id"))?.to_string()),
        "edit" => Step::Edit,
        "new" => Step::New,
        "click" => {
            let x = parse_coord(words.next(), "x")?;
            let y = parse_coord(words.next(), "y")?;
            Step::Click(Point::new(x, y))
        }
        "submit" => {
            let value = words
                .next()
                .ok_or_else(|| anyhow!("submit needs a value"))?
                .to_string();
            let label = words.collect::<Vec<_>>().join(" ");
            return Ok(Step::Submit { value, label });
        }
        "delete" => match words.next() {
            Some("yes") => Step::Delete { confirm: true },
            Some("no") => Step::Delete { confirm: false },
            other => bail!("delete needs yes or no, got {:?}", other.unwrap_or("")),
        },
        "cancel" => Step::Cancel,
        "dismiss" => Step::Dismiss,
        other => bail!("unknown command {:?}", other),
    };
    if let Some(extra) = words.next() {
        bail!("unexpected {:?} after {}", extra, command);
    }
    Ok(step)
}

/// Parse a whole script. Errors name the offending line.
pub fn parse_script(text: &str) -> anyhow::Result<Vec<ScriptLine>> {
    let mut steps = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = parse_step(line).with_context(|| format!("line {}: {}", i + 1, line))?;
        steps.push(ScriptLine { line: i + 1, step });
    }
    Ok(steps)
}

/// Outcome of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub line: usize,
    pub step: String,
    /// Validation message for a rejected submit
    pub rejected: Option<String>,
    /// Present only when the step owed a redraw
    pub frame: Option<Frame>,
}

fn apply(tracker: &mut WaterTracker<LogSink>, step: &Step) -> anyhow::Result<(Redraw, Option<String>)> {
    let redraw = match step {
        Step::View(id) => tracker.select_view(id)?,
        Step::Edit => tracker.toggle_edit(),
        Step::New => tracker.press_new(),
        Step::Click(point) => tracker.click(*point),
        Step::Submit { value, label } => match tracker.submit(label, value) {
            Ok(redraw) => redraw,
            Err(e) => return Ok((Redraw::Unchanged, Some(e.to_string()))),
        },
        Step::Delete { confirm } => {
            let answer = *confirm;
            let mut gate = |prompt: &str| {
                debug!("confirm {:?} -> {}", prompt, answer);
                answer
            };
            tracker.request_delete(&mut gate)
        }
        Step::Cancel => tracker.cancel(),
        Step::Dismiss => tracker.dismiss(),
    };
    Ok((redraw, None))
}

/// Run every step against a fresh tracker, rendering after each owed redraw.
pub fn replay(config: ChartConfig, script: &[ScriptLine]) -> anyhow::Result<Vec<StepReport>> {
    let mut tracker = WaterTracker::new(config, LogSink)?;
    let mut surface = CommandRecorder::new();
    let mut reports = Vec::with_capacity(script.len());

    for ScriptLine { line, step } in script {
        let (redraw, rejected) = apply(&mut tracker, step).with_context(|| format!("line {}: {}", line, step))?;
        let frame = redraw.is_needed().then(|| tracker.render(&mut surface));
        reports.push(StepReport {
            line: *line,
            step: step.to_string(),
            rejected,
            frame,
        });
    }
    info!("Replayed {} steps", reports.len());
    Ok(reports)
}

pub fn run_script(config: ChartConfig, text: &str, format: ReplayFormat) -> anyhow::Result<String> {
    let script = parse_script(text)?;
    let reports = replay(config, &script)?;
    let output = match format {
        ReplayFormat::Json => serde_json::to_string_pretty(&reports)?,
        ReplayFormat::Text => reports
            .iter()
            .map(|report| {
                let mut block = format!("> {}", report.step);
                if let Some(message) = &report.rejected {
                    block.push_str(&format!("\nrejected: {}", message));
                }
                match &report.frame {
                    Some(frame) => block.push_str(&format!("\n{}", frame_text(frame))),
                    None if report.rejected.is_none() => block.push_str("\n(no change)"),
                    None => {}
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELETE_KITCHEN: &str = "
# remove Kitchen from the breakdown
edit
click 140 250
delete no
delete yes
";

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let script = parse_script(DELETE_KITCHEN).unwrap();
        assert_eq!(script.len(), 4);
        assert_eq!(script[0], ScriptLine { line: 3, step: Step::Edit });
        assert_eq!(script[1].step, Step::Click(Point::new(140.0, 250.0)));
        assert_eq!(script[3].step, Step::Delete { confirm: true });
    }

    #[test]
    fn test_submit_label_keeps_spaces() {
        let script = parse_script("submit 12.5 Garden  hose").unwrap();
        assert_eq!(
            script[0].step,
            Step::Submit {
                value: "12.5".to_string(),
                label: "Garden hose".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = parse_script("edit\nclick 10\n").unwrap_err();
        assert!(format!("{:#}", err).starts_with("line 2: click 10"));

        let err = parse_script("\n\njump").unwrap_err();
        assert!(err.to_string().contains("line 3"));

        assert!(parse_script("delete maybe").is_err());
        assert!(parse_script("cancel now").is_err());
    }

    #[test]
    fn test_delete_scenario() {
        let script = parse_script(DELETE_KITCHEN).unwrap();
        let reports = replay(ChartConfig::default(), &script).unwrap();

        assert!(reports[2].frame.is_none());
        let frame = reports[3].frame.as_ref().unwrap();
        let legend: Vec<&str> = frame.legend.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(legend, vec!["Shower (53%)", "Laundry (27%)", "Outdoor / Other (20%)"]);
        assert!(frame.session.is_none());
    }

    #[test]
    fn test_rejected_submit_keeps_form() {
        let out = run_script(ChartConfig::default(), "edit\nnew\nsubmit abc Pool\n", ReplayFormat::Text).unwrap();
        assert!(out.contains(
            "> submit abc Pool\nrejected: Please enter a label and a positive number for estimated usage."
        ));
    }

    #[test]
    fn test_submit_without_label_echoes_cleanly() {
        let script = parse_script("submit 5").unwrap();
        assert_eq!(script[0].step.to_string(), "submit 5");

        let out = run_script(ChartConfig::default(), "edit\nnew\nsubmit 5\n", ReplayFormat::Text).unwrap();
        assert!(out.contains("> submit 5\nrejected: "));
    }

    #[test]
    fn test_unknown_view_fails_with_line() {
        let err = run_script(ChartConfig::default(), "view monthly", ReplayFormat::Text).unwrap_err();
        assert!(err.to_string().starts_with("line 1"));
    }

    #[test]
    fn test_json_output() {
        let out = run_script(ChartConfig::default(), "view weekly\nclick 5 5", ReplayFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["frame"]["summary"]["title"], "Weekly Trends");
        assert_eq!(value[1]["line"], 2);
    }
}
