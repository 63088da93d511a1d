//! Line-oriented replay format for capture sessions.
//!
//! Each line holds one operator action, using the keys of the interactive
//! annotation tool:
//!
//! ```text
//! # comment
//! n            start the next plate
//! b            annotate baseline
//! s            annotate solvent line
//! o            annotate spots
//! click 120 500
//! t            switch to the secondary modality
//! q            finish
//! ```

use crate::annotation::{AnnotationSet, Modality, Point, Role};
use crate::error::{Result, TlcError};

use super::config::CaptureConfig;
use super::session::{CaptureEvent, CaptureSession};

/// A parsed event with its 1-based source line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub event: CaptureEvent,
}

pub fn parse_script(source: &str) -> Result<Vec<ScriptLine>> {
    let mut lines = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let event = parse_line(text).map_err(|message| TlcError::Script { line, message })?;
        lines.push(ScriptLine { line, event });
    }
    Ok(lines)
}

fn parse_line(text: &str) -> std::result::Result<CaptureEvent, String> {
    let mut tokens = text.split_whitespace();
    let key = tokens.next().unwrap_or_default();
    let event = match key {
        "n" => CaptureEvent::StartPlate,
        "b" => CaptureEvent::SelectRole(Role::Baseline),
        "s" => CaptureEvent::SelectRole(Role::SolventLine),
        "o" => CaptureEvent::SelectRole(Role::Spots),
        "t" => CaptureEvent::SwitchModality,
        "q" => CaptureEvent::Finish,
        "click" => {
            let mut coord = |axis: &str| -> std::result::Result<f64, String> {
                let tok = tokens
                    .next()
                    .ok_or_else(|| format!("click is missing its {axis} coordinate"))?;
                tok.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| format!("invalid {axis} coordinate '{tok}'"))
            };
            let x = coord("x")?;
            let y = coord("y")?;
            CaptureEvent::Click(Point::new(x, y))
        }
        other => return Err(format!("unknown command '{other}'")),
    };
    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected token '{extra}'"));
    }
    Ok(event)
}

/// Replay `source` through a fresh session and return what it captured.
///
/// A script does not need to end with `q`. A rejected event fails the
/// replay with the line it came from.
pub fn replay_script(
    source: &str,
    primary: Modality,
    config: &CaptureConfig,
) -> Result<AnnotationSet> {
    let mut session = CaptureSession::new(primary, config);
    for ScriptLine { line, event } in parse_script(source)? {
        session.apply(event).map_err(|e| TlcError::Script {
            line,
            message: e.to_string(),
        })?;
    }
    Ok(session.into_annotations())
}
