//! Scripted editing sessions against an [`EpsgPanel`].
//!
//! A script is a list of steps such as `type:326 pick:1 apply`. Every step is
//! one UI event followed by one tick of the deferred queue, and typing runs
//! one tick per keystroke.

use std::fmt;
use std::str::FromStr;

use epsg_core::{ChangeOrigin, EpsgPanel, FieldKind};
use epsg_model::DerivedParameters;
use serde::Serialize;
use tracing::debug;

/// One event in a scripted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    /// Keystrokes appended one char at a time.
    Type(String),
    /// Text inserted at the end in a single edit.
    Paste(String),
    /// Deletes the last char.
    Back,
    /// Picks the candidate at this position.
    Pick(usize),
    Focus,
    Clear,
    Apply,
    /// A user edit of a dependent field.
    Edit(FieldKind),
}

impl FromStr for SessionStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        match (name, arg) {
            ("type", Some(keys)) if !keys.is_empty() => Ok(Self::Type(keys.to_string())),
            ("paste", Some(text)) if !text.is_empty() => Ok(Self::Paste(text.to_string())),
            ("back", None) => Ok(Self::Back),
            ("pick", Some(index)) => index
                .parse()
                .map(Self::Pick)
                .map_err(|_| format!("invalid candidate index '{index}'")),
            ("focus", None) => Ok(Self::Focus),
            ("clear", None) => Ok(Self::Clear),
            ("apply", None) => Ok(Self::Apply),
            ("edit", Some(field)) => field.parse().map(Self::Edit),
            _ => Err(format!(
                "invalid step '{s}' (expected type:<digits>, paste:<text>, back, pick:<n>, \
                 focus, clear, apply or edit:<field>)"
            )),
        }
    }
}

impl fmt::Display for SessionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStep::Type(keys) => write!(f, "type:{keys}"),
            SessionStep::Paste(text) => write!(f, "paste:{text}"),
            SessionStep::Back => f.write_str("back"),
            SessionStep::Pick(index) => write!(f, "pick:{index}"),
            SessionStep::Focus => f.write_str("focus"),
            SessionStep::Clear => f.write_str("clear"),
            SessionStep::Apply => f.write_str("apply"),
            SessionStep::Edit(field) => write!(f, "edit:{field}"),
        }
    }
}

/// What one step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: String,
    pub outcome: String,
    pub text: String,
}

/// Panel state after a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub side: String,
    pub text: String,
    pub state: String,
    pub popup_open: bool,
    pub candidates: Vec<String>,
    pub resolved: Option<String>,
    pub active_code: Option<String>,
    pub parameters: Option<DerivedParameters>,
    pub steps: Vec<StepRecord>,
}

/// Runs `steps` against `panel` and reports the final state.
///
/// Apply failures are recorded in the step log; the panel clears itself the
/// same way it would for an interactive user.
pub fn replay(panel: &mut EpsgPanel, steps: &[SessionStep]) -> SessionReport {
    let mut records = Vec::with_capacity(steps.len());
    let mut parameters = None;

    for step in steps {
        let outcome = run_step(panel, step, &mut parameters);
        debug!(%step, %outcome, text = panel.session().text(), "session step");
        records.push(StepRecord {
            step: step.to_string(),
            outcome,
            text: panel.session().text().to_string(),
        });
    }

    if !panel.is_active() {
        parameters = None;
    }

    let session = panel.session();
    SessionReport {
        side: panel.side().to_string(),
        text: session.text().to_string(),
        state: session.state().to_string(),
        popup_open: session.is_popup_open(),
        candidates: session.candidates().to_vec(),
        resolved: session.resolved_value().map(str::to_string),
        active_code: panel.current_code().map(str::to_string),
        parameters,
        steps: records,
    }
}

fn run_step(
    panel: &mut EpsgPanel,
    step: &SessionStep,
    parameters: &mut Option<DerivedParameters>,
) -> String {
    let outcome = match step {
        SessionStep::Type(keys) => {
            let mut accepted = 0;
            for key in keys.chars() {
                let offset = panel.session().char_len();
                if panel.insert(offset, key.encode_utf8(&mut [0; 4])).is_accepted() {
                    accepted += 1;
                }
                panel.process_pending();
            }
            let total = keys.chars().count();
            if accepted == total {
                "accepted".to_string()
            } else {
                format!("{accepted} of {total} keystrokes accepted")
            }
        }
        SessionStep::Paste(text) => {
            let offset = panel.session().char_len();
            edit_outcome(panel.insert(offset, text).is_accepted())
        }
        SessionStep::Back => {
            let len = panel.session().char_len();
            if len == 0 {
                "nothing to delete".to_string()
            } else {
                edit_outcome(panel.remove(len - 1..len).is_accepted())
            }
        }
        SessionStep::Pick(index) => match panel.select_candidate(*index) {
            Some(code) => format!("picked {code}"),
            None => format!("no candidate at {index}"),
        },
        SessionStep::Focus => {
            panel.focus_gained();
            "focused".to_string()
        }
        SessionStep::Clear => {
            panel.clear();
            *parameters = None;
            "cleared".to_string()
        }
        SessionStep::Apply => match panel.apply_selected() {
            Ok(Some(applied)) => {
                let outcome = format!("applied {} ({})", applied.code, applied.parameters.kind());
                *parameters = Some(applied.parameters);
                outcome
            }
            Ok(None) => {
                *parameters = None;
                "no code selected".to_string()
            }
            Err(err) => {
                *parameters = None;
                format!("error: {err}")
            }
        },
        SessionStep::Edit(field) => {
            let outcome = panel.notify_field_changed(*field, ChangeOrigin::User);
            format!("{outcome:?}").to_lowercase()
        }
    };
    panel.process_pending();
    outcome
}

fn edit_outcome(accepted: bool) -> String {
    if accepted { "accepted" } else { "rejected" }.to_string()
}
