use std::cell::RefCell;
use std::path::Path;

use kleisli::observe::{Event, Observer};
use kleisli::{LawReport, Verdict};
use serde::Serialize;
use serde_json::value::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceAction {
    // a pipeline step was entered with some input
    Step {
        label: String,
        input: String,
    },
    // a law was checked, with both sides if it was violated
    LawChecked {
        law: String,
        verdict: &'static str,
        sides: Option<(String, String)>,
    },
    // a free-form note placed between recorded events
    InfoCard {
        info_header: String,
        info_txt: String,
    },
}

impl From<&Event> for TraceAction {
    fn from(event: &Event) -> Self {
        match event {
            Event::Step { label, input } => TraceAction::Step {
                label: label.clone(),
                input: input.clone(),
            },
            Event::Law { law, verdict } => {
                let (verdict, sides) = split_verdict(verdict);
                TraceAction::LawChecked {
                    law: law.to_string(),
                    verdict,
                    sides,
                }
            }
        }
    }
}

fn split_verdict(verdict: &Verdict) -> (&'static str, Option<(String, String)>) {
    match verdict {
        Verdict::Holds => ("holds", None),
        Verdict::Skipped => ("skipped", None),
        Verdict::Violated { left, right } => ("violated", Some((left.clone(), right.clone()))),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    pub title: String,
    pub actions: Vec<TraceAction>,
}

impl Trace {
    /// Append `next` after this trace, separated by an info card
    pub fn fuse(self, next: Self, info_header: String, info_txt: String) -> Self {
        let mut actions = self.actions;
        actions.push(TraceAction::InfoCard {
            info_header,
            info_txt,
        });
        actions.extend(next.actions);

        Self {
            title: self.title,
            actions,
        }
    }

    /// Write the trace as JSON to `path`
    pub fn write(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let to_write = serialize_json(self)?;
        tracing::debug!(path = %path.as_ref().display(), actions = self.actions.len(), "writing trace");
        std::fs::write(path, to_write)
    }

    pub fn steps(&self) -> impl Iterator<Item = (&str, &str)> {
        self.actions.iter().filter_map(|a| match a {
            TraceAction::Step { label, input } => Some((label.as_str(), input.as_str())),
            _ => None,
        })
    }
}

/// An [`Observer`] that keeps every event it is notified of, in order.
///
/// Share it between steps and verifiers via `Rc` or `&`, then call [`Recorder::finish`].
#[derive(Debug, Default)]
pub struct Recorder {
    title: String,
    actions: RefCell<Vec<TraceAction>>,
}

impl Recorder {
    pub fn new(title: impl Into<String>) -> Self {
        Recorder {
            title: title.into(),
            actions: RefCell::new(Vec::new()),
        }
    }

    pub fn label(&self, info_header: impl Into<String>, info_txt: impl Into<String>) {
        self.actions.borrow_mut().push(TraceAction::InfoCard {
            info_header: info_header.into(),
            info_txt: info_txt.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.actions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.borrow().is_empty()
    }

    /// The trace so far, leaving the recorder usable
    pub fn snapshot(&self) -> Trace {
        Trace {
            title: self.title.clone(),
            actions: self.actions.borrow().clone(),
        }
    }

    pub fn finish(self) -> Trace {
        Trace {
            title: self.title,
            actions: self.actions.into_inner(),
        }
    }
}

impl Observer for Recorder {
    fn notify(&self, event: &Event) {
        self.actions.borrow_mut().push(event.into());
    }
}

pub fn serialize_json(trace: &Trace) -> serde_json::Result<String> {
    let actions: Vec<Value> = trace
        .actions
        .iter()
        .map(|elem| match elem {
            TraceAction::Step { label, input } => {
                let mut h = serde_json::Map::new();
                h.insert("typ".to_string(), Value::String("step".to_string()));
                h.insert("label".to_string(), Value::String(label.clone()));
                h.insert("input".to_string(), Value::String(input.clone()));
                Value::Object(h)
            }
            TraceAction::LawChecked {
                law,
                verdict,
                sides,
            } => {
                let mut h = serde_json::Map::new();
                h.insert("typ".to_string(), Value::String("law".to_string()));
                h.insert("law".to_string(), Value::String(law.clone()));
                h.insert("verdict".to_string(), Value::String(verdict.to_string()));
                if let Some((left, right)) = sides {
                    h.insert("left".to_string(), Value::String(left.clone()));
                    h.insert("right".to_string(), Value::String(right.clone()));
                }
                Value::Object(h)
            }
            TraceAction::InfoCard {
                info_header,
                info_txt,
            } => {
                let mut h = serde_json::Map::new();
                h.insert("typ".to_string(), Value::String("info_card".to_string()));
                h.insert("info_header".to_string(), Value::String(info_header.clone()));
                h.insert("info_txt".to_string(), Value::String(info_txt.clone()));
                Value::Object(h)
            }
        })
        .collect();

    let trace_js = {
        let mut h = serde_json::Map::new();
        h.insert("title".to_string(), Value::String(trace.title.clone()));
        h.insert("actions".to_string(), Value::Array(actions));
        Value::Object(h)
    };

    serde_json::to_string(&trace_js)
}

#[derive(Serialize)]
struct LawEntry<'r> {
    law: &'static str,
    verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    left: Option<&'r str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right: Option<&'r str>,
}

/// A law report as a JSON array of `{law, verdict, left?, right?}`, in report order
pub fn report_json(report: &LawReport) -> serde_json::Result<String> {
    let entries: Vec<LawEntry<'_>> = report
        .outcomes()
        .iter()
        .map(|outcome| {
            let (verdict, left, right) = match &outcome.verdict {
                Verdict::Holds => ("holds", None, None),
                Verdict::Skipped => ("skipped", None, None),
                Verdict::Violated { left, right } => {
                    ("violated", Some(left.as_str()), Some(right.as_str()))
                }
            };
            LawEntry {
                law: outcome.law.name(),
                verdict,
                left,
                right,
            }
        })
        .collect();

    serde_json::to_string(&entries)
}
