//! Injectable observers for pipeline steps and law checks.
//!
//! Nothing in this crate writes to the console. Code that wants visibility into a pipeline
//! wraps its steps with [`observed`] and hands the [`LawVerifier`](crate::LawVerifier) an
//! observer; [`TracingObserver`] forwards everything to `tracing`.
use std::fmt::Debug;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::laws::{Law, Verdict};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// a labelled step was invoked with `input` (its `Debug` rendering)
    Step { label: String, input: String },
    /// a law was checked
    Law { law: Law, verdict: Verdict },
}

pub trait Observer {
    fn notify(&self, event: &Event);
}

impl<O: Observer + ?Sized> Observer for &O {
    fn notify(&self, event: &Event) {
        (**self).notify(event)
    }
}

impl<O: Observer + ?Sized> Observer for Rc<O> {
    fn notify(&self, event: &Event) {
        (**self).notify(event)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn notify(&self, _event: &Event) {}
}

/// Emits every event through `tracing`: steps at `TRACE`, laws at `DEBUG`, violations at `WARN`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: &Event) {
        match event {
            Event::Step { label, input } => trace!(step = %label, %input, "pipeline step"),
            Event::Law { law, verdict } => match verdict {
                Verdict::Holds => debug!(%law, "law holds"),
                Verdict::Skipped => debug!(%law, "law skipped, no samples"),
                Verdict::Violated { left, right } => {
                    warn!(%law, %left, %right, "law violated")
                }
            },
        }
    }
}

/// Wrap `step` so that each invocation notifies `observer` before running it.
///
/// The wrapped step's behaviour is unchanged, so it can be placed anywhere in a
/// [`compose_m!`](crate::compose_m) pipeline.
pub fn observed<'a, A, B, O, S>(
    label: impl Into<String>,
    observer: O,
    step: S,
) -> impl Fn(A) -> B + 'a
where
    A: Debug + 'a,
    B: 'a,
    O: Observer + 'a,
    S: Fn(A) -> B + 'a,
{
    let label = label.into();
    move |a| {
        observer.notify(&Event::Step {
            label: label.clone(),
            input: format!("{a:?}"),
        });
        step(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Collect(RefCell<Vec<Event>>);

    impl Observer for Collect {
        fn notify(&self, event: &Event) {
            self.0.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn observed_step_reports_input_and_passes_through() {
        let sink = Rc::new(Collect::default());
        let step = observed("square", sink.clone(), |n: i32| n * n);

        assert_eq!(step(3), 9);
        assert_eq!(step(-2), 4);
        assert_eq!(
            *sink.0.borrow(),
            vec![
                Event::Step {
                    label: "square".to_string(),
                    input: "3".to_string()
                },
                Event::Step {
                    label: "square".to_string(),
                    input: "-2".to_string()
                },
            ]
        );
    }

    #[test]
    fn noop_and_tracing_observers_accept_events() {
        let event = Event::Law {
            law: Law::Identity,
            verdict: Verdict::Holds,
        };
        NoopObserver.notify(&event);
        TracingObserver.notify(&event);
    }
}
