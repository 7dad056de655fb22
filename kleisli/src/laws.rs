//! Mechanical checks of the functor and monad laws for a concrete container kind.
//!
//! | Law | Statement |
//! |-----|-----------|
//! | Identity | `map(c, id) == c` |
//! | Composition | `map(map(c, f), g) == map(c, g . f)` |
//! | LeftIdentity | `flat_map(lift(x), f) == f(x)` |
//! | RightIdentity | `flat_map(c, lift) == c` |
//! | Associativity | `flat_map(flat_map(c, f), g) == flat_map(c, \|x\| flat_map(f(x), g))` |
//!
//! A violation is a defect in the container, not in the combinators: run the verifier over any
//! new container kind before composing it.
use std::fmt;
use std::fmt::Debug;
use std::rc::Rc;

use tracing::debug;

use crate::compose::Step;
use crate::kind::FlatMappable;
use crate::observe::{Event, NoopObserver, Observer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Law {
    /// `map(c, id) == c`
    Identity,
    /// `map(map(c, f), g) == map(c, g . f)`
    Composition,
    /// `flat_map(lift(x), f) == f(x)`
    LeftIdentity,
    /// `flat_map(c, lift) == c`
    RightIdentity,
    /// `flat_map(flat_map(c, f), g) == flat_map(c, |x| flat_map(f(x), g))`
    Associativity,
}

impl Law {
    /// Every law, in the order they are reported
    pub const ALL: [Law; 5] = [
        Law::Identity,
        Law::Composition,
        Law::LeftIdentity,
        Law::RightIdentity,
        Law::Associativity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Law::Identity => "identity",
            Law::Composition => "composition",
            Law::LeftIdentity => "left identity",
            Law::RightIdentity => "right identity",
            Law::Associativity => "associativity",
        }
    }
}

impl fmt::Display for Law {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Holds,
    /// both sides of the law's equation, as observed
    Violated { left: String, right: String },
    /// the samples this law needs were not supplied
    Skipped,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LawOutcome {
    pub law: Law,
    pub verdict: Verdict,
}

/// One outcome per law, in [`Law::ALL`] order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LawReport {
    outcomes: Vec<LawOutcome>,
}

impl LawReport {
    pub fn outcomes(&self) -> &[LawOutcome] {
        &self.outcomes
    }

    pub fn verdict(&self, law: Law) -> Option<&Verdict> {
        self.outcomes
            .iter()
            .find(|o| o.law == law)
            .map(|o| &o.verdict)
    }

    /// True if no law was violated. Skipped laws don't count against this.
    pub fn all_hold(&self) -> bool {
        self.violations().next().is_none()
    }

    /// True if every law was checked and held
    pub fn certified(&self) -> bool {
        self.outcomes.iter().all(|o| o.verdict == Verdict::Holds)
    }

    pub fn violations(&self) -> impl Iterator<Item = &LawOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.verdict, Verdict::Violated { .. }))
    }
}

type Endo<'a, A> = Rc<dyn Fn(A) -> A + 'a>;

/// Checks the laws for container kind `K`, given a way to build a sample container, a sample
/// raw value, and sample functions.
///
/// ```rust
/// # use kleisli::{LawVerifier, PartiallyApplied, Sequence};
/// let report = LawVerifier::<Sequence<PartiallyApplied>, i32>::new(
///     || Sequence::from(vec![1, 2, 3]),
///     7,
/// )
/// .functions(|x| x + 1, |x| x * 3)
/// .kleisli(|x| Sequence::from(vec![x, -x]), |x| Sequence::repeat(x, 2))
/// .verify_structural();
///
/// assert!(report.certified());
/// ```
///
/// Sample functions are endomorphisms on `A`. The verifier keeps no state between runs, so
/// verifying twice yields the same report.
pub struct LawVerifier<'a, K: FlatMappable, A: 'a> {
    make: Box<dyn Fn() -> K::Container<'a, A> + 'a>,
    value: A,
    functions: Option<(Endo<'a, A>, Endo<'a, A>)>,
    kleisli: Option<(Step<'a, K, A>, Step<'a, K, A>)>,
    observer: Box<dyn Observer + 'a>,
}

impl<'a, K: FlatMappable, A: Clone + 'a> LawVerifier<'a, K, A> {
    /// `make` must build an equal container every time it is called
    pub fn new(make: impl Fn() -> K::Container<'a, A> + 'a, value: A) -> Self {
        LawVerifier {
            make: Box::new(make),
            value,
            functions: None,
            kleisli: None,
            observer: Box::new(NoopObserver),
        }
    }

    /// Pure samples for the composition law
    pub fn functions(mut self, f: impl Fn(A) -> A + 'a, g: impl Fn(A) -> A + 'a) -> Self {
        self.functions = Some((Rc::new(f), Rc::new(g)));
        self
    }

    /// Container-returning samples for left identity and associativity
    pub fn kleisli(
        mut self,
        f: impl Fn(A) -> K::Container<'a, A> + 'a,
        g: impl Fn(A) -> K::Container<'a, A> + 'a,
    ) -> Self {
        self.kleisli = Some((Rc::new(f), Rc::new(g)));
        self
    }

    pub fn observer(mut self, observer: impl Observer + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Check every law, comparing the two sides of each equation via `observe`.
    ///
    /// `observe` turns a container into something comparable. For opaque containers such as
    /// `Deferred` this is where the container gets settled.
    pub fn verify<O, F>(&self, observe: F) -> LawReport
    where
        O: PartialEq + Debug,
        F: Fn(K::Container<'a, A>) -> O,
    {
        let _span = tracing::debug_span!("verify_laws", kind = std::any::type_name::<K>()).entered();

        let outcomes: Vec<LawOutcome> = Law::ALL
            .iter()
            .map(|&law| {
                let verdict = match self.sides(law) {
                    None => Verdict::Skipped,
                    Some((left, right)) => {
                        let (left, right) = (observe(left), observe(right));
                        if left == right {
                            Verdict::Holds
                        } else {
                            Verdict::Violated {
                                left: format!("{left:?}"),
                                right: format!("{right:?}"),
                            }
                        }
                    }
                };
                self.observer.notify(&Event::Law {
                    law,
                    verdict: verdict.clone(),
                });
                LawOutcome { law, verdict }
            })
            .collect();

        let report = LawReport { outcomes };
        debug!(
            violated = report.violations().count(),
            certified = report.certified(),
            "laws verified"
        );
        report
    }

    /// [`LawVerifier::verify`] using the containers themselves as the observation
    pub fn verify_structural(&self) -> LawReport
    where
        K::Container<'a, A>: PartialEq + Debug,
    {
        self.verify(|c| c)
    }

    // both sides of the law's equation, or None if the samples it needs are missing
    fn sides(&self, law: Law) -> Option<(K::Container<'a, A>, K::Container<'a, A>)> {
        let make = &self.make;
        match law {
            Law::Identity => Some((K::map(make(), |x| x), make())),
            Law::Composition => {
                let (f, g) = self.functions.as_ref()?;
                let (f1, g1) = (Rc::clone(f), Rc::clone(g));
                let left = K::map(K::map(make(), move |x| f1(x)), move |x| g1(x));
                let (f2, g2) = (Rc::clone(f), Rc::clone(g));
                let right = K::map(make(), move |x| g2(f2(x)));
                Some((left, right))
            }
            Law::LeftIdentity => {
                let (f, _) = self.kleisli.as_ref()?;
                let f1 = Rc::clone(f);
                let left = K::flat_map(K::lift(self.value.clone()), move |x| f1(x));
                let right = f(self.value.clone());
                Some((left, right))
            }
            Law::RightIdentity => Some((K::flat_map(make(), |x| K::lift(x)), make())),
            Law::Associativity => {
                let (f, g) = self.kleisli.as_ref()?;
                let (f1, g1) = (Rc::clone(f), Rc::clone(g));
                let left = K::flat_map(K::flat_map(make(), move |x| f1(x)), move |x| g1(x));
                let (f2, g2) = (Rc::clone(f), Rc::clone(g));
                let right = K::flat_map(make(), move |x| {
                    let g2 = Rc::clone(&g2);
                    K::flat_map(f2(x), move |y| g2(y))
                });
                Some((left, right))
            }
        }
    }
}
