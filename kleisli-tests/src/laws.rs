use crate::maybe::{arb_maybe, Maybe};
use futures::executor::block_on;
use kleisli::{
    Deferred, DeferredKind, Identity, Law, LawVerifier, PartiallyApplied, Rejected, Sequence,
    Verdict,
};
use proptest::prelude::*;

fn bump(n: i32) -> i32 {
    n.wrapping_add(17)
}

fn triple(n: i32) -> i32 {
    n.wrapping_mul(3)
}

proptest! {
    #[test]
    fn identity_satisfies_every_law(x in any::<i32>(), v in any::<i32>()) {
        let report = LawVerifier::<Identity<PartiallyApplied>, i32>::new(move || Identity(x), v)
            .functions(bump, triple)
            .kleisli(|n| Identity(bump(n)), |n| Identity(n ^ 0x5555))
            .verify_structural();
        prop_assert!(report.certified(), "{:?}", report);
    }

    #[test]
    fn sequence_satisfies_every_law(
        xs in prop::collection::vec(any::<i32>(), 0..12),
        v in any::<i32>(),
    ) {
        let report = LawVerifier::<Sequence<PartiallyApplied>, i32>::new(
            move || Sequence::from(xs.clone()),
            v,
        )
        .functions(bump, triple)
        .kleisli(
            |n| Sequence::from(vec![n, bump(n)]),
            |n| if n % 3 == 0 { Sequence::new() } else { Sequence::repeat(n, 2) },
        )
        .verify_structural();
        prop_assert!(report.certified(), "{:?}", report);
    }

    #[test]
    fn maybe_satisfies_every_law(m in arb_maybe(), v in any::<i32>()) {
        let report = LawVerifier::<Maybe<PartiallyApplied>, i32>::new(move || m, v)
            .functions(bump, triple)
            .kleisli(
                |n| if n % 2 == 0 { Maybe::Just(n / 2) } else { Maybe::Nothing },
                |n| Maybe::Just(bump(n)),
            )
            .verify_structural();
        prop_assert!(report.certified(), "{:?}", report);
    }

    #[test]
    fn deferred_satisfies_every_law(x in any::<i32>(), v in any::<i32>(), fail in any::<bool>()) {
        let report = LawVerifier::<DeferredKind, i32>::new(
            move || {
                if fail {
                    Deferred::rejected(Rejected::Failed(format!("no {x}")))
                } else {
                    Deferred::from_producer(move || Ok(x))
                }
            },
            v,
        )
        .functions(bump, triple)
        .kleisli(
            |n| if n < 0 { Deferred::rejected(Rejected::Absent) } else { Deferred::resolved(bump(n)) },
            |n| Deferred::new(async move { Ok(triple(n)) }),
        )
        .verify(block_on);
        prop_assert!(report.certified(), "{:?}", report);
    }

    #[test]
    fn verifying_twice_gives_the_same_report(xs in prop::collection::vec(any::<i32>(), 0..6)) {
        let verifier = LawVerifier::<Sequence<PartiallyApplied>, i32>::new(
            move || Sequence::from(xs.clone()),
            1,
        )
        .functions(bump, triple)
        .kleisli(|n| Sequence::from(vec![n]), |n| Sequence::from(vec![n, n]));

        prop_assert_eq!(verifier.verify_structural(), verifier.verify_structural());
    }
}

// a kind whose flat_map only keeps the first result of each continuation
enum FirstOnly {}

impl kleisli::Mappable for FirstOnly {
    type Container<'a, X> = Vec<X>
    where
        Self: 'a,
        X: 'a;

    fn map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        f: impl FnMut(A) -> B + 'a,
    ) -> Self::Container<'a, B> {
        input.into_iter().map(f).collect()
    }
}

impl kleisli::FlatMappable for FirstOnly {
    fn lift<'a, A: 'a>(value: A) -> Self::Container<'a, A> {
        vec![value]
    }

    fn flat_map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        f: impl FnMut(A) -> Self::Container<'a, B> + 'a,
    ) -> Self::Container<'a, B> {
        input.into_iter().map(f).filter_map(|v| v.into_iter().next()).collect()
    }
}

#[test]
fn violations_are_reported_per_law_without_panicking() {
    crate::init_tracing();
    let recorder = kleisli_record::Recorder::new("first-only");

    let report = LawVerifier::<FirstOnly, i32>::new(|| vec![1, 2], 5)
        .functions(bump, triple)
        .kleisli(|n| vec![n + 1, n + 2], |n| vec![n * 10, n])
        .observer(&recorder)
        .verify_structural();

    assert_eq!(report.verdict(Law::Identity), Some(&Verdict::Holds));
    assert_eq!(report.verdict(Law::RightIdentity), Some(&Verdict::Holds));
    assert_eq!(
        report.verdict(Law::LeftIdentity),
        Some(&Verdict::Violated {
            left: "[6]".to_string(),
            right: "[6, 7]".to_string(),
        })
    );
    assert!(!report.all_hold());

    let trace = recorder.finish();
    assert_eq!(trace.actions.len(), Law::ALL.len());
    let json = kleisli_record::report_json(&report).unwrap();
    assert!(json.contains("\"verdict\":\"violated\""));
}
