use kleisli::{compose_m, observed, LawVerifier, PartiallyApplied, Sequence};
use kleisli_record::Recorder;

type Seq = Sequence<PartiallyApplied>;

fn main() -> std::io::Result<()> {
    let recorder = Recorder::new("divisors, replicated");

    let pipeline = compose_m!(
        Seq;
        observed("replicate", &recorder, |n: u32| Sequence::repeat(n, n as usize)),
        observed("divisors", &recorder, |n: u32| {
            (1..=n).filter(|d| n % d == 0).collect::<Sequence<u32>>()
        }),
    );

    recorder.label("Run", "divisors of 6, each repeated by its value");
    let out = pipeline(6);
    assert_eq!(out.len(), 12);

    recorder.label("Laws", "sequence laws over the same steps");
    let report = LawVerifier::<Seq, u32>::new(|| Sequence::from(vec![1, 4, 6]), 6)
        .functions(|n| n + 1, |n| n * 2)
        .kleisli(|n| Sequence::repeat(n, 2), |n| Sequence::from(vec![n, n + 1]))
        .observer(&recorder)
        .verify_structural();
    assert!(report.certified());

    drop(pipeline);

    let path = std::env::temp_dir().join("kleisli-trace.json");
    recorder.finish().write(&path)?;
    println!("trace written to {}", path.display());

    Ok(())
}
