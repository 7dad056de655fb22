//! Small pipelines shared by the tests and the benchmarks.
use std::rc::Rc;

use kleisli::{compose_m, curry2, Identity, PartiallyApplied, Sequence, Step};

pub type Id = Identity<PartiallyApplied>;
pub type Seq = Sequence<PartiallyApplied>;

/// `n` copies of `n`
pub fn replicate(n: u32) -> Sequence<u32> {
    Sequence::repeat(n, n as usize)
}

pub fn divisors(n: u32) -> Sequence<u32> {
    (1..=n).filter(|d| n % d == 0).collect()
}

/// every divisor of `n`, each replicated by its own value
pub fn replicated_divisors() -> impl Fn(u32) -> Sequence<u32> {
    compose_m!(Seq; replicate, divisors)
}

pub fn step(n: u64) -> Identity<u64> {
    Identity(n.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
}

/// `depth` identity steps composed via [`kleisli::compose_m`]
pub fn identity_chain(depth: usize) -> kleisli::Result<Step<'static, Id, u64>> {
    let steps: Vec<Step<'static, Id, u64>> = (0..depth)
        .map(|_| Rc::new(step) as Step<'static, Id, u64>)
        .collect();
    kleisli::compose_m::<Id, u64>(steps)
}

/// the same `depth` steps as [`identity_chain`], applied directly
pub fn direct_chain(depth: usize, seed: u64) -> u64 {
    (0..depth).fold(seed, |n, _| step(n).into_inner())
}

pub fn scaled_offset() -> impl Fn(i64) -> Box<dyn Fn(i64) -> i64> {
    curry2(|scale: i64, n: i64| scale * n + 1)
}
