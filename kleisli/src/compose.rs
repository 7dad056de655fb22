//! Right-to-left composition of container-returning functions.
//!
//! Every composition here is generic over a [`FlatMappable`] kind `K`: each step's output is
//! flattened by `K::flat_map`, so the same engine composes pipelines of identities, sequences or
//! deferred values without knowing which.
use std::rc::Rc;

use crate::error::{KleisliError, Result};
use crate::kind::{FlatMappable, Mappable};

/// A boxed, shareable pipeline step `A -> K::Container<B>`
pub type Step<'a, K, A, B = A> = Rc<dyn Fn(A) -> <K as Mappable>::Container<'a, B> + 'a>;

/// Compose two container-returning functions, right to left: `g` runs first, then its output
/// is flattened into `f`.
///
/// ```rust
/// # use kleisli::{compose::kleisli, PartiallyApplied, Sequence};
/// let neighbours = |n: i32| Sequence::from(vec![n - 1, n + 1]);
/// let doubled = |n: i32| Sequence::from(vec![n * 2]);
///
/// let composed = kleisli::<Sequence<PartiallyApplied>, _, _, _, _, _>(doubled, neighbours);
///
/// assert_eq!(composed(5), Sequence::from(vec![8, 12]));
/// ```
pub fn kleisli<'a, K, A, B, C, F, G>(f: F, g: G) -> impl Fn(A) -> K::Container<'a, C> + 'a
where
    K: FlatMappable,
    A: 'a,
    B: 'a,
    C: 'a,
    F: Fn(B) -> K::Container<'a, C> + 'a,
    G: Fn(A) -> K::Container<'a, B> + 'a,
{
    let f = Rc::new(f);
    move |a| {
        let f = Rc::clone(&f);
        K::flat_map(g(a), move |b| f(b))
    }
}

/// Compose any number of container-returning functions, right to left.
///
/// `compose_m!(K; f, g, h)(x)` runs `h` on `x`, then `g` on each value `h` produced, then `f`,
/// flattening via `K::flat_map` at each hop. Each step may change the element type. A single
/// function is returned as-is; zero functions do not compile.
///
/// ```rust
/// # use kleisli::{compose_m, Identity, PartiallyApplied};
/// let parse = |s: &str| Identity(s.len());
/// let double = |n: usize| Identity(n * 2);
///
/// let pipeline = compose_m!(Identity<PartiallyApplied>; double, parse);
///
/// assert_eq!(pipeline("abc"), Identity(6));
/// ```
#[macro_export]
macro_rules! compose_m {
    ($kind:ty; $f:expr $(,)?) => {
        $f
    };
    ($kind:ty; $f:expr, $($rest:expr),+ $(,)?) => {
        $crate::compose::kleisli::<$kind, _, _, _, _, _>($f, $crate::compose_m!($kind; $($rest),+))
    };
}

/// Compose a runtime-sized list of steps over one element type, right to left.
///
/// The last step runs first on the input; the first step is the final continuation. Composing
/// an empty list is an error, since there is no step to produce a container of kind `K`.
pub fn compose_m<'a, K, A>(steps: Vec<Step<'a, K, A>>) -> Result<Step<'a, K, A>>
where
    K: FlatMappable,
    A: 'a,
{
    let mut steps = steps.into_iter();
    let mut composed = steps.next().ok_or(KleisliError::EmptyPipeline)?;

    for g in steps {
        let f = composed;
        composed = Rc::new(move |a| {
            let f = Rc::clone(&f);
            K::flat_map(g(a), move |b| f(b))
        });
    }

    Ok(composed)
}
