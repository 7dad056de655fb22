//! Free-function forms of the capability operations, usable with any container kind.
//!
//! These forward to the kind's own [`Mappable::map`]/[`FlatMappable::flat_map`], never to a
//! specific container, and take the function first so they can be partially applied.
use std::rc::Rc;

use crate::kind::{FlatMappable, Mappable};

/// Wrap a raw value into the minimal single-value form of container kind `K`
pub fn lift<'a, K: FlatMappable, A: 'a>(value: A) -> K::Container<'a, A> {
    K::lift(value)
}

pub fn map<'a, K, A, B, F>(f: F, input: K::Container<'a, A>) -> K::Container<'a, B>
where
    K: Mappable,
    A: 'a,
    B: 'a,
    F: FnMut(A) -> B + 'a,
{
    K::map(input, f)
}

pub fn flat_map<'a, K, A, B, F>(f: F, input: K::Container<'a, A>) -> K::Container<'a, B>
where
    K: FlatMappable,
    A: 'a,
    B: 'a,
    F: FnMut(A) -> K::Container<'a, B> + 'a,
{
    K::flat_map(input, f)
}

/// `map` with only the function supplied. See [`Mapper`].
pub fn mapper<F>(f: F) -> Mapper<F> {
    Mapper { f: Rc::new(f) }
}

/// A reusable mapping function, applicable to a container of any kind.
///
/// ```rust
/// # use kleisli::{mapper, Identity, PartiallyApplied, Sequence};
/// let double = mapper(|n: i32| n * 2);
///
/// let id = double.apply::<Identity<PartiallyApplied>, _, _>(Identity(4));
/// let seq = double.apply::<Sequence<PartiallyApplied>, _, _>(Sequence::from(vec![1, 2]));
///
/// assert_eq!(id, Identity(8));
/// assert_eq!(seq, Sequence::from(vec![2, 4]));
/// ```
pub struct Mapper<F> {
    f: Rc<F>,
}

impl<F> Clone for Mapper<F> {
    fn clone(&self) -> Self {
        Mapper {
            f: Rc::clone(&self.f),
        }
    }
}

impl<F> Mapper<F> {
    pub fn apply<'a, K, A, B>(&self, input: K::Container<'a, A>) -> K::Container<'a, B>
    where
        K: Mappable,
        A: 'a,
        B: 'a,
        F: Fn(A) -> B + 'a,
    {
        let f = Rc::clone(&self.f);
        K::map(input, move |a| f(a))
    }
}

/// `flat_map` with only the function supplied, yielding a reusable single-argument function
/// over containers of kind `K`.
pub fn flat_mapper<'a, K, A, B, F>(f: F) -> impl Fn(K::Container<'a, A>) -> K::Container<'a, B> + 'a
where
    K: FlatMappable,
    A: 'a,
    B: 'a,
    F: Fn(A) -> K::Container<'a, B> + 'a,
{
    let f = Rc::new(f);
    move |input| {
        let f = Rc::clone(&f);
        K::flat_map(input, move |a| f(a))
    }
}
