use crate::kind::{FlatMappable, Mappable, PartiallyApplied};

/// A container holding exactly one value, with no additional structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    pub fn new(value: A) -> Self {
        Identity(value)
    }

    pub fn value(&self) -> &A {
        &self.0
    }

    pub fn into_inner(self) -> A {
        self.0
    }
}

impl<A> From<A> for Identity<A> {
    fn from(value: A) -> Self {
        Identity(value)
    }
}

impl Mappable for Identity<PartiallyApplied> {
    type Container<'a, X> = Identity<X>
    where
        Self: 'a,
        X: 'a;

    #[inline(always)]
    fn map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        mut f: impl FnMut(A) -> B + 'a,
    ) -> Self::Container<'a, B> {
        Identity(f(input.0))
    }
}

impl FlatMappable for Identity<PartiallyApplied> {
    #[inline(always)]
    fn lift<'a, A: 'a>(value: A) -> Self::Container<'a, A> {
        Identity(value)
    }

    // single element, so there is nothing to flatten: the continuation's box is the result
    #[inline(always)]
    fn flat_map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        mut f: impl FnMut(A) -> Self::Container<'a, B> + 'a,
    ) -> Self::Container<'a, B> {
        f(input.0)
    }
}
