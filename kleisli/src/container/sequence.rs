use crate::kind::{FlatMappable, Mappable, PartiallyApplied};

/// An ordered collection of zero or more values. Order is significant and preserved by `map`.
///
/// `flat_map` concatenates the sub-sequences produced for each element, in element order,
/// flattening exactly one level:
///
/// ```rust
/// # use kleisli::{FlatMappable, PartiallyApplied, Sequence};
/// let seq = Sequence::from(vec![1, 2, 3]);
/// let out = Sequence::<PartiallyApplied>::flat_map(seq, |n| Sequence::repeat(n, n));
///
/// assert_eq!(out, Sequence::from(vec![1, 2, 2, 3, 3, 3]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sequence<A>(Vec<A>);

impl<A> Sequence<A> {
    pub fn new() -> Self {
        Sequence(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[A] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<A> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.0.iter()
    }
}

impl<A: Clone> Sequence<A> {
    /// `n` copies of `value`
    pub fn repeat(value: A, n: usize) -> Self {
        Sequence(vec![value; n])
    }
}

impl<A> From<Vec<A>> for Sequence<A> {
    fn from(v: Vec<A>) -> Self {
        Sequence(v)
    }
}

impl<A> FromIterator<A> for Sequence<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Sequence(iter.into_iter().collect())
    }
}

impl<A> IntoIterator for Sequence<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'s, A> IntoIterator for &'s Sequence<A> {
    type Item = &'s A;
    type IntoIter = std::slice::Iter<'s, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Mappable for Sequence<PartiallyApplied> {
    type Container<'a, X> = Sequence<X>
    where
        Self: 'a,
        X: 'a;

    #[inline(always)]
    fn map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        f: impl FnMut(A) -> B + 'a,
    ) -> Self::Container<'a, B> {
        Sequence(input.0.into_iter().map(f).collect())
    }
}

impl FlatMappable for Sequence<PartiallyApplied> {
    #[inline(always)]
    fn lift<'a, A: 'a>(value: A) -> Self::Container<'a, A> {
        Sequence(vec![value])
    }

    fn flat_map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        f: impl FnMut(A) -> Self::Container<'a, B> + 'a,
    ) -> Self::Container<'a, B> {
        Sequence(input.0.into_iter().flat_map(f).collect())
    }
}
