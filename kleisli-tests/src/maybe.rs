use kleisli::{FlatMappable, Mappable, PartiallyApplied};
use proptest::prelude::*;

/// An optional value, defined outside of `kleisli` to exercise the container traits from a
/// downstream crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maybe<A> {
    Just(A),
    Nothing,
}

impl<A> From<Option<A>> for Maybe<A> {
    fn from(value: Option<A>) -> Self {
        match value {
            Some(a) => Maybe::Just(a),
            None => Maybe::Nothing,
        }
    }
}

impl Mappable for Maybe<PartiallyApplied> {
    type Container<'a, X> = Maybe<X>
    where
        Self: 'a,
        X: 'a;

    #[inline(always)]
    fn map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        mut f: impl FnMut(A) -> B + 'a,
    ) -> Self::Container<'a, B> {
        match input {
            Maybe::Just(a) => Maybe::Just(f(a)),
            Maybe::Nothing => Maybe::Nothing,
        }
    }
}

impl FlatMappable for Maybe<PartiallyApplied> {
    fn lift<'a, A: 'a>(value: A) -> Self::Container<'a, A> {
        Maybe::Just(value)
    }

    #[inline(always)]
    fn flat_map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        mut f: impl FnMut(A) -> Self::Container<'a, B> + 'a,
    ) -> Self::Container<'a, B> {
        match input {
            Maybe::Just(a) => f(a),
            Maybe::Nothing => Maybe::Nothing,
        }
    }
}

pub fn arb_maybe() -> impl Strategy<Value = Maybe<i32>> {
    prop_oneof![
        4 => any::<i32>().prop_map(Maybe::Just),
        1 => Just(Maybe::Nothing),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use kleisli::{compose_m, lift};

    type M = Maybe<PartiallyApplied>;

    fn checked_half(n: i32) -> Maybe<i32> {
        if n % 2 == 0 {
            Maybe::Just(n / 2)
        } else {
            Maybe::Nothing
        }
    }

    #[test]
    fn nothing_short_circuits_the_pipeline() {
        let quarter = compose_m!(M; checked_half, checked_half);

        assert_eq!(quarter(12), Maybe::Just(3));
        assert_eq!(quarter(6), Maybe::Nothing);
        assert_eq!(quarter(7), Maybe::Nothing);
    }

    #[test]
    fn lift_is_just() {
        assert_eq!(lift::<M, _>("x"), Maybe::Just("x"));
        assert_eq!(Maybe::from(None::<u8>), Maybe::Nothing);
    }
}
