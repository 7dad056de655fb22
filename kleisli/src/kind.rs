/// A container kind whose contents can be mapped over via `map`.
///
/// # Motivation
///
/// Rust has no higher-kinded types, so there is no way to write a trait over `Identity` or
/// `Sequence` on their own. Instead, each container kind is represented by a *token* type
/// implementing this trait, and the generic associated type [`Mappable::Container`] names the
/// container applied to some element type.
///
/// # Implementing this trait
///
/// We can implement a trait for `Option<usize>` but we can't implement a trait for just
/// `Option`, because `Option` is a partially applied type. The convention used throughout this
/// crate is to implement the trait for the container applied to the uninhabited
/// [`PartiallyApplied`] marker, eg
///
/// ```rust
/// # use kleisli::{Mappable, PartiallyApplied};
/// # #[derive(Debug, PartialEq, Eq)]
/// enum MyOption<A> {
///     Some(A),
///     None,
/// }
///
/// impl Mappable for MyOption<PartiallyApplied> {
///     type Container<'a, X> = MyOption<X>
///     where
///         Self: 'a,
///         X: 'a;
///
///     fn map<'a, A: 'a, B: 'a>(
///         input: Self::Container<'a, A>,
///         mut f: impl FnMut(A) -> B + 'a,
///     ) -> Self::Container<'a, B> {
///         match input {
///             MyOption::Some(x) => MyOption::Some(f(x)),
///             MyOption::None => MyOption::None,
///         }
///     }
/// }
///
/// let mapped = MyOption::<PartiallyApplied>::map(MyOption::Some(1), |n| n + 10);
/// assert_eq!(mapped, MyOption::Some(11));
/// ```
///
/// # Laws
///
/// For every container `c` and pure functions `f`, `g`:
///
/// ```text
/// map(c, |x| x)            == c
/// map(map(c, f), g)        == map(c, |x| g(f(x)))
/// ```
///
/// `map` never changes the container kind: the output is always `Self::Container<'a, B>`.
/// [`crate::LawVerifier`] checks both laws for a concrete container.
pub trait Mappable: 'static {
    /// the container type that is mapped over by `map`
    type Container<'a, X>
    where
        Self: 'a,
        X: 'a;

    /// Apply some function `f` to each element inside a container
    fn map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        f: impl FnMut(A) -> B + 'a,
    ) -> Self::Container<'a, B>;
}

/// A [`Mappable`] container kind that can also flatten one level of nesting via `flat_map`.
///
/// # Laws
///
/// ```text
/// flat_map(lift(x), f)               == f(x)
/// flat_map(c, lift)                  == c
/// flat_map(flat_map(c, f), g)        == flat_map(c, |x| flat_map(f(x), g))
/// ```
pub trait FlatMappable: Mappable {
    /// Wrap a raw value into this kind's minimal single-value form
    fn lift<'a, A: 'a>(value: A) -> Self::Container<'a, A>;

    /// Apply `f` to each element and flatten the resulting containers into one
    fn flat_map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        f: impl FnMut(A) -> Self::Container<'a, B> + 'a,
    ) -> Self::Container<'a, B>;
}

/// An uninhabited type used to define [`Mappable`] instances for partially-applied types.
///
/// For example: the `Mappable` instance for `Identity<A>` cannot be written over the
/// partially-applied type `Identity`, so instead we write it over `Identity<PartiallyApplied>`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartiallyApplied {}
