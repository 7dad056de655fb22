//! Partial application of fixed-arity functions.
//!
//! [`curry2`] and [`curry3`] produce chains of single-argument closures whose arity is checked
//! by the type system. [`curry`] works over functions taking 0 to 4 arguments of one type and
//! accepts any number of those arguments per call, failing fast once the function's declared
//! arity would be exceeded.
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::{KleisliError, Result};

/// `curry2(f)(a)(b) == f(a, b)`
pub fn curry2<'a, A, B, R, F>(f: F) -> impl Fn(A) -> Box<dyn Fn(B) -> R + 'a> + 'a
where
    F: Fn(A, B) -> R + 'a,
    A: Clone + 'a,
    B: 'a,
    R: 'a,
{
    let f = Rc::new(f);
    move |a| -> Box<dyn Fn(B) -> R + 'a> {
        let f = Rc::clone(&f);
        Box::new(move |b| f(a.clone(), b))
    }
}

/// `curry3(f)(a)(b)(c) == f(a, b, c)`
#[allow(clippy::type_complexity)]
pub fn curry3<'a, A, B, C, R, F>(
    f: F,
) -> impl Fn(A) -> Box<dyn Fn(B) -> Box<dyn Fn(C) -> R + 'a> + 'a> + 'a
where
    F: Fn(A, B, C) -> R + 'a,
    A: Clone + 'a,
    B: Clone + 'a,
    C: 'a,
    R: 'a,
{
    let f = Rc::new(f);
    move |a| -> Box<dyn Fn(B) -> Box<dyn Fn(C) -> R + 'a> + 'a> {
        let f = Rc::clone(&f);
        Box::new(move |b| -> Box<dyn Fn(C) -> R + 'a> {
            let f = Rc::clone(&f);
            let a = a.clone();
            Box::new(move |c| f(a.clone(), b.clone(), c))
        })
    }
}

/// A function whose parameter count is known when it is wrapped.
///
/// `Args` is a marker, inferred from the function's signature, that keeps the
/// implementations for different arities apart.
pub trait Arity<A, R, Args> {
    const ARITY: usize;

    /// Invoke with exactly `ARITY` arguments
    fn invoke(&self, args: Vec<A>) -> Result<R>;
}

impl<F, A, R> Arity<A, R, ()> for F
where
    F: Fn() -> R,
{
    const ARITY: usize = 0;

    fn invoke(&self, args: Vec<A>) -> Result<R> {
        if !args.is_empty() {
            return Err(KleisliError::ArityMismatch {
                expected: 0,
                actual: args.len(),
            });
        }
        Ok(self())
    }
}

macro_rules! impl_arity {
    (@a $arg:ident) => { A };
    ($n:literal; $marker:ty; $($arg:ident),+) => {
        impl<F, A, R> Arity<A, R, $marker> for F
        where
            F: Fn($(impl_arity!(@a $arg)),+) -> R,
        {
            const ARITY: usize = $n;

            fn invoke(&self, args: Vec<A>) -> Result<R> {
                let actual = args.len();
                let [$($arg),+]: [A; $n] = args
                    .try_into()
                    .map_err(|_| KleisliError::ArityMismatch { expected: $n, actual })?;
                Ok(self($($arg),+))
            }
        }
    };
}

impl_arity!(1; (A,); a);
impl_arity!(2; (A, A); a, b);
impl_arity!(3; (A, A, A); a, b, c);
impl_arity!(4; (A, A, A, A); a, b, c, d);

/// Wrap `f`, reading its arity from its signature. Zero-arity functions are invoked
/// immediately.
///
/// ```rust
/// # use kleisli::curry;
/// fn add(a: i32, b: i32) -> i32 {
///     a + b
/// }
///
/// let one_at_a_time = curry(add)?.call([3])?.call([4])?;
/// let both_at_once = curry(add)?.call([3, 4])?;
///
/// assert_eq!(one_at_a_time.complete(), Some(7));
/// assert_eq!(both_at_once.complete(), Some(7));
/// # Ok::<(), kleisli::KleisliError>(())
/// ```
pub fn curry<A, R, F, Args>(f: F) -> Result<Applied<A, R, F, Args>>
where
    A: Clone,
    F: Arity<A, R, Args>,
{
    Curried {
        f: Rc::new(f),
        args: Vec::new(),
        _marker: PhantomData,
    }
    .call(std::iter::empty())
}

/// A function with some, but not all, of its arguments supplied
pub struct Curried<A, R, F, Args> {
    f: Rc<F>,
    args: Vec<A>,
    _marker: PhantomData<fn(Args) -> R>,
}

impl<A: Clone, R, F, Args> Clone for Curried<A, R, F, Args> {
    fn clone(&self) -> Self {
        Curried {
            f: Rc::clone(&self.f),
            args: self.args.clone(),
            _marker: PhantomData,
        }
    }
}

impl<A, R, F, Args> Curried<A, R, F, Args>
where
    A: Clone,
    F: Arity<A, R, Args>,
{
    pub fn arity(&self) -> usize {
        F::ARITY
    }

    /// Arguments accumulated so far
    pub fn supplied(&self) -> &[A] {
        &self.args
    }

    /// Supply more arguments. `self` is left untouched, so a partial application can be
    /// extended in several different ways.
    pub fn call(&self, args: impl IntoIterator<Item = A>) -> Result<Applied<A, R, F, Args>> {
        let mut all = self.args.clone();
        all.extend(args);

        if all.len() > F::ARITY {
            return Err(KleisliError::TooManyArguments {
                arity: F::ARITY,
                supplied: all.len(),
            });
        }

        if all.len() == F::ARITY {
            Ok(Applied::Complete(self.f.invoke(all)?))
        } else {
            Ok(Applied::Partial(Curried {
                f: Rc::clone(&self.f),
                args: all,
                _marker: PhantomData,
            }))
        }
    }
}

/// The outcome of supplying arguments to a curried function
pub enum Applied<A, R, F, Args> {
    Complete(R),
    Partial(Curried<A, R, F, Args>),
}

impl<A, R, F, Args> Applied<A, R, F, Args>
where
    A: Clone,
    F: Arity<A, R, Args>,
{
    /// Supply more arguments. A complete application accepts no further arguments.
    pub fn call(self, args: impl IntoIterator<Item = A>) -> Result<Self> {
        match self {
            Applied::Partial(curried) => curried.call(args),
            Applied::Complete(result) => {
                let extra = args.into_iter().count();
                if extra == 0 {
                    Ok(Applied::Complete(result))
                } else {
                    Err(KleisliError::TooManyArguments {
                        arity: F::ARITY,
                        supplied: F::ARITY + extra,
                    })
                }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Applied::Complete(_))
    }

    pub fn complete(self) -> Option<R> {
        match self {
            Applied::Complete(result) => Some(result),
            Applied::Partial(_) => None,
        }
    }

    pub fn partial(self) -> Option<Curried<A, R, F, Args>> {
        match self {
            Applied::Complete(_) => None,
            Applied::Partial(curried) => Some(curried),
        }
    }
}
