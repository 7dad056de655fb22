use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use tokio::sync::oneshot;

use crate::error::Rejected;
use crate::kind::{FlatMappable, Mappable, PartiallyApplied};

/// A value realized at some later point via an asynchronous completion, settling exactly once
/// to either a value or a failure of type `E`.
///
/// Deferreds are single-threaded: continuations attached via `map`/`flat_map` run on whichever
/// task drives the final future, strictly after the value they depend on is available.
/// A failed Deferred skips every continuation attached after it and settles to the same failure.
///
/// ```rust
/// # use kleisli::{Deferred, DeferredKind, FlatMappable, Mappable};
/// let d = Deferred::<_>::resolved(20);
/// let d = DeferredKind::map(d, |n| n + 1);
/// let d = DeferredKind::flat_map(d, |n| Deferred::resolved(n * 2));
///
/// assert_eq!(futures::executor::block_on(d), Ok(42));
/// ```
///
/// Composed steps wait on each other, and an absent value short-circuits the rest:
///
/// ```rust
/// # use kleisli::{compose_m, Deferred, DeferredKind, Rejected};
/// #[derive(Clone)]
/// struct User {
///     role: &'static str,
/// }
///
/// let find_user = |id: u32| Deferred::from_option((id == 3).then(|| User { role: "Author" }));
/// let is_author = |user: User| Deferred::resolved(user.role == "Author");
///
/// let check = compose_m!(DeferredKind; is_author, find_user);
///
/// assert_eq!(futures::executor::block_on(check(3)), Ok(true));
/// assert_eq!(futures::executor::block_on(check(4)), Err(Rejected::Absent));
/// ```
pub struct Deferred<'a, A, E = Rejected> {
    inner: LocalBoxFuture<'a, Result<A, E>>,
}

/// Kind token for [`Deferred`] containers failing with `E`.
pub type DeferredKind<E = Rejected> = Deferred<'static, PartiallyApplied, E>;

impl<'a, A: 'a, E: 'a> Deferred<'a, A, E> {
    pub fn new(future: impl Future<Output = Result<A, E>> + 'a) -> Self {
        Deferred {
            inner: future.boxed_local(),
        }
    }

    /// An already-settled Deferred holding `value`
    pub fn resolved(value: A) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    /// An already-settled Deferred holding the failure `error`
    pub fn rejected(error: E) -> Self {
        Self::new(futures::future::ready(Err(error)))
    }

    /// Runs `producer` the first time this Deferred is polled, never before
    pub fn from_producer(producer: impl FnOnce() -> Result<A, E> + 'a) -> Self {
        Self::new(futures::future::lazy(move |_| producer()))
    }

    /// The underlying future, settling to the value or failure
    pub fn settle(self) -> LocalBoxFuture<'a, Result<A, E>> {
        self.inner
    }
}

impl<'a, A: 'a> Deferred<'a, A, Rejected> {
    /// Settles to `Rejected::Absent` for `None`
    pub fn from_option(value: Option<A>) -> Self {
        match value {
            Some(value) => Self::resolved(value),
            None => Self::rejected(Rejected::Absent),
        }
    }
}

impl<'a, A: 'a, E: From<Rejected> + 'a> Deferred<'a, A, E> {
    /// A pending Deferred paired with the [`Completer`] that settles it.
    ///
    /// If the completer is dropped without settling, the Deferred rejects with
    /// `Rejected::Abandoned`.
    pub fn channel() -> (Completer<A, E>, Self) {
        let (send, receive) = oneshot::channel();
        let deferred = Deferred::new(async move {
            match receive.await {
                Ok(settled) => settled,
                Err(_dropped) => Err(Rejected::Abandoned.into()),
            }
        });

        (Completer { send }, deferred)
    }
}

impl<'a, A: Clone + 'a, E: Clone + 'a> Deferred<'a, A, E> {
    /// Converts this Deferred into a handle that any number of continuations can attach to
    /// without re-running the producer.
    pub fn shared(self) -> SharedDeferred<'a, A, E> {
        SharedDeferred {
            inner: self.inner.shared(),
        }
    }
}

impl<'a, A, E> Future for Deferred<'a, A, E> {
    type Output = Result<A, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<'a, A, E> fmt::Debug for Deferred<'a, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

/// The sending half of [`Deferred::channel`]. Consumed on use, so it settles at most once.
pub struct Completer<A, E = Rejected> {
    send: oneshot::Sender<Result<A, E>>,
}

impl<A, E> Completer<A, E> {
    /// Returns false if the paired Deferred was already dropped
    pub fn resolve(self, value: A) -> bool {
        self.settle(Ok(value))
    }

    /// Returns false if the paired Deferred was already dropped
    pub fn reject(self, error: E) -> bool {
        self.settle(Err(error))
    }

    pub fn settle(self, settled: Result<A, E>) -> bool {
        self.send.send(settled).is_ok()
    }
}

impl<A, E> fmt::Debug for Completer<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completer")
            .field("closed", &self.send.is_closed())
            .finish()
    }
}

/// A cloneable handle over one underlying Deferred. See [`Deferred::shared`].
#[derive(Clone)]
pub struct SharedDeferred<'a, A, E = Rejected> {
    inner: Shared<LocalBoxFuture<'a, Result<A, E>>>,
}

impl<'a, A: Clone + 'a, E: Clone + 'a> SharedDeferred<'a, A, E> {
    /// A new Deferred settling to the same outcome as every other attached Deferred
    pub fn attach(&self) -> Deferred<'a, A, E> {
        Deferred::new(self.inner.clone())
    }

    /// The settled outcome, if the underlying producer has completed
    pub fn peek(&self) -> Option<&Result<A, E>> {
        self.inner.peek()
    }
}

impl<E: 'static> Mappable for Deferred<'static, PartiallyApplied, E> {
    type Container<'a, X> = Deferred<'a, X, E>
    where
        Self: 'a,
        X: 'a;

    fn map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        f: impl FnMut(A) -> B + 'a,
    ) -> Self::Container<'a, B> {
        Deferred::new(input.inner.map(move |settled| settled.map(f)))
    }
}

impl<E: 'static> FlatMappable for Deferred<'static, PartiallyApplied, E> {
    fn lift<'a, A: 'a>(value: A) -> Self::Container<'a, A> {
        Deferred::resolved(value)
    }

    // two hops, one wait: the outer value first, then whatever the continuation returns
    fn flat_map<'a, A: 'a, B: 'a>(
        input: Self::Container<'a, A>,
        mut f: impl FnMut(A) -> Self::Container<'a, B> + 'a,
    ) -> Self::Container<'a, B> {
        Deferred::new(async move {
            match input.inner.await {
                Ok(a) => f(a).inner.await,
                Err(e) => Err(e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Deferred, DeferredKind};
    use crate::error::Rejected;
    use crate::kind::{FlatMappable, Mappable};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    type K = DeferredKind;

    #[test]
    fn map_and_flat_map_settle() {
        let d = K::map(Deferred::resolved(2), |n: i32| n + 1);
        let d = K::flat_map(d, |n| Deferred::resolved(n * 10));
        assert_eq!(block_on(d), Ok(30));
    }

    #[test]
    fn failure_skips_continuations() {
        let calls = Rc::new(Cell::new(0));
        let c1 = calls.clone();
        let c2 = calls.clone();

        let d = K::flat_map(Deferred::<u32>::rejected(Rejected::Absent), move |n| {
            c1.set(c1.get() + 1);
            Deferred::resolved(n)
        });
        let d = K::map(d, move |n| {
            c2.set(c2.get() + 1);
            n
        });

        assert_eq!(block_on(d), Err(Rejected::Absent));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn producer_is_lazy() {
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let d = Deferred::<_>::from_producer(move || {
            r.set(r.get() + 1);
            Ok("done")
        });
        assert_eq!(runs.get(), 0);
        assert_eq!(block_on(d), Ok("done"));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn continuations_run_after_completion_in_chain_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (completer, d) = Deferred::<u8>::channel();

        let l1 = log.clone();
        let l2 = log.clone();
        let d = K::map(d, move |n| {
            l1.borrow_mut().push(format!("first {n}"));
            n + 1
        });
        let d = K::map(d, move |n| {
            l2.borrow_mut().push(format!("second {n}"));
            n
        });

        log.borrow_mut().push("resolve".to_string());
        assert!(completer.resolve(1));

        assert_eq!(block_on(d), Ok(2));
        assert_eq!(*log.borrow(), vec!["resolve", "first 1", "second 2"]);
    }

    #[test]
    fn dropped_completer_abandons() {
        let (completer, d) = Deferred::<u8>::channel();
        drop(completer);
        assert_eq!(block_on(d), Err(Rejected::Abandoned));
    }

    #[test]
    fn shared_producer_runs_once() {
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let shared = Deferred::<_>::from_producer(move || {
            r.set(r.get() + 1);
            Ok(7)
        })
        .shared();

        let a = K::map(shared.attach(), |n| n + 1);
        let b = K::map(shared.attach(), |n| n * 2);

        assert_eq!(block_on(a), Ok(8));
        assert_eq!(block_on(b), Ok(14));
        assert_eq!(runs.get(), 1);
        assert_eq!(shared.peek(), Some(&Ok(7)));
    }

    #[test]
    fn absent_option_rejects() {
        assert_eq!(block_on(Deferred::from_option(None::<u8>)), Err(Rejected::Absent));
        assert_eq!(block_on(Deferred::from_option(Some(1))), Ok(1));
    }
}
