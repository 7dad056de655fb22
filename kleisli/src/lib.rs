//! Law-abiding functor and monad abstractions over container kinds, with generic combinators
//! and right-to-left Kleisli composition.
//!
//! A container kind is described by a token implementing [`Mappable`] and [`FlatMappable`].
//! Everything else in the crate ([`map`], [`flat_map`], [`compose_m!`], [`compose_m`],
//! [`LawVerifier`]) is generic over that token and defers to the kind's own operations.
//!
//! ```rust
//! # use kleisli::{compose_m, PartiallyApplied, Sequence};
//! let neighbours = |n: i32| Sequence::from(vec![n - 1, n + 1]);
//! let label = |n: i32| Sequence::from(vec![format!("#{n}")]);
//!
//! let pipeline = compose_m!(Sequence<PartiallyApplied>; label, neighbours);
//!
//! assert_eq!(pipeline(5), Sequence::from(vec!["#4".to_string(), "#6".to_string()]));
//! ```
//!
//! With the default `deferred` feature, the same composition works over asynchronous values;
//! see `Deferred`.
mod combinator;
pub mod compose;
mod container;
pub mod curry;
mod error;
mod kind;
pub mod laws;
pub mod observe;

pub use combinator::{flat_map, flat_mapper, lift, map, mapper, Mapper};
pub use compose::{compose_m, kleisli, Step};
#[cfg(feature = "deferred")]
pub use container::deferred::{Completer, Deferred, DeferredKind, SharedDeferred};
pub use container::{identity::Identity, sequence::Sequence};
pub use curry::{curry, curry2, curry3, Applied, Curried};
pub use error::{KleisliError, Rejected, Result};
pub use kind::{FlatMappable, Mappable, PartiallyApplied};
pub use laws::{Law, LawOutcome, LawReport, LawVerifier, Verdict};
pub use observe::{observed, Event, NoopObserver, Observer, TracingObserver};
