use std::time::Duration;

use kleisli::{compose_m, Completer, Deferred, DeferredKind, Rejected};

// simulated lookup latency
const LATENCY: Duration = Duration::from_millis(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Author,
    Reader,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: &'static str,
    pub role: Role,
}

static DIRECTORY: &[User] = &[User {
    id: 3,
    name: "ada",
    role: Role::Author,
}];

fn lookup(id: u32) -> Option<User> {
    DIRECTORY.iter().find(|user| user.id == id).cloned()
}

/// Look up a user after a short delay. Unknown ids reject with [`Rejected::Absent`].
///
/// Must be awaited inside a tokio runtime with the time driver enabled.
pub fn fetch_user(id: u32) -> Deferred<'static, User> {
    Deferred::new(async move {
        tokio::time::sleep(LATENCY).await;
        let found = lookup(id);
        tracing::debug!(id, found = found.is_some(), "user lookup");
        found.ok_or(Rejected::Absent)
    })
}

/// Synchronous lookup, deferred until first polled
pub fn fetch_user_lazy(id: u32) -> Deferred<'static, User> {
    Deferred::from_producer(move || lookup(id).ok_or(Rejected::Absent))
}

pub fn is_author(user: User) -> Deferred<'static, bool> {
    Deferred::resolved(user.role == Role::Author)
}

/// `id -> settled author flag`: fetch the user, then check their role
pub fn author_check() -> impl Fn(u32) -> Deferred<'static, bool> {
    compose_m!(DeferredKind; is_author, fetch_user)
}

/// A user whose lookup is settled later by whoever holds the [`Completer`]
pub fn pending_user() -> (Completer<User>, Deferred<'static, User>) {
    Deferred::channel()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kleisli::{observed, FlatMappable, TracingObserver};
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn only_user_three_is_an_author() {
        crate::init_tracing();
        let check = author_check();

        assert_eq!(check(3).await, Ok(true));
        for id in [0, 1, 2, 4, 99] {
            assert_eq!(check(id).await, Err(Rejected::Absent));
        }
    }

    #[tokio::test]
    async fn absent_user_skips_the_role_check() {
        let calls = Rc::new(Cell::new(0));
        let counted = {
            let calls = calls.clone();
            move |user: User| {
                calls.set(calls.get() + 1);
                is_author(user)
            }
        };
        let check = compose_m!(DeferredKind; counted, fetch_user_lazy);

        assert_eq!(check(7).await, Err(Rejected::Absent));
        assert_eq!(calls.get(), 0);
        assert_eq!(check(3).await, Ok(true));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn settles_when_the_completer_fires() {
        let (completer, user) = pending_user();
        let role = DeferredKind::flat_map(user, |u: User| Deferred::resolved(u.role));

        tokio::spawn(async move {
            tokio::time::sleep(LATENCY).await;
            completer.resolve(User {
                id: 8,
                name: "grace",
                role: Role::Reader,
            });
        });

        assert_eq!(role.await, Ok(Role::Reader));
    }

    #[tokio::test]
    async fn dropped_completer_rejects() {
        let (completer, user) = pending_user();
        drop(completer);
        assert_eq!(user.await, Err(Rejected::Abandoned));
    }

    #[tokio::test]
    async fn observed_steps_leave_results_unchanged() {
        crate::init_tracing();
        let check = compose_m!(
            DeferredKind;
            observed("is_author", TracingObserver, is_author),
            observed("fetch_user", TracingObserver, fetch_user),
        );
        assert_eq!(check(3).await, Ok(true));
    }
}
