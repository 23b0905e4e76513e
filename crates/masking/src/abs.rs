//! Interfaces for reading secret values back out of their wrappers.

use crate::{Secret, Strategy};

/// Interface to expose a reference to an inner secret
pub trait PeekInterface<S> {
    /// Only method providing access to the secret value.
    fn peek(&self) -> &S;
}

/// Interface that consumes a secret and returns the inner value.
pub trait ExposeInterface<S> {
    /// Consume the secret and return the inner value
    fn expose(self) -> S;
}

/// Interface to expose a clone of the inner secret of an optional wrapper
pub trait ExposeOptionInterface<S> {
    /// Expose a clone of the inner value, if any.
    fn expose_option(&self) -> S;
}

impl<S, I> ExposeInterface<S> for Secret<S, I>
where
    I: Strategy<S>,
{
    fn expose(self) -> S {
        self.into_inner()
    }
}

impl<S, I> ExposeOptionInterface<Option<S>> for Option<Secret<S, I>>
where
    S: Clone,
    I: Strategy<S>,
{
    fn expose_option(&self) -> Option<S> {
        self.as_ref().map(|secret| secret.peek().clone())
    }
}
