//! Scope guards.

use super::{BuildContext, GroupRegistry};
use crate::core::GroupId;
use std::ops::{Deref, DerefMut};
use tracing::{debug, error};

/// An open group.
///
/// While the guard lives its group is the current attachment point: tasks and
/// groups created through it land inside the group. Dropping the guard closes
/// the group, on every exit path including early returns and panics. Nothing
/// added inside the scope is rolled back.
///
/// The guard dereferences to the [`BuildContext`], so nested scopes are opened
/// from it and cannot outlive it.
#[must_use = "the group closes as soon as the scope is dropped"]
pub struct Scope<'a, H = ()> {
    ctx: &'a mut BuildContext,
    id: GroupId,
    handle: H,
}

impl<'a, H> Scope<'a, H> {
    pub(super) fn new(ctx: &'a mut BuildContext, id: GroupId, handle: H) -> Self {
        Self { ctx, id, handle }
    }

    /// Returns the group this scope opened.
    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the value handed back on entry: the loop arguments for a
    /// parallel-for, `()` otherwise.
    #[must_use]
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Closes the scope explicitly.
    pub fn close(self) {}
}

impl<H> Deref for Scope<'_, H> {
    type Target = BuildContext;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl<H> DerefMut for Scope<'_, H> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl<H> Drop for Scope<'_, H> {
    fn drop(&mut self) {
        // Only our own group is popped; a foreign top stays open and makes
        // `finish` fail with `ScopesStillOpen`.
        match self.ctx.current_group() {
            Ok(top) if top == self.id => match self.ctx.pop_group() {
                Ok(popped) => debug!(group = %popped, "Closed scope"),
                Err(e) => error!(group = %self.id, error = %e, "Failed to close scope"),
            },
            Ok(top) => error!(expected = %self.id, current = %top, "Scope closed out of order"),
            Err(e) => error!(group = %self.id, error = %e, "Failed to close scope"),
        }
    }
}

impl<H: std::fmt::Debug> std::fmt::Debug for Scope<'_, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .finish()
    }
}
