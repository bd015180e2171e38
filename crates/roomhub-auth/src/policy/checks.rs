//! Stateless authorization policies.
//!
//! A policy is an ordered list of checks evaluated against
//! `(actor, action, resource owner)`; the first check that produces a
//! decision wins, and a policy that reaches the end without a decision
//! denies. Two policies cover the whole API surface:
//!
//! * [`owner_or_staff`] covers bookings and user profiles: staff act on
//!   anything, owners act on their own rows, hard deletes are staff-only.
//! * [`admin_only_write`] covers the room catalog: reads for anyone,
//!   writes only for administrators.

use uuid::Uuid;

use roomhub_core::error::AppError;
use roomhub_entity::user::UserRole;

/// What the request is trying to do to the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Side-effect-free read.
    Read,
    /// Create, update, or cancel.
    Write,
    /// Hard delete.
    Delete,
}

/// The authenticated principal evaluated by a policy.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    /// The acting user's ID.
    pub user_id: Uuid,
    /// The acting user's role.
    pub role: UserRole,
}

/// Outcome produced by a single check.
#[derive(Debug)]
pub enum Decision {
    /// Stop evaluating and permit the action.
    Allow,
    /// Stop evaluating and reject with this error.
    Deny(AppError),
}

/// A single short-circuiting authorization check.
///
/// Returning `None` passes evaluation to the next check in the policy.
pub trait PolicyCheck: Send + Sync {
    /// Evaluate the check for `(actor, action, owner)`.
    fn evaluate(
        &self,
        actor: Option<&Actor>,
        action: Action,
        owner: Option<Uuid>,
    ) -> Option<Decision>;
}

/// An ordered set of checks short-circuiting on the first decision.
pub struct AccessPolicy {
    checks: Vec<Box<dyn PolicyCheck>>,
}

impl std::fmt::Debug for AccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessPolicy")
            .field("checks", &self.checks.len())
            .finish()
    }
}

impl AccessPolicy {
    /// Build a policy from an ordered list of checks.
    pub fn new(checks: Vec<Box<dyn PolicyCheck>>) -> Self {
        Self { checks }
    }

    /// Evaluate the policy; `Ok(())` means the action is permitted.
    ///
    /// No decision from any check denies: policies must opt resources in.
    pub fn authorize(
        &self,
        actor: Option<&Actor>,
        action: Action,
        owner: Option<Uuid>,
    ) -> Result<(), AppError> {
        for check in &self.checks {
            match check.evaluate(actor, action, owner) {
                Some(Decision::Allow) => return Ok(()),
                Some(Decision::Deny(err)) => return Err(err),
                None => continue,
            }
        }
        Err(default_denial(actor))
    }
}

/// Unauthenticated callers get 401, authenticated ones 403.
fn default_denial(actor: Option<&Actor>) -> AppError {
    match actor {
        None => AppError::authentication("Authentication required"),
        Some(_) => AppError::authorization("You do not have permission to perform this action"),
    }
}

/// Denies anything but a read from an unauthenticated caller.
struct RequireAuthenticated;

impl PolicyCheck for RequireAuthenticated {
    fn evaluate(
        &self,
        actor: Option<&Actor>,
        _action: Action,
        _owner: Option<Uuid>,
    ) -> Option<Decision> {
        match actor {
            Some(_) => None,
            None => Some(Decision::Deny(AppError::authentication(
                "Authentication required",
            ))),
        }
    }
}

/// Allows staff (and admins) to act on any resource.
struct StaffOverride;

impl PolicyCheck for StaffOverride {
    fn evaluate(
        &self,
        actor: Option<&Actor>,
        _action: Action,
        _owner: Option<Uuid>,
    ) -> Option<Decision> {
        match actor {
            Some(actor) if actor.role.is_staff() => Some(Decision::Allow),
            _ => None,
        }
    }
}

/// Allows the resource's owner to read and write it. Hard deletes are not
/// an owner capability and fall through to the default denial.
struct OwnerMatch;

impl PolicyCheck for OwnerMatch {
    fn evaluate(
        &self,
        actor: Option<&Actor>,
        action: Action,
        owner: Option<Uuid>,
    ) -> Option<Decision> {
        let actor = actor?;
        let owner = owner?;
        if actor.user_id == owner && action != Action::Delete {
            Some(Decision::Allow)
        } else {
            None
        }
    }
}

/// Allows side-effect-free reads for everyone, including anonymous callers.
struct AllowReads;

impl PolicyCheck for AllowReads {
    fn evaluate(
        &self,
        _actor: Option<&Actor>,
        action: Action,
        _owner: Option<Uuid>,
    ) -> Option<Decision> {
        match action {
            Action::Read => Some(Decision::Allow),
            _ => None,
        }
    }
}

/// Allows administrators only.
struct AdminOnly;

impl PolicyCheck for AdminOnly {
    fn evaluate(
        &self,
        actor: Option<&Actor>,
        _action: Action,
        _owner: Option<Uuid>,
    ) -> Option<Decision> {
        match actor {
            Some(actor) if actor.role.is_admin() => Some(Decision::Allow),
            _ => None,
        }
    }
}

/// Policy for owned resources (bookings, user profiles): staff act on
/// anything, owners on their own rows; hard deletes require staff.
pub fn owner_or_staff() -> AccessPolicy {
    AccessPolicy::new(vec![
        Box::new(RequireAuthenticated),
        Box::new(StaffOverride),
        Box::new(OwnerMatch),
    ])
}

/// Policy for the room catalog: reads for anyone, writes for admins only.
pub fn admin_only_write() -> AccessPolicy {
    AccessPolicy::new(vec![
        Box::new(AllowReads),
        Box::new(RequireAuthenticated),
        Box::new(AdminOnly),
    ])
}
