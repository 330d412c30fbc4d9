//! Role gates.
//!
//! A `RoleRule` is a literal allow-list. The named constructors spell out
//! `Role::Admin` wherever admins are meant to pass; nothing is inherited.
//! Gates run after `access::apply`, but still deny when no identity is present.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::domain::{Identity, Role, satisfies};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRule {
    allowed: Arc<[Role]>,
}

impl RoleRule {
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut allowed: Vec<Role> = Vec::new();
        for role in roles {
            if !allowed.contains(&role) {
                allowed.push(role);
            }
        }
        Self {
            allowed: allowed.into(),
        }
    }

    pub fn admin_only() -> Self {
        Self::any_of([Role::Admin])
    }

    pub fn judge_or_admin() -> Self {
        Self::any_of([Role::Judge, Role::Admin])
    }

    pub fn organizer_or_admin() -> Self {
        Self::any_of([Role::Organizer, Role::Admin])
    }

    /// Human-readable role class, e.g. `admin`, `judge or admin`.
    pub fn describe(&self) -> String {
        let names: Vec<&str> = self.allowed.iter().map(Role::as_str).collect();
        match names.as_slice() {
            [] => "no".to_string(),
            [only] => (*only).to_string(),
            [init @ .., last] => format!("{} or {}", init.join(", "), last),
        }
    }

    pub fn check(&self, identity: Option<&Identity>) -> Result<(), AppError> {
        match identity {
            Some(identity) if satisfies(identity.role, &self.allowed) => Ok(()),
            _ => Err(AppError::forbidden(self.describe())),
        }
    }
}

/// Gate a single route (or method) behind `rule`.
///
/// ```ignore
/// .route("/hackathons", get(list).merge(role::apply(post(create), RoleRule::organizer_or_admin())))
/// ```
pub fn apply<S>(method_router: MethodRouter<S>, rule: RoleRule) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    method_router.route_layer(middleware::from_fn_with_state(rule, role_middleware))
}

async fn role_middleware(
    State(rule): State<RoleRule>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = req.extensions().get::<Identity>();

    if let Err(err) = rule.check(identity) {
        tracing::debug!(
            user_id = ?identity.map(|i| i.id),
            role = ?identity.map(|i| i.role),
            required = %rule.describe(),
            "role check failed"
        );
        return Err(err);
    }

    Ok(next.run(req).await)
}
