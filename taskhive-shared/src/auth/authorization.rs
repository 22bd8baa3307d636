/// Authorization helpers for team access
///
/// This module gates team-scoped operations on membership rows:
///
/// 1. **Membership**: a user may read a team's data only if a membership row
///    for (team, user) exists
/// 2. **Admin role**: inviting and removing members requires an admin
///    membership
///
/// # Example
///
/// ```no_run
/// use taskhive_shared::auth::authorization::{require_admin, require_membership};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, team_id: Uuid, user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// // Any member may list the roster
/// require_membership(&pool, team_id, user_id).await?;
///
/// // Only admins may change it
/// require_admin(&pool, team_id, user_id).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::membership::Membership;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// User is not a member of the team
    #[error("Not a member of team {0}")]
    NotMember(Uuid),

    /// User is a member but not an admin
    #[error("Not an admin of team {0}")]
    NotAdmin(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Checks that a user has a membership row for a team
///
/// # Errors
///
/// Returns `AuthzError::NotMember` if no membership exists
pub async fn require_membership(
    pool: &PgPool,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<Membership, AuthzError> {
    Membership::find_by_team_and_user(pool, team_id, user_id)
        .await?
        .ok_or(AuthzError::NotMember(team_id))
}

/// Checks that a user holds an admin membership for a team
///
/// # Errors
///
/// Returns `AuthzError::NotMember` if no membership exists, or
/// `AuthzError::NotAdmin` if the membership is not an admin one
pub async fn require_admin(
    pool: &PgPool,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<Membership, AuthzError> {
    let membership = require_membership(pool, team_id, user_id).await?;

    if !membership.role.can_manage_members() {
        return Err(AuthzError::NotAdmin(team_id));
    }

    Ok(membership)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authz_error_display() {
        let team_id = Uuid::new_v4();

        let err = AuthzError::NotMember(team_id);
        assert_eq!(err.to_string(), format!("Not a member of team {}", team_id));

        let err = AuthzError::NotAdmin(team_id);
        assert_eq!(err.to_string(), format!("Not an admin of team {}", team_id));
    }
}
