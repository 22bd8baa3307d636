/// Membership model and database operations
///
/// This module provides the Membership model for user-team relationships with
/// role-based access control. It implements a many-to-many relationship
/// between users and teams.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE membership_role AS ENUM ('admin', 'member');
///
/// CREATE TABLE team_members (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     team_id UUID NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role membership_role NOT NULL DEFAULT 'member',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (team_id, user_id)
/// );
/// ```
///
/// Memberships carry their own `id` because removal addresses a membership
/// row directly. The `UNIQUE (team_id, user_id)` constraint is the
/// authoritative guard against duplicate invites racing each other; the
/// handler-level existence check is a pre-flight optimization.
///
/// # Roles
///
/// - **admin**: may invite and remove members; every team keeps at least one
/// - **member**: may read the team's data
///
/// # Example
///
/// ```no_run
/// use taskhive_shared::models::membership::{CreateMembership, Membership, MembershipRole};
/// use taskhive_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let team_id = Uuid::new_v4();
/// let user_id = Uuid::new_v4();
///
/// // Add a user to a team as a plain member
/// let membership = Membership::create(&pool, CreateMembership {
///     team_id,
///     user_id,
///     role: MembershipRole::Member,
/// }).await?;
///
/// // Gate visibility on membership
/// let is_member = Membership::find_by_team_and_user(&pool, team_id, user_id)
///     .await?
///     .is_some();
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Roles a user can hold within a team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    /// May invite and remove members; each team retains at least one
    Admin,

    /// May read the team's data
    Member,
}

impl Default for MembershipRole {
    fn default() -> Self {
        MembershipRole::Member
    }
}

impl MembershipRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Admin => "admin",
            MembershipRole::Member => "member",
        }
    }

    /// Whether this role may invite and remove members
    pub fn can_manage_members(&self) -> bool {
        matches!(self, MembershipRole::Admin)
    }
}

/// Membership model representing a user-team relationship with a role
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    /// Unique membership ID
    pub id: Uuid,

    /// Team ID
    pub team_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the team
    pub role: MembershipRole,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    /// Team ID
    pub team_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role to assign (defaults to Member)
    #[serde(default)]
    pub role: MembershipRole,
}

/// A membership row joined with the member's public user fields
///
/// Used for the roster listing, which exposes `{id, role, user}` per member.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberWithUser {
    /// Membership ID
    pub id: Uuid,

    /// Role within the team
    pub role: MembershipRole,

    /// Member's user ID
    pub user_id: Uuid,

    /// Member's given name
    pub first_name: String,

    /// Member's family name
    pub last_name: String,

    /// Member's email
    pub email: String,
}

impl Membership {
    /// Creates a new membership (adds a user to a team)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The membership already exists (unique constraint violation)
    /// - The team or user doesn't exist (foreign key violation)
    /// - The database connection fails
    pub async fn create(pool: &PgPool, data: CreateMembership) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO team_members (team_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, team_id, user_id, role, created_at
            "#,
        )
        .bind(data.team_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Finds a specific membership by team and user
    ///
    /// # Returns
    ///
    /// The membership if found, None otherwise
    pub async fn find_by_team_and_user(
        pool: &PgPool,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, team_id, user_id, role, created_at
            FROM team_members
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Finds a membership by its ID, scoped to a team
    ///
    /// The team scope keeps a membership ID from one team from addressing a
    /// row in another.
    pub async fn find_by_id_in_team(
        pool: &PgPool,
        team_id: Uuid,
        membership_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, team_id, user_id, role, created_at
            FROM team_members
            WHERE id = $1 AND team_id = $2
            "#,
        )
        .bind(membership_id)
        .bind(team_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Lists all members of a team joined with their public user fields
    ///
    /// # Returns
    ///
    /// One row per membership, ordered by join time
    pub async fn list_with_users(
        pool: &PgPool,
        team_id: Uuid,
    ) -> Result<Vec<MemberWithUser>, sqlx::Error> {
        let members = sqlx::query_as::<_, MemberWithUser>(
            r#"
            SELECT m.id, m.role, u.id AS user_id, u.first_name, u.last_name, u.email
            FROM team_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.team_id = $1
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// Counts memberships with a given role within a team
    ///
    /// The last-admin guard reads this count after confirming the removal
    /// target is itself an admin, so the count always includes the target.
    pub async fn count_by_role(
        pool: &PgPool,
        team_id: Uuid,
        role: MembershipRole,
    ) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM team_members WHERE team_id = $1 AND role = $2",
        )
        .bind(team_id)
        .bind(role)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Deletes a membership by its ID
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the membership didn't exist
    pub async fn delete_by_id(pool: &PgPool, membership_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(membership_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_role_as_str() {
        assert_eq!(MembershipRole::Admin.as_str(), "admin");
        assert_eq!(MembershipRole::Member.as_str(), "member");
    }

    #[test]
    fn test_role_permissions() {
        assert!(MembershipRole::Admin.can_manage_members());
        assert!(!MembershipRole::Member.can_manage_members());
    }

    #[test]
    fn test_membership_role_default() {
        assert_eq!(MembershipRole::default(), MembershipRole::Member);
    }

    #[test]
    fn test_create_membership_role_defaults_to_member() {
        let team_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        // A request body that omits "role" deserializes to a plain member
        let json = format!(r#"{{"team_id": "{}", "user_id": "{}"}}"#, team_id, user_id);
        let data: CreateMembership = serde_json::from_str(&json).unwrap();

        assert_eq!(data.role, MembershipRole::Member);
    }

    #[test]
    fn test_membership_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&MembershipRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&MembershipRole::Member).unwrap(), "\"member\"");

        let role: MembershipRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, MembershipRole::Admin);
    }

    // Integration tests for database operations are in taskhive-api/tests/
}
