/// Team model and database operations
///
/// This module provides the Team model. A team is created by exactly one
/// user, who becomes its first (admin) member in the same transaction as the
/// team row itself — a partial failure persists nothing, so a team can never
/// exist with zero admins.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE teams (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(100) NOT NULL,
///     created_by UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::membership::MembershipRole;

/// Team model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    /// Unique team ID
    pub id: Uuid,

    /// Team name
    pub name: String,

    /// User who created the team
    pub created_by: Uuid,

    /// When the team was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeam {
    /// Team name
    pub name: String,

    /// Creator's user ID; becomes the team's first admin
    pub created_by: Uuid,
}

impl Team {
    /// Creates a team and its creator's admin membership atomically
    ///
    /// Both inserts run in a single transaction: either the team exists with
    /// exactly one admin membership, or nothing was persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if either insert fails or the transaction cannot be
    /// committed; no partial state survives.
    pub async fn create_with_admin(pool: &PgPool, data: CreateTeam) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, created_by)
            VALUES ($1, $2)
            RETURNING id, name, created_by, created_at
            "#,
        )
        .bind(&data.name)
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, user_id, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(team.id)
        .bind(data.created_by)
        .bind(MembershipRole::Admin)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(team)
    }

    /// Finds a team by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, created_by, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(team)
    }

    /// Lists all teams a user belongs to
    ///
    /// A team appears in the result iff a membership row for this user
    /// exists. No ordering is guaranteed to callers.
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.id, t.name, t.created_by, t.created_at
            FROM teams t
            JOIN team_members m ON m.team_id = t.id
            WHERE m.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_team_struct() {
        let created_by = Uuid::new_v4();
        let data = CreateTeam {
            name: "Platform".to_string(),
            created_by,
        };

        assert_eq!(data.name, "Platform");
        assert_eq!(data.created_by, created_by);
    }

    // Integration tests for the transactional create are in taskhive-api/tests/
}
