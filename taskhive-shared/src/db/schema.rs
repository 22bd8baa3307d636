/// Schema bootstrap
///
/// This module creates the TaskHive schema at startup. All statements are
/// idempotent (`CREATE TABLE IF NOT EXISTS`, guarded `CREATE TYPE`), so the
/// bootstrap is safe to run on every process start against an existing
/// database. There is no versioned migration system; the schema is small and
/// fixed.
///
/// # Schema
///
/// - `users`: accounts with unique email and Argon2id password hash
/// - `tasks`: personal tasks owned by exactly one user
/// - `teams`: teams created by a user
/// - `team_members`: membership rows binding a user to a team with a role;
///   `UNIQUE(team_id, user_id)` is the authoritative guard against duplicate
///   memberships under concurrent invites
///
/// # Example
///
/// ```no_run
/// use taskhive_shared::db::pool::{create_pool, DatabaseConfig};
/// use taskhive_shared::db::schema::init_schema;
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// init_schema(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use tracing::{debug, info};

/// DDL statements executed in order by [`init_schema`].
const SCHEMA_STATEMENTS: &[&str] = &[
    // Enum types: Postgres has no CREATE TYPE IF NOT EXISTS, so guard with a DO block
    r#"
    DO $$ BEGIN
        CREATE TYPE task_status AS ENUM ('todo', 'ongoing', 'done');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    DO $$ BEGIN
        CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    DO $$ BEGIN
        CREATE TYPE membership_role AS ENUM ('admin', 'member');
    EXCEPTION WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tasks (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        title VARCHAR(255) NOT NULL,
        description TEXT,
        status task_status NOT NULL DEFAULT 'todo',
        priority task_priority NOT NULL DEFAULT 'medium',
        deadline TIMESTAMPTZ,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(100) NOT NULL,
        created_by UUID NOT NULL REFERENCES users(id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS team_members (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        team_id UUID NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        role membership_role NOT NULL DEFAULT 'member',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (team_id, user_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_tasks_user_id ON tasks(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_team_members_user_id ON team_members(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_team_members_team_id ON team_members(team_id)",
];

/// Creates all tables, types, and indexes if they do not already exist
///
/// # Errors
///
/// Returns an error if any DDL statement fails or the database connection is lost.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Initializing database schema");

    for statement in SCHEMA_STATEMENTS {
        debug!(statement = statement.trim().lines().next().unwrap_or(""), "Executing DDL");
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_all_tables() {
        let ddl = SCHEMA_STATEMENTS.join("\n");
        for table in ["users", "tasks", "teams", "team_members"] {
            assert!(
                ddl.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "schema is missing table {}",
                table
            );
        }
    }

    #[test]
    fn test_membership_uniqueness_constraint_present() {
        let ddl = SCHEMA_STATEMENTS.join("\n");
        assert!(ddl.contains("UNIQUE (team_id, user_id)"));
    }
}
