/// Team endpoints
///
/// Team creation and membership management. This is where the role
/// invariants live:
///
/// - Creating a team makes the creator its sole admin, atomically.
/// - Listing members requires any membership in the team.
/// - Inviting and removing members requires an admin membership.
/// - A removal that would leave a team without any admin is rejected; the
///   admin count is read only after the target is confirmed to be an admin,
///   so the count includes the target and removal is allowed only when it
///   exceeds one.
///
/// # Endpoints
///
/// - `POST   /teams` - Create a team
/// - `GET    /teams` - List teams the caller belongs to
/// - `GET    /teams/:id/members` - List a team's roster
/// - `POST   /teams/:id/members` - Invite a user by email
/// - `DELETE /teams/:id/members/:member_id` - Remove a membership

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskhive_shared::{
    auth::{
        authorization::{require_admin, require_membership},
        middleware::AuthContext,
    },
    models::{
        membership::{CreateMembership, Membership, MembershipRole},
        team::{CreateTeam, Team},
        user::{PublicUser, User},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create team request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    /// Team name
    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub name: String,
}

/// Invite request: the target is addressed by email
#[derive(Debug, Deserialize, Validate)]
pub struct InviteMemberRequest {
    /// Email of the user to invite
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Role to grant (defaults to member)
    #[serde(default)]
    pub role: MembershipRole,
}

/// Team as it appears on the wire (camelCase field names)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            created_by: team.created_by,
            created_at: team.created_at,
        }
    }
}

/// Envelope for the create response
#[derive(Debug, Serialize)]
pub struct TeamBody {
    pub team: TeamResponse,
}

/// One roster entry: membership id, role, and the member's public user
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: Uuid,
    pub role: MembershipRole,
    pub user: PublicUser,
}

/// Envelope for the invite response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteBody {
    pub team_member: MemberResponse,
}

/// Create a team
///
/// The caller becomes the team's sole admin. The team row and the admin
/// membership are inserted in one transaction, so a team can never exist
/// with zero admins.
pub async fn create_team(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateTeamRequest>,
) -> ApiResult<(StatusCode, Json<TeamBody>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let team = Team::create_with_admin(
        &state.db,
        CreateTeam {
            name: req.name,
            created_by: auth.user_id,
        },
    )
    .await?;

    tracing::info!(team_id = %team.id, created_by = %auth.user_id, "Team created");

    Ok((StatusCode::CREATED, Json(TeamBody { team: team.into() })))
}

/// List all teams the authenticated user belongs to
pub async fn list_teams(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TeamResponse>>> {
    let teams = Team::list_for_user(&state.db, auth.user_id).await?;

    Ok(Json(teams.into_iter().map(TeamResponse::from).collect()))
}

/// List a team's roster
///
/// Visible to members only.
///
/// # Errors
///
/// - `403` when the caller has no membership in the team
pub async fn list_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(team_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    require_membership(&state.db, team_id, auth.user_id).await?;

    let members = Membership::list_with_users(&state.db, team_id).await?;

    let members = members
        .into_iter()
        .map(|m| MemberResponse {
            id: m.id,
            role: m.role,
            user: PublicUser {
                id: m.user_id,
                first_name: m.first_name,
                last_name: m.last_name,
                email: m.email,
            },
        })
        .collect();

    Ok(Json(members))
}

/// Invite a user to a team by email
///
/// Admin only. The `UNIQUE(team_id, user_id)` constraint settles concurrent
/// invites for the same user; the pre-flight membership check only gives a
/// friendlier error on the common path.
///
/// # Errors
///
/// - `400` validation failed, or the user is already a member
/// - `403` caller is not an admin of the team
/// - `404` no user with that email
pub async fn invite_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(team_id): Path<Uuid>,
    Json(req): Json<InviteMemberRequest>,
) -> ApiResult<(StatusCode, Json<InviteBody>)> {
    req.validate().map_err(ApiError::from_validation)?;

    require_admin(&state.db, team_id, auth.user_id).await?;

    let invited = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if Membership::find_by_team_and_user(&state.db, team_id, invited.id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "User is already a team member".to_string(),
        ));
    }

    let membership = Membership::create(
        &state.db,
        CreateMembership {
            team_id,
            user_id: invited.id,
            role: req.role,
        },
    )
    .await?;

    tracing::info!(
        team_id = %team_id,
        user_id = %invited.id,
        role = membership.role.as_str(),
        "Team member added"
    );

    Ok((
        StatusCode::CREATED,
        Json(InviteBody {
            team_member: MemberResponse {
                id: membership.id,
                role: membership.role,
                user: PublicUser::from(&invited),
            },
        }),
    ))
}

/// Remove a membership from a team
///
/// Admin only. Removing an admin is rejected when it would drop the team's
/// admin count to zero: the count is read after confirming the target is an
/// admin, so it includes the target, and removal proceeds only when the
/// count exceeds one — at least one admin membership survives every
/// successful removal.
///
/// # Errors
///
/// - `400` target is the team's last admin
/// - `403` caller is not an admin of the team
/// - `404` no membership with that id under the team
pub async fn remove_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((team_id, member_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<MessageResponse>> {
    require_admin(&state.db, team_id, auth.user_id).await?;

    let target = Membership::find_by_id_in_team(&state.db, team_id, member_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Team member not found".to_string()))?;

    if target.role == MembershipRole::Admin {
        let admin_count =
            Membership::count_by_role(&state.db, team_id, MembershipRole::Admin).await?;

        if admin_count <= 1 {
            return Err(ApiError::Conflict(
                "Cannot remove the last admin".to_string(),
            ));
        }
    }

    Membership::delete_by_id(&state.db, target.id).await?;

    tracing::info!(
        team_id = %team_id,
        membership_id = %target.id,
        "Team member removed"
    );

    Ok(Json(MessageResponse::new("Team member removed successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_request_default_role_is_member() {
        let req: InviteMemberRequest =
            serde_json::from_str(r#"{"email": "new@example.com"}"#).unwrap();

        assert_eq!(req.role, MembershipRole::Member);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_invite_request_explicit_admin_role() {
        let req: InviteMemberRequest =
            serde_json::from_str(r#"{"email": "new@example.com", "role": "admin"}"#).unwrap();

        assert_eq!(req.role, MembershipRole::Admin);
    }

    #[test]
    fn test_invite_request_rejects_bad_email() {
        let req: InviteMemberRequest =
            serde_json::from_str(r#"{"email": "nope"}"#).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_team_request_rejects_empty_name() {
        let req: CreateTeamRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invite_body_wire_shape() {
        let body = InviteBody {
            team_member: MemberResponse {
                id: Uuid::new_v4(),
                role: MembershipRole::Member,
                user: PublicUser {
                    id: Uuid::new_v4(),
                    first_name: "Ada".to_string(),
                    last_name: "Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                },
            },
        };

        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"teamMember\""));
        assert!(json.contains("\"role\":\"member\""));
        assert!(json.contains("\"firstName\":\"Ada\""));
    }
}
