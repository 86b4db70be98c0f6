//! Authorization predicates. Services load whatever rows they need and ask
//! these before touching state.

use crate::domain::models::auth::Principal;
use crate::domain::models::join_request::JoinRequest;
use crate::domain::models::team::Team;
use crate::error::AppError;

pub fn can_modify_user(actor: &Principal, user_id: i64) -> bool {
    actor.user_id == user_id
}

pub fn is_team_owner(actor: &Principal, team: &Team) -> bool {
    actor.user_id == team.owner_id
}

pub fn can_see_join_request(actor: &Principal, team: &Team, request: &JoinRequest) -> bool {
    is_team_owner(actor, team) || actor.user_id == request.sender_id
}

pub fn is_receiver(actor: &Principal, receiver_id: i64) -> bool {
    actor.user_id == receiver_id
}

pub fn ensure(allowed: bool, message: &str) -> Result<(), AppError> {
    if allowed {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::join_request::JoinRequestStatus;
    use crate::domain::models::team_member::TeamRole;
    use chrono::Utc;

    fn principal(user_id: i64) -> Principal {
        Principal { user_id, auth_subject: format!("sub-{}", user_id) }
    }

    fn team(owner_id: i64) -> Team {
        Team {
            id: 1,
            name: "Acme".into(),
            domain: "acme.com".into(),
            owner_id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn request(sender_id: i64) -> JoinRequest {
        JoinRequest {
            id: 10,
            team_id: 1,
            team_owner_id: 7,
            sender_id,
            role: TeamRole::Member,
            status: JoinRequestStatus::Pending,
            created_at: Utc::now(),
            decision_at: None,
            decision_by: None,
        }
    }

    #[test]
    fn test_only_self_can_modify_user() {
        assert!(can_modify_user(&principal(3), 3));
        assert!(!can_modify_user(&principal(3), 4));
    }

    #[test]
    fn test_team_ownership() {
        assert!(is_team_owner(&principal(7), &team(7)));
        assert!(!is_team_owner(&principal(9), &team(7)));
    }

    #[test]
    fn test_join_request_visible_to_owner_and_sender() {
        let team = team(7);
        let req = request(9);
        assert!(can_see_join_request(&principal(7), &team, &req));
        assert!(can_see_join_request(&principal(9), &team, &req));
        assert!(!can_see_join_request(&principal(11), &team, &req));
    }

    #[test]
    fn test_ensure_maps_to_forbidden() {
        assert!(ensure(true, "nope").is_ok());
        assert!(matches!(ensure(false, "nope"), Err(AppError::Forbidden(_))));
        assert!(is_receiver(&principal(5), 5));
    }
}
