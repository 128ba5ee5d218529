//! Membership window model and DTOs.

use chrono::NaiveDate;
use forge_core::membership::MembershipWindow;
use forge_core::types::{DbId, MessId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `memberships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: DbId,
    pub user_id: UserId,
    pub mess_id: MessId,
    pub active_from: NaiveDate,
    pub active_to: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Membership {
    pub fn window(&self) -> MembershipWindow {
        MembershipWindow {
            active_from: self.active_from,
            active_to: self.active_to,
        }
    }
}

/// DTO for enrolling a user in a mess.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMembership {
    pub user_id: UserId,
    pub mess_id: MessId,
    pub active_from: NaiveDate,
    #[serde(default)]
    pub active_to: Option<NaiveDate>,
}

/// DTO for closing a user's open window.
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawMembership {
    pub user_id: UserId,
    pub mess_id: MessId,
    pub active_to: NaiveDate,
}
