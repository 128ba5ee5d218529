//! HTTP-level tests for membership administration and day menus.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, token_for};
use forge_core::roles::Role;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn staff() -> String {
    token_for(Uuid::new_v4(), Role::Admin)
}

// ---------------------------------------------------------------------------
// Memberships
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_enrol_withdraw_and_list(pool: PgPool) {
    let token = staff();
    let (user, mess) = (Uuid::new_v4(), Uuid::new_v4());
    let enrolment = json!({"user_id": user, "mess_id": mess, "active_from": "2026-10-01"});

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/memberships",
        &token,
        enrolment.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["active_to"], serde_json::Value::Null);

    // A second open window for the same pair conflicts.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/memberships",
        &token,
        enrolment,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/memberships/withdraw",
        &token,
        json!({"user_id": user, "mess_id": mess, "active_to": "2026-10-31"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["active_to"], "2026-10-31");

    // Nothing open any more.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/memberships/withdraw",
        &token,
        json!({"user_id": user, "mess_id": mess, "active_to": "2026-11-30"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/memberships?user_id={user}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_withdraw_before_start_is_400(pool: PgPool) {
    let token = staff();
    let (user, mess) = (Uuid::new_v4(), Uuid::new_v4());

    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/memberships",
        &token,
        json!({"user_id": user, "mess_id": mess, "active_from": "2026-10-10"}),
    )
    .await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/memberships/withdraw",
        &token,
        json!({"user_id": user, "mess_id": mess, "active_to": "2026-10-09"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inverted_window_is_400(pool: PgPool) {
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/memberships",
        &staff(),
        json!({
            "user_id": Uuid::new_v4(),
            "mess_id": Uuid::new_v4(),
            "active_from": "2026-10-10",
            "active_to": "2026-10-01",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_students_cannot_manage_memberships(pool: PgPool) {
    let me = Uuid::new_v4();
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/memberships",
        &token_for(me, Role::Student),
        json!({"user_id": me, "mess_id": Uuid::new_v4(), "active_from": "2026-10-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_publish_and_read_menu(pool: PgPool) {
    let mess = Uuid::new_v4();
    let menu = json!({
        "mess_id": mess,
        "menu_date": "2026-10-20",
        "items": [
            {"meal": "dinner", "item_name": "  Paneer Butter Masala ", "is_special": true,
             "allergens": ["Dairy", "dairy", " nuts "]},
            {"meal": "breakfast", "item_name": "Poha"},
        ],
    });

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/menu",
        &staff(),
        menu,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let student = token_for(Uuid::new_v4(), Role::Student);
    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/menu?mess_id={mess}&date=2026-10-20"),
        &student,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["meal"], "breakfast");
    assert_eq!(items[0]["item_name"], "Poha");
    assert_eq!(items[1]["item_name"], "Paneer Butter Masala");
    assert_eq!(items[1]["is_special"], true);
    assert_eq!(items[1]["allergens"], json!(["dairy", "nuts"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_item_name_is_rejected(pool: PgPool) {
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/menu",
        &staff(),
        json!({
            "mess_id": Uuid::new_v4(),
            "menu_date": "2026-10-20",
            "items": [{"meal": "lunch", "item_name": "   "}],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_students_cannot_publish_menus(pool: PgPool) {
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/menu",
        &token_for(Uuid::new_v4(), Role::Student),
        json!({"mess_id": Uuid::new_v4(), "menu_date": "2026-10-20", "items": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
