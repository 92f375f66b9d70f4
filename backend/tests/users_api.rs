//! End-to-end coverage of the user CRUD surface.
//!
//! Drives the full route wiring through actix's test service with the
//! in-memory repository standing in for PostgreSQL, so the whole
//! request→handler→gateway→response path is exercised without a database.

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test as actix_test, web};
use serde_json::{Value, json};

use user_registry::domain::ports::FixtureUserRepository;
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users::{
    create_user, delete_user, get_user, list_users, update_user,
};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(FixtureUserRepository::default()));
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/user")
            .service(list_users)
            .service(create_user)
            .service(get_user)
            .service(update_user)
            .service(delete_user),
    )
}

async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[actix_web::test]
async fn full_record_lifecycle() {
    let app = actix_test::init_service(test_app()).await;

    // Create.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/user")
            .set_json(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    let id = created
        .get("id")
        .and_then(Value::as_str)
        .expect("generated id")
        .to_owned();
    assert!(!id.is_empty());

    // Read it back.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/user/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json(response).await;
    assert_eq!(fetched.get("firstName").and_then(Value::as_str), Some("Ada"));
    assert_eq!(
        fetched.get("lastName").and_then(Value::as_str),
        Some("Lovelace")
    );
    assert_eq!(
        fetched.get("email").and_then(Value::as_str),
        Some("ada@example.com")
    );

    // Replace.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/user/{id}"))
            .set_json(json!({
                "firstName": "Ada",
                "lastName": "Byron",
                "email": "ada@example.com",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/user/{id}"))
            .to_request(),
    )
    .await;
    let updated = read_json(response).await;
    assert_eq!(updated.get("lastName").and_then(Value::as_str), Some("Byron"));
    assert_eq!(updated.get("id").and_then(Value::as_str), Some(id.as_str()));

    // Delete, then confirm the record is gone.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/user/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/user/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(actix_test::read_body(response).await.is_empty());
}

#[actix_web::test]
async fn list_grows_with_each_created_record() {
    let app = actix_test::init_service(test_app()).await;

    for n in 1..=3usize {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/user")
                .set_json(json!({
                    "firstName": "User",
                    "lastName": "Example",
                    "email": format!("user{n}@example.com"),
                }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/user").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let listed = read_json(response).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(n));
    }
}

#[actix_web::test]
async fn rejected_writes_never_change_stored_state() {
    let app = actix_test::init_service(test_app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/user")
            .set_json(json!({
                "firstName": "Grace",
                "lastName": "Hopper",
                "email": "grace@example.com",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // A malformed create is rejected before any write.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/user")
            .set_json(json!({
                "firstName": "Grace",
                "lastName": "Hopper",
                "email": "not-an-email",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/user").to_request(),
    )
    .await;
    let listed = read_json(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}
