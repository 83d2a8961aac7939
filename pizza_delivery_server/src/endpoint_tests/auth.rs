use actix_web::{http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use pizza_delivery_engine::{db_types::Role, AuthApi};
use serde_json::{json, Value};

use super::{mocks::MockCustomerBackend, sample_customer, TEST_PASSWORD};
use crate::{
    auth::TokenVerifier,
    config::AuthConfig,
    routes::{LoginCustomerRoute, RegisterCustomerRoute},
};

fn configure_app(config: AuthConfig, db: MockCustomerBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let auth_api = AuthApi::new(db);
        let jwt_signer = crate::auth::TokenIssuer::new(&config);
        cfg.app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(jwt_signer))
            .service(RegisterCustomerRoute::<MockCustomerBackend>::new())
            .service(LoginCustomerRoute::<MockCustomerBackend>::new());
    }
}

#[actix_web::test]
async fn registration_returns_the_new_customer_and_a_token() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockCustomerBackend::new();
    db.expect_fetch_customer_by_name().returning(|_| Ok(None));
    db.expect_insert_customer().returning(|c, _| Ok(sample_customer(1, &c.name)));
    let app = test::init_service(App::new().configure(configure_app(config.clone(), db))).await;
    let req = TestRequest::post()
        .uri("/clientes/register")
        .set_json(json!({"name": "Maria", "password": TEST_PASSWORD, "address": "Rua dos Bobos, 0"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["cliente"]["name"], "Maria");
    assert_eq!(body["cliente"]["id"], 1);
    // The password digest must never leave the server
    assert!(body["cliente"].get("password_hash").is_none(), "was: {body}");
    let claims = TokenVerifier::new(&config).decode(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, 1);
}

#[actix_web::test]
async fn a_duplicate_name_is_a_400() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCustomerBackend::new();
    db.expect_fetch_customer_by_name().returning(|name| Ok(Some(sample_customer(1, name))));
    let app = test::init_service(App::new().configure(configure_app(AuthConfig::default(), db))).await;
    let req = TestRequest::post()
        .uri("/clientes/register")
        .set_json(json!({"name": "Maria", "password": TEST_PASSWORD, "address": "Rua dos Bobos, 0"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("already taken"), "was: {body}");
}

#[actix_web::test]
async fn login_returns_a_verifiable_token() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockCustomerBackend::new();
    db.expect_fetch_customer_by_name().returning(|name| Ok(Some(sample_customer(42, name))));
    let app = test::init_service(App::new().configure(configure_app(config.clone(), db))).await;
    let req = TestRequest::post()
        .uri("/clientes/login")
        .set_json(json!({"name": "Maria", "password": TEST_PASSWORD}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["cliente"]["name"], "Maria");
    let claims = TokenVerifier::new(&config).decode(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.sub, 42);
    assert_eq!(claims.role, Role::Cliente);
    assert_eq!(claims.name, "Maria");
}

#[actix_web::test]
async fn a_wrong_password_is_a_401() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCustomerBackend::new();
    db.expect_fetch_customer_by_name().returning(|name| Ok(Some(sample_customer(42, name))));
    let app = test::init_service(App::new().configure(configure_app(AuthConfig::default(), db))).await;
    let req = TestRequest::post()
        .uri("/clientes/login")
        .set_json(json!({"name": "Maria", "password": "not-the-password"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid name or password"), "was: {body}");
}

#[actix_web::test]
async fn an_unknown_name_is_indistinguishable_from_a_wrong_password() {
    let _ = env_logger::try_init().ok();
    let mut db = MockCustomerBackend::new();
    db.expect_fetch_customer_by_name().returning(|_| Ok(None));
    let app = test::init_service(App::new().configure(configure_app(AuthConfig::default(), db))).await;
    let req = TestRequest::post()
        .uri("/clientes/login")
        .set_json(json!({"name": "nobody", "password": TEST_PASSWORD}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid name or password"), "was: {body}");
}
