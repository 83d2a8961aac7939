use actix_web::{http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use chrono::Utc;
use pizza_delivery_engine::{
    db_types::{Notification, Role},
    CatalogApi,
};
use serde_json::{json, Value};

use super::{auth_header, mocks::MockCatalogBackend, sample_flavor};
use crate::{
    auth::TokenVerifier,
    config::AuthConfig,
    middleware::JwtMiddlewareFactory,
    routes::{CreateFlavorRoute, CustomerMenuRoute, SetFlavorAvailabilityRoute},
};

fn catalog_app(config: AuthConfig, db: MockCatalogBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = CatalogApi::new(db);
        let scope = web::scope("")
            .wrap(JwtMiddlewareFactory::new(TokenVerifier::new(&config)))
            .service(CreateFlavorRoute::<MockCatalogBackend>::new())
            .service(CustomerMenuRoute::<MockCatalogBackend>::new())
            .service(SetFlavorAvailabilityRoute::<MockCatalogBackend>::new());
        cfg.app_data(web::Data::new(api)).service(scope);
    }
}

#[actix_web::test]
async fn creating_a_flavor_stamps_the_authenticated_owner() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockCatalogBackend::new();
    // Even though the body claims establishment 99, the token's id wins
    db.expect_insert_flavor()
        .withf(|flavor| flavor.establishment_id == 1)
        .returning(|flavor| Ok(sample_flavor(5, flavor.establishment_id, flavor.available)));
    let app = test::init_service(App::new().configure(catalog_app(config.clone(), db))).await;
    let req = TestRequest::post()
        .uri("/estabelecimentos/1/sabores")
        .insert_header(auth_header(&config, 1, Role::Estabelecimento, "Pizzaria"))
        .set_json(json!({
            "establishment_id": 99,
            "name": "Calabresa",
            "category": "salgada",
            "price_medium": 2500,
            "price_large": 4500
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["establishment_id"], 1);
    assert_eq!(body["available"], true);
}

#[actix_web::test]
async fn only_establishments_may_manage_the_menu() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let db = MockCatalogBackend::new();
    let app = test::init_service(App::new().configure(catalog_app(config.clone(), db))).await;
    let req = TestRequest::post()
        .uri("/estabelecimentos/1/sabores")
        .insert_header(auth_header(&config, 1, Role::Cliente, "Maria"))
        .set_json(json!({"name": "Calabresa", "category": "salgada", "price_medium": 2500, "price_large": 4500}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn any_authenticated_principal_can_browse_a_menu() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockCatalogBackend::new();
    db.expect_fetch_menu().returning(|establishment_id| {
        Ok(vec![sample_flavor(1, establishment_id, true), sample_flavor(2, establishment_id, false)])
    });
    let app = test::init_service(App::new().configure(catalog_app(config.clone(), db))).await;
    // A courier reading some customer's menu route: any valid token will do
    let req = TestRequest::get()
        .uri("/clientes/9/cardapio?estabelecimentoId=4")
        .insert_header(auth_header(&config, 3, Role::Entregador, "Zé"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["establishment_id"], 4);
}

#[actix_web::test]
async fn a_returning_flavor_notifies_every_interested_customer() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockCatalogBackend::new();
    db.expect_fetch_flavor().returning(|id| Ok(Some(sample_flavor(id, 1, false))));
    db.expect_set_flavor_availability()
        .returning(|establishment_id, flavor_id, available| Ok(sample_flavor(flavor_id, establishment_id, available)));
    db.expect_fetch_interested_customers().returning(|_| Ok(vec![7, 8]));
    db.expect_insert_notification()
        .times(2)
        .withf(|n| n.customer_id.is_some() && n.message.contains("disponível novamente"))
        .returning(|n| {
            Ok(Notification {
                id: 1,
                customer_id: n.customer_id,
                establishment_id: n.establishment_id,
                message: n.message.clone(),
                created_at: Utc::now(),
            })
        });
    let app = test::init_service(App::new().configure(catalog_app(config.clone(), db))).await;
    let req = TestRequest::put()
        .uri("/estabelecimentos/1/sabores/5/disponibilidade")
        .insert_header(auth_header(&config, 1, Role::Estabelecimento, "Pizzaria"))
        .set_json(json!({"available": true}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["available"], true);
}

#[actix_web::test]
async fn another_establishments_flavor_is_invisible() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockCatalogBackend::new();
    // The flavor exists but belongs to establishment 2
    db.expect_fetch_flavor().returning(|id| Ok(Some(sample_flavor(id, 2, false))));
    let app = test::init_service(App::new().configure(catalog_app(config.clone(), db))).await;
    let req = TestRequest::put()
        .uri("/estabelecimentos/1/sabores/5/disponibilidade")
        .insert_header(auth_header(&config, 1, Role::Estabelecimento, "Pizzaria"))
        .set_json(json!({"available": true}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
