use actix_web::{http::StatusCode, test, test::TestRequest, web, web::ServiceConfig, App};
use pizza_delivery_engine::{
    db_types::{OrderStatus, Role},
    AuthApi,
    OrderFlowApi,
};
use serde_json::{json, Value};

use super::{
    auth_header,
    mocks::{MockCustomerBackend, MockDispatchBackend, MockOrderBackend},
    sample_courier,
    sample_customer,
    sample_order,
};
use crate::{
    auth::TokenVerifier,
    config::AuthConfig,
    middleware::JwtMiddlewareFactory,
    routes::{CancelOrderRoute, ConfirmDeliveryRoute, ConfirmPaymentRoute, DispatchOrderRoute, FetchCustomerRoute},
};

fn order_app(config: AuthConfig, db: MockOrderBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = OrderFlowApi::new(db);
        let scope = web::scope("")
            .wrap(JwtMiddlewareFactory::new(TokenVerifier::new(&config)))
            .service(ConfirmPaymentRoute::<MockOrderBackend>::new())
            .service(ConfirmDeliveryRoute::<MockOrderBackend>::new())
            .service(CancelOrderRoute::<MockOrderBackend>::new());
        cfg.app_data(web::Data::new(api)).service(scope);
    }
}

#[actix_web::test]
async fn requests_without_a_token_are_401() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let db = MockCustomerBackend::new();
    let app = App::new().app_data(web::Data::new(AuthApi::new(db))).service(
        web::scope("")
            .wrap(JwtMiddlewareFactory::new(TokenVerifier::new(&config)))
            .service(FetchCustomerRoute::<MockCustomerBackend>::new()),
    );
    let app = test::init_service(app).await;
    let req = TestRequest::get().uri("/clientes/1").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn a_customer_cannot_read_another_customers_profile() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let db = MockCustomerBackend::new();
    let app = App::new().app_data(web::Data::new(AuthApi::new(db))).service(
        web::scope("")
            .wrap(JwtMiddlewareFactory::new(TokenVerifier::new(&config)))
            .service(FetchCustomerRoute::<MockCustomerBackend>::new()),
    );
    let app = test::init_service(app).await;
    let req = TestRequest::get()
        .uri("/clientes/1")
        .insert_header(auth_header(&config, 2, Role::Cliente, "Alice"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("permission"), "was: {body}");
}

#[actix_web::test]
async fn the_wrong_role_is_rejected_by_the_acl() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let db = MockCustomerBackend::new();
    let app = App::new().app_data(web::Data::new(AuthApi::new(db))).service(
        web::scope("")
            .wrap(JwtMiddlewareFactory::new(TokenVerifier::new(&config)))
            .service(FetchCustomerRoute::<MockCustomerBackend>::new()),
    );
    let app = test::init_service(app).await;
    // The establishment's own id matches the path, but the role does not
    let req = TestRequest::get()
        .uri("/clientes/1")
        .insert_header(auth_header(&config, 1, Role::Estabelecimento, "Pizzaria"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn confirming_payment_moves_the_order_to_preparing() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockOrderBackend::new();
    db.expect_fetch_order_for_customer().returning(|id, cid| Ok(Some(sample_order(id, cid, OrderStatus::Received))));
    db.expect_set_order_status().returning(|id, status| Ok(sample_order(id, 1, status)));
    let app = test::init_service(App::new().configure(order_app(config.clone(), db))).await;
    let req = TestRequest::put()
        .uri("/clientes/1/pedidos/10/pagamento")
        .insert_header(auth_header(&config, 1, Role::Cliente, "Maria"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "Pedido em preparo");
}

#[actix_web::test]
async fn a_second_delivery_confirmation_is_rejected() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockOrderBackend::new();
    db.expect_fetch_order_for_customer().returning(|id, cid| Ok(Some(sample_order(id, cid, OrderStatus::Delivered))));
    let app = test::init_service(App::new().configure(order_app(config.clone(), db))).await;
    let req = TestRequest::put()
        .uri("/clientes/1/pedidos/10/confirmar-entrega")
        .insert_header(auth_header(&config, 1, Role::Cliente, "Maria"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("Cannot move an order"), "was: {body}");
}

#[actix_web::test]
async fn an_en_route_order_can_no_longer_be_cancelled() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockOrderBackend::new();
    db.expect_fetch_order_for_customer().returning(|id, cid| Ok(Some(sample_order(id, cid, OrderStatus::EnRoute))));
    let app = test::init_service(App::new().configure(order_app(config.clone(), db))).await;
    let req = TestRequest::delete()
        .uri("/clientes/1/pedidos/10")
        .insert_header(auth_header(&config, 1, Role::Cliente, "Maria"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("no longer be cancelled"), "was: {body}");
}

#[actix_web::test]
async fn someone_elses_order_looks_like_a_missing_one() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockOrderBackend::new();
    // The ownership scope means the row is simply not visible
    db.expect_fetch_order_for_customer().returning(|_, _| Ok(None));
    let app = test::init_service(App::new().configure(order_app(config.clone(), db))).await;
    let req = TestRequest::put()
        .uri("/clientes/1/pedidos/10/pagamento")
        .insert_header(auth_header(&config, 1, Role::Cliente, "Maria"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn dispatch_requires_an_approved_courier() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockDispatchBackend::new();
    db.expect_fetch_order_for_establishment().returning(|id, _| Ok(Some(sample_order(id, 1, OrderStatus::Ready))));
    db.expect_fetch_courier_by_id().returning(|id| Ok(Some(sample_courier(id, true))));
    db.expect_fetch_association().returning(|_, _| Ok(None));
    let app = App::new().app_data(web::Data::new(OrderFlowApi::new(db))).service(
        web::scope("")
            .wrap(JwtMiddlewareFactory::new(TokenVerifier::new(&config)))
            .service(DispatchOrderRoute::<MockDispatchBackend>::new()),
    );
    let app = test::init_service(app).await;
    let req = TestRequest::put()
        .uri("/estabelecimentos/1/pedidos/10/despachar")
        .insert_header(auth_header(&config, 1, Role::Estabelecimento, "Pizzaria"))
        .set_json(json!({"entregadorId": 3}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["error"].as_str().unwrap().contains("has not been approved"), "was: {body}");
}

#[actix_web::test]
async fn dispatch_assigns_the_courier() {
    let _ = env_logger::try_init().ok();
    let config = AuthConfig::default();
    let mut db = MockDispatchBackend::new();
    db.expect_fetch_order_for_establishment().returning(|id, _| Ok(Some(sample_order(id, 1, OrderStatus::Ready))));
    db.expect_fetch_courier_by_id().returning(|id| Ok(Some(sample_courier(id, true))));
    db.expect_fetch_association().returning(|courier_id, establishment_id| {
        Ok(Some(pizza_delivery_engine::db_types::Association {
            id: 1,
            courier_id,
            establishment_id,
            status: pizza_delivery_engine::db_types::AssociationStatus::Approved,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }))
    });
    db.expect_assign_courier().returning(|id, courier_id| {
        let mut order = sample_order(id, 1, OrderStatus::EnRoute);
        order.courier_id = Some(courier_id);
        Ok(order)
    });
    let app = App::new().app_data(web::Data::new(OrderFlowApi::new(db))).service(
        web::scope("")
            .wrap(JwtMiddlewareFactory::new(TokenVerifier::new(&config)))
            .service(DispatchOrderRoute::<MockDispatchBackend>::new()),
    );
    let app = test::init_service(app).await;
    let req = TestRequest::put()
        .uri("/estabelecimentos/1/pedidos/10/despachar")
        .insert_header(auth_header(&config, 1, Role::Estabelecimento, "Pizzaria"))
        .set_json(json!({"entregadorId": 3}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "Pedido em rota");
    assert_eq!(body["courier_id"], 3);
}
