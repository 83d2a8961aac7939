use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use pizza_delivery_engine::{AuthApi, CatalogApi, CourierApi, NotificationApi, OrderFlowApi, SqliteDatabase};

use crate::{
    auth::{TokenIssuer, TokenVerifier},
    config::ServerConfig,
    errors::ServerError,
    middleware::JwtMiddlewareFactory,
    routes::{
        health,
        ApproveCourierRoute,
        CancelOrderRoute,
        ConfirmDeliveryRoute,
        ConfirmPaymentRoute,
        CreateFlavorRoute,
        CustomerMenuRoute,
        CustomerNotificationsRoute,
        DeleteCourierRoute,
        DeleteCustomerRoute,
        DeleteEstablishmentRoute,
        DeleteFlavorRoute,
        DispatchOrderRoute,
        EstablishmentNotificationsRoute,
        FetchCourierRoute,
        FetchCustomerRoute,
        FetchEstablishmentRoute,
        FetchOrderRoute,
        ListCouriersRoute,
        ListEstablishmentsRoute,
        LoginCourierRoute,
        LoginCustomerRoute,
        LoginEstablishmentRoute,
        MarkReadyRoute,
        OrderHistoryRoute,
        PlaceOrderRoute,
        RegisterCourierRoute,
        RegisterCustomerRoute,
        RegisterEstablishmentRoute,
        RegisterInterestRoute,
        RequestAssociationRoute,
        SetCourierAvailabilityRoute,
        SetFlavorAvailabilityRoute,
        UpdateCourierRoute,
        UpdateCustomerRoute,
        UpdateEstablishmentRoute,
        UpdateFlavorRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::InitializeError(e.to_string()))
}

/// Builds the server. The registration and login routes are public; everything else sits inside a
/// scope wrapped by the JWT middleware, with role requirements declared per route.
pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let auth_api = AuthApi::new(db.clone());
        let orders_api = OrderFlowApi::new(db.clone());
        let catalog_api = CatalogApi::new(db.clone());
        let courier_api = CourierApi::new(db.clone());
        let notifications_api = NotificationApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        let jwt_verifier = TokenVerifier::new(&config.auth);
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("pds::access_log"))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(courier_api))
            .app_data(web::Data::new(notifications_api))
            .app_data(web::Data::new(jwt_signer));
        // Routes that require authentication
        let auth_scope = web::scope("")
            .wrap(JwtMiddlewareFactory::new(jwt_verifier))
            .service(FetchCustomerRoute::<SqliteDatabase>::new())
            .service(UpdateCustomerRoute::<SqliteDatabase>::new())
            .service(DeleteCustomerRoute::<SqliteDatabase>::new())
            .service(CustomerMenuRoute::<SqliteDatabase>::new())
            .service(RegisterInterestRoute::<SqliteDatabase>::new())
            .service(CustomerNotificationsRoute::<SqliteDatabase>::new())
            .service(PlaceOrderRoute::<SqliteDatabase>::new())
            .service(FetchOrderRoute::<SqliteDatabase>::new())
            .service(ConfirmPaymentRoute::<SqliteDatabase>::new())
            .service(CancelOrderRoute::<SqliteDatabase>::new())
            .service(ConfirmDeliveryRoute::<SqliteDatabase>::new())
            .service(OrderHistoryRoute::<SqliteDatabase>::new())
            .service(ListEstablishmentsRoute::<SqliteDatabase>::new())
            .service(FetchEstablishmentRoute::<SqliteDatabase>::new())
            .service(UpdateEstablishmentRoute::<SqliteDatabase>::new())
            .service(DeleteEstablishmentRoute::<SqliteDatabase>::new())
            .service(EstablishmentNotificationsRoute::<SqliteDatabase>::new())
            .service(CreateFlavorRoute::<SqliteDatabase>::new())
            .service(UpdateFlavorRoute::<SqliteDatabase>::new())
            .service(DeleteFlavorRoute::<SqliteDatabase>::new())
            .service(SetFlavorAvailabilityRoute::<SqliteDatabase>::new())
            .service(ApproveCourierRoute::<SqliteDatabase>::new())
            .service(MarkReadyRoute::<SqliteDatabase>::new())
            .service(DispatchOrderRoute::<SqliteDatabase>::new())
            .service(ListCouriersRoute::<SqliteDatabase>::new())
            .service(FetchCourierRoute::<SqliteDatabase>::new())
            .service(UpdateCourierRoute::<SqliteDatabase>::new())
            .service(DeleteCourierRoute::<SqliteDatabase>::new())
            .service(SetCourierAvailabilityRoute::<SqliteDatabase>::new())
            .service(RequestAssociationRoute::<SqliteDatabase>::new());
        // Public routes register before the scope, so `/clientes/register` wins over `/clientes/{id}`
        app.service(health)
            .service(RegisterCustomerRoute::<SqliteDatabase>::new())
            .service(LoginCustomerRoute::<SqliteDatabase>::new())
            .service(RegisterEstablishmentRoute::<SqliteDatabase>::new())
            .service(LoginEstablishmentRoute::<SqliteDatabase>::new())
            .service(RegisterCourierRoute::<SqliteDatabase>::new())
            .service(LoginCourierRoute::<SqliteDatabase>::new())
            .service(auth_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))
    .map_err(|e| ServerError::InitializeError(e.to_string()))?
    .run();
    Ok(srv)
}
