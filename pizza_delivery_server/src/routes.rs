//! Request handler definitions.
//!
//! Define each route and its handler here. Handlers stay short: they unpack the request, stamp the
//! authenticated principal's id where the engine expects one, call the matching API and pick a
//! status code. Everything else (ownership scoping, the status state machine, notifications) lives
//! in the engine.
//!
//! Route protection comes in three flavours:
//! * public routes (registration, login, health),
//! * authenticated routes (any valid token will do, e.g. browsing a menu),
//! * self-service routes, which additionally pin the token to a role via the ACL middleware and to
//!   the addressed record via [`JwtClaims::require_self`].

use actix_web::{get, web, HttpResponse};
use pizza_delivery_engine::{
    db_types::{
        CourierUpdate,
        CustomerUpdate,
        EstablishmentUpdate,
        FlavorUpdate,
        NewCourier,
        NewCustomer,
        NewEstablishment,
        NewFlavor,
        Role,
    },
    order_objects::Pagination,
    traits::{
        CatalogManagement,
        CourierManagement,
        CustomerManagement,
        EstablishmentManagement,
        NotificationManagement,
        OrderManagement,
    },
    AuthApi,
    CatalogApi,
    CourierApi,
    NotificationApi,
    OrderFlowApi,
};

use crate::{
    auth::{JwtClaims, TokenIssuer},
    data_objects::{
        AvailabilityUpdate,
        CourierAuthResponse,
        CustomerAuthResponse,
        DispatchRequest,
        EstablishmentAuthResponse,
        LoginRequest,
        MenuQuery,
        NewOrderRequest,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>);}
        paste::paste! { impl<B> [<$name:camel Route>]<B> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> B>)
            }
        }}
        paste::paste! { impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
        where
            B: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<B>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires [$($roles:expr),+]) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>);}
        paste::paste! { impl<B> [<$name:camel Route>]<B> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> B>)
            }
        }}
        paste::paste! { impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
        where
            B: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<B>)
                    .wrap($crate::middleware::AclMiddlewareFactory::new(&[$($roles),+]));
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

//----------------------------------------   Health  ----------------------------------------------

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------  Customers ---------------------------------------------

route!(register_customer => Post "/clientes/register" impl CustomerManagement);
pub async fn register_customer<B: CustomerManagement>(
    body: web::Json<NewCustomer>,
    api: web::Data<AuthApi<B>>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let customer = api.register_customer(body.into_inner()).await?;
    let token = issuer.issue(customer.id, Role::Cliente, &customer.name)?;
    Ok(HttpResponse::Created().json(CustomerAuthResponse { cliente: customer, token }))
}

route!(login_customer => Post "/clientes/login" impl CustomerManagement);
pub async fn login_customer<B: CustomerManagement>(
    body: web::Json<LoginRequest>,
    api: web::Data<AuthApi<B>>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let login = body.into_inner();
    let customer = api.login_customer(&login.name, &login.password).await?;
    let token = issuer.issue(customer.id, Role::Cliente, &customer.name)?;
    Ok(HttpResponse::Ok().json(CustomerAuthResponse { cliente: customer, token }))
}

route!(fetch_customer => Get "/clientes/{id}" impl CustomerManagement where requires [Role::Cliente]);
pub async fn fetch_customer<B: CustomerManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let customer = api.fetch_customer(id).await?;
    Ok(HttpResponse::Ok().json(customer))
}

route!(update_customer => Put "/clientes/{id}" impl CustomerManagement where requires [Role::Cliente]);
pub async fn update_customer<B: CustomerManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<CustomerUpdate>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let customer = api.update_customer(id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(customer))
}

route!(delete_customer => Delete "/clientes/{id}" impl CustomerManagement where requires [Role::Cliente]);
pub async fn delete_customer<B: CustomerManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    api.delete_customer(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

route!(customer_menu => Get "/clientes/{id}/cardapio" impl CatalogManagement);
pub async fn customer_menu<B: CatalogManagement>(
    _claims: JwtClaims,
    query: web::Query<MenuQuery>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let menu = api.menu_for_customer(query.establishment_id).await?;
    Ok(HttpResponse::Ok().json(menu))
}

route!(register_interest => Post "/clientes/{id}/interesses/{flavor_id}" impl CatalogManagement where requires [Role::Cliente]);
pub async fn register_interest<B: CatalogManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, flavor_id) = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let interest = api.register_interest(id, flavor_id).await?;
    Ok(HttpResponse::Created().json(interest))
}

route!(customer_notifications => Get "/clientes/{id}/notificacoes" impl NotificationManagement where requires [Role::Cliente]);
pub async fn customer_notifications<B: NotificationManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let notifications = api.for_customer(id).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

//----------------------------------------    Orders  ---------------------------------------------

route!(place_order => Post "/clientes/{id}/pedidos" impl OrderManagement, CatalogManagement where requires [Role::Cliente]);
pub async fn place_order<B: OrderManagement + CatalogManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let order = api.place_order(body.into_inner().into_order(id)).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(fetch_order => Get "/clientes/{id}/pedidos/{order_id}" impl OrderManagement where requires [Role::Cliente]);
pub async fn fetch_order<B: OrderManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, order_id) = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let order = api.fetch_order_for_customer(order_id, id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(confirm_payment => Put "/clientes/{id}/pedidos/{order_id}/pagamento" impl OrderManagement where requires [Role::Cliente]);
pub async fn confirm_payment<B: OrderManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, order_id) = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let order = api.confirm_payment(order_id, id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(cancel_order => Delete "/clientes/{id}/pedidos/{order_id}" impl OrderManagement where requires [Role::Cliente]);
pub async fn cancel_order<B: OrderManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, order_id) = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    api.cancel_order(order_id, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

route!(confirm_delivery => Put "/clientes/{id}/pedidos/{order_id}/confirmar-entrega" impl OrderManagement where requires [Role::Cliente]);
pub async fn confirm_delivery<B: OrderManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, order_id) = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let order = api.confirm_delivery(order_id, id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(order_history => Get "/clientes/{id}/historico-pedidos" impl OrderManagement where requires [Role::Cliente]);
pub async fn order_history<B: OrderManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    query: web::Query<Pagination>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Cliente, id)?;
    let history = api.order_history(id, query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(history))
}

//--------------------------------------  Establishments ------------------------------------------

route!(register_establishment => Post "/estabelecimentos/register" impl EstablishmentManagement);
pub async fn register_establishment<B: EstablishmentManagement>(
    body: web::Json<NewEstablishment>,
    api: web::Data<AuthApi<B>>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let establishment = api.register_establishment(body.into_inner()).await?;
    let token = issuer.issue(establishment.id, Role::Estabelecimento, &establishment.name)?;
    Ok(HttpResponse::Created().json(EstablishmentAuthResponse { estabelecimento: establishment, token }))
}

route!(login_establishment => Post "/estabelecimentos/login" impl EstablishmentManagement);
pub async fn login_establishment<B: EstablishmentManagement>(
    body: web::Json<LoginRequest>,
    api: web::Data<AuthApi<B>>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let login = body.into_inner();
    let establishment = api.login_establishment(&login.name, &login.password).await?;
    let token = issuer.issue(establishment.id, Role::Estabelecimento, &establishment.name)?;
    Ok(HttpResponse::Ok().json(EstablishmentAuthResponse { estabelecimento: establishment, token }))
}

route!(list_establishments => Get "/estabelecimentos" impl EstablishmentManagement);
pub async fn list_establishments<B: EstablishmentManagement>(
    _claims: JwtClaims,
    query: web::Query<Pagination>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let establishments = api.fetch_establishments(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(establishments))
}

route!(fetch_establishment => Get "/estabelecimentos/{id}" impl EstablishmentManagement where requires [Role::Estabelecimento]);
pub async fn fetch_establishment<B: EstablishmentManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let establishment = api.fetch_establishment(id).await?;
    Ok(HttpResponse::Ok().json(establishment))
}

route!(update_establishment => Put "/estabelecimentos/{id}" impl EstablishmentManagement where requires [Role::Estabelecimento]);
pub async fn update_establishment<B: EstablishmentManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<EstablishmentUpdate>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let establishment = api.update_establishment(id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(establishment))
}

route!(delete_establishment => Delete "/estabelecimentos/{id}" impl EstablishmentManagement where requires [Role::Estabelecimento]);
pub async fn delete_establishment<B: EstablishmentManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    api.delete_establishment(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

route!(establishment_notifications => Get "/estabelecimentos/{id}/notificacoes" impl NotificationManagement where requires [Role::Estabelecimento]);
pub async fn establishment_notifications<B: NotificationManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<NotificationApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let notifications = api.for_establishment(id).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

//----------------------------------------   Catalog  ---------------------------------------------

route!(create_flavor => Post "/estabelecimentos/{id}/sabores" impl CatalogManagement where requires [Role::Estabelecimento]);
pub async fn create_flavor<B: CatalogManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<NewFlavor>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let flavor = api.create_flavor(id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(flavor))
}

route!(update_flavor => Put "/estabelecimentos/{id}/sabores/{flavor_id}" impl CatalogManagement where requires [Role::Estabelecimento]);
pub async fn update_flavor<B: CatalogManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    body: web::Json<FlavorUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, flavor_id) = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let flavor = api.update_flavor(id, flavor_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(flavor))
}

route!(delete_flavor => Delete "/estabelecimentos/{id}/sabores/{flavor_id}" impl CatalogManagement where requires [Role::Estabelecimento]);
pub async fn delete_flavor<B: CatalogManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, flavor_id) = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    api.delete_flavor(id, flavor_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

route!(set_flavor_availability => Put "/estabelecimentos/{id}/sabores/{flavor_id}/disponibilidade" impl CatalogManagement, NotificationManagement where requires [Role::Estabelecimento]);
pub async fn set_flavor_availability<B: CatalogManagement + NotificationManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    body: web::Json<AvailabilityUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, flavor_id) = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let flavor = api.set_flavor_availability(id, flavor_id, body.available).await?;
    Ok(HttpResponse::Ok().json(flavor))
}

//---------------------------------------  Fulfilment ---------------------------------------------

route!(approve_courier => Post "/estabelecimentos/{id}/entregadores/{courier_id}/aprovar" impl CourierManagement where requires [Role::Estabelecimento]);
pub async fn approve_courier<B: CourierManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<CourierApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, courier_id) = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let association = api.approve_courier(id, courier_id).await?;
    Ok(HttpResponse::Ok().json(association))
}

route!(mark_ready => Put "/estabelecimentos/{id}/pedidos/{order_id}/pronto" impl OrderManagement where requires [Role::Estabelecimento]);
pub async fn mark_ready<B: OrderManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, order_id) = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let order = api.mark_ready(order_id, id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(dispatch_order => Put "/estabelecimentos/{id}/pedidos/{order_id}/despachar" impl OrderManagement, CourierManagement where requires [Role::Estabelecimento]);
pub async fn dispatch_order<B: OrderManagement + CourierManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    body: web::Json<DispatchRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, order_id) = path.into_inner();
    claims.require_self(Role::Estabelecimento, id)?;
    let order = api.dispatch_order(order_id, id, body.courier_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------  Couriers  ---------------------------------------------

route!(register_courier => Post "/entregadores/register" impl CourierManagement);
pub async fn register_courier<B: CourierManagement>(
    body: web::Json<NewCourier>,
    api: web::Data<AuthApi<B>>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let courier = api.register_courier(body.into_inner()).await?;
    let token = issuer.issue(courier.id, Role::Entregador, &courier.name)?;
    Ok(HttpResponse::Created().json(CourierAuthResponse { entregador: courier, token }))
}

route!(login_courier => Post "/entregadores/login" impl CourierManagement);
pub async fn login_courier<B: CourierManagement>(
    body: web::Json<LoginRequest>,
    api: web::Data<AuthApi<B>>,
    issuer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    let login = body.into_inner();
    let courier = api.login_courier(&login.name, &login.password).await?;
    let token = issuer.issue(courier.id, Role::Entregador, &courier.name)?;
    Ok(HttpResponse::Ok().json(CourierAuthResponse { entregador: courier, token }))
}

route!(list_couriers => Get "/entregadores" impl CourierManagement);
pub async fn list_couriers<B: CourierManagement>(
    _claims: JwtClaims,
    query: web::Query<Pagination>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let couriers = api.fetch_couriers(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(couriers))
}

route!(fetch_courier => Get "/entregadores/{id}" impl CourierManagement where requires [Role::Entregador]);
pub async fn fetch_courier<B: CourierManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Entregador, id)?;
    let courier = api.fetch_courier(id).await?;
    Ok(HttpResponse::Ok().json(courier))
}

route!(update_courier => Put "/entregadores/{id}" impl CourierManagement where requires [Role::Entregador]);
pub async fn update_courier<B: CourierManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<CourierUpdate>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Entregador, id)?;
    let courier = api.update_courier(id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(courier))
}

route!(delete_courier => Delete "/entregadores/{id}" impl CourierManagement where requires [Role::Entregador]);
pub async fn delete_courier<B: CourierManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Entregador, id)?;
    api.delete_courier(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

route!(set_courier_availability => Put "/entregadores/{id}/disponibilidade" impl CourierManagement where requires [Role::Entregador]);
pub async fn set_courier_availability<B: CourierManagement>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<AvailabilityUpdate>,
    api: web::Data<CourierApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    claims.require_self(Role::Entregador, id)?;
    let courier = api.set_availability(id, body.available).await?;
    Ok(HttpResponse::Ok().json(courier))
}

route!(request_association => Post "/entregadores/{id}/associacoes/{establishment_id}" impl CourierManagement where requires [Role::Entregador]);
pub async fn request_association<B: CourierManagement>(
    claims: JwtClaims,
    path: web::Path<(i64, i64)>,
    api: web::Data<CourierApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (id, establishment_id) = path.into_inner();
    claims.require_self(Role::Entregador, id)?;
    let association = api.request_association(id, establishment_id).await?;
    Ok(HttpResponse::Created().json(association))
}
