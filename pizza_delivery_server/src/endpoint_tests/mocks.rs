use mockall::mock;
use pizza_delivery_engine::{
    db_types::{
        Association,
        Courier,
        CourierUpdate,
        Customer,
        CustomerUpdate,
        Flavor,
        FlavorUpdate,
        Interest,
        NewCourier,
        NewCustomer,
        NewFlavor,
        NewNotification,
        NewOrder,
        Notification,
        Order,
        OrderStatus,
    },
    order_objects::Pagination,
    traits::{
        AccountApiError,
        CatalogApiError,
        CatalogManagement,
        CourierManagement,
        CustomerManagement,
        NotificationManagement,
        OrderApiError,
        OrderManagement,
    },
};

mock! {
    pub CustomerBackend {}
    impl CustomerManagement for CustomerBackend {
        async fn insert_customer(&self, customer: &NewCustomer, password_hash: &str) -> Result<Customer, AccountApiError>;
        async fn fetch_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AccountApiError>;
        async fn fetch_customer_by_name(&self, name: &str) -> Result<Option<Customer>, AccountApiError>;
        async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<Customer, AccountApiError>;
        async fn delete_customer(&self, id: i64) -> Result<(), AccountApiError>;
    }
}

mock! {
    pub OrderBackend {}
    impl OrderManagement for OrderBackend {
        async fn insert_order(&self, order: &NewOrder) -> Result<Order, OrderApiError>;
        async fn fetch_order_for_customer(&self, order_id: i64, customer_id: i64) -> Result<Option<Order>, OrderApiError>;
        async fn fetch_order_for_establishment(&self, order_id: i64, establishment_id: i64) -> Result<Option<Order>, OrderApiError>;
        async fn set_order_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, OrderApiError>;
        async fn assign_courier(&self, order_id: i64, courier_id: i64) -> Result<Order, OrderApiError>;
        async fn delete_order(&self, order_id: i64, customer_id: i64) -> Result<(), OrderApiError>;
        async fn order_history(&self, customer_id: i64, pagination: &Pagination) -> Result<(Vec<Order>, u64), OrderApiError>;
    }
}

mock! {
    pub CatalogBackend {}
    impl CatalogManagement for CatalogBackend {
        async fn insert_flavor(&self, flavor: &NewFlavor) -> Result<Flavor, CatalogApiError>;
        async fn fetch_flavor(&self, flavor_id: i64) -> Result<Option<Flavor>, CatalogApiError>;
        async fn update_flavor(&self, establishment_id: i64, flavor_id: i64, update: &FlavorUpdate) -> Result<Flavor, CatalogApiError>;
        async fn delete_flavor(&self, establishment_id: i64, flavor_id: i64) -> Result<(), CatalogApiError>;
        async fn set_flavor_availability(&self, establishment_id: i64, flavor_id: i64, available: bool) -> Result<Flavor, CatalogApiError>;
        async fn fetch_menu(&self, establishment_id: i64) -> Result<Vec<Flavor>, CatalogApiError>;
        async fn register_interest(&self, customer_id: i64, flavor_id: i64) -> Result<Interest, CatalogApiError>;
        async fn fetch_interested_customers(&self, flavor_id: i64) -> Result<Vec<i64>, CatalogApiError>;
    }
    impl NotificationManagement for CatalogBackend {
        async fn insert_notification(&self, notification: &NewNotification) -> Result<Notification, AccountApiError>;
        async fn notifications_for_customer(&self, customer_id: i64) -> Result<Vec<Notification>, AccountApiError>;
        async fn notifications_for_establishment(&self, establishment_id: i64) -> Result<Vec<Notification>, AccountApiError>;
    }
}

mock! {
    pub DispatchBackend {}
    impl OrderManagement for DispatchBackend {
        async fn insert_order(&self, order: &NewOrder) -> Result<Order, OrderApiError>;
        async fn fetch_order_for_customer(&self, order_id: i64, customer_id: i64) -> Result<Option<Order>, OrderApiError>;
        async fn fetch_order_for_establishment(&self, order_id: i64, establishment_id: i64) -> Result<Option<Order>, OrderApiError>;
        async fn set_order_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, OrderApiError>;
        async fn assign_courier(&self, order_id: i64, courier_id: i64) -> Result<Order, OrderApiError>;
        async fn delete_order(&self, order_id: i64, customer_id: i64) -> Result<(), OrderApiError>;
        async fn order_history(&self, customer_id: i64, pagination: &Pagination) -> Result<(Vec<Order>, u64), OrderApiError>;
    }
    impl CourierManagement for DispatchBackend {
        async fn insert_courier(&self, courier: &NewCourier, password_hash: &str) -> Result<Courier, AccountApiError>;
        async fn fetch_courier_by_id(&self, id: i64) -> Result<Option<Courier>, AccountApiError>;
        async fn fetch_courier_by_name(&self, name: &str) -> Result<Option<Courier>, AccountApiError>;
        async fn fetch_couriers(&self, pagination: &Pagination) -> Result<(Vec<Courier>, u64), AccountApiError>;
        async fn update_courier(&self, id: i64, update: &CourierUpdate) -> Result<Courier, AccountApiError>;
        async fn delete_courier(&self, id: i64) -> Result<(), AccountApiError>;
        async fn set_courier_availability(&self, id: i64, available: bool) -> Result<Courier, AccountApiError>;
        async fn request_association(&self, courier_id: i64, establishment_id: i64) -> Result<Association, AccountApiError>;
        async fn approve_association(&self, establishment_id: i64, courier_id: i64) -> Result<Association, AccountApiError>;
        async fn fetch_association(&self, courier_id: i64, establishment_id: i64) -> Result<Option<Association>, AccountApiError>;
    }
}
