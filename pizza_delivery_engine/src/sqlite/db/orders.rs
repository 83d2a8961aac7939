use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order, OrderStatus},
    order_objects::Pagination,
    traits::OrderApiError,
};

pub async fn insert_order(order: &NewOrder, conn: &mut SqliteConnection) -> Result<Order, OrderApiError> {
    let order = sqlx::query_as::<_, Order>(
        r#"INSERT INTO orders (customer_id, flavor_id, quantity, delivery_address, payment_method, status)
        VALUES ($1, $2, $3, $4, $5, 'Received')
        RETURNING *"#,
    )
    .bind(order.customer_id)
    .bind(order.flavor_id)
    .bind(order.quantity)
    .bind(&order.delivery_address)
    .bind(order.payment_method)
    .fetch_one(conn)
    .await?;
    Ok(order)
}

pub async fn fetch_order_for_customer(
    order_id: i64,
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderApiError> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND customer_id = $2")
        .bind(order_id)
        .bind(customer_id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

/// The order resolves only if its flavor belongs to the establishment.
pub async fn fetch_order_for_establishment(
    order_id: i64,
    establishment_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, OrderApiError> {
    let order = sqlx::query_as::<_, Order>(
        r#"SELECT orders.* FROM orders
        INNER JOIN flavors ON orders.flavor_id = flavors.id
        WHERE orders.id = $1 AND flavors.establishment_id = $2"#,
    )
    .bind(order_id)
    .bind(establishment_id)
    .fetch_optional(conn)
    .await?;
    Ok(order)
}

pub async fn set_order_status(
    order_id: i64,
    status: OrderStatus,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET status = $2, updated_at = CURRENT_TIMESTAMP WHERE id = $1 RETURNING *",
    )
    .bind(order_id)
    .bind(status)
    .fetch_optional(conn)
    .await?;
    order.ok_or(OrderApiError::OrderNotFound(order_id))
}

pub async fn assign_courier(
    order_id: i64,
    courier_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Order, OrderApiError> {
    let order = sqlx::query_as::<_, Order>(
        r#"UPDATE orders SET courier_id = $2, status = 'EnRoute', updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING *"#,
    )
    .bind(order_id)
    .bind(courier_id)
    .fetch_optional(conn)
    .await?;
    order.ok_or(OrderApiError::OrderNotFound(order_id))
}

pub async fn delete_order(order_id: i64, customer_id: i64, conn: &mut SqliteConnection) -> Result<(), OrderApiError> {
    let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND customer_id = $2")
        .bind(order_id)
        .bind(customer_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(OrderApiError::OrderNotFound(order_id));
    }
    Ok(())
}

/// One page of the customer's orders. Undelivered orders come first, then everything is newest
/// first. Ranking happens in SQL so that pagination and ordering agree.
pub async fn order_history(
    customer_id: i64,
    pagination: &Pagination,
    conn: &mut SqliteConnection,
) -> Result<(Vec<Order>, u64), OrderApiError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
        .bind(customer_id)
        .fetch_one(&mut *conn)
        .await?;
    let orders = sqlx::query_as::<_, Order>(
        r#"SELECT * FROM orders
        WHERE customer_id = $1
        ORDER BY CASE WHEN status = 'Delivered' THEN 1 ELSE 0 END, created_at DESC, id DESC
        LIMIT $2 OFFSET $3"#,
    )
    .bind(customer_id)
    .bind(pagination.limit as i64)
    .bind(pagination.offset() as i64)
    .fetch_all(conn)
    .await?;
    Ok((orders, total as u64))
}
