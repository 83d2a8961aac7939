use sqlx::SqliteConnection;

use crate::{
    db_types::{NewNotification, Notification},
    traits::AccountApiError,
};

pub async fn insert_notification(
    notification: &NewNotification,
    conn: &mut SqliteConnection,
) -> Result<Notification, AccountApiError> {
    let notification = sqlx::query_as::<_, Notification>(
        r#"INSERT INTO notifications (customer_id, establishment_id, message)
        VALUES ($1, $2, $3)
        RETURNING *"#,
    )
    .bind(notification.customer_id)
    .bind(notification.establishment_id)
    .bind(&notification.message)
    .fetch_one(conn)
    .await?;
    Ok(notification)
}

pub async fn notifications_for_customer(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Notification>, AccountApiError> {
    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE customer_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(customer_id)
    .fetch_all(conn)
    .await?;
    Ok(notifications)
}

pub async fn notifications_for_establishment(
    establishment_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Notification>, AccountApiError> {
    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE establishment_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(establishment_id)
    .fetch_all(conn)
    .await?;
    Ok(notifications)
}
