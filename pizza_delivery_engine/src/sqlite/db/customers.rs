use sqlx::SqliteConnection;

use crate::{
    db_types::{Customer, CustomerUpdate, NewCustomer},
    traits::AccountApiError,
};

pub async fn insert_customer(
    customer: &NewCustomer,
    password_hash: &str,
    conn: &mut SqliteConnection,
) -> Result<Customer, AccountApiError> {
    let result = sqlx::query_as::<_, Customer>(
        r#"INSERT INTO customers (name, password_hash, address)
        VALUES ($1, $2, $3)
        RETURNING *"#,
    )
    .bind(&customer.name)
    .bind(password_hash)
    .bind(&customer.address)
    .fetch_one(conn)
    .await;
    match result {
        Ok(customer) => Ok(customer),
        Err(e) if is_unique_violation(&e) => Err(AccountApiError::NameAlreadyTaken(customer.name.clone())),
        Err(e) => Err(e.into()),
    }
}

pub async fn customer_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<Customer>, AccountApiError> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(customer)
}

pub async fn customer_by_name(name: &str, conn: &mut SqliteConnection) -> Result<Option<Customer>, AccountApiError> {
    let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE name = $1")
        .bind(name)
        .fetch_optional(conn)
        .await?;
    Ok(customer)
}

pub async fn update_customer(
    id: i64,
    update: &CustomerUpdate,
    conn: &mut SqliteConnection,
) -> Result<Customer, AccountApiError> {
    let customer = sqlx::query_as::<_, Customer>(
        r#"UPDATE customers SET
            name = COALESCE($2, name),
            address = COALESCE($3, address),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $1
        RETURNING *"#,
    )
    .bind(id)
    .bind(&update.name)
    .bind(&update.address)
    .fetch_optional(conn)
    .await?;
    customer.ok_or(AccountApiError::NotFound)
}

pub async fn delete_customer(id: i64, conn: &mut SqliteConnection) -> Result<(), AccountApiError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1").bind(id).execute(conn).await?;
    if result.rows_affected() == 0 {
        return Err(AccountApiError::NotFound);
    }
    Ok(())
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|db| db.is_unique_violation())
}
