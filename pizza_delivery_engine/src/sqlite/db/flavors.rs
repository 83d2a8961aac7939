use sqlx::SqliteConnection;

use crate::{
    db_types::{Flavor, FlavorUpdate, Interest, NewFlavor},
    traits::CatalogApiError,
};

pub async fn insert_flavor(flavor: &NewFlavor, conn: &mut SqliteConnection) -> Result<Flavor, CatalogApiError> {
    let result = sqlx::query_as::<_, Flavor>(
        r#"INSERT INTO flavors (establishment_id, name, category, price_medium, price_large, available)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *"#,
    )
    .bind(flavor.establishment_id)
    .bind(&flavor.name)
    .bind(flavor.category)
    .bind(flavor.price_medium)
    .bind(flavor.price_large)
    .bind(flavor.available)
    .fetch_one(conn)
    .await;
    match result {
        Ok(flavor) => Ok(flavor),
        // The only foreign key on the table points at the owner.
        Err(e) if is_foreign_key_violation(&e) => {
            Err(CatalogApiError::EstablishmentNotFound(flavor.establishment_id))
        },
        Err(e) => Err(e.into()),
    }
}

pub async fn flavor_by_id(flavor_id: i64, conn: &mut SqliteConnection) -> Result<Option<Flavor>, CatalogApiError> {
    let flavor =
        sqlx::query_as::<_, Flavor>("SELECT * FROM flavors WHERE id = $1").bind(flavor_id).fetch_optional(conn).await?;
    Ok(flavor)
}

pub async fn update_flavor(
    establishment_id: i64,
    flavor_id: i64,
    update: &FlavorUpdate,
    conn: &mut SqliteConnection,
) -> Result<Flavor, CatalogApiError> {
    let flavor = sqlx::query_as::<_, Flavor>(
        r#"UPDATE flavors SET
            name = COALESCE($3, name),
            category = COALESCE($4, category),
            price_medium = COALESCE($5, price_medium),
            price_large = COALESCE($6, price_large),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = $1 AND establishment_id = $2
        RETURNING *"#,
    )
    .bind(flavor_id)
    .bind(establishment_id)
    .bind(&update.name)
    .bind(update.category)
    .bind(update.price_medium)
    .bind(update.price_large)
    .fetch_optional(conn)
    .await?;
    flavor.ok_or(CatalogApiError::FlavorNotFound(flavor_id))
}

pub async fn delete_flavor(
    establishment_id: i64,
    flavor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<(), CatalogApiError> {
    let result = sqlx::query("DELETE FROM flavors WHERE id = $1 AND establishment_id = $2")
        .bind(flavor_id)
        .bind(establishment_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CatalogApiError::FlavorNotFound(flavor_id));
    }
    Ok(())
}

pub async fn set_flavor_availability(
    establishment_id: i64,
    flavor_id: i64,
    available: bool,
    conn: &mut SqliteConnection,
) -> Result<Flavor, CatalogApiError> {
    let flavor = sqlx::query_as::<_, Flavor>(
        r#"UPDATE flavors SET available = $3, updated_at = CURRENT_TIMESTAMP
        WHERE id = $1 AND establishment_id = $2
        RETURNING *"#,
    )
    .bind(flavor_id)
    .bind(establishment_id)
    .bind(available)
    .fetch_optional(conn)
    .await?;
    flavor.ok_or(CatalogApiError::FlavorNotFound(flavor_id))
}

/// The establishment's menu, available flavors first.
pub async fn fetch_menu(establishment_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Flavor>, CatalogApiError> {
    let flavors = sqlx::query_as::<_, Flavor>(
        "SELECT * FROM flavors WHERE establishment_id = $1 ORDER BY available DESC, name",
    )
    .bind(establishment_id)
    .fetch_all(conn)
    .await?;
    Ok(flavors)
}

pub async fn register_interest(
    customer_id: i64,
    flavor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Interest, CatalogApiError> {
    sqlx::query(
        r#"INSERT INTO interests (customer_id, flavor_id)
        VALUES ($1, $2)
        ON CONFLICT (customer_id, flavor_id) DO NOTHING"#,
    )
    .bind(customer_id)
    .bind(flavor_id)
    .execute(&mut *conn)
    .await?;
    let interest =
        sqlx::query_as::<_, Interest>("SELECT * FROM interests WHERE customer_id = $1 AND flavor_id = $2")
            .bind(customer_id)
            .bind(flavor_id)
            .fetch_one(conn)
            .await?;
    Ok(interest)
}

pub async fn fetch_interested_customers(
    flavor_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<i64>, CatalogApiError> {
    let customers = sqlx::query_scalar::<_, i64>("SELECT customer_id FROM interests WHERE flavor_id = $1")
        .bind(flavor_id)
        .fetch_all(conn)
        .await?;
    Ok(customers)
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error().is_some_and(|db| db.is_foreign_key_violation())
}
