use crate::db::PgPool;
use crate::errors::custom::DbError;
use crate::schema::customers::dsl as customer_dsl;
use crate::schema::order_products::dsl as order_product_dsl;
use crate::schema::orders::dsl as order_dsl;
use crate::schema::products::dsl as product_dsl;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

/******************************************/
// Adding seed data at startup
/******************************************/
// Runs once: a database with any customer row in it is left alone
pub async fn seed_database(pool: &PgPool) -> Result<(), DbError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let existing: i64 = customer_dsl::customers
        .count()
        .get_result(&mut conn)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;
    if existing > 0 {
        tracing::info!("Database already seeded, skipping");
        return Ok(());
    }

    let customer_ids: Vec<i32> = diesel::insert_into(customer_dsl::customers)
        .values(vec![
            (
                customer_dsl::name.eq("John Doe"),
                customer_dsl::email.eq("john@example.com"),
            ),
            (
                customer_dsl::name.eq("Jane Doe"),
                customer_dsl::email.eq("jane@example.com"),
            ),
        ])
        .returning(customer_dsl::id)
        .get_results(&mut conn)
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    diesel::insert_into(product_dsl::products)
        .values(vec![
            (
                product_dsl::name.eq("Laptop"),
                product_dsl::price.eq(1000.0),
            ),
            (product_dsl::name.eq("Mouse"), product_dsl::price.eq(25.0)),
        ])
        .execute(&mut conn)
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    let laptop_id: i32 = product_dsl::products
        .filter(product_dsl::name.eq("Laptop"))
        .select(product_dsl::id)
        .first(&mut conn)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;
    let mouse_id: i32 = product_dsl::products
        .filter(product_dsl::name.eq("Mouse"))
        .select(product_dsl::id)
        .first(&mut conn)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;

    // ORD123 for the first customer carries both products
    let first_order_id: i32 = diesel::insert_into(order_dsl::orders)
        .values((
            order_dsl::order_number.eq("ORD123"),
            order_dsl::customer_id.eq(customer_ids.as_slice().first().copied()),
        ))
        .returning(order_dsl::id)
        .get_result(&mut conn)
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    diesel::insert_into(order_product_dsl::order_products)
        .values(vec![
            (
                order_product_dsl::order_id.eq(first_order_id),
                order_product_dsl::product_id.eq(laptop_id),
            ),
            (
                order_product_dsl::order_id.eq(first_order_id),
                order_product_dsl::product_id.eq(mouse_id),
            ),
        ])
        .execute(&mut conn)
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    // ORD124 for the second customer carries none
    diesel::insert_into(order_dsl::orders)
        .values((
            order_dsl::order_number.eq("ORD124"),
            order_dsl::customer_id.eq(customer_ids.get(1).copied()),
        ))
        .execute(&mut conn)
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    tracing::info!("Successfully seeded database");
    Ok(())
}
