use crate::db::PgPool;
use crate::errors::custom::{CustomError, DbError};
use crate::models::{Customer, Order, OrderDetail, OrderPayload, Product};
use crate::routes::list_query::{ListParams, SortDirection};
use crate::schema::customers::dsl as customer_dsl;
use crate::schema::order_products::dsl as order_product_dsl;
use crate::schema::orders::{self, dsl as order_dsl};
use crate::schema::products::dsl as product_dsl;
use actix_web::{web, HttpResponse};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::instrument;

fn apply_sort<'a>(
    query: orders::BoxedQuery<'a, Pg>,
    column: &str,
    direction: SortDirection,
) -> orders::BoxedQuery<'a, Pg> {
    match (column, direction) {
        ("order_number", SortDirection::Asc) => query.order(order_dsl::order_number.asc()),
        ("order_number", SortDirection::Desc) => query.order(order_dsl::order_number.desc()),
        ("customer_id", SortDirection::Asc) => query.order(order_dsl::customer_id.asc()),
        ("customer_id", SortDirection::Desc) => query.order(order_dsl::customer_id.desc()),
        ("created_at", SortDirection::Asc) => query.order(order_dsl::created_at.asc()),
        ("created_at", SortDirection::Desc) => query.order(order_dsl::created_at.desc()),
        ("updated_at", SortDirection::Asc) => query.order(order_dsl::updated_at.asc()),
        ("updated_at", SortDirection::Desc) => query.order(order_dsl::updated_at.desc()),
        (_, SortDirection::Asc) => query.order(order_dsl::id.asc()),
        (_, SortDirection::Desc) => query.order(order_dsl::id.desc()),
    }
}

async fn load_products(
    conn: &mut AsyncPgConnection,
    order_id: i32,
) -> Result<Vec<Product>, DbError> {
    order_product_dsl::order_products
        .inner_join(product_dsl::products)
        .filter(order_product_dsl::order_id.eq(order_id))
        .select(Product::as_select())
        .load(conn)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))
}

async fn load_customer(
    conn: &mut AsyncPgConnection,
    customer_id: Option<i32>,
) -> Result<Option<Customer>, DbError> {
    match customer_id {
        Some(customer_id) => customer_dsl::customers
            .find(customer_id)
            .first(conn)
            .await
            .optional()
            .map_err(|err| DbError::QueryBuilderError(err.to_string())),
        None => Ok(None),
    }
}

/******************************************/
// New Order Creation route
/******************************************/
/**
 * @route   POST /orders
 * @access  Public
 */
// The order row and its product links go in together; the links are never
// touched again by this API
#[instrument(name = "Create new order", skip(req_order, pool))]
pub async fn create_order(
    pool: web::Data<PgPool>,
    req_order: web::Json<OrderPayload>,
) -> Result<HttpResponse, CustomError> {
    let order_data = req_order.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let order: Order = conn
        .transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let order: Order = diesel::insert_into(order_dsl::orders)
                    .values((
                        order_dsl::order_number.eq(order_data.order_number),
                        order_dsl::customer_id.eq(order_data.customer_id),
                    ))
                    .get_result(conn)
                    .await?;

                if !order_data.products.is_empty() {
                    let links: Vec<_> = order_data
                        .products
                        .iter()
                        .map(|product| {
                            (
                                order_product_dsl::order_id.eq(order.id),
                                order_product_dsl::product_id.eq(product.id),
                            )
                        })
                        .collect();
                    diesel::insert_into(order_product_dsl::order_products)
                        .values(links)
                        .execute(conn)
                        .await?;
                }

                Ok(order)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    let products = load_products(&mut conn, order.id).await?;
    let customer = load_customer(&mut conn, order.customer_id).await?;

    Ok(HttpResponse::Created().json(OrderDetail {
        order,
        customer,
        products,
    }))
}

/******************************************/
// Retrieving Order using id
/******************************************/
/**
 * @route   GET /orders/{id}
 * @access  Public
 */
#[instrument(name = "Get order", skip(pool))]
pub async fn get_order(
    pool: web::Data<PgPool>,
    order_id: web::Path<i32>,
) -> Result<HttpResponse, CustomError> {
    let order_id = order_id.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let order: Order = order_dsl::orders
        .find(order_id)
        .first(&mut conn)
        .await
        .optional()
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?
        .ok_or(CustomError::NotFound("Order"))?;

    let products = load_products(&mut conn, order.id).await?;
    let customer = load_customer(&mut conn, order.customer_id).await?;

    Ok(HttpResponse::Ok().json(OrderDetail {
        order,
        customer,
        products,
    }))
}

/******************************************/
// Updating Order route
/******************************************/
/**
 * @route   PUT /orders/{id}
 * @access  Public
 */
// Overwrites order_number and customer_id; product links are immutable
#[instrument(name = "Update order", skip(body, pool))]
pub async fn update_order(
    pool: web::Data<PgPool>,
    order_id: web::Path<i32>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let order_id = order_id.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let _existing: Order = order_dsl::orders
        .find(order_id)
        .first(&mut conn)
        .await
        .optional()
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?
        .ok_or(CustomError::NotFound("Order"))?;

    let order_data: OrderPayload =
        serde_json::from_slice(&body).map_err(|err| CustomError::DecodeError(err.to_string()))?;

    let order: Order = diesel::update(order_dsl::orders.find(order_id))
        .set((
            order_dsl::order_number.eq(order_data.order_number),
            order_dsl::customer_id.eq(order_data.customer_id),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| DbError::UpdationError(err.to_string()))?;

    Ok(HttpResponse::Ok().json(order))
}

/******************************************/
// Listing Orders with pagination and sorting
/******************************************/
/**
 * @route   GET /orders
 * @access  Public
 */
// Orders carry no name column, so the name filter does not apply here
#[instrument(name = "List orders", skip(pool, params))]
pub async fn list_orders(
    pool: web::Data<PgPool>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let (column, direction) = params.sort();
    let query = apply_sort(order_dsl::orders.into_boxed(), column, direction);

    let orders: Vec<Order> = query
        .offset(params.offset())
        .limit(params.limit())
        .load(&mut conn)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;

    Ok(HttpResponse::Ok().json(orders))
}
