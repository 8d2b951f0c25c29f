use crate::db::PgPool;
use crate::errors::custom::{CustomError, DbError};
use crate::models::{Customer, CustomerDetail, CustomerPayload, Order};
use crate::routes::list_query::{ListParams, SortDirection};
use crate::schema::customers::{self, dsl as customer_dsl};
use crate::schema::orders::dsl as order_dsl;
use actix_web::{web, HttpResponse};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::instrument;

// Sortable columns are pinned to the real ones; anything else sorts by id
// in the requested direction
fn apply_sort<'a>(
    query: customers::BoxedQuery<'a, Pg>,
    column: &str,
    direction: SortDirection,
) -> customers::BoxedQuery<'a, Pg> {
    match (column, direction) {
        ("name", SortDirection::Asc) => query.order(customer_dsl::name.asc()),
        ("name", SortDirection::Desc) => query.order(customer_dsl::name.desc()),
        ("email", SortDirection::Asc) => query.order(customer_dsl::email.asc()),
        ("email", SortDirection::Desc) => query.order(customer_dsl::email.desc()),
        ("created_at", SortDirection::Asc) => query.order(customer_dsl::created_at.asc()),
        ("created_at", SortDirection::Desc) => query.order(customer_dsl::created_at.desc()),
        ("updated_at", SortDirection::Asc) => query.order(customer_dsl::updated_at.asc()),
        ("updated_at", SortDirection::Desc) => query.order(customer_dsl::updated_at.desc()),
        (_, SortDirection::Asc) => query.order(customer_dsl::id.asc()),
        (_, SortDirection::Desc) => query.order(customer_dsl::id.desc()),
    }
}

/******************************************/
// New Customer Creation route
/******************************************/
/**
 * @route   POST /customers
 * @access  Public
 */
#[instrument(name = "Create new customer", skip(req_customer, pool))]
pub async fn create_customer(
    pool: web::Data<PgPool>,
    req_customer: web::Json<CustomerPayload>,
) -> Result<HttpResponse, CustomError> {
    let customer_data = req_customer.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let customer: Customer = diesel::insert_into(customer_dsl::customers)
        .values((
            customer_dsl::name.eq(customer_data.name),
            customer_dsl::email.eq(customer_data.email),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    Ok(HttpResponse::Created().json(customer))
}

/******************************************/
// Retrieving Customer using id
/******************************************/
/**
 * @route   GET /customers/{id}
 * @access  Public
 */
#[instrument(name = "Get customer", skip(pool))]
pub async fn get_customer(
    pool: web::Data<PgPool>,
    customer_id: web::Path<i32>,
) -> Result<HttpResponse, CustomError> {
    let customer_id = customer_id.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let customer: Customer = customer_dsl::customers
        .find(customer_id)
        .first(&mut conn)
        .await
        .optional()
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?
        .ok_or(CustomError::NotFound("Customer"))?;

    let orders: Vec<Order> = order_dsl::orders
        .filter(order_dsl::customer_id.eq(customer.id))
        .load(&mut conn)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;

    Ok(HttpResponse::Ok().json(CustomerDetail { customer, orders }))
}

/******************************************/
// Updating Customer route
/******************************************/
/**
 * @route   PUT /customers/{id}
 * @access  Public
 */
// Full overwrite: every column is written from the decoded body, so fields
// the client leaves out are reset to their zero values
#[instrument(name = "Update customer", skip(body, pool))]
pub async fn update_customer(
    pool: web::Data<PgPool>,
    customer_id: web::Path<i32>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let customer_id = customer_id.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let _existing: Customer = customer_dsl::customers
        .find(customer_id)
        .first(&mut conn)
        .await
        .optional()
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?
        .ok_or(CustomError::NotFound("Customer"))?;

    let customer_data: CustomerPayload =
        serde_json::from_slice(&body).map_err(|err| CustomError::DecodeError(err.to_string()))?;

    let customer: Customer = diesel::update(customer_dsl::customers.find(customer_id))
        .set((
            customer_dsl::name.eq(customer_data.name),
            customer_dsl::email.eq(customer_data.email),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| DbError::UpdationError(err.to_string()))?;

    Ok(HttpResponse::Ok().json(customer))
}

/******************************************/
// Listing Customers with pagination, filtering and sorting
/******************************************/
/**
 * @route   GET /customers
 * @access  Public
 */
#[instrument(name = "List customers", skip(pool, params))]
pub async fn list_customers(
    pool: web::Data<PgPool>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let mut query = customer_dsl::customers.into_boxed();
    if let Some(pattern) = params.name_pattern() {
        query = query.filter(customer_dsl::name.ilike(pattern));
    }
    let (column, direction) = params.sort();
    query = apply_sort(query, column, direction);

    let customers: Vec<Customer> = query
        .offset(params.offset())
        .limit(params.limit())
        .load(&mut conn)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;

    Ok(HttpResponse::Ok().json(customers))
}
