use crate::db::PgPool;
use crate::errors::custom::{CustomError, DbError};
use crate::models::{Product, ProductPayload};
use crate::routes::list_query::{ListParams, SortDirection};
use crate::schema::products::{self, dsl as product_dsl};
use actix_web::{web, HttpResponse};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::instrument;

fn apply_sort<'a>(
    query: products::BoxedQuery<'a, Pg>,
    column: &str,
    direction: SortDirection,
) -> products::BoxedQuery<'a, Pg> {
    match (column, direction) {
        ("name", SortDirection::Asc) => query.order(product_dsl::name.asc()),
        ("name", SortDirection::Desc) => query.order(product_dsl::name.desc()),
        ("price", SortDirection::Asc) => query.order(product_dsl::price.asc()),
        ("price", SortDirection::Desc) => query.order(product_dsl::price.desc()),
        ("created_at", SortDirection::Asc) => query.order(product_dsl::created_at.asc()),
        ("created_at", SortDirection::Desc) => query.order(product_dsl::created_at.desc()),
        ("updated_at", SortDirection::Asc) => query.order(product_dsl::updated_at.asc()),
        ("updated_at", SortDirection::Desc) => query.order(product_dsl::updated_at.desc()),
        (_, SortDirection::Asc) => query.order(product_dsl::id.asc()),
        (_, SortDirection::Desc) => query.order(product_dsl::id.desc()),
    }
}

/******************************************/
// New Product Creation route
/******************************************/
/**
 * @route   POST /products
 * @access  Public
 */
#[instrument(name = "Create new product", skip(req_product, pool))]
pub async fn create_product(
    pool: web::Data<PgPool>,
    req_product: web::Json<ProductPayload>,
) -> Result<HttpResponse, CustomError> {
    let product_data = req_product.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let product: Product = diesel::insert_into(product_dsl::products)
        .values((
            product_dsl::name.eq(product_data.name),
            product_dsl::price.eq(product_data.price),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| DbError::InsertionError(err.to_string()))?;

    Ok(HttpResponse::Created().json(product))
}

/******************************************/
// Retrieving Product using id
/******************************************/
/**
 * @route   GET /products/{id}
 * @access  Public
 */
#[instrument(name = "Get product", skip(pool))]
pub async fn get_product(
    pool: web::Data<PgPool>,
    product_id: web::Path<i32>,
) -> Result<HttpResponse, CustomError> {
    let product_id = product_id.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let product: Product = product_dsl::products
        .find(product_id)
        .first(&mut conn)
        .await
        .optional()
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?
        .ok_or(CustomError::NotFound("Product"))?;

    Ok(HttpResponse::Ok().json(product))
}

/******************************************/
// Updating Product route
/******************************************/
/**
 * @route   PUT /products/{id}
 * @access  Public
 */
#[instrument(name = "Update product", skip(body, pool))]
pub async fn update_product(
    pool: web::Data<PgPool>,
    product_id: web::Path<i32>,
    body: web::Bytes,
) -> Result<HttpResponse, CustomError> {
    let product_id = product_id.into_inner();
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let _existing: Product = product_dsl::products
        .find(product_id)
        .first(&mut conn)
        .await
        .optional()
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?
        .ok_or(CustomError::NotFound("Product"))?;

    let product_data: ProductPayload =
        serde_json::from_slice(&body).map_err(|err| CustomError::DecodeError(err.to_string()))?;

    let product: Product = diesel::update(product_dsl::products.find(product_id))
        .set((
            product_dsl::name.eq(product_data.name),
            product_dsl::price.eq(product_data.price),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| DbError::UpdationError(err.to_string()))?;

    Ok(HttpResponse::Ok().json(product))
}

/******************************************/
// Listing Products with pagination, filtering and sorting
/******************************************/
/**
 * @route   GET /products
 * @access  Public
 */
#[instrument(name = "List products", skip(pool, params))]
pub async fn list_products(
    pool: web::Data<PgPool>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, CustomError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let mut query = product_dsl::products.into_boxed();
    if let Some(pattern) = params.name_pattern() {
        query = query.filter(product_dsl::name.ilike(pattern));
    }
    let (column, direction) = params.sort();
    query = apply_sort(query, column, direction);

    let products: Vec<Product> = query
        .offset(params.offset())
        .limit(params.limit())
        .load(&mut conn)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;

    Ok(HttpResponse::Ok().json(products))
}
