use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_query;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dotenv::dotenv;
use std::env;

pub type PgPool = Pool<AsyncPgConnection>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/******************************************/
// Establishing Db Connection
/******************************************/
pub fn establish_connection(database_url: &str) -> PgPool {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(manager)
        .build()
        .expect("Failed to create pool.")
}

/******************************************/
// Running embedded migrations at startup
/******************************************/
pub fn run_migrations(database_url: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut connection = PgConnection::establish(database_url)?;
    connection.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/******************************************/
// Creating new db for tests
/******************************************/
pub fn create_database(database_name: &str) {
    dotenv().ok();
    let database_url = env::var("DATABASE_TEST_URL").expect("DATABASE_TEST_URL must be set");

    let mut connection =
        PgConnection::establish(&database_url).expect("Failed to connect to Postgres");

    let create_db_query = format!(r#"CREATE DATABASE "{}";"#, database_name);
    sql_query(&create_db_query)
        .execute(&mut connection)
        .expect("Failed to create database");
    println!("Database '{}' created", database_name);
}

/******************************************/
// Dropping db code
/******************************************/
pub fn drop_database(database_name: &str) {
    dotenv().ok();

    let default_db_url = env::var("DATABASE_TEST_URL").expect("DATABASE_TEST_URL must be set");

    let mut connection = PgConnection::establish(&default_db_url)
        .expect("Failed to connect to the maintenance database");

    // Dropping fails while connections are still open, so kick them first
    let terminate_query = format!(
        r#"
        SELECT pg_terminate_backend(pid)
        FROM pg_stat_activity
        WHERE datname = '{}';
    "#,
        database_name
    );

    if let Err(e) = sql_query(&terminate_query).execute(&mut connection) {
        eprintln!("Failed to terminate connections: {}", e);
        return;
    }

    let drop_query = format!(r#"DROP DATABASE IF EXISTS "{}";"#, database_name);

    if let Err(e) = sql_query(&drop_query).execute(&mut connection) {
        eprintln!("Failed to drop database: {}", e);
    } else {
        println!("Database '{}' dropped successfully.", database_name);
    }
}
