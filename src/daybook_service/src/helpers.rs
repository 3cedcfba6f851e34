use redis::{Client, RedisResult};
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connect to Postgres and apply the embedded migrations.
pub async fn configure_postgresql(url: &str) -> Result<PgPool, sqlx::Error> {
    let pg_pool = get_postgres_pool(url).await?;

    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    Ok(pg_pool)
}

pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

pub fn configure_redis(redis_hostname: &str) -> RedisResult<redis::Connection> {
    get_redis_client(redis_hostname)?.get_connection()
}

pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
