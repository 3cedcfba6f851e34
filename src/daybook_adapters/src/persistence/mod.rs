pub mod hashmap_user_store;
pub mod hashmap_revoked_session_store;
pub mod postgres_user_store;
pub mod redis_revoked_session_store;

pub use hashmap_user_store::HashMapUserStore;
pub use hashmap_revoked_session_store::HashMapRevokedSessionStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_revoked_session_store::RedisRevokedSessionStore;
