//! Persistence gateway and schema bootstrap.

mod gateway;
pub mod schema;

pub use gateway::{Row, SqliteGateway, StoreConfig};
