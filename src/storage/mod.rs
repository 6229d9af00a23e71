pub mod executor;
pub mod postgres;

pub use executor::{QueryExecutor, SqlValue, StoreFault};
pub use postgres::PgExecutor;
