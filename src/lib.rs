pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{CrudError, CrudService};
pub use domain::resource::{CustomerModel, ProductModel, ResourceModel, ResourceRegistry};
pub use infra::config::AppConfig;
pub use storage::{PgExecutor, QueryExecutor, SqlValue, StoreFault};
