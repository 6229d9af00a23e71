pub mod crud_service;

pub use crud_service::{CrudError, CrudService, Operation};
