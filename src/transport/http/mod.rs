pub mod router;
pub mod types;
pub mod handlers {
    pub mod resource;
    pub mod root;
}

pub use router::create_router;
pub use types::{ApiError, ResourceState};
