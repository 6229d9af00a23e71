use crate::app::CrudService;
use crate::domain::resource::{ResourceModel, ResourceRegistry};
use crate::storage::QueryExecutor;
use crate::transport::http::handlers::{resource, root};
use crate::transport::http::types::ResourceState;
use axum::routing::{get, put};
use axum::Router;
use std::sync::Arc;

/// Builds the dispatcher: `GET /` plus list/create on `/{table}` and update/delete on
/// `/{table}/:id` for every registered resource. Unmatched paths get axum's default 404.
pub fn create_router(registry: &ResourceRegistry, executor: Arc<dyn QueryExecutor>) -> Router {
    let mut router = Router::new().route("/", get(root::root_handler));
    for model in registry.models() {
        router = router.merge(resource_routes(model.clone(), executor.clone()));
    }
    router
}

fn resource_routes(model: Arc<dyn ResourceModel>, executor: Arc<dyn QueryExecutor>) -> Router {
    let collection = format!("/{}", model.table_name());
    let item = format!("{}/:id", collection);
    let state = ResourceState {
        service: CrudService::new(model, executor),
    };

    Router::new()
        .route(
            &collection,
            get(resource::list_handler).post(resource::create_handler),
        )
        .route(
            &item,
            put(resource::update_handler).delete(resource::delete_handler),
        )
        .with_state(state)
}
