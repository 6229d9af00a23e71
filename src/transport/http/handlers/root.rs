use axum::http::StatusCode;

pub const ROOT_DESCRIPTION: &str = "Servidor API Rest que manipula as rotas /product e /customer/.";

/// Static description of the server.
pub async fn root_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, ROOT_DESCRIPTION)
}
