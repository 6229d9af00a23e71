use customer_product_api::infra::logging;
use customer_product_api::{AppConfig, PgExecutor, QueryExecutor, ResourceRegistry};
use tracing::{error, info};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads the same configuration as api_server:\n\
           APP_HOST, APP_PORT, and DATABASE_URL or DB_HOST/DB_PORT/DB_USER/DB_PASSWORD/DB_NAME\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = AppConfig::from_env()?;
    info!(listen = %config.listen_addr(), database = %config.database.describe(), "preflight");

    let executor = PgExecutor::connect_lazy(&config.database);
    executor
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("database unreachable: {}", e))?;
    info!("database reachable");

    let registry = ResourceRegistry::standard();
    let mut missing = Vec::new();
    for model in registry.models() {
        let sql = format!("SELECT 1 FROM {} LIMIT 0", model.table_name());
        match sqlx::query(&sql).execute(executor.pool()).await {
            Ok(_) => info!(table = model.table_name(), "table reachable"),
            Err(e) => {
                error!(table = model.table_name(), error = %e, "table not usable");
                missing.push(model.table_name().to_string());
            }
        }
    }

    executor.pool().close().await;

    if !missing.is_empty() {
        return Err(anyhow::anyhow!("tables not usable: {}", missing.join(", ")));
    }
    info!("preflight OK");
    Ok(())
}
