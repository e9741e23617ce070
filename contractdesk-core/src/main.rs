use chrono::Local;
use contractdesk_core::audit_log::{export_log, filter_log, AuditFilter, ExportFormat};
use contractdesk_core::auth::{login, FixedCredentials};
use contractdesk_core::dashboard::refresh_dashboard;
use contractdesk_core::{AppConfig, EntityStore, Session};
use dotenv::dotenv;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Demo entry point.
///
/// Logs in with the configured credentials, shows the dashboard figures and
/// exports the audit log to the configured directory.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"))
        .add_directive(LevelFilter::INFO.into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    info!("Starting ContractDesk...");

    let config = AppConfig::from_env()?;
    let store = EntityStore::seeded();

    let credentials = FixedCredentials::new(
        &config.admin_username,
        &config.admin_password,
        config.bcrypt_cost,
    )?;
    let principal = login(
        &credentials,
        &config.admin_username,
        &config.admin_password,
        config.loading_delay,
    )
    .await?;
    let session = Session::start(principal, &store, config.default_vat);

    let summary = refresh_dashboard(&store, config.loading_delay).await;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let rows = filter_log(&store.audit_log, &AuditFilter::default());
    let export = export_log(&rows, ExportFormat::Csv, Local::now().date_naive())?;
    let path = export
        .write_to(&config.export_dir)
        .map_err(|e| anyhow::anyhow!("Failed to export audit log: {}", e))?;
    info!("Audit log exported to {}", path.display());

    session.end();
    Ok(())
}
