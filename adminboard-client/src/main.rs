//! # Adminboard
//!
//! Headless driver for the admin console: restores the persisted session,
//! navigates to the start path and, on the user management page, loads the
//! first page of users.
//!
//! ## Usage
//!
//! ```bash
//! ADMINBOARD_START_PATH=/admin/users cargo run -p adminboard-client
//! ```

use adminboard_client::config::Config;
use adminboard_client::console::Console;
use adminboard_shared::models::ListUsersParams;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Adminboard v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    tracing::info!(
        "Backend {} (timeout {}ms), state in {}",
        config.api.base_url,
        config.api.timeout_ms,
        config.storage.dir.display()
    );

    let start_path = config.start_path.clone();
    let mut console = Console::new(config)?;

    let location = console.router_mut().push(&start_path)?.clone();
    tracing::info!(
        "Landed on {} ({})",
        location.full_path,
        console.router().document_title()
    );

    for tab in console.router().tabs().tabs() {
        let marker = if tab.path == console.router().tabs().active_tab() {
            "*"
        } else {
            " "
        };
        tracing::info!("{} [{}] {}", marker, tab.title, tab.path);
    }

    if location.name.as_deref() == Some("Users") {
        let mut params = ListUsersParams::default().page(1).limit(10);
        if let Some(keyword) = location.query.get("keyword") {
            params = params.keyword(keyword.as_str());
        }

        match console.users().list(params).await {
            Ok(page) => {
                tracing::info!(
                    "Users page {}/{} ({} total)",
                    page.pagination.current,
                    page.pagination.total_pages,
                    page.pagination.total
                );
                for user in &page.users {
                    tracing::info!("  {} <{}> {}", user.username, user.email, user.role);
                }
            }
            // Already surfaced through the notifier
            Err(e) => tracing::debug!("User listing failed: {}", e),
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "adminboard_client=debug,adminboard_shared=debug".into());

    let json = std::env::var("ADMINBOARD_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
