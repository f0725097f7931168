//! Demo server for the login pages
//!
//! Serves plain HTTP and is meant for `http://localhost:<PORT>` only. The
//! session cookie is `Secure` and, by default, `__Host-` prefixed; browsers
//! accept such cookies over plain HTTP only from localhost. For any other
//! host, put the demo behind TLS.

mod server;

use dotenvy::dotenv;

use session_login_axum::{LoginState, UserStore, session_login_router};

use server::{init_tracing, spawn_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    init_tracing("demo_login");

    let stores = session_login_axum::init().await?;
    seed_demo_user(&stores.users).await;

    let app = session_login_router(LoginState::from(stores));

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    tracing::info!(
        "Open http://localhost:{} (the Secure session cookie needs localhost or TLS)",
        port
    );
    spawn_http_server(port, app).await?;
    Ok(())
}

// DEMO_USER_EMAIL / DEMO_USER_PASSWORD give the demo someone to log in as
async fn seed_demo_user(users: &UserStore) {
    let (Ok(email), Ok(password)) = (
        std::env::var("DEMO_USER_EMAIL"),
        std::env::var("DEMO_USER_PASSWORD"),
    ) else {
        tracing::info!("DEMO_USER_EMAIL/DEMO_USER_PASSWORD not set, no demo user created");
        return;
    };

    match users.create_user(&email, &password).await {
        Ok(user) => tracing::info!("Demo user {} created with id {}", user.email, user.id),
        Err(e) => tracing::warn!("Demo user not created: {}", e),
    }
}
