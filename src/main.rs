use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use prompt_gateway::{app::envy::Envy, router, AppState};

#[tokio::main]
async fn main() {
    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // environment
    let app_env = env::var("APP_ENV").unwrap_or("development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));
    let envy = match envy::from_env::<Envy>() {
        Ok(config) => config,
        Err(e) => panic!("{:#?}", e),
    };

    tracing::info!("using ollama at {}", envy.ollama_url);
    tracing::info!("using forge at {}", envy.forge_url);

    // properties
    let port = envy.port.unwrap_or(8000);
    let state = Arc::new(AppState::from_envy(envy).await);

    // app
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    if let Err(e) = axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("server error: {}", e);
    }
}
