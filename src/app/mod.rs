pub mod router;
pub mod server;
pub mod state;
pub mod tracing;

use std::io;

use crate::config;
use crate::error::ViewerError;
use crate::filter::htmlify::htmlify;

/// Application entry point. Dispatches CLI subcommands, then initializes
/// tracing and configuration and starts the server.
pub async fn run() -> Result<(), ViewerError> {
    // Handle healthcheck subcommand (for container healthchecks in
    // distroless images)
    if std::env::args().nth(1).as_deref() == Some("healthcheck") {
        match crate::healthcheck().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("Healthcheck failed: {e}");
                std::process::exit(1)
            }
        }
    }

    // Handle htmlify subcommand: render stdin as an HTML document on
    // stdout, no server involved.
    if std::env::args().nth(1).as_deref() == Some("htmlify") {
        let stdin = io::stdin();
        let stdout = io::stdout();
        match htmlify(stdin.lock(), stdout.lock()) {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("htmlify failed: {e}");
                std::process::exit(1)
            }
        }
    }

    tracing::init_tracing();

    let settings =
        config::get_configuration().map_err(|e| ViewerError::Config(e.to_string()))?;
    ::tracing::info!("Loaded settings, serving logs from {:?}", settings.log_root);

    let app_state = state::AppState::from_settings(&settings);
    let app = router::main_router(app_state);

    server::serve(app, settings.http_port).await
}
