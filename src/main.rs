use std::io::IsTerminal;
use std::sync::Arc;

use connectcare::api::{Backend, HttpBackend};
use connectcare::cli::Cli;
use connectcare::config::ClientConfig;
use connectcare::location::{
    FixedGeolocator, Geolocator, GooglePlacesClient, LocationResolver, PlacesProvider,
    UnavailableGeolocator,
};
use connectcare::session::SessionController;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export CONNECTCARE_API_BASE_URL=https://api.example.org");
        std::process::exit(1);
    });

    eprintln!("ConnectCare v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.api_base_url);

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(&config)?);

    let geolocator: Arc<dyn Geolocator> = match config.device_position {
        Some((lat, lng)) => {
            eprintln!("   Device location: {lat:.4}, {lng:.4}");
            Arc::new(FixedGeolocator::new(lat, lng))
        }
        None => {
            eprintln!("   Device location: unavailable");
            Arc::new(UnavailableGeolocator)
        }
    };

    let places: Option<Arc<dyn PlacesProvider>> = match config.places_api_key.clone() {
        Some(key) => {
            eprintln!("   Place search: enabled");
            Some(Arc::new(GooglePlacesClient::new(
                config.places_base_url.clone(),
                key,
                config.request_timeout,
            )?))
        }
        None => {
            eprintln!("   Place search: disabled (CONNECTCARE_PLACES_API_KEY not set)");
            None
        }
    };

    if let Some(timeout) = config.request_timeout {
        eprintln!("   Request timeout: {}s", timeout.as_secs());
    }
    eprintln!("   Type /help for commands, /quit to exit.\n");

    let resolver = LocationResolver::new(geolocator, places, Arc::clone(&backend))
        .with_reverse_geocode(config.reverse_geocode);
    let controller = SessionController::new(Arc::clone(&backend), Arc::new(resolver));

    Cli::new(controller, backend)
        .with_ansi(std::io::stdout().is_terminal())
        .run()
        .await;

    Ok(())
}
