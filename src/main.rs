use clap::Parser;
use tracing_subscriber::EnvFilter;
use turf_booking::configuration::Configuration;
use turf_booking::configuration_handler::EnvConfiguration;
use turf_booking::database::DatabaseInterface;
use turf_booking::http::{start_server, AppState};
use turf_booking::local_store::LocalStore;

#[derive(Parser)]
struct Args {
    /// Port to listen on (falls back to PORT, then 3000).
    #[arg(long)]
    port: Option<u16>,

    /// PostgreSQL connection URL (falls back to DATABASE_URL).
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = EnvConfiguration::new(args.port, args.database_url);
    let admin_password = config.admin_password();
    let port = config.port();

    match config.database_url() {
        Some(url) => match DatabaseInterface::new(&url) {
            Ok(backend) => {
                start_server(
                    AppState {
                        backend,
                        admin_password,
                    },
                    port,
                )
                .await
            }
            Err(err) => {
                tracing::error!("database connection failed: {err}");
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not set, bookings will not be persisted");
            start_server(
                AppState {
                    backend: LocalStore::default(),
                    admin_password,
                },
                port,
            )
            .await
        }
    }
}
