use bersekolah::api::model::LoginRequest;
use bersekolah::api::Client;
use bersekolah::applicant::model::format_date;
use bersekolah::config::Config;
use bersekolah::repo::SessionStore;
use bersekolah::view::{ListController, TableView};
use bersekolah::auth;
use log::{info, warn};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let config = Config::load().expect("Environment misconfigured!");
    let mut store = SessionStore::open(&config.session_db).expect("Failed to open session store");
    let mut client = Client::new(&config);

    if !auth::restore(&mut client, &store).expect("Failed to read session") {
        match (env::var("BERSEKOLAH_EMAIL"), env::var("BERSEKOLAH_PASSWORD")) {
            (Ok(email), Ok(password)) => {
                auth::login(&mut client, &mut store, &LoginRequest { email, password })
                    .await
                    .expect("Login failed");
            }
            _ => warn!("no saved session and no credentials; authenticated calls will fail"),
        }
    }

    let page = ListController::new(client, &config);
    page.mount().await;
    if let Ok(period) = env::var("BERSEKOLAH_PERIOD") {
        page.select_period(period.parse().ok()).await;
    }
    if let Ok(search) = env::var("BERSEKOLAH_SEARCH") {
        page.set_search(search).await;
    }

    let state = page.snapshot().await;
    info!(
        "total {} / pending {} / approved {} / rejected {}",
        state.stats.total, state.stats.pending, state.stats.approved, state.stats.rejected
    );
    match state.table() {
        TableView::Spinner => println!("Memuat data..."),
        TableView::Failed { message } => println!("{message}"),
        TableView::Empty { message } => println!("{message}"),
        TableView::Rows(rows) => {
            for r in rows {
                println!(
                    "{:>5}  {:<30} {:<12} {:<20} {:<10} {}",
                    r.id,
                    r.personal_data.full_name,
                    r.personal_data.gender,
                    r.personal_data.birthplace,
                    r.status.label(),
                    format_date(r.application_date.as_ref()),
                );
            }
        }
    }
    if let Some(toast) = page.notifier().current().await {
        println!("[{:?}] {}", toast.kind, toast.message);
    }
}
