//! # Atelier App Library
//!
//! Settings, session state, commands and the shell for Atelier.
//!
//! ## Module Organization
//! ```text
//! atelier_app/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── settings.rs     ◄─── AppSettings (toml + ATELIER_* env)
//! ├── state/          ◄─── Config, Cart, Customizer, Toast, Url, Reset, Db
//! ├── commands/       ◄─── config, transfer, cart, customize
//! ├── clipboard.rs    ◄─── Clipboard port (arboard / memory)
//! ├── shell.rs        ◄─── Line-oriented front end
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Configuration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  defaults                                                               │
//! │     │  stored "ui-config" record (validated)                            │
//! │     ▼                                                                   │
//! │  stored or defaults                                                     │
//! │     │  "#cfg=<token>" argument decodes?                                 │
//! │     ├── yes ──► validate ──► adopt, toast "Loaded config from URL"      │
//! │     └── no  ──► silently keep                                           │
//! │     ▼                                                                   │
//! │  ConfigStore::new(initial)   (no undo step for any of this)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod clipboard;
pub mod commands;
pub mod error;
pub mod settings;
pub mod shell;
pub mod state;

use std::sync::Arc;

use atelier_core::{codec, validation, Cart};
use atelier_db::{Database, DbConfig};
use tokio::io::BufReader;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use clipboard::{Clipboard, SystemClipboard};
use settings::AppSettings;
use shell::Shell;
use state::{CartState, ConfigState, CustomizerState, DbState, ToastState, UrlState};

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter (RUST_LOG overrides)           │
/// │                                                                         │
/// │  2. Load Settings ────────────────────────────────────────────────────► │
/// │     • atelier.toml, then ATELIER_* environment variables               │
/// │                                                                         │
/// │  3. Open Local Storage ───────────────────────────────────────────────► │
/// │     • SQLite (WAL), pending migrations                                  │
/// │                                                                         │
/// │  4. Bootstrap State ──────────────────────────────────────────────────► │
/// │     • Configuration: stored record, then the shared link argument      │
/// │     • Cart: stored record (keys recomputed, duplicates merged)          │
/// │                                                                         │
/// │  5. Run the Shell on stdin/stdout ────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Atelier");

    let settings = AppSettings::load()?;
    let db_path = settings.database_path()?;
    info!(?db_path, "Database path determined");

    let link = std::env::args().nth(1);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        let clipboard: Arc<dyn Clipboard> = Arc::new(SystemClipboard::new());
        let shell = bootstrap(db, &settings, link.as_deref(), clipboard).await;
        info!("State initialized");

        shell
            .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;

        info!("Shell closed");
        Ok(())
    })
}

/// Builds the session from storage and the optional shared link.
///
/// Storage read failures are logged and treated as "nothing stored".
/// Must be called inside a Tokio runtime.
pub async fn bootstrap(
    db: Database,
    settings: &AppSettings,
    link: Option<&str>,
    clipboard: Arc<dyn Clipboard>,
) -> Shell {
    let stored = db.config().load().await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not read stored configuration");
        None
    });
    let cart = db.cart().load().await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not read stored cart");
        None
    });

    let db = DbState::new(db);
    let toasts = ToastState::new(settings.toast_duration());
    let mut url = UrlState::new(settings.base_url.clone(), settings.url_debounce());
    let mut initial = stored.unwrap_or_default();

    if let Some(token) = link.and_then(codec::parse_fragment) {
        url = url.with_fragment(codec::fragment_for(token));
        match codec::decode(token) {
            Ok(raw) => {
                initial = validation::validate(&raw);
                db.save_config(&initial, &toasts).await;
                toasts.push("Loaded config from URL");
            }
            Err(e) => debug!(error = %e, "Ignoring malformed shared link"),
        }
    }

    url.schedule(&initial);

    Shell::new(
        db,
        ConfigState::new(initial),
        CartState::new(cart.unwrap_or_else(Cart::new), settings.tax_rate()),
        CustomizerState::new(),
        toasts,
        url,
        clipboard,
        settings.export_dir.clone(),
    )
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=atelier=trace` - Show trace for atelier crates only
/// - Default: `info,atelier=debug,sqlx=warn`
///
/// Logs go to stderr so they never mix with shell output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,atelier=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use atelier_core::Configuration;

    async fn memory_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn link_for(config: &Configuration) -> String {
        format!("http://localhost:5173/{}", codec::fragment_for(&codec::encode(config)))
    }

    #[tokio::test]
    async fn test_fresh_start_is_defaults() {
        let shell = bootstrap(
            memory_db().await,
            &AppSettings::default(),
            None,
            Arc::new(MemoryClipboard::new()),
        )
        .await;

        assert_eq!(shell.config().current(), Configuration::default());
        assert!(shell.cart().with_cart(|c| c.is_empty()));
        assert!(shell.toasts().active().is_empty());
    }

    #[tokio::test]
    async fn test_stored_configuration_and_cart_hydrate() {
        let db = memory_db().await;
        let mut stored = Configuration::default();
        stored.layout.variant = atelier_core::LayoutVariant::Stacked;
        db.config().save(&stored).await.unwrap();

        let mut cart = Cart::new();
        cart.add(atelier_core::ChairCustomizer::default().line_item(None));
        db.cart().save(&cart).await.unwrap();

        let shell =
            bootstrap(db, &AppSettings::default(), None, Arc::new(MemoryClipboard::new())).await;
        assert_eq!(shell.config().current(), stored);
        assert_eq!(shell.cart().with_cart(|c| c.len()), 1);
        assert!(!shell.config().with_store(|s| s.can_undo()));
    }

    #[tokio::test]
    async fn test_shared_link_wins_over_storage() {
        let db = memory_db().await;
        let mut stored = Configuration::default();
        stored.gallery.gap = 30;
        db.config().save(&stored).await.unwrap();

        let mut shared = Configuration::default();
        shared.button.radius = 4;
        let link = link_for(&shared);

        let clipboard = Arc::new(MemoryClipboard::new());
        let shell = bootstrap(db.clone(), &AppSettings::default(), Some(&link), clipboard).await;

        assert_eq!(shell.config().current(), shared);
        assert!(!shell.config().with_store(|s| s.can_undo()));
        assert_eq!(shell.toasts().active()[0].message, "Loaded config from URL");
        assert_eq!(db.config().load().await.unwrap(), Some(shared));
    }

    #[tokio::test]
    async fn test_malformed_link_is_silent() {
        let db = memory_db().await;
        for link in ["#cfg=%%%not-base64", "#cfg=", "#other=abc", "no fragment"] {
            let shell = bootstrap(
                db.clone(),
                &AppSettings::default(),
                Some(link),
                Arc::new(MemoryClipboard::new()),
            )
            .await;
            assert_eq!(shell.config().current(), Configuration::default(), "{link}");
            assert!(shell.toasts().active().is_empty(), "{link}");
        }
    }

    #[tokio::test]
    async fn test_partial_link_is_validated() {
        let raw = serde_json::json!({"typography": {"weight": 5000, "unit": "em"}});
        let token = codec::encode_raw(&raw);
        let shell = bootstrap(
            memory_db().await,
            &AppSettings::default(),
            Some(&format!("#cfg={token}")),
            Arc::new(MemoryClipboard::new()),
        )
        .await;

        let config = shell.config().current();
        assert_eq!(config.typography.weight, 900);
        assert_eq!(config.typography.unit, Configuration::default().typography.unit);
    }

    #[tokio::test]
    async fn test_shared_link_notice_is_printed() {
        let mut shared = Configuration::default();
        shared.layout.dark = true;
        let shell = bootstrap(
            memory_db().await,
            &AppSettings::default(),
            Some(&link_for(&shared)),
            Arc::new(MemoryClipboard::new()),
        )
        .await;

        let mut output = Vec::new();
        shell.run("show\nquit\n".as_bytes(), &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.starts_with("» Loaded config from URL\natelier> "));
        assert_eq!(output.matches("Loaded config from URL").count(), 1);
        assert!(output.contains("\"dark\": true"));
    }
}
