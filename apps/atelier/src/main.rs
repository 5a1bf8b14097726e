//! # Atelier Entry Point
//!
//! ```text
//! atelier                      start with the stored configuration
//! atelier '#cfg=<token>'       start from a shared link
//! atelier 'https://host/#cfg=<token>'
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load settings (`atelier.toml`, `ATELIER_*` overrides)
//! 3. Open local storage & run migrations
//! 4. Hydrate configuration and cart, apply the shared link
//! 5. Run the shell until `quit` or end of input

fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(e) = atelier_app::run() {
        eprintln!("atelier: {e}");
        std::process::exit(1);
    }
}
