//! Server Module
//!
//! This module contains the code that initializes and configures the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database pool creation and migrations
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig::from_env()` in the binary
//! 2. **Database**: pool creation and migrations (optional)
//! 3. **Router Creation**: routes, tracing layer and shared state
//!
//! # Example
//!
//! ```rust,no_run
//! use catalogue_admin::backend::server::create_app;
//! use catalogue_admin::shared::AppConfig;
//!
//! # async fn example() {
//! let config = AppConfig::from_env().unwrap();
//! let app = create_app(&config).await;
//! # }
//! ```

/// Application state management
pub mod state;

/// Database configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{connect_database, load_database};
pub use init::create_app;
pub use state::AppState;
