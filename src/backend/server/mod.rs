//! Server Module
//!
//! Everything needed to go from environment variables to a running router.
//!
//! - **`config`** - `ServerConfig` loading and validation
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - store construction and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - Configuration loading (env, builder)
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - Store wiring and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use kanban_users::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await?;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig, ServerConfigBuilder, TokenBackend, TokenMode, UserBackend};
pub use init::{build_state, create_app, InitError};
pub use state::AppState;
