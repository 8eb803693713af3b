//! Route Configuration Module
//!
//! - **`router`** - Main router creation, tracing layer and fallback
//! - **`api_routes`** - The `/users` endpoints
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Account endpoints
//! ```

/// Main router creation
pub mod router;

/// Account endpoints
pub mod api_routes;

pub use router::create_router;
