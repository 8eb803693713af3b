//! Backend Error Module
//!
//! Two layers of errors live here:
//!
//! - **`AccountError`** - the flat failure taxonomy (`NOT_FOUND`, `CONFLICT`,
//!   `INVALID`, `EXPIRED`, `INTERNAL`) raised by stores and services, carrying
//!   an operation label, an optional client-facing message and a wrapped cause
//! - **`BackendError`** - what HTTP handlers return; wraps `AccountError`,
//!   validation failures and handler-level rejections
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse and rejection conversions
//! ```
//!
//! # HTTP Mapping
//!
//! | Code | Status |
//! |------|--------|
//! | `CONFLICT`, `NOT_FOUND` | 400 |
//! | `INVALID`, `EXPIRED` | 401 |
//! | `INTERNAL` | 500 |

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{AccountError, AccountResult, BackendError, ErrorCode};
