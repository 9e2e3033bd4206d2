//! dotenvify - turn key/value data into shell-exportable .env files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── convert       # Local file mode
//! │   ├── fetch         # Azure DevOps variable-group mode
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── env           # Parsing and formatting of variable files
//!     ├── writer        # Preserve-merge, backups, destination write
//!     ├── settings      # Environment-derived defaults
//!     └── azure/        # Remote variable fetcher
//!         ├── auth      # CredentialHelper trait + Azure CLI impl
//!         └── url       # Project URL parsing
//! ```
//!
//! Two producers feed one consumer: the format converter (`core::env`)
//! and the remote fetcher (`core::azure`) both yield an ordered
//! name/value collection, which `core::writer` merges with preserved
//! values and writes out under the configured output policy.

pub mod cli;
pub mod core;
pub mod error;
