//! # Marble Exchange Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs       # Owner → marble → offer → settlement scenarios
//!     └── properties.rs  # Argument validation across every operation
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p marble-tests
//! cargo test -p marble-tests integration::flows::
//! ```

pub mod integration;
