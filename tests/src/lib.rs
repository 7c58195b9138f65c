//! # LoanSphere Test Suite
//!
//! Unified test crate for behaviour that spans the identity store and the
//! domain store.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # Core assembled over in-memory storage
//!     ├── properties.rs   # Store-wide guarantees
//!     └── flows.rs        # Role-by-role user journeys
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ls-tests
//! cargo test -p ls-tests integration::properties::
//! ```

pub mod integration;
