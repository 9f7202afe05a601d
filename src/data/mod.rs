//! Data layer: core types, loading, and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + validate file → LaunchDataset   (LoadError)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ LaunchDataset  │  Vec<LaunchRecord>, sites, payload bounds
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  site + payload range → pie summary / scatter rows   (QueryError)
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod error;
pub mod loader;
pub mod model;
