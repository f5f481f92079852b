//! HTTP benchmarking engine.
//!
//! A URL list is split into contiguous slices, one per worker. Each worker
//! issues its slice sequentially and counts successes, failures and latency
//! buckets; the per-worker records are folded by workload name and printed
//! as a single summary table.

pub mod bench;
pub mod error;
pub mod loader;
pub mod partition;
pub mod report;
pub mod request;
pub mod stats;
pub mod worker;

pub use bench::{default_thresholds, Benchmarker, BenchmarkerBuilder};
pub use error::{BenchError, BenchResult};
pub use loader::{load_requests, parse_requests};
pub use partition::{partition, slice_bounds};
pub use report::Report;
pub use request::RequestDescriptor;
pub use stats::{Aggregator, Kpi};
