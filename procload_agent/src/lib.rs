//! procload_agent: serves host CPU/memory utilization as response headers.

pub mod config;
pub mod directive;
pub mod handler;
pub mod state;
pub mod tls;
