pub mod channel_sink;
pub mod loader;
pub mod tracing_sink;
