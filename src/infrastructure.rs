// Infrastructure layer modules
pub mod config;
pub mod dry_run_publisher;
pub mod logging;
pub mod sqs_publisher;

// Re-exports
pub use config::{ConfigError, HandlerConfig};
pub use dry_run_publisher::DryRunPublisher;
pub use logging::{init_cli_logging, init_logging};
pub use sqs_publisher::{AwsSqsPublisher, PublishError, QueuePublisher, SendReceipt};
