pub mod metrics;
pub mod middleware;
pub mod tracing;

pub use self::metrics::{Metrics, MetricsError};
pub use self::middleware::observability_middleware;
pub use self::tracing::{init_observability, shutdown_observability, ObservabilityError};
