pub mod dispatcher;
pub mod metric;

pub use dispatcher::{DispatcherSettings, QueryDispatcher};
pub use metric::{Metric, QueryOutput};
