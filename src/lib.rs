//! Client for pushing widget updates to Geckoboard push widgets.
//!
//! A [`WidgetPusher`] is bound to one widget key and owns its [`PushConfig`].
//! Each widget method shapes the caller's data into the JSON the widget type
//! expects and performs a single POST to
//! `https://push.geckoboard.com/{version}/send/{widget_key}`.
//!
//! ```no_run
//! use geckoboard_push::{PushConfig, WidgetPusher};
//!
//! # async fn run() -> Result<(), geckoboard_push::PushError> {
//! let config = PushConfig::new("my-api-key");
//! let pusher = WidgetPusher::new(config, "12345-abcde");
//! pusher.number_and_secondary_value(120, 100).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::push_transport::PushTransport;
pub use application::widget_pusher::WidgetPusher;
pub use domain::widget::{
    FunnelOptions, FunnelStage, GeckometerBound, LineSettings, Metric, PieSlice, RagEntry,
    TextEntry, TextKind, WidgetData,
};
pub use error::PushError;
pub use infrastructure::config::{load_push_config, PushConfig};
pub use infrastructure::http_transport::HttpTransport;
