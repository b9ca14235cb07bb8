pub mod app_state;
pub mod config;
pub mod context;
pub mod control;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod storage;
pub mod touch;
pub mod types;

pub use context::PanelContext;
pub use error::{PanelError, Result};
pub use runtime::run;
