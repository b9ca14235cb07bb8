mod core;
mod dispatch;
mod transform;
mod types;

pub use self::core::PressEdge;
pub use dispatch::{DispatchOutcome, TouchDispatcher};
pub use transform::TouchTransform;
pub use types::{RawTouch, TouchResolution};
