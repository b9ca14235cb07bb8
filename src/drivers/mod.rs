pub mod evdev;
pub mod framebuffer;

pub use evdev::{EvdevDecoder, EvdevTouch};
pub use framebuffer::{Framebuffer, FramebufferGeometry};
