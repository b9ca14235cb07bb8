mod canvas;
mod probe;
mod scene;

pub use canvas::FrameCanvas;
pub use probe::{draw_probe, ProbeShape};
pub use scene::draw_scene;
