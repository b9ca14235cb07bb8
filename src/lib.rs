pub mod drivers;
pub mod panel;
pub mod platform;
