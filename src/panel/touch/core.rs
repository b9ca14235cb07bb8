/// Turns a stream of contact states into presses. Only the transition from
/// released to touching counts; holding a finger down never repeats.
#[derive(Clone, Copy, Debug, Default)]
pub struct PressEdge {
    touching: bool,
}

impl PressEdge {
    pub const fn new() -> Self {
        Self { touching: false }
    }

    pub fn feed(&mut self, down: bool) -> bool {
        let pressed = down && !self.touching;
        self.touching = down;
        pressed
    }

    pub fn is_touching(&self) -> bool {
        self.touching
    }
}
