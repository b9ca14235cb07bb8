#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeCommand {
    ActivateClock,
    ActivateEvents,
    SetDebugLayout(bool),
    SetLogControl(bool),
    ToggleRelativeTimestamps,
}
