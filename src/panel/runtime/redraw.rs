use crossbeam_channel::{bounded, Receiver, Sender};

/// Coalescing wake-up for the display loop: any number of nudges between
/// two frames collapse into one redraw.
#[derive(Clone, Debug)]
pub struct RedrawNotifier {
    tx: Sender<()>,
}

impl RedrawNotifier {
    pub fn nudge(&self) {
        // Full means a redraw is already pending; disconnected means the
        // display loop has exited.
        let _ = self.tx.try_send(());
    }
}

pub fn redraw_channel() -> (RedrawNotifier, Receiver<()>) {
    let (tx, rx) = bounded(1);
    (RedrawNotifier { tx }, rx)
}
