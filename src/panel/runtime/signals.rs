use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::warn;

/// Set once SIGINT or SIGTERM arrives; loops poll it.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag {
    flag: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the OS handlers. Registration failures are logged, not
    /// fatal.
    pub fn install() -> Self {
        let shutdown = Self::new();
        for signal in [SIGINT, SIGTERM] {
            if let Err(err) = signal_hook::flag::register(signal, Arc::clone(&shutdown.flag)) {
                warn!("signals: failed to register {signal}: {err}");
            }
        }
        shutdown
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub fn request(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}
