//! Process-wide flag that is raised once SIGINT/SIGTERM is received. Long running searches
//! poll [`received_ctrl_c`] and give up without producing a result.

use std::sync::atomic::{AtomicBool, Ordering};

static RECEIVED_CTRL_C: AtomicBool = AtomicBool::new(false);

/// Installs the signal handler. May only be called once per process.
pub fn initialize() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        log::warn!("Received termination signal");
        RECEIVED_CTRL_C.store(true, Ordering::Release);
    })
}

pub fn received_ctrl_c() -> bool {
    RECEIVED_CTRL_C.load(Ordering::Acquire)
}
