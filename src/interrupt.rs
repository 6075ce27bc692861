/*!
 * Ctrl-C handling
 *
 * A SIGINT outside the output write ends the process at once with exit
 * code 1; nothing has been written yet at that point. While the output is
 * being written the signal is only recorded, and the writer drops its
 * temporary file instead of moving it into place.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{CodeDigestError, Result};

/// Shared interrupt state between the signal handler and the run
#[derive(Debug, Default)]
pub struct Interrupt {
    interrupted: AtomicBool,
    deferred: AtomicBool,
}

impl Interrupt {
    /// Install the process-wide Ctrl-C handler
    pub fn install() -> Result<Arc<Self>> {
        let interrupt = Arc::new(Self::default());
        let handler = Arc::clone(&interrupt);

        ctrlc::set_handler(move || {
            if handler.trigger() {
                eprintln!("\n❌ Analysis interrupted by user");
                std::process::exit(1);
            }
        })
        .map_err(|e| crate::error!(Config, "Failed to set Ctrl-C handler: {}", e))?;

        Ok(interrupt)
    }

    /// Record an interrupt; true when the process should exit right away
    pub fn trigger(&self) -> bool {
        self.interrupted.store(true, Ordering::SeqCst);
        !self.deferred.load(Ordering::SeqCst)
    }

    /// Hold interrupts back until the returned guard is dropped
    ///
    /// Fails if an interrupt already arrived, so no write is started.
    pub fn defer(&self) -> Result<DeferGuard<'_>> {
        self.deferred.store(true, Ordering::SeqCst);
        let guard = DeferGuard { interrupt: self };
        self.check()?;
        Ok(guard)
    }

    /// `Interrupted` if a signal was received
    pub fn check(&self) -> Result<()> {
        if self.interrupted.load(Ordering::SeqCst) {
            Err(CodeDigestError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Re-enables immediate exit on drop
pub struct DeferGuard<'a> {
    interrupt: &'a Interrupt,
}

impl Drop for DeferGuard<'_> {
    fn drop(&mut self) {
        self.interrupt.deferred.store(false, Ordering::SeqCst);
    }
}
