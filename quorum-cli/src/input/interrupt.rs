//! Session-wide interrupt flag

use tokio::sync::watch;
use tracing::debug;

/// Fires an [`Interrupt`]
#[derive(Debug)]
pub struct InterruptTrigger(watch::Sender<bool>);

impl InterruptTrigger {
    pub fn fire(&self) {
        // No receivers left means nobody is waiting.
        let _ = self.0.send(true);
    }
}

/// Resolves once the session has been interrupted, and stays resolved
#[derive(Debug, Clone)]
pub struct Interrupt {
    fired: watch::Receiver<bool>,
}

impl Interrupt {
    /// Manually triggered interrupt
    pub fn channel() -> (InterruptTrigger, Self) {
        let (tx, rx) = watch::channel(false);
        (InterruptTrigger(tx), Self { fired: rx })
    }

    /// Interrupt fired by Ctrl+C (SIGINT) for the rest of the process
    ///
    /// Must be called inside a tokio runtime.
    pub fn ctrl_c() -> Self {
        let (trigger, interrupt) = Self::channel();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    debug!("interrupt received");
                    trigger.fire();
                }
                // Handler unavailable: the trigger drops and `wait` never resolves.
                Err(err) => debug!(error = %err, "could not listen for ctrl-c"),
            }
        });
        interrupt
    }

    pub fn is_set(&self) -> bool {
        *self.fired.borrow()
    }

    /// Wait until fired. Never resolves if the trigger is dropped unfired.
    pub async fn wait(&mut self) {
        if self.fired.wait_for(|fired| *fired).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
