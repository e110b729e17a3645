use std::fmt;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TryRecvError};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use libc::pid_t;

use crate::config::BridgeConfig;
use crate::object::bridge_error::LaunchBridgeError;

/// What the completion handler saw. Everything except `error` was read out of
/// native objects before publishing; `error` stays a retained native object
/// until the caller has formatted it.
#[derive(Debug)]
pub struct Completion<E> {
    pub already_running: bool,
    pub pid: Option<pid_t>,
    pub error: Option<E>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    /// Request issued, completion not yet observed
    Pending,
    Completed,
    TimedOut,
}

impl InvocationState {
    fn complete(self) -> Self {
        match self {
            InvocationState::Pending => InvocationState::Completed,
            terminal => terminal,
        }
    }

    fn time_out(self) -> Self {
        match self {
            InvocationState::Pending => InvocationState::TimedOut,
            terminal => terminal,
        }
    }
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// One-shot publishing end of a one-item channel. The first `fire` wins;
/// later ones (and any after the waiter gave up) are dropped.
pub struct CompletionSlot<E> {
    sender: Mutex<Option<SyncSender<Completion<E>>>>,
}

impl<E> CompletionSlot<E> {
    pub fn channel() -> (CompletionSlot<E>, Receiver<Completion<E>>) {
        let (sender, receiver) = sync_channel(1);

        (
            CompletionSlot {
                sender: Mutex::new(Some(sender)),
            },
            receiver,
        )
    }

    /// Publish the completion. Returns false if one was already published
    /// or nobody is waiting anymore.
    pub fn fire(&self, completion: Completion<E>) -> bool {
        let sender = match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };

        match sender {
            Some(sender) => sender.try_send(completion).is_ok(),
            None => false,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.sender
            .lock()
            .map(|guard| guard.is_none())
            .unwrap_or(true)
    }
}

/// Block until the completion arrives or `config.timeout` elapses, calling
/// `pump` with the remaining slice whenever the channel is still empty.
///
/// Launch Services delivers the completion through the calling thread's
/// run loop, so without pumping it would never arrive.
pub fn wait_for_completion<E, P>(
    receiver: &Receiver<Completion<E>>,
    config: &BridgeConfig,
    mut pump: P,
) -> Result<Completion<E>, LaunchBridgeError>
where
    P: FnMut(Duration),
{
    let started = Instant::now();
    let deadline = started + config.timeout;
    let mut state = InvocationState::Pending;
    let mut pumps: usize = 0;

    loop {
        match receiver.try_recv() {
            Ok(completion) => {
                state = state.complete();
                log::debug!(
                    "Launch {} after {:?} ({} pumps)",
                    state,
                    started.elapsed(),
                    pumps
                );
                return Ok(completion);
            }
            Err(TryRecvError::Disconnected) => {
                return Err(LaunchBridgeError::NativeInvocationFailed {
                    domain: "LaunchBridge".to_string(),
                    code: -1,
                    description: "completion handler was released without being called"
                        .to_string(),
                });
            }
            Err(TryRecvError::Empty) => {}
        }

        let now = Instant::now();
        if now >= deadline {
            state = state.time_out();
            log::warn!("Launch {} after {:?} ({} pumps)", state, config.timeout, pumps);
            return Err(LaunchBridgeError::Timeout(config.timeout));
        }

        pump(config.pump_slice.min(deadline - now));
        pumps += 1;
    }
}
