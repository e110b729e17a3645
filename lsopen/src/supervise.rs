use std::io;
use std::thread;
use std::time::Duration;

use launch_bridge::LaunchResult;
use libc::pid_t;

pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// kill(pid, 0): anything but ESRCH means the process is still around
pub fn is_running(pid: pid_t) -> bool {
    if pid <= 0 {
        return false;
    }

    if unsafe { libc::kill(pid, 0) } == 0 {
        return true;
    }

    io::Error::last_os_error().raw_os_error() != Some(libc::ESRCH)
}

pub fn wait_for_exit(pid: pid_t, poll: Duration) {
    log::debug!("Waiting for {} to exit", pid);

    while is_running(pid) {
        thread::sleep(poll);
    }

    log::debug!("{} exited", pid);
}

/// Wait for every launch that reported a pid
pub fn wait_for_all(results: &[LaunchResult], poll: Duration) {
    for result in results {
        match result.pid {
            Some(pid) => wait_for_exit(pid, poll),
            None => log::info!("No pid for {}, not waiting", result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_running, wait_for_all, wait_for_exit};
    use launch_bridge::LaunchResult;
    use std::process::Command;
    use std::time::{Duration, Instant};

    #[test]
    fn current_process_is_running() {
        assert!(is_running(std::process::id() as i32));
    }

    #[test]
    fn non_positive_pids_are_never_running() {
        assert!(!is_running(0));
        assert!(!is_running(-1));
    }

    #[test]
    fn reaped_child_is_gone() {
        let mut child = Command::new("true").spawn().unwrap();
        let pid = child.id() as i32;
        child.wait().unwrap();

        assert!(!is_running(pid));

        let started = Instant::now();
        wait_for_exit(pid, Duration::from_millis(10));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn skips_results_without_pid() {
        let started = Instant::now();
        wait_for_all(
            &[LaunchResult::new(None, true)],
            Duration::from_secs(60),
        );

        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
