use libc::pid_t;
use std::fmt;

/// Outcome of a launch that Launch Services accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaunchResult {
    /// Absent when the launch could not be mapped to a process,
    /// which is not an error (e.g. revealing in Finder)
    pub pid: Option<pid_t>,
    pub already_running: bool,
}

impl LaunchResult {
    /// Non-positive pids are dropped
    pub fn new(pid: Option<pid_t>, already_running: bool) -> Self {
        LaunchResult {
            pid: pid.filter(|p| *p > 0),
            already_running,
        }
    }
}

impl fmt::Display for LaunchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.already_running {
            "already running"
        } else {
            "launched"
        };

        match self.pid {
            Some(pid) => write!(f, "{} (pid {})", state, pid),
            None => write!(f, "{}", state),
        }
    }
}
