use crate::object::bridge_error::LaunchBridgeError::{
    ApplicationNotFound, InvalidArgument, NativeInvocationFailed, NoFilesSpecified,
    PathResolutionFailed, SymbolUnavailable, Timeout, Unsupported, WorkerUnavailable,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LaunchBridgeError {
    /// Malformed or non-existent path
    PathResolutionFailed { path: String, reason: String },
    /// Bad bundle identifier, unknown display name or no default handler
    ApplicationNotFound(String),
    /// Launch Services reported failure through the completion handler
    NativeInvocationFailed {
        domain: String,
        code: i64,
        description: String,
    },
    /// Completion handler did not fire before the deadline
    Timeout(Duration),
    NoFilesSpecified,
    InvalidArgument(String),
    /// A mandatory library, function, class or option key did not resolve
    SymbolUnavailable(String),
    Unsupported(String),
    WorkerUnavailable(String),
}

impl LaunchBridgeError {
    pub fn path<P: AsRef<std::path::Path>, S: Into<String>>(path: P, reason: S) -> Self {
        PathResolutionFailed {
            path: path.as_ref().to_string_lossy().to_string(),
            reason: reason.into(),
        }
    }

    /// Errors raised before the asynchronous entry point is touched
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            PathResolutionFailed { .. } | ApplicationNotFound(_) | NoFilesSpecified | InvalidArgument(_)
        )
    }
}

impl Display for LaunchBridgeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathResolutionFailed { path, reason } => {
                write!(f, "unable to resolve path {}: {}", path, reason)
            }
            ApplicationNotFound(reference) => write!(f, "unable to find application {}", reference),
            NativeInvocationFailed {
                domain,
                code,
                description,
            } => write!(f, "{} ({} error {})", description, domain, code),
            Timeout(duration) => write!(
                f,
                "launch did not complete within {:?}",
                duration
            ),
            NoFilesSpecified => write!(f, "no files specified"),
            InvalidArgument(e) => write!(f, "{}", e),
            SymbolUnavailable(e) => write!(f, "unable to resolve {}", e),
            Unsupported(e) => write!(f, "{}", e),
            WorkerUnavailable(e) => write!(f, "launch worker unavailable: {}", e),
        }
    }
}

impl Error for LaunchBridgeError {}

#[cfg(test)]
mod tests {
    use super::LaunchBridgeError;
    use std::time::Duration;

    #[test]
    fn native_failure_message() {
        let err = LaunchBridgeError::NativeInvocationFailed {
            domain: "NSOSStatusErrorDomain".to_string(),
            code: -10814,
            description: "The application can't be found.".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "The application can't be found. (NSOSStatusErrorDomain error -10814)"
        );
        assert!(!err.is_resolution_error());
    }

    #[test]
    fn no_files_message() {
        assert_eq!(LaunchBridgeError::NoFilesSpecified.to_string(), "no files specified");
    }

    #[test]
    fn timeout_message() {
        assert_eq!(
            LaunchBridgeError::Timeout(Duration::from_secs(30)).to_string(),
            "launch did not complete within 30s"
        );
    }

    #[test]
    fn path_helper() {
        let err = LaunchBridgeError::path("/nope", "No such file or directory");
        assert!(err.is_resolution_error());
        assert_eq!(
            err.to_string(),
            "unable to resolve path /nope: No such file or directory"
        );
    }
}
