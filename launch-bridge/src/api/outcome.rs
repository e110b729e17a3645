use crate::api::completion::Completion;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::launch_result::LaunchResult;
use crate::object::native_error::NativeErrorObject;

/// Exactly one of result or error. A retained native error is read into the
/// structured error and then released here.
pub fn translate_completion<E: NativeErrorObject>(
    completion: Completion<E>,
) -> Result<LaunchResult, LaunchBridgeError> {
    let Completion {
        already_running,
        pid,
        error,
    } = completion;

    match error {
        Some(native) => {
            let err = LaunchBridgeError::from(&native);
            log::debug!("Launch failed: {}", err);
            drop(native);
            Err(err)
        }
        None => {
            let result = LaunchResult::new(pid, already_running);
            log::debug!("Launch succeeded: {}", result);
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::translate_completion;
    use crate::api::completion::Completion;
    use crate::native::fake::FakeError;
    use crate::object::bridge_error::LaunchBridgeError;
    use crate::object::launch_result::LaunchResult;

    #[test]
    fn success_without_pid() {
        let completion: Completion<FakeError> = Completion {
            already_running: true,
            pid: None,
            error: None,
        };

        assert_eq!(
            translate_completion(completion),
            Ok(LaunchResult {
                pid: None,
                already_running: true
            })
        );
    }

    #[test]
    fn error_wins_and_is_released_once() {
        let error = FakeError::new("NSOSStatusErrorDomain", -10810, "Launch failed.");
        let releases = error.releases();

        let completion = Completion {
            already_running: false,
            pid: Some(123),
            error: Some(error),
        };

        assert_eq!(
            translate_completion(completion),
            Err(LaunchBridgeError::NativeInvocationFailed {
                domain: "NSOSStatusErrorDomain".to_string(),
                code: -10810,
                description: "Launch failed.".to_string(),
            })
        );
        assert_eq!(releases.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
