use crate::object::bridge_error::LaunchBridgeError;

/// A native error object that was retained when it left the completion
/// handler's scope. Implementations release it exactly once, on drop.
pub trait NativeErrorObject {
    fn domain(&self) -> String;
    fn code(&self) -> i64;
    fn description(&self) -> String;
}

impl<E: NativeErrorObject> From<&E> for LaunchBridgeError {
    fn from(error: &E) -> Self {
        LaunchBridgeError::NativeInvocationFailed {
            domain: error.domain(),
            code: error.code(),
            description: error.description(),
        }
    }
}
