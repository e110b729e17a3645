use crate::native::macos::objc::{Id, OwnedObject, Sel};
use crate::native::macos::symbols::NativeSymbols;
use crate::object::native_error::NativeErrorObject;

/// CFErrorRef retained out of the completion handler
pub struct NativeError {
    object: OwnedObject,
    symbols: &'static NativeSymbols,
}

impl NativeError {
    /// Retain the handler's error argument, if there is one
    pub fn retain(symbols: &'static NativeSymbols, error: Id) -> Option<NativeError> {
        let object = unsafe { OwnedObject::retain(&symbols.runtime, error) }?;
        Some(NativeError { object, symbols })
    }

    fn string(&self, sel: Sel) -> Option<String> {
        let value = unsafe { self.symbols.runtime.send(self.object.as_ptr(), sel) };
        self.symbols.string_value(value)
    }
}

impl NativeErrorObject for NativeError {
    fn domain(&self) -> String {
        self.string(self.symbols.selectors.domain)
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn code(&self) -> i64 {
        unsafe {
            self.symbols
                .runtime
                .send_returning_i64(self.object.as_ptr(), self.symbols.selectors.code)
        }
    }

    fn description(&self) -> String {
        self.string(self.symbols.selectors.localized_description)
            .unwrap_or_else(|| "no description".to_string())
    }
}
