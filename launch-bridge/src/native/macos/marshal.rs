use std::collections::HashMap;
use std::ffi::{CStr, CString};
use std::path::{Path, PathBuf};
use std::ptr::null_mut;

use crate::native::macos::objc::{Id, ObjcBool};
use crate::native::macos::symbols::NativeSymbols;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::bridge_error::LaunchBridgeError::InvalidArgument;

/// Rust values to Foundation objects and back. Everything created here is
/// autoreleased into the caller's pool.
impl NativeSymbols {
    pub fn string(&self, value: &str) -> Result<Id, LaunchBridgeError> {
        let c_value = CString::new(value)
            .map_err(|_| InvalidArgument(format!("{:?} contains a NUL byte", value)))?;

        let object = unsafe {
            self.runtime.send_c_str(
                self.classes.ns_string,
                self.selectors.string_with_utf8_string,
                c_value.as_ptr(),
            )
        };

        non_null(object, || format!("NSString for {:?}", value))
    }

    /// Read an NSString through -UTF8String, up to the terminator
    pub fn string_value(&self, object: Id) -> Option<String> {
        if object.is_null() {
            return None;
        }

        let bytes = unsafe { self.runtime.send_returning_c_str(object, self.selectors.utf8_string) };
        if bytes.is_null() {
            return None;
        }

        Some(unsafe { CStr::from_ptr(bytes) }.to_string_lossy().into_owned())
    }

    pub fn boolean(&self, value: bool) -> Id {
        unsafe {
            self.runtime.send_bool(
                self.classes.ns_number,
                self.selectors.number_with_bool,
                value as ObjcBool,
            )
        }
    }

    pub fn integer(&self, value: i64) -> Id {
        unsafe {
            self.runtime.send_i64(
                self.classes.ns_number,
                self.selectors.number_with_long_long,
                value,
            )
        }
    }

    /// NSMutableArray sized up front, then appended to in order
    pub fn array(&self, items: &[Id]) -> Result<Id, LaunchBridgeError> {
        let array = unsafe {
            self.runtime.send_usize(
                self.classes.ns_mutable_array,
                self.selectors.array_with_capacity,
                items.len(),
            )
        };
        let array = non_null(array, || "NSMutableArray".to_string())?;

        for item in items {
            unsafe { self.runtime.send_id(array, self.selectors.add_object, *item) };
        }

        Ok(array)
    }

    pub fn string_array(&self, values: &[String]) -> Result<Id, LaunchBridgeError> {
        let items = values
            .iter()
            .map(|v| self.string(v))
            .collect::<Result<Vec<Id>, _>>()?;

        self.array(&items)
    }

    pub fn dictionary(&self) -> Result<Id, LaunchBridgeError> {
        let dictionary = unsafe {
            self.runtime
                .send(self.classes.ns_mutable_dictionary, self.selectors.dictionary)
        };

        non_null(dictionary, || "NSMutableDictionary".to_string())
    }

    pub fn insert(&self, dictionary: Id, key: Id, value: Id) {
        unsafe {
            self.runtime
                .send_id_id(dictionary, self.selectors.set_object_for_key, value, key)
        };
    }

    pub fn string_dictionary(&self, values: &HashMap<String, String>) -> Result<Id, LaunchBridgeError> {
        let dictionary = self.dictionary()?;

        for (key, value) in values {
            self.insert(dictionary, self.string(key)?, self.string(value)?);
        }

        Ok(dictionary)
    }

    pub fn file_url(&self, path: &Path) -> Result<Id, LaunchBridgeError> {
        let path_string = self.string(&path.to_string_lossy())?;
        let url = unsafe {
            self.runtime
                .send_id(self.classes.ns_url, self.selectors.file_url_with_path, path_string)
        };

        non_null(url, || format!("file URL for {}", path.display()))
    }

    pub fn url(&self, value: &str) -> Result<Id, LaunchBridgeError> {
        let string = self.string(value)?;
        let url = unsafe {
            self.runtime
                .send_id(self.classes.ns_url, self.selectors.url_with_string, string)
        };

        non_null(url, || format!("URL {:?}", value))
    }

    /// -[NSURL path]
    pub fn url_path(&self, url: Id) -> Option<PathBuf> {
        if url.is_null() {
            return None;
        }

        let path = unsafe { self.runtime.send(url, self.selectors.path) };
        self.string_value(path).map(PathBuf::from)
    }

    pub fn array_items(&self, array: Id) -> Vec<Id> {
        if array.is_null() {
            return vec![];
        }

        let count = unsafe { self.runtime.send_returning_usize(array, self.selectors.count) };

        (0..count)
            .map(|i| unsafe {
                self.runtime
                    .send_usize(array, self.selectors.object_at_index, i)
            })
            .filter(|item| !item.is_null())
            .collect()
    }

    /// NULL for an empty list, which Launch Services reads as "just launch"
    pub fn optional_array(&self, items: &[Id]) -> Result<Id, LaunchBridgeError> {
        if items.is_empty() {
            Ok(null_mut())
        } else {
            self.array(items)
        }
    }
}

fn non_null<F: FnOnce() -> String>(object: Id, what: F) -> Result<Id, LaunchBridgeError> {
    if object.is_null() {
        Err(InvalidArgument(format!("could not create {}", what())))
    } else {
        Ok(object)
    }
}
