use std::ffi::c_void;

use libloading::Library;

use crate::native::macos::objc::Id;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::bridge_error::LaunchBridgeError::SymbolUnavailable;

pub const LAUNCH_SERVICES: &str = "/System/Library/Frameworks/CoreServices.framework/Frameworks/LaunchServices.framework/LaunchServices";
pub const OBJC_RUNTIME: &str = "/usr/lib/libobjc.A.dylib";
pub const LIB_SYSTEM: &str = "/usr/lib/libSystem.B.dylib";
pub const CORE_FOUNDATION: &str =
    "/System/Library/Frameworks/CoreFoundation.framework/CoreFoundation";
pub const FOUNDATION: &str = "/System/Library/Frameworks/Foundation.framework/Foundation";
pub const APP_KIT: &str = "/System/Library/Frameworks/AppKit.framework/AppKit";
pub const APPLICATION_SERVICES: &str =
    "/System/Library/Frameworks/ApplicationServices.framework/ApplicationServices";

pub fn open(path: &str) -> Result<Library, LaunchBridgeError> {
    let library = unsafe { Library::new(path) }
        .map_err(|e| SymbolUnavailable(format!("{}: {}", path, e)))?;

    log::debug!("Loaded {}", path);
    Ok(library)
}

pub fn open_optional(path: &str) -> Option<Library> {
    match open(path) {
        Ok(library) => Some(library),
        Err(e) => {
            log::debug!("Optional library unavailable: {}", e);
            None
        }
    }
}

/// Resolve `name` as a function pointer of type `T`. The pointer stays valid
/// only while `library` is loaded.
pub fn function<T: Copy>(library: &Library, name: &str) -> Result<T, LaunchBridgeError> {
    optional_function(library, name).ok_or_else(|| {
        log::error!("Missing required symbol {}", name);
        SymbolUnavailable(name.to_string())
    })
}

pub fn optional_function<T: Copy>(library: &Library, name: &str) -> Option<T> {
    match unsafe { library.get::<T>(name.as_bytes()) } {
        Ok(symbol) => Some(*symbol),
        Err(e) => {
            log::debug!("Symbol {} not found: {}", name, e);
            None
        }
    }
}

/// Read an exported object constant (e.g. a `CFStringRef` key). The symbol
/// is the address of the global, so it is dereferenced once.
pub fn constant(library: &Library, name: &str) -> Option<Id> {
    let address: *const Id = optional_function::<*const c_void>(library, name)? as *const Id;

    if address.is_null() {
        return None;
    }

    let value = unsafe { *address };
    (!value.is_null()).then_some(value)
}
