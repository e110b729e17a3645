use std::collections::HashMap;
use std::ffi::c_void;

use libc::pid_t;
use libloading::Library;

use crate::enums::OptionKey;
use crate::native::macos::library::{
    constant, function, open, open_optional, optional_function, APPLICATION_SERVICES, APP_KIT,
    CORE_FOUNDATION, FOUNDATION, LAUNCH_SERVICES, LIB_SYSTEM, OBJC_RUNTIME,
};
use crate::native::macos::objc::{Class, Id, ObjcRuntime, Sel};
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::bridge_error::LaunchBridgeError::SymbolUnavailable;
use crate::symbol_cache::SymbolCache;

pub type OSStatus = i32;
pub type Boolean = u8;

/// CFURLRef, CFArrayRef, CFStringRef... all toll-free bridged to `Id`
pub type CFTypeRef = Id;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSerialNumber {
    pub high_long_of_psn: u32,
    pub low_long_of_psn: u32,
}

/// LSLaunchURLSpec
#[repr(C)]
pub struct LaunchUrlSpec {
    pub app_url: CFTypeRef,
    pub item_urls: CFTypeRef,
    pub pass_thru_params: *const c_void,
    pub launch_flags: u32,
    pub async_ref_con: *mut c_void,
}

/// void _LSOpenURLsWithCompletionHandler(CFArrayRef, CFURLRef, CFDictionaryRef,
///     void (^)(LSASNRef, Boolean, CFErrorRef))
pub type OpenUrlsWithCompletionFn =
    unsafe extern "C" fn(CFTypeRef, CFTypeRef, CFTypeRef, *const c_void);
pub type OpenFromUrlSpecFn = unsafe extern "C" fn(*const LaunchUrlSpec, *mut CFTypeRef) -> OSStatus;
pub type CopyUrlsForBundleIdFn = unsafe extern "C" fn(CFTypeRef, *mut CFTypeRef) -> CFTypeRef;
pub type CopyDefaultForUrlFn = unsafe extern "C" fn(CFTypeRef, u32, *mut CFTypeRef) -> CFTypeRef;
pub type CopyDefaultForContentTypeFn =
    unsafe extern "C" fn(CFTypeRef, u32, *mut CFTypeRef) -> CFTypeRef;
pub type AsnExtractFn = unsafe extern "C" fn(CFTypeRef, *mut u32, *mut u32);
pub type GetProcessPidFn = unsafe extern "C" fn(*const ProcessSerialNumber, *mut pid_t) -> OSStatus;
pub type RunLoopRunInModeFn = unsafe extern "C" fn(CFTypeRef, f64, Boolean) -> i32;

pub struct LaunchFunctions {
    /// Private; absent means the synchronous fallback is used
    pub open_urls_with_completion: Option<OpenUrlsWithCompletionFn>,
    pub open_from_url_spec: OpenFromUrlSpecFn,
    pub copy_urls_for_bundle_id: CopyUrlsForBundleIdFn,
    pub copy_default_for_url: CopyDefaultForUrlFn,
    pub copy_default_for_content_type: CopyDefaultForContentTypeFn,
    pub asn_extract_high_and_low: Option<AsnExtractFn>,
    pub get_process_pid: Option<GetProcessPidFn>,
}

pub struct Selectors {
    pub string_with_utf8_string: Sel,
    pub utf8_string: Sel,
    pub number_with_bool: Sel,
    pub number_with_long_long: Sel,
    pub array_with_capacity: Sel,
    pub add_object: Sel,
    pub count: Sel,
    pub object_at_index: Sel,
    pub dictionary: Sel,
    pub set_object_for_key: Sel,
    pub file_url_with_path: Sel,
    pub url_with_string: Sel,
    pub path: Sel,
    pub domain: Sel,
    pub code: Sel,
    pub localized_description: Sel,
    pub shared_workspace: Sel,
    pub full_path_for_application: Sel,
}

pub struct Classes {
    pub ns_string: Class,
    pub ns_number: Class,
    pub ns_mutable_array: Class,
    pub ns_mutable_dictionary: Class,
    pub ns_url: Class,
    /// AppKit; missing in non-GUI sessions without it
    pub ns_workspace: Option<Class>,
}

pub struct RunLoop {
    pub run_in_mode: RunLoopRunInModeFn,
    pub default_mode: CFTypeRef,
}

/// Everything resolved from the loaded libraries. Written once, read-only
/// afterwards.
pub struct NativeSymbols {
    pub runtime: ObjcRuntime,
    pub selectors: Selectors,
    pub classes: Classes,
    pub launch: LaunchFunctions,
    pub run_loop: RunLoop,
    pub option_keys: HashMap<OptionKey, Id>,
    _libraries: Vec<Library>,
}

unsafe impl Send for NativeSymbols {}
unsafe impl Sync for NativeSymbols {}

static NATIVE_SYMBOLS: SymbolCache<NativeSymbols> = SymbolCache::new();

/// Load and resolve on first use; every later call gets the same table
/// (or the same error)
pub fn native_symbols() -> Result<&'static NativeSymbols, LaunchBridgeError> {
    NATIVE_SYMBOLS.get_or_load(NativeSymbols::load)
}

impl NativeSymbols {
    fn load() -> Result<NativeSymbols, LaunchBridgeError> {
        log::info!("Loading Launch Services");

        let launch_services = open(LAUNCH_SERVICES)?;
        let libobjc = open(OBJC_RUNTIME)?;
        let lib_system = open(LIB_SYSTEM)?;
        let core_foundation = open(CORE_FOUNDATION)?;
        let foundation = open(FOUNDATION)?;
        let app_kit = open_optional(APP_KIT);
        let application_services = open_optional(APPLICATION_SERVICES);

        let runtime = ObjcRuntime::load(&libobjc)?;
        let selectors = Self::selectors(&runtime)?;
        let classes = Classes {
            ns_string: runtime.required_class("NSString")?,
            ns_number: runtime.required_class("NSNumber")?,
            ns_mutable_array: runtime.required_class("NSMutableArray")?,
            ns_mutable_dictionary: runtime.required_class("NSMutableDictionary")?,
            ns_url: runtime.required_class("NSURL")?,
            ns_workspace: app_kit.as_ref().and_then(|_| runtime.class("NSWorkspace")),
        };

        let launch = LaunchFunctions {
            open_urls_with_completion: optional_function(
                &launch_services,
                "_LSOpenURLsWithCompletionHandler",
            ),
            open_from_url_spec: function(&launch_services, "LSOpenFromURLSpec")?,
            copy_urls_for_bundle_id: function(
                &launch_services,
                "LSCopyApplicationURLsForBundleIdentifier",
            )?,
            copy_default_for_url: function(&launch_services, "LSCopyDefaultApplicationURLForURL")?,
            copy_default_for_content_type: function(
                &launch_services,
                "LSCopyDefaultApplicationURLForContentType",
            )?,
            asn_extract_high_and_low: optional_function(
                &launch_services,
                "_LSASNExtractHighAndLowParts",
            ),
            get_process_pid: application_services
                .as_ref()
                .and_then(|lib| optional_function(lib, "GetProcessPID")),
        };

        if launch.open_urls_with_completion.is_none() {
            log::warn!("_LSOpenURLsWithCompletionHandler missing, launches will be synchronous");
        }

        let run_loop = RunLoop {
            run_in_mode: function(&core_foundation, "CFRunLoopRunInMode")?,
            default_mode: constant(&core_foundation, "kCFRunLoopDefaultMode")
                .ok_or_else(|| SymbolUnavailable("kCFRunLoopDefaultMode".to_string()))?,
        };

        let option_keys = Self::option_keys(&launch_services)?;

        let mut libraries = vec![launch_services, libobjc, lib_system, core_foundation, foundation];
        libraries.extend(app_kit);
        libraries.extend(application_services);

        Ok(NativeSymbols {
            runtime,
            selectors,
            classes,
            launch,
            run_loop,
            option_keys,
            _libraries: libraries,
        })
    }

    fn selectors(runtime: &ObjcRuntime) -> Result<Selectors, LaunchBridgeError> {
        Ok(Selectors {
            string_with_utf8_string: runtime.selector("stringWithUTF8String:")?,
            utf8_string: runtime.selector("UTF8String")?,
            number_with_bool: runtime.selector("numberWithBool:")?,
            number_with_long_long: runtime.selector("numberWithLongLong:")?,
            array_with_capacity: runtime.selector("arrayWithCapacity:")?,
            add_object: runtime.selector("addObject:")?,
            count: runtime.selector("count")?,
            object_at_index: runtime.selector("objectAtIndex:")?,
            dictionary: runtime.selector("dictionary")?,
            set_object_for_key: runtime.selector("setObject:forKey:")?,
            file_url_with_path: runtime.selector("fileURLWithPath:")?,
            url_with_string: runtime.selector("URLWithString:")?,
            path: runtime.selector("path")?,
            domain: runtime.selector("domain")?,
            code: runtime.selector("code")?,
            localized_description: runtime.selector("localizedDescription")?,
            shared_workspace: runtime.selector("sharedWorkspace")?,
            full_path_for_application: runtime.selector("fullPathForApplication:")?,
        })
    }

    /// Optional keys that don't resolve are left out; a missing mandatory
    /// key fails the whole load
    fn option_keys(launch_services: &Library) -> Result<HashMap<OptionKey, Id>, LaunchBridgeError> {
        let mut keys = HashMap::new();

        for key in OptionKey::ALL {
            match constant(launch_services, key.symbol()) {
                Some(value) => {
                    keys.insert(key, value);
                }
                None if key.is_mandatory() => {
                    log::error!("Missing mandatory option key {}", key);
                    return Err(SymbolUnavailable(key.symbol().to_string()));
                }
                None => log::debug!("Option key {} not exported, skipping", key),
            }
        }

        Ok(keys)
    }

    /// Split an LSASNRef and look up its process. None when either step is
    /// unavailable or fails.
    pub fn asn_to_pid(&self, asn: CFTypeRef) -> Option<pid_t> {
        if asn.is_null() {
            return None;
        }

        let extract = self.launch.asn_extract_high_and_low?;
        let get_pid = self.launch.get_process_pid?;

        let mut psn = ProcessSerialNumber::default();
        let mut pid: pid_t = 0;

        let status = unsafe {
            extract(asn, &mut psn.high_long_of_psn, &mut psn.low_long_of_psn);
            get_pid(&psn, &mut pid)
        };

        log::trace!("ASN {:?} -> pid {} (status {})", psn, pid, status);
        (status == 0 && pid > 0).then_some(pid)
    }
}
