use std::ffi::c_void;
use std::path::{Path, PathBuf};
use std::ptr::{null, null_mut};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use block::{Block, ConcreteBlock};

use crate::api::completion::{Completion, CompletionSlot};
use crate::enums::{LSRoles, LaunchFlags};
use crate::native::macos::objc::{AutoreleasePool, Id, OwnedObject};
use crate::native::macos::option_map::NativeOptionMap;
use crate::native::macos::outcome::NativeError;
use crate::native::macos::symbols::{native_symbols, LaunchUrlSpec, NativeSymbols};
use crate::native::{LaunchServices, OpenItem, OpenRequest};
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::bridge_error::LaunchBridgeError::{NativeInvocationFailed, SymbolUnavailable};
use crate::object::launch_options::LaunchOptions;
use crate::object::launch_result::LaunchResult;

pub mod library;
pub mod marshal;
pub mod objc;
pub mod option_map;
pub mod outcome;
pub mod symbols;

/// kCFRunLoopRunFinished: the mode has no sources, so the call returned
/// without waiting
const RUN_LOOP_FINISHED: i32 = 1;

type CompletionBlock = Block<(Id, u8, Id), ()>;

/// Launch Services through dynamically loaded CoreServices and Foundation.
/// One instance per bridge call; its autorelease pool drains on drop.
pub struct MacLaunchServices {
    symbols: &'static NativeSymbols,
    _pool: AutoreleasePool,
}

impl MacLaunchServices {
    pub fn new() -> Result<MacLaunchServices, LaunchBridgeError> {
        let symbols = native_symbols()?;

        Ok(MacLaunchServices {
            symbols,
            _pool: AutoreleasePool::push(&symbols.runtime),
        })
    }

    /// +1 result of an LSCopy* call
    fn adopt(&self, object: Id) -> Option<OwnedObject> {
        unsafe { OwnedObject::adopt(&self.symbols.runtime, object) }
    }

    fn copied_url_path(&self, url: Id) -> Option<PathBuf> {
        self.adopt(url)
            .and_then(|owned| self.symbols.url_path(owned.as_ptr()))
    }

    fn item_urls(&self, items: &[OpenItem]) -> Result<Id, LaunchBridgeError> {
        let urls = items
            .iter()
            .map(|item| match item {
                OpenItem::File(path) => self.symbols.file_url(path),
                OpenItem::Url(url) => self.symbols.url(url),
            })
            .collect::<Result<Vec<Id>, _>>()?;

        self.symbols.optional_array(&urls)
    }

    fn application_url(&self, request: &OpenRequest) -> Result<Id, LaunchBridgeError> {
        match &request.application {
            Some(application) => self.symbols.file_url(application.path()),
            None => Ok(null_mut()),
        }
    }
}

impl LaunchServices for MacLaunchServices {
    type OptionMap = NativeOptionMap;
    type ErrorObject = NativeError;

    fn new_option_map(&self) -> Result<NativeOptionMap, LaunchBridgeError> {
        NativeOptionMap::new(self.symbols)
    }

    fn application_paths_for_bundle_id(
        &self,
        bundle_id: &str,
    ) -> Result<Vec<PathBuf>, LaunchBridgeError> {
        let id = self.symbols.string(bundle_id)?;
        let urls = unsafe { (self.symbols.launch.copy_urls_for_bundle_id)(id, null_mut()) };

        Ok(match self.adopt(urls) {
            Some(urls) => self
                .symbols
                .array_items(urls.as_ptr())
                .into_iter()
                .filter_map(|url| self.symbols.url_path(url))
                .collect(),
            None => vec![],
        })
    }

    fn full_path_for_application(&self, name: &str) -> Result<Option<PathBuf>, LaunchBridgeError> {
        let workspace_class = match self.symbols.classes.ns_workspace {
            Some(class) => class,
            None => {
                log::debug!("NSWorkspace unavailable, cannot look up {}", name);
                return Ok(None);
            }
        };

        let selectors = &self.symbols.selectors;
        let name_string = self.symbols.string(name)?;

        let path = unsafe {
            let workspace = self
                .symbols
                .runtime
                .send(workspace_class, selectors.shared_workspace);
            if workspace.is_null() {
                return Ok(None);
            }

            self.symbols
                .runtime
                .send_id(workspace, selectors.full_path_for_application, name_string)
        };

        Ok(self.symbols.string_value(path).map(PathBuf::from))
    }

    fn default_application_for_file(
        &self,
        path: &Path,
        roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        let url = self.symbols.file_url(path)?;
        let app = unsafe { (self.symbols.launch.copy_default_for_url)(url, roles.bits(), null_mut()) };

        Ok(self.copied_url_path(app))
    }

    fn default_application_for_url(
        &self,
        url: &str,
        roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        let url = self.symbols.url(url)?;
        let app = unsafe { (self.symbols.launch.copy_default_for_url)(url, roles.bits(), null_mut()) };

        Ok(self.copied_url_path(app))
    }

    fn default_application_for_content_type(
        &self,
        content_type: &str,
        roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        let uti = self.symbols.string(content_type)?;
        let app = unsafe {
            (self.symbols.launch.copy_default_for_content_type)(uti, roles.bits(), null_mut())
        };

        Ok(self.copied_url_path(app))
    }

    fn supports_async_open(&self) -> bool {
        self.symbols.launch.open_urls_with_completion.is_some()
    }

    fn open_async(
        &self,
        request: &OpenRequest,
        options: NativeOptionMap,
        slot: Arc<CompletionSlot<NativeError>>,
    ) -> Result<(), LaunchBridgeError> {
        let open = self
            .symbols
            .launch
            .open_urls_with_completion
            .ok_or_else(|| SymbolUnavailable("_LSOpenURLsWithCompletionHandler".to_string()))?;

        let items = self.item_urls(&request.items)?;
        let app = self.application_url(request)?;
        let symbols = self.symbols;

        // Everything but the error is read before publishing; the error is
        // retained because it dies with the handler
        let completion = ConcreteBlock::new(move |asn: Id, already_running: u8, error: Id| {
            let completion = Completion {
                already_running: already_running != 0,
                pid: symbols.asn_to_pid(asn),
                error: NativeError::retain(symbols, error),
            };

            if !slot.fire(completion) {
                log::debug!("Launch completed after the caller stopped waiting");
            }
        })
        .copy();

        unsafe {
            open(
                items,
                app,
                options.as_ptr(),
                &*completion as *const CompletionBlock as *const c_void,
            )
        };

        Ok(())
    }

    fn open_sync(
        &self,
        request: &OpenRequest,
        options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError> {
        if options.has_process_options() {
            log::warn!("LSOpenFromURLSpec ignores arguments, environment, stdio, architecture, fresh and check-in options");
        }

        let spec = LaunchUrlSpec {
            app_url: self.application_url(request)?,
            item_urls: self.item_urls(&request.items)?,
            pass_thru_params: null(),
            launch_flags: LaunchFlags::from(options).bits(),
            async_ref_con: null_mut(),
        };

        let status = unsafe { (self.symbols.launch.open_from_url_spec)(&spec, null_mut()) };

        if status != 0 {
            return Err(NativeInvocationFailed {
                domain: "OSStatus".to_string(),
                code: status as i64,
                description: format!("LSOpenFromURLSpec failed with status {}", status),
            });
        }

        Ok(LaunchResult::new(None, false))
    }

    fn pump_events(&self, slice: Duration) {
        let run_loop = &self.symbols.run_loop;
        let result = unsafe { (run_loop.run_in_mode)(run_loop.default_mode, slice.as_secs_f64(), 1) };

        if result == RUN_LOOP_FINISHED {
            thread::sleep(slice);
        }
    }
}
