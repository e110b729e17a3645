use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::api::completion::{Completion, CompletionSlot};
use crate::api::option_translator::OptionSink;
use crate::enums::{LSRoles, OptionKey};
use crate::native::{LaunchServices, OpenRequest};
use crate::object::architecture::Architecture;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::launch_options::LaunchOptions;
use crate::object::launch_result::LaunchResult;
use crate::object::native_error::NativeErrorObject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedValue {
    Flag(bool),
    Strings(Vec<String>),
    StringMap(HashMap<String, String>),
    Path(PathBuf),
    Architecture(Architecture),
}

/// Option dictionary that remembers what was written, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingMap {
    supported: Option<HashSet<OptionKey>>,
    entries: Vec<(OptionKey, RecordedValue)>,
}

impl RecordingMap {
    pub fn supporting(keys: HashSet<OptionKey>) -> Self {
        RecordingMap {
            supported: Some(keys),
            entries: vec![],
        }
    }

    pub fn keys(&self) -> Vec<OptionKey> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn get(&self, key: OptionKey) -> Option<&RecordedValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    fn record(&mut self, key: OptionKey, value: RecordedValue) -> Result<(), LaunchBridgeError> {
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, value));
        Ok(())
    }
}

impl OptionSink for RecordingMap {
    fn supports(&self, key: OptionKey) -> bool {
        self.supported
            .as_ref()
            .map(|keys| keys.contains(&key))
            .unwrap_or(true)
    }

    fn set_flag(&mut self, key: OptionKey, value: bool) -> Result<(), LaunchBridgeError> {
        self.record(key, RecordedValue::Flag(value))
    }

    fn set_strings(&mut self, key: OptionKey, values: &[String]) -> Result<(), LaunchBridgeError> {
        self.record(key, RecordedValue::Strings(values.to_vec()))
    }

    fn set_string_map(
        &mut self,
        key: OptionKey,
        values: &HashMap<String, String>,
    ) -> Result<(), LaunchBridgeError> {
        self.record(key, RecordedValue::StringMap(values.clone()))
    }

    fn set_path(&mut self, key: OptionKey, path: &Path) -> Result<(), LaunchBridgeError> {
        self.record(key, RecordedValue::Path(path.to_path_buf()))
    }

    fn set_architecture(
        &mut self,
        key: OptionKey,
        arch: Architecture,
    ) -> Result<(), LaunchBridgeError> {
        self.record(key, RecordedValue::Architecture(arch))
    }
}

/// Error object that counts its releases
#[derive(Debug)]
pub struct FakeError {
    domain: String,
    code: i64,
    description: String,
    releases: Arc<AtomicUsize>,
}

impl FakeError {
    pub fn new(domain: &str, code: i64, description: &str) -> Self {
        FakeError {
            domain: domain.to_string(),
            code,
            description: description.to_string(),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn releases(&self) -> Arc<AtomicUsize> {
        self.releases.clone()
    }
}

impl NativeErrorObject for FakeError {
    fn domain(&self) -> String {
        self.domain.clone()
    }

    fn code(&self) -> i64 {
        self.code
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl Drop for FakeError {
    fn drop(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// What the fake launch service reports
pub struct FakeOutcome {
    pub already_running: bool,
    pub pid: Option<i32>,
    pub error: Option<FakeError>,
}

impl FakeOutcome {
    pub fn launched(pid: i32) -> Self {
        FakeOutcome {
            already_running: false,
            pid: Some(pid),
            error: None,
        }
    }

    pub fn already_running(pid: Option<i32>) -> Self {
        FakeOutcome {
            already_running: true,
            pid,
            error: None,
        }
    }

    pub fn failed(error: FakeError) -> Self {
        FakeOutcome {
            already_running: false,
            pid: None,
            error: Some(error),
        }
    }

    fn into_completion(self) -> Completion<FakeError> {
        Completion {
            already_running: self.already_running,
            pid: self.pid,
            error: self.error,
        }
    }
}

/// When the fake completion handler fires
pub enum CompletionBehavior {
    /// On the n-th run loop pump (1-based)
    AfterPumps(usize),
    Never,
}

/// Launch Services stand-in with lookup tables and call counters
pub struct FakeServices {
    bundles: HashMap<String, Vec<PathBuf>>,
    display_names: HashMap<String, PathBuf>,
    file_handlers: HashMap<String, PathBuf>,
    url_handlers: HashMap<String, PathBuf>,
    content_type_handlers: HashMap<String, PathBuf>,
    supported_keys: Option<HashSet<OptionKey>>,
    async_available: bool,
    behavior: CompletionBehavior,
    outcome: RefCell<Option<FakeOutcome>>,
    pending: RefCell<Option<Arc<CompletionSlot<FakeError>>>>,
    async_calls: Cell<usize>,
    sync_calls: Cell<usize>,
    pumps: Cell<usize>,
    name_lookups: Cell<usize>,
    last_request: RefCell<Option<OpenRequest>>,
    last_options: RefCell<Option<RecordingMap>>,
}

impl Default for FakeServices {
    fn default() -> Self {
        FakeServices {
            bundles: HashMap::new(),
            display_names: HashMap::new(),
            file_handlers: HashMap::new(),
            url_handlers: HashMap::new(),
            content_type_handlers: HashMap::new(),
            supported_keys: None,
            async_available: true,
            behavior: CompletionBehavior::AfterPumps(1),
            outcome: RefCell::new(Some(FakeOutcome::launched(4242))),
            pending: RefCell::new(None),
            async_calls: Cell::new(0),
            sync_calls: Cell::new(0),
            pumps: Cell::new(0),
            name_lookups: Cell::new(0),
            last_request: RefCell::new(None),
            last_options: RefCell::new(None),
        }
    }
}

impl FakeServices {
    pub fn with_bundle(mut self, bundle_id: &str, paths: &[&str]) -> Self {
        self.bundles.insert(
            bundle_id.to_string(),
            paths.iter().map(PathBuf::from).collect(),
        );
        self
    }

    pub fn with_display_name(mut self, name: &str, path: &str) -> Self {
        self.display_names
            .insert(name.to_string(), PathBuf::from(path));
        self
    }

    pub fn with_file_handler(mut self, extension: &str, path: &str) -> Self {
        self.file_handlers
            .insert(extension.to_string(), PathBuf::from(path));
        self
    }

    pub fn with_url_handler(mut self, scheme: &str, path: &str) -> Self {
        self.url_handlers
            .insert(scheme.to_string(), PathBuf::from(path));
        self
    }

    pub fn with_content_type_handler(mut self, content_type: &str, path: &str) -> Self {
        self.content_type_handlers
            .insert(content_type.to_string(), PathBuf::from(path));
        self
    }

    pub fn with_supported_keys(mut self, keys: HashSet<OptionKey>) -> Self {
        self.supported_keys = Some(keys);
        self
    }

    pub fn without_async_open(mut self) -> Self {
        self.async_available = false;
        self
    }

    pub fn completing(mut self, behavior: CompletionBehavior, outcome: FakeOutcome) -> Self {
        self.behavior = behavior;
        self.outcome = RefCell::new(Some(outcome));
        self
    }

    pub fn never_completing(mut self) -> Self {
        self.behavior = CompletionBehavior::Never;
        self
    }

    pub fn async_calls(&self) -> usize {
        self.async_calls.get()
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.get()
    }

    pub fn pumps(&self) -> usize {
        self.pumps.get()
    }

    pub fn name_lookups(&self) -> usize {
        self.name_lookups.get()
    }

    pub fn last_request(&self) -> Option<OpenRequest> {
        self.last_request.borrow().clone()
    }

    pub fn last_options(&self) -> Option<RecordingMap> {
        self.last_options.borrow().clone()
    }

    fn fire_pending(&self) {
        let slot = self.pending.borrow_mut().take();
        let outcome = self.outcome.borrow_mut().take();

        if let (Some(slot), Some(outcome)) = (slot, outcome) {
            slot.fire(outcome.into_completion());
        }
    }
}

impl LaunchServices for FakeServices {
    type OptionMap = RecordingMap;
    type ErrorObject = FakeError;

    fn new_option_map(&self) -> Result<RecordingMap, LaunchBridgeError> {
        Ok(match &self.supported_keys {
            Some(keys) => RecordingMap::supporting(keys.clone()),
            None => RecordingMap::default(),
        })
    }

    fn application_paths_for_bundle_id(
        &self,
        bundle_id: &str,
    ) -> Result<Vec<PathBuf>, LaunchBridgeError> {
        Ok(self.bundles.get(bundle_id).cloned().unwrap_or_default())
    }

    fn full_path_for_application(&self, name: &str) -> Result<Option<PathBuf>, LaunchBridgeError> {
        self.name_lookups.set(self.name_lookups.get() + 1);
        Ok(self.display_names.get(name).cloned())
    }

    fn default_application_for_file(
        &self,
        path: &Path,
        _roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        Ok(path
            .extension()
            .and_then(|ext| self.file_handlers.get(&*ext.to_string_lossy()))
            .cloned())
    }

    fn default_application_for_url(
        &self,
        url: &str,
        _roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        Ok(url
            .split_once(':')
            .and_then(|(scheme, _)| self.url_handlers.get(scheme))
            .cloned())
    }

    fn default_application_for_content_type(
        &self,
        content_type: &str,
        _roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        Ok(self.content_type_handlers.get(content_type).cloned())
    }

    fn supports_async_open(&self) -> bool {
        self.async_available
    }

    fn open_async(
        &self,
        request: &OpenRequest,
        options: RecordingMap,
        slot: Arc<CompletionSlot<FakeError>>,
    ) -> Result<(), LaunchBridgeError> {
        self.async_calls.set(self.async_calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        *self.last_options.borrow_mut() = Some(options);
        *self.pending.borrow_mut() = Some(slot);
        Ok(())
    }

    fn open_sync(
        &self,
        request: &OpenRequest,
        _options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError> {
        self.sync_calls.set(self.sync_calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());
        Ok(LaunchResult::new(None, false))
    }

    fn pump_events(&self, slice: Duration) {
        let pumps = self.pumps.get() + 1;
        self.pumps.set(pumps);

        match self.behavior {
            CompletionBehavior::AfterPumps(n) if n == pumps => self.fire_pending(),
            _ => thread::sleep(slice),
        }
    }
}
