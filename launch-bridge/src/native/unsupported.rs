use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::completion::CompletionSlot;
use crate::api::option_translator::OptionSink;
use crate::enums::{LSRoles, OptionKey};
use crate::native::{LaunchServices, OpenRequest};
use crate::object::architecture::Architecture;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::launch_options::LaunchOptions;
use crate::object::launch_result::LaunchResult;
use crate::object::native_error::NativeErrorObject;
use std::collections::HashMap;

/// Stand-in on hosts without Launch Services. It can never be constructed,
/// so every public operation fails with `Unsupported` before resolving.
pub enum UnsupportedLaunchServices {}

pub enum Never {}

impl UnsupportedLaunchServices {
    pub fn new() -> Result<Self, LaunchBridgeError> {
        Err(LaunchBridgeError::Unsupported(format!(
            "Launch Services is not available on {}",
            std::env::consts::OS
        )))
    }
}

impl NativeErrorObject for Never {
    fn domain(&self) -> String {
        match *self {}
    }

    fn code(&self) -> i64 {
        match *self {}
    }

    fn description(&self) -> String {
        match *self {}
    }
}

impl OptionSink for Never {
    fn supports(&self, _key: OptionKey) -> bool {
        match *self {}
    }

    fn set_flag(&mut self, _key: OptionKey, _value: bool) -> Result<(), LaunchBridgeError> {
        match *self {}
    }

    fn set_strings(&mut self, _key: OptionKey, _values: &[String]) -> Result<(), LaunchBridgeError> {
        match *self {}
    }

    fn set_string_map(
        &mut self,
        _key: OptionKey,
        _values: &HashMap<String, String>,
    ) -> Result<(), LaunchBridgeError> {
        match *self {}
    }

    fn set_path(&mut self, _key: OptionKey, _path: &Path) -> Result<(), LaunchBridgeError> {
        match *self {}
    }

    fn set_architecture(
        &mut self,
        _key: OptionKey,
        _arch: Architecture,
    ) -> Result<(), LaunchBridgeError> {
        match *self {}
    }
}

impl LaunchServices for UnsupportedLaunchServices {
    type OptionMap = Never;
    type ErrorObject = Never;

    fn new_option_map(&self) -> Result<Never, LaunchBridgeError> {
        match *self {}
    }

    fn application_paths_for_bundle_id(&self, _: &str) -> Result<Vec<PathBuf>, LaunchBridgeError> {
        match *self {}
    }

    fn full_path_for_application(&self, _: &str) -> Result<Option<PathBuf>, LaunchBridgeError> {
        match *self {}
    }

    fn default_application_for_file(
        &self,
        _: &Path,
        _: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        match *self {}
    }

    fn default_application_for_url(
        &self,
        _: &str,
        _: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        match *self {}
    }

    fn default_application_for_content_type(
        &self,
        _: &str,
        _: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError> {
        match *self {}
    }

    fn supports_async_open(&self) -> bool {
        match *self {}
    }

    fn open_async(
        &self,
        _: &OpenRequest,
        _: Never,
        _: Arc<CompletionSlot<Never>>,
    ) -> Result<(), LaunchBridgeError> {
        match *self {}
    }

    fn open_sync(&self, _: &OpenRequest, _: &LaunchOptions) -> Result<LaunchResult, LaunchBridgeError> {
        match *self {}
    }

    fn pump_events(&self, _: Duration) {
        match *self {}
    }
}
