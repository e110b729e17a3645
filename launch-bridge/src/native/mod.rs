use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::api::completion::CompletionSlot;
use crate::api::option_translator::OptionSink;
use crate::enums::LSRoles;
use crate::object::app_reference::ApplicationReference;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::launch_options::LaunchOptions;
use crate::object::launch_result::LaunchResult;
use crate::object::native_error::NativeErrorObject;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(not(target_os = "macos"))]
pub mod unsupported;

#[cfg(test)]
pub mod fake;

#[cfg(target_os = "macos")]
pub use macos::MacLaunchServices as SystemLaunchServices;

#[cfg(not(target_os = "macos"))]
pub use unsupported::UnsupportedLaunchServices as SystemLaunchServices;

/// Something Launch Services can open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenItem {
    File(PathBuf),
    Url(String),
}

/// Items plus the (optional) application to open them with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub items: Vec<OpenItem>,
    pub application: Option<ApplicationReference>,
}

/// Everything the bridge needs from the platform. The macOS implementation
/// talks to Launch Services; tests substitute a fake.
pub trait LaunchServices {
    /// Call-scoped option dictionary
    type OptionMap: OptionSink;

    /// Native error handed out of the completion handler, retained
    type ErrorObject: NativeErrorObject + Send + 'static;

    fn new_option_map(&self) -> Result<Self::OptionMap, LaunchBridgeError>;

    /// LSCopyApplicationURLsForBundleIdentifier
    fn application_paths_for_bundle_id(
        &self,
        bundle_id: &str,
    ) -> Result<Vec<PathBuf>, LaunchBridgeError>;

    /// -[NSWorkspace fullPathForApplication:]
    fn full_path_for_application(&self, name: &str) -> Result<Option<PathBuf>, LaunchBridgeError>;

    fn default_application_for_file(
        &self,
        path: &Path,
        roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError>;

    fn default_application_for_url(
        &self,
        url: &str,
        roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError>;

    fn default_application_for_content_type(
        &self,
        content_type: &str,
        roles: LSRoles,
    ) -> Result<Option<PathBuf>, LaunchBridgeError>;

    /// Whether the private completion based entry point resolved
    fn supports_async_open(&self) -> bool;

    /// Issue the asynchronous launch. The completion must be published
    /// through `slot`, from whatever thread the platform delivers it on.
    fn open_async(
        &self,
        request: &OpenRequest,
        options: Self::OptionMap,
        slot: Arc<CompletionSlot<Self::ErrorObject>>,
    ) -> Result<(), LaunchBridgeError>;

    /// Public synchronous launch, used when `supports_async_open` is false
    fn open_sync(
        &self,
        request: &OpenRequest,
        options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError>;

    /// Service the event source that delivers completions, for at most `slice`
    fn pump_events(&self, slice: Duration);
}
