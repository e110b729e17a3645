use std::path::PathBuf;
use std::sync::Arc;

use crate::api::completion::{wait_for_completion, CompletionSlot};
use crate::api::option_translator::translate_options;
use crate::api::outcome::translate_completion;
use crate::api::resolver::{existing_path, url_scheme, Resolver};
use crate::config::BridgeConfig;
use crate::native::{LaunchServices, OpenItem, OpenRequest, SystemLaunchServices};
use crate::object::app_reference::ApplicationReference;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::bridge_error::LaunchBridgeError::{InvalidArgument, NoFilesSpecified};
use crate::object::launch_options::LaunchOptions;
use crate::object::launch_result::LaunchResult;
use crate::worker::run_on_worker;

/// The launch operations, over any `LaunchServices`. Resolution always
/// finishes before anything asynchronous is issued.
pub struct LaunchBridge<S: LaunchServices> {
    services: S,
    config: BridgeConfig,
}

impl<S: LaunchServices> LaunchBridge<S> {
    pub fn new(services: S) -> Self {
        Self::with_config(services, BridgeConfig::default())
    }

    pub fn with_config(services: S, config: BridgeConfig) -> Self {
        LaunchBridge { services, config }
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn resolver(&self) -> Resolver<'_, S> {
        Resolver::new(&self.services)
    }

    /// Start the bundle at `app_path`, optionally handing it `documents`
    pub fn launch_app(
        &self,
        app_path: &str,
        documents: &[PathBuf],
        options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError> {
        let application = self.resolver().from_path(app_path)?;
        self.launch_reference(&application, documents, options)
    }

    pub fn launch_by_bundle_id(
        &self,
        bundle_id: &str,
        documents: &[PathBuf],
        options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError> {
        let application = self.resolver().from_bundle_id(bundle_id)?;
        self.launch_reference(&application, documents, options)
    }

    /// Launch an already resolved application
    pub fn launch_reference(
        &self,
        application: &ApplicationReference,
        documents: &[PathBuf],
        options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError> {
        let request = OpenRequest {
            items: file_items(documents)?,
            application: Some(application.clone()),
        };

        self.invoke(&request, options)
    }

    /// Open `files` with `app_path`, or with the default handler of the
    /// first file
    pub fn open_documents(
        &self,
        files: &[PathBuf],
        app_path: Option<&str>,
        options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError> {
        if files.is_empty() {
            return Err(NoFilesSpecified);
        }

        let items = file_items(files)?;
        let application = match (app_path, items.first()) {
            (Some(path), _) => self.resolver().from_path(path)?,
            (None, Some(OpenItem::File(first))) => self.resolver().default_for_file(first)?,
            (None, _) => return Err(NoFilesSpecified),
        };

        let request = OpenRequest {
            items,
            application: Some(application),
        };

        self.invoke(&request, options)
    }

    /// Open `url` with `app_path`, or with the default handler for its scheme
    pub fn open_url(
        &self,
        url: &str,
        app_path: Option<&str>,
        options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError> {
        if url_scheme(url).is_none() {
            return Err(InvalidArgument(format!("{} is not a URL", url)));
        }

        let application = match app_path {
            Some(path) => self.resolver().from_path(path)?,
            None => self.resolver().default_for_url(url)?,
        };

        let request = OpenRequest {
            items: vec![OpenItem::Url(url.to_string())],
            application: Some(application),
        };

        self.invoke(&request, options)
    }

    fn invoke(
        &self,
        request: &OpenRequest,
        options: &LaunchOptions,
    ) -> Result<LaunchResult, LaunchBridgeError> {
        if !self.services.supports_async_open() {
            log::warn!("Asynchronous open unavailable, using the synchronous launch API");
            return self.services.open_sync(request, options);
        }

        let mut native_options = self.services.new_option_map()?;
        translate_options(options, &mut native_options)?;

        let (slot, receiver) = CompletionSlot::channel();
        log::info!(
            "Opening {} item(s) with {:?}",
            request.items.len(),
            request.application.as_ref().map(|a| a.path())
        );

        self.services
            .open_async(request, native_options, Arc::new(slot))?;

        let completion = wait_for_completion(&receiver, &self.config, |slice| {
            self.services.pump_events(slice)
        })?;

        translate_completion(completion)
    }
}

fn file_items(files: &[PathBuf]) -> Result<Vec<OpenItem>, LaunchBridgeError> {
    files
        .iter()
        .map(|f| existing_path(&f.to_string_lossy()).map(OpenItem::File))
        .collect()
}

/// Run `op` against the system services on the native worker thread
fn with_system_bridge<R, F>(op: F) -> Result<R, LaunchBridgeError>
where
    F: FnOnce(&LaunchBridge<SystemLaunchServices>) -> Result<R, LaunchBridgeError> + Send + 'static,
    R: Send + 'static,
{
    run_on_worker(move || {
        let services = SystemLaunchServices::new()?;
        op(&LaunchBridge::new(services))
    })?
}

pub fn launch_app(
    app_path: &str,
    documents: &[PathBuf],
    options: &LaunchOptions,
) -> Result<LaunchResult, LaunchBridgeError> {
    let (app_path, documents, options) = (app_path.to_string(), documents.to_vec(), options.clone());
    with_system_bridge(move |bridge| bridge.launch_app(&app_path, &documents, &options))
}

pub fn launch_by_bundle_id(
    bundle_id: &str,
    documents: &[PathBuf],
    options: &LaunchOptions,
) -> Result<LaunchResult, LaunchBridgeError> {
    let (bundle_id, documents, options) =
        (bundle_id.to_string(), documents.to_vec(), options.clone());
    with_system_bridge(move |bridge| bridge.launch_by_bundle_id(&bundle_id, &documents, &options))
}

pub fn launch_reference(
    application: &ApplicationReference,
    documents: &[PathBuf],
    options: &LaunchOptions,
) -> Result<LaunchResult, LaunchBridgeError> {
    let (application, documents, options) =
        (application.clone(), documents.to_vec(), options.clone());
    with_system_bridge(move |bridge| bridge.launch_reference(&application, &documents, &options))
}

pub fn open_documents(
    files: &[PathBuf],
    app_path: Option<&str>,
    options: &LaunchOptions,
) -> Result<LaunchResult, LaunchBridgeError> {
    if files.is_empty() {
        return Err(NoFilesSpecified);
    }

    let (files, app_path, options) = (files.to_vec(), app_path.map(String::from), options.clone());
    with_system_bridge(move |bridge| bridge.open_documents(&files, app_path.as_deref(), &options))
}

pub fn open_url(
    url: &str,
    app_path: Option<&str>,
    options: &LaunchOptions,
) -> Result<LaunchResult, LaunchBridgeError> {
    let (url, app_path, options) = (url.to_string(), app_path.map(String::from), options.clone());
    with_system_bridge(move |bridge| bridge.open_url(&url, app_path.as_deref(), &options))
}

pub fn reference_from_bundle_id(bundle_id: &str) -> Result<ApplicationReference, LaunchBridgeError> {
    let bundle_id = bundle_id.to_string();
    with_system_bridge(move |bridge| bridge.resolver().from_bundle_id(&bundle_id))
}

pub fn reference_from_display_name(name: &str) -> Result<ApplicationReference, LaunchBridgeError> {
    let name = name.to_string();
    with_system_bridge(move |bridge| bridge.resolver().from_display_name(&name))
}

pub fn default_reference_for_file(path: &str) -> Result<ApplicationReference, LaunchBridgeError> {
    let path = path.to_string();
    with_system_bridge(move |bridge| bridge.resolver().default_for_file(&path))
}

pub fn default_text_editor_reference() -> Result<ApplicationReference, LaunchBridgeError> {
    with_system_bridge(|bridge| bridge.resolver().default_text_editor())
}
