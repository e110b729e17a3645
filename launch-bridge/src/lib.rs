#![allow(non_upper_case_globals)]
#![allow(non_snake_case)]

//! Ask Launch Services to start applications, open documents with a chosen
//! application, or open URLs.
//!
//! Nothing here links against CoreServices, Foundation or AppKit. The
//! libraries are loaded at run time, symbols are resolved once per process
//! and driven through `objc_msgSend`. The private completion based launch
//! entry point is awaited by pumping the calling thread's run loop under a
//! deadline.

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate bitflags;

pub mod api;
pub mod config;
pub mod enums;
pub mod native;
pub mod object;
pub mod symbol_cache;
pub mod worker;

pub use api::launch::{
    default_reference_for_file, default_text_editor_reference, launch_app, launch_by_bundle_id,
    launch_reference, open_documents, open_url, reference_from_bundle_id, reference_from_display_name,
    LaunchBridge,
};
pub use api::resolver::url_scheme;
pub use config::BridgeConfig;
pub use object::app_reference::{ApplicationReference, BundleInfo, ResolvedBy};
pub use object::architecture::{arch, Architecture};
pub use object::bridge_error::LaunchBridgeError;
pub use object::launch_options::{LaunchOptions, LaunchOptionsBuilder};
pub use object::launch_result::LaunchResult;
