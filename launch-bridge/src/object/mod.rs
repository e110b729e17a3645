/// ApplicationReference, produced by api::resolver
pub mod app_reference;

/// CPU type / subtype table for the architecture option
pub mod architecture;

pub mod bridge_error;
pub mod launch_options;
pub mod launch_result;

/// Domain, code and description of a retained native error
pub mod native_error;
