/// Completion slot and the run loop pumping wait
pub mod completion;

/// The public operations
pub mod launch;

/// LaunchOptions -> native option dictionary
pub mod option_translator;

/// Completion -> LaunchResult / LaunchBridgeError
pub mod outcome;

/// Path, bundle id, display name and default handler resolution
pub mod resolver;
