use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::enums::LaunchFlags;

/// How to launch. Every field is optional: an unset field is left out of the
/// native option dictionary entirely, which Launch Services treats differently
/// from an explicit `false`.
///
/// Build with [`LaunchOptions::builder`]; the value is immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    activate: Option<bool>,
    hide: Option<bool>,
    new_instance: Option<bool>,
    fresh: Option<bool>,
    wait_for_check_in: Option<bool>,
    add_to_recents: Option<bool>,
    arguments: Option<Vec<String>>,
    environment: Option<HashMap<String, String>>,
    stdin_path: Option<PathBuf>,
    stdout_path: Option<PathBuf>,
    stderr_path: Option<PathBuf>,
    arch: Option<String>,
}

impl LaunchOptions {
    pub fn builder() -> LaunchOptionsBuilder {
        LaunchOptionsBuilder::default()
    }

    pub fn activate(&self) -> Option<bool> {
        self.activate
    }

    /// Effective activation, Launch Services activates unless told otherwise
    pub fn activates(&self) -> bool {
        self.activate.unwrap_or(true)
    }

    pub fn hide(&self) -> Option<bool> {
        self.hide
    }

    pub fn new_instance(&self) -> Option<bool> {
        self.new_instance
    }

    pub fn fresh(&self) -> Option<bool> {
        self.fresh
    }

    pub fn wait_for_check_in(&self) -> Option<bool> {
        self.wait_for_check_in
    }

    pub fn add_to_recents(&self) -> Option<bool> {
        self.add_to_recents
    }

    /// Effective recents behaviour, on unless told otherwise
    pub fn adds_to_recents(&self) -> bool {
        self.add_to_recents.unwrap_or(true)
    }

    pub fn arguments(&self) -> Option<&[String]> {
        self.arguments.as_deref()
    }

    pub fn environment(&self) -> Option<&HashMap<String, String>> {
        self.environment.as_ref()
    }

    pub fn stdin_path(&self) -> Option<&Path> {
        self.stdin_path.as_deref()
    }

    pub fn stdout_path(&self) -> Option<&Path> {
        self.stdout_path.as_deref()
    }

    pub fn stderr_path(&self) -> Option<&Path> {
        self.stderr_path.as_deref()
    }

    pub fn arch(&self) -> Option<&str> {
        self.arch.as_deref()
    }

    /// Options that only the asynchronous entry point can carry
    pub fn has_process_options(&self) -> bool {
        self.arguments.is_some()
            || self.environment.is_some()
            || self.stdin_path.is_some()
            || self.stdout_path.is_some()
            || self.stderr_path.is_some()
            || self.arch.is_some()
            || self.wait_for_check_in.is_some()
            || self.fresh.is_some()
    }
}

impl From<&LaunchOptions> for LaunchFlags {
    /// Flags for the LSOpenFromURLSpec fallback
    fn from(options: &LaunchOptions) -> Self {
        let mut flags = LaunchFlags::DEFAULTS;

        if !options.activates() {
            flags |= LaunchFlags::DONT_SWITCH;
        }

        if options.hide == Some(true) {
            flags |= LaunchFlags::AND_HIDE;
        }

        if options.new_instance == Some(true) {
            flags |= LaunchFlags::NEW_INSTANCE;
        }

        if !options.adds_to_recents() {
            flags |= LaunchFlags::DONT_ADD_TO_RECENTS;
        }

        flags
    }
}

#[derive(Debug, Clone, Default)]
pub struct LaunchOptionsBuilder {
    options: LaunchOptions,
}

impl LaunchOptionsBuilder {
    pub fn activate(mut self, value: bool) -> Self {
        self.options.activate = Some(value);
        self
    }

    pub fn hide(mut self, value: bool) -> Self {
        self.options.hide = Some(value);
        self
    }

    pub fn new_instance(mut self, value: bool) -> Self {
        self.options.new_instance = Some(value);
        self
    }

    pub fn fresh(mut self, value: bool) -> Self {
        self.options.fresh = Some(value);
        self
    }

    pub fn wait_for_check_in(mut self, value: bool) -> Self {
        self.options.wait_for_check_in = Some(value);
        self
    }

    pub fn add_to_recents(mut self, value: bool) -> Self {
        self.options.add_to_recents = Some(value);
        self
    }

    pub fn arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.arguments = Some(arguments.into_iter().map(Into::into).collect());
        self
    }

    /// Add a single environment variable, keeping previous ones
    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options
            .environment
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn environment(mut self, environment: HashMap<String, String>) -> Self {
        self.options.environment = Some(environment);
        self
    }

    pub fn stdin_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.stdin_path = Some(path.into());
        self
    }

    pub fn stdout_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.stdout_path = Some(path.into());
        self
    }

    pub fn stderr_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.stderr_path = Some(path.into());
        self
    }

    pub fn arch<S: Into<String>>(mut self, arch: S) -> Self {
        self.options.arch = Some(arch.into());
        self
    }

    pub fn build(self) -> LaunchOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::LaunchOptions;
    use crate::enums::LaunchFlags;

    #[test]
    fn defaults_are_unset() {
        let options = LaunchOptions::default();

        assert_eq!(options.activate(), None);
        assert!(options.activates());
        assert!(options.adds_to_recents());
        assert!(!options.has_process_options());
    }

    #[test]
    fn env_accumulates() {
        let options = LaunchOptions::builder()
            .env("FOO", "1")
            .env("BAR", "2")
            .build();

        let env = options.environment().unwrap();
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("BAR").map(String::as_str), Some("2"));
        assert!(options.has_process_options());
    }

    #[test]
    fn fallback_flags() {
        let options = LaunchOptions::builder()
            .activate(false)
            .hide(true)
            .new_instance(true)
            .add_to_recents(false)
            .build();

        let flags = LaunchFlags::from(&options);

        assert!(flags.contains(
            LaunchFlags::DEFAULTS
                | LaunchFlags::DONT_SWITCH
                | LaunchFlags::AND_HIDE
                | LaunchFlags::NEW_INSTANCE
                | LaunchFlags::DONT_ADD_TO_RECENTS
        ));
        assert_eq!(LaunchFlags::from(&LaunchOptions::default()), LaunchFlags::DEFAULTS);
    }
}
