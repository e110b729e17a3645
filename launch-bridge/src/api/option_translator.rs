use std::collections::HashMap;
use std::path::Path;

use crate::enums::OptionKey;
use crate::object::architecture::Architecture;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::launch_options::LaunchOptions;

/// Builder methods for the native option dictionary
pub trait OptionSink {
    /// Whether this OS exports the key. Unsupported keys are skipped.
    fn supports(&self, key: OptionKey) -> bool;

    /// Boxed boolean
    fn set_flag(&mut self, key: OptionKey, value: bool) -> Result<(), LaunchBridgeError>;

    /// Array of strings
    fn set_strings(&mut self, key: OptionKey, values: &[String]) -> Result<(), LaunchBridgeError>;

    /// Nested string -> string dictionary
    fn set_string_map(
        &mut self,
        key: OptionKey,
        values: &HashMap<String, String>,
    ) -> Result<(), LaunchBridgeError>;

    fn set_path(&mut self, key: OptionKey, path: &Path) -> Result<(), LaunchBridgeError>;

    /// (cpu_type, cpu_subtype) pair
    fn set_architecture(
        &mut self,
        key: OptionKey,
        arch: Architecture,
    ) -> Result<(), LaunchBridgeError>;
}

/// Write every populated field of `options` into `sink`. Unset fields are
/// never written, not even as false or empty.
pub fn translate_options<S: OptionSink>(
    options: &LaunchOptions,
    sink: &mut S,
) -> Result<(), LaunchBridgeError> {
    let flags = [
        (OptionKey::Activate, options.activate()),
        (OptionKey::Hide, options.hide()),
        // "new instance" is the inverse of preferring a running one
        (OptionKey::PreferRunningInstance, options.new_instance().map(|n| !n)),
        (OptionKey::AddToRecents, options.add_to_recents()),
        (OptionKey::WaitForCheckIn, options.wait_for_check_in()),
        (OptionKey::Fresh, options.fresh()),
    ];

    for (key, value) in flags {
        if let Some(value) = value {
            if supported(sink, key) {
                sink.set_flag(key, value)?;
            }
        }
    }

    if let Some(arguments) = options.arguments() {
        if supported(sink, OptionKey::Arguments) {
            sink.set_strings(OptionKey::Arguments, arguments)?;
        }
    }

    if let Some(environment) = options.environment() {
        if supported(sink, OptionKey::Environment) {
            sink.set_string_map(OptionKey::Environment, environment)?;
        }
    }

    let paths = [
        (OptionKey::StdInPath, options.stdin_path()),
        (OptionKey::StdOutPath, options.stdout_path()),
        (OptionKey::StdErrPath, options.stderr_path()),
    ];

    for (key, path) in paths {
        if let Some(path) = path {
            if supported(sink, key) {
                sink.set_path(key, path)?;
            }
        }
    }

    if let Some(name) = options.arch() {
        match Architecture::parse(name) {
            Some(arch) => {
                if supported(sink, OptionKey::Architecture) {
                    sink.set_architecture(OptionKey::Architecture, arch)?;
                }
            }
            None => log::warn!("Unknown architecture {:?}, launching with no preference", name),
        }
    }

    Ok(())
}

fn supported<S: OptionSink>(sink: &S, key: OptionKey) -> bool {
    let ok = sink.supports(key);
    if !ok {
        log::debug!("{} not exported by this OS, skipping", key);
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::translate_options;
    use crate::enums::OptionKey;
    use crate::native::fake::{RecordedValue, RecordingMap};
    use crate::object::architecture::Architecture;
    use crate::object::launch_options::LaunchOptions;
    use std::collections::HashSet;
    use std::path::PathBuf;

    #[test]
    fn only_activate() {
        let options = LaunchOptions::builder().activate(true).build();
        let mut map = RecordingMap::default();

        translate_options(&options, &mut map).unwrap();

        assert_eq!(map.keys(), vec![OptionKey::Activate]);
        assert_eq!(
            map.get(OptionKey::Activate),
            Some(&RecordedValue::Flag(true))
        );
    }

    #[test]
    fn defaults_write_nothing() {
        let mut map = RecordingMap::default();
        translate_options(&LaunchOptions::default(), &mut map).unwrap();

        assert!(map.keys().is_empty());
    }

    #[test]
    fn explicit_false_is_written() {
        let options = LaunchOptions::builder()
            .activate(false)
            .add_to_recents(false)
            .build();
        let mut map = RecordingMap::default();

        translate_options(&options, &mut map).unwrap();

        assert_eq!(
            map.get(OptionKey::Activate),
            Some(&RecordedValue::Flag(false))
        );
        assert_eq!(
            map.get(OptionKey::AddToRecents),
            Some(&RecordedValue::Flag(false))
        );
    }

    #[test]
    fn new_instance_inverts_prefer_running() {
        let options = LaunchOptions::builder().new_instance(true).build();
        let mut map = RecordingMap::default();

        translate_options(&options, &mut map).unwrap();

        assert_eq!(
            map.get(OptionKey::PreferRunningInstance),
            Some(&RecordedValue::Flag(false))
        );
    }

    #[test]
    fn full_translation() {
        let options = LaunchOptions::builder()
            .hide(true)
            .arguments(vec!["--one", "two"])
            .env("LANG", "C")
            .stdout_path("/tmp/out.log")
            .arch("x86_64")
            .build();
        let mut map = RecordingMap::default();

        translate_options(&options, &mut map).unwrap();

        assert_eq!(
            map.keys(),
            vec![
                OptionKey::Hide,
                OptionKey::Arguments,
                OptionKey::Environment,
                OptionKey::StdOutPath,
                OptionKey::Architecture,
            ]
        );
        assert_eq!(
            map.get(OptionKey::Arguments),
            Some(&RecordedValue::Strings(vec![
                "--one".to_string(),
                "two".to_string()
            ]))
        );
        assert_eq!(
            map.get(OptionKey::StdOutPath),
            Some(&RecordedValue::Path(PathBuf::from("/tmp/out.log")))
        );
        assert_eq!(
            map.get(OptionKey::Architecture),
            Some(&RecordedValue::Architecture(Architecture::new(0x01000007, 3)))
        );
    }

    #[test]
    fn unsupported_optional_keys_are_skipped() {
        let options = LaunchOptions::builder()
            .activate(true)
            .fresh(true)
            .wait_for_check_in(true)
            .build();

        let supported: HashSet<OptionKey> = OptionKey::ALL
            .iter()
            .copied()
            .filter(OptionKey::is_mandatory)
            .collect();
        let mut map = RecordingMap::supporting(supported);

        translate_options(&options, &mut map).unwrap();

        assert_eq!(map.keys(), vec![OptionKey::Activate]);
    }

    #[test]
    fn unknown_arch_is_omitted() {
        let options = LaunchOptions::builder().arch("not-an-arch").build();
        let mut map = RecordingMap::default();

        translate_options(&options, &mut map).unwrap();

        assert!(map.keys().is_empty());
    }
}
