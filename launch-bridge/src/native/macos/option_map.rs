use std::collections::HashMap;
use std::path::Path;

use crate::api::option_translator::OptionSink;
use crate::enums::OptionKey;
use crate::native::macos::objc::Id;
use crate::native::macos::symbols::NativeSymbols;
use crate::object::architecture::Architecture;
use crate::object::bridge_error::LaunchBridgeError;

/// NSMutableDictionary keyed by the exported `_kLSOpenOption*` constants
pub struct NativeOptionMap {
    symbols: &'static NativeSymbols,
    dictionary: Id,
}

impl NativeOptionMap {
    pub fn new(symbols: &'static NativeSymbols) -> Result<NativeOptionMap, LaunchBridgeError> {
        Ok(NativeOptionMap {
            symbols,
            dictionary: symbols.dictionary()?,
        })
    }

    pub fn as_ptr(&self) -> Id {
        self.dictionary
    }

    fn put(&mut self, key: OptionKey, value: Id) -> Result<(), LaunchBridgeError> {
        let native_key = self
            .symbols
            .option_keys
            .get(&key)
            .copied()
            .ok_or_else(|| LaunchBridgeError::SymbolUnavailable(key.symbol().to_string()))?;

        log::trace!("Option {} = {:p}", key, value);
        self.symbols.insert(self.dictionary, native_key, value);
        Ok(())
    }
}

impl OptionSink for NativeOptionMap {
    fn supports(&self, key: OptionKey) -> bool {
        self.symbols.option_keys.contains_key(&key)
    }

    fn set_flag(&mut self, key: OptionKey, value: bool) -> Result<(), LaunchBridgeError> {
        let number = self.symbols.boolean(value);
        self.put(key, number)
    }

    fn set_strings(&mut self, key: OptionKey, values: &[String]) -> Result<(), LaunchBridgeError> {
        let array = self.symbols.string_array(values)?;
        self.put(key, array)
    }

    fn set_string_map(
        &mut self,
        key: OptionKey,
        values: &HashMap<String, String>,
    ) -> Result<(), LaunchBridgeError> {
        let dictionary = self.symbols.string_dictionary(values)?;
        self.put(key, dictionary)
    }

    fn set_path(&mut self, key: OptionKey, path: &Path) -> Result<(), LaunchBridgeError> {
        let string = self.symbols.string(&path.to_string_lossy())?;
        self.put(key, string)
    }

    /// [cpu_type, cpu_subtype]
    fn set_architecture(
        &mut self,
        key: OptionKey,
        arch: Architecture,
    ) -> Result<(), LaunchBridgeError> {
        let pair = self.symbols.array(&[
            self.symbols.integer(arch.cpu_type as i64),
            self.symbols.integer(arch.cpu_subtype as i64),
        ])?;
        self.put(key, pair)
    }
}
