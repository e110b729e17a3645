use log::{Level, LevelFilter, Metadata, Record};
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Modules whose records end up in the debug file
const MODULES: [&str; 2] = ["lsopen", "launch_bridge"];

struct Logger(Arc<File>);

impl log::Log for Logger {
    fn enabled(&self, meta: &Metadata<'_>) -> bool {
        meta.level() <= Level::Trace
    }

    fn log(&self, record: &Record<'_>) {
        let ours = record
            .module_path()
            .map(|mp| MODULES.iter().any(|m| mp.starts_with(m)))
            .unwrap_or(false);

        if !ours || !self.enabled(record.metadata()) {
            return;
        }

        let statement = format!("{} - {}\n", record.level(), record.args());
        let Self(arc) = self;
        let mut file = &**arc;
        let _ = file.write_all(statement.as_bytes());
    }

    fn flush(&self) {
        let Self(arc) = self;
        let mut file = &**arc;
        let _ = file.flush();
    }
}

/// Log everything from this binary and the bridge to
/// `lsopen-debug-<unix ts>.txt` in the working directory
pub fn bind() -> Result<PathBuf, Box<dyn Error>> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
    let path = PathBuf::from(format!("lsopen-debug-{}.txt", now.as_secs()));
    let file = File::create(&path)?;

    log::set_boxed_logger(Box::new(Logger(Arc::new(file))))?;
    log::set_max_level(LevelFilter::Trace);

    Ok(path)
}
