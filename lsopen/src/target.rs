use std::path::{Path, PathBuf};

use launch_bridge::url_scheme;

/// Schemes that are URLs even without "//"
const OPAQUE_SCHEMES: [&str; 6] = ["mailto", "tel", "sms", "facetime", "news", "x-apple.systempreferences"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Existing directory ending in .app
    Application(PathBuf),
    Document(PathBuf),
    Url(String),
}

/// Command line targets split by kind, in the order given
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Targets {
    pub applications: Vec<PathBuf>,
    pub documents: Vec<PathBuf>,
    pub urls: Vec<String>,
}

impl Targets {
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Targets {
        let mut targets = Targets::default();

        for arg in args {
            match categorize(arg.as_ref()) {
                Target::Application(path) => targets.applications.push(path),
                Target::Document(path) => targets.documents.push(path),
                Target::Url(url) => targets.urls.push(url),
            }
        }

        targets
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty() && self.documents.is_empty() && self.urls.is_empty()
    }

    /// Bundles and documents alike, for handing to an explicitly chosen app
    pub fn paths(&self) -> Vec<PathBuf> {
        self.applications
            .iter()
            .chain(self.documents.iter())
            .cloned()
            .collect()
    }
}

/// Something on disk wins over URL syntax; anything else that isn't a URL
/// is a document, missing or not
pub fn categorize(raw: &str) -> Target {
    let path = Path::new(raw);

    if path.exists() {
        return if is_bundle(path) {
            Target::Application(path.to_path_buf())
        } else {
            Target::Document(path.to_path_buf())
        };
    }

    match url_scheme(raw) {
        Some(scheme) if raw.contains("://") || OPAQUE_SCHEMES.contains(&scheme) => {
            Target::Url(raw.to_string())
        }
        _ => Target::Document(path.to_path_buf()),
    }
}

fn is_bundle(path: &Path) -> bool {
    path.is_dir()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("app"))
            .unwrap_or(false)
}
