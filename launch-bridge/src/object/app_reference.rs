use std::fmt;
use std::path::{Path, PathBuf};

use crate::object::bridge_error::LaunchBridgeError;

/// Which resolution strategy produced a reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedBy {
    Path,
    BundleIdentifier(String),
    DisplayName(String),
    /// Default handler for a document, URL or content type
    DefaultHandler(String),
}

impl fmt::Display for ResolvedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedBy::Path => write!(f, "path"),
            ResolvedBy::BundleIdentifier(id) => write!(f, "bundle identifier {}", id),
            ResolvedBy::DisplayName(name) => write!(f, "name {}", name),
            ResolvedBy::DefaultHandler(target) => write!(f, "default handler for {}", target),
        }
    }
}

/// Resolved, absolute location of an application bundle. Only the resolver
/// creates these; the native layer turns them into file URLs at call time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationReference {
    path: PathBuf,
    resolved_by: ResolvedBy,
}

/// The few Info.plist keys worth showing about a resolved bundle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleInfo {
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub executable: Option<String>,
    pub version: Option<String>,
}

impl ApplicationReference {
    pub(crate) fn new<P: Into<PathBuf>>(path: P, resolved_by: ResolvedBy) -> Self {
        ApplicationReference {
            path: path.into(),
            resolved_by,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolved_by(&self) -> &ResolvedBy {
        &self.resolved_by
    }

    /// Read Contents/Info.plist (binary or XML)
    pub fn bundle_info(&self) -> Result<BundleInfo, LaunchBridgeError> {
        let info_path = self.path.join("Contents").join("Info.plist");
        let info = plist::Value::from_file(&info_path)
            .map_err(|e| LaunchBridgeError::path(&info_path, e.to_string()))?;

        let dict = info.as_dictionary().ok_or_else(|| {
            LaunchBridgeError::path(&info_path, "Info.plist is not a dictionary")
        })?;

        let string = |key: &str| dict.get(key).and_then(|v| v.as_string()).map(String::from);

        Ok(BundleInfo {
            identifier: string("CFBundleIdentifier"),
            name: string("CFBundleDisplayName").or_else(|| string("CFBundleName")),
            executable: string("CFBundleExecutable"),
            version: string("CFBundleShortVersionString"),
        })
    }
}

impl fmt::Display for ApplicationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
