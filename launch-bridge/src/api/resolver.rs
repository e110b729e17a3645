use std::env;
use std::path::{Path, PathBuf};

use crate::enums::LSRoles;
use crate::native::LaunchServices;
use crate::object::app_reference::{ApplicationReference, ResolvedBy};
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::bridge_error::LaunchBridgeError::{ApplicationNotFound, InvalidArgument};

pub const BUNDLE_SUFFIX: &str = ".app";
pub const PLAIN_TEXT_TYPE: &str = "public.plain-text";

lazy_static! {
    static ref HOME: Option<PathBuf> = env::var_os("HOME").map(PathBuf::from);
}

/// Turns loose application references into `ApplicationReference`s. Each
/// strategy stands alone; nothing falls through to another strategy except
/// the display name lookup, which tries the filesystem first for path-like
/// names.
pub struct Resolver<'a, S: LaunchServices> {
    services: &'a S,
}

impl<'a, S: LaunchServices> Resolver<'a, S> {
    pub fn new(services: &'a S) -> Self {
        Resolver { services }
    }

    /// Absolute-path `path` and require that it exists
    pub fn from_path(&self, path: &str) -> Result<ApplicationReference, LaunchBridgeError> {
        let absolute = existing_path(path)?;
        log::debug!("Resolved {} to {:?}", path, absolute);
        Ok(ApplicationReference::new(absolute, ResolvedBy::Path))
    }

    /// First registered bundle for `bundle_id`
    pub fn from_bundle_id(&self, bundle_id: &str) -> Result<ApplicationReference, LaunchBridgeError> {
        if bundle_id.trim().is_empty() {
            return Err(InvalidArgument("empty bundle identifier".to_string()));
        }

        let paths = self.services.application_paths_for_bundle_id(bundle_id)?;
        log::debug!("{} bundles registered for {}", paths.len(), bundle_id);

        paths
            .into_iter()
            .next()
            .map(|p| {
                ApplicationReference::new(p, ResolvedBy::BundleIdentifier(bundle_id.to_string()))
            })
            .ok_or_else(|| ApplicationNotFound(bundle_id.to_string()))
    }

    /// Human readable application name, e.g. "TextEdit". Path-like names and
    /// names ending in .app are tried on the filesystem first.
    pub fn from_display_name(&self, name: &str) -> Result<ApplicationReference, LaunchBridgeError> {
        if name.trim().is_empty() {
            return Err(InvalidArgument("empty application name".to_string()));
        }

        if looks_like_path(name) {
            match existing_path(name) {
                Ok(path) => {
                    return Ok(ApplicationReference::new(
                        path,
                        ResolvedBy::DisplayName(name.to_string()),
                    ))
                }
                Err(e) => log::debug!("{}, falling back to name lookup", e),
            }
        }

        self.services
            .full_path_for_application(name)?
            .map(|p| ApplicationReference::new(p, ResolvedBy::DisplayName(name.to_string())))
            .ok_or_else(|| ApplicationNotFound(name.to_string()))
    }

    /// Default handler for an existing document
    pub fn default_for_file<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<ApplicationReference, LaunchBridgeError> {
        let path = path.as_ref();
        let absolute = existing_path(&path.to_string_lossy())?;

        self.services
            .default_application_for_file(&absolute, LSRoles::ALL)?
            .map(|p| {
                ApplicationReference::new(
                    p,
                    ResolvedBy::DefaultHandler(absolute.to_string_lossy().to_string()),
                )
            })
            .ok_or_else(|| ApplicationNotFound(format!("for {}", absolute.display())))
    }

    /// Default handler for the URL's scheme
    pub fn default_for_url(&self, url: &str) -> Result<ApplicationReference, LaunchBridgeError> {
        let scheme =
            url_scheme(url).ok_or_else(|| InvalidArgument(format!("{} is not a URL", url)))?;

        self.services
            .default_application_for_url(url, LSRoles::ALL)?
            .map(|p| ApplicationReference::new(p, ResolvedBy::DefaultHandler(url.to_string())))
            .ok_or_else(|| ApplicationNotFound(format!("for {}: URLs", scheme)))
    }

    /// Default editor for plain text
    pub fn default_text_editor(&self) -> Result<ApplicationReference, LaunchBridgeError> {
        self.services
            .default_application_for_content_type(PLAIN_TEXT_TYPE, LSRoles::EDITOR)?
            .map(|p| {
                ApplicationReference::new(p, ResolvedBy::DefaultHandler(PLAIN_TEXT_TYPE.to_string()))
            })
            .ok_or_else(|| ApplicationNotFound(format!("for {}", PLAIN_TEXT_TYPE)))
    }
}

/// RFC 3986 scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
pub fn url_scheme(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once(':')?;
    let mut chars = scheme.chars();

    let valid = chars.next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false)
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.');

    // "C:foo" style single letters are not URLs worth handing to Launch Services
    if valid && scheme.len() > 1 && !rest.is_empty() {
        Some(scheme)
    } else {
        None
    }
}

/// Paths, ~ paths and bundle names
pub fn looks_like_path(name: &str) -> bool {
    name.contains('/')
        || name.starts_with('~')
        || name.starts_with('.')
        || name.trim_end_matches('/').ends_with(BUNDLE_SUFFIX)
}

/// ~ expansion against $HOME
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix('~'), HOME.as_ref()) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(path),
    }
}

/// Absolute path for `path`, which must exist
pub fn existing_path(path: &str) -> Result<PathBuf, LaunchBridgeError> {
    if path.is_empty() {
        return Err(LaunchBridgeError::path(path, "empty path"));
    }

    let expanded = expand_home(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir()
            .map_err(|e| LaunchBridgeError::path(path, e.to_string()))?
            .join(expanded)
    };

    absolute
        .metadata()
        .map_err(|e| LaunchBridgeError::path(&absolute, e.to_string()))?;

    Ok(absolute)
}
