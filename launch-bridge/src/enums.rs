use std::fmt;

/// Keys of the option dictionary handed to `_LSOpenURLsWithCompletionHandler`.
/// They are exported as `CFStringRef` globals and looked up by name, never linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    Activate,
    Hide,
    PreferRunningInstance,
    Arguments,
    Environment,
    AddToRecents,
    WaitForCheckIn,
    Fresh,
    StdInPath,
    StdOutPath,
    StdErrPath,
    Architecture,
}

impl OptionKey {
    pub const ALL: [OptionKey; 12] = [
        OptionKey::Activate,
        OptionKey::Hide,
        OptionKey::PreferRunningInstance,
        OptionKey::Arguments,
        OptionKey::Environment,
        OptionKey::AddToRecents,
        OptionKey::WaitForCheckIn,
        OptionKey::Fresh,
        OptionKey::StdInPath,
        OptionKey::StdOutPath,
        OptionKey::StdErrPath,
        OptionKey::Architecture,
    ];

    /// Exported symbol name, as passed to dlsym()
    pub fn symbol(&self) -> &'static str {
        match self {
            OptionKey::Activate => "_kLSOpenOptionActivateKey",
            OptionKey::Hide => "_kLSOpenOptionHideKey",
            OptionKey::PreferRunningInstance => "_kLSOpenOptionPreferRunningInstanceKey",
            OptionKey::Arguments => "_kLSOpenOptionArgumentsKey",
            OptionKey::Environment => "_kLSOpenOptionEnvironmentVariablesKey",
            OptionKey::AddToRecents => "_kLSOpenOptionAddToRecentsKey",
            OptionKey::WaitForCheckIn => "_kLSOpenOptionWaitForApplicationToCheckInKey",
            OptionKey::Fresh => "_kLSOpenOptionLaunchWithoutRestoringStateKey",
            OptionKey::StdInPath => "_kLSOpenOptionStdInPathKey",
            OptionKey::StdOutPath => "_kLSOpenOptionStdOutPathKey",
            OptionKey::StdErrPath => "_kLSOpenOptionStdErrPathKey",
            OptionKey::Architecture => "_kLSOpenOptionArchitectureKey",
        }
    }

    /// Keys every supported OS version exports. A miss is fatal at init.
    pub fn is_mandatory(&self) -> bool {
        matches!(
            self,
            OptionKey::Activate
                | OptionKey::Hide
                | OptionKey::PreferRunningInstance
                | OptionKey::Arguments
                | OptionKey::Environment
        )
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

bitflags! {
    /// LSRolesMask
    /// https://developer.apple.com/documentation/coreservices/lsrolesmask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LSRoles: u32 {
        const NONE = 0x0000_0001;
        const VIEWER = 0x0000_0002;
        const EDITOR = 0x0000_0004;
        const SHELL = 0x0000_0008;
        const ALL = 0xFFFF_FFFF;
    }
}

bitflags! {
    /// LSLaunchFlags, only used by the LSOpenFromURLSpec fallback
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LaunchFlags: u32 {
        const DEFAULTS = 0x0000_0001;
        const AND_PRINT = 0x0000_0002;
        const AND_DISPLAY_ERRORS = 0x0000_0040;
        const DONT_ADD_TO_RECENTS = 0x0000_0100;
        const DONT_SWITCH = 0x0000_0200;
        const ASYNC = 0x0001_0000;
        const NEW_INSTANCE = 0x0008_0000;
        const AND_HIDE = 0x0010_0000;
        const AND_HIDE_OTHERS = 0x0020_0000;
    }
}
