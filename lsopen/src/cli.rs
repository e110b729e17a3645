use std::path::PathBuf;

use clap::Parser;
use launch_bridge::LaunchOptions;

#[derive(Parser, Debug)]
#[command(
    name = "lsopen",
    version,
    about = "Open applications, documents and URLs through Launch Services",
    after_help = "\
TARGETS:
  Existing directories ending in .app are launched, strings with a URL
  scheme are opened as URLs, anything else is opened as a document."
)]
pub struct Cli {
    /// Open with the application of this name or path
    #[arg(short = 'a', long = "app", value_name = "NAME")]
    pub app: Option<String>,

    /// Open with the application with this bundle identifier
    #[arg(short = 'b', long = "bundle-id", value_name = "ID", conflicts_with = "app")]
    pub bundle_id: Option<String>,

    /// Open with the default text editor
    #[arg(short = 'e', long = "text-edit", conflicts_with_all = ["app", "bundle_id"])]
    pub text_edit: bool,

    /// Start a new instance even if one is running
    #[arg(short = 'n', long)]
    pub new: bool,

    /// Don't bring the application to the foreground
    #[arg(short = 'g', long)]
    pub background: bool,

    /// Launch hidden
    #[arg(short = 'j', long)]
    pub hide: bool,

    /// Don't restore windows from the last session
    #[arg(short = 'F', long)]
    pub fresh: bool,

    /// Wait for launched applications to exit
    #[arg(short = 'W', long = "wait-apps")]
    pub wait_apps: bool,

    #[arg(long, value_name = "PATH")]
    pub stdin: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub stdout: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub stderr: Option<PathBuf>,

    /// arm64, arm64e, x86_64, x86_64h, i386, arm or TYPE/SUBTYPE
    #[arg(long, value_name = "NAME")]
    pub arch: Option<String>,

    /// Environment variable for the launched process (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env)]
    pub env: Vec<(String, String)>,

    /// Don't add the application or documents to Recent Items
    #[arg(long)]
    pub no_recents: bool,

    /// Wait for the application to check in before completing
    #[arg(long)]
    pub wait_check_in: bool,

    /// Print what was resolved and launched
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Write a debug log to lsopen-debug-<ts>.txt
    #[arg(long)]
    pub log_file: bool,

    /// Applications, documents or URLs
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Everything after --args goes to the application
    #[arg(long = "args", num_args = 1.., allow_hyphen_values = true, value_name = "ARG")]
    pub args: Option<Vec<String>>,
}

impl Cli {
    /// Only flags that were given end up set
    pub fn to_options(&self) -> LaunchOptions {
        let mut builder = LaunchOptions::builder();

        if self.background {
            builder = builder.activate(false);
        }
        if self.hide {
            builder = builder.hide(true);
        }
        if self.new {
            builder = builder.new_instance(true);
        }
        if self.fresh {
            builder = builder.fresh(true);
        }
        if self.wait_check_in {
            builder = builder.wait_for_check_in(true);
        }
        if self.no_recents {
            builder = builder.add_to_recents(false);
        }
        if let Some(args) = &self.args {
            builder = builder.arguments(args.clone());
        }
        for (key, value) in &self.env {
            builder = builder.env(key.as_str(), value.as_str());
        }
        if let Some(path) = &self.stdin {
            builder = builder.stdin_path(path.clone());
        }
        if let Some(path) = &self.stdout {
            builder = builder.stdout_path(path.clone());
        }
        if let Some(path) = &self.stderr {
            builder = builder.stderr_path(path.clone());
        }
        if let Some(arch) = &self.arch {
            builder = builder.arch(arch.as_str());
        }

        builder.build()
    }
}

fn parse_env(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_env, Cli};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn env_pairs() {
        assert_eq!(
            parse_env("LANG=C.UTF-8"),
            Ok(("LANG".to_string(), "C.UTF-8".to_string()))
        );
        assert_eq!(parse_env("EMPTY="), Ok(("EMPTY".to_string(), String::new())));
        assert!(parse_env("=oops").is_err());
        assert!(parse_env("novalue").is_err());
    }

    #[test]
    fn no_flags_no_options() {
        let cli = Cli::try_parse_from(["lsopen", "notes.txt"]).unwrap();
        let options = cli.to_options();

        assert_eq!(cli.targets, vec!["notes.txt".to_string()]);
        assert_eq!(options.activate(), None);
        assert_eq!(options.add_to_recents(), None);
        assert!(options.arguments().is_none());
    }

    #[test]
    fn flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "lsopen",
            "-g",
            "-j",
            "-n",
            "--no-recents",
            "--env",
            "A=1",
            "--env",
            "B=2",
            "--stdout",
            "/tmp/out.log",
            "--arch",
            "x86_64",
            "-a",
            "TextEdit",
        ])
        .unwrap();
        let options = cli.to_options();

        assert_eq!(cli.app.as_deref(), Some("TextEdit"));
        assert_eq!(options.activate(), Some(false));
        assert_eq!(options.hide(), Some(true));
        assert_eq!(options.new_instance(), Some(true));
        assert_eq!(options.add_to_recents(), Some(false));
        assert_eq!(options.environment().map(|e| e.len()), Some(2));
        assert_eq!(options.stdout_path(), Some(Path::new("/tmp/out.log")));
        assert_eq!(options.arch(), Some("x86_64"));
    }

    #[test]
    fn trailing_args() {
        let cli =
            Cli::try_parse_from(["lsopen", "-a", "TextEdit", "--args", "--one", "two"]).unwrap();

        assert_eq!(
            cli.to_options().arguments(),
            Some(&["--one".to_string(), "two".to_string()][..])
        );
    }

    #[test]
    fn app_and_bundle_id_conflict() {
        assert!(Cli::try_parse_from(["lsopen", "-a", "TextEdit", "-b", "com.apple.TextEdit"]).is_err());
        assert!(Cli::try_parse_from(["lsopen", "-e", "-a", "TextEdit"]).is_err());
    }
}
