use std::path::PathBuf;

use launch_bridge::{
    default_text_editor_reference, launch_app, launch_reference, open_documents, open_url,
    reference_from_bundle_id, reference_from_display_name, ApplicationReference,
    LaunchBridgeError, LaunchOptions, LaunchResult,
};

use crate::cli::Cli;
use crate::target::Targets;

/// Application picked with -a, -b or -e
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppChoice {
    Name(String),
    BundleId(String),
    TextEditor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Launch a bundle given as a target
    LaunchApp(PathBuf),
    /// Open documents with their default handler
    OpenDocuments(Vec<PathBuf>),
    OpenUrl(String),
    /// Launch the chosen application with these documents
    LaunchChosen(Vec<PathBuf>),
    OpenUrlWithChosen(String),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Plan {
    pub choice: Option<AppChoice>,
    pub steps: Vec<Step>,
}

impl Plan {
    pub fn new(cli: &Cli, targets: Targets) -> Result<Plan, LaunchBridgeError> {
        let choice = if cli.text_edit {
            Some(AppChoice::TextEditor)
        } else if let Some(name) = &cli.app {
            Some(AppChoice::Name(name.clone()))
        } else {
            cli.bundle_id.clone().map(AppChoice::BundleId)
        };

        let mut steps = vec![];

        match choice {
            Some(_) => {
                let paths = targets.paths();

                // A bare -a NAME still launches; URLs alone don't need a
                // separate launch
                if !paths.is_empty() || targets.urls.is_empty() {
                    steps.push(Step::LaunchChosen(paths));
                }

                steps.extend(targets.urls.into_iter().map(Step::OpenUrlWithChosen));
            }
            None => {
                if targets.is_empty() {
                    return Err(LaunchBridgeError::NoFilesSpecified);
                }

                steps.extend(targets.applications.into_iter().map(Step::LaunchApp));

                if !targets.documents.is_empty() {
                    steps.push(Step::OpenDocuments(targets.documents));
                }

                steps.extend(targets.urls.into_iter().map(Step::OpenUrl));
            }
        }

        Ok(Plan { choice, steps })
    }
}

fn resolve(choice: &AppChoice) -> Result<ApplicationReference, LaunchBridgeError> {
    match choice {
        AppChoice::Name(name) => reference_from_display_name(name),
        AppChoice::BundleId(id) => reference_from_bundle_id(id),
        AppChoice::TextEditor => default_text_editor_reference(),
    }
}

fn describe(application: &ApplicationReference) {
    println!("{} ({})", application.path().display(), application.resolved_by());

    match application.bundle_info() {
        Ok(info) => {
            if let Some(id) = info.identifier {
                println!("  identifier: {}", id);
            }
            if let Some(name) = info.name {
                println!("  name: {}", name);
            }
            if let Some(version) = info.version {
                println!("  version: {}", version);
            }
        }
        Err(e) => log::debug!("No bundle info: {}", e),
    }
}

/// Resolve the chosen application once, then run every step in order. The
/// first failure stops the run.
pub fn run(cli: &Cli) -> Result<Vec<LaunchResult>, LaunchBridgeError> {
    let options: LaunchOptions = cli.to_options();
    let plan = Plan::new(cli, Targets::from_args(&cli.targets))?;
    log::debug!("{:?}", plan);

    let chosen = match &plan.choice {
        Some(choice) => {
            let application = resolve(choice)?;
            if cli.verbose {
                describe(&application);
            }
            Some(application)
        }
        None => None,
    };

    let chosen_path = chosen
        .as_ref()
        .map(|a| a.path().to_string_lossy().to_string());

    let mut results = vec![];

    for step in &plan.steps {
        let result = match (step, &chosen) {
            (Step::LaunchApp(path), _) => launch_app(&path.to_string_lossy(), &[], &options)?,
            (Step::OpenDocuments(documents), _) => open_documents(documents, None, &options)?,
            (Step::OpenUrl(url), _) => open_url(url, None, &options)?,
            (Step::LaunchChosen(documents), Some(application)) => {
                launch_reference(application, documents, &options)?
            }
            (Step::OpenUrlWithChosen(url), Some(_)) => {
                open_url(url, chosen_path.as_deref(), &options)?
            }
            (step, None) => {
                return Err(LaunchBridgeError::InvalidArgument(format!(
                    "{:?} needs an application",
                    step
                )))
            }
        };

        if cli.verbose {
            println!("{}", result);
        }
        results.push(result);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::{AppChoice, Plan, Step};
    use crate::cli::Cli;
    use crate::target::Targets;
    use clap::Parser;
    use launch_bridge::LaunchBridgeError;
    use std::path::PathBuf;

    fn plan(args: &[&str]) -> Result<Plan, LaunchBridgeError> {
        let cli = Cli::try_parse_from(args).unwrap();
        Plan::new(&cli, Targets::from_args(&cli.targets))
    }

    #[test]
    fn nothing_to_open() {
        assert_eq!(plan(&["lsopen"]), Err(LaunchBridgeError::NoFilesSpecified));
    }

    #[test]
    fn bare_app_name_launches() {
        let plan = plan(&["lsopen", "-a", "TextEdit"]).unwrap();

        assert_eq!(plan.choice, Some(AppChoice::Name("TextEdit".to_string())));
        assert_eq!(plan.steps, vec![Step::LaunchChosen(vec![])]);
    }

    #[test]
    fn chosen_app_gets_documents_and_urls() {
        let plan = plan(&["lsopen", "-b", "com.apple.Safari", "a.html", "https://x.org"]).unwrap();

        assert_eq!(
            plan.choice,
            Some(AppChoice::BundleId("com.apple.Safari".to_string()))
        );
        assert_eq!(
            plan.steps,
            vec![
                Step::LaunchChosen(vec![PathBuf::from("a.html")]),
                Step::OpenUrlWithChosen("https://x.org".to_string()),
            ]
        );
    }

    #[test]
    fn chosen_app_with_only_urls() {
        let plan = plan(&["lsopen", "-a", "Safari", "https://x.org"]).unwrap();

        assert_eq!(
            plan.steps,
            vec![Step::OpenUrlWithChosen("https://x.org".to_string())]
        );
    }

    #[test]
    fn default_handlers() {
        let plan = plan(&["lsopen", "one.txt", "two.txt", "mailto:me@example.com"]).unwrap();

        assert_eq!(plan.choice, None);
        assert_eq!(
            plan.steps,
            vec![
                Step::OpenDocuments(vec![PathBuf::from("one.txt"), PathBuf::from("two.txt")]),
                Step::OpenUrl("mailto:me@example.com".to_string()),
            ]
        );
    }

    #[test]
    fn text_editor() {
        let plan = plan(&["lsopen", "-e", "notes.txt"]).unwrap();

        assert_eq!(plan.choice, Some(AppChoice::TextEditor));
    }
}
