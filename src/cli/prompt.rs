//! Interactive prompts for `favpack generate`
//!
//! Collects the same inputs as the command-line flags. Cancellation (Escape
//! on a menu, or an interrupted terminal) is reported as
//! [`Prompted::Cancelled`]; this module never exits the process.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::Category;
use crate::config::{FavpackConfig, DEFAULT_PWA_COLOR};
use crate::models::{DisplayMode, PwaConfig};
use crate::validate::{
    is_vector_source, validate_input_path, validate_output_dir, validate_pwa_color,
    validate_pwa_description, validate_pwa_name, PathError, ValidationError,
};

/// Outcome of a prompt that the user may cancel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompted<T> {
    Answer(T),
    Cancelled,
}

/// Failures that end the interactive flow
#[derive(Debug, Error)]
pub enum PromptError {
    /// Permission or directory creation failure; these abort instead of re-prompting
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The terminal could not be read or written
    #[error("Terminal error: {0}")]
    Terminal(#[from] dialoguer::Error),
}

/// Everything collected by the interactive flow
#[derive(Debug, Clone)]
pub struct Answers {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub categories: Vec<Category>,
    pub pwa: Option<PwaConfig>,
    pub optimize_svg: bool,
}

/// Unwrap an answer or bubble the cancellation up.
macro_rules! answer {
    ($prompted:expr) => {
        match $prompted {
            Prompted::Answer(value) => value,
            Prompted::Cancelled => return Ok(Prompted::Cancelled),
        }
    };
}

fn interrupted<T>(result: dialoguer::Result<T>) -> Result<Prompted<T>, PromptError> {
    match result {
        Ok(value) => Ok(Prompted::Answer(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
            Ok(Prompted::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

fn escapable<T>(result: dialoguer::Result<Option<T>>) -> Result<Prompted<T>, PromptError> {
    match interrupted(result)? {
        Prompted::Answer(Some(value)) => Ok(Prompted::Answer(value)),
        Prompted::Answer(None) | Prompted::Cancelled => Ok(Prompted::Cancelled),
    }
}

/// Run the full interactive flow.
///
/// `config` supplies defaults; `preset_input` pre-fills the source path.
pub fn run_prompts(
    config: &FavpackConfig,
    preset_input: Option<&Path>,
) -> Result<Prompted<Answers>, PromptError> {
    let theme = ColorfulTheme::default();

    let input = answer!(prompt_input_path(&theme, preset_input)?);
    let default_output = config.output.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let output_dir = answer!(prompt_output_dir(&theme, &default_output)?);
    let categories = answer!(prompt_categories(&theme, &config.generate.categories)?);

    let wants_pwa = answer!(escapable(
        Confirm::with_theme(&theme)
            .with_prompt("Do you want to configure Progressive Web App?")
            .default(config.pwa.is_some())
            .interact_opt()
    )?);
    let pwa = if wants_pwa { Some(answer!(prompt_pwa(&theme, config)?)) } else { None };

    let optimize_svg = if is_vector_source(&input) {
        answer!(escapable(
            Confirm::with_theme(&theme)
                .with_prompt("Do you want us to optimize your svg?")
                .default(config.generate.optimize_svg)
                .interact_opt()
        )?)
    } else {
        false
    };

    Ok(Prompted::Answer(Answers { input, output_dir, categories, pwa, optimize_svg }))
}

fn prompt_input_path(
    theme: &ColorfulTheme,
    preset: Option<&Path>,
) -> Result<Prompted<PathBuf>, PromptError> {
    loop {
        let mut prompt =
            Input::<String>::with_theme(theme).with_prompt("Where is the source image located at?");
        if let Some(path) = preset {
            prompt = prompt.with_initial_text(path.display().to_string());
        }
        let raw = answer!(interrupted(prompt.interact_text())?);

        match validate_input_path(Path::new(raw.trim())) {
            Ok(path) => return Ok(Prompted::Answer(path)),
            Err(e) if e.is_permission_denied() => return Err(e.into()),
            Err(e) => eprintln!("{}", e),
        }
    }
}

fn prompt_output_dir(
    theme: &ColorfulTheme,
    default: &Path,
) -> Result<Prompted<PathBuf>, PromptError> {
    loop {
        let raw = answer!(interrupted(
            Input::<String>::with_theme(theme)
                .with_prompt("Where should we save the favicons package?")
                .default(default.display().to_string())
                .interact_text()
        )?);

        match validate_output_dir(Path::new(raw.trim())) {
            Ok(path) => return Ok(Prompted::Answer(path)),
            Err(e @ PathError::NotADirectory(_)) => eprintln!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }
}

fn prompt_categories(
    theme: &ColorfulTheme,
    preselected: &[Category],
) -> Result<Prompted<Vec<Category>>, PromptError> {
    let labels: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    let defaults: Vec<bool> = Category::ALL.iter().map(|c| preselected.contains(c)).collect();

    let picked = answer!(escapable(
        MultiSelect::with_theme(theme)
            .with_prompt("Select any extra favicon categories (optional)")
            .items(&labels)
            .defaults(&defaults)
            .interact_opt()
    )?);

    Ok(Prompted::Answer(picked.into_iter().map(|i| Category::ALL[i]).collect()))
}

fn prompt_pwa(
    theme: &ColorfulTheme,
    config: &FavpackConfig,
) -> Result<Prompted<PwaConfig>, PromptError> {
    let preset = config.pwa.clone().unwrap_or_default();

    let mut name_prompt = Input::<String>::with_theme(theme)
        .with_prompt("How is the app called?")
        .validate_with(|value: &String| validate_pwa_name(value).map_err(|e| e.to_string()));
    if let Some(name) = preset.name {
        name_prompt = name_prompt.with_initial_text(name);
    }
    let name = answer!(interrupted(name_prompt.interact_text())?);

    let mut description_prompt = Input::<String>::with_theme(theme)
        .with_prompt("Provide the app description")
        .validate_with(|value: &String| {
            validate_pwa_description(value).map_err(|e| e.to_string())
        });
    if let Some(description) = preset.description {
        description_prompt = description_prompt.with_initial_text(description);
    }
    let description = answer!(interrupted(description_prompt.interact_text())?);

    let labels: Vec<String> = DisplayMode::ALL
        .iter()
        .map(|mode| match mode {
            DisplayMode::Standalone => format!("{} (most used)", mode),
            _ => mode.to_string(),
        })
        .collect();
    let default_display = preset.display.unwrap_or_default();
    let default_index = DisplayMode::ALL.iter().position(|m| *m == default_display).unwrap_or(0);
    let display_index = answer!(escapable(
        Select::with_theme(theme)
            .with_prompt("Select the app display mode")
            .items(&labels)
            .default(default_index)
            .interact_opt()
    )?);

    let color = answer!(interrupted(
        Input::<String>::with_theme(theme)
            .with_prompt("Provide the app theme hex color for the tool bar and splash screen")
            .default(preset.color.unwrap_or_else(|| DEFAULT_PWA_COLOR.to_string()))
            .validate_with(|value: &String| {
                validate_pwa_color(value).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
    )?);

    let pwa = PwaConfig::new(name, description, DisplayMode::ALL[display_index], &color)?;
    Ok(Prompted::Answer(pwa))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_maps_to_cancelled() {
        let err = dialoguer::Error::IO(io::Error::new(io::ErrorKind::Interrupted, "ctrl-c"));
        let result: Result<Prompted<String>, _> = interrupted(Err(err));
        assert_eq!(result.unwrap(), Prompted::Cancelled);
    }

    #[test]
    fn test_other_terminal_errors_propagate() {
        let err = dialoguer::Error::IO(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        let result: Result<Prompted<String>, _> = interrupted(Err(err));
        assert!(matches!(result, Err(PromptError::Terminal(_))));
    }

    #[test]
    fn test_escape_maps_to_cancelled() {
        let result: Result<Prompted<usize>, _> = escapable(Ok(None));
        assert_eq!(result.unwrap(), Prompted::Cancelled);

        let result: Result<Prompted<usize>, _> = escapable(Ok(Some(2)));
        assert_eq!(result.unwrap(), Prompted::Answer(2));
    }

    #[test]
    fn test_answer_macro_short_circuits() {
        fn flow(first: Prompted<u32>) -> Result<Prompted<u32>, PromptError> {
            let value = answer!(first);
            Ok(Prompted::Answer(value + 1))
        }

        assert_eq!(flow(Prompted::Answer(1)).unwrap(), Prompted::Answer(2));
        assert_eq!(flow(Prompted::Cancelled).unwrap(), Prompted::Cancelled);
    }
}
