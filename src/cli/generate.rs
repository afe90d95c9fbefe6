//! Generate command implementation

use clap::Args;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::archive::{generate, GenerationRequest};
use crate::catalog::Category;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, FavpackConfig};
use crate::models::DisplayMode;
use crate::validate::{validate_input_path, validate_output_dir, PathError};

use super::prompt::{run_prompts, Answers, PromptError, Prompted};
use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_PERMISSION_DENIED, EXIT_SUCCESS};

/// Message shown for any failure inside the generation pipeline
pub const GENERIC_FAILURE: &str = "Something went wrong while generating the favicons package.";

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Source image (.jpeg, .jpg, .png, .svg, .webp).
    /// Prompts for everything when omitted.
    pub input: Option<PathBuf>,

    /// Directory the archive is written to (created if missing)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Extra favicon category (repeatable)
    #[arg(short = 'c', long = "category", value_enum)]
    pub categories: Vec<Category>,

    /// PWA app name (enables manifest.json)
    #[arg(long)]
    pub pwa_name: Option<String>,

    /// PWA app description
    #[arg(long)]
    pub pwa_description: Option<String>,

    /// PWA display mode [default: standalone]
    #[arg(long, value_enum)]
    pub pwa_display: Option<DisplayMode>,

    /// PWA theme and background hex color [default: #ffffff]
    #[arg(long)]
    pub pwa_color: Option<String>,

    /// Skip PWA outputs even if configured
    #[arg(long, conflicts_with_all = ["pwa_name", "pwa_description", "pwa_display", "pwa_color"])]
    pub no_pwa: bool,

    /// Optimize the embedded SVG (vector sources only)
    #[arg(long, overrides_with = "no_optimize_svg")]
    pub optimize_svg: bool,

    /// Embed the SVG source unchanged
    #[arg(long, overrides_with = "optimize_svg")]
    pub no_optimize_svg: bool,

    /// Archive file name [default: favicons.zip]
    #[arg(long)]
    pub archive_name: Option<String>,

    /// Prompt for the remaining options
    #[arg(short, long)]
    pub interactive: bool,

    /// Path to favpack.toml (discovered automatically when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    fn overrides(&self) -> CliOverrides {
        let optimize_svg = if self.optimize_svg {
            Some(true)
        } else if self.no_optimize_svg {
            Some(false)
        } else {
            None
        };

        CliOverrides {
            output_dir: self.output.clone(),
            categories: (!self.categories.is_empty()).then(|| self.categories.clone()),
            optimize_svg,
            archive_name: self.archive_name.clone(),
            pwa_name: self.pwa_name.clone(),
            pwa_description: self.pwa_description.clone(),
            pwa_display: self.pwa_display,
            pwa_color: self.pwa_color.clone(),
            no_pwa: self.no_pwa,
        }
    }
}

/// Execute the generate command.
///
/// Returns [`Prompted::Cancelled`] when the user backs out of the
/// interactive flow.
pub fn run_generate(args: &GenerateArgs) -> Prompted<ExitCode> {
    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Prompted::Answer(ExitCode::from(EXIT_INVALID_ARGS));
        }
    };

    merge_cli_overrides(&mut config, &args.overrides());
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("Error: {}", error.message);
        }
        return Prompted::Answer(ExitCode::from(EXIT_INVALID_ARGS));
    }

    let request = match &args.input {
        Some(input) if !args.interactive => request_from_flags(input, &config),
        preset => {
            if !atty::is(atty::Stream::Stdin) {
                eprintln!("Error: no input image given and stdin is not a terminal");
                return Prompted::Answer(ExitCode::from(EXIT_INVALID_ARGS));
            }
            match run_prompts(&config, preset.as_deref()) {
                Ok(Prompted::Answer(answers)) => Ok(request_from_answers(answers, &config)),
                Ok(Prompted::Cancelled) => return Prompted::Cancelled,
                Err(e) => Err(prompt_failure(&e)),
            }
        }
    };

    match request {
        Ok(request) => Prompted::Answer(execute(&request)),
        Err(code) => Prompted::Answer(ExitCode::from(code)),
    }
}

fn request_from_flags(input: &Path, config: &FavpackConfig) -> Result<GenerationRequest, u8> {
    let input = validate_input_path(input).map_err(|e| path_failure(&e))?;

    let output_dir = config.output.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let output_dir = validate_output_dir(&output_dir).map_err(|e| path_failure(&e))?;

    let pwa = match &config.pwa {
        Some(section) => match section.to_pwa_config() {
            Ok(pwa) => Some(pwa),
            Err(e) => {
                eprintln!("Error: {}", e);
                return Err(EXIT_INVALID_ARGS);
            }
        },
        None => None,
    };

    Ok(GenerationRequest::new(input, output_dir)
        .with_categories(config.generate.categories.clone())
        .with_pwa(pwa)
        .with_optimize_svg(config.generate.optimize_svg)
        .with_archive_name(config.output.archive_name.clone()))
}

fn request_from_answers(answers: Answers, config: &FavpackConfig) -> GenerationRequest {
    GenerationRequest::new(answers.input, answers.output_dir)
        .with_categories(answers.categories)
        .with_pwa(answers.pwa)
        .with_optimize_svg(answers.optimize_svg)
        .with_archive_name(config.output.archive_name.clone())
}

/// Report a path failure and pick its exit code.
fn path_failure(error: &PathError) -> u8 {
    eprintln!("Error: {}", error);
    match error {
        PathError::PermissionDenied(_) => EXIT_PERMISSION_DENIED,
        PathError::CreateFailed { .. } => EXIT_ERROR,
        _ => EXIT_INVALID_ARGS,
    }
}

fn prompt_failure(error: &PromptError) -> u8 {
    match error {
        PromptError::Path(e) => path_failure(e),
        PromptError::Invalid(e) => {
            eprintln!("Error: {}", e);
            EXIT_INVALID_ARGS
        }
        PromptError::Terminal(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn execute(request: &GenerationRequest) -> ExitCode {
    match generate(request) {
        Ok(report) => {
            println!("Successfully generated {}", report.archive_path.display());
            for entry in &report.entries {
                println!("  {}", entry);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            tracing::error!(error = %e, "favicon generation failed");
            eprintln!("{}", GENERIC_FAILURE);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
