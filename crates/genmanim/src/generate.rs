use crate::prelude::{eprintln, println, *};
use crate::workflow::Session;
use colored::Colorize;
use genmanim_core::export::{export_generated_code, ExportedFile};
use genmanim_core::models::CodeModel;
use genmanim_core::workbench::WorkbenchState;
use serde::Serialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, clap::Args, Clone)]
pub struct GenerateOptions {
    /// Description of the animation (e.g., "Draw a red circle and transform it into a square")
    #[clap(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub prompt: String,

    /// Code generation model
    #[arg(short, long, env = "GENMANIM_MODEL", default_value = "gpt-4o")]
    pub model: CodeModel,

    /// Output as JSON
    #[arg(long, conflicts_with = "download")]
    pub json: bool,

    /// Save the code to a file named after the prompt instead of printing it
    #[arg(short, long)]
    pub download: bool,

    /// Directory the downloaded file is written to
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Debug, Serialize)]
struct GenerateOutput<'a> {
    prompt: &'a str,
    model: CodeModel,
    filename: &'a str,
    code: &'a str,
}

pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Model: {} ({})", options.model.label(), options.model);
    }

    let mut session = Session::new(
        global.orchestrator(),
        WorkbenchState::new(options.prompt.clone(), options.model),
    );
    session.submit_generation().await;

    if !session.state().can_export() {
        return Err(eyre!("No code was generated for: {}", options.prompt));
    }
    let state = session.into_state();

    let file = export_generated_code(&state.prompt, &state.generated_code)
        .ok_or_else(|| eyre!("Nothing to export"))?;

    if options.download {
        let path = save_export(&options.dir, &file)?;
        eprintln!("{} {}", "Saved".green().bold(), path.display());
    } else if options.json {
        let output = GenerateOutput {
            prompt: &state.prompt,
            model: state.model,
            filename: &file.filename,
            code: &file.content,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        anstream::print!("{}", file.content);
    }

    Ok(())
}

/// Write the exported code into `dir`, returning the full path
///
/// The filename must be a single plain path component so the file always
/// lands directly inside `dir`.
pub fn save_export(dir: &Path, file: &ExportedFile) -> Result<PathBuf> {
    let mut components = Path::new(&file.filename).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(eyre!(
            "Refusing to save to '{}': the prompt produces a path, not a file name",
            file.filename
        ));
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    let path = dir.join(&file.filename);
    fs::write(&path, &file.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}
