use crate::prelude::{eprintln, println, *};
use crate::workflow::Session;
use colored::Colorize;
use genmanim_core::models::CodeModel;
use genmanim_core::workbench::WorkbenchState;
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct VideoOptions {
    /// Description of the animation (e.g., "Draw a red circle and transform it into a square")
    #[clap(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub prompt: String,

    /// Code generation model
    #[arg(short, long, env = "GENMANIM_MODEL", default_value = "gpt-4o")]
    pub model: CodeModel,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the generated code below the summary
    #[arg(long)]
    pub show_code: bool,
}

#[derive(Debug, Serialize)]
pub struct VideoOutput {
    pub prompt: String,
    pub model: CodeModel,
    pub code: String,
    pub video_url: Option<String>,
}

impl From<WorkbenchState> for VideoOutput {
    fn from(state: WorkbenchState) -> Self {
        Self {
            prompt: state.prompt,
            model: state.model,
            code: state.render_code,
            video_url: state.video_url,
        }
    }
}

pub async fn run(options: VideoOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Model: {} ({})", options.model.label(), options.model);
    }

    let mut session = Session::new(
        global.orchestrator(),
        WorkbenchState::new(options.prompt.clone(), options.model),
    );
    session.submit_pipeline().await;
    let output = VideoOutput::from(session.into_state());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&output, options.show_code);
    }

    if output.video_url.is_none() {
        return Err(eyre!("No video was produced for: {}", output.prompt));
    }

    Ok(())
}

fn print_summary(output: &VideoOutput, show_code: bool) {
    let mut table = new_table();
    table.add_row(prettytable::row!["Prompt", output.prompt]);
    table.add_row(prettytable::row!["Model", output.model.label()]);
    table.add_row(prettytable::row![
        "Code",
        format!("{} lines", output.code.lines().count())
    ]);

    let video = match &output.video_url {
        Some(url) => url.green().to_string(),
        None => "none".red().to_string(),
    };
    table.add_row(prettytable::row!["Video", video]);

    table.printstd();

    if show_code && !output.code.is_empty() {
        println!();
        println!("{}", output.code);
    }
}
