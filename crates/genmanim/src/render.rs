use crate::prelude::{eprintln, println, *};
use crate::workflow::Session;
use genmanim_core::workbench::{Action, WorkbenchState};
use std::path::{Path, PathBuf};

#[derive(Debug, clap::Args, Clone)]
pub struct RenderOptions {
    /// File with the animation source code. Reads stdin when omitted or "-"
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: RenderOptions, global: crate::Global) -> Result<()> {
    let code = read_source(options.file.as_deref()).await?;

    if global.verbose {
        eprintln!("Rendering {} bytes of code", code.len());
    }

    let mut session = Session::new(global.orchestrator(), WorkbenchState::default());
    session.dispatch(Action::EditRenderCode(code));
    session.submit_render().await;

    let video_url = session
        .into_state()
        .video_url
        .ok_or_else(|| eyre!("Rendering produced no video"))?;

    if options.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "video_url": video_url }))?
        );
    } else {
        println!("{}", video_url);
    }

    Ok(())
}

/// Read source code from a file, or from stdin for `None` and `-`
///
/// The text is returned exactly as read.
pub async fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file '{}'", path.display())),
        _ => tokio::task::spawn_blocking(|| std::io::read_to_string(std::io::stdin()))
            .await?
            .context("Failed to read code from stdin"),
    }
}
