use crate::prelude::{eprintln, *};
use clap::Parser;

mod client;
mod error;
mod generate;
mod mcp;
mod prelude;
mod render;
mod video;
mod workflow;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Generate Manim animation code from prompts and render it into videos"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the code generation and video rendering services
    #[clap(
        long,
        env = "GENMANIM_API_URL",
        global = true,
        default_value = client::DEFAULT_API_URL
    )]
    api_url: String,

    /// Whether to display additional information.
    #[clap(long, env = "GENMANIM_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

impl Global {
    pub fn orchestrator(&self) -> workflow::Orchestrator {
        if self.verbose {
            eprintln!("Services: {}", self.api_url);
        }

        let config = client::ServiceConfig::new(self.api_url.clone());
        workflow::Orchestrator::new(client::ServiceClient::new(config))
    }
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate animation code from a prompt
    Generate(crate::generate::GenerateOptions),

    /// Render animation code into a video
    Render(crate::render::RenderOptions),

    /// Generate code from a prompt, then render it
    Video(crate::video::VideoOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Generate(options) => crate::generate::run(options, app.global).await,
        SubCommands::Render(options) => crate::render::run(options, app.global).await,
        SubCommands::Video(options) => crate::video::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
}
