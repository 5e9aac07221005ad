use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vigil::config::Config;
use vigil::llm::prompts::{TemplateStyle, DEFAULT_SYSTEM_PROMPT};
use vigil::llm::{BackendKind, LlmProvider};

#[derive(Parser)]
#[command(name = "vigil")]
#[command(about = "Turn exported project activity into an LLM-written progress report")]
struct Args {
    /// Exported activity file to report on (markdown or plain text)
    input: Option<PathBuf>,

    /// Instructional system prompt (defaults to the built-in analyst prompt)
    #[arg(long)]
    prompt: Option<String>,

    /// Read the system prompt from a file instead
    #[arg(long, conflicts_with = "prompt")]
    prompt_file: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the models each backend is known to serve, then exit
    #[arg(long)]
    list_models: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vigil=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if args.list_models {
        for kind in [BackendKind::OpenAi, BackendKind::Ollama] {
            println!("{kind}:");
            for model in kind.known_models() {
                println!("  {model}");
            }
        }
        return Ok(());
    }

    let input = args
        .input
        .ok_or_else(|| anyhow::anyhow!("an input file is required (or pass --list-models)"))?;

    let config = Config::from_env();
    let template: TemplateStyle = config.report.template.parse()?;
    let provider = LlmProvider::new(&config.llm, template)?;

    let system_prompt = match (&args.prompt, &args.prompt_file) {
        (Some(prompt), _) => prompt.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => DEFAULT_SYSTEM_PROMPT.to_string(),
    };

    let user_content = fs::read_to_string(&input)?;
    let report = provider
        .generate_report(&system_prompt, &user_content)
        .await?;

    match &args.output {
        Some(path) => {
            fs::write(path, &report)?;
            tracing::info!(output = %path.display(), "Report written");
        }
        None => println!("{report}"),
    }

    Ok(())
}
