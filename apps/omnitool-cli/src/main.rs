//! OmniTool command line
//!
//! Front-end over the engine: one document operation or one generation
//! task per invocation. Document results land in an output directory;
//! generated text goes to stdout. AI-backed commands read the Gemini
//! key from the `API_KEY` environment variable.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use image::RgbImage;
use omnitool_ai::{GenAiClient, GenerationTask};
use omnitool_document::{PageRenderer, TransformError};
use omnitool_engine::{read_input, write_outputs, Engine, Job, JobOutput, OperationKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "omnitool")]
#[command(about = "PDF transforms and AI generation tasks")]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a document operation over one or more input files
    Process {
        /// Operation id: merge, split, rotate, watermark, convert,
        /// pdf2jpg, remove, compress, protect, pdfa, ocr
        #[arg(short, long)]
        operation: String,

        /// Operation parameter (page ranges, degrees, stamp text, password)
        #[arg(short, long, default_value = "")]
        param: String,

        /// Directory results are written to
        #[arg(short = 'd', long, default_value = "out")]
        out_dir: PathBuf,

        /// Input files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Generate video content ideas for a topic
    Ideate { topic: String },

    /// Generate a hashtag strategy for a piece of content
    Hashtags { content: String },

    /// Generate code in the given language
    Code {
        prompt: String,
        #[arg(short, long, default_value = "Rust")]
        language: String,
    },

    /// Score a resume from a plain-text file
    AnalyzeCv { path: PathBuf },
}

/// Placeholder renderer: the CLI ships without a rasterization
/// backend, so pdf2jpg reports the gap instead of emitting blank pages.
struct NoRenderer;

impl PageRenderer for NoRenderer {
    fn render_page(
        &mut self,
        _pdf_bytes: &[u8],
        _page_number: u32,
        _scale: f32,
    ) -> Result<RgbImage, TransformError> {
        Err(TransformError::NotSupported(
            "no rasterization backend configured".into(),
        ))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key = std::env::var("API_KEY").unwrap_or_default();
    let ai = GenAiClient::new(api_key.clone()).context("building the HTTP client")?;
    let mut engine = Engine::new(ai, Box::new(NoRenderer));

    match args.command {
        Command::Process {
            operation,
            param,
            out_dir,
            inputs,
        } => {
            let Some(kind) = OperationKind::from_id(&operation) else {
                bail!("unknown operation '{}'", operation);
            };
            if kind == OperationKind::Ocr && api_key.is_empty() {
                bail!("ocr requires the API_KEY environment variable");
            }

            let mut job = Job::new(kind);
            let buffers = inputs
                .iter()
                .map(|p| read_input(p).with_context(|| format!("reading {}", p.display())))
                .collect::<Result<Vec<_>, _>>()?;
            job.select_files(buffers)?;
            job.process(&mut engine, &param).await?;

            let Some(result) = job.result() else {
                bail!("job finished without a result");
            };
            info!(
                input_bytes = result.metrics.input_size_bytes,
                output_bytes = result.metrics.output_size_bytes,
                pages = result.metrics.page_count,
                elapsed_ms = result.metrics.processing_time_ms,
                "job complete"
            );
            match &result.output {
                JobOutput::Files(files) => {
                    for path in write_outputs(&out_dir, files)? {
                        println!("{}", path.display());
                    }
                }
                JobOutput::Text(generated) => println!("{}", generated.content),
                JobOutput::Resume(report) => {
                    println!("{}", serde_json::to_string_pretty(report)?)
                }
            }
        }

        Command::Ideate { topic } => {
            print_generated(engine.generate(&GenerationTask::Ideation { topic }).await?)?
        }
        Command::Hashtags { content } => {
            print_generated(engine.generate(&GenerationTask::Tagging { content }).await?)?
        }
        Command::Code { prompt, language } => print_generated(
            engine
                .generate(&GenerationTask::CodeGen { prompt, language })
                .await?,
        )?,
        Command::AnalyzeCv { path } => {
            let cv_text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            print_generated(
                engine
                    .generate(&GenerationTask::ResumeAnalysis { cv_text })
                    .await?,
            )?
        }
    }

    Ok(())
}

fn print_generated(output: JobOutput) -> anyhow::Result<()> {
    match output {
        JobOutput::Text(generated) => println!("{}", generated.content),
        JobOutput::Resume(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        JobOutput::Files(_) => bail!("unexpected file output from a generation task"),
    }
    Ok(())
}
