use anyhow::Result;
use clap::{Parser, Subcommand};
use francolino_studio::models::{Config, CreatePreset, EditPreset, Mode};
use francolino_studio::state::{Action, ImageSlot};
use francolino_studio::studio::Studio;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "francolino-studio")]
#[command(about = "Create and edit images with a Gemini image model")]
struct CliArgs {
    /// Directory the generated image is saved into (overrides STUDIO_OUTPUT_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new image from a prompt.
    Create {
        /// free, sticker, text (logo) or comic.
        #[arg(long, default_value = "free", value_parser = parse_create_preset)]
        preset: CreatePreset,

        prompt: String,
    },
    /// Edit one uploaded image, or merge two with the compose preset.
    Edit {
        /// add-remove, retouch, style or compose.
        #[arg(long, default_value = "add-remove", value_parser = parse_edit_preset)]
        preset: EditPreset,

        /// Image to edit (first image for compose).
        #[arg(long, value_name = "FILE")]
        image: PathBuf,

        /// Second image, used only by the compose preset.
        #[arg(long, value_name = "FILE")]
        second_image: Option<PathBuf>,

        #[arg(default_value = "")]
        prompt: String,
    },
}

fn parse_create_preset(input: &str) -> std::result::Result<CreatePreset, String> {
    input.parse()
}

fn parse_edit_preset(input: &str) -> std::result::Result<EditPreset, String> {
    input.parse()
}

async fn run(studio: &Studio, command: Command) -> francolino_studio::Result<PathBuf> {
    match command {
        Command::Create { preset, prompt } => {
            studio.dispatch(Action::SetMode(Mode::Create));
            studio.dispatch(Action::SetCreatePreset(preset));
            studio.dispatch(Action::SetPrompt(prompt));
        }
        Command::Edit {
            preset,
            image,
            second_image,
            prompt,
        } => {
            studio.dispatch(Action::SetMode(Mode::Edit));
            studio.dispatch(Action::SetEditPreset(preset));
            studio.dispatch(Action::SetPrompt(prompt));
            studio.upload_file(ImageSlot::Primary, &image).await?;
            if let Some(second) = second_image {
                studio.upload_file(ImageSlot::Secondary, &second).await?;
            }
        }
    }

    studio.generate().await?;
    studio.download().await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "francolino_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("{}", e.notification());
            std::process::exit(1);
        }
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir.to_string_lossy().into_owned();
    }

    let studio = Studio::from_config(&config);

    match run(&studio, args.command).await {
        Ok(path) => {
            info!("Image saved");
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            eprintln!("{}", e.notification());
            std::process::exit(1);
        }
    }
}
