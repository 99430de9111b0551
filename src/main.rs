//! Concept Studio command line: generate a concept, copy or archive it, and
//! browse the archive, against the same backend the web pages use.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use concept_studio_lib::{
    api::HttpBackend,
    clipboard::{Mirrored, Osc52Clipboard, SystemClipboard},
    config::Settings,
    controller::{
        archive::{EMPTY_MESSAGE, NO_IMAGE_LABEL},
        generator::GenerateOutcome,
        ArchiveController, GeneratorController,
    },
    logging,
    render::TextRenderer,
    view::Notifier,
};

#[derive(Parser)]
#[command(name = "concept-studio")]
#[command(version)]
#[command(about = "Generate, copy and archive concepts")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "CONCEPT_STUDIO_API_URL")]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a concept from a prompt
    Generate {
        /// Prompt text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        /// Copy the description to the clipboard
        #[arg(long)]
        copy: bool,

        /// Save the result to the archive
        #[arg(long)]
        save: bool,

        /// Print the rendered page regions instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// List archived concepts
    Archive {
        /// Print the rendered card grid instead of a table
        #[arg(long)]
        html: bool,
    },

    /// Open the desktop window
    #[cfg(feature = "desktop")]
    Desktop,
}

/// Notices go to stderr so stdout stays pipeable.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

fn main() -> Result<()> {
    // Load .env before clap reads env-backed args.
    let env_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if !env_loaded {
        tracing::debug!(".env not loaded; using process environment");
    }

    let mut settings = Settings::from_env()?;
    if let Some(url) = cli.api_url {
        settings.api_url = url;
    }

    if is_desktop(&cli.command) {
        return open_desktop(settings);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(run_command(cli.command, settings))
}

#[cfg(feature = "desktop")]
fn is_desktop(command: &Commands) -> bool {
    matches!(command, Commands::Desktop)
}

#[cfg(not(feature = "desktop"))]
fn is_desktop(_command: &Commands) -> bool {
    false
}

#[cfg(feature = "desktop")]
fn open_desktop(settings: Settings) -> Result<()> {
    concept_studio_lib::run_with(settings).map_err(|e| anyhow::anyhow!(e.to_string()))
}

#[cfg(not(feature = "desktop"))]
fn open_desktop(_settings: Settings) -> Result<()> {
    bail!("built without the `desktop` feature")
}

async fn run_command(command: Commands, settings: Settings) -> Result<()> {
    let backend = HttpBackend::from_settings(&settings)?;
    let renderer = TextRenderer::detect(settings.prefer_markdown);
    tracing::debug!(api_url = backend.base_url(), ?renderer, "Using backend");

    match command {
        Commands::Generate {
            prompt,
            copy,
            save,
            html,
        } => {
            let prompt = prompt.join(" ");
            let mut gen = GeneratorController::new(renderer, settings.on_failure);
            run_generate(&mut gen, &backend, &prompt, copy, save, html).await
        }
        Commands::Archive { html } => {
            let mut archive = ArchiveController::new(renderer);
            run_archive(&mut archive, &backend, html).await
        }
        #[cfg(feature = "desktop")]
        Commands::Desktop => unreachable!("desktop is opened before the runtime starts"),
    }
}

async fn run_generate(
    gen: &mut GeneratorController,
    backend: &HttpBackend,
    prompt: &str,
    copy: bool,
    save: bool,
    html: bool,
) -> Result<()> {
    let mut notifier = ConsoleNotifier;

    if gen.generate(backend, prompt, &mut notifier).await == GenerateOutcome::Rejected {
        bail!("empty prompt");
    }

    let view = gen.view();
    if html {
        println!("{}", view.detail.html());
        println!("{}", view.visualizations.html());
    }
    if let Some(error) = &view.error {
        bail!("Error: {}", error);
    }
    if !html {
        if let Some(concept) = gen.current() {
            println!("{}", concept.flowise_response);
            if !concept.gemini_image_urls.is_empty() {
                println!();
                for url in &concept.gemini_image_urls {
                    println!("{}", url);
                }
            }
        }
    }

    if copy {
        // The process exits next, taking an X11/Wayland selection with it.
        let mut clipboard = Mirrored::new(SystemClipboard::new(), Osc52Clipboard::stderr());
        gen.copy_text(&mut clipboard, None, &mut notifier);
    }
    if save {
        gen.save_to_archive(backend, &mut notifier).await;
    }
    Ok(())
}

async fn run_archive(archive: &mut ArchiveController, backend: &HttpBackend, html: bool) -> Result<()> {
    archive.load(backend).await;
    let view = archive.view();

    if html {
        println!("{}", view.grid.html());
        return Ok(());
    }
    if let Some(error) = &view.error {
        bail!("Error loading archive: {}", error);
    }
    if view.cards.is_empty() {
        println!("{}", EMPTY_MESSAGE);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Archived").add_attribute(Attribute::Bold),
            Cell::new("Prompt").add_attribute(Attribute::Bold),
            Cell::new("Image").add_attribute(Attribute::Bold),
        ]);
    for card in &view.cards {
        table.add_row(vec![
            Cell::new(&card.archived_at),
            Cell::new(&card.prompt),
            Cell::new(card.image_url.as_deref().unwrap_or(NO_IMAGE_LABEL)),
        ]);
    }
    println!("{table}");
    Ok(())
}
