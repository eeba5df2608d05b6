mod cli;
mod error;
mod services;
mod store;

use std::fs;

use canvas::grid::GridSize;
use canvas::palette::PaletteCatalog;
use canvas::progress::Scoring;
use canvas::theme::StaticEnvironment;
use canvas::viewport::Layout;
use clap::Parser;
use tracing::{Level, info};

use crate::cli::{Cli, Command, ImportArgs, RenderArgs, ResetArgs, SessionArgs, StatusArgs, SubmitArgs};
use crate::error::CliError;
use crate::services::session::{self, SessionOptions, Status};
use crate::services::{import, report};
use crate::store::FileStore;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    match cli.command {
        Command::Import(args) => run_import(&cli.store, args),
        Command::Render(args) => run_render(&cli.store, args),
        Command::Status(args) => run_status(&cli.store, args),
        Command::Palettes => {
            run_palettes();
            Ok(())
        }
        Command::Reset(args) => run_reset(&cli.store, args),
        Command::Submit(args) => run_submit(&cli.store, &cli.api_url, cli.token.as_deref(), args).await,
    }
}

fn options(args: &SessionArgs) -> SessionOptions {
    SessionOptions {
        level: args.level,
        scoring: if args.unadjusted { Scoring::Unadjusted } else { Scoring::ByLevel },
        ..SessionOptions::default()
    }
}

fn run_import(store_path: &std::path::Path, args: ImportArgs) -> Result<(), CliError> {
    let mime = import::mime_for(&args.image)
        .ok_or_else(|| CliError::UnsupportedImage(args.image.display().to_string()))?;
    let bytes = fs::read(&args.image).map_err(|e| CliError::io(&args.image, e))?;

    let mut opts = options(&args.session);
    opts.palette = args.palette;
    let size = args.size.map(GridSize::square).transpose()?;
    opts.grid_size = size;

    let store = FileStore::open(store_path)?;
    let mut core = session::open(Box::new(store), &args.session.activity, &opts)?;
    if let Some(size) = size {
        session::resize(&mut core, size, args.yes)?;
    }
    let imported = import::import(&mut core, mime, &bytes, args.yes)?;
    session::close(core)?;

    println!("imported {} cells, progress {}%", imported.painted, imported.adjusted_percent);
    Ok(())
}

fn run_render(store_path: &std::path::Path, args: RenderArgs) -> Result<(), CliError> {
    let env = StaticEnvironment { dark: false, viewport_width: args.viewport, dpr: args.dpr };
    let layout = match args.container {
        Some(width) => Layout::fit(width, &env),
        None => Layout::fixed(canvas::consts::MAX_DISPLAY_SIZE, args.dpr),
    };
    let opts = SessionOptions { theme: args.theme, env, layout, ..options(&args.session) };

    let store = FileStore::open(store_path)?;
    if !session::has_session(&store, &args.session.activity) {
        return Err(CliError::NoSession(args.session.activity));
    }
    let core = session::open(Box::new(store), &args.session.activity, &opts)?;
    let png = session::render_png(&core)?;
    fs::write(&args.out, &png).map_err(|e| CliError::io(&args.out, e))?;

    info!(out = %args.out.display(), bytes = png.len(), px = layout.backing_size, "rendered");
    println!("{}", args.out.display());
    Ok(())
}

fn run_status(store_path: &std::path::Path, args: StatusArgs) -> Result<(), CliError> {
    let store = FileStore::open(store_path)?;
    let core = session::open(Box::new(store), &args.session.activity, &options(&args.session))?;
    let status = Status::of(&core);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{status}");
    }
    Ok(())
}

fn run_palettes() {
    for entry in PaletteCatalog::builtin().entries() {
        let mood = entry.mood.unwrap_or("-");
        println!("{:<12} {:<10} {:<28} {}", entry.key, mood, entry.title, entry.colors.join(" "));
    }
}

fn run_reset(store_path: &std::path::Path, args: ResetArgs) -> Result<(), CliError> {
    if !args.yes {
        return Err(CliError::NotConfirmed(args.activity));
    }
    let store = FileStore::open(store_path)?;
    let mut core = session::open(Box::new(store), &args.activity, &SessionOptions::default())?;
    session::reset(&mut core);
    session::close(core)?;
    println!("reset {}", args.activity);
    Ok(())
}

async fn run_submit(
    store_path: &std::path::Path,
    api_url: &str,
    token: Option<&str>,
    args: SubmitArgs,
) -> Result<(), CliError> {
    let store = FileStore::open(store_path)?;
    if !session::has_session(&store, &args.session.activity) {
        return Err(CliError::NoSession(args.session.activity));
    }
    let core = session::open(Box::new(store), &args.session.activity, &options(&args.session))?;
    let completion = report::build(&core, args.mood_before, args.mood_after, args.notes)?;
    let response = report::submit(api_url, token, &completion).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
