use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use render_manager::{
    CommandReport, Document, EngineKind, ExrCodec, HostVersion, MoveDirection, RenderManager,
    pass_groups_for_engine, pass_sockets, resolve_socket_name,
};

#[derive(Parser, Debug)]
#[command(name = "render-manager", version)]
struct Cli {
    /// Log debug diagnostics to stderr (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rebuild the compositor tree of a scene.
    Build(DocArgs),
    /// Copy pass settings from one view layer to another.
    CopyPaste(CopyPasteArgs),
    /// Append a new view layer and make it active.
    AddLayer(DocArgs),
    /// Remove the active view layer.
    RemoveLayer(DocArgs),
    /// Move the active view layer up or down.
    MoveLayer(MoveLayerArgs),
    /// Make a view layer active.
    SwitchLayer(IndexArgs),
    /// Enable or disable a view layer for rendering.
    SetUse(SetUseArgs),
    /// Change EXR compression and update existing outputs.
    SetCompression(CompressionArgs),
    /// Print the pass groups an engine offers and their output socket names.
    Groups(GroupsArgs),
}

#[derive(Args, Debug)]
struct DocArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Where to write the updated document (defaults to the input).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Scene to operate on (defaults to the first scene).
    #[arg(long)]
    scene: Option<String>,
}

#[derive(Args, Debug)]
struct CopyPasteArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// Source layer index.
    #[arg(long)]
    from: usize,

    /// Target layer index.
    #[arg(long)]
    to: usize,
}

#[derive(Args, Debug)]
struct MoveLayerArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// Direction to move the active layer.
    #[arg(long, value_enum)]
    direction: DirectionChoice,
}

#[derive(Args, Debug)]
struct IndexArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// View layer index.
    #[arg(long)]
    index: usize,
}

#[derive(Args, Debug)]
struct GroupsArgs {
    /// Host engine identifier (e.g. CYCLES, BLENDER_EEVEE_NEXT).
    #[arg(long)]
    engine: String,

    /// Host version the socket names follow.
    #[arg(long, default_value_t = HostVersion::default())]
    host_version: HostVersion,
}

#[derive(Args, Debug)]
struct SetUseArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// View layer index.
    #[arg(long)]
    index: usize,

    /// Render-enable flag.
    #[arg(long, action = clap::ArgAction::Set)]
    value: bool,
}

#[derive(Args, Debug)]
struct CompressionArgs {
    #[command(flatten)]
    doc: DocArgs,

    /// Codec for color, noisy and combined outputs (e.g. DWAA, ZIP).
    #[arg(long)]
    beauty: Option<ExrCodec>,

    /// Codec for data and backup outputs.
    #[arg(long)]
    data: Option<ExrCodec>,

    /// Lossy compression level (0..=100).
    #[arg(long)]
    level: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Up,
    Down,
}

impl From<DirectionChoice> for MoveDirection {
    fn from(d: DirectionChoice) -> Self {
        match d {
            DirectionChoice::Up => Self::Up,
            DirectionChoice::Down => Self::Down,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let reports = match cli.cmd {
        Command::Build(args) => run(&args, |app, scene| vec![app.create_render_nodes(scene)])?,
        Command::CopyPaste(args) => run(&args.doc, |app, scene| {
            vec![
                app.copy_layer_settings(scene, args.from),
                app.paste_layer_settings(scene, args.to),
            ]
        })?,
        Command::AddLayer(args) => run(&args, |app, scene| vec![app.add_render_layer(scene)])?,
        Command::RemoveLayer(args) => {
            run(&args, |app, scene| vec![app.remove_render_layer(scene)])?
        }
        Command::MoveLayer(args) => run(&args.doc, |app, scene| {
            vec![app.reorder_view_layer(scene, args.direction.into())]
        })?,
        Command::SwitchLayer(args) => {
            run(&args.doc, |app, scene| vec![app.switch_layer(scene, args.index)])?
        }
        Command::SetUse(args) => run(&args.doc, |app, scene| {
            vec![app.set_layer_use(scene, args.index, args.value)]
        })?,
        Command::SetCompression(args) => run(&args.doc, |app, scene| {
            let mut reports = Vec::new();
            if let Some(codec) = args.beauty {
                reports.push(app.set_beauty_compression(scene, codec));
            }
            if let Some(codec) = args.data {
                reports.push(app.set_data_compression(scene, codec));
            }
            if let Some(level) = args.level {
                reports.push(app.set_compression_level(scene, level));
            }
            reports
        })?,
        Command::Groups(args) => return print_groups(&args),
    };

    let mut ok = true;
    for report in &reports {
        eprintln!("{}: {}", report.status, report.message);
        ok &= report.is_finished();
    }
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "render_manager=debug" } else { "render_manager=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_document(path: &Path) -> anyhow::Result<Document> {
    let mut doc = Document::from_path(path)
        .with_context(|| format!("read document '{}'", path.display()))?;
    // A document read from disk counts as saved unless it records its own location.
    if doc.filepath.is_none() {
        doc.filepath = Some(path.to_path_buf());
    }
    Ok(doc)
}

fn scene_name(doc: &Document, requested: Option<&str>) -> anyhow::Result<String> {
    match requested {
        Some(name) => Ok(name.to_string()),
        None => doc
            .scenes
            .first()
            .map(|s| s.name.clone())
            .context("document has no scenes"),
    }
}

fn run(
    args: &DocArgs,
    f: impl FnOnce(&mut RenderManager, &str) -> Vec<CommandReport>,
) -> anyhow::Result<Vec<CommandReport>> {
    let doc = read_document(&args.in_path)?;
    let scene = scene_name(&doc, args.scene.as_deref())?;
    let mut app = RenderManager::new(doc);
    let reports = f(&mut app, &scene);

    let out = args.out.as_deref().unwrap_or(&args.in_path);
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    app.document()
        .write_path(out)
        .with_context(|| format!("write document '{}'", out.display()))?;
    Ok(reports)
}

fn print_groups(args: &GroupsArgs) -> anyhow::Result<ExitCode> {
    let groups = pass_groups_for_engine(&args.engine);
    if groups.is_empty() {
        eprintln!("engine '{}' has no render passes to manage", args.engine);
        return Ok(ExitCode::SUCCESS);
    }
    let generation = args.host_version.generation();
    for group in groups {
        println!("{}", group.label());
        for pass in group.passes {
            let sockets: Vec<&str> = EngineKind::from_engine_id(&args.engine)
                .map(|engine| {
                    pass_sockets(pass.id)
                        .iter()
                        .filter_map(|s| resolve_socket_name(*s, engine, generation))
                        .collect()
                })
                .unwrap_or_default();
            if sockets.is_empty() {
                println!("  {}", pass.label);
            } else {
                println!("  {} -> {}", pass.label, sockets.join(", "));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
