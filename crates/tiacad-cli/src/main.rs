use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use tiacad_doc::{compile_document, parse_document, validate_document, BuildError, BuildOutput};
use tiacad_export::{export_3mf, export_obj, export_step, export_stl, validate_mesh, ExportPart, Quality};
use tiacad_geom::{GeometryBackend, TruckBackend};
use tiacad_ops::FontRegistry;

/// TiaCAD — a compiler for YAML parametric 3D model documents.
#[derive(Parser)]
#[command(name = "tiacad", version, about)]
struct Cli {
    /// Increase log verbosity; repeat for more detail (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a document and export its parts.
    Build {
        /// Path to the document's YAML source.
        file: PathBuf,
        /// Export a single file here, its format inferred from the
        /// extension (.stl, .3mf, .step/.stp, .obj). Overrides the
        /// document's own `export.formats` list.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse and resolve parameters/references without building geometry.
    Validate {
        file: PathBuf,
    },
    /// Build geometry and run mesh validity checks without exporting.
    ValidateGeometry {
        file: PathBuf,
    },
    /// Report part count, names, bounding boxes, and material usage.
    Info {
        file: PathBuf,
        #[arg(long, value_enum, default_value_t = InfoFormat::Text)]
        format: InfoFormat,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum InfoFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Build { file, output } => build(file, output.as_deref()),
        Command::Validate { file } => validate(file),
        Command::ValidateGeometry { file } => validate_geometry(file),
        Command::Info { file, format } => info(file, *format),
    };

    // Exit codes per §6.3: 0 success, 1 validation/build error. 130
    // (interrupted) is the shell's own report of an unhandled SIGINT; this
    // binary installs no signal handler, so that code is never produced here.
    if let Err(msg) = result {
        eprintln!("{msg}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "off",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}

fn read_source(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("error: cannot read '{}': {e}", path.display()))
}

fn format_build_error(err: &BuildError, path: &Path) -> String {
    format!("error: {err} (in {})", path.display())
}

fn load_document(path: &Path) -> Result<tiacad_doc::RawDocument, String> {
    let source = read_source(path)?;
    parse_document(&source).map_err(|e| format_build_error(&e, path))
}

fn compile(path: &Path) -> Result<BuildOutput<TruckBackend>, String> {
    let doc = load_document(path)?;
    log::debug!("compiling '{}' ({} part(s))", path.display(), doc.parts.len());
    let backend = TruckBackend;
    let fonts = FontRegistry::new(Vec::new(), None);
    compile_document(&doc, backend, &fonts).map_err(|e| format_build_error(&e, path))
}

fn print_diagnostics(output: &BuildOutput<TruckBackend>) {
    for warning in output.diagnostics.warnings() {
        eprintln!("warning: {warning}");
    }
}

/// `validate`: parse and resolve parameters/colors/materials, no geometry.
fn validate(path: &Path) -> Result<(), String> {
    let doc = load_document(path)?;
    log::info!("validating '{}'", path.display());
    let diagnostics = validate_document(&doc).map_err(|e| format_build_error(&e, path))?;
    for warning in diagnostics.warnings() {
        eprintln!("warning: {warning}");
    }
    println!("ok: {}", path.display());
    Ok(())
}

/// `validate-geometry`: build geometry and run mesh validity checks, no export.
fn validate_geometry(path: &Path) -> Result<(), String> {
    let output = compile(path)?;
    print_diagnostics(&output);

    let tolerance = Quality::Standard.tolerance();
    let mut clean = true;
    for name in output.registry.names() {
        let part = output.registry.get(name).map_err(|e| format!("error: {e}"))?;
        let mesh = output.backend.tessellate(&part.solid, tolerance);
        let report = validate_mesh(&mesh);
        if report.is_ok() {
            println!(
                "ok: part '{name}' ({} vertices, {} triangles)",
                report.position_count, report.triangle_count
            );
        } else {
            clean = false;
            for warning in &report.warnings {
                eprintln!("warning: part '{name}': {warning}");
            }
        }
    }

    if !clean {
        return Err(format!("error[Backend]: one or more parts failed mesh validation (in {})", path.display()));
    }
    log::info!("all parts passed mesh validation");
    Ok(())
}

/// `info`: part count, names, bounding boxes, material usage.
fn info(path: &Path, format: InfoFormat) -> Result<(), String> {
    let output = compile(path)?;
    print_diagnostics(&output);

    let mut parts = Vec::new();
    for name in output.registry.names() {
        let part = output.registry.get(name).map_err(|e| format!("error: {e}"))?;
        let bbox = output
            .backend
            .bounding_box(&part.solid)
            .map_err(|e| format!("error[Backend]: {e} (in {})", path.display()))?;
        let material = part.metadata.appearance.material.map(|m| {
            let [r, g, b, a] = m.base_color.as_rgba_bytes();
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        });
        parts.push((name.to_string(), bbox, material));
    }

    match format {
        InfoFormat::Text => {
            println!("{}: {} part(s)", path.display(), parts.len());
            println!("default part: {}", output.default_part);
            for (name, bbox, material) in &parts {
                let size = bbox.size();
                print!("  {name}: bbox [{:.3} {:.3} {:.3}]", size.x, size.y, size.z);
                match material {
                    Some(color) => println!(", material {color}"),
                    None => println!(", no material"),
                }
            }
        }
        InfoFormat::Json => {
            let parts_json: Vec<serde_json::Value> = parts
                .iter()
                .map(|(name, bbox, material)| {
                    serde_json::json!({
                        "name": name,
                        "bounding_box": {
                            "min": [bbox.min.x, bbox.min.y, bbox.min.z],
                            "max": [bbox.max.x, bbox.max.y, bbox.max.z],
                        },
                        "material": material,
                    })
                })
                .collect();
            let doc_json = serde_json::json!({
                "default_part": output.default_part,
                "part_count": parts.len(),
                "parts": parts_json,
            });
            println!("{}", serde_json::to_string_pretty(&doc_json).expect("JSON serialization cannot fail"));
        }
    }
    Ok(())
}

/// `build`: compile and export. `output` overrides the document's own
/// `export.formats` list with a single file whose format is inferred from
/// its extension; otherwise every entry in `export.formats` is written.
fn build(path: &Path, output_override: Option<&Path>) -> Result<(), String> {
    let doc = load_document(path)?;
    let built = compile(path)?;
    print_diagnostics(&built);

    let all_parts = collect_export_parts(&built)?;
    let default_solid = &built
        .registry
        .get(&built.default_part)
        .map_err(|e| format!("error: {e}"))?
        .solid;

    if let Some(out) = output_override {
        log::info!("exporting override target {}", out.display());
        write_by_extension(&built.backend, &all_parts, default_solid, out, Quality::Standard.tolerance())?;
        println!("wrote {}", out.display());
        return Ok(());
    }

    if doc.export.formats.is_empty() {
        println!("compiled {} part(s); no export.formats entries and no -o given", all_parts.len());
        return Ok(());
    }

    log::info!("exporting {} format(s) from '{}'", doc.export.formats.len(), path.display());
    for format in &doc.export.formats {
        write_format(&built.backend, &all_parts, default_solid, format)?;
    }
    Ok(())
}

fn collect_export_parts(built: &BuildOutput<TruckBackend>) -> Result<Vec<(String, tiacad_geom::Solid, tiacad_registry::Appearance)>, String> {
    let mut parts = Vec::new();
    for name in built.registry.names() {
        let part = built.registry.get(name).map_err(|e| format!("error: {e}"))?;
        parts.push((name.to_string(), part.solid.clone(), part.metadata.appearance));
    }
    Ok(parts)
}

fn as_export_parts(parts: &[(String, tiacad_geom::Solid, tiacad_registry::Appearance)]) -> Vec<ExportPart<'_>> {
    parts
        .iter()
        .map(|(name, solid, appearance)| ExportPart { name, solid, appearance })
        .collect()
}

fn write_by_extension(
    backend: &TruckBackend,
    all_parts: &[(String, tiacad_geom::Solid, tiacad_registry::Appearance)],
    default_solid: &tiacad_geom::Solid,
    path: &Path,
    tolerance: f64,
) -> Result<(), String> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_lowercase();
    match ext.as_str() {
        "stl" => export_stl(backend, default_solid, path, tolerance).map_err(|e| e.to_string()),
        "3mf" => export_3mf(backend, &as_export_parts(all_parts), path, tolerance).map_err(|e| e.to_string()),
        "step" | "stp" => export_step(backend, &as_export_parts(all_parts), path, tolerance).map_err(|e| e.to_string()),
        "obj" => export_obj(backend, &as_export_parts(all_parts), path, tolerance, true).map_err(|e| e.to_string()),
        other => Err(format!("error: unrecognized output extension '{other}' (expected stl, 3mf, step, or obj)")),
    }
}

fn write_format(
    backend: &TruckBackend,
    all_parts: &[(String, tiacad_geom::Solid, tiacad_registry::Appearance)],
    default_solid: &tiacad_geom::Solid,
    format: &tiacad_doc::model::RawExportFormat,
) -> Result<(), String> {
    use tiacad_doc::model::RawExportFormat;
    match format {
        RawExportFormat::Stl { path, tolerance } => {
            let path = Path::new(path);
            export_stl(backend, default_solid, path, tolerance.unwrap_or_else(|| Quality::Standard.tolerance()))
                .map_err(|e| e.to_string())?;
            println!("wrote {}", path.display());
        }
        RawExportFormat::ThreeMf { path, tolerance } => {
            let path = Path::new(path);
            export_3mf(backend, &as_export_parts(all_parts), path, tolerance.unwrap_or_else(|| Quality::Standard.tolerance()))
                .map_err(|e| e.to_string())?;
            println!("wrote {}", path.display());
        }
        RawExportFormat::Step { path } => {
            let path = Path::new(path);
            export_step(backend, &as_export_parts(all_parts), path, Quality::Standard.tolerance())
                .map_err(|e| e.to_string())?;
            println!("wrote {}", path.display());
        }
        RawExportFormat::Obj { path, tolerance, mtl } => {
            let path = Path::new(path);
            export_obj(
                backend,
                &as_export_parts(all_parts),
                path,
                tolerance.unwrap_or_else(|| Quality::Standard.tolerance()),
                *mtl,
            )
            .map_err(|e| e.to_string())?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}
