use clap::Parser;
use dsm_mesh::io::grid::{read_color_grid, read_height_grid};
use dsm_mesh::io::write_summary_json;
use dsm_mesh::{
    save_ply, write_ply, ColorGrid, GridMesh, HeightGrid, MeshOptions, PlyEncoding, Result,
};
use std::io::{BufWriter, Write};

/// Value of `--colors` that requests uniform white vertices.
const WHITE: &str = "WHITE";

/// Build a quad mesh in PLY format from a DSM raster.
///
/// The mesh is written to stdout unless `--output` is given.
#[derive(Parser)]
#[command(name = "dsm_mesh_cli", version)]
struct Cli {
    /// Height raster: TIFF, ESRI ASCII grid (.asc) or single band image
    heights: String,
    /// Grid cells per output unit; planar coordinates are divided by it
    #[arg(short = 'r', long, default_value_t = 1.0, allow_negative_numbers = true)]
    resolution: f32,
    /// Remove triangles with longer edges (not implemented, ignored)
    #[arg(
        short = 'f',
        long = "filter-long",
        default_value_t = f32::INFINITY,
        allow_negative_numbers = true
    )]
    filter_long: f32,
    /// Remove connected components with fewer vertices (not implemented, ignored)
    #[arg(
        short = 's',
        long = "filter-size",
        default_value_t = f32::INFINITY,
        allow_negative_numbers = true
    )]
    filter_size: f32,
    /// Registered color raster with the same size as the DSM (gray or RGB)
    #[arg(short = 'k', long = "registered-colors")]
    registered_colors: Option<String>,
    /// Georeferenced color image, or WHITE to color every vertex white
    #[arg(short = 'c', long)]
    colors: Option<String>,
    /// RPC model of the color image (not implemented, ignored)
    #[arg(short = 'l', long)]
    rpc: Option<String>,
    /// Change the orientation of the second axis (not implemented, ignored)
    #[arg(short = 'i', long)]
    flip: bool,
    /// Write the mesh to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<String>,
    /// Write binary little endian PLY instead of ASCII
    #[arg(long)]
    binary: bool,
    /// Write a JSON summary of the run to this file
    #[arg(long)]
    summary: Option<String>,
}

impl Cli {
    fn options(&self) -> MeshOptions {
        MeshOptions {
            resolution: self.resolution,
            max_edge_length: self.filter_long,
            min_component_size: self.filter_size,
            flip_orientation: self.flip,
        }
    }

    fn encoding(&self) -> PlyEncoding {
        if self.binary {
            PlyEncoding::BinaryLittleEndian
        } else {
            PlyEncoding::Ascii
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn load_colors(cli: &Cli, heights: &HeightGrid) -> Result<Option<ColorGrid>> {
    if let Some(path) = non_empty(&cli.rpc) {
        log::warn!("RPC model {} is not used", path);
    }
    if cli.colors.as_deref() == Some(WHITE) {
        return Ok(Some(ColorGrid::uniform_white(
            heights.width(),
            heights.height(),
        )));
    }
    if let Some(path) = non_empty(&cli.colors) {
        log::warn!(
            "colorization from georeferenced image {} is not implemented, ignoring it",
            path
        );
    }
    match non_empty(&cli.registered_colors) {
        Some(path) => Ok(Some(read_color_grid(path)?)),
        None => Ok(None),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options();
    options.validate()?;
    let heights = read_height_grid(&cli.heights)?;
    let colors = load_colors(cli, &heights)?;
    let mesh = GridMesh::build(&heights, colors.as_ref(), &options)?;

    let summary = match non_empty(&cli.output) {
        Some(path) => save_ply(&mesh, path, cli.encoding())?,
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let summary = write_ply(&mesh, &mut writer, cli.encoding())?;
            writer.flush()?;
            summary
        }
    };
    if let Some(path) = non_empty(&cli.summary) {
        write_summary_json(path, &summary)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
