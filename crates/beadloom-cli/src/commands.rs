//! Subcommand handlers.

use beadloom_core::grid::count_colors;
use beadloom_core::storage::{AutoSaveManager, FileStorage, Storage, StorageError};
use beadloom_core::{
    BeadColor, BeadPalette, BeadPattern, Clipboard, EditorConfig, EditorSession, PatternGroup,
    PegboardShape, Project, Rgb, ShapeKind, Store, StoreEvent, is_cell_in_shape,
};
use beadloom_import::{
    ConvertError, ConversionOptions, Dithering, FilterType, convert_in_background,
    load_raster_with_limit,
};
use clap::{Args, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Pattern not found: {0}")]
    PatternNotFound(String),
    #[error("{0}")]
    Invalid(String),
}

pub type CliResult<T> = Result<T, CliError>;

fn read_file(path: &Path) -> CliResult<Vec<u8>> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: for<'de> Deserialize<'de>>(path: &Path) -> CliResult<T> {
    let bytes = read_file(path)?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Shared state for one invocation.
pub struct Context {
    storage: Arc<FileStorage>,
    config: EditorConfig,
}

impl Context {
    pub fn open(storage_dir: Option<PathBuf>, config: Option<&Path>) -> CliResult<Self> {
        let storage = match storage_dir {
            Some(dir) => FileStorage::new(dir)?,
            None => FileStorage::default_location()?,
        };
        let config = match config {
            Some(path) => parse_json(path)?,
            None => EditorConfig::default(),
        };
        log::debug!("Using storage at {}", storage.base_path().display());
        Ok(Self {
            storage: Arc::new(storage),
            config,
        })
    }

    fn load_project(&self, id: &str) -> CliResult<Project> {
        Ok(pollster::block_on(self.storage.load(id))?)
    }

    fn load_or_create(&self, id: &str) -> CliResult<Project> {
        match pollster::block_on(self.storage.load(id)) {
            Ok(project) => Ok(project),
            Err(StorageError::NotFound(_)) => {
                log::info!("Creating project {}", id);
                Ok(Project::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Open a store over a project, logging each change.
    fn open_store(&self, project: Project) -> Store {
        let mut store = Store::new(project);
        store.subscribe(|event: &StoreEvent, _| log::debug!("Store event: {:?}", event));
        store
    }

    fn save(&self, id: &str, store: &Store) -> CliResult<()> {
        let mut manager = AutoSaveManager::with_config(Arc::clone(&self.storage), &self.config);
        manager.set_project_id(Some(id.to_string()));
        manager.mark_dirty();
        pollster::block_on(manager.save(&store.snapshot()))?;
        Ok(())
    }

    fn check_dimensions(&self, cols: usize, rows: usize) -> CliResult<()> {
        if self.config.accepts_dimensions(cols, rows) {
            Ok(())
        } else {
            Err(CliError::Invalid(format!(
                "Grid {}x{} must be between 1 and {} cells per side",
                cols, rows, self.config.max_grid_dimension
            )))
        }
    }

    pub fn list(&self) -> CliResult<()> {
        let manager = AutoSaveManager::new(Arc::clone(&self.storage));
        let mut ids = pollster::block_on(manager.list_projects())?;
        ids.sort();
        if ids.is_empty() {
            println!("No saved projects in {}", self.storage.base_path().display());
        }
        for id in ids {
            println!("{}", id);
        }
        Ok(())
    }
}

// --- Palettes ---

/// Palette file format: colors given as hex strings.
#[derive(Debug, Deserialize)]
struct PaletteFile {
    id: String,
    name: String,
    #[serde(default)]
    brand: Option<String>,
    colors: Vec<PaletteFileColor>,
}

#[derive(Debug, Deserialize)]
struct PaletteFileColor {
    id: String,
    name: String,
    hex: String,
}

impl PaletteFile {
    fn into_palette(self) -> CliResult<BeadPalette> {
        let colors = self
            .colors
            .into_iter()
            .map(|c| {
                let rgb = Rgb::from_hex(&c.hex).ok_or_else(|| {
                    CliError::Invalid(format!("Color {} has invalid hex {:?}", c.id, c.hex))
                })?;
                Ok(BeadColor::new(c.id, c.name, rgb))
            })
            .collect::<CliResult<Vec<_>>>()?;
        let palette = BeadPalette::new(self.id, self.name, colors);
        Ok(match self.brand {
            Some(brand) => palette.with_brand(brand),
            None => palette,
        })
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PaletteArgs {
    /// Palette JSON file; it is added to the project
    #[arg(long, value_name = "FILE")]
    palette: Option<PathBuf>,

    /// Id of a palette already in the project
    #[arg(long, value_name = "ID", conflicts_with = "palette")]
    palette_id: Option<String>,
}

impl PaletteArgs {
    /// Pick the palette to use, registering file palettes with the store.
    fn resolve(&self, store: &mut Store) -> CliResult<BeadPalette> {
        if let Some(path) = &self.palette {
            let palette = parse_json::<PaletteFile>(path)?.into_palette()?;
            store.upsert_palette(palette.clone());
            return Ok(palette);
        }
        let project = store.project();
        let palette = match &self.palette_id {
            Some(id) => project.palette(id),
            None if project.palettes.len() == 1 => project.palettes.values().next().map(Arc::as_ref),
            None => None,
        };
        palette
            .cloned()
            .ok_or_else(|| CliError::Invalid("Pass --palette or a known --palette-id".to_string()))
    }
}

// --- Shapes ---

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShapeArg {
    Square,
    #[default]
    Rectangle,
    Circle,
    Hexagon,
    Heart,
    Star,
}

impl From<ShapeArg> for ShapeKind {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Square => ShapeKind::Square,
            ShapeArg::Rectangle => ShapeKind::Rectangle,
            ShapeArg::Circle => ShapeKind::Circle,
            ShapeArg::Hexagon => ShapeKind::Hexagon,
            ShapeArg::Heart => ShapeKind::Heart,
            ShapeArg::Star => ShapeKind::Star,
        }
    }
}

// --- show ---

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project id; the last saved project when omitted
    project: Option<String>,

    /// Print the whole project as JSON
    #[arg(long)]
    json: bool,
}

impl ShowArgs {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let project = match &self.project {
            Some(id) => ctx.load_project(id)?,
            None => {
                let mut manager = AutoSaveManager::new(Arc::clone(&ctx.storage));
                pollster::block_on(manager.load_last())
                    .ok_or_else(|| CliError::Invalid("No project has been saved yet".to_string()))?
            }
        };

        if self.json {
            let json = project
                .to_json()
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            println!("{}", json);
            return Ok(());
        }

        let mut patterns: Vec<&BeadPattern> = project.standalone_patterns().collect();
        patterns.sort_by(|a, b| a.name.cmp(&b.name));
        println!("Patterns:");
        for pattern in patterns {
            print_pattern_line(&project, pattern, "  ");
        }

        let mut groups: Vec<&PatternGroup> = project.groups.values().map(Arc::as_ref).collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        for group in groups {
            println!("Group {} ({})", group.name, group.id);
            for part in &group.parts {
                match project.pattern(&part.pattern_id) {
                    Some(pattern) => {
                        println!("  part {}:", part.name);
                        print_pattern_line(&project, pattern, "    ");
                        for guide in group.dimension_guides() {
                            println!(
                                "    guide {} at line {}",
                                guide.label,
                                guide.resolve(pattern.cols, pattern.rows)
                            );
                        }
                    }
                    None => println!("  part {}: missing pattern {}", part.name, part.pattern_id),
                }
            }
        }
        Ok(())
    }
}

fn print_pattern_line(project: &Project, pattern: &BeadPattern, indent: &str) {
    let kind = project
        .shape(&pattern.shape_id)
        .map(|s| format!("{:?}", s.kind).to_lowercase())
        .unwrap_or_else(|| "unknown".to_string());
    let beads: usize = count_colors(&pattern.grid).iter().map(|(_, n)| n).sum();
    println!(
        "{}{} ({}) {}x{} {}, {} beads",
        indent, pattern.name, pattern.id, pattern.cols, pattern.rows, kind, beads
    );
}

// --- new ---

#[derive(Args, Debug)]
pub struct NewArgs {
    project: String,

    #[arg(long)]
    name: String,

    #[arg(long, value_enum, default_value_t = ShapeArg::Square)]
    shape: ShapeArg,

    /// Board width in cells
    #[arg(long, default_value_t = 29)]
    cols: usize,

    /// Board height in cells (defaults to --cols)
    #[arg(long)]
    rows: Option<usize>,

    /// Add the pattern as a part of this group, creating it if needed
    #[arg(long, value_name = "GROUP")]
    group: Option<String>,

    #[command(flatten)]
    palette: PaletteArgs,
}

impl NewArgs {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let rows = self.rows.unwrap_or(self.cols);
        ctx.check_dimensions(self.cols, rows)?;

        let mut store = ctx.open_store(ctx.load_or_create(&self.project)?);
        let palette = self.palette.resolve(&mut store)?;
        let shape = PegboardShape::new(self.shape.into(), self.cols, rows);
        let pattern = BeadPattern::new(&self.name, &shape, &palette.id, None);
        let pattern_id = pattern.id.clone();
        store.upsert_shape(shape);

        match &self.group {
            Some(group_name) => {
                let existing = store
                    .project()
                    .groups
                    .values()
                    .find(|g| &g.name == group_name)
                    .map(|g| g.id.clone());
                let group_id = match existing {
                    Some(id) => id,
                    None => store.create_group(PatternGroup::new(group_name)),
                };
                store.add_part_with_pattern(&group_id, &self.name, pattern);
            }
            None => {
                store.create_pattern(pattern);
            }
        }

        ctx.save(&self.project, &store)?;
        println!("{}", pattern_id);
        Ok(())
    }
}

// --- convert ---

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterArg {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl From<FilterArg> for FilterType {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Nearest => FilterType::Nearest,
            FilterArg::Triangle => FilterType::Triangle,
            FilterArg::CatmullRom => FilterType::CatmullRom,
            FilterArg::Gaussian => FilterType::Gaussian,
            FilterArg::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    project: String,

    /// PNG, JPEG or WebP image
    image: PathBuf,

    #[arg(long)]
    cols: usize,

    #[arg(long)]
    rows: usize,

    /// Pattern name (defaults to the image file name)
    #[arg(long)]
    name: Option<String>,

    /// Limit the number of distinct bead colors
    #[arg(long)]
    max_colors: Option<usize>,

    /// Use Floyd–Steinberg dithering
    #[arg(long)]
    dither: bool,

    #[arg(long, value_enum, default_value_t = FilterArg::Lanczos3)]
    filter: FilterArg,

    #[arg(long, value_enum, default_value_t = ShapeArg::Rectangle)]
    shape: ShapeArg,

    #[command(flatten)]
    palette: PaletteArgs,
}

impl ConvertArgs {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        ctx.check_dimensions(self.cols, self.rows)?;
        let mut store = ctx.open_store(ctx.load_or_create(&self.project)?);
        let palette = self.palette.resolve(&mut store)?;

        let bytes = read_file(&self.image)?;
        let max_dimension = ctx.config.max_grid_dimension;
        let raster = load_raster_with_limit(&bytes, self.cols, self.rows, max_dimension, self.filter.into())?;
        let mut options = ConversionOptions::new(self.cols, self.rows).with_max_dimension(max_dimension);
        options.max_colors = self.max_colors;
        if self.dither {
            options = options.with_dithering(Dithering::FloydSteinberg);
        }

        let conversion = convert_in_background(raster, palette.clone(), options)
            .join()
            .map_err(|_| CliError::Invalid("Conversion worker panicked".to_string()))??;

        let shape = PegboardShape::new(self.shape.into(), self.cols, self.rows);
        let grid = beadloom_core::grid::apply_shape_mask(&conversion.grid, &shape);
        let name = self.name.clone().unwrap_or_else(|| {
            self.image
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Imported".to_string())
        });
        let pattern = BeadPattern::new(name, &shape, &palette.id, Some(grid));
        store.upsert_shape(shape);
        let pattern_id = store.create_pattern(pattern);
        store.set_active_colors(&pattern_id, Some(conversion.used_color_ids.clone()));

        ctx.save(&self.project, &store)?;
        println!(
            "{} ({} colors: {})",
            pattern_id,
            conversion.used_color_ids.len(),
            conversion.used_color_ids.join(", ")
        );
        Ok(())
    }
}

// --- edit ---

#[derive(Args, Debug)]
pub struct EditArgs {
    project: String,

    pattern: String,

    #[command(subcommand)]
    op: EditOp,
}

#[derive(Subcommand, Debug)]
enum EditOp {
    /// Paint one cell
    Pencil { x: i32, y: i32, color: String },
    /// Clear one cell
    Erase { x: i32, y: i32 },
    /// Flood fill from a cell; omit the color to clear the area
    Fill { x: i32, y: i32, color: Option<String> },
    /// Swap every bead of one color for another
    Replace { from: String, to: String },
    /// Mirror left to right, or top to bottom with --vertical
    Mirror {
        #[arg(long)]
        vertical: bool,
    },
}

impl EditOp {
    fn color(&self) -> Option<&str> {
        match self {
            EditOp::Pencil { color, .. } => Some(color),
            EditOp::Fill { color, .. } => color.as_deref(),
            EditOp::Replace { to, .. } => Some(to),
            _ => None,
        }
    }
}

impl EditArgs {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let mut store = ctx.open_store(ctx.load_project(&self.project)?);
        if let Some(color) = self.op.color() {
            if store.project().find_color(color).is_none() {
                return Err(CliError::Invalid(format!("Unknown color {}", color)));
            }
        }

        let mut session = EditorSession::with_config(Clipboard::new(), &ctx.config);
        if !session.open(&store, &self.pattern) {
            return Err(CliError::PatternNotFound(self.pattern.clone()));
        }
        let changed = match &self.op {
            EditOp::Pencil { x, y, color } => session.pencil(&mut store, *x, *y, color),
            EditOp::Erase { x, y } => session.erase(&mut store, *x, *y),
            EditOp::Fill { x, y, color } => session.fill(&mut store, *x, *y, color.as_deref()),
            EditOp::Replace { from, to } => session.replace_color(&mut store, from, to),
            EditOp::Mirror { vertical: false } => session.mirror_horizontal(&mut store),
            EditOp::Mirror { vertical: true } => session.mirror_vertical(&mut store),
        };

        if changed {
            ctx.save(&self.project, &store)?;
            println!("Updated {}", self.pattern);
        } else {
            println!("No change");
        }
        Ok(())
    }
}

// --- print ---

const SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Args, Debug)]
pub struct PrintArgs {
    project: String,

    pattern: String,
}

impl PrintArgs {
    pub fn execute(&self, ctx: &Context) -> CliResult<()> {
        let project = ctx.load_project(&self.project)?;
        let pattern = project
            .pattern(&self.pattern)
            .ok_or_else(|| CliError::PatternNotFound(self.pattern.clone()))?;
        print!("{}", render_pattern(&project, pattern));
        Ok(())
    }
}

/// Render a grid as one character per cell followed by a legend.
/// `.` is an empty peg, a space is a cell outside the board's shape.
fn render_pattern(project: &Project, pattern: &BeadPattern) -> String {
    let counts = count_colors(&pattern.grid);
    let symbol_for = |id: &str| {
        counts
            .iter()
            .position(|(c, _)| c == id)
            .and_then(|i| SYMBOLS.chars().nth(i))
            .unwrap_or('?')
    };
    let shape = project.shape(&pattern.shape_id);

    let mut out = String::new();
    for (y, row) in pattern.grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let inside = shape.is_none_or(|s| is_cell_in_shape(s, x as i32, y as i32));
            out.push(match cell {
                Some(id) => symbol_for(id),
                None if inside => '.',
                None => ' ',
            });
        }
        out.push('\n');
    }

    out.push('\n');
    for (id, count) in &counts {
        let (name, hex) = project
            .find_color(id)
            .map(|c| (c.name.as_str(), c.rgb.to_hex()))
            .unwrap_or(("?", String::new()));
        out.push_str(&format!("{} {} {} {} x{}\n", symbol_for(id), id, name, hex, count));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PALETTE_JSON: &str = r##"{
        "id": "hama-midi",
        "name": "Hama Midi",
        "brand": "Hama",
        "colors": [
            { "id": "h01", "name": "White", "hex": "#ffffff" },
            { "id": "h05", "name": "Red", "hex": "#c8102e" }
        ]
    }"##;

    fn context(dir: &Path) -> Context {
        Context::open(Some(dir.join("projects")), None).unwrap()
    }

    fn palette_args(dir: &Path) -> PaletteArgs {
        let path = dir.join("palette.json");
        fs::write(&path, PALETTE_JSON).unwrap();
        PaletteArgs {
            palette: Some(path),
            palette_id: None,
        }
    }

    #[test]
    fn test_palette_file_parsing() {
        let file: PaletteFile = serde_json::from_str(PALETTE_JSON).unwrap();
        let palette = file.into_palette().unwrap();
        assert_eq!(palette.brand.as_deref(), Some("Hama"));
        assert!(palette.is_consistent());
        assert_eq!(palette.color("h05").unwrap().rgb, Rgb::new(0xc8, 0x10, 0x2e));
    }

    #[test]
    fn test_palette_file_bad_hex() {
        let file: PaletteFile = serde_json::from_str(
            r#"{"id":"p","name":"P","colors":[{"id":"x","name":"X","hex":"zz"}]}"#,
        )
        .unwrap();
        assert!(matches!(file.into_palette(), Err(CliError::Invalid(_))));
    }

    #[test]
    fn test_new_edit_and_render() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        NewArgs {
            project: "demo".to_string(),
            name: "Coaster".to_string(),
            shape: ShapeArg::Square,
            cols: 3,
            rows: None,
            group: None,
            palette: palette_args(dir.path()),
        }
        .execute(&ctx)
        .unwrap();

        let project = ctx.load_project("demo").unwrap();
        let pattern_id = project.patterns.keys().next().unwrap().clone();

        EditArgs {
            project: "demo".to_string(),
            pattern: pattern_id.clone(),
            op: EditOp::Fill {
                x: 0,
                y: 0,
                color: Some("h01".to_string()),
            },
        }
        .execute(&ctx)
        .unwrap();
        EditArgs {
            project: "demo".to_string(),
            pattern: pattern_id.clone(),
            op: EditOp::Pencil {
                x: 1,
                y: 1,
                color: "h05".to_string(),
            },
        }
        .execute(&ctx)
        .unwrap();

        let project = ctx.load_project("demo").unwrap();
        let pattern = project.pattern(&pattern_id).unwrap();
        assert_eq!(render_pattern(&project, pattern), "AAA\nABA\nAAA\n\nA h01 White #ffffff x8\nB h05 Red #c8102e x1\n");
    }

    #[test]
    fn test_edit_rejects_unknown_color() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        NewArgs {
            project: "demo".to_string(),
            name: "Coaster".to_string(),
            shape: ShapeArg::Square,
            cols: 2,
            rows: None,
            group: None,
            palette: palette_args(dir.path()),
        }
        .execute(&ctx)
        .unwrap();
        let pattern_id = ctx.load_project("demo").unwrap().patterns.keys().next().unwrap().clone();

        let result = EditArgs {
            project: "demo".to_string(),
            pattern: pattern_id,
            op: EditOp::Pencil {
                x: 0,
                y: 0,
                color: "nope".to_string(),
            },
        }
        .execute(&ctx);
        assert!(matches!(result, Err(CliError::Invalid(_))));
    }

    #[test]
    fn test_new_in_group_embeds_pattern() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        for name in ["Front", "Back"] {
            NewArgs {
                project: "box".to_string(),
                name: name.to_string(),
                shape: ShapeArg::Square,
                cols: 4,
                rows: None,
                group: Some("Box".to_string()),
                palette: palette_args(dir.path()),
            }
            .execute(&ctx)
            .unwrap();
        }

        let project = ctx.load_project("box").unwrap();
        assert_eq!(project.groups.len(), 1);
        let group = project.groups.values().next().unwrap();
        let names: Vec<&str> = group.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Front", "Back"]);
        assert_eq!(project.standalone_patterns().count(), 0);
    }

    #[test]
    fn test_render_marks_cells_outside_shape() {
        let shape = PegboardShape::circle(5);
        let pattern = BeadPattern::new("Dot", &shape, "p", None);
        let mut project = Project::new();
        project.shapes.insert(shape.id.clone(), Arc::new(shape));

        let rendered = render_pattern(&project, &pattern);
        let first_row = rendered.lines().next().unwrap();
        assert!(first_row.starts_with(' '));
        assert!(rendered.lines().nth(2).unwrap().contains('.'));
    }

    fn convert_args(dir: &Path, cols: usize) -> ConvertArgs {
        let image = image::RgbaImage::from_pixel(4, 2, image::Rgba([200, 20, 40, 255]));
        let path = dir.join("banner.png");
        image.save(&path).unwrap();
        ConvertArgs {
            project: "banner".to_string(),
            image: path,
            cols,
            rows: 2,
            name: None,
            max_colors: None,
            dither: false,
            filter: FilterArg::Nearest,
            shape: ShapeArg::Rectangle,
            palette: palette_args(dir),
        }
    }

    #[test]
    fn test_convert_follows_configured_dimension_limit() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{ "maxGridDimension": 300 }"#).unwrap();
        let ctx = Context::open(Some(dir.path().join("projects")), Some(&config)).unwrap();

        convert_args(dir.path(), 280).execute(&ctx).unwrap();
        let project = ctx.load_project("banner").unwrap();
        let pattern = project.patterns.values().next().unwrap();
        assert_eq!(pattern.grid[0].len(), 280);
        assert_eq!(pattern.grid[1][279].as_deref(), Some("h05"));

        let strict = context(dir.path());
        let result = convert_args(dir.path(), 280).execute(&strict);
        assert!(matches!(result, Err(CliError::Invalid(_))));
    }

    #[test]
    fn test_dimension_limit() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path());
        assert!(ctx.check_dimensions(29, 29).is_ok());
        assert!(matches!(ctx.check_dimensions(0, 29), Err(CliError::Invalid(_))));
    }
}
