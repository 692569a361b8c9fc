//! Command-line interface for batch stippling of raster images

use crate::algorithm::sampling::SamplingMode;
use crate::algorithm::stippler::{StippleConfig, Stippler};
use crate::analysis::convergence::IterationStats;
use crate::analysis::preprocess::preprocess;
use crate::io::configuration::{
    DEFAULT_ITERATIONS, DEFAULT_POINT_COUNT, DEFAULT_QUANTIZATION_LEVELS, DEFAULT_SEED,
    DEFAULT_WEIGHT_SCALE, DENSITY_SUFFIX, DIAGRAM_SUFFIX, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS,
};
use crate::io::error::{Result, StippleError, invalid_parameter};
use crate::io::image::{export_density_png, export_stipple_png, load_image};
use crate::io::progress::ProgressManager;
use crate::io::visualization::{HistoryAnimation, export_diagram_svg};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "stipple")]
#[command(
    author,
    version,
    about = "Render images as weighted Voronoi stipples"
)]
/// Command-line arguments for the stippling tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Number of stipple points
    #[arg(short = 'n', long, default_value_t = DEFAULT_POINT_COUNT)]
    pub points: usize,

    /// Lloyd relaxation iterations
    #[arg(short, long, default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,

    /// Density quantization levels (0 disables quantization)
    #[arg(short, long, default_value_t = DEFAULT_QUANTIZATION_LEVELS)]
    pub levels: usize,

    /// Estimate centroids from every pixel instead of random samples
    #[arg(short, long)]
    pub exhaustive: bool,

    /// Random seed for reproducible stippling
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Exponent applied to density before initial sampling
    #[arg(short, long, default_value_t = DEFAULT_WEIGHT_SCALE)]
    pub weight_scale: f64,

    /// Export the relaxation history as an animated GIF
    #[arg(short, long)]
    pub animate: bool,

    /// Export the final Voronoi diagram as SVG
    #[arg(short, long)]
    pub diagram: bool,

    /// Export the preprocessed density field as PNG
    #[arg(long)]
    pub density: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Centroid candidate policy selected by the flags
    pub const fn sampling_mode(&self) -> SamplingMode {
        if self.exhaustive {
            SamplingMode::Exhaustive
        } else {
            SamplingMode::Random
        }
    }

    /// Run configuration built from the arguments
    pub const fn stipple_config(&self) -> StippleConfig {
        StippleConfig {
            point_count: self.points,
            iterations: self.iterations,
            quantization_levels: self.levels,
            sampling_mode: self.sampling_mode(),
            seed: self.seed,
            weight_scale: self.weight_scale,
        }
    }
}

/// Orchestrates batch stippling of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or target is invalid, or if any
    /// file fails to load, stipple or export
    pub fn process(&mut self) -> Result<()> {
        self.cli.stipple_config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Images selected by the target, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a supported image nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_supported_image(target) {
                Ok(self
                    .should_process_file(target)
                    .then(|| target.clone())
                    .into_iter()
                    .collect())
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"file is not a supported image",
                ))
            }
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| StippleError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if path.is_file()
                    && is_supported_image(&path)
                    && !is_generated_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = stipple_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.stipple_config();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, config.iterations);
        }

        let image = load_image(input_path)?;
        let field = preprocess(&image, config.quantization_levels)?;
        let (width, height) = (image.width(), image.height());

        if self.cli.density {
            export_density_png(&field, &density_output_path(input_path))?;
        }

        let mut stippler = Stippler::new(&field, config)?;
        let mut iteration = 0;
        while stippler.execute_iteration()? {
            iteration += 1;
            if let Some(ref mut pm) = self.progress_manager {
                let history = stippler.history();
                let mean = match history {
                    [.., before, after] => IterationStats::between(iteration, before, after)
                        .map_or(0.0, |stats| stats.mean_displacement(after.len())),
                    _ => 0.0,
                };
                pm.update_iteration(index, iteration, mean);
            }
        }

        let outcome = stippler.into_outcome();
        export_stipple_png(
            outcome.final_points(),
            width,
            height,
            &stipple_output_path(input_path),
        )?;

        if self.cli.animate {
            let animation = HistoryAnimation::new(&outcome.history, width, height);
            animation.export_gif(
                &animation_output_path(input_path, config.point_count, config.iterations),
                HistoryAnimation::frame_delay_ms(config.iterations),
            )?;
        }

        if self.cli.diagram {
            export_diagram_svg(
                &outcome.diagram,
                width,
                height,
                &diagram_output_path(input_path),
            )?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX) || stem.ends_with(DENSITY_SUFFIX))
}

fn sibling_path(input_path: &Path, file_name: String) -> PathBuf {
    match input_path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

fn stem_of(input_path: &Path) -> String {
    input_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Path of the stipple PNG written next to `input_path`
pub fn stipple_output_path(input_path: &Path) -> PathBuf {
    sibling_path(
        input_path,
        format!("{}{OUTPUT_SUFFIX}.png", stem_of(input_path)),
    )
}

/// Path of the relaxation GIF, named after the run parameters
pub fn animation_output_path(input_path: &Path, points: usize, iterations: usize) -> PathBuf {
    sibling_path(
        input_path,
        format!(
            "{}{OUTPUT_SUFFIX}_{points}_{iterations}.gif",
            stem_of(input_path)
        ),
    )
}

/// Path of the Voronoi diagram SVG
pub fn diagram_output_path(input_path: &Path) -> PathBuf {
    sibling_path(
        input_path,
        format!("{}{DIAGRAM_SUFFIX}.svg", stem_of(input_path)),
    )
}

/// Path of the density preview PNG
pub fn density_output_path(input_path: &Path) -> PathBuf {
    sibling_path(
        input_path,
        format!("{}{DENSITY_SUFFIX}.png", stem_of(input_path)),
    )
}
