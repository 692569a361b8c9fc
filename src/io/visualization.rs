//! Animated GIF of the relaxation history and SVG export of the final diagram

use crate::io::configuration::{
    FINAL_FRAME_HOLD, ITERATIONS_PER_ANIMATION_SECOND, STIPPLE_DOT_RADIUS,
    VIEWER_MIN_FRAME_DELAY_MS,
};
use crate::io::error::{Result, StippleError};
use crate::io::image::{ensure_parent_dir, render_stipple};
use crate::spatial::{Point, VoronoiCell, VoronoiDiagram};
use image::{DynamicImage, Frame};
use num_traits::ToPrimitive;
use std::path::Path;
use svg::Document;
use svg::node::element::{Circle, Polygon, Rectangle};

/// Renders each history snapshot as one animation frame
pub struct HistoryAnimation<'a> {
    history: &'a [Vec<Point>],
    width: u32,
    height: u32,
}

impl<'a> HistoryAnimation<'a> {
    /// Animate `history` on a `width` x `height` canvas
    pub const fn new(history: &'a [Vec<Point>], width: u32, height: u32) -> Self {
        Self {
            history,
            width,
            height,
        }
    }

    /// Frame delay giving one second of animation per five iterations
    ///
    /// Short runs are clamped to one frame per second.
    pub fn frame_delay_ms(iterations: usize) -> u32 {
        let fps = (iterations as f64 / ITERATIONS_PER_ANIMATION_SECOND as f64)
            .round()
            .max(1.0);
        (1000.0 / fps).round().to_u32().unwrap_or(VIEWER_MIN_FRAME_DELAY_MS)
    }

    /// Number of snapshots available
    pub fn snapshot_count(&self) -> usize {
        self.history.len()
    }

    /// Render the frames that will be encoded
    ///
    /// Delays below what viewers honour are raised to the viewer minimum and
    /// frames are skipped to keep the apparent speed. The last snapshot is
    /// always rendered and then repeated with a longer hold.
    ///
    /// # Errors
    ///
    /// Returns an error if the history is empty.
    pub fn render_frames(&self, frame_delay_ms: u32) -> Result<Vec<Frame>> {
        if self.history.is_empty() {
            return Err(StippleError::InvalidSourceData {
                reason: "No point history captured for animation".to_string(),
            });
        }

        let requested = frame_delay_ms.max(1);
        let effective_delay_ms = requested.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if requested < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(requested) as usize
        } else {
            1
        };

        let last_index = self.history.len() - 1;
        let mut frames: Vec<Frame> = self
            .history
            .iter()
            .enumerate()
            .filter(|(i, _)| i % skip_factor == 0 || *i == last_index)
            .map(|(_, points)| self.render_frame(points, effective_delay_ms))
            .collect();

        if let Some(last) = self.history.last() {
            frames.push(self.render_frame(last, effective_delay_ms * FINAL_FRAME_HOLD));
        }

        Ok(frames)
    }

    /// Encode the animation as a GIF
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The history is empty
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        let frames = self.render_frames(frame_delay_ms)?;

        ensure_parent_dir(output_path)?;
        let file = std::fs::File::create(output_path).map_err(|e| StippleError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| StippleError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn render_frame(&self, points: &[Point], delay_ms: u32) -> Frame {
        let canvas = render_stipple(points, self.width, self.height, STIPPLE_DOT_RADIUS);
        Frame::from_parts(
            DynamicImage::ImageLuma8(canvas).to_rgba8(),
            0,
            0,
            image::Delay::from_numer_denom_ms(delay_ms, 1),
        )
    }
}

/// Build an SVG document of the bounded cells and generator points
pub fn diagram_document(diagram: &VoronoiDiagram, width: u32, height: u32) -> Document {
    let mut document = Document::new()
        .set("viewBox", (0, 0, width, height))
        .set("width", width)
        .set("height", height)
        .add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", "white"),
        );

    for vertices in diagram.cells().iter().filter_map(VoronoiCell::bounded_vertices) {
        let outline = vertices
            .iter()
            .map(|p| format!("{:.3},{:.3}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        document = document.add(
            Polygon::new()
                .set("points", outline)
                .set("fill", "none")
                .set("stroke", "blue")
                .set("stroke-opacity", 0.6)
                .set("stroke-width", 0.5),
        );
    }

    for generator in diagram.generators() {
        document = document.add(
            Circle::new()
                .set("cx", generator.x)
                .set("cy", generator.y)
                .set("r", 0.8)
                .set("fill", "red"),
        );
    }

    document
}

/// Write the final Voronoi diagram as an SVG file
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn export_diagram_svg(
    diagram: &VoronoiDiagram,
    width: u32,
    height: u32,
    output_path: &Path,
) -> Result<()> {
    ensure_parent_dir(output_path)?;
    svg::save(output_path, &diagram_document(diagram, width, height)).map_err(|e| {
        StippleError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "write svg",
            source: e,
        }
    })
}
