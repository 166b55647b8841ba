//! Figure (canvas) implementation.
//!
//! A figure has a physical size in inches and a resolution in dots per inch.
//! Axes positions are kept in figure-fraction coordinates; line widths and
//! font sizes are in points and converted when rendering.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};

use crate::plotting::axes::{Axes, Extents, GridSlot};
use crate::plotting::backend::SvgBackend;
use crate::plotting::element::Bounds;
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::plot::ColorbarPlot;
use crate::plotting::style::{rc_params, Color, TextAnchor, TextStyle};

/// Default dots per inch.
pub const DEFAULT_DPI: f64 = 100.0;

/// Subplot margins (figure fraction) used before any tight layout.
const LEFT: f64 = 0.125;
const RIGHT: f64 = 0.9;
const BOTTOM: f64 = 0.11;
const TOP: f64 = 0.88;
const WSPACE: f64 = 0.2;
const HSPACE: f64 = 0.2;

/// Share of the parent's width given up for a colorbar, the gap before the
/// bar and the bar's own width.
const COLORBAR_FRACTION: f64 = 0.15;
const COLORBAR_PAD: f64 = 0.05;
const COLORBAR_WIDTH: f64 = 0.05;

/// A figure containing zero or more axes.
#[derive(Debug)]
pub struct Figure {
    /// Figure width in inches
    pub width: f64,
    /// Figure height in inches
    pub height: f64,
    /// Dots per inch
    pub dpi: f64,
    /// Background color
    pub background: Color,
    /// Figure title
    pub title: Option<String>,
    axes: Vec<Axes>,
    text_style: TextStyle,
}

impl Figure {
    /// Create a new figure of `width` x `height` inches at the default dpi.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_dpi(width, height, DEFAULT_DPI)
    }

    /// Create a new figure of `width` x `height` inches at `dpi`.
    ///
    /// Text defaults are taken from the style parameters active right now.
    pub fn with_dpi(width: f64, height: f64, dpi: f64) -> Self {
        let rc = rc_params();
        Figure {
            width,
            height,
            dpi,
            background: Color::WHITE,
            title: None,
            axes: Vec::new(),
            text_style: TextStyle::new()
                .font_family(rc.font_family)
                .font_size(rc.font_size),
        }
    }

    /// Width in pixels.
    pub fn width_px(&self) -> f64 {
        self.width * self.dpi
    }

    /// Height in pixels.
    pub fn height_px(&self) -> f64 {
        self.height * self.dpi
    }

    /// Base text style of this figure.
    pub fn text_style(&self) -> &TextStyle {
        &self.text_style
    }

    /// Set the figure title.
    pub fn suptitle(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    /// Add a subplot at the given position.
    /// Uses matplotlib-style indexing: (rows, cols, index) where index is 1-based.
    pub fn add_subplot(&mut self, rows: usize, cols: usize, index: usize) -> &mut Axes {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let index = index.saturating_sub(1).min(rows * cols - 1); // Convert to 0-based
        let slot = GridSlot {
            rows,
            cols,
            row: index / cols,
            col: index % cols,
        };

        let mut axes = Axes::new(self.text_style.clone());
        axes.position = default_grid_position(slot);
        axes.grid_slot = Some(slot);
        self.push_axes(axes)
    }

    /// Add an axes at an explicit position `[left, bottom, width, height]` in figure fraction.
    /// Tight layout leaves such axes where they are.
    pub fn add_axes(&mut self, rect: [f64; 4]) -> &mut Axes {
        let [left, bottom, width, height] = rect;
        let mut axes = Axes::new(self.text_style.clone());
        axes.position = Bounds::new(left, left + width, bottom, bottom + height);
        self.push_axes(axes)
    }

    /// Create a grid of subplots and return references to the new axes.
    pub fn subplots(&mut self, rows: usize, cols: usize) -> Vec<&mut Axes> {
        let start = self.axes.len();
        for i in 1..=(rows.max(1) * cols.max(1)) {
            self.add_subplot(rows, cols, i);
        }
        self.axes[start..].iter_mut().collect()
    }

    /// Attach a colorbar for `min..max` to the axes at `parent`.
    ///
    /// The colorbar takes the right part of the parent's area, is marked with
    /// `is_colorbar = Some(true)` and draws its ticks on the right.
    pub fn colorbar(
        &mut self,
        parent: usize,
        min: f64,
        max: f64,
        colors: Vec<Color>,
    ) -> PlotResult<&mut Axes> {
        if parent >= self.axes.len() {
            return Err(PlotError::InvalidConfig(format!(
                "colorbar parent {} does not exist ({} axes)",
                parent,
                self.axes.len()
            )));
        }
        if !(min < max) || colors.is_empty() {
            return Err(PlotError::InvalidData(
                "colorbar needs min < max and at least one color".to_string(),
            ));
        }

        let (parent_pos, bar_pos) = split_for_colorbar(self.axes[parent].position);
        self.axes[parent].position = parent_pos;

        let mut bar = Axes::new(self.text_style.clone());
        bar.position = bar_pos;
        bar.is_colorbar = Some(true);
        bar.colorbar_of = Some(parent);
        bar.y_ticks_right = true;
        bar.margins = 0.0;
        bar.x_axis.visible = false;
        bar.set_xlim(0.0, 1.0).set_ylim(min, max);
        bar.add_plot(Box::new(ColorbarPlot::new(min, max, colors)));
        Ok(self.push_axes(bar))
    }

    fn push_axes(&mut self, axes: Axes) -> &mut Axes {
        self.axes.push(axes);
        let last = self.axes.len() - 1;
        &mut self.axes[last]
    }

    /// Get the current axes, creating a single subplot if there is none.
    pub fn gca(&mut self) -> &mut Axes {
        if self.axes.is_empty() {
            return self.add_subplot(1, 1, 1);
        }
        let last = self.axes.len() - 1;
        &mut self.axes[last]
    }

    /// All axes, in creation order.
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    /// All axes, mutably.
    pub fn axes_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    /// Repack the subplot grid to minimize whitespace.
    ///
    /// `pad` is the padding between the figure edge and the axes decorations,
    /// as a fraction of the font size. Axes added with [`Figure::add_axes`]
    /// are not moved; colorbars follow their parent.
    pub fn tight_layout(&mut self, pad: f64) {
        let Some((rows, cols)) = self.grid_shape() else {
            debug!("tight_layout: no subplot grid, nothing to do");
            return;
        };

        let font = self.text_style.font_size;
        let pad_pt = pad * font;
        let fig_w = self.width * 72.0;
        let fig_h = self.height * 72.0;

        // The same margins are reserved around every cell.
        let mut reach = Extents::default();
        for axes in self.axes.iter().filter(|a| a.grid_slot.is_some() || a.colorbar_of.is_some()) {
            let e = axes.decoration_extents();
            reach.left = reach.left.max(e.left);
            reach.right = reach.right.max(e.right);
            reach.top = reach.top.max(e.top);
            reach.bottom = reach.bottom.max(e.bottom);
        }
        let suptitle = if self.title.is_some() { font * 1.44 + pad_pt } else { 0.0 };

        let left = pad_pt + reach.left;
        let right = pad_pt + reach.right;
        let top = pad_pt + reach.top + suptitle;
        let bottom = pad_pt + reach.bottom;
        let w_gap = reach.left + reach.right + pad_pt;
        let h_gap = reach.top + reach.bottom + pad_pt;

        let cell_w = (fig_w - left - right - (cols - 1) as f64 * w_gap) / cols as f64;
        let cell_h = (fig_h - top - bottom - (rows - 1) as f64 * h_gap) / rows as f64;
        if cell_w <= 0.0 || cell_h <= 0.0 {
            warn!(
                "tight_layout: decorations do not fit in a {:.2}x{:.2} in figure, layout unchanged",
                self.width, self.height
            );
            return;
        }

        for axes in self.axes.iter_mut() {
            if let Some(slot) = axes.grid_slot {
                // Map the axes' own grid onto the tight grid by fraction.
                let col = slot.col as f64 * cols as f64 / slot.cols as f64;
                let row = slot.row as f64 * rows as f64 / slot.rows as f64;
                let span_w = cols as f64 / slot.cols as f64;
                let span_h = rows as f64 / slot.rows as f64;
                let x0 = left + col * (cell_w + w_gap);
                let x1 = x0 + span_w * cell_w + (span_w - 1.0) * w_gap;
                let y_top = top + row * (cell_h + h_gap);
                let y_bottom = y_top + span_h * cell_h + (span_h - 1.0) * h_gap;
                axes.position = Bounds::new(
                    x0 / fig_w,
                    x1 / fig_w,
                    1.0 - y_bottom / fig_h,
                    1.0 - y_top / fig_h,
                );
            }
        }

        for i in 0..self.axes.len() {
            let Some(parent) = self.axes[i].colorbar_of else {
                continue;
            };
            if parent >= self.axes.len() || self.axes[parent].grid_slot.is_none() {
                continue;
            }
            let (parent_pos, bar_pos) = split_for_colorbar(self.axes[parent].position);
            self.axes[parent].position = parent_pos;
            self.axes[i].position = bar_pos;
        }
        debug!(
            "tight_layout: {}x{} grid, margins l={:.1} r={:.1} t={:.1} b={:.1} pt",
            rows, cols, left, right, top, bottom
        );
    }

    /// Largest grid (rows, cols) used by any subplot.
    fn grid_shape(&self) -> Option<(usize, usize)> {
        self.axes
            .iter()
            .filter_map(|a| a.grid_slot)
            .map(|s| (s.rows, s.cols))
            .reduce(|a, b| (a.0.max(b.0), a.1.max(b.1)))
    }

    /// Render the figure to an SVG string.
    pub fn render(&self) -> String {
        let mut backend = SvgBackend::new(self.width, self.height, self.dpi);
        backend.fill_background(&self.background);

        if let Some(ref title) = self.title {
            let style = self
                .text_style
                .clone()
                .font_size(self.text_style.font_size * 1.2)
                .anchor(TextAnchor::Middle);
            let baseline = (self.text_style.font_size * 1.2 + 2.0) * backend.px_per_pt();
            backend.draw_text(self.width_px() / 2.0, baseline, title, &style);
        }

        for axes in &self.axes {
            axes.render_svg(&mut backend);
        }

        backend.render()
    }

    /// Save the figure to a file. The format is taken from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> PlotResult<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let document = match extension.as_str() {
            "svg" => self.render().into_bytes(),
            "png" => self.rasterize()?,
            _ => return Err(PlotError::UnsupportedFormat(extension)),
        };

        let mut file = File::create(path)?;
        file.write_all(&document)?;
        info!(
            "saved {:.2}x{:.2} in figure ({} axes) to {}",
            self.width,
            self.height,
            self.axes.len(),
            path.display()
        );
        Ok(())
    }

    /// Rasterize the rendered SVG to PNG bytes at the figure's dpi.
    pub fn rasterize(&self) -> PlotResult<Vec<u8>> {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        let tree = usvg::Tree::from_str(&self.render(), &options)
            .map_err(|e| PlotError::RenderError(format!("cannot parse figure SVG: {}", e)))?;

        let width = self.width_px().round().max(1.0) as u32;
        let height = self.height_px().round().max(1.0) as u32;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            PlotError::RenderError(format!("cannot allocate {}x{} pixmap", width, height))
        })?;
        // usvg resolves the inch size at its own dpi; stretch to ours.
        let size = tree.size();
        let transform = resvg::tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());
        debug!("rasterized figure to {}x{} px", width, height);
        pixmap
            .encode_png()
            .map_err(|e| PlotError::RenderError(e.to_string()))
    }
}

/// Position of a grid cell before any tight layout.
fn default_grid_position(slot: GridSlot) -> Bounds {
    let cell_w = (RIGHT - LEFT) / (slot.cols as f64 + WSPACE * (slot.cols - 1) as f64);
    let cell_h = (TOP - BOTTOM) / (slot.rows as f64 + HSPACE * (slot.rows - 1) as f64);
    let x0 = LEFT + slot.col as f64 * cell_w * (1.0 + WSPACE);
    let y1 = TOP - slot.row as f64 * cell_h * (1.0 + HSPACE);
    Bounds::new(x0, x0 + cell_w, y1 - cell_h, y1)
}

/// Split an area into (shrunk parent, colorbar).
fn split_for_colorbar(area: Bounds) -> (Bounds, Bounds) {
    let w = area.width();
    let parent = Bounds::new(
        area.x_min,
        area.x_max - COLORBAR_FRACTION * w,
        area.y_min,
        area.y_max,
    );
    let bar_x0 = parent.x_max + COLORBAR_PAD * w;
    let bar = Bounds::new(bar_x0, bar_x0 + COLORBAR_WIDTH * w, area.y_min, area.y_max);
    (parent, bar)
}
