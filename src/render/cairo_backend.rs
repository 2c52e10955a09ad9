use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::f64::consts::TAU;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, PolygonPrimitive, RadarScene, Renderer, TextHAlign, TextVAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub polygons_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(&mut self, context: &Context, scene: &RadarScene)
    -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Scenes are drawn scaled by `scale`, so a 280px scene rendered with scale 2
/// fills a 560px surface. Two modes are supported:
/// - offscreen image-surface rendering through `Renderer::render`
/// - in-place rendering on an external Cairo context through
///   `CairoContextRenderer`
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    scale: f64,
    clear_color: Option<Color>,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            scale: 1.0,
            clear_color: Some(Color::rgb(1.0, 1.0, 1.0)),
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Creates a surface sized for `scene_size * scale` and draws scaled.
    pub fn for_scene(scene_size: f64, scale: f64) -> ChartResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ChartError::InvalidData(
                "cairo render scale must be finite and > 0".to_owned(),
            ));
        }
        let edge = (scene_size * scale).ceil() as i32;
        let mut renderer = Self::new(edge, edge)?;
        renderer.scale = scale;
        Ok(renderer)
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Background painted before each pass; `None` keeps the surface transparent.
    pub fn set_clear_color(&mut self, color: Option<Color>) -> ChartResult<()> {
        if let Some(color) = color {
            color.validate()?;
        }
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the current surface as PNG bytes.
    pub fn encode_png(&self) -> ChartResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.surface
            .write_to_png(&mut bytes)
            .map_err(|err| ChartError::Export(format!("failed to encode png: {err}")))?;
        Ok(bytes)
    }

    fn render_with_context(&mut self, context: &Context, scene: &RadarScene) -> ChartResult<()> {
        scene.validate()?;

        if let Some(clear) = self.clear_color {
            apply_color(context, clear);
            context
                .paint()
                .map_err(|err| map_backend_error("failed to clear surface", err))?;
        }

        context.save().map_err(|err| map_backend_error("failed to save context", err))?;
        context.scale(self.scale, self.scale);

        let mut stats = CairoRenderStats::default();
        for layer in &scene.layers {
            for polygon in &layer.polygons {
                draw_polygon(context, polygon)?;
                stats.polygons_drawn += 1;
            }

            for line in &layer.lines {
                apply_color(context, line.color);
                context.set_line_width(line.stroke_width);
                context.move_to(line.x1, line.y1);
                context.line_to(line.x2, line.y2);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke line", err))?;
                stats.lines_drawn += 1;
            }

            for circle in &layer.circles {
                context.new_sub_path();
                context.arc(circle.cx, circle.cy, circle.radius, 0.0, TAU);
                apply_color(context, circle.fill);
                context
                    .fill_preserve()
                    .map_err(|err| map_backend_error("failed to fill marker", err))?;
                apply_color(context, circle.stroke);
                context.set_line_width(circle.stroke_width);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke marker", err))?;
                stats.circles_drawn += 1;
            }

            for text in &layer.texts {
                let layout = pangocairo::functions::create_layout(context);
                let font_description =
                    FontDescription::from_string(&format!("Sans {}px", text.font_size_px));
                layout.set_font_description(Some(&font_description));
                layout.set_text(&text.text);

                let (text_width, text_height) = layout.pixel_size();
                let x = match text.h_align {
                    TextHAlign::Left => text.x,
                    TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                    TextHAlign::Right => text.x - f64::from(text_width),
                };
                let y = match text.v_align {
                    TextVAlign::Top => text.y,
                    TextVAlign::Middle => text.y - f64::from(text_height) / 2.0,
                    TextVAlign::Baseline => text.y - f64::from(text_height),
                };

                apply_color(context, text.color);
                context.move_to(x, y);
                pangocairo::functions::show_layout(context, &layout);
                stats.texts_drawn += 1;
            }
        }

        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, scene: &RadarScene) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, scene)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        scene: &RadarScene,
    ) -> ChartResult<()> {
        self.render_with_context(context, scene)
    }
}

fn draw_polygon(context: &Context, polygon: &PolygonPrimitive) -> ChartResult<()> {
    let Some((first, rest)) = polygon.points.split_first() else {
        return Ok(());
    };
    context.new_path();
    context.move_to(first.x, first.y);
    for point in rest {
        context.line_to(point.x, point.y);
    }
    context.close_path();

    if let Some(fill) = polygon.fill {
        apply_color(context, fill);
        context
            .fill_preserve()
            .map_err(|err| map_backend_error("failed to fill polygon", err))?;
    }
    if polygon.stroke_width > 0.0 {
        apply_color(context, polygon.stroke);
        context.set_line_width(polygon.stroke_width);
        context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polygon", err))?;
    } else {
        context.new_path();
    }
    Ok(())
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
