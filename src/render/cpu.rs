use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::BackgroundImage;
use crate::foundation::core::{Affine, Point, Rect, Rgba8, SurfaceSize, Vec2};
use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::math::premul_over_in_place;
use crate::render::blur::GlowFilter;
use crate::render::canvas::{Canvas, TransformStack};
use crate::render::paint::{FontRef, Glow, PaintMode, PaintStyle, TextAlign};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha, as image encoders expect.
    pub fn into_straight(mut self) -> Self {
        if !self.premultiplied {
            return self;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
        self
    }
}

#[derive(Clone)]
struct ImagePaint {
    source: BackgroundImage,
    paint: vello_cpu::Image,
}

/// CPU raster canvas backed by a `vello_cpu` pixmap.
///
/// Every draw call is rasterized into a scratch layer and then composited source-over onto the
/// surface, so layers can be post-processed (outer glow) before they land.
pub struct PixmapCanvas {
    surface: vello_cpu::Pixmap,
    layer: vello_cpu::Pixmap,
    ctx: Option<vello_cpu::RenderContext>,
    stack: TransformStack,
    text: TextLayoutEngine,
    fonts: HashMap<Arc<str>, vello_cpu::peniko::FontData>,
    image: Option<ImagePaint>,
    glow: GlowFilter,
}

impl PixmapCanvas {
    /// Transparent canvas of the given size.
    pub fn new(size: SurfaceSize) -> ClockResult<Self> {
        let (w, h) = pixmap_dims(size)?;
        Ok(Self {
            surface: vello_cpu::Pixmap::new(w, h),
            layer: vello_cpu::Pixmap::new(w, h),
            ctx: None,
            stack: TransformStack::default(),
            text: TextLayoutEngine::new(),
            fonts: HashMap::new(),
            image: None,
            glow: GlowFilter::new(),
        })
    }

    /// Surface dimensions.
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize {
            width: u32::from(self.surface.width()),
            height: u32::from(self.surface.height()),
        }
    }

    /// Reallocate for a new size. Pixels are cleared and the transform stack is reset.
    pub fn resize(&mut self, size: SurfaceSize) -> ClockResult<()> {
        if size == self.size() {
            return Ok(());
        }
        let (w, h) = pixmap_dims(size)?;
        self.surface = vello_cpu::Pixmap::new(w, h);
        self.layer = vello_cpu::Pixmap::new(w, h);
        self.ctx = None;
        self.stack.reset();
        Ok(())
    }

    /// Fill the whole surface with `color`, ignoring the transform.
    pub fn clear(&mut self, color: Rgba8) {
        let p = color.premultiplied();
        let px = [p.r, p.g, p.b, p.a];
        for dst in self.surface.data_as_u8_slice_mut().chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
    }

    /// Premultiplied RGBA of one pixel, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let size = self.size();
        if x >= size.width || y >= size.height {
            return None;
        }
        let idx = ((y as usize) * (size.width as usize) + (x as usize)) * 4;
        let data = self.surface.data_as_u8_slice();
        Some([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
    }

    /// Copy out the current pixels.
    pub fn snapshot(&self) -> FrameRGBA {
        let size = self.size();
        FrameRGBA {
            width: size.width,
            height: size.height,
            data: self.surface.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn render_layer(&mut self, draw: impl FnOnce(&mut vello_cpu::RenderContext)) {
        let (w, h) = (self.surface.width(), self.surface.height());
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        draw(&mut ctx);
        ctx.flush();
        self.layer.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut self.layer);
        self.ctx = Some(ctx);
    }

    fn composite_layer(&mut self) -> ClockResult<()> {
        if premul_over_in_place(
            self.surface.data_as_u8_slice_mut(),
            self.layer.data_as_u8_slice(),
        ) {
            Ok(())
        } else {
            Err(ClockError::render("layer and surface buffers differ in size"))
        }
    }

    fn image_paint_for(&mut self, image: &BackgroundImage) -> ClockResult<vello_cpu::Image> {
        if let Some(cached) = &self.image
            && cached.source.same_pixels(image)
        {
            return Ok(cached.paint.clone());
        }
        let pixmap = pixmap_from_premul_bytes(image.pixels(), image.width(), image.height())?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image = Some(ImagePaint {
            source: image.clone(),
            paint: paint.clone(),
        });
        Ok(paint)
    }

    fn font_data_for(&mut self, font: &FontRef) -> vello_cpu::peniko::FontData {
        self.fonts
            .entry(font.shared_name())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.data().to_vec()),
                    0,
                )
            })
            .clone()
    }
}

impl Canvas for PixmapCanvas {
    fn save(&mut self) -> usize {
        self.stack.save()
    }

    fn restore(&mut self) {
        if !self.stack.restore() {
            tracing::trace!("unbalanced canvas restore ignored");
        }
    }

    fn save_count(&self) -> usize {
        self.stack.depth()
    }

    fn concat(&mut self, matrix: Affine) {
        self.stack.concat(matrix);
    }

    fn transform(&self) -> Affine {
        self.stack.current()
    }

    fn draw_image(&mut self, image: &BackgroundImage, src: Rect, dst: Rect) -> ClockResult<()> {
        if src.width() <= 0.0 || src.height() <= 0.0 || dst.width() <= 0.0 || dst.height() <= 0.0
        {
            return Ok(());
        }
        let paint = self.image_paint_for(image)?;
        let src_to_dst = Affine::translate(dst.origin().to_vec2())
            * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height())
            * Affine::translate(-src.origin().to_vec2());
        let transform = self.stack.current() * src_to_dst;

        self.render_layer(|ctx| {
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_transform(affine_to_cpu(transform));
            ctx.set_paint(paint);
            ctx.fill_rect(&rect_to_cpu(src));
        });
        self.composite_layer()
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &PaintStyle) -> ClockResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let brush = TextBrushRgba8::from(style.color);
        let layout = self
            .text
            .layout_line(text, &style.font, style.text_size, brush)?;
        let Some(baseline) = layout.lines().next().map(|l| f64::from(l.metrics().baseline)) else {
            return Ok(());
        };
        let width = f64::from(layout.width());
        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        let placement =
            self.stack.current() * Affine::translate(Vec2::new(origin.x + dx, origin.y - baseline));
        let font = self.font_data_for(&style.font);
        let mode = style.mode;

        self.render_layer(|ctx| {
            ctx.set_transform(affine_to_cpu(placement));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            if let PaintMode::Stroke { width } = mode {
                ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(f64::from(width))
                        .with_join(vello_cpu::kurbo::Join::Round)
                        .with_caps(vello_cpu::kurbo::Cap::Round),
                );
            }
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    let builder = ctx.glyph_run(&font).font_size(run.run().font_size());
                    match mode {
                        PaintMode::Fill => builder.fill_glyphs(glyphs),
                        PaintMode::Stroke { .. } => builder.stroke_glyphs(glyphs),
                    }
                }
            }
        });

        if let Glow::Outer { radius } = style.glow {
            let size = self.size();
            self.glow.apply_outer(
                self.layer.data_as_u8_slice_mut(),
                size.width,
                size.height,
                radius,
            )?;
        }
        self.composite_layer()
    }
}

fn pixmap_dims(size: SurfaceSize) -> ClockResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| ClockError::validation("pixmap width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| ClockError::validation("pixmap height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(ClockError::validation("pixmap must be non-empty"));
    }
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> ClockResult<vello_cpu::Pixmap> {
    let (w, h) = pixmap_dims(SurfaceSize { width, height })?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ClockError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
