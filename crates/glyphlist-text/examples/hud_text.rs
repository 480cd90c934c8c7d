//! HUD Text - Batched bitmap text over several frames
//!
//! This example renders a score counter, a centered title and a multi-line
//! dialogue box into a display list each frame, then prints what the batcher
//! saved compared with immediate emission.
//!
//! Run with `RUST_LOG=glyphlist_text=trace` to see per-frame stats, or pass
//! `--profile` to serve puffin data to `puffin_viewer`.

use std::sync::Arc;

use glyphlist_core::logging;
use glyphlist_core::profiling::{self, ProfilingBackend, profile_scope};
use glyphlist_gfx::{DisplayList, TextureFilter, TextureRef};
use glyphlist_text::{
    Color, Font, RenderStrategy, TextAlign, TextRender, TextRenderer, TextRendererConfig,
    TextStyle, Vec2,
};

/// A font whose printable ASCII glyphs each get their own texel buffer.
fn ascii_font() -> Arc<Font> {
    let mut builder = Font::builder(8, 12)
        .filter(TextureFilter::Point)
        .uniform_advance(7)
        .advance(b' ', 4)
        .advance(b'i', 3)
        .advance(b'l', 3);
    for code in b'!'..=b'~' {
        builder = builder.glyph(code, TextureRef::new(vec![code; 48]));
    }
    Arc::new(builder.build())
}

fn draw_frame(renderer: &mut TextRenderer, list: &mut DisplayList, font: &Arc<Font>, frame: u32) {
    profile_scope!("draw_frame");
    let score = TextStyle::new(font.clone()).size(12.0).color(Color::YELLOW);
    let title = TextStyle::new(font.clone())
        .size(24.0)
        .align(TextAlign::Center)
        .color(Color::WHITE);
    let dialogue = TextStyle::new(font.clone())
        .size(12.0)
        .line_height(14.0)
        .color(Color::from_hex(0xc0c0ff));

    renderer.print(list, Vec2::new(8.0, 8.0), &score, &format!("SCORE {:06}", frame * 150));
    renderer.print(list, Vec2::new(160.0, 60.0), &title, "GLYPHLIST");
    // Reveal the dialogue a few characters per frame.
    renderer.submit(
        list,
        Vec2::new(16.0, 160.0),
        &dialogue,
        Some(frame as usize * 6),
        b"Well met, traveller.\nThe bridge is out to the east,\nso mind the river.",
    );
    renderer.flush(list);
}

fn run(strategy: RenderStrategy, font: &Arc<Font>) -> usize {
    let config = TextRendererConfig::default().with_strategy(strategy);
    let mut renderer = match TextRenderer::new(config) {
        Ok(renderer) => renderer,
        Err(err) => {
            tracing::error!("Invalid renderer config: {}", err);
            return 0;
        }
    };

    let mut total = 0;
    for frame in 1..=10 {
        let mut list = DisplayList::with_capacity(1024);
        draw_frame(&mut renderer, &mut list, font, frame);
        total += list.finish().len();
        profiling::new_frame();

        let stats = renderer.stats();
        tracing::info!(
            "{} frame {}: {} glyphs, {} texture loads, {} commands",
            strategy,
            frame,
            stats.glyphs,
            stats.texture_loads,
            stats.commands
        );
    }
    total
}

fn main() {
    logging::init();

    if std::env::args().any(|arg| arg == "--profile") {
        profiling::init_profiling(ProfilingBackend::http_default());
    } else {
        profiling::init_profiling(ProfilingBackend::InProcess);
    }

    let font = ascii_font();
    let immediate = run(RenderStrategy::Immediate, &font);
    let batched = run(RenderStrategy::Batched, &font);

    println!("Immediate: {} commands over 10 frames", immediate);
    println!("Batched:   {} commands over 10 frames", batched);
}
