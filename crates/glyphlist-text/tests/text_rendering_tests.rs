//! End-to-end text rendering tests.
//!
//! These tests drive both renderers against a recording command sink and
//! check batching, capacity, alignment and coordinate quantization.

use std::sync::Arc;

use glyphlist_gfx::{Color, Command, TextureRef, pack_screen_xy};
use glyphlist_test_utils::{MockCommandSink, fixtures};
use glyphlist_text::{
    BatchedTextRenderer, Font, ImmediateTextRenderer, RenderStrategy, TextAlign, TextRender,
    TextRenderer, TextRendererConfig, TextStyle, Vec2, YAxis,
};

/// An 8x8 font with three distinct glyph textures and an 8-unit advance.
fn abc_font() -> (Arc<Font>, [TextureRef; 3]) {
    let textures = [
        fixtures::glyph_texels(8, 8, 1),
        fixtures::glyph_texels(8, 8, 2),
        fixtures::glyph_texels(8, 8, 3),
    ];
    let font = Font::builder(8, 8)
        .uniform_advance(8)
        .glyph(b'a', textures[0].clone())
        .glyph(b'b', textures[1].clone())
        .glyph(b'c', textures[2].clone())
        .build();
    (Arc::new(font), textures)
}

fn precise(strategy: RenderStrategy) -> TextRendererConfig {
    TextRendererConfig::default()
        .with_precision(1)
        .with_strategy(strategy)
}

#[test]
fn test_repeated_glyph_binds_texture_once() {
    let (font, [a, b, _]) = abc_font();
    let style = TextStyle::new(font);
    let mut renderer = BatchedTextRenderer::new();
    let mut sink = MockCommandSink::new();

    renderer.submit(&mut sink, Vec2::ZERO, &style, None, b"aba");
    renderer.flush(&mut sink);

    assert_eq!(sink.count_texture_binds(), 2);
    assert_eq!(sink.count_binds_of(&a), 1);
    assert_eq!(sink.count_binds_of(&b), 1);
    assert_eq!(sink.count_triangle_pairs(), 3);
    assert_eq!(sink.bound_textures(), vec![a, b]);
}

#[test]
fn test_batched_command_layout() {
    let (font, _) = abc_font();
    let style = TextStyle::new(font);
    let mut renderer = BatchedTextRenderer::new();
    let mut sink = MockCommandSink::new();

    renderer.submit(&mut sink, Vec2::ZERO, &style, None, b"aba");
    renderer.flush(&mut sink);

    // preamble + font state + 2 texture loads + sync between buckets + 3 quads + revert
    assert_eq!(sink.call_count(), 5 + 6 + 2 * 5 + 1 + 3 * 6 + 8);
    assert_eq!(renderer.stats().commands as usize, sink.call_count());

    let calls = sink.calls();
    assert_eq!(calls[0], Command::PipeSync);
    assert!(matches!(calls[calls.len() - 1], Command::Texture { on: false, .. }));
}

#[test]
fn test_sync_precedes_state_after_every_draw() {
    let (font_a, _) = abc_font();
    let (font_b, _) = abc_font();
    let red = TextStyle::new(font_a.clone()).color(Color::RED);
    let blue = TextStyle::new(font_a).color(Color::BLUE);
    let other = TextStyle::new(font_b);
    let mut renderer = BatchedTextRenderer::new();
    let mut sink = MockCommandSink::new();

    renderer.submit(&mut sink, Vec2::ZERO, &red, None, b"abca");
    renderer.submit(&mut sink, Vec2::new(0.0, 16.0), &blue, None, b"ab");
    renderer.submit(&mut sink, Vec2::new(0.0, 32.0), &other, None, b"cc");
    renderer.flush(&mut sink);

    // Between a draw and the next tile, filter or color change there must be a sync.
    let mut pending_draw = false;
    for command in sink.calls() {
        match command {
            Command::Triangles2 { .. } => pending_draw = true,
            Command::PipeSync => pending_draw = false,
            Command::SetTile(_)
            | Command::SetTextureImage { .. }
            | Command::SetTextureFilter(_) => {
                assert!(!pending_draw, "state change while a quad may be rasterizing");
            }
            _ => {}
        }
    }

    let stats = renderer.stats();
    assert_eq!(stats.buckets, 4);
    assert_eq!(stats.font_switches, 2);
}

#[test]
fn test_immediate_reloads_every_glyph() {
    let (font, [a, _, _]) = abc_font();
    let style = TextStyle::new(font).color(Color::GREEN);
    let mut renderer = ImmediateTextRenderer::new();
    let mut sink = MockCommandSink::new();

    renderer.submit(&mut sink, Vec2::ZERO, &style, None, b"aba");

    // Commands appear during submit, not flush.
    assert_eq!(sink.call_count(), 1 + 3 * (5 + 6 + 5 + 6) + 8);
    assert_eq!(sink.count_binds_of(&a), 2);
    assert_eq!(sink.count_env_colors(), 1);

    let before = sink.call_count();
    renderer.flush(&mut sink);
    assert_eq!(sink.call_count(), before);
    assert_eq!(renderer.stats().glyphs, 3);
}

#[test]
fn test_strategies_draw_same_quads() {
    let (font, _) = abc_font();
    let style = TextStyle::new(font).align(TextAlign::Center);

    let mut immediate = TextRenderer::new(precise(RenderStrategy::Immediate)).unwrap();
    let mut batched = TextRenderer::new(precise(RenderStrategy::Batched)).unwrap();
    let mut sink_i = MockCommandSink::new();
    let mut sink_b = MockCommandSink::new();

    for (renderer, sink) in [(&mut immediate, &mut sink_i), (&mut batched, &mut sink_b)] {
        renderer.print(&mut *sink, Vec2::new(160.0, 120.0), &style, "abc\nab");
        renderer.flush(&mut *sink);
    }

    let mut quads_i = sink_i.screen_patches();
    let mut quads_b = sink_b.screen_patches();
    assert_eq!(quads_i.len(), 5 * 4);
    quads_i.sort_unstable();
    quads_b.sort_unstable();
    assert_eq!(quads_i, quads_b);
    assert!(sink_b.call_count() < sink_i.call_count());
}

#[test]
fn test_capacity_boundary() {
    let (font, _) = abc_font();
    let style = TextStyle::new(font);
    let config = TextRendererConfig::default().with_capacity(4);
    let mut renderer = BatchedTextRenderer::with_config(config).unwrap();
    let mut sink = MockCommandSink::new();

    renderer.submit(&mut sink, Vec2::ZERO, &style, None, b"abca");
    renderer.flush(&mut sink);
    assert_eq!(sink.count_triangle_pairs(), 4);
    assert_eq!(renderer.stats().dropped, 0);

    sink.clear_calls();
    renderer.submit(&mut sink, Vec2::ZERO, &style, None, b"abcab");
    renderer.flush(&mut sink);
    assert_eq!(sink.count_triangle_pairs(), 4);
    assert_eq!(renderer.stats().glyphs, 4);
    assert_eq!(renderer.stats().dropped, 1);
}

#[test]
fn test_arena_resets_between_frames() {
    let (font, _) = abc_font();
    let style = TextStyle::new(font);
    let config = TextRendererConfig::default().with_capacity(3);
    let mut renderer = BatchedTextRenderer::with_config(config).unwrap();
    let mut sink = MockCommandSink::new();

    for _ in 0..3 {
        sink.clear_calls();
        renderer.submit(&mut sink, Vec2::ZERO, &style, None, b"abc");
        renderer.flush(&mut sink);
        assert_eq!(sink.count_triangle_pairs(), 3);
        assert_eq!(renderer.stats().dropped, 0);
    }
}

#[test]
fn test_alignment_positions() {
    let (font, _) = abc_font();
    let config = precise(RenderStrategy::Batched);
    let left_edge = |align: TextAlign| {
        let style = TextStyle::new(font.clone()).align(align);
        let mut renderer = BatchedTextRenderer::with_config(config.clone()).unwrap();
        let mut sink = MockCommandSink::new();
        renderer.submit(&mut sink, Vec2::new(100.0, 0.0), &style, None, b"ab");
        renderer.flush(&mut sink);
        // Corner 0 of the first quad is bottom-left.
        sink.screen_patches()[0].1 >> 16
    };

    assert_eq!(left_edge(TextAlign::Left), 100);
    assert_eq!(left_edge(TextAlign::Center), 92);
    assert_eq!(left_edge(TextAlign::Right), 84);
}

#[test]
fn test_fractional_position_quantizes_stably() {
    let (font, _) = abc_font();
    let style = TextStyle::new(font);
    let mut renderer = BatchedTextRenderer::new();
    let mut sink = MockCommandSink::new();

    let mut frames = Vec::new();
    for _ in 0..2 {
        sink.clear_calls();
        renderer.submit(&mut sink, Vec2::new(10.125, 0.0), &style, None, b"a");
        renderer.flush(&mut sink);
        frames.push(sink.screen_patches());
    }

    assert_eq!(frames[0], frames[1]);
    // 10.125 * 4 = 40.5 rounds to 41; right edge 18.125 * 4 = 72.5 rounds to 73.
    assert_eq!(frames[0][0], (0, pack_screen_xy(41, 32)));
    assert_eq!(frames[0][1], (1, pack_screen_xy(73, 32)));
    assert_eq!(frames[0][2], (2, pack_screen_xy(73, 0)));
    assert_eq!(frames[0][3], (3, pack_screen_xy(41, 0)));
}

#[test]
fn test_up_axis_flips_screen_y() {
    let (font, _) = abc_font();
    let style = TextStyle::new(font);
    let config = precise(RenderStrategy::Batched)
        .with_y_axis(YAxis::Up)
        .with_screen_height(240.0);
    let mut renderer = BatchedTextRenderer::with_config(config).unwrap();
    let mut sink = MockCommandSink::new();

    renderer.submit(&mut sink, Vec2::new(0.0, 20.0), &style, None, b"a");
    renderer.flush(&mut sink);

    let patches = sink.screen_patches();
    // Glyph spans y 20..28 upward, so screen rows 212..220.
    assert_eq!(patches[0].1, pack_screen_xy(0, 220));
    assert_eq!(patches[2].1, pack_screen_xy(8, 212));
}

#[test]
fn test_widescreen_narrows_glyphs() {
    let (font, _) = abc_font();
    let style = TextStyle::new(font);
    let config = precise(RenderStrategy::Batched).with_widescreen(true);
    let mut renderer = BatchedTextRenderer::with_config(config).unwrap();
    let mut sink = MockCommandSink::new();

    renderer.submit(&mut sink, Vec2::ZERO, &style, None, b"ab");
    renderer.flush(&mut sink);

    let patches = sink.screen_patches();
    assert_eq!(patches[1].1 >> 16, 6);
    assert_eq!(patches[4].1 >> 16, 6);
}

#[test]
fn test_odd_width_font_draws_nothing() {
    let font = Font::builder(7, 8)
        .uniform_advance(7)
        .glyph(b'a', fixtures::glyph_texels(7, 8, 0))
        .build();
    let style = TextStyle::new(Arc::new(font));
    let mut sink = MockCommandSink::new();

    let mut batched = BatchedTextRenderer::new();
    batched.submit(&mut sink, Vec2::ZERO, &style, None, b"aaa");
    batched.flush(&mut sink);

    let mut immediate = ImmediateTextRenderer::new();
    immediate.submit(&mut sink, Vec2::ZERO, &style, None, b"aaa");
    immediate.flush(&mut sink);

    assert_eq!(sink.call_count(), 0);
}

#[test]
fn test_fonts_batch_separately() {
    let (font_a, _) = abc_font();
    let (font_b, _) = abc_font();
    let style_a = TextStyle::new(font_a).color(Color::RED);
    let style_b = TextStyle::new(font_b).color(Color::BLUE);
    let mut renderer = BatchedTextRenderer::new();
    let mut sink = MockCommandSink::new();

    renderer.submit(&mut sink, Vec2::ZERO, &style_a, None, b"aa");
    renderer.submit(&mut sink, Vec2::new(0.0, 16.0), &style_b, None, b"a");
    renderer.submit(&mut sink, Vec2::new(0.0, 32.0), &style_a, None, b"a");
    renderer.flush(&mut sink);

    let stats = renderer.stats();
    assert_eq!(stats.buckets, 2);
    assert_eq!(stats.font_switches, 2);
    assert_eq!(sink.count_filter_changes(), 2 + 1);
    assert_eq!(
        sink.count_where(|c| *c == Command::SetEnvColor(Color::RED)),
        3
    );
}

#[test]
fn test_invisible_only_text_emits_nothing() {
    let (font, _) = abc_font();
    let style = TextStyle::new(font);
    let mut renderer = TextRenderer::default();
    let mut sink = MockCommandSink::new();

    renderer.print(&mut sink, Vec2::ZERO, &style, "  \n zz");
    renderer.flush(&mut sink);

    assert_eq!(sink.call_count(), 0);
    assert_eq!(renderer.stats().glyphs, 0);
}
