//! Fixed-capacity glyph arena with identity buckets.
//!
//! The arena is a slab of [`GlyphInstance`]s plus a list of bucket heads, one
//! per distinct `(code, font)` pair seen since the last clear. Each head is
//! the newest instance of its pair; instances link to the previous instance of
//! the same pair through `chain_next`, giving a newest-first chain.
//!
//! Buckets are found by a linear scan over the heads instead of hashing. The
//! number of distinct glyphs in a frame is small, and the scan keeps the
//! arena free of per-frame allocation. Both arrays are sized once at
//! construction and never grow; once the slab is full further glyphs are
//! dropped and counted.

use std::num::NonZeroU16;
use std::sync::Arc;

use glyphlist_gfx::Color;

use crate::font::Font;
use crate::layout::GlyphPlacement;

/// Largest supported arena capacity (indices are 16-bit).
pub const MAX_CAPACITY: usize = u16::MAX as usize;

/// Index of an instance within its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphIndex(NonZeroU16);

impl GlyphIndex {
    fn new(index: usize) -> Self {
        debug_assert!(index < MAX_CAPACITY);
        // index + 1 is in 1..=u16::MAX by the capacity bound
        Self(NonZeroU16::MIN.saturating_add(index as u16))
    }

    pub fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

static_assertions::assert_eq_size!(GlyphIndex, Option<GlyphIndex>);

/// One glyph queued for the current frame.
#[derive(Debug, Clone)]
pub struct GlyphInstance {
    pub code: u8,
    pub font: Arc<Font>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    chain_next: Option<GlyphIndex>,
}

impl GlyphInstance {
    /// The next-older instance with the same code and font.
    pub fn chain_next(&self) -> Option<GlyphIndex> {
        self.chain_next
    }

    fn same_glyph(&self, code: u8, font: &Arc<Font>) -> bool {
        self.code == code && Arc::ptr_eq(&self.font, font)
    }
}

/// Fixed-capacity pool of glyph instances grouped by `(code, font)`.
pub struct GlyphArena {
    instances: Vec<GlyphInstance>,
    heads: Vec<GlyphIndex>,
    capacity: usize,
    dropped: usize,
}

impl GlyphArena {
    /// Create an arena holding at most `capacity` glyphs per frame.
    ///
    /// `capacity` is clamped to `1..=MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_CAPACITY);
        Self {
            instances: Vec::with_capacity(capacity),
            heads: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of accepted instances this frame.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.instances.len() >= self.capacity
    }

    /// Number of distinct `(code, font)` pairs this frame.
    pub fn bucket_count(&self) -> usize {
        self.heads.len()
    }

    /// Glyphs rejected because the arena was full, since the last clear.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Queue a glyph. Returns `None` (and counts a drop) when the arena is full.
    pub fn insert(
        &mut self,
        font: &Arc<Font>,
        placement: GlyphPlacement,
        color: Color,
    ) -> Option<GlyphIndex> {
        if self.is_full() {
            self.dropped += 1;
            return None;
        }

        let index = GlyphIndex::new(self.instances.len());
        let code = placement.code;
        self.instances.push(GlyphInstance {
            code,
            font: font.clone(),
            x: placement.x,
            y: placement.y,
            width: placement.width,
            height: placement.height,
            color,
            chain_next: None,
        });

        let existing = self
            .heads
            .iter_mut()
            .find(|head| self.instances[head.index()].same_glyph(code, font));

        match existing {
            Some(head) => {
                self.instances[index.index()].chain_next = Some(*head);
                *head = index;
            }
            None => self.heads.push(index),
        }

        Some(index)
    }

    pub fn get(&self, index: GlyphIndex) -> Option<&GlyphInstance> {
        self.instances.get(index.index())
    }

    /// Buckets in the order their pair was first seen.
    pub fn buckets(&self) -> impl ExactSizeIterator<Item = Bucket<'_>> {
        self.heads.iter().map(move |&head| Bucket { arena: self, head })
    }

    /// Logical reset for the next frame. Capacity is retained.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.heads.clear();
        self.dropped = 0;
    }
}

/// All instances of one `(code, font)` pair.
#[derive(Clone, Copy)]
pub struct Bucket<'a> {
    arena: &'a GlyphArena,
    head: GlyphIndex,
}

impl<'a> Bucket<'a> {
    fn head_instance(&self) -> &'a GlyphInstance {
        &self.arena.instances[self.head.index()]
    }

    pub fn head(&self) -> GlyphIndex {
        self.head
    }

    pub fn code(&self) -> u8 {
        self.head_instance().code
    }

    pub fn font(&self) -> &'a Arc<Font> {
        &self.head_instance().font
    }

    /// Instances newest first.
    pub fn chain(&self) -> Chain<'a> {
        Chain {
            arena: self.arena,
            next: Some(self.head),
        }
    }

    /// Number of instances in the chain. A bucket always holds at least one.
    pub(crate) fn len(&self) -> usize {
        self.chain().count()
    }
}

/// Iterator over a bucket's chain.
pub struct Chain<'a> {
    arena: &'a GlyphArena,
    next: Option<GlyphIndex>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a GlyphInstance;

    fn next(&mut self) -> Option<Self::Item> {
        let instance = &self.arena.instances[self.next?.index()];
        self.next = instance.chain_next;
        Some(instance)
    }
}
