//! # Style Precompiler
//!
//! Walks a component tree and attaches a presentation class string to every
//! node, derived only from that node's `style` map. Identity, props and
//! children are never touched, so the pass can run before any export or
//! preview without disturbing the structure.
//!
//! Output is deterministic: identical style maps always produce identical
//! class strings, which is what makes the memo cache sound.

use crate::minify::{minify_css_value, normalize_property};
use crate::utilities::utility_class;
use crc32fast::Hasher;
use pagecraft_common::{walk_component_mut, Component, Style, VisitorMut};
use std::collections::HashMap;
use tracing::debug;

/// Compile a style map to its class string (empty for an empty style)
pub fn compile_style(style: &Style) -> String {
    let mut declarations: Vec<(String, String)> = style
        .iter()
        .map(|(key, value)| (normalize_property(key), minify_css_value(value)))
        .collect();

    // Keys are unique before normalization but `fontSize` and `font-size`
    // collapse onto the same property; a stable sort keeps map order for ties
    declarations.sort_by(|a, b| a.0.cmp(&b.0));

    declarations
        .iter()
        .filter_map(|(property, value)| utility_class(property, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Structural hash of a style map
pub fn style_hash(style: &Style) -> u32 {
    let mut hasher = Hasher::new();
    for (key, value) in style {
        hasher.update(key.as_bytes());
        hasher.update(b":");
        hasher.update(value.as_bytes());
        hasher.update(b";");
    }
    hasher.finalize()
}

/// Memoizing style compiler
#[derive(Debug, Default)]
pub struct StylePrecompiler {
    cache: HashMap<u32, (Style, String)>,
    hits: usize,
    misses: usize,
}

impl StylePrecompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Class string for one style map, served from cache when possible
    pub fn class_for(&mut self, style: &Style) -> String {
        let hash = style_hash(style);

        if let Some((cached_style, class_name)) = self.cache.get(&hash) {
            if cached_style == style {
                self.hits += 1;
                return class_name.clone();
            }
            // Hash collision: compile without caching
            self.misses += 1;
            return compile_style(style);
        }

        self.misses += 1;
        let class_name = compile_style(style);
        self.cache.insert(hash, (style.clone(), class_name.clone()));
        class_name
    }

    /// Produce a copy of the tree with `class_name` set on every node
    ///
    /// Nodes with an empty style get `None`.
    pub fn precompile(&mut self, components: &[Component]) -> Vec<Component> {
        let mut compiled = components.to_vec();
        self.precompile_in_place(&mut compiled);
        compiled
    }

    /// Set `class_name` on every node of an owned tree
    pub fn precompile_in_place(&mut self, components: &mut [Component]) {
        let (hits, misses) = (self.hits, self.misses);

        let mut pass = PrecompilePass { compiler: self };
        pass.visit_components_mut(components);

        debug!(
            "Precompiled styles: {} cache hits, {} misses",
            self.hits - hits,
            self.misses - misses
        );
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

struct PrecompilePass<'a> {
    compiler: &'a mut StylePrecompiler,
}

impl VisitorMut for PrecompilePass<'_> {
    fn visit_component_mut(&mut self, component: &mut Component) {
        component.class_name = if component.style.is_empty() {
            None
        } else {
            Some(self.compiler.class_for(&component.style))
        };
        walk_component_mut(self, component);
    }
}
