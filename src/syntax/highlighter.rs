// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Highlighting pipeline and service.
//!
//! [`highlight`] is the whole pipeline: tokenize, classify, render. It holds
//! no state. [`HighlightingService`] wraps it for the editor glue with a
//! class-name theme, a single-entry result cache and performance metrics.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use crate::syntax::classifier::classify;
use crate::syntax::render::{EMPTY_PLACEHOLDER, escape_markup, render};
use crate::syntax::style::StyleMapper;
use crate::syntax::token::tokenize;

/// Highlights `source` with the default class names.
pub fn highlight(source: &str) -> String {
    highlight_with(source, &StyleMapper::default())
}

/// Highlights `source` using the class names from `mapper`.
pub fn highlight_with(source: &str, mapper: &StyleMapper) -> String {
    highlight_counted(source, mapper).0
}

/// Highlights `source` and also returns the number of tokens produced.
fn highlight_counted(source: &str, mapper: &StyleMapper) -> (String, usize) {
    let tokens = tokenize(source);
    let classification = classify(&tokens, source);
    let markup = render(&tokens, &classification, mapper);

    tracing::trace!(
        bytes = source.len(),
        tokens = tokens.len(),
        functions = classification.function_names.len(),
        "highlighted source"
    );

    (markup, tokens.len())
}

/// Performance metrics for highlighting operations.
#[derive(Debug, Clone, Default)]
pub struct HighlightingMetrics {
    /// Total time spent highlighting
    pub total_time: Duration,
    /// Number of highlight passes actually run
    pub highlights_performed: usize,
    /// Number of tokens generated
    pub tokens_generated: usize,
    /// Average time per highlight pass
    pub avg_time: Duration,
    /// Maximum time for a single pass
    pub max_time: Duration,
    /// Number of requests answered from the cache
    pub cache_hits: usize,
    /// Number of requests that required a highlight pass
    pub cache_misses: usize,
}

impl HighlightingMetrics {
    /// Updates metrics with a new highlight pass.
    pub fn record_highlight(&mut self, duration: Duration, token_count: usize) {
        self.total_time += duration;
        self.highlights_performed += 1;
        self.tokens_generated += token_count;
        self.avg_time = self.total_time / self.highlights_performed as u32;

        if duration > self.max_time {
            self.max_time = duration;
        }
    }

    /// Records a cache hit.
    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    /// Records a cache miss.
    pub fn record_cache_miss(&mut self) {
        self.cache_misses += 1;
    }

    /// Returns the cache hit ratio (0.0 to 1.0).
    pub fn cache_hit_ratio(&self) -> f64 {
        let total_requests = self.cache_hits + self.cache_misses;
        if total_requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total_requests as f64
        }
    }

    /// Resets all metrics to zero.
    pub fn reset(&mut self) {
        *self = Default::default();
    }
}

#[derive(Debug, Clone)]
struct CachedMarkup {
    content_hash: u64,
    source_len: usize,
    markup: String,
}

/// Highlighting front end used by the editor glue.
///
/// Output is always identical to [`highlight_with`] for the same text and
/// theme. Re-highlighting the text that was highlighted last is answered
/// from the cache.
#[derive(Debug, Clone)]
pub struct HighlightingService {
    mapper: StyleMapper,
    enabled: bool,
    cache: Option<CachedMarkup>,
    metrics: HighlightingMetrics,
}

impl Default for HighlightingService {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightingService {
    /// Creates a new service with the default theme.
    pub fn new() -> Self {
        Self::with_mapper(StyleMapper::default())
    }

    /// Creates a new service with a custom theme.
    pub fn with_mapper(mapper: StyleMapper) -> Self {
        Self { mapper, enabled: true, cache: None, metrics: HighlightingMetrics::default() }
    }

    /// Highlights `source`.
    ///
    /// When highlighting is disabled the text is only escaped.
    pub fn highlight(&mut self, source: &str) -> String {
        if !self.enabled {
            let escaped = escape_markup(source);
            return if escaped.is_empty() { EMPTY_PLACEHOLDER.to_string() } else { escaped };
        }

        let content_hash = calculate_content_hash(source);
        let cached = self
            .cache
            .as_ref()
            .filter(|cached| cached.content_hash == content_hash && cached.source_len == source.len());
        if let Some(cached) = cached {
            self.metrics.record_cache_hit();
            return cached.markup.clone();
        }

        self.metrics.record_cache_miss();

        let start_time = Instant::now();
        let (markup, token_count) = highlight_counted(source, &self.mapper);
        self.metrics.record_highlight(start_time.elapsed(), token_count);

        self.cache = Some(CachedMarkup { content_hash, source_len: source.len(), markup: markup.clone() });
        markup
    }

    /// Enables or disables highlighting.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns whether highlighting is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the theme in use.
    pub fn mapper(&self) -> &StyleMapper {
        &self.mapper
    }

    /// Replaces the theme. Cached output is dropped.
    pub fn set_mapper(&mut self, mapper: StyleMapper) {
        self.mapper = mapper;
        self.cache = None;
    }

    /// Returns the performance metrics.
    pub fn metrics(&self) -> &HighlightingMetrics {
        &self.metrics
    }

    /// Resets the performance metrics.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Drops cached output.
    pub fn clear_cache(&mut self) {
        self.cache = None;
    }
}

fn calculate_content_hash(source: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::style::Style;

    #[test]
    fn test_highlight_empty() {
        assert_eq!(highlight(""), "&nbsp;");
    }

    #[test]
    fn test_highlight_scenarios() {
        assert_eq!(highlight("// comment only"), "<span class=\"comment\">// comment only</span>");
        assert_eq!(highlight("\"abc"), "<span class=\"value\">\"abc</span>");
        assert!(highlight("x = 5").starts_with("<span class=\"variable\">x</span>"));
    }

    #[test]
    fn test_highlighting_metrics() {
        let mut metrics = HighlightingMetrics::default();

        metrics.record_highlight(Duration::from_millis(10), 5);
        metrics.record_highlight(Duration::from_millis(20), 3);

        assert_eq!(metrics.highlights_performed, 2);
        assert_eq!(metrics.tokens_generated, 8);
        assert_eq!(metrics.max_time, Duration::from_millis(20));
        assert_eq!(metrics.avg_time, Duration::from_millis(15));

        metrics.record_cache_hit();
        metrics.record_cache_miss();
        assert_eq!(metrics.cache_hit_ratio(), 0.5);

        metrics.reset();
        assert_eq!(metrics.highlights_performed, 0);
        assert_eq!(metrics.cache_hit_ratio(), 0.0);
    }

    #[test]
    fn test_service_matches_pipeline() {
        let mut service = HighlightingService::new();
        let source = "function f(a)\n  for i in a\n    total = total + i\n  end\nend";
        assert_eq!(service.highlight(source), highlight(source));
    }

    #[test]
    fn test_caching_behavior() {
        let mut service = HighlightingService::new();

        // First highlight should be a cache miss
        let first = service.highlight("x = 1");
        assert_eq!(service.metrics().cache_misses, 1);
        assert_eq!(service.metrics().cache_hits, 0);

        // Same text again should be a cache hit
        let second = service.highlight("x = 1");
        assert_eq!(first, second);
        assert_eq!(service.metrics().cache_misses, 1);
        assert_eq!(service.metrics().cache_hits, 1);

        // Different text should be a cache miss
        service.highlight("y = 2");
        assert_eq!(service.metrics().cache_misses, 2);
        assert_eq!(service.metrics().highlights_performed, 2);
    }

    #[test]
    fn test_theme_change_invalidates_cache() {
        let mut service = HighlightingService::new();
        assert_eq!(service.highlight("end"), "<span class=\"keyword\">end</span>");

        let mut mapper = StyleMapper::new();
        mapper.set_class(Style::Keyword, "kw");
        service.set_mapper(mapper);

        assert_eq!(service.highlight("end"), "<span class=\"kw\">end</span>");
        assert_eq!(service.metrics().cache_hits, 0);
    }

    #[test]
    fn test_disabled_service_escapes_only() {
        let mut service = HighlightingService::new();
        service.set_enabled(false);
        assert!(!service.is_enabled());

        assert_eq!(service.highlight("if a < b"), "if a &lt; b");
        assert_eq!(service.highlight(""), "&nbsp;");
        assert_eq!(service.metrics().cache_misses, 0);
    }
}
