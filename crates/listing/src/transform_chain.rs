//! The TransformChain applies page transforms in order.
//!
//! This module provides the TransformChain struct that chains transforms
//! together using the builder pattern.

use crate::traits::{PageTransform, ViewContext};
use market_types::Project;
use tracing::debug;

/// Chains multiple transforms together.
///
/// ## Usage
/// ```ignore
/// let chain = TransformChain::new()
///     .add_transform(StatusTabFilter::new(tab))
///     .add_transform(FavoriteFirst);
///
/// let shown = chain.apply(page.items, &ViewContext::new(&favorites, true));
/// ```
#[derive(Default)]
pub struct TransformChain {
    transforms: Vec<Box<dyn PageTransform>>,
}

impl TransformChain {
    /// Create a new empty TransformChain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transform to the chain (builder pattern).
    pub fn add_transform(mut self, transform: impl PageTransform + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Apply every transform in the order they were added.
    pub fn apply(&self, items: Vec<Project>, context: &ViewContext<'_>) -> Vec<Project> {
        let mut current = items;
        for transform in &self.transforms {
            debug!(
                "Applying transform: {} (input count: {})",
                transform.name(),
                current.len()
            );
            current = transform.apply(current, context);
        }
        current
    }
}
