//! Shared curve registry: a two-level index (animation source id, target id)
//! over reference-counted curves, so one loaded animation asset is shared by
//! every consumer without re-parsing.
//!
//! The registry is an explicitly constructed value owned by the animation
//! subsystem; loaders register curves into it and consumers fetch by key
//! once per frame. Curves are `Arc`-shared: a curve lives as long as its
//! registry entry or any external handle, whichever is longer, so removal
//! and overwrite never invalidate a handle a consumer already holds.

use std::collections::hash_map;
use std::collections::HashMap;
use std::sync::Arc;

use crate::curve::AnimationCurve;
use crate::error::CurveError;

/// All channels of one animation source, keyed by target id (e.g. bone name).
#[derive(Clone, Debug, Default)]
pub struct CurveSet {
    curves: HashMap<String, Arc<AnimationCurve>>,
}

impl CurveSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a curve under `target_id`, returning the curve it replaced.
    pub fn insert(
        &mut self,
        target_id: impl Into<String>,
        curve: Arc<AnimationCurve>,
    ) -> Option<Arc<AnimationCurve>> {
        self.curves.insert(target_id.into(), curve)
    }

    /// Get the curve for a target, if one is registered.
    #[inline]
    pub fn get(&self, target_id: &str) -> Option<&Arc<AnimationCurve>> {
        self.curves.get(target_id)
    }

    /// Detach and return the curve for a target.
    pub fn remove(&mut self, target_id: &str) -> Option<Arc<AnimationCurve>> {
        self.curves.remove(target_id)
    }

    /// Number of registered targets.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Iterate over `(target_id, curve)` pairs in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Arc<AnimationCurve>> {
        self.curves.iter()
    }

    /// The registered target ids, in arbitrary order.
    pub fn target_ids(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }
}

/// Index of animation curves by source id (typically the animation asset
/// path) and target id.
///
/// Lookup misses are a first-class `None`, never an error: an unanimated
/// channel is expected, and callers fall back to their bind pose or default.
/// Not internally synchronized; registration and lookup take `&mut self` /
/// `&self`, and a host that mutates from multiple threads supplies its own
/// lock around the registry.
#[derive(Debug, Default)]
pub struct CurveRegistry {
    sources: HashMap<String, CurveSet>,
}

impl CurveRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry sized for `sources` animation sources.
    pub fn with_capacity(sources: usize) -> Self {
        Self {
            sources: HashMap::with_capacity(sources),
        }
    }

    /// Build a shared curve from decoded keyframe arrays.
    ///
    /// This is the canonical path from loader output to a registrable curve;
    /// see [`AnimationCurve::from_keyframes`] for the layout contract.
    pub fn create_curve(
        &self,
        component_width: usize,
        key_times: &[u32],
        key_values: &[f32],
    ) -> Result<Arc<AnimationCurve>, CurveError> {
        Ok(Arc::new(AnimationCurve::from_keyframes(
            component_width,
            key_times,
            key_values,
        )?))
    }

    /// Fetch the curve registered under `(source_id, target_id)`.
    ///
    /// The returned handle is a cheap clone; fetching once per frame is fine.
    pub fn get_curve(&self, source_id: &str, target_id: &str) -> Option<Arc<AnimationCurve>> {
        self.sources
            .get(source_id)?
            .get(target_id)
            .cloned()
    }

    /// The curve set for a source, if one is registered.
    #[inline]
    pub fn get_curve_set(&self, source_id: &str) -> Option<&CurveSet> {
        self.sources.get(source_id)
    }

    /// Mutable access to the curve set for a source.
    #[inline]
    pub fn get_curve_set_mut(&mut self, source_id: &str) -> Option<&mut CurveSet> {
        self.sources.get_mut(source_id)
    }

    /// Register a curve under `(source_id, target_id)`, creating the curve
    /// set on demand. Returns the curve it replaced, if any.
    pub fn add_curve(
        &mut self,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        curve: Arc<AnimationCurve>,
    ) -> Option<Arc<AnimationCurve>> {
        let source_id = source_id.into();
        let target_id = target_id.into();
        let replaced = self
            .sources
            .entry(source_id.clone())
            .or_default()
            .insert(target_id.clone(), curve);
        if replaced.is_some() {
            log::warn!("curve replaced at ({source_id}, {target_id})");
        } else {
            log::debug!("curve registered at ({source_id}, {target_id})");
        }
        replaced
    }

    /// Replace the entire curve set for a source. Returns the previous set.
    pub fn add_curve_set(
        &mut self,
        source_id: impl Into<String>,
        curve_set: CurveSet,
    ) -> Option<CurveSet> {
        self.sources.insert(source_id.into(), curve_set)
    }

    /// Register an empty curve set for a source and return it for
    /// population, replacing any set already there.
    pub fn create_curve_set(&mut self, source_id: impl Into<String>) -> &mut CurveSet {
        match self.sources.entry(source_id.into()) {
            hash_map::Entry::Occupied(mut entry) => {
                log::warn!("curve set replaced for source {}", entry.key());
                entry.insert(CurveSet::new());
                entry.into_mut()
            }
            hash_map::Entry::Vacant(entry) => entry.insert(CurveSet::new()),
        }
    }

    /// Detach the curve registered under `(source_id, target_id)`.
    ///
    /// Only the registry's entry is dropped; handles held elsewhere keep the
    /// curve alive.
    pub fn remove_curve(
        &mut self,
        source_id: &str,
        target_id: &str,
    ) -> Option<Arc<AnimationCurve>> {
        let removed = self.sources.get_mut(source_id)?.remove(target_id);
        if removed.is_some() {
            log::debug!("curve removed at ({source_id}, {target_id})");
        }
        removed
    }

    /// Detach the entire curve set for a source.
    pub fn remove_curve_set(&mut self, source_id: &str) -> Option<CurveSet> {
        let removed = self.sources.remove(source_id);
        if removed.is_some() {
            log::debug!("curve set removed for source {source_id}");
        }
        removed
    }

    /// Number of registered sources.
    #[inline]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The registered source ids, in arbitrary order.
    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    /// Drop every registered curve set. Curves shared with consumers stay
    /// alive through their handles.
    pub fn clear(&mut self) {
        self.sources.clear();
    }
}
