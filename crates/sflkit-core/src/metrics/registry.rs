// sflkit-core/src/metrics/registry.rs
// ============================================================================
// Module: Metric Registry
// Description: Name → formula lookup table built once behind a OnceLock.
// Purpose: Let configuration/persisted JSON reference metrics by string name.
// Dependencies: std::sync::OnceLock, crate::metrics::formulas
// ============================================================================

//! ## Overview
//! `events.metrics` (and the `metric` argument to `get_metric`/`get_suggestion`)
//! names a formula by string. Rather than a giant `match` at every callsite,
//! every formula is registered once into a `HashMap<&'static str, MetricFn>`
//! built behind a [`OnceLock`], matching the "named lookup built once" idiom.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::metrics::formulas as f;
use crate::metrics::formulas::MetricCounts;

// ============================================================================
// SECTION: Metric Name
// ============================================================================

/// A metric formula name, validated against the registry at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct MetricName(String);

impl MetricName {
    /// Builds a metric name without validating it against the registry.
    /// Validation happens lazily on first lookup, which returns `None` for
    /// an unknown name rather than failing construction.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The crate's default spectrum metric (Ochiai).
    #[must_use]
    pub fn default_spectrum() -> Self {
        Self::new("ochiai")
    }

    /// The crate's default predicate metric (`IncreaseTrue`, handled outside
    /// the closed-form registry since it reads importance stats, not counts).
    #[must_use]
    pub fn default_predicate() -> Self {
        Self::new("increase_true")
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MetricName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Metric Function
// ============================================================================

/// A closed-form metric formula over [`MetricCounts`].
pub type MetricFn = fn(MetricCounts) -> f64;

static REGISTRY: OnceLock<HashMap<&'static str, MetricFn>> = OnceLock::new();

fn build_registry() -> HashMap<&'static str, MetricFn> {
    let mut map: HashMap<&'static str, MetricFn> = HashMap::new();
    map.insert("ample", f::ample);
    map.insert("ample2", f::ample2);
    map.insert("anderberg", f::anderberg);
    map.insert("arithmetic_mean", f::arithmetic_mean);
    map.insert("binary", f::binary);
    map.insert("cbi_inc", f::cbi_inc);
    map.insert("cohen", f::cohen);
    map.insert("crosstab", f::crosstab);
    map.insert("dice", f::dice);
    map.insert("dstar", f::dstar2);
    map.insert("euclid", f::euclid);
    map.insert("fleiss", f::fleiss);
    map.insert("gp02", f::gp02);
    map.insert("gp03", f::gp03);
    map.insert("gp13", f::gp13);
    map.insert("gp19", f::gp19);
    map.insert("goodman", f::goodman);
    map.insert("hamann", f::hamann);
    map.insert("hamming_etc", f::hamming_etc);
    map.insert("harmonic_mean", f::harmonic_mean);
    map.insert("jaccard", f::jaccard);
    map.insert("kulczynski1", f::kulczynski1);
    map.insert("kulczynski2", f::kulczynski2);
    map.insert("m1", f::m1);
    map.insert("m2", f::m2);
    map.insert("naish1", f::naish1);
    map.insert("naish2", f::naish2);
    map.insert("ochiai", f::ochiai);
    map.insert("ochiai2", f::ochiai2);
    map.insert("pair_scoring", f::pair_scoring);
    map.insert("qe", f::qe);
    map.insert("rogers_and_tanimoto", f::rogers_and_tanimoto);
    map.insert("rogot1", f::rogot1);
    map.insert("rogot2", f::rogot2);
    map.insert("russel_and_rao", f::russel_and_rao);
    map.insert("scott", f::scott);
    map.insert("simple_matching", f::simple_matching);
    map.insert("sokal", f::sokal);
    map.insert("sorensen_dice", f::sorensen_dice);
    map.insert("tarantula", f::tarantula);
    map.insert("wong1", f::wong1);
    map.insert("wong2", f::wong2);
    map.insert("wong3", f::wong3);
    map.insert("zoltar", f::zoltar);
    map
}

/// Looks up a registered metric formula by name.
#[must_use]
pub fn lookup(name: &str) -> Option<MetricFn> {
    REGISTRY.get_or_init(build_registry).get(name).copied()
}

/// Returns every registered metric name, for config validation and tests.
#[must_use]
pub fn registered_names() -> Vec<&'static str> {
    REGISTRY.get_or_init(build_registry).keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_metric_name_looks_up_to_none() {
        assert!(lookup("not_a_real_metric").is_none());
    }

    #[test]
    fn default_spectrum_and_predicate_names_are_registered_or_importance_backed() {
        assert!(lookup(MetricName::default_spectrum().as_str()).is_some());
        // increase_true is computed from Liblit importance stats, not the closed-form registry.
        assert!(lookup(MetricName::default_predicate().as_str()).is_none());
    }

    #[test]
    fn registered_names_all_resolve_through_lookup() {
        for name in registered_names() {
            assert!(lookup(name).is_some(), "`{name}` listed but unresolvable");
        }
    }
}
