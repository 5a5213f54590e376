//! Metric identifiers and the registry mapping them to implementations.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ontometrics_graph::AccessorError;
use serde::Serialize;

use crate::catalogue::{self, MetricContext};
use crate::diagnostics::Diagnostics;
use crate::error::MetricsError;
use crate::report::MetricValue;

/// Every metric the engine knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricName {
    /// Depth of hierarchy.
    Dit,
    /// Lack of cohesion (mean path length).
    Lcom,
    /// Weighted methods (paths per leaf).
    Wmc,
    /// Coupling between objects.
    Cbo,
    /// Ancestors per leaf.
    Nac,
    /// Children per concept.
    Noc,
    /// Tangledness.
    Tm,
    /// Response for concept.
    Rfc,
    /// Properties per concept.
    Nom,
    /// Relationship richness.
    Rr,
    /// Properties richness.
    Pr,
    /// Annotation richness.
    An,
    /// Attribute richness.
    Ar,
    /// Individual richness.
    Cr,
    /// Composability.
    Cp,
    /// Aggregability.
    Ag,
    /// Relationships per concept.
    Inr,
}

impl MetricName {
    /// All metrics in canonical order.
    pub const ALL: [MetricName; 17] = [
        MetricName::Dit,
        MetricName::Lcom,
        MetricName::Wmc,
        MetricName::Cbo,
        MetricName::Nac,
        MetricName::Noc,
        MetricName::Tm,
        MetricName::Rfc,
        MetricName::Nom,
        MetricName::Rr,
        MetricName::Pr,
        MetricName::An,
        MetricName::Ar,
        MetricName::Cr,
        MetricName::Cp,
        MetricName::Ag,
        MetricName::Inr,
    ];

    /// Canonical short code, e.g. `DIT`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            MetricName::Dit => "DIT",
            MetricName::Lcom => "LCOM",
            MetricName::Wmc => "WMC",
            MetricName::Cbo => "CBO",
            MetricName::Nac => "NAC",
            MetricName::Noc => "NOC",
            MetricName::Tm => "TM",
            MetricName::Rfc => "RFC",
            MetricName::Nom => "NOM",
            MetricName::Rr => "RR",
            MetricName::Pr => "PR",
            MetricName::An => "AN",
            MetricName::Ar => "AR",
            MetricName::Cr => "CR",
            MetricName::Cp => "CP",
            MetricName::Ag => "AG",
            MetricName::Inr => "INR",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            MetricName::Dit => "Depth of hierarchy",
            MetricName::Lcom => "Lack of cohesion in methods",
            MetricName::Wmc => "Weighted method count",
            MetricName::Cbo => "Coupling between objects",
            MetricName::Nac => "Number of ancestor classes",
            MetricName::Noc => "Number of children",
            MetricName::Tm => "Tangledness",
            MetricName::Rfc => "Response for a concept",
            MetricName::Nom => "Number of properties",
            MetricName::Rr => "Relationship richness",
            MetricName::Pr => "Properties richness",
            MetricName::An => "Annotation richness",
            MetricName::Ar => "Attribute richness",
            MetricName::Cr => "Class richness",
            MetricName::Cp => "Composability",
            MetricName::Ag => "Aggregability",
            MetricName::Inr => "Relationships per concept",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MetricName {
    type Err = MetricsError;

    /// Accepts the short code (`tm`, `TM`) or the long form (`TMOnto`,
    /// `CBOnto`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        MetricName::ALL
            .into_iter()
            .find(|m| {
                let code = m.code();
                upper == code
                    || upper.strip_suffix("ONTO") == Some(code)
                    || (code.ends_with('O') && upper.strip_suffix("NTO") == Some(code))
            })
            .ok_or_else(|| MetricsError::UnknownMetric(trimmed.to_string()))
    }
}

/// A metric implementation.
///
/// Metrics are pure functions of the context; anything worth reporting
/// besides the value goes into the diagnostics sink.
pub type MetricFn = fn(&MetricContext<'_>, &mut Diagnostics) -> Result<MetricValue, AccessorError>;

/// Explicit mapping from metric identifier to implementation.
#[derive(Clone)]
pub struct MetricRegistry {
    entries: BTreeMap<MetricName, MetricFn>,
}

impl MetricRegistry {
    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The registry of every built-in metric.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with(MetricName::Dit, catalogue::hierarchy::depth)
            .with(MetricName::Lcom, catalogue::hierarchy::mean_path_length)
            .with(MetricName::Wmc, catalogue::hierarchy::paths_per_leaf)
            .with(MetricName::Cbo, catalogue::hierarchy::coupling)
            .with(MetricName::Nac, catalogue::hierarchy::ancestors_per_leaf)
            .with(MetricName::Noc, catalogue::hierarchy::children_per_concept)
            .with(MetricName::Tm, catalogue::hierarchy::tangledness)
            .with(MetricName::Inr, catalogue::hierarchy::relationships_per_concept)
            .with(MetricName::Rfc, catalogue::properties::response_for_concept)
            .with(MetricName::Nom, catalogue::properties::properties_per_concept)
            .with(MetricName::Rr, catalogue::properties::relationship_richness)
            .with(MetricName::Pr, catalogue::properties::properties_richness)
            .with(MetricName::An, catalogue::richness::annotation_richness)
            .with(MetricName::Ar, catalogue::richness::attribute_richness)
            .with(MetricName::Cr, catalogue::richness::individual_richness)
            .with(MetricName::Cp, catalogue::composition::composability)
            .with(MetricName::Ag, catalogue::composition::aggregability)
    }

    /// Registers (or replaces) the implementation of `name`.
    #[must_use]
    pub fn with(mut self, name: MetricName, metric: MetricFn) -> Self {
        self.entries.insert(name, metric);
        self
    }

    /// The implementation of `name`, if registered.
    #[must_use]
    pub fn get(&self, name: MetricName) -> Option<MetricFn> {
        self.entries.get(&name).copied()
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: MetricName) -> bool {
        self.entries.contains_key(&name)
    }

    /// Registered metrics in canonical order.
    pub fn names(&self) -> impl Iterator<Item = MetricName> + '_ {
        self.entries.keys().copied()
    }

    /// Number of registered metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
