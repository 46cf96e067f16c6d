//! Out-of-band hint vocabulary.
//!
//! Hints are per-request signals (preload, preconnect) carried to the
//! consumer alongside the serialized payload, orthogonal to the payload
//! itself. An integration that supports no hints carries [`Hints::none`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Relative fetch priority attached to a preload hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintPriority {
    High,
    Low,
}

/// A single out-of-band signal for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HintModel {
    /// Start fetching a resource before the payload references it.
    Preload {
        href: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        priority: Option<HintPriority>,
    },
    /// Open a connection to an origin ahead of first use.
    Preconnect { href: String },
}

impl HintModel {
    /// Deduplication key: at most one hint per (kind, href) within a request.
    pub fn dedupe_key(&self) -> String {
        match self {
            Self::Preload { href, .. } => format!("preload:{}", href),
            Self::Preconnect { href } => format!("preconnect:{}", href),
        }
    }
}

/// Accumulated hints for one request, in emission order, deduplicated by key.
#[derive(Debug, Default, Clone)]
pub struct Hints {
    entries: Vec<HintModel>,
    seen: HashSet<String>,
}

impl Hints {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The empty value carried by integrations that support no hints.
    pub fn none() -> Self {
        Self::default()
    }

    /// Record a hint. Returns `false` when an equivalent hint was already
    /// recorded for this request.
    pub fn push(&mut self, hint: HintModel) -> bool {
        if !self.seen.insert(hint.dedupe_key()) {
            return false;
        }
        self.entries.push(hint);
        true
    }

    /// Number of distinct hints recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no hints were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate hints in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &HintModel> {
        self.entries.iter()
    }

    /// Consume the accumulator, yielding hints in emission order.
    pub fn into_vec(self) -> Vec<HintModel> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_dedupes_by_kind_and_href() {
        let mut hints = Hints::new();
        assert!(hints.push(HintModel::Preload {
            href: "/chunks/chart.js".to_string(),
            priority: Some(HintPriority::High),
        }));
        // Same kind+href, different priority: still a duplicate.
        assert!(!hints.push(HintModel::Preload {
            href: "/chunks/chart.js".to_string(),
            priority: None,
        }));
        // Different kind, same href: distinct.
        assert!(hints.push(HintModel::Preconnect {
            href: "/chunks/chart.js".to_string(),
        }));
        assert_eq!(hints.len(), 2);

        let keys: Vec<String> = hints.iter().map(HintModel::dedupe_key).collect();
        assert_eq!(keys, vec!["preload:/chunks/chart.js", "preconnect:/chunks/chart.js"]);
    }

    #[test]
    fn test_none_is_empty() {
        assert!(Hints::none().is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let hint = HintModel::Preload {
            href: "/chunks/a.js".to_string(),
            priority: Some(HintPriority::Low),
        };
        let json = serde_json::to_value(&hint).expect("serialize hint");
        assert_eq!(
            json,
            serde_json::json!({"kind": "preload", "href": "/chunks/a.js", "priority": "low"})
        );
    }
}
