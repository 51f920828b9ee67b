//! Question kind filtering
//!
//! Partitions the known question kinds into the ones random selection must
//! never pick and the ones that always need a human grader. The partition is
//! computed once and then shared read-only.

use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

use crate::bank::KindSource;
use crate::error::{Result, TagdrawError};

/// Kind name of selector questions themselves
pub const SELECTOR_KIND: &str = "randomtag";

/// Built-in kinds: (name, usable by random selection, requires manual grading)
pub const STANDARD_KINDS: &[(&str, bool, bool)] = &[
    ("multichoice", true, false),
    ("truefalse", true, false),
    ("shortanswer", true, false),
    ("numerical", true, false),
    ("match", true, false),
    ("calculated", true, false),
    ("essay", true, true),
    ("description", false, false),
    (SELECTOR_KIND, false, true),
];

/// A question kind and its capability flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindDescriptor {
    pub name: String,
    pub usable_by_random: bool,
    pub requires_manual_grading: bool,
}

impl KindDescriptor {
    pub fn new(name: impl Into<String>, usable_by_random: bool, requires_manual_grading: bool) -> Self {
        Self {
            name: name.into(),
            usable_by_random,
            requires_manual_grading,
        }
    }

    pub fn standard() -> Vec<KindDescriptor> {
        STANDARD_KINDS
            .iter()
            .map(|&(name, random, manual)| KindDescriptor::new(name, random, manual))
            .collect()
    }
}

/// Immutable forbidden/manual kind sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindFilter {
    forbidden: BTreeSet<String>,
    manual: BTreeSet<String>,
}

impl KindFilter {
    /// Enumerate `source` once and partition it.
    ///
    /// A kind that random selection cannot use is forbidden and never also
    /// counted as manual. The selector kind is always forbidden.
    pub fn compute(source: &dyn KindSource) -> Result<Self> {
        let kinds = source.kinds().map_err(|e| TagdrawError::KindRegistry {
            reason: e.to_string(),
        })?;

        let mut forbidden = BTreeSet::new();
        let mut manual = BTreeSet::new();
        for kind in kinds {
            if !kind.usable_by_random {
                forbidden.insert(kind.name);
            } else if kind.requires_manual_grading {
                manual.insert(kind.name);
            }
        }
        manual.remove(SELECTOR_KIND);
        forbidden.insert(SELECTOR_KIND.to_string());

        tracing::debug!(
            forbidden = ?forbidden,
            manual = ?manual,
            "kind filter computed"
        );

        Ok(Self { forbidden, manual })
    }

    /// Kinds random selection must never return
    pub fn forbidden_kinds(&self) -> &BTreeSet<String> {
        &self.forbidden
    }

    /// Selectable kinds that always require manual grading
    pub fn manual_kinds(&self) -> &BTreeSet<String> {
        &self.manual
    }

    pub fn is_forbidden(&self, kind: &str) -> bool {
        self.forbidden.contains(kind)
    }
}

/// Lazily computed, process-wide [`KindFilter`].
///
/// Concurrent first callers serialize on the init lock, so the source is
/// enumerated exactly once and nobody sees a half-built filter. After that,
/// reads are lock-free. A failed enumeration leaves the cell empty.
#[derive(Debug, Default)]
pub struct KindFilterCell {
    filter: OnceLock<KindFilter>,
    init_lock: Mutex<()>,
}

impl KindFilterCell {
    pub const fn new() -> Self {
        Self {
            filter: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    pub fn get_or_compute(&self, source: &dyn KindSource) -> Result<&KindFilter> {
        if let Some(filter) = self.filter.get() {
            return Ok(filter);
        }

        let _guard = self
            .init_lock
            .lock()
            .map_err(|e| TagdrawError::Other(format!("kind filter lock poisoned: {}", e)))?;

        if let Some(filter) = self.filter.get() {
            return Ok(filter);
        }

        let computed = KindFilter::compute(source)?;
        Ok(self.filter.get_or_init(|| computed))
    }

    /// The filter, if it has been computed
    pub fn get(&self) -> Option<&KindFilter> {
        self.filter.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        calls: AtomicUsize,
        kinds: Vec<KindDescriptor>,
    }

    impl KindSource for CountingSource {
        fn kinds(&self) -> Result<Vec<KindDescriptor>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(5));
            Ok(self.kinds.clone())
        }
    }

    struct FailingSource;

    impl KindSource for FailingSource {
        fn kinds(&self) -> Result<Vec<KindDescriptor>> {
            Err(TagdrawError::Other("registry offline".to_string()))
        }
    }

    #[test]
    fn test_standard_partition() {
        let filter = KindFilter::compute(&KindDescriptor::standard()).unwrap();

        assert!(filter.is_forbidden("description"));
        assert!(filter.is_forbidden(SELECTOR_KIND));
        assert!(!filter.is_forbidden("multichoice"));
        assert!(filter.manual_kinds().contains("essay"));
        assert!(!filter.manual_kinds().contains(SELECTOR_KIND));
    }

    #[test]
    fn test_selector_kind_forbidden_even_when_unlisted() {
        let kinds = vec![KindDescriptor::new("multichoice", true, false)];
        let filter = KindFilter::compute(&kinds).unwrap();
        assert!(filter.is_forbidden(SELECTOR_KIND));
        assert_eq!(filter.forbidden_kinds().len(), 1);
    }

    #[test]
    fn test_forbidden_kind_is_never_manual() {
        let kinds = vec![KindDescriptor::new("oral", false, true)];
        let filter = KindFilter::compute(&kinds).unwrap();
        assert!(filter.is_forbidden("oral"));
        assert!(filter.manual_kinds().is_empty());
    }

    #[test]
    fn test_enumeration_failure_is_reported() {
        let err = KindFilter::compute(&FailingSource).unwrap_err();
        assert!(matches!(err, TagdrawError::KindRegistry { .. }));

        let cell = KindFilterCell::new();
        assert!(cell.get_or_compute(&FailingSource).is_err());
        assert!(cell.get().is_none());
    }

    #[test]
    fn test_cell_computes_once_across_threads() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            kinds: KindDescriptor::standard(),
        });
        let cell = Arc::new(KindFilterCell::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = Arc::clone(&source);
                let cell = Arc::clone(&cell);
                std::thread::spawn(move || {
                    let filter = cell.get_or_compute(source.as_ref()).unwrap();
                    filter.forbidden_kinds().len()
                })
            })
            .collect();

        let sizes: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(sizes.iter().all(|&n| n == sizes[0]));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
