use crate::core::isin::Isin;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Gilts manually deemed inappropriate as pricing benchmarks.
///
/// ICMA guidance allows distortive issues (extreme coupons, special
/// structures) to be set aside by hand. This list is the only customization
/// point of the selection rules; the default list is empty, meaning every
/// gilt is appropriate.
///
/// # Examples
///
/// ```
/// use gilt_benchmark::core::exclusion::ExclusionList;
/// use gilt_benchmark::core::isin::Isin;
///
/// let mut exclusions = ExclusionList::new();
/// exclusions.exclude(Isin::new("GB0004893086"));
///
/// assert!(exclusions.is_excluded(&Isin::new("GB0004893086")));
/// assert!(!exclusions.is_excluded(&Isin::new("GB00BMGR2809")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionList {
    isins: BTreeSet<Isin>,
}

impl ExclusionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a gilt as inappropriate. Returns `false` if it was already listed.
    pub fn exclude(&mut self, isin: Isin) -> bool {
        self.isins.insert(isin)
    }

    pub fn is_excluded(&self, isin: &Isin) -> bool {
        self.isins.contains(isin)
    }

    pub fn len(&self) -> usize {
        self.isins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.isins.is_empty()
    }

    /// Excluded ISINs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Isin> {
        self.isins.iter()
    }
}

impl FromIterator<Isin> for ExclusionList {
    fn from_iter<T: IntoIterator<Item = Isin>>(iter: T) -> Self {
        Self {
            isins: iter.into_iter().collect(),
        }
    }
}
