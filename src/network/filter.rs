//! Device filtering for selective listing.
//!
//! # Design
//!
//! - **Pure Matchers**: [`LoopbackFilter`] and [`NameRegexFilter`] only answer
//!   "does this device match?" without include/exclude semantics.
//! - **Filter Chain**: [`FilterChain`] combines matchers:
//!   - Exclude filters: AND logic (must pass ALL excludes)
//!   - Include filters: OR logic (pass ANY include, empty = match all)
//! - **Decorator**: [`FilteredEnumerator`] applies filtering transparently
//!   to any [`DeviceEnumerator`] implementation.
//!
//! Filters only apply to enumeration. A device named explicitly by the
//! caller is always queried.

use regex::Regex;

use super::{DeviceEntry, DeviceEnumerator, QueryError};

/// Trait for filtering enumerated devices.
pub trait DeviceFilter {
    /// Returns `true` if the device matches this filter.
    fn matches(&self, device: &DeviceEntry) -> bool;
}

// ============================================================================
// LoopbackFilter - Pure matcher on the loopback flag
// ============================================================================

/// Matches loopback devices.
///
/// # Examples
///
/// ```
/// use etherinfo::network::filter::{DeviceFilter, LoopbackFilter};
/// use etherinfo::network::DeviceEntry;
///
/// assert!(LoopbackFilter.matches(&DeviceEntry::new("lo", true)));
/// assert!(!LoopbackFilter.matches(&DeviceEntry::new("eth0", false)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopbackFilter;

impl DeviceFilter for LoopbackFilter {
    fn matches(&self, device: &DeviceEntry) -> bool {
        device.loopback
    }
}

// ============================================================================
// NameRegexFilter - Pure matcher by name pattern
// ============================================================================

/// Matches devices whose name matches a regex pattern.
///
/// # Examples
///
/// ```
/// use etherinfo::network::filter::{DeviceFilter, NameRegexFilter};
/// use etherinfo::network::DeviceEntry;
///
/// let filter = NameRegexFilter::new(r"^eth").unwrap();
///
/// assert!(filter.matches(&DeviceEntry::new("eth0", false)));
/// assert!(!filter.matches(&DeviceEntry::new("wlan0", false)));
/// ```
#[derive(Debug)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// Creates a name filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns a reference to the regex pattern.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl DeviceFilter for NameRegexFilter {
    fn matches(&self, device: &DeviceEntry) -> bool {
        self.pattern.is_match(&device.name)
    }
}

// ============================================================================
// FilterChain - Include OR / Exclude AND semantics
// ============================================================================

/// Filter chain with include/exclude semantics.
///
/// Evaluation order:
/// 1. **Exclude filters (AND)**: Any match → reject.
/// 2. **Include filters (OR)**: Any match → accept. Empty includes = match all.
///
/// # Examples
///
/// ```
/// use etherinfo::network::filter::{DeviceFilter, FilterChain, LoopbackFilter, NameRegexFilter};
/// use etherinfo::network::DeviceEntry;
///
/// let chain = FilterChain::new()
///     .exclude(LoopbackFilter)
///     .include(NameRegexFilter::new("^en").unwrap());
///
/// assert!(chain.matches(&DeviceEntry::new("enp3s0", false)));
/// assert!(!chain.matches(&DeviceEntry::new("wlan0", false)));
/// assert!(!chain.matches(&DeviceEntry::new("lo", true)));
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn DeviceFilter>>,
    excludes: Vec<Box<dyn DeviceFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all devices).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include filter (OR semantics).
    #[must_use]
    pub fn include<F: DeviceFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude filter (AND semantics - must not match ANY).
    #[must_use]
    pub fn exclude<F: DeviceFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns the number of include filters.
    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    /// Returns the number of exclude filters.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Returns true if no filters are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl DeviceFilter for FilterChain {
    fn matches(&self, device: &DeviceEntry) -> bool {
        if self.excludes.iter().any(|f| f.matches(device)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(device))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

/// An enumerator decorator that applies a filter to results.
///
/// # Examples
///
/// ```ignore
/// use etherinfo::network::filter::{FilteredEnumerator, LoopbackFilter, FilterChain};
/// use etherinfo::network::platform::NetlinkClient;
///
/// let client = NetlinkClient::new();
/// let devices = FilteredEnumerator::new(&client, FilterChain::new().exclude(LoopbackFilter));
/// let names = devices.list_devices()?;
/// ```
#[derive(Debug)]
pub struct FilteredEnumerator<E, F> {
    inner: E,
    filter: F,
}

impl<E, F> FilteredEnumerator<E, F> {
    /// Creates a new filtered enumerator.
    #[must_use]
    pub const fn new(inner: E, filter: F) -> Self {
        Self { inner, filter }
    }

    /// Returns a reference to the filter.
    pub const fn filter(&self) -> &F {
        &self.filter
    }
}

impl<E: DeviceEnumerator, F: DeviceFilter> DeviceEnumerator for FilteredEnumerator<E, F> {
    fn list_devices(&self) -> Result<Vec<DeviceEntry>, QueryError> {
        let devices = self.inner.list_devices()?;
        Ok(devices
            .into_iter()
            .filter(|device| {
                let keep = self.filter.matches(device);
                if !keep {
                    tracing::debug!(device = %device.name, "Device filtered out");
                }
                keep
            })
            .collect())
    }
}

impl<T: DeviceFilter + ?Sized> DeviceFilter for &T {
    fn matches(&self, device: &DeviceEntry) -> bool {
        (*self).matches(device)
    }
}

impl DeviceFilter for Box<dyn DeviceFilter> {
    fn matches(&self, device: &DeviceEntry) -> bool {
        self.as_ref().matches(device)
    }
}
