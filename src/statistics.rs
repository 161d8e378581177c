//! Small running accumulators for analysis bookkeeping.
//!
//! Pure numerical recurrences with no dependency on the rest of the crate.

use num_traits::Float;

/// Tracks the smallest and largest value seen so far.
///
/// # Examples
///
/// ```
/// use detclock::MinMaxCollector;
///
/// let mut range = MinMaxCollector::new();
/// assert!(!range.has_data());
///
/// range.extend([5, 1, 3]);
/// assert_eq!(range.min(), Some(1));
/// assert_eq!(range.max(), Some(5));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MinMaxCollector<T> {
    bounds: Option<(T, T)>,
}

impl<T> MinMaxCollector<T>
where
    T: PartialOrd + Copy,
{
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self { bounds: None }
    }

    /// Accounts for one value.
    pub fn add(&mut self, value: T) {
        self.bounds = match self.bounds {
            None => Some((value, value)),
            Some((min, max)) => Some((
                if value < min { value } else { min },
                if value > max { value } else { max },
            )),
        };
    }

    /// Whether any value has been collected.
    pub fn has_data(&self) -> bool {
        self.bounds.is_some()
    }

    /// The smallest value seen, if any.
    pub fn min(&self) -> Option<T> {
        self.bounds.map(|(min, _)| min)
    }

    /// The largest value seen, if any.
    pub fn max(&self) -> Option<T> {
        self.bounds.map(|(_, max)| max)
    }

    /// Forgets everything collected so far.
    pub fn clear(&mut self) {
        self.bounds = None;
    }
}

impl<T: PartialOrd + Copy> Extend<T> for MinMaxCollector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: PartialOrd + Copy> FromIterator<T> for MinMaxCollector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collector = Self::new();
        collector.extend(iter);
        collector
    }
}

/// Running weighted mean and variance.
///
/// Keeps the number of entries and the weighted sums of `1`, `x` and `x^2`;
/// derived figures are recomputed on demand.
///
/// # Examples
///
/// ```
/// use detclock::WeightedStats;
///
/// let mut stats = WeightedStats::new();
/// stats.add_weighted(3.0, 2.0);
/// stats.add_weighted(4.0, 2.0);
/// stats.add_weighted(5.0, 1.0);
///
/// assert_eq!(stats.count(), 3);
/// assert_eq!(stats.average(), Some(3.8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedStats<F = f64> {
    entries: usize,
    sum_weights: F,
    sum_weighted: F,
    sum_weighted_squares: F,
}

impl<F: Float> WeightedStats<F> {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self {
            entries: 0,
            sum_weights: F::zero(),
            sum_weighted: F::zero(),
            sum_weighted_squares: F::zero(),
        }
    }

    /// Accounts for one value with unit weight.
    pub fn add(&mut self, value: F) {
        self.add_weighted(value, F::one());
    }

    /// Accounts for one value with the given weight.
    pub fn add_weighted(&mut self, value: F, weight: F) {
        self.entries += 1;
        self.sum_weights = self.sum_weights + weight;
        self.sum_weighted = self.sum_weighted + weight * value;
        self.sum_weighted_squares = self.sum_weighted_squares + weight * value * value;
    }

    /// Number of entries accounted for, regardless of their weight.
    pub fn count(&self) -> usize {
        self.entries
    }

    /// Total weight collected.
    pub fn weights(&self) -> F {
        self.sum_weights
    }

    /// The weighted average, or `None` while the total weight is not
    /// positive.
    pub fn average(&self) -> Option<F> {
        (self.sum_weights > F::zero()).then(|| self.sum_weighted / self.sum_weights)
    }

    /// The weighted variance, or `None` while the total weight is not
    /// positive.
    pub fn variance(&self) -> Option<F> {
        self.average()
            .map(|avg| self.sum_weighted_squares / self.sum_weights - avg * avg)
    }

    /// The weighted root mean square deviation, or `None` while the total
    /// weight is not positive.
    pub fn rms(&self) -> Option<F> {
        self.variance().map(F::sqrt)
    }

    /// Forgets everything collected so far.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<F: Float> Default for WeightedStats<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> Extend<F> for WeightedStats<F> {
    fn extend<I: IntoIterator<Item = F>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_empty() {
        let range = MinMaxCollector::<i32>::new();
        assert!(!range.has_data());
        assert_eq!(range.min(), None);
        assert_eq!(range.max(), None);
    }

    #[test]
    fn min_max_collects() {
        let range: MinMaxCollector<i32> = [5, 1, 3].into_iter().collect();
        assert!(range.has_data());
        assert_eq!(range.min(), Some(1));
        assert_eq!(range.max(), Some(5));
    }

    #[test]
    fn min_max_single_value_is_both() {
        let mut range = MinMaxCollector::new();
        range.add(2.5);
        assert_eq!(range.min(), Some(2.5));
        assert_eq!(range.max(), Some(2.5));
    }

    #[test]
    fn min_max_clear_forgets() {
        let mut range: MinMaxCollector<i32> = [5, 1, 3].into_iter().collect();
        range.clear();
        assert!(!range.has_data());
    }

    #[test]
    fn weighted_average() {
        let mut stats = WeightedStats::new();
        stats.add_weighted(3.0, 2.0);
        stats.add_weighted(4.0, 2.0);
        stats.add_weighted(5.0, 1.0);

        assert_eq!(stats.count(), 3);
        assert_eq!(stats.weights(), 5.0);
        // (6 + 8 + 5) / 5
        assert_eq!(stats.average(), Some(3.8));
    }

    #[test]
    fn unweighted_entries_have_unit_weight() {
        let mut stats = WeightedStats::new();
        stats.extend([1.0, 2.0, 3.0]);

        assert_eq!(stats.count(), 3);
        assert_eq!(stats.weights(), 3.0);
        assert_eq!(stats.average(), Some(2.0));
    }

    #[test]
    fn variance_and_rms() {
        let mut stats = WeightedStats::new();
        stats.extend([2.0, 4.0]);

        // mean 3, spread of exactly 1 around it
        assert_eq!(stats.average(), Some(3.0));
        assert_eq!(stats.variance(), Some(1.0));
        assert_eq!(stats.rms(), Some(1.0));
    }

    #[test]
    fn empty_stats_have_no_figures() {
        let stats = WeightedStats::<f64>::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.average(), None);
        assert_eq!(stats.variance(), None);
        assert_eq!(stats.rms(), None);
    }
}
