//! Time series clicks: finding the image of a clicked date.
//!
//! A chart of a time series reports clicks as a timestamp in
//! milliseconds since the Unix epoch.  [`Series::at`] returns the item
//! acquired at exactly that instant so the view can display it.

use chrono::{DateTime, Utc};
use tracing::trace;

/// Scale, in meters, at which region means are reduced when none is
/// given.
pub const DEFAULT_SCALE: f64 = 2000.;

/// Items ordered by acquisition time.
#[derive(Clone, Debug, PartialEq)]
pub struct Series<T> {
    items: Vec<(i64, T)>,
}

impl<T> Default for Series<T> {
    fn default() -> Self { Series { items: vec![] } }
}

impl<T> FromIterator<(i64, T)> for Series<T> {
    fn from_iter<I: IntoIterator<Item = (i64, T)>>(iter: I) -> Self {
        Series { items: iter.into_iter().collect() }
    }
}

impl<T> Series<T> {
    pub fn new() -> Self { Series::default() }

    /// Append `item` acquired at `time_start` (milliseconds).
    pub fn push(&mut self, time_start: i64, item: T) {
        self.items.push((time_start, item));
    }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// The first item shown on the map, before any click.
    pub fn first(&self) -> Option<&T> {
        self.items.first().map(|(_, x)| x)
    }

    /// The first item whose timestamp equals `time_start`.
    ///
    /// # Example
    ///
    /// ```
    /// use map_brewery::Series;
    /// let s: Series<&str> = [(0, "a"), (86_400_000, "b")].into_iter()
    ///     .collect();
    /// assert_eq!(s.at(86_400_000), Some(&"b"));
    /// assert_eq!(s.at(1), None);
    /// ```
    pub fn at(&self, time_start: i64) -> Option<&T> {
        let found = self.items.iter().find(|(t, _)| *t == time_start);
        trace!(time_start, found = found.is_some(), "series click");
        found.map(|(_, x)| x)
    }

    /// Timestamps and items, in order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &T)> {
        self.items.iter().map(|(t, x)| (*t, x))
    }
}

fn utc(time_start: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(time_start)
}

/// The date of `time_start` as `yyyy-MM-dd` (UTC), for the label of
/// the clicked image.
pub fn iso_date(time_start: i64) -> Option<String> {
    utc(time_start).map(|d| d.format("%Y-%m-%d").to_string())
}

/// The chart title after a click, e.g. `Tue, 01 Jan 2019 00:00:00 GMT`.
pub fn utc_title(time_start: i64) -> Option<String> {
    utc(time_start).map(|d| d.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}
