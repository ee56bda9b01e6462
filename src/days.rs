// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Grouping of timestamped activities into calendar-day buckets.
//!
//! Buckets come out in the order their day was first seen in the input, not
//! in calendar order. Callers wanting a chronological feed sort first.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;
use serde::ser::{SerializeSeq, SerializeStruct, Serializer};

use crate::error::{Result, SplitError};
use crate::models::Activity;

const LABEL_FORMAT: &str = "%b %d, %Y";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Calendar used to decide which day a timestamp falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Local,
    Fixed(FixedOffset),
    Named(Tz),
}

impl Zone {
    /// Accepts `local`, `utc`/`z`, an IANA name such as `Europe/Rome`, or an
    /// offset such as `+02:00`.
    pub fn parse(s: &str) -> Option<Zone> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "local" => return Some(Zone::Local),
            "utc" | "z" => return Some(Zone::Named(Tz::UTC)),
            _ => {}
        }
        if let Ok(tz) = s.parse::<Tz>() {
            return Some(Zone::Named(tz));
        }
        s.parse::<FixedOffset>().ok().map(Zone::Fixed)
    }
}

/// Render a calendar date as a bucket key, e.g. `Apr 13, 2024`.
pub fn day_label(date: NaiveDate) -> String {
    date.format(LABEL_FORMAT).to_string()
}

/// Read a `created_at` value and return its calendar date in `tz`.
///
/// Values carrying an offset are converted into `tz`. Values without one are
/// wall-clock times already expressed in `tz` and keep their date.
pub fn parse_activity_date<Z: TimeZone>(raw: &str, tz: &Z) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz).date_naive());
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(tz).date_naive());
        }
    }
    if let Some(dt) = parse_js_date_string(raw) {
        return Some(dt.with_timezone(tz).date_naive());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    // A bare date names the calendar day itself, not UTC midnight, so it
    // lands on that day in every zone.
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

// `Sat Apr 13 2024 08:00:00 GMT+0200 (Central European Summer Time)`
fn parse_js_date_string(raw: &str) -> Option<DateTime<FixedOffset>> {
    let head = match raw.find(" (") {
        Some(i) => &raw[..i],
        None => raw,
    };
    DateTime::parse_from_str(head, "%a %b %d %Y %H:%M:%S GMT%z").ok()
}

/// Day buckets in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBuckets<T> {
    buckets: Vec<(String, Vec<T>)>,
    index: HashMap<String, usize>,
}

impl<T> Default for DayBuckets<T> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> DayBuckets<T> {
    fn push(&mut self, label: String, item: T) {
        match self.index.get(&label) {
            Some(&i) => self.buckets[i].1.push(item),
            None => {
                self.index.insert(label.clone(), self.buckets.len());
                self.buckets.push((label, vec![item]));
            }
        }
    }

    /// Number of distinct days.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of activities across all days.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn get(&self, label: &str) -> Option<&[T]> {
        self.index.get(label).map(|&i| self.buckets[i].1.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.buckets.iter().map(|(l, v)| (l.as_str(), v.as_slice()))
    }

    /// Transform every activity, keeping days and order.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> DayBuckets<U> {
        DayBuckets {
            buckets: self
                .buckets
                .into_iter()
                .map(|(l, v)| (l, v.into_iter().map(&mut f).collect()))
                .collect(),
            index: self.index,
        }
    }
}

struct DayEntry<'a, T> {
    day: &'a str,
    items: &'a [T],
}

impl<T: Serialize> Serialize for DayEntry<'_, T> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut st = s.serialize_struct("DayEntry", 2)?;
        st.serialize_field("day", self.day)?;
        st.serialize_field("items", self.items)?;
        st.end()
    }
}

impl<T: Serialize> Serialize for DayBuckets<T> {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(self.buckets.len()))?;
        for (day, items) in &self.buckets {
            seq.serialize_element(&DayEntry {
                day: day.as_str(),
                items: items.as_slice(),
            })?;
        }
        seq.end()
    }
}

/// Bucket activities by their calendar day in the machine's local zone.
pub fn bucket_by_day<A, I>(activities: I) -> Result<DayBuckets<A>>
where
    A: Activity,
    I: IntoIterator<Item = A>,
{
    bucket_by_day_in(activities, &Local)
}

/// Bucket activities by their calendar day in `tz`.
///
/// Fails on the first activity whose timestamp cannot be read; no partial
/// result is returned.
pub fn bucket_by_day_in<A, I, Z>(activities: I, tz: &Z) -> Result<DayBuckets<A>>
where
    A: Activity,
    I: IntoIterator<Item = A>,
    Z: TimeZone,
{
    let mut out = DayBuckets::default();
    for a in activities {
        let date = parse_activity_date(a.created_at(), tz).ok_or_else(|| {
            SplitError::InvalidTimestamp {
                id: a.id(),
                value: a.created_at().to_string(),
            }
        })?;
        out.push(day_label(date), a);
    }
    Ok(out)
}

/// Bucket using a [`Zone`] chosen at runtime.
pub fn bucket_by_day_zoned<A, I>(activities: I, zone: Zone) -> Result<DayBuckets<A>>
where
    A: Activity,
    I: IntoIterator<Item = A>,
{
    match zone {
        Zone::Local => bucket_by_day_in(activities, &Local),
        Zone::Fixed(off) => bucket_by_day_in(activities, &off),
        Zone::Named(tz) => bucket_by_day_in(activities, &tz),
    }
}
