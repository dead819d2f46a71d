//! Per-slot weather cache with stale-on-error retention.

use crate::geolocate::Geolocator;
use crate::provider::WeatherSource;
use crate::slots::{CitySlot, CitySlots};
use crate::types::{WeatherError, WeatherSnapshot};
use std::time::{Duration, Instant};

/// A snapshot and the instant it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub snapshot: WeatherSnapshot,
    pub fetched_at: Instant,
}

/// Latest good snapshot per city slot, indexed 1:1 with the slot list.
///
/// Entries are only ever replaced by a complete, successfully parsed
/// snapshot. Nothing expires on its own; callers decide what "fresh" means.
#[derive(Debug)]
pub struct WeatherCache {
    slots: CitySlots,
    entries: Vec<Option<CacheEntry>>,
}

impl WeatherCache {
    pub fn new(slots: CitySlots) -> Self {
        let entries = vec![None; slots.len()];
        Self { slots, entries }
    }

    pub fn slots(&self) -> &CitySlots {
        &self.slots
    }

    pub fn entry(&self, index: usize) -> Option<&CacheEntry> {
        self.entries.get(index).and_then(Option::as_ref)
    }

    pub fn get(&self, index: usize) -> Option<&WeatherSnapshot> {
        self.entry(index).map(|e| &e.snapshot)
    }

    /// Time since the slot was last fetched, `None` if it never was.
    pub fn age(&self, index: usize, now: Instant) -> Option<Duration> {
        self.entry(index)
            .map(|e| now.saturating_duration_since(e.fetched_at))
    }

    pub fn is_fresh(&self, index: usize, max_age: Duration, now: Instant) -> bool {
        self.age(index, now).is_some_and(|age| age < max_age)
    }

    /// Fetch weather for a slot and store it.
    ///
    /// Auto resolves its position through `geolocator`; named slots use their
    /// stored coordinates. On any failure the existing entry is left as it was
    /// and the error is returned.
    pub async fn fetch_and_cache<G, W>(
        &mut self,
        index: usize,
        geolocator: &G,
        weather: &W,
        now: Instant,
    ) -> Result<&WeatherSnapshot, WeatherError>
    where
        G: Geolocator,
        W: WeatherSource,
    {
        let slot = self
            .slots
            .get(index)
            .ok_or(WeatherError::NoSuchSlot(index))?
            .clone();

        let snapshot = match fetch_snapshot(&slot, geolocator, weather).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Fetch for {} failed, keeping cached data: {}", slot.label(), e);
                return Err(e);
            }
        };

        tracing::info!(
            "{}: {}C {} at {}",
            snapshot.city,
            snapshot.temp,
            snapshot.desc,
            snapshot.observed
        );

        let entry = self
            .entries
            .get_mut(index)
            .ok_or(WeatherError::NoSuchSlot(index))?;
        let stored = entry.insert(CacheEntry {
            snapshot,
            fetched_at: now,
        });
        Ok(&stored.snapshot)
    }
}

async fn fetch_snapshot<G, W>(
    slot: &CitySlot,
    geolocator: &G,
    weather: &W,
) -> Result<WeatherSnapshot, WeatherError>
where
    G: Geolocator,
    W: WeatherSource,
{
    let (city, coordinates) = match (&slot.name, slot.coordinates) {
        (Some(name), Some(coordinates)) => (name.clone(), coordinates),
        _ => {
            let fix = geolocator.locate().await?;
            (fix.city, fix.coordinates)
        }
    };

    let forecast = weather.forecast(coordinates).await?;
    WeatherSnapshot::from_forecast(city, coordinates, &forecast)
}
