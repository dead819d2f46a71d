//! The control loop: buttons drive the mode, the mode picks a slot, the cache
//! keeps that slot fresh, and the panel is redrawn when what it shows changes.

use crate::input::ButtonSource;
use inky_core::{AppError, ButtonEvent, ModeConfig, ModeState};
use inky_display::{render_dashboard, Dashboard, MapView, ModeMarker, Panel};
use inky_weather::{Coordinates, Geolocator, MapSource, WeatherCache, WeatherSource};
use std::time::{Duration, Instant};

/// Minimum gap between fetch attempts for a slot that keeps failing.
const RETRY_AFTER: Duration = Duration::from_secs(60);

/// What is currently on the glass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shown {
    index: usize,
    manual: bool,
    fetched_at: Option<Instant>,
}

fn now() -> Instant {
    // tokio's clock so paused-time tests can move it
    tokio::time::Instant::now().into_std()
}

pub struct Station<G, W, M, P> {
    cache: WeatherCache,
    geolocator: G,
    weather: W,
    /// `None` draws the built-in outline map instead of fetching one.
    maps: Option<M>,
    panel: P,
    mode: ModeState,
    mode_config: ModeConfig,
    refresh: Duration,
    attempts: Vec<Option<Instant>>,
    shown: Option<Shown>,
    last_map: Option<(Coordinates, MapView)>,
}

impl<G, W, M, P> Station<G, W, M, P>
where
    G: Geolocator,
    W: WeatherSource,
    M: MapSource,
    P: Panel,
{
    pub fn new(
        cache: WeatherCache,
        geolocator: G,
        weather: W,
        maps: Option<M>,
        panel: P,
        mode_config: ModeConfig,
        refresh: Duration,
    ) -> Self {
        let attempts = vec![None; cache.slots().len()];
        Self {
            cache,
            geolocator,
            weather,
            maps,
            panel,
            mode: ModeState::Default,
            mode_config,
            refresh,
            attempts,
            shown: None,
            last_map: None,
        }
    }

    pub fn mode(&self) -> ModeState {
        self.mode
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Jump straight to a slot in Manual mode.
    pub fn select(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.mode_config.slot_count() {
            return Err(AppError::Other(anyhow::anyhow!(
                "no city slot {} (have {})",
                index,
                self.mode_config.slot_count()
            )));
        }
        self.mode = ModeState::Manual {
            index,
            last_interaction: now(),
        };
        Ok(())
    }

    /// Sample buttons forever, one tick at a time.
    pub async fn run<B: ButtonSource>(
        &mut self,
        buttons: &mut B,
        tick: Duration,
    ) -> Result<(), AppError> {
        loop {
            let event = buttons.poll(tick).await;
            self.tick(event).await?;
        }
    }

    /// Advance one tick. Returns whether the panel was redrawn.
    pub async fn tick(&mut self, event: Option<ButtonEvent>) -> Result<bool, AppError> {
        let now = now();
        let before = self.mode;
        self.mode = self.mode.step(event, &self.mode_config, now);
        if before.index() != self.mode.index() || before.is_manual() != self.mode.is_manual() {
            tracing::info!(
                "Slot {} -> {} ({})",
                before.index(),
                self.mode.index(),
                if self.mode.is_manual() { "manual" } else { "auto" }
            );
        }

        let index = self.mode.index();
        self.ensure_fresh(index, now).await;

        let shown = Shown {
            index,
            manual: self.mode.is_manual(),
            fetched_at: self.cache.entry(index).map(|e| e.fetched_at),
        };
        if self.shown == Some(shown) {
            return Ok(false);
        }

        self.draw(index).await?;
        self.shown = Some(shown);
        Ok(true)
    }

    async fn ensure_fresh(&mut self, index: usize, now: Instant) {
        // a zero interval means fetch once and keep it
        let pinned = self.refresh.is_zero() && self.cache.entry(index).is_some();
        if pinned || self.cache.is_fresh(index, self.refresh, now) {
            return;
        }
        let Some(attempt) = self.attempts.get_mut(index) else {
            return;
        };
        if attempt.is_some_and(|t| now.saturating_duration_since(t) < RETRY_AFTER) {
            return;
        }
        *attempt = Some(now);

        if let Err(e) = self
            .cache
            .fetch_and_cache(index, &self.geolocator, &self.weather, now)
            .await
        {
            tracing::debug!("Slot {} not refreshed: {}", index, e);
        }
    }

    async fn draw(&mut self, index: usize) -> Result<(), AppError> {
        let (label, slot_position) = match self.cache.slots().get(index) {
            Some(slot) => (slot.label().to_string(), slot.coordinates),
            None => return Err(AppError::Display(format!("no city slot {}", index))),
        };
        let snapshot = self.cache.get(index).cloned();
        let position = snapshot.as_ref().map(|s| s.coordinates).or(slot_position);
        let city = snapshot.as_ref().map_or_else(|| label.clone(), |s| s.city.clone());

        let map = match position {
            Some(at) => self.map_view(at, &city).await,
            None => MapView::Blank,
        };
        let marker = match self.mode {
            ModeState::Default => ModeMarker::Auto,
            ModeState::Manual { index, .. } => ModeMarker::Manual {
                index,
                presets: self.mode_config.slot_count() - 1,
            },
        };

        let dashboard = Dashboard::assemble(&label, snapshot.as_ref(), marker, map);
        render_dashboard(&dashboard, &mut self.panel).unwrap_or_else(|never| match never {});
        self.panel
            .update()
            .map_err(|e| AppError::Display(e.to_string()))?;

        tracing::info!(
            "Showing {} [{}] {}",
            dashboard.header.city,
            dashboard.header.marker,
            dashboard.header.timestamp
        );
        Ok(())
    }

    async fn map_view(&mut self, at: Coordinates, city: &str) -> MapView {
        let Some(maps) = &self.maps else {
            return MapView::outline(at, city);
        };
        if let Some((cached_at, view)) = &self.last_map {
            if *cached_at == at {
                return view.clone();
            }
        }

        match maps.fetch_map(at, city).await {
            Ok(image) => {
                let view = MapView::from_image(&image, at);
                if matches!(view, MapView::Image { .. }) {
                    self.last_map = Some((at, view.clone()));
                }
                view
            }
            Err(e) => {
                tracing::warn!("Map fetch failed, drawing crosshair: {}", e);
                MapView::crosshair(at)
            }
        }
    }
}
