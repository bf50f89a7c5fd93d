use std::sync::Arc;

use crate::assets::decode::BackgroundImage;
use crate::assets::resources::ResourceProvider;
use crate::clock::format::TimeFormatter;
use crate::clock::source::{SystemClock, WallClock};
use crate::engine::clock_engine::ClockEngine;
use crate::engine::config::EngineConfig;
use crate::engine::host::SurfaceHost;
use crate::foundation::error::ClockResult;

/// Factory for clock engines sharing one decoded background.
pub struct WallpaperService {
    resources: Arc<dyn ResourceProvider>,
    config: EngineConfig,
    background: BackgroundImage,
    formatter: TimeFormatter,
}

impl std::fmt::Debug for WallpaperService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallpaperService")
            .field("config", &self.config)
            .field(
                "background",
                &(self.background.width(), self.background.height()),
            )
            .finish_non_exhaustive()
    }
}

impl WallpaperService {
    /// Validate `config` and decode the background once.
    #[tracing::instrument(skip(resources))]
    pub fn new(resources: Arc<dyn ResourceProvider>, config: EngineConfig) -> ClockResult<Self> {
        config.validate()?;
        let background = resources.decode_image(&config.background)?;
        tracing::debug!(
            width = background.width(),
            height = background.height(),
            "background decoded"
        );
        Ok(Self {
            resources,
            config,
            background,
            formatter: TimeFormatter::system(),
        })
    }

    /// Replace the formatter handed to new engines.
    pub fn with_formatter(mut self, formatter: TimeFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Shared background.
    pub fn background(&self) -> &BackgroundImage {
        &self.background
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Engine for `host` reading the system clock.
    pub fn create_engine<H: SurfaceHost>(&self, host: H) -> ClockResult<ClockEngine<H>> {
        self.create_engine_with_clock(host, Box::new(SystemClock))
    }

    /// Engine for `host` reading time from `clock`.
    pub fn create_engine_with_clock<H: SurfaceHost>(
        &self,
        host: H,
        clock: Box<dyn WallClock>,
    ) -> ClockResult<ClockEngine<H>> {
        ClockEngine::new(
            host,
            self.background.clone(),
            self.resources.clone(),
            &self.config,
            self.formatter.clone(),
            clock,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/service.rs"]
mod tests;
