//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::server::{self, AppState};
use crate::config::{AirwaveConfig, DeviceBackend};
use crate::cursor::CursorCodec;
use crate::device::{DeviceRegistry, HttpDeviceRegistry, MemoryDeviceRegistry};
use crate::error::Result;
use crate::schedule::MemorySchedule;
use crate::tracklist::{MemoryTrackSource, PageRequest, TrackEngine, TrackPage};
use futures::TryStreamExt;
use serde_json::json;
use std::sync::Arc;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port } => self.serve(*port).await,
            Commands::Check => self.check(),
            Commands::Tracks {
                limit,
                filter_ads,
                after,
                all,
            } => {
                self.tracks(*limit, *filter_ads, after.as_deref(), *all)
                    .await
            }
        }
    }

    /// Load the configuration, falling back to defaults when no file is given
    fn load_config(&self) -> Result<AirwaveConfig> {
        match &self.cli.config {
            Some(path) => AirwaveConfig::from_file(path),
            None => Ok(AirwaveConfig::default()),
        }
    }

    /// Build the play history source from the configuration
    fn build_tracks(&self, config: &AirwaveConfig) -> Result<MemoryTrackSource> {
        match &config.tracks.file {
            Some(path) => MemoryTrackSource::from_file(path),
            None => Ok(MemoryTrackSource::empty()),
        }
    }

    /// Build the schedule source from the configuration
    fn build_schedule(&self, config: &AirwaveConfig) -> Result<MemorySchedule> {
        match &config.schedule.file {
            Some(path) => MemorySchedule::from_file(path),
            None => Ok(MemorySchedule::empty()),
        }
    }

    /// Build the device registry from the configuration
    fn build_devices(&self, config: &AirwaveConfig) -> Result<Arc<dyn DeviceRegistry>> {
        match config.devices.backend {
            DeviceBackend::Memory => Ok(Arc::new(MemoryDeviceRegistry::new())),
            DeviceBackend::Http => {
                let url = config.devices.worker_endpoint()?;
                Ok(Arc::new(
                    HttpDeviceRegistry::new(url).with_timeout(config.devices.request_timeout()),
                ))
            }
        }
    }

    /// Start the HTTP API server
    async fn serve(&self, port: Option<u16>) -> Result<()> {
        let config = self.load_config()?;

        let tracks = self.build_tracks(&config)?;
        tracing::info!("Loaded {} tracks into the play history", tracks.len());
        let schedule = self.build_schedule(&config)?;
        tracing::info!("Loaded {} schedule days", schedule.len());
        let devices = self.build_devices(&config)?;

        let state = AppState::new(
            TrackEngine::new(Arc::new(tracks)),
            Arc::new(schedule),
            devices,
        );

        let port = port.unwrap_or(config.server.port);
        server::serve(state, &config.server.host, port).await
    }

    /// Validate the configuration and report what it loads
    fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let tracks = self.build_tracks(&config)?;
        let schedule = self.build_schedule(&config)?;
        self.build_devices(&config)?;

        let report = json!({
            "server": format!("{}:{}", config.server.host, config.server.port),
            "tracks": tracks.len(),
            "scheduleDays": schedule.len(),
            "deviceBackend": config.devices.backend,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
        Ok(())
    }

    /// Print pages of the play history to stdout
    async fn tracks(
        &self,
        limit: usize,
        filter_ads: bool,
        after: Option<&str>,
        all: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let source = self.build_tracks(&config)?;
        let engine = TrackEngine::new(Arc::new(source));

        let request = PageRequest::new(limit)
            .with_filter_ads(filter_ads)
            .with_cursor(CursorCodec::decode(after));

        if all {
            let mut pages = engine.pages(request);
            while let Some(page) = pages.try_next().await? {
                self.print_page(&page);
            }
        } else {
            let page = engine.page(&request).await?;
            self.print_page(&page);
        }
        Ok(())
    }

    /// Print one page in the shape the HTTP API returns
    fn print_page(&self, page: &TrackPage) {
        let mut body = json!({
            "count": page.len(),
            "tracks": page.tracks,
        });
        if let Some(cursor) = page.next_cursor {
            body["lastTrack"] = json!(CursorCodec::encode(cursor));
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    }
}
