// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SatzwerkError};
use crate::types::PaperSize;

/// Settings for one converter instance. Every field has a default, so a JSON
/// file only needs to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Page size of manually rebuilt PDFs.
    pub paper_size: PaperSize,
    /// Margin applied to all four sides, in points.
    pub margin_pt: f32,
    /// Title detection heuristics for the content classifier.
    pub title: TitleHeuristics,
    /// Native converter delegation.
    pub native: NativeConfig,
    /// Title written into the PDF /Info dictionary.
    pub document_title: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::Letter,
            margin_pt: 72.0,
            title: TitleHeuristics::default(),
            native: NativeConfig::default(),
            document_title: "Converted Document".into(),
        }
    }
}

impl ConversionConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Read a JSON config file, falling back to defaults if it is missing or invalid.
    /// Only an invalid file is worth a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(SatzwerkError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no configuration file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Reject settings that leave no room to lay out content.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.paper_size.dimensions_pt();
        if self.margin_pt < 0.0 {
            return Err(SatzwerkError::Config(format!(
                "margin must not be negative, got {}",
                self.margin_pt
            )));
        }
        if width - 2.0 * self.margin_pt <= 0.0 || height - 2.0 * self.margin_pt <= 0.0 {
            return Err(SatzwerkError::Config(format!(
                "margin {}pt leaves no printable area on a {}x{}pt page",
                self.margin_pt, width, height
            )));
        }
        if self.title.max_length == 0 && !self.title.keywords.is_empty() {
            warn!("title.max_length is 0; keyword titles are disabled");
        }
        Ok(())
    }

    /// Page size and margins as used by the synthesizer and emitter.
    pub fn page_geometry(&self) -> PageGeometry {
        let (width_pt, height_pt) = self.paper_size.dimensions_pt();
        PageGeometry {
            width_pt,
            height_pt,
            margin_pt: self.margin_pt,
        }
    }
}

/// Genre-specific title detection: short paragraphs containing one of the
/// keywords are titles. Defaults match Indonesian official letters ("SURAT").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleHeuristics {
    /// Matched case-insensitively against the paragraph text.
    pub keywords: Vec<String>,
    /// Paragraphs must be strictly shorter than this (in characters).
    pub max_length: usize,
}

impl Default for TitleHeuristics {
    fn default() -> Self {
        Self {
            keywords: vec!["SURAT".into()],
            max_length: 50,
        }
    }
}

/// Native converter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    /// Try the native converter before the manual pipeline.
    pub enabled: bool,
    /// Program name or path of the LibreOffice binary.
    pub program: String,
    /// Upper bound on one native conversion, in seconds.
    pub timeout_secs: u64,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "soffice".into(),
            timeout_secs: 120,
        }
    }
}

impl NativeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Page dimensions and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageGeometry {
    /// Width between the left and right margins.
    pub fn available_width(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    /// Height between the top and bottom margins.
    pub fn available_height(&self) -> f32 {
        self.height_pt - 2.0 * self.margin_pt
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        ConversionConfig::default().page_geometry()
    }
}
