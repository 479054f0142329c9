//! Renderer-facing toggles. None of these touch the tree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Device the canvas is previewed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceProfile {
    /// Mobile: 375x667
    Mobile,

    /// Tablet: 768x1024
    Tablet,

    /// Desktop: 1920x1080
    #[default]
    Desktop,

    /// Custom dimensions (width, height)
    Custom(u32, u32),
}

impl DeviceProfile {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            DeviceProfile::Mobile => (375, 667),
            DeviceProfile::Tablet => (768, 1024),
            DeviceProfile::Desktop => (1920, 1080),
            DeviceProfile::Custom(w, h) => (*w, *h),
        }
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceProfile::Mobile => write!(f, "mobile"),
            DeviceProfile::Tablet => write!(f, "tablet"),
            DeviceProfile::Desktop => write!(f, "desktop"),
            DeviceProfile::Custom(w, h) => write!(f, "{}x{}", w, h),
        }
    }
}

impl FromStr for DeviceProfile {
    type Err = String;

    /// Accepts `mobile`, `tablet`, `desktop` or `<width>x<height>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(DeviceProfile::Mobile),
            "tablet" => Ok(DeviceProfile::Tablet),
            "desktop" => Ok(DeviceProfile::Desktop),
            other => {
                let (w, h) = other
                    .split_once('x')
                    .ok_or_else(|| format!("Unknown device profile: {}", s))?;
                let w = w.parse().map_err(|_| format!("Invalid width in {}", s))?;
                let h = h.parse().map_err(|_| format!("Invalid height in {}", s))?;
                Ok(DeviceProfile::Custom(w, h))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub preview_mode: bool,
    pub device: DeviceProfile,
    pub is_dragging: bool,
}

impl UiState {
    pub fn new(device: DeviceProfile) -> Self {
        Self {
            device,
            ..Self::default()
        }
    }
}
