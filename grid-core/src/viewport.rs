//! Viewports and per-viewport configuration.
//!
//! Every viewport owns an independent grid and an independent placement
//! for each element. [`ViewportMap`] is the closed record that keeps one
//! value per viewport so that viewport-specific logic is matched
//! exhaustively instead of looked up in an open dictionary.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the three independent editing contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    /// Wide screens.
    #[default]
    Desktop,
    /// Medium screens.
    Tablet,
    /// Narrow screens; always rendered at full width.
    Mobile,
}

impl Viewport {
    /// All viewports in canonical order.
    pub const ALL: [Self; 3] = [Self::Desktop, Self::Tablet, Self::Mobile];

    /// Lowercase wire name (`"desktop"`, `"tablet"`, `"mobile"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
            Self::Mobile => "mobile",
        }
    }

    /// Capitalized label for human-readable output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "Desktop",
            Self::Tablet => "Tablet",
            Self::Mobile => "Mobile",
        }
    }

    /// Parse a lowercase wire name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|vp| vp.as_str() == name)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exactly one value per viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewportMap<T> {
    /// Desktop value.
    pub desktop: T,
    /// Tablet value.
    pub tablet: T,
    /// Mobile value.
    pub mobile: T,
}

impl<T> ViewportMap<T> {
    /// Build a map from one value per viewport.
    #[must_use]
    pub const fn new(desktop: T, tablet: T, mobile: T) -> Self {
        Self {
            desktop,
            tablet,
            mobile,
        }
    }

    /// Build a map by evaluating `f` for every viewport.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(Viewport) -> T) -> Self {
        Self {
            desktop: f(Viewport::Desktop),
            tablet: f(Viewport::Tablet),
            mobile: f(Viewport::Mobile),
        }
    }

    /// Value for a viewport.
    #[must_use]
    pub const fn get(&self, viewport: Viewport) -> &T {
        match viewport {
            Viewport::Desktop => &self.desktop,
            Viewport::Tablet => &self.tablet,
            Viewport::Mobile => &self.mobile,
        }
    }

    /// Mutable value for a viewport.
    pub fn get_mut(&mut self, viewport: Viewport) -> &mut T {
        match viewport {
            Viewport::Desktop => &mut self.desktop,
            Viewport::Tablet => &mut self.tablet,
            Viewport::Mobile => &mut self.mobile,
        }
    }

    /// Iterate `(viewport, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Viewport, &T)> {
        Viewport::ALL.into_iter().map(move |vp| (vp, self.get(vp)))
    }
}

impl<T> Index<Viewport> for ViewportMap<T> {
    type Output = T;

    fn index(&self, viewport: Viewport) -> &T {
        self.get(viewport)
    }
}

impl<T> IndexMut<Viewport> for ViewportMap<T> {
    fn index_mut(&mut self, viewport: Viewport) -> &mut T {
        self.get_mut(viewport)
    }
}

/// Desktop container width, in columns of a 12-column page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DesktopContainerWidth {
    /// 12/12.
    #[default]
    Full,
    /// 6/12.
    Half,
    /// 4/12.
    Third,
}

impl DesktopContainerWidth {
    /// Accepted column counts.
    pub const ALLOWED: [u8; 3] = [12, 6, 4];

    /// Width in page columns.
    #[must_use]
    pub const fn columns(self) -> u8 {
        match self {
            Self::Full => 12,
            Self::Half => 6,
            Self::Third => 4,
        }
    }
}

impl TryFrom<u8> for DesktopContainerWidth {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            12 => Ok(Self::Full),
            6 => Ok(Self::Half),
            4 => Ok(Self::Third),
            other => Err(format!(
                "desktop container width must be one of 12, 6, 4 (got {other})"
            )),
        }
    }
}

impl From<DesktopContainerWidth> for u8 {
    fn from(width: DesktopContainerWidth) -> Self {
        width.columns()
    }
}

/// Tablet container width, in columns of an 8-column page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TabletContainerWidth {
    /// 8/8.
    #[default]
    Full,
    /// 4/8.
    Half,
}

impl TabletContainerWidth {
    /// Accepted column counts.
    pub const ALLOWED: [u8; 2] = [8, 4];

    /// Width in page columns.
    #[must_use]
    pub const fn columns(self) -> u8 {
        match self {
            Self::Full => 8,
            Self::Half => 4,
        }
    }
}

impl TryFrom<u8> for TabletContainerWidth {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(Self::Full),
            4 => Ok(Self::Half),
            other => Err(format!(
                "tablet container width must be one of 8, 4 (got {other})"
            )),
        }
    }
}

impl From<TabletContainerWidth> for u8 {
    fn from(width: TabletContainerWidth) -> Self {
        width.columns()
    }
}

/// Container widths for the viewports that have one. Mobile is always full width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportConfig {
    /// Desktop container width.
    pub desktop: DesktopContainerWidth,
    /// Tablet container width.
    pub tablet: TabletContainerWidth,
}
