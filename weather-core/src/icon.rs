//! Mapping from provider condition codes (`"10d"`, `"01n"`, ...) to icons.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Decorative icon shown next to the weather details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    #[default]
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Clear => "clear",
            Icon::Cloud => "cloud",
            Icon::Drizzle => "drizzle",
            Icon::Rain => "rain",
            Icon::Snow => "snow",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Clear => "☀",
            Icon::Cloud => "⛅",
            Icon::Drizzle => "☁",
            Icon::Rain => "🌧",
            Icon::Snow => "❄",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const OPENWEATHER_CODES: &[(&str, Icon)] = &[
    ("01d", Icon::Clear),
    ("01n", Icon::Clear),
    ("02d", Icon::Cloud),
    ("02n", Icon::Cloud),
    ("03d", Icon::Drizzle),
    ("03n", Icon::Drizzle),
    ("04d", Icon::Drizzle),
    ("04n", Icon::Drizzle),
    ("09d", Icon::Rain),
    ("09n", Icon::Rain),
    ("10d", Icon::Rain),
    ("10n", Icon::Rain),
    ("13d", Icon::Snow),
    ("13n", Icon::Snow),
];

/// Lookup table plus the icon used for codes the table doesn't know.
#[derive(Debug, Clone)]
pub struct IconResolver {
    table: HashMap<String, Icon>,
    fallback: Icon,
}

impl IconResolver {
    pub fn new<I, S>(table: I, fallback: Icon) -> Self
    where
        I: IntoIterator<Item = (S, Icon)>,
        S: Into<String>,
    {
        Self {
            table: table.into_iter().map(|(code, icon)| (code.into(), icon)).collect(),
            fallback,
        }
    }

    pub fn resolve(&self, code: &str) -> Icon {
        self.table.get(code).copied().unwrap_or(self.fallback)
    }

    /// Same as [`resolve`](Self::resolve), for a code the payload may not carry at all.
    pub fn resolve_opt(&self, code: Option<&str>) -> Icon {
        code.map_or(self.fallback, |c| self.resolve(c))
    }
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::new(OPENWEATHER_CODES.iter().copied(), Icon::Clear)
    }
}
