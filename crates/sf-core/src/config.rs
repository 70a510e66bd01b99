//! Scene configuration.
//!
//! Every field has a default, so an empty JSON object or an empty query
//! string both yield the stock toy: gravity 1, one shape per wave, a wave
//! every second on a sand-coloured canvas.

use crate::model::{Color, Viewport};
use crate::scene::{GRAVITY_RANGE, SPAWN_COUNT_RANGE};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use winnow::combinator::{opt, preceded};
use winnow::prelude::*;
use winnow::token::take_till;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub viewport: Viewport,
    pub gravity: u32,
    pub spawn_count: u32,
    pub spawn_interval_ms: u32,
    pub background: Color,
    pub stroke_width: f32,
    /// `log` level name for the browser console (`error` … `trace`).
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            gravity: 1,
            spawn_count: 1,
            spawn_interval_ms: 1000,
            background: Color::from_u32(0xD0BA98),
            stroke_width: 1.0,
            log_level: "info".to_string(),
        }
    }
}

impl SceneConfig {
    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("Config JSON error: {e}"))?;
        Ok(config.normalized())
    }

    /// Parse a URL query string such as `?gravity=3&shapes=10`.
    ///
    /// Recognised keys: `gravity`, `shapes`, `interval`, `background`,
    /// `stroke`, `log`. Values are percent-decoded. Unknown keys are
    /// skipped with a warning. The viewport is not a query key: in the
    /// browser the canvas always follows the window.
    pub fn from_query(query: &str) -> Result<Self, String> {
        let mut config = Self::default();
        config.apply_query(query)?;
        Ok(config.normalized())
    }

    /// Apply query overrides on top of this config.
    pub fn apply_query(&mut self, query: &str) -> Result<(), String> {
        let mut rest = query.strip_prefix('?').unwrap_or(query);

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('&') {
                rest = after;
                continue;
            }
            let (key, value) = parse_pair
                .parse_next(&mut rest)
                .map_err(|e| format!("Query parse error: {e}"))?;
            self.apply_pair(key, &decode(value))?;
        }
        Ok(())
    }

    fn apply_pair(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "gravity" => self.gravity = parse_int(key, value)?,
            "shapes" => self.spawn_count = parse_int(key, value)?,
            "interval" => {
                let ms = parse_int(key, value)?;
                if ms == 0 {
                    return Err("interval must be positive".to_string());
                }
                self.spawn_interval_ms = ms;
            }
            "background" => {
                self.background = Color::from_hex(value)
                    .ok_or_else(|| format!("background: invalid colour {value:?}"))?;
            }
            "stroke" => {
                self.stroke_width = value
                    .parse::<f32>()
                    .ok()
                    .filter(|w| w.is_finite() && *w >= 0.0)
                    .ok_or_else(|| format!("stroke: invalid width {value:?}"))?;
            }
            "log" => {
                let level = value.to_ascii_lowercase();
                if !matches!(
                    level.as_str(),
                    "off" | "error" | "warn" | "info" | "debug" | "trace"
                ) {
                    return Err(format!("log: unknown level {value:?}"));
                }
                self.log_level = level;
            }
            _ => log::warn!("ignoring unknown config key {key:?}"),
        }
        Ok(())
    }

    /// Clamp gravity and spawn count into their ranges.
    pub fn normalized(mut self) -> Self {
        self.gravity = self
            .gravity
            .clamp(*GRAVITY_RANGE.start(), *GRAVITY_RANGE.end());
        self.spawn_count = self
            .spawn_count
            .clamp(*SPAWN_COUNT_RANGE.start(), *SPAWN_COUNT_RANGE.end());
        if self.spawn_interval_ms == 0 {
            self.spawn_interval_ms = Self::default().spawn_interval_ms;
        }
        self
    }
}

fn parse_int(key: &str, value: &str) -> Result<u32, String> {
    value
        .parse::<u32>()
        .map_err(|_| format!("{key}: expected a whole number, got {value:?}"))
}

/// Form-style decoding: `+` is a space, `%XX` is a byte.
fn decode(value: &str) -> Cow<'_, str> {
    if value.contains('+') {
        Cow::Owned(
            percent_decode_str(&value.replace('+', " "))
                .decode_utf8_lossy()
                .into_owned(),
        )
    } else {
        percent_decode_str(value).decode_utf8_lossy()
    }
}

fn parse_key<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_till(1.., ['=', '&']).parse_next(input)
}

fn parse_pair<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    let key = parse_key.parse_next(input)?;
    let value = opt(preceded('=', take_till(0.., '&'))).parse_next(input)?;
    Ok((key, value.unwrap_or("")))
}
