use std::env;

use serde::{Deserialize, Serialize};

use crate::{errors::RendererError, theme::Theme};

pub const RENDERER_CONFIG_SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    RENDERER_CONFIG_SCHEMA_VERSION
}

/// Host-supplied renderer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RendererConfig {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Theme used while the host has not supplied a theme provider yet.
    #[serde(default)]
    pub fallback_theme: Theme,
    /// Cap on top-level blocks per surface. Extra blocks are dropped.
    #[serde(default)]
    pub max_blocks: Option<u32>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            schema_version: RENDERER_CONFIG_SCHEMA_VERSION,
            fallback_theme: Theme::default(),
            max_blocks: None,
        }
    }
}

impl RendererConfig {
    pub fn validate(&self) -> Result<(), RendererError> {
        if self.schema_version != RENDERER_CONFIG_SCHEMA_VERSION {
            return Err(RendererError::UnsupportedSchemaVersion {
                expected: RENDERER_CONFIG_SCHEMA_VERSION,
                got: self.schema_version,
            });
        }
        Ok(())
    }

    /// Reads `BLOCKKIT_THEME` and `BLOCKKIT_MAX_BLOCKS` on top of the defaults.
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(theme) = env::var("BLOCKKIT_THEME")
            .ok()
            .and_then(|value| Theme::parse(&value))
        {
            config.fallback_theme = theme;
        }
        config.max_blocks = env::var("BLOCKKIT_MAX_BLOCKS")
            .ok()
            .and_then(|value| value.trim().parse().ok());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip_defaults() {
        let cfg = RendererConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize");
        let decoded: RendererConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, cfg);
    }

    #[test]
    fn empty_object_uses_defaults() {
        let cfg: RendererConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(cfg, RendererConfig::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = serde_json::from_str::<RendererConfig>(r#"{"themes":"dark"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn validate_rejects_schema_mismatch() {
        let cfg = RendererConfig {
            schema_version: 7,
            ..RendererConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(RendererError::UnsupportedSchemaVersion { expected: 1, got: 7 })
        ));
    }

    #[test]
    fn from_env_reads_theme_and_limit() {
        unsafe {
            std::env::set_var("BLOCKKIT_THEME", "Dark");
            std::env::set_var("BLOCKKIT_MAX_BLOCKS", "12");
        }
        let cfg = RendererConfig::from_env();
        assert_eq!(cfg.fallback_theme, Theme::Dark);
        assert_eq!(cfg.max_blocks, Some(12));

        unsafe {
            std::env::set_var("BLOCKKIT_THEME", "neon");
            std::env::remove_var("BLOCKKIT_MAX_BLOCKS");
        }
        let cfg = RendererConfig::from_env();
        assert_eq!(cfg.fallback_theme, Theme::Light);
        assert_eq!(cfg.max_blocks, None);
        unsafe { std::env::remove_var("BLOCKKIT_THEME") };
    }
}
