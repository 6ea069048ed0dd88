use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerVariant {
    /// Full-height centred column with a 16:9 player box
    #[default]
    Fullscreen,
    /// Same pieces, laid out in the surrounding flow
    Inline,
}

impl PlayerVariant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fullscreen" => Some(Self::Fullscreen),
            "inline" => Some(Self::Inline),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOptions {
    pub show_progress_bar: bool,
    pub variant: PlayerVariant,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            show_progress_bar: true,
            variant: PlayerVariant::default(),
        }
    }
}

impl PlayerOptions {
    /// Overrides from `?progress=` and `?variant=`; unknown values keep the default.
    pub fn from_query(progress: Option<&str>, variant: Option<&str>) -> Self {
        let default = Self::default();
        Self {
            show_progress_bar: match progress {
                Some("false" | "0" | "off") => false,
                Some("true" | "1" | "on") => true,
                _ => default.show_progress_bar,
            },
            variant: variant
                .and_then(PlayerVariant::from_name)
                .unwrap_or(default.variant),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_show_progress_fullscreen() {
        let opts = PlayerOptions::from_query(None, None);
        assert_eq!(opts, PlayerOptions::default());
        assert!(opts.show_progress_bar);
        assert_eq!(opts.variant, PlayerVariant::Fullscreen);
    }

    #[test]
    fn query_overrides() {
        let opts = PlayerOptions::from_query(Some("off"), Some("inline"));
        assert!(!opts.show_progress_bar);
        assert_eq!(opts.variant, PlayerVariant::Inline);
    }

    #[test]
    fn garbage_is_ignored() {
        let opts = PlayerOptions::from_query(Some("maybe"), Some("tiny"));
        assert_eq!(opts, PlayerOptions::default());
    }
}
