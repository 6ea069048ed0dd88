use consts::youtube::WATCH_QUERY_PARAM;
use url::Url;

use super::PlayerInitError;

/// Pulls the `v` parameter out of a watch URL.
pub fn extract_video_id(watch_url: &str) -> Result<String, PlayerInitError> {
    let url = Url::parse(watch_url)
        .map_err(|e| PlayerInitError::InvalidUrl(format!("{watch_url}: {e}")))?;

    url.query_pairs()
        .find(|(key, _)| key == WATCH_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
        .or_else(|| raw_query_fallback(url.query()?))
        .ok_or_else(|| PlayerInitError::MissingVideoId(watch_url.to_string()))
}

// for queries the form decoder gives up on
fn raw_query_fallback(query: &str) -> Option<String> {
    let search = format!("?{query}");
    let (_, rest) = search.split_once(&format!("?{WATCH_QUERY_PARAM}="))?;
    let id = rest.split('&').next().unwrap_or_default();
    (!id.is_empty()).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=W_MfNQ9cv9M").unwrap(),
            "W_MfNQ9cv9M"
        );
    }

    #[test]
    fn id_among_other_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1&v=abc123&t=42s").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn missing_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1"),
            Err(PlayerInitError::MissingVideoId(
                "https://www.youtube.com/watch?list=PL1".to_string()
            ))
        );
        assert!(matches!(
            extract_video_id("https://www.youtube.com/watch?v="),
            Err(PlayerInitError::MissingVideoId(_))
        ));
    }

    #[test]
    fn malformed_url() {
        assert!(matches!(
            extract_video_id("test"),
            Err(PlayerInitError::InvalidUrl(_))
        ));
    }

    #[test]
    fn fallback_reads_raw_query() {
        assert_eq!(raw_query_fallback("v=xyz&feature=share").as_deref(), Some("xyz"));
        assert_eq!(raw_query_fallback("feature=share"), None);
    }
}
