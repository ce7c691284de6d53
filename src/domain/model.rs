/// Video identity recovered from the page's embedded state.
///
/// All three fields are non-empty once extraction succeeds; `content_id`
/// is stringified even when the page carries it as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDescriptor {
    pub title: String,
    pub content_id: String,
    pub video_id: String,
}

#[derive(Debug, Clone)]
pub struct DownloadPlan {
    pub descriptor: VideoDescriptor,
    pub suggested_filename: String,
}

/// Quality tiers accepted by the playurl endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    P360,
    P480,
    P720,
    P1080,
}

impl QualityTier {
    pub const ALL: [QualityTier; 4] = [Self::P360, Self::P480, Self::P720, Self::P1080];

    /// Map a menu selection to a tier. Anything outside "1"-"4" falls back
    /// to 480P.
    pub fn from_choice(choice: &str) -> Self {
        match choice.trim() {
            "1" => Self::P360,
            "2" => Self::P480,
            "3" => Self::P720,
            "4" => Self::P1080,
            _ => Self::P480,
        }
    }

    /// Opaque `qn` code understood by the playurl endpoint.
    pub fn code(self) -> u32 {
        match self {
            Self::P360 => 16,
            Self::P480 => 32,
            Self::P720 => 64,
            Self::P1080 => 80,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::P360 => "360P",
            Self::P480 => "480P",
            Self::P720 => "720P",
            Self::P1080 => "1080P",
        }
    }
}

/// Byte counters for an in-flight download. `total_bytes` is `None` when
/// the response declared no content length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub received_bytes: u64,
    pub total_bytes: Option<u64>,
}

impl DownloadProgress {
    /// Completion percentage, or `None` when the total is unknown or zero.
    pub fn percent(&self) -> Option<f64> {
        match self.total_bytes {
            Some(total) if total > 0 => Some(self.received_bytes as f64 / total as f64 * 100.0),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_choices_map_to_qn_codes() {
        assert_eq!(QualityTier::from_choice("1").code(), 16);
        assert_eq!(QualityTier::from_choice("2").code(), 32);
        assert_eq!(QualityTier::from_choice("3").code(), 64);
        assert_eq!(QualityTier::from_choice("4").code(), 80);
    }

    #[test]
    fn unrecognized_choice_defaults_to_480p() {
        for choice in ["", "0", "5", "abc", "1080", " 42 "] {
            assert_eq!(QualityTier::from_choice(choice), QualityTier::P480);
            assert_eq!(QualityTier::from_choice(choice).code(), 32);
        }
    }

    #[test]
    fn choice_is_trimmed() {
        assert_eq!(QualityTier::from_choice(" 4 "), QualityTier::P1080);
    }

    #[test]
    fn percent_tracks_chunk_arrivals() {
        let steps = [(250, "25.00"), (500, "50.00"), (1000, "100.00")];
        for (received_bytes, expected) in steps {
            let progress = DownloadProgress {
                received_bytes,
                total_bytes: Some(1000),
            };
            assert_eq!(format!("{:.2}", progress.percent().unwrap()), expected);
        }
    }

    #[test]
    fn percent_is_none_without_a_total() {
        let progress = DownloadProgress {
            received_bytes: 512,
            total_bytes: None,
        };
        assert_eq!(progress.percent(), None);

        let progress = DownloadProgress {
            received_bytes: 512,
            total_bytes: Some(0),
        };
        assert_eq!(progress.percent(), None);
    }
}
