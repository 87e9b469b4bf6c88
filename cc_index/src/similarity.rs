//! Approximate string comparison used by the similar-match search.

use std::str::FromStr;

/// Default score cutoffs, chosen empirically against dictionary content.
pub const JARO_CUTOFF: f64 = 0.75;
pub const JARO_WINKLER_CUTOFF: f64 = 0.75;
pub const LEVENSHTEIN_CUTOFF: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceKind {
    Jaro,
    #[default]
    JaroWinkler,
    /// Normalized Damerau-Levenshtein: `1 - distance / max_len`.
    Levenshtein,
}

impl DistanceKind {
    pub fn default_cutoff(&self) -> f64 {
        match self {
            DistanceKind::Jaro => JARO_CUTOFF,
            DistanceKind::JaroWinkler => JARO_WINKLER_CUTOFF,
            DistanceKind::Levenshtein => LEVENSHTEIN_CUTOFF,
        }
    }

    /// Similarity in [0, 1]; 1.0 is an exact match.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        match self {
            DistanceKind::Jaro => strsim::jaro(a, b),
            DistanceKind::JaroWinkler => strsim::jaro_winkler(a, b),
            DistanceKind::Levenshtein => strsim::normalized_damerau_levenshtein(a, b),
        }
    }
}

impl FromStr for DistanceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JARO" => Ok(DistanceKind::Jaro),
            "JARO_WINKLER" => Ok(DistanceKind::JaroWinkler),
            "LEV" => Ok(DistanceKind::Levenshtein),
            other => Err(format!("unrecognized distance kind {:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn exact_match_scores_one() {
        for kind in [DistanceKind::Jaro, DistanceKind::JaroWinkler, DistanceKind::Levenshtein] {
            assert_approx_eq!(kind.similarity("adenosine", "adenosine"), 1.0);
        }
    }

    #[test]
    fn normalized_levenshtein() {
        // One substitution over length six.
        assert_approx_eq!(
            DistanceKind::Levenshtein.similarity("kitten", "sitten"),
            1.0 - 1.0 / 6.0
        );
    }

    #[test]
    fn winkler_prefix_boost_orders_candidates() {
        let target = "ADENOSINE";
        let close = DistanceKind::JaroWinkler.similarity(target, "ADENOSIN");
        let far = DistanceKind::JaroWinkler.similarity(target, "ADENINE");
        assert!(close > far);
        assert!(far > JARO_WINKLER_CUTOFF);
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("JARO".parse::<DistanceKind>().unwrap(), DistanceKind::Jaro);
        assert_eq!("JARO_WINKLER".parse::<DistanceKind>().unwrap(), DistanceKind::JaroWinkler);
        assert_eq!("LEV".parse::<DistanceKind>().unwrap(), DistanceKind::Levenshtein);
        assert!("SOUNDEX".parse::<DistanceKind>().is_err());
        assert_eq!(DistanceKind::default(), DistanceKind::JaroWinkler);
    }
}
