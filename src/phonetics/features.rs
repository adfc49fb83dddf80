use itertools::Itertools;
use serde::Serialize;

use super::transcription::Transcription;

// IPA character classes used by the extractor. Affricates and diphthongs
// are two-character sequences and matched as windows.
const VOWELS: &str = "æɛɪɑʌiueəoɔɝaʊ";
const CONSONANTS: &str = "bdkɡptfvszʃʒθðmnŋlrwj";
const FRICATIVES: &str = "fvszʃʒθð";
const UNUSUAL: &str = "θðʃʒŋ";
const DIPHTHONGS: [(char, char); 5] = [('a', 'ɪ'), ('e', 'ɪ'), ('o', 'ʊ'), ('a', 'ʊ'), ('ɔ', 'ɪ')];
const AFFRICATES: [(char, char); 2] = [('t', 'ʃ'), ('d', 'ʒ')];

/// Fixed feature schema consumed by the classifier.
///
/// Field order matters: model weights and normalization stats are indexed
/// by it. Values are pre-scaled so no single feature dominates raw counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub syllables: f64,
    pub consonant_cluster: f64,
    pub vowel_ratio: f64,
    pub consonant_complexity: f64,
    pub diphthongs: f64,
    pub stress: f64,
    pub length: f64,
    pub unusual_sounds: f64,
}

impl FeatureVector {
    pub const DIM: usize = 8;

    pub const NAMES: [&'static str; Self::DIM] = [
        "syllables",
        "consonant_cluster",
        "vowel_ratio",
        "consonant_complexity",
        "diphthongs",
        "stress",
        "length",
        "unusual_sounds",
    ];

    pub fn to_array(self) -> [f64; Self::DIM] {
        [
            self.syllables,
            self.consonant_cluster,
            self.vowel_ratio,
            self.consonant_complexity,
            self.diphthongs,
            self.stress,
            self.length,
            self.unusual_sounds,
        ]
    }

    pub fn named_values(self) -> [(&'static str, f64); Self::DIM] {
        let values = self.to_array();
        [
            (Self::NAMES[0], values[0]),
            (Self::NAMES[1], values[1]),
            (Self::NAMES[2], values[2]),
            (Self::NAMES[3], values[3]),
            (Self::NAMES[4], values[4]),
            (Self::NAMES[5], values[5]),
            (Self::NAMES[6], values[6]),
            (Self::NAMES[7], values[7]),
        ]
    }
}

/// Extract the feature vector from a transcription.
///
/// Total over any input: an empty or fully unrecognized IPA string yields
/// the degenerate all-zero vector instead of an error.
pub fn extract(transcription: &Transcription) -> FeatureVector {
    let chars: Vec<char> = transcription.ipa.chars().collect();
    let total = chars.len();

    let mut syllable_runs = 0usize;
    let mut prev_was_vowel = false;
    for &ch in &chars {
        if VOWELS.contains(ch) {
            if !prev_was_vowel {
                syllable_runs += 1;
            }
            prev_was_vowel = true;
        } else {
            prev_was_vowel = false;
        }
    }

    let mut max_cluster = 0usize;
    let mut current_cluster = 0usize;
    for &ch in &chars {
        if CONSONANTS.contains(ch) {
            current_cluster += 1;
            max_cluster = max_cluster.max(current_cluster);
        } else {
            current_cluster = 0;
        }
    }

    let vowel_count = chars.iter().filter(|&&ch| VOWELS.contains(ch)).count();
    let fricative_count = chars.iter().filter(|&&ch| FRICATIVES.contains(ch)).count();
    let unusual_count = chars.iter().filter(|&&ch| UNUSUAL.contains(ch)).count();
    let diphthong_count = chars
        .iter()
        .tuple_windows()
        .filter(|&(&a, &b)| DIPHTHONGS.contains(&(a, b)))
        .count();
    let affricate_count = chars
        .iter()
        .tuple_windows()
        .filter(|&(&a, &b)| AFFRICATES.contains(&(a, b)))
        .count();

    let (vowel_ratio, consonant_complexity, unusual_ratio) = if total > 0 {
        let total = total as f64;
        (
            vowel_count as f64 / total,
            (fricative_count as f64 + 2.0 * affricate_count as f64) / total,
            unusual_count as f64 / total,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    FeatureVector {
        syllables: syllable_runs as f64 / 4.0,
        consonant_cluster: max_cluster as f64 / 3.0,
        vowel_ratio,
        consonant_complexity,
        diphthongs: diphthong_count as f64 / 2.0,
        stress: transcription.stress_positions.len() as f64 / 2.0,
        length: (syllable_runs as f64 / 5.0).min(1.0),
        unusual_sounds: unusual_ratio * 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcription(ipa: &str, stress_positions: Vec<usize>) -> Transcription {
        Transcription {
            ipa: ipa.to_string(),
            stress_positions,
        }
    }

    #[test]
    fn test_simple_word() {
        let features = extract(&transcription("kæt", vec![]));

        assert_eq!(features.syllables, 0.25);
        assert_eq!(features.consonant_cluster, 1.0 / 3.0);
        assert!((features.vowel_ratio - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(features.consonant_complexity, 0.0);
        assert_eq!(features.diphthongs, 0.0);
        assert_eq!(features.stress, 0.0);
        assert_eq!(features.length, 0.2);
        assert_eq!(features.unusual_sounds, 0.0);
    }

    #[test]
    fn test_empty_input_is_degenerate_zero_vector() {
        let features = extract(&transcription("", vec![]));

        assert_eq!(features.to_array(), [0.0; FeatureVector::DIM]);
    }

    #[test]
    fn test_adjacent_vowels_form_one_syllable_run() {
        // "ɪæ" is one run, so this counts two syllables, not three.
        let features = extract(&transcription("kɪætə", vec![]));

        assert_eq!(features.syllables, 0.5);
    }

    #[test]
    fn test_consonant_cluster_run() {
        // s-t-r is the longest consonant run.
        let features = extract(&transcription("strɛŋ", vec![]));

        assert_eq!(features.consonant_cluster, 1.0);
    }

    #[test]
    fn test_diphthong_and_affricate_windows() {
        // "dʒɔɪ": one affricate window (dʒ) and one diphthong window (ɔɪ).
        let features = extract(&transcription("dʒɔɪ", vec![]));

        assert_eq!(features.diphthongs, 0.5);
        // fricative ʒ plus the dʒ window: (1 + 2*1) / 4
        assert!((features.consonant_complexity - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_unusual_sounds_weighting() {
        // θ out of 3 chars, doubled: (1/3) * 2
        let features = extract(&transcription("θɪn", vec![]));

        assert!((features.unusual_sounds - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_stress_counts_primary_markers() {
        let features = extract(&transcription("həloʊ", vec![3]));

        assert_eq!(features.stress, 0.5);
    }

    #[test]
    fn test_length_saturates_at_one() {
        let many_syllables = "tætætætætætætæ";
        let features = extract(&transcription(many_syllables, vec![]));

        assert_eq!(features.length, 1.0);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let input = transcription("strɛŋθs", vec![0]);

        assert_eq!(extract(&input), extract(&input));
    }

    #[test]
    fn test_feature_names_match_schema() {
        let features = extract(&transcription("kæt", vec![]));
        let named = features.named_values();

        assert_eq!(named.len(), FeatureVector::DIM);
        assert_eq!(named[0], ("syllables", features.syllables));
        assert_eq!(named[7], ("unusual_sounds", features.unusual_sounds));
    }
}
