use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde_json::from_str;

use crate::model::{sigmoid, PerceptronModel, DATA_DIR, STD_EPSILON};
use crate::phonetics::{extract, transcribe, FeatureVector, Lexicon};
use crate::util;

const TRAINING_SEED: u64 = 42;
const EPOCHS: usize = 2000;
const LEARNING_RATE: f64 = 0.05;

/// Labeled word list bundled with the crate. Scores are targets in [0, 1],
/// 1.0 meaning effortless to pronounce.
#[derive(Deserialize, Clone, Debug)]
pub struct TrainingCorpus {
    pub name: String,
    pub size: u32,
    pub entries: Vec<TrainingEntry>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct TrainingEntry {
    pub word: String,
    pub score: f64,
}

impl TrainingCorpus {
    pub fn bundled() -> Self {
        let file = DATA_DIR
            .get_file("training_words.json")
            .expect("Training corpus not found");

        let raw = file
            .contents_utf8()
            .expect("Unable to interpret training corpus as a string");

        from_str(raw).expect("Unable to deserialize training corpus json")
    }
}

/// Train a fresh model on a labeled corpus.
///
/// Deterministic: fixed seed, fixed epoch count, stable sample order inside
/// each shuffled epoch. Passing the same lexicon the assessor will use keeps
/// training-time and prediction-time features on the same footing.
pub fn train(corpus: &TrainingCorpus, lexicon: Option<&Lexicon>) -> PerceptronModel {
    let samples: Vec<([f64; FeatureVector::DIM], f64)> = corpus
        .entries
        .iter()
        .map(|entry| {
            let transcription = transcribe(&entry.word, lexicon);
            (extract(&transcription).to_array(), entry.score)
        })
        .collect();

    // Per-column scaling, captured in the artifact for prediction time.
    let mut feature_means = vec![0.0; FeatureVector::DIM];
    let mut feature_stds = vec![0.0; FeatureVector::DIM];
    for i in 0..FeatureVector::DIM {
        let column: Vec<f64> = samples.iter().map(|(features, _)| features[i]).collect();
        feature_means[i] = util::mean(&column).unwrap_or(0.0);
        feature_stds[i] = util::std_dev(&column).unwrap_or(0.0);
    }

    let normalized: Vec<[f64; FeatureVector::DIM]> = samples
        .iter()
        .map(|(features, _)| {
            let mut row = [0.0; FeatureVector::DIM];
            for i in 0..FeatureVector::DIM {
                row[i] = (features[i] - feature_means[i]) / (feature_stds[i] + STD_EPSILON);
            }
            row
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(TRAINING_SEED);
    let mut weights: Vec<f64> = (0..FeatureVector::DIM)
        .map(|_| rng.gen_range(-1.0..1.0))
        .collect();
    let mut bias = 0.0;

    let mut order: Vec<usize> = (0..normalized.len()).collect();
    for _ in 0..EPOCHS {
        order.shuffle(&mut rng);
        for &idx in &order {
            let row = &normalized[idx];
            let target = samples[idx].1;

            let activation = weights
                .iter()
                .zip(row.iter())
                .map(|(weight, value)| weight * value)
                .sum::<f64>()
                + bias;
            let error = target - sigmoid(activation);

            for i in 0..FeatureVector::DIM {
                weights[i] += LEARNING_RATE * error * row[i];
            }
            bias += LEARNING_RATE * error;
        }
    }

    log::info!(
        "trained model on {} labeled words over {EPOCHS} epochs",
        normalized.len()
    );

    PerceptronModel {
        weights,
        bias,
        feature_means,
        feature_stds,
    }
}

/// Retrain from the bundled corpus; used by the CLI retrain path.
pub fn train_default(lexicon: Option<&Lexicon>) -> PerceptronModel {
    train(&TrainingCorpus::bundled(), lexicon)
}
