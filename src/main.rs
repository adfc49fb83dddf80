use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use sayable::app_dirs::AppDirs;
use sayable::assessor::{Assessor, TextAssessment, WordAssessment};
use sayable::model::{ModelError, PerceptronModel};
use sayable::phonetics::Lexicon;
use sayable::trainer;

/// assess how pronounceable english words are
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Scores English words with a phonetic-feature classifier, from 0.0 (very hard to pronounce) to 1.0 (very easy), individually or averaged over a whole text."
)]
struct Cli {
    /// words to assess
    words: Vec<String>,

    /// assess a whole text instead of individual words
    #[clap(short = 't', long)]
    text: Option<String>,

    /// show the extracted feature values for each word
    #[clap(short = 'd', long)]
    detailed: bool,

    /// print results as json
    #[clap(short = 'j', long)]
    json: bool,

    /// load the model artifact from a custom path
    #[clap(short = 'm', long)]
    model: Option<PathBuf>,

    /// retrain the bundled model and keep the result for future runs
    #[clap(short = 'r', long)]
    retrain: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to read stdin: {0}")]
    Stdin(std::io::Error),
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if !cli.words.is_empty() && cli.text.is_some() {
        return Err(CliError::InvalidInput(
            "positional words cannot be combined with --text".to_string(),
        ));
    }

    let custom;
    let assessor: &Assessor = if cli.model.is_some() || cli.retrain {
        custom = build_custom_assessor(&cli)?;
        &custom
    } else {
        Assessor::shared()
    };

    if let Some(text) = &cli.text {
        let result = assessor.assess_text(text, cli.detailed);
        print_text_assessment(&result, cli.json);
        return Ok(());
    }

    let words = if cli.words.is_empty() {
        read_stdin_words()?
    } else {
        cli.words.clone()
    };

    let results: Vec<WordAssessment> = words
        .iter()
        .map(|word| assessor.assess_word(word, cli.detailed))
        .collect();
    print_word_assessments(&results, cli.json, cli.detailed);
    Ok(())
}

/// Explicit artifact path beats retraining; retraining stores its artifact
/// in the user data dir so later runs pick it up.
fn build_custom_assessor(cli: &Cli) -> Result<Assessor, CliError> {
    if let Some(path) = &cli.model {
        return Ok(Assessor::new(PerceptronModel::load(path)?));
    }

    let lexicon = Lexicon::load_default();
    let model = trainer::train_default(lexicon.as_ref());
    if let Some(path) = AppDirs::model_path() {
        model.save(&path)?;
        log::info!("stored retrained model at {}", path.display());
    }
    Ok(Assessor::new(model))
}

fn read_stdin_words() -> Result<Vec<String>, CliError> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(CliError::Stdin)?;
    Ok(buffer.split_whitespace().map(str::to_string).collect())
}

fn print_word_assessments(results: &[WordAssessment], json: bool, detailed: bool) {
    if json {
        let rendered = if results.len() == 1 {
            serde_json::to_string_pretty(&results[0])
        } else {
            serde_json::to_string_pretty(&results)
        };
        println!(
            "{}",
            rendered.expect("Unable to serialize assessment results")
        );
        return;
    }

    for result in results {
        print_word_plain(result, detailed);
    }
}

fn print_word_plain(result: &WordAssessment, detailed: bool) {
    println!(
        "'{}' ({}): {} (score: {:.2})",
        result.word, result.ipa, result.category, result.score
    );
    if detailed {
        if let Some(features) = result.features {
            for (name, value) in features.named_values() {
                println!("  {name}: {value:.2}");
            }
        }
    }
}

fn print_text_assessment(result: &TextAssessment, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(result).expect("Unable to serialize text assessment")
        );
        return;
    }

    println!("Text: '{}'", result.text);
    println!("Average score: {:.2}", result.average_score.unwrap_or(0.0));
    match result.overall_category {
        Some(category) => println!("Overall category: {category}"),
        None => println!("Overall category: n/a"),
    }
    println!("Word count: {}", result.word_count);

    if !result.words.is_empty() {
        println!();
        println!("Word-by-word analysis:");
        for word in &result.words {
            println!(
                "  '{}' ({}): {} (score: {:.2})",
                word.word, word.ipa, word.category, word.score
            );
        }
    }
}
