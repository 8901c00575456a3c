pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{ClassifyArgs, Commands, EncodeArgs, SummaryArgs};
use rustysentiment::dataset::{read_text_records, write_classified_records};
use rustysentiment::neural_network::InferenceSession;
use rustysentiment::pipeline::{ClassifierConfig, SentimentClassifier};
use rustysentiment::utility::{PaddingMode, TextTokenizer, count_labels, pad_sequences};

/// Command line interface of the classifier
#[derive(Parser, Debug)]
#[command(
    name = "rustysentiment",
    version,
    about = "Classify the sentiment of CSV text rows with an exported Keras model."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatches to the selected subcommand
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Classify(args) => run_classify(args),
            Commands::Encode(args) => run_encode(args),
            Commands::Summary(args) => run_summary(args),
        }
    }
}

fn run_classify(args: ClassifyArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => ClassifierConfig::from_json_file(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?,
        None => ClassifierConfig::default(),
    };
    let config = args.apply_to(base);
    config.validate().context("invalid classifier configuration")?;

    let has_header = config.has_header;
    let classifier = SentimentClassifier::from_config(config)
        .context("failed to load the tokenizer and model")?;

    let records = read_text_records(&args.input, has_header)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let classified = classifier
        .classify(&records)
        .context("classification failed")?;

    write_classified_records(&args.output, &classified)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    let labels: Vec<_> = classified.iter().map(|r| r.classification).collect();
    let (positive, negative) = count_labels(&labels);
    println!(
        "Classified {} rows: {} positive, {} negative -> {}",
        classified.len(),
        positive,
        negative,
        args.output.display()
    );

    classifier.release();
    Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    for line in encode_lines(&args)? {
        println!("{}", line);
    }
    Ok(())
}

/// Tokenizes and pads the input rows, one comma-separated line of token ids per row
fn encode_lines(args: &EncodeArgs) -> Result<Vec<String>> {
    let tokenizer = TextTokenizer::from_json_file(&args.vocab)
        .with_context(|| format!("failed to read tokenizer {}", args.vocab.display()))?;
    let records = read_text_records(&args.input, args.has_header)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
    let sequences = tokenizer.texts_to_sequences(&texts);
    let padded = pad_sequences(
        &sequences,
        args.padding.padding.unwrap_or(PaddingMode::Pre),
        args.padding.pad_value.unwrap_or(0),
        args.padding.maxlen,
    )
    .context("padding failed")?;

    Ok(padded
        .iter()
        .map(|row| row.iter().map(u32::to_string).collect::<Vec<_>>().join(","))
        .collect())
}

fn run_summary(args: SummaryArgs) -> Result<()> {
    let mut session = InferenceSession::load(&args.model)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;

    println!("{}", session.summary()?);
    match session.expected_input_length() {
        Some(length) => println!(" Expected input length: {}", length),
        None => println!(" Expected input length: any"),
    }

    session.release();
    Ok(())
}
