use clap::{Args, Subcommand};
use rustysentiment::pipeline::ClassifierConfig;
use rustysentiment::utility::PaddingMode;
use std::path::PathBuf;

/// Subcommands of the `rustysentiment` binary
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every row of a CSV file and write `text,classification` rows
    Classify(ClassifyArgs),

    /// Print the padded token matrix of a CSV file, one row per line
    Encode(EncodeArgs),

    /// Print the layer table of an exported model
    Summary(SummaryArgs),
}

/// Padding flags shared by `classify` and `encode`
#[derive(Args, Debug, Clone)]
pub struct PaddingArgs {
    /// Side to pad on: `pre` or `post`
    #[arg(long)]
    pub padding: Option<PaddingMode>,

    /// Token id used as fill value
    #[arg(long)]
    pub pad_value: Option<u32>,

    /// Target sequence length; longer texts are rejected
    #[arg(long)]
    pub maxlen: Option<usize>,
}

/// Arguments of the `classify` command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// CSV file with one text per row
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the classified rows
    #[arg(long)]
    pub output: PathBuf,

    /// JSON configuration file; flags given on the command line take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path of the exported model.json
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Path of the tokenizer JSON
    #[arg(long)]
    pub vocab: Option<PathBuf>,

    #[command(flatten)]
    pub padding: PaddingArgs,

    /// Scores at or above this value are positive
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Rows per model call
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Skip the first row of the input
    #[arg(long)]
    pub has_header: bool,

    /// Draw a progress bar while scoring
    #[arg(long)]
    pub progress: bool,
}

impl ClassifyArgs {
    /// Applies the command line overrides on top of `base`
    pub fn apply_to(&self, mut base: ClassifierConfig) -> ClassifierConfig {
        if let Some(model) = &self.model {
            base.model_path = model.clone();
        }
        if let Some(vocab) = &self.vocab {
            base.vocabulary_path = vocab.clone();
        }
        if let Some(padding) = self.padding.padding {
            base.padding = padding;
        }
        if let Some(pad_value) = self.padding.pad_value {
            base.pad_value = pad_value;
        }
        if self.padding.maxlen.is_some() {
            base.maxlen = self.padding.maxlen;
        }
        if let Some(threshold) = self.threshold {
            base.threshold = threshold;
        }
        if let Some(batch_size) = self.batch_size {
            base.batch_size = batch_size;
        }
        base.has_header |= self.has_header;
        base.show_progress |= self.progress;
        base
    }
}

/// Arguments of the `encode` command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// CSV file with one text per row
    #[arg(long)]
    pub input: PathBuf,

    /// Path of the tokenizer JSON
    #[arg(long)]
    pub vocab: PathBuf,

    #[command(flatten)]
    pub padding: PaddingArgs,

    /// Skip the first row of the input
    #[arg(long)]
    pub has_header: bool,
}

/// Arguments of the `summary` command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Path of the exported model.json
    #[arg(long)]
    pub model: PathBuf,
}
