use super::*;

/// Side of a sequence where fill values are inserted
///
/// # Variants
///
/// - `Pre` - Fill values are prepended, the original elements end up at the tail
/// - `Post` - Fill values are appended after the original elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingMode {
    #[default]
    Pre,
    Post,
}

impl PaddingMode {
    /// Returns the lowercase name used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddingMode::Pre => "pre",
            PaddingMode::Post => "post",
        }
    }
}

impl std::fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaddingMode {
    type Err = ModelError;

    /// Parses `"pre"` or `"post"`
    ///
    /// # Errors
    ///
    /// * `ModelError::InvalidArgument` - For any other string, naming the unsupported mode
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(PaddingMode::Pre),
            "post" => Ok(PaddingMode::Post),
            other => Err(ModelError::InvalidArgument(format!(
                "Invalid padding type: {}",
                other
            ))),
        }
    }
}

/// Pads a batch of variable-length sequences to a common length
///
/// Every output sequence has exactly `maxlen` elements (or the length of the longest input
/// sequence when `maxlen` is `None`). Fill values go before the original elements for
/// `PaddingMode::Pre` and after them for `PaddingMode::Post`. The original elements keep their
/// relative order, and the sequences keep their order within the batch. The input is never
/// modified.
///
/// # Parameters
///
/// - `sequences` - Batch of sequences to pad (may be empty)
/// - `padding` - Side on which fill values are inserted
/// - `value` - Fill value
/// - `maxlen` - Optional target length. If `None`, the maximum length across `sequences` is
///   used (0 for an empty batch)
///
/// # Returns
///
/// - `Ok(Vec<Vec<T>>)` - The padded batch, all rows of length `maxlen`
/// - `Err(ModelError::InvalidArgument)` - If any sequence is longer than the target length.
///   Sequences are never truncated and no partial output is produced
///
/// # Examples
/// ```rust
/// use rustysentiment::utility::{PaddingMode, pad_sequences};
///
/// let batch = vec![vec![7], vec![1, 2, 3]];
/// let padded = pad_sequences(&batch, PaddingMode::Pre, 9, None).unwrap();
/// assert_eq!(padded, vec![vec![9, 9, 7], vec![1, 2, 3]]);
///
/// let padded = pad_sequences(&[vec![1, 2, 3]], PaddingMode::Post, 0, Some(5)).unwrap();
/// assert_eq!(padded, vec![vec![1, 2, 3, 0, 0]]);
///
/// // Longer than the target: rejected, never truncated
/// assert!(pad_sequences(&[vec![1, 2, 3]], PaddingMode::Pre, 0, Some(2)).is_err());
/// ```
pub fn pad_sequences<T: Copy>(
    sequences: &[Vec<T>],
    padding: PaddingMode,
    value: T,
    maxlen: Option<usize>,
) -> Result<Vec<Vec<T>>, ModelError> {
    let target = resolve_target_length(sequences, maxlen)?;

    let padded = sequences
        .iter()
        .map(|seq| {
            let pad_len = target - seq.len();
            let mut row = Vec::with_capacity(target);
            match padding {
                PaddingMode::Pre => {
                    row.extend(std::iter::repeat_n(value, pad_len));
                    row.extend_from_slice(seq);
                }
                PaddingMode::Post => {
                    row.extend_from_slice(seq);
                    row.extend(std::iter::repeat_n(value, pad_len));
                }
            }
            row
        })
        .collect();

    Ok(padded)
}

/// Pads a batch of sequences and returns it as a `[batch_size, maxlen]` matrix
///
/// Same contract as [`pad_sequences`]; the result is laid out row-major so it can be fed to a
/// model expecting a rectangular input.
///
/// # Parameters
///
/// - `sequences` - Batch of sequences to pad
/// - `padding` - Side on which fill values are inserted
/// - `value` - Fill value
/// - `maxlen` - Optional target length
///
/// # Returns
///
/// - `Ok(Array2<T>)` - Matrix with one padded sequence per row
/// - `Err(ModelError::InvalidArgument)` - If any sequence is longer than the target length
pub fn pad_sequences_to_array<T: Copy>(
    sequences: &[Vec<T>],
    padding: PaddingMode,
    value: T,
    maxlen: Option<usize>,
) -> Result<Array2<T>, ModelError> {
    let target = resolve_target_length(sequences, maxlen)?;
    let rows = pad_sequences(sequences, padding, value, Some(target))?;
    let flat: Vec<T> = rows.into_iter().flatten().collect();

    Array2::from_shape_vec((sequences.len(), target), flat).map_err(|e| {
        ModelError::ProcessingError(format!("Failed to build padded matrix: {}", e))
    })
}

/// Removes `pad_len` leading (`Pre`) or trailing (`Post`) elements from a padded sequence
///
/// This is the inverse of padding a single sequence: stripping
/// `padded.len() - original_len` elements from the configured end returns the original
/// elements unchanged.
///
/// # Parameters
///
/// - `padded` - A sequence produced by [`pad_sequences`]
/// - `original_len` - Length of the sequence before padding
/// - `padding` - Side the fill values were inserted on
///
/// # Returns
///
/// - `Ok(&[T])` - View of the original elements
/// - `Err(ModelError::InvalidArgument)` - If `original_len` is larger than the padded sequence
pub fn strip_padding<T>(
    padded: &[T],
    original_len: usize,
    padding: PaddingMode,
) -> Result<&[T], ModelError> {
    if original_len > padded.len() {
        return Err(ModelError::InvalidArgument(format!(
            "original length {} exceeds padded length {}",
            original_len,
            padded.len()
        )));
    }

    let pad_len = padded.len() - original_len;
    Ok(match padding {
        PaddingMode::Pre => &padded[pad_len..],
        PaddingMode::Post => &padded[..original_len],
    })
}

/// Determines the target length and checks that no sequence exceeds it
fn resolve_target_length<T>(sequences: &[Vec<T>], maxlen: Option<usize>) -> Result<usize, ModelError> {
    let longest = sequences.iter().map(Vec::len).max().unwrap_or(0);
    let target = maxlen.unwrap_or(longest);

    // Report the first offending sequence so callers can point at the input row
    if let Some((index, seq)) = sequences
        .iter()
        .enumerate()
        .find(|(_, seq)| seq.len() > target)
    {
        return Err(ModelError::InvalidArgument(format!(
            "sequence exceeds target length: sequence {} has length {}, target length is {}",
            index,
            seq.len(),
            target
        )));
    }

    Ok(target)
}
