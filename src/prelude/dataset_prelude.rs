pub use crate::dataset::text_csv::{
    ClassifiedRecord, TextRecord, parse_text_records, read_text_records, to_csv_string,
    write_classified_records,
};
