use anyhow::{Context, Result};
use log::info;

use crate::{io_utils, layout::DatasetLayout};

pub fn execute(args: &crate::cli::ProbeArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    info!(
        "Probing '{}' with delimiter '{}'",
        args.input.display(),
        crate::printable_delimiter(delimiter)
    );

    let mut reader = io_utils::open_csv_reader_from_path(&args.input, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading header row of {:?}", args.input))?;
    let layout = DatasetLayout::from_headers(&headers);
    layout
        .save(&args.layout)
        .with_context(|| format!("Writing layout to {:?}", args.layout))?;

    info!(
        "Derived layout with {} rating column(s) and {} result column(s) written to {:?}",
        layout.ratings.len(),
        layout.results.len(),
        args.layout
    );
    Ok(())
}
