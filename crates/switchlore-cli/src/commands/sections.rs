//! Sections command implementation.

use crate::cli::SectionsArgs;
use crate::error::Result;
use crate::output::{Formatter, SectionListing};
use switchlore_extractor::{ingest_files, load_files, split_sections, IngestOptions};

/// Execute the sections command.
pub fn execute_sections(args: SectionsArgs, formatter: &Formatter) -> Result<()> {
    let options = IngestOptions {
        extension: args.extension,
        exclude: args.exclude,
    };
    let listings = list_sections(&args.sources, &options)?;
    println!("{}", formatter.format_sections(&listings)?);
    Ok(())
}

/// Section names per file, in file order then header order.
pub fn list_sections<P: AsRef<std::path::Path>>(
    sources: &[P],
    options: &IngestOptions,
) -> Result<Vec<SectionListing>> {
    let paths = ingest_files(sources, options)?;
    let files = load_files(&paths)?;
    Ok(files
        .iter()
        .map(|file| {
            let sections = split_sections(file.content()).into_keys().collect();
            (file.identifier().to_string(), sections)
        })
        .collect())
}
