use crate::transformers::OutputFormat;

/// Content type used to deliver an output of the given format family.
pub fn mimetype(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Csv => "text/csv",
        OutputFormat::Json => "application/json",
        OutputFormat::Txt => "text/plain",
        OutputFormat::Xml => "text/xml",
    }
}
