/// A source-format parser producing candidate rows.
pub trait Parser {
    type Output;

    /// Parse the whole file; the first row is always a header.
    fn parse(content: &str) -> Result<Vec<Self::Output>, String>;

    fn is_supported(filename: Option<&str>, content: &str) -> bool;
}
