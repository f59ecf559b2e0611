/// A point in subtitle-relative time backed by a flat duration.
pub trait Timestamp {
    /// The timestamp's duration in the format's smallest unit.
    fn duration(&self) -> u64;
    fn set_duration(&mut self, duration: u64);
    /// Renders the timestamp the way the format writes it.
    fn formatted_string(&self) -> String;
}

/// Static description of a subtitle file format.
pub trait SubtitleFormat {
    fn name(&self) -> &'static str;
    fn extension(&self) -> &'static str;
    fn version(&self) -> &'static str;
}
