/// A single trimmed value extracted from the first column of an uploaded table.
/// Examples: `0911223344`, `+251 91 122 3344`, `TCK-004512`
pub type RawCell = String;
/// Digit-suffix identity key used for matching and deduplication.
/// Examples: `911223344` (from `+251911223344`, `0911223344`, or `911223344`)
pub type CanonicalKey = String;
/// Last-8-character key used by the three-way comparison.
/// Example: `11223344` (from `+251911223344`)
pub type SuffixKey = String;
