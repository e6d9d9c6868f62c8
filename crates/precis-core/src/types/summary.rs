//! Summary request and result types.
//!
//! A [`SummaryReport`] is built fresh for every "Generate Summary" press and
//! carries the summaries keyed by [`SummaryKind`] plus the derived
//! [`SummaryStats`]. Lengths are counted in characters, not bytes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Summarization method chosen in the settings form.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    /// Luhn sentence selection only.
    #[default]
    Extraction,
    /// Neural model summary only.
    Abstractive,
    /// Both summaries side by side.
    Both,
}

impl SummaryMethod {
    /// Label shown next to the radio button.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Extraction => "Extraction",
            Self::Abstractive => "Abstractive",
            Self::Both => "Both",
        }
    }

    /// Summary kinds this method produces, in display order.
    pub fn kinds(&self) -> &'static [SummaryKind] {
        match self {
            Self::Extraction => &[SummaryKind::Extraction],
            Self::Abstractive => &[SummaryKind::Abstractive],
            Self::Both => &[SummaryKind::Extraction, SummaryKind::Abstractive],
        }
    }

    /// Whether this method produces the given kind.
    pub fn includes(&self, kind: SummaryKind) -> bool {
        self.kinds().contains(&kind)
    }
}

/// Kind of a produced summary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SummaryKind {
    Extraction,
    Abstractive,
}

impl SummaryKind {
    /// Panel and tab label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Extraction => "Extraction Summary",
            Self::Abstractive => "Abstractive Summary",
        }
    }

    /// Algorithm name used as the download filename prefix.
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::Extraction => "sumy",
            Self::Abstractive => "abstractive",
        }
    }

    /// Download filename: `<algorithm>_summary_<original filename>.txt`.
    pub fn download_filename(&self, original_filename: &str) -> String {
        format!("{}_summary_{}.txt", self.algorithm(), original_filename)
    }
}

/// Summary length as a percentage of the original length.
///
/// Undefined when the original text is empty; it then displays as `N/A`
/// instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompressionRatio(Option<f64>);

impl CompressionRatio {
    /// Ratio of `summary_len` to `original_len`, in percent.
    pub fn new(summary_len: usize, original_len: usize) -> Self {
        if original_len == 0 {
            return Self(None);
        }
        Self(Some(summary_len as f64 / original_len as f64 * 100.0))
    }

    /// Percentage value, `None` when undefined.
    pub fn percent(&self) -> Option<f64> {
        self.0
    }
}

impl fmt::Display for CompressionRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(percent) => write!(f, "{:.1}%", percent),
            None => f.write_str("N/A"),
        }
    }
}

/// Length statistics for one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Original text length in characters.
    pub original_length: usize,
    /// Length of each summary in characters.
    pub summary_lengths: BTreeMap<SummaryKind, usize>,
    /// Sum of all summary lengths.
    pub total_summary_length: usize,
    /// Aggregate ratio over all summaries.
    pub compression_ratio: CompressionRatio,
}

impl SummaryStats {
    /// Compute statistics for the given summaries of `original`.
    pub fn compute(original: &str, summaries: &BTreeMap<SummaryKind, String>) -> Self {
        let original_length = original.chars().count();
        let summary_lengths: BTreeMap<SummaryKind, usize> = summaries
            .iter()
            .map(|(kind, text)| (*kind, text.chars().count()))
            .collect();
        let total_summary_length = summary_lengths.values().sum();

        Self {
            original_length,
            summary_lengths,
            total_summary_length,
            compression_ratio: CompressionRatio::new(total_summary_length, original_length),
        }
    }

    /// Ratio of a single summary.
    pub fn ratio_for(&self, kind: SummaryKind) -> Option<CompressionRatio> {
        self.summary_lengths
            .get(&kind)
            .map(|len| CompressionRatio::new(*len, self.original_length))
    }
}

/// Result of one summarization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Method that produced this report.
    pub method: SummaryMethod,
    /// Text extracted from the uploaded document.
    pub original_text: String,
    /// Summaries keyed by kind.
    pub summaries: BTreeMap<SummaryKind, String>,
    /// Derived statistics.
    pub stats: SummaryStats,
}

impl SummaryReport {
    /// Build a report and compute its statistics.
    pub fn new(
        method: SummaryMethod,
        original_text: String,
        summaries: BTreeMap<SummaryKind, String>,
    ) -> Self {
        let stats = SummaryStats::compute(&original_text, &summaries);
        Self {
            method,
            original_text,
            summaries,
            stats,
        }
    }

    /// Summary text of one kind.
    pub fn summary(&self, kind: SummaryKind) -> Option<&str> {
        self.summaries.get(&kind).map(String::as_str)
    }
}
