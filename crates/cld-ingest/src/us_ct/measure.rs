//! Measurement value domain for CT lab results
//!
//! The source feed records analyte percentages as free text, and the text
//! is messy: blanks, lone separators, `"TRC"`, `"<LOQ"`, `"<0.1"`, stray
//! commas and `%` suffixes, and a handful of outright garbage rows.
//! [`Measure`] is the single interpretation point for that text: a tagged
//! value holding exactly one of four states, serializable to SQL, CSV and
//! JSON without the states bleeding into each other.

use cld_common::{CldError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display token used for trace readings on the JSON wire.
const TRACE_DISPLAY: &str = "<0.01";

/// A single measurement slot: no reading, an explicit zero, an
/// unquantified trace detection, or a genuine amount.
///
/// `Amount` holds the value as parsed; the percentage bound is only
/// checked on demand through [`Measure::is_valid_percent`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Measure {
    /// No measurement present
    #[default]
    Empty,
    /// An explicitly recorded value of 0
    Zero,
    /// A detected-but-unquantified trace reading
    Trace,
    /// A finite measured amount, by convention a percentage
    Amount(f64),
}

/// Returns true if the text is one of the known-garbage shapes seen in the
/// source feed. Examples: `"1.1.2"`, `",<0.1"`, `"terpinolene: 1.22 ..."`.
fn is_error_text(text: &str) -> bool {
    // One entry had two decimal points (1.1.)... skip those
    if text.matches('.').count() > 1 {
        return true;
    }

    // Commas, weird quotes and bracketed notes
    if text.contains([',', '`', '/', '(', ')']) {
        return true;
    }

    // Specific bad rows start with letters
    if text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
    {
        return true;
    }

    text == "0<0.10"
        || text.starts_with("terpinolene: 1.22")
        || text.starts_with("a-Ocimene: 1.08")
}

/// Returns true if the text denotes no measurement at all.
/// Examples: `""`, `"."`, `"-"`, `"--"`.
fn is_empty_text(text: &str) -> bool {
    text.is_empty() || text == "." || text == "-" || text.starts_with("--")
}

/// Returns true if the text denotes a trace measurement.
/// Examples: `"TRC"`, `"<LOQ"`, `"<0.1"`.
///
/// The `"TRC"` literal is shadowed in [`Measure::from_text`]: the
/// leading-letter garbage rule claims it first, so it only matters for
/// callers classifying pre-screened text.
fn is_trace_text(text: &str) -> bool {
    text == "TRC" || text.contains("LOQ") || text.starts_with('<')
}

impl Measure {
    /// Build a measure from a raw amount.
    ///
    /// Zero maps to [`Measure::Zero`]. Negative amounts are the feed's
    /// historical convention for "not a clean number" and map to
    /// [`Measure::Trace`], never to a real negative measurement.
    pub fn from_amount(amount: f64) -> Self {
        if amount == 0.0 {
            Measure::Zero
        } else if amount < 0.0 {
            Measure::Trace
        } else {
            Measure::Amount(amount)
        }
    }

    /// Interpret a raw measurement string.
    ///
    /// Classification order matters: garbage and empty shapes resolve to
    /// [`Measure::Empty`] before the trace test or the numeric parser ever
    /// see the text. Text that survives classification is cleaned (one
    /// leading `,`, one leading `>`, one trailing `%`) and must then parse
    /// as a finite decimal; anything else is a [`CldError::Parse`].
    pub fn from_text(text: &str) -> Result<Self> {
        if is_error_text(text) || is_empty_text(text) {
            return Ok(Measure::Empty);
        }
        if is_trace_text(text) {
            return Ok(Measure::Trace);
        }

        // A few rows start with ","... just strip that
        let cleaned = text.strip_prefix(',').unwrap_or(text);

        // For rows with ">", we also just strip that
        let cleaned = cleaned.strip_prefix('>').unwrap_or(cleaned);

        // Remove percent signs, it is always percentages
        let cleaned = cleaned.strip_suffix('%').unwrap_or(cleaned);

        let amount: f64 = cleaned
            .parse()
            .map_err(|_| CldError::Parse(format!("unrecognized measurement text: {text:?}")))?;
        if !amount.is_finite() {
            return Err(CldError::Parse(format!(
                "non-finite measurement value: {text:?}"
            )));
        }

        Ok(Measure::from_amount(amount))
    }

    /// True if no measurement is present
    pub fn is_empty(&self) -> bool {
        matches!(self, Measure::Empty)
    }

    /// True if the measure is an explicit zero
    pub fn is_zero(&self) -> bool {
        matches!(self, Measure::Zero)
    }

    /// True if the measure is a trace reading
    pub fn is_trace(&self) -> bool {
        matches!(self, Measure::Trace)
    }

    /// Decompose into (value, is_trace, is_empty).
    ///
    /// Trace and empty states report a value of 0.
    pub fn amount(&self) -> (f64, bool, bool) {
        match self {
            Measure::Empty => (0.0, false, true),
            Measure::Zero => (0.0, false, false),
            Measure::Trace => (0.0, true, false),
            Measure::Amount(v) => (*v, false, false),
        }
    }

    /// True if the measure is a valid percentage reading.
    ///
    /// Empty, zero and trace states are always valid; an amount is valid
    /// iff it lies in `0..=100`.
    pub fn is_valid_percent(&self) -> bool {
        match self {
            Measure::Empty | Measure::Zero | Measure::Trace => true,
            Measure::Amount(v) => (0.0..=100.0).contains(v),
        }
    }

    /// SQL literal form: `NULL` for empty and trace, `0` for zero,
    /// six-decimal text otherwise.
    pub fn as_sql(&self) -> String {
        match self {
            Measure::Empty | Measure::Trace => "NULL".to_string(),
            Measure::Zero => "0".to_string(),
            Measure::Amount(v) => format!("{v:.6}"),
        }
    }

    /// CSV field form: empty string for empty and trace, `0` for zero,
    /// six-decimal text otherwise.
    pub fn as_csv(&self) -> String {
        match self {
            Measure::Empty | Measure::Trace => String::new(),
            Measure::Zero => "0".to_string(),
            Measure::Amount(v) => format!("{v:.6}"),
        }
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Measure::Empty => serializer.serialize_none(),
            Measure::Zero => serializer.serialize_u32(0),
            Measure::Trace => serializer.serialize_str(TRACE_DISPLAY),
            Measure::Amount(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        /// A measurement arrives as a JSON string, a bare number, or null.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(Measure::Empty),
            Some(Repr::Number(v)) => Ok(Measure::from_amount(v)),
            Some(Repr::Text(text)) => Measure::from_text(&text).map_err(serde::de::Error::custom),
        }
    }
}
