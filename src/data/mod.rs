//! Wire-format decoders.
//!
//! One decoder per format, shared by every chart that consumes the format:
//!
//! - SSB PXWeb cubes (`ssb`)
//! - Norges Bank SDMX-JSON (`sdmx`)
//! - repository-local pre-shaped JSON (`statics`)
//! - the period-label grammar the SSB path relies on (`timelabel`)

pub mod sdmx;
pub mod ssb;
pub mod statics;
pub mod timelabel;

pub use timelabel::parse_time_label;

use serde_json::Value;

/// Extract a finite f64 from a JSON leaf. Norges Bank serializes
/// observation values as strings, SSB as numbers; both appear in the wild.
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_accepts_numbers_and_numeric_strings() {
        assert_eq!(numeric(&json!(1.5)), Some(1.5));
        assert_eq!(numeric(&json!("2.25")), Some(2.25));
        assert_eq!(numeric(&json!(" 3 ")), Some(3.0));
    }

    #[test]
    fn numeric_rejects_everything_else() {
        assert_eq!(numeric(&json!(null)), None);
        assert_eq!(numeric(&json!("n/a")), None);
        assert_eq!(numeric(&json!([1])), None);
        assert_eq!(numeric(&json!("NaN")), None);
    }
}
