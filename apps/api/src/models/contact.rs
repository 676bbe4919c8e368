use serde::{Deserialize, Serialize};

/// Best-guess contact and profile fields pulled out of resume text.
///
/// Every field is either empty (not found) or the first line that matched
/// its rule. Serializes to a flat JSON object with exactly these eight keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    /// Reserved. The line heuristics never fill it.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_serializes_all_eight_keys() {
        let value = serde_json::to_value(ContactRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 8);
        for key in [
            "name",
            "email",
            "phone",
            "location",
            "linkedin",
            "github",
            "portfolio",
            "summary",
        ] {
            assert_eq!(obj.get(key).and_then(|v| v.as_str()), Some(""), "{key}");
        }
    }
}
