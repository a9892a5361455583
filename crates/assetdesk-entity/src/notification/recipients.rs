//! Recipient lists attached to notification rules.

use std::fmt;

use assetdesk_core::AppError;
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered list of user ids a rule notifies.
///
/// Stored as a single comma-joined column; parsing trims each entry and
/// drops empty ones. Order and duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipientList(Vec<String>);

impl RecipientList {
    /// Build from already-separated ids, trimming and dropping empties.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            ids.into_iter()
                .map(|id| id.as_ref().trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        )
    }

    /// Parse the comma-joined column form.
    pub fn parse(joined: &str) -> Self {
        Self::new(joined.split(','))
    }

    /// The comma-joined column form.
    pub fn to_joined(&self) -> String {
        self.0.join(",")
    }

    /// Check that no id would be split apart by the joined form.
    pub fn validate(&self) -> Result<(), AppError> {
        match self.0.iter().find(|id| id.contains(',')) {
            Some(id) => Err(AppError::validation(format!(
                "Recipient id '{id}' must not contain a comma"
            ))),
            None => Ok(()),
        }
    }

    /// Iterate over recipient ids in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of recipients, counting duplicates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nobody to notify.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecipientList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_joined())
    }
}

impl From<String> for RecipientList {
    fn from(joined: String) -> Self {
        Self::parse(&joined)
    }
}

/// Accepts either a JSON array of ids or a comma-joined string.
impl<'de> Deserialize<'de> for RecipientList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            List(Vec<String>),
            Joined(String),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::List(ids) => Self::new(ids),
            Wire::Joined(joined) => Self::parse(&joined),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_empties() {
        let list = RecipientList::parse(" u1, ,u2,,u1 ");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["u1", "u2", "u1"]);
        assert_eq!(list.to_joined(), "u1,u2,u1");
    }

    #[test]
    fn test_empty_string_has_no_recipients() {
        assert!(RecipientList::parse("").is_empty());
        assert!(RecipientList::parse(" , ").is_empty());
    }

    #[test]
    fn test_deserialize_accepts_array_or_string() {
        let from_array: RecipientList = serde_json::from_str(r#"["a","b"]"#).unwrap();
        let from_string: RecipientList = serde_json::from_str(r#""a, b""#).unwrap();
        assert_eq!(from_array, from_string);
        assert_eq!(serde_json::to_string(&from_array).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_validate_rejects_embedded_commas() {
        let list = RecipientList::new(["a,b"]);
        assert!(list.validate().is_err());
        assert!(RecipientList::new(["a"]).validate().is_ok());
    }
}
