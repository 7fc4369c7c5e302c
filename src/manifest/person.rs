//! The `"Name <email> (url)"` person shorthand.

use super::types::{Person, PersonRecord};

impl Person {
    /// Builds a structured person.
    pub fn named(name: impl Into<String>) -> Self {
        Person::Record(PersonRecord {
            name: name.into(),
            ..PersonRecord::default()
        })
    }

    /// The person's name, whichever form is used.
    pub fn name(&self) -> String {
        match self {
            Person::Name(_) => self.to_record().name,
            Person::Record(record) => record.name.clone(),
        }
    }

    /// Returns the structured form, parsing the string shorthand if needed.
    pub fn to_record(&self) -> PersonRecord {
        match self {
            Person::Name(raw) => Person::parse_shorthand(raw),
            Person::Record(record) => record.clone(),
        }
    }

    /// Parses `"Barney Rubble <b@rubble.com> (http://barnyrubble.tumblr.com/)"`.
    ///
    /// Email and URL are both optional and may appear in either order.
    ///
    /// # Example
    ///
    /// ```
    /// use pkgshape::manifest::Person;
    ///
    /// let record = Person::parse_shorthand("Ada Lovelace <ada@example.com>");
    /// assert_eq!(record.name, "Ada Lovelace");
    /// assert_eq!(record.email.as_deref(), Some("ada@example.com"));
    /// assert!(record.url.is_none());
    /// ```
    pub fn parse_shorthand(raw: &str) -> PersonRecord {
        let email = delimited(raw, '<', '>');
        let url = delimited(raw, '(', ')');

        let name_end = raw.find(|c: char| c == '<' || c == '(').unwrap_or(raw.len());
        PersonRecord {
            name: raw[..name_end].trim().to_string(),
            email,
            url,
        }
    }
}

fn delimited(raw: &str, open: char, close: char) -> Option<String> {
    let start = raw.find(open)? + open.len_utf8();
    let len = raw[start..].find(close)?;
    let inner = raw[start..start + len].trim();
    (!inner.is_empty()).then(|| inner.to_string())
}
