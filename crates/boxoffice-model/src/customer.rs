use serde::Serialize;

use crate::codec::{DecodeError, Fields, Line};
use crate::field::{self, FieldError};
use crate::{Id, RecordFormat};

/// A customer: `id|name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: Id,
    name: String,
}

impl Customer {
    pub const FORMAT: RecordFormat<Self> = RecordFormat {
        kind: "customer",
        id: Self::id,
        encode: Self::encode,
        decode: Self::decode,
    };

    /// # Errors
    ///
    /// Rejects a name containing the delimiter or a line break.
    pub fn new(id: Id, name: impl Into<String>) -> Result<Self, FieldError> {
        Ok(Self {
            id,
            name: field::text("name", name)?,
        })
    }

    #[must_use]
    pub const fn id(&self) -> Id {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Rejects a name containing the delimiter or a line break.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FieldError> {
        self.name = field::text("name", name)?;
        Ok(())
    }

    #[must_use]
    pub fn encode(&self) -> String {
        Line::default().push(self.id).push(&self.name).finish()
    }

    /// # Errors
    ///
    /// Returns a [`DecodeError`] naming the line when it is malformed.
    pub fn decode(line: &str) -> Result<Self, DecodeError> {
        let fields = Fields::split(line, 2)?;
        Ok(Self {
            id: fields.id(0, "id")?,
            name: fields.text(1, "name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_id_and_name() {
        let ana = Customer::new(1, "Ana").unwrap();
        assert_eq!(ana.encode(), "1|Ana");
        assert_eq!(Customer::decode("1|Ana").unwrap(), ana);
    }

    #[test]
    fn keeps_non_ascii_names() {
        let c = Customer::new(12, "Ελένη Παπαδοπούλου").unwrap();
        assert_eq!(Customer::decode(&c.encode()).unwrap(), c);
    }

    #[test]
    fn rejects_non_numeric_id() {
        let err = Customer::decode("one|Ana").unwrap_err();
        assert!(matches!(err, DecodeError::Integer { field: "id", .. }));
    }

    #[test]
    fn decoded_name_follows_the_constructor_rules() {
        let err = Customer::decode("1|A\rB").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Text {
                source: FieldError::LineBreak { field: "name" },
                ..
            }
        ));
    }

    #[test]
    fn rename_validates_text() {
        let mut c = Customer::new(1, "Ana").unwrap();
        assert!(c.set_name("Ana|B").is_err());
        c.set_name("Anna").unwrap();
        assert_eq!(c.name(), "Anna");
    }
}
