use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored user record
///
/// The password is kept and returned as given; there is no hashing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request body for create and update
///
/// Keys match case-insensitively. Missing or `null` fields decode to empty
/// strings, a `null` body decodes to the default input, and unknown keys are
/// ignored. `id` is type-checked as an integer and then discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl<'de> Deserialize<'de> for UserInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(UserInputVisitor)
    }
}

struct UserInputVisitor;

impl<'de> Visitor<'de> for UserInputVisitor {
    type Value = UserInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a user object or null")
    }

    fn visit_none<E: de::Error>(self) -> Result<UserInput, E> {
        Ok(UserInput::default())
    }

    fn visit_unit<E: de::Error>(self) -> Result<UserInput, E> {
        Ok(UserInput::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<UserInput, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<UserInput, A::Error> {
        let mut input = UserInput::default();

        while let Some(key) = map.next_key::<String>()? {
            let field = if key.eq_ignore_ascii_case("name") {
                &mut input.name
            } else if key.eq_ignore_ascii_case("email") {
                &mut input.email
            } else if key.eq_ignore_ascii_case("password") {
                &mut input.password
            } else if key.eq_ignore_ascii_case("id") {
                map.next_value::<Option<i64>>()?;
                continue;
            } else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };

            if let Some(value) = map.next_value::<Option<String>>()? {
                *field = value;
            }
        }

        Ok(input)
    }
}

impl User {
    pub fn from_input(id: i64, input: UserInput) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            password: input.password,
        }
    }

    /// Overwrite every mutable field; the id never changes
    pub fn apply(&mut self, input: UserInput) {
        self.name = input.name;
        self.email = input.email;
        self.password = input.password;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_input_ignores_id_and_defaults_missing_fields() {
        let input: UserInput = serde_json::from_str(r#"{"id": 99, "name": "A"}"#).unwrap();
        assert_eq!(
            input,
            UserInput {
                name: "A".to_string(),
                ..UserInput::default()
            }
        );
    }

    #[test]
    fn test_input_null_is_default() {
        let input: UserInput = serde_json::from_str("null").unwrap();
        assert_eq!(input, UserInput::default());
    }

    #[test]
    fn test_input_keys_match_case_insensitively() {
        let input: UserInput =
            serde_json::from_str(r#"{"Name": "A", "EMAIL": "a@x", "passWord": "p"}"#).unwrap();
        assert_eq!(
            input,
            UserInput {
                name: "A".into(),
                email: "a@x".into(),
                password: "p".into(),
            }
        );
    }

    #[test]
    fn test_input_null_field_stays_empty() {
        let input: UserInput = serde_json::from_str(r#"{"name": null, "email": "a@x"}"#).unwrap();
        assert_eq!(input.name, "");
        assert_eq!(input.email, "a@x");
    }

    #[test]
    fn test_input_rejects_wrongly_typed_fields() {
        assert!(serde_json::from_str::<UserInput>(r#"{"id": "x", "name": "A"}"#).is_err());
        assert!(serde_json::from_str::<UserInput>(r#"{"name": 5}"#).is_err());
        assert!(serde_json::from_str::<UserInput>("[]").is_err());
    }

    #[test]
    fn test_user_serializes_all_fields() {
        let user = User::from_input(
            1,
            UserInput {
                name: "A".into(),
                email: "a@x.com".into(),
                password: "p".into(),
            },
        );
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({"id": 1, "name": "A", "email": "a@x.com", "password": "p"})
        );
    }
}
