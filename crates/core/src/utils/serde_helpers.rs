//! Serde utility helpers for case-insensitive deserialization

/// Macro to implement case-insensitive deserialization for unit enums
///
/// Aspect outputs and hand-written cache files disagree on casing
/// (`LIBRARY` vs `library`), so both are accepted.
///
/// Usage:
/// ```ignore
/// impl_case_insensitive_deserialize!(
///     MyEnum,
///     Variant1 => "variant1",
///     Variant2 => "variant2"
/// );
/// ```
#[macro_export]
macro_rules! impl_case_insensitive_deserialize {
    ($enum_type:ty, $($variant:ident => $str_val:expr),+ $(,)?) => {
        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                match s.to_lowercase().as_str() {
                    $(
                        $str_val => Ok(Self::$variant),
                    )+
                    _ => Err(serde::de::Error::custom(format!(
                        "unknown variant '{}', expected one of: {}",
                        s,
                        [$($str_val),+].join(", ")
                    ))),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::types::{Language, Tag};

    #[test]
    fn test_tag_accepts_any_case() {
        let tags: Vec<Tag> = serde_json::from_str(r#"["LIBRARY", "no_ide", "Test"]"#).unwrap();
        assert_eq!(tags, vec![Tag::Library, Tag::NoIde, Tag::Test]);
    }

    #[test]
    fn test_language_rejects_unknown_variant() {
        let err = serde_json::from_str::<Language>(r#""cobol""#).unwrap_err();
        assert!(err.to_string().contains("unknown variant 'cobol'"));
    }
}
