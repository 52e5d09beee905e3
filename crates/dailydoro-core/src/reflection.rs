use crate::error::ValidationError;

/// Maximum length of the gratitude/reflection note, in characters.
pub const REFLECTION_MAX_CHARS: usize = 500;

/// Free-text note read at export time. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflectionNote(String);

impl ReflectionNote {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        let len = text.chars().count();
        if len > REFLECTION_MAX_CHARS {
            return Err(ValidationError::TooLong {
                field: "reflection".to_string(),
                len,
                max: REFLECTION_MAX_CHARS,
            });
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Live counter, e.g. `42/500`.
    pub fn counter(&self) -> String {
        format!("{}/{}", self.char_count(), REFLECTION_MAX_CHARS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_counts_characters_not_bytes() {
        let note = ReflectionNote::new("gracias, café").unwrap();
        assert_eq!(note.counter(), "13/500");
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(ReflectionNote::new("a".repeat(REFLECTION_MAX_CHARS)).is_ok());
        let err = ReflectionNote::new("a".repeat(REFLECTION_MAX_CHARS + 1)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { len: 501, .. }));
    }

    #[test]
    fn whitespace_note_is_empty() {
        assert!(ReflectionNote::new("  \n").unwrap().is_empty());
        assert!(ReflectionNote::default().is_empty());
        assert_eq!(ReflectionNote::default().counter(), "0/500");
    }
}
