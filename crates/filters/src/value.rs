use std::fmt;

/// Attribute value compared by value needles and handed to callbacks.
///
/// Equality is structural: `Text("2")` never equals `Number(2)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum AttrValue {
    /// A string such as a basename or a relative path.
    Text(String),
    /// A boolean such as `is_dir`.
    Flag(bool),
    /// An integer such as `depth`.
    Number(i64),
}

impl AttrValue {
    /// Returns the text payload, if this is a [`AttrValue::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag(_) | Self::Number(_) => None,
        }
    }

    /// Returns the flag payload, if this is a [`AttrValue::Flag`].
    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            Self::Text(_) | Self::Number(_) => None,
        }
    }

    /// Returns the number payload, if this is a [`AttrValue::Number`].
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(_) | Self::Flag(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::AttrValue;

    #[test]
    fn equality_is_structural() {
        assert_eq!(AttrValue::from("2"), AttrValue::Text("2".into()));
        assert_ne!(AttrValue::from("2"), AttrValue::from(2));
        assert_ne!(AttrValue::from(true), AttrValue::from("true"));
    }

    #[test]
    fn display_renders_payload() {
        assert_eq!(AttrValue::from("a.txt").to_string(), "a.txt");
        assert_eq!(AttrValue::from(false).to_string(), "false");
        assert_eq!(AttrValue::from(-3_i64).to_string(), "-3");
    }

    #[test]
    fn accessors_only_match_their_variant() {
        let text = AttrValue::from("x");
        assert_eq!(text.as_text(), Some("x"));
        assert_eq!(text.as_flag(), None);
        assert_eq!(AttrValue::from(7).as_number(), Some(7));
        assert_eq!(AttrValue::from(true).as_flag(), Some(true));
    }
}
