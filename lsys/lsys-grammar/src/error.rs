//! Error types for grammar parsing and validation.

use thiserror::Error;

/// Result type for grammar operations.
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Errors that can occur while parsing or validating a rule grammar.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Missing required element.
    #[error("missing required element: {element} in {context}")]
    MissingElement {
        /// The missing element name.
        element: &'static str,
        /// Where the element was expected.
        context: String,
    },

    /// Missing required attribute.
    #[error("missing required attribute: {attribute} on {element}")]
    MissingAttribute {
        /// The missing attribute name.
        attribute: &'static str,
        /// The element that should have the attribute.
        element: String,
    },

    /// Invalid attribute value.
    #[error("invalid value for {attribute} on {element}: {message}")]
    InvalidAttribute {
        /// The attribute with the invalid value.
        attribute: &'static str,
        /// The element containing the attribute.
        element: String,
        /// Description of why the value is invalid.
        message: String,
    },

    /// A call or successor references a rule name no rule declares.
    #[error("reference to undefined rule: {name} in {context}")]
    UndefinedRule {
        /// The referenced rule name.
        name: String,
        /// The referencing site.
        context: String,
    },

    /// The grammar declares no rule named `entry`.
    #[error("grammar has no 'entry' rule")]
    NoEntryRule,
}

impl GrammarError {
    /// Create a missing element error.
    pub fn missing_element(element: &'static str, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element,
            context: context.into(),
        }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(attribute: &'static str, element: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute,
            element: element.into(),
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid_attribute(
        attribute: &'static str,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            attribute,
            element: element.into(),
            message: message.into(),
        }
    }

    /// Create an undefined rule error.
    pub fn undefined_rule(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UndefinedRule {
            name: name.into(),
            context: context.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_carries_context() {
        let err = GrammarError::missing_attribute("name", "rule");
        assert!(err.to_string().contains("name"));
        assert!(err.to_string().contains("rule"));

        let err = GrammarError::undefined_rule("ghost", "call in rule 'entry'");
        assert!(err.to_string().contains("ghost"));
        assert!(err.to_string().contains("entry"));
    }
}
