//! # Shape Assertion Macros
//!
//! Shorthand for the functions in [`crate::assertions`].

/// Assert that a descriptor follows the error convention
///
/// # Examples
///
/// ```rust
/// use errshape_testing::{assert_error_shape, fixtures, ValidatorConfig};
///
/// assert_error_shape!(fixtures::conforming());
///
/// assert_error_shape!(
///     fixtures::missing(errshape_testing::ConstructorSignature::Serialization),
///     config: ValidatorConfig::default().without_serialization_constructor()
/// );
/// ```
#[macro_export]
macro_rules! assert_error_shape {
    ($descriptor:expr) => {
        $crate::assertions::assert_is_error(&$descriptor)
    };

    ($descriptor:expr, config: $config:expr) => {
        $crate::assertions::assert_is_error_with(
            &$crate::ShapeValidator::with_config($config),
            &$descriptor,
        )
    };
}

/// Assert that a Rust error type follows the error convention
///
/// # Examples
///
/// ```rust
/// use errshape_testing::{assert_error_type, fixtures::FixtureError};
///
/// assert_error_type!(FixtureError);
/// ```
#[macro_export]
macro_rules! assert_error_type {
    ($error_type:ty) => {
        $crate::assertions::assert_type_is_error::<$error_type>()
    };
}

/// Assert that validation of a descriptor stops on the given violation
///
/// # Examples
///
/// ```rust
/// use errshape_testing::{assert_violation, fixtures, Violation};
///
/// assert_violation!(fixtures::copies_cause(), Violation::CauseNotPreserved);
/// ```
#[macro_export]
macro_rules! assert_violation {
    ($descriptor:expr, $violation:expr) => {{
        let _ = $crate::assertions::assert_shape_violation(&$descriptor, &$violation);
    }};
}

#[cfg(test)]
mod tests {
    use crate::fixtures;
    use errshape_core::{ConstructorSignature, ValidatorConfig, Violation};

    #[test]
    fn test_assert_error_shape_macro() {
        assert_error_shape!(fixtures::conforming());
    }

    #[test]
    fn test_assert_error_shape_macro_with_config() {
        assert_error_shape!(
            fixtures::missing(ConstructorSignature::Serialization),
            config: ValidatorConfig::default().without_serialization_constructor()
        );
    }

    #[test]
    #[should_panic(expected = "does not follow the error convention")]
    fn test_assert_error_shape_macro_fails() {
        assert_error_shape!(fixtures::placeholder_default_cause());
    }

    #[test]
    fn test_assert_error_type_macro() {
        assert_error_type!(fixtures::FixtureError);
    }

    #[test]
    fn test_assert_violation_macro() {
        assert_violation!(fixtures::ignores_message(), Violation::MessageNotPropagated {
            signature: ConstructorSignature::Message,
            expected: "My Message TeXT".to_string(),
            actual: fixtures::FIXED_MESSAGE.to_string(),
        });
    }
}
