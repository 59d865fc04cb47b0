//! Shape validator
//!
//! Runs the fixed checklist against an [`ErrorTypeDescriptor`]:
//!
//! 1. the descriptor is present and the configuration is valid
//! 2. the type is the base error type or descends from it
//! 3. the type carries [`Marker::Serializable`]
//! 4. a non-public instance `(serialized-state, serialization-context)` constructor exists
//! 5. a public `()` constructor exists
//! 6. a public `(message)` constructor exists
//! 7. a public `(message, cause)` constructor exists
//! 8. `()` leaves the cause absent
//! 9. `(message)` keeps the probe message and leaves the cause absent
//! 10. `(message, cause)` keeps the probe message and the very same cause object
//!
//! The validator never panics. It returns a [`ShapeReport`] that test adapters
//! turn into failures.

use crate::config::{FailurePolicy, ValidatorConfig};
use crate::descriptor::{
    ConstructorArgs, ConstructorDescriptor, ConstructorSignature, ErrorTypeDescriptor, Marker,
    Visibility,
};
use crate::error::{ShapeError, Violation};
use crate::instance::{BASE_ERROR_TYPE, ErrorInstance, GenericError, SharedError};
use crate::report::{Check, CheckStatus, ShapeReport};
use std::ops::ControlFlow;
use std::sync::Arc;

/// Type name reported when no descriptor was supplied.
pub const ABSENT_TYPE_NAME: &str = "<absent>";

/// Validates error types against the error convention.
#[derive(Debug, Clone, Default)]
pub struct ShapeValidator {
    config: ValidatorConfig,
}

impl ShapeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a descriptor that may be absent.
    pub fn validate_optional(&self, descriptor: Option<&dyn ErrorTypeDescriptor>) -> ShapeReport {
        match descriptor {
            Some(descriptor) => self.validate(descriptor),
            None => {
                tracing::warn!("Shape validation called without an error type descriptor");
                let mut report = ShapeReport::new(ABSENT_TYPE_NAME);
                report.record(
                    Check::NonNullInput,
                    CheckStatus::Failed(ShapeError::invalid_argument(
                        "error type descriptor is absent",
                    )),
                );
                report
            }
        }
    }

    /// Validate a descriptor.
    pub fn validate(&self, descriptor: &dyn ErrorTypeDescriptor) -> ShapeReport {
        let span = tracing::debug_span!(
            "validate_error_shape",
            error_type = descriptor.type_name(),
            policy = ?self.config.failure_policy
        );
        let _guard = span.enter();

        let mut run = Run {
            config: &self.config,
            descriptor,
            report: ShapeReport::new(descriptor.type_name()),
        };
        let input = self.config.validate().map_err(|e| {
            ShapeError::invalid_argument(format!("invalid validator configuration: {e}"))
        });
        if run.outcome(Check::NonNullInput, input).is_continue() {
            run.execute();
        }
        let report = run.report;

        if report.is_pass() {
            tracing::debug!(checks = report.records().len(), "Error type conforms");
        } else {
            tracing::debug!(
                failed = report.failed_count(),
                skipped = report.skipped_count(),
                "Error type does not conform"
            );
        }
        report
    }

    /// Validate and return the first failure, if any.
    pub fn check(&self, descriptor: &dyn ErrorTypeDescriptor) -> Result<(), ShapeError> {
        self.validate(descriptor).into_result()
    }
}

/// State of a single validation pass.
struct Run<'a> {
    config: &'a ValidatorConfig,
    descriptor: &'a dyn ErrorTypeDescriptor,
    report: ShapeReport,
}

impl<'a> Run<'a> {
    /// Run checks 2 to 10, stopping where the policy says to.
    fn execute(&mut self) {
        if self.checklist().is_break() {
            tracing::debug!(recorded = self.report.records().len(), "Validation stopped early");
        }
    }

    fn checklist(&mut self) -> ControlFlow<()> {
        let inherits = self.inheritance();
        self.outcome(Check::Inheritance, inherits)?;

        let serializable = self.serializable_marker();
        self.outcome(Check::SerializableMarker, serializable)?;

        if self.config.require_serialization_constructor {
            self.constructor(
                Check::SerializationConstructor,
                ConstructorSignature::Serialization,
            )?;
        } else {
            self.skip(Check::SerializationConstructor);
        }

        let default = self.constructor(Check::DefaultConstructor, ConstructorSignature::Default)?;
        let message = self.constructor(Check::MessageConstructor, ConstructorSignature::Message)?;
        let message_cause = self.constructor(
            Check::MessageCauseConstructor,
            ConstructorSignature::MessageCause,
        )?;

        match default {
            Some(ctor) => {
                let outcome = self.default_behavior(ctor);
                self.outcome(Check::DefaultBehavior, outcome)?;
            }
            None => self.skip(Check::DefaultBehavior),
        }

        match message {
            Some(ctor) => {
                let outcome = self.message_behavior(ctor);
                self.outcome(Check::MessageBehavior, outcome)?;
            }
            None => self.skip(Check::MessageBehavior),
        }

        match message_cause {
            Some(ctor) => {
                let outcome = self.cause_behavior(ctor);
                self.outcome(Check::CauseBehavior, outcome)?;
            }
            None => self.skip(Check::CauseBehavior),
        }

        ControlFlow::Continue(())
    }

    fn violation(&self, violation: Violation) -> ShapeError {
        ShapeError::violation(self.descriptor.type_name(), violation)
    }

    /// Record a check result. Breaks when the run must stop.
    fn outcome(&mut self, check: Check, outcome: Result<(), ShapeError>) -> ControlFlow<()> {
        match outcome {
            Ok(()) => {
                tracing::debug!(check = %check, "Check passed");
                self.report.record(check, CheckStatus::Passed);
                ControlFlow::Continue(())
            }
            Err(error) => {
                tracing::warn!(check = %check, error = %error, "Check failed");
                let stop = error.is_invalid_argument()
                    || self.config.failure_policy == FailurePolicy::FailFast;
                self.report.record(check, CheckStatus::Failed(error));
                if stop {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            }
        }
    }

    fn skip(&mut self, check: Check) {
        tracing::debug!(check = %check, "Check skipped");
        self.report.record(check, CheckStatus::Skipped);
    }

    fn inheritance(&self) -> Result<(), ShapeError> {
        if self.descriptor.is_or_derives_from(BASE_ERROR_TYPE) {
            Ok(())
        } else {
            Err(self.violation(Violation::NotBaseErrorDescendant))
        }
    }

    fn serializable_marker(&self) -> Result<(), ShapeError> {
        if self.descriptor.has_marker(Marker::Serializable) {
            Ok(())
        } else {
            Err(self.violation(Violation::NotSerializable))
        }
    }

    /// Presence check. Continues with the constructor when found.
    fn constructor(
        &mut self,
        check: Check,
        signature: ConstructorSignature,
    ) -> ControlFlow<(), Option<&'a ConstructorDescriptor>> {
        let found = self.find_constructor(signature);
        let ctor = found.as_ref().ok().copied();
        self.outcome(check, found.map(|_| ()))?;
        ControlFlow::Continue(ctor)
    }

    fn find_constructor(
        &self,
        signature: ConstructorSignature,
    ) -> Result<&'a ConstructorDescriptor, ShapeError> {
        let descriptor = self.descriptor;
        let declared = descriptor
            .constructor(signature)
            .map_err(|e| ShapeError::invalid_argument(e.to_string()))?;

        match declared {
            Some(ctor) if matches_convention(ctor, signature.required_visibility()) => Ok(ctor),
            _ => Err(self.violation(Violation::MissingConstructor(signature))),
        }
    }

    fn instantiate(
        &self,
        ctor: &ConstructorDescriptor,
        args: ConstructorArgs,
    ) -> Result<Box<dyn ErrorInstance>, ShapeError> {
        ctor.invoke(args).map_err(|e| {
            self.violation(Violation::ConstructionFailed {
                signature: ctor.signature(),
                reason: e.to_string(),
            })
        })
    }

    fn default_behavior(&self, ctor: &ConstructorDescriptor) -> Result<(), ShapeError> {
        let instance = self.instantiate(ctor, ConstructorArgs::Default)?;
        if instance.cause().is_some() {
            return Err(self.violation(Violation::DefaultCausePresent));
        }
        Ok(())
    }

    fn message_behavior(&self, ctor: &ConstructorDescriptor) -> Result<(), ShapeError> {
        let probe = self.config.probe_message.clone();
        let instance = self.instantiate(ctor, ConstructorArgs::Message(probe))?;

        self.expect_message(ConstructorSignature::Message, &*instance)?;
        if instance.cause().is_some() {
            return Err(self.violation(Violation::MessageCausePresent));
        }
        Ok(())
    }

    fn cause_behavior(&self, ctor: &ConstructorDescriptor) -> Result<(), ShapeError> {
        let probe = self.config.probe_message.clone();
        let cause: SharedError = Arc::new(GenericError::new());
        let instance = self.instantiate(ctor, ConstructorArgs::MessageCause(probe, cause.clone()))?;

        self.expect_message(ConstructorSignature::MessageCause, &*instance)?;
        match instance.cause() {
            None => Err(self.violation(Violation::CauseDropped)),
            Some(stored) if !Arc::ptr_eq(stored, &cause) => {
                Err(self.violation(Violation::CauseNotPreserved))
            }
            Some(_) => Ok(()),
        }
    }

    fn expect_message(
        &self,
        signature: ConstructorSignature,
        instance: &dyn ErrorInstance,
    ) -> Result<(), ShapeError> {
        let probe = &self.config.probe_message;
        if instance.message().contains(probe.as_str()) {
            Ok(())
        } else {
            Err(self.violation(Violation::MessageNotPropagated {
                signature,
                expected: probe.clone(),
                actual: instance.message().to_string(),
            }))
        }
    }
}

fn matches_convention(ctor: &ConstructorDescriptor, visibility: Visibility) -> bool {
    !ctor.is_static() && ctor.visibility() == visibility
}
