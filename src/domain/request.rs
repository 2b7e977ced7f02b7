use std::collections::BTreeMap;

use crate::domain::validation::ValidationError;
use crate::domain::value::{MobileNumber, TemplateId, VerificationCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendVerificationCode {
    mobile: MobileNumber,
    code: VerificationCode,
}

impl SendVerificationCode {
    pub fn new(mobile: MobileNumber, code: VerificationCode) -> Self {
        Self { mobile, code }
    }

    /// Validate raw strings and build the request in one step.
    pub fn parse(
        mobile: impl Into<String>,
        code: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(MobileNumber::new(mobile)?, VerificationCode::new(code)?))
    }

    pub fn mobile(&self) -> &MobileNumber {
        &self.mobile
    }

    pub fn code(&self) -> &VerificationCode {
        &self.code
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendByTemplate {
    mobile: MobileNumber,
    template_id: TemplateId,
    parameters: BTreeMap<String, String>,
}

impl SendByTemplate {
    /// Field name used in validation errors for template parameter names.
    pub const PARAMETER_FIELD: &'static str = "Parameter";

    pub fn new(mobile: MobileNumber, template_id: TemplateId) -> Self {
        Self {
            mobile,
            template_id,
            parameters: BTreeMap::new(),
        }
    }

    /// Add one substitution parameter. A repeated name replaces the earlier value.
    pub fn parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: Self::PARAMETER_FIELD,
            });
        }
        self.parameters.insert(name, value.into());
        Ok(self)
    }

    /// Add every pair from `parameters`; see [`SendByTemplate::parameter`].
    pub fn parameters<I, K, V>(self, parameters: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        parameters
            .into_iter()
            .try_fold(self, |request, (name, value)| request.parameter(name, value))
    }

    pub fn mobile(&self) -> &MobileNumber {
        &self.mobile
    }

    pub fn template_id(&self) -> TemplateId {
        self.template_id
    }

    pub fn parameter_map(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}
