//! Wire-level types for the SOAP object service.

/// A SOAP fault extracted from a response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    pub fault_code: String,
    pub fault_string: String,
}

impl std::fmt::Display for SoapFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.fault_code, self.fault_string)
    }
}

/// Outcome of a Create/Update/Delete call.
#[derive(Debug, Clone)]
pub struct OperationResult {
    /// Overall status of the request (`OK` or an error string).
    pub overall_status: String,
    /// Per-object status code (`OK` / `Error`).
    pub status_code: String,
    /// Human-readable status message, when the service provides one.
    pub status_message: Option<String>,
    /// Identifier assigned to a newly created object.
    pub new_id: Option<String>,
}

impl OperationResult {
    /// Returns true if the object-level operation succeeded.
    pub fn is_ok(&self) -> bool {
        self.status_code == "OK"
    }
}

/// Comparison operator of a simple filter part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Like,
}

impl FilterOperator {
    /// The wire spelling of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::NotEquals => "notEquals",
            FilterOperator::GreaterThan => "greaterThan",
            FilterOperator::LessThan => "lessThan",
            FilterOperator::Like => "like",
        }
    }
}

/// A single-property filter expression attached to a retrieve request.
#[derive(Debug, Clone)]
pub struct SimpleFilter {
    pub property: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl SimpleFilter {
    /// Filter on `property == value`.
    pub fn equals(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            operator: FilterOperator::Equals,
            value: value.into(),
        }
    }

    /// Filter on `property LIKE value`.
    pub fn like(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            operator: FilterOperator::Like,
            value: value.into(),
        }
    }
}

/// One property of an object type, as reported by Describe.
#[derive(Debug, Clone)]
pub struct PropertyDescription {
    pub name: String,
    pub is_retrievable: bool,
    pub is_updatable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display() {
        let fault = SoapFault {
            fault_code: "soap:Client".to_string(),
            fault_string: "Unable to determine security".to_string(),
        };
        assert_eq!(fault.to_string(), "soap:Client: Unable to determine security");
    }

    #[test]
    fn test_operation_result_is_ok() {
        let result = OperationResult {
            overall_status: "OK".to_string(),
            status_code: "OK".to_string(),
            status_message: None,
            new_id: Some("12345".to_string()),
        };
        assert!(result.is_ok());

        let result = OperationResult {
            overall_status: "Error".to_string(),
            status_code: "Error".to_string(),
            status_message: Some("Concurrency violation".to_string()),
            new_id: None,
        };
        assert!(!result.is_ok());
    }

    #[test]
    fn test_filter_operator_spelling() {
        assert_eq!(FilterOperator::Equals.as_str(), "equals");
        assert_eq!(FilterOperator::NotEquals.as_str(), "notEquals");
        assert_eq!(FilterOperator::Like.as_str(), "like");
    }

    #[test]
    fn test_simple_filter_equals() {
        let filter = SimpleFilter::equals("CategoryID", "1234");
        assert_eq!(filter.property, "CategoryID");
        assert_eq!(filter.operator, FilterOperator::Equals);
        assert_eq!(filter.value, "1234");
    }
}
