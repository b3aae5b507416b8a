//! Problem definition.
//!
//! A job-shop instance: a machine count and the products to route through
//! those machines. Read-only for the lifetime of a scheduler.

use serde::{Deserialize, Serialize};

use super::{Product, ProductId};
use crate::error::ProblemError;
use crate::validation::validate_problem;

/// A job-shop scheduling problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Number of machines (ids `0..num_machines`).
    pub num_machines: usize,
    /// Products to schedule.
    pub products: Vec<Product>,
}

impl Problem {
    /// Creates a problem with no products.
    ///
    /// No validation is performed; see [`validate_problem`].
    pub fn new(num_machines: usize) -> Self {
        Self {
            num_machines,
            products: Vec::new(),
        }
    }

    /// Adds a product.
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    /// Parses a problem from JSON and validates it.
    ///
    /// # Errors
    /// [`ProblemError::Parse`] for malformed JSON,
    /// [`ProblemError::Invalid`] with every detected issue otherwise.
    pub fn from_json(json: &str) -> Result<Self, ProblemError> {
        let problem: Problem = serde_json::from_str(json)?;
        validate_problem(&problem).map_err(ProblemError::Invalid)?;
        Ok(problem)
    }

    /// Total number of operations across all products.
    pub fn total_operations(&self) -> usize {
        self.products.iter().map(|p| p.operation_count()).sum()
    }

    /// Step budget for one episode: twice the total operation count.
    pub fn step_budget(&self) -> usize {
        self.total_operations() * 2
    }

    /// Looks up a product by ID.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn two_product_problem() -> Problem {
        Problem::new(2)
            .with_product(Product::new(1).with_operation(0, 3).with_operation(1, 2))
            .with_product(Product::new(2).with_priority(3).with_operation(1, 4))
    }

    #[test]
    fn test_problem_counts() {
        let p = two_product_problem();
        assert_eq!(p.total_operations(), 3);
        assert_eq!(p.step_budget(), 6);
        assert_eq!(p.product(2).unwrap().priority, 3);
        assert!(p.product(9).is_none());
    }

    #[test]
    fn test_from_json_valid() {
        let json = serde_json::to_string(&two_product_problem()).unwrap();
        let parsed = Problem::from_json(&json).unwrap();
        assert_eq!(parsed, two_product_problem());
    }

    #[test]
    fn test_from_json_parse_error() {
        let err = Problem::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ProblemError::Parse(_)));
    }

    #[test]
    fn test_from_json_invalid_machine() {
        let json = r#"{
            "numMachines": 1,
            "products": [{
                "id": 1,
                "operations": [
                    { "productId": 1, "machineId": 3, "duration": 5, "operationIndex": 0 }
                ]
            }]
        }"#;
        match Problem::from_json(json) {
            Err(ProblemError::Invalid(errors)) => assert!(errors
                .iter()
                .any(|e| e.kind == ValidationErrorKind::InvalidMachineReference)),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
