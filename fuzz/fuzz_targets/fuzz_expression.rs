#![no_main]

use calculator::domain::expr::Expression;
use calculator::{CalculatorError, Service};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Building and evaluating must never panic
    if let Ok(expression) = Expression::build(text) {
        if let Ok(value) = expression.evaluate() {
            assert!(value.is_finite());
        }
    }

    // Successful results are finite and re-parse to the same value
    match Service::default().evaluate(Some(text)) {
        Ok(evaluation) => {
            let reparsed = Expression::build(&evaluation.formatted)
                .ok()
                .and_then(|e| e.evaluate().ok());
            // -0 formats as "0", so compare values rather than bits
            assert_eq!(reparsed, Some(evaluation.value));
        }
        Err(CalculatorError::EmptyExpression) => assert!(text.trim().is_empty()),
        Err(_) => {}
    }
});
