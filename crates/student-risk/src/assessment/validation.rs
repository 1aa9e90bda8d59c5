use super::domain::{Category, EvaluationInput, QuestionWeight, MAX_ANSWER, MIN_ANSWER};

/// Malformed engine input, reported before any score is computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInputError {
    #[error("{category} has {answers} answer(s) but {weights} weight(s)")]
    LengthMismatch {
        category: Category,
        answers: usize,
        weights: usize,
    },
    #[error("{category} answer at position {position} is {value}, expected 0..=4")]
    AnswerOutOfRange {
        category: Category,
        position: usize,
        value: i32,
    },
    #[error("{category} weight at position {position} must be positive and finite, found {weight}")]
    InvalidWeight {
        category: Category,
        position: usize,
        weight: f64,
    },
    #[error("{category} weights are too large to score")]
    WeightOverflow { category: Category },
}

pub(crate) fn validate_category(
    category: Category,
    answers: &[i32],
    weights: &[QuestionWeight],
    high_impact_multiplier: f64,
) -> Result<(), InvalidInputError> {
    if answers.len() != weights.len() {
        return Err(InvalidInputError::LengthMismatch {
            category,
            answers: answers.len(),
            weights: weights.len(),
        });
    }

    for (index, (answer, weight)) in answers.iter().zip(weights).enumerate() {
        let position = index + 1;
        if !(MIN_ANSWER..=MAX_ANSWER).contains(answer) {
            return Err(InvalidInputError::AnswerOutOfRange {
                category,
                position,
                value: *answer,
            });
        }
        if !(weight.weight.is_finite() && weight.weight > 0.0) {
            return Err(InvalidInputError::InvalidWeight {
                category,
                position,
                weight: weight.weight,
            });
        }
    }

    // Each weight can be finite while the boosted sums are not.
    let (weighted_sum, total_weight) = answers.iter().zip(weights).fold(
        (0.0_f64, 0.0_f64),
        |(sum, total), (answer, weight)| {
            let boost = if weight.high_impact {
                high_impact_multiplier
            } else {
                1.0
            };
            let effective = weight.weight * boost;
            (sum + f64::from(*answer) * effective, total + effective)
        },
    );
    if !(weighted_sum.is_finite() && total_weight.is_finite()) {
        return Err(InvalidInputError::WeightOverflow { category });
    }

    Ok(())
}

pub(crate) fn validate_input(
    input: &EvaluationInput,
    high_impact_multiplier: f64,
) -> Result<(), InvalidInputError> {
    for category in Category::ALL {
        validate_category(
            category,
            input.answers(category),
            input.weights(category),
            high_impact_multiplier,
        )?;
    }
    Ok(())
}
