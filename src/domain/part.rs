//! Part aggregate: an inventoried item with a status lifecycle and an
//! optional placement at a storage location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::UpdatePartRequest;

/// Lifecycle status of a part.
///
/// Controls which actions (loan/return) apply. Serialized as lowercase
/// strings on the wire and in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartStatus {
    Available,
    Loaned,
    Maintenance,
    Disposed,
}

impl PartStatus {
    /// Canonical lowercase spelling used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Loaned => "loaned",
            Self::Maintenance => "maintenance",
            Self::Disposed => "disposed",
        }
    }

    /// Every status value, in declaration order. Used by validation errors
    /// to report the accepted vocabulary.
    pub const ALL: [PartStatus; 4] = [
        Self::Available,
        Self::Loaned,
        Self::Maintenance,
        Self::Disposed,
    ];
}

impl std::fmt::Display for PartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a status from its wire spelling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown part status: {value}")]
pub struct ParseStatusError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for PartStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "loaned" => Ok(Self::Loaned),
            "maintenance" => Ok(Self::Maintenance),
            "disposed" => Ok(Self::Disposed),
            other => Err(ParseStatusError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Loan metadata attached to a part while it is out on loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Borrower the part was handed to.
    pub loaned_to: String,
    /// Agreed return date, when one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_return: Option<DateTime<Utc>>,
}

/// Input payload for [`Part::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartDraft {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub part_type: String,
    pub status: PartStatus,
    pub quantity: i32,
    pub date_added: DateTime<Utc>,
    pub current_loan: Option<Loan>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub location_id: Option<i32>,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

/// Validation failures raised by [`Part::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartValidationError {
    /// `partName` is required and must not be blank.
    #[error("part name must not be empty")]
    EmptyName,
    /// `type` is required and must not be blank.
    #[error("part type must not be empty")]
    EmptyType,
    /// Quantity is a count of physical items and starts at one.
    #[error("quantity must be at least 1, got {quantity}")]
    QuantityBelowOne { quantity: i32 },
    /// Loan metadata may only exist while the part is loaned out.
    #[error("loan metadata requires loaned status, got {status}")]
    LoanWithoutLoanedStatus { status: PartStatus },
}

/// Error raised when loaning a part that is not available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("part is not available for loan: status is {status}")]
pub struct LoanStateError {
    /// Status the part held when the loan was attempted.
    pub status: PartStatus,
}

/// An inventoried part.
///
/// ## Invariants
/// - `name` and `part_type` are non-blank.
/// - `quantity >= 1`.
/// - `current_loan` is present only while `status` is [`PartStatus::Loaned`].
/// - `id` and `date_added` are set at creation and never change.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub part_type: String,
    pub status: PartStatus,
    pub quantity: i32,
    pub date_added: DateTime<Utc>,
    pub current_loan: Option<Loan>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub location_id: Option<i32>,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

impl Part {
    /// Validate and construct a part.
    pub fn new(draft: PartDraft) -> Result<Self, PartValidationError> {
        if draft.name.trim().is_empty() {
            return Err(PartValidationError::EmptyName);
        }
        if draft.part_type.trim().is_empty() {
            return Err(PartValidationError::EmptyType);
        }
        if draft.quantity < 1 {
            return Err(PartValidationError::QuantityBelowOne {
                quantity: draft.quantity,
            });
        }
        if draft.current_loan.is_some() && draft.status != PartStatus::Loaned {
            return Err(PartValidationError::LoanWithoutLoanedStatus {
                status: draft.status,
            });
        }

        Ok(Self {
            id: draft.id,
            name: draft.name,
            description: draft.description,
            part_type: draft.part_type,
            status: draft.status,
            quantity: draft.quantity,
            date_added: draft.date_added,
            current_loan: draft.current_loan,
            manufacturer: draft.manufacturer,
            model: draft.model,
            category: draft.category,
            location_id: draft.location_id,
            container: draft.container,
            row: draft.row,
            position: draft.position,
        })
    }

    /// Hand the part out on loan.
    ///
    /// Only an available part may be loaned; double-loaning and loaning
    /// disposed or maintenance stock are rejected.
    pub fn loan(mut self, loan: Loan) -> Result<Self, LoanStateError> {
        if self.status != PartStatus::Available {
            return Err(LoanStateError {
                status: self.status,
            });
        }
        self.status = PartStatus::Loaned;
        self.current_loan = Some(loan);
        Ok(self)
    }

    /// Return the part to stock, clearing any active loan.
    ///
    /// Returning an already-available part leaves the status unchanged.
    #[must_use]
    pub fn return_to_stock(mut self) -> Self {
        self.status = PartStatus::Available;
        self.current_loan = None;
        self
    }

    /// Merge a partial update onto this part, last-write-wins per field.
    ///
    /// Fields absent from the patch are preserved. `id` and `date_added`
    /// are never touched. `placement` replaces the referenced location when
    /// `Some` (the caller has already re-run the referential checks) and
    /// leaves it alone when `None`. Patching the status to anything other
    /// than `loaned` clears the active loan; the loan/return operations are
    /// the intended way to drive that transition.
    pub fn apply(self, patch: &UpdatePartRequest, placement: Option<Option<i32>>) -> Result<Self, PartValidationError> {
        let status = patch.status.unwrap_or(self.status);
        let current_loan = if status == PartStatus::Loaned {
            self.current_loan
        } else {
            None
        };

        Self::new(PartDraft {
            id: self.id,
            name: patch.name.clone().unwrap_or(self.name),
            description: patch.description.clone().or(self.description),
            part_type: patch.part_type.clone().unwrap_or(self.part_type),
            status,
            quantity: patch.quantity.unwrap_or(self.quantity),
            date_added: self.date_added,
            current_loan,
            manufacturer: patch.manufacturer.clone().or(self.manufacturer),
            model: patch.model.clone().or(self.model),
            category: patch.category.clone().or(self.category),
            location_id: placement.unwrap_or(self.location_id),
            container: patch.container.clone().or(self.container),
            row: patch.row.or(self.row),
            position: patch.position.clone().or(self.position),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> PartDraft {
        PartDraft {
            id: 101,
            name: "Resistor 10k".into(),
            description: None,
            part_type: "resistor".into(),
            status: PartStatus::Available,
            quantity: 50,
            date_added: Utc::now(),
            current_loan: None,
            manufacturer: None,
            model: None,
            category: None,
            location_id: Some(1),
            container: None,
            row: None,
            position: None,
        }
    }

    #[rstest]
    fn constructs_valid_part(draft: PartDraft) {
        let part = Part::new(draft).expect("valid draft");
        assert_eq!(part.id, 101);
        assert_eq!(part.status, PartStatus::Available);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_name(mut draft: PartDraft, #[case] name: &str) {
        draft.name = name.into();
        assert_eq!(Part::new(draft), Err(PartValidationError::EmptyName));
    }

    #[rstest]
    fn rejects_zero_quantity(mut draft: PartDraft) {
        draft.quantity = 0;
        assert_eq!(
            Part::new(draft),
            Err(PartValidationError::QuantityBelowOne { quantity: 0 })
        );
    }

    #[rstest]
    fn rejects_loan_metadata_on_available_part(mut draft: PartDraft) {
        draft.current_loan = Some(Loan {
            loaned_to: "Alice".into(),
            expected_return: None,
        });
        assert_eq!(
            Part::new(draft),
            Err(PartValidationError::LoanWithoutLoanedStatus {
                status: PartStatus::Available
            })
        );
    }

    #[rstest]
    fn loan_transitions_available_to_loaned(draft: PartDraft) {
        let part = Part::new(draft).expect("valid draft");
        let loaned = part
            .loan(Loan {
                loaned_to: "Alice".into(),
                expected_return: None,
            })
            .expect("available part loans");
        assert_eq!(loaned.status, PartStatus::Loaned);
        assert_eq!(
            loaned.current_loan.as_ref().map(|l| l.loaned_to.as_str()),
            Some("Alice")
        );
    }

    #[rstest]
    fn loan_rejects_already_loaned_part(draft: PartDraft) {
        let part = Part::new(draft).expect("valid draft");
        let loaned = part
            .loan(Loan {
                loaned_to: "Alice".into(),
                expected_return: None,
            })
            .expect("first loan succeeds");
        let err = loaned
            .loan(Loan {
                loaned_to: "Bob".into(),
                expected_return: None,
            })
            .expect_err("double loan rejected");
        assert_eq!(err.status, PartStatus::Loaned);
    }

    #[rstest]
    fn return_clears_loan_and_restores_availability(draft: PartDraft) {
        let part = Part::new(draft).expect("valid draft");
        let returned = part
            .loan(Loan {
                loaned_to: "Alice".into(),
                expected_return: None,
            })
            .expect("loan succeeds")
            .return_to_stock();
        assert_eq!(returned.status, PartStatus::Available);
        assert!(returned.current_loan.is_none());
    }

    #[rstest]
    fn return_on_available_part_is_a_status_noop(draft: PartDraft) {
        let part = Part::new(draft).expect("valid draft");
        let returned = part.clone().return_to_stock();
        assert_eq!(returned.status, part.status);
        assert!(returned.current_loan.is_none());
    }

    #[rstest]
    fn apply_preserves_unpatched_fields(draft: PartDraft) {
        let part = Part::new(draft).expect("valid draft");
        let patch = UpdatePartRequest {
            quantity: Some(7),
            ..UpdatePartRequest::default()
        };
        let updated = part.clone().apply(&patch, None).expect("valid patch");
        assert_eq!(updated.quantity, 7);
        assert_eq!(updated.name, part.name);
        assert_eq!(updated.date_added, part.date_added);
        assert_eq!(updated.location_id, part.location_id);
    }

    #[rstest]
    fn apply_clears_loan_when_status_leaves_loaned(draft: PartDraft) {
        let loaned = Part::new(draft)
            .expect("valid draft")
            .loan(Loan {
                loaned_to: "Alice".into(),
                expected_return: None,
            })
            .expect("loan succeeds");
        let patch = UpdatePartRequest {
            status: Some(PartStatus::Maintenance),
            ..UpdatePartRequest::default()
        };
        let updated = loaned.apply(&patch, None).expect("valid patch");
        assert_eq!(updated.status, PartStatus::Maintenance);
        assert!(updated.current_loan.is_none());
    }

    #[rstest]
    fn status_parse_round_trips() {
        for status in PartStatus::ALL {
            let parsed: PartStatus = status.as_str().parse().expect("parse status");
            assert_eq!(parsed, status);
        }
        assert!("broken".parse::<PartStatus>().is_err());
    }
}
