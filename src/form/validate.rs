//! Field constraints for tasks and lists.

use std::fmt;

use super::normalize::{Parsed, TaskCandidate};
use crate::model::{ListId, NewList, NewTask};

/// Shortest list name the list form accepts.
pub const MIN_LIST_NAME_LEN: usize = 2;

/// Form fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Field {
    Title,
    Description,
    Priority,
    DueDate,
    Tags,
    EstimatedTime,
    ActualTimeSpent,
    Completed,
    ListId,
    /// A list's display name.
    Name,
}

impl Field {
    /// Wire name of the field, e.g. `estimatedTime`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::Tags => "tags",
            Self::EstimatedTime => "estimatedTime",
            Self::ActualTimeSpent => "actualTimeSpent",
            Self::Completed => "completed",
            Self::ListId => "listId",
            Self::Name => "name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Missing or blank where a value is required.
    RequiredField,
    /// A number outside its allowed range.
    OutOfRange,
    /// A value outside an enumerated set.
    InvalidEnum,
    /// Text that does not parse as the field's type.
    InvalidType,
    /// Shorter than the minimum length.
    TooShort,
}

impl ViolationKind {
    /// Stable upper-case code, e.g. `REQUIRED_FIELD`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::RequiredField => "REQUIRED_FIELD",
            Self::OutOfRange => "OUT_OF_RANGE",
            Self::InvalidEnum => "INVALID_ENUM",
            Self::InvalidType => "INVALID_TYPE",
            Self::TooShort => "TOO_SHORT",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The offending field.
    pub field: Field,
    /// Rule that failed.
    pub kind: ViolationKind,
    /// Human-readable explanation.
    pub message: String,
}

impl Violation {
    fn new(field: Field, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self { field, kind, message: message.into() }
    }
}

/// All violations found in one pass, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Returns `true` if nothing was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Violations reported for one field.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Violation> {
        self.0.iter().filter(move |v| v.field == field)
    }

    /// `(field, kind)` pairs, convenient for assertions and logs.
    #[must_use]
    pub fn kinds(&self) -> Vec<(Field, ViolationKind)> {
        self.0.iter().map(|v| (v.field, v.kind)).collect()
    }

    fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {} ({})", v.field, v.message, v.kind)?;
        }
        Ok(())
    }
}

/// Checks every rule against a candidate and returns what failed.
#[must_use]
pub fn check(candidate: &TaskCandidate) -> Violations {
    let mut violations = Violations::default();

    if candidate.title.trim().is_empty() {
        violations.push(Violation::new(
            Field::Title,
            ViolationKind::RequiredField,
            "Title is required",
        ));
    }

    if let Some(Parsed::Invalid(raw)) = &candidate.priority {
        violations.push(Violation::new(
            Field::Priority,
            ViolationKind::InvalidEnum,
            format!("{raw:?} is not one of low, medium, high"),
        ));
    }

    if let Some(Parsed::Invalid(raw)) = &candidate.due_date {
        violations.push(Violation::new(
            Field::DueDate,
            ViolationKind::InvalidType,
            format!("{raw:?} is not a YYYY-MM-DD date"),
        ));
    }

    if let Some(Parsed::Invalid(raw)) = &candidate.completed {
        violations.push(Violation::new(
            Field::Completed,
            ViolationKind::InvalidType,
            format!("{raw:?} is not true or false"),
        ));
    }

    check_duration(&mut violations, Field::EstimatedTime, candidate.estimated_time.as_ref());
    check_duration(&mut violations, Field::ActualTimeSpent, candidate.actual_time_spent.as_ref());

    if !matches!(candidate.list_id, Some(id) if id > 0) {
        violations.push(Violation::new(
            Field::ListId,
            ViolationKind::RequiredField,
            "A list must be selected",
        ));
    }

    violations
}

fn check_duration(violations: &mut Violations, field: Field, value: Option<&Parsed<f64>>) {
    match value {
        Some(Parsed::Value(n)) if *n < 0.0 => {
            violations.push(Violation::new(
                field,
                ViolationKind::OutOfRange,
                "Must be a positive number",
            ));
        }
        Some(Parsed::Invalid(raw)) => {
            violations.push(Violation::new(
                field,
                ViolationKind::InvalidType,
                format!("{raw:?} is not a number"),
            ));
        }
        _ => {}
    }
}

/// Validates a candidate and, if it passes, fills in the submission defaults.
///
/// # Errors
///
/// Returns every violation found when any rule fails.
pub fn validate_task(candidate: &TaskCandidate) -> Result<NewTask, Violations> {
    let violations = check(candidate);
    if !violations.is_empty() {
        return Err(violations);
    }

    let list_id = candidate.list_id.and_then(|id| ListId::try_from(id).ok()).unwrap_or_default();

    Ok(NewTask {
        title: candidate.title.trim().to_string(),
        description: candidate.description.clone().unwrap_or_default(),
        priority: value_or_default(candidate.priority.as_ref()),
        due_date: candidate.due_date.as_ref().and_then(|d| d.value().copied()),
        tags: candidate.tags.clone(),
        completed: value_or_default(candidate.completed.as_ref()),
        estimated_time: value_or_default(candidate.estimated_time.as_ref()),
        actual_time_spent: value_or_default(candidate.actual_time_spent.as_ref()),
        comments: Vec::new(),
        list_id,
    })
}

fn value_or_default<T: Copy + Default>(parsed: Option<&Parsed<T>>) -> T {
    parsed.and_then(Parsed::value).copied().unwrap_or_default()
}

/// Validates a list name: required, and at least [`MIN_LIST_NAME_LEN`] characters once trimmed.
///
/// # Errors
///
/// Returns the violation when the name is blank or too short.
pub fn validate_list_name(name: &str) -> Result<NewList, Violations> {
    let trimmed = name.trim();
    let mut violations = Violations::default();
    if trimmed.is_empty() {
        violations.push(Violation::new(
            Field::Name,
            ViolationKind::RequiredField,
            "Name is required",
        ));
    } else if trimmed.chars().count() < MIN_LIST_NAME_LEN {
        violations.push(Violation::new(
            Field::Name,
            ViolationKind::TooShort,
            format!("Name must be at least {MIN_LIST_NAME_LEN} characters"),
        ));
    }

    if violations.is_empty() {
        Ok(NewList { name: trimmed.to_string() })
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::normalize::{normalize, RawTaskInput};
    use crate::model::Priority;

    fn raw(title: &str, list_id: &str) -> RawTaskInput {
        RawTaskInput { title: title.into(), list_id: list_id.into(), ..RawTaskInput::default() }
    }

    #[test]
    fn buy_milk_scenario_is_accepted_with_defaults() {
        let input = RawTaskInput {
            tags: "home, errand ,  shopping".into(),
            estimated_time: "2.5".into(),
            completed: "true".into(),
            ..raw("Buy milk", "3")
        };

        let task = validate_task(&normalize(&input)).unwrap();

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.tags, vec!["home", "errand", "shopping"]);
        assert!((task.estimated_time - 2.5).abs() < f64::EPSILON);
        assert!(task.completed);
        assert_eq!(task.priority, Priority::Low);
        assert!(task.actual_time_spent.abs() < f64::EPSILON);
        assert!(task.comments.is_empty());
        assert_eq!(task.list_id, 3);
        assert_eq!(task.due_date, None);
        assert_eq!(task.description, "");
    }

    #[test]
    fn empty_title_is_the_only_violation() {
        let err = validate_task(&normalize(&raw("", "1"))).unwrap_err();
        assert_eq!(err.kinds(), vec![(Field::Title, ViolationKind::RequiredField)]);
    }

    #[test]
    fn blank_title_is_rejected_regardless_of_other_fields() {
        let input = RawTaskInput {
            estimated_time: "-4".into(),
            priority: "urgent".into(),
            ..raw("   ", "0")
        };
        let err = validate_task(&normalize(&input)).unwrap_err();
        assert_eq!(err.for_field(Field::Title).next().unwrap().kind, ViolationKind::RequiredField);
        assert_eq!(
            err.kinds(),
            vec![
                (Field::Title, ViolationKind::RequiredField),
                (Field::Priority, ViolationKind::InvalidEnum),
                (Field::EstimatedTime, ViolationKind::OutOfRange),
                (Field::ListId, ViolationKind::RequiredField),
            ]
        );
    }

    #[test]
    fn non_negative_numbers_pass_negative_and_text_fail() {
        for good in ["0", "0.25", "3", "1e2"] {
            let input = RawTaskInput { actual_time_spent: good.into(), ..raw("t", "1") };
            assert!(validate_task(&normalize(&input)).is_ok(), "{good} should pass");
        }
        for bad in ["-0.5", "-3"] {
            let input = RawTaskInput { actual_time_spent: bad.into(), ..raw("t", "1") };
            let err = validate_task(&normalize(&input)).unwrap_err();
            assert_eq!(err.kinds(), vec![(Field::ActualTimeSpent, ViolationKind::OutOfRange)]);
        }
        for junk in ["abc", "2h", "inf"] {
            let input = RawTaskInput { estimated_time: junk.into(), ..raw("t", "1") };
            let err = validate_task(&normalize(&input)).unwrap_err();
            assert_eq!(err.kinds(), vec![(Field::EstimatedTime, ViolationKind::InvalidType)]);
        }
    }

    #[test]
    fn list_id_must_be_positive() {
        for bad in ["", "0", "-2", "abc"] {
            let err = validate_task(&normalize(&raw("t", bad))).unwrap_err();
            assert_eq!(err.kinds(), vec![(Field::ListId, ViolationKind::RequiredField)], "{bad:?}");
        }
    }

    #[test]
    fn bad_date_and_flag_are_type_violations() {
        let input = RawTaskInput {
            due_date: "30/07/2024".into(),
            completed: "maybe".into(),
            ..raw("t", "1")
        };
        let err = validate_task(&normalize(&input)).unwrap_err();
        assert_eq!(
            err.kinds(),
            vec![
                (Field::DueDate, ViolationKind::InvalidType),
                (Field::Completed, ViolationKind::InvalidType),
            ]
        );
    }

    #[test]
    fn list_names_need_two_characters() {
        assert_eq!(validate_list_name("  Home ").unwrap().name, "Home");
        assert_eq!(
            validate_list_name("").unwrap_err().kinds(),
            vec![(Field::Name, ViolationKind::RequiredField)]
        );
        assert_eq!(
            validate_list_name(" x ").unwrap_err().kinds(),
            vec![(Field::Name, ViolationKind::TooShort)]
        );
    }

    #[test]
    fn violations_display_one_per_line() {
        let err = validate_task(&normalize(&raw("", ""))).unwrap_err();
        let text = err.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("title: Title is required (REQUIRED_FIELD)"));
    }
}
