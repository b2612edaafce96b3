//! Input validation
//!
//! Checks client-supplied fields against a list declaration and normalizes
//! them (relationship ids deduplicated, checkboxes defaulted). Everything here
//! runs before any mutation reaches storage.

use serde_json::Value;

use crate::prelude::*;
use quiz_types::schema::{FieldDef, FieldType, ListDef, Operation};
use quiz_types::types::{Fields, value_refs};

pub const MIN_PASSWORD_LENGTH: usize = 8;

fn invalid(list: &ListDef, field: &FieldDef, expected: &str) -> Error {
	Error::ValidationError(format!("{}.{}: expected {}", list.key, field.name, expected))
}

fn required(list: &ListDef, field: &FieldDef) -> Error {
	Error::ValidationError(format!("{}.{} is required", list.key, field.name))
}

/// Null, empty string or empty array
fn is_empty(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(s) => s.is_empty(),
		Value::Array(a) => a.is_empty(),
		_ => false,
	}
}

fn normalize_value(list: &ListDef, field: &FieldDef, value: &Value) -> ClResult<Value> {
	if value.is_null() {
		return Ok(match field.typ {
			FieldType::Checkbox => Value::Bool(false),
			_ => Value::Null,
		});
	}

	match field.typ {
		FieldType::Text => {
			value.as_str().ok_or_else(|| invalid(list, field, "a string"))?;
			Ok(value.clone())
		}
		FieldType::Checkbox => {
			value.as_bool().ok_or_else(|| invalid(list, field, "a boolean"))?;
			Ok(value.clone())
		}
		FieldType::Password => {
			let password = value.as_str().ok_or_else(|| invalid(list, field, "a string"))?;
			if password.chars().count() < MIN_PASSWORD_LENGTH {
				return Err(Error::ValidationError(format!(
					"{}.{} must be at least {} characters",
					list.key, field.name, MIN_PASSWORD_LENGTH
				)));
			}
			Ok(value.clone())
		}
		FieldType::Url => {
			let s = value.as_str().ok_or_else(|| invalid(list, field, "a string"))?;
			if !s.is_empty() {
				url::Url::parse(s).map_err(|_| invalid(list, field, "an absolute URL"))?;
			}
			Ok(value.clone())
		}
		FieldType::Select(options) => {
			let s = value.as_str().ok_or_else(|| invalid(list, field, "a string"))?;
			if !options.contains(&s) {
				return Err(Error::ValidationError(format!(
					"{}.{}: {:?} is not one of {}",
					list.key,
					field.name,
					s,
					options.join(", ")
				)));
			}
			Ok(value.clone())
		}
		FieldType::Relationship { many: false, .. } => {
			let id = value.as_i64().ok_or_else(|| invalid(list, field, "an item id"))?;
			Ok(Value::from(id))
		}
		FieldType::Relationship { many: true, .. } => {
			let values = value.as_array().ok_or_else(|| invalid(list, field, "a list of item ids"))?;
			let mut ids: Vec<i64> = Vec::with_capacity(values.len());
			for value in values {
				let id = value.as_i64().ok_or_else(|| invalid(list, field, "a list of item ids"))?;
				if !ids.contains(&id) {
					ids.push(id);
				}
			}
			Ok(Value::from(ids))
		}
	}
}

/// Validate and normalize the fields of a create or update request
///
/// On create every required field must be present and non-empty, and missing
/// checkboxes default to `false`. On update omitted fields are left alone but
/// a required field cannot be emptied.
pub fn validate_input(list: &ListDef, input: &Fields, op: Operation) -> ClResult<Fields> {
	let mut fields = Fields::new();

	for (name, value) in input {
		if name == "id" {
			return Err(Error::ValidationError("id is read-only".into()));
		}
		let field = list.field(name).ok_or_else(|| {
			Error::ValidationError(format!("unknown field: {}.{}", list.key, name))
		})?;
		let value = normalize_value(list, field, value)?;
		if field.required && is_empty(&value) {
			return Err(required(list, field));
		}
		fields.insert(name.clone(), value);
	}

	if op == Operation::Create {
		for field in &list.fields {
			if fields.contains_key(field.name) {
				continue;
			}
			if field.required {
				return Err(required(list, field));
			}
			if field.typ == FieldType::Checkbox {
				fields.insert(field.name.into(), Value::Bool(false));
			}
		}
	}

	Ok(fields)
}

/// Referenced ids of every relationship field present in `fields`, grouped by
/// target list
pub fn references(list: &ListDef, fields: &Fields) -> Vec<(&'static str, Vec<ItemId>)> {
	let mut res: Vec<(&'static str, Vec<ItemId>)> = Vec::new();
	for field in &list.fields {
		let FieldType::Relationship { list: target, .. } = field.typ else {
			continue;
		};
		let Some(value) = fields.get(field.name) else {
			continue;
		};
		let ids = value_refs(value);
		if ids.is_empty() {
			continue;
		}
		match res.iter_mut().find(|(l, _)| *l == target) {
			Some((_, existing)) => {
				for id in ids {
					if !existing.contains(&id) {
						existing.push(id);
					}
				}
			}
			None => res.push((target, ids)),
		}
	}
	res
}

/// Check `member_of` constraints on the complete (merged) field set
pub fn check_membership(list: &ListDef, fields: &Fields) -> ClResult<()> {
	for field in &list.fields {
		let Some(sibling) = field.member_of else {
			continue;
		};
		let values = fields.get(field.name).map(value_refs).unwrap_or_default();
		if values.is_empty() {
			continue;
		}
		let allowed = fields.get(sibling).map(value_refs).unwrap_or_default();
		if let Some(id) = values.iter().find(|id| !allowed.contains(id)) {
			return Err(Error::ValidationError(format!(
				"{}.{}: {} is not one of {}.{}",
				list.key, field.name, id, list.key, sibling
			)));
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::lists;
	use serde_json::json;

	fn fields(value: Value) -> Fields {
		match value {
			Value::Object(map) => map,
			_ => Fields::new(),
		}
	}

	fn assert_invalid(res: ClResult<Fields>, needle: &str) {
		match res {
			Err(Error::ValidationError(msg)) => assert!(msg.contains(needle), "got: {}", msg),
			other => panic!("expected validation error containing {:?}, got {:?}", needle, other),
		}
	}

	#[test]
	fn test_feedback_category_must_be_enumerated() {
		let list = lists::feedback();
		let res = validate_input(
			&list,
			&fields(json!({ "description": "d", "category": "amazing" })),
			Operation::Create,
		);
		assert_invalid(res, "is not one of");

		let res = validate_input(
			&list,
			&fields(json!({ "description": "d", "category": "good" })),
			Operation::Create,
		);
		assert!(res.is_ok());
	}

	#[test]
	fn test_category_match_is_exact() {
		let list = lists::quiz();
		let res = validate_input(&list, &fields(json!({ "category": "Study" })), Operation::Update);
		assert_invalid(res, "is not one of");
	}

	#[test]
	fn test_quiz_requires_questions_and_feedback() {
		let list = lists::quiz();
		let base = json!({ "name": "Geo", "category": "study", "questions": [1], "feedback": [2] });
		assert!(validate_input(&list, &fields(base), Operation::Create).is_ok());

		let res = validate_input(
			&list,
			&fields(json!({ "name": "Geo", "category": "study", "questions": [], "feedback": [2] })),
			Operation::Create,
		);
		assert_invalid(res, "Quiz.questions is required");

		let res = validate_input(
			&list,
			&fields(json!({ "name": "Geo", "category": "study", "questions": [1] })),
			Operation::Create,
		);
		assert_invalid(res, "Quiz.feedback is required");
	}

	#[test]
	fn test_update_may_omit_but_not_empty_required() {
		let list = lists::answer();
		assert!(validate_input(&list, &fields(json!({ "description": "x" })), Operation::Update)
			.is_ok());
		let res = validate_input(&list, &fields(json!({ "name": "" })), Operation::Update);
		assert_invalid(res, "Answer.name is required");
	}

	#[test]
	fn test_unknown_field_and_id_rejected() {
		let list = lists::answer();
		let res = validate_input(&list, &fields(json!({ "name": "a", "x": 1 })), Operation::Create);
		assert_invalid(res, "unknown field");
		let res = validate_input(&list, &fields(json!({ "id": 3 })), Operation::Update);
		assert_invalid(res, "read-only");
	}

	#[test]
	fn test_type_checks() {
		let list = lists::question();
		let res = validate_input(&list, &fields(json!({ "description": 5 })), Operation::Update);
		assert_invalid(res, "expected a string");
		let res = validate_input(&list, &fields(json!({ "answers": "1,2" })), Operation::Update);
		assert_invalid(res, "expected a list of item ids");
		let res = validate_input(&list, &fields(json!({ "correct": [1] })), Operation::Update);
		assert_invalid(res, "expected an item id");
		let res = validate_input(&list, &fields(json!({ "image": "not a url" })), Operation::Update);
		assert_invalid(res, "absolute URL");
		let res = validate_input(
			&list,
			&fields(json!({ "image": "https://example.com/a.png" })),
			Operation::Update,
		);
		assert!(res.is_ok());
	}

	#[test]
	fn test_relationship_ids_are_deduplicated() {
		let list = lists::question();
		let res = validate_input(
			&list,
			&fields(json!({ "description": "d", "answers": [3, 1, 3] })),
			Operation::Create,
		)
		.unwrap();
		assert_eq!(res.get("answers"), Some(&json!([3, 1])));
	}

	#[test]
	fn test_checkbox_defaults_false_on_create() {
		let list = lists::user();
		let res = validate_input(
			&list,
			&fields(json!({ "name": "A", "email": "a@example.com", "password": "secret123" })),
			Operation::Create,
		)
		.unwrap();
		assert_eq!(res.get("isAdmin"), Some(&json!(false)));
	}

	#[test]
	fn test_short_password_rejected() {
		let list = lists::user();
		let res = validate_input(&list, &fields(json!({ "password": "short" })), Operation::Update);
		assert_invalid(res, "at least 8 characters");
	}

	#[test]
	fn test_references_grouped_by_list() {
		let list = lists::question();
		let refs = references(&list, &fields(json!({ "answers": [1, 2], "correct": 2 })));
		assert_eq!(refs, vec![("Answer", vec![ItemId(1), ItemId(2)])]);
		let refs = references(&list, &fields(json!({ "answers": [1], "correct": 3 })));
		assert_eq!(refs, vec![("Answer", vec![ItemId(1), ItemId(3)])]);

		let list = lists::quiz();
		let refs = references(&list, &fields(json!({ "questions": [4], "feedback": [5] })));
		assert_eq!(refs, vec![("Question", vec![ItemId(4)]), ("Feedback", vec![ItemId(5)])]);
	}

	#[test]
	fn test_correct_must_be_member_of_answers() {
		let list = lists::question();
		assert!(check_membership(&list, &fields(json!({ "answers": [1, 2], "correct": 2 }))).is_ok());
		assert!(check_membership(&list, &fields(json!({ "answers": [1], "correct": null }))).is_ok());

		match check_membership(&list, &fields(json!({ "answers": [1], "correct": 2 }))) {
			Err(Error::ValidationError(msg)) => assert!(msg.contains("Question.answers")),
			other => panic!("unexpected {:?}", other),
		}
		assert!(check_membership(&list, &fields(json!({ "correct": 2 }))).is_err());
	}
}

// vim: ts=4
