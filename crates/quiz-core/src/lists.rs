//! List declarations
//!
//! The five lists of the quiz backend with their fields and gates. Built once
//! at startup into a read-only `ListRegistry`.

use quiz_types::schema::{FieldDef, Gate, ListAccess, ListDef};

pub const USER: &str = "User";
pub const ANSWER: &str = "Answer";
pub const QUESTION: &str = "Question";
pub const FEEDBACK: &str = "Feedback";
pub const QUIZ: &str = "Quiz";

pub const FEEDBACK_CATEGORIES: &[&str] = &["terrible", "bad", "ok", "good", "excellent"];
pub const QUIZ_CATEGORIES: &[&str] = &["study", "fun"];

/// Gates shared by every content list: public read, admin-only create/delete
const CONTENT_ACCESS: ListAccess = ListAccess {
	read: Gate::Always,
	update: Gate::AdminOrOwner,
	create: Gate::Admin,
	delete: Gate::Admin,
};

pub fn user() -> ListDef {
	ListDef {
		key: USER,
		path: "users",
		fields: vec![
			FieldDef::text("name").required(),
			FieldDef::text("email").required().unique(),
			FieldDef::checkbox("isAdmin").create_gate(Gate::Admin).update_gate(Gate::Admin),
			FieldDef::password("password").required(),
		],
		access: ListAccess {
			read: Gate::AdminOrOwner,
			update: Gate::AdminOrOwner,
			create: Gate::Admin,
			delete: Gate::Admin,
		},
	}
}

pub fn answer() -> ListDef {
	ListDef {
		key: ANSWER,
		path: "answers",
		fields: vec![FieldDef::text("name").required(), FieldDef::text("description")],
		access: CONTENT_ACCESS,
	}
}

pub fn question() -> ListDef {
	ListDef {
		key: QUESTION,
		path: "questions",
		fields: vec![
			FieldDef::text("name"),
			FieldDef::url("image"),
			FieldDef::text("description").required(),
			FieldDef::relationship_many("answers", ANSWER),
			FieldDef::relationship("correct", ANSWER).member_of("answers"),
		],
		access: CONTENT_ACCESS,
	}
}

pub fn feedback() -> ListDef {
	ListDef {
		key: FEEDBACK,
		path: "feedbacks",
		fields: vec![
			FieldDef::text("name"),
			FieldDef::url("image"),
			FieldDef::text("description").required(),
			FieldDef::select("category", FEEDBACK_CATEGORIES).required(),
		],
		access: CONTENT_ACCESS,
	}
}

pub fn quiz() -> ListDef {
	ListDef {
		key: QUIZ,
		path: "quizzes",
		fields: vec![
			FieldDef::text("name").required(),
			FieldDef::url("image"),
			FieldDef::text("description"),
			FieldDef::select("category", QUIZ_CATEGORIES).required(),
			FieldDef::relationship_many("questions", QUESTION).required(),
			FieldDef::relationship_many("feedback", FEEDBACK).required(),
		],
		access: CONTENT_ACCESS,
	}
}

/// Read-only set of declared lists
#[derive(Debug, Clone)]
pub struct ListRegistry {
	lists: Vec<ListDef>,
}

impl ListRegistry {
	pub fn new(lists: Vec<ListDef>) -> Self {
		Self { lists }
	}

	pub fn get(&self, key: &str) -> Option<&ListDef> {
		self.lists.iter().find(|l| l.key == key)
	}

	pub fn by_path(&self, path: &str) -> Option<&ListDef> {
		self.lists.iter().find(|l| l.path == path)
	}

	pub fn iter(&self) -> impl Iterator<Item = &ListDef> {
		self.lists.iter()
	}

	pub fn len(&self) -> usize {
		self.lists.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lists.is_empty()
	}
}

impl Default for ListRegistry {
	/// The quiz lists
	fn default() -> Self {
		Self::new(vec![user(), answer(), question(), feedback(), quiz()])
	}
}


// vim: ts=4
