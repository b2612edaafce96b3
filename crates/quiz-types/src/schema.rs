//! List and field schema model.
//!
//! Lists are declared once at startup (see `quiz_core::lists`) and are
//! read-only afterwards. Storage adapters receive the declarations to set up
//! constraints (unique fields); the CRUD engine uses them for validation and
//! access control.

use serde::Serialize;

/// CRUD operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
	Read,
	Create,
	Update,
	Delete,
}

impl Operation {
	pub const ALL: [Operation; 4] =
		[Operation::Read, Operation::Create, Operation::Update, Operation::Delete];

	pub fn as_str(self) -> &'static str {
		match self {
			Operation::Read => "read",
			Operation::Create => "create",
			Operation::Update => "update",
			Operation::Delete => "delete",
		}
	}
}

impl std::fmt::Display for Operation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Access predicate bound to an operation or a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Gate {
	/// Unconditionally allowed, even without an actor
	Always,
	/// Never allowed (e.g. reading a password)
	Never,
	Admin,
	AdminOrOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
	Text,
	Checkbox,
	/// Write-only secret, stored hashed
	Password,
	Url,
	/// One of a fixed set of string options
	Select(&'static [&'static str]),
	/// Reference(s) to items of another list
	Relationship { list: &'static str, many: bool },
}

impl FieldType {
	pub fn name(&self) -> &'static str {
		match self {
			FieldType::Text => "Text",
			FieldType::Checkbox => "Checkbox",
			FieldType::Password => "Password",
			FieldType::Url => "Url",
			FieldType::Select(_) => "Select",
			FieldType::Relationship { .. } => "Relationship",
		}
	}
}

/// Field-level gates. `None` falls back to the list-level gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldAccess {
	pub read: Option<Gate>,
	pub create: Option<Gate>,
	pub update: Option<Gate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
	pub name: &'static str,
	pub typ: FieldType,
	pub required: bool,
	pub unique: bool,
	/// Relationship value must be one of the ids held by this sibling field
	pub member_of: Option<&'static str>,
	pub access: FieldAccess,
}

impl FieldDef {
	pub fn new(name: &'static str, typ: FieldType) -> Self {
		Self {
			name,
			typ,
			required: false,
			unique: false,
			member_of: None,
			access: FieldAccess::default(),
		}
	}

	pub fn text(name: &'static str) -> Self {
		Self::new(name, FieldType::Text)
	}

	pub fn checkbox(name: &'static str) -> Self {
		Self::new(name, FieldType::Checkbox)
	}

	/// Password fields are never readable
	pub fn password(name: &'static str) -> Self {
		Self::new(name, FieldType::Password).read_gate(Gate::Never)
	}

	pub fn url(name: &'static str) -> Self {
		Self::new(name, FieldType::Url)
	}

	pub fn select(name: &'static str, options: &'static [&'static str]) -> Self {
		Self::new(name, FieldType::Select(options))
	}

	pub fn relationship(name: &'static str, list: &'static str) -> Self {
		Self::new(name, FieldType::Relationship { list, many: false })
	}

	pub fn relationship_many(name: &'static str, list: &'static str) -> Self {
		Self::new(name, FieldType::Relationship { list, many: true })
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn unique(mut self) -> Self {
		self.unique = true;
		self
	}

	pub fn member_of(mut self, field: &'static str) -> Self {
		self.member_of = Some(field);
		self
	}

	pub fn read_gate(mut self, gate: Gate) -> Self {
		self.access.read = Some(gate);
		self
	}

	pub fn create_gate(mut self, gate: Gate) -> Self {
		self.access.create = Some(gate);
		self
	}

	pub fn update_gate(mut self, gate: Gate) -> Self {
		self.access.update = Some(gate);
		self
	}

	/// Field-level override for an operation, if any
	pub fn gate(&self, op: Operation) -> Option<Gate> {
		match op {
			Operation::Read => self.access.read,
			Operation::Create => self.access.create,
			Operation::Update => self.access.update,
			Operation::Delete => None,
		}
	}

	pub fn is_readable(&self) -> bool {
		self.access.read != Some(Gate::Never)
	}
}

/// List-level gates, one per operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListAccess {
	pub read: Gate,
	pub update: Gate,
	pub create: Gate,
	pub delete: Gate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDef {
	/// List name (e.g. "User")
	pub key: &'static str,
	/// Plural URL path segment (e.g. "users")
	pub path: &'static str,
	pub fields: Vec<FieldDef>,
	pub access: ListAccess,
}

impl ListDef {
	pub fn field(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|f| f.name == name)
	}

	pub fn gate(&self, op: Operation) -> Gate {
		match op {
			Operation::Read => self.access.read,
			Operation::Create => self.access.create,
			Operation::Update => self.access.update,
			Operation::Delete => self.access.delete,
		}
	}

	pub fn unique_fields(&self) -> impl Iterator<Item = &FieldDef> {
		self.fields.iter().filter(|f| f.unique)
	}
}


// vim: ts=4
