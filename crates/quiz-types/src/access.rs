//! Tagged access results.
//!
//! A gate never answers with a bare boolean. It either denies the operation,
//! allows it on every row, or allows it only on rows matching a filter. The
//! storage adapter translates the filter into its own query language, so the
//! row-restriction step has exactly one meaning.

use crate::types::{Item, ItemId};

/// Row-restricting condition produced by a gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
	/// Row identifier equals the given id
	Id(ItemId),
	/// All of the inner filters must match
	All(Vec<RowFilter>),
}

impl RowFilter {
	pub fn matches(&self, item: &Item) -> bool {
		match self {
			RowFilter::Id(id) => item.id == *id,
			RowFilter::All(filters) => filters.iter().all(|f| f.matches(item)),
		}
	}

	/// Conjunction of two filters
	pub fn and(self, other: RowFilter) -> RowFilter {
		match (self, other) {
			(RowFilter::All(mut a), RowFilter::All(b)) => {
				a.extend(b);
				RowFilter::All(a)
			}
			(RowFilter::All(mut a), f) | (f, RowFilter::All(mut a)) => {
				a.push(f);
				RowFilter::All(a)
			}
			(a, b) if a == b => a,
			(a, b) => RowFilter::All(vec![a, b]),
		}
	}
}

/// Result of evaluating a gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
	Denied,
	Unrestricted,
	RestrictedTo(RowFilter),
}

impl Access {
	pub fn is_denied(&self) -> bool {
		matches!(self, Access::Denied)
	}

	pub fn filter(&self) -> Option<&RowFilter> {
		match self {
			Access::RestrictedTo(filter) => Some(filter),
			_ => None,
		}
	}

	/// Intersection of two access results (list gate narrowed by a field gate)
	pub fn and(self, other: Access) -> Access {
		match (self, other) {
			(Access::Denied, _) | (_, Access::Denied) => Access::Denied,
			(Access::Unrestricted, other) | (other, Access::Unrestricted) => other,
			(Access::RestrictedTo(a), Access::RestrictedTo(b)) => Access::RestrictedTo(a.and(b)),
		}
	}

	/// Whether an already loaded row is covered by this access
	pub fn permits(&self, item: &Item) -> bool {
		match self {
			Access::Denied => false,
			Access::Unrestricted => true,
			Access::RestrictedTo(filter) => filter.matches(item),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::Fields;

	fn item(id: i64) -> Item {
		Item { id: ItemId(id), fields: Fields::new() }
	}

	#[test]
	fn test_filter_matches_id() {
		let filter = RowFilter::Id(ItemId(3));
		assert!(filter.matches(&item(3)));
		assert!(!filter.matches(&item(4)));
	}

	#[test]
	fn test_filter_and_same_id_collapses() {
		let filter = RowFilter::Id(ItemId(3)).and(RowFilter::Id(ItemId(3)));
		assert_eq!(filter, RowFilter::Id(ItemId(3)));
	}

	#[test]
	fn test_filter_and_different_ids_matches_nothing() {
		let filter = RowFilter::Id(ItemId(3)).and(RowFilter::Id(ItemId(4)));
		assert!(!filter.matches(&item(3)));
		assert!(!filter.matches(&item(4)));
	}

	#[test]
	fn test_access_intersection() {
		let own = Access::RestrictedTo(RowFilter::Id(ItemId(1)));

		assert_eq!(Access::Unrestricted.and(own.clone()), own);
		assert_eq!(own.clone().and(Access::Unrestricted), own);
		assert_eq!(own.clone().and(Access::Denied), Access::Denied);
		assert_eq!(Access::Unrestricted.and(Access::Unrestricted), Access::Unrestricted);
	}

	#[test]
	fn test_access_permits() {
		let own = Access::RestrictedTo(RowFilter::Id(ItemId(1)));
		assert!(own.permits(&item(1)));
		assert!(!own.permits(&item(2)));
		assert!(Access::Unrestricted.permits(&item(2)));
		assert!(!Access::Denied.permits(&item(1)));
	}
}

// vim: ts=4
