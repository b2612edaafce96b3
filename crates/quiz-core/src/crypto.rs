//! Password hashing and random secrets
//!
//! bcrypt is CPU-bound, so it runs on the blocking thread pool.

use rand::RngExt;
use tokio::sync::OnceCell;

use crate::prelude::*;

const BCRYPT_COST: u32 = 10;
const PASSWORD_LENGTH: usize = 20;
const ID_LENGTH: usize = 16;
const SAFE: [char; 62] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
	'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
	'V', 'W', 'X', 'Y', 'Z',
];

fn generate_password_hash_sync(password: &str) -> ClResult<Box<str>> {
	let hash = bcrypt::hash(password, BCRYPT_COST)
		.map_err(|err| Error::Internal(format!("bcrypt: {}", err)))?;

	Ok(hash.into())
}

pub async fn generate_password_hash(password: Box<str>) -> ClResult<Box<str>> {
	tokio::task::spawn_blocking(move || generate_password_hash_sync(&password))
		.await
		.map_err(|err| Error::Internal(format!("hash task: {}", err)))?
}

fn check_password_sync(password: &str, password_hash: &str) -> ClResult<()> {
	let res = bcrypt::verify(password, password_hash).map_err(|_| Error::Unauthorized)?;
	if res { Ok(()) } else { Err(Error::Unauthorized) }
}

/// Verify a password against a stored hash. Any mismatch is `Unauthorized`.
pub async fn check_password(password: Box<str>, password_hash: Box<str>) -> ClResult<()> {
	tokio::task::spawn_blocking(move || check_password_sync(&password, &password_hash))
		.await
		.map_err(|_| Error::Unauthorized)?
}

/// Hash of a random password, computed on first use
static DUMMY_HASH: OnceCell<Box<str>> = OnceCell::const_new();

/// Spend the time of a password check when there is no stored hash to check
/// against. Always yields `Unauthorized`.
pub async fn check_password_dummy(password: Box<str>) -> Error {
	match DUMMY_HASH.get_or_try_init(|| generate_password_hash(random_password().into())).await {
		Ok(hash) => {
			let _ = check_password(password, hash.clone()).await;
		}
		Err(err) => warn!("dummy hash: {}", err),
	}
	Error::Unauthorized
}

fn random_string(len: usize) -> String {
	let mut rng = rand::rng();
	let mut result = String::with_capacity(len);

	for _ in 0..len {
		result.push(SAFE[rng.random_range(0..SAFE.len())]);
	}
	result
}

pub fn random_password() -> String {
	random_string(PASSWORD_LENGTH)
}

pub fn random_id() -> String {
	random_string(ID_LENGTH)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_hash_and_check() {
		let hash = generate_password_hash("correct horse".into()).await.unwrap();
		assert!(hash.starts_with("$2"));
		assert!(check_password("correct horse".into(), hash.clone()).await.is_ok());
		assert!(matches!(
			check_password("wrong horse".into(), hash).await,
			Err(Error::Unauthorized)
		));
	}

	#[tokio::test]
	async fn test_garbage_hash_is_unauthorized() {
		assert!(matches!(
			check_password("x".into(), "not-a-hash".into()).await,
			Err(Error::Unauthorized)
		));
	}

	#[tokio::test]
	async fn test_dummy_check_always_fails() {
		for _ in 0..2 {
			assert!(matches!(
				check_password_dummy("correct horse".into()).await,
				Error::Unauthorized
			));
		}
		assert!(DUMMY_HASH.get().is_some_and(|hash| hash.starts_with("$2")));
	}

	#[test]
	fn test_random_password() {
		let a = random_password();
		let b = random_password();
		assert_eq!(a.len(), PASSWORD_LENGTH);
		assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
		assert_ne!(a, b);
	}
}

// vim: ts=4
