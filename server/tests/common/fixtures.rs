//! Reusable test fixtures and test data

use serde_json::{Value, json};

pub fn sample_answer(name: &str) -> Value {
	json!({ "name": name, "description": "A sample answer" })
}

pub fn sample_question(answers: &[i64], correct: i64) -> Value {
	json!({
		"name": "Capital",
		"image": "https://example.com/paris.png",
		"description": "What is the capital of France?",
		"answers": answers,
		"correct": correct,
	})
}

pub fn sample_feedback(category: &str) -> Value {
	json!({ "name": "Result", "description": "Thanks for playing", "category": category })
}

pub fn sample_quiz(questions: &[i64], feedback: &[i64]) -> Value {
	json!({
		"name": "Geo",
		"category": "study",
		"questions": questions,
		"feedback": feedback,
	})
}

// vim: ts=4
