//! Splits GML text into keys, numbers, strings and brackets.

use std::iter::Peekable;
use std::str::Chars;

use crate::color::Color;
use crate::file::FileError;

#[derive(Clone, Debug, PartialEq)]
pub(super) enum Token {
	Identifier(String),
	Int(i64),
	Double(f64),
	Str(String),
	/// A string of the form `"#RRGGBB"` or `"#RRGGBBAA"`.
	Color(Color),
	LeftBracket,
	RightBracket,
}

impl Token {
	/// Source-like rendering for error messages.
	pub(super) fn text(&self) -> String {
		match self {
			Token::Identifier(text) => text.clone(),
			Token::Int(value) => value.to_string(),
			Token::Double(value) => value.to_string(),
			Token::Str(text) => format!("\"{text}\""),
			Token::Color(color) => format!("\"{}\"", color.to_hex_rgba()),
			Token::LeftBracket => "[".into(),
			Token::RightBracket => "]".into(),
		}
	}
}

/// Splits GML text into tokens. Characters that start no token are skipped.
pub(super) struct Tokenizer<'a> {
	chars: Peekable<Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
	pub(super) fn new(text: &'a str) -> Self {
		Self {
			chars: text.chars().peekable(),
		}
	}

	fn take_while(&mut self, mut accept: impl FnMut(char) -> bool, out: &mut String) {
		while let Some(&ch) = self.chars.peek() {
			if !accept(ch) {
				break;
			}
			out.push(ch);
			self.chars.next();
		}
	}

	fn number(&mut self, first: char) -> Result<Token, FileError> {
		let mut text = String::from(first);
		self.take_while(|c| c.is_ascii_digit(), &mut text);

		if self.chars.peek() == Some(&'.') {
			text.push('.');
			self.chars.next();
			self.take_while(|c| c.is_ascii_digit(), &mut text);
			return text
				.parse()
				.map(Token::Double)
				.map_err(|_| FileError::UnexpectedToken(text));
		}
		text.parse()
			.map(Token::Int)
			.map_err(|_| FileError::UnexpectedToken(text))
	}

	fn string(&mut self) -> Result<Token, FileError> {
		let mut text = String::new();
		loop {
			match self.chars.next() {
				Some('"') => break,
				Some(ch) => text.push(ch),
				None => return Err(FileError::UnexpectedEof),
			}
		}

		if text.starts_with('#') && matches!(text.len(), 7 | 9) {
			if let Some(color) = Color::parse_css(&text) {
				return Ok(Token::Color(color));
			}
		}
		Ok(Token::Str(text))
	}
}

impl Iterator for Tokenizer<'_> {
	type Item = Result<Token, FileError>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let ch = self.chars.next()?;
			let token = match ch {
				'[' => Ok(Token::LeftBracket),
				']' => Ok(Token::RightBracket),
				'"' => self.string(),
				c if c.is_ascii_digit() || c == '-' => self.number(c),
				c if c.is_alphabetic() => {
					let mut text = String::from(c);
					self.take_while(char::is_alphabetic, &mut text);
					Ok(Token::Identifier(text))
				}
				_ => continue,
			};
			return Some(token);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<Token> {
		Tokenizer::new(text).collect::<Result<_, _>>().unwrap()
	}

	#[test]
	fn test_tokenizes_all_kinds() {
		assert_eq!(
			tokens("graph [ id -3 x 0.25 label \"A b\" fill \"#ff000080\" ]"),
			vec![
				Token::Identifier("graph".into()),
				Token::LeftBracket,
				Token::Identifier("id".into()),
				Token::Int(-3),
				Token::Identifier("x".into()),
				Token::Double(0.25),
				Token::Identifier("label".into()),
				Token::Str("A b".into()),
				Token::Identifier("fill".into()),
				Token::Color(Color::rgba(255, 0, 0, 128)),
				Token::RightBracket,
			]
		);
	}

	#[test]
	fn test_malformed_color_stays_a_string() {
		assert_eq!(tokens("\"#12\""), vec![Token::Str("#12".into())]);
		assert_eq!(tokens("\"#gggggg\""), vec![Token::Str("#gggggg".into())]);
	}

	#[test]
	fn test_lone_minus_and_open_string_fail() {
		let mut tokenizer = Tokenizer::new("- 1");
		assert!(matches!(tokenizer.next(), Some(Err(FileError::UnexpectedToken(_)))));
		assert!(matches!(
			Tokenizer::new("\"never closed").next(),
			Some(Err(FileError::UnexpectedEof))
		));
	}
}
