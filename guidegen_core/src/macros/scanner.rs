use std::ops::Range;

use logos::Logos;

use super::Attributes;
use crate::GuidesResult;

/// Raw tokens of a single markup line.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LineToken {
	#[regex(r"[A-Za-z][A-Za-z0-9_-]*")]
	Word,
	#[token(":")]
	Colon,
	#[token("[")]
	BracketOpen,
	#[token("]")]
	BracketClose,
	#[regex(r"[ \t\r]+")]
	Whitespace,
}

/// A line holding an invocation of a macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroLine<'a> {
	/// The line without its terminator.
	pub line: &'a str,
	/// Byte span of `line` in the scanned text.
	pub span: Range<usize>,
}

/// A parsed `name:target[attributes]` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
	pub name: String,
	pub target: String,
	pub attributes: Attributes,
}

impl Macro {
	/// Parse a line that consists of exactly one invocation of `name`.
	/// Surrounding whitespace is ignored.
	pub fn parse(name: &str, line: &str) -> Option<Self> {
		let trimmed = line.trim();
		let mut lexer = LineToken::lexer(trimmed);

		if lexer.next() != Some(Ok(LineToken::Word)) || lexer.slice() != name {
			return None;
		}
		if lexer.next() != Some(Ok(LineToken::Colon)) {
			return None;
		}

		let rest = &trimmed[lexer.span().end..];
		let (target, attributes) = rest.split_once('[')?;
		let attributes = attributes.strip_suffix(']')?;

		if target.chars().any(char::is_whitespace) {
			return None;
		}

		Some(Self {
			name: name.to_string(),
			target: target.to_string(),
			attributes: Attributes::parse(attributes),
		})
	}
}

/// Whether `line` holds `name:` at a word boundary, followed by `[` and a
/// later `]`.
pub fn contains_invocation(line: &str, name: &str) -> bool {
	let tokens: Vec<_> = LineToken::lexer(line).spanned().collect();

	tokens.iter().enumerate().any(|(index, (token, span))| {
		if *token != Ok(LineToken::Word) || &line[span.clone()] != name {
			return false;
		}
		if tokens.get(index + 1).map(|(token, _)| token) != Some(&Ok(LineToken::Colon)) {
			return false;
		}

		let mut rest = tokens[index + 2..].iter().map(|(token, _)| token);
		rest.any(|token| *token == Ok(LineToken::BracketOpen))
			&& rest.any(|token| *token == Ok(LineToken::BracketClose))
	})
}

/// Every line of `text` holding an invocation of `name`, in document order.
/// Identical lines are reported once per occurrence.
pub fn find_macro_lines<'a>(text: &'a str, name: &str) -> Vec<MacroLine<'a>> {
	split_lines(text)
		.filter(|(line, _, _)| contains_invocation(line, name))
		.map(|(line, start, _)| {
			MacroLine {
				line,
				span: start..start + line.len(),
			}
		})
		.collect()
}

/// Rewrite every invocation line of `name` in one pass over `text`.
///
/// `replace` returns the replacement for a parsed invocation, or `None` to
/// keep the line. Lines that fail to parse are kept. Line terminators are
/// preserved.
pub fn rewrite_macro_lines<F>(text: &str, name: &str, mut replace: F) -> GuidesResult<String>
where
	F: FnMut(&Macro) -> GuidesResult<Option<String>>,
{
	let mut output = String::with_capacity(text.len());

	for (line, _, terminator) in split_lines(text) {
		let replacement = if contains_invocation(line, name) {
			match Macro::parse(name, line) {
				Some(invocation) => replace(&invocation)?,
				None => None,
			}
		} else {
			None
		};

		output.push_str(replacement.as_deref().unwrap_or(line));
		output.push_str(terminator);
	}

	Ok(output)
}

/// Split `text` into `(line, start offset, terminator)` triples. The
/// terminator is `\n`, `\r\n` or empty for the last line.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = (&str, usize, &str)> {
	let mut offset = 0;
	text.split_inclusive('\n').map(move |chunk| {
		let start = offset;
		offset += chunk.len();
		let line = chunk
			.strip_suffix('\n')
			.map_or(chunk, |line| line.strip_suffix('\r').unwrap_or(line));
		(line, start, &chunk[line.len()..])
	})
}
