use std::fmt;

use derive_more::Deref;
use derive_more::DerefMut;

/// A `key=value` entry of a macro's bracketed attribute list. Positional
/// entries have an empty key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
	pub key: String,
	pub values: Vec<String>,
}

impl Attribute {
	pub fn new(key: impl Into<String>, values: Vec<String>) -> Self {
		Self {
			key: key.into(),
			values,
		}
	}

	pub fn is_positional(&self) -> bool {
		self.key.is_empty()
	}

	/// The first value.
	pub fn value(&self) -> Option<&str> {
		self.values.first().map(String::as_str)
	}
}

impl fmt::Display for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if !self.is_positional() {
			write!(f, "{}=", self.key)?;
		}
		f.write_str(&self.values.join(","))
	}
}

/// The ordered attribute list of one macro invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Attributes(Vec<Attribute>);

impl Attributes {
	/// Parse a comma separated attribute list.
	///
	/// A segment holding `=` starts a new attribute and is split on its first
	/// `=`. A segment without one continues the previous attribute, so
	/// `tags=a,b` yields a single `tags` attribute with two values.
	pub fn parse(input: &str) -> Self {
		let mut attributes: Vec<Attribute> = Vec::new();

		for segment in input.split(',').filter(|segment| !segment.is_empty()) {
			if let Some((key, value)) = segment.split_once('=') {
				attributes.push(Attribute::new(key, vec![value.to_string()]));
			} else if let Some(last) = attributes.last_mut() {
				last.values.push(segment.to_string());
			} else {
				attributes.push(Attribute::new("", vec![segment.to_string()]));
			}
		}

		Self(attributes)
	}

	pub fn get(&self, key: &str) -> Option<&Attribute> {
		self.iter().find(|attribute| attribute.key == key)
	}

	/// First value of the first attribute named `key`.
	pub fn value(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Attribute::value)
	}

	/// Values of every attribute named `key`, in order.
	pub fn values(&self, key: &str) -> Vec<String> {
		self.iter()
			.filter(|attribute| attribute.key == key)
			.flat_map(|attribute| attribute.values.iter().cloned())
			.collect()
	}

	/// A copy without the attributes named `key`.
	#[must_use]
	pub fn without(&self, key: &str) -> Self {
		Self(
			self.iter()
				.filter(|attribute| attribute.key != key)
				.cloned()
				.collect(),
		)
	}

	/// The positional text of the list, if it has one.
	pub fn positional(&self) -> Option<String> {
		self.iter()
			.find(|attribute| attribute.is_positional())
			.map(|attribute| attribute.values.join(","))
	}
}

impl From<Vec<Attribute>> for Attributes {
	fn from(attributes: Vec<Attribute>) -> Self {
		Self(attributes)
	}
}

impl fmt::Display for Attributes {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (index, attribute) in self.iter().enumerate() {
			if index > 0 {
				f.write_str(",")?;
			}
			write!(f, "{attribute}")?;
		}
		Ok(())
	}
}

/// Parse a comma separated attribute list into its entries.
pub fn parse_attributes(input: &str) -> Vec<Attribute> {
	Attributes::parse(input).0
}
