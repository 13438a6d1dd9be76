/*!
# CD Stream: Tags
*/

use std::{
	cmp::Ordering,
	collections::BTreeMap,
	fmt,
};



/// # Helper: Tag Fields.
macro_rules! fields {
	( $( $k:ident $vstr:literal ),+ $(,)? ) => (
		#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
		/// # Tag Field.
		///
		/// The CD-TEXT fields a device might report, plus a handful of
		/// values derived from the table of contents itself.
		pub enum TagKind {
			$(
				#[doc = concat!("# ", stringify!($k), ".")]
				$k,
			)+
		}

		impl TagKind {
			/// # All Kinds.
			pub const ALL: [Self; fields!(@count $($k)+)] = [ $( Self::$k, )+ ];

			#[must_use]
			/// # As Str.
			///
			/// Return the field as an uppercase string, similar to how it would
			/// appear in track metadata.
			pub const fn as_str(self) -> &'static str {
				match self {
					$( Self::$k => $vstr, )+
				}
			}
		}
	);

	(@count) => ( 0 );
	(@count $first:ident $($rest:ident)*) => ( 1 + fields!(@count $($rest)*) );
}

fields! {
	Arranger      "ARRANGER",
	Barcode       "BARCODE",
	Composer      "COMPOSER",
	DiscId        "DISCID",
	Duration      "DURATION",
	Isrc          "ISRC",
	Message       "COMMENT",
	Performer     "ARTIST",
	Songwriter    "SONGWRITER",
	Title         "TITLE",
	TrackCount    "TRACKTOTAL",
	TrackNumber   "TRACKNUMBER",
	VendorDiscId  "VENDOR_DISCID",
}

impl AsRef<str> for TagKind {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for TagKind {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(self.as_str(), f)
	}
}

impl Ord for TagKind {
	#[inline]
	fn cmp(&self, rhs: &Self) -> Ordering { self.as_str().cmp(rhs.as_str()) }
}

impl PartialOrd for TagKind {
	#[inline]
	fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> { Some(self.cmp(rhs)) }
}

impl TryFrom<&str> for TagKind {
	type Error = ();

	/// # From Field Name.
	///
	/// Match is case-insensitive.
	fn try_from(src: &str) -> Result<Self, Self::Error> {
		let src = src.trim();
		Self::ALL.into_iter()
			.find(|k| k.as_str().eq_ignore_ascii_case(src))
			.ok_or(())
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Tag Set.
///
/// An ordered key/value collection. Empty values are never stored.
pub struct Tags(BTreeMap<TagKind, String>);

impl<S: Into<String>> FromIterator<(TagKind, S)> for Tags {
	fn from_iter<I: IntoIterator<Item = (TagKind, S)>>(iter: I) -> Self {
		let mut out = Self::default();
		for (k, v) in iter { out.insert(k, v); }
		out
	}
}

impl fmt::Display for Tags {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for (k, v) in &self.0 {
			if first { first = false; }
			else { f.write_str(", ")?; }
			write!(f, "{k}={v}")?;
		}
		Ok(())
	}
}

impl Tags {
	#[must_use]
	/// # New (Empty).
	pub const fn new() -> Self { Self(BTreeMap::new()) }

	#[must_use]
	/// # Get Value.
	pub fn get(&self, kind: TagKind) -> Option<&str> {
		self.0.get(&kind).map(String::as_str)
	}

	/// # Insert Value.
	///
	/// The value is trimmed; if nothing is left, any existing value for the
	/// field is removed instead. The previous value, if any, is returned.
	pub fn insert<S>(&mut self, kind: TagKind, value: S) -> Option<String>
	where S: Into<String> {
		let value: String = value.into();
		let trimmed = value.trim();
		if trimmed.is_empty() { self.0.remove(&kind) }
		else if trimmed.len() == value.len() { self.0.insert(kind, value) }
		else { self.0.insert(kind, trimmed.to_owned()) }
	}

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	/// # Iterate.
	pub fn iter(&self) -> impl Iterator<Item = (TagKind, &str)> {
		self.0.iter().map(|(k, v)| (*k, v.as_str()))
	}

	#[must_use]
	/// # Length.
	pub fn len(&self) -> usize { self.0.len() }

	/// # Merge.
	///
	/// Copy the values from `other` into `self`, replacing any overlap.
	pub fn merge(&mut self, other: &Self) {
		for (k, v) in &other.0 { self.0.insert(*k, v.clone()); }
	}

	/// # Remove Value.
	pub fn remove(&mut self, kind: TagKind) -> Option<String> { self.0.remove(&kind) }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_kind_str() {
		for k in TagKind::ALL {
			assert_eq!(TagKind::try_from(k.as_str()), Ok(k), "Kind round trip failed.");
			assert_eq!(
				TagKind::try_from(k.as_str().to_ascii_lowercase().as_str()),
				Ok(k),
				"Lowercase kind failed.",
			);
		}
		assert!(TagKind::try_from("NOPE").is_err(), "Unknown field should fail.");

		// Ordering follows the string values, not the declaration.
		assert!(TagKind::Performer < TagKind::Barcode, "ARTIST should sort before BARCODE.");
	}

	#[test]
	fn t_tags_insert() {
		let mut tags = Tags::default();
		assert!(tags.is_empty());

		assert_eq!(tags.insert(TagKind::Title, "  Hello  "), None);
		assert_eq!(tags.get(TagKind::Title), Some("Hello"), "Values should be trimmed.");

		assert_eq!(tags.insert(TagKind::Title, "World"), Some("Hello".to_owned()));
		assert_eq!(tags.len(), 1);

		// Empty values clear the field.
		assert_eq!(tags.insert(TagKind::Title, "   "), Some("World".to_owned()));
		assert!(tags.is_empty(), "Empty values should not be stored.");
	}

	#[test]
	fn t_tags_merge() {
		let mut a: Tags = [(TagKind::Title, "A"), (TagKind::Performer, "B")].into_iter().collect();
		let b: Tags = [(TagKind::Title, "C"), (TagKind::Isrc, "USRC17607839")].into_iter().collect();
		a.merge(&b);

		assert_eq!(a.len(), 3);
		assert_eq!(a.get(TagKind::Title), Some("C"), "Merged values should win.");
		assert_eq!(a.to_string(), "ARTIST=B, ISRC=USRC17607839, TITLE=C");
	}
}
