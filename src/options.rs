use crate::io::StringFlavor;

/// The nesting depth allowed by [`TranscodeOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Whether lists may contain other lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedLists {
    /// Arrays of arrays are encoded as lists of lists, at any depth.
    Arbitrary,
    /// Any array found inside another array is rejected with
    /// [`TranscodeError::UnsupportedStructure`](crate::TranscodeError::UnsupportedStructure).
    Forbid,
}

impl Default for NestedLists {
    fn default() -> Self {
        NestedLists::Arbitrary
    }
}

/// Options controlling how a JSON document is transcoded.
///
/// ```
/// # use json_nbt::*;
/// use json_nbt::io::StringFlavor;
/// use serde_json::json;
///
/// let options = TranscodeOptions {
///     nested_lists: NestedLists::Forbid,
///     ..Default::default()
/// };
///
/// let document = json!({"matrix": [[1, 2], [3, 4]]});
/// assert!(encode_with(&document, None, &TranscodeOptions::default()).is_ok());
/// assert!(matches!(
///     encode_with(&document, None, &options),
///     Err(TranscodeError::UnsupportedStructure { .. })
/// ));
///
/// let options = TranscodeOptions::default().string_flavor(StringFlavor::JavaCesu8);
/// assert_eq!(options.string_flavor, StringFlavor::JavaCesu8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOptions {
    /// Whether arrays may nest inside arrays.
    pub nested_lists: NestedLists,
    /// The maximum number of compounds and lists that may enclose a value, counting the root
    /// compound. `None` disables the limit, which is only advisable for trusted input.
    pub max_depth: Option<usize>,
    /// How strings and tag names are encoded.
    pub string_flavor: StringFlavor,
}

impl TranscodeOptions {
    /// Sets the nested list policy.
    pub fn nested_lists(mut self, nested_lists: NestedLists) -> Self {
        self.nested_lists = nested_lists;
        self
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the string flavor.
    pub fn string_flavor(mut self, string_flavor: StringFlavor) -> Self {
        self.string_flavor = string_flavor;
        self
    }
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        TranscodeOptions {
            nested_lists: NestedLists::default(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
            string_flavor: StringFlavor::default(),
        }
    }
}
