use serde_json::Value;

/// Static JSON path into a provider payload.
///
/// Every getter has a documented default and treats a type mismatch the same
/// as absence, so reading a field can never fail.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    path: &'static [&'static str],
}

impl Field {
    pub(crate) const fn at(path: &'static [&'static str]) -> Self {
        Self { path }
    }

    fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.path
            .iter()
            .try_fold(root, |current, segment| current.as_object()?.get(*segment))
    }

    /// Finite JSON number, otherwise `0.0`.
    pub(crate) fn number(&self, root: &Value) -> f64 {
        self.resolve(root)
            .and_then(Value::as_f64)
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }

    /// Literal `true`, otherwise `false`.
    pub(crate) fn flag(&self, root: &Value) -> bool {
        self.resolve(root).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Array elements, otherwise an empty slice.
    pub(crate) fn items<'a>(&self, root: &'a Value) -> &'a [Value] {
        self.resolve(root)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Array length, otherwise `0`.
    pub(crate) fn len(&self, root: &Value) -> usize {
        self.items(root).len()
    }

    /// String contents, otherwise `None`.
    pub(crate) fn text<'a>(&self, root: &'a Value) -> Option<&'a str> {
        self.resolve(root).and_then(Value::as_str)
    }

    /// Non-empty string, non-zero number, `true`, or any object/array.
    /// Missing and `null` values are not present.
    pub(crate) fn present(&self, root: &Value) -> bool {
        match self.resolve(root) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_f64().map_or(false, |n| n != 0.0),
            Some(Value::String(text)) => !text.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }

    /// Number of entries in the array at this path matching `predicate`.
    pub(crate) fn count_where(&self, root: &Value, predicate: impl Fn(&Value) -> bool) -> usize {
        self.items(root).iter().filter(|item| predicate(*item)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEEP: Field = Field::at(&["a", "b", "c"]);

    #[test]
    fn missing_and_mistyped_paths_fall_back_to_defaults() {
        for payload in [
            Value::Null,
            json!({}),
            json!({ "a": 3 }),
            json!({ "a": { "b": [1, 2] } }),
            json!({ "a": { "b": { "c": "12" } } }),
        ] {
            assert_eq!(DEEP.number(&payload), 0.0);
            assert!(!DEEP.flag(&payload));
            assert_eq!(DEEP.len(&payload), 0);
        }
    }

    #[test]
    fn present_follows_truthiness_of_the_value() {
        assert!(!DEEP.present(&json!({ "a": { "b": { "c": null } } })));
        assert!(!DEEP.present(&json!({ "a": { "b": { "c": "" } } })));
        assert!(!DEEP.present(&json!({ "a": { "b": { "c": 0 } } })));
        assert!(DEEP.present(&json!({ "a": { "b": { "c": "vitalik.eth" } } })));
        assert!(DEEP.present(&json!({ "a": { "b": { "c": { "name": "x" } } } })));
    }
}
