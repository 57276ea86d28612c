use serde::de::DeserializeOwned;

/// A single supplied value. Same alias convention as the rest of the crate's JSON plumbing.
pub type ParameterValue = serde_json::Value;

/// Produces the externally supplied values a definition may need at construction.
///
/// Called once per top-level resolution. Dependencies resolved on behalf of a
/// definition receive no parameters.
pub type ParameterSource<'a> = &'a dyn Fn() -> Parameters;

/// Ordered values handed to a factory at resolution time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: Vec<ParameterValue>,
}

impl Parameters {
    pub fn new(values: Vec<ParameterValue>) -> Self {
        Self { values }
    }

    /// No parameters. Usable directly as a [`ParameterSource`]: `&Parameters::empty`.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn raw(&self, index: usize) -> Option<&ParameterValue> {
        self.values.get(index)
    }

    /// Reads the value at `index`. `None` if nothing was supplied there.
    pub fn get<T: DeserializeOwned>(&self, index: usize) -> Option<Result<T, serde_json::Error>> {
        self.values
            .get(index)
            .map(|v| serde_json::from_value(v.clone()))
    }
}

impl From<Vec<ParameterValue>> for Parameters {
    fn from(values: Vec<ParameterValue>) -> Self {
        Self::new(values)
    }
}

/// Builds [`Parameters`] from a list of serializable expressions.
///
/// ```rust
/// let params = wirecheck::parameters!["jdbc:h2:mem", 5];
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! parameters {
    ($($value:expr),* $(,)?) => {
        $crate::Parameters::new(vec![$($crate::JsonValue::from($value)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_deserializes_by_index() {
        let params = Parameters::new(vec![json!("url"), json!(3)]);
        let url: String = params.get(0).unwrap().unwrap();
        let retries: u32 = params.get(1).unwrap().unwrap();
        assert_eq!(url, "url");
        assert_eq!(retries, 3);
        assert!(params.get::<String>(2).is_none());
    }

    #[test]
    fn test_get_reports_wrong_shape() {
        let params = Parameters::new(vec![json!("not a number")]);
        assert!(params.get::<u32>(0).unwrap().is_err());
    }

    #[test]
    fn test_macro_builds_in_order() {
        let params = crate::parameters!["a", 2, true];
        assert_eq!(params.raw(2), Some(&json!(true)));
        assert_eq!(Parameters::empty().len(), 0);
    }
}
