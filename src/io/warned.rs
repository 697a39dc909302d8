/// A value read from an input, along with the warnings raised while reading it.
pub(crate) struct Warned<T> {
    value: T,
    warnings: Vec<String>,
}

impl<T> Warned<T> {
    /// Wraps a value that raised no warning.
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            warnings: vec![],
        }
    }

    /// Adds a warning to this value.
    pub(crate) fn warn(mut self, warning: String) -> Self {
        self.warnings.push(warning);
        self
    }

    /// Applies a function to the value, keeping the warnings.
    pub(crate) fn map<U, F>(self, f: F) -> Warned<U>
    where
        F: FnOnce(T) -> U,
    {
        Warned {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Pairs two values, concatenating their warnings.
    pub(crate) fn and<U>(mut self, other: Warned<U>) -> Warned<(T, U)> {
        self.warnings.extend(other.warnings);
        Warned {
            value: (self.value, other.value),
            warnings: self.warnings,
        }
    }

    /// Gathers values into a vector, concatenating their warnings.
    pub(crate) fn gather<I>(values: I) -> Warned<Vec<T>>
    where
        I: IntoIterator<Item = Warned<T>>,
    {
        values
            .into_iter()
            .fold(Warned::new(vec![]), |mut acc, w| {
                acc.value.push(w.value);
                acc.warnings.extend(w.warnings);
                acc
            })
    }

    /// Consumes the warnings, returning the value.
    ///
    /// The warnings are passed one by one to the provided callback.
    pub(crate) fn consume_warnings<F>(self, mut f: F) -> T
    where
        F: FnMut(&str),
    {
        self.warnings.iter().for_each(|w| f(w));
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_warnings<T>(w: Warned<T>) -> (T, Vec<String>) {
        let mut warnings = vec![];
        let value = w.consume_warnings(|s| warnings.push(s.to_string()));
        (value, warnings)
    }

    #[test]
    fn test_no_warning() {
        assert_eq!((1, vec![]), collect_warnings(Warned::new(1)));
    }

    #[test]
    fn test_and_keeps_warning_order() {
        let w = Warned::new(1)
            .warn("w1".to_string())
            .and(Warned::new("a").warn("w2".to_string()));
        assert_eq!(
            ((1, "a"), vec!["w1".to_string(), "w2".to_string()]),
            collect_warnings(w)
        );
    }

    #[test]
    fn test_gather_and_map() {
        let w = Warned::gather(vec![
            Warned::new(1),
            Warned::new(2).warn("w".to_string()),
        ])
        .map(|v| v.len());
        assert_eq!((2, vec!["w".to_string()]), collect_warnings(w));
    }
}
