//! Name sets accepted by injection.

/// One or more mixin names, in request order.
///
/// Implemented for single names (`&str`, `String`) and for ordered
/// collections of string-likes (arrays, slices, `Vec`).
///
/// # Example
///
/// ```rust,ignore
/// registry.inject("validator", &mut host)?;
/// registry.inject(["validator", "submitter"], &mut host)?;
/// registry.inject(vec![String::from("validator")], &mut host)?;
/// ```
pub trait Names {
    /// Iterate over the names in request order.
    fn names(&self) -> impl Iterator<Item = &str>;
}

impl Names for str {
    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self)
    }
}

impl Names for String {
    fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.as_str())
    }
}

impl<S: AsRef<str>> Names for [S] {
    fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|s| s.as_ref())
    }
}

impl<S: AsRef<str>, const N: usize> Names for [S; N] {
    fn names(&self) -> impl Iterator<Item = &str> {
        self.as_slice().names()
    }
}

impl<S: AsRef<str>> Names for Vec<S> {
    fn names(&self) -> impl Iterator<Item = &str> {
        self.as_slice().names()
    }
}

impl<T: Names + ?Sized> Names for &T {
    fn names(&self) -> impl Iterator<Item = &str> {
        (**self).names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<N: Names>(names: N) -> Vec<String> {
        names.names().map(str::to_owned).collect()
    }

    #[test]
    fn test_single_names() {
        assert_eq!(collect("a"), vec!["a"]);
        assert_eq!(collect(String::from("b")), vec!["b"]);
    }

    #[test]
    fn test_sequences_keep_order_and_duplicates() {
        assert_eq!(collect(["b", "a", "b"]), vec!["b", "a", "b"]);
        assert_eq!(collect(vec![String::from("x"), String::from("y")]), vec!["x", "y"]);

        let slice: &[&str] = &["p", "q"];
        assert_eq!(collect(slice), vec!["p", "q"]);
    }

    #[test]
    fn test_empty_sequence() {
        let empty: [&str; 0] = [];
        assert!(collect(empty).is_empty());
    }
}
