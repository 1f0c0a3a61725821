//! Boolean test over a borrowed value.

/// Answers a yes/no question about `T`.
pub trait Predicate<T: ?Sized> {
    fn is_true(&self, value: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn is_true(&self, value: &T) -> bool {
        self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Predicate;

    #[test]
    fn closures_act_as_predicates() {
        let is_short = |value: &str| value.len() < 4;
        assert!(is_short.is_true("bot"));
        assert!(!is_short.is_true("human"));
    }
}
