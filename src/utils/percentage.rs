use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `part` in `whole`. An empty whole counts as 0%.
pub fn ratio_percentage(part: usize, whole: usize) -> Percentage {
    if whole == 0 {
        return Percentage(0.);
    }
    Percentage::new_opt(part as f64 / whole as f64 * 100.)
        .expect("Percentage should always be at least 0")
}

#[cfg(test)]
mod tests {
    use super::{ratio_percentage, Percentage};

    #[test]
    fn ratio() {
        assert_eq!(*ratio_percentage(15, 30), 50.);
        assert_eq!(*ratio_percentage(30, 30), 100.);
        assert_eq!(*ratio_percentage(3, 0), 0.);
    }

    #[test]
    fn negative_is_rejected() {
        assert!(Percentage::new_opt(-1.).is_none());
        assert!(Percentage::new_opt(f64::NAN).is_none());
    }

    #[test]
    fn display_rounds() {
        assert_eq!(ratio_percentage(1, 3).to_string(), "33%");
    }
}
