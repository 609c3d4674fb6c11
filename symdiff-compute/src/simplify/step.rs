use std::fmt;

/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// An operation on constants was replaced by its value.
    FoldConstant,

    /// An operation on constants was outside of its domain, such as `1/0` or `ln(-1)`, and was
    /// replaced by an error.
    DomainError,

    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `a-0 = a`
    SubtractZero,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `0/a = 0`
    DivideZero,

    /// `a/1 = a`
    DivideOne,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `0^a = 0`
    PowerZeroLeft,

    /// `1^a = 1`
    PowerOneLeft,

    /// `ln(1) = 0`
    LnOne,

    /// `exp(0) = 1`
    ExpZero,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match self {
            Step::FoldConstant => "evaluate constant operation",
            Step::DomainError => "constant operation is undefined",
            Step::AddZero => "a+0 = a",
            Step::SubtractZero => "a-0 = a",
            Step::MultiplyZero => "a*0 = 0",
            Step::MultiplyOne => "a*1 = a",
            Step::DivideZero => "0/a = 0",
            Step::DivideOne => "a/1 = a",
            Step::PowerZero => "a^0 = 1",
            Step::PowerOne => "a^1 = a",
            Step::PowerZeroLeft => "0^a = 0",
            Step::PowerOneLeft => "1^a = 1",
            Step::LnOne => "ln(1) = 0",
            Step::ExpZero => "exp(0) = 1",
        };
        write!(f, "{}", description)
    }
}
