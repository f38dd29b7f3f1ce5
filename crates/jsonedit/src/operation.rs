//! The registered host functions and their argument counts.

use core::ops::RangeInclusive;

use thiserror::Error;

/// The host-callable functions, as a host registers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `json_size`
    Size,
    /// `json_get`
    Get,
    /// `json_set`
    Set,
    /// `json_unset`
    Unset,
    /// `json_append`
    Append,
    /// `json_config`
    Config,
}

impl Operation {
    /// Every operation, in registration order.
    pub const ALL: [Operation; 6] = [
        Operation::Size,
        Operation::Get,
        Operation::Set,
        Operation::Unset,
        Operation::Append,
        Operation::Config,
    ];

    /// Name the function is registered under.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Operation::Size => "json_size",
            Operation::Get => "json_get",
            Operation::Set => "json_set",
            Operation::Unset => "json_unset",
            Operation::Append => "json_append",
            Operation::Config => "json_config",
        }
    }

    /// Accepted argument counts.
    #[must_use]
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Operation::Size => 1..=1,
            Operation::Get | Operation::Unset | Operation::Append => 2..=2,
            Operation::Set => 3..=3,
            Operation::Config => 1..=2,
        }
    }

    /// Call signature shown to whoever registers or misuses the function.
    #[must_use]
    pub fn usage(self) -> &'static str {
        match self {
            Operation::Size => "json_size(<json>)",
            Operation::Get => "json_get(<json>, <key|position>)",
            Operation::Set => "json_set(<json>, <key|position>, <value>)",
            Operation::Unset => "json_unset(<json>, <key|position>)",
            Operation::Append => "json_append(<json>, <element>)",
            Operation::Config => "json_config(<name>[, <value>])",
        }
    }

    /// Registration-time check of the declared argument count.
    ///
    /// Calls themselves never re-check arity; a missing trailing argument
    /// reads as null.
    ///
    /// # Errors
    ///
    /// [`ArityError`] when `arg_count` is outside [`arity`](Self::arity).
    ///
    /// ```
    /// use jsonedit::Operation;
    ///
    /// assert!(Operation::Get.validate(2).is_ok());
    /// let err = Operation::Get.validate(3).unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "json_get - takes exactly 2 arguments - json_get(<json>, <key|position>)"
    /// );
    /// ```
    pub fn validate(self, arg_count: usize) -> Result<(), ArityError> {
        if self.arity().contains(&arg_count) {
            Ok(())
        } else {
            Err(ArityError {
                operation: self,
                found: arg_count,
            })
        }
    }

    fn takes(self) -> String {
        let arity = self.arity();
        let (min, max) = (*arity.start(), *arity.end());
        let noun = if max == 1 { "argument" } else { "arguments" };
        if min == max {
            format!("exactly {max} {noun}")
        } else {
            format!("{min} or {max} {noun}")
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A function was registered with the wrong number of arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{operation} - takes {} - {}", .operation.takes(), .operation.usage())]
pub struct ArityError {
    /// The function being registered.
    pub operation: Operation,
    /// The argument count it was registered with.
    pub found: usize,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Operation::Size, 1)]
    #[case(Operation::Get, 2)]
    #[case(Operation::Set, 3)]
    #[case(Operation::Unset, 2)]
    #[case(Operation::Append, 2)]
    #[case(Operation::Config, 1)]
    #[case(Operation::Config, 2)]
    fn accepts_declared_arity(#[case] op: Operation, #[case] count: usize) {
        assert_eq!(op.validate(count), Ok(()));
    }

    #[test]
    fn rejection_messages() {
        let messages: Vec<String> = Operation::ALL
            .iter()
            .map(|op| op.validate(0).unwrap_err().to_string())
            .collect();
        insta::assert_snapshot!(messages.join("\n"), @r"
        json_size - takes exactly 1 argument - json_size(<json>)
        json_get - takes exactly 2 arguments - json_get(<json>, <key|position>)
        json_set - takes exactly 3 arguments - json_set(<json>, <key|position>, <value>)
        json_unset - takes exactly 2 arguments - json_unset(<json>, <key|position>)
        json_append - takes exactly 2 arguments - json_append(<json>, <element>)
        json_config - takes 1 or 2 arguments - json_config(<name>[, <value>])
        ");
    }

    #[test]
    fn rejection_keeps_the_count() {
        let err = Operation::Set.validate(2).unwrap_err();
        assert_eq!(err.found, 2);
        assert_eq!(err.operation, Operation::Set);
    }
}
