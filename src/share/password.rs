//! Advisory password-strength feedback for share encryption.
//!
//! This is UI guidance, not a security boundary: a Weak verdict is
//! shown to the user but never blocks sealing an envelope.

/// Graded strength verdicts, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Fair,
    Good,
    Strong,
}

impl PasswordStrength {
    /// Human-readable label for CLI output.
    pub fn label(self) -> &'static str {
        match self {
            PasswordStrength::Weak => "weak",
            PasswordStrength::Fair => "fair",
            PasswordStrength::Good => "good",
            PasswordStrength::Strong => "strong",
        }
    }
}

/// Score a password by length and character-class variety.
pub fn evaluate_password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    if len == 0 {
        return PasswordStrength::Weak;
    }

    let mut classes = 0u32;
    if password.chars().any(|c| c.is_ascii_lowercase()) {
        classes += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        classes += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        classes += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        classes += 1;
    }

    let mut score = 0u32;
    score += match len {
        0..=7 => 0,
        8..=11 => 1,
        12..=15 => 2,
        _ => 3,
    };
    score += classes.saturating_sub(1);

    match score {
        0..=1 => PasswordStrength::Weak,
        2..=3 => PasswordStrength::Fair,
        4 => PasswordStrength::Good,
        _ => PasswordStrength::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_short_passwords_are_weak() {
        assert_eq!(evaluate_password_strength(""), PasswordStrength::Weak);
        assert_eq!(evaluate_password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(evaluate_password_strength("1234567"), PasswordStrength::Weak);
    }

    #[test]
    fn length_alone_reaches_fair() {
        assert_eq!(
            evaluate_password_strength("aaaaaaaaaaaaaaaa"),
            PasswordStrength::Fair
        );
    }

    #[test]
    fn mixed_classes_improve_the_grade() {
        assert_eq!(
            evaluate_password_strength("abcdefg1"),
            PasswordStrength::Fair
        );
        assert_eq!(
            evaluate_password_strength("Abcdefg1!abc"),
            PasswordStrength::Strong
        );
    }

    #[test]
    fn long_varied_passphrase_is_strong() {
        assert_eq!(
            evaluate_password_strength("correct-horse-battery-staple-9X"),
            PasswordStrength::Strong
        );
    }

    #[test]
    fn grades_order_weakest_first() {
        assert!(PasswordStrength::Weak < PasswordStrength::Fair);
        assert!(PasswordStrength::Fair < PasswordStrength::Good);
        assert!(PasswordStrength::Good < PasswordStrength::Strong);
    }
}
