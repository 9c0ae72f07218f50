//! crates/portal_core/src/gate.rs
//!
//! Credential checks for the portal's sign-in form. There is no identity
//! provider: an official university email plus the student's roll number is
//! enough to enter.

/// Accepted email markers, matched case-insensitively anywhere in the address.
const ACCEPTED_DOMAINS: [&str; 2] = ["@ncuindia.edu", "ncu@india.edu"];

/// The two flavours of the sign-in form. They validate identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    SignIn,
    /// First-time account activation.
    Activate,
}

impl LoginMode {
    pub fn toggled(self) -> Self {
        match self {
            LoginMode::SignIn => LoginMode::Activate,
            LoginMode::Activate => LoginMode::SignIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Access Restricted. You must use an official @ncuindia.edu email address.")]
    InvalidDomain,
    #[error("Invalid credentials. Please verify your Roll Number.")]
    CredentialMismatch,
}

impl LoginError {
    /// The text shown under the form, which depends on the form's mode.
    pub fn message(self, mode: LoginMode) -> &'static str {
        match (self, mode) {
            (LoginError::CredentialMismatch, LoginMode::Activate) => {
                "Verification Failed. Roll Number does not match our records for this email."
            }
            (LoginError::MissingFields, _) => "Please fill in all required fields.",
            (LoginError::InvalidDomain, _) => {
                "Access Restricted. You must use an official @ncuindia.edu email address."
            }
            (LoginError::CredentialMismatch, LoginMode::SignIn) => {
                "Invalid credentials. Please verify your Roll Number."
            }
        }
    }
}

/// Validates a sign-in attempt. The first failing rule wins.
pub fn attempt_login(
    email: &str,
    password: &str,
    expected_roll_number: &str,
) -> Result<(), LoginError> {
    if email.is_empty() || password.is_empty() {
        return Err(LoginError::MissingFields);
    }

    let email = email.to_lowercase();
    if !ACCEPTED_DOMAINS.iter().any(|domain| email.contains(*domain)) {
        return Err(LoginError::InvalidDomain);
    }

    if password.trim().to_uppercase() != expected_roll_number.to_uppercase() {
        return Err(LoginError::CredentialMismatch);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_number_is_trim_and_case_insensitive() {
        assert_eq!(attempt_login("student@ncuindia.edu", "25csu078", "25CSU078"), Ok(()));
        assert_eq!(attempt_login("Student@NCUINDIA.edu", "  25csu078 ", "25CSU078"), Ok(()));
        assert_eq!(attempt_login("someone.ncu@india.edu", "25CSU078", "25csu078"), Ok(()));
    }

    #[test]
    fn empty_fields_fail_first() {
        assert_eq!(attempt_login("", "", "25CSU078"), Err(LoginError::MissingFields));
        assert_eq!(attempt_login("gmail.com", "", "25CSU078"), Err(LoginError::MissingFields));
        assert_eq!(attempt_login("", "25CSU078", "25CSU078"), Err(LoginError::MissingFields));
    }

    #[test]
    fn wrong_domain_fails_regardless_of_password() {
        for password in ["25CSU078", "wrong", " "] {
            assert_eq!(
                attempt_login("student@gmail.com", password, "25CSU078"),
                Err(LoginError::InvalidDomain)
            );
        }
        assert_eq!(
            attempt_login("student@ncuindia.org", "25CSU078", "25CSU078"),
            Err(LoginError::InvalidDomain)
        );
    }

    #[test]
    fn wrong_roll_number_is_a_mismatch() {
        assert_eq!(
            attempt_login("student@ncuindia.edu", "25CSU079", "25CSU078"),
            Err(LoginError::CredentialMismatch)
        );
        // Whitespace-only passes the presence check but not the comparison.
        assert_eq!(
            attempt_login("student@ncuindia.edu", "   ", "25CSU078"),
            Err(LoginError::CredentialMismatch)
        );
    }

    #[test]
    fn mismatch_message_follows_mode() {
        assert!(LoginError::CredentialMismatch
            .message(LoginMode::Activate)
            .starts_with("Verification Failed"));
        assert_eq!(
            LoginError::CredentialMismatch.message(LoginMode::SignIn),
            LoginError::CredentialMismatch.to_string()
        );
        assert_eq!(LoginMode::SignIn.toggled(), LoginMode::Activate);
    }
}
