use crate::config::DemoUser;
use crate::error::AppError;
use crate::models::User;

/// Validates credentials against the static table loaded from configuration.
/// The table is fixed at construction; there is no ambient global store.
#[derive(Debug, Clone)]
pub struct AuthManager {
    users: Vec<DemoUser>,
}

impl AuthManager {
    pub fn new(users: Vec<DemoUser>) -> Self {
        Self { users }
    }

    pub fn validate(&self, username: &str, password: &str) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Unauthorized("Please enter a username".to_string()));
        }

        match self.users.iter().find(|u| u.username == username) {
            Some(stored) if stored.password == password => Ok(User::new(username, &stored.role)),
            Some(_) => Err(AppError::Unauthorized("Incorrect password".to_string())),
            None => Err(AppError::Unauthorized("Unknown user".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> AuthManager {
        AuthManager::new(vec![DemoUser {
            username: "operator".to_string(),
            password: "fish".to_string(),
            role: "farm_operator".to_string(),
        }])
    }

    #[test]
    fn valid_credentials_grant_a_user() {
        let user = manager().validate("operator", "fish").unwrap();
        assert_eq!(user.username, "operator");
        assert_eq!(user.role, "farm_operator");
    }

    #[test]
    fn trims_the_username() {
        assert!(manager().validate(" operator ", "fish").is_ok());
    }

    #[test]
    fn rejects_bad_password_and_unknown_user() {
        assert!(manager().validate("operator", "shark").is_err());
        assert!(manager().validate("nobody", "fish").is_err());
        assert!(manager().validate("", "fish").is_err());
    }
}
