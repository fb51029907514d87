//! User seeding: fixed demo accounts, admin bootstrap and fake students.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use gradebook_core::hash_password_with_cost;
use gradebook_db::Store;
use gradebook_models::{Email, NewUser, Role, User};

/// Returns the user registered under `email`, creating it first if needed.
/// The flag is `true` when the user was created by this call.
pub async fn ensure_user(
    store: &dyn Store,
    name: &str,
    email: &Email,
    password: &str,
    role: Role,
    password_cost: u32,
) -> anyhow::Result<(User, bool)> {
    if let Some(existing) = store.find_credentials_by_email(email).await? {
        return Ok((existing.user, false));
    }

    let password_hash = hash_password_with_cost(password, password_cost).map_err(|e| e.error)?;
    let user = store
        .create_user(NewUser {
            name: name.to_string(),
            email: email.clone(),
            password_hash,
            role,
        })
        .await?;

    Ok((user, true))
}

/// Creates an admin account. This and seeding are the only ways an admin
/// comes into existence.
pub async fn create_admin(
    store: &dyn Store,
    name: &str,
    email: &str,
    password: &str,
    password_cost: u32,
) -> anyhow::Result<User> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Name is required");
    }
    let email = Email::new(email).map_err(|_| anyhow::anyhow!("Invalid email format"))?;
    if password.len() < 6 {
        anyhow::bail!("Password must be at least 6 characters");
    }
    if store.email_exists(&email).await? {
        anyhow::bail!("Email already in use");
    }

    let (user, _) = ensure_user(store, name, &email, password, Role::Admin, password_cost).await?;
    Ok(user)
}

/// Generates `count` student names with addresses under `example.com`.
pub fn generate_students(count: usize) -> Vec<(String, Email)> {
    let batch: u32 = (1000..10000).fake();

    (0..count)
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email = Email::new_unchecked(format!(
                "{}.{}+{}{}@example.com",
                slug(&first_name),
                slug(&last_name),
                batch,
                idx
            ));
            (format!("{} {}", first_name, last_name), email)
        })
        .collect()
}

fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_emails_are_valid_and_distinct() {
        let students = generate_students(20);
        assert_eq!(students.len(), 20);

        for (name, email) in &students {
            assert!(!name.is_empty());
            assert!(Email::new(email.as_str()).is_ok(), "{} is not valid", email);
        }

        let mut emails: Vec<&str> = students.iter().map(|(_, e)| e.as_str()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 20);
    }

    #[test]
    fn test_slug_strips_punctuation() {
        assert_eq!(slug("O'Connor"), "oconnor");
        assert_eq!(slug("Mary-Jane"), "maryjane");
    }
}
