//! In-memory identity provider.
//!
//! Stands in for the external provider during development and in tests.
//! Accounts are registered programmatically; password comparison is plain
//! equality because credential hashing is the real provider's concern, not
//! this core's.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{LoginCredentials, Principal, PrincipalId};

struct Account {
    email: String,
    password: String,
    display_name: String,
}

/// Process-local identity provider with programmatic registration.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    accounts: RwLock<HashMap<PrincipalId, Account>>,
}

impl InMemoryIdentityProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account and return its principal id.
    pub fn register(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<PrincipalId, IdentityProviderError> {
        let id = PrincipalId::random();
        let account = Account {
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
        };
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| IdentityProviderError::protocol("account lock poisoned"))?;
        accounts.insert(id.clone(), account);
        Ok(id)
    }

    fn guard(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<PrincipalId, Account>>, IdentityProviderError>
    {
        self.accounts
            .read()
            .map_err(|_| IdentityProviderError::protocol("account lock poisoned"))
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn resolve(
        &self,
        id: &PrincipalId,
    ) -> Result<Option<Principal>, IdentityProviderError> {
        let accounts = self.guard()?;
        Ok(accounts
            .get(id)
            .map(|account| Principal::new(id.clone(), account.display_name.clone())))
    }

    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Option<PrincipalId>, IdentityProviderError> {
        let accounts = self.guard()?;
        Ok(accounts
            .iter()
            .find(|(_, account)| {
                account.email == credentials.email() && account.password == credentials.password()
            })
            .map(|(id, _)| id.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn registered_accounts_resolve_and_authenticate() {
        let provider = InMemoryIdentityProvider::new();
        let id = provider
            .register("asha@campus.example", "pw", "Asha")
            .expect("register");

        let principal = provider.resolve(&id).await.expect("resolve").expect("known");
        assert_eq!(principal.display_name(), "Asha");

        let creds = LoginCredentials::try_from_parts("asha@campus.example", "pw").expect("creds");
        assert_eq!(provider.authenticate(&creds).await.expect("auth"), Some(id));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_ids_miss() {
        let provider = InMemoryIdentityProvider::new();
        let _id = provider
            .register("asha@campus.example", "pw", "Asha")
            .expect("register");

        let creds = LoginCredentials::try_from_parts("asha@campus.example", "nope").expect("creds");
        assert_eq!(provider.authenticate(&creds).await.expect("auth"), None);
        assert!(provider
            .resolve(&PrincipalId::random())
            .await
            .expect("resolve")
            .is_none());
    }

    #[test]
    fn poisoned_accounts_fail_registration_instead_of_dropping_it() {
        let provider = std::sync::Arc::new(InMemoryIdentityProvider::new());
        let poisoner = std::sync::Arc::clone(&provider);
        let _join = std::thread::spawn(move || {
            let _guard = poisoner.accounts.write().expect("write lock");
            panic!("poison the account lock");
        })
        .join();

        let err = provider
            .register("asha@campus.example", "pw", "Asha")
            .expect_err("poisoned lock must surface");
        assert!(matches!(err, IdentityProviderError::Protocol { .. }));
    }
}
