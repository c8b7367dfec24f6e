//! User endpoints.

use common::User;
use reqwest::Method;

use crate::client::{ClientError, Expect, ForgeClient, Payload, Reply};

/// User calls.
pub struct UserService<'a> {
    pub(crate) api: &'a ForgeClient,
}

impl UserService<'_> {
    /// Fetch the profile of the authorized user.
    pub async fn get_user_info(&self) -> Result<Reply<User>, ClientError> {
        self.api
            .call(Method::GET, "user", Payload::None, Expect::Get)
            .await
    }
}
