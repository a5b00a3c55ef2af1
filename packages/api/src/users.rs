//! Admin user management endpoints.

use store::UserProfile;

use crate::client::{authorized, ApiClient};
use crate::error::ApiError;

impl ApiClient {
    pub async fn list_users(&self, token: &str) -> Result<Vec<UserProfile>, ApiError> {
        Self::send_json(authorized(self.get("/users"), token)).await
    }

    pub async fn delete_user(&self, token: &str, id: &str) -> Result<(), ApiError> {
        Self::send_unit(authorized(self.delete(&format!("/users/{id}")), token)).await
    }
}
