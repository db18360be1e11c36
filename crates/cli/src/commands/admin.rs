//! Back-office user creation command.

use tracing::info;

use cyna_core::Role;
use cyna_server::db::{self, UserRepository};
use cyna_server::services::auth::AuthService;

/// Create a back-office user with the given role.
///
/// # Errors
///
/// Returns an error if validation fails, the email is already registered,
/// or the database is unreachable.
pub async fn create_user(
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    role: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let role: Role = role.parse()?;

    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let auth = AuthService::new(&pool);
    let user = auth.register(email, password, first_name, last_name).await?;

    let users = UserRepository::new(&pool);
    let user = if role == Role::Client {
        user
    } else {
        users.update_role(user.id, role).await?
    };

    // CLI-created accounts skip the email verification round trip.
    users.mark_email_verified(user.id).await?;

    info!(user_id = %user.id, email = %user.email, role = %user.role, "user created");
    Ok(())
}
