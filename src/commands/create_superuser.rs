//! Create-superuser command implementation

use crate::{
    storage::{FantasyDatabase, NewUser, User},
    Result,
};

pub struct SuperuserParams {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Create a staff superuser (and its manager profile)
pub fn handle_create_superuser(db: &mut FantasyDatabase, params: SuperuserParams) -> Result<User> {
    let new_user = NewUser::new(params.email, params.password)
        .names(params.first_name, params.last_name)
        .staff(true)
        .superuser(true);

    let user = db.create_superuser(&new_user)?;
    println!("✓ Superuser created: {}", user);
    Ok(user)
}
