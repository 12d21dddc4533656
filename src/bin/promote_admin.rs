//! Admin Promotion CLI
//! Mission: Out-of-band role promotion - the only way a user becomes admin

use anyhow::{bail, Context, Result};
use clap::Parser;
use dotenv::dotenv;
use feedback_portal::auth::models::Role;
use feedback_portal::auth::UserStore;

#[derive(Parser)]
#[command(name = "promote-admin", about = "Promote a user to the admin role")]
struct Args {
    /// Name or email of the user to promote
    identifier: String,

    /// Path to the SQLite database
    #[arg(long, env = "DATABASE_PATH", default_value = "feedback_portal.db")]
    database: String,
}

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let store = UserStore::new(&args.database).context("Failed to open user store")?;

    // Try email first, then display name
    let user = match store.get_user_by_email(&args.identifier)? {
        Some(user) => user,
        None => match store.get_user_by_name(&args.identifier)? {
            Some(user) => user,
            None => bail!("User not found by email or name: {}", args.identifier),
        },
    };

    if user.role == Role::Admin {
        println!("User \"{}\" ({}) is already an admin.", user.name, user.email);
        return Ok(());
    }

    store.set_role(&user.id, Role::Admin)?;
    println!("Promoted \"{}\" ({}) to admin.", user.name, user.email);

    Ok(())
}
