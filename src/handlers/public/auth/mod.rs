// handlers/public/auth/mod.rs - Public authentication handlers
pub mod login;

pub use login::login_post;
