pub mod crack_mask;
pub mod health;
