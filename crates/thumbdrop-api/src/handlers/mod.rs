pub mod health;
pub mod upload_single;
pub mod upload_single_or_zip;
pub mod uploads;
