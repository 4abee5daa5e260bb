pub mod movie;
pub mod pg_rating;
