//! Berita - a small server-rendered news site
//!
//! Articles and their journalists (wartawan) live in SQLite. Each article is
//! rendered on its own page inside the main layout, with a paginated listing
//! to navigate between them.

pub mod config;
pub mod db;
pub mod html;
pub mod model;
pub mod routes;
pub mod view;
