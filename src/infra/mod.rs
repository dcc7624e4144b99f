pub mod clipboard;
pub mod mal;
pub mod nyaa;
pub mod pool;
