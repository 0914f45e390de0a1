/**
 * Routes Module
 * Page, blog, feed and operational handlers
 */

pub mod assets;
pub mod blog;
pub mod health;
pub mod language;
pub mod pages;
pub mod rss;
